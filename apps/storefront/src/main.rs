fn main() {
    shopfront_web::start();
}
