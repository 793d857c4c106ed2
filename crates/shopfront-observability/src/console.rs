//! Console output for formatted log lines.

use std::borrow::Cow;
use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Hands out one [`ConsoleWriter`] per event, tagged with the event level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it as a single console line when
/// dropped.
///
/// In the browser the line goes to `console.error`/`warn`/`info`/`debug`
/// according to the level; elsewhere it goes to stderr.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    /// Create an empty writer for an event at `level`.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }

    /// Level the line will be emitted at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The buffered line without its trailing newline.
    pub fn line(&self) -> Cow<'_, str> {
        match String::from_utf8_lossy(&self.buf) {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim_end()),
            Cow::Owned(s) => Cow::Owned(s.trim_end().to_string()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&self) {
        let line = self.line();
        let text: &str = &line;
        let value = text.into();
        match self.level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::INFO => web_sys::console::info_1(&value),
            _ => web_sys::console::debug_1(&value),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&self) {
        use std::io::Write as _;
        let _ = writeln!(io::stderr(), "{}", self.line());
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            self.emit();
        }
    }
}
