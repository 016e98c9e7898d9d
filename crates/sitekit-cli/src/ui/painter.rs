//! Colors the run log on its way to the terminal.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// A line-buffered writer that paints ✓ lines green, ✗ lines red and the
/// results heading bold. With color off it forwards bytes untouched.
///
/// Call [`Write::flush`] when done; a trailing partial line is held until then.
#[derive(Debug)]
pub struct LogPainter<W: Write> {
    inner: W,
    color: bool,
    pending: Vec<u8>,
}

impl<W: Write> LogPainter<W> {
    pub fn new(inner: W, color: bool) -> Self {
        Self {
            inner,
            color,
            pending: Vec::new(),
        }
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        let Self { inner, pending, .. } = self;
        debug_assert!(pending.is_empty());
        Ok(inner)
    }

    fn write_painted(&mut self, line: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(line);
        let (body, newline) = match text.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (text.as_ref(), ""),
        };
        let marker = body.trim_start();
        let indent = &body[..body.len() - marker.len()];

        if marker.starts_with('✓') {
            write!(self.inner, "{indent}{}{newline}", marker.green())
        } else if marker.starts_with('✗') {
            write!(self.inner, "{indent}{}{newline}", marker.red())
        } else if marker.starts_with("---") {
            write!(self.inner, "{indent}{}{newline}", marker.bold())
        } else {
            self.inner.write_all(line)
        }
    }
}

impl<W: Write> Write for LogPainter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.color {
            return self.inner.write(buf);
        }

        self.pending.extend_from_slice(buf);
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let rest = self.pending.split_off(end + 1);
            let line = std::mem::replace(&mut self.pending, rest);
            self.write_painted(&line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.write_painted(&line)?;
        }
        self.inner.flush()
    }
}
