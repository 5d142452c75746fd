//! Output plumbing shared by the command line front end

use derive_new::new;
use minus::Pager;
use std::io::{self, StdoutLock, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// The pager only accepts string slices, so bytes are checked for UTF-8
/// before being forwarded. Nothing is displayed until the pager is handed to
/// [`minus::page_all`], which [`Output::finish`] does.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn into_pager(self) -> Pager {
        self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination of a command's output: the pager or plain stdout.
pub enum Output {
    Paged(PagerWriter),
    Plain(StdoutLock<'static>),
}

impl Output {
    pub fn stdout(paged: bool) -> Self {
        if paged {
            Output::Paged(PagerWriter::new(Pager::new()))
        } else {
            Output::Plain(io::stdout().lock())
        }
    }

    pub fn is_paged(&self) -> bool {
        matches!(self, Output::Paged(_))
    }

    /// Flushes plain output, or hands buffered output to the pager and
    /// blocks until the user quits it.
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Output::Paged(writer) => minus::page_all(writer.into_pager())?,
            Output::Plain(mut stdout) => stdout.flush()?,
        }

        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Paged(writer) => writer.write(buf),
            Output::Plain(stdout) => stdout.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Paged(writer) => writer.flush(),
            Output::Plain(stdout) => stdout.flush(),
        }
    }
}
