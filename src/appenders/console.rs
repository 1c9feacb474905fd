//! Console appender implementation

use crate::core::{Appender, LogEntry, RecordFormatter, Result};
use std::io::{self, Write};

/// Writes colored records to the standard error stream.
///
/// Any other writer can be substituted with [`ConsoleAppender::with_writer`],
/// which is how tests capture console output.
pub struct ConsoleAppender {
    formatter: RecordFormatter,
    writer: Box<dyn Write + Send + Sync>,
}

impl ConsoleAppender {
    pub fn new(formatter: RecordFormatter) -> Self {
        Self::with_writer(formatter, io::stderr())
    }

    pub fn with_writer(formatter: RecordFormatter, writer: impl Write + Send + Sync + 'static) -> Self {
        Self {
            formatter,
            writer: Box::new(writer),
        }
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.formatter.format(entry);
        output.push('\n');
        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
