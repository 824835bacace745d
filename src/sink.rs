//! Output sink seam between the tap and the platform output primitive

use std::io::Write;

use crate::error::TapError;

/// Destination capable of accepting written bytes and finalizing them in
/// batches.
pub trait OutputSink: Send + Sync {
    /// Append bytes to the sink.
    fn write(&self, bytes: &[u8]) -> Result<(), TapError>;

    /// Finalize the current batch of output.
    fn flush(&self) -> Result<(), TapError>;
}

/// Production sink over the real process stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, bytes: &[u8]) -> Result<(), TapError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), TapError> {
        std::io::stdout().lock().flush()?;
        Ok(())
    }
}
