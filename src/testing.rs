//! Test doubles for the output sink seam

use std::sync::Mutex;

use crate::error::TapError;
use crate::sink::OutputSink;

/// Sink capturing raw bytes in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    captured: Mutex<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured bytes decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.captured.lock().unwrap()).to_string()
    }

    /// Raw captured bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.captured.lock().unwrap().clone()
    }
}

impl OutputSink for MemorySink {
    fn write(&self, bytes: &[u8]) -> Result<(), TapError> {
        self.captured.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&self) -> Result<(), TapError> {
        Ok(())
    }
}

/// Sink whose writes always fail, for exercising re-emission failures.
#[derive(Debug, Default)]
pub struct FailingSink;

impl OutputSink for FailingSink {
    fn write(&self, _bytes: &[u8]) -> Result<(), TapError> {
        Err(TapError::Sink(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "default sink is gone",
        )))
    }

    fn flush(&self) -> Result<(), TapError> {
        Ok(())
    }
}
