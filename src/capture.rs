//! Buffering capture sink: drain, mirror, classify, dispatch

use std::sync::{Arc, Mutex};

use crate::error::TapError;
use crate::observer::SqlObserver;
use crate::sink::OutputSink;

/// Sink that buffers written bytes and, on flush, mirrors them unmodified to
/// the default sink before dispatching tagged SQL lines to the observer.
pub struct CaptureSink {
    buffer: Mutex<Vec<u8>>,
    default: Arc<dyn OutputSink>,
    observer: Arc<dyn SqlObserver>,
    prefix: String,
}

impl CaptureSink {
    pub(crate) fn new(
        default: Arc<dyn OutputSink>,
        observer: Arc<dyn SqlObserver>,
        prefix: String,
        capacity: usize,
    ) -> Self {
        Self {
            buffer: Mutex::new(Vec::with_capacity(capacity)),
            default,
            observer,
            prefix,
        }
    }

    /// Bytes buffered and not yet flushed.
    pub(crate) fn buffered(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }
}

impl OutputSink for CaptureSink {
    fn write(&self, bytes: &[u8]) -> Result<(), TapError> {
        self.buffer.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    /// Drain the buffer, mirror it to the default sink, then dispatch the
    /// payload of each tagged line to the observer in line order.
    ///
    /// Draining and mirroring share the buffer lock with the write path, so
    /// concurrent flushes take disjoint, ordered snapshots and a concurrent
    /// write lands either fully inside a snapshot or fully outside it.
    /// Dispatch runs after the lock is released. Classification covers only
    /// the lines present in this flush's snapshot; a tagged line split
    /// across two flushes is not reassembled.
    fn flush(&self) -> Result<(), TapError> {
        let drained = {
            let mut buffer = self.buffer.lock().unwrap();
            let drained = std::mem::take(&mut *buffer);
            if !drained.is_empty() {
                self.default.write(&drained)?;
                self.default.flush()?;
            }
            drained
        };

        if drained.is_empty() {
            return Ok(());
        }

        // The mirror above re-emits the raw bytes, so the lossy decode here
        // only affects what gets scanned, never what downstream output sees.
        let text = String::from_utf8_lossy(&drained);
        let mut dispatched = 0usize;
        for line in text.split('\n') {
            if let Some(sql) = line.strip_prefix(self.prefix.as_str()) {
                self.observer
                    .handle_sql(sql)
                    .map_err(|source| TapError::Observer { source })?;
                dispatched += 1;
            }
        }

        tracing::trace!(
            bytes = drained.len(),
            dispatched,
            "flushed captured output"
        );
        Ok(())
    }
}
