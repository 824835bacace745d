//! Redirection lifecycle: swap the active output path between pass-through
//! and capture

use std::sync::{Arc, Mutex};

use crate::capture::CaptureSink;
use crate::error::TapError;
use crate::format::SQL_LINE_PREFIX;
use crate::observer::SqlObserver;
use crate::sink::{OutputSink, StdoutSink};

/// Configuration for an output tap.
#[derive(Debug, Clone)]
pub struct TapConfig {
    /// Exact prefix marking a line as an encoded SQL statement.
    pub prefix: String,
    /// Initial capacity of the capture buffer in bytes.
    pub buffer_capacity: usize,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            prefix: SQL_LINE_PREFIX.to_string(),
            buffer_capacity: 2048,
        }
    }
}

/// Handle through which a system under test writes its standard output.
///
/// The tap captures the default sink once, at construction, and routes every
/// write either straight to it (pass-through) or into a [`CaptureSink`]
/// installed by [`enable`](OutputTap::enable). The default sink reference is
/// never replaced, so [`disable`](OutputTap::disable) always has a fallback
/// to restore.
pub struct OutputTap {
    default: Arc<dyn OutputSink>,
    active: Mutex<Option<Arc<CaptureSink>>>,
    config: TapConfig,
}

impl OutputTap {
    /// Create a tap over the given default sink.
    pub fn new(default: Arc<dyn OutputSink>, config: TapConfig) -> Self {
        Self {
            default,
            active: Mutex::new(None),
            config,
        }
    }

    /// Tap over the real process stdout with the default configuration.
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink), TapConfig::default())
    }

    /// Start capturing: install a fresh capture sink bound to `observer`.
    ///
    /// Calling this while capture is already enabled installs a new sink and
    /// discards any unflushed bytes of the previous one.
    pub fn enable(&self, observer: Arc<dyn SqlObserver>) {
        let sink = Arc::new(CaptureSink::new(
            Arc::clone(&self.default),
            observer,
            self.config.prefix.clone(),
            self.config.buffer_capacity,
        ));
        let previous = self.active.lock().unwrap().replace(sink);
        if let Some(previous) = previous {
            let discarded = previous.buffered();
            if discarded > 0 {
                tracing::warn!(discarded, "replaced capture sink with unflushed bytes");
            }
        }
        tracing::debug!("stdout capture enabled");
    }

    /// Stop capturing and restore pass-through to the default sink.
    ///
    /// Idempotent. Unflushed bytes in the discarded capture sink are
    /// dropped.
    pub fn disable(&self) {
        match self.active.lock().unwrap().take() {
            Some(previous) => {
                let discarded = previous.buffered();
                if discarded > 0 {
                    tracing::warn!(discarded, "disabled capture with unflushed bytes");
                }
                tracing::debug!("stdout capture disabled");
            }
            None => tracing::debug!("stdout capture already disabled"),
        }
    }

    /// Whether a capture sink is currently installed.
    pub fn is_enabled(&self) -> bool {
        self.active.lock().unwrap().is_some()
    }

    /// Adapter implementing [`std::io::Write`] over this tap.
    pub fn writer(self: Arc<Self>) -> TapWriter {
        TapWriter { tap: self }
    }

    fn current(&self) -> Option<Arc<CaptureSink>> {
        self.active.lock().unwrap().clone()
    }
}

impl OutputSink for OutputTap {
    fn write(&self, bytes: &[u8]) -> Result<(), TapError> {
        match self.current() {
            Some(sink) => sink.write(bytes),
            None => self.default.write(bytes),
        }
    }

    fn flush(&self) -> Result<(), TapError> {
        match self.current() {
            Some(sink) => sink.flush(),
            None => self.default.flush(),
        }
    }
}

/// [`std::io::Write`] adapter so the tap can stand in anywhere a writer is
/// expected.
pub struct TapWriter {
    tap: Arc<OutputTap>,
}

impl TapWriter {
    pub fn new(tap: Arc<OutputTap>) -> Self {
        Self { tap }
    }
}

impl std::io::Write for TapWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        OutputSink::write(&*self.tap, buf).map_err(std::io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        OutputSink::flush(&*self.tap).map_err(std::io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use crate::testing::MemorySink;
    use std::io::Write as _;

    fn tap_over(mirror: Arc<MemorySink>) -> OutputTap {
        OutputTap::new(mirror, TapConfig::default())
    }

    #[test]
    fn passthrough_when_never_enabled() {
        let mirror = Arc::new(MemorySink::new());
        let tap = tap_over(mirror.clone());

        tap.write(b"plain output\n").unwrap();
        assert_eq!(mirror.contents(), "plain output\n");
    }

    #[test]
    fn disable_is_idempotent() {
        let mirror = Arc::new(MemorySink::new());
        let tap = tap_over(mirror);

        tap.disable();
        tap.disable();
        tap.disable();
        assert!(!tap.is_enabled());
    }

    #[test]
    fn is_enabled_tracks_lifecycle() {
        let mirror = Arc::new(MemorySink::new());
        let tap = tap_over(mirror);
        let observer = Arc::new(RecordingObserver::new());

        assert!(!tap.is_enabled());
        tap.enable(observer);
        assert!(tap.is_enabled());
        tap.disable();
        assert!(!tap.is_enabled());
    }

    #[test]
    fn disable_discards_unflushed_bytes() {
        let mirror = Arc::new(MemorySink::new());
        let tap = tap_over(mirror.clone());
        let observer = Arc::new(RecordingObserver::new());

        tap.enable(observer.clone());
        tap.write(b"never flushed").unwrap();
        tap.disable();

        assert!(mirror.bytes().is_empty());
        assert!(observer.statements().is_empty());
    }

    #[test]
    fn writer_adapter_routes_through_tap() {
        let mirror = Arc::new(MemorySink::new());
        let tap = Arc::new(tap_over(mirror.clone()));
        let observer = Arc::new(RecordingObserver::new());
        tap.enable(observer);

        let mut writer = tap.clone().writer();
        writer.write_all(b"adapted\n").unwrap();
        assert_eq!(mirror.contents(), "");
        writer.flush().unwrap();
        assert_eq!(mirror.contents(), "adapted\n");
    }

    #[test]
    fn custom_prefix_is_honored() {
        let mirror = Arc::new(MemorySink::new());
        let config = TapConfig {
            prefix: "DB> ".to_string(),
            ..TapConfig::default()
        };
        let tap = OutputTap::new(mirror, config);
        let observer = Arc::new(RecordingObserver::new());
        tap.enable(observer.clone());

        tap.write(b"DB> SELECT 42\n").unwrap();
        tap.flush().unwrap();
        assert_eq!(observer.statements(), vec!["SELECT 42"]);
    }
}
