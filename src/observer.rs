//! Observer seam receiving SQL payloads extracted from tagged lines

use std::sync::mpsc::Sender;
use std::sync::Mutex;

use anyhow::Result;

/// Receives SQL statements observed in the captured output stream.
///
/// Called synchronously from the flush path, in line order; the flush that
/// observed a statement does not return until the callback does, so
/// implementations should stay fast and non-blocking.
pub trait SqlObserver: Send + Sync {
    /// Handle one SQL statement extracted from a tagged line.
    fn handle_sql(&self, sql: &str) -> Result<()>;
}

/// Observer that records statements in arrival order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    statements: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements recorded so far, in dispatch order.
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    /// Drain the recorded statements.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.statements.lock().unwrap())
    }
}

impl SqlObserver for RecordingObserver {
    fn handle_sql(&self, sql: &str) -> Result<()> {
        self.statements.lock().unwrap().push(sql.to_string());
        Ok(())
    }
}

/// Observer that forwards statements into an mpsc channel.
///
/// A send failure (the receiver was dropped) is an observer error and
/// propagates to the flush caller.
pub struct ChannelObserver {
    sender: Sender<String>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }
}

impl SqlObserver for ChannelObserver {
    fn handle_sql(&self, sql: &str) -> Result<()> {
        self.sender
            .send(sql.to_string())
            .map_err(|e| anyhow::anyhow!("failed to forward SQL statement: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn recording_observer_preserves_order() {
        let observer = RecordingObserver::new();
        observer.handle_sql("SELECT 1").unwrap();
        observer.handle_sql("SELECT 2").unwrap();
        assert_eq!(observer.statements(), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn recording_observer_take_drains() {
        let observer = RecordingObserver::new();
        observer.handle_sql("DELETE FROM t").unwrap();
        assert_eq!(observer.take(), vec!["DELETE FROM t"]);
        assert!(observer.statements().is_empty());
    }

    #[test]
    fn channel_observer_forwards_statements() {
        let (sender, receiver) = mpsc::channel();
        let observer = ChannelObserver::new(sender);
        observer.handle_sql("INSERT INTO t VALUES (1)").unwrap();
        assert_eq!(receiver.recv().unwrap(), "INSERT INTO t VALUES (1)");
    }

    #[test]
    fn channel_observer_errors_when_receiver_dropped() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);
        let observer = ChannelObserver::new(sender);
        assert!(observer.handle_sql("SELECT 1").is_err());
    }
}
