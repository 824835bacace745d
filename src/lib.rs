//! # sqltap
//!
//! Observe SQL statements executed by a system under test by tapping its
//! standard output stream.
//!
//! An embedded test-execution controller hands the system under test an
//! [`OutputTap`] as its standard output. While capture is enabled, written
//! bytes accumulate in a buffer; every flush mirrors them unmodified to the
//! real output (nothing visible changes downstream) and scans them for lines
//! tagged by the SQL logging formatter, forwarding each statement to the
//! registered [`SqlObserver`] before the flush returns.
//!
//! ## Modules
//!
//! - `capture` - Buffering sink with the drain/mirror/classify/dispatch flush path
//! - `error` - Crate error type
//! - `format` - Line format contract shared with the SQL logging formatter
//! - `observer` - Observer seam and stock observers
//! - `sink` - Output sink seam and the production stdout sink
//! - `tap` - Redirection lifecycle handle
//! - `testing` - Test doubles for the sink seam

pub mod capture;
pub mod error;
pub mod format;
pub mod observer;
pub mod sink;
pub mod tap;
pub mod testing;

pub use capture::CaptureSink;
pub use error::TapError;
pub use format::{tag_statement, SQL_LINE_PREFIX};
pub use observer::{ChannelObserver, RecordingObserver, SqlObserver};
pub use sink::{OutputSink, StdoutSink};
pub use tap::{OutputTap, TapConfig, TapWriter};
