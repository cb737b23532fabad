//! Telemetry and structured logging components for a11yforge.
//!
//! Handles log redaction, JSON output generation, file rotation, and evaluation event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EvaluationEvent, EventLogEntry, EventLogger, EVENT_TARGET};
pub use logger::{init_logger, LoggerOptions};
pub use redact::{redact_sensitive_data, redact_url};
