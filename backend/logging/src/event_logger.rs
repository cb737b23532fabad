//! Evaluation Event Logger
//!
//! Structured lifecycle events (page loaded, evaluated, failed, crawl
//! finished) emitted under the `evaluation_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::{redact_sensitive_data, redact_url};

pub const EVENT_TARGET: &str = "evaluation_events";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum EvaluationEvent {
    PageLoaded {
        url: String,
        status: u16,
        stylesheets: usize,
    },
    PageEvaluated {
        url: String,
        passed: u32,
        warning: u32,
        failed: u32,
        inapplicable: u32,
        duration_ms: u64,
    },
    PageFailed {
        url: String,
        error: String,
    },
    CrawlFinished {
        start_url: String,
        urls: usize,
    },
}

impl EvaluationEvent {
    /// The same event with URLs and error messages redacted.
    fn redacted(mut self) -> Self {
        match &mut self {
            EvaluationEvent::PageLoaded { url, .. } | EvaluationEvent::PageEvaluated { url, .. } => {
                *url = redact_url(url);
            }
            EvaluationEvent::PageFailed { url, error } => {
                *url = redact_url(url);
                *error = redact_sensitive_data(error);
            }
            EvaluationEvent::CrawlFinished { start_url, .. } => {
                *start_url = redact_url(start_url);
            }
        }
        self
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event: EvaluationEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redacts and logs an evaluation lifecycle event.
    pub fn log_event(event: EvaluationEvent) -> EventLogEntry {
        let entry = EventLogEntry {
            timestamp: Utc::now(),
            event: event.redacted(),
        };
        let payload = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: EVENT_TARGET, event = %payload, "Evaluation event");
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_redacted() {
        let entry = EventLogger::log_event(EvaluationEvent::PageFailed {
            url: "https://site.test/?token=abc".to_string(),
            error: "https://me:pw@site.test/ unreachable".to_string(),
        });
        assert_eq!(
            entry.event,
            EvaluationEvent::PageFailed {
                url: "https://site.test/?token=[REDACTED]".to_string(),
                error: "https://[REDACTED]@site.test/ unreachable".to_string(),
            }
        );
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = EvaluationEvent::CrawlFinished {
            start_url: "https://site.test/".to_string(),
            urls: 4,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CrawlFinished");
        assert_eq!(json["urls"], 4);
    }
}
