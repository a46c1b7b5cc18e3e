//! Critical-finding alerts sent from the doctor dashboard.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ALERT_MESSAGE: &str = "Critical pharmacogenomic interaction detected";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Critical,
    Warning,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            _ => None,
        }
    }
}

/// Acknowledgement returned once an alert has been "sent".
///
/// Nothing is delivered anywhere; the acknowledgement echoes the request
/// with defaults filled in and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAck {
    pub patient_id: String,
    pub severity: Severity,
    pub message: String,
    /// RFC 3339, UTC.
    pub sent_at: String,
}
