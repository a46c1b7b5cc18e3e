//! Critical-finding alerts. Acknowledged after a simulated delivery delay;
//! nothing is actually sent.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{AlertAck, Severity, DEFAULT_ALERT_MESSAGE};

pub const PATIENT_REQUIRED: &str = "Patient ID is required";
pub const SEND_FAILED: &str = "Failed to send alert";

/// Body of `POST /api/send-alert`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    /// Any JSON scalar; numbers are accepted as ids.
    #[serde(default)]
    pub patient_id: Option<Value>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The id as text. Empty strings, `null`, `false` and `0` count as missing.
fn patient_id_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Validate a request and fill in defaults.
pub fn acknowledge(request: AlertRequest, sent_at: DateTime<Utc>) -> Result<AlertAck, ApiError> {
    let patient_id = request
        .patient_id
        .and_then(patient_id_text)
        .ok_or_else(|| ApiError::missing(PATIENT_REQUIRED))?;

    let severity = match request.severity.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Severity::default(),
        Some(s) => Severity::parse(s).ok_or_else(|| {
            ApiError::Invalid("Severity must be one of critical, warning".to_string())
        })?,
    };

    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ALERT_MESSAGE.to_string());

    Ok(AlertAck {
        patient_id,
        severity,
        message,
        sent_at: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Acknowledge an alert after the simulated delivery delay.
pub async fn dispatch(request: AlertRequest, delay: Duration) -> Result<AlertAck, ApiError> {
    let ack = acknowledge(request, Utc::now())?;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    tracing::info!(patient_id = %ack.patient_id, severity = ?ack.severity, "alert acknowledged");
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let ack = acknowledge(
            AlertRequest {
                patient_id: Some("P-002".into()),
                ..Default::default()
            },
            at_noon(),
        )
        .unwrap();
        assert_eq!(ack.patient_id, "P-002");
        assert_eq!(ack.severity, Severity::Critical);
        assert_eq!(ack.message, DEFAULT_ALERT_MESSAGE);
        assert_eq!(ack.sent_at, "2026-02-18T12:00:00.000Z");
    }

    #[test]
    fn test_explicit_fields() {
        let ack = acknowledge(
            AlertRequest {
                patient_id: Some("P-005".into()),
                severity: Some("Warning".into()),
                message: Some("Check INR".into()),
            },
            at_noon(),
        )
        .unwrap();
        assert_eq!(ack.severity, Severity::Warning);
        assert_eq!(ack.message, "Check INR");
    }

    #[test]
    fn test_rejections() {
        let err = acknowledge(AlertRequest::default(), at_noon()).unwrap_err();
        assert_eq!(err.to_string(), PATIENT_REQUIRED);

        let err = acknowledge(
            AlertRequest {
                patient_id: Some("P-001".into()),
                severity: Some("apocalyptic".into()),
                message: None,
            },
            at_noon(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }

    #[test]
    fn test_numeric_patient_id() {
        let request: AlertRequest = serde_json::from_str(r#"{"patientId": 7}"#).unwrap();
        let ack = acknowledge(request, at_noon()).unwrap();
        assert_eq!(ack.patient_id, "7");

        for missing in [r#"{"patientId": 0}"#, r#"{"patientId": null}"#, r#"{"patientId": "  "}"#] {
            let request: AlertRequest = serde_json::from_str(missing).unwrap();
            let err = acknowledge(request, at_noon()).unwrap_err();
            assert_eq!(err.to_string(), PATIENT_REQUIRED, "{missing}");
        }
    }

    #[tokio::test]
    async fn test_dispatch_without_delay() {
        let ack = dispatch(
            AlertRequest {
                patient_id: Some("P-004".into()),
                ..Default::default()
            },
            Duration::ZERO,
        )
        .await
        .unwrap();
        assert_eq!(ack.patient_id, "P-004");
    }
}
