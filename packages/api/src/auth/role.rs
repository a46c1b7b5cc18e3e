//! User roles stored as provider user metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three dashboards a user can be admitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Patient, Role::Doctor, Role::Admin];

    /// Parse a role name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Some(Role::Patient),
            "doctor" => Some(Role::Doctor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Read the `role` key out of provider user metadata.
    pub fn from_metadata(metadata: &serde_json::Value) -> Option<Self> {
        metadata.get("role").and_then(|v| v.as_str()).and_then(Role::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    /// Path of the dashboard this role lands on.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patient",
            Role::Doctor => "/doctor",
            Role::Admin => "/admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse() {
        assert_eq!(Role::parse("doctor"), Some(Role::Doctor));
        assert_eq!(Role::parse("  Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("PATIENT"), Some(Role::Patient));
        assert_eq!(Role::parse("nurse"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_from_metadata() {
        assert_eq!(Role::from_metadata(&json!({"role": "doctor"})), Some(Role::Doctor));
        assert_eq!(Role::from_metadata(&json!({"role": "superuser"})), None);
        assert_eq!(Role::from_metadata(&json!({"role": 3})), None);
        assert_eq!(Role::from_metadata(&json!({})), None);
        assert_eq!(Role::from_metadata(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"patient\"").unwrap();
        assert_eq!(role, Role::Patient);
    }

    #[test]
    fn test_dashboard_paths() {
        for role in Role::ALL {
            assert_eq!(role.dashboard_path(), format!("/{}", role));
        }
    }
}
