//! Mock patient roster for the doctor dashboard.

use serde::{Deserialize, Serialize};

use super::RiskLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub drug: String,
    pub gene: String,
    pub risk: RiskLevel,
    /// ISO date of the most recent analysis.
    pub last_analysis: String,
}

impl PatientRecord {
    /// Case-insensitive match against name, id and drug.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.id.to_lowercase().contains(&query)
            || self.drug.to_lowercase().contains(&query)
    }
}

const ROSTER: [(&str, &str, u32, &str, &str, RiskLevel, &str); 8] = [
    ("P-001", "James Wilson", 62, "Warfarin", "CYP2C9", RiskLevel::Adjust, "2026-02-18"),
    ("P-002", "Sarah Chen", 45, "Clopidogrel", "CYP2C19", RiskLevel::Toxic, "2026-02-18"),
    ("P-003", "Robert Miller", 57, "Simvastatin", "SLCO1B1", RiskLevel::Safe, "2026-02-17"),
    ("P-004", "Emily Davis", 38, "Codeine", "CYP2D6", RiskLevel::Toxic, "2026-02-17"),
    ("P-005", "Michael Brown", 71, "Tamoxifen", "CYP2D6", RiskLevel::Adjust, "2026-02-16"),
    ("P-006", "Lisa Anderson", 53, "Abacavir", "HLA-B", RiskLevel::Toxic, "2026-02-16"),
    ("P-007", "David Thompson", 49, "Carbamazepine", "HLA-A", RiskLevel::Safe, "2026-02-15"),
    ("P-008", "Jennifer Garcia", 66, "Fluorouracil", "DPYD", RiskLevel::Adjust, "2026-02-15"),
];

/// The hardcoded patient list.
pub fn mock_patients() -> Vec<PatientRecord> {
    ROSTER
        .iter()
        .map(|&(id, name, age, drug, gene, risk, last_analysis)| PatientRecord {
            id: id.to_string(),
            name: name.to_string(),
            age,
            drug: drug.to_string(),
            gene: gene.to_string(),
            risk,
            last_analysis: last_analysis.to_string(),
        })
        .collect()
}

/// Patients matching an optional search query.
pub fn search_patients(query: Option<&str>) -> Vec<PatientRecord> {
    let patients = mock_patients();
    match query {
        Some(query) => patients.into_iter().filter(|p| p.matches(query)).collect(),
        None => patients,
    }
}

/// Headline counts shown above the patient table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub critical_alerts: usize,
    pub dose_adjustments: usize,
    pub standard_dosing: usize,
}

impl DashboardStats {
    pub fn from_patients(patients: &[PatientRecord]) -> Self {
        let count = |risk| patients.iter().filter(|p| p.risk == risk).count();
        Self {
            total_patients: patients.len(),
            critical_alerts: count(RiskLevel::Toxic),
            dose_adjustments: count(RiskLevel::Adjust),
            standard_dosing: count(RiskLevel::Safe),
        }
    }
}
