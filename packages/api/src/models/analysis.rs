//! # Drug risk results
//!
//! [`DrugResult`] is what the patient dashboard renders for each analysed drug.
//! It is produced either by normalising a report from the external analysis
//! backend ([`DrugResult::from_backend_report`]) or, when no backend is
//! configured, as a placeholder with a canned recommendation for the drawn
//! [`RiskLevel`] ([`DrugResult::placeholder`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Drugs offered by the patient dashboard's drug selector.
pub const AVAILABLE_DRUGS: [&str; 15] = [
    "Warfarin",
    "Clopidogrel",
    "Codeine",
    "Tamoxifen",
    "Simvastatin",
    "Abacavir",
    "Carbamazepine",
    "Allopurinol",
    "Fluorouracil",
    "Irinotecan",
    "Mercaptopurine",
    "Thiopurine",
    "Azathioprine",
    "Voriconazole",
    "Tacrolimus",
];

const DRUG_GENES: [(&str, &str); 15] = [
    ("codeine", "CYP2D6"),
    ("warfarin", "CYP2C9"),
    ("clopidogrel", "CYP2C19"),
    ("simvastatin", "SLCO1B1"),
    ("azathioprine", "TPMT"),
    ("fluorouracil", "DPYD"),
    ("tamoxifen", "CYP2D6"),
    ("abacavir", "HLA-B"),
    ("carbamazepine", "HLA-A"),
    ("allopurinol", "HLA-B"),
    ("irinotecan", "UGT1A1"),
    ("mercaptopurine", "TPMT"),
    ("thiopurine", "TPMT"),
    ("voriconazole", "CYP2C19"),
    ("tacrolimus", "CYP3A5"),
];

/// Primary pharmacogene for a drug, if the drug is known.
pub fn gene_for_drug(drug: &str) -> Option<&'static str> {
    let drug = drug.trim().to_ascii_lowercase();
    DRUG_GENES
        .iter()
        .find(|(name, _)| *name == drug)
        .map(|(_, gene)| *gene)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Adjust,
    Toxic,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Safe, RiskLevel::Adjust, RiskLevel::Toxic];

    /// Map a free-form label from the analysis backend onto a risk level.
    ///
    /// Anything that is neither toxic/avoid nor adjust counts as safe.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label.contains("toxic") || label.contains("avoid") {
            RiskLevel::Toxic
        } else if label.contains("adjust") {
            RiskLevel::Adjust
        } else {
            RiskLevel::Safe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Adjust => "Adjust Dosage",
            RiskLevel::Toxic => "Toxic",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Adjust => "adjust",
            RiskLevel::Toxic => "toxic",
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Standard dosing is appropriate. No pharmacogenomic-based dose adjustment required. Continue routine monitoring.",
            RiskLevel::Adjust => "Dose modification recommended. Start at a reduced dose and monitor closely following CPIC dosing guidance.",
            RiskLevel::Toxic => "Avoid this drug. Use an alternative agent that does not depend on the affected gene.",
        }
    }
}

/// Risk assessment for one drug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugResult {
    pub drug: String,
    pub risk: RiskLevel,
    pub gene: String,
    pub phenotype: String,
    pub recommendation: String,
    pub explanation: String,
    /// Full backend report, kept for download.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Value>,
}

impl DrugResult {
    /// Placeholder result for `drug` at the given risk level.
    pub fn placeholder(drug: &str, risk: RiskLevel) -> Self {
        let gene = gene_for_drug(drug).unwrap_or("Unknown");
        Self {
            drug: drug.to_string(),
            risk,
            gene: gene.to_string(),
            phenotype: "Not determined".to_string(),
            recommendation: risk.recommendation().to_string(),
            explanation: format!(
                "Placeholder assessment: no analysis backend is configured, so the {gene} result for {drug} was not computed from the uploaded file."
            ),
            report: None,
        }
    }

    /// Normalise a report returned by the analysis backend.
    pub fn from_backend_report(requested_drug: &str, report: Value) -> Self {
        let text = |path: &[&str]| -> String {
            let mut node = &report;
            for key in path {
                match node.get(key) {
                    Some(next) => node = next,
                    None => return String::new(),
                }
            }
            node.as_str().unwrap_or_default().to_string()
        };

        let drug = Some(text(&["drug"]))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| requested_drug.to_string());
        let risk_label = text(&["risk_assessment", "risk_label"]);
        let risk = if risk_label.is_empty() {
            RiskLevel::Safe
        } else {
            RiskLevel::from_label(&risk_label)
        };

        Self {
            drug,
            risk,
            gene: text(&["pharmacogenomic_profile", "primary_gene"]),
            phenotype: text(&["pharmacogenomic_profile", "phenotype"]),
            recommendation: text(&["clinical_recommendation", "recommendation"]),
            explanation: text(&["llm_generated_explanation", "summary"]),
            report: Some(report),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Backend,
    Placeholder,
}

/// Response of the analyze route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub source: AnalysisSource,
    pub results: Vec<DrugResult>,
}

impl AnalysisReport {
    pub fn count(&self, risk: RiskLevel) -> usize {
        self.results.iter().filter(|r| r.risk == risk).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_risk_from_label() {
        assert_eq!(RiskLevel::from_label("Toxic"), RiskLevel::Toxic);
        assert_eq!(RiskLevel::from_label("Avoid"), RiskLevel::Toxic);
        assert_eq!(RiskLevel::from_label("Adjust Dosage"), RiskLevel::Adjust);
        assert_eq!(RiskLevel::from_label("Safe"), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_label("Unknown"), RiskLevel::Safe);
    }

    #[test]
    fn test_gene_for_drug() {
        assert_eq!(gene_for_drug("Warfarin"), Some("CYP2C9"));
        assert_eq!(gene_for_drug(" CODEINE "), Some("CYP2D6"));
        assert_eq!(gene_for_drug("aspirin"), None);
        for drug in AVAILABLE_DRUGS {
            assert!(gene_for_drug(drug).is_some(), "no gene for {drug}");
        }
    }

    #[test]
    fn test_placeholder() {
        let result = DrugResult::placeholder("Clopidogrel", RiskLevel::Toxic);
        assert_eq!(result.gene, "CYP2C19");
        assert_eq!(result.risk, RiskLevel::Toxic);
        assert!(result.recommendation.starts_with("Avoid"));
        assert!(result.report.is_none());

        let unknown = DrugResult::placeholder("Aspirin", RiskLevel::Safe);
        assert_eq!(unknown.gene, "Unknown");
    }

    #[test]
    fn test_from_backend_report() {
        let report = json!({
            "drug": "WARFARIN",
            "risk_assessment": { "risk_label": "Adjust Dosage", "confidence_score": 0.8 },
            "pharmacogenomic_profile": {
                "primary_gene": "CYP2C9",
                "diplotype": "*1/*3",
                "phenotype": "Intermediate Metabolizer"
            },
            "clinical_recommendation": { "recommendation": "Reduce initial dose." },
            "llm_generated_explanation": { "summary": "CYP2C9*3 reduces activity." }
        });
        let result = DrugResult::from_backend_report("Warfarin", report.clone());
        assert_eq!(result.drug, "WARFARIN");
        assert_eq!(result.risk, RiskLevel::Adjust);
        assert_eq!(result.gene, "CYP2C9");
        assert_eq!(result.phenotype, "Intermediate Metabolizer");
        assert_eq!(result.recommendation, "Reduce initial dose.");
        assert_eq!(result.explanation, "CYP2C9*3 reduces activity.");
        assert_eq!(result.report, Some(report));
    }

    #[test]
    fn test_from_sparse_backend_report() {
        let result = DrugResult::from_backend_report("Codeine", json!({}));
        assert_eq!(result.drug, "Codeine");
        assert_eq!(result.risk, RiskLevel::Safe);
        assert!(result.gene.is_empty());
    }
}
