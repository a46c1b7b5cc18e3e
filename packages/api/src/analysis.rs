//! # Drug risk analysis
//!
//! Nothing is computed here. With an analysis backend configured, each drug is
//! forwarded together with the uploaded VCF and the backend's report is
//! normalised into a [`DrugResult`]. Without one, every drug gets a placeholder
//! result whose risk level is drawn at random.

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{AnalysisReport, AnalysisSource, DrugResult, RiskLevel};

pub const FILE_REQUIRED: &str = "VCF file is required";
pub const DRUG_REQUIRED: &str = "Drug is required";
pub const BACKEND_FAILED: &str = "Failed to process analysis request";

/// An uploaded VCF file. Never parsed.
#[derive(Debug, Clone, Default)]
pub struct VcfUpload {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl VcfUpload {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Split comma-separated entries, trim them, and drop case-insensitive repeats.
pub fn normalize_drugs<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut drugs: Vec<String> = Vec::new();
    for entry in raw {
        for drug in entry.as_ref().split(',').map(str::trim).filter(|d| !d.is_empty()) {
            if !drugs.iter().any(|d| d.eq_ignore_ascii_case(drug)) {
                drugs.push(drug.to_string());
            }
        }
    }
    drugs
}

/// Placeholder results with a uniformly drawn risk level per drug.
pub fn placeholder_report<R: Rng + ?Sized>(drugs: &[String], rng: &mut R) -> AnalysisReport {
    let results = drugs
        .iter()
        .map(|drug| {
            let risk = RiskLevel::ALL.choose(rng).copied().unwrap_or(RiskLevel::Safe);
            DrugResult::placeholder(drug, risk)
        })
        .collect();
    AnalysisReport {
        success: true,
        source: AnalysisSource::Placeholder,
        results,
    }
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    http: Client,
    backend_url: Option<String>,
}

impl Analyzer {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            backend_url: config.analysis_backend_url.clone(),
        }
    }

    pub fn source(&self) -> AnalysisSource {
        if self.backend_url.is_some() {
            AnalysisSource::Backend
        } else {
            AnalysisSource::Placeholder
        }
    }

    pub async fn analyze(&self, upload: &VcfUpload, drugs: &[String]) -> Result<AnalysisReport, ApiError> {
        if upload.contents.is_empty() {
            return Err(ApiError::missing(FILE_REQUIRED));
        }
        if drugs.is_empty() {
            return Err(ApiError::missing(DRUG_REQUIRED));
        }

        let Some(backend) = self.backend_url.as_deref() else {
            tracing::info!(drugs = drugs.len(), file = %upload.file_name, "placeholder analysis");
            return Ok(placeholder_report(drugs, &mut rand::thread_rng()));
        };

        let mut results = Vec::with_capacity(drugs.len());
        for drug in drugs {
            let report = self.forward(backend, upload, drug).await?;
            results.push(DrugResult::from_backend_report(drug, report));
        }
        tracing::info!(drugs = drugs.len(), file = %upload.file_name, "backend analysis complete");
        Ok(AnalysisReport {
            success: true,
            source: AnalysisSource::Backend,
            results,
        })
    }

    async fn forward(&self, backend: &str, upload: &VcfUpload, drug: &str) -> Result<Value, ApiError> {
        let file = Part::bytes(upload.contents.clone()).file_name(upload.file_name.clone());
        let form = Form::new().part("file", file).text("drug", drug.to_string());

        let response = self
            .http
            .post(format!("{backend}/analyze/"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::upstream(BACKEND_FAILED, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::upstream(
                BACKEND_FAILED,
                format!("Analysis backend returned {status}"),
            ));
        }

        let report: Value = response
            .json()
            .await
            .map_err(|e| ApiError::upstream(BACKEND_FAILED, e))?;
        if let Some(error) = report.get("error").and_then(Value::as_str) {
            return Err(ApiError::upstream(BACKEND_FAILED, error));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_drugs() {
        let drugs = normalize_drugs(["Warfarin", " codeine , WARFARIN,", "", "Simvastatin"]);
        assert_eq!(drugs, vec!["Warfarin", "codeine", "Simvastatin"]);
        assert!(normalize_drugs(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_placeholder_report() {
        let drugs = normalize_drugs(["Warfarin,Codeine,Tamoxifen"]);
        let report = placeholder_report(&drugs, &mut StdRng::seed_from_u64(7));
        assert!(report.success);
        assert_eq!(report.source, AnalysisSource::Placeholder);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[1].drug, "Codeine");
        assert_eq!(report.results[1].gene, "CYP2D6");
        let total: usize = RiskLevel::ALL.iter().map(|r| report.count(*r)).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_placeholder_draws_every_level() {
        let drugs: Vec<String> = (0..60).map(|i| format!("drug{i}")).collect();
        let report = placeholder_report(&drugs, &mut StdRng::seed_from_u64(42));
        for risk in RiskLevel::ALL {
            assert!(report.count(risk) > 0, "{risk:?} never drawn");
        }
    }

    #[tokio::test]
    async fn test_missing_inputs() {
        let analyzer = Analyzer::new(Client::new(), &AppConfig::default());
        let drugs = vec!["Warfarin".to_string()];

        let err = analyzer.analyze(&VcfUpload::default(), &drugs).await.unwrap_err();
        assert_eq!(err.to_string(), FILE_REQUIRED);

        let upload = VcfUpload::new("sample.vcf", "##fileformat=VCFv4.2\n");
        let err = analyzer.analyze(&upload, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), DRUG_REQUIRED);

        let report = analyzer.analyze(&upload, &drugs).await.unwrap();
        assert_eq!(report.source, AnalysisSource::Placeholder);
        assert_eq!(report.results.len(), 1);
    }

    /// gzip magic followed by bytes that are not valid UTF-8.
    const GZIPPED: [u8; 8] = [0x1f, 0x8b, 0x08, 0x00, 0xff, 0xfe, 0x00, 0x80];

    #[tokio::test]
    async fn test_gzipped_upload_forwarded_verbatim() {
        use axum::extract::Multipart;
        use axum::routing::post;
        use axum::{Json, Router};
        use serde_json::json;

        let backend = Router::new().route(
            "/analyze/",
            post(|mut multipart: Multipart| async move {
                let mut name = String::new();
                let mut bytes = Vec::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    if field.name() == Some("file") {
                        name = field.file_name().unwrap_or_default().to_string();
                        bytes = field.bytes().await.unwrap().to_vec();
                    }
                }
                Json(json!({
                    "risk_assessment": { "risk_label": "Safe" },
                    "llm_generated_explanation": {
                        "summary": format!("{name}:{}", bytes == GZIPPED)
                    }
                }))
            }),
        );
        let config = AppConfig {
            analysis_backend_url: Some(crate::test_support::spawn_fake(backend).await),
            ..AppConfig::default()
        };
        let analyzer = Analyzer::new(Client::new(), &config);
        let upload = VcfUpload::new("sample.vcf.gz", GZIPPED.to_vec());
        assert!(std::str::from_utf8(&upload.contents).is_err());

        let report = analyzer
            .analyze(&upload, &["Warfarin".to_string()])
            .await
            .unwrap();
        assert_eq!(report.source, AnalysisSource::Backend);
        assert_eq!(report.results[0].explanation, "sample.vcf.gz:true");
    }
}
