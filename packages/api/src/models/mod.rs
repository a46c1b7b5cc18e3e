//! Data models shared between the server and the dashboards.

mod alert;
mod analysis;
mod patient;
mod user;

pub use alert::{AlertAck, Severity, DEFAULT_ALERT_MESSAGE};
pub use analysis::{
    gene_for_drug, AnalysisReport, AnalysisSource, DrugResult, RiskLevel, AVAILABLE_DRUGS,
};
pub use patient::{mock_patients, search_patients, DashboardStats, PatientRecord};
pub use user::UserInfo;
