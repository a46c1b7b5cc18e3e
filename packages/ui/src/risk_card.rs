//! Drug risk result cards for the patient dashboard.

use api::models::{AnalysisReport, AnalysisSource, DrugResult, RiskLevel};
use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaTriangleExclamation, FaSkullCrossbones};
use crate::Icon;

fn risk_class(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Safe => "risk risk--safe",
        RiskLevel::Adjust => "risk risk--adjust",
        RiskLevel::Toxic => "risk risk--toxic",
    }
}

#[component]
fn RiskIcon(risk: RiskLevel) -> Element {
    match risk {
        RiskLevel::Safe => rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
        RiskLevel::Adjust => rsx! { Icon { icon: FaTriangleExclamation, width: 16, height: 16 } },
        RiskLevel::Toxic => rsx! { Icon { icon: FaSkullCrossbones, width: 16, height: 16 } },
    }
}

#[component]
pub fn RiskCard(result: DrugResult) -> Element {
    let risk = result.risk;
    rsx! {
        div {
            class: "risk-card {risk_class(risk)}",
            div {
                class: "risk-card__header",
                h3 { "{result.drug}" }
                span {
                    class: "risk-badge",
                    RiskIcon { risk }
                    "{risk.label()}"
                }
            }
            dl {
                dt { "Gene" }
                dd { "{result.gene}" }
                dt { "Phenotype" }
                dd { "{result.phenotype}" }
            }
            p { class: "risk-card__recommendation", "{result.recommendation}" }
            if !result.explanation.is_empty() {
                p { class: "risk-card__explanation", "{result.explanation}" }
            }
        }
    }
}

/// Per-level counts followed by one card per drug.
#[component]
pub fn RiskSummary(report: AnalysisReport) -> Element {
    rsx! {
        if report.source == AnalysisSource::Placeholder {
            p {
                class: "notice",
                "No analysis backend is configured. These results are placeholders, not a clinical assessment."
            }
        }
        div {
            class: "risk-summary",
            for risk in RiskLevel::ALL {
                div {
                    key: "{risk.as_str()}",
                    class: "risk-summary__item {risk_class(risk)}",
                    span { class: "risk-summary__count", "{report.count(risk)}" }
                    span { "{risk.label()}" }
                }
            }
        }
        div {
            class: "risk-grid",
            for result in report.results.iter() {
                RiskCard { key: "{result.drug}", result: result.clone() }
            }
        }
    }
}
