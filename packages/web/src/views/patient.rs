//! Patient dashboard: upload a VCF, pick drugs, review per-drug risk.

use api::auth::Role;
use api::models::{AnalysisReport, AVAILABLE_DRUGS};
use dioxus::prelude::*;
use ui::icons::{FaFileArrowUp, FaPlay};
use ui::{Icon, Navbar, RiskSummary, RoleGate};

/// A VCF file read into memory on the client. Gzipped uploads stay binary.
#[derive(Debug, Clone, PartialEq)]
struct SelectedFile {
    name: String,
    contents: Vec<u8>,
}

#[component]
pub fn Patient() -> Element {
    rsx! {
        RoleGate {
            required: Role::Patient,
            Navbar {}
            PatientDashboard {}
        }
    }
}

#[component]
fn PatientDashboard() -> Element {
    let mut vcf = use_signal(|| Option::<SelectedFile>::None);
    let mut drugs = use_signal(Vec::<String>::new);
    let mut analyzing = use_signal(|| false);
    let mut report = use_signal(|| Option::<AnalysisReport>::None);
    let mut error = use_signal(|| Option::<String>::None);

    let on_file = move |evt: FormEvent| async move {
        error.set(None);
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        match file.read_bytes().await {
            Ok(contents) => vcf.set(Some(SelectedFile {
                name: file.name(),
                contents: contents.to_vec(),
            })),
            Err(e) => error.set(Some(format!("Could not read file: {e}"))),
        }
    };

    let mut toggle_drug = move |drug: &str| {
        let mut selected = drugs.write();
        if let Some(pos) = selected.iter().position(|d| d == drug) {
            selected.remove(pos);
        } else {
            selected.push(drug.to_string());
        }
    };

    let can_analyze = vcf().is_some() && !drugs().is_empty() && !analyzing();

    let analyze = move |_| async move {
        let Some(file) = vcf() else {
            return;
        };
        analyzing.set(true);
        report.set(None);
        error.set(None);
        match api::analyze_vcf(file.name, file.contents, drugs()).await {
            Ok(result) => report.set(Some(result)),
            Err(e) => error.set(Some(e.to_string())),
        }
        analyzing.set(false);
    };

    rsx! {
        main {
            class: "dashboard",
            div {
                class: "dashboard__intro",
                h1 { "Pharmacogenomic Analysis" }
                p { class: "muted", "Upload your genome file and select the drugs to check." }
            }

            section {
                class: "card",
                h2 { "1. Upload VCF" }
                label {
                    class: "upload",
                    Icon { icon: FaFileArrowUp, width: 20, height: 20 }
                    match vcf() {
                        Some(file) => rsx! { span { "{file.name} ({file.contents.len()} bytes)" } },
                        None => rsx! { span { "Choose a .vcf file" } },
                    }
                    input {
                        r#type: "file",
                        accept: ".vcf,.gz",
                        onchange: on_file,
                    }
                }
            }

            section {
                class: "card",
                h2 { "2. Select drugs" }
                div {
                    class: "drug-grid",
                    for drug in AVAILABLE_DRUGS {
                        label {
                            key: "{drug}",
                            class: "drug-option",
                            input {
                                r#type: "checkbox",
                                checked: drugs().iter().any(|d| d == drug),
                                onchange: move |_| toggle_drug(drug),
                            }
                            "{drug}"
                        }
                    }
                }
            }

            button {
                class: "btn",
                disabled: !can_analyze,
                onclick: analyze,
                Icon { icon: FaPlay, width: 12, height: 12 }
                if analyzing() { "Analyzing…" } else { "Run analysis" }
            }

            if let Some(err) = error() {
                p { class: "form__error", "{err}" }
            }

            if let Some(report) = report() {
                section {
                    class: "results",
                    h2 { "Results" }
                    RiskSummary { report }
                }
            }
        }
    }
}
