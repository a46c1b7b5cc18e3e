//! Doctor dashboard: risk stats, patient table, critical-finding alerts.

use api::auth::Role;
use api::models::{DashboardStats, PatientRecord, RiskLevel};
use dioxus::prelude::*;
use ui::icons::{FaBell, FaMagnifyingGlass};
use ui::{Icon, Navbar, RoleGate};

#[component]
pub fn Doctor() -> Element {
    rsx! {
        RoleGate {
            required: Role::Doctor,
            Navbar {}
            DoctorDashboard {}
        }
    }
}

fn risk_class(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Safe => "risk risk--safe",
        RiskLevel::Adjust => "risk risk--adjust",
        RiskLevel::Toxic => "risk risk--toxic",
    }
}

#[component]
fn DoctorDashboard() -> Element {
    let mut search = use_signal(String::new);
    let mut sending = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);

    let all_patients = use_resource(|| api::list_patients(None));
    let patients = use_resource(move || api::list_patients(Some(search())));

    let stats = match &*all_patients.read() {
        Some(Ok(list)) => DashboardStats::from_patients(list),
        _ => DashboardStats::default(),
    };

    let send_alert = move |patient_id: String| {
        spawn(async move {
            sending.set(Some(patient_id.clone()));
            notice.set(None);
            match api::send_alert(patient_id.clone(), Some("critical".to_string()), None).await {
                Ok(ack) => notice.set(Some(format!(
                    "Alert sent for {} at {}",
                    ack.patient_id, ack.sent_at
                ))),
                Err(e) => notice.set(Some(format!("Failed to send alert for {patient_id}: {e}"))),
            }
            sending.set(None);
        });
    };

    rsx! {
        main {
            class: "dashboard",
            div {
                class: "dashboard__intro",
                h1 { "Clinical Overview" }
                p { class: "muted", "Pharmacogenomic risk across your patients." }
            }

            div {
                class: "stats",
                StatCard { label: "Total Patients", value: stats.total_patients }
                StatCard { label: "Critical Alerts", value: stats.critical_alerts }
                StatCard { label: "Dose Adjustments", value: stats.dose_adjustments }
                StatCard { label: "Standard Dosing", value: stats.standard_dosing }
            }

            if let Some(text) = notice() {
                p { class: "notice", "{text}" }
            }

            section {
                class: "card",
                div {
                    class: "card__header",
                    h2 { "Patient List" }
                    label {
                        class: "search",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                        input {
                            placeholder: "Search patients...",
                            value: "{search}",
                            oninput: move |evt| search.set(evt.value()),
                        }
                    }
                }

                match &*patients.read() {
                    None => rsx! { p { class: "muted", "Loading patients…" } },
                    Some(Err(e)) => rsx! { p { class: "form__error", "{e}" } },
                    Some(Ok(list)) => rsx! {
                        PatientTable {
                            patients: list.clone(),
                            sending: sending(),
                            on_alert: move |id: String| send_alert(id),
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: usize) -> Element {
    rsx! {
        div {
            class: "card stat",
            p { class: "stat__label", "{label}" }
            p { class: "stat__value", "{value}" }
        }
    }
}

#[component]
fn PatientTable(
    patients: Vec<PatientRecord>,
    sending: Option<String>,
    on_alert: EventHandler<String>,
) -> Element {
    if patients.is_empty() {
        return rsx! { p { class: "muted", "No patients match your search." } };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "ID" }
                    th { "Patient" }
                    th { "Age" }
                    th { "Drug" }
                    th { "Gene" }
                    th { "Risk" }
                    th { "Last analysis" }
                    th {}
                }
            }
            tbody {
                for patient in patients {
                    tr {
                        key: "{patient.id}",
                        td { "{patient.id}" }
                        td { "{patient.name}" }
                        td { "{patient.age}" }
                        td { "{patient.drug}" }
                        td { "{patient.gene}" }
                        td { span { class: risk_class(patient.risk), "{patient.risk.label()}" } }
                        td { "{patient.last_analysis}" }
                        td {
                            if patient.risk == RiskLevel::Toxic {
                                button {
                                    class: "btn btn--danger btn--small",
                                    disabled: sending.is_some(),
                                    onclick: {
                                        let id = patient.id.clone();
                                        move |_| on_alert.call(id.clone())
                                    },
                                    Icon { icon: FaBell, width: 12, height: 12 }
                                    if sending.as_deref() == Some(patient.id.as_str()) { "Sending…" } else { "Send alert" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
