//! Admin dashboard. Static platform overview.

use api::auth::Role;
use dioxus::prelude::*;
use ui::icons::{FaChartLine, FaShieldHalved, FaUsers};
use ui::{Icon, Navbar, RoleGate};

#[component]
pub fn Admin() -> Element {
    rsx! {
        RoleGate {
            required: Role::Admin,
            Navbar {}
            main {
                class: "dashboard",
                div {
                    class: "dashboard__intro",
                    h1 { "Admin Control Center" }
                    p { class: "muted", "Manage roles, security, and platform-wide analytics." }
                }

                div {
                    class: "stats",
                    div {
                        class: "card stat",
                        Icon { icon: FaUsers, width: 18, height: 18 }
                        p { class: "stat__label", "Active clinicians" }
                        p { class: "stat__value", "34" }
                        p { class: "hint", "+3 this week" }
                    }
                    div {
                        class: "card stat",
                        Icon { icon: FaShieldHalved, width: 18, height: 18 }
                        p { class: "stat__label", "Security events (24h)" }
                        p { class: "stat__value", "0" }
                        p { class: "hint", "All systems nominal" }
                    }
                    div {
                        class: "card stat",
                        Icon { icon: FaChartLine, width: 18, height: 18 }
                        p { class: "stat__label", "Analyses today" }
                        p { class: "stat__value", "128" }
                        p { class: "hint", "Across all patient cohorts" }
                    }
                }

                section {
                    class: "card",
                    h2 { "Role-based access control" }
                    p {
                        class: "muted",
                        "Three roles are enforced: patients, doctors, and administrators. "
                        "Each dashboard is restricted to its corresponding role."
                    }
                    ul {
                        for role in Role::ALL {
                            li { key: "{role.as_str()}", "{role.label()} → {role.dashboard_path()}" }
                        }
                    }
                }
            }
        }
    }
}
