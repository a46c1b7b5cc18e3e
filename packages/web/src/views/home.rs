//! Landing page.

use dioxus::prelude::*;
use ui::icons::{FaDna, FaShieldHalved, FaUserDoctor};
use ui::{use_auth, Icon};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        div {
            class: "landing",
            header {
                class: "landing__nav",
                span {
                    class: "landing__brand",
                    Icon { icon: FaShieldHalved, width: 20, height: 20 }
                    "PharmaGuard"
                }
                if let Some(user) = state.user {
                    Link { class: "btn", to: user.home_path(), "Open dashboard" }
                } else {
                    div {
                        class: "landing__actions",
                        Link { class: "btn btn--ghost", to: Route::Login { from: String::new() }, "Sign in" }
                        Link { class: "btn", to: Route::Register {}, "Get started" }
                    }
                }
            }

            section {
                class: "landing__hero",
                h1 { "Precision medicine, guided by your genes" }
                p {
                    "Upload a VCF file, choose the drugs you are prescribed, and see how "
                    "pharmacogenomic variants may affect their safety and dosing, with "
                    "recommendations aligned to CPIC guidelines."
                }
            }

            section {
                class: "landing__features",
                div {
                    class: "card",
                    Icon { icon: FaDna, width: 20, height: 20 }
                    h3 { "Patients" }
                    p { "Analyse a genome file against common medications and review per-drug risk." }
                }
                div {
                    class: "card",
                    Icon { icon: FaUserDoctor, width: 20, height: 20 }
                    h3 { "Doctors" }
                    p { "Review patient risk profiles and send critical-finding alerts." }
                }
                div {
                    class: "card",
                    Icon { icon: FaShieldHalved, width: 20, height: 20 }
                    h3 { "Admins" }
                    p { "Oversee role-based access across the platform." }
                }
            }

            footer {
                class: "landing__footer",
                "For informational purposes only. Clinical decisions should involve a qualified healthcare professional."
            }
        }
    }
}
