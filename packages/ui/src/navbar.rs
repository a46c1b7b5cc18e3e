use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::FaShieldHalved;
use crate::{Icon, LogoutButton};

/// Top bar shown on every dashboard: brand, the signed-in account and a
/// sign-out button. Extra controls go in `children`.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let user = auth().user;

    rsx! {
        header {
            class: "navbar",
            Link {
                class: "navbar__brand",
                to: "/",
                Icon { icon: FaShieldHalved, width: 18, height: 18 }
                "PharmaGuard"
            }
            {children}
            if let Some(user) = user {
                div {
                    class: "navbar__account",
                    span { "{user.display_name()}" }
                    if let Some(role) = user.role {
                        span { class: "navbar__role", "{role.label()}" }
                    }
                    LogoutButton { class: "btn btn--ghost" }
                }
            }
        }
    }
}
