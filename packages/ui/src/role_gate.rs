//! Role-gated wrapper for the dashboards.

use api::auth::{resolve_access, Access, Role};
use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};

fn access_for(state: &AuthState, required: Role) -> Access {
    let role = state.user.as_ref().and_then(|u| u.role);
    resolve_access(state.user.is_some(), role, required, state.loading)
}

/// Render `children` only for a session whose role is `required`.
///
/// Anyone else is sent to `/login?from=...` or to their own dashboard; a
/// placeholder is shown until that navigation happens.
#[component]
pub fn RoleGate(required: Role, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if let Some(target) = access_for(&auth(), required).target() {
            nav.replace(target);
        }
    });

    if access_for(&auth(), required) == Access::Granted {
        return rsx! {
            {children}
        };
    }

    rsx! {
        div {
            class: "gate-pending",
            div { class: "spinner" }
            p { "Checking {required.as_str()} access…" }
        }
    }
}
