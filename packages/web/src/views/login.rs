//! Login page: e-mail and password against the auth provider.

use api::auth::{login_target, Role};
use dioxus::prelude::*;
use ui::{use_auth, AuthState};

use crate::Route;

/// Login page component. `from` is where a gated page sent the visitor.
#[component]
pub fn Login(from: String) -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Option::<Role>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let from = from.clone();
        spawn(async move {
            error.set(None);
            submitting.set(true);

            match api::login_password(email(), password(), role()).await {
                Ok(user) => {
                    let from = Some(from.as_str()).filter(|f| !f.is_empty());
                    let target = login_target(from, user.role.or(role()));
                    auth.set(AuthState::signed_in(user));
                    nav.push(target);
                }
                Err(e) => {
                    submitting.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Sign in to PharmaGuard" }
                p { class: "muted", "Choose your role to access the appropriate dashboard." }

                form {
                    class: "form",
                    onsubmit: handle_login,

                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    div {
                        class: "form__row",
                        label { r#for: "password", "Password" }
                        Link { class: "link", to: Route::ForgotPassword {}, "Forgot password?" }
                    }
                    input {
                        id: "password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }

                    label { r#for: "role", "Role" }
                    select {
                        id: "role",
                        onchange: move |evt| role.set(Role::parse(&evt.value())),
                        option { value: "", "Select a role" }
                        for r in Role::ALL {
                            option { key: "{r.as_str()}", value: r.as_str(), "{r.label()}" }
                        }
                    }
                    p { class: "hint", "Used only if your account does not have a role yet." }

                    if let Some(err) = error() {
                        p { class: "form__error", "{err}" }
                    }

                    button {
                        class: "btn btn--block",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in…" } else { "Sign in" }
                    }
                }

                p {
                    class: "muted",
                    "Don't have an account? "
                    Link { class: "link", to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
