//! Registration page view with email/password/role form.

use api::auth::Role;
use api::validation::validate_registration;
use dioxus::prelude::*;

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut role = use_signal(|| Option::<Role>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut registered = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if let Err(err) = validate_registration(&e, &p, &confirm_password(), role()) {
                error.set(Some(err.to_string()));
                return;
            }
            let Some(r) = role() else {
                return;
            };

            loading.set(true);
            match api::register_account(e, p, r).await {
                Ok(_) => registered.set(true),
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    };

    if registered() {
        return rsx! {
            div {
                class: "auth-page",
                div {
                    class: "auth-card",
                    h1 { "Account created" }
                    p { class: "muted", "Your account is ready. You can sign in now." }
                    Link { class: "btn btn--block", to: Route::Login { from: String::new() }, "Go to sign in" }
                }
            }
        };
    }

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Create your account" }
                p { class: "muted", "Register as a patient, doctor, or admin." }

                form {
                    class: "form",
                    onsubmit: handle_register,

                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        placeholder: "At least 6 characters",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }

                    label { r#for: "confirm", "Confirm password" }
                    input {
                        id: "confirm",
                        r#type: "password",
                        value: "{confirm_password}",
                        oninput: move |evt| confirm_password.set(evt.value()),
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

                    if let Some(err) = error() {
                        p { class: "form__error", "{err}" }
                    }

                    button {
                        class: "btn btn--block",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account…" } else { "Create account" }
                    }
                }

                p {
                    class: "muted",
                    "Already have an account? "
                    Link { class: "link", to: Route::Login { from: String::new() }, "Sign in" }
                }
            }
        }
    }
}
