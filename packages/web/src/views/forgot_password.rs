use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut sent = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            submitting.set(true);
            match api::request_password_reset(email()).await {
                Ok(()) => sent.set(true),
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Reset your password" }

                if sent() {
                    p {
                        class: "muted",
                        "If an account exists for {email}, a password reset link is on its way. Check your inbox."
                    }
                } else {
                    p { class: "muted", "Enter your e-mail and we'll send you a reset link." }
                    form {
                        class: "form",
                        onsubmit: handle_submit,
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                        if let Some(err) = error() {
                            p { class: "form__error", "{err}" }
                        }
                        button {
                            class: "btn btn--block",
                            r#type: "submit",
                            disabled: submitting() || email().trim().is_empty(),
                            if submitting() { "Sending…" } else { "Send reset link" }
                        }
                    }
                }

                Link { class: "link", to: Route::Login { from: String::new() }, "Back to sign in" }
            }
        }
    }
}
