//! New-password form reached from the recovery e-mail.

use api::validation::validate_new_password;
use dioxus::prelude::*;

use crate::Route;

/// Access token the provider appends to the recovery link as
/// `#access_token=...&type=recovery`.
fn recovery_token() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        return token_from_fragment(&hash);
    }
    #[cfg(not(target_arch = "wasm32"))]
    None
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "access_token")
        .map(|(_, value)| value.to_string())
        .filter(|token| !token.is_empty())
}

#[component]
pub fn ResetPassword() -> Element {
    let nav = use_navigator();
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut done = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            if let Err(err) = validate_new_password(&password(), &confirm_password()) {
                error.set(Some(err.to_string()));
                return;
            }

            submitting.set(true);
            match api::update_password(password(), recovery_token()).await {
                Ok(()) => {
                    done.set(true);
                    nav.push(Route::Login { from: String::new() });
                }
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
                h1 { "Set new password" }

                if done() {
                    p { class: "muted", "Password updated. Redirecting to sign in…" }
                } else {
                    p { class: "muted", "Choose a strong new password for your account." }
                    form {
                        class: "form",
                        onsubmit: handle_submit,
                        label { r#for: "password", "New password" }
                        input {
                            id: "password",
                            r#type: "password",
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
                        if let Some(err) = error() {
                            p { class: "form__error", "{err}" }
                        }
                        button {
                            class: "btn btn--block",
                            r#type: "submit",
                            disabled: submitting(),
                            if submitting() { "Updating…" } else { "Update password" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_fragment() {
        assert_eq!(
            token_from_fragment("#access_token=abc.def&expires_in=3600&type=recovery"),
            Some("abc.def".to_string())
        );
        assert_eq!(token_from_fragment("#type=recovery"), None);
        assert_eq!(token_from_fragment(""), None);
    }
}
