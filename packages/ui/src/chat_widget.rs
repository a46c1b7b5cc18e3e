//! Floating pharmacogenomics assistant.
//!
//! Answers come from the offline keyword table in `api::chat`; nothing leaves
//! the browser. The log lives as long as the page.

use api::chat::{ChatLog, Speaker, SUGGESTIONS};
use dioxus::prelude::*;

use crate::icons::{FaCommentDots, FaPaperPlane, FaRobot, FaXmark};
use crate::markdown::render_markdown;
use crate::Icon;

/// Short pause before the answer appears.
async fn typing_pause() {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(600)).await;
}

#[component]
pub fn ChatWidget() -> Element {
    let mut open = use_signal(|| false);
    let mut log = use_signal(ChatLog::new);
    let mut input = use_signal(String::new);
    let mut typing = use_signal(|| false);

    let mut send = move |text: String| {
        if typing() {
            return;
        }
        let Some(text) = log.write().submit(&text) else {
            return;
        };
        input.set(String::new());
        typing.set(true);

        spawn(async move {
            typing_pause().await;
            log.write().reply(&text);
            typing.set(false);
        });
    };

    rsx! {
        button {
            class: "chat-toggle",
            aria_label: "Toggle AI chat",
            onclick: move |_| open.toggle(),
            if open() {
                Icon { icon: FaXmark, width: 22, height: 22 }
            } else {
                Icon { icon: FaCommentDots, width: 22, height: 22 }
            }
        }

        if open() {
            div {
                class: "chat-panel",

                div {
                    class: "chat-header",
                    span { class: "chat-avatar", Icon { icon: FaRobot, width: 16, height: 16 } }
                    div {
                        p { class: "chat-title", "PharmaGuard AI" }
                        p { class: "chat-subtitle", "Pharmacogenomics Assistant" }
                    }
                }

                div {
                    class: "chat-messages",
                    for msg in log().messages().iter() {
                        div {
                            key: "{msg.id}",
                            class: if msg.role == Speaker::User { "chat-row chat-row--user" } else { "chat-row" },
                            div {
                                class: if msg.role == Speaker::User { "chat-bubble chat-bubble--user" } else { "chat-bubble" },
                                dangerous_inner_html: render_markdown(&msg.content),
                            }
                        }
                    }

                    if typing() {
                        div {
                            class: "chat-row",
                            div { class: "chat-bubble chat-typing", span {} span {} span {} }
                        }
                    }

                    if log().is_fresh() && !typing() {
                        div {
                            class: "chat-suggestions",
                            for suggestion in SUGGESTIONS {
                                button {
                                    key: "{suggestion}",
                                    class: "chat-suggestion",
                                    onclick: move |_| send(suggestion.to_string()),
                                    "{suggestion}"
                                }
                            }
                        }
                    }
                }

                form {
                    class: "chat-input",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        send(input());
                    },
                    input {
                        r#type: "text",
                        value: "{input}",
                        placeholder: "Ask about drug-gene interactions…",
                        disabled: typing(),
                        oninput: move |evt| input.set(evt.value()),
                    }
                    button {
                        r#type: "submit",
                        disabled: input().trim().is_empty() || typing(),
                        Icon { icon: FaPaperPlane, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}
