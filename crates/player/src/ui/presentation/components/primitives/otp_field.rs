use dioxus::prelude::*;

/// Fixed-length code entry rendered as one box per character.
///
/// A transparent input sits over the boxes and receives the keystrokes, so
/// paste and backspace behave like a normal text field. The parent decides
/// what the value may contain.
#[component]
pub fn OtpField(
    value: String,
    on_change: EventHandler<String>,
    #[props(default = 6)] length: usize,
    #[props(default)] on_submit: Option<EventHandler<()>>,
) -> Element {
    let chars: Vec<char> = value.chars().collect();
    let cursor = chars.len();
    let cells = (0..length).map(|i| {
        let ch = chars.get(i).map(|c| c.to_string()).unwrap_or_default();
        let class = if i == cursor { "otp-cell otp-cell-active" } else { "otp-cell" };
        (i, ch, class)
    });

    rsx! {
        div {
            class: "otp-field",
            for (i, ch, class) in cells {
                div { key: "{i}", class: class, "{ch}" }
            }
            input {
                class: "otp-input",
                r#type: "text",
                autocomplete: "off",
                spellcheck: "false",
                maxlength: "{length}",
                value: "{value}",
                oninput: move |evt| on_change.call(evt.value()),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        if let Some(handler) = on_submit {
                            handler.call(());
                        }
                    }
                },
            }
        }
    }
}
