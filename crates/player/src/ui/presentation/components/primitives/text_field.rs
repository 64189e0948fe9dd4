use dioxus::prelude::*;

/// Labelled single- or multi-line text input with an inline error.
///
/// Enter submits a single-line field; Ctrl+Enter submits a multi-line one.
#[component]
pub fn TextField(
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] label: Option<String>,
    #[props(default)] placeholder: String,
    #[props(default)] error: Option<String>,
    #[props(default)] disabled: bool,
    #[props(default)] multiline: bool,
    #[props(default)] max_length: Option<usize>,
    #[props(default)] on_submit: Option<EventHandler<()>>,
) -> Element {
    let input_class = if error.is_some() {
        "text-input text-input-error"
    } else {
        "text-input"
    };
    let maxlength = max_length.map(|n| n.to_string());

    let onkeydown = move |evt: KeyboardEvent| {
        let submit = evt.key() == Key::Enter && (!multiline || evt.modifiers().ctrl());
        if submit {
            if let Some(handler) = on_submit {
                evt.prevent_default();
                handler.call(());
            }
        }
    };

    rsx! {
        label {
            class: "field",
            if let Some(label) = label {
                span { class: "field-label", "{label}" }
            }
            if multiline {
                textarea {
                    class: input_class,
                    rows: "4",
                    value: "{value}",
                    placeholder: "{placeholder}",
                    disabled: disabled,
                    maxlength: maxlength.clone(),
                    oninput: move |evt| on_input.call(evt.value()),
                    onkeydown: onkeydown,
                }
            } else {
                input {
                    class: input_class,
                    r#type: "text",
                    value: "{value}",
                    placeholder: "{placeholder}",
                    disabled: disabled,
                    maxlength: maxlength,
                    oninput: move |evt| on_input.call(evt.value()),
                    onkeydown: onkeydown,
                }
            }
            if let Some(error) = error {
                span { class: "field-error", "{error}" }
            }
        }
    }
}
