use dioxus::prelude::*;

/// Main call-to-action button.
///
/// While `loading` is set the button is disabled and shows `loading_label`.
#[component]
pub fn PrimaryButton(
    label: String,
    onclick: EventHandler<()>,
    #[props(default)] disabled: bool,
    #[props(default)] loading: bool,
    #[props(default)] loading_label: Option<String>,
) -> Element {
    let inactive = disabled || loading;
    let text = if loading {
        loading_label.unwrap_or_else(|| label.clone())
    } else {
        label
    };
    let class = if inactive {
        "btn-primary btn-disabled"
    } else {
        "btn-primary"
    };

    rsx! {
        button {
            r#type: "button",
            class: class,
            disabled: inactive,
            onclick: move |_| {
                if !inactive {
                    onclick.call(());
                }
            },
            if loading {
                span { class: "spinner" }
            }
            "{text}"
        }
    }
}
