//! Notice toasts, the desktop stand-in for `alert`.

use cheerpaw_core::Notice;
use dioxus::prelude::*;

#[derive(Clone, PartialEq, Props)]
pub struct ToastStackProps {
    /// Notices to show, oldest first
    pub notices: Vec<Notice>,
    /// Called with the index of a notice the viewer dismissed
    pub on_dismiss: EventHandler<usize>,
}

#[component]
pub fn ToastStack(props: ToastStackProps) -> Element {
    if props.notices.is_empty() {
        return rsx! {};
    }
    let on_dismiss = props.on_dismiss;

    rsx! {
        div { class: "toast-stack", role: "status",
            for (index, notice) in props.notices.iter().enumerate() {
                div {
                    key: "{index}",
                    class: "toast",
                    onclick: move |_| on_dismiss.call(index),
                    "{notice.message}"
                }
            }
        }
    }
}
