//! Grid/list toggle for listing pages.

use dioxus::prelude::*;

use crate::app::prefs::ViewMode;

/// Two-button toggle bound to a persisted view preference.
#[component]
pub fn ViewModeToggle(mode: ViewMode, on_change: EventHandler<ViewMode>) -> Element {
    rsx! {
        div { class: "view-toggle",
            button {
                class: if mode == ViewMode::Grid { "active" } else { "" },
                aria_label: "Grid view",
                onclick: move |_| on_change.call(ViewMode::Grid),
                "▦ Grid"
            }
            button {
                class: if mode == ViewMode::List { "active" } else { "" },
                aria_label: "List view",
                onclick: move |_| on_change.call(ViewMode::List),
                "☰ List"
            }
        }
    }
}
