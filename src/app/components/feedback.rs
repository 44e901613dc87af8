//! Loading, error and empty placeholders shared by the data-bearing pages.
//!
//! Errors stay visually distinct from loading and empty states so a failed
//! query is never mistaken for an empty library.

use dioxus::prelude::*;

/// Busy placeholder shown while a resource resolves.
#[component]
pub fn LoadingCard(label: String) -> Element {
    rsx! {
        article { aria_busy: "true", "{label}" }
    }
}

/// User-visible failure; every page renders its own, there is no central
/// error boundary.
#[component]
pub fn ErrorCard(message: String) -> Element {
    rsx! {
        article { role: "alert",
            span { class: "status-err", "Something went wrong: {message}" }
        }
    }
}

/// The query succeeded and found nothing.
#[component]
pub fn EmptyCard(message: String) -> Element {
    rsx! {
        article { class: "text-muted", "{message}" }
    }
}
