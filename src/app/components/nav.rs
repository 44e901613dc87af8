//! Top navigation bar.

use dioxus::prelude::*;

const NAV_LINKS: &[(&str, &str, &str)] = &[
    ("home", "/", "Home"),
    ("music", "/music", "Music"),
    ("movies", "/movies", "Movies"),
    ("tv", "/tv", "TV"),
    ("live-tv", "/live-tv", "Live TV"),
    ("search", "/search", "Search"),
    ("settings", "/settings", "Settings"),
];

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// ID of the section the current page belongs to (e.g. "movies").
    pub active: String,
}

/// Navigation bar using Pico's nav semantics; the active section is marked
/// with `aria-current` for both styling and screen readers.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let current = |page: &str| {
        if props.active == page {
            "page"
        } else {
            "false"
        }
    };

    rsx! {
        nav {
            ul {
                li {
                    strong {
                        a { href: "/", class: "contrast", "kodiview" }
                    }
                }
            }
            ul {
                for &(id, href, label) in NAV_LINKS.iter() {
                    li {
                        a {
                            href: "{href}",
                            aria_current: current(id),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
