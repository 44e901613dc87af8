//! Page chrome: Pico CSS, navigation, footer.

use dioxus::prelude::*;

use super::nav::Nav;

/// App styles layered over Pico CSS.
const APP_STYLES: &str = r#"
:root { --pico-font-size: 15px; }
nav a[aria-current="page"] { text-decoration: underline; font-weight: 600; }
.status-ok { color: var(--pico-ins-color); }
.status-err { color: var(--pico-del-color); }
.text-muted { color: var(--pico-muted-color); }
.poster-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 1rem; }
.poster-grid article { margin: 0; }
.media-list article { margin: 0 0 0.5rem 0; padding: 0.75rem 1rem; }
.media-list .row { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.view-toggle { display: flex; gap: 0.25rem; }
.view-toggle button { padding: 0.25rem 0.5rem; font-size: 0.8rem; margin: 0; }
.view-toggle button.active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
.toolbar { display: flex; gap: 0.75rem; align-items: center; flex-wrap: wrap; margin-bottom: 1rem; }
.toolbar select, .toolbar input { margin: 0; width: auto; }
.controls { display: flex; gap: 0.5rem; margin: 0.5rem 0; }
.controls button { margin: 0; padding: 0.5rem 1rem; }
.progress-outer { background: var(--pico-muted-border-color); border-radius: 4px; height: 6px; overflow: hidden; }
.progress-inner { background: var(--pico-primary-background); height: 100%; }
.resume { display: flex; flex-direction: column; gap: 0.25rem; margin: 0.5rem 0; }
small { color: var(--pico-muted-color); }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Browser tab title.
    pub title: String,
    /// Section ID highlighted in the nav.
    pub nav_active: String,
    pub children: Element,
}

/// Wraps every page with the shared chrome.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("CARGO_PKG_VERSION");

    rsx! {
        // Dioxus hoists these into the document head
        document::Title { "{props.title} · kodiview" }
        document::Link {
            rel: "stylesheet",
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css",
        }
        document::Style { {APP_STYLES} }

        header { class: "container",
            Nav { active: props.nav_active.clone() }
        }
        main { class: "container",
            {props.children}
        }
        footer { class: "container",
            small { "kodiview v{version} · a web front-end for Kodi" }
        }
    }
}
