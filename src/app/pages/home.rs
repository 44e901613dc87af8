//! Home page component.
//!
//! Server connection overview plus shortcuts into the library sections.

use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, FetchPhase};
use crate::app::components::{ErrorCard, Layout, LoadingCard};
use crate::library::types::AppStatus;

/// Home page component.
#[component]
pub fn Home() -> Element {
    let status = use_resource(|| async { fetch_json::<AppStatus>("/api/status").await });

    let status_content = match phase(status.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Checking server status...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(status) => rsx! {
            article {
                p {
                    span { "Server: " }
                    strong { "{status.server}" }
                    " "
                    if status.connected {
                        span { class: "status-ok", "✓ Connected" }
                    } else {
                        span { class: "status-err", "✗ Disconnected" }
                    }
                }
                if let Some(version) = status.api_version {
                    p { "JSON-RPC API v{version.major}.{version.minor}.{version.patch}" }
                }
                p { small { "Uptime {status.uptime_secs}s · {status.cache_entries} cached queries" } }
            }
        },
    };

    rsx! {
        Layout {
            title: "Home".to_string(),
            nav_active: "home".to_string(),

            h1 { "Home" }

            section { id: "status",
                div {
                    h2 { "Server" }
                    p { class: "text-muted", "Connection status of the Kodi instance" }
                }
                {status_content}
            }

            section { id: "browse",
                h2 { "Browse" }
                div { class: "poster-grid",
                    a { href: "/music",
                        article { h4 { "Music" } small { "Artists and albums" } }
                    }
                    a { href: "/movies",
                        article { h4 { "Movies" } small { "The movie library" } }
                    }
                    a { href: "/tv",
                        article { h4 { "TV" } small { "Shows, seasons and episodes" } }
                    }
                    a { href: "/live-tv",
                        article { h4 { "Live TV" } small { "Channels, recordings, timers" } }
                    }
                }
            }
        }
    }
}
