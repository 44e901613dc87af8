//! Settings page component.
//!
//! Connection settings are read-only here: they come from the config file
//! and `KODIVIEW_*` environment variables at server startup.

use dioxus::prelude::*;

use crate::app::api::{fetch_json, phase, FetchPhase};
use crate::app::components::{ErrorCard, Layout, LoadingCard};
use crate::library::types::AppStatus;

/// Settings page component.
#[component]
pub fn Settings() -> Element {
    let status = use_resource(|| async { fetch_json::<AppStatus>("/api/status").await });

    let connection = match phase(status.read().clone()) {
        FetchPhase::Loading => rsx! {
            LoadingCard { label: "Loading connection details...".to_string() }
        },
        FetchPhase::Failed(message) => rsx! {
            ErrorCard { message }
        },
        FetchPhase::Ready(status) => rsx! {
            article {
                table {
                    tbody {
                        tr {
                            td { "Kodi server" }
                            td { "{status.server}" }
                        }
                        tr {
                            td { "Connection" }
                            td {
                                if status.connected {
                                    span { class: "status-ok", "✓ Connected" }
                                } else {
                                    span { class: "status-err", "✗ Disconnected" }
                                }
                            }
                        }
                        if let Some(version) = status.api_version {
                            tr {
                                td { "JSON-RPC API" }
                                td { "v{version.major}.{version.minor}.{version.patch}" }
                            }
                        }
                        tr {
                            td { "kodiview" }
                            td { "v{status.version}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Layout {
            title: "Settings".to_string(),
            nav_active: "settings".to_string(),

            h1 { "Settings" }

            section { id: "connection",
                div {
                    h2 { "Connection" }
                    p { class: "text-muted", "Where this UI gets its library data from" }
                }
                {connection}
            }

            section { id: "configuration",
                h2 { "Configuration" }
                article {
                    p {
                        "The server reads "
                        code { "kodiview.toml" }
                        " from its working directory and environment overrides at startup:"
                    }
                    ul {
                        li { code { "KODIVIEW_PORT" } " - port this UI listens on" }
                        li { code { "KODIVIEW_KODI__HOST" } " / " code { "KODIVIEW_KODI__PORT" } " - the Kodi instance" }
                        li { code { "KODIVIEW_KODI__USERNAME" } " / " code { "KODIVIEW_KODI__PASSWORD" } " - basic auth, if enabled" }
                    }
                    p { small { "Restart the server after changing any of these." } }
                }
            }

            section { id: "preferences",
                h2 { "Preferences" }
                article {
                    p {
                        "Grid/list choices on the listing pages are stored in this "
                        "browser's local storage and never leave the device."
                    }
                }
            }
        }
    }
}
