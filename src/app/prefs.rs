//! Client-persisted view preferences.
//!
//! A two-valued grid/list preference per listing scope, stored in browser
//! localStorage under `kodiview-<scope>`. Reads fall back to the caller's
//! default when storage is unavailable, empty or holds an unrecognized
//! value. Writes are best-effort: the in-memory preference always updates,
//! a failed persist is logged and swallowed and simply will not survive a
//! reload.

use dioxus::prelude::*;

/// Key prefix namespacing this app's localStorage entries.
pub const STORAGE_PREFIX: &str = "kodiview";

/// How a listing page lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Storage key for a view scope.
pub fn storage_key(scope: &str) -> String {
    format!("{STORAGE_PREFIX}-{scope}")
}

/// Read-validate-fallback: anything but the two literal values yields the
/// default.
pub fn parse_view_mode(raw: Option<&str>, default: ViewMode) -> ViewMode {
    match raw {
        Some("grid") => ViewMode::Grid,
        Some("list") => ViewMode::List,
        _ => default,
    }
}

/// Load the persisted mode for `scope`; the default applies when storage
/// is unavailable or holds garbage.
pub fn load_view_mode(scope: &str, default: ViewMode) -> ViewMode {
    #[cfg(target_arch = "wasm32")]
    {
        let raw = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(&storage_key(scope)).ok().flatten());
        parse_view_mode(raw.as_deref(), default)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = scope;
        default
    }
}

/// Persist the mode for `scope`, best-effort.
pub fn store_view_mode(scope: &str, mode: ViewMode) {
    #[cfg(target_arch = "wasm32")]
    {
        let saved = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(|s| s.set_item(&storage_key(scope), mode.as_str()).is_ok())
            .unwrap_or(false);
        if !saved {
            tracing::warn!(scope, "view preference not persisted; storage unavailable");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (scope, mode);
    }
}

/// Hook: the view mode for `scope`, loading the persisted value on mount.
pub fn use_view_mode(scope: &'static str, default: ViewMode) -> ViewModeHandle {
    let mut mode = use_signal(move || default);

    // Storage is only reachable after mount, on the client.
    use_effect(move || {
        let stored = load_view_mode(scope, default);
        if stored != mode() {
            mode.set(stored);
        }
    });

    ViewModeHandle { scope, mode }
}

/// Signal plus persisting setter for one scope.
#[derive(Clone, Copy)]
pub struct ViewModeHandle {
    scope: &'static str,
    mode: Signal<ViewMode>,
}

impl ViewModeHandle {
    pub fn get(&self) -> ViewMode {
        (self.mode)()
    }

    /// Memory first, then persist best-effort: the UI keeps responding
    /// even when storage refuses the write.
    pub fn set(&mut self, mode: ViewMode) {
        self.mode.set(mode);
        store_view_mode(self.scope, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scope_namespaced() {
        assert_eq!(storage_key("movies"), "kodiview-movies");
        assert_eq!(storage_key("artists"), "kodiview-artists");
    }

    #[test]
    fn stored_literals_round_trip() {
        assert_eq!(parse_view_mode(Some("list"), ViewMode::Grid), ViewMode::List);
        assert_eq!(parse_view_mode(Some("grid"), ViewMode::List), ViewMode::Grid);
    }

    #[test]
    fn garbage_and_absence_fall_back_to_the_default() {
        assert_eq!(parse_view_mode(None, ViewMode::Grid), ViewMode::Grid);
        assert_eq!(parse_view_mode(Some(""), ViewMode::List), ViewMode::List);
        assert_eq!(
            parse_view_mode(Some("mosaic"), ViewMode::Grid),
            ViewMode::Grid
        );
        // Matching is exact, not case-insensitive.
        assert_eq!(parse_view_mode(Some("List"), ViewMode::Grid), ViewMode::Grid);
    }

    #[test]
    fn native_load_always_yields_the_default() {
        assert_eq!(load_view_mode("movies", ViewMode::List), ViewMode::List);
    }
}
