//! kodiview - web-based library browser for Kodi media centers
//!
//! Talks to a Kodi instance over its JSON-RPC API and renders library
//! browsing, detail pages, playback resume state and search.
//!
//! This library provides:
//! - A Kodi JSON-RPC transport with cooperative cancellation
//! - An explicit response cache with per-key request coalescing
//! - One cached read operation per library entity type
//! - A thin REST API for the web UI (axum)
//! - Web UI (Dioxus + router) with client-persisted view preferences

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (shared between server SSR and WASM client)
pub mod app;

// Library data access: shared types plus the server-only client and cache
pub mod library;

// Server-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod rpc;
