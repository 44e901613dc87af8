//! Library data access.
//!
//! The pure pieces (identifiers, paging arithmetic, wire types) compile for
//! both the server and the WASM client; the RPC-backed client and its
//! response cache are server-only.

pub mod ids;
pub mod paging;
pub mod types;

#[cfg(feature = "server")]
pub mod cache;
#[cfg(feature = "server")]
pub mod client;
#[cfg(feature = "server")]
pub mod properties;

pub use ids::LibraryId;

#[cfg(feature = "server")]
pub use client::KodiClient;
