//! Shared UI components for the Dioxus fullstack web UI.

pub mod feedback;
pub mod layout;
pub mod nav;
pub mod resume;
pub mod viewmode;

pub use feedback::{EmptyCard, ErrorCard, LoadingCard};
pub use layout::Layout;
pub use nav::Nav;
pub use resume::{ResumeButton, ResumeProgress};
pub use viewmode::ViewModeToggle;
