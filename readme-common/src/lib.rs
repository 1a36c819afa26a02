//! Shared building blocks for the README updater: record types, two-line text
//! layout and literal `{{ key }}` template substitution. Nothing in here touches
//! the network or the filesystem.

pub mod template;
pub mod text;
pub mod types;

pub use template::{render, Bindings};
pub use text::wrap_text;
pub use types::{language_color, safe_key, RenderedCard, RepoRecord, TrackRecord};
