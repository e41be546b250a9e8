//! Shielding of Scriban regions from the markup reformatter.
//!
//! The reformatter understands neither Scriban nor its nesting, so before it
//! runs every region it must not touch is swapped for a placeholder token:
//! - [`style`]: `<style>` bodies that contain Scriban tags
//! - [`tags`]: every complete `{{ ... }}` tag
//! - [`placeholder`]: Collision-free tokens, verification and restoration
//!
//! Restoration happens in reverse order: tags first, then style bodies.

pub mod placeholder;
pub mod style;
pub mod tags;

pub use placeholder::Placeholders;
pub use style::{protect_style_blocks, ProtectedStyles};
pub use tags::{protect_tags, ProtectedTags};
