//! Helper functions for building page fragments
//!
//! Escaping, placeholder markup, URL derivation and the post list renderer.

mod html;
mod list;
mod url;

pub use html::*;
pub use list::ListRenderer;
pub use url::*;
