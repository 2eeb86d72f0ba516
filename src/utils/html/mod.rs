// src/utils/html/mod.rs

//! Allow-list sanitization for HTML written in the rich-text editor.
//!
//! Content is parsed into a tree, every element outside the allow-list is
//! unwrapped (its children take its place), attributes are filtered per tag,
//! and anchors are rewritten to open safe destinations in a new tab.
//!
//! Note:
//! 1. Unwrapping a `<script>` or `<style>` keeps its text as plain, escaped
//!    text. It never executes, but it does show up in the output.
//! 2. Without a tree parser (built without the `dom` feature) only
//!    `<script>` spans are stripped; see [`SanitizeMode::Degraded`].

#[cfg(feature = "dom")]
pub mod dom;
pub mod engine;
pub mod fallback;
pub mod link;
pub mod policy;

pub use engine::{ParserCapability, SanitizeMode, Sanitized, sanitize, sanitize_with};
