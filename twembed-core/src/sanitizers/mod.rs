//! Attribute whitelisting for twembed.
//!
//! `compiler` turns an `EmbedConfig` into an immutable `Whitelist`; `attribute_sanitizer`
//! filters caller attributes through it, prefixing what survives and silently dropping
//! everything else.

pub mod attribute_sanitizer;
pub mod compiler;
