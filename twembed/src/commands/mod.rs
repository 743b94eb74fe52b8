// twembed/src/commands/mod.rs
pub mod embed;
pub mod rules;
