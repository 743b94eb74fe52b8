// twembed/src/ui/mod.rs
pub mod output_format;
