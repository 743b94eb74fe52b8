// twembed/src/lib.rs
//! # twembed CLI
//!
//! A thin host around `twembed-core`: it collects embed-tag attributes from the
//! command line, runs them through an `EmbedEngine` and prints the resulting plan
//! as JSON for a renderer to consume.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
