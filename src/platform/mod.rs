// LogQuery - platform/mod.rs
//
// Platform abstraction layer: config files, path resolution, file reads.
// Dependencies: standard library, directories crate, core data types.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
