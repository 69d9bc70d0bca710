// LogQuery - app/mod.rs
//
// Application layer: wires configuration, file reads, and the core query
// engine together.

pub mod logs;
