// LogQuery - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// for hosts that embed the query engine directly.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
