pub mod build;
pub mod check;
pub mod emit;
pub mod graph;
pub mod pattern_loader;
pub mod run_common;
