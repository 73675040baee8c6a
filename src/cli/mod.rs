//! CLI command handling

pub mod demo;
pub mod history;
pub mod output;

pub use demo::*;
pub use history::*;
pub use output::*;
