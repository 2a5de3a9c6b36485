pub mod commands;
pub mod analyze;
pub mod render;
pub mod rules;
pub mod serve;
pub mod validate;

pub use commands::{Cli, Commands};
