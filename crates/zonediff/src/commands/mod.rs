//! Command handlers: bridge CLI args -> core pipeline -> output formatting.

pub mod compare;
pub mod config_cmd;
