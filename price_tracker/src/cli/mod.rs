pub mod commands;
pub mod prompt;
