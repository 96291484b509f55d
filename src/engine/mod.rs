// src/engine/mod.rs
pub mod client;
pub mod config;
pub mod config_file;
pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod session;
