pub mod cli;
pub mod constants;
pub mod core;
pub mod host;
pub mod models;
