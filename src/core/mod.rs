// src/core/mod.rs

pub mod codec;
pub mod directory;
pub mod ledger;
pub mod paths;
pub mod picker;
pub mod resolver;
pub mod session;
pub mod settings;
