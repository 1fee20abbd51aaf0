//! Input handling: key classification, action types and their resolution

pub mod actions;
pub mod keys;
pub mod resolver;
pub mod toolbox;
