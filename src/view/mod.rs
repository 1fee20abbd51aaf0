//! Suggestion menus

pub mod menu;
pub mod menu_controller;
