pub mod autocomplete;
pub mod keyboard;
pub mod menu_navigation;
pub mod toolbox;
