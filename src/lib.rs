//! Interaction core of a structural code editor.
//!
//! Keyboard events and toolbox button presses are resolved against a
//! snapshot of the cursor context into [`EditAction`]s, which an external
//! executer applies to the syntax tree. Autocomplete and the "available
//! inserts" palette are driven through a hierarchical suggestion menu.

pub mod app;
pub mod config;
pub mod input;
pub mod model;
pub mod services;
pub mod view;

pub use app::{Collaborators, EditorSession};
pub use config::Config;
pub use input::actions::{ActionData, ActionSource, EditAction, EditActionType};
pub use input::resolver::{EditActionResolver, Resolution, ResolveEnv};
pub use view::menu_controller::MenuController;
