//! Menu-related action handlers.
//!
//! Keyboard actions that only steer the suggestion menu, plus the mouse
//! hover/click entry points.

use super::EditorSession;
use crate::input::actions::EditActionType;
use crate::view::menu::MenuId;

impl EditorSession {
    pub(super) fn apply_menu_action(&mut self, action_type: EditActionType) {
        match action_type {
            EditActionType::SelectMenuSuggestionBelow => self.menu.focus_option_below(),
            EditActionType::SelectMenuSuggestionAbove => self.menu.focus_option_above(),
            EditActionType::OpenSubMenu => {
                self.menu.open_sub_menu();
            }
            EditActionType::CloseSubMenu => {
                self.menu.close_sub_menu();
            }
            EditActionType::SelectMenuSuggestion => self.handle_menu_execute(),
            EditActionType::CloseValidInsertMenu => self.menu.remove_menus(),
            other => tracing::warn!("apply_menu_action: {:?} is not a menu action", other),
        }
    }

    /// Select the focused option; leaves close the menu and run, links open their child
    fn handle_menu_execute(&mut self) {
        if let Some(selection) = self.menu.select_focused_option() {
            self.run_selection(selection);
        }
    }

    /// Mouse moved over an option
    pub fn on_menu_hover(&mut self, menu: MenuId, option: usize) -> bool {
        self.menu.focus_option(menu, option)
    }

    /// Mouse click on an option. Clicking a link enters its child menu.
    pub fn on_menu_click(&mut self, menu: MenuId, option: usize) -> bool {
        if !self.menu.focus_option(menu, option) {
            return false;
        }
        let is_link = self
            .menu
            .menu(menu)
            .and_then(|m| m.options.get(option))
            .is_some_and(|o| o.is_link());
        if is_link {
            return self.menu.open_sub_menu();
        }
        self.handle_menu_execute();
        true
    }
}
