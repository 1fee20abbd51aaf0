//! Suggestion menu controller
//!
//! Owns at most one menu tree at a time and the keyboard/mouse focus inside it.
//! `menus` is the tree in preorder; `focused_menu` indexes it and
//! `focused_option` indexes that menu's options.

use crate::config::MenuConfig;
use crate::view::menu::{Menu, MenuId, MenuOption, MenuPosition, MenuTree, OptionTarget, SelectAction};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct MenuController {
    tree: Option<MenuTree>,
    menus: Vec<MenuId>,
    focused_menu: usize,
    focused_option: Option<usize>,
    config: MenuConfig,
}

impl MenuController {
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Build a hierarchical menu, replacing any open one. Returns false when
    /// the root key has no options and nothing was built.
    pub fn build_menu(
        &mut self,
        option_map: &[(String, Vec<String>)],
        root_key: &str,
        actions: &HashMap<String, SelectAction>,
        position: MenuPosition,
    ) -> bool {
        if self.tree.is_some() {
            tracing::debug!("MenuController.build_menu: replacing open menu");
            self.remove_menus();
        }

        let Some(mut tree) = MenuTree::build(option_map, root_key, actions, &self.config.docs, position)
        else {
            return false;
        };
        tree.collapse_single_option_link_menus();
        tracing::debug!(
            "MenuController.build_menu: {} menus under {:?}",
            tree.len(),
            root_key
        );

        self.tree = Some(tree);
        self.update_menu_array_from_tree();
        self.open_root_menu();
        true
    }

    /// One flat menu listing `suggestions`; nothing is built for an empty list
    pub fn build_single_level_menu(
        &mut self,
        suggestions: &[String],
        actions: &HashMap<String, SelectAction>,
        position: MenuPosition,
    ) -> bool {
        if suggestions.is_empty() {
            self.remove_menus();
            return false;
        }
        let root = self.config.root.clone();
        self.build_menu(&[(root.clone(), suggestions.to_vec())], &root, actions, position)
    }

    /// The configured category menu, restricted to `suggestions`.
    ///
    /// Leaf options not suggested are dropped, then empty categories and the
    /// links pointing at them are pruned until nothing changes.
    pub fn build_available_inserts_menu(
        &mut self,
        suggestions: &[String],
        actions: &HashMap<String, SelectAction>,
        position: MenuPosition,
    ) -> bool {
        let suggested: HashSet<&str> = suggestions.iter().map(String::as_str).collect();
        let categories: HashSet<&str> = self
            .config
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        let mut option_map: Vec<(String, Vec<String>)> = self
            .config
            .option_map()
            .into_iter()
            .map(|(name, options)| {
                let options = options
                    .into_iter()
                    .filter(|o| categories.contains(o.as_str()) || suggested.contains(o.as_str()))
                    .collect();
                (name, options)
            })
            .collect();

        loop {
            let empty: HashSet<String> = option_map
                .iter()
                .filter(|(_, options)| options.is_empty())
                .map(|(name, _)| name.clone())
                .collect();
            if empty.is_empty() {
                break;
            }
            option_map.retain(|(_, options)| !options.is_empty());
            for (_, options) in &mut option_map {
                options.retain(|o| !empty.contains(o));
            }
        }

        let root = self.config.root.clone();
        self.build_menu(&option_map, &root, actions, position)
    }

    /// Drop the current tree and reset focus
    pub fn remove_menus(&mut self) {
        if self.tree.take().is_some() {
            tracing::debug!("MenuController.remove_menus");
        }
        self.menus.clear();
        self.focused_menu = 0;
        self.focused_option = None;
    }

    fn update_menu_array_from_tree(&mut self) {
        self.menus = self.tree.as_ref().map(MenuTree::preorder).unwrap_or_default();
        self.focused_menu = 0;
        self.focused_option = None;
    }

    pub fn is_menu_open(&self) -> bool {
        self.tree
            .as_ref()
            .and_then(MenuTree::root_menu)
            .is_some_and(|m| m.open)
    }

    /// Toggle the root menu
    pub fn open_root_menu(&mut self) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        let root = tree.root();
        if tree.get(root).is_some_and(|m| m.open) {
            tree.close(root);
            self.focused_menu = 0;
            self.focused_option = None;
        } else {
            tree.open(root);
        }
    }

    pub fn focus_option_below(&mut self) {
        let Some((id, len)) = self.focused_menu_len() else {
            return;
        };
        let next = match self.focused_option {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.set_focus(id, next);
    }

    pub fn focus_option_above(&mut self) {
        let Some((id, len)) = self.focused_menu_len() else {
            return;
        };
        let next = match self.focused_option {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.set_focus(id, next);
    }

    fn focused_menu_len(&self) -> Option<(MenuId, usize)> {
        let id = self.focused_menu_id()?;
        let len = self.menu(id)?.options.len();
        (len > 0).then_some((id, len))
    }

    /// Focus an option directly (mouse hover). Focusing a link previews its child.
    pub fn focus_option(&mut self, menu: MenuId, index: usize) -> bool {
        self.set_focus(menu, index)
    }

    fn set_focus(&mut self, id: MenuId, index: usize) -> bool {
        let Some(position) = self.menus.iter().position(|m| *m == id) else {
            return false;
        };
        let Some(tree) = self.tree.as_mut() else {
            return false;
        };
        let Some(child) = tree
            .get(id)
            .and_then(|m| m.options.get(index))
            .map(MenuOption::child)
        else {
            return false;
        };

        tree.close_children(id);
        if let Some(menu) = tree.get_mut(id) {
            menu.clear_focus();
            menu.open = true;
            menu.options[index].focused = true;
        }
        if let Some(child) = child {
            tree.open(child);
        }

        self.focused_menu = position;
        self.focused_option = Some(index);
        true
    }

    /// Enter the child of the focused link option and focus its first option
    pub fn open_sub_menu(&mut self) -> bool {
        let (Some(id), Some(index)) = (self.focused_menu_id(), self.focused_option) else {
            return false;
        };
        let Some(tree) = self.tree.as_mut() else {
            return false;
        };
        let Some(child) = tree
            .get(id)
            .and_then(|m| m.options.get(index))
            .and_then(MenuOption::child)
        else {
            return false;
        };

        if let Some(menu) = tree.get_mut(id) {
            menu.opened_link = Some(index);
        }
        tree.open(child);
        let has_options = tree.get(child).is_some_and(|m| !m.options.is_empty());

        if let Some(position) = self.menus.iter().position(|m| *m == child) {
            self.focused_menu = position;
            self.focused_option = None;
        }
        if has_options {
            self.set_focus(child, 0);
        }
        true
    }

    /// Return to the parent menu, refocusing the link that was entered
    pub fn close_sub_menu(&mut self) -> bool {
        let Some(id) = self.focused_menu_id() else {
            return false;
        };
        let Some(parent) = self.menu(id).and_then(|m| m.parent) else {
            return false;
        };
        let restore = self.menu(parent).and_then(|m| m.opened_link);

        let refocused = restore.is_some_and(|index| self.set_focus(parent, index));
        if !refocused {
            if let Some(menu) = self.tree.as_mut().and_then(|t| t.get_mut(parent)) {
                menu.clear_focus();
            }
            self.focused_menu = self.menus.iter().position(|m| *m == parent).unwrap_or(0);
            self.focused_option = None;
        }
        if let Some(tree) = self.tree.as_mut() {
            tree.close_children(parent);
        }
        true
    }

    /// Select the focused option. A link opens its child and yields nothing;
    /// a leaf yields its action for the caller to run.
    pub fn select_focused_option(&mut self) -> Option<SelectAction> {
        let id = self.focused_menu_id()?;
        let index = self.focused_option?;
        let tree = self.tree.as_mut()?;
        let target = tree.get(id)?.options.get(index)?.target.clone();
        match target {
            OptionTarget::Link(child) => {
                tree.open(child);
                None
            }
            OptionTarget::Action(action) => Some(action),
        }
    }

    pub fn tree(&self) -> Option<&MenuTree> {
        self.tree.as_ref()
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.tree.as_ref()?.get(id)
    }

    /// Menus in preorder
    pub fn menus(&self) -> &[MenuId] {
        &self.menus
    }

    pub fn focused_menu_id(&self) -> Option<MenuId> {
        self.menus.get(self.focused_menu).copied()
    }

    pub fn focused_option(&self) -> Option<usize> {
        self.focused_option
    }

    pub fn focused_option_text(&self) -> Option<&str> {
        let menu = self.menu(self.focused_menu_id()?)?;
        menu.options
            .get(self.focused_option?)
            .map(|o| o.text.as_str())
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }
}
