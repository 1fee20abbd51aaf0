//! Suggestion menu tree
//!
//! Menus live in an arena indexed by `MenuId`. Each option either runs an
//! action or links to exactly one child menu; a menu's `children` are exactly
//! the targets of its link options.

use crate::input::actions::EditAction;
use crate::input::toolbox::InsertionRequest;
use std::collections::HashMap;

/// Index of a menu in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub usize);

/// Screen anchor of a menu (line/column of the cursor it was opened at)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuPosition {
    pub left: usize,
    pub top: usize,
}

impl MenuPosition {
    pub fn new(left: usize, top: usize) -> Self {
        Self { left, top }
    }
}

/// What selecting a leaf option does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction {
    /// Insert a construct through the toolbox router
    Insert(InsertionRequest),
    /// Dispatch a ready-made action
    Edit(EditAction),
    /// Option with nothing bound to it
    Noop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionTarget {
    Action(SelectAction),
    Link(MenuId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub text: String,
    pub doc: Option<String>,
    pub target: OptionTarget,
    pub focused: bool,
}

impl MenuOption {
    pub fn child(&self) -> Option<MenuId> {
        match self.target {
            OptionTarget::Link(id) => Some(id),
            OptionTarget::Action(_) => None,
        }
    }

    pub fn is_link(&self) -> bool {
        self.child().is_some()
    }

    pub fn action(&self) -> Option<&SelectAction> {
        match &self.target {
            OptionTarget::Action(action) => Some(action),
            OptionTarget::Link(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub options: Vec<MenuOption>,
    pub parent: Option<MenuId>,
    pub children: Vec<MenuId>,
    pub open: bool,
    /// Index of the link option whose child was last entered
    pub opened_link: Option<usize>,
    pub position: MenuPosition,
}

impl Menu {
    fn new(options: Vec<MenuOption>, position: MenuPosition) -> Self {
        Self {
            options,
            parent: None,
            children: Vec::new(),
            open: false,
            opened_link: None,
            position,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.options.iter().position(|o| o.focused)
    }

    pub fn clear_focus(&mut self) {
        for option in &mut self.options {
            option.focused = false;
        }
    }
}

/// Arena of menus rooted at `root`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTree {
    menus: Vec<Option<Menu>>,
    root: MenuId,
}

impl MenuTree {
    /// Build a tree from `(key, options)` pairs.
    ///
    /// An option is a leaf when `actions` names it, a link when it names another
    /// non-empty key, and a no-op leaf otherwise. Keys with no options produce no
    /// menu. A menu is linked from at most one parent; menus unreachable from
    /// `root_key` are discarded. Returns `None` when the root has no menu.
    pub fn build(
        option_map: &[(String, Vec<String>)],
        root_key: &str,
        actions: &HashMap<String, SelectAction>,
        docs: &HashMap<String, String>,
        position: MenuPosition,
    ) -> Option<Self> {
        let mut menus = Vec::new();
        let mut ids: HashMap<&str, MenuId> = HashMap::new();

        for (key, options) in option_map {
            if options.is_empty() || ids.contains_key(key.as_str()) {
                continue;
            }
            let options = options
                .iter()
                .map(|text| MenuOption {
                    text: text.clone(),
                    doc: docs.get(text).cloned(),
                    target: OptionTarget::Action(
                        actions.get(text).cloned().unwrap_or(SelectAction::Noop),
                    ),
                    focused: false,
                })
                .collect();
            ids.insert(key.as_str(), MenuId(menus.len()));
            menus.push(Some(Menu::new(options, position)));
        }

        let Some(&root) = ids.get(root_key) else {
            tracing::debug!("MenuTree.build: no options under root {:?}", root_key);
            return None;
        };

        let mut tree = Self { menus, root };
        for (key, options) in option_map {
            let Some(&parent) = ids.get(key.as_str()) else {
                continue;
            };
            for (index, text) in options.iter().enumerate() {
                if actions.contains_key(text) {
                    continue;
                }
                let Some(&child) = ids.get(text.as_str()) else {
                    continue;
                };
                let linkable = child != parent
                    && child != root
                    && tree.get(child).is_some_and(|m| m.parent.is_none());
                if linkable {
                    tree.link(parent, index, child);
                }
            }
        }

        tree.discard_unreachable();
        Some(tree)
    }

    fn link(&mut self, parent: MenuId, index: usize, child: MenuId) {
        if let Some(menu) = self.get_mut(child) {
            menu.parent = Some(parent);
        }
        if let Some(menu) = self.get_mut(parent) {
            if let Some(option) = menu.options.get_mut(index) {
                option.target = OptionTarget::Link(child);
                menu.children.push(child);
            }
        }
    }

    fn discard_unreachable(&mut self) {
        let reachable = self.preorder();
        for (index, slot) in self.menus.iter_mut().enumerate() {
            if !reachable.contains(&MenuId(index)) {
                *slot = None;
            }
        }
    }

    pub fn root(&self) -> MenuId {
        self.root
    }

    pub fn get(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn root_menu(&self) -> Option<&Menu> {
        self.get(self.root)
    }

    /// Number of live menus
    pub fn len(&self) -> usize {
        self.menus.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Menu ids in preorder (root first, children in option order)
    pub fn preorder(&self) -> Vec<MenuId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(menu) = self.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(menu.children.iter().rev().copied());
        }
        order
    }

    pub fn open(&mut self, id: MenuId) {
        if let Some(menu) = self.get_mut(id) {
            menu.open = true;
        }
    }

    /// Close a menu and every open menu below it; closing clears focus
    pub fn close(&mut self, id: MenuId) {
        if let Some(menu) = self.get_mut(id) {
            menu.open = false;
            menu.clear_focus();
        }
        self.close_children(id);
    }

    pub fn close_children(&mut self, id: MenuId) {
        let children = self.get(id).map(|m| m.children.clone()).unwrap_or_default();
        for child in children {
            if self.get(child).is_some_and(|m| m.open) {
                self.close(child);
            }
        }
    }

    /// Flatten chains of single-option menus whose only option is a link.
    ///
    /// Such a menu takes over its child's options and children; the child is
    /// dropped. Running it twice changes nothing.
    pub fn collapse_single_option_link_menus(&mut self) {
        self.collapse(self.root);
    }

    fn collapse(&mut self, id: MenuId) {
        let Some(menu) = self.get(id) else {
            return;
        };
        if menu.children.is_empty() {
            return;
        }

        if menu.options.len() == 1 && menu.children.len() == 1 {
            let child_id = menu.children[0];
            let Some(mut child) = self.menus.get_mut(child_id.0).and_then(Option::take) else {
                return;
            };
            child.clear_focus();
            for grandchild in &child.children {
                if let Some(m) = self.get_mut(*grandchild) {
                    m.parent = Some(id);
                }
            }
            if let Some(menu) = self.get_mut(id) {
                menu.options = child.options;
                menu.children = child.children;
                menu.opened_link = None;
            }
            self.collapse(id);
            return;
        }

        for child in menu.children.clone() {
            self.collapse(child);
        }
    }
}
