//! Seams to the collaborators that live outside the interaction core
//!
//! The syntax tree, its validity checks and the code that applies an edit are
//! owned elsewhere. The core only sees them through these traits: every query is
//! a pure read of a `Context`, and the executer is the single place where an
//! `EditAction` touches the tree.

use crate::input::actions::EditAction;
use crate::input::toolbox::InsertionRequest;
use crate::model::context::{Context, NodeId, Position};
use crate::model::predicates::Predicate;
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

/// Named boolean queries over a context
pub trait Validator {
    /// Answer one structural question. Must be side-effect free.
    fn check(&self, predicate: Predicate, context: &Context) -> bool;
}

/// Produces context snapshots for the current cursor position
pub trait ContextProvider {
    /// Snapshot at `position`, or at the cursor when `None`
    fn context(&self, position: Option<Position>) -> Context;

    fn is_text_editable(&self, context: &Context) -> bool {
        context.text_editable
    }

    /// Draft-mode node enclosing the cursor, if any
    fn containing_draft_node(&self, context: &Context) -> Option<NodeId>;
}

/// Legality of a candidate insertion in the active context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertionStatus {
    Valid,
    Invalid,
    /// Insertable, but the value will not type-check until converted
    DraftMode,
}

/// A candidate construct plus its current legality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRecord {
    /// Display name of the construct (menu option text)
    pub construct: String,
    /// Text an autocomplete token must equal to commit this construct
    pub match_text: String,
    /// Toolbox request that inserts the construct
    pub request: InsertionRequest,
    pub status: InsertionStatus,
}

impl InsertionRecord {
    pub fn is_insertable(&self) -> bool {
        self.status != InsertionStatus::Invalid
    }
}

/// Computes which insertions are currently legal
pub trait ActionFilter {
    fn processed_insertions(&self, context: &Context) -> Vec<InsertionRecord>;

    /// Insertions restricted to code constructs (autocomplete candidates)
    fn processed_construct_insertions(&self, context: &Context) -> Vec<InsertionRecord>;
}

/// Applies resolved actions to the syntax tree
pub trait Executer {
    /// Returns true when the originating key's default behaviour should be suppressed
    fn execute(&mut self, action: &EditAction, context: &Context, key: Option<&KeyEvent>) -> bool;
}
