//! Scripted collaborators
//!
//! Table-driven stand-ins for the syntax tree side of the editor. A `Script`
//! pins a context, the set of predicates that hold in it, and the insertion
//! candidates the action filter reports. `ScriptedEnv` shares one script between
//! the three read-only collaborators so a driver can mutate it between events.
//! `RecordingExecuter` logs every action instead of applying it.
//!
//! Used by the `event_debug` binary and by the test harness.

use crate::input::actions::EditAction;
use crate::model::collaborators::{ActionFilter, ContextProvider, Executer, InsertionRecord, Validator};
use crate::model::context::{Context, NodeId, Position};
use crate::model::predicates::Predicate;
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::collections::BTreeSet;
use std::path::Path;
use std::rc::Rc;

/// A fixed answer sheet for every collaborator query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub context: Context,
    /// Predicates that hold; all others are false
    pub predicates: BTreeSet<Predicate>,
    pub draft_node: Option<NodeId>,
    /// Reported by `processed_insertions`
    pub insertions: Vec<InsertionRecord>,
    /// Reported by `processed_construct_insertions`
    pub constructs: Vec<InsertionRecord>,
}

impl Script {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }

    pub fn with_predicates(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            predicates: predicates.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn holding(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn with_insertions(mut self, insertions: Vec<InsertionRecord>) -> Self {
        self.insertions = insertions;
        self
    }

    pub fn with_constructs(mut self, constructs: Vec<InsertionRecord>) -> Self {
        self.constructs = constructs;
        self
    }

    pub fn with_draft_node(mut self, node: u64) -> Self {
        self.draft_node = Some(NodeId(node));
        self
    }

    /// Load a script from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let script = serde_json::from_str(&contents)?;
        Ok(script)
    }
}

impl Validator for Script {
    fn check(&self, predicate: Predicate, _context: &Context) -> bool {
        self.predicates.contains(&predicate)
    }
}

impl ContextProvider for Script {
    fn context(&self, position: Option<Position>) -> Context {
        let mut context = self.context.clone();
        if let Some(position) = position {
            context.position = position;
        }
        context
    }

    fn containing_draft_node(&self, _context: &Context) -> Option<NodeId> {
        self.draft_node
    }
}

impl ActionFilter for Script {
    fn processed_insertions(&self, _context: &Context) -> Vec<InsertionRecord> {
        self.insertions.clone()
    }

    fn processed_construct_insertions(&self, _context: &Context) -> Vec<InsertionRecord> {
        self.constructs.clone()
    }
}

/// Shared handle to a script, usable as any read-only collaborator
#[derive(Debug, Clone, Default)]
pub struct ScriptedEnv {
    script: Rc<RefCell<Script>>,
}

impl ScriptedEnv {
    pub fn new(script: Script) -> Self {
        Self {
            script: Rc::new(RefCell::new(script)),
        }
    }

    pub fn script(&self) -> Ref<'_, Script> {
        self.script.borrow()
    }

    /// Replace or tweak the script between events
    pub fn update(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.borrow_mut());
    }
}

impl Validator for ScriptedEnv {
    fn check(&self, predicate: Predicate, context: &Context) -> bool {
        self.script.borrow().check(predicate, context)
    }
}

impl ContextProvider for ScriptedEnv {
    fn context(&self, position: Option<Position>) -> Context {
        self.script.borrow().context(position)
    }

    fn containing_draft_node(&self, context: &Context) -> Option<NodeId> {
        self.script.borrow().containing_draft_node(context)
    }
}

impl ActionFilter for ScriptedEnv {
    fn processed_insertions(&self, context: &Context) -> Vec<InsertionRecord> {
        self.script.borrow().processed_insertions(context)
    }

    fn processed_construct_insertions(&self, context: &Context) -> Vec<InsertionRecord> {
        self.script.borrow().processed_construct_insertions(context)
    }
}

/// Shared log of executed actions
pub type ExecutionLog = Rc<RefCell<Vec<EditAction>>>;

/// Executer that records actions instead of editing a tree
#[derive(Debug, Clone, Default)]
pub struct RecordingExecuter {
    log: ExecutionLog,
    suppress_default: bool,
}

impl RecordingExecuter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned from `execute` for non-`None` actions
    pub fn suppressing(mut self, suppress_default: bool) -> Self {
        self.suppress_default = suppress_default;
        self
    }

    pub fn log(&self) -> ExecutionLog {
        Rc::clone(&self.log)
    }
}

impl Executer for RecordingExecuter {
    fn execute(&mut self, action: &EditAction, _context: &Context, _key: Option<&KeyEvent>) -> bool {
        self.log.borrow_mut().push(action.clone());
        self.suppress_default && !action.is_none()
    }
}
