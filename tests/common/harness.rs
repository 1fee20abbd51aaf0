// SessionTestHarness - drives an EditorSession against a scripted syntax tree

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use structural_editor::app::{Collaborators, EditorSession};
use structural_editor::config::Config;
use structural_editor::input::actions::{EditAction, EditActionType};
use structural_editor::input::keys::parse_key;
use structural_editor::input::resolver::Resolution;
use structural_editor::input::toolbox::{InsertKind, InsertionRequest};
use structural_editor::model::collaborators::{InsertionRecord, InsertionStatus};
use structural_editor::model::scripted::{ExecutionLog, RecordingExecuter, Script, ScriptedEnv};
use structural_editor::view::menu::MenuId;

/// Insertion record whose construct name is also its autocomplete match text
pub fn record(text: &str, kind: InsertKind, status: InsertionStatus) -> InsertionRecord {
    InsertionRecord {
        construct: text.to_string(),
        match_text: text.to_string(),
        request: InsertionRequest::new(kind, text),
        status,
    }
}

pub fn valid(text: &str, kind: InsertKind) -> InsertionRecord {
    record(text, kind, InsertionStatus::Valid)
}

pub struct SessionTestHarness {
    session: EditorSession,
    env: ScriptedEnv,
    log: ExecutionLog,
}

impl SessionTestHarness {
    pub fn new(script: Script) -> Self {
        Self::with_config(Config::default(), script)
    }

    pub fn with_config(config: Config, script: Script) -> Self {
        let env = ScriptedEnv::new(script);
        let executer = RecordingExecuter::new().suppressing(true);
        let log = executer.log();
        let session = EditorSession::new(config, Collaborators::scripted(env.clone(), executer));
        Self { session, env, log }
    }

    /// Press a key; returns the suppress-default flag
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.session.on_key_down(&KeyEvent::new(code, modifiers))
    }

    /// Press a key given as a spec like "ctrl+backspace"
    pub fn press(&mut self, spec: &str) -> bool {
        let key = parse_key(spec).unwrap_or_else(|| panic!("bad key spec {spec:?}"));
        self.session.on_key_down(&key)
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    pub fn click_button(&mut self, request: &InsertionRequest) -> bool {
        self.session.on_button_down(request)
    }

    /// Resolve a key against the current script without executing it
    pub fn resolve(&self, code: KeyCode, modifiers: KeyModifiers) -> Resolution {
        let context = self.session.context();
        self.session.resolve_key(&KeyEvent::new(code, modifiers), &context)
    }

    pub fn resolve_type(&self, code: KeyCode, modifiers: KeyModifiers) -> EditActionType {
        self.resolve(code, modifiers).action.action_type
    }

    pub fn update_script(&self, f: impl FnOnce(&mut Script)) {
        self.env.update(f);
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    /// Everything the executer received so far
    pub fn actions(&self) -> Vec<EditAction> {
        self.log.borrow().clone()
    }

    pub fn action_types(&self) -> Vec<EditActionType> {
        self.log.borrow().iter().map(|a| a.action_type).collect()
    }

    pub fn last_action(&self) -> Option<EditAction> {
        self.log.borrow().last().cloned()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn menu_ids(&self) -> Vec<MenuId> {
        self.session.menu().menus().to_vec()
    }

    pub fn option_texts(&self, menu: MenuId) -> Vec<String> {
        self.session
            .menu()
            .menu(menu)
            .map(|m| m.options.iter().map(|o| o.text.clone()).collect())
            .unwrap_or_default()
    }

    pub fn assert_menu_open(&self) {
        assert!(self.session.menu().is_menu_open(), "expected an open menu");
    }

    pub fn assert_menu_closed(&self) {
        assert!(!self.session.menu().is_menu_open(), "expected no open menu");
    }

    pub fn assert_focused(&self, text: &str) {
        assert_eq!(self.session.menu().focused_option_text(), Some(text));
    }
}
