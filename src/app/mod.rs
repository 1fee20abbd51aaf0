//! Editor session: routes input events through the resolver into the executer
//! and keeps the suggestion menu in step with them.

mod menu_actions;

use crate::config::Config;
use crate::input::actions::{ActionData, ActionSource, EditAction, EditActionType};
use crate::input::resolver::{EditActionResolver, Resolution, ResolveEnv};
use crate::input::toolbox::InsertionRequest;
use crate::model::collaborators::{
    ActionFilter, ContextProvider, Executer, InsertionRecord, Validator,
};
use crate::model::context::Context;
use crate::model::scripted::ScriptedEnv;
use crate::view::menu::{MenuPosition, SelectAction};
use crate::view::menu_controller::MenuController;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// The external collaborators a session talks to
pub struct Collaborators {
    pub validator: Box<dyn Validator>,
    pub provider: Box<dyn ContextProvider>,
    pub filter: Box<dyn ActionFilter>,
    pub executer: Box<dyn Executer>,
}

impl Collaborators {
    /// All read-only collaborators answered by one shared script
    pub fn scripted(env: ScriptedEnv, executer: impl Executer + 'static) -> Self {
        Self {
            validator: Box::new(env.clone()),
            provider: Box::new(env.clone()),
            filter: Box::new(env),
            executer: Box::new(executer),
        }
    }
}

/// One editing session
pub struct EditorSession {
    config: Config,
    resolver: EditActionResolver,
    menu: MenuController,
    /// Provenance given to insertions selected from the open menu
    menu_source: ActionSource,
    collaborators: Collaborators,
}

impl EditorSession {
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        let resolver = EditActionResolver::new(&config);
        let menu = MenuController::new(config.menu.clone());
        Self {
            config,
            resolver,
            menu,
            menu_source: ActionSource::Toolbox,
            collaborators,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuController {
        &mut self.menu
    }

    /// Snapshot at the cursor
    pub fn context(&self) -> Context {
        self.collaborators.provider.context(None)
    }

    /// Resolve a key against `context` without executing anything
    pub fn resolve_key(&self, event: &KeyEvent, context: &Context) -> Resolution {
        let env = ResolveEnv {
            validator: self.collaborators.validator.as_ref(),
            filter: self.collaborators.filter.as_ref(),
            provider: self.collaborators.provider.as_ref(),
            menu_open: self.menu.is_menu_open(),
        };
        self.resolver.resolve_key(event, context, env)
    }

    pub fn resolve_key_action(&self, event: &KeyEvent, context: &Context) -> EditAction {
        self.resolve_key(event, context).action
    }

    pub fn resolve_toolbox_action(&self, request: &InsertionRequest, context: &Context) -> EditAction {
        self.resolver
            .resolve_toolbox(request, context, self.collaborators.validator.as_ref())
    }

    /// Handle a key press. Returns true when the key's default behaviour should
    /// be suppressed.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        let mut context = self.context();
        let resolution = self.resolve_key(event, &context);

        let mut suppressed = false;
        if let Some(commit) = resolution.auto_commit {
            tracing::debug!(
                "EditorSession.on_key_down: committing {:?} before {:?}",
                commit.data,
                resolution.action.action_type
            );
            suppressed |= self.dispatch(&commit, &context, Some(event));
            context = self.context();
        }

        let handled = self.dispatch(&resolution.action, &context, Some(event));
        suppressed || handled
    }

    /// Handle a toolbox button press
    pub fn on_button_down(&mut self, request: &InsertionRequest) -> bool {
        let context = self.context();
        let action = self.resolve_toolbox_action(request, &context);
        if action.is_none() {
            tracing::debug!(
                "EditorSession.on_button_down: {:?} not insertable here",
                request.kind
            );
            return false;
        }
        self.dispatch(&action, &context, None)
    }

    /// Open the categorised menu of everything insertable at the cursor
    pub fn show_available_inserts(&mut self) -> bool {
        let context = self.context();
        let records: Vec<InsertionRecord> = self
            .collaborators
            .filter
            .processed_insertions(&context)
            .into_iter()
            .filter(InsertionRecord::is_insertable)
            .collect();
        let suggestions: Vec<String> = records.iter().map(|r| r.construct.clone()).collect();

        self.menu_source = ActionSource::Toolbox;
        self.menu
            .build_available_inserts_menu(&suggestions, &insert_actions(&records), menu_position(&context))
    }

    /// Send an action to its handler. Returns the suppress-default flag.
    fn dispatch(&mut self, action: &EditAction, context: &Context, key: Option<&KeyEvent>) -> bool {
        let action_type = action.action_type;
        tracing::trace!("EditorSession.dispatch: {:?} from {:?}", action_type, action.source);

        match action_type {
            EditActionType::None => false,
            t if t.is_menu_directed() => {
                self.apply_menu_action(action_type);
                true
            }
            EditActionType::OpenAutocomplete => {
                let suppressed = self.collaborators.executer.execute(action, context, key);
                if let Some(ActionData::Autocomplete { valid_matches, .. }) = &action.data {
                    let suggestions: Vec<String> =
                        valid_matches.iter().map(|r| r.construct.clone()).collect();
                    self.menu_source = ActionSource::Autocomplete;
                    self.menu.build_single_level_menu(
                        &suggestions,
                        &insert_actions(valid_matches),
                        menu_position(context),
                    );
                }
                suppressed
            }
            _ => {
                // A committed match or a move off the token ends the suggestion session
                let ends_session =
                    action.source == ActionSource::Autocomplete || action_type.leaves_token();
                if ends_session && self.menu.is_menu_open() {
                    self.menu.remove_menus();
                }
                self.collaborators.executer.execute(action, context, key)
            }
        }
    }

    /// Run the action bound to a selected menu leaf
    fn run_selection(&mut self, selection: SelectAction) {
        self.menu.remove_menus();
        let context = self.context();
        match selection {
            SelectAction::Insert(request) => {
                let action = self
                    .resolve_toolbox_action(&request, &context)
                    .from_source(self.menu_source);
                if action.is_none() {
                    tracing::debug!(
                        "EditorSession.run_selection: {:?} no longer insertable",
                        request.kind
                    );
                    return;
                }
                self.dispatch(&action, &context, None);
            }
            SelectAction::Edit(action) => {
                self.dispatch(&action, &context, None);
            }
            SelectAction::Noop => {}
        }
    }
}

fn insert_actions(records: &[InsertionRecord]) -> HashMap<String, SelectAction> {
    records
        .iter()
        .map(|r| (r.construct.clone(), SelectAction::Insert(r.request.clone())))
        .collect()
}

fn menu_position(context: &Context) -> MenuPosition {
    MenuPosition::new(context.position.column, context.position.line)
}
