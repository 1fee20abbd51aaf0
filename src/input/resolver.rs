//! Keyboard path of the edit action resolver
//!
//! Every key class owns an ordered ladder of rules. A rule is a named guard
//! plus an action builder; the first guard that holds decides the action and
//! nothing after it is consulted. Order is load-bearing: an earlier rule wins
//! even when a later one would also match.
//!
//! Rules marked `blur` move the cursor off the current token. When such a rule
//! fires inside an autocomplete token whose text exactly names an insertable
//! construct, the construct's insertion is returned alongside as an
//! auto-commit for the caller to execute first.

use crate::config::{Config, TriggerConfig};
use crate::input::actions::{
    ActionData, ActionSource, EditAction, EditActionType, Operator, Side,
};
use crate::input::keys::{self, KeyClass};
use crate::input::toolbox::{InsertionRequest, ToolboxRouter};
use crate::model::collaborators::{ActionFilter, ContextProvider, InsertionRecord, Validator};
use crate::model::context::{AutocompleteType, Context, DataType, NodeId};
use crate::model::predicates::Predicate;
use crossterm::event::KeyEvent;
use regex::Regex;
use std::collections::HashMap;

/// A single-character trigger pattern
#[derive(Debug, Clone)]
struct Trigger {
    pattern: String,
    regex: Option<Regex>,
}

impl Trigger {
    fn compile(name: &str, pattern: &str, fallback: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => Self {
                pattern: pattern.to_string(),
                regex: Some(regex),
            },
            Err(e) => {
                tracing::warn!(
                    "Invalid {} trigger {:?}: {}, using default {:?}",
                    name,
                    pattern,
                    e,
                    fallback
                );
                Self {
                    pattern: fallback.to_string(),
                    regex: Regex::new(fallback).ok(),
                }
            }
        }
    }

    fn matches(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex
            .as_ref()
            .is_some_and(|r| r.is_match(c.encode_utf8(&mut buf)))
    }
}

/// Compiled autocomplete triggers
#[derive(Debug, Clone)]
pub struct Triggers {
    start_of_line: Trigger,
    expression_hole: Trigger,
    operator_hole: Trigger,
    left_of_expression: Trigger,
    right_of_expression: Trigger,
    in_text_operator: Trigger,
}

impl Triggers {
    pub fn from_config(config: &TriggerConfig) -> Self {
        let defaults = TriggerConfig::default();
        Self {
            start_of_line: Trigger::compile(
                "start_of_line",
                &config.start_of_line,
                &defaults.start_of_line,
            ),
            expression_hole: Trigger::compile(
                "expression_hole",
                &config.expression_hole,
                &defaults.expression_hole,
            ),
            operator_hole: Trigger::compile(
                "operator_hole",
                &config.operator_hole,
                &defaults.operator_hole,
            ),
            left_of_expression: Trigger::compile(
                "left_of_expression",
                &config.left_of_expression,
                &defaults.left_of_expression,
            ),
            right_of_expression: Trigger::compile(
                "right_of_expression",
                &config.right_of_expression,
                &defaults.right_of_expression,
            ),
            in_text_operator: Trigger::compile(
                "in_text_operator",
                &config.in_text_operator,
                &defaults.in_text_operator,
            ),
        }
    }

    fn for_type(&self, autocomplete_type: AutocompleteType) -> &Trigger {
        match autocomplete_type {
            AutocompleteType::StartOfLine => &self.start_of_line,
            AutocompleteType::AtExpressionHole => &self.expression_hole,
            AutocompleteType::AtEmptyOperatorHole => &self.operator_hole,
            AutocompleteType::LeftOfExpression => &self.left_of_expression,
            AutocompleteType::RightOfExpression => &self.right_of_expression,
        }
    }

    /// Pattern handed to the executer alongside an autocomplete session
    pub fn pattern(&self, autocomplete_type: AutocompleteType) -> &str {
        &self.for_type(autocomplete_type).pattern
    }
}

impl Default for Triggers {
    fn default() -> Self {
        Self::from_config(&TriggerConfig::default())
    }
}

/// Collaborators and session state a key resolution reads
#[derive(Clone, Copy)]
pub struct ResolveEnv<'a> {
    pub validator: &'a dyn Validator,
    pub filter: &'a dyn ActionFilter,
    pub provider: &'a dyn ContextProvider,
    pub menu_open: bool,
}

/// Outcome of resolving one key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Insertion to execute before `action` (commit on blur)
    pub auto_commit: Option<EditAction>,
    pub action: EditAction,
}

impl Resolution {
    pub fn none() -> Self {
        Self::default()
    }
}

impl From<EditAction> for Resolution {
    fn from(action: EditAction) -> Self {
        Self {
            auto_commit: None,
            action,
        }
    }
}

/// Everything a rule may look at
pub struct KeyProbe<'a> {
    pub event: &'a KeyEvent,
    pub context: &'a Context,
    pub env: ResolveEnv<'a>,
    /// Cursor is inside an editable text region
    pub in_text: bool,
    triggers: &'a Triggers,
    toolbox: &'a ToolboxRouter,
}

impl KeyProbe<'_> {
    fn holds(&self, predicate: Predicate) -> bool {
        self.env.validator.check(predicate, self.context)
    }

    fn ctrl(&self) -> bool {
        keys::has_ctrl(self.event)
    }

    fn shift(&self) -> bool {
        keys::has_shift(self.event)
    }

    fn typed(&self) -> Option<char> {
        keys::typed_char(self.event)
    }

    fn typed_matches(&self, trigger: &Trigger) -> bool {
        self.typed().is_some_and(|c| trigger.matches(c))
    }

    fn opens(&self, predicate: Predicate, autocomplete_type: AutocompleteType) -> bool {
        self.typed_matches(self.triggers.for_type(autocomplete_type)) && self.holds(predicate)
    }

    fn draft_node(&self) -> Option<NodeId> {
        self.env.provider.containing_draft_node(self.context)
    }

    /// Insertions currently offered to a new autocomplete session
    fn valid_matches(&self) -> Vec<InsertionRecord> {
        self.env
            .filter
            .processed_insertions(self.context)
            .into_iter()
            .filter(InsertionRecord::is_insertable)
            .collect()
    }

    /// Insertion committed by an autocomplete token reading exactly `text`
    fn commit_for(&self, text: &str) -> Option<EditAction> {
        let record = self
            .env
            .filter
            .processed_construct_insertions(self.context)
            .into_iter()
            .find(|r| r.match_text == text && r.is_insertable())?;
        let action = self
            .toolbox
            .route(&record.request, self.context, self.env.validator)
            .from_source(ActionSource::Autocomplete);
        (!action.is_none()).then_some(action)
    }

    /// Autocomplete text after typing the current character
    fn extended_autocomplete_text(&self) -> Option<String> {
        let token = self.context.autocomplete.as_ref()?;
        let c = self.typed()?;
        let mut text = token.text.clone();
        text.push(c);
        Some(text)
    }

    fn left_editable(&self) -> bool {
        self.context
            .token_to_left
            .as_ref()
            .map_or(true, |t| !t.is_non_editable())
    }

    fn right_editable_and_filled(&self) -> bool {
        self.context
            .token_to_right
            .as_ref()
            .map_or(true, |t| !t.is_non_editable() && !t.is_empty())
    }
}

type Guard = fn(&KeyProbe<'_>) -> bool;
type Build = fn(&KeyProbe<'_>) -> EditAction;

/// One rung of a key ladder
pub struct KeyRule {
    pub name: &'static str,
    when: Guard,
    then: Build,
    /// Firing this rule moves the cursor off the current token
    pub blur: bool,
}

fn rule(name: &'static str, when: Guard, then: Build) -> KeyRule {
    KeyRule {
        name,
        when,
        then,
        blur: false,
    }
}

fn blur_rule(name: &'static str, when: Guard, then: Build) -> KeyRule {
    KeyRule {
        blur: true,
        ..rule(name, when, then)
    }
}

fn act(action_type: EditActionType) -> EditAction {
    EditAction::new(action_type)
}

fn list_item(side: Side) -> EditAction {
    EditAction::with_data(EditActionType::DeleteListItem, ActionData::ListItem { side })
}

fn on_node(action_type: EditActionType, node: Option<NodeId>) -> EditAction {
    match node {
        Some(node) => EditAction::with_data(action_type, ActionData::Node { node }),
        None => act(action_type),
    }
}

fn open_autocomplete(p: &KeyProbe<'_>, autocomplete_type: AutocompleteType) -> EditAction {
    EditAction::with_data(
        EditActionType::OpenAutocomplete,
        ActionData::Autocomplete {
            autocomplete_type,
            first_char: p.typed().unwrap_or_default(),
            validator_regex: p.triggers.pattern(autocomplete_type).to_string(),
            valid_matches: p.valid_matches(),
        },
    )
}

fn shortcut(p: &KeyProbe<'_>) -> Option<EditActionType> {
    if !p.ctrl() {
        return None;
    }
    match keys::key_char(p.event).map(|c| c.to_ascii_lowercase()) {
        Some('c') => Some(EditActionType::Copy),
        Some('v') => Some(EditActionType::Paste),
        Some('z') => Some(EditActionType::Undo),
        Some('y') => Some(EditActionType::Redo),
        _ => None,
    }
}

fn up_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "menu_open",
            |p| p.env.menu_open,
            |_| act(EditActionType::SelectMenuSuggestionAbove),
        ),
        blur_rule(
            "closest_token_above",
            |_| true,
            |_| act(EditActionType::SelectClosestTokenAbove),
        ),
    ]
}

fn down_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "menu_open",
            |p| p.env.menu_open,
            |_| act(EditActionType::SelectMenuSuggestionBelow),
        ),
        blur_rule(
            "closest_token_below",
            |_| true,
            |_| act(EditActionType::SelectClosestTokenBelow),
        ),
    ]
}

fn left_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "menu_open",
            |p| !p.in_text && p.env.menu_open,
            |_| act(EditActionType::CloseSubMenu),
        ),
        blur_rule(
            "can_move_to_prev_token_at_text_editable",
            |p| p.in_text && p.holds(Predicate::CanMoveToPrevTokenAtTextEditable),
            |_| act(EditActionType::SelectPrevToken),
        ),
        rule(
            "select_to_start",
            |p| p.in_text && p.shift() && p.ctrl(),
            |_| act(EditActionType::SelectToStart),
        ),
        rule(
            "select_left",
            |p| p.in_text && p.shift(),
            |_| act(EditActionType::SelectLeft),
        ),
        rule(
            "move_cursor_start",
            |p| p.in_text && p.ctrl(),
            |_| act(EditActionType::MoveCursorStart),
        ),
        rule(
            "move_cursor_left",
            |p| p.in_text,
            |_| act(EditActionType::MoveCursorLeft),
        ),
        blur_rule(
            "prev_token",
            |_| true,
            |_| act(EditActionType::SelectPrevToken),
        ),
    ]
}

fn right_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "menu_open",
            |p| !p.in_text && p.env.menu_open,
            |_| act(EditActionType::OpenSubMenu),
        ),
        blur_rule(
            "can_move_to_next_token_at_text_editable",
            |p| p.in_text && p.holds(Predicate::CanMoveToNextTokenAtTextEditable),
            |_| act(EditActionType::SelectNextToken),
        ),
        rule(
            "select_to_end",
            |p| p.in_text && p.shift() && p.ctrl(),
            |_| act(EditActionType::SelectToEnd),
        ),
        rule(
            "select_right",
            |p| p.in_text && p.shift(),
            |_| act(EditActionType::SelectRight),
        ),
        rule(
            "move_cursor_end",
            |p| p.in_text && p.ctrl(),
            |_| act(EditActionType::MoveCursorEnd),
        ),
        rule(
            "move_cursor_right",
            |p| p.in_text,
            |_| act(EditActionType::MoveCursorRight),
        ),
        blur_rule(
            "next_token",
            |_| true,
            |_| act(EditActionType::SelectNextToken),
        ),
    ]
}

fn home_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "select_to_start",
            |p| p.in_text && p.shift(),
            |_| act(EditActionType::SelectToStart),
        ),
        rule(
            "move_cursor_start",
            |p| p.in_text,
            |_| act(EditActionType::MoveCursorStart),
        ),
    ]
}

fn end_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "select_to_end",
            |p| p.in_text && p.shift(),
            |_| act(EditActionType::SelectToEnd),
        ),
        rule(
            "move_cursor_end",
            |p| p.in_text,
            |_| act(EditActionType::MoveCursorEnd),
        ),
    ]
}

fn backspace_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "delete_prev_char",
            |p| p.in_text && p.left_editable() && !p.holds(Predicate::OnBeginningOfLine),
            |p| {
                if p.ctrl() {
                    act(EditActionType::DeleteToStart)
                } else {
                    act(EditActionType::DeletePrevChar)
                }
            },
        ),
        rule(
            "can_delete_prev_f_string_curly_brackets",
            |p| p.holds(Predicate::CanDeletePrevFStringCurlyBrackets),
            |p| on_node(EditActionType::DeleteFStringCurlyBrackets, p.context.expression_to_left),
        ),
        rule(
            "can_delete_prev_string_literal",
            |p| p.holds(Predicate::CanDeletePrevStringLiteral),
            |p| on_node(EditActionType::DeleteStringLiteral, p.context.expression_to_left),
        ),
        rule(
            "can_merge_with_empty_line_above",
            |p| p.holds(Predicate::CanMergeWithEmptyLineAbove),
            |_| act(EditActionType::MergeWithEmptyLine),
        ),
        rule(
            "can_delete_prev_statement",
            |p| p.holds(Predicate::CanDeletePrevStatement),
            |_| act(EditActionType::DeleteStatement),
        ),
        rule(
            "can_delete_prev_multi_line_statement",
            |p| p.holds(Predicate::CanDeletePrevMultiLineStatement),
            |_| act(EditActionType::DeleteMultiLineStatement),
        ),
        rule(
            "can_delete_empty_lines_backward",
            |p| p.holds(Predicate::CanDeleteEmptyLinesBackward),
            |_| {
                EditAction::with_data(
                    EditActionType::DeleteMultiEmptyLines,
                    ActionData::EmptyLines { forward: false },
                )
            },
        ),
        rule(
            "can_delete_prev_line",
            |p| p.holds(Predicate::CanDeletePrevLine),
            |_| act(EditActionType::DeletePrevLine),
        ),
        rule(
            "can_indent_back",
            |p| p.holds(Predicate::CanIndentBack),
            |_| act(EditActionType::IndentBackwards),
        ),
        rule(
            "can_indent_back_if_statement",
            |p| p.holds(Predicate::CanIndentBackIfStatement),
            |_| act(EditActionType::IndentBackwardsIfStmt),
        ),
        rule(
            "can_delete_prev_token",
            |p| p.holds(Predicate::CanDeletePrevToken),
            |_| act(EditActionType::DeletePrevToken),
        ),
        rule(
            "can_backspace_cur_empty_line",
            |p| p.holds(Predicate::CanBackspaceCurEmptyLine),
            |_| {
                EditAction::with_data(
                    EditActionType::DeleteCurLine,
                    ActionData::CurLine {
                        pressed_backspace: true,
                    },
                )
            },
        ),
        rule(
            "can_delete_list_item_to_left",
            |p| p.holds(Predicate::CanDeleteListItemToLeft),
            |_| list_item(Side::Left),
        ),
        rule(
            "can_delete_list_item_to_right",
            |p| p.holds(Predicate::CanDeleteListItemToRight),
            |_| list_item(Side::Right),
        ),
        rule(
            "can_delete_assignment_with_empty_value",
            |p| p.holds(Predicate::CanDeleteAssignmentWithEmptyValue),
            |_| act(EditActionType::DeleteEmptyAssignment),
        ),
        rule(
            "can_delete_empty_modifier",
            |p| p.holds(Predicate::CanDeleteEmptyModifier),
            |_| act(EditActionType::DeleteEmptyModifier),
        ),
    ]
}

fn delete_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "delete_next_char",
            |p| p.in_text && p.right_editable_and_filled(),
            |p| {
                if p.ctrl() {
                    act(EditActionType::DeleteToEnd)
                } else {
                    act(EditActionType::DeleteNextChar)
                }
            },
        ),
        rule(
            "can_delete_next_f_string_curly_brackets",
            |p| p.holds(Predicate::CanDeleteNextFStringCurlyBrackets),
            |p| on_node(EditActionType::DeleteFStringCurlyBrackets, p.context.expression_to_right),
        ),
        rule(
            "can_delete_next_string_literal",
            |p| p.holds(Predicate::CanDeleteNextStringLiteral),
            |p| on_node(EditActionType::DeleteStringLiteral, p.context.expression_to_right),
        ),
        rule(
            "can_merge_with_empty_line_below",
            |p| p.holds(Predicate::CanMergeWithEmptyLineBelow),
            |_| act(EditActionType::MergeWithEmptyLine),
        ),
        rule(
            "can_delete_next_statement",
            |p| p.holds(Predicate::CanDeleteNextStatement),
            |_| act(EditActionType::DeleteStatement),
        ),
        rule(
            "can_delete_next_multi_line_statement",
            |p| p.holds(Predicate::CanDeleteNextMultiLineStatement),
            |_| act(EditActionType::DeleteMultiLineStatement),
        ),
        rule(
            "can_delete_empty_lines_forward",
            |p| p.holds(Predicate::CanDeleteEmptyLinesForward),
            |_| {
                EditAction::with_data(
                    EditActionType::DeleteMultiEmptyLines,
                    ActionData::EmptyLines { forward: true },
                )
            },
        ),
        rule(
            "can_delete_next_line",
            |p| p.holds(Predicate::CanDeleteNextLine),
            |_| act(EditActionType::DeleteNextLine),
        ),
        rule(
            "can_delete_cur_line",
            |p| p.holds(Predicate::CanDeleteCurLine),
            |_| {
                EditAction::with_data(
                    EditActionType::DeleteCurLine,
                    ActionData::CurLine {
                        pressed_backspace: false,
                    },
                )
            },
        ),
        rule(
            "can_delete_next_token",
            |p| p.holds(Predicate::CanDeleteNextToken),
            |_| act(EditActionType::DeleteNextToken),
        ),
        rule(
            "can_delete_list_item_to_left",
            |p| p.holds(Predicate::CanDeleteListItemToLeft),
            |_| list_item(Side::Left),
        ),
        rule(
            "can_delete_list_item_to_right",
            |p| p.holds(Predicate::CanDeleteListItemToRight),
            |_| list_item(Side::Right),
        ),
        rule(
            "can_delete_assignment_with_empty_value",
            |p| p.holds(Predicate::CanDeleteAssignmentWithEmptyValue),
            |_| act(EditActionType::DeleteEmptyAssignment),
        ),
        rule(
            "can_delete_empty_modifier",
            |p| p.holds(Predicate::CanDeleteEmptyModifier),
            |_| act(EditActionType::DeleteEmptyModifier),
        ),
    ]
}

fn tab_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "can_indent_forward",
            |p| p.holds(Predicate::CanIndentForward),
            |_| act(EditActionType::IndentForwards),
        ),
        rule(
            "can_indent_forward_if_statement",
            |p| p.holds(Predicate::CanIndentForwardIfStatement),
            |_| act(EditActionType::IndentForwardsIfStmt),
        ),
    ]
}

fn back_tab_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "can_indent_back",
            |p| p.holds(Predicate::CanIndentBack),
            |_| act(EditActionType::IndentBackwards),
        ),
        rule(
            "can_indent_back_if_statement",
            |p| p.holds(Predicate::CanIndentBackIfStatement),
            |_| act(EditActionType::IndentBackwardsIfStmt),
        ),
    ]
}

fn enter_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "menu_open",
            |p| p.env.menu_open,
            |_| act(EditActionType::SelectMenuSuggestion),
        ),
        rule(
            "can_insert_empty_line",
            |p| p.holds(Predicate::CanInsertEmptyLine),
            |_| act(EditActionType::InsertEmptyLine),
        ),
    ]
}

fn escape_ladder() -> Vec<KeyRule> {
    vec![
        blur_rule(
            "menu_open",
            |p| p.env.menu_open,
            |_| act(EditActionType::CloseValidInsertMenu),
        ),
        rule(
            "containing_draft_node",
            |p| p.draft_node().is_some(),
            |p| on_node(EditActionType::CloseDraftMode, p.draft_node()),
        ),
    ]
}

fn printable_ladder() -> Vec<KeyRule> {
    vec![
        rule(
            "clipboard_shortcut",
            |p| shortcut(p).is_some(),
            |p| shortcut(p).map(act).unwrap_or_default(),
        ),
        // Typing the last character of a construct name commits it
        rule(
            "autocomplete_exact_match",
            |p| {
                p.in_text
                    && p
                        .extended_autocomplete_text()
                        .is_some_and(|text| p.commit_for(&text).is_some())
            },
            |p| {
                p.extended_autocomplete_text()
                    .and_then(|text| p.commit_for(&text))
                    .unwrap_or_default()
            },
        ),
        rule(
            "in_text_operator",
            |p| {
                p.in_text
                    && p.context.autocomplete.is_none()
                    && p.typed_matches(&p.triggers.in_text_operator)
                    && p
                        .context
                        .token_to_left
                        .as_ref()
                        .is_some_and(|t| !t.is_string_literal())
                    && p.holds(Predicate::AtRightOfExpression)
            },
            |p| open_autocomplete(p, AutocompleteType::RightOfExpression),
        ),
        rule(
            "insert_char",
            |p| p.in_text && p.typed().is_some(),
            |_| act(EditActionType::InsertChar),
        ),
        // Remaining chords, and anything in text that is not a typed character
        rule(
            "unhandled_chord",
            |p| p.in_text || p.typed().is_none(),
            |_| EditAction::none(),
        ),
        rule(
            "number_literal",
            |p| {
                p.typed().is_some_and(|c| c.is_ascii_digit())
                    && p.holds(Predicate::AtEmptyExpressionHole)
            },
            |p| {
                EditAction::with_data(
                    EditActionType::InsertLiteral,
                    ActionData::Literal {
                        literal_type: DataType::Number,
                        initial_value: p.typed().map(String::from),
                    },
                )
            },
        ),
        rule(
            "string_literal",
            |p| {
                matches!(p.typed(), Some('"' | '\''))
                    && p.holds(Predicate::AtEmptyExpressionHole)
            },
            |_| {
                EditAction::with_data(
                    EditActionType::InsertLiteral,
                    ActionData::Literal {
                        literal_type: DataType::String,
                        initial_value: None,
                    },
                )
            },
        ),
        rule(
            "expression_hole_autocomplete",
            |p| p.opens(Predicate::AtEmptyExpressionHole, AutocompleteType::AtExpressionHole),
            |p| open_autocomplete(p, AutocompleteType::AtExpressionHole),
        ),
        rule(
            "operator_token",
            |p| {
                p.typed().and_then(Operator::from_key).is_some()
                    && p.holds(Predicate::AtEmptyOperatorHole)
            },
            |p| match p.typed().and_then(Operator::from_key) {
                Some(operator) => EditAction::with_data(
                    EditActionType::InsertOperatorTkn,
                    ActionData::OperatorToken { operator },
                ),
                None => EditAction::none(),
            },
        ),
        rule(
            "operator_hole_autocomplete",
            |p| p.opens(Predicate::AtEmptyOperatorHole, AutocompleteType::AtEmptyOperatorHole),
            |p| open_autocomplete(p, AutocompleteType::AtEmptyOperatorHole),
        ),
        rule(
            "start_of_line_autocomplete",
            |p| p.opens(Predicate::OnBeginningOfLine, AutocompleteType::StartOfLine),
            |p| open_autocomplete(p, AutocompleteType::StartOfLine),
        ),
        rule(
            "right_of_expression_autocomplete",
            |p| p.opens(Predicate::AtRightOfExpression, AutocompleteType::RightOfExpression),
            |p| open_autocomplete(p, AutocompleteType::RightOfExpression),
        ),
        rule(
            "left_of_expression_autocomplete",
            |p| p.opens(Predicate::AtLeftOfExpression, AutocompleteType::LeftOfExpression),
            |p| open_autocomplete(p, AutocompleteType::LeftOfExpression),
        ),
    ]
}

/// Maps key events and toolbox requests to edit actions
pub struct EditActionResolver {
    ladders: HashMap<KeyClass, Vec<KeyRule>>,
    triggers: Triggers,
    toolbox: ToolboxRouter,
    auto_commit_on_blur: bool,
}

impl Default for EditActionResolver {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl EditActionResolver {
    pub fn new(config: &Config) -> Self {
        let mut ladders = HashMap::new();
        ladders.insert(KeyClass::Up, up_ladder());
        ladders.insert(KeyClass::Down, down_ladder());
        ladders.insert(KeyClass::Left, left_ladder());
        ladders.insert(KeyClass::Right, right_ladder());
        ladders.insert(KeyClass::Home, home_ladder());
        ladders.insert(KeyClass::End, end_ladder());
        ladders.insert(KeyClass::Backspace, backspace_ladder());
        ladders.insert(KeyClass::Delete, delete_ladder());
        ladders.insert(KeyClass::Tab, tab_ladder());
        ladders.insert(KeyClass::BackTab, back_tab_ladder());
        ladders.insert(KeyClass::Enter, enter_ladder());
        ladders.insert(KeyClass::Escape, escape_ladder());
        ladders.insert(KeyClass::Printable, printable_ladder());

        Self {
            ladders,
            triggers: Triggers::from_config(&config.resolver.triggers),
            toolbox: ToolboxRouter::new(),
            auto_commit_on_blur: config.resolver.auto_commit_on_blur,
        }
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// Rule names of a ladder, in evaluation order
    pub fn rule_names(&self, class: KeyClass) -> Vec<&'static str> {
        self.ladders
            .get(&class)
            .map(|rules| rules.iter().map(|r| r.name).collect())
            .unwrap_or_default()
    }

    /// Resolve a key event. Never fails: unmatched input yields `EditActionType::None`.
    pub fn resolve_key(&self, event: &KeyEvent, context: &Context, env: ResolveEnv<'_>) -> Resolution {
        tracing::trace!(
            "EditActionResolver.resolve_key: code={:?}, modifiers={:?}, menu_open={}",
            event.code,
            event.modifiers,
            env.menu_open
        );

        let Some(class) = KeyClass::of(event) else {
            tracing::trace!("  -> no ladder for key");
            return Resolution::none();
        };
        let Some(rules) = self.ladders.get(&class) else {
            return Resolution::none();
        };

        let probe = KeyProbe {
            event,
            context,
            env,
            in_text: env.provider.is_text_editable(context),
            triggers: &self.triggers,
            toolbox: &self.toolbox,
        };

        for rule in rules {
            if !(rule.when)(&probe) {
                continue;
            }
            let action = (rule.then)(&probe);
            let auto_commit = if rule.blur {
                self.auto_commit(&probe)
            } else {
                None
            };
            tracing::trace!(
                "  -> {:?} ladder matched {}: {:?} (auto_commit: {:?})",
                class,
                rule.name,
                action.action_type,
                auto_commit.as_ref().map(|a| a.action_type)
            );
            return Resolution {
                auto_commit,
                action,
            };
        }

        tracing::trace!("  -> {:?} ladder exhausted", class);
        Resolution::none()
    }

    fn auto_commit(&self, probe: &KeyProbe<'_>) -> Option<EditAction> {
        if !self.auto_commit_on_blur {
            return None;
        }
        let token = probe.context.autocomplete.as_ref()?;
        probe.commit_for(&token.text)
    }

    /// Resolve a toolbox or button insertion request
    pub fn resolve_toolbox(
        &self,
        request: &InsertionRequest,
        context: &Context,
        validator: &dyn Validator,
    ) -> EditAction {
        self.toolbox.route(request, context, validator)
    }
}
