//! Edit action vocabulary
//!
//! `EditAction` is the wire format between the resolver and the executer: a
//! discriminant from the closed `EditActionType` enumeration, an optional
//! intent-specific payload, and a provenance tag. Exactly one action is produced
//! per resolution; `EditActionType::None` is a valid outcome meaning "ignore".

use crate::model::collaborators::InsertionRecord;
use crate::model::context::{AutocompleteType, DataType, NodeId};
use serde::{Deserialize, Serialize};

/// Closed set of edit intents understood by the executer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditActionType {
    // Navigation
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorStart,
    MoveCursorEnd,
    SelectClosestTokenAbove,
    SelectClosestTokenBelow,

    // Selection
    SelectLeft,
    SelectRight,
    SelectToStart,
    SelectToEnd,
    SelectPrevToken,
    SelectNextToken,

    // Deletion
    DeletePrevChar,
    DeleteNextChar,
    DeleteToStart,
    DeleteToEnd,
    DeletePrevToken,
    DeleteNextToken,
    DeleteStatement,
    DeleteMultiLineStatement,
    DeleteCurLine,
    DeletePrevLine,
    DeleteNextLine,
    DeleteListItem,
    DeleteStringLiteral,
    DeleteFStringCurlyBrackets,
    DeleteMultiEmptyLines,
    MergeWithEmptyLine,
    DeleteEmptyAssignment,
    DeleteEmptyModifier,

    // Indentation
    IndentForwards,
    IndentBackwards,
    IndentForwardsIfStmt,
    IndentBackwardsIfStmt,

    // Insertion
    InsertChar,
    InsertEmptyLine,
    InsertLiteral,
    InsertStatement,
    InsertExpression,
    InsertModifier,
    InsertAssignmentModifier,
    InsertEmptyList,
    InsertEmptyListItem,
    InsertBinaryOperator,
    InsertUnaryOperator,
    InsertVarAssignStatement,
    InsertElseStatement,
    InsertOperatorTkn,
    WrapExpressionWithItem,

    // Clipboard and history
    Copy,
    Paste,
    Undo,
    Redo,

    // Menus and modes
    OpenAutocomplete,
    CloseValidInsertMenu,
    SelectMenuSuggestion,
    SelectMenuSuggestionAbove,
    SelectMenuSuggestionBelow,
    OpenSubMenu,
    CloseSubMenu,
    CloseDraftMode,

    None,
}

impl EditActionType {
    /// Actions that only move menu focus or open/close menus
    pub fn is_menu_directed(self) -> bool {
        matches!(
            self,
            EditActionType::CloseValidInsertMenu
                | EditActionType::SelectMenuSuggestion
                | EditActionType::SelectMenuSuggestionAbove
                | EditActionType::SelectMenuSuggestionBelow
                | EditActionType::OpenSubMenu
                | EditActionType::CloseSubMenu
        )
    }

    /// Actions that move the cursor off the current token
    pub fn leaves_token(self) -> bool {
        matches!(
            self,
            EditActionType::SelectPrevToken
                | EditActionType::SelectNextToken
                | EditActionType::SelectClosestTokenAbove
                | EditActionType::SelectClosestTokenBelow
        )
    }
}

/// Where an action originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionSource {
    #[default]
    Keyboard,
    Toolbox,
    Autocomplete,
}

/// Side of the cursor an item is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// How an operator is placed relative to the expression at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Operator goes to the right of the expression left of the cursor
    ToRight,
    /// Operator goes to the left of the expression right of the cursor
    ToLeft,
    /// Operator replaces an empty hole
    Replace,
    /// Operator wraps the expression right of the cursor
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    And,
    Or,
    Not,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanEqual => ">=",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
        }
    }

    /// Binary operator typed with a single key
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Modulo),
            '=' => Some(Operator::Equal),
            '<' => Some(Operator::LessThan),
            '>' => Some(Operator::GreaterThan),
            _ => None,
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Operator::Not | Operator::Subtract)
    }
}

/// Intent-specific parameters carried by an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionData {
    ListItem {
        side: Side,
    },
    CurLine {
        pressed_backspace: bool,
    },
    EmptyLines {
        forward: bool,
    },
    Literal {
        literal_type: DataType,
        initial_value: Option<String>,
    },
    Statement {
        construct: String,
    },
    Expression {
        construct: String,
    },
    Modifier {
        construct: String,
    },
    BinaryOperator {
        operator: Operator,
        placement: Placement,
    },
    UnaryOperator {
        operator: Operator,
        placement: Placement,
    },
    OperatorToken {
        operator: Operator,
    },
    ElseStatement {
        has_condition: bool,
        /// Insert at the current indentation rather than the previous one
        outside: bool,
    },
    EmptyListItem {
        side: Side,
    },
    Autocomplete {
        autocomplete_type: AutocompleteType,
        first_char: char,
        validator_regex: String,
        valid_matches: Vec<InsertionRecord>,
    },
    Node {
        node: NodeId,
    },
}

/// A resolved edit intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditAction {
    #[serde(rename = "type")]
    pub action_type: EditActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ActionData>,
    #[serde(default)]
    pub source: ActionSource,
}

impl EditAction {
    pub fn new(action_type: EditActionType) -> Self {
        Self {
            action_type,
            data: None,
            source: ActionSource::Keyboard,
        }
    }

    pub fn with_data(action_type: EditActionType, data: ActionData) -> Self {
        Self {
            action_type,
            data: Some(data),
            source: ActionSource::Keyboard,
        }
    }

    pub fn none() -> Self {
        Self::new(EditActionType::None)
    }

    /// Tag the action with its provenance
    pub fn from_source(mut self, source: ActionSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_none(&self) -> bool {
        self.action_type == EditActionType::None
    }
}

impl Default for EditAction {
    fn default() -> Self {
        Self::none()
    }
}

impl From<EditActionType> for EditAction {
    fn from(action_type: EditActionType) -> Self {
        Self::new(action_type)
    }
}
