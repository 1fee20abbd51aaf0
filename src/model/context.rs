//! Cursor context snapshot
//!
//! A `Context` describes the tokens around the cursor at the moment a key or
//! button event is resolved. It is produced fresh by the context provider for
//! every resolution and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Stable handle to a node of the syntax tree owned by the tree collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Line/column position in the editor (both 1-based, like the tree module reports them)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Type of a literal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Number,
    String,
    Boolean,
}

/// Coarse classification of a token, enough for the resolver's own checks.
/// Structural questions go through the validator instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Literal(DataType),
    Operator,
    Punctuation,
    /// Placeholder awaiting an expression
    ExpressionHole,
    /// Placeholder awaiting an operator
    OperatorHole,
    /// Token collecting free-form text for autocomplete
    Autocomplete,
    /// Structural token the user cannot type into (brackets, keywords of compound statements)
    NonEditable,
}

/// A token adjacent to (or under) the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: NodeId,
    pub kind: TokenKind,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_true")]
    pub editable: bool,
}

fn default_true() -> bool {
    true
}

impl Token {
    pub fn new(id: u64, kind: TokenKind, text: impl Into<String>) -> Self {
        let editable = !matches!(
            kind,
            TokenKind::NonEditable
                | TokenKind::Keyword
                | TokenKind::Punctuation
                | TokenKind::ExpressionHole
                | TokenKind::OperatorHole
        );
        Self {
            id: NodeId(id),
            kind,
            text: text.into(),
            editable,
        }
    }

    pub fn non_editable(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, TokenKind::NonEditable, text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_non_editable(&self) -> bool {
        !self.editable
    }

    pub fn is_string_literal(&self) -> bool {
        self.kind == TokenKind::Literal(DataType::String)
    }
}

/// Position an autocomplete session was opened at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutocompleteType {
    StartOfLine,
    AtExpressionHole,
    AtEmptyOperatorHole,
    LeftOfExpression,
    RightOfExpression,
}

impl AutocompleteType {
    pub fn name(self) -> &'static str {
        match self {
            AutocompleteType::StartOfLine => "start_of_line",
            AutocompleteType::AtExpressionHole => "expression_hole",
            AutocompleteType::AtEmptyOperatorHole => "operator_hole",
            AutocompleteType::LeftOfExpression => "left_of_expression",
            AutocompleteType::RightOfExpression => "right_of_expression",
        }
    }
}

/// Token accumulating typed text that has not been interpreted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteToken {
    pub id: NodeId,
    pub text: String,
    pub autocomplete_type: AutocompleteType,
}

/// Immutable snapshot of the structure around the cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub position: Position,
    pub token_to_left: Option<Token>,
    pub token_to_right: Option<Token>,
    /// Enclosing expression ending at the cursor (bracket-like deletions)
    pub expression_to_left: Option<NodeId>,
    /// Enclosing expression starting at the cursor
    pub expression_to_right: Option<NodeId>,
    /// Token directly under the cursor, if the cursor selects one
    pub selected: Option<Token>,
    /// In-progress autocomplete token containing the cursor
    pub autocomplete: Option<AutocompleteToken>,
    pub text_editable: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setters, mostly for synthetic contexts in tests
    pub fn with_left(mut self, token: Token) -> Self {
        self.token_to_left = Some(token);
        self
    }

    pub fn with_right(mut self, token: Token) -> Self {
        self.token_to_right = Some(token);
        self
    }

    pub fn with_selected(mut self, token: Token) -> Self {
        self.selected = Some(token);
        self
    }

    pub fn with_expressions(mut self, left: Option<u64>, right: Option<u64>) -> Self {
        self.expression_to_left = left.map(NodeId);
        self.expression_to_right = right.map(NodeId);
        self
    }

    pub fn with_autocomplete(
        mut self,
        id: u64,
        text: impl Into<String>,
        autocomplete_type: AutocompleteType,
    ) -> Self {
        self.autocomplete = Some(AutocompleteToken {
            id: NodeId(id),
            text: text.into(),
            autocomplete_type,
        });
        self.text_editable = true;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.text_editable = editable;
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Position::new(line, column);
        self
    }

    /// Whether the cursor sits inside an autocomplete token
    pub fn in_autocomplete(&self) -> bool {
        self.autocomplete.is_some()
    }
}
