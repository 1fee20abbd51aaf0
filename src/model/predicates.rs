//! Named structural questions answered by the validator
//!
//! Each predicate is one precise question about the cursor context. The
//! resolver's rule ladders refer to predicates by value so that a ladder can be
//! traced, scripted and tested without a syntax tree.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    // Cursor placement
    OnBeginningOfLine,
    CanMoveToPrevTokenAtTextEditable,
    CanMoveToNextTokenAtTextEditable,

    // Deletion, backward then forward where both exist
    CanDeletePrevFStringCurlyBrackets,
    CanDeleteNextFStringCurlyBrackets,
    CanDeletePrevStringLiteral,
    CanDeleteNextStringLiteral,
    CanMergeWithEmptyLineAbove,
    CanMergeWithEmptyLineBelow,
    CanDeletePrevStatement,
    CanDeleteNextStatement,
    CanDeletePrevMultiLineStatement,
    CanDeleteNextMultiLineStatement,
    CanDeleteEmptyLinesBackward,
    CanDeleteEmptyLinesForward,
    CanDeletePrevLine,
    CanDeleteNextLine,
    CanDeletePrevToken,
    CanDeleteNextToken,
    CanBackspaceCurEmptyLine,
    CanDeleteCurLine,
    CanDeleteListItemToLeft,
    CanDeleteListItemToRight,
    CanDeleteAssignmentWithEmptyValue,
    CanDeleteEmptyModifier,

    // Indentation
    CanIndentBack,
    CanIndentBackIfStatement,
    CanIndentForward,
    CanIndentForwardIfStatement,

    // Insertion positions
    CanInsertEmptyLine,
    AtEmptyExpressionHole,
    AtEmptyOperatorHole,
    AtLeftOfExpression,
    AtRightOfExpression,
    CanAddListItemToLeft,
    CanAddListItemToRight,
    CanInsertElifStmtAtCurIndent,
    CanInsertElifStmtAtPrevIndent,
    CanInsertElseStmtAtCurIndent,
    CanInsertElseStmtAtPrevIndent,
    IsAboveElseStatement,
}

impl Predicate {
    /// Every predicate, in declaration order
    pub const ALL: [Predicate; 41] = [
        Predicate::OnBeginningOfLine,
        Predicate::CanMoveToPrevTokenAtTextEditable,
        Predicate::CanMoveToNextTokenAtTextEditable,
        Predicate::CanDeletePrevFStringCurlyBrackets,
        Predicate::CanDeleteNextFStringCurlyBrackets,
        Predicate::CanDeletePrevStringLiteral,
        Predicate::CanDeleteNextStringLiteral,
        Predicate::CanMergeWithEmptyLineAbove,
        Predicate::CanMergeWithEmptyLineBelow,
        Predicate::CanDeletePrevStatement,
        Predicate::CanDeleteNextStatement,
        Predicate::CanDeletePrevMultiLineStatement,
        Predicate::CanDeleteNextMultiLineStatement,
        Predicate::CanDeleteEmptyLinesBackward,
        Predicate::CanDeleteEmptyLinesForward,
        Predicate::CanDeletePrevLine,
        Predicate::CanDeleteNextLine,
        Predicate::CanDeletePrevToken,
        Predicate::CanDeleteNextToken,
        Predicate::CanBackspaceCurEmptyLine,
        Predicate::CanDeleteCurLine,
        Predicate::CanDeleteListItemToLeft,
        Predicate::CanDeleteListItemToRight,
        Predicate::CanDeleteAssignmentWithEmptyValue,
        Predicate::CanDeleteEmptyModifier,
        Predicate::CanIndentBack,
        Predicate::CanIndentBackIfStatement,
        Predicate::CanIndentForward,
        Predicate::CanIndentForwardIfStatement,
        Predicate::CanInsertEmptyLine,
        Predicate::AtEmptyExpressionHole,
        Predicate::AtEmptyOperatorHole,
        Predicate::AtLeftOfExpression,
        Predicate::AtRightOfExpression,
        Predicate::CanAddListItemToLeft,
        Predicate::CanAddListItemToRight,
        Predicate::CanInsertElifStmtAtCurIndent,
        Predicate::CanInsertElifStmtAtPrevIndent,
        Predicate::CanInsertElseStmtAtCurIndent,
        Predicate::CanInsertElseStmtAtPrevIndent,
        Predicate::IsAboveElseStatement,
    ];

    /// Stable snake_case name, used in traces and scripted contexts
    pub fn name(self) -> &'static str {
        match self {
            Predicate::OnBeginningOfLine => "on_beginning_of_line",
            Predicate::CanMoveToPrevTokenAtTextEditable => "can_move_to_prev_token_at_text_editable",
            Predicate::CanMoveToNextTokenAtTextEditable => "can_move_to_next_token_at_text_editable",
            Predicate::CanDeletePrevFStringCurlyBrackets => "can_delete_prev_f_string_curly_brackets",
            Predicate::CanDeleteNextFStringCurlyBrackets => "can_delete_next_f_string_curly_brackets",
            Predicate::CanDeletePrevStringLiteral => "can_delete_prev_string_literal",
            Predicate::CanDeleteNextStringLiteral => "can_delete_next_string_literal",
            Predicate::CanMergeWithEmptyLineAbove => "can_merge_with_empty_line_above",
            Predicate::CanMergeWithEmptyLineBelow => "can_merge_with_empty_line_below",
            Predicate::CanDeletePrevStatement => "can_delete_prev_statement",
            Predicate::CanDeleteNextStatement => "can_delete_next_statement",
            Predicate::CanDeletePrevMultiLineStatement => "can_delete_prev_multi_line_statement",
            Predicate::CanDeleteNextMultiLineStatement => "can_delete_next_multi_line_statement",
            Predicate::CanDeleteEmptyLinesBackward => "can_delete_empty_lines_backward",
            Predicate::CanDeleteEmptyLinesForward => "can_delete_empty_lines_forward",
            Predicate::CanDeletePrevLine => "can_delete_prev_line",
            Predicate::CanDeleteNextLine => "can_delete_next_line",
            Predicate::CanDeletePrevToken => "can_delete_prev_token",
            Predicate::CanDeleteNextToken => "can_delete_next_token",
            Predicate::CanBackspaceCurEmptyLine => "can_backspace_cur_empty_line",
            Predicate::CanDeleteCurLine => "can_delete_cur_line",
            Predicate::CanDeleteListItemToLeft => "can_delete_list_item_to_left",
            Predicate::CanDeleteListItemToRight => "can_delete_list_item_to_right",
            Predicate::CanDeleteAssignmentWithEmptyValue => "can_delete_assignment_with_empty_value",
            Predicate::CanDeleteEmptyModifier => "can_delete_empty_modifier",
            Predicate::CanIndentBack => "can_indent_back",
            Predicate::CanIndentBackIfStatement => "can_indent_back_if_statement",
            Predicate::CanIndentForward => "can_indent_forward",
            Predicate::CanIndentForwardIfStatement => "can_indent_forward_if_statement",
            Predicate::CanInsertEmptyLine => "can_insert_empty_line",
            Predicate::AtEmptyExpressionHole => "at_empty_expression_hole",
            Predicate::AtEmptyOperatorHole => "at_empty_operator_hole",
            Predicate::AtLeftOfExpression => "at_left_of_expression",
            Predicate::AtRightOfExpression => "at_right_of_expression",
            Predicate::CanAddListItemToLeft => "can_add_list_item_to_left",
            Predicate::CanAddListItemToRight => "can_add_list_item_to_right",
            Predicate::CanInsertElifStmtAtCurIndent => "can_insert_elif_stmt_at_cur_indent",
            Predicate::CanInsertElifStmtAtPrevIndent => "can_insert_elif_stmt_at_prev_indent",
            Predicate::CanInsertElseStmtAtCurIndent => "can_insert_else_stmt_at_cur_indent",
            Predicate::CanInsertElseStmtAtPrevIndent => "can_insert_else_stmt_at_prev_indent",
            Predicate::IsAboveElseStatement => "is_above_else_statement",
        }
    }

    /// Parse a predicate from its snake_case name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name.trim())
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
