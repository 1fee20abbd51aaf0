use crate::common::harness::SessionTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use structural_editor::input::actions::{ActionData, EditActionType, Side};
use structural_editor::model::context::{Context, DataType, NodeId, Token, TokenKind};
use structural_editor::model::predicates::Predicate;
use structural_editor::model::scripted::Script;

fn in_text() -> Context {
    Context::new()
        .with_left(Token::new(1, TokenKind::Identifier, "total"))
        .with_right(Token::new(1, TokenKind::Identifier, "total"))
        .editable(true)
}

/// Down moves menu focus when a menu is open, otherwise jumps to the token below
#[test]
fn test_down_depends_on_menu_state() {
    let mut harness = SessionTestHarness::new(Script::default());
    assert_eq!(
        harness.resolve_type(KeyCode::Down, KeyModifiers::NONE),
        EditActionType::SelectClosestTokenBelow
    );

    harness.session_mut().menu_mut().build_single_level_menu(
        &["print()".to_string()],
        &Default::default(),
        Default::default(),
    );
    assert_eq!(
        harness.resolve_type(KeyCode::Down, KeyModifiers::NONE),
        EditActionType::SelectMenuSuggestionBelow
    );
}

/// Backspace inside text deletes a character, Ctrl+Backspace to the token start
#[test]
fn test_backspace_in_editable_text() {
    let mut harness = SessionTestHarness::new(Script::new(in_text()));
    harness.send_key(KeyCode::Backspace, KeyModifiers::NONE);
    harness.press("ctrl+backspace");
    assert_eq!(
        harness.action_types(),
        [EditActionType::DeletePrevChar, EditActionType::DeleteToStart]
    );
}

#[test]
fn test_delete_in_editable_text() {
    let mut harness = SessionTestHarness::new(Script::new(in_text()));
    harness.press("delete");
    harness.press("ctrl+delete");
    assert_eq!(
        harness.action_types(),
        [EditActionType::DeleteNextChar, EditActionType::DeleteToEnd]
    );
}

/// Typing a digit at an empty expression hole starts a number literal
#[test]
fn test_digit_at_expression_hole_inserts_number() {
    let mut harness =
        SessionTestHarness::new(Script::with_predicates([Predicate::AtEmptyExpressionHole]));
    harness.type_text("5");
    let action = harness.last_action().unwrap();
    assert_eq!(action.action_type, EditActionType::InsertLiteral);
    assert_eq!(
        action.data,
        Some(ActionData::Literal {
            literal_type: DataType::Number,
            initial_value: Some("5".to_string()),
        })
    );
}

#[test]
fn test_quote_at_expression_hole_inserts_string() {
    let mut harness =
        SessionTestHarness::new(Script::with_predicates([Predicate::AtEmptyExpressionHole]));
    harness.type_text("'");
    let action = harness.last_action().unwrap();
    assert_eq!(
        action.data,
        Some(ActionData::Literal {
            literal_type: DataType::String,
            initial_value: None,
        })
    );
}

/// Each adjacent pair of the Backspace ladder resolves to the earlier step
#[test]
fn test_backspace_priority_pairs() {
    let ladder = [
        Predicate::CanDeletePrevFStringCurlyBrackets,
        Predicate::CanDeletePrevStringLiteral,
        Predicate::CanMergeWithEmptyLineAbove,
        Predicate::CanDeletePrevStatement,
        Predicate::CanDeletePrevMultiLineStatement,
        Predicate::CanDeleteEmptyLinesBackward,
        Predicate::CanDeletePrevLine,
        Predicate::CanIndentBack,
        Predicate::CanIndentBackIfStatement,
        Predicate::CanDeletePrevToken,
        Predicate::CanBackspaceCurEmptyLine,
        Predicate::CanDeleteListItemToLeft,
        Predicate::CanDeleteListItemToRight,
        Predicate::CanDeleteAssignmentWithEmptyValue,
        Predicate::CanDeleteEmptyModifier,
    ];

    for pair in ladder.windows(2) {
        let alone = SessionTestHarness::new(Script::with_predicates([pair[0]]))
            .resolve(KeyCode::Backspace, KeyModifiers::NONE)
            .action;
        let both = SessionTestHarness::new(Script::with_predicates([pair[0], pair[1]]))
            .resolve(KeyCode::Backspace, KeyModifiers::NONE)
            .action;
        assert_eq!(alone, both, "{} must pre-empt {}", pair[0], pair[1]);
    }
}

#[test]
fn test_delete_priority_pairs() {
    let ladder = [
        Predicate::CanDeleteNextFStringCurlyBrackets,
        Predicate::CanDeleteNextStringLiteral,
        Predicate::CanMergeWithEmptyLineBelow,
        Predicate::CanDeleteNextStatement,
        Predicate::CanDeleteNextMultiLineStatement,
        Predicate::CanDeleteEmptyLinesForward,
        Predicate::CanDeleteNextLine,
        Predicate::CanDeleteCurLine,
        Predicate::CanDeleteNextToken,
        Predicate::CanDeleteListItemToLeft,
        Predicate::CanDeleteListItemToRight,
        Predicate::CanDeleteAssignmentWithEmptyValue,
        Predicate::CanDeleteEmptyModifier,
    ];

    for pair in ladder.windows(2) {
        let alone = SessionTestHarness::new(Script::with_predicates([pair[0]]))
            .resolve(KeyCode::Delete, KeyModifiers::NONE)
            .action;
        let both = SessionTestHarness::new(Script::with_predicates([pair[0], pair[1]]))
            .resolve(KeyCode::Delete, KeyModifiers::NONE)
            .action;
        assert_eq!(alone, both, "{} must pre-empt {}", pair[0], pair[1]);
    }
}

#[test]
fn test_list_item_tie_breaks_left() {
    let mut harness = SessionTestHarness::new(Script::with_predicates([
        Predicate::CanDeleteListItemToLeft,
        Predicate::CanDeleteListItemToRight,
    ]));
    harness.press("backspace");
    assert_eq!(
        harness.last_action().unwrap().data,
        Some(ActionData::ListItem { side: Side::Left })
    );
}

#[test]
fn test_escape_leaves_draft_mode() {
    let mut harness = SessionTestHarness::new(Script::default().with_draft_node(17));
    harness.press("esc");
    let action = harness.last_action().unwrap();
    assert_eq!(action.action_type, EditActionType::CloseDraftMode);
    assert_eq!(action.data, Some(ActionData::Node { node: NodeId(17) }));
}

#[test]
fn test_tab_indents_if_statement_body() {
    let mut harness =
        SessionTestHarness::new(Script::with_predicates([Predicate::CanIndentForwardIfStatement]));
    harness.press("tab");
    harness.press("shift+tab");
    assert_eq!(harness.action_types(), [EditActionType::IndentForwardsIfStmt]);
}

#[test]
fn test_clipboard_shortcuts_in_text() {
    let mut harness = SessionTestHarness::new(Script::new(in_text()));
    for spec in ["ctrl+c", "ctrl+v", "ctrl+z", "ctrl+y"] {
        harness.press(spec);
    }
    assert_eq!(
        harness.action_types(),
        [
            EditActionType::Copy,
            EditActionType::Paste,
            EditActionType::Undo,
            EditActionType::Redo
        ]
    );
}

/// Context changes between events are picked up by the next key
#[test]
fn test_context_is_read_per_event() {
    let mut harness = SessionTestHarness::new(Script::default());
    harness.press("enter");
    assert!(harness.actions().is_empty());

    harness.update_script(|s| {
        s.predicates.insert(Predicate::CanInsertEmptyLine);
    });
    assert!(harness.press("enter"));
    assert_eq!(harness.action_types(), [EditActionType::InsertEmptyLine]);
}

#[test]
fn test_unmatched_keys_are_ignored() {
    let mut harness = SessionTestHarness::new(Script::default());
    assert!(!harness.press("pagedown"));
    assert!(!harness.press("home"));
    assert!(!harness.press("ctrl+k"));
    assert!(harness.actions().is_empty());
}
