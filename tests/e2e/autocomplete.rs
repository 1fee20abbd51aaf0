use crate::common::harness::{record, valid, SessionTestHarness};
use crossterm::event::{KeyCode, KeyModifiers};
use structural_editor::input::actions::{ActionData, ActionSource, EditActionType};
use structural_editor::input::toolbox::InsertKind;
use structural_editor::model::collaborators::InsertionStatus;
use structural_editor::model::context::{AutocompleteType, Context};
use structural_editor::model::predicates::Predicate;
use structural_editor::model::scripted::Script;

fn start_of_line() -> Script {
    Script::with_predicates([Predicate::OnBeginningOfLine]).with_insertions(vec![
        valid("while", InsertKind::WhileStmt),
        valid("print()", InsertKind::PrintFunctionStmt),
        record("else", InsertKind::ElseStmt, InsertionStatus::Invalid),
    ])
}

/// A letter on an empty line opens a start-of-line session seeded with legal inserts
#[test]
fn test_letter_on_empty_line_opens_session() {
    let mut harness = SessionTestHarness::new(start_of_line());
    harness.type_text("w");

    let action = harness.last_action().unwrap();
    assert_eq!(action.action_type, EditActionType::OpenAutocomplete);
    match action.data {
        Some(ActionData::Autocomplete {
            autocomplete_type,
            first_char,
            valid_matches,
            ..
        }) => {
            assert_eq!(autocomplete_type, AutocompleteType::StartOfLine);
            assert_eq!(first_char, 'w');
            let names: Vec<&str> = valid_matches.iter().map(|r| r.construct.as_str()).collect();
            assert_eq!(names, ["while", "print()"]);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    harness.assert_menu_open();
    let root = harness.menu_ids()[0];
    assert_eq!(harness.option_texts(root), ["while", "print()"]);
}

/// Escape with an exact match pending commits it, then closes the menu
#[test]
fn test_escape_commits_pending_match() {
    let mut harness = SessionTestHarness::new(start_of_line());
    harness.type_text("w");
    harness.assert_menu_open();

    // The executer has turned the letter into an autocomplete token reading "while"
    harness.update_script(|s| {
        s.context = Context::new().with_autocomplete(5, "while", AutocompleteType::StartOfLine);
        s.constructs = vec![valid("while", InsertKind::WhileStmt)];
    });
    harness.clear_log();

    let resolution = harness.resolve(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(resolution.action.action_type, EditActionType::CloseValidInsertMenu);
    assert!(resolution.auto_commit.is_some());

    harness.press("esc");
    let actions = harness.actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].action_type, EditActionType::InsertStatement);
    assert_eq!(actions[0].source, ActionSource::Autocomplete);
    harness.assert_menu_closed();
}

/// Without a match Escape only closes the menu
#[test]
fn test_escape_without_match_closes_menu() {
    let mut harness = SessionTestHarness::new(start_of_line());
    harness.type_text("w");
    harness.update_script(|s| {
        s.context = Context::new().with_autocomplete(5, "wh", AutocompleteType::StartOfLine);
        s.constructs = vec![valid("while", InsertKind::WhileStmt)];
    });
    harness.clear_log();

    harness.press("esc");
    assert!(harness.actions().is_empty());
    harness.assert_menu_closed();
}

/// Leaving the token sideways commits the match before navigating
#[test]
fn test_navigation_off_token_commits_first() {
    let script = Script::new(Context::new().with_autocomplete(5, "while", AutocompleteType::StartOfLine))
        .with_constructs(vec![valid("while", InsertKind::WhileStmt)]);
    let mut harness = SessionTestHarness::new(script);

    harness.press("down");
    assert_eq!(
        harness.action_types(),
        [EditActionType::InsertStatement, EditActionType::SelectClosestTokenBelow]
    );
}

#[test]
fn test_invalid_match_is_not_committed() {
    let script = Script::new(Context::new().with_autocomplete(5, "else", AutocompleteType::StartOfLine))
        .with_constructs(vec![record("else", InsertKind::ElseStmt, InsertionStatus::Invalid)]);
    let mut harness = SessionTestHarness::new(script);

    harness.press("up");
    assert_eq!(harness.action_types(), [EditActionType::SelectClosestTokenAbove]);
}

/// Typing the final character of a construct name inserts it
#[test]
fn test_typing_completes_construct() {
    let script = Script::new(Context::new().with_autocomplete(5, "pr", AutocompleteType::StartOfLine))
        .with_constructs(vec![valid("print", InsertKind::PrintFunctionStmt)]);
    let mut harness = SessionTestHarness::new(script);

    harness.type_text("i");
    assert_eq!(harness.action_types(), [EditActionType::InsertChar]);

    harness.update_script(|s| {
        s.context = Context::new().with_autocomplete(5, "prin", AutocompleteType::StartOfLine);
    });
    harness.type_text("t");
    let action = harness.last_action().unwrap();
    assert_eq!(action.action_type, EditActionType::InsertStatement);
    assert_eq!(action.source, ActionSource::Autocomplete);
}

/// Completing a construct by typing ends the session and its menu
#[test]
fn test_typed_completion_closes_menu() {
    let mut harness = SessionTestHarness::new(start_of_line());
    harness.type_text("w");
    harness.assert_menu_open();

    harness.update_script(|s| {
        s.context = Context::new().with_autocomplete(5, "whil", AutocompleteType::StartOfLine);
        s.constructs = vec![valid("while", InsertKind::WhileStmt)];
    });
    harness.clear_log();

    harness.type_text("e");
    assert_eq!(harness.action_types(), [EditActionType::InsertStatement]);
    harness.assert_menu_closed();

    // The stale suggestions cannot insert the construct again
    harness.press("down");
    harness.press("enter");
    let inserts = harness
        .action_types()
        .into_iter()
        .filter(|t| *t == EditActionType::InsertStatement)
        .count();
    assert_eq!(inserts, 1);
}

/// A commit on blur also closes the suggestions
#[test]
fn test_blur_commit_closes_menu() {
    let mut harness = SessionTestHarness::new(start_of_line());
    harness.type_text("w");
    harness.update_script(|s| {
        s.context = Context::new().with_autocomplete(5, "while", AutocompleteType::StartOfLine);
        s.constructs = vec![valid("while", InsertKind::WhileStmt)];
        s.predicates.insert(Predicate::CanMoveToPrevTokenAtTextEditable);
    });
    harness.clear_log();

    harness.press("left");
    assert_eq!(
        harness.action_types(),
        [EditActionType::InsertStatement, EditActionType::SelectPrevToken]
    );
    harness.assert_menu_closed();
}

/// Choosing from the autocomplete menu with the keyboard
#[test]
fn test_menu_selection_inserts_with_autocomplete_source() {
    let mut harness = SessionTestHarness::new(start_of_line());
    harness.type_text("p");
    harness.clear_log();

    harness.press("up");
    harness.assert_focused("print()");
    harness.press("enter");

    harness.assert_menu_closed();
    let action = harness.last_action().unwrap();
    assert_eq!(action.action_type, EditActionType::InsertStatement);
    assert_eq!(
        action.data,
        Some(ActionData::Statement {
            construct: "print()".to_string()
        })
    );
    assert_eq!(action.source, ActionSource::Autocomplete);
}

#[test]
fn test_operator_hole_session() {
    let script = Script::with_predicates([Predicate::AtEmptyOperatorHole]);
    let harness = SessionTestHarness::new(script);
    let action = harness.resolve(KeyCode::Char('a'), KeyModifiers::NONE).action;
    assert!(matches!(
        action.data,
        Some(ActionData::Autocomplete {
            autocomplete_type: AutocompleteType::AtEmptyOperatorHole,
            first_char: 'a',
            ..
        })
    ));
}

/// No valid insertions: the session opens but no menu is shown
#[test]
fn test_empty_session_builds_no_menu() {
    let mut harness =
        SessionTestHarness::new(Script::with_predicates([Predicate::AtLeftOfExpression]));
    harness.type_text("n");
    assert_eq!(harness.action_types(), [EditActionType::OpenAutocomplete]);
    harness.assert_menu_closed();
}
