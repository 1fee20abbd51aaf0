use crate::common::harness::{valid, SessionTestHarness};
use structural_editor::config::{Config, MenuCategory};
use structural_editor::input::actions::{ActionData, ActionSource, EditActionType, Operator};
use structural_editor::input::toolbox::{InsertKind, InsertionRequest};
use structural_editor::model::collaborators::{InsertionRecord, InsertionStatus};
use structural_editor::model::predicates::Predicate;
use structural_editor::model::scripted::Script;

fn operator(text: &str, op: Operator) -> InsertionRecord {
    InsertionRecord {
        construct: text.to_string(),
        match_text: text.to_string(),
        request: InsertionRequest::new(InsertKind::BinaryExpr, text).with_operator(op),
        status: InsertionStatus::Valid,
    }
}

/// Context where control statements, a call and two operators are insertable
fn palette() -> SessionTestHarness {
    let script = Script::with_predicates([Predicate::AtRightOfExpression]).with_insertions(vec![
        valid("while", InsertKind::WhileStmt),
        valid("if", InsertKind::IfStmt),
        valid("print()", InsertKind::PrintFunctionStmt),
        operator("+", Operator::Add),
        operator("==", Operator::Equal),
    ]);
    let mut harness = SessionTestHarness::new(script);
    assert!(harness.session_mut().show_available_inserts());
    harness
}

#[test]
fn test_available_inserts_shows_only_legal_categories() {
    let harness = palette();
    harness.assert_menu_open();
    let root = harness.menu_ids()[0];
    assert_eq!(
        harness.option_texts(root),
        ["Function Calls", "Operators", "Control Statements"]
    );
}

#[test]
fn test_keyboard_walks_into_and_out_of_submenus() {
    let mut harness = palette();

    harness.press("down");
    harness.press("down");
    harness.assert_focused("Operators");

    harness.press("right");
    harness.assert_focused("Comparator");
    harness.press("right");
    harness.assert_focused("==");

    harness.press("left");
    harness.assert_focused("Comparator");
    harness.press("left");
    harness.assert_focused("Operators");

    // Left at the root stays put
    harness.press("left");
    harness.assert_focused("Operators");
    assert!(harness.actions().is_empty());
}

#[test]
fn test_wrap_around_in_root() {
    let mut harness = palette();
    harness.press("up");
    harness.assert_focused("Control Statements");
    harness.press("down");
    harness.assert_focused("Function Calls");
}

#[test]
fn test_enter_on_operator_inserts_binary_expression() {
    let mut harness = palette();
    harness.press("down");
    harness.press("down");
    harness.press("right");
    harness.press("down");
    harness.assert_focused("Arithmetic");
    harness.press("right");
    harness.assert_focused("+");
    harness.press("enter");

    harness.assert_menu_closed();
    let action = harness.last_action().unwrap();
    assert_eq!(action.action_type, EditActionType::InsertBinaryOperator);
    assert_eq!(action.source, ActionSource::Toolbox);
    assert!(matches!(
        action.data,
        Some(ActionData::BinaryOperator {
            operator: Operator::Add,
            ..
        })
    ));
}

/// Enter on a link only opens its child
#[test]
fn test_enter_on_link_keeps_menu_open() {
    let mut harness = palette();
    harness.press("down");
    harness.press("enter");
    harness.assert_menu_open();
    assert!(harness.actions().is_empty());

    let calls = harness.menu_ids()[1];
    assert!(harness.session().menu().menu(calls).unwrap().open);
}

#[test]
fn test_escape_closes_palette() {
    let mut harness = palette();
    harness.press("down");
    harness.press("esc");
    harness.assert_menu_closed();
    assert!(harness.actions().is_empty());
}

#[test]
fn test_leaving_token_closes_palette() {
    let mut harness = palette();
    // In text, Right at the token edge moves on and dismisses the menu
    harness.update_script(|s| {
        s.context.text_editable = true;
        s.predicates.insert(Predicate::CanMoveToNextTokenAtTextEditable);
    });
    harness.press("right");
    harness.assert_menu_closed();
    assert_eq!(harness.action_types(), [EditActionType::SelectNextToken]);
}

#[test]
fn test_hover_previews_and_click_selects() {
    let mut harness = palette();
    let root = harness.menu_ids()[0];
    let control = harness.menu_ids()[harness.menu_ids().len() - 1];

    assert!(harness.session_mut().on_menu_hover(root, 2));
    assert!(harness.session().menu().menu(control).unwrap().open);

    assert!(harness.session_mut().on_menu_click(control, 0));
    harness.assert_menu_closed();
    let action = harness.last_action().unwrap();
    assert_eq!(
        action.data,
        Some(ActionData::Statement {
            construct: "if".to_string()
        })
    );
}

#[test]
fn test_custom_categories_and_single_option_collapse() {
    let mut config = Config::default();
    config.menu.categories = vec![
        MenuCategory::new("Top", &["Loops"]),
        MenuCategory::new("Loops", &["Conditional"]),
        MenuCategory::new("Conditional", &["while", "for"]),
    ];
    let script = Script::default().with_insertions(vec![
        valid("while", InsertKind::WhileStmt),
        valid("for", InsertKind::ForStmt),
    ]);
    let mut harness = SessionTestHarness::with_config(config, script);
    assert!(harness.session_mut().show_available_inserts());

    assert_eq!(harness.menu_ids().len(), 1);
    assert_eq!(harness.option_texts(harness.menu_ids()[0]), ["while", "for"]);
}

#[test]
fn test_nothing_insertable_builds_no_menu() {
    let mut harness = SessionTestHarness::new(Script::default());
    assert!(!harness.session_mut().show_available_inserts());
    harness.assert_menu_closed();
}
