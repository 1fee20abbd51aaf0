use crate::common::harness::SessionTestHarness;
use structural_editor::input::actions::{
    ActionData, ActionSource, EditActionType, Operator, Placement, Side,
};
use structural_editor::input::toolbox::{InsertKind, InsertionRequest};
use structural_editor::model::context::DataType;
use structural_editor::model::predicates::Predicate;
use structural_editor::model::scripted::Script;

fn press(predicates: &[Predicate], request: InsertionRequest) -> SessionTestHarness {
    let mut harness = SessionTestHarness::new(Script::with_predicates(predicates.iter().copied()));
    harness.click_button(&request);
    harness
}

#[test]
fn test_statements_are_blocked_above_else() {
    for kind in [
        InsertKind::WhileStmt,
        InsertKind::IfStmt,
        InsertKind::ForStmt,
        InsertKind::PrintFunctionStmt,
        InsertKind::VarOperationStmt,
        InsertKind::NewVariableStmt,
    ] {
        let harness = press(&[], InsertionRequest::new(kind, "stmt"));
        let action = harness.last_action().unwrap();
        assert_eq!(action.source, ActionSource::Toolbox, "{kind:?}");

        let harness = press(
            &[Predicate::IsAboveElseStatement],
            InsertionRequest::new(kind, "stmt"),
        );
        assert!(harness.actions().is_empty(), "{kind:?}");
    }
}

#[test]
fn test_new_variable_inserts_assignment() {
    let harness = press(&[], InsertionRequest::new(InsertKind::NewVariableStmt, "var = "));
    assert_eq!(
        harness.action_types(),
        [EditActionType::InsertVarAssignStatement]
    );
}

#[test]
fn test_else_prefers_current_indent() {
    let harness = press(
        &[
            Predicate::CanInsertElseStmtAtCurIndent,
            Predicate::CanInsertElseStmtAtPrevIndent,
        ],
        InsertionRequest::new(InsertKind::ElseStmt, "else"),
    );
    assert_eq!(
        harness.last_action().unwrap().data,
        Some(ActionData::ElseStatement {
            has_condition: false,
            outside: true
        })
    );

    let harness = press(
        &[Predicate::CanInsertElifStmtAtPrevIndent],
        InsertionRequest::new(InsertKind::ElifStmt, "elif"),
    );
    assert_eq!(
        harness.last_action().unwrap().data,
        Some(ActionData::ElseStatement {
            has_condition: true,
            outside: false
        })
    );

    let harness = press(&[], InsertionRequest::new(InsertKind::ElifStmt, "elif"));
    assert!(harness.actions().is_empty());
}

#[test]
fn test_binary_operator_placement() {
    let request = InsertionRequest::new(InsertKind::BinaryExpr, "+").with_operator(Operator::Add);
    let cases = [
        (Predicate::AtRightOfExpression, Placement::ToRight),
        (Predicate::AtLeftOfExpression, Placement::ToLeft),
        (Predicate::AtEmptyExpressionHole, Placement::Replace),
    ];
    for (predicate, placement) in cases {
        let harness = press(&[predicate], request.clone());
        assert_eq!(
            harness.last_action().unwrap().data,
            Some(ActionData::BinaryOperator {
                operator: Operator::Add,
                placement
            })
        );
    }

    // Right of an expression wins when several placements are legal
    let harness = press(
        &[Predicate::AtEmptyExpressionHole, Predicate::AtRightOfExpression],
        request,
    );
    assert!(matches!(
        harness.last_action().unwrap().data,
        Some(ActionData::BinaryOperator {
            placement: Placement::ToRight,
            ..
        })
    ));
}

#[test]
fn test_literal_button_carries_value() {
    let harness = press(
        &[],
        InsertionRequest::new(InsertKind::Literal, "True").with_literal(DataType::Boolean, Some("True")),
    );
    assert_eq!(
        harness.last_action().unwrap().data,
        Some(ActionData::Literal {
            literal_type: DataType::Boolean,
            initial_value: Some("True".to_string())
        })
    );
}

#[test]
fn test_list_literal_wraps_or_inserts_empty() {
    let harness = press(
        &[Predicate::AtLeftOfExpression],
        InsertionRequest::new(InsertKind::ListLiteral, "[]"),
    );
    assert_eq!(harness.action_types(), [EditActionType::WrapExpressionWithItem]);

    let harness = press(
        &[Predicate::AtEmptyExpressionHole],
        InsertionRequest::new(InsertKind::ListLiteral, "[]"),
    );
    assert_eq!(harness.action_types(), [EditActionType::InsertEmptyList]);
}

#[test]
fn test_list_item_prefers_right() {
    let harness = press(
        &[Predicate::CanAddListItemToLeft, Predicate::CanAddListItemToRight],
        InsertionRequest::new(InsertKind::ListItem, ","),
    );
    assert_eq!(
        harness.last_action().unwrap().data,
        Some(ActionData::EmptyListItem { side: Side::Right })
    );
}

#[test]
fn test_illegal_request_is_dropped() {
    let mut harness = SessionTestHarness::new(Script::default());
    let request = InsertionRequest::new(InsertKind::LenExpr, "len()");
    assert!(harness.session().resolve_toolbox_action(&request, &Default::default()).is_none());
    assert!(!harness.click_button(&request));
    assert!(harness.actions().is_empty());
}

#[test]
fn test_modifiers_always_insert() {
    let harness = press(&[], InsertionRequest::new(InsertKind::ListAppendMethod, ".append()"));
    assert_eq!(harness.action_types(), [EditActionType::InsertModifier]);

    let harness = press(&[], InsertionRequest::new(InsertKind::AugmentedAssignmentModifier, "+="));
    assert_eq!(harness.action_types(), [EditActionType::InsertAssignmentModifier]);
}
