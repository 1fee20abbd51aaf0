//! Toolbox and button insertion routing
//!
//! A toolbox button asks for an insertion *kind* ("insert an if statement").
//! Where that insertion is legal depends on the cursor: at an empty hole, to
//! the left or right of an expression, as a new list item. Each kind maps to an
//! ordered ladder of placement checks; the first check that holds decides the
//! action. Kinds with the same legality share one ladder. If nothing holds the
//! request resolves to `EditActionType::None` and is dropped.

use crate::input::actions::{ActionData, ActionSource, EditAction, EditActionType, Operator, Placement, Side};
use crate::model::collaborators::Validator;
use crate::model::context::{Context, DataType};
use crate::model::predicates::Predicate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of insertion a toolbox button requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertKind {
    NewVariableStmt,
    ElifStmt,
    ElseStmt,
    WhileStmt,
    IfStmt,
    ForStmt,
    ListIndexAssignment,
    PrintFunctionStmt,
    RangeExpr,
    RandintExpr,
    ListIndexAccessor,
    AssignmentModifier,
    AugmentedAssignmentModifier,
    ListAppendMethod,
    StringSplitMethod,
    StringJoinMethod,
    StringReplaceMethod,
    StringFindMethod,
    LenExpr,
    Literal,
    BinaryExpr,
    UnaryExpr,
    ListLiteral,
    CastStrExpr,
    ListItem,
    VarOperationStmt,
    ValOperationExpr,
}

impl InsertKind {
    pub const ALL: [InsertKind; 27] = [
        InsertKind::NewVariableStmt,
        InsertKind::ElifStmt,
        InsertKind::ElseStmt,
        InsertKind::WhileStmt,
        InsertKind::IfStmt,
        InsertKind::ForStmt,
        InsertKind::ListIndexAssignment,
        InsertKind::PrintFunctionStmt,
        InsertKind::RangeExpr,
        InsertKind::RandintExpr,
        InsertKind::ListIndexAccessor,
        InsertKind::AssignmentModifier,
        InsertKind::AugmentedAssignmentModifier,
        InsertKind::ListAppendMethod,
        InsertKind::StringSplitMethod,
        InsertKind::StringJoinMethod,
        InsertKind::StringReplaceMethod,
        InsertKind::StringFindMethod,
        InsertKind::LenExpr,
        InsertKind::Literal,
        InsertKind::BinaryExpr,
        InsertKind::UnaryExpr,
        InsertKind::ListLiteral,
        InsertKind::CastStrExpr,
        InsertKind::ListItem,
        InsertKind::VarOperationStmt,
        InsertKind::ValOperationExpr,
    ];
}

/// Literal type and seed text for literal insertions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralSpec {
    pub literal_type: DataType,
    #[serde(default)]
    pub initial_value: Option<String>,
}

/// A toolbox (or autocomplete) request to insert a construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRequest {
    pub kind: InsertKind,
    /// Key of the construct template the executer instantiates
    pub construct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<LiteralSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl InsertionRequest {
    pub fn new(kind: InsertKind, construct: impl Into<String>) -> Self {
        Self {
            kind,
            construct: construct.into(),
            literal: None,
            operator: None,
        }
    }

    pub fn with_literal(mut self, literal_type: DataType, initial_value: Option<&str>) -> Self {
        self.literal = Some(LiteralSpec {
            literal_type,
            initial_value: initial_value.map(str::to_string),
        });
        self
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }
}

/// Everything a placement check may look at
pub struct ToolboxProbe<'a> {
    pub request: &'a InsertionRequest,
    pub context: &'a Context,
    pub validator: &'a dyn Validator,
}

impl ToolboxProbe<'_> {
    fn holds(&self, predicate: Predicate) -> bool {
        self.validator.check(predicate, self.context)
    }

    fn construct(&self) -> String {
        self.request.construct.clone()
    }
}

type Check = fn(&ToolboxProbe<'_>) -> bool;
type Build = fn(&ToolboxProbe<'_>) -> EditAction;

/// One rung of a placement ladder
pub struct ToolboxRule {
    pub name: &'static str,
    when: Check,
    then: Build,
}

impl ToolboxRule {
    fn new(name: &'static str, when: Check, then: Build) -> Self {
        Self { name, when, then }
    }
}

fn statement(p: &ToolboxProbe<'_>) -> EditAction {
    EditAction::with_data(
        EditActionType::InsertStatement,
        ActionData::Statement {
            construct: p.construct(),
        },
    )
}

fn expression(p: &ToolboxProbe<'_>) -> EditAction {
    EditAction::with_data(
        EditActionType::InsertExpression,
        ActionData::Expression {
            construct: p.construct(),
        },
    )
}

fn wrap_with_item(p: &ToolboxProbe<'_>) -> EditAction {
    EditAction::with_data(
        EditActionType::WrapExpressionWithItem,
        ActionData::Expression {
            construct: p.construct(),
        },
    )
}

fn modifier(p: &ToolboxProbe<'_>) -> EditAction {
    EditAction::with_data(
        EditActionType::InsertModifier,
        ActionData::Modifier {
            construct: p.construct(),
        },
    )
}

fn binary(p: &ToolboxProbe<'_>, placement: Placement) -> EditAction {
    match p.request.operator {
        Some(operator) => EditAction::with_data(
            EditActionType::InsertBinaryOperator,
            ActionData::BinaryOperator { operator, placement },
        ),
        None => EditAction::none(),
    }
}

fn unary(p: &ToolboxProbe<'_>, placement: Placement) -> EditAction {
    match p.request.operator {
        Some(operator) => EditAction::with_data(
            EditActionType::InsertUnaryOperator,
            ActionData::UnaryOperator { operator, placement },
        ),
        None => EditAction::none(),
    }
}

fn else_statement(has_condition: bool, outside: bool) -> EditAction {
    EditAction::with_data(
        EditActionType::InsertElseStatement,
        ActionData::ElseStatement {
            has_condition,
            outside,
        },
    )
}

fn has_operator(p: &ToolboxProbe<'_>) -> bool {
    p.request.operator.is_some()
}

fn not_above_else(p: &ToolboxProbe<'_>) -> bool {
    !p.holds(Predicate::IsAboveElseStatement)
}

fn statement_ladder() -> Vec<ToolboxRule> {
    vec![ToolboxRule::new("not_above_else", not_above_else, statement)]
}

fn modifier_ladder() -> Vec<ToolboxRule> {
    vec![ToolboxRule::new("always", |_| true, modifier)]
}

fn wrap_or_hole_ladder() -> Vec<ToolboxRule> {
    vec![
        ToolboxRule::new(
            "at_left_of_expression",
            |p| p.holds(Predicate::AtLeftOfExpression),
            wrap_with_item,
        ),
        ToolboxRule::new(
            "at_empty_expression_hole",
            |p| p.holds(Predicate::AtEmptyExpressionHole),
            expression,
        ),
    ]
}

/// Routes toolbox insertion requests to concrete edit actions
pub struct ToolboxRouter {
    ladders: HashMap<InsertKind, Vec<ToolboxRule>>,
}

impl Default for ToolboxRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolboxRouter {
    pub fn new() -> Self {
        let mut ladders = HashMap::new();

        ladders.insert(
            InsertKind::NewVariableStmt,
            vec![ToolboxRule::new("not_above_else", not_above_else, |p| {
                EditAction::with_data(
                    EditActionType::InsertVarAssignStatement,
                    ActionData::Statement {
                        construct: p.construct(),
                    },
                )
            })],
        );

        // Prefer the current indentation over the previous one
        ladders.insert(
            InsertKind::ElifStmt,
            vec![
                ToolboxRule::new(
                    "can_insert_elif_stmt_at_cur_indent",
                    |p| p.holds(Predicate::CanInsertElifStmtAtCurIndent),
                    |_| else_statement(true, true),
                ),
                ToolboxRule::new(
                    "can_insert_elif_stmt_at_prev_indent",
                    |p| p.holds(Predicate::CanInsertElifStmtAtPrevIndent),
                    |_| else_statement(true, false),
                ),
            ],
        );
        ladders.insert(
            InsertKind::ElseStmt,
            vec![
                ToolboxRule::new(
                    "can_insert_else_stmt_at_cur_indent",
                    |p| p.holds(Predicate::CanInsertElseStmtAtCurIndent),
                    |_| else_statement(false, true),
                ),
                ToolboxRule::new(
                    "can_insert_else_stmt_at_prev_indent",
                    |p| p.holds(Predicate::CanInsertElseStmtAtPrevIndent),
                    |_| else_statement(false, false),
                ),
            ],
        );

        for kind in [
            InsertKind::WhileStmt,
            InsertKind::IfStmt,
            InsertKind::ForStmt,
            InsertKind::ListIndexAssignment,
            InsertKind::PrintFunctionStmt,
            InsertKind::VarOperationStmt,
        ] {
            ladders.insert(kind, statement_ladder());
        }

        for kind in [InsertKind::RangeExpr, InsertKind::RandintExpr] {
            ladders.insert(
                kind,
                vec![ToolboxRule::new("not_above_else", not_above_else, expression)],
            );
        }

        for kind in [
            InsertKind::ListIndexAccessor,
            InsertKind::ListAppendMethod,
            InsertKind::StringSplitMethod,
            InsertKind::StringJoinMethod,
            InsertKind::StringReplaceMethod,
            InsertKind::StringFindMethod,
        ] {
            ladders.insert(kind, modifier_ladder());
        }

        for kind in [
            InsertKind::AssignmentModifier,
            InsertKind::AugmentedAssignmentModifier,
        ] {
            ladders.insert(
                kind,
                vec![ToolboxRule::new("always", |_| true, |p| {
                    EditAction::with_data(
                        EditActionType::InsertAssignmentModifier,
                        ActionData::Modifier {
                            construct: p.construct(),
                        },
                    )
                })],
            );
        }

        ladders.insert(
            InsertKind::LenExpr,
            vec![
                ToolboxRule::new(
                    "at_empty_expression_hole",
                    |p| p.holds(Predicate::AtEmptyExpressionHole),
                    expression,
                ),
                ToolboxRule::new(
                    "at_left_of_expression",
                    |p| p.holds(Predicate::AtLeftOfExpression),
                    wrap_with_item,
                ),
            ],
        );

        ladders.insert(
            InsertKind::Literal,
            vec![ToolboxRule::new(
                "has_literal",
                |p| p.request.literal.is_some(),
                |p| {
                    let (literal_type, initial_value) = match &p.request.literal {
                        Some(spec) => (spec.literal_type, spec.initial_value.clone()),
                        None => (DataType::Number, None),
                    };
                    EditAction::with_data(
                        EditActionType::InsertLiteral,
                        ActionData::Literal {
                            literal_type,
                            initial_value,
                        },
                    )
                },
            )],
        );

        ladders.insert(
            InsertKind::BinaryExpr,
            vec![
                ToolboxRule::new(
                    "at_right_of_expression",
                    |p| has_operator(p) && p.holds(Predicate::AtRightOfExpression),
                    |p| binary(p, Placement::ToRight),
                ),
                ToolboxRule::new(
                    "at_left_of_expression",
                    |p| has_operator(p) && p.holds(Predicate::AtLeftOfExpression),
                    |p| binary(p, Placement::ToLeft),
                ),
                ToolboxRule::new(
                    "at_empty_expression_hole",
                    |p| has_operator(p) && p.holds(Predicate::AtEmptyExpressionHole),
                    |p| binary(p, Placement::Replace),
                ),
            ],
        );

        ladders.insert(
            InsertKind::UnaryExpr,
            vec![
                ToolboxRule::new(
                    "at_left_of_expression",
                    |p| has_operator(p) && p.holds(Predicate::AtLeftOfExpression),
                    |p| unary(p, Placement::Wrap),
                ),
                ToolboxRule::new(
                    "at_empty_expression_hole",
                    |p| has_operator(p) && p.holds(Predicate::AtEmptyExpressionHole),
                    |p| unary(p, Placement::Replace),
                ),
            ],
        );

        ladders.insert(
            InsertKind::ListLiteral,
            vec![
                ToolboxRule::new(
                    "at_left_of_expression",
                    |p| p.holds(Predicate::AtLeftOfExpression),
                    wrap_with_item,
                ),
                ToolboxRule::new(
                    "at_empty_expression_hole",
                    |p| p.holds(Predicate::AtEmptyExpressionHole),
                    |_| EditAction::new(EditActionType::InsertEmptyList),
                ),
            ],
        );

        ladders.insert(InsertKind::CastStrExpr, wrap_or_hole_ladder());

        ladders.insert(
            InsertKind::ListItem,
            vec![
                ToolboxRule::new(
                    "can_add_list_item_to_right",
                    |p| p.holds(Predicate::CanAddListItemToRight),
                    |_| {
                        EditAction::with_data(
                            EditActionType::InsertEmptyListItem,
                            ActionData::EmptyListItem { side: Side::Right },
                        )
                    },
                ),
                ToolboxRule::new(
                    "can_add_list_item_to_left",
                    |p| p.holds(Predicate::CanAddListItemToLeft),
                    |_| {
                        EditAction::with_data(
                            EditActionType::InsertEmptyListItem,
                            ActionData::EmptyListItem { side: Side::Left },
                        )
                    },
                ),
            ],
        );

        ladders.insert(
            InsertKind::ValOperationExpr,
            vec![ToolboxRule::new("always", |_| true, expression)],
        );

        Self { ladders }
    }

    /// Placement ladder for an insertion kind
    pub fn ladder(&self, kind: InsertKind) -> &[ToolboxRule] {
        self.ladders.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve a request to an action tagged with the toolbox provenance
    pub fn route(
        &self,
        request: &InsertionRequest,
        context: &Context,
        validator: &dyn Validator,
    ) -> EditAction {
        let probe = ToolboxProbe {
            request,
            context,
            validator,
        };

        for rule in self.ladder(request.kind) {
            if (rule.when)(&probe) {
                let action = (rule.then)(&probe).from_source(ActionSource::Toolbox);
                tracing::trace!(
                    "ToolboxRouter.route: {:?} -> {} -> {:?}",
                    request.kind,
                    rule.name,
                    action.action_type
                );
                return action;
            }
        }

        tracing::trace!(
            "ToolboxRouter.route: {:?} has no legal placement, dropping",
            request.kind
        );
        EditAction::none()
    }
}
