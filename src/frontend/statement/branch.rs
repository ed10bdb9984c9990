//! `if` / `else` and `switch`

use super::block::BlockStatement;
use super::check_condition;
use crate::frontend::context::{Context, ScopeKind, ScopeOwner};
use crate::frontend::cst::{ElseCst, IfCst, SwitchCst};
use crate::frontend::expression::{is_integer_castable, Expression};
use crate::frontend::node::{Node, NodeKind, NodeRef};
use crate::types::FixedState;
use crate::utils::Result;

pub enum ElseBranch<'a> {
    Block(Node<'a, BlockStatement<'a>>),
    If(Box<Node<'a, IfStatement<'a>>>),
}

pub struct IfStatement<'a> {
    pub condition: Expression<'a>,
    pub block: Node<'a, BlockStatement<'a>>,
    pub else_branch: Option<ElseBranch<'a>>,
}

impl<'a> NodeKind<'a> for IfStatement<'a> {
    type Cst = IfCst;
    type Data = ();

    const NAME: &'static str = "if statement";

    fn build(cst: &'a IfCst) -> Self {
        Self {
            condition: Expression::new(&cst.expression),
            block: Node::new(&cst.block),
            else_branch: cst.else_branch.as_ref().map(|branch| match branch {
                ElseCst::Block(block) => ElseBranch::Block(Node::new(block)),
                ElseCst::If(nested) => ElseBranch::If(Box::new(Node::new(&**nested))),
            }),
        }
    }

    fn on_process(&mut self, _cst: &'a IfCst, this: NodeRef, context: &mut Context) -> Result<()> {
        self.condition.process_mut(context)?;
        check_condition(self.condition.data()?, "if", this, context);

        self.block.process_mut(context)?;
        match &mut self.else_branch {
            Some(ElseBranch::Block(block)) => block.process_mut(context),
            Some(ElseBranch::If(nested)) => nested.process_mut(context),
            None => Ok(()),
        }
    }
}

pub struct SwitchCase<'a> {
    pub values: Vec<Expression<'a>>,
    pub block: Node<'a, BlockStatement<'a>>,
}

/// Folded case values in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwitchData {
    pub case_values: Vec<i64>,
}

pub struct SwitchStatement<'a> {
    pub selector: Expression<'a>,
    pub cases: Vec<SwitchCase<'a>>,
    pub default: Option<Node<'a, BlockStatement<'a>>>,
}

impl<'a> NodeKind<'a> for SwitchStatement<'a> {
    type Cst = SwitchCst;
    type Data = SwitchData;

    const NAME: &'static str = "switch statement";

    fn build(cst: &'a SwitchCst) -> Self {
        Self {
            selector: Expression::new(&cst.expression),
            cases: cst
                .cases
                .iter()
                .map(|case| SwitchCase {
                    values: case.expressions.iter().map(Expression::new).collect(),
                    block: Node::new(&case.block),
                })
                .collect(),
            default: cst.default.as_ref().map(Node::new),
        }
    }

    fn on_process(&mut self, _cst: &'a SwitchCst, this: NodeRef, context: &mut Context) -> Result<SwitchData> {
        self.selector.process_mut(context)?;
        let selector = &self.selector.data()?.resolve_type;
        if !selector.is_invalid() && !is_integer_castable(selector) {
            context.push_incident(format!("Switch selector must be an integer, found {}", selector), Some(this));
        }

        let cases = &mut self.cases;
        let default = &mut self.default;
        context.push_scope(ScopeKind::Switch, ScopeOwner::Node(this), |context| {
            let mut data = SwitchData::default();
            for case in cases.iter_mut() {
                for value in &mut case.values {
                    value.process_mut(context)?;
                    check_case_value(value, &mut data, context)?;
                }
                case.block.process_mut(context)?;
            }
            if let Some(default) = default {
                default.process_mut(context)?;
            }
            Ok(data)
        })
    }
}

fn check_case_value(value: &Expression<'_>, data: &mut SwitchData, context: &mut Context) -> Result<()> {
    let node = Some(value.node_ref());
    let value = value.data()?;
    let ty = &value.resolve_type;
    if ty.is_invalid() {
        return Ok(());
    }

    if !is_integer_castable(ty) {
        context.push_incident(format!("Case value must be an integer, found {}", ty), node);
    } else if value.fixed_state != FixedState::Constant {
        context.push_incident("Case value must be a constant", node);
    } else if let Some(folded) = value.constant_value.as_ref().and_then(|constant| constant.as_integer()) {
        if data.case_values.contains(&folded) {
            context.push_incident(format!("Case value {} is used more than once", folded), node);
        } else {
            data.case_values.push(folded);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::cst::build::{block, break_stmt, comparison, literal, var};
    use crate::frontend::cst::{IfCst, StatementCst, SwitchCaseCst, SwitchCst};
    use crate::frontend::statement::test_support::{analyze_in_function, context, declare};
    use crate::frontend::statement::Statement;
    use crate::types::Type;
    use crate::utils::SourceRange;
    use pretty_assertions::assert_eq;

    fn switch(selector: &str, cases: Vec<Vec<&str>>) -> StatementCst {
        StatementCst::Switch(SwitchCst {
            range: SourceRange::dummy(),
            expression: var(selector),
            cases: cases
                .into_iter()
                .map(|values| SwitchCaseCst {
                    range: SourceRange::dummy(),
                    expressions: values.into_iter().map(literal).collect(),
                    block: block(vec![break_stmt()]),
                })
                .collect(),
            default: Some(block(Vec::new())),
        })
    }

    #[test]
    fn test_if_condition_must_be_boolean() {
        let mut context = context();
        declare(&mut context, "x", Type::I32);
        let good = StatementCst::If(IfCst {
            range: SourceRange::dummy(),
            expression: comparison(var("x"), ">", literal("0")),
            block: block(Vec::new()),
            else_branch: Some(ElseCst::Block(block(Vec::new()))),
        });
        analyze_in_function(&mut context, Type::Void, &good);
        assert!(context.incidents().is_empty());

        let bad = StatementCst::If(IfCst {
            range: SourceRange::dummy(),
            expression: var("x"),
            block: block(Vec::new()),
            else_branch: None,
        });
        analyze_in_function(&mut context, Type::Void, &bad);
        assert_eq!(context.incidents().len(), 1);
    }

    #[test]
    fn test_switch_allows_break() {
        let mut context = context();
        declare(&mut context, "mode", Type::U32);
        let cst = switch("mode", vec![vec!["0u", "1u"], vec!["2u"]]);
        let statement = analyze_in_function(&mut context, Type::Void, &cst);
        assert!(context.incidents().is_empty());

        let Statement::Switch(node) = statement else { panic!("expected switch") };
        assert_eq!(node.data().unwrap().case_values, vec![0, 1, 2]);
    }

    #[test]
    fn test_switch_duplicate_case() {
        let mut context = context();
        declare(&mut context, "mode", Type::I32);
        analyze_in_function(&mut context, Type::Void, &switch("mode", vec![vec!["1"], vec!["1"]]));
        assert_eq!(context.incidents().len(), 1);
    }

    #[test]
    fn test_switch_selector_must_be_integer() {
        let mut context = context();
        declare(&mut context, "ratio", Type::F32);
        analyze_in_function(&mut context, Type::Void, &switch("ratio", vec![vec!["1"]]));
        assert_eq!(context.incidents().len(), 1);
    }

    #[test]
    fn test_case_value_must_be_constant() {
        let mut context = context();
        declare(&mut context, "mode", Type::I32);
        let mut cst = switch("mode", vec![]);
        if let StatementCst::Switch(switch) = &mut cst {
            switch.cases.push(SwitchCaseCst {
                range: SourceRange::dummy(),
                expressions: vec![var("mode")],
                block: block(Vec::new()),
            });
        }
        analyze_in_function(&mut context, Type::Void, &cst);
        assert_eq!(context.incidents().len(), 1);
    }
}
