//! Tree utilities built on the visitor.

use super::dml::SelectLockType;
use super::expression::ExprNode;
use super::node::Node;
use super::statement::StmtNode;
use super::visitor::{Accept, Flow, Signal, Visitor};

/// Returns true if executing `stmt` cannot change data or session state.
///
/// Selects and unions are read-only unless they lock rows with
/// `FOR UPDATE` or assign a user variable (`@a := 1`). `EXPLAIN` without
/// `ANALYZE` and `DO` are read-only. Every other statement is not.
///
/// The check runs as a [`Visitor`], and visitors only walk trees through
/// a mutable borrow. The tree is left unchanged.
#[must_use]
pub fn is_read_only(stmt: &mut StmtNode) -> bool {
    match stmt {
        StmtNode::Select(select) if select.lock_tp == SelectLockType::ForUpdate => return false,
        StmtNode::Select(_) | StmtNode::Union(_) => {}
        StmtNode::Explain(explain) => return !explain.analyze,
        StmtNode::Do(_) => return true,
        _ => return false,
    }
    let mut checker = ReadOnlyChecker { read_only: true };
    let _ = stmt.accept(&mut checker);
    checker.read_only
}

struct ReadOnlyChecker {
    read_only: bool,
}

impl Visitor for ReadOnlyChecker {
    fn enter(&mut self, node: Node<'_>) -> Signal {
        if let Node::Expr(ExprNode::Variable(var)) = node {
            if var.value.is_some() && !var.is_system {
                self.read_only = false;
            }
            return Signal::SkipChildren;
        }
        Signal::Continue
    }

    fn leave(&mut self, _: Node<'_>) -> Flow {
        if self.read_only {
            Flow::Continue(())
        } else {
            Flow::Break(())
        }
    }
}

/// Visitor that clears the cached source text of every node.
///
/// Trees compared structurally, such as a parse result and the parse of
/// its restored SQL, must be cleaned first.
#[derive(Debug, Default)]
pub struct TextCleaner;

impl Visitor for TextCleaner {
    fn enter(&mut self, mut node: Node<'_>) -> Signal {
        node.set_text(None);
        Signal::Continue
    }
}

/// Clears the cached source text of every node under `stmt`.
pub fn clean_text(stmt: &mut StmtNode) {
    let _ = stmt.accept(&mut TextCleaner);
}
