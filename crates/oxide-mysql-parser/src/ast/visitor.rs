//! Depth-first tree traversal.
//!
//! A [`Visitor`] sees every node twice: [`Visitor::enter`] before its
//! children and [`Visitor::leave`] after them. `enter` can skip a node's
//! children or abort the whole walk; `leave` can abort. Aborting unwinds
//! immediately, so no further callback runs.
//!
//! Nodes are handed out as mutable [`Node`] views. Replacing a node means
//! assigning through the reference, e.g. `*expr = ExprNode::paren(...)`.

use std::ops::ControlFlow;

use super::node::Node;

/// Result of a traversal step. `Break` aborts the walk.
pub type Flow = ControlFlow<()>;

/// What to do after [`Visitor::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    /// Visit the children.
    #[default]
    Continue,
    /// Go straight to [`Visitor::leave`] for this node.
    SkipChildren,
    /// Stop the walk without calling `leave`.
    Abort,
}

/// Callbacks for a depth-first traversal.
pub trait Visitor {
    /// Called before the node's children are visited.
    fn enter(&mut self, node: Node<'_>) -> Signal {
        let _ = node;
        Signal::Continue
    }

    /// Called after the node's children are visited.
    fn leave(&mut self, node: Node<'_>) -> Flow {
        let _ = node;
        Flow::Continue(())
    }
}

/// A node that can be walked by a [`Visitor`].
pub trait Accept {
    /// Returns the view handed to the visitor for this node.
    fn as_node(&mut self) -> Node<'_>;

    /// Walks the children in source order.
    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow;

    /// Walks this node and its subtree.
    fn accept(&mut self, v: &mut dyn Visitor) -> Flow {
        match v.enter(self.as_node()) {
            Signal::Abort => return Flow::Break(()),
            Signal::SkipChildren => return v.leave(self.as_node()),
            Signal::Continue => {}
        }
        self.accept_children(v)?;
        v.leave(self.as_node())
    }
}

impl<T: Accept + ?Sized> Accept for Box<T> {
    fn as_node(&mut self) -> Node<'_> {
        (**self).as_node()
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        (**self).accept_children(v)
    }
}

/// Walks every node of `nodes` in order.
pub fn accept_each<T: Accept>(nodes: &mut [T], v: &mut dyn Visitor) -> Flow {
    for node in nodes {
        node.accept(v)?;
    }
    Flow::Continue(())
}

/// Walks `node` if present.
pub(crate) fn accept_opt<T: Accept>(node: &mut Option<T>, v: &mut dyn Visitor) -> Flow {
    match node {
        Some(node) => node.accept(v),
        None => Flow::Continue(()),
    }
}
