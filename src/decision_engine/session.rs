use crate::decision_engine::tree::{DecisionNode, DecisionNodeKind, DecisionTree};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// A cursor into a decision tree, owned by a single interaction.
///
/// Dropping the session abandons the protocol, starting a new one always begins at the entry node.
#[derive(Debug)]
pub struct TraversalSession {
    tree: Arc<DecisionTree>,
    current_node_id: String,
    answers: usize,
}

impl TraversalSession {
    pub fn start(tree: Arc<DecisionTree>) -> Self {
        let current_node_id = tree.entry().id().to_owned();
        TraversalSession {
            tree,
            current_node_id,
            answers: 0,
        }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn current_node(&self) -> &DecisionNode {
        self.node(&self.current_node_id)
    }

    pub fn current_prompt(&self) -> &str {
        self.current_node().prompt()
    }

    pub fn is_finished(&self) -> bool {
        self.current_node().is_end()
    }

    /// The number of answers given so far.
    pub fn answers(&self) -> usize {
        self.answers
    }

    /// Moves to the next node and returns it.
    ///
    /// Questions follow the edge matching `yes`, actions follow their only edge whatever the answer.
    /// Answering an end node fails and leaves the session where it is.
    #[instrument(skip(self), fields(tree = self.tree.name(), node = %self.current_node_id))]
    pub fn answer(&mut self, yes: bool) -> Result<&DecisionNode, SessionError> {
        let next_id = match self.current_node().kind() {
            DecisionNodeKind::Question { yes: yes_target, no: no_target } => {
                if yes {
                    yes_target
                } else {
                    no_target
                }
            }
            DecisionNodeKind::Action { next } => next,
            DecisionNodeKind::End => {
                return Err(SessionError::InvalidTransition {
                    tree: self.tree.name().to_owned(),
                    node_id: self.current_node_id.clone(),
                });
            }
        }
        .clone();

        debug!("Next node: {}", next_id);
        self.current_node_id = next_id;
        self.answers += 1;
        Ok(self.current_node())
    }

    fn node(&self, id: &str) -> &DecisionNode {
        // Trees validate every edge on construction
        self.tree.node_by_id(id).unwrap_or_else(|| unreachable!("node '{}' missing from validated tree '{}'", id, self.tree.name()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("node '{node_id}' of '{tree}' is an end node and cannot be answered")]
    InvalidTransition { tree: String, node_id: String },
}
