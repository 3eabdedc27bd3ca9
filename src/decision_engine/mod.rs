mod session;
mod tree;

pub use session::{SessionError, TraversalSession};
pub use tree::{DecisionNode, DecisionNodeKind, DecisionTree, TreeError};
