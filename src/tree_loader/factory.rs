use crate::decision_engine::{DecisionNode, DecisionNodeKind, DecisionTree, TreeError};
use crate::tree_loader::serialized_tree::{SerializedNode, SerializedTree};
use thiserror::Error;

pub fn from_json(json: &str) -> Result<DecisionTree, TreeFactoryError> {
    let tree = serde_json::from_str::<SerializedTree>(json)?;
    let name = tree.name;
    let nodes = tree.nodes.into_iter().map(to_decision_node).collect();

    let decision_tree = DecisionTree::new(name.clone(), tree.title.unwrap_or_else(|| name.clone()), tree.entry, nodes)
        .map_err(|source| TreeFactoryError::InvalidTree { tree: name, source })?;

    Ok(match tree.locale {
        Some(locale) => decision_tree.with_locale(locale),
        None => decision_tree,
    })
}

// Takes the node by value so its strings move into the decision node
fn to_decision_node(serialized_node: SerializedNode) -> DecisionNode {
    match serialized_node {
        SerializedNode::Question(node) => DecisionNode::new(node.id, node.prompt, DecisionNodeKind::Question { yes: node.yes, no: node.no }),
        SerializedNode::Action(node) => DecisionNode::new(node.id, node.prompt, DecisionNodeKind::Action { next: node.next }),
        SerializedNode::End(node) => DecisionNode::new(node.id, node.prompt, DecisionNodeKind::End),
    }
}

#[derive(Error, Debug)]
pub enum TreeFactoryError {
    #[error("json deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("invalid tree '{tree}': {source}")]
    InvalidTree { tree: String, source: TreeError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn returns_an_error_if_an_unknown_node_type_is_found() {
        let json = include_str!("../../tests/resources/protocols/invalid/unknownNodeType.json");
        let result = from_json(json);
        assert!(matches!(result, Err(TreeFactoryError::Deserialization(_))));
    }

    #[test]
    fn returns_an_error_for_a_dangling_edge() {
        let json = include_str!("../../tests/resources/protocols/invalid/danglingEdge.json");
        let result = from_json(json);
        assert!(matches!(
            result,
            Err(TreeFactoryError::InvalidTree {
                source: TreeError::MissingNode { .. },
                ..
            })
        ));
    }

    #[test]
    fn returns_an_error_for_a_cycle() {
        let json = include_str!("../../tests/resources/protocols/invalid/cycle.json");
        let result = from_json(json);
        assert!(matches!(
            result,
            Err(TreeFactoryError::InvalidTree {
                source: TreeError::Cycle(_),
                ..
            })
        ));
    }

    #[test]
    fn returns_an_error_for_a_missing_entry() {
        let json = r#"{ "name": "empty", "nodes": [] }"#;
        let result = from_json(json);
        assert_eq!(
            result.unwrap_err().to_string(),
            "invalid tree 'empty': entry node 'start' does not exist"
        );
    }

    #[test]
    fn creates_a_tree() {
        let json = include_str!("../../tests/resources/protocols/shortTree.json");
        let tree = from_json(json).unwrap();

        assert_eq!(tree.name(), "short");
        assert_eq!(tree.title(), "Short tree");
        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.entry(),
            &DecisionNode::new(
                "start",
                "Are you thirsty?",
                DecisionNodeKind::Question {
                    yes: "drink".to_string(),
                    no: "rest".to_string()
                }
            )
        );
        assert_eq!(tree.node_by_id("drink").and_then(DecisionNode::yes_target), Some("rest"));
    }

    #[test]
    fn creates_a_translated_tree() {
        let json = include_str!("../../resources/protocols/bleeding.ar.json");
        let tree = from_json(json).unwrap();

        assert_eq!(tree.name(), "bleeding");
        assert_eq!(tree.locale(), Some("ar"));
        assert_eq!(tree.entry().prompt(), "هل ينفذ الدم من خلال الملابس؟");
    }

    #[test]
    fn uses_the_name_as_title_if_there_is_none() {
        let json = r#"{ "name": "bare", "nodes": [{ "type": "end", "id": "start", "prompt": "Done." }] }"#;
        let tree = from_json(json).unwrap();
        assert_eq!(tree.title(), "bare");
    }
}
