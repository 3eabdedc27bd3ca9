use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// An immutable yes/no question graph, validated when it is constructed.
#[derive(Debug)]
pub struct DecisionTree {
    name: String,
    title: String,
    entry: String,
    nodes_by_id: HashMap<String, DecisionNode>,
    locale: Option<String>,
}

impl DecisionTree {
    pub fn new(name: String, title: String, entry: String, nodes: Vec<DecisionNode>) -> Result<Self, TreeError> {
        let mut nodes_by_id = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if nodes_by_id.contains_key(node.id()) {
                return Err(TreeError::DuplicateNode(node.id.clone()));
            }
            nodes_by_id.insert(node.id.clone(), node);
        }

        if !nodes_by_id.contains_key(&entry) {
            return Err(TreeError::MissingEntryNode(entry));
        }

        if !nodes_by_id.values().any(|node| matches!(node.kind(), DecisionNodeKind::End)) {
            return Err(TreeError::MissingEndNode);
        }

        for node in nodes_by_id.values() {
            for target in node.targets() {
                if !nodes_by_id.contains_key(target) {
                    return Err(TreeError::MissingNode {
                        node_id: node.id.clone(),
                        target: target.to_owned(),
                    });
                }
            }
        }

        let reachable = visit_acyclic(&entry, &nodes_by_id)?;
        if reachable.len() != nodes_by_id.len() {
            let mut unreachable = nodes_by_id.keys().filter(|id| !reachable.contains(id.as_str())).cloned().collect::<Vec<_>>();
            unreachable.sort();
            return Err(TreeError::UnreachableNodes(unreachable));
        }

        Ok(DecisionTree {
            name,
            title,
            entry,
            nodes_by_id,
            locale: None,
        })
    }

    /// Marks the tree as the translation of the protocol with the same name into `locale`.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into().to_lowercase());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entry(&self) -> &DecisionNode {
        &self.nodes_by_id[&self.entry]
    }

    pub fn node_by_id(&self, id: &str) -> Option<&DecisionNode> {
        self.nodes_by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes_by_id.len()
    }

    /// The language of the prompts, `None` for the untranslated protocol.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Returns true if both trees have the same nodes and edges, whatever their prompts say.
    pub fn has_same_shape(&self, other: &DecisionTree) -> bool {
        self.entry == other.entry
            && self.nodes_by_id.len() == other.nodes_by_id.len()
            && self
                .nodes_by_id
                .values()
                .all(|node| other.node_by_id(node.id()).is_some_and(|other_node| other_node.kind == node.kind))
    }
}

/// Walks the graph depth first from `entry`, failing on the first node that is reachable from itself.
fn visit_acyclic<'a>(entry: &'a str, nodes_by_id: &'a HashMap<String, DecisionNode>) -> Result<HashSet<&'a str>, TreeError> {
    let mut finished: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    // (node, whether its children have been pushed)
    let mut stack: Vec<(&str, bool)> = vec![(entry, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            on_path.remove(id);
            finished.insert(id);
            continue;
        }
        if finished.contains(id) {
            continue;
        }

        on_path.insert(id);
        stack.push((id, true));
        for target in nodes_by_id[id].targets() {
            if on_path.contains(target) {
                return Err(TreeError::Cycle(target.to_owned()));
            }
            if !finished.contains(target) {
                stack.push((target, false));
            }
        }
    }

    Ok(finished)
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionNode {
    id: String,
    prompt: String,
    kind: DecisionNodeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecisionNodeKind {
    /// A yes/no question.
    Question { yes: String, no: String },
    /// An instruction to carry out before continuing.
    Action { next: String },
    /// The final instruction of the protocol.
    End,
}

impl DecisionNode {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, kind: DecisionNodeKind) -> Self {
        DecisionNode {
            id: id.into(),
            prompt: prompt.into(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> &DecisionNodeKind {
        &self.kind
    }

    /// The node followed on a `yes` answer. For an action node this is its only edge.
    pub fn yes_target(&self) -> Option<&str> {
        match &self.kind {
            DecisionNodeKind::Question { yes, .. } => Some(yes),
            DecisionNodeKind::Action { next } => Some(next),
            DecisionNodeKind::End => None,
        }
    }

    pub fn no_target(&self) -> Option<&str> {
        match &self.kind {
            DecisionNodeKind::Question { no, .. } => Some(no),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, DecisionNodeKind::End)
    }

    fn targets(&self) -> impl Iterator<Item = &str> {
        self.yes_target().into_iter().chain(self.no_target())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("duplicate node '{0}'")]
    DuplicateNode(String),
    #[error("entry node '{0}' does not exist")]
    MissingEntryNode(String),
    #[error("missing end node")]
    MissingEndNode,
    #[error("node '{node_id}' links to missing node '{target}'")]
    MissingNode { node_id: String, target: String },
    #[error("unreachable nodes: {}", .0.join(", "))]
    UnreachableNodes(Vec<String>),
    #[error("node '{0}' can be reached from itself")]
    Cycle(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn question(id: &str, yes: &str, no: &str) -> DecisionNode {
        DecisionNode::new(
            id,
            format!("{}?", id),
            DecisionNodeKind::Question {
                yes: yes.to_string(),
                no: no.to_string(),
            },
        )
    }

    fn action(id: &str, next: &str) -> DecisionNode {
        DecisionNode::new(id, format!("Do {}", id), DecisionNodeKind::Action { next: next.to_string() })
    }

    fn end(id: &str) -> DecisionNode {
        DecisionNode::new(id, format!("Finish with {}", id), DecisionNodeKind::End)
    }

    fn tree(nodes: Vec<DecisionNode>) -> Result<DecisionTree, TreeError> {
        DecisionTree::new("test".to_string(), "Test".to_string(), "start".to_string(), nodes)
    }

    #[test]
    fn creates_a_valid_tree() {
        let tree = tree(vec![question("start", "act", "done"), action("act", "done"), end("done")]).unwrap();

        assert_eq!(tree.name(), "test");
        assert_eq!(tree.entry().id(), "start");
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node_by_id("act").and_then(DecisionNode::yes_target), Some("done"));
    }

    #[test]
    fn exposes_targets_per_kind() {
        let question = question("start", "a", "b");
        let action = action("a", "b");
        let end = end("b");

        assert_eq!((question.yes_target(), question.no_target()), (Some("a"), Some("b")));
        assert_eq!((action.yes_target(), action.no_target()), (Some("b"), None));
        assert_eq!((end.yes_target(), end.no_target()), (None, None));
        assert!(end.is_end());
    }

    #[test]
    fn rejects_duplicate_nodes() {
        let result = tree(vec![question("start", "done", "done"), end("done"), end("done")]);
        assert_eq!(result.unwrap_err(), TreeError::DuplicateNode("done".to_string()));
    }

    #[test]
    fn rejects_a_missing_entry_node() {
        let result = tree(vec![end("done")]);
        assert_eq!(result.unwrap_err(), TreeError::MissingEntryNode("start".to_string()));
    }

    #[test]
    fn rejects_a_tree_without_end_node() {
        let result = tree(vec![action("start", "start")]);
        assert_eq!(result.unwrap_err(), TreeError::MissingEndNode);
    }

    #[test]
    fn rejects_a_dangling_question_target() {
        let result = tree(vec![question("start", "done", "nowhere"), end("done")]);
        assert_eq!(
            result.unwrap_err(),
            TreeError::MissingNode {
                node_id: "start".to_string(),
                target: "nowhere".to_string()
            }
        );
    }

    #[test]
    fn rejects_a_dangling_action_target() {
        let result = tree(vec![question("start", "act", "done"), action("act", "gone"), end("done")]);
        assert!(matches!(result, Err(TreeError::MissingNode { node_id, .. }) if node_id == "act"));
    }

    #[test]
    fn rejects_unreachable_nodes() {
        let result = tree(vec![question("start", "done", "done"), end("done"), end("orphan"), action("lonely", "done")]);
        assert_eq!(
            result.unwrap_err(),
            TreeError::UnreachableNodes(vec!["lonely".to_string(), "orphan".to_string()])
        );
    }

    #[test]
    fn rejects_a_cycle_back_to_the_entry() {
        let result = tree(vec![question("start", "act", "done"), action("act", "start"), end("done")]);
        assert_eq!(result.unwrap_err(), TreeError::Cycle("start".to_string()));
    }

    #[test]
    fn rejects_a_self_loop() {
        let result = tree(vec![question("start", "start", "done"), end("done")]);
        assert_eq!(result.unwrap_err(), TreeError::Cycle("start".to_string()));
    }

    #[test]
    fn compares_the_shape_but_not_the_prompts() {
        let english = tree(vec![question("start", "drink", "rest"), action("drink", "rest"), end("rest")]).unwrap();
        let translated = tree(vec![
            DecisionNode::new(
                "start",
                "Heb je dorst?",
                DecisionNodeKind::Question {
                    yes: "drink".to_string(),
                    no: "rest".to_string(),
                },
            ),
            DecisionNode::new("drink", "Drink langzaam.", DecisionNodeKind::Action { next: "rest".to_string() }),
            DecisionNode::new("rest", "Rust in de schaduw.", DecisionNodeKind::End),
        ])
        .unwrap()
        .with_locale("NL");
        let rewired = tree(vec![question("start", "rest", "drink"), action("drink", "rest"), end("rest")]).unwrap();

        assert!(english.has_same_shape(&translated));
        assert!(!english.has_same_shape(&rewired));
        assert_eq!(translated.locale(), Some("nl"));
        assert_eq!(english.locale(), None);
    }

    #[test]
    fn accepts_shared_subtrees() {
        let result = tree(vec![question("start", "a", "b"), action("a", "c"), action("b", "c"), question("c", "done", "done"), end("done")]);
        assert!(result.is_ok());
    }
}
