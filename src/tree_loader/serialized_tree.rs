use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
pub struct SerializedTree {
    pub(crate) name: String,
    pub(crate) title: Option<String>,
    pub(crate) locale: Option<String>,
    #[serde(default = "default_entry")]
    pub(crate) entry: String,
    pub(crate) nodes: Vec<SerializedNode>,
}

fn default_entry() -> String {
    "start".to_string()
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SerializedNode {
    Question(SerializedQuestionNode),
    Action(SerializedActionNode),
    End(SerializedEndNode),
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SerializedQuestionNode {
    pub(crate) id: String,
    pub(crate) prompt: String,
    pub(crate) yes: String,
    pub(crate) no: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SerializedActionNode {
    pub(crate) id: String,
    pub(crate) prompt: String,
    pub(crate) next: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SerializedEndNode {
    pub(crate) id: String,
    pub(crate) prompt: String,
}
