use crate::decision_engine::DecisionTree;
use crate::tree_loader::{TreeFactoryError, from_json};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

const EMBEDDED_PROTOCOLS: [&str; 7] = [
    include_str!("../resources/protocols/bleeding.json"),
    include_str!("../resources/protocols/bleeding.ar.json"),
    include_str!("../resources/protocols/bleeding.zh.json"),
    include_str!("../resources/protocols/choking.json"),
    include_str!("../resources/protocols/heat_stroke.json"),
    include_str!("../resources/protocols/cpr.json"),
    include_str!("../resources/protocols/lost.json"),
];

/// Emergency protocols by name, shared read-only between sessions.
///
/// Every protocol has one untranslated tree and optionally translations of it, keyed by locale tag.
#[derive(Debug)]
pub struct ProtocolRegistry {
    trees: Vec<Arc<DecisionTree>>,
    by_name: HashMap<String, usize>,
    translations: HashMap<String, HashMap<String, Arc<DecisionTree>>>,
}

impl ProtocolRegistry {
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, RegistryError> {
        let (translated, untranslated): (Vec<_>, Vec<_>) = trees.into_iter().partition(|tree| tree.locale().is_some());

        let mut by_name = HashMap::with_capacity(untranslated.len());
        for (index, tree) in untranslated.iter().enumerate() {
            if by_name.insert(tree.name().to_string(), index).is_some() {
                return Err(RegistryError::DuplicateProtocol(tree.name().to_string()));
            }
        }

        let mut translations: HashMap<String, HashMap<String, Arc<DecisionTree>>> = HashMap::new();
        for tree in translated {
            let protocol = tree.name().to_string();
            let locale = tree.locale().unwrap_or_default().to_string();

            let Some(&index) = by_name.get(&protocol) else {
                return Err(RegistryError::MissingUntranslatedProtocol { protocol, locale });
            };
            if !untranslated[index].has_same_shape(&tree) {
                return Err(RegistryError::MismatchedTranslation { protocol, locale });
            }

            let by_locale = translations.entry(protocol.clone()).or_default();
            if by_locale.insert(locale.clone(), Arc::new(tree)).is_some() {
                return Err(RegistryError::DuplicateTranslation { protocol, locale });
            }
        }

        let trees = untranslated.into_iter().map(Arc::new).collect();
        Ok(Self {
            trees,
            by_name,
            translations,
        })
    }

    /// The bleeding, choking, heat stroke, CPR and lost protocols compiled into the binary, with the
    /// Arabic and Chinese bleeding protocol.
    pub fn embedded() -> Result<Self, RegistryError> {
        Self::new(Self::embedded_trees()?)
    }

    pub fn embedded_trees() -> Result<Vec<DecisionTree>, TreeFactoryError> {
        EMBEDDED_PROTOCOLS.iter().map(|json| from_json(json)).collect()
    }

    /// The untranslated protocol called `name`.
    pub fn by_name(&self, name: &str) -> Option<Arc<DecisionTree>> {
        self.by_name.get(name).map(|&index| &self.trees[index]).cloned()
    }

    /// The protocol called `name` translated into `locale`, or the untranslated one if there is no such translation.
    ///
    /// `locale` is expected to be resolved already, it is only matched exactly.
    pub fn localized(&self, name: &str, locale: &str) -> Option<Arc<DecisionTree>> {
        self.translations
            .get(name)
            .and_then(|by_locale| by_locale.get(locale))
            .cloned()
            .or_else(|| self.by_name(name))
    }

    /// The locales `name` is translated into, sorted.
    pub fn translated_locales(&self, name: &str) -> Vec<&str> {
        let mut locales = self
            .translations
            .get(name)
            .map(|by_locale| by_locale.keys().map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default();
        locales.sort_unstable();
        locales
    }

    /// Protocol names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.iter().map(|tree| tree.name())
    }

    pub fn trees(&self) -> &[Arc<DecisionTree>] {
        &self.trees
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("protocol '{0}' is registered more than once")]
    DuplicateProtocol(String),
    #[error("protocol '{protocol}' is translated into '{locale}' more than once")]
    DuplicateTranslation { protocol: String, locale: String },
    #[error("translation '{locale}' of protocol '{protocol}' has no untranslated protocol")]
    MissingUntranslatedProtocol { protocol: String, locale: String },
    #[error("translation '{locale}' of protocol '{protocol}' does not have the same nodes and edges")]
    MismatchedTranslation { protocol: String, locale: String },
    #[error("invalid embedded protocol: {0}")]
    InvalidProtocol(#[from] TreeFactoryError),
}
