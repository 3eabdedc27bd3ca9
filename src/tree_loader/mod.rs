mod factory;
mod loader;
pub(in crate::tree_loader) mod serialized_tree;

pub use factory::{TreeFactoryError, from_json};
pub use loader::{LoaderError, load_trees_from};
