//! Offline survival guidance: walking directions to the nearest rescue point by the stars, Orion's Belt or the sun,
//! and yes/no emergency protocols.

pub mod app_config;
pub mod celestial;
mod coordinate_deserializer;
pub mod decision_engine;
pub mod domain;
pub mod geo_math;
pub mod protocol_registry;
pub mod rescue_directory;
pub mod survival_assistant;
pub mod tree_loader;

pub use survival_assistant::{ConfigurationError, SafetyGuidance, SurvivalAssistant, SurvivalError};
