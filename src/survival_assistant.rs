use crate::app_config::AppConfig;
use crate::celestial::{CelestialAdvisor, CelestialGuidance, LocaleTable, LocaleTableError};
use crate::decision_engine::TraversalSession;
use crate::domain::Coordinate;
use crate::protocol_registry::{ProtocolRegistry, RegistryError};
use crate::rescue_directory::{DirectoryError, NearestResult, RescueDirectory};
use crate::tree_loader::{LoaderError, TreeFactoryError, load_trees_from};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

const PROTOCOL_EXTENSION: &str = "json";

/// Answers "guide me to safety" and hands out emergency protocol sessions.
#[derive(Debug)]
pub struct SurvivalAssistant {
    directory: RescueDirectory,
    advisor: CelestialAdvisor,
    protocols: ProtocolRegistry,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SafetyGuidance {
    pub nearest: NearestResult,
    pub guidance: CelestialGuidance,
}

impl SurvivalAssistant {
    pub fn new(directory: RescueDirectory, advisor: CelestialAdvisor, protocols: ProtocolRegistry) -> Self {
        SurvivalAssistant {
            directory,
            advisor,
            protocols,
        }
    }

    /// Builds an assistant from the catalogs compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigurationError> {
        Ok(Self::new(
            RescueDirectory::embedded()?,
            CelestialAdvisor::new(LocaleTable::embedded()?),
            ProtocolRegistry::embedded()?,
        ))
    }

    /// Builds an assistant from the embedded catalogs, replacing the rescue catalog and adding protocols
    /// when the configuration points to them.
    #[instrument(skip_all)]
    pub async fn from_config(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let directory = match config.rescue_catalog() {
            Some(path) => {
                let json = fs::read_to_string(path).await.map_err(|source| ConfigurationError::Io {
                    source,
                    path: PathBuf::from(path),
                })?;
                RescueDirectory::from_json(&json)?
            }
            None => RescueDirectory::embedded()?,
        };
        info!("✅  Loaded {} rescue points", directory.len());

        let mut trees = ProtocolRegistry::embedded_trees()?;
        if let Some(protocol_directory) = config.protocol_directory() {
            trees.extend(load_trees_from(protocol_directory, PROTOCOL_EXTENSION).await?);
        }
        let protocols = ProtocolRegistry::new(trees)?;
        info!("✅  Registered {} protocols", protocols.trees().len());

        Ok(Self::new(directory, CelestialAdvisor::new(LocaleTable::embedded()?), protocols))
    }

    pub fn directory(&self) -> &RescueDirectory {
        &self.directory
    }

    pub fn advisor(&self) -> &CelestialAdvisor {
        &self.advisor
    }

    #[instrument(skip(self))]
    pub fn find_guidance_to_nearest_safety(&self, current: Coordinate, locale: &str) -> SafetyGuidance {
        let nearest = self.directory.nearest(current);
        let guidance = self.advisor.guide(current, nearest.point.coordinate(), locale);
        SafetyGuidance { nearest, guidance }
    }

    /// Like [`Self::find_guidance_to_nearest_safety`], guiding by the sun if it is up at `at`.
    #[instrument(skip(self))]
    pub fn find_guidance_to_nearest_safety_at(&self, current: Coordinate, locale: &str, at: DateTime<Utc>) -> SafetyGuidance {
        let nearest = self.directory.nearest(current);
        let guidance = self.advisor.guide_at(current, nearest.point.coordinate(), locale, at);
        SafetyGuidance { nearest, guidance }
    }

    pub fn list_available_protocols(&self) -> BTreeSet<String> {
        self.protocols.names().map(str::to_owned).collect()
    }

    /// Starts the protocol called `name` in the language of `locale`.
    ///
    /// The locale is resolved like it is for celestial guidance. Protocols without a translation for it
    /// are started untranslated.
    #[instrument(skip(self))]
    pub fn begin_protocol(&self, name: &str, locale: &str) -> Result<TraversalSession, SurvivalError> {
        let locale = self.advisor.locales().resolve_locale(locale);
        let tree = self
            .protocols
            .localized(name, locale)
            .ok_or_else(|| SurvivalError::UnknownProtocol(name.to_owned()))?;
        info!("▶️ Starting protocol '{}'", tree.title());
        Ok(TraversalSession::start(tree))
    }
}

/// A catalog could not be loaded or failed validation.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Locales(#[from] LocaleTableError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Tree(#[from] TreeFactoryError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("unable to read '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
}

#[derive(Error, Debug)]
pub enum SurvivalError {
    #[error("unknown protocol '{0}'")]
    UnknownProtocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::decision_engine::{DecisionNodeKind, SessionError};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::env::temp_dir;

    const WESTERN_DESERT: Coordinate = Coordinate::new(25.0, 29.0).unwrap();

    #[fixture]
    fn assistant() -> SurvivalAssistant {
        SurvivalAssistant::embedded().unwrap()
    }

    #[rstest]
    fn guides_to_the_nearest_rescue_point(assistant: SurvivalAssistant) {
        let result = assistant.find_guidance_to_nearest_safety(WESTERN_DESERT, "en");

        assert_eq!(result.nearest.point.name(), "Kharga Oasis");
        assert_eq!(result.guidance.reference_body, "North Star (Polaris)");
        assert_eq!(result.guidance.instruction, "Keep the star 72° to your LEFT.");
        assert_eq!(
            result.guidance,
            assistant.advisor().guide(WESTERN_DESERT, result.nearest.point.coordinate(), "en")
        );
    }

    #[rstest]
    fn guides_by_the_sun_during_the_day(assistant: SurvivalAssistant) {
        let at = Utc.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap();

        let result = assistant.find_guidance_to_nearest_safety_at(WESTERN_DESERT, "en", at);

        assert_eq!(result.nearest.point.name(), "Kharga Oasis");
        assert_eq!(result.guidance.reference_body, "Sun");
        assert_eq!(result.guidance.instruction, "Keep the sun 18° to your RIGHT.");
    }

    #[rstest]
    fn lists_the_available_protocols(assistant: SurvivalAssistant) {
        let protocols = assistant.list_available_protocols();

        assert_eq!(
            protocols.into_iter().collect::<Vec<_>>(),
            vec!["bleeding", "choking", "cpr", "heat_stroke", "lost"]
        );
    }

    #[rstest]
    fn fails_to_begin_an_unknown_protocol(assistant: SurvivalAssistant) {
        let result = assistant.begin_protocol("snake_bite", "en");
        assert!(matches!(result, Err(SurvivalError::UnknownProtocol(name)) if name == "snake_bite"));
    }

    #[rstest]
    fn walks_the_bleeding_protocol_to_a_tourniquet(assistant: SurvivalAssistant) {
        let mut session = assistant.begin_protocol("bleeding", "en").unwrap();
        assert_eq!(session.current_prompt(), "Is the bleeding soaking through clothes?");

        let node = session.answer(true).unwrap();
        assert_eq!(node.id(), "heavy_pressure");
        assert!(matches!(node.kind(), DecisionNodeKind::Question { .. }));

        let node = session.answer(true).unwrap();
        assert!(node.is_end());
        assert!(node.prompt().contains("tourniquet"));
        assert!(session.answers() <= 3);

        assert!(matches!(session.answer(true), Err(SessionError::InvalidTransition { .. })));
    }

    #[rstest]
    #[case("ar", "هل ينفذ الدم من خلال الملابس؟", "التحكم في النزيف")]
    #[case("ar-EG", "هل ينفذ الدم من خلال الملابس؟", "التحكم في النزيف")]
    #[case("zh", "血迹渗透衣服了吗？", "止血控制")]
    #[case("fr", "Is the bleeding soaking through clothes?", "Bleeding control")]
    fn begins_the_protocol_in_the_requested_language(
        assistant: SurvivalAssistant,
        #[case] locale: &str,
        #[case] prompt: &str,
        #[case] title: &str,
    ) {
        let session = assistant.begin_protocol("bleeding", locale).unwrap();

        assert_eq!(session.current_prompt(), prompt);
        assert_eq!(session.tree().title(), title);
    }

    #[rstest]
    fn walks_a_translated_protocol_along_the_same_edges(assistant: SurvivalAssistant) {
        let mut session = assistant.begin_protocol("bleeding", "ar").unwrap();

        let node = session.answer(true).unwrap();
        assert_eq!(node.id(), "heavy_pressure");
        let node = session.answer(true).unwrap();
        assert_eq!(node.id(), "tourniquet");
        assert!(session.is_finished());
    }

    #[rstest]
    fn begins_an_untranslated_protocol_for_any_locale(assistant: SurvivalAssistant) {
        let english = assistant.begin_protocol("cpr", "en").unwrap();
        let arabic = assistant.begin_protocol("cpr", "ar").unwrap();

        assert_eq!(arabic.current_prompt(), english.current_prompt());
    }

    #[rstest]
    fn restarting_a_protocol_begins_at_the_entry(assistant: SurvivalAssistant) {
        let mut session = assistant.begin_protocol("lost", "en").unwrap();
        session.answer(false).unwrap();

        let session = assistant.begin_protocol("lost", "en").unwrap();

        assert_eq!(session.current_node().id(), "start");
    }

    #[tokio::test]
    async fn loads_additional_protocols_from_the_configured_directory() {
        let config = AppConfigBuilder::new()
            .protocol_directory(format!("{}/tests/resources/protocols", env!("CARGO_MANIFEST_DIR")))
            .build();

        let assistant = SurvivalAssistant::from_config(&config).await.unwrap();

        assert!(assistant.list_available_protocols().contains("short"));
        assert_eq!(assistant.list_available_protocols().len(), 6);
    }

    #[tokio::test]
    async fn loads_the_configured_rescue_catalog() -> Result<(), Box<dyn std::error::Error>> {
        let path = temp_dir().join("waypoint_rescue_catalog.json");
        fs::write(&path, r#"[{ "name": "Base camp", "latitude": 27.98, "longitude": 86.92, "kind": "OUTPOST" }]"#).await?;
        let config = AppConfigBuilder::new().rescue_catalog(path.to_string_lossy().into_owned()).build();

        let assistant = SurvivalAssistant::from_config(&config).await?;
        let result = assistant.find_guidance_to_nearest_safety(WESTERN_DESERT, "en");

        assert_eq!(result.nearest.point.name(), "Base camp");
        Ok(())
    }

    #[tokio::test]
    async fn fails_for_a_missing_rescue_catalog() {
        let config = AppConfigBuilder::new().rescue_catalog("/does/not/exist.json".to_string()).build();

        let result = SurvivalAssistant::from_config(&config).await;

        assert!(matches!(result, Err(ConfigurationError::Io { .. })));
    }
}
