use crate::domain::Coordinate;
use config::{Config, ConfigError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    location: Coordinate,
    protocols: Option<Protocols>,
    rescue: Option<Rescue>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("WAYPOINT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    /// The position used when none is given on the command line.
    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn protocol_directory(&self) -> Option<&str> {
        self.protocols.as_ref().map(|protocols| protocols.directory.as_str())
    }

    pub fn rescue_catalog(&self) -> Option<&str> {
        self.rescue.as_ref().map(|rescue| rescue.catalog.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    locale: String,
}

impl Core {
    /// The locale tag used when none is given on the command line.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

#[derive(Debug, Deserialize)]
struct Protocols {
    directory: String,
}

#[derive(Debug, Deserialize)]
struct Rescue {
    catalog: String,
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { locale: "en".to_string() },
                location: Coordinate::new(25.0, 29.0).unwrap(),
                protocols: None,
                rescue: None,
            },
        }
    }

    pub fn protocol_directory(mut self, directory: String) -> Self {
        self.config.protocols = Some(Protocols { directory });
        self
    }

    pub fn rescue_catalog(mut self, catalog: String) -> Self {
        self.config.rescue = Some(Rescue { catalog });
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
