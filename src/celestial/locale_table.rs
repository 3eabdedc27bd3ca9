use crate::celestial::band::Band;
use crate::celestial::ReferenceBody;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

const EMBEDDED_LOCALES: &str = include_str!("../../resources/locales.json");
const DEGREES_PLACEHOLDER: &str = "{degrees}";
const BODY_PLACEHOLDER: &str = "{body}";

/// Instruction templates per locale tag, with a default to fall back on.
#[derive(Debug, Deserialize)]
pub struct LocaleTable {
    default: String,
    locales: HashMap<String, Messages>,
}

#[derive(Debug, Deserialize)]
pub struct Messages {
    bodies: BodyNames,
    short: ShortNames,
    straight: String,
    left: String,
    behind: String,
    right: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyNames {
    north_star: String,
    southern_cross: String,
    sun: String,
    orion: String,
}

/// Names used inside a sentence, e.g. "the star".
#[derive(Debug, Deserialize)]
struct ShortNames {
    star: String,
    sun: String,
    orion: String,
}

impl LocaleTable {
    pub fn from_json(json: &str) -> Result<Self, LocaleTableError> {
        let mut table = serde_json::from_str::<LocaleTable>(json)?;
        table.default = table.default.to_lowercase();
        table.locales = table.locales.into_iter().map(|(tag, messages)| (tag.to_lowercase(), messages)).collect();

        if !table.locales.contains_key(&table.default) {
            return Err(LocaleTableError::MissingDefaultLocale(table.default));
        }

        for (tag, messages) in &table.locales {
            for (name, template) in [("left", &messages.left), ("right", &messages.right)] {
                if !template.contains(DEGREES_PLACEHOLDER) {
                    return Err(LocaleTableError::MissingPlaceholder {
                        locale: tag.clone(),
                        template: name,
                    });
                }
            }
        }

        Ok(table)
    }

    /// The English, Arabic and Chinese tables compiled into the binary.
    pub fn embedded() -> Result<Self, LocaleTableError> {
        Self::from_json(EMBEDDED_LOCALES)
    }

    pub fn default_locale(&self) -> &str {
        &self.default
    }

    pub fn tags(&self) -> Vec<&str> {
        let mut tags = self.locales.keys().map(String::as_str).collect::<Vec<_>>();
        tags.sort_unstable();
        tags
    }

    /// Returns the registered locale matching `tag`, or the default locale if there is none.
    ///
    /// Only the primary subtag is considered, so `ar-EG` resolves to `ar`.
    pub fn resolve_locale(&self, tag: &str) -> &str {
        let primary = tag.split(['-', '_']).next().unwrap_or_default().to_lowercase();
        match self.locales.get_key_value(&primary) {
            Some((key, _)) => key,
            None => {
                warn!(requested = tag, fallback = %self.default, "⚠️ Missing locale '{}', falling back to '{}'", tag, self.default);
                &self.default
            }
        }
    }

    pub fn messages(&self, tag: &str) -> &Messages {
        let resolved = self.resolve_locale(tag);
        // Both the resolved tag and the default are guaranteed to exist after from_json
        &self.locales[resolved]
    }
}

impl Messages {
    pub fn body_name(&self, body: ReferenceBody) -> &str {
        match body {
            ReferenceBody::NorthStar => &self.bodies.north_star,
            ReferenceBody::SouthernCross => &self.bodies.southern_cross,
            ReferenceBody::Sun => &self.bodies.sun,
            ReferenceBody::Orion => &self.bodies.orion,
        }
    }

    pub fn instruction(&self, band: Band, body: ReferenceBody) -> String {
        let short_name = match body {
            ReferenceBody::NorthStar | ReferenceBody::SouthernCross => &self.short.star,
            ReferenceBody::Sun => &self.short.sun,
            ReferenceBody::Orion => &self.short.orion,
        };

        let (template, degrees) = match band {
            Band::Straight => (&self.straight, None),
            Band::Left(degrees) => (&self.left, Some(degrees)),
            Band::Behind => (&self.behind, None),
            Band::Right(degrees) => (&self.right, Some(degrees)),
        };

        let instruction = template.replace(BODY_PLACEHOLDER, short_name);
        match degrees {
            Some(degrees) => instruction.replace(DEGREES_PLACEHOLDER, &degrees.to_string()),
            None => instruction,
        }
    }
}

#[derive(Error, Debug)]
pub enum LocaleTableError {
    #[error("json deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("default locale '{0}' has no messages")]
    MissingDefaultLocale(String),
    #[error("template '{template}' of locale '{locale}' does not contain {{degrees}}")]
    MissingPlaceholder { locale: String, template: &'static str },
}
