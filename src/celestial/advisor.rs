use crate::celestial::band::Band;
use crate::celestial::locale_table::LocaleTable;
use crate::celestial::orion::orion_azimuth;
use crate::celestial::sun::{is_sun_up, sun_azimuth};
use crate::domain::Coordinate;
use crate::geo_math::{bearing, normalize_degrees};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReferenceBody {
    NorthStar,
    SouthernCross,
    Sun,
    /// The three stars of Orion's Belt, usable from both hemispheres.
    Orion,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CelestialGuidance {
    pub reference_body: String,
    pub instruction: String,
    /// Initial bearing towards the target, clockwise from true north.
    pub bearing: f64,
}

/// Turns a bearing into directions relative to a celestial body.
#[derive(Debug)]
pub struct CelestialAdvisor {
    locales: LocaleTable,
}

impl CelestialAdvisor {
    pub fn new(locales: LocaleTable) -> Self {
        CelestialAdvisor { locales }
    }

    pub fn locales(&self) -> &LocaleTable {
        &self.locales
    }

    /// Guides by the pole star of the hemisphere `current` lies in.
    ///
    /// The southern cross points south, so southern bearings are turned around by 180° before
    /// they are classified.
    #[instrument(skip(self))]
    pub fn guide(&self, current: Coordinate, target: Coordinate, locale: &str) -> CelestialGuidance {
        let bearing = bearing(current, target);
        let (body, azimuth) = if current.is_northern_hemisphere() {
            (ReferenceBody::NorthStar, 0.0)
        } else {
            (ReferenceBody::SouthernCross, 180.0)
        };

        self.guidance(bearing, body, azimuth, locale)
    }

    /// Guides by the sun while it is up at `current`, and by the stars otherwise.
    #[instrument(skip(self))]
    pub fn guide_at(&self, current: Coordinate, target: Coordinate, locale: &str, at: DateTime<Utc>) -> CelestialGuidance {
        match sun_azimuth(current, at) {
            Some(azimuth) => self.guidance(bearing(current, target), ReferenceBody::Sun, azimuth, locale),
            None => self.guide(current, target, locale),
        }
    }

    /// Guides by Orion's Belt while it is clearly visible at `current`.
    ///
    /// Returns `None` during the day, while the belt is too low or too high, and near the poles where
    /// day and night cannot be told apart.
    #[instrument(skip(self))]
    pub fn guide_by_orion(&self, current: Coordinate, target: Coordinate, locale: &str, at: DateTime<Utc>) -> Option<CelestialGuidance> {
        if is_sun_up(current, at) != Some(false) {
            return None;
        }

        let azimuth = orion_azimuth(current, at)?;
        Some(self.guidance(bearing(current, target), ReferenceBody::Orion, azimuth, locale))
    }

    fn guidance(&self, bearing: f64, body: ReferenceBody, body_azimuth: f64, locale: &str) -> CelestialGuidance {
        let relative_bearing = normalize_degrees(bearing - body_azimuth);
        let band = Band::classify(relative_bearing);
        debug!(bearing, relative_bearing, ?body, ?band, "Classified bearing");

        let messages = self.locales.messages(locale);
        CelestialGuidance {
            reference_body: messages.body_name(body).to_owned(),
            instruction: messages.instruction(band, body),
            bearing,
        }
    }
}
