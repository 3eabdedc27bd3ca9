use crate::domain::Coordinate;
use serde::Deserialize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RescuePointKind {
    City,
    Oasis,
    Coastal,
    Landmark,
    Outpost,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RescuePoint {
    name: String,
    #[serde(flatten)]
    coordinate: Coordinate,
    kind: RescuePointKind,
}

impl RescuePoint {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, kind: RescuePointKind) -> Self {
        RescuePoint {
            name: name.into(),
            coordinate,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn kind(&self) -> RescuePointKind {
        self.kind
    }
}
