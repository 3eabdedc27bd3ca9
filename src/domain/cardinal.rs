use crate::domain::Cardinal::*;
use crate::geo_math::normalize_degrees;
use std::fmt::Display;

/// The eight points of the compass rose.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Cardinal {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Cardinal {
    /// Each point owns a 45° sector centred on it, the lower edge inclusive.
    pub fn from_bearing(bearing: f64) -> Cardinal {
        let sector = ((normalize_degrees(bearing) + 22.5) / 45.0).floor() as usize % 8;
        Cardinal::all()[sector]
    }

    pub fn all() -> [Cardinal; 8] {
        [North, NorthEast, East, SouthEast, South, SouthWest, West, NorthWest]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            North => "N",
            NorthEast => "NE",
            East => "E",
            SouthEast => "SE",
            South => "S",
            SouthWest => "SW",
            West => "W",
            NorthWest => "NW",
        }
    }
}

impl Display for Cardinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}
