use crate::domain::{Coordinate, RescuePoint};
use crate::geo_math::distance_km;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

const EMBEDDED_CATALOG: &str = include_str!("../resources/rescue_points.json");

/// A fixed catalog of places a lost person can walk to.
#[derive(Debug)]
pub struct RescueDirectory {
    points: Vec<RescuePoint>,
    by_name: HashMap<String, usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NearestResult {
    pub point: RescuePoint,
    pub distance_km: f64,
}

impl RescueDirectory {
    pub fn new(points: Vec<RescuePoint>) -> Result<Self, DirectoryError> {
        if points.is_empty() {
            return Err(DirectoryError::Empty);
        }

        let mut by_name = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if by_name.insert(point.name().to_owned(), index).is_some() {
                return Err(DirectoryError::DuplicateName(point.name().to_owned()));
            }
        }

        Ok(RescueDirectory { points, by_name })
    }

    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let points = serde_json::from_str::<Vec<RescuePoint>>(json)?;
        Self::new(points)
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, DirectoryError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Returns the closest point, preferring the earliest catalog entry on ties.
    #[instrument(skip(self))]
    pub fn nearest(&self, current: Coordinate) -> NearestResult {
        // The catalog is never empty, so the first point always exists
        let mut nearest = &self.points[0];
        let mut min_distance = distance_km(current, nearest.coordinate());

        for point in &self.points[1..] {
            let distance = distance_km(current, point.coordinate());
            if distance < min_distance {
                min_distance = distance;
                nearest = point;
            }
        }

        debug!(point = nearest.name(), distance_km = min_distance, "Found nearest rescue point");
        NearestResult {
            point: nearest.clone(),
            distance_km: min_distance,
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&RescuePoint> {
        self.by_name.get(name).map(|&index| &self.points[index])
    }

    pub fn points(&self) -> &[RescuePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("the rescue directory must contain at least one point")]
    Empty,
    #[error("duplicate rescue point '{0}'")]
    DuplicateName(String),
    #[error("json deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}
