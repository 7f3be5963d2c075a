//! Polygon input for the containment ("nazotte") search.

use crate::domain::search::SearchError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of estates returned by a containment search.
pub const NAZOTTE_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Simple polygon given as an unclosed ring of at least three vertices.
///
/// Stored points are `point(latitude, longitude)`, so vertices use the same
/// axis order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(vertices: Vec<Coordinate>) -> Result<Self, SearchError> {
        if vertices.len() < 3 {
            return Err(SearchError::InvalidPolygon(format!(
                "need at least 3 coordinates, got {}",
                vertices.len()
            )));
        }
        if let Some(bad) = vertices
            .iter()
            .find(|c| !c.latitude.is_finite() || !c.longitude.is_finite())
        {
            return Err(SearchError::InvalidPolygon(format!(
                "non-finite coordinate ({}, {})",
                bad.latitude, bad.longitude
            )));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// PostgreSQL `polygon` literal, bound as a query parameter. The ring is
    /// closed implicitly by the type.
    pub fn to_pg_literal(&self) -> String {
        let points: Vec<String> = self
            .vertices
            .iter()
            .map(|c| format!("({},{})", c.latitude, c.longitude))
            .collect();
        format!("({})", points.join(","))
    }
}
