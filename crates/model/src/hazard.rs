//! Hazard — hazard records plus the fixed three-category hit map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinate;
use crate::set::Entity;

pub const HAZARD_NONE: i32 = -1;
pub const HAZARD_FIRE: i32 = 0;
pub const HAZARD_DEBRIS: i32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hazard {
    id: String,
    #[serde(rename = "type")]
    hazard_type: i32,
    coordinate: Option<Coordinate>,
    size: i32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Hazard {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hazard_type(&self) -> i32 {
        self.hazard_type
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    pub fn size(&self) -> i32 {
        self.size
    }
}

impl Entity for Hazard {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One heatmap sample: where a sensor registered a hazard, and how strongly
/// it still counts (the server decays `weight` over time).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardHit {
    pub location: Coordinate,
    pub weight: f64,
}

/// Per-category hazard-hit lists. The wire shape is a map with exactly the
/// keys `"-1"`, `"0"` and `"1"`; nothing else is ever present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardHits {
    #[serde(rename = "-1")]
    none: Vec<HazardHit>,
    #[serde(rename = "0")]
    fire: Vec<HazardHit>,
    #[serde(rename = "1")]
    debris: Vec<HazardHit>,
}

impl HazardHits {
    /// Hits for one category code. Codes outside the fixed set have no
    /// backing list and return `None`.
    pub fn get(&self, hazard_type: i32) -> Option<&[HazardHit]> {
        match hazard_type {
            HAZARD_NONE => Some(&self.none),
            HAZARD_FIRE => Some(&self.fire),
            HAZARD_DEBRIS => Some(&self.debris),
            _ => None,
        }
    }
}
