//! Target — a point of interest placed by the scenario.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinate;
use crate::set::Entity;

pub const TARGET_HUMAN: i32 = 0;
pub const TARGET_ADJUSTABLE: i32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Target {
    id: String,
    #[serde(rename = "type")]
    target_type: i32,
    coordinate: Option<Coordinate>,
    /// Whether a scan has uncovered this target for the operator.
    revealed: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Target {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target_type(&self) -> i32 {
        self.target_type
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

impl Entity for Target {
    fn id(&self) -> &str {
        &self.id
    }
}
