//! Task — a unit of survey work the allocator assigns agents to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinate;
use crate::set::Entity;

pub const TASK_WAYPOINT: i32 = 0;
pub const TASK_MONITOR: i32 = 1;
pub const TASK_VISIT: i32 = 2;
pub const TASK_PATTERN: i32 = 3;
pub const TASK_REGION: i32 = 4;
pub const TASK_DEEP_SCAN: i32 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    id: String,
    #[serde(rename = "type")]
    task_type: i32,
    coordinate: Option<Coordinate>,
    /// Ids of agents currently assigned to this task.
    agents: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Task {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn task_type(&self) -> i32 {
        self.task_type
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }
}

impl Entity for Task {
    fn id(&self) -> &str {
        &self.id
    }
}
