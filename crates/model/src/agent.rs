//! Agent — one tracked drone and its flight/operational telemetry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinate;
use crate::set::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agent {
    id: String,
    coordinate: Option<Coordinate>,
    allocated_task_id: Option<String>,
    altitude: f64,
    battery: f64,
    heading: f64,
    manually_controlled: bool,
    route: Option<Vec<Coordinate>>,
    temp_route: Option<Vec<Coordinate>>,
    speed: f64,
    simulated: bool,
    timed_out: bool,
    time_in_air: f64,
    working: bool,
    #[serde(rename = "isLeader")]
    leader: bool,
    #[serde(rename = "type")]
    agent_type: String,
    visible: bool,
    /// Fields the server sends that this layer does not interpret.
    /// Carried verbatim so snapshots reproduce the full wire shape.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            id: String::new(),
            coordinate: None,
            allocated_task_id: None,
            altitude: 3.0,
            battery: 0.0,
            heading: 0.0,
            manually_controlled: false,
            route: None,
            temp_route: None,
            speed: 0.0,
            simulated: false,
            timed_out: false,
            time_in_air: 0.0,
            working: false,
            leader: false,
            agent_type: "standard".to_string(),
            visible: false,
            extra: Map::new(),
        }
    }
}

impl Agent {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    pub fn allocated_task_id(&self) -> Option<&str> {
        self.allocated_task_id.as_deref()
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn battery(&self) -> f64 {
        self.battery
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn manually_controlled(&self) -> bool {
        self.manually_controlled
    }

    pub fn route(&self) -> Option<&[Coordinate]> {
        self.route.as_deref()
    }

    pub fn temp_route(&self) -> Option<&[Coordinate]> {
        self.temp_route.as_deref()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn time_in_air(&self) -> f64 {
        self.time_in_air
    }

    pub fn is_working(&self) -> bool {
        self.working
    }

    pub fn is_leader(&self) -> bool {
        self.leader
    }

    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }

    /// Hard-coded on: agents are always drawn regardless of the stored
    /// `visible` flag. The flag itself still round-trips through the wire.
    pub fn is_visible(&self) -> bool {
        true
    }
}

impl Entity for Agent {
    fn id(&self) -> &str {
        &self.id
    }
}
