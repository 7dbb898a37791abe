//! State — the per-session aggregate root.
//!
//! Collections are not kept inside the flat attribute bag. Each refresh
//! feeds the server's list-valued fields through `EntitySet::sync`, so a
//! record dropping out of a snapshot is removed locally without any
//! outbound delete. `snapshot` re-inserts the collections under their
//! original keys, making it the exact inverse of `absorb`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::agent::Agent;
use crate::error::{ModelError, ModelResult};
use crate::geo::Coordinate;
use crate::hazard::{Hazard, HazardHit, HazardHits};
use crate::set::EntitySet;
use crate::target::Target;
use crate::task::Task;

pub const GAME_TYPE_SANDBOX: i32 = 0;
pub const GAME_TYPE_SCENARIO: i32 = 1;

/// The flat (non-collection) attribute set of a session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateAttrs {
    time: f64,
    time_limit: f64,
    allocation: HashMap<String, String>,
    temp_allocation: HashMap<String, String>,
    dropped_allocation: HashMap<String, String>,
    allocation_method: String,
    allocation_undo_available: bool,
    allocation_redo_available: bool,
    edit_mode: bool,
    in_progress: bool,
    game_id: Option<String>,
    game_type: Option<i32>,
    game_description: Option<String>,
    game_centre: Coordinate,
    #[serde(rename = "prov_doc")]
    prov_doc: Option<String>,
    hazard_hits: HazardHits,
    ui_options: Vec<String>,
    uncertainty_radius: f64,
    flocking_enabled: bool,
    deep_allowed: bool,
    hub_location: Option<Coordinate>,
    wind_speed: f64,
    wind_heading: f64,
    markers: Vec<String>,
    user_names: Vec<String>,
    chat_log: Vec<String>,
    chat_enabled: bool,
    scenario_number: i32,
    /// Remaining snapshot fields this layer does not interpret.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Default for StateAttrs {
    fn default() -> Self {
        Self {
            time: 0.0,
            time_limit: 0.0,
            allocation: HashMap::new(),
            temp_allocation: HashMap::new(),
            dropped_allocation: HashMap::new(),
            allocation_method: "maxsum".to_string(),
            allocation_undo_available: false,
            allocation_redo_available: false,
            edit_mode: true,
            in_progress: false,
            game_id: None,
            game_type: None,
            game_description: None,
            game_centre: Coordinate::default(),
            prov_doc: None,
            hazard_hits: HazardHits::default(),
            ui_options: Vec::new(),
            uncertainty_radius: 0.0,
            flocking_enabled: false,
            deep_allowed: false,
            hub_location: None,
            wind_speed: 0.0,
            wind_heading: 0.0,
            markers: Vec::new(),
            user_names: Vec::new(),
            chat_log: Vec::new(),
            chat_enabled: false,
            scenario_number: 0,
            extra: Map::new(),
        }
    }
}

/// Client-side replica of one session. Constructed once; the five entity
/// collections are created here and mutated in place on every refresh.
#[derive(Debug, Default)]
pub struct State {
    attrs: StateAttrs,
    agents: EntitySet<Agent>,
    tasks: EntitySet<Task>,
    completed_tasks: EntitySet<Task>,
    hazards: EntitySet<Hazard>,
    targets: EntitySet<Target>,
}

fn take_list<T: serde::de::DeserializeOwned>(
    obj: &mut Map<String, Value>,
    key: &'static str,
) -> ModelResult<Option<Vec<T>>> {
    match obj.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| ModelError::Codec(key, e)),
    }
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one decoded snapshot: the five list-valued fields are synced
    /// into their collections and stripped from the payload, then the
    /// remainder replaces the flat attribute set.
    ///
    /// Decoding happens before any mutation, so a malformed payload leaves
    /// the replica untouched.
    pub fn absorb(&mut self, payload: Value) -> ModelResult<()> {
        let mut obj = match payload {
            Value::Object(map) => map,
            _ => return Err(ModelError::NotAnObject),
        };

        let agents: Option<Vec<Agent>> = take_list(&mut obj, "agents")?;
        let tasks: Option<Vec<Task>> = take_list(&mut obj, "tasks")?;
        let completed: Option<Vec<Task>> = take_list(&mut obj, "completedTasks")?;
        let hazards: Option<Vec<Hazard>> = take_list(&mut obj, "hazards")?;
        let targets: Option<Vec<Target>> = take_list(&mut obj, "targets")?;

        let attrs: StateAttrs = serde_json::from_value(Value::Object(obj))
            .map_err(|e| ModelError::Codec("attributes", e))?;

        if let Some(list) = agents {
            self.agents.sync(list);
        }
        if let Some(list) = tasks {
            self.tasks.sync(list);
        }
        if let Some(list) = completed {
            self.completed_tasks.sync(list);
        }
        if let Some(list) = hazards {
            self.hazards.sync(list);
        }
        if let Some(list) = targets {
            self.targets.sync(list);
        }
        self.attrs = attrs;
        Ok(())
    }

    /// Serialize the full session: the flat attributes with the five
    /// collections re-inserted under their original keys.
    pub fn snapshot(&self) -> ModelResult<Value> {
        let attrs = serde_json::to_value(&self.attrs)
            .map_err(|e| ModelError::Codec("attributes", e))?;
        let Value::Object(mut obj) = attrs else {
            return Err(ModelError::NotAnObject);
        };

        obj.insert(
            "agents".to_string(),
            serde_json::to_value(self.agents.records())
                .map_err(|e| ModelError::Codec("agents", e))?,
        );
        obj.insert(
            "tasks".to_string(),
            serde_json::to_value(self.tasks.records())
                .map_err(|e| ModelError::Codec("tasks", e))?,
        );
        obj.insert(
            "completedTasks".to_string(),
            serde_json::to_value(self.completed_tasks.records())
                .map_err(|e| ModelError::Codec("completedTasks", e))?,
        );
        obj.insert(
            "hazards".to_string(),
            serde_json::to_value(self.hazards.records())
                .map_err(|e| ModelError::Codec("hazards", e))?,
        );
        obj.insert(
            "targets".to_string(),
            serde_json::to_value(self.targets.records())
                .map_err(|e| ModelError::Codec("targets", e))?,
        );

        Ok(Value::Object(obj))
    }

    // ── Collections ─────────────────────────────────────────────

    pub fn agents(&self) -> &EntitySet<Agent> {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut EntitySet<Agent> {
        &mut self.agents
    }

    pub fn tasks(&self) -> &EntitySet<Task> {
        &self.tasks
    }

    pub fn completed_tasks(&self) -> &EntitySet<Task> {
        &self.completed_tasks
    }

    pub fn hazards(&self) -> &EntitySet<Hazard> {
        &self.hazards
    }

    pub fn targets(&self) -> &EntitySet<Target> {
        &self.targets
    }

    // ── Flat attribute accessors ────────────────────────────────

    pub fn time(&self) -> f64 {
        self.attrs.time
    }

    pub fn time_limit(&self) -> f64 {
        self.attrs.time_limit
    }

    pub fn allocation(&self) -> &HashMap<String, String> {
        &self.attrs.allocation
    }

    pub fn temp_allocation(&self) -> &HashMap<String, String> {
        &self.attrs.temp_allocation
    }

    pub fn dropped_allocation(&self) -> &HashMap<String, String> {
        &self.attrs.dropped_allocation
    }

    pub fn allocation_method(&self) -> &str {
        &self.attrs.allocation_method
    }

    pub fn is_allocation_undo_available(&self) -> bool {
        self.attrs.allocation_undo_available
    }

    pub fn is_allocation_redo_available(&self) -> bool {
        self.attrs.allocation_redo_available
    }

    pub fn is_edit(&self) -> bool {
        self.attrs.edit_mode
    }

    pub fn set_edit_mode(&mut self, to_edit_mode: bool) {
        self.attrs.edit_mode = to_edit_mode;
    }

    /// Label shown on the console status line for the current mode.
    pub fn mode_label(&self) -> &'static str {
        if self.attrs.edit_mode {
            "Edit Mode"
        } else {
            "Monitor Mode"
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.attrs.in_progress
    }

    pub fn game_id(&self) -> Option<&str> {
        self.attrs.game_id.as_deref()
    }

    pub fn game_type(&self) -> Option<i32> {
        self.attrs.game_type
    }

    pub fn game_description(&self) -> Option<&str> {
        self.attrs.game_description.as_deref()
    }

    pub fn game_centre(&self) -> &Coordinate {
        &self.attrs.game_centre
    }

    pub fn prov_doc(&self) -> Option<&str> {
        self.attrs.prov_doc.as_deref()
    }

    /// Hazard hits for one category code (`-1`, `0` or `1`); `None` for
    /// anything outside the fixed set.
    pub fn hazard_hits(&self, hazard_type: i32) -> Option<&[HazardHit]> {
        self.attrs.hazard_hits.get(hazard_type)
    }

    pub fn ui_options(&self) -> &[String] {
        &self.attrs.ui_options
    }

    pub fn uncertainty_radius(&self) -> f64 {
        self.attrs.uncertainty_radius
    }

    pub fn is_flocking_enabled(&self) -> bool {
        self.attrs.flocking_enabled
    }

    pub fn is_deep_allowed(&self) -> bool {
        self.attrs.deep_allowed
    }

    pub fn hub_location(&self) -> Option<&Coordinate> {
        self.attrs.hub_location.as_ref()
    }

    pub fn wind_speed(&self) -> f64 {
        self.attrs.wind_speed
    }

    pub fn wind_heading(&self) -> f64 {
        self.attrs.wind_heading
    }

    pub fn markers(&self) -> &[String] {
        &self.attrs.markers
    }

    pub fn user_names(&self) -> &[String] {
        &self.attrs.user_names
    }

    pub fn chat_log(&self) -> &[String] {
        &self.attrs.chat_log
    }

    pub fn is_chat_enabled(&self) -> bool {
        self.attrs.chat_enabled
    }

    pub fn scenario_number(&self) -> i32 {
        self.attrs.scenario_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::HAZARD_FIRE;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "time": 12.5,
            "timeLimit": 600.0,
            "allocation": { "task-1": "uav-1" },
            "tempAllocation": {},
            "droppedAllocation": {},
            "allocationMethod": "maxsum",
            "allocationUndoAvailable": true,
            "allocationRedoAvailable": false,
            "editMode": false,
            "inProgress": true,
            "gameId": "game-42",
            "gameType": GAME_TYPE_SCENARIO,
            "gameDescription": "flood response drill",
            "gameCentre": { "latitude": 52.95, "longitude": -1.15 },
            "prov_doc": "prov/game-42.json",
            "hazardHits": {
                "-1": [],
                "0": [{ "location": { "latitude": 52.9, "longitude": -1.1 }, "weight": 1.0 }],
                "1": [],
            },
            "uiOptions": ["predictions"],
            "uncertaintyRadius": 15.0,
            "flockingEnabled": false,
            "deepAllowed": true,
            "hubLocation": { "latitude": 52.96, "longitude": -1.16 },
            "windSpeed": 4.2,
            "windHeading": 270.0,
            "markers": [],
            "userNames": ["operator-1"],
            "chatLog": ["Chat Connected."],
            "chatEnabled": true,
            "scenarioNumber": 3,
            "agents": [
                { "id": "uav-1", "battery": 0.8, "speed": 5.0 },
                { "id": "uav-2", "battery": 0.4, "isLeader": true },
            ],
            "tasks": [
                { "id": "task-1", "type": 1, "agents": ["uav-1"] },
            ],
            "completedTasks": [
                { "id": "task-0", "type": 0 },
            ],
            "hazards": [
                { "id": "hz-1", "type": 0, "size": 1 },
            ],
            "targets": [
                { "id": "tgt-1", "type": 0, "revealed": false },
            ],
        })
    }

    #[test]
    fn test_absorb_distributes_collections() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        assert_eq!(state.agents().len(), 2);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.completed_tasks().len(), 1);
        assert_eq!(state.hazards().len(), 1);
        assert_eq!(state.targets().len(), 1);
        assert!(state.agents().get("uav-2").unwrap().is_leader());
    }

    #[test]
    fn test_absorb_strips_entity_keys_from_attrs() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        let attrs = serde_json::to_value(&state.attrs).unwrap();
        let obj = attrs.as_object().unwrap();
        for key in ["agents", "tasks", "completedTasks", "hazards", "targets"] {
            assert!(!obj.contains_key(key), "attrs should not contain {}", key);
        }
    }

    #[test]
    fn test_absorb_reads_flat_attributes() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        assert_eq!(state.time(), 12.5);
        assert!(!state.is_edit());
        assert!(state.is_in_progress());
        assert_eq!(state.game_id(), Some("game-42"));
        assert_eq!(state.game_type(), Some(GAME_TYPE_SCENARIO));
        assert_eq!(state.game_centre().latitude, 52.95);
        assert_eq!(state.prov_doc(), Some("prov/game-42.json"));
        assert_eq!(state.allocation().get("task-1").unwrap(), "uav-1");
        assert!(state.is_allocation_undo_available());
        assert!(!state.is_allocation_redo_available());
        assert_eq!(state.uncertainty_radius(), 15.0);
        assert_eq!(state.wind_speed(), 4.2);
        assert_eq!(state.user_names(), ["operator-1"]);
        assert!(state.is_chat_enabled());
        assert_eq!(state.scenario_number(), 3);
        assert!(state.is_deep_allowed());
        assert_eq!(state.hub_location().unwrap().longitude, -1.16);
    }

    #[test]
    fn test_snapshot_is_inverse_of_absorb() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        let wire = state.snapshot().unwrap();
        let expected = sample_payload();

        // Entity lists reproduce by content.
        for key in ["agents", "tasks", "completedTasks", "hazards", "targets"] {
            let out = wire[key].as_array().unwrap();
            let exp = expected[key].as_array().unwrap();
            assert_eq!(out.len(), exp.len(), "length mismatch for {}", key);
        }
        let ids: Vec<&str> = wire["agents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["uav-1", "uav-2"]);

        // Flat fields reproduce verbatim.
        assert_eq!(wire["time"], expected["time"]);
        assert_eq!(wire["editMode"], expected["editMode"]);
        assert_eq!(wire["gameCentre"], expected["gameCentre"]);
        assert_eq!(wire["prov_doc"], expected["prov_doc"]);
        assert_eq!(wire["hazardHits"], expected["hazardHits"]);
        assert_eq!(wire["allocation"], expected["allocation"]);
        assert_eq!(wire["windSpeed"], expected["windSpeed"]);
        assert_eq!(wire["chatLog"], expected["chatLog"]);
    }

    #[test]
    fn test_unknown_flat_fields_round_trip() {
        let mut payload = sample_payload();
        payload["passthrough"] = json!(true);
        payload["nextFileName"] = json!("scenario-4.json");

        let mut state = State::new();
        state.absorb(payload).unwrap();
        let wire = state.snapshot().unwrap();

        assert_eq!(wire["passthrough"], json!(true));
        assert_eq!(wire["nextFileName"], json!("scenario-4.json"));
    }

    #[test]
    fn test_absorb_merges_collections_across_refreshes() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();
        assert_eq!(state.agents().len(), 2);

        // uav-2 drops out of the next snapshot; it must disappear locally.
        let mut next = sample_payload();
        next["agents"] = json!([{ "id": "uav-1", "battery": 0.7 }]);
        state.absorb(next).unwrap();

        assert_eq!(state.agents().len(), 1);
        assert!(state.agents().get("uav-2").is_none());
        assert_eq!(state.agents().get("uav-1").unwrap().battery(), 0.7);
    }

    #[test]
    fn test_absorb_without_entity_lists_keeps_collections() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        state.absorb(json!({ "time": 13.0 })).unwrap();
        assert_eq!(state.time(), 13.0);
        assert_eq!(state.agents().len(), 2);
    }

    #[test]
    fn test_absorb_rejects_non_object_payload() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        let err = state.absorb(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject));
        // Replica unchanged.
        assert_eq!(state.agents().len(), 2);
        assert_eq!(state.time(), 12.5);
    }

    #[test]
    fn test_absorb_malformed_list_leaves_replica_unchanged() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();

        let mut bad = sample_payload();
        bad["hazards"] = json!("not a list");
        bad["time"] = json!(99.0);
        assert!(state.absorb(bad).is_err());

        assert_eq!(state.time(), 12.5);
        assert_eq!(state.hazards().len(), 1);
    }

    #[test]
    fn test_defaults() {
        let state = State::new();
        assert!(state.is_edit());
        assert!(!state.is_in_progress());
        assert_eq!(state.allocation_method(), "maxsum");
        assert_eq!(state.game_centre().latitude, 0.0);
        assert!(state.game_id().is_none());
        assert_eq!(state.hazard_hits(HAZARD_FIRE).unwrap().len(), 0);
        assert_eq!(state.mode_label(), "Edit Mode");
    }

    #[test]
    fn test_mode_label_follows_edit_flag() {
        let mut state = State::new();
        state.set_edit_mode(false);
        assert_eq!(state.mode_label(), "Monitor Mode");
        state.set_edit_mode(true);
        assert_eq!(state.mode_label(), "Edit Mode");
    }

    #[test]
    fn test_hazard_hits_unknown_category() {
        let mut state = State::new();
        state.absorb(sample_payload()).unwrap();
        assert_eq!(state.hazard_hits(HAZARD_FIRE).unwrap().len(), 1);
        assert!(state.hazard_hits(7).is_none());
    }
}
