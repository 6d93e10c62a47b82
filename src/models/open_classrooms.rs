use crate::models::slot_status::SlotStatus;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BuildingResult {
    pub building: String,
    pub building_code: String,
    pub building_status: SlotStatus,
    pub rooms: BTreeMap<String, RoomSlots>,
    pub coords: Vec<f64>,
    pub distance: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RoomSlots {
    pub slots: Vec<SlotResult>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SlotResult {
    #[serde(rename = "StartTime")]
    pub start: String,
    #[serde(rename = "EndTime")]
    pub end: String,
    #[serde(rename = "Status")]
    pub status: SlotStatus,
}

/// A validated user location in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
}
