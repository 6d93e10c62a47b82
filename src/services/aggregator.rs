use crate::models::building::{Building, SkippedReason};
use crate::models::open_classrooms::{BuildingResult, RoomSlots, SlotResult, UserLocation};
use crate::models::slot_status::SlotStatus;
use crate::services::availability::{SlotTimeError, slot_status};
use crate::services::distance::haversine_km;
use chrono::NaiveTime;
use serde_json::Value;
use std::collections::BTreeMap;

/// Open buildings plus the dataset entries dropped while parsing
#[derive(Debug)]
pub struct Aggregation {
    pub buildings: Vec<BuildingResult>,
    pub skipped: Vec<SkippedReason>,
}

/// Builds the open classroom listing from the raw dataset.
///
/// Passed slots are dropped, then rooms left without slots, then buildings
/// left without rooms. With a user location the result is sorted by distance
/// (stable), otherwise dataset order is kept and every distance is 0.
///
/// A malformed slot time fails the whole call.
pub fn aggregate(
    dataset: &[Value],
    current: NaiveTime,
    location: Option<UserLocation>,
) -> Result<Aggregation, SlotTimeError> {
    let (buildings, skipped) = Building::parse_dataset(dataset);

    let mut results = Vec::with_capacity(buildings.len());
    for building in &buildings {
        if let Some(result) = summarize_building(building, current, location)? {
            results.push(result);
        }
    }

    if location.is_some() {
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    Ok(Aggregation {
        buildings: results,
        skipped,
    })
}

fn summarize_building(
    building: &Building,
    current: NaiveTime,
    location: Option<UserLocation>,
) -> Result<Option<BuildingResult>, SlotTimeError> {
    let mut building_status = SlotStatus::Unavailable;
    let mut rooms = BTreeMap::new();

    for room in &building.rooms {
        let mut slots = Vec::new();

        for slot in room.slots() {
            let status = slot_status(current, &slot.start, &slot.end)?;
            building_status = building_status.promote(status);

            if status != SlotStatus::Passed {
                slots.push(SlotResult {
                    start: slot.start.clone(),
                    end: slot.end.clone(),
                    status,
                });
            }
        }

        if !slots.is_empty() {
            rooms.insert(room.room_number.clone(), RoomSlots { slots });
        }
    }

    if rooms.is_empty() {
        return Ok(None);
    }

    let distance = match (location, building.coordinates) {
        (Some(user), Some(coords)) => {
            haversine_km(user.lat, user.lng, coords.latitude, coords.longitude)
        }
        _ => 0.0,
    };

    Ok(Some(BuildingResult {
        building: building.name.clone(),
        building_code: building.code.clone(),
        building_status,
        rooms,
        coords: building
            .coordinates
            .map(|coords| coords.to_pair().to_vec())
            .unwrap_or_default(),
        distance,
    }))
}
