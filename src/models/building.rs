//! Study space dataset schema.
//!
//! The dataset is a loosely structured JSON file, so entries are parsed by
//! hand from [`serde_json::Value`] instead of derived. Anything that does not
//! fit the schema is dropped and a [`SkippedReason`] is recorded for it.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub name: String,
    pub code: String,
    pub coordinates: Option<Coordinates>,
    pub rooms: Vec<Room>,
}

/// Stored in the dataset as `[longitude, latitude]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_number: String,
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub slots: Vec<Slot>,
}

/// Raw `HH:MM:SS` strings, parsed only when classified
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub start: String,
    pub end: String,
}

/// Why a dataset entry was left out
#[derive(Debug, Clone, PartialEq)]
pub enum SkippedReason {
    BuildingNotAnObject { index: usize },
    BuildingMissingName { index: usize },
    BuildingMissingCode { index: usize },
    MalformedCoordinates { building: String },
    RoomsNotAList { building: String },
    RoomNotAnObject { building: String },
    RoomMissingNumber { building: String },
    ScheduleNotAList { building: String, room: String },
    ScheduleEntryMalformed { building: String, room: String },
    SlotMissingTimes { building: String, room: String },
}

impl Coordinates {
    fn parse(value: &Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [longitude, latitude] => Some(Coordinates {
                longitude: longitude.as_f64()?,
                latitude: latitude.as_f64()?,
            }),
            _ => None,
        }
    }

    /// `[longitude, latitude]`, matching the dataset layout
    pub fn to_pair(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl Building {
    /// Parses every building in the dataset, keeping the ones that are well formed.
    pub fn parse_dataset(values: &[Value]) -> (Vec<Building>, Vec<SkippedReason>) {
        let mut skipped = Vec::new();
        let buildings = values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| Building::parse(index, value, &mut skipped))
            .collect();

        (buildings, skipped)
    }

    fn parse(index: usize, value: &Value, skipped: &mut Vec<SkippedReason>) -> Option<Self> {
        let Some(object) = value.as_object() else {
            skipped.push(SkippedReason::BuildingNotAnObject { index });
            return None;
        };

        let Some(name) = non_empty_str(object, "name") else {
            skipped.push(SkippedReason::BuildingMissingName { index });
            return None;
        };
        let Some(code) = non_empty_str(object, "code") else {
            skipped.push(SkippedReason::BuildingMissingCode { index });
            return None;
        };

        let coordinates = match object.get("coordinates") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let parsed = Coordinates::parse(raw);
                if parsed.is_none() {
                    skipped.push(SkippedReason::MalformedCoordinates {
                        building: name.to_string(),
                    });
                }
                parsed
            }
        };

        let rooms = match object.get("rooms") {
            None => Vec::new(),
            Some(Value::Array(rooms)) => rooms
                .iter()
                .filter_map(|room| Room::parse(name, room, skipped))
                .collect(),
            Some(_) => {
                skipped.push(SkippedReason::RoomsNotAList {
                    building: name.to_string(),
                });
                Vec::new()
            }
        };

        Some(Building {
            name: name.to_string(),
            code: code.to_string(),
            coordinates,
            rooms,
        })
    }
}

impl Room {
    fn parse(building: &str, value: &Value, skipped: &mut Vec<SkippedReason>) -> Option<Self> {
        let Some(object) = value.as_object() else {
            skipped.push(SkippedReason::RoomNotAnObject {
                building: building.to_string(),
            });
            return None;
        };

        let Some(room_number) = non_empty_str(object, "roomNumber") else {
            skipped.push(SkippedReason::RoomMissingNumber {
                building: building.to_string(),
            });
            return None;
        };

        let schedule = match object.get("schedule") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| ScheduleEntry::parse(building, room_number, entry, skipped))
                .collect(),
            _ => {
                skipped.push(SkippedReason::ScheduleNotAList {
                    building: building.to_string(),
                    room: room_number.to_string(),
                });
                Vec::new()
            }
        };

        Some(Room {
            room_number: room_number.to_string(),
            schedule,
        })
    }

    /// All slots of the room in schedule order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.schedule.iter().flat_map(|entry| entry.slots.iter())
    }
}

impl ScheduleEntry {
    fn parse(
        building: &str,
        room: &str,
        value: &Value,
        skipped: &mut Vec<SkippedReason>,
    ) -> Option<Self> {
        let malformed = || SkippedReason::ScheduleEntryMalformed {
            building: building.to_string(),
            room: room.to_string(),
        };

        let Some(object) = value.as_object() else {
            skipped.push(malformed());
            return None;
        };

        // a null or missing "Slots" is an empty entry, not a malformed one
        let raw_slots = match object.get("Slots") {
            None | Some(Value::Null) => return Some(ScheduleEntry { slots: Vec::new() }),
            Some(Value::Array(raw_slots)) => raw_slots,
            Some(_) => {
                skipped.push(malformed());
                return None;
            }
        };

        let mut slots = Vec::with_capacity(raw_slots.len());
        for raw in raw_slots {
            let times = raw.as_object().and_then(|slot| {
                Some((
                    non_empty_str(slot, "StartTime")?,
                    non_empty_str(slot, "EndTime")?,
                ))
            });

            match times {
                Some((start, end)) => slots.push(Slot {
                    start: start.to_string(),
                    end: end.to_string(),
                }),
                None => skipped.push(SkippedReason::SlotMissingTimes {
                    building: building.to_string(),
                    room: room.to_string(),
                }),
            }
        }

        Some(ScheduleEntry { slots })
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
