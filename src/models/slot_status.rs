use serde::Serialize;

/// Availability of a single room slot relative to the current time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// The room is open right now
    Available,
    /// The slot opens within the next 20 minutes
    Upcoming,
    /// The slot is later today, or otherwise not open
    Unavailable,
    /// The slot already ended today
    Passed,
}

impl SlotStatus {
    /// Combines a building's current status with one of its slot statuses.
    ///
    /// Any available slot makes the building available; absent that, any
    /// upcoming slot makes it upcoming. Passed slots never promote.
    pub fn promote(self, slot: SlotStatus) -> SlotStatus {
        match (self, slot) {
            (_, SlotStatus::Available) => SlotStatus::Available,
            (SlotStatus::Unavailable, SlotStatus::Upcoming) => SlotStatus::Upcoming,
            (current, _) => current,
        }
    }
}
