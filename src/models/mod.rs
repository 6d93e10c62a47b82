pub mod building;
pub mod open_classrooms;
pub mod slot_status;
