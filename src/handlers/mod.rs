pub mod open_classrooms;
