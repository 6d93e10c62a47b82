// slot times in the dataset, e.g. "09:00:00"
pub const SLOT_TIME_FORMAT: &str = "%H:%M:%S";

// a slot starting within this many minutes is reported as upcoming
pub const UPCOMING_WINDOW_MINUTES: f64 = 20.0;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
