pub mod conflict;
pub mod role;
pub mod time;
pub mod weekday;
