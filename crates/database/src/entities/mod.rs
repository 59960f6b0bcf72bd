pub mod activity_logs;
pub mod class_schedules;
pub mod classes;
pub mod rooms;
pub mod sessions;
pub mod users;
