use crate::weekday::Weekday;
use chrono::NaiveTime;
use serde::Serialize;
use uuid::Uuid;

/// Display fallback when a conflicting class or room row cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One draft weekly occurrence submitted for conflict checking or persistence.
///
/// `room_name` is an optional display hint from the caller; when absent the
/// room name is looked up from the store for conflict attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSlot {
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub room_id: Option<Uuid>,
    pub room_name: Option<String>,
}

/// Which constraint a persisted slot collides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Room,
    Teacher,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::Room => "room",
            ConflictKind::Teacher => "teacher",
        }
    }
}

/// A single detected collision, attributed to the class already occupying
/// the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConflict {
    pub kind: ConflictKind,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub room_id: Option<Uuid>,
    pub room_name: Option<String>,
    pub class_id: Option<Uuid>,
    pub class_name: String,
}

/// Result of a conflict check. Conflicts are an ordinary successful
/// outcome, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictReport {
    pub conflicts: Vec<ScheduleConflict>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
