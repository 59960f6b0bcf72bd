use database::entities::class_schedules;
use models::conflict::{CandidateSlot, ConflictReport};
use models::time;
use models::weekday::Weekday;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One draft schedule entry as submitted by the scheduling UI.
///
/// `day` and `time` are required but modeled as options so a missing field
/// surfaces as a 400 with a usable message instead of a body-rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryDto {
    pub day: Option<String>,
    pub time: Option<String>,
    #[serde(default, alias = "room")]
    pub room_id: Option<Uuid>,
    #[serde(default)]
    pub room_name: Option<String>,
}

impl ScheduleEntryDto {
    fn into_candidate(self) -> Result<CandidateSlot, String> {
        let day = self
            .day
            .ok_or_else(|| "schedule entry is missing a day".to_owned())?;
        let weekday = day
            .parse::<Weekday>()
            .map_err(|_| format!("unknown day: {day}"))?;
        let raw_time = self
            .time
            .ok_or_else(|| "schedule entry is missing a time".to_owned())?;
        let start_time =
            time::parse_hhmm(&raw_time).ok_or_else(|| format!("malformed time: {raw_time}"))?;

        Ok(CandidateSlot {
            weekday,
            start_time,
            room_id: self.room_id,
            room_name: self.room_name,
        })
    }
}

/// Validates raw entries into typed candidate slots, preserving order.
pub fn parse_candidates(entries: Vec<ScheduleEntryDto>) -> Result<Vec<CandidateSlot>, String> {
    entries
        .into_iter()
        .map(ScheduleEntryDto::into_candidate)
        .collect()
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckRequest {
    #[serde(default)]
    pub schedules: Vec<ScheduleEntryDto>,
    pub class_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub day: String,
    pub time: String,
    pub room: Option<String>,
    pub room_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub conflicting_class: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckResponse {
    pub has_conflicts: bool,
    pub conflicts: Vec<ConflictDto>,
}

impl From<ConflictReport> for ConflictCheckResponse {
    fn from(report: ConflictReport) -> Self {
        let has_conflicts = report.has_conflicts();
        let conflicts = report
            .conflicts
            .into_iter()
            .map(|conflict| ConflictDto {
                kind: conflict.kind.as_str().to_owned(),
                day: conflict.weekday.to_string(),
                time: time::format_hhmm(conflict.start_time),
                room: conflict.room_name,
                room_id: conflict.room_id,
                class_id: conflict.class_id,
                conflicting_class: conflict.class_name,
            })
            .collect();

        Self {
            has_conflicts,
            conflicts,
        }
    }
}

/// How a PUT on the schedule collection applies the submitted set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleAction {
    #[default]
    Replace,
    Append,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceScheduleRequest {
    #[serde(default)]
    pub schedules: Vec<ScheduleEntryDto>,
    #[serde(default)]
    pub action: ScheduleAction,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlotDto {
    pub id: Uuid,
    pub class_id: Uuid,
    pub day: String,
    pub time: String,
    pub room_id: Option<Uuid>,
}

impl From<class_schedules::Model> for ScheduleSlotDto {
    fn from(model: class_schedules::Model) -> Self {
        Self {
            id: model.id,
            class_id: model.class_id,
            day: Weekday::from_index(model.weekday)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            time: time::format_hhmm(model.start_time),
            room_id: model.room_id,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ReplaceScheduleRequest, ScheduleAction, ScheduleEntryDto, parse_candidates};
    use models::weekday::Weekday;

    fn entry(day: Option<&str>, time: Option<&str>) -> ScheduleEntryDto {
        ScheduleEntryDto {
            day: day.map(str::to_owned),
            time: time.map(str::to_owned),
            room_id: None,
            room_name: None,
        }
    }

    #[test]
    fn test_parse_candidates_accepts_well_formed_entries() {
        let slots = parse_candidates(vec![
            entry(Some("Mon"), Some("10:00")),
            entry(Some("Friday"), Some("16:30")),
        ])
        .unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].weekday, Weekday::Monday);
        assert_eq!(slots[1].weekday, Weekday::Friday);
    }

    #[test]
    fn test_parse_candidates_rejects_missing_fields() {
        let err = parse_candidates(vec![entry(None, Some("10:00"))]).unwrap_err();
        assert!(err.contains("missing a day"));

        let err = parse_candidates(vec![entry(Some("Mon"), None)]).unwrap_err();
        assert!(err.contains("missing a time"));

        let err = parse_candidates(vec![entry(Some("Mon"), Some("25:99"))]).unwrap_err();
        assert!(err.contains("malformed time"));
    }

    #[test]
    fn test_schedule_action_defaults_to_replace() {
        let request: ReplaceScheduleRequest = serde_json::from_str(r#"{"schedules": []}"#).unwrap();
        assert_eq!(request.action, ScheduleAction::Replace);

        let request: ReplaceScheduleRequest =
            serde_json::from_str(r#"{"schedules": [], "action": "append"}"#).unwrap();
        assert_eq!(request.action, ScheduleAction::Append);
    }

    #[test]
    fn test_room_alias_is_accepted() {
        let raw = r#"{"day": "Mon", "time": "10:00", "room": "3f8a6d64-7c5e-4a6e-9d2b-94be61c0a5f7"}"#;
        let entry: ScheduleEntryDto = serde_json::from_str(raw).unwrap();
        assert!(entry.room_id.is_some());
    }
}
