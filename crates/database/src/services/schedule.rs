use crate::entities::{class_schedules, classes, rooms};
use chrono::Utc;
use models::conflict::{
    CandidateSlot, ConflictKind, ConflictReport, ScheduleConflict, UNKNOWN_NAME,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Error returned by the conflict checker.
#[derive(Debug)]
pub enum ConflictCheckError {
    /// The candidate set failed validation; no query was issued.
    InvalidInput(&'static str),
    Db(DbErr),
}

impl fmt::Display for ConflictCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictCheckError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ConflictCheckError::Db(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for ConflictCheckError {}

impl From<DbErr> for ConflictCheckError {
    fn from(err: DbErr) -> Self {
        ConflictCheckError::Db(err)
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Checks a draft schedule against every persisted slot.
    ///
    /// Each candidate is evaluated independently on up to two dimensions:
    /// the room dimension when the candidate names a room, and the teacher
    /// dimension when a teacher id is given. `exclude_class_id` removes the
    /// class being edited from the search so an unchanged slot never
    /// conflicts with itself. Read-only; conflicts are a successful result.
    pub async fn check_conflicts<C: ConnectionTrait>(
        db: &C,
        candidates: &[CandidateSlot],
        exclude_class_id: Option<Uuid>,
        teacher_id: Option<Uuid>,
    ) -> Result<ConflictReport, ConflictCheckError> {
        if candidates.is_empty() {
            return Err(ConflictCheckError::InvalidInput(
                "candidate schedule list is empty",
            ));
        }

        // The teacher's classes are the same for every candidate slot, so
        // resolve them once up front.
        let teacher_class_ids: Vec<Uuid> = match teacher_id {
            Some(teacher_id) => {
                let mut query =
                    classes::Entity::find().filter(classes::Column::TeacherId.eq(teacher_id));
                if let Some(exclude) = exclude_class_id {
                    query = query.filter(classes::Column::Id.ne(exclude));
                }
                query.all(db).await?.into_iter().map(|c| c.id).collect()
            }
            None => Vec::new(),
        };

        // (kind, candidate index, occupying slot), in detection order.
        let mut pending: Vec<(ConflictKind, usize, class_schedules::Model)> = Vec::new();

        for (idx, slot) in candidates.iter().enumerate() {
            if let Some(room_id) = slot.room_id {
                let mut query = class_schedules::Entity::find()
                    .filter(class_schedules::Column::Weekday.eq(slot.weekday.to_index()))
                    .filter(class_schedules::Column::StartTime.eq(slot.start_time))
                    .filter(class_schedules::Column::RoomId.eq(room_id));
                if let Some(exclude) = exclude_class_id {
                    query = query.filter(class_schedules::Column::ClassId.ne(exclude));
                }
                // One representative conflict per slot; no tie-break is
                // defined among multiple occupants.
                if let Some(hit) = query.all(db).await?.into_iter().next() {
                    pending.push((ConflictKind::Room, idx, hit));
                }
            }

            if teacher_id.is_some() && !teacher_class_ids.is_empty() {
                let matches = class_schedules::Entity::find()
                    .filter(class_schedules::Column::Weekday.eq(slot.weekday.to_index()))
                    .filter(class_schedules::Column::StartTime.eq(slot.start_time))
                    .filter(
                        class_schedules::Column::ClassId
                            .is_in(teacher_class_ids.iter().copied()),
                    )
                    .all(db)
                    .await?;

                // One conflict per distinct class the teacher already
                // occupies at this day and time.
                let mut seen = HashSet::new();
                for hit in matches {
                    if seen.insert(hit.class_id) {
                        pending.push((ConflictKind::Teacher, idx, hit));
                    }
                }
            }
        }

        if pending.is_empty() {
            return Ok(ConflictReport::default());
        }

        let class_names =
            Self::class_names(db, pending.iter().map(|(_, _, hit)| hit.class_id)).await?;

        // Rooms are only fetched for conflicts whose candidate did not
        // carry a display name.
        let lookup_rooms: Vec<Uuid> = pending
            .iter()
            .filter_map(|(_, idx, _)| {
                let slot = &candidates[*idx];
                match slot.room_name {
                    None => slot.room_id,
                    Some(_) => None,
                }
            })
            .collect();
        let room_names = Self::room_names(db, lookup_rooms).await?;

        let mut conflicts = Vec::with_capacity(pending.len());
        for (kind, idx, hit) in pending {
            let slot = &candidates[idx];
            let room_name = slot
                .room_name
                .clone()
                .or_else(|| slot.room_id.and_then(|id| room_names.get(&id).cloned()));

            conflicts.push(ScheduleConflict {
                kind,
                weekday: slot.weekday,
                start_time: slot.start_time,
                room_id: slot.room_id,
                room_name,
                class_id: Some(hit.class_id),
                class_name: class_names
                    .get(&hit.class_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            });
        }

        Ok(ConflictReport { conflicts })
    }

    /// Replaces a class's full weekly schedule.
    ///
    /// Delete and recreate run in one transaction so a failure mid-way
    /// never leaves the class without its previous slots.
    pub async fn replace_class_schedule(
        db: &DatabaseConnection,
        class_id: Uuid,
        slots: &[CandidateSlot],
    ) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        class_schedules::Entity::delete_many()
            .filter(class_schedules::Column::ClassId.eq(class_id))
            .exec(&txn)
            .await?;
        Self::insert_slots(&txn, class_id, slots).await?;

        txn.commit().await
    }

    /// Adds slots to a class's schedule without touching existing ones.
    pub async fn append_class_schedule(
        db: &DatabaseConnection,
        class_id: Uuid,
        slots: &[CandidateSlot],
    ) -> Result<(), DbErr> {
        Self::insert_slots(db, class_id, slots).await
    }

    /// Lists a class's slots ordered by weekday then start time.
    pub async fn schedules_for_class(
        db: &DatabaseConnection,
        class_id: Uuid,
    ) -> Result<Vec<class_schedules::Model>, DbErr> {
        class_schedules::Entity::find()
            .filter(class_schedules::Column::ClassId.eq(class_id))
            .order_by_asc(class_schedules::Column::Weekday)
            .order_by_asc(class_schedules::Column::StartTime)
            .all(db)
            .await
    }

    async fn insert_slots<C: ConnectionTrait>(
        db: &C,
        class_id: Uuid,
        slots: &[CandidateSlot],
    ) -> Result<(), DbErr> {
        if slots.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let rows = slots.iter().map(|slot| class_schedules::ActiveModel {
            id: Set(Uuid::new_v4()),
            class_id: Set(class_id),
            weekday: Set(slot.weekday.to_index()),
            start_time: Set(slot.start_time),
            room_id: Set(slot.room_id),
            created_at: Set(now),
        });

        class_schedules::Entity::insert_many(rows)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    async fn class_names<C: ConnectionTrait>(
        db: &C,
        ids: impl Iterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, String>, DbErr> {
        let unique: Vec<Uuid> = ids.collect::<HashSet<_>>().into_iter().collect();
        let found = classes::Entity::find()
            .filter(classes::Column::Id.is_in(unique))
            .all(db)
            .await?;
        Ok(found.into_iter().map(|c| (c.id, c.name)).collect())
    }

    async fn room_names<C: ConnectionTrait>(
        db: &C,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let unique: Vec<Uuid> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
        let found = rooms::Entity::find()
            .filter(rooms::Column::Id.is_in(unique))
            .all(db)
            .await?;
        Ok(found.into_iter().map(|r| (r.id, r.name)).collect())
    }
}

#[cfg(test)]
mod test {
    use super::{ConflictCheckError, ScheduleService};
    use crate::entities::{class_schedules, classes, rooms};
    use chrono::NaiveTime;
    use models::conflict::{CandidateSlot, ConflictKind};
    use models::weekday::Weekday;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn ten_am() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn now() -> chrono::NaiveDateTime {
        chrono::Utc::now().naive_utc()
    }

    fn candidate(room_id: Option<Uuid>, room_name: Option<&str>) -> CandidateSlot {
        CandidateSlot {
            weekday: Weekday::Monday,
            start_time: ten_am(),
            room_id,
            room_name: room_name.map(str::to_owned),
        }
    }

    fn persisted_slot(class_id: Uuid, room_id: Option<Uuid>) -> class_schedules::Model {
        class_schedules::Model {
            id: Uuid::new_v4(),
            class_id,
            weekday: Weekday::Monday.to_index(),
            start_time: ten_am(),
            room_id,
            created_at: now(),
        }
    }

    fn class_row(id: Uuid, name: &str, teacher_id: Uuid) -> classes::Model {
        classes::Model {
            id,
            name: name.to_owned(),
            teacher_id,
            capacity: 20,
            created_at: now(),
        }
    }

    #[tokio::test]
    async fn empty_candidate_list_is_rejected_before_any_query() {
        let db: DatabaseConnection =
            MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = ScheduleService::check_conflicts(&db, &[], None, None).await;
        assert!(matches!(result, Err(ConflictCheckError::InvalidInput(_))));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn slot_without_room_or_teacher_checks_no_dimension() {
        let db: DatabaseConnection =
            MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let report = ScheduleService::check_conflicts(&db, &[candidate(None, None)], None, None)
            .await
            .unwrap();
        assert!(!report.has_conflicts());
        assert!(report.conflicts.is_empty());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn room_conflict_is_attributed_to_the_occupying_class() {
        let room = Uuid::new_v4();
        let class_c1 = Uuid::new_v4();
        let editing = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![persisted_slot(class_c1, Some(room))]])
            .append_query_results([vec![class_row(class_c1, "Algebra I", Uuid::new_v4())]])
            .into_connection();

        let report = ScheduleService::check_conflicts(
            &db,
            &[candidate(Some(room), Some("Room 1"))],
            Some(editing),
            None,
        )
        .await
        .unwrap();

        assert!(report.has_conflicts());
        assert_eq!(report.conflicts.len(), 1);
        let conflict = &report.conflicts[0];
        assert_eq!(conflict.kind, ConflictKind::Room);
        assert_eq!(conflict.weekday, Weekday::Monday);
        assert_eq!(conflict.start_time, ten_am());
        assert_eq!(conflict.room_id, Some(room));
        assert_eq!(conflict.room_name.as_deref(), Some("Room 1"));
        assert_eq!(conflict.class_id, Some(class_c1));
        assert_eq!(conflict.class_name, "Algebra I");
    }

    #[tokio::test]
    async fn editing_an_unchanged_slot_yields_no_self_conflict() {
        // The store already filters out the excluded class, so the room
        // query comes back empty when a class keeps its own slot.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<class_schedules::Model>::new()])
            .into_connection();

        let report = ScheduleService::check_conflicts(
            &db,
            &[candidate(Some(Uuid::new_v4()), Some("Room 1"))],
            Some(Uuid::new_v4()),
            None,
        )
        .await
        .unwrap();

        assert!(!report.has_conflicts());
        assert!(report.conflicts.is_empty());
    }

    #[tokio::test]
    async fn teacher_dimension_reports_each_overlapping_class_once() {
        let teacher = Uuid::new_v4();
        let class_c1 = Uuid::new_v4();
        let class_c3 = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // classes taught by the teacher
            .append_query_results([vec![
                class_row(class_c1, "Algebra I", teacher),
                class_row(class_c3, "Geometry", teacher),
            ]])
            // occupied slots at the candidate's day and time; C1 twice
            .append_query_results([vec![
                persisted_slot(class_c1, None),
                persisted_slot(class_c1, None),
                persisted_slot(class_c3, None),
            ]])
            // conflicting class names
            .append_query_results([vec![
                class_row(class_c1, "Algebra I", teacher),
                class_row(class_c3, "Geometry", teacher),
            ]])
            .into_connection();

        let report =
            ScheduleService::check_conflicts(&db, &[candidate(None, None)], None, Some(teacher))
                .await
                .unwrap();

        assert_eq!(report.conflicts.len(), 2);
        assert!(report
            .conflicts
            .iter()
            .all(|c| c.kind == ConflictKind::Teacher));
        assert_eq!(report.conflicts[0].class_name, "Algebra I");
        assert_eq!(report.conflicts[1].class_name, "Geometry");
    }

    #[tokio::test]
    async fn teacher_without_other_classes_skips_the_dimension() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<classes::Model>::new()])
            .into_connection();

        let report = ScheduleService::check_conflicts(
            &db,
            &[candidate(None, None)],
            None,
            Some(Uuid::new_v4()),
        )
        .await
        .unwrap();

        assert!(!report.has_conflicts());
        // only the teacher-classes lookup ran
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn room_name_falls_back_to_the_store() {
        let room = Uuid::new_v4();
        let class_c1 = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![persisted_slot(class_c1, Some(room))]])
            .append_query_results([vec![class_row(class_c1, "Algebra I", Uuid::new_v4())]])
            .append_query_results([vec![rooms::Model {
                id: room,
                name: "Room 1".to_owned(),
                created_at: now(),
            }]])
            .into_connection();

        let report =
            ScheduleService::check_conflicts(&db, &[candidate(Some(room), None)], None, None)
                .await
                .unwrap();

        assert_eq!(report.conflicts[0].room_name.as_deref(), Some("Room 1"));
    }

    #[tokio::test]
    async fn missing_class_row_uses_placeholder_name() {
        let room = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![persisted_slot(Uuid::new_v4(), Some(room))]])
            .append_query_results([Vec::<classes::Model>::new()])
            .into_connection();

        let report = ScheduleService::check_conflicts(
            &db,
            &[candidate(Some(room), Some("Room 1"))],
            None,
            None,
        )
        .await
        .unwrap();

        assert_eq!(report.conflicts[0].class_name, "Unknown");
    }

    #[tokio::test]
    async fn identical_inputs_produce_identical_reports() {
        let room = Uuid::new_v4();
        let class_c1 = Uuid::new_v4();
        let teacher = Uuid::new_v4();

        let mock = || {
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![persisted_slot(class_c1, Some(room))]])
                .append_query_results([vec![class_row(class_c1, "Algebra I", teacher)]])
                .into_connection()
        };

        let candidates = [candidate(Some(room), Some("Room 1"))];
        let first = ScheduleService::check_conflicts(&mock(), &candidates, None, None)
            .await
            .unwrap();
        let second = ScheduleService::check_conflicts(&mock(), &candidates, None, None)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn replace_deletes_then_inserts_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let result = ScheduleService::replace_class_schedule(
            &db,
            Uuid::new_v4(),
            &[candidate(Some(Uuid::new_v4()), None)],
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn replace_with_empty_set_clears_the_schedule() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        let result = ScheduleService::replace_class_schedule(&db, Uuid::new_v4(), &[]).await;
        assert!(result.is_ok());
    }
}
