use crate::entities::activity_logs;
use chrono::Utc;
use log::warn;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait};
use uuid::Uuid;

pub struct ActivityService;

impl ActivityService {
    /// Records an audit entry. Best-effort: failures are logged and
    /// swallowed so they can never block the primary operation.
    pub async fn record<C: ConnectionTrait>(
        db: &C,
        user_id: Option<Uuid>,
        action: &str,
        detail: serde_json::Value,
    ) {
        let row = activity_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            action: Set(action.to_owned()),
            detail: Set(detail),
            created_at: Set(Utc::now().naive_utc()),
        };

        if let Err(err) = activity_logs::Entity::insert(row)
            .exec_without_returning(db)
            .await
        {
            warn!("failed to record activity '{action}': {err}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::ActivityService;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    #[tokio::test]
    async fn record_writes_one_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        ActivityService::record(&db, None, "session.login", json!({"email": "x"})).await;
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
