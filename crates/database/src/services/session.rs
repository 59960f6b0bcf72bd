use crate::entities::{sessions, users};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub struct SessionService;

impl SessionService {
    /// Digest stored for and compared against user credentials.
    pub fn digest_password(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Verifies credentials and mints a new session.
    ///
    /// Returns `None` when the email is unknown or the password does not
    /// match; the two cases are indistinguishable to the caller.
    pub async fn login<C: ConnectionTrait>(
        db: &C,
        email: &str,
        password: &str,
        ttl_minutes: i64,
    ) -> Result<Option<(users::Model, sessions::Model)>, DbErr> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?;
        let Some(user) = user else {
            return Ok(None);
        };
        if user.password_digest != Self::digest_password(password) {
            return Ok(None);
        }

        let now = Utc::now().naive_utc();
        let session = sessions::Model {
            id: Uuid::new_v4(),
            user_id: user.id,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        };
        sessions::Entity::insert(sessions::ActiveModel {
            id: Set(session.id),
            user_id: Set(session.user_id),
            created_at: Set(session.created_at),
            expires_at: Set(session.expires_at),
        })
        .exec_without_returning(db)
        .await?;

        Ok(Some((user, session)))
    }

    /// Resolves a bearer token to its user, ignoring expired sessions.
    pub async fn resolve<C: ConnectionTrait>(
        db: &C,
        token: Uuid,
    ) -> Result<Option<users::Model>, DbErr> {
        let now = Utc::now().naive_utc();
        let session = sessions::Entity::find_by_id(token)
            .filter(sessions::Column::ExpiresAt.gt(now))
            .one(db)
            .await?;
        let Some(session) = session else {
            return Ok(None);
        };
        users::Entity::find_by_id(session.user_id).one(db).await
    }

    /// Revokes a session token. Revoking an unknown token is not an error.
    pub async fn logout<C: ConnectionTrait>(db: &C, token: Uuid) -> Result<(), DbErr> {
        sessions::Entity::delete_by_id(token).exec(db).await?;
        Ok(())
    }
}
