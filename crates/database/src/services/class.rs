use crate::entities::classes;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct ClassService;

impl ClassService {
    pub async fn get_class<C: ConnectionTrait>(
        db: &C,
        class_id: Uuid,
    ) -> Result<Option<classes::Model>, DbErr> {
        classes::Entity::find_by_id(class_id).one(db).await
    }
}
