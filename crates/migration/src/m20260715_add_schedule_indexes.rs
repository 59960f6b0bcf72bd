use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Room-dimension lookup, and the backstop for the check-then-write
        // race: Postgres treats NULL room ids as distinct, so unassigned
        // slots are unconstrained while a non-null (weekday, time, room)
        // triple can only be booked once.
        manager
            .create_index(
                Index::create()
                    .name("uq_class_schedules_room_slot")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::Weekday)
                    .col(ClassSchedules::StartTime)
                    .col(ClassSchedules::RoomId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Teacher-dimension lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_class_schedules_slot_class")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::Weekday)
                    .col(ClassSchedules::StartTime)
                    .col(ClassSchedules::ClassId)
                    .to_owned(),
            )
            .await?;

        // Index on class_schedules.class_id for per-class listing and
        // wholesale replacement
        manager
            .create_index(
                Index::create()
                    .name("idx_class_schedules_class_id")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::ClassId)
                    .to_owned(),
            )
            .await?;

        // Index on classes.teacher_id for resolving a teacher's classes
        manager
            .create_index(
                Index::create()
                    .name("idx_classes_teacher_id")
                    .table(Classes::Table)
                    .col(Classes::TeacherId)
                    .to_owned(),
            )
            .await?;

        // Index on sessions.user_id for revocation sweeps
        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_user_id")
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_class_schedules_room_slot")
                    .table(ClassSchedules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_slot_class")
                    .table(ClassSchedules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_class_id")
                    .table(ClassSchedules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_classes_teacher_id")
                    .table(Classes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sessions_user_id")
                    .table(Sessions::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ClassSchedules {
    Table,
    ClassId,
    Weekday,
    StartTime,
    RoomId,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    TeacherId,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    UserId,
}
