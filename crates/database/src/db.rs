use sea_orm::{Database, DatabaseConnection, DbErr};

/// Creates a database connection from `DATABASE_URL`
pub async fn create_connection() -> Result<DatabaseConnection, DbErr> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL is not set".to_owned()))?;
    Database::connect(url).await
}
