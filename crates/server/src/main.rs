use database::db::create_connection;
use log::info;
use server::routes::build_router;
use server::state::AppState;
use server::utils::shutdown::shutdown_signal;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = create_connection()
        .await
        .expect("failed to connect to database");
    let state = AppState::new(db);
    let app = build_router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Running axum on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
