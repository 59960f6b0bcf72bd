use crate::routes::{auth, conflicts, health, schedules};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "session",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("opaque session token")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        auth::login,
        auth::logout,
        auth::me,
        conflicts::admin_check_conflicts,
        conflicts::teacher_check_conflicts,
        schedules::list_class_schedules,
        schedules::replace_class_schedules
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session management endpoints"),
        (name = "Scheduling", description = "Schedule and conflict-check endpoints"),
        (name = "Health", description = "Liveness endpoints"),
    ),
    info(
        title = "Tuition Center API",
        version = "1.0.0",
        description = "Tuition-center scheduling backend",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
