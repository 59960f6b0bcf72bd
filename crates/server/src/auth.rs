use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use database::services::session::SessionService;
use models::role::Role;
use uuid::Uuid;

/// Authenticated caller, attached to the request by [`authenticate`].
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub token: Uuid,
}

/// Capability list applied as a route layer.
///
/// Handlers never branch on roles themselves; each route group declares the
/// roles it admits and the policy rejects everyone else uniformly.
#[derive(Clone, Copy, Debug)]
pub struct RolePolicy {
    allowed: &'static [Role],
}

impl RolePolicy {
    pub const ADMIN_ONLY: Self = Self {
        allowed: &[Role::Admin],
    };
    pub const STAFF: Self = Self {
        allowed: &[Role::Admin, Role::Teacher],
    };
    pub const ANY_ROLE: Self = Self {
        allowed: &[Role::Admin, Role::Teacher, Role::Student, Role::Parent],
    };

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

/// Resolves the bearer session token into a [`CurrentUser`] extension.
///
/// Missing, malformed, expired, or unknown tokens all surface as 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(ApiError::Unauthorized)?;
    let user = SessionService::resolve(&state.db, token)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    let role = user
        .role
        .parse::<Role>()
        .map_err(|_| ApiError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        name: user.name,
        role,
        token,
    });
    Ok(next.run(request).await)
}

/// Rejects callers whose role is outside the policy's capability list.
pub async fn enforce(
    policy: RolePolicy,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(ApiError::Unauthorized)?;
    if !policy.allows(user.role) {
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod test {
    use super::{RolePolicy, bearer_token};
    use axum::http::{HeaderMap, HeaderValue, header};
    use models::role::Role;
    use uuid::Uuid;

    #[test]
    fn test_policy_capability_lists() {
        assert!(RolePolicy::ADMIN_ONLY.allows(Role::Admin));
        assert!(!RolePolicy::ADMIN_ONLY.allows(Role::Teacher));
        assert!(RolePolicy::STAFF.allows(Role::Teacher));
        assert!(!RolePolicy::STAFF.allows(Role::Student));
        assert!(RolePolicy::ANY_ROLE.allows(Role::Parent));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let token = Uuid::new_v4();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some(token));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&token.to_string()).unwrap(),
        );
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-uuid"),
        );
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
