//! Role authorization guard.
//!
//! A [`RoleGuard`] only reads the [`AuthContext`] that the authenticator
//! attached; it never resolves identity on its own. Used without the
//! authenticator in front it fails closed with `AuthenticationRequired`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use meta_postgres::model::UpdateUser;
use meta_postgres::types::UserRole;
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::AuthContext;
use crate::handler::{ErrorKind, Result};

/// Set of roles allowed through a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuard {
    allowed: &'static [UserRole],
}

impl RoleGuard {
    /// Administrators and analysts: the back office read surface.
    pub const STAFF: Self = Self::new(&[UserRole::Admin, UserRole::Analyst]);

    /// Administrators only: user management and course authoring.
    pub const ADMIN: Self = Self::new(&[UserRole::Admin]);

    /// Creates a guard for the given roles.
    pub const fn new(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }

    /// Returns the allowed roles.
    pub const fn allowed(&self) -> &'static [UserRole] {
        self.allowed
    }

    /// Passes the context through if its role is allowed.
    pub fn check<'c>(&self, context: Option<&'c AuthContext>) -> Result<&'c AuthContext> {
        let Some(context) = context else {
            tracing::error!(
                target: TRACING_TARGET_AUTHORIZATION,
                "role guard reached without an authenticated context"
            );
            return Err(ErrorKind::AuthenticationRequired.with_resource("authorization"));
        };

        if !self.allowed.contains(&context.role) {
            tracing::warn!(
                target: TRACING_TARGET_AUTHORIZATION,
                user_id = %context.id,
                role = %context.role,
                allowed = ?self.allowed,
                "insufficient permissions"
            );
            return Err(ErrorKind::InsufficientPermissions.with_resource("authorization"));
        }

        Ok(context)
    }
}

/// Middleware form of [`RoleGuard::check`].
pub async fn require_role(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> Response {
    match guard.check(request.extensions().get::<AuthContext>()) {
        Ok(_) => next.run(request).await,
        Err(error) => error.into_response(),
    }
}

/// Rejects an administrator changing their own role or deactivating
/// themselves.
pub fn forbid_self_action(
    context: &AuthContext,
    target_user_id: Uuid,
    update: &UpdateUser,
) -> Result<()> {
    if context.id != target_user_id {
        return Ok(());
    }

    let action = if update.role.is_some() {
        "role change"
    } else if update.is_active == Some(false) {
        "deactivation"
    } else {
        return Ok(());
    };

    tracing::warn!(
        target: TRACING_TARGET_AUTHORIZATION,
        user_id = %context.id,
        action,
        "self action rejected"
    );

    Err(ErrorKind::ForbiddenSelfAction
        .with_context(format!("Cannot apply a {action} to your own account"))
        .with_resource("user"))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    fn context(role: UserRole) -> AuthContext {
        AuthContext {
            id: Uuid::now_v7(),
            email: "staff@example.com".into(),
            name: None,
            role,
        }
    }

    #[test]
    fn staff_guard_admits_admin_and_analyst() {
        for role in [UserRole::Admin, UserRole::Analyst] {
            let context = context(role);
            assert!(RoleGuard::STAFF.check(Some(&context)).is_ok());
        }

        let student = context(UserRole::User);
        let error = RoleGuard::STAFF
            .check(Some(&student))
            .expect_err("students are not staff");
        assert_eq!(error.kind(), ErrorKind::InsufficientPermissions);
    }

    #[test]
    fn admin_guard_rejects_analyst() {
        let analyst = context(UserRole::Analyst);
        let error = RoleGuard::ADMIN
            .check(Some(&analyst))
            .expect_err("analysts are read-only");
        assert_eq!(error.kind(), ErrorKind::InsufficientPermissions);
    }

    #[test]
    fn missing_context_is_authentication_required() {
        let error = RoleGuard::ADMIN.check(None).expect_err("no context");
        assert_eq!(error.kind(), ErrorKind::AuthenticationRequired);
    }

    #[tokio::test]
    async fn guard_without_authenticator_fails_closed() -> anyhow::Result<()> {
        let router = Router::new()
            .route("/", get(|| async { "secret" }))
            .route_layer(from_fn_with_state(RoleGuard::STAFF, require_role));
        let server = TestServer::new(router)?;

        let response = server.get("/").await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "authentication_required");
        Ok(())
    }

    #[test]
    fn self_role_change_and_deactivation_are_forbidden() {
        let admin = context(UserRole::Admin);

        let promote = UpdateUser {
            role: Some(UserRole::Admin),
            ..UpdateUser::default()
        };
        let error = forbid_self_action(&admin, admin.id, &promote).expect_err("own role");
        assert_eq!(error.kind(), ErrorKind::ForbiddenSelfAction);

        let deactivate = UpdateUser {
            is_active: Some(false),
            ..UpdateUser::default()
        };
        let error = forbid_self_action(&admin, admin.id, &deactivate).expect_err("own account");
        assert_eq!(error.kind(), ErrorKind::ForbiddenSelfAction);

        let rename = UpdateUser {
            display_name: Some(Some("Root".into())),
            ..UpdateUser::default()
        };
        assert!(forbid_self_action(&admin, admin.id, &rename).is_ok());
        assert!(forbid_self_action(&admin, Uuid::now_v7(), &promote).is_ok());
    }
}
