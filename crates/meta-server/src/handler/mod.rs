//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Both surfaces are built by [`surface_router`] from a [`SurfaceProfile`]
//! and one shared [`ServiceState`]:
//!
//! ```rust,no_run
//! use meta_server::handler::surface_router;
//! use meta_server::middleware::SurfaceProfile;
//! use meta_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example(config: ServiceConfig) -> anyhow::Result<()> {
//! let state = ServiceState::from_config(&config).await?;
//! let public = surface_router(&SurfaceProfile::public(), state.clone())?;
//! let admin = surface_router(&SurfaceProfile::admin(), state)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod admin;
mod authentication;
mod courses;
mod enrollments;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod support_tickets;
mod users;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum_client_ip::ClientIpSource;

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::TRACING_TARGET_SURFACE;
use crate::middleware::{
    AUTH_SCOPE, GLOBAL_SCOPE, RateLimitLayerState, RouterObservabilityExt, RouterRateLimitExt,
    RouterRecoveryExt, RouterSecurityExt, SurfaceKind, SurfaceProfile,
};
use crate::service::ServiceState;

/// Generic `404` for every unknown path on either surface.
#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns the routes served by the public surface.
fn public_routes(profile: &SurfaceProfile, state: ServiceState) -> Router<ServiceState> {
    let auth_limit = profile.auth_rate_limit.map(|policy| {
        RateLimitLayerState::new(state.rate_limits.clone(), profile.kind, AUTH_SCOPE, policy)
    });

    Router::new()
        .merge(authentication::routes(state.clone(), auth_limit))
        .merge(courses::routes())
        .merge(users::routes(state.clone()))
        .merge(enrollments::routes(state.clone()))
        .merge(support_tickets::routes(state))
}

/// Returns the routes served by the admin surface.
fn admin_routes(state: ServiceState) -> Router<ServiceState> {
    admin::routes(state)
}

/// Builds the complete router for one surface.
///
/// The profile decides which routes exist and how they are protected; the
/// state is shared by both surfaces. `/health` is mounted after the
/// surface-wide rate limit so health checks never consume the budget.
///
/// Serve the result with `into_make_service_with_connect_info::<SocketAddr>()`
/// so rate limits are keyed per client address.
pub fn surface_router(profile: &SurfaceProfile, state: ServiceState) -> crate::Result<Router> {
    profile.validate()?;

    let routes = match profile.kind {
        SurfaceKind::Public => public_routes(profile, state.clone()),
        SurfaceKind::Admin => admin_routes(state.clone()),
    };

    let global_limit = RateLimitLayerState::new(
        state.rate_limits.clone(),
        profile.kind,
        GLOBAL_SCOPE,
        profile.rate_limit,
    );

    let router = routes
        .fallback(handler)
        .with_rate_limit(global_limit)
        .merge(monitors::routes(profile.kind))
        .with_state(state)
        .with_security(&profile.cors, &profile.security_headers, profile.body_limit)?
        .with_recovery(profile.request_timeout)
        .with_observability(profile.kind)
        .layer(ClientIpSource::ConnectInfo.into_extension());

    tracing::info!(
        target: TRACING_TARGET_SURFACE,
        surface = %profile.kind,
        origins = ?profile.cors.allowed_origins,
        max_requests = profile.rate_limit.max_requests,
        window_secs = profile.rate_limit.window.as_secs(),
        "surface router built"
    );

    Ok(router)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use meta_postgres::model::UpdateUser;
    use meta_postgres::types::{SubmissionStatus, UserRole};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;
    use crate::service::{IdentityStore, MemoryStore, RateLimitPolicy};

    /// Public and admin servers over one shared state.
    struct Surfaces {
        public: TestServer,
        admin: TestServer,
        state: ServiceState,
        store: MemoryStore,
    }

    fn relaxed(profile: SurfaceProfile) -> SurfaceProfile {
        let policy = RateLimitPolicy::new(Duration::from_secs(60), 1_000);
        let auth_policy = profile.auth_rate_limit.map(|_| policy);
        profile
            .with_rate_limit(policy)
            .with_auth_rate_limit(auth_policy)
    }

    fn create_surfaces_with(
        public: SurfaceProfile,
        admin: SurfaceProfile,
    ) -> anyhow::Result<Surfaces> {
        let (state, store) = ServiceState::in_memory();
        let public = TestServer::new(surface_router(&public, state.clone())?)?;
        let admin = TestServer::new(surface_router(&admin, state.clone())?)?;

        Ok(Surfaces {
            public,
            admin,
            state,
            store,
        })
    }

    fn create_surfaces() -> anyhow::Result<Surfaces> {
        create_surfaces_with(
            relaxed(SurfaceProfile::public()),
            relaxed(SurfaceProfile::admin()),
        )
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    impl Surfaces {
        /// Registers a user and returns its id and token.
        async fn register(&self, email: &str, password: &str) -> anyhow::Result<(Uuid, String)> {
            let response = self
                .public
                .post("/api/auth/register")
                .json(&json!({ "email": email, "password": password, "name": "Test" }))
                .await;
            response.assert_status(StatusCode::CREATED);

            let body: Value = response.json();
            let id = body["user"]["id"].as_str().unwrap_or_default().parse()?;
            let token = body["token"].as_str().unwrap_or_default().to_owned();
            Ok((id, token))
        }

        /// Registers a user with the given role and returns its id and token.
        async fn register_as(&self, email: &str, role: UserRole) -> anyhow::Result<(Uuid, String)> {
            let (id, token) = self.register(email, "Secret123!").await?;
            let update = UpdateUser {
                role: Some(role),
                ..UpdateUser::default()
            };
            self.state.identities.update_user(id, update).await?;
            Ok((id, token))
        }

        /// Creates a course as `admin_token` and returns its id.
        async fn create_course(&self, admin_token: &str, title: &str) -> anyhow::Result<Uuid> {
            let response = self
                .admin
                .post("/api/admin/courses")
                .authorization(bearer(admin_token))
                .json(&json!({ "title": title }))
                .await;
            response.assert_status(StatusCode::CREATED);
            let id = response.json::<Value>()["course"]["id"]
                .as_str()
                .unwrap_or_default()
                .parse()?;
            Ok(id)
        }

        /// Posts `body` to an admin route as `admin_token` and returns the new id.
        async fn create_child(
            &self,
            admin_token: &str,
            path: &str,
            key: &str,
            body: Value,
        ) -> anyhow::Result<Uuid> {
            let response = self
                .admin
                .post(path)
                .authorization(bearer(admin_token))
                .json(&body)
                .await;
            response.assert_status(StatusCode::CREATED);
            let id = response.json::<Value>()[key]["id"]
                .as_str()
                .unwrap_or_default()
                .parse()?;
            Ok(id)
        }
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        assert!(surfaces.public.is_running());
        assert!(surfaces.admin.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn login_lifecycle_ends_with_stale_identity() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (alice_id, _) = surfaces.register("alice@example.com", "Secret123!").await?;
        let (_, admin_token) = surfaces
            .register_as("root@example.com", UserRole::Admin)
            .await?;

        let response = surfaces
            .public
            .post("/api/auth/login")
            .json(&json!({ "email": "alice@example.com", "password": "Secret123!" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["user"]["id"], alice_id.to_string());
        let alice_token = body["token"].as_str().unwrap_or_default().to_owned();

        let wrong_password = surfaces
            .public
            .post("/api/auth/login")
            .json(&json!({ "email": "alice@example.com", "password": "Secret123" }))
            .await;
        wrong_password.assert_status_unauthorized();
        let unknown_email = surfaces
            .public
            .post("/api/auth/login")
            .json(&json!({ "email": "nobody@example.com", "password": "Secret123!" }))
            .await;
        unknown_email.assert_status_unauthorized();
        assert_eq!(wrong_password.text(), unknown_email.text());
        assert_eq!(wrong_password.json::<Value>()["name"], "invalid_credentials");

        surfaces
            .admin
            .put(&format!("/api/admin/users/{alice_id}"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "active": false }))
            .await
            .assert_status_ok();

        let response = surfaces
            .public
            .get("/api/auth/me")
            .authorization(bearer(&alice_token))
            .await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "stale_identity");
        Ok(())
    }

    #[tokio::test]
    async fn me_and_refresh_follow_the_live_record() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (id, token) = surfaces.register("bob@example.com", "Secret123!").await?;

        let response = surfaces
            .public
            .get("/api/auth/me")
            .authorization(bearer(&token))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["user"]["id"], id.to_string());
        assert_eq!(body["user"]["role"], "user");

        let update = UpdateUser {
            role: Some(UserRole::Analyst),
            ..UpdateUser::default()
        };
        surfaces.state.identities.update_user(id, update).await?;

        let response = surfaces
            .public
            .post("/api/auth/refresh")
            .authorization(bearer(&token))
            .await;
        response.assert_status_ok();
        let refreshed = response.json::<Value>()["token"]
            .as_str()
            .unwrap_or_default()
            .to_owned();
        let claims = surfaces.state.token_codec.verify(&refreshed)?;
        assert_eq!(claims.role, UserRole::Analyst);
        Ok(())
    }

    #[tokio::test]
    async fn registration_rejects_duplicates_and_weak_passwords() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        surfaces.register("carol@example.com", "Secret123!").await?;

        let response = surfaces
            .public
            .post("/api/auth/register")
            .json(&json!({ "email": "carol@example.com", "password": "Other456?" }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "email_taken");

        let response = surfaces
            .public
            .post("/api/auth/register")
            .json(&json!({ "email": "not-an-email", "password": "short" }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["name"], "validation_error");
        assert_eq!(body["resource"], "request");
        Ok(())
    }

    #[tokio::test]
    async fn admin_routes_check_authentication_then_role() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, user_token) = surfaces.register("user@example.com", "Secret123!").await?;
        let (user_id, _) = surfaces.register("other@example.com", "Secret123!").await?;
        let (_, analyst_token) = surfaces
            .register_as("analyst@example.com", UserRole::Analyst)
            .await?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;

        let response = surfaces.admin.get("/api/admin/stats").await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "missing_token");

        let response = surfaces
            .admin
            .get("/api/admin/stats")
            .authorization(bearer(&user_token))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["name"], "insufficient_permissions");
        assert!(!body.to_string().contains("analyst"));

        let response = surfaces
            .admin
            .get("/api/admin/stats")
            .authorization(bearer(&analyst_token))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["stats"]["totalUsers"], 4);

        let response = surfaces
            .admin
            .get("/api/admin/users")
            .authorization(bearer(&analyst_token))
            .await;
        response.assert_status_ok();
        assert!(!response.text().contains("password"));

        let response = surfaces
            .admin
            .put(&format!("/api/admin/users/{user_id}"))
            .authorization(bearer(&analyst_token))
            .json(&json!({ "name": "Renamed" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let response = surfaces
            .admin
            .put(&format!("/api/admin/users/{user_id}"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "name": "Renamed" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["user"]["name"], "Renamed");
        Ok(())
    }

    #[tokio::test]
    async fn admin_cannot_change_own_role() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (admin_id, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;

        for role in ["user", "analyst", "admin"] {
            let response = surfaces
                .admin
                .put(&format!("/api/admin/users/{admin_id}"))
                .authorization(bearer(&admin_token))
                .json(&json!({ "role": role }))
                .await;
            response.assert_status(StatusCode::FORBIDDEN);
            assert_eq!(response.json::<Value>()["name"], "forbidden_self_action");
        }

        let response = surfaces
            .admin
            .put(&format!("/api/admin/users/{admin_id}"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "active": false }))
            .await;
        assert_eq!(response.json::<Value>()["name"], "forbidden_self_action");

        let response = surfaces
            .admin
            .put(&format!("/api/admin/users/{admin_id}"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "name": "Root" }))
            .await;
        response.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn admin_user_update_edge_cases() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;

        let response = surfaces
            .admin
            .put("/api/admin/users/not-a-uuid")
            .authorization(bearer(&admin_token))
            .json(&json!({ "name": "X" }))
            .await;
        response.assert_status_bad_request();

        let response = surfaces
            .admin
            .put(&format!("/api/admin/users/{}", Uuid::now_v7()))
            .authorization(bearer(&admin_token))
            .json(&json!({ "passwordHash": "x", "email": "y@example.com" }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["context"],
            "No valid fields to update"
        );

        let response = surfaces
            .admin
            .put(&format!("/api/admin/users/{}", Uuid::now_v7()))
            .authorization(bearer(&admin_token))
            .json(&json!({ "name": "Ghost" }))
            .await;
        response.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn surfaces_do_not_share_routes() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;

        let misrouted = surfaces
            .public
            .get("/api/admin/stats")
            .authorization(bearer(&admin_token))
            .await;
        misrouted.assert_status_not_found();
        let unknown = surfaces.public.get("/api/does-not-exist").await;
        unknown.assert_status_not_found();
        assert_eq!(misrouted.text(), unknown.text());

        surfaces
            .admin
            .post("/api/auth/login")
            .json(&json!({ "email": "admin@example.com", "password": "Secret123!" }))
            .await
            .assert_status_not_found();
        surfaces.admin.get("/api/courses").await.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn health_reports_the_surface() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;

        let response = surfaces.public.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "public");

        let response = surfaces.admin.get("/health").await;
        assert_eq!(response.json::<Value>()["service"], "admin");
        let csp = response.header("content-security-policy");
        assert!(csp.to_str()?.starts_with("default-src 'none'"));
        assert_eq!(response.header("x-frame-options"), "DENY");
        Ok(())
    }

    #[tokio::test]
    async fn login_has_a_stricter_budget() -> anyhow::Result<()> {
        let public = SurfaceProfile::public()
            .with_rate_limit(RateLimitPolicy::new(Duration::from_secs(60), 1_000))
            .with_auth_rate_limit(Some(RateLimitPolicy::new(Duration::from_secs(60), 2)));
        let surfaces = create_surfaces_with(public, relaxed(SurfaceProfile::admin()))?;

        let credentials = json!({ "email": "eve@example.com", "password": "Secret123!" });
        for _ in 0..2 {
            surfaces
                .public
                .post("/api/auth/login")
                .json(&credentials)
                .await
                .assert_status_unauthorized();
        }

        let response = surfaces
            .public
            .post("/api/auth/login")
            .json(&credentials)
            .await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.json::<Value>()["resource"], "auth");

        surfaces.public.get("/api/courses").await.assert_status_ok();
        surfaces.public.get("/health").await.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn student_self_service() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;
        let (student_id, student_token) =
            surfaces.register("student@example.com", "Secret123!").await?;
        let (other_id, _) = surfaces.register("other@example.com", "Secret123!").await?;

        let response = surfaces
            .admin
            .post("/api/admin/courses")
            .authorization(bearer(&admin_token))
            .json(&json!({ "title": "Rust 101", "durationHours": 12, "price": "49.90" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let course_id = response.json::<Value>()["course"]["id"]
            .as_str()
            .unwrap_or_default()
            .to_owned();

        let response = surfaces.public.get(&format!("/api/courses/{course_id}")).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["course"]["title"], "Rust 101");
        surfaces
            .public
            .get(&format!("/api/courses/{}", Uuid::now_v7()))
            .await
            .assert_status_not_found();

        let enroll = |course: String| {
            surfaces
                .public
                .post("/api/enrollments")
                .authorization(bearer(&student_token))
                .json(&json!({ "courseId": course }))
        };
        enroll(course_id.clone()).await.assert_status(StatusCode::CREATED);
        enroll(course_id.clone()).await.assert_status(StatusCode::CONFLICT);
        enroll(Uuid::now_v7().to_string()).await.assert_status_not_found();

        let response = surfaces
            .public
            .get(&format!("/api/users/{student_id}/enrollments"))
            .authorization(bearer(&student_token))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["enrollments"][0]["course"]["title"], "Rust 101");

        let response = surfaces
            .public
            .get(&format!("/api/users/{student_id}/stats"))
            .authorization(bearer(&student_token))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["stats"]["totalEnrollments"], 1);

        let response = surfaces
            .public
            .get(&format!("/api/users/{other_id}/stats"))
            .authorization(bearer(&student_token))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["message"], "Access denied");
        Ok(())
    }

    #[tokio::test]
    async fn support_tickets_belong_to_the_caller() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (student_id, student_token) =
            surfaces.register("student@example.com", "Secret123!").await?;
        let (other_id, _) = surfaces.register("other@example.com", "Secret123!").await?;

        let response = surfaces
            .public
            .post("/api/support-tickets")
            .authorization(bearer(&student_token))
            .json(&json!({
                "subject": "Video does not load",
                "message": "Lesson 3 stays black.",
                "priority": "high",
                "userId": other_id,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["ticket"]["userId"], student_id.to_string());
        assert_eq!(body["ticket"]["status"], "open");

        let response = surfaces
            .public
            .get(&format!("/api/support-tickets/user/{student_id}"))
            .authorization(bearer(&student_token))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["tickets"][0]["priority"], "high");

        surfaces
            .public
            .get(&format!("/api/support-tickets/user/{other_id}"))
            .authorization(bearer(&student_token))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        Ok(())
    }

    #[tokio::test]
    async fn course_structure_is_authored_and_published() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;
        let course_id = surfaces.create_course(&admin_token, "Rust 101").await?;

        let second = surfaces
            .create_child(
                &admin_token,
                &format!("/api/admin/courses/{course_id}/modules"),
                "module",
                json!({ "title": "Ownership", "position": 2 }),
            )
            .await?;
        let first = surfaces
            .create_child(
                &admin_token,
                &format!("/api/admin/courses/{course_id}/modules"),
                "module",
                json!({ "title": "Getting started", "position": 1 }),
            )
            .await?;
        surfaces
            .create_child(
                &admin_token,
                &format!("/api/admin/modules/{second}/lessons"),
                "lesson",
                json!({
                    "title": "Borrowing",
                    "videoUrl": "https://videos.example.com/borrowing",
                    "durationMinutes": 15,
                }),
            )
            .await?;

        let response = surfaces
            .admin
            .get(&format!("/api/admin/courses/{course_id}/modules"))
            .authorization(bearer(&admin_token))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["modules"][0]["id"], first.to_string());
        assert_eq!(body["modules"][1]["id"], second.to_string());

        let response = surfaces.public.get(&format!("/api/courses/{course_id}")).await;
        response.assert_status_ok();
        let course = &response.json::<Value>()["course"];
        assert_eq!(course["title"], "Rust 101");
        assert_eq!(course["modules"][0]["title"], "Getting started");
        assert_eq!(course["modules"][0]["lessons"], json!([]));
        assert_eq!(course["modules"][1]["lessons"][0]["title"], "Borrowing");
        assert_eq!(course["modules"][1]["lessons"][0]["durationMinutes"], 15);
        Ok(())
    }

    #[tokio::test]
    async fn course_structure_requires_existing_parents() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;
        let unknown = Uuid::now_v7();

        let response = surfaces
            .admin
            .post(&format!("/api/admin/courses/{unknown}/modules"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "title": "Orphan" }))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["resource"], "course");

        let response = surfaces
            .admin
            .post(&format!("/api/admin/modules/{unknown}/lessons"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "title": "Orphan" }))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["resource"], "module");

        surfaces
            .admin
            .post(&format!("/api/admin/courses/{unknown}/assessments"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "title": "Final exam", "type": "exam" }))
            .await
            .assert_status_not_found();

        for path in ["modules", "analytics"] {
            surfaces
                .admin
                .get(&format!("/api/admin/courses/{unknown}/{path}"))
                .authorization(bearer(&admin_token))
                .await
                .assert_status_not_found();
        }
        Ok(())
    }

    #[tokio::test]
    async fn analysts_read_course_structure_but_cannot_author_it() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;
        let (_, analyst_token) = surfaces
            .register_as("analyst@example.com", UserRole::Analyst)
            .await?;
        let (_, user_token) = surfaces.register("user@example.com", "Secret123!").await?;
        let course_id = surfaces.create_course(&admin_token, "Rust 101").await?;

        for path in ["modules", "analytics"] {
            let path = format!("/api/admin/courses/{course_id}/{path}");
            surfaces
                .admin
                .get(&path)
                .authorization(bearer(&analyst_token))
                .await
                .assert_status_ok();
            surfaces
                .admin
                .get(&path)
                .authorization(bearer(&user_token))
                .await
                .assert_status(StatusCode::FORBIDDEN);
        }

        let writes = [
            (format!("/api/admin/courses/{course_id}/modules"), json!({ "title": "Intro" })),
            (format!("/api/admin/courses/{course_id}/assessments"), json!({ "title": "Quiz" })),
            (format!("/api/admin/modules/{}/lessons", Uuid::now_v7()), json!({ "title": "A" })),
        ];
        for (path, body) in writes {
            surfaces
                .admin
                .post(&path)
                .authorization(bearer(&analyst_token))
                .json(&body)
                .await
                .assert_status(StatusCode::FORBIDDEN);
        }
        Ok(())
    }

    #[tokio::test]
    async fn course_analytics_summarise_enrollments_and_grading() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;
        let (student_id, student_token) =
            surfaces.register("student@example.com", "Secret123!").await?;
        let course_id = surfaces.create_course(&admin_token, "Rust 101").await?;

        let module_id = surfaces
            .create_child(
                &admin_token,
                &format!("/api/admin/courses/{course_id}/modules"),
                "module",
                json!({ "title": "Ownership" }),
            )
            .await?;
        for title in ["Moves", "Borrows"] {
            surfaces
                .create_child(
                    &admin_token,
                    &format!("/api/admin/modules/{module_id}/lessons"),
                    "lesson",
                    json!({ "title": title }),
                )
                .await?;
        }
        let quiz = surfaces
            .create_child(
                &admin_token,
                &format!("/api/admin/courses/{course_id}/assessments"),
                "assessment",
                json!({ "title": "Ownership quiz" }),
            )
            .await?;
        let exam = surfaces
            .create_child(
                &admin_token,
                &format!("/api/admin/courses/{course_id}/assessments"),
                "assessment",
                json!({ "title": "Final exam", "type": "exam", "maxScore": 200 }),
            )
            .await?;

        surfaces
            .public
            .post("/api/enrollments")
            .authorization(bearer(&student_token))
            .json(&json!({ "courseId": course_id }))
            .await
            .assert_status(StatusCode::CREATED);
        surfaces
            .store
            .record_submission(student_id, quiz, SubmissionStatus::Graded, Some(80));
        surfaces
            .store
            .record_submission(student_id, exam, SubmissionStatus::Submitted, None);

        let response = surfaces
            .admin
            .get(&format!("/api/admin/courses/{course_id}/analytics"))
            .authorization(bearer(&admin_token))
            .await;
        response.assert_status_ok();
        let analytics = &response.json::<Value>()["analytics"];
        assert_eq!(analytics["courseId"], course_id.to_string());
        assert_eq!(analytics["totalEnrollments"], 1);
        assert_eq!(analytics["activeEnrollments"], 1);
        assert_eq!(analytics["totalModules"], 1);
        assert_eq!(analytics["totalLessons"], 2);
        assert_eq!(analytics["totalAssessments"], 2);
        assert_eq!(analytics["totalSubmissions"], 2);
        assert_eq!(analytics["gradedSubmissions"], 1);
        assert_eq!(analytics["averageScore"], 80.0);
        Ok(())
    }

    #[tokio::test]
    async fn user_assessments_belong_to_the_caller() -> anyhow::Result<()> {
        let surfaces = create_surfaces()?;
        let (_, admin_token) = surfaces
            .register_as("admin@example.com", UserRole::Admin)
            .await?;
        let (student_id, student_token) =
            surfaces.register("student@example.com", "Secret123!").await?;
        let (other_id, _) = surfaces.register("other@example.com", "Secret123!").await?;
        let course_id = surfaces.create_course(&admin_token, "Rust 101").await?;

        let response = surfaces
            .admin
            .post(&format!("/api/admin/courses/{course_id}/assessments"))
            .authorization(bearer(&admin_token))
            .json(&json!({ "title": "Final exam", "type": "exam", "maxScore": 200 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["assessment"]["type"], "exam");
        assert_eq!(body["assessment"]["maxScore"], 200);
        let exam: Uuid = body["assessment"]["id"].as_str().unwrap_or_default().parse()?;

        surfaces
            .store
            .record_submission(student_id, exam, SubmissionStatus::Graded, Some(150));

        let response = surfaces
            .public
            .get(&format!("/api/users/{student_id}/assessments"))
            .authorization(bearer(&student_token))
            .await;
        response.assert_status_ok();
        let entry = &response.json::<Value>()["assessments"][0];
        assert_eq!(entry["assessmentId"], exam.to_string());
        assert_eq!(entry["courseTitle"], "Rust 101");
        assert_eq!(entry["status"], "graded");
        assert_eq!(entry["score"], 150);
        assert_eq!(entry["maxScore"], 200);

        let response = surfaces
            .public
            .get(&format!("/api/users/{student_id}/stats"))
            .authorization(bearer(&student_token))
            .await;
        response.assert_status_ok();
        let stats = &response.json::<Value>()["stats"];
        assert_eq!(stats["totalAssessments"], 1);
        assert_eq!(stats["gradedAssessments"], 1);
        assert_eq!(stats["averageScore"], 150.0);

        surfaces
            .public
            .get(&format!("/api/users/{other_id}/assessments"))
            .authorization(bearer(&student_token))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        surfaces
            .public
            .get(&format!("/api/users/{student_id}/assessments"))
            .await
            .assert_status_unauthorized();
        Ok(())
    }
}
