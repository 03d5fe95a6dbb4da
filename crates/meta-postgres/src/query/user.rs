//! User repository backing the credential store.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{NewUser, UpdateUser, User};
use crate::types::OffsetPagination;
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Aggregate user counts for the back office.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserStatistics {
    /// Number of stored users.
    pub total: i64,
    /// Number of users allowed to authenticate.
    pub active: i64,
}

/// Repository for user database operations.
pub trait UserRepository {
    /// Inserts a new user.
    ///
    /// A concurrent insert with the same email fails on
    /// `users_email_unique_idx`; callers inspect the returned error's
    /// constraint to tell that case apart.
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by its unique identifier.
    fn find_user_by_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by email.
    ///
    /// Comparison is exact, after trimming surrounding whitespace.
    fn find_user_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Checks if an email address is already registered.
    fn email_exists(&mut self, email: &str) -> impl Future<Output = PgResult<bool>> + Send;

    /// Applies a partial update. Returns `None` if the user does not exist.
    fn update_user(
        &mut self,
        user_id: Uuid,
        updates: UpdateUser,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Lists users, most recently created first.
    fn list_users(
        &mut self,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<Vec<User>>> + Send;

    /// Counts total and active users.
    fn user_statistics(&mut self) -> impl Future<Output = PgResult<UserStatistics>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, mut new_user: NewUser) -> PgResult<User> {
        use schema::users;

        new_user.email = new_user.email.trim().to_owned();
        new_user.display_name = new_user
            .display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());

        let user = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            user_id = %user.id,
            role = %user.role,
            "User created"
        );

        Ok(user)
    }

    async fn find_user_by_id(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_email(&mut self, email: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::email.eq(email.trim()))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn email_exists(&mut self, email: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        diesel::select(diesel::dsl::exists(
            users::table.filter(dsl::email.eq(email.trim())),
        ))
        .get_result(self)
        .await
        .map_err(PgError::from)
    }

    async fn update_user(&mut self, user_id: Uuid, mut updates: UpdateUser) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        // Some(None) clears, Some(Some(value)) sets, None skips
        updates.display_name = updates
            .display_name
            .map(|opt| opt.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()));
        updates.avatar_url = updates
            .avatar_url
            .map(|opt| opt.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty()));
        updates.updated_at = Some(Timestamp::now().into());

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_users(&mut self, pagination: OffsetPagination) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        users::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn user_statistics(&mut self) -> PgResult<UserStatistics> {
        use schema::users::{self, dsl};

        let total = users::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let active = users::table
            .filter(dsl::is_active.eq(true))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(UserStatistics { total, active })
    }
}
