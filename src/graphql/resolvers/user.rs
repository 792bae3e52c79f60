use crate::auth::PasswordHasher;
use crate::constants::{
    INCORRECT_PASSWORD, MIN_CREDENTIAL_LEN, PASSWORD_FIELD, PASSWORD_TOO_SHORT, USERNAME_FIELD,
    USERNAME_NOT_FOUND, USERNAME_TAKEN, USERNAME_TOO_SHORT,
};
use crate::domain::User as DomainUser;
use crate::error::AppError;
use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{UserResponse, UsernamePasswordInput};
use crate::metrics;
use async_graphql::{Context, FieldResult, Object};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lengths are counted in UTF-16 code units, as web clients count them
fn too_short(value: &str) -> bool {
    value.encode_utf16().count() <= MIN_CREDENTIAL_LEN
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create an account
    async fn register(
        &self,
        ctx: &Context<'_>,
        options: UsernamePasswordInput,
    ) -> FieldResult<UserResponse> {
        let context = ctx.data::<GraphQLContext>()?;
        let hasher = ctx.data::<Arc<dyn PasswordHasher>>()?.clone();

        if too_short(&options.username) {
            metrics::users::registration_rejected(USERNAME_FIELD);
            return Ok(UserResponse::field_error(USERNAME_FIELD, USERNAME_TOO_SHORT));
        }

        // Hashing is CPU-bound; run it on the blocking pool
        let password = options.password.clone();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(AppError::from)??;

        let mut user = DomainUser::new(options.username, hashed);
        match context.storage.create_user(&mut user).await {
            Ok(()) => {}
            Err(e) if e.is_unique_violation() => {
                debug!(username = %user.username, "Registration rejected, username taken");
                metrics::users::registration_rejected(USERNAME_FIELD);
                return Ok(UserResponse::field_error(USERNAME_FIELD, USERNAME_TAKEN));
            }
            Err(e) => return Err(e.into()),
        }

        // Checked after the insert: a short password still leaves the account persisted
        if too_short(&options.password) {
            warn!(
                user_id = ?user.id,
                "Password too short, but the user was already persisted"
            );
            metrics::users::registration_rejected(PASSWORD_FIELD);
            return Ok(UserResponse::field_error(PASSWORD_FIELD, PASSWORD_TOO_SHORT));
        }

        info!(user_id = ?user.id, username = %user.username, "Registered user");
        metrics::users::registered();
        Ok(UserResponse::with_user(user))
    }

    /// Check credentials and return the matching user
    async fn login(
        &self,
        ctx: &Context<'_>,
        options: UsernamePasswordInput,
    ) -> FieldResult<UserResponse> {
        let context = ctx.data::<GraphQLContext>()?;
        let hasher = ctx.data::<Arc<dyn PasswordHasher>>()?.clone();

        let Some(user) = context
            .storage
            .get_user_by_username(&options.username)
            .await?
        else {
            metrics::users::login_failed(USERNAME_FIELD);
            return Ok(UserResponse::field_error(USERNAME_FIELD, USERNAME_NOT_FOUND));
        };

        let stored = user.password.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&stored, &options.password))
            .await
            .map_err(AppError::from)??;

        if !valid {
            debug!(username = %user.username, "Login rejected, incorrect password");
            metrics::users::login_failed(PASSWORD_FIELD);
            return Ok(UserResponse::field_error(PASSWORD_FIELD, INCORRECT_PASSWORD));
        }

        info!(user_id = ?user.id, "User logged in");
        metrics::users::login_succeeded();
        Ok(UserResponse::with_user(user))
    }
}
