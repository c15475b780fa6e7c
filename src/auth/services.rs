use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{
    dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
    errors::AuthError,
    jwt::JwtKeys,
    models::NewUser,
    password::{hash_password, verify_password},
    repo::{RepoError, UserRepo},
};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_FIELD_LEN: usize = 100;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    email.len() <= MAX_FIELD_LEN && EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(users: &dyn UserRepo, req: RegisterRequest) -> Result<(), AuthError> {
    let name = req.name.trim().to_string();
    let email = normalize_email(&req.email);

    if name.is_empty() || name.chars().count() > MAX_FIELD_LEN {
        warn!("invalid name");
        return Err(AuthError::BadRequest("Invalid name"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AuthError::BadRequest("Invalid email"));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AuthError::BadRequest("Password too short"));
    }

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AuthError::Conflict);
    }

    let password_hash = hash_password(&req.password)?;
    let user = users
        .create(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            RepoError::EmailTaken => AuthError::Conflict,
            RepoError::Database(e) => AuthError::Internal(e),
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(())
}

pub async fn login(
    users: &dyn UserRepo,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<LoginResponse, AuthError> {
    let email = normalize_email(&req.email);

    let Some(user) = users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    let access_token = keys.sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
        access_token,
        user: PublicUser::from(user),
    })
}

pub async fn profile(users: &dyn UserRepo, user_id: Uuid) -> Result<PublicUser, AuthError> {
    users
        .find_by_id(user_id)
        .await?
        .map(PublicUser::from)
        .ok_or(AuthError::Unauthorized("User not found"))
}
