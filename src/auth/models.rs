use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User row as stored in `users`. Deliberately not `Serialize`: responses go
/// through [`crate::auth::dto::PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string
    pub created_at: OffsetDateTime,
}

/// Validated input for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
