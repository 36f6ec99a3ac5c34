//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fitfolio_core::users::User;

/// Database model for user accounts.
#[derive(
    Insertable, Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            username: db.username,
            full_name: db.full_name,
            bio: db.bio,
            password_hash: db.password_hash,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<User> for UserDB {
    fn from(domain: User) -> Self {
        Self {
            id: domain.id,
            email: domain.email,
            username: domain.username,
            full_name: domain.full_name,
            bio: domain.bio,
            password_hash: domain.password_hash,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
