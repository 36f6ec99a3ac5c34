use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserUpdate};
use async_trait::async_trait;

/// Trait for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn insert(&self, user: User) -> Result<User>;
    async fn update(&self, user: User) -> Result<User>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    /// Lookup for credential verification; `None` when the email is unknown.
    fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User>;
}
