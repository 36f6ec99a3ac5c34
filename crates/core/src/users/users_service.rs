use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};

use super::users_model::{NewUser, User, UserUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

fn validate_new_user(new_user: &NewUser) -> Result<()> {
    if new_user.username.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "username".to_string(),
        )));
    }
    if new_user.email.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "email".to_string(),
        )));
    }
    if !new_user.email.contains('@') {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "'{}' is not a valid email address",
            new_user.email
        ))));
    }
    Ok(())
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        validate_new_user(&new_user)?;

        if self.repository.find_by_email(&new_user.email)?.is_some() {
            return Err(Error::Validation(ValidationError::AlreadyTaken(
                new_user.email,
            )));
        }
        if self
            .repository
            .find_by_username(&new_user.username)?
            .is_some()
        {
            return Err(Error::Validation(ValidationError::AlreadyTaken(
                new_user.username,
            )));
        }

        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email,
            username: new_user.username,
            full_name: new_user.full_name,
            bio: None,
            password_hash: new_user.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert(user).await?;
        log::info!("registered user {}", created.id);
        Ok(created)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(email)
    }

    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        let mut user = self.get_user(user_id)?;
        if let Some(full_name) = update.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        user.updated_at = Utc::now().naive_utc();
        self.repository.update(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockUserRepository {
        users: RwLock<Vec<User>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned())
        }

        fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        fn find_by_username(&self, username: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn insert(&self, user: User) -> Result<User> {
            self.users.write().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update(&self, user: User) -> Result<User> {
            let mut users = self.users.write().unwrap();
            let slot = users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or_else(|| Error::NotFound(format!("User {} not found", user.id)))?;
            *slot = user.clone();
            Ok(user)
        }
    }

    fn new_user(email: &str, username: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: username.to_string(),
            full_name: None,
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn register_and_fetch() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service
            .register(new_user("jo@example.com", "jo"))
            .await
            .unwrap();

        assert!(user.is_active);
        assert_eq!(service.get_user(&user.id).unwrap().username, "jo");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        service
            .register(new_user("jo@example.com", "jo"))
            .await
            .unwrap();

        let result = service.register(new_user("jo@example.com", "jo2")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let result = service.register(new_user("not-an-email", "jo")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn update_profile_merges_fields() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service
            .register(new_user("jo@example.com", "jo"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                &user.id,
                UserUpdate {
                    bio: Some("lifting things".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bio.as_deref(), Some("lifting things"));
        assert_eq!(updated.email, user.email);
    }
}
