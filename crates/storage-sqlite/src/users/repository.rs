use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use fitfolio_core::users::{User, UserRepositoryTrait};
use fitfolio_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::email.eq(email))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::from))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::username.eq(username))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: User) -> Result<User> {
        let user_db = UserDB::from(user);
        self.writer
            .exec(move |conn| -> Result<User> {
                let row = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(row))
            })
            .await
    }

    async fn update(&self, user: User) -> Result<User> {
        let user_db = UserDB::from(user);
        self.writer
            .exec(move |conn| -> Result<User> {
                let user_id = user_db.id.clone();
                diesel::update(users::table.find(&user_id))
                    .set(&user_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let row = users::table
                    .find(&user_id)
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(row))
            })
            .await
    }
}
