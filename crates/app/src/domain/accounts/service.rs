//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::{
        data::NewUser,
        errors::AccountsServiceError,
        records::{UserRecord, UserUuid},
        repository::PgAccountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_username(&mut tx, username)
            .await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
/// User identity and profile operations.
pub trait AccountsService: Send + Sync {
    /// Registers a new user. Usernames are unique.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AccountsServiceError>;

    /// Retrieves a user and their balance.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, AccountsServiceError>;

    /// Looks a user up by login name.
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<UserRecord, AccountsServiceError>;
}
