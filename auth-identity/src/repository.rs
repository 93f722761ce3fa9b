use crate::{error::*, models::*};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

pub mod postgres;

pub use postgres::PgUserRepository;

/// Typed access to the user record store.
///
/// Implementations enforce no identity policy. They may refuse a write that
/// would duplicate an email with [`StoreError::DuplicateEmail`], which closes
/// the race left open by the service's read-then-write check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn list_all(&self) -> StoreResult<Vec<User>>;
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    /// Returns the updated record, or `None` when no record has this id
    async fn update_by_id(&self, id: Uuid, update: UserUpdate) -> StoreResult<Option<User>>;
}

#[derive(Default)]
struct UserTable {
    users: HashMap<Uuid, User>,
    email_index: HashMap<String, Uuid>,
}

/// In-memory store for development and tests.
///
/// Every write checks the email index and mutates under one write lock, so
/// two concurrent inserts of the same email cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let table = self.table.read();
        Ok(table
            .email_index
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.table.read().users.get(&id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.table.read().users.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut table = self.table.write();
        if table.email_index.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            goal: user.goal,
            profile_img: user.profile_img,
            password_digest: user.password_digest,
            created_at: now,
            updated_at: now,
        };

        table.email_index.insert(record.email.clone(), record.id);
        table.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_by_id(&self, id: Uuid, update: UserUpdate) -> StoreResult<Option<User>> {
        let mut table = self.table.write();
        let Some(current) = table.users.get(&id).cloned() else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(current));
        }

        if let Some(ref email) = update.email {
            if let Some(owner) = table.email_index.get(email) {
                if *owner != id {
                    return Err(StoreError::DuplicateEmail);
                }
            }
        }

        let mut record = current;
        if let Some(email) = update.email {
            if email != record.email {
                table.email_index.remove(&record.email);
                table.email_index.insert(email.clone(), id);
                record.email = email;
            }
        }
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(goal) = update.goal {
            record.goal = goal;
        }
        if let Some(profile_img) = update.profile_img {
            record.profile_img = profile_img;
        }
        if let Some(password_digest) = update.password_digest {
            record.password_digest = password_digest;
        }
        record.updated_at = Utc::now();

        table.users.insert(id, record.clone());
        Ok(Some(record))
    }
}
