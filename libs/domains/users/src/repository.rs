use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{SortColumn, SortDir, User, UserQuery};

/// Repository trait for User persistence
///
/// Soft-delete scoping is explicit: `find_by_id` uses the default scope
/// (active rows only), `find_by_id_with_deleted` and `page` include
/// soft-deleted rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get an active user by ID (soft-deleted rows excluded)
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by ID including soft-deleted rows
    async fn find_by_id_with_deleted(&self, id: Uuid) -> UserResult<Option<User>>;

    /// One page of users (soft-deleted included) plus the total match count
    async fn page(&self, query: UserQuery) -> UserResult<(Vec<User>, u64)>;

    /// Persist an updated user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Mark an active user as soft-deleted; false when no active row matched
    async fn soft_delete(&self, id: Uuid) -> UserResult<bool>;

    /// Clear the soft-deletion flag; false when the id does not exist
    async fn restore(&self, id: Uuid) -> UserResult<bool>;

    /// Check if an email is already taken, optionally excluding one record
    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn matches_search(user: &User, term: &str) -> bool {
    let term = term.to_lowercase();
    user.names.to_lowercase().contains(&term)
        || user.last_names.to_lowercase().contains(&term)
        || user.email.to_lowercase().contains(&term)
}

fn compare(a: &User, b: &User, column: SortColumn) -> std::cmp::Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Names => a.names.cmp(&b.names),
        SortColumn::LastNames => a.last_names.cmp(&b.last_names),
        SortColumn::NumberPhone => a.number_phone.cmp(&b.number_phone),
        SortColumn::Email => a.email.cmp(&b.email),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortColumn::DeletedAt => a.deleted_at.cmp(&b.deleted_at),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Check for duplicate email
        let email_exists = users
            .values()
            .any(|u| u.email.to_lowercase() == user.email.to_lowercase());

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_by_id_with_deleted(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn page(&self, query: UserQuery) -> UserResult<(Vec<User>, u64)> {
        let users = self.users.read().await;

        let mut matching: Vec<User> = users
            .values()
            .filter(|u| match &query.search {
                Some(term) => matches_search(u, term),
                None => true,
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| compare(a, b, query.column));
        if query.dir == SortDir::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let offset = (query.page - 1).saturating_mul(query.per_page);
        let page: Vec<User> = matching
            .into_iter()
            .skip(offset as usize)
            .take(query.per_page as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        // Check for duplicate email (excluding current user)
        let email_exists = users
            .values()
            .any(|u| u.id != user.id && u.email.to_lowercase() == user.email.to_lowercase());

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) if !user.is_deleted() => {
                user.deleted_at = Some(Utc::now());
                tracing::info!(user_id = %id, "Soft-deleted user");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn restore(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.deleted_at = None;
                tracing::info!(user_id = %id, "Restored user");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> UserResult<bool> {
        let users = self.users.read().await;
        let exists = users.values().any(|u| {
            Some(u.id) != exclude_id && u.email.to_lowercase() == email.to_lowercase()
        });
        Ok(exists)
    }
}
