use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUser, ListUsers, PageMeta, PaginationMeta, UpdateUser, User, UserListItem, UserPage,
};
use crate::repository::UserRepository;

/// Service layer for user business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List users with search, sort, and pagination
    ///
    /// Soft-deleted users are included; the projection carries their
    /// formatted `deleted_at`.
    pub async fn list_users(&self, request: ListUsers) -> UserResult<UserPage> {
        let query = request.into_query()?;
        let (users, total) = self.repository.page(query.clone()).await?;

        let items: Vec<UserListItem> = users.iter().map(UserListItem::from).collect();
        let count = items.len() as u64;
        let total_pages = total.div_ceil(query.per_page).max(1);

        Ok(UserPage {
            users: items,
            meta: PageMeta {
                pagination: PaginationMeta {
                    total,
                    count,
                    per_page: query.per_page,
                    current_page: query.page,
                    total_pages,
                },
            },
        })
    }

    /// Create a new user; the email must not be taken
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        if self.repository.email_exists(&input.email, None).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let user = User::new(input);
        self.repository.create(user).await
    }

    /// Get an active user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Overwrite an active user's editable fields
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        // Check for duplicate email if the email is being changed
        if !input.email.eq_ignore_ascii_case(&user.email)
            && self.repository.email_exists(&input.email, Some(id)).await?
        {
            return Err(UserError::DuplicateEmail(input.email));
        }

        user.apply_update(input);
        self.repository.update(user).await
    }

    /// Soft-delete an active user
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let deleted = self.repository.soft_delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// Restore a user, clearing its soft-deletion flag
    ///
    /// Looks across soft-deleted rows; restoring an active user is a no-op
    /// that still succeeds.
    pub async fn restore_user(&self, id: Uuid) -> UserResult<()> {
        let restored = self.repository.restore(id).await?;

        if !restored {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn create_input(names: &str, email: &str) -> CreateUser {
        CreateUser {
            names: names.to_string(),
            last_names: "Perez Gomez".to_string(),
            number_phone: "3001234567".to_string(),
            email: email.to_string(),
        }
    }

    fn list_request(per_page: u64, page: u64) -> ListUsers {
        ListUsers {
            search: None,
            column: "names".to_string(),
            dir: "asc".to_string(),
            per_page,
            page,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service
            .create_user(create_input("Alice Marie", "alice@example.com"))
            .await
            .unwrap();

        let fetched = service.get_user(created.id).await.unwrap();
        assert_eq!(fetched.email, "alice@example.com");
        assert!(fetched.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_fails() {
        let service = service();
        service
            .create_user(create_input("Alice Marie", "dup@example.com"))
            .await
            .unwrap();

        let result = service
            .create_user(create_input("Bobby Brown", "dup@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_fails() {
        let service = service();
        service
            .create_user(create_input("Alice Marie", "alice@example.com"))
            .await
            .unwrap();
        let bob = service
            .create_user(create_input("Bobby Brown", "bob@example.com"))
            .await
            .unwrap();

        let result = service
            .update_user(
                bob.id,
                UpdateUser {
                    names: bob.names.clone(),
                    last_names: bob.last_names.clone(),
                    number_phone: bob.number_phone.clone(),
                    email: "alice@example.com".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_succeeds() {
        let service = service();
        let bob = service
            .create_user(create_input("Bobby Brown", "bob@example.com"))
            .await
            .unwrap();

        let updated = service
            .update_user(
                bob.id,
                UpdateUser {
                    names: "Robert Brown".to_string(),
                    last_names: bob.last_names.clone(),
                    number_phone: bob.number_phone.clone(),
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.names, "Robert Brown");
    }

    #[tokio::test]
    async fn test_delete_then_restore_cycle() {
        let service = service();
        let created = service
            .create_user(create_input("Alice Marie", "alice@example.com"))
            .await
            .unwrap();

        service.delete_user(created.id).await.unwrap();

        // Default-scope read no longer finds the user
        assert!(matches!(
            service.get_user(created.id).await,
            Err(UserError::NotFound(_))
        ));
        // Deleting again also reports not found
        assert!(matches!(
            service.delete_user(created.id).await,
            Err(UserError::NotFound(_))
        ));

        service.restore_user(created.id).await.unwrap();
        let restored = service.get_user(created.id).await.unwrap();
        assert_eq!(restored.updated_at, created.updated_at);
        assert!(restored.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_restore_unknown_id_fails() {
        let service = service();
        assert!(matches!(
            service.restore_user(Uuid::new_v4()).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_pagination_meta() {
        let service = service();
        for i in 0..5 {
            service
                .create_user(create_input(
                    &format!("User Number {}", i),
                    &format!("user{}@example.com", i),
                ))
                .await
                .unwrap();
        }

        let page = service.list_users(list_request(2, 2)).await.unwrap();
        let meta = &page.meta.pagination;
        assert_eq!(meta.total, 5);
        assert_eq!(meta.count, 2);
        assert_eq!(meta.per_page, 2);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_empty_store_has_one_page() {
        let service = service();
        let page = service.list_users(list_request(10, 1)).await.unwrap();
        let meta = &page.meta.pagination;
        assert_eq!(meta.total, 0);
        assert_eq!(meta.count, 0);
        assert_eq!(meta.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_includes_soft_deleted_with_formatted_flag() {
        let service = service();
        let created = service
            .create_user(create_input("Alice Marie", "alice@example.com"))
            .await
            .unwrap();
        service.delete_user(created.id).await.unwrap();

        let page = service.list_users(list_request(10, 1)).await.unwrap();
        assert_eq!(page.meta.pagination.total, 1);
        assert!(page.users[0].deleted_at.is_some());
    }
}
