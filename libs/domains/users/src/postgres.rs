use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{SortColumn, SortDir, User, UserQuery},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(column: SortColumn) -> entity::Column {
    match column {
        SortColumn::Id => entity::Column::Id,
        SortColumn::Names => entity::Column::Names,
        SortColumn::LastNames => entity::Column::LastNames,
        SortColumn::NumberPhone => entity::Column::NumberPhone,
        SortColumn::Email => entity::Column::Email,
        SortColumn::CreatedAt => entity::Column::CreatedAt,
        SortColumn::UpdatedAt => entity::Column::UpdatedAt,
        SortColumn::DeletedAt => entity::Column::DeletedAt,
    }
}

fn db_error(e: sea_orm::DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let err = e.to_string();
    err.contains("duplicate key") || err.contains("unique constraint")
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let email = user.email.clone();
        let active: entity::ActiveModel = user.into();

        let model = active.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateEmail(email)
            } else {
                db_error(e)
            }
        })?;

        tracing::info!(user_id = %model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id_with_deleted(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn page(&self, query: UserQuery) -> UserResult<(Vec<User>, u64)> {
        // Soft-deleted rows are intentionally included here
        let mut select = entity::Entity::find();

        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(entity::Column::Names.contains(term.as_str()))
                    .add(entity::Column::LastNames.contains(term.as_str()))
                    .add(entity::Column::Email.contains(term.as_str())),
            );
        }

        let order = match query.dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        let select = select.order_by(sort_column(query.column), order);

        let paginator = select.paginate(&self.db, query.per_page);
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(db_error)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let email = user.email.clone();
        let active: entity::ActiveModel = user.into();

        let model = active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateEmail(email)
            } else if matches!(e, sea_orm::DbErr::RecordNotUpdated) {
                UserError::NotFound(id)
            } else {
                db_error(e)
            }
        })?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        let Some(model) = model else {
            return Ok(false);
        };

        let mut active: entity::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        active.update(&self.db).await.map_err(db_error)?;

        tracing::info!(user_id = %id, "Soft-deleted user");
        Ok(true)
    }

    async fn restore(&self, id: Uuid) -> UserResult<bool> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        let Some(model) = model else {
            return Ok(false);
        };

        let mut active: entity::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.update(&self.db).await.map_err(db_error)?;

        tracing::info!(user_id = %id, "Restored user");
        Ok(true)
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> UserResult<bool> {
        // Case-insensitive, matching the in-memory repository
        let mut select = entity::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(entity::Column::Email))).eq(email.to_lowercase()),
        );

        if let Some(id) = exclude_id {
            select = select.filter(entity::Column::Id.ne(id));
        }

        let exists = select.one(&self.db).await.map_err(db_error)?.is_some();
        Ok(exists)
    }
}
