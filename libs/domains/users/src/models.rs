use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{UserError, UserResult};

/// Timestamp format used by list projections (`YYYY-MM-DD HH:mm:ss`)
const LIST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User entity - matches SQL schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Given names
    pub names: String,
    /// Family names
    pub last_names: String,
    /// Phone number, exactly 10 digits
    pub number_phone: String,
    /// User email (unique)
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp; `Some` means the user is soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user from validated input
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            names: input.names,
            last_names: input.last_names,
            number_phone: input.number_phone,
            email: input.email,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Overwrite the editable field set and bump `updated_at`
    pub fn apply_update(&mut self, update: UpdateUser) {
        self.names = update.names;
        self.last_names = update.last_names;
        self.number_phone = update.number_phone;
        self.email = update.email;
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 5, max = 50))]
    pub names: String,
    #[validate(length(min = 5, max = 50))]
    pub last_names: String,
    #[validate(length(equal = 10), custom(function = validate_digits))]
    pub number_phone: String,
    #[validate(email, length(min = 5, max = 80))]
    pub email: String,
}

/// DTO for updating an existing user
///
/// The full field set is required; an update overwrites every editable field.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 5, max = 50))]
    pub names: String,
    #[validate(length(min = 5, max = 50))]
    pub last_names: String,
    #[validate(length(equal = 10), custom(function = validate_digits))]
    pub number_phone: String,
    #[validate(email, length(min = 5, max = 80))]
    pub email: String,
}

/// Request body for the listing endpoint
///
/// `column` and `dir` are validated against the known sort columns and
/// directions so a bad value produces a field-level error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ListUsers {
    /// Optional substring filter over names, last names, and email
    #[serde(default)]
    pub search: Option<String>,
    /// Sort column name (e.g. "names", "email", "created_at")
    #[validate(custom(function = validate_sort_column))]
    pub column: String,
    /// Sort direction: "asc" or "desc"
    #[validate(custom(function = validate_sort_dir))]
    pub dir: String,
    /// Page size, at least 1
    #[serde(rename = "perPage")]
    #[validate(range(min = 1))]
    pub per_page: u64,
    /// 1-based page number, defaults to the first page
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

impl ListUsers {
    /// Convert the validated wire request into a typed query
    pub fn into_query(self) -> UserResult<UserQuery> {
        let column = self
            .column
            .parse()
            .map_err(|e: String| UserError::Validation(e))?;
        let dir = self
            .dir
            .parse()
            .map_err(|e: String| UserError::Validation(e))?;

        Ok(UserQuery {
            search: self.search.filter(|s| !s.is_empty()),
            column,
            dir,
            per_page: self.per_page,
            page: self.page,
        })
    }
}

/// Typed listing query used by repositories
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub search: Option<String>,
    pub column: SortColumn,
    pub dir: SortDir,
    pub per_page: u64,
    pub page: u64,
}

/// Sortable user columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Names,
    LastNames,
    NumberPhone,
    Email,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl std::str::FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "names" => Ok(SortColumn::Names),
            "last_names" => Ok(SortColumn::LastNames),
            "number_phone" => Ok(SortColumn::NumberPhone),
            "email" => Ok(SortColumn::Email),
            "created_at" => Ok(SortColumn::CreatedAt),
            "updated_at" => Ok(SortColumn::UpdatedAt),
            "deleted_at" => Ok(SortColumn::DeletedAt),
            _ => Err(format!("Unknown sort column: {}", s)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl std::str::FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Listing projection of a user with display-formatted timestamps
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListItem {
    pub id: Uuid,
    pub names: String,
    pub last_names: String,
    pub number_phone: String,
    pub email: String,
    /// Formatted as `YYYY-MM-DD HH:mm:ss`
    pub created_at: String,
    /// Formatted as `YYYY-MM-DD HH:mm:ss`, null when absent
    pub updated_at: Option<String>,
    /// Formatted as `YYYY-MM-DD HH:mm:ss`, null while the user is active
    pub deleted_at: Option<String>,
}

impl From<&User> for UserListItem {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            names: user.names.clone(),
            last_names: user.last_names.clone(),
            number_phone: user.number_phone.clone(),
            email: user.email.clone(),
            created_at: format_list_timestamp(&user.created_at),
            updated_at: Some(format_list_timestamp(&user.updated_at)),
            deleted_at: user.deleted_at.as_ref().map(format_list_timestamp),
        }
    }
}

/// Pagination metadata for the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total matching rows across all pages
    pub total: u64,
    /// Rows on the current page
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    /// `ceil(total / per_page)`, at least 1
    pub total_pages: u64,
}

/// Meta block wrapping pagination info
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub pagination: PaginationMeta,
}

/// One page of user projections plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPage {
    pub users: Vec<UserListItem>,
    pub meta: PageMeta,
}

/// Request body carrying a user id (delete/restore)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserIdRequest {
    pub id: Uuid,
}

fn format_list_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(LIST_TIMESTAMP_FORMAT).to_string()
}

fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits").with_message("must contain only digits".into()))
    }
}

fn validate_sort_column(value: &str) -> Result<(), ValidationError> {
    value.parse::<SortColumn>().map(|_| ()).map_err(|_| {
        ValidationError::new("sort_column").with_message("unknown sort column".into())
    })
}

fn validate_sort_dir(value: &str) -> Result<(), ValidationError> {
    value.parse::<SortDir>().map(|_| ()).map_err(|_| {
        ValidationError::new("sort_dir").with_message("must be 'asc' or 'desc'".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_create() -> CreateUser {
        CreateUser {
            names: "Maria Fernanda".to_string(),
            last_names: "Lopez Garcia".to_string(),
            number_phone: "3001234567".to_string(),
            email: "maria@example.com".to_string(),
        }
    }

    #[test]
    fn test_create_user_validation_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_user_rejects_short_names() {
        let mut input = valid_create();
        input.names = "Ana".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("names"));
    }

    #[test]
    fn test_create_user_rejects_non_numeric_phone() {
        let mut input = valid_create();
        input.number_phone = "30012345a7".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("number_phone"));
    }

    #[test]
    fn test_create_user_rejects_short_phone() {
        let mut input = valid_create();
        input.number_phone = "12345".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("number_phone"));
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let mut input = valid_create();
        input.email = "not-an-email".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_list_users_rejects_unknown_column() {
        let request = ListUsers {
            search: None,
            column: "password".to_string(),
            dir: "asc".to_string(),
            per_page: 10,
            page: 1,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("column"));
    }

    #[test]
    fn test_list_users_rejects_bad_direction() {
        let request = ListUsers {
            search: None,
            column: "names".to_string(),
            dir: "sideways".to_string(),
            per_page: 10,
            page: 1,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("dir"));
    }

    #[test]
    fn test_list_users_per_page_defaults_page_to_one() {
        let request: ListUsers = serde_json::from_value(serde_json::json!({
            "column": "names",
            "dir": "asc",
            "perPage": 10
        }))
        .unwrap();
        assert_eq!(request.page, 1);

        let query = request.into_query().unwrap();
        assert_eq!(query.column, SortColumn::Names);
        assert_eq!(query.dir, SortDir::Asc);
        assert_eq!(query.per_page, 10);
    }

    #[test]
    fn test_list_item_formats_timestamps() {
        let created = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let mut user = User::new(valid_create());
        user.created_at = created;
        user.updated_at = created;
        user.deleted_at = None;

        let item = UserListItem::from(&user);
        assert_eq!(item.created_at, "2024-03-07 09:05:01");
        assert_eq!(item.updated_at.as_deref(), Some("2024-03-07 09:05:01"));
        assert!(item.deleted_at.is_none());
    }

    #[test]
    fn test_apply_update_overwrites_fields_and_bumps_updated_at() {
        let mut user = User::new(valid_create());
        let before = user.updated_at;

        user.apply_update(UpdateUser {
            names: "Carolina Beatriz".to_string(),
            last_names: "Mendez Prada".to_string(),
            number_phone: "3109876543".to_string(),
            email: "carolina@example.com".to_string(),
        });

        assert_eq!(user.names, "Carolina Beatriz");
        assert_eq!(user.email, "carolina@example.com");
        assert!(user.updated_at >= before);
    }
}
