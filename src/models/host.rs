//! Host model (staff members who receive visitors)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Host record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Host {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Department name (matched by convention, not by foreign key)
    pub department: Option<String>,
    pub designation: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create host request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHost {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
}

impl CreateHost {
    /// Trim text fields and turn empty optionals into NULL
    pub fn normalized(mut self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = clean(self.phone);
        self.department = clean(self.department);
        self.designation = clean(self.designation);
        self
    }
}
