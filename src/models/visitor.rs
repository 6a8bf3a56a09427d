//! Visitor model and related types

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]{6,20}$").expect("valid phone regex"));

/// Lifecycle state of a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    CheckedIn,
    CheckedOut,
    PreRegistered,
}

impl VisitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorStatus::CheckedIn => "checked_in",
            VisitorStatus::CheckedOut => "checked_out",
            VisitorStatus::PreRegistered => "pre_registered",
        }
    }
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VisitorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked_in" => Ok(VisitorStatus::CheckedIn),
            "checked_out" => Ok(VisitorStatus::CheckedOut),
            "pre_registered" => Ok(VisitorStatus::PreRegistered),
            _ => Err(format!("Invalid visitor status: {}", s)),
        }
    }
}

// Stored as TEXT (CHECK constrained)
impl sqlx::Type<Postgres> for VisitorStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for VisitorStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for VisitorStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Visitor record (one visit)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visitor {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Free text or the name of a visit purpose
    pub purpose: String,
    pub host_name: String,
    pub host_department: Option<String>,
    pub badge_number: Option<String>,
    pub photo_url: Option<String>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub vehicle_number: Option<String>,
    pub has_laptop: bool,
    pub laptop_make: Option<String>,
    pub laptop_model: Option<String>,
    pub laptop_serial: Option<String>,
    /// Set by the server at check-in
    pub check_in_time: DateTime<Utc>,
    /// Non-null iff status is checked_out
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: VisitorStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check-in request: visitor fields minus id, timestamps and status
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_laptop", skip_on_field_errors = false))]
pub struct CheckInVisitor {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
    #[validate(length(min = 1, message = "Host name is required"))]
    pub host_name: String,
    pub host_department: Option<String>,
    pub badge_number: Option<String>,
    pub photo_url: Option<String>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub has_laptop: bool,
    pub laptop_make: Option<String>,
    pub laptop_model: Option<String>,
    pub laptop_serial: Option<String>,
    pub notes: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn validate_laptop(data: &CheckInVisitor) -> Result<(), ValidationError> {
    if data.has_laptop && (is_blank(&data.laptop_make) || is_blank(&data.laptop_serial)) {
        let mut err = ValidationError::new("laptop_details");
        err.message = Some("Laptop make and serial number are required when carrying a laptop".into());
        return Err(err);
    }
    Ok(())
}

impl CheckInVisitor {
    /// Trim text fields, turn empty optionals into NULL and drop laptop
    /// details when no laptop is declared.
    pub fn normalized(mut self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        self.name = self.name.trim().to_string();
        self.purpose = self.purpose.trim().to_string();
        self.host_name = self.host_name.trim().to_string();
        self.email = clean(self.email);
        self.phone = clean(self.phone);
        self.company = clean(self.company);
        self.host_department = clean(self.host_department);
        self.badge_number = clean(self.badge_number);
        self.photo_url = clean(self.photo_url);
        self.id_proof_type = clean(self.id_proof_type);
        self.id_proof_number = clean(self.id_proof_number);
        self.vehicle_number = clean(self.vehicle_number);
        self.notes = clean(self.notes);

        if self.has_laptop {
            self.laptop_make = clean(self.laptop_make);
            self.laptop_model = clean(self.laptop_model);
            self.laptop_serial = clean(self.laptop_serial);
        } else {
            self.laptop_make = None;
            self.laptop_model = None;
            self.laptop_serial = None;
        }
        self
    }
}

/// Query parameters for visitor lists and CSV export
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VisitorQuery {
    /// Earliest check-in day, inclusive (YYYY-MM-DD, UTC)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    /// Latest check-in day, inclusive (YYYY-MM-DD, UTC)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    /// checked_in, checked_out or pre_registered
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub status: Option<VisitorStatus>,
}
