use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::table::{self, Row, TableSpec};

/// Value of a single column in a row handed to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Int(i32),
    Text(String),
    Uuid(Uuid),
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn optional_text(value: &Option<String>) -> FieldValue {
    value.as_deref().map(text).unwrap_or(FieldValue::Null)
}

/// Account status stored in the `users.active` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub const ALL: &'static [Self] = &[Self::Active, Self::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const ALL: &'static [Self] = &[Self::User, Self::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

/// Which side of the marketplace posted an advert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Advertiser {
    Employee,
    Customer,
}

impl Advertiser {
    pub const ALL: &'static [Self] = &[Self::Employee, Self::Customer];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Customer => "CUSTOMER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvertStatus {
    Open,
    Closed,
    Cancelled,
    Assigned,
    Reviewed,
}

impl AdvertStatus {
    pub const ALL: &'static [Self] = &[
        Self::Open,
        Self::Closed,
        Self::Cancelled,
        Self::Assigned,
        Self::Reviewed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Cancelled => "CANCELLED",
            Self::Assigned => "ASSIGNED",
            Self::Reviewed => "REVIEWED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Open,
    Closed,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub const ALL: &'static [Self] = &[Self::Open, Self::Closed, Self::Accepted, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}

/// Marketplace account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub status: AccountStatus,
    pub email: String,
    /// bcrypt hash of the username.
    pub password_hash: String,
    pub role: Role,
    pub about_me: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub postal_code: String,
    pub profile_picture: Option<String>,
    pub username: String,
}

impl Row for User {
    const TABLE: &'static TableSpec = &table::USERS;

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uuid(self.id),
            FieldValue::Timestamp(self.created_at),
            FieldValue::Timestamp(self.updated_at),
            text(self.status.as_str()),
            text(&self.email),
            text(&self.password_hash),
            text(self.role.as_str()),
            text(&self.about_me),
            text(&self.address),
            text(&self.city),
            text(&self.country),
            text(&self.first_name),
            text(&self.last_name),
            text(&self.phone_number),
            text(&self.postal_code),
            optional_text(&self.profile_picture),
            text(&self.username),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub description: String,
    pub image_id: Option<String>,
    pub name: String,
}

impl Row for Category {
    const TABLE: &'static TableSpec = &table::CATEGORIES;

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uuid(self.id),
            FieldValue::Timestamp(self.created_at),
            FieldValue::Timestamp(self.updated_at),
            text(&self.description),
            optional_text(&self.image_id),
            text(&self.name),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub description: String,
    pub image_id: Option<String>,
    pub name: String,
    pub category_id: Uuid,
}

impl Row for Job {
    const TABLE: &'static TableSpec = &table::JOBS;

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uuid(self.id),
            FieldValue::Timestamp(self.created_at),
            FieldValue::Timestamp(self.updated_at),
            text(&self.description),
            optional_text(&self.image_id),
            text(&self.name),
            FieldValue::Uuid(self.category_id),
        ]
    }
}

/// Search keyword attached to a job. Keys are not deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct JobKey {
    pub job_id: Uuid,
    pub key: String,
}

impl Row for JobKey {
    const TABLE: &'static TableSpec = &table::JOB_KEYS;

    fn values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Uuid(self.job_id), text(&self.key)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Advert {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub advertiser: Advertiser,
    /// Delivery time in days.
    pub delivery_time: i32,
    pub description: String,
    pub image_id: Option<String>,
    pub name: String,
    pub price: i32,
    pub status: AdvertStatus,
    pub user_id: Uuid,
    pub job_id: Uuid,
}

impl Row for Advert {
    const TABLE: &'static TableSpec = &table::ADVERTS;

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uuid(self.id),
            FieldValue::Timestamp(self.created_at),
            FieldValue::Timestamp(self.updated_at),
            text(self.advertiser.as_str()),
            FieldValue::Int(self.delivery_time),
            text(&self.description),
            optional_text(&self.image_id),
            text(&self.name),
            FieldValue::Int(self.price),
            text(self.status.as_str()),
            FieldValue::Uuid(self.user_id),
            FieldValue::Uuid(self.job_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub offered_price: i32,
    pub status: OfferStatus,
    pub user_id: Uuid,
    pub advert_id: Uuid,
}

impl Row for Offer {
    const TABLE: &'static TableSpec = &table::OFFERS;

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uuid(self.id),
            FieldValue::Timestamp(self.created_at),
            FieldValue::Timestamp(self.updated_at),
            FieldValue::Int(self.offered_price),
            text(self.status.as_str()),
            FieldValue::Uuid(self.user_id),
            FieldValue::Uuid(self.advert_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub message: String,
    pub offer_id: Uuid,
    pub user_id: Uuid,
}

impl Row for Notification {
    const TABLE: &'static TableSpec = &table::NOTIFICATIONS;

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uuid(self.id),
            FieldValue::Timestamp(self.created_at),
            text(&self.message),
            FieldValue::Uuid(self.offer_id),
            FieldValue::Uuid(self.user_id),
        ]
    }
}
