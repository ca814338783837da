use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ParseEnumError, ValidationError};

// --- Tenant & Identity ---

/// BusinessUnitId
///
/// Opaque identifier of a business unit (one hotel property). Every admin route is
/// namespaced under this value, e.g. `/biz_1/admin/rooms`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default,
)]
#[serde(transparent)]
#[sqlx(transparent)]
#[ts(export)]
pub struct BusinessUnitId(String);

impl BusinessUnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh id for a business unit created through the setup flow.
    pub fn generate() -> Self {
        Self(format!("biz_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BusinessUnitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// User
///
/// Mirror of the identity provider's user, stored in `profiles`. Created or refreshed on
/// every successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// Role
///
/// The RBAC field of an assignment. Owners and managers curate the catalog and marketing
/// content; staff run the front desk (guests and reservations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Owner,
    Manager,
    #[default]
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }

    /// Whether this role may change room types, rooms, FAQs and testimonials.
    pub fn can_manage_content(&self) -> bool {
        matches!(self, Role::Owner | Role::Manager)
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// BusinessUnit
///
/// A tenant scope: one hotel property with its own rooms, guests and content.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct BusinessUnit {
    pub id: BusinessUnitId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Assignment
///
/// Grants a user access to exactly one business unit. The first assignment of a user
/// (ordered by `created_at`, then `id`) is their default business unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Assignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_unit_id: BusinessUnitId,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(user_id: Uuid, business_unit_id: BusinessUnitId, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            business_unit_id,
            role,
            created_at: Utc::now(),
        }
    }
}

// --- Catalog ---

/// RoomType
///
/// A sellable category of room (e.g. "Deluxe King") with a nightly base price.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct RoomType {
    pub id: Uuid,
    pub business_unit_id: BusinessUnitId,
    pub name: String,
    pub description: String,
    /// Nightly rate in minor currency units.
    pub base_price_cents: i64,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoomType {
    pub fn new(business_unit_id: BusinessUnitId, req: CreateRoomTypeRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_unit_id,
            name: req.name.trim().to_string(),
            description: req.description.unwrap_or_default(),
            base_price_cents: req.base_price_cents,
            capacity: req.capacity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, req: UpdateRoomTypeRequest) {
        if let Some(name) = req.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = req.description {
            self.description = description;
        }
        if let Some(price) = req.base_price_cents {
            self.base_price_cents = price;
        }
        if let Some(capacity) = req.capacity {
            self.capacity = capacity;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.base_price_cents < 0 {
            return Err(ValidationError::new("base_price_cents must not be negative"));
        }
        if self.capacity < 1 {
            return Err(ValidationError::new("capacity must be at least 1"));
        }
        Ok(())
    }
}

/// RoomStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(RoomStatus::Available),
            "occupied" => Ok(RoomStatus::Occupied),
            "maintenance" => Ok(RoomStatus::Maintenance),
            other => Err(ParseEnumError::new("room status", other)),
        }
    }
}

impl TryFrom<String> for RoomStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Room
///
/// A physical room. Its `number` is unique within the business unit.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Room {
    pub id: Uuid,
    pub business_unit_id: BusinessUnitId,
    pub room_type_id: Uuid,
    pub number: String,
    pub floor: i32,
    #[sqlx(try_from = "String")]
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(business_unit_id: BusinessUnitId, req: CreateRoomRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_unit_id,
            room_type_id: req.room_type_id,
            number: req.number.trim().to_string(),
            floor: req.floor,
            status: req.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, req: UpdateRoomRequest) {
        if let Some(room_type_id) = req.room_type_id {
            self.room_type_id = room_type_id;
        }
        if let Some(number) = req.number {
            self.number = number.trim().to_string();
        }
        if let Some(floor) = req.floor {
            self.floor = floor;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("number", &self.number)
    }
}

// --- Front Desk ---

/// Guest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Guest {
    pub id: Uuid,
    pub business_unit_id: BusinessUnitId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(business_unit_id: BusinessUnitId, req: CreateGuestRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_unit_id,
            full_name: req.full_name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, req: UpdateGuestRequest) {
        if let Some(full_name) = req.full_name {
            self.full_name = full_name.trim().to_string();
        }
        if let Some(email) = req.email {
            self.email = email.trim().to_string();
        }
        if let Some(phone) = req.phone {
            self.phone = Some(phone);
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("full_name", &self.full_name)?;
        if !self.email.contains('@') {
            return Err(ValidationError::new("email must be a valid address"));
        }
        Ok(())
    }
}

/// ReservationStatus
///
/// Lifecycle of a booking. Only `cancelled` reservations release the room's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a reservation in this state still holds its room for the booked nights.
    pub fn holds_room(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "checked_in" => Ok(ReservationStatus::CheckedIn),
            "checked_out" => Ok(ReservationStatus::CheckedOut),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(ParseEnumError::new("reservation status", other)),
        }
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Reservation
///
/// A booking of one room by one guest for the nights in `[check_in, check_out)`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct Reservation {
    pub id: Uuid,
    pub business_unit_id: BusinessUnitId,
    pub room_id: Uuid,
    pub guest_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(business_unit_id: BusinessUnitId, req: CreateReservationRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_unit_id,
            room_id: req.room_id,
            guest_id: req.guest_id,
            check_in: req.check_in,
            check_out: req.check_out,
            status: req.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, req: UpdateReservationRequest) {
        if let Some(room_id) = req.room_id {
            self.room_id = room_id;
        }
        if let Some(guest_id) = req.guest_id {
            self.guest_id = guest_id;
        }
        if let Some(check_in) = req.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = req.check_out {
            self.check_out = check_out;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.check_out <= self.check_in {
            return Err(ValidationError::new("check_out must be after check_in"));
        }
        Ok(())
    }

    /// True when both reservations hold the same room for at least one common night.
    /// Back-to-back stays (one checks out the day the other checks in) do not overlap.
    pub fn conflicts_with(&self, other: &Reservation) -> bool {
        self.id != other.id
            && self.room_id == other.room_id
            && self.status.holds_room()
            && other.status.holds_room()
            && self.check_in < other.check_out
            && other.check_in < self.check_out
    }
}

// --- Marketing Content ---

/// Faq
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Faq {
    pub id: Uuid,
    pub business_unit_id: BusinessUnitId,
    pub question: String,
    pub answer: String,
    /// Display order on the public site; lower first.
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(business_unit_id: BusinessUnitId, req: CreateFaqRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_unit_id,
            question: req.question.trim().to_string(),
            answer: req.answer.trim().to_string(),
            position: req.position.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, req: UpdateFaqRequest) {
        if let Some(question) = req.question {
            self.question = question.trim().to_string();
        }
        if let Some(answer) = req.answer {
            self.answer = answer.trim().to_string();
        }
        if let Some(position) = req.position {
            self.position = position;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("question", &self.question)?;
        require_text("answer", &self.answer)
    }
}

/// Testimonial
///
/// A guest quote shown on the marketing site once `is_published` is set.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Testimonial {
    pub id: Uuid,
    pub business_unit_id: BusinessUnitId,
    pub author: String,
    pub content: String,
    pub rating: i16,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn new(business_unit_id: BusinessUnitId, req: CreateTestimonialRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_unit_id,
            author: req.author.trim().to_string(),
            content: req.content.trim().to_string(),
            rating: req.rating,
            is_published: req.is_published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, req: UpdateTestimonialRequest) {
        if let Some(author) = req.author {
            self.author = author.trim().to_string();
        }
        if let Some(content) = req.content {
            self.content = content.trim().to_string();
        }
        if let Some(rating) = req.rating {
            self.rating = rating;
        }
        if let Some(is_published) = req.is_published {
            self.is_published = is_published;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("author", &self.author)?;
        require_text("content", &self.content)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::new("rating must be between 1 and 5"));
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must not be empty")));
    }
    Ok(())
}

/// --- Request Payloads (Input Schemas) ---

/// SignInRequest
///
/// Exchanges an identity-provider JWT for a session cookie (POST /auth/sign-in).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SignInRequest {
    pub token: String,
}

/// CreateBusinessUnitRequest
///
/// Input payload of the setup flow (POST /setup).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateBusinessUnitRequest {
    #[schema(example = "Seaside Inn")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateRoomTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub base_price_cents: i64,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateRoomTypeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateRoomRequest {
    pub room_type_id: Uuid,
    #[schema(example = "101")]
    pub number: String,
    pub floor: i32,
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateRoomRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateGuestRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateGuestRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateReservationRequest {
    pub room_id: Uuid,
    pub guest_id: Uuid,
    #[schema(example = "2026-11-02")]
    pub check_in: NaiveDate,
    #[schema(example = "2026-11-05")]
    pub check_out: NaiveDate,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateReservationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateFaqRequest {
    pub question: String,
    pub answer: String,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateFaqRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTestimonialRequest {
    pub author: String,
    pub content: String,
    pub rating: i16,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTestimonialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// PresignedUrlRequest
///
/// Input payload for requesting a short-lived upload URL for room or marketing imagery.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlRequest {
    /// The original filename, used to derive the file extension.
    #[schema(example = "deluxe_king.jpg")]
    pub filename: String,
    /// The MIME type the upload is constrained to.
    #[schema(example = "image/jpeg")]
    pub file_type: String,
}

/// PresignedUrlResponse
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlResponse {
    /// The time-limited URL for the PUT request.
    pub upload_url: String,
    /// The object key to store on the entity that references the image.
    pub resource_key: String,
}

/// --- Dashboard & Session Schemas (Output) ---

/// DashboardStats
///
/// Badge counters rendered next to the sidebar entries of the admin area.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq, Eq)]
#[ts(export)]
pub struct DashboardStats {
    pub room_types: i64,
    pub rooms: i64,
    pub available_rooms: i64,
    pub guests: i64,
    pub pending_reservations: i64,
    /// Reservations whose guest is currently checked in.
    pub active_reservations: i64,
    pub faqs: i64,
    pub unpublished_testimonials: i64,
}

/// DashboardResponse
///
/// Output of GET /{business_unit_id}/admin.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardResponse {
    pub business_unit: BusinessUnit,
    pub role: Role,
    pub badges: DashboardStats,
}

/// BusinessUnitSummary
///
/// One entry of the business-unit switcher.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct BusinessUnitSummary {
    pub id: BusinessUnitId,
    pub name: String,
    pub role: Role,
    pub is_current: bool,
}

/// SetupStatus
///
/// Output of GET /setup: who is signed in and whether they already have a default unit.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SetupStatus {
    pub user_id: Uuid,
    pub email: String,
    pub assignment_count: usize,
    pub default_business_unit: Option<BusinessUnitId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(room_id: Uuid, check_in: &str, check_out: &str) -> Reservation {
        Reservation::new(
            BusinessUnitId::from("biz_1"),
            CreateReservationRequest {
                room_id,
                guest_id: Uuid::new_v4(),
                check_in: check_in.parse().unwrap(),
                check_out: check_out.parse().unwrap(),
                status: None,
            },
        )
    }

    #[test]
    fn overlapping_stays_in_same_room_conflict() {
        let room = Uuid::new_v4();
        let a = reservation(room, "2026-11-01", "2026-11-04");
        let b = reservation(room, "2026-11-03", "2026-11-06");
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
    }

    #[test]
    fn back_to_back_stays_do_not_conflict() {
        let room = Uuid::new_v4();
        let a = reservation(room, "2026-11-01", "2026-11-04");
        let b = reservation(room, "2026-11-04", "2026-11-06");
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn cancelled_reservation_releases_room() {
        let room = Uuid::new_v4();
        let a = reservation(room, "2026-11-01", "2026-11-04");
        let mut b = reservation(room, "2026-11-02", "2026-11-03");
        b.status = ReservationStatus::Cancelled;
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn reservation_requires_forward_dates() {
        let r = reservation(Uuid::new_v4(), "2026-11-04", "2026-11-04");
        assert!(r.validate().is_err());
    }

    #[test]
    fn testimonial_rating_is_bounded() {
        let mut t = Testimonial::new(
            BusinessUnitId::from("biz_1"),
            CreateTestimonialRequest {
                author: "Ana".into(),
                content: "Lovely stay".into(),
                rating: 5,
                is_published: None,
            },
        );
        assert!(t.validate().is_ok());
        t.rating = 6;
        assert!(t.validate().is_err());
    }

    #[test]
    fn room_type_patch_only_touches_given_fields() {
        let mut rt = RoomType::new(
            BusinessUnitId::from("biz_1"),
            CreateRoomTypeRequest {
                name: " Deluxe ".into(),
                description: None,
                base_price_cents: 12_000,
                capacity: 2,
            },
        );
        assert_eq!(rt.name, "Deluxe");
        rt.apply(UpdateRoomTypeRequest {
            capacity: Some(3),
            ..Default::default()
        });
        assert_eq!(rt.capacity, 3);
        assert_eq!(rt.base_price_cents, 12_000);
    }

    #[test]
    fn enums_round_trip_through_text_columns() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::CheckedIn,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
        assert!("penthouse".parse::<RoomStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&ReservationStatus::CheckedOut).unwrap(),
            "\"checked_out\""
        );
    }
}
