use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepoError;
use crate::models::{
    Assignment, BusinessUnit, BusinessUnitId, DashboardStats, Faq, Guest, Reservation,
    ReservationStatus, Room, RoomType, Testimonial, User,
};

/// Repository Trait
///
/// The contract for every persistence operation. Handlers talk only to this trait, so the
/// Postgres implementation and the in-memory one are interchangeable.
///
/// Every tenant-owned read or write takes the `BusinessUnitId` the request is scoped to;
/// a row belonging to another unit behaves exactly like a missing row.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Identity & Tenancy ---
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    async fn upsert_user(&self, user: User) -> Result<User, RepoError>;
    /// Assignments of a user ordered by `created_at`, then `id`.
    async fn list_assignments(&self, user_id: Uuid) -> Result<Vec<Assignment>, RepoError>;
    async fn get_business_unit(&self, id: &BusinessUnitId) -> Result<Option<BusinessUnit>, RepoError>;
    /// Creates the unit and the creator's assignment atomically.
    async fn create_business_unit(
        &self,
        unit: BusinessUnit,
        owner: Assignment,
    ) -> Result<BusinessUnit, RepoError>;
    async fn get_dashboard_stats(&self, bu: &BusinessUnitId) -> Result<DashboardStats, RepoError>;

    // --- Room Types ---
    async fn list_room_types(&self, bu: &BusinessUnitId) -> Result<Vec<RoomType>, RepoError>;
    async fn get_room_type(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<RoomType>, RepoError>;
    async fn insert_room_type(&self, room_type: RoomType) -> Result<RoomType, RepoError>;
    async fn save_room_type(&self, room_type: RoomType) -> Result<RoomType, RepoError>;
    async fn delete_room_type(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError>;

    // --- Rooms ---
    async fn list_rooms(&self, bu: &BusinessUnitId) -> Result<Vec<Room>, RepoError>;
    async fn get_room(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Room>, RepoError>;
    async fn insert_room(&self, room: Room) -> Result<Room, RepoError>;
    async fn save_room(&self, room: Room) -> Result<Room, RepoError>;
    async fn delete_room(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError>;

    // --- Guests ---
    async fn list_guests(&self, bu: &BusinessUnitId) -> Result<Vec<Guest>, RepoError>;
    async fn get_guest(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Guest>, RepoError>;
    async fn insert_guest(&self, guest: Guest) -> Result<Guest, RepoError>;
    async fn save_guest(&self, guest: Guest) -> Result<Guest, RepoError>;
    async fn delete_guest(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError>;

    // --- Reservations ---
    async fn list_reservations(
        &self,
        bu: &BusinessUnitId,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, RepoError>;
    async fn get_reservation(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Reservation>, RepoError>;
    /// Returns the id of a room-holding reservation sharing at least one night with
    /// `[check_in, check_out)` on `room_id`, ignoring `exclude`.
    async fn find_overlapping_reservation(
        &self,
        bu: &BusinessUnitId,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Option<Uuid>, RepoError>;
    async fn insert_reservation(&self, reservation: Reservation) -> Result<Reservation, RepoError>;
    async fn save_reservation(&self, reservation: Reservation) -> Result<Reservation, RepoError>;
    async fn delete_reservation(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError>;

    // --- FAQs ---
    /// FAQs ordered by `position`, then creation time.
    async fn list_faqs(&self, bu: &BusinessUnitId) -> Result<Vec<Faq>, RepoError>;
    async fn get_faq(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Faq>, RepoError>;
    async fn insert_faq(&self, faq: Faq) -> Result<Faq, RepoError>;
    async fn save_faq(&self, faq: Faq) -> Result<Faq, RepoError>;
    async fn delete_faq(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError>;

    // --- Testimonials ---
    async fn list_testimonials(
        &self,
        bu: &BusinessUnitId,
        published: Option<bool>,
    ) -> Result<Vec<Testimonial>, RepoError>;
    async fn get_testimonial(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Testimonial>, RepoError>;
    async fn insert_testimonial(&self, testimonial: Testimonial) -> Result<Testimonial, RepoError>;
    async fn save_testimonial(&self, testimonial: Testimonial) -> Result<Testimonial, RepoError>;
    async fn delete_testimonial(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError>;
}

/// RepositoryState
///
/// The shared handle to the persistence layer held in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

const ROOM_TYPE_COLUMNS: &str =
    "id, business_unit_id, name, description, base_price_cents, capacity, created_at, updated_at";
const ROOM_COLUMNS: &str =
    "id, business_unit_id, room_type_id, number, floor, status, created_at, updated_at";
const GUEST_COLUMNS: &str =
    "id, business_unit_id, full_name, email, phone, created_at, updated_at";
const RESERVATION_COLUMNS: &str =
    "id, business_unit_id, room_id, guest_id, check_in, check_out, status, created_at, updated_at";
const FAQ_COLUMNS: &str =
    "id, business_unit_id, question, answer, position, created_at, updated_at";
const TESTIMONIAL_COLUMNS: &str =
    "id, business_unit_id, author, content, rating, is_published, created_at, updated_at";

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL. Schema lives in `migrations/`.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_scoped(&self, table: &str, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        // `table` is always one of the fixed names below, never user input.
        let sql = format!("DELETE FROM {table} WHERE id = $1 AND business_unit_id = $2");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(bu)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn count(&self, sql: &str, bu: &BusinessUnitId) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(bu)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        sqlx::query_as::<_, User>("SELECT id, email FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    /// Mirrors the identity provider's user locally; the email is refreshed on each sign-in.
    async fn upsert_user(&self, user: User) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO profiles (id, email) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, email
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)
    }

    async fn list_assignments(&self, user_id: Uuid) -> Result<Vec<Assignment>, RepoError> {
        sqlx::query_as::<_, Assignment>(
            r#"
            SELECT id, user_id, business_unit_id, role, created_at
            FROM assignments
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)
    }

    async fn get_business_unit(&self, id: &BusinessUnitId) -> Result<Option<BusinessUnit>, RepoError> {
        sqlx::query_as::<_, BusinessUnit>("SELECT id, name, created_at FROM business_units WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn create_business_unit(
        &self,
        unit: BusinessUnit,
        owner: Assignment,
    ) -> Result<BusinessUnit, RepoError> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from_sqlx)?;

        let created = sqlx::query_as::<_, BusinessUnit>(
            "INSERT INTO business_units (id, name, created_at) VALUES ($1, $2, $3) RETURNING id, name, created_at",
        )
        .bind(&unit.id)
        .bind(&unit.name)
        .bind(unit.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        sqlx::query(
            "INSERT INTO assignments (id, user_id, business_unit_id, role, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(owner.id)
        .bind(owner.user_id)
        .bind(&owner.business_unit_id)
        .bind(owner.role.as_str())
        .bind(owner.created_at)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        tx.commit().await.map_err(RepoError::from_sqlx)?;
        Ok(created)
    }

    async fn get_dashboard_stats(&self, bu: &BusinessUnitId) -> Result<DashboardStats, RepoError> {
        Ok(DashboardStats {
            room_types: self.count("SELECT COUNT(*) FROM room_types WHERE business_unit_id = $1", bu).await?,
            rooms: self.count("SELECT COUNT(*) FROM rooms WHERE business_unit_id = $1", bu).await?,
            available_rooms: self
                .count("SELECT COUNT(*) FROM rooms WHERE business_unit_id = $1 AND status = 'available'", bu)
                .await?,
            guests: self.count("SELECT COUNT(*) FROM guests WHERE business_unit_id = $1", bu).await?,
            pending_reservations: self
                .count("SELECT COUNT(*) FROM reservations WHERE business_unit_id = $1 AND status = 'pending'", bu)
                .await?,
            active_reservations: self
                .count("SELECT COUNT(*) FROM reservations WHERE business_unit_id = $1 AND status = 'checked_in'", bu)
                .await?,
            faqs: self.count("SELECT COUNT(*) FROM faqs WHERE business_unit_id = $1", bu).await?,
            unpublished_testimonials: self
                .count("SELECT COUNT(*) FROM testimonials WHERE business_unit_id = $1 AND is_published = false", bu)
                .await?,
        })
    }

    // --- ROOM TYPES ---

    async fn list_room_types(&self, bu: &BusinessUnitId) -> Result<Vec<RoomType>, RepoError> {
        let sql = format!(
            "SELECT {ROOM_TYPE_COLUMNS} FROM room_types WHERE business_unit_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, RoomType>(&sql)
            .bind(bu)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn get_room_type(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<RoomType>, RepoError> {
        let sql = format!("SELECT {ROOM_TYPE_COLUMNS} FROM room_types WHERE id = $1 AND business_unit_id = $2");
        sqlx::query_as::<_, RoomType>(&sql)
            .bind(id)
            .bind(bu)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn insert_room_type(&self, rt: RoomType) -> Result<RoomType, RepoError> {
        let sql = format!(
            "INSERT INTO room_types ({ROOM_TYPE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {ROOM_TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, RoomType>(&sql)
            .bind(rt.id)
            .bind(&rt.business_unit_id)
            .bind(&rt.name)
            .bind(&rt.description)
            .bind(rt.base_price_cents)
            .bind(rt.capacity)
            .bind(rt.created_at)
            .bind(rt.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn save_room_type(&self, rt: RoomType) -> Result<RoomType, RepoError> {
        let sql = format!(
            r#"
            UPDATE room_types
            SET name = $3, description = $4, base_price_cents = $5, capacity = $6, updated_at = $7
            WHERE id = $1 AND business_unit_id = $2
            RETURNING {ROOM_TYPE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, RoomType>(&sql)
            .bind(rt.id)
            .bind(&rt.business_unit_id)
            .bind(&rt.name)
            .bind(&rt.description)
            .bind(rt.base_price_cents)
            .bind(rt.capacity)
            .bind(rt.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_room_type(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        self.delete_scoped("room_types", bu, id).await
    }

    // --- ROOMS ---

    async fn list_rooms(&self, bu: &BusinessUnitId) -> Result<Vec<Room>, RepoError> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE business_unit_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Room>(&sql)
            .bind(bu)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn get_room(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Room>, RepoError> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1 AND business_unit_id = $2");
        sqlx::query_as::<_, Room>(&sql)
            .bind(id)
            .bind(bu)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn insert_room(&self, room: Room) -> Result<Room, RepoError> {
        let sql = format!(
            "INSERT INTO rooms ({ROOM_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&sql)
            .bind(room.id)
            .bind(&room.business_unit_id)
            .bind(room.room_type_id)
            .bind(&room.number)
            .bind(room.floor)
            .bind(room.status.as_str())
            .bind(room.created_at)
            .bind(room.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn save_room(&self, room: Room) -> Result<Room, RepoError> {
        let sql = format!(
            r#"
            UPDATE rooms
            SET room_type_id = $3, number = $4, floor = $5, status = $6, updated_at = $7
            WHERE id = $1 AND business_unit_id = $2
            RETURNING {ROOM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Room>(&sql)
            .bind(room.id)
            .bind(&room.business_unit_id)
            .bind(room.room_type_id)
            .bind(&room.number)
            .bind(room.floor)
            .bind(room.status.as_str())
            .bind(room.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_room(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        self.delete_scoped("rooms", bu, id).await
    }

    // --- GUESTS ---

    async fn list_guests(&self, bu: &BusinessUnitId) -> Result<Vec<Guest>, RepoError> {
        let sql = format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE business_unit_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Guest>(&sql)
            .bind(bu)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn get_guest(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Guest>, RepoError> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = $1 AND business_unit_id = $2");
        sqlx::query_as::<_, Guest>(&sql)
            .bind(id)
            .bind(bu)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn insert_guest(&self, guest: Guest) -> Result<Guest, RepoError> {
        let sql = format!(
            "INSERT INTO guests ({GUEST_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {GUEST_COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&sql)
            .bind(guest.id)
            .bind(&guest.business_unit_id)
            .bind(&guest.full_name)
            .bind(&guest.email)
            .bind(&guest.phone)
            .bind(guest.created_at)
            .bind(guest.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn save_guest(&self, guest: Guest) -> Result<Guest, RepoError> {
        let sql = format!(
            r#"
            UPDATE guests
            SET full_name = $3, email = $4, phone = $5, updated_at = $6
            WHERE id = $1 AND business_unit_id = $2
            RETURNING {GUEST_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Guest>(&sql)
            .bind(guest.id)
            .bind(&guest.business_unit_id)
            .bind(&guest.full_name)
            .bind(&guest.email)
            .bind(&guest.phone)
            .bind(guest.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_guest(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        self.delete_scoped("guests", bu, id).await
    }

    // --- RESERVATIONS ---

    async fn list_reservations(
        &self,
        bu: &BusinessUnitId,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, RepoError> {
        let sql = format!(
            r#"
            SELECT {RESERVATION_COLUMNS} FROM reservations
            WHERE business_unit_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY check_in ASC, created_at ASC, id ASC
            "#
        );
        sqlx::query_as::<_, Reservation>(&sql)
            .bind(bu)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn get_reservation(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Reservation>, RepoError> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1 AND business_unit_id = $2");
        sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .bind(bu)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn find_overlapping_reservation(
        &self,
        bu: &BusinessUnitId,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Option<Uuid>, RepoError> {
        // Half-open ranges: a stay ending on day D does not clash with one starting on D.
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM reservations
            WHERE business_unit_id = $1
              AND room_id = $2
              AND status <> 'cancelled'
              AND check_in < $4
              AND $3 < check_out
              AND ($5::UUID IS NULL OR id <> $5)
            ORDER BY check_in ASC
            LIMIT 1
            "#,
        )
        .bind(bu)
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)
    }

    async fn insert_reservation(&self, r: Reservation) -> Result<Reservation, RepoError> {
        let sql = format!(
            "INSERT INTO reservations ({RESERVATION_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {RESERVATION_COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&sql)
            .bind(r.id)
            .bind(&r.business_unit_id)
            .bind(r.room_id)
            .bind(r.guest_id)
            .bind(r.check_in)
            .bind(r.check_out)
            .bind(r.status.as_str())
            .bind(r.created_at)
            .bind(r.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn save_reservation(&self, r: Reservation) -> Result<Reservation, RepoError> {
        let sql = format!(
            r#"
            UPDATE reservations
            SET room_id = $3, guest_id = $4, check_in = $5, check_out = $6, status = $7, updated_at = $8
            WHERE id = $1 AND business_unit_id = $2
            RETURNING {RESERVATION_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Reservation>(&sql)
            .bind(r.id)
            .bind(&r.business_unit_id)
            .bind(r.room_id)
            .bind(r.guest_id)
            .bind(r.check_in)
            .bind(r.check_out)
            .bind(r.status.as_str())
            .bind(r.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_reservation(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        self.delete_scoped("reservations", bu, id).await
    }

    // --- FAQS ---

    async fn list_faqs(&self, bu: &BusinessUnitId) -> Result<Vec<Faq>, RepoError> {
        let sql = format!(
            "SELECT {FAQ_COLUMNS} FROM faqs WHERE business_unit_id = $1 ORDER BY position ASC, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Faq>(&sql)
            .bind(bu)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn get_faq(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Faq>, RepoError> {
        let sql = format!("SELECT {FAQ_COLUMNS} FROM faqs WHERE id = $1 AND business_unit_id = $2");
        sqlx::query_as::<_, Faq>(&sql)
            .bind(id)
            .bind(bu)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn insert_faq(&self, faq: Faq) -> Result<Faq, RepoError> {
        let sql = format!(
            "INSERT INTO faqs ({FAQ_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {FAQ_COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&sql)
            .bind(faq.id)
            .bind(&faq.business_unit_id)
            .bind(&faq.question)
            .bind(&faq.answer)
            .bind(faq.position)
            .bind(faq.created_at)
            .bind(faq.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn save_faq(&self, faq: Faq) -> Result<Faq, RepoError> {
        let sql = format!(
            r#"
            UPDATE faqs
            SET question = $3, answer = $4, position = $5, updated_at = $6
            WHERE id = $1 AND business_unit_id = $2
            RETURNING {FAQ_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Faq>(&sql)
            .bind(faq.id)
            .bind(&faq.business_unit_id)
            .bind(&faq.question)
            .bind(&faq.answer)
            .bind(faq.position)
            .bind(faq.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_faq(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        self.delete_scoped("faqs", bu, id).await
    }

    // --- TESTIMONIALS ---

    async fn list_testimonials(
        &self,
        bu: &BusinessUnitId,
        published: Option<bool>,
    ) -> Result<Vec<Testimonial>, RepoError> {
        let sql = format!(
            r#"
            SELECT {TESTIMONIAL_COLUMNS} FROM testimonials
            WHERE business_unit_id = $1 AND ($2::BOOLEAN IS NULL OR is_published = $2)
            ORDER BY created_at DESC, id ASC
            "#
        );
        sqlx::query_as::<_, Testimonial>(&sql)
            .bind(bu)
            .bind(published)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn get_testimonial(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Testimonial>, RepoError> {
        let sql = format!("SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = $1 AND business_unit_id = $2");
        sqlx::query_as::<_, Testimonial>(&sql)
            .bind(id)
            .bind(bu)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn insert_testimonial(&self, t: Testimonial) -> Result<Testimonial, RepoError> {
        let sql = format!(
            "INSERT INTO testimonials ({TESTIMONIAL_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {TESTIMONIAL_COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&sql)
            .bind(t.id)
            .bind(&t.business_unit_id)
            .bind(&t.author)
            .bind(&t.content)
            .bind(t.rating)
            .bind(t.is_published)
            .bind(t.created_at)
            .bind(t.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    async fn save_testimonial(&self, t: Testimonial) -> Result<Testimonial, RepoError> {
        let sql = format!(
            r#"
            UPDATE testimonials
            SET author = $3, content = $4, rating = $5, is_published = $6, updated_at = $7
            WHERE id = $1 AND business_unit_id = $2
            RETURNING {TESTIMONIAL_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Testimonial>(&sql)
            .bind(t.id)
            .bind(&t.business_unit_id)
            .bind(&t.author)
            .bind(&t.content)
            .bind(t.rating)
            .bind(t.is_published)
            .bind(t.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_testimonial(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        self.delete_scoped("testimonials", bu, id).await
    }
}
