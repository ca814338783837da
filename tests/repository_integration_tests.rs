//! PostgresRepository against a live database. Run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.

use chrono::Utc;
use hotel_admin::{
    error::RepoError,
    models::{
        Assignment, BusinessUnit, BusinessUnitId, CreateGuestRequest, CreateReservationRequest,
        CreateRoomRequest, CreateRoomTypeRequest, Guest, Reservation, ReservationStatus, Role,
        Room, RoomType, User,
    },
    repository::{PostgresRepository, Repository},
};
use sqlx::PgPool;
use uuid::Uuid;

// --- Test Context and Setup ---

struct DbTestContext {
    repo: PostgresRepository,
}

impl DbTestContext {
    async fn setup() -> Self {
        dotenv::dotenv().ok();

        let db_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set to run integration tests");
        let pool = PgPool::connect(&db_url)
            .await
            .expect("Failed to connect to database for integration tests.");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run database migrations.");

        DbTestContext {
            repo: PostgresRepository::new(pool),
        }
    }

    /// A fresh user owning a fresh business unit. Ids are random so tests never collide.
    async fn owner_with_unit(&self) -> (User, BusinessUnitId) {
        let user = self
            .repo
            .upsert_user(User {
                id: Uuid::new_v4(),
                email: "owner@hotel.test".to_string(),
            })
            .await
            .unwrap();
        let unit = BusinessUnit {
            id: BusinessUnitId::generate(),
            name: "Test Hotel".to_string(),
            created_at: Utc::now(),
        };
        let owner = Assignment::new(user.id, unit.id.clone(), Role::Owner);
        let unit = self.repo.create_business_unit(unit, owner).await.unwrap();
        (user, unit.id)
    }

    async fn room(&self, bu: &BusinessUnitId, number: &str) -> Room {
        let room_type = self
            .repo
            .insert_room_type(RoomType::new(
                bu.clone(),
                CreateRoomTypeRequest {
                    name: format!("Type for {number}"),
                    description: None,
                    base_price_cents: 10_000,
                    capacity: 2,
                },
            ))
            .await
            .unwrap();
        self.repo
            .insert_room(Room::new(
                bu.clone(),
                CreateRoomRequest {
                    room_type_id: room_type.id,
                    number: number.to_string(),
                    floor: 1,
                    status: None,
                },
            ))
            .await
            .unwrap()
    }

    async fn guest(&self, bu: &BusinessUnitId) -> Guest {
        self.repo
            .insert_guest(Guest::new(
                bu.clone(),
                CreateGuestRequest {
                    full_name: "Ana Lima".to_string(),
                    email: "ana@example.com".to_string(),
                    phone: None,
                },
            ))
            .await
            .unwrap()
    }
}

fn stay(bu: &BusinessUnitId, room: &Room, guest: &Guest, check_in: &str, check_out: &str) -> Reservation {
    Reservation::new(
        bu.clone(),
        CreateReservationRequest {
            room_id: room.id,
            guest_id: guest.id,
            check_in: check_in.parse().unwrap(),
            check_out: check_out.parse().unwrap(),
            status: None,
        },
    )
}

// --- Tests ---

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn setup_creates_unit_and_owner_assignment() {
    let ctx = DbTestContext::setup().await;
    let (user, bu) = ctx.owner_with_unit().await;

    let assignments = ctx.repo.list_assignments(user.id).await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].business_unit_id, bu);
    assert_eq!(assignments[0].role, Role::Owner);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn rows_of_other_units_are_invisible() {
    let ctx = DbTestContext::setup().await;
    let (_, bu) = ctx.owner_with_unit().await;
    let (_, other) = ctx.owner_with_unit().await;
    let room = ctx.room(&bu, "101").await;

    assert!(ctx.repo.get_room(&other, room.id).await.unwrap().is_none());
    assert!(matches!(
        ctx.repo.delete_room(&other, room.id).await,
        Err(RepoError::NotFound)
    ));
    assert!(ctx.repo.list_rooms(&other).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_room_number_is_a_conflict() {
    let ctx = DbTestContext::setup().await;
    let (_, bu) = ctx.owner_with_unit().await;
    let first = ctx.room(&bu, "101").await;

    let mut duplicate = first.clone();
    duplicate.id = Uuid::new_v4();
    assert!(matches!(
        ctx.repo.insert_room(duplicate).await,
        Err(RepoError::Conflict(_))
    ));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn exclusion_constraint_rejects_overlap() {
    let ctx = DbTestContext::setup().await;
    let (_, bu) = ctx.owner_with_unit().await;
    let room = ctx.room(&bu, "201").await;
    let guest = ctx.guest(&bu).await;

    let first = ctx
        .repo
        .insert_reservation(stay(&bu, &room, &guest, "2026-11-01", "2026-11-04"))
        .await
        .unwrap();

    let found = ctx
        .repo
        .find_overlapping_reservation(
            &bu,
            room.id,
            "2026-11-03".parse().unwrap(),
            "2026-11-05".parse().unwrap(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(found, Some(first.id));

    // The handler check is bypassed here; the schema still refuses.
    assert!(matches!(
        ctx.repo
            .insert_reservation(stay(&bu, &room, &guest, "2026-11-03", "2026-11-05"))
            .await,
        Err(RepoError::Conflict(_))
    ));

    // Back-to-back fits.
    ctx.repo
        .insert_reservation(stay(&bu, &room, &guest, "2026-11-04", "2026-11-06"))
        .await
        .unwrap();

    let mut cancelled = first;
    cancelled.status = ReservationStatus::Cancelled;
    ctx.repo.save_reservation(cancelled).await.unwrap();
    ctx.repo
        .insert_reservation(stay(&bu, &room, &guest, "2026-11-02", "2026-11-04"))
        .await
        .unwrap();

    let pending = ctx
        .repo
        .list_reservations(&bu, Some(ReservationStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
}
