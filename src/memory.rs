use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RepoError;
use crate::models::{
    Assignment, BusinessUnit, BusinessUnitId, DashboardStats, Faq, Guest, Reservation,
    ReservationStatus, Role, Room, RoomStatus, RoomType, Testimonial, User,
};
use crate::repository::Repository;

/// InMemoryRepository
///
/// A `Repository` kept entirely in process memory. Used by the test suites and by local
/// runs started without `DATABASE_URL`. It enforces the same uniqueness, reference and
/// overlap rules as the Postgres schema so handlers observe identical behavior.
#[derive(Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    users: Vec<User>,
    business_units: Vec<BusinessUnit>,
    assignments: Vec<Assignment>,
    room_types: Vec<RoomType>,
    rooms: Vec<Room>,
    guests: Vec<Guest>,
    reservations: Vec<Reservation>,
    faqs: Vec<Faq>,
    testimonials: Vec<Testimonial>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user together with assignments in the given order. Test helper for building
    /// principals without going through sign-in and setup.
    pub async fn seed_user(&self, user: User, assignments: Vec<(BusinessUnit, Role)>) {
        let mut store = self.store.write().await;
        // Seeded grants get strictly increasing timestamps so list order is seed order.
        let mut stamp = store
            .assignments
            .iter()
            .filter(|a| a.user_id == user.id)
            .map(|a| a.created_at + Duration::microseconds(1))
            .max()
            .map_or_else(Utc::now, |next| next.max(Utc::now()));
        for (unit, role) in assignments {
            if !store.business_units.iter().any(|u| u.id == unit.id) {
                store.business_units.push(unit.clone());
            }
            let mut assignment = Assignment::new(user.id, unit.id.clone(), role);
            assignment.created_at = stamp;
            store.assignments.push(assignment);
            stamp += Duration::microseconds(1);
        }
        store.users.retain(|u| u.id != user.id);
        store.users.push(user);
    }
}

fn remove_scoped<T>(
    rows: &mut Vec<T>,
    bu: &BusinessUnitId,
    id: Uuid,
    key: impl Fn(&T) -> (&BusinessUnitId, Uuid),
) -> Result<(), RepoError> {
    let before = rows.len();
    rows.retain(|row| {
        let (row_bu, row_id) = key(row);
        !(row_bu == bu && row_id == id)
    });
    if rows.len() == before {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

fn replace_scoped<T: Clone>(
    rows: &mut [T],
    updated: T,
    key: impl Fn(&T) -> (&BusinessUnitId, Uuid),
) -> Result<T, RepoError> {
    let (bu, id) = {
        let (bu, id) = key(&updated);
        (bu.clone(), id)
    };
    let slot = rows
        .iter_mut()
        .find(|row| {
            let (row_bu, row_id) = key(&**row);
            *row_bu == bu && row_id == id
        })
        .ok_or(RepoError::NotFound)?;
    *slot = updated.clone();
    Ok(updated)
}

fn count<T>(rows: &[T], pred: impl Fn(&T) -> bool) -> i64 {
    rows.iter().filter(|row| pred(row)).count() as i64
}

impl Store {
    fn room_number_taken(&self, room: &Room) -> bool {
        self.rooms.iter().any(|r| {
            r.business_unit_id == room.business_unit_id && r.number == room.number && r.id != room.id
        })
    }

    fn reservation_conflicts(&self, reservation: &Reservation) -> bool {
        self.reservations
            .iter()
            .any(|existing| existing.conflicts_with(reservation))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn upsert_user(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        match store.users.iter().position(|u| u.id == user.id) {
            Some(index) => store.users[index].email = user.email.clone(),
            None => store.users.push(user.clone()),
        }
        Ok(user)
    }

    async fn list_assignments(&self, user_id: Uuid) -> Result<Vec<Assignment>, RepoError> {
        let store = self.store.read().await;
        let mut assignments: Vec<Assignment> = store
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        assignments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(assignments)
    }

    async fn get_business_unit(&self, id: &BusinessUnitId) -> Result<Option<BusinessUnit>, RepoError> {
        let store = self.store.read().await;
        Ok(store.business_units.iter().find(|u| &u.id == id).cloned())
    }

    async fn create_business_unit(
        &self,
        unit: BusinessUnit,
        owner: Assignment,
    ) -> Result<BusinessUnit, RepoError> {
        let mut store = self.store.write().await;
        if store.business_units.iter().any(|u| u.id == unit.id) {
            return Err(RepoError::Conflict(format!("business unit {} already exists", unit.id)));
        }
        store.business_units.push(unit.clone());
        store.assignments.push(owner);
        Ok(unit)
    }

    async fn get_dashboard_stats(&self, bu: &BusinessUnitId) -> Result<DashboardStats, RepoError> {
        let store = self.store.read().await;
        Ok(DashboardStats {
            room_types: count(&store.room_types, |r| &r.business_unit_id == bu),
            rooms: count(&store.rooms, |r| &r.business_unit_id == bu),
            available_rooms: count(&store.rooms, |r| {
                &r.business_unit_id == bu && r.status == RoomStatus::Available
            }),
            guests: count(&store.guests, |g| &g.business_unit_id == bu),
            pending_reservations: count(&store.reservations, |r| {
                &r.business_unit_id == bu && r.status == ReservationStatus::Pending
            }),
            active_reservations: count(&store.reservations, |r| {
                &r.business_unit_id == bu && r.status == ReservationStatus::CheckedIn
            }),
            faqs: count(&store.faqs, |f| &f.business_unit_id == bu),
            unpublished_testimonials: count(&store.testimonials, |t| {
                &t.business_unit_id == bu && !t.is_published
            }),
        })
    }

    // --- ROOM TYPES ---

    async fn list_room_types(&self, bu: &BusinessUnitId) -> Result<Vec<RoomType>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .room_types
            .iter()
            .filter(|r| &r.business_unit_id == bu)
            .cloned()
            .collect())
    }

    async fn get_room_type(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<RoomType>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .room_types
            .iter()
            .find(|r| &r.business_unit_id == bu && r.id == id)
            .cloned())
    }

    async fn insert_room_type(&self, room_type: RoomType) -> Result<RoomType, RepoError> {
        self.store.write().await.room_types.push(room_type.clone());
        Ok(room_type)
    }

    async fn save_room_type(&self, room_type: RoomType) -> Result<RoomType, RepoError> {
        let mut store = self.store.write().await;
        replace_scoped(&mut store.room_types, room_type, |r| (&r.business_unit_id, r.id))
    }

    async fn delete_room_type(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if !store.room_types.iter().any(|r| r.id == id && &r.business_unit_id == bu) {
            return Err(RepoError::NotFound);
        }
        if store.rooms.iter().any(|r| r.room_type_id == id) {
            return Err(RepoError::Conflict("room type is still used by rooms".to_string()));
        }
        remove_scoped(&mut store.room_types, bu, id, |r| (&r.business_unit_id, r.id))
    }

    // --- ROOMS ---

    async fn list_rooms(&self, bu: &BusinessUnitId) -> Result<Vec<Room>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .rooms
            .iter()
            .filter(|r| &r.business_unit_id == bu)
            .cloned()
            .collect())
    }

    async fn get_room(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Room>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .rooms
            .iter()
            .find(|r| &r.business_unit_id == bu && r.id == id)
            .cloned())
    }

    async fn insert_room(&self, room: Room) -> Result<Room, RepoError> {
        let mut store = self.store.write().await;
        if store.room_number_taken(&room) {
            return Err(RepoError::Conflict(format!("room number {} already exists", room.number)));
        }
        store.rooms.push(room.clone());
        Ok(room)
    }

    async fn save_room(&self, room: Room) -> Result<Room, RepoError> {
        let mut store = self.store.write().await;
        if store.room_number_taken(&room) {
            return Err(RepoError::Conflict(format!("room number {} already exists", room.number)));
        }
        replace_scoped(&mut store.rooms, room, |r| (&r.business_unit_id, r.id))
    }

    async fn delete_room(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if !store.rooms.iter().any(|r| r.id == id && &r.business_unit_id == bu) {
            return Err(RepoError::NotFound);
        }
        if store.reservations.iter().any(|r| r.room_id == id) {
            return Err(RepoError::Conflict("room has reservations".to_string()));
        }
        remove_scoped(&mut store.rooms, bu, id, |r| (&r.business_unit_id, r.id))
    }

    // --- GUESTS ---

    async fn list_guests(&self, bu: &BusinessUnitId) -> Result<Vec<Guest>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .guests
            .iter()
            .filter(|g| &g.business_unit_id == bu)
            .cloned()
            .collect())
    }

    async fn get_guest(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Guest>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .guests
            .iter()
            .find(|g| &g.business_unit_id == bu && g.id == id)
            .cloned())
    }

    async fn insert_guest(&self, guest: Guest) -> Result<Guest, RepoError> {
        self.store.write().await.guests.push(guest.clone());
        Ok(guest)
    }

    async fn save_guest(&self, guest: Guest) -> Result<Guest, RepoError> {
        let mut store = self.store.write().await;
        replace_scoped(&mut store.guests, guest, |g| (&g.business_unit_id, g.id))
    }

    async fn delete_guest(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if !store.guests.iter().any(|g| g.id == id && &g.business_unit_id == bu) {
            return Err(RepoError::NotFound);
        }
        if store.reservations.iter().any(|r| r.guest_id == id) {
            return Err(RepoError::Conflict("guest has reservations".to_string()));
        }
        remove_scoped(&mut store.guests, bu, id, |g| (&g.business_unit_id, g.id))
    }

    // --- RESERVATIONS ---

    async fn list_reservations(
        &self,
        bu: &BusinessUnitId,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, RepoError> {
        let store = self.store.read().await;
        let mut reservations: Vec<Reservation> = store
            .reservations
            .iter()
            .filter(|r| &r.business_unit_id == bu && status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        reservations.sort_by(|a, b| {
            a.check_in
                .cmp(&b.check_in)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(reservations)
    }

    async fn get_reservation(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Reservation>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .reservations
            .iter()
            .find(|r| &r.business_unit_id == bu && r.id == id)
            .cloned())
    }

    async fn find_overlapping_reservation(
        &self,
        bu: &BusinessUnitId,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Option<Uuid>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .reservations
            .iter()
            .filter(|r| &r.business_unit_id == bu && r.room_id == room_id)
            .filter(|r| r.status.holds_room() && Some(r.id) != exclude)
            .filter(|r| r.check_in < check_out && check_in < r.check_out)
            .min_by_key(|r| r.check_in)
            .map(|r| r.id))
    }

    async fn insert_reservation(&self, reservation: Reservation) -> Result<Reservation, RepoError> {
        let mut store = self.store.write().await;
        if store.reservation_conflicts(&reservation) {
            return Err(RepoError::Conflict("room is already booked for these dates".to_string()));
        }
        store.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn save_reservation(&self, reservation: Reservation) -> Result<Reservation, RepoError> {
        let mut store = self.store.write().await;
        if store.reservation_conflicts(&reservation) {
            return Err(RepoError::Conflict("room is already booked for these dates".to_string()));
        }
        replace_scoped(&mut store.reservations, reservation, |r| (&r.business_unit_id, r.id))
    }

    async fn delete_reservation(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        remove_scoped(&mut store.reservations, bu, id, |r| (&r.business_unit_id, r.id))
    }

    // --- FAQS ---

    async fn list_faqs(&self, bu: &BusinessUnitId) -> Result<Vec<Faq>, RepoError> {
        let store = self.store.read().await;
        let mut faqs: Vec<Faq> = store
            .faqs
            .iter()
            .filter(|f| &f.business_unit_id == bu)
            .cloned()
            .collect();
        faqs.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(faqs)
    }

    async fn get_faq(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Faq>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .faqs
            .iter()
            .find(|f| &f.business_unit_id == bu && f.id == id)
            .cloned())
    }

    async fn insert_faq(&self, faq: Faq) -> Result<Faq, RepoError> {
        self.store.write().await.faqs.push(faq.clone());
        Ok(faq)
    }

    async fn save_faq(&self, faq: Faq) -> Result<Faq, RepoError> {
        let mut store = self.store.write().await;
        replace_scoped(&mut store.faqs, faq, |f| (&f.business_unit_id, f.id))
    }

    async fn delete_faq(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        remove_scoped(&mut store.faqs, bu, id, |f| (&f.business_unit_id, f.id))
    }

    // --- TESTIMONIALS ---

    async fn list_testimonials(
        &self,
        bu: &BusinessUnitId,
        published: Option<bool>,
    ) -> Result<Vec<Testimonial>, RepoError> {
        let store = self.store.read().await;
        // Newest first, matching the Postgres ordering.
        Ok(store
            .testimonials
            .iter()
            .rev()
            .filter(|t| &t.business_unit_id == bu && published.is_none_or(|p| t.is_published == p))
            .cloned()
            .collect())
    }

    async fn get_testimonial(&self, bu: &BusinessUnitId, id: Uuid) -> Result<Option<Testimonial>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .testimonials
            .iter()
            .find(|t| &t.business_unit_id == bu && t.id == id)
            .cloned())
    }

    async fn insert_testimonial(&self, testimonial: Testimonial) -> Result<Testimonial, RepoError> {
        self.store.write().await.testimonials.push(testimonial.clone());
        Ok(testimonial)
    }

    async fn save_testimonial(&self, testimonial: Testimonial) -> Result<Testimonial, RepoError> {
        let mut store = self.store.write().await;
        replace_scoped(&mut store.testimonials, testimonial, |t| (&t.business_unit_id, t.id))
    }

    async fn delete_testimonial(&self, bu: &BusinessUnitId, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        remove_scoped(&mut store.testimonials, bu, id, |t| (&t.business_unit_id, t.id))
    }
}
