use chrono::Utc;
use hotel_admin::models::{
    BusinessUnit, BusinessUnitId, BusinessUnitSummary, CreateGuestRequest, CreateRoomRequest,
    DashboardResponse, Guest, Role, Room, RoomStatus, UpdateRoomRequest,
};
use serde_json::json;
use uuid::Uuid;

// --- Wire Format ---

#[test]
fn test_business_unit_id_serializes_as_plain_string() {
    let summary = BusinessUnitSummary {
        id: BusinessUnitId::from("biz_1"),
        name: "Harbor Hotel".to_string(),
        role: Role::Manager,
        is_current: true,
    };
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(
        value,
        json!({ "id": "biz_1", "name": "Harbor Hotel", "role": "manager", "is_current": true })
    );
}

#[test]
fn test_dashboard_response_nests_unit_and_badges() {
    let response = DashboardResponse {
        business_unit: BusinessUnit {
            id: BusinessUnitId::from("biz_1"),
            name: "Harbor Hotel".to_string(),
            created_at: Utc::now(),
        },
        role: Role::Owner,
        badges: Default::default(),
    };
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["business_unit"]["id"], "biz_1");
    assert_eq!(value["role"], "owner");
    assert_eq!(value["badges"]["pending_reservations"], 0);
    assert_eq!(value["badges"]["unpublished_testimonials"], 0);
}

#[test]
fn test_unknown_role_is_rejected_on_input() {
    let parsed: Result<Role, _> = serde_json::from_value(json!("superuser"));
    assert!(parsed.is_err());
}

#[test]
fn test_generated_business_unit_ids_are_url_safe_and_distinct() {
    let a = BusinessUnitId::generate();
    let b = BusinessUnitId::generate();

    assert_ne!(a, b);
    assert!(a.as_str().starts_with("biz_"));
    assert!(a.as_str().chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
}

// --- Validation ---

#[test]
fn test_new_room_defaults_to_available() {
    let room = Room::new(
        BusinessUnitId::from("biz_1"),
        CreateRoomRequest {
            room_type_id: Uuid::new_v4(),
            number: " 101 ".to_string(),
            floor: 1,
            status: None,
        },
    );

    assert_eq!(room.status, RoomStatus::Available);
    assert_eq!(room.number, "101");
    assert!(room.validate().is_ok());
}

#[test]
fn test_room_patch_cannot_blank_the_number() {
    let mut room = Room::new(
        BusinessUnitId::from("biz_1"),
        CreateRoomRequest {
            room_type_id: Uuid::new_v4(),
            number: "101".to_string(),
            floor: 1,
            status: None,
        },
    );
    room.apply(UpdateRoomRequest {
        number: Some("   ".to_string()),
        ..Default::default()
    });

    assert!(room.validate().is_err());
}

#[test]
fn test_guest_email_needs_an_at_sign() {
    let guest = Guest::new(
        BusinessUnitId::from("biz_1"),
        CreateGuestRequest {
            full_name: "Ana Lima".to_string(),
            email: "ana.example.com".to_string(),
            phone: None,
        },
    );
    assert!(guest.validate().is_err());
}
