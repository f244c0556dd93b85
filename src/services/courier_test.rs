use super::*;
use crate::state::test_helpers;

fn courier_input(name: &str) -> CourierInput {
    CourierInput {
        name: name.into(),
        image: "https://images.example.com/courier.png".into(),
        current_location: "Leicester, UK".into(),
        destination: "Manchester, UK".into(),
        stops: vec!["Derby, UK".into(), "  ".into()],
        route: None,
        eta: None,
        status: None,
        phone: "+44 7700 900123".into(),
        vehicle: "Van - LD21 XYZ".into(),
        deliveries: None,
        total_distance: None,
    }
}

#[tokio::test]
async fn create_defaults_and_drops_blank_stops() {
    let state = test_helpers::test_app_state();
    let courier = create_courier(&state, courier_input("John Doe")).await.unwrap();
    assert_eq!(courier.id, "C00001");
    assert_eq!(courier.status, CourierStatus::Active);
    assert_eq!(courier.stops, vec!["Derby, UK".to_string()]);
    assert_eq!(courier.deliveries, 0);
}

#[tokio::test]
async fn image_must_be_a_url() {
    let state = test_helpers::test_app_state();
    let mut input = courier_input("John Doe");
    input.image = "not a url".into();
    let err = create_courier(&state, input).await.unwrap_err();
    match err {
        CatalogError::Invalid(v) => {
            assert_eq!(v.field, "image");
            assert_eq!(v.message, "Please enter a valid image URL");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn phone_and_status_are_validated() {
    let state = test_helpers::test_app_state();
    let mut input = courier_input("John Doe");
    input.phone = "0770".into();
    assert!(matches!(
        create_courier(&state, input.clone()).await,
        Err(CatalogError::Invalid(ValidationError { field: "phone", .. }))
    ));

    input.phone = "+44 7700 900123".into();
    input.status = Some("on_break".into());
    assert!(matches!(
        create_courier(&state, input).await,
        Err(CatalogError::Invalid(ValidationError { field: "status", .. }))
    ));
}

#[tokio::test]
async fn update_preserves_route_and_deliveries() {
    let state = test_helpers::test_app_state();
    let mut input = courier_input("Jane Smith");
    input.route = Some(CourierRoute { current: [51.5, -0.12], destination: [52.48, -1.89], stops: vec![] });
    input.deliveries = Some(3);
    let created = create_courier(&state, input).await.unwrap();

    let mut edit = courier_input("Jane Smith");
    edit.status = Some("inactive".into());
    let updated = update_courier(&state, &created.id, edit).await.unwrap();
    assert_eq!(updated.status, CourierStatus::Inactive);
    assert_eq!(updated.deliveries, 3);
    assert_eq!(updated.route, created.route);
    assert!(updated.last_update >= created.last_update);
}

#[tokio::test]
async fn list_filters_active_couriers() {
    let state = test_helpers::test_app_state();
    create_courier(&state, courier_input("John Doe")).await.unwrap();
    let mut inactive = courier_input("Michael Brown");
    inactive.status = Some("inactive".into());
    inactive.vehicle = "Van - GS21 XYZ".into();
    create_courier(&state, inactive).await.unwrap();

    let active = list_couriers(&state, &ListQuery { status: Some("active".into()), ..ListQuery::default() }).await;
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].name, "John Doe");

    let by_vehicle = list_couriers(&state, &ListQuery { search: Some("gs21".into()), ..ListQuery::default() }).await;
    assert_eq!(by_vehicle.items[0].name, "Michael Brown");
}

#[tokio::test]
async fn delete_removes_courier() {
    let state = test_helpers::test_app_state();
    let created = create_courier(&state, courier_input("John Doe")).await.unwrap();
    delete_courier(&state, &created.id).await.unwrap();
    assert!(matches!(get_courier(&state, &created.id).await, Err(CatalogError::NotFound { .. })));
}

#[test]
fn courier_input_parses_rfc3339_eta() {
    let input: CourierInput = serde_json::from_str(
        r#"{"name":"John","image":"https://x.io/a.png","eta":"2026-10-18T12:00:00Z","route":{"current":[1.0,2.0],"destination":[3.0,4.0]}}"#,
    )
    .unwrap();
    assert_eq!(input.eta.map(|t| t.hour()), Some(12));
    assert!(input.route.unwrap().stops.is_empty());
    assert!(input.phone.is_empty());
}
