use super::*;

#[test]
fn catalog_errors_map_to_404_and_422() {
    let err = ApiError::from(CatalogError::NotFound { kind: "warehouse", id: "W00009".into() });
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.code, "E_NOT_FOUND");
    assert_eq!(err.message, "warehouse not found: W00009");

    let err = ApiError::from(CatalogError::from(ValidationError::new("name", "too short")));
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.code, "E_VALIDATION");
    assert_eq!(err.field, Some("name"));
}

#[test]
fn stock_side_effects_of_catalog_changes_keep_the_ledger_status() {
    let err = ApiError::from(CatalogError::from(InventoryError::QuantityOverflow { max: 7 }));
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.code, "E_QUANTITY_OVERFLOW");
}

#[test]
fn invalid_field_is_bad_request_naming_the_field() {
    let err = ApiError::invalid_field(ValidationError::new("phone", "Invalid phone number format"));
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.field, Some("phone"));
    assert_eq!(err.message, "Invalid phone number format");
}

#[test]
fn inventory_errors_map_by_kind() {
    assert_eq!(ApiError::from(InventoryError::ProductNotFound("P1".into())).status, StatusCode::NOT_FOUND);
    assert_eq!(ApiError::from(InventoryError::InvalidQuantity).status, StatusCode::BAD_REQUEST);

    let err = ApiError::from(InventoryError::InsufficientStock { requested: 5, available: 2 });
    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(err.code, "E_INSUFFICIENT_STOCK");

    let err = ApiError::from(InventoryError::QuantityOverflow { max: 9 });
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.code, "E_QUANTITY_OVERFLOW");
}

#[test]
fn order_errors_map_by_kind() {
    assert_eq!(ApiError::from(OrderError::NotFound("ORD1".into())).status, StatusCode::NOT_FOUND);
    assert_eq!(ApiError::from(OrderError::InvalidStatus("lost".into())).status, StatusCode::BAD_REQUEST);
}

#[test]
fn bin_error_is_bad_request_with_message() {
    let err = ApiError::from(BinError::MissingFields);
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Name and location are required.");
}

#[test]
fn unauthorized_is_401() {
    let response = ApiError::unauthorized().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
