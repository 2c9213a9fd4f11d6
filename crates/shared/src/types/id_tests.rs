use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = ProjectId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = AnalyticAccountId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_default_is_unique() {
    assert_ne!(MoveId::default(), MoveId::default());
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = MoveLineId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = AnalyticAccountId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_trims_whitespace() {
    let uuid = Uuid::new_v4();
    let id = AnalyticAccountId::from_str(&format!(" {uuid} ")).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(AnalyticAccountId::from_str("invalid").is_err());
    assert!(AnalyticAccountId::from_str("42").is_err());
}

#[test]
fn test_typed_id_ordering_follows_uuid() {
    let a = TaxId::from_uuid(Uuid::nil());
    let b = TaxId::from_uuid(Uuid::from_u128(u128::MAX));
    assert!(a < b);
}
