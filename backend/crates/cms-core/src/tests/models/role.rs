use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Admin.as_str(), "Admin");
    assert_eq!(Role::Editor.as_str(), "Editor");
    assert_eq!(Role::Author.as_str(), "Author");
    assert_eq!(Role::Contributor.as_str(), "Contributor");
}

#[test]
fn test_role_from_str_round_trips_every_variant() {
    for role in Role::ALL {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_role_from_str_ignores_case() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("CONTRIBUTOR").unwrap(), Role::Contributor);
}

#[test]
fn test_role_from_str_rejects_unknown() {
    assert!(Role::from_str("Owner").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_default_is_author() {
    assert_eq!(Role::default(), Role::Author);
}

#[test]
fn test_role_serializes_as_canonical_string() {
    let json = serde_json::to_string(&Role::Editor).unwrap();
    assert_eq!(json, "\"Editor\"");

    let parsed: Role = serde_json::from_str("\"Admin\"").unwrap();
    assert_eq!(parsed, Role::Admin);

    assert!(serde_json::from_str::<Role>("\"root\"").is_err());
}
