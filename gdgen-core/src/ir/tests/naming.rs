//! Name sanitizer tests.

use pretty_assertions::assert_eq;

use crate::{
    ir::{NameSanitizer, NamingError, ReservedNames},
    tests::assert_matches,
};

use super::{RESERVED, sanitizer};

#[test]
fn test_reserved_names_are_case_insensitive() {
    assert!(RESERVED.contains("Node"));
    assert!(RESERVED.contains("node"));
    assert!(RESERVED.contains("NODE"));
    assert!(RESERVED.contains("os"));
    assert!(!RESERVED.contains("Nodes"));
    assert!(!RESERVED.contains(""));
}

#[test]
fn test_class_name_prefixes_reserved_names() {
    let names = sanitizer();
    assert_eq!(names.class_name("Node"), "PlayFabNode");
    assert_eq!(names.class_name("thread"), "PlayFabthread");
    assert_eq!(names.class_name("LoginResult"), "LoginResult");
}

#[test]
fn test_property_name_suffixes_reserved_names() {
    let names = sanitizer();
    assert_eq!(names.property_name("Thread"), "Thread_");
    assert_eq!(names.property_name("time"), "time_");
    assert_eq!(names.property_name("PlayFabId"), "PlayFabId");
}

#[test]
fn test_sanitized_names_are_never_reserved() {
    let names = sanitizer();
    for name in RESERVED.iter() {
        let class = names.class_name(name);
        assert!(!RESERVED.contains(&class), "`{class}` is reserved");
        assert!(class.starts_with("PlayFab"));

        let property = names.property_name(name);
        assert!(!RESERVED.contains(&property), "`{property}` is reserved");
    }
}

#[test]
fn test_sanitization_is_idempotent() {
    let names = sanitizer();
    for name in RESERVED.iter().chain(["LoginResult", "PlayFabNode", "Thread_"]) {
        let once = names.class_name(name).into_owned();
        assert_eq!(names.class_name(&once), once);

        let once = names.property_name(name).into_owned();
        assert_eq!(names.property_name(&once), once);
    }
}

#[test]
fn test_unreserved_names_pass_through() {
    let names = sanitizer();
    for name in ["", "Nodes", "SessionTicket", "EntityKey", "os_version"] {
        assert_eq!(names.class_name(name), name);
        assert_eq!(names.property_name(name), name);
    }
}

#[test]
fn test_brand_that_prefixes_into_reserved_name() {
    const RESERVED: ReservedNames = ReservedNames::new(&["Stream", "AudioStream"]);
    assert_matches!(
        NameSanitizer::new(RESERVED, "Audio"),
        Err(NamingError::PrefixCollision { reserved: "Stream", .. }),
    );
}

#[test]
fn test_empty_brand_is_rejected() {
    assert_matches!(
        NameSanitizer::new(RESERVED, ""),
        Err(NamingError::PrefixCollision { .. }),
    );
}

#[test]
fn test_suffix_into_reserved_name() {
    const RESERVED: ReservedNames = ReservedNames::new(&["Node", "Node_"]);
    assert_matches!(
        NameSanitizer::new(RESERVED, "PlayFab"),
        Err(NamingError::SuffixCollision { reserved: "Node" }),
    );
}
