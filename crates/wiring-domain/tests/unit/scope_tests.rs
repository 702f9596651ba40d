//! Scope tests

use wiring_domain::value_objects::Scope;

#[test]
fn test_scope_default_is_singleton() {
    assert_eq!(Scope::default(), Scope::Singleton);
    assert!(Scope::Singleton.is_cached());
    assert!(!Scope::Transient.is_cached());
}

#[test]
fn test_scope_parse() {
    assert_eq!("singleton".parse::<Scope>().unwrap(), Scope::Singleton);
    assert_eq!(" Transient ".parse::<Scope>().unwrap(), Scope::Transient);
    assert!("request".parse::<Scope>().is_err());
}

#[test]
fn test_scope_display_round_trips_through_parse() {
    for scope in [Scope::Singleton, Scope::Transient] {
        assert_eq!(scope.to_string().parse::<Scope>().unwrap(), scope);
    }
}
