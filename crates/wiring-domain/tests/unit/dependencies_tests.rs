//! Dependency list tests

use std::sync::Arc;

use wiring_domain::error::Error;
use wiring_domain::ports::Dependencies;
use wiring_domain::value_objects::{Instance, Token};

fn entry<T: Send + Sync + 'static>(token: &Token, value: T) -> (Token, Instance) {
    (token.clone(), Arc::new(value))
}

#[test]
fn test_dependencies_are_consumed_in_order() {
    let a = Token::symbol("A");
    let b = Token::symbol("B");
    let mut deps = Dependencies::new(
        Token::symbol("CONSUMER"),
        vec![entry(&a, 1_u32), entry(&b, "two".to_string())],
    );

    assert_eq!(deps.remaining(), 2);
    assert_eq!(*deps.next::<u32>().unwrap(), 1);
    assert_eq!(deps.next::<String>().unwrap().as_str(), "two");
    assert!(deps.is_empty());
}

#[test]
fn test_dependencies_type_mismatch_names_token() {
    let a = Token::symbol("A");
    let mut deps = Dependencies::new(Token::symbol("CONSUMER"), vec![entry(&a, 1_u32)]);

    match deps.next::<String>() {
        Err(Error::TypeMismatch { token, expected }) => {
            assert_eq!(token, a);
            assert!(expected.contains("String"));
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}

#[test]
fn test_dependencies_exhausted() {
    let consumer = Token::symbol("CONSUMER");
    let mut deps = Dependencies::empty(consumer.clone());

    match deps.next_instance() {
        Err(Error::ProviderFailed { token, .. }) => assert_eq!(token, consumer),
        other => panic!("expected provider failure, got {:?}", other.map(|_| ())),
    }
}
