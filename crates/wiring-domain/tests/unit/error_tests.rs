//! Error taxonomy tests

use wiring_domain::error::Error;
use wiring_domain::value_objects::Token;

#[test]
fn test_circular_dependency_display_lists_path() {
    let a = Token::symbol("A");
    let b = Token::symbol("B");
    let err = Error::CircularDependency {
        path: vec![a.clone(), b, a],
    };

    assert_eq!(
        err.to_string(),
        "Circular dependency detected: Symbol(A) -> Symbol(B) -> Symbol(A)"
    );
}

#[test]
fn test_provider_failed_wraps_foreign_errors() {
    let token = Token::symbol("DB");
    let err = Error::provider_failed(&token, anyhow::anyhow!("connection refused"));

    match &err {
        Error::ProviderFailed {
            token: failed,
            message,
            source,
        } => {
            assert_eq!(failed, &token);
            assert_eq!(message, "connection refused");
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_provider_failed_passes_container_errors_through() {
    let token = Token::symbol("DB");
    let missing = Token::symbol("URL");
    let inner = Error::token_not_found("database", &missing);

    let err = Error::provider_failed(&token, anyhow::Error::new(inner));
    assert!(matches!(err, Error::TokenNotFound { token, .. } if token == missing));
}

#[test]
fn test_async_rejection_wraps_foreign_errors() {
    let token = Token::symbol("DB");
    let err = Error::async_rejection(&token, anyhow::anyhow!("timeout"));

    assert!(matches!(err, Error::AsyncProviderRejection { .. }));
    assert_eq!(err.to_string(), "Async provider for Symbol(DB) rejected: timeout");
}

#[test]
fn test_errors_are_clonable() {
    let err = Error::async_rejection(&Token::symbol("DB"), anyhow::anyhow!("boom"));
    let copy = err.clone();
    assert_eq!(err.to_string(), copy.to_string());
    assert!(copy.is_resolution_error());
    assert!(!Error::ShutDown.is_resolution_error());
}
