//! Error context extension tests

use std::io;

use wiring_domain::error::Error;
use wiring_infrastructure::error_ext::ErrorContext;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
}

#[test]
fn test_context_wraps_as_configuration_error() {
    let err = io_failure().context("Failed to read config").unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(
        err.to_string(),
        "Configuration error: Failed to read config: no such file"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_with_context_is_lazy() {
    let ok: Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context built for a success") })
        .expect("ok");

    assert_eq!(value, 1);
}

#[test]
fn test_io_context_wraps_as_io_error() {
    let err = io_failure().io_context("Failed to write").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().starts_with("I/O error: Failed to write"));
}
