//! Tests for error context extension

use stampede_domain::Error;
use stampede_infrastructure::error_ext::ErrorContext;
use std::error::Error as _;
use std::io;

fn failing() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing file"))
}

#[test]
fn test_context_wraps_as_infrastructure_error() {
    let err = failing().context("Reading config").unwrap_err();

    assert!(matches!(err, Error::Infrastructure { .. }));
    assert!(err.to_string().contains("Reading config: missing file"));
    assert!(err.source().is_some());
}

#[test]
fn test_with_context_is_lazy() {
    let ok: Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 1);

    let err = failing()
        .with_context(|| format!("Opening {}", "stampede.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("Opening stampede.toml"));
}

#[test]
fn test_config_context() {
    let err = failing().config_context("Bad config").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_store_context() {
    let err = failing().store_context("Redis GET failed").unwrap_err();
    assert!(err.is_store());
    assert!(err.to_string().contains("Redis GET failed"));
}
