use shortener::errors::ShortenerError;
use shortener::utils::UrlValidationError;

#[test]
fn test_error_codes() {
    assert_eq!(ShortenerError::validation("x").code(), "E001");
    assert_eq!(ShortenerError::storage("x").code(), "E002");
    assert_eq!(ShortenerError::fatal_startup("x").code(), "E003");
    assert_eq!(ShortenerError::config("x").code(), "E004");
    assert_eq!(ShortenerError::file_operation("x").code(), "E005");
    assert_eq!(ShortenerError::serialization("x").code(), "E006");
}

#[test]
fn test_only_startup_is_fatal() {
    assert!(ShortenerError::fatal_startup("cannot open").is_fatal());
    assert!(!ShortenerError::storage("commit failed").is_fatal());
    assert!(!ShortenerError::validation("bad url").is_fatal());
}

#[test]
fn test_format_simple() {
    let err = ShortenerError::storage("store is closed");
    assert_eq!(err.format_simple(), "Storage Error: store is closed");
    assert_eq!(err.to_string(), err.format_simple());
    assert_eq!(err.message(), "store is closed");
}

#[test]
fn test_format_colored_contains_parts() {
    let err = ShortenerError::validation("URL cannot be empty");
    let out = err.format_colored();
    assert!(out.contains("E001"));
    assert!(out.contains("URL cannot be empty"));
}

#[test]
fn test_from_url_validation_error() {
    let err: ShortenerError = UrlValidationError::EmptyUrl.into();
    assert!(matches!(err, ShortenerError::Validation(_)));
    assert_eq!(err.message(), "URL cannot be empty");
}

#[test]
fn test_from_io_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: ShortenerError = io.into();
    assert!(matches!(err, ShortenerError::FileOperation(_)));
}
