use thiserror::Error;
use vendor_cards_types::VendorId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unknown card id: {0}")]
    UnknownCardId(VendorId),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_filter() {
        let err = Error::InvalidFilter("count must be -1 or greater, got -2".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid filter: count must be -1 or greater, got -2"
        );
    }

    #[test]
    fn test_error_display_store_unavailable() {
        let err = Error::StoreUnavailable("vendors.json: permission denied".to_string());
        assert_eq!(
            err.to_string(),
            "Store unavailable: vendors.json: permission denied"
        );
    }

    #[test]
    fn test_error_display_unknown_card() {
        let err = Error::UnknownCardId(VendorId::from(99u64));
        assert_eq!(err.to_string(), "Unknown card id: 99");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("rowSize must be at least 1".to_string());
        assert_eq!(err.to_string(), "Config error: rowSize must be at least 1");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("\"not a number\"").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(Error::InvalidFilter("bad".to_string()))
        }
        assert!(returns_error().is_err());
    }
}
