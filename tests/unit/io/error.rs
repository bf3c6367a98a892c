//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use tilegrid::GridError;
    use tilegrid::io::error::{host_failure, inconsistency, invalid_configuration};

    // Tests file system errors chain their source
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = GridError::FileSystem {
            path: "/tmp/grid.png".into(),
            operation: "create directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/grid.png"));
    }

    // Tests invalid configuration messages carry every field
    #[test]
    fn test_invalid_configuration_message() {
        let error = invalid_configuration("rows", &0, &"must lie within 1..=50");

        let message = error.to_string();
        assert!(message.contains("rows"));
        assert!(message.contains('0'));
        assert!(message.contains("1..=50"));
        assert!(error.source().is_none());
    }

    // Tests host failures name the operation
    #[test]
    fn test_host_failure_message() {
        let error = host_failure("instantiate", &"template object is not live");
        let message = error.to_string();

        assert!(message.contains("instantiate"));
        assert!(message.contains("template object is not live"));
        assert!(!error.is_structural());
    }

    // Tests structural errors are recognised as recoverable by rebuild
    #[test]
    fn test_inconsistency_is_structural() {
        let error = inconsistency(&"2 of 9 indexed tiles are no longer live");

        assert!(error.is_structural());
        assert!(error.to_string().contains("2 of 9"));
    }

    // Tests conversion from I/O errors
    #[test]
    fn test_from_io_error() {
        let error: GridError = std::io::Error::other("disk full").into();
        assert!(matches!(error, GridError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
    }

    // Tests invalid argument formatting
    #[test]
    fn test_invalid_argument_message() {
        let error = GridError::InvalidArgument {
            argument: "step",
            reason: "expected ROWSxCOLUMNS".to_string(),
        };
        assert!(error.to_string().contains("step"));
    }
}
