//! Page host errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Page closed")]
    Closed,

    #[error("Host error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found() {
        let err = HostError::ElementNotFound("SearchCriteria".to_string());
        assert!(err.to_string().contains("SearchCriteria"));
    }

    #[test]
    fn test_closed() {
        assert_eq!(HostError::Closed.to_string(), "Page closed");
    }
}
