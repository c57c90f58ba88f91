//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_origin(config, &mut result);
        Self::validate_registry(config, &mut result);
        Self::validate_timing(config, &mut result);

        result
    }

    fn validate_origin(config: &Config, result: &mut ValidationResult) {
        if config.origin.port == 0 {
            result.add_error(ValidationError::new("origin.port", "Port cannot be 0"));
        }

        if config.origin.hosts.is_empty() {
            result.add_warning(ValidationWarning::new(
                "origin.hosts",
                "No origin hosts configured, origin pages will never be recognized",
            ));
        }

        if let Err(e) = Url::parse(&config.origin.default_base) {
            result.add_error(ValidationError::new(
                "origin.default_base",
                format!("Invalid URL: {}", e),
            ));
        }

        if !config.origin.endpoint_path.starts_with('/') {
            result.add_error(ValidationError::new(
                "origin.endpoint_path",
                "Endpoint path must start with '/'",
            ));
        }
    }

    fn validate_registry(config: &Config, result: &mut ValidationResult) {
        let urls = [
            ("registry.search_url", &config.registry.search_url),
            ("registry.results_prefix", &config.registry.results_prefix),
            ("registry.profile_prefix", &config.registry.profile_prefix),
        ];
        for (path, value) in urls {
            if let Err(e) = Url::parse(value) {
                result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e)));
            }
        }

        if config.registry.search_field_id.is_empty() {
            result.add_error(ValidationError::new(
                "registry.search_field_id",
                "Search field id cannot be empty",
            ));
        }
        if config.registry.submit_button_id.is_empty() {
            result.add_error(ValidationError::new(
                "registry.submit_button_id",
                "Submit button id cannot be empty",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        if config.timing.watch_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "timing.watch_interval_ms",
                "watch_interval_ms must be greater than 0",
            ));
        } else if config.timing.watch_interval_ms < 500 {
            result.add_warning(ValidationWarning::new(
                "timing.watch_interval_ms",
                "watch_interval_ms below 500 polls the store very aggressively",
            ));
        }

        if config.timing.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "timing.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
