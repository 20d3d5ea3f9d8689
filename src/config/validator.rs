//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Project and stylesheet names must be non-empty
//! - At least one header, each a relative file name
//! - Version history entries must be non-empty
//! - Packages need a name, and a non-empty reference if one is given

use crate::config::schema::DocsmithConfig;
use crate::error::{DocsmithError, Result};
use std::path::Path;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &DocsmithConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_names(config));
    errors.extend(validate_headers(config));
    errors.extend(validate_versions(config));
    errors.extend(validate_packages(config));

    errors
}

fn validate_names(config: &DocsmithConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.project.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-project",
            "'project' must not be empty",
        ));
    }
    if config.breathe_project.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-breathe-project",
            "'breathe_project' must not be empty",
        ));
    }
    if config.stylesheet.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-stylesheet",
            "'stylesheet' must not be empty",
        ));
    }

    errors
}

fn validate_headers(config: &DocsmithConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.headers.is_empty() {
        errors.push(ValidationError::new(
            "no-headers",
            "'headers' must list at least one header",
        ));
    }

    for header in &config.headers {
        if header.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-header",
                "'headers' contains an empty entry",
            ));
        } else if Path::new(header).is_absolute() {
            errors.push(ValidationError::new(
                "absolute-header",
                format!("Header '{}' must be relative to the include directory", header),
            ));
        }
    }

    errors
}

fn validate_versions(config: &DocsmithConfig) -> Vec<ValidationError> {
    config
        .versions
        .versions()
        .iter()
        .filter(|v| v.trim().is_empty())
        .map(|_| ValidationError::new("empty-version", "'versions' contains an empty entry"))
        .collect()
}

fn validate_packages(config: &DocsmithConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for package in &config.environment.packages {
        if package.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-package",
                "'environment.packages' contains a package without a name",
            ));
        }
        if package
            .reference
            .as_deref()
            .is_some_and(|r| r.trim().is_empty())
        {
            errors.push(ValidationError::new(
                "empty-reference",
                format!("Package '{}' has an empty reference", package.name),
            ));
        }
    }

    errors
}

/// Validate configuration, returning an error if invalid.
pub fn validate(config: &DocsmithConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DocsmithError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
