// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    // Version strings become path segments of the derived file names.
    static ref VERSION_PATTERN: Regex = Regex::new(r"^[0-9A-Za-z][0-9A-Za-z._-]*$").unwrap();
}

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_version_string(version: &str) -> Result<()> {
        if version.is_empty() {
            return Err(PipelineError::Validation(
                "Version string is empty".to_string(),
            ));
        }

        if !VERSION_PATTERN.is_match(version) {
            return Err(PipelineError::Validation(format!(
                "Version string is not file-name safe: {}",
                version
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }
}
