//! Configuration validation.
//!
//! Validation outcomes are always returned as data ([`ValidationResult`]),
//! never as errors; callers decide what to do with them (the CLI turns
//! them into an exit code, the deployment gate into a pass/fail report).

pub mod facets;
pub mod report;

use serde::Serialize;

/// Accumulated outcome of a validation pass.
///
/// Missing required fields are errors; out-of-recommended-range values are
/// warnings. A result with warnings but no errors is still valid.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationResult {
    /// A passing result with no findings.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an error; the result becomes invalid.
    pub fn error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    /// Record a warning; validity is unaffected.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Fold another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_by_default() {
        let result = ValidationResult::valid();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_error_invalidates() {
        let mut result = ValidationResult::valid();
        result.error("missing title");

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["missing title"]);
    }

    #[test]
    fn test_warning_keeps_valid() {
        let mut result = ValidationResult::valid();
        result.warn("title longer than 60 characters");

        assert!(result.is_valid);
        assert!(result.has_warnings());
    }

    #[test]
    fn test_merge_unions_findings() {
        let mut a = ValidationResult::valid();
        a.warn("w1");

        let mut b = ValidationResult::valid();
        b.error("e1");
        b.warn("w2");

        a.merge(b);

        assert!(!a.is_valid);
        assert_eq!(a.errors, vec!["e1"]);
        assert_eq!(a.warnings, vec!["w1", "w2"]);
    }
}
