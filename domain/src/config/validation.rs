//! Configuration issues reported before any work starts.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A name that must not be blank is blank.
    EmptyName { field: String },
    /// The advisor prompt list does not have one entry per slot.
    AdvisorCount { found: usize },
    /// No evaluators are configured.
    NoEvaluators,
    /// Two evaluators report under the same score name.
    DuplicateEvaluator { name: String },
    /// A timeout of zero would fail every call.
    ZeroTimeout { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::NoEvaluators, "no evaluators configured");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: no evaluators configured");

        let issue = ConfigIssue::warning(
            ConfigIssueCode::ZeroTimeout {
                field: "gemini.timeout_secs".to_string(),
            },
            "timeout is zero",
        );
        assert!(!issue.is_error());
        assert!(issue.to_string().starts_with("warning:"));
    }
}
