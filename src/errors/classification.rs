use super::types::VultesterError;

/// Whether an error is the caller's fault or means the engine cannot serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The request is rejected; the engine stays healthy.
    Rejected,
    /// Startup must abort, or the run hit an authoring bug.
    Fatal,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub disposition: Disposition,
}

impl ErrorClassification {
    pub fn is_rejection(&self) -> bool {
        self.disposition == Disposition::Rejected
    }
}

impl VultesterError {
    /// Classify this error to determine its type and who is responsible for it.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Caller errors
            VultesterError::ContradictoryFacts { .. } => ErrorClassification {
                error_type: "ContradictoryFactsError",
                disposition: Disposition::Rejected,
            },
            VultesterError::UnknownMethod(_) => ErrorClassification {
                error_type: "UnknownMethodError",
                disposition: Disposition::Rejected,
            },
            VultesterError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                disposition: Disposition::Rejected,
            },
            VultesterError::InvalidRequest(_) => ErrorClassification {
                error_type: "InvalidRequest",
                disposition: Disposition::Rejected,
            },
            VultesterError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                disposition: Disposition::Rejected,
            },

            // Engine cannot continue
            VultesterError::RuleBase(_) => ErrorClassification {
                error_type: "RuleBaseError",
                disposition: Disposition::Fatal,
            },
            VultesterError::InvariantViolation(_) => ErrorClassification {
                error_type: "InvariantViolation",
                disposition: Disposition::Fatal,
            },
            VultesterError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                disposition: Disposition::Fatal,
            },
            VultesterError::Io(_) => ErrorClassification {
                error_type: "IoError",
                disposition: Disposition::Fatal,
            },
            VultesterError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                disposition: Disposition::Fatal,
            },
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            VultesterError::RuleBase(_) | VultesterError::Config(_) => 2,
            VultesterError::ContradictoryFacts { .. } => 3,
            VultesterError::UnknownMethod(_) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contradictory_facts_is_rejection() {
        let err = VultesterError::ContradictoryFacts {
            first: "no_ssl_enabled".into(),
            second: "ssl_enabled".into(),
        };
        let class = err.classify();
        assert!(class.is_rejection());
        assert_eq!(class.error_type, "ContradictoryFactsError");
    }

    #[test]
    fn test_unknown_method_is_rejection() {
        let err = VultesterError::UnknownMethod("sideways".into());
        let class = err.classify();
        assert!(class.is_rejection());
        assert_eq!(class.error_type, "UnknownMethodError");
    }

    #[test]
    fn test_invalid_request_is_rejection() {
        let err = VultesterError::InvalidRequest("Unknown category 'kitchen'".into());
        let class = err.classify();
        assert!(class.is_rejection());
        assert_eq!(class.error_type, "InvalidRequest");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_rule_base_error_is_fatal() {
        let err = VultesterError::RuleBase("duplicate id".into());
        assert_eq!(err.classify().disposition, Disposition::Fatal);
    }

    #[test]
    fn test_invariant_violation_is_fatal() {
        let err = VultesterError::InvariantViolation("depth".into());
        assert!(!err.classify().is_rejection());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(VultesterError::RuleBase("x".into()).exit_code(), 2);
        assert_eq!(VultesterError::Config("x".into()).exit_code(), 2);
        assert_eq!(VultesterError::UnknownMethod("x".into()).exit_code(), 4);
        assert_eq!(VultesterError::Internal("x".into()).exit_code(), 1);
        let err = VultesterError::ContradictoryFacts { first: "a".into(), second: "b".into() };
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_contradiction_message_names_pair() {
        let err = VultesterError::ContradictoryFacts {
            first: "redis_no_auth".into(),
            second: "redis_auth_enabled".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("redis_no_auth"));
        assert!(msg.contains("redis_auth_enabled"));
    }
}
