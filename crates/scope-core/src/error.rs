use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ConfigInvalid,
    ContentRootMissing,
    InvalidEnumValue,
    CandidatesUnreadable,
    DraftUnreadable,
    DraftWriteFailed,
    RunLogWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ConfigInvalid => "E1002",
            Self::ContentRootMissing => "E2001",
            Self::InvalidEnumValue => "E2002",
            Self::CandidatesUnreadable => "E3001",
            Self::DraftUnreadable => "E3002",
            Self::DraftWriteFailed => "E5001",
            Self::RunLogWriteFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ConfigInvalid => "Config value out of range",
            Self::ContentRootMissing => "Content root not found",
            Self::InvalidEnumValue => "Invalid category/status value",
            Self::CandidatesUnreadable => "Candidate file unreadable",
            Self::DraftUnreadable => "Draft file unreadable",
            Self::DraftWriteFailed => "Draft write failed",
            Self::RunLogWriteFailed => "Run log write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .scope/config.toml and retry."),
            Self::ConfigInvalid => {
                Some("Check mix weights are non-negative and phase thresholds ascend.")
            }
            Self::ContentRootMissing => {
                Some("Create the content directory or set agent.content_root in .scope/config.toml.")
            }
            Self::InvalidEnumValue => Some("Use one of: learn, markets, best."),
            Self::CandidatesUnreadable => Some("Check the --candidates path, or pipe JSON on stdin."),
            Self::DraftUnreadable => Some("Pass a JSON file with category, slug, title and content."),
            Self::DraftWriteFailed | Self::RunLogWriteFailed => {
                Some("Check disk space and write permissions.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 9] = [
        ErrorCode::ConfigParseError,
        ErrorCode::ConfigInvalid,
        ErrorCode::ContentRootMissing,
        ErrorCode::InvalidEnumValue,
        ErrorCode::CandidatesUnreadable,
        ErrorCode::DraftUnreadable,
        ErrorCode::DraftWriteFailed,
        ErrorCode::RunLogWriteFailed,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let text = code.code();
            assert_eq!(text.len(), 5);
            assert!(text.starts_with('E'));
            assert!(text.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }
}
