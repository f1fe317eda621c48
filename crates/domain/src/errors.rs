use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Unsupported record class: {0}")]
    UnsupportedRecordClass(String),

    #[error("Malformed DNS message: {0}")]
    Decode(String),

    #[error("Query timeout waiting for {server}")]
    QueryTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("{server} answered with rcode {rcode}")]
    ServerFailure { server: String, rcode: u8 },

    #[error("All {phase} servers failed")]
    ServerSetExhausted { phase: &'static str },

    #[error("No usable root server")]
    NoRootServerAvailable,

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Referral chain exceeded maximum depth of {depth}")]
    ReferralLoop { depth: u8 },

    #[error("Resolution timed out after {timeout_ms}ms")]
    ResolutionTimeout { timeout_ms: u64 },

    #[error("Root hints error: {0}")]
    RootHints(String),

    #[error("Cache store error: {0}")]
    CacheStore(String),

    #[error("Query log error: {0}")]
    QueryLog(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Response code recorded in the query log for this failure.
    pub fn result_code(&self) -> &'static str {
        match self {
            DomainError::NxDomain => "NXDOMAIN",
            DomainError::QueryTimeout { .. } | DomainError::ResolutionTimeout { .. } => "TIMEOUT",
            DomainError::Decode(_) => "FORMERR",
            DomainError::InvalidDomainName(_)
            | DomainError::UnsupportedRecordType(_)
            | DomainError::UnsupportedRecordClass(_) => "REFUSED",
            _ => "SERVFAIL",
        }
    }

    /// Faults that move resolution on to the next candidate server.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::QueryTimeout { .. }
                | DomainError::Transport { .. }
                | DomainError::ServerFailure { .. }
        )
    }
}
