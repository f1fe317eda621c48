use super::{DomainError, RecordClass, RecordType};
use std::sync::Arc;

const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub record_class: RecordClass,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            record_class: RecordClass::IN,
        }
    }

    pub fn with_class(mut self, record_class: RecordClass) -> Self {
        self.record_class = record_class;
        self
    }
}

/// A lookup as handed over by the command layer: textual type and class,
/// plus an opaque identifier for the query log.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub query: DnsQuery,
    pub client_id: Arc<str>,
}

impl ResolveRequest {
    pub fn new(domain: impl Into<Arc<str>>) -> Self {
        Self {
            query: DnsQuery::new(domain, RecordType::A),
            client_id: Arc::from(UNKNOWN_CLIENT),
        }
    }

    /// Builds a request from the string form used by callers
    /// (`"A"`, `"IN"`), rejecting unknown types and classes.
    pub fn parse(
        domain: &str,
        record_type: &str,
        record_class: &str,
        client_id: Option<&str>,
    ) -> Result<Self, DomainError> {
        let domain = domain.trim().trim_end_matches('.');
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "empty domain name".to_string(),
            ));
        }

        let record_type: RecordType = record_type
            .parse()
            .map_err(DomainError::UnsupportedRecordType)?;
        let record_class: RecordClass = record_class
            .parse()
            .map_err(DomainError::UnsupportedRecordClass)?;

        Ok(Self {
            query: DnsQuery::new(domain, record_type).with_class(record_class),
            client_id: Arc::from(client_id.unwrap_or(UNKNOWN_CLIENT)),
        })
    }

    pub fn domain(&self) -> &str {
        &self.query.domain
    }
}
