use rootwalk_domain::{DomainError, RootServer};
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_ROOT_HINTS: &str = include_str!("../../root.hints");

/// Root server name/address pairs from a `named.root` style file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHints {
    servers: Vec<RootServer>,
}

impl RootHints {
    /// Parses `NAME TTL [CLASS] TYPE RDATA` lines, keeping the IPv4 `A`
    /// records. Comments (`;`) and blank lines are skipped; `NS` and `AAAA`
    /// lines are ignored.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut servers = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.split(';').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                debug!(line = index + 1, "Skipping short root hints line");
                continue;
            }

            // Optional class between TTL and TYPE.
            let type_index = if fields[2].eq_ignore_ascii_case("IN") {
                3
            } else {
                2
            };
            let Some(rtype) = fields.get(type_index) else {
                continue;
            };
            if !rtype.eq_ignore_ascii_case("A") {
                continue;
            }

            let rdata = fields.get(type_index + 1).ok_or_else(|| {
                DomainError::RootHints(format!("line {}: A record without address", index + 1))
            })?;
            let address: Ipv4Addr = rdata.parse().map_err(|_| {
                DomainError::RootHints(format!(
                    "line {}: invalid IPv4 address '{}'",
                    index + 1,
                    rdata
                ))
            })?;

            let name = fields[0].trim_end_matches('.');
            servers.push(RootServer::new(name, address));
        }

        if servers.is_empty() {
            return Err(DomainError::RootHints(
                "no root server A records found".to_string(),
            ));
        }

        Ok(Self { servers })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::RootHints(format!("failed to read {}: {}", path.display(), e))
        })?;
        let hints = Self::parse(&text)?;
        info!(path = %path.display(), servers = hints.len(), "Root hints loaded");
        Ok(hints)
    }

    /// The IANA root hints shipped with the binary.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::parse(BUILTIN_ROOT_HINTS)
    }

    pub fn servers(&self) -> &[RootServer] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
