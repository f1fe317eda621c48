use super::context::{ContextHandle, ResolverContext};
use super::failover::query_random_candidate;
use crate::dns::wire;
use async_trait::async_trait;
use futures::future::BoxFuture;
use rootwalk_application::ports::DnsResolver;
use rootwalk_domain::{
    AddressRecord, DnsQuery, DomainError, RecordClass, RecordType, SelectedRoot,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info};

const RCODE_NOERROR: u8 = 0;
const RCODE_NXDOMAIN: u8 = 3;

/// Root → TLD → authoritative walk for A records.
pub struct IterativeResolver {
    context: Arc<ContextHandle>,
}

impl IterativeResolver {
    pub fn new(context: Arc<ContextHandle>) -> Self {
        Self { context }
    }

    /// Runs one walk against the context current at call time.
    pub async fn resolve_a(&self, domain: &str) -> Result<Vec<AddressRecord>, DomainError> {
        let context = self.context.load();
        let walk = Walk {
            ctx: context.as_ref(),
        };
        walk.resolve(domain, 0).await
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Vec<AddressRecord>, DomainError> {
        if query.record_type != RecordType::A {
            return Err(DomainError::UnsupportedRecordType(
                query.record_type.to_string(),
            ));
        }
        if query.record_class != RecordClass::IN {
            return Err(DomainError::UnsupportedRecordClass(
                query.record_class.to_string(),
            ));
        }
        self.resolve_a(&query.domain).await
    }
}

struct Exchange {
    query: Vec<u8>,
    response: Vec<u8>,
}

impl Exchange {
    fn is_nxdomain(&self) -> bool {
        wire::header(&self.response).is_ok_and(|h| h.rcode() == RCODE_NXDOMAIN)
    }
}

struct Walk<'c> {
    ctx: &'c ResolverContext,
}

impl Walk<'_> {
    /// `depth` counts nested nameserver chases; the top-level name is 0.
    fn resolve<'a>(
        &'a self,
        domain: &'a str,
        depth: u8,
    ) -> BoxFuture<'a, Result<Vec<AddressRecord>, DomainError>> {
        Box::pin(async move {
            if depth > self.ctx.settings().max_referral_depth {
                return Err(DomainError::ReferralLoop { depth });
            }
            let root = self.ctx.root().ok_or(DomainError::NoRootServerAvailable)?;

            let tld_servers = self.root_phase(root, domain).await?;
            let auth_servers = self.tld_phase(tld_servers, domain, depth).await?;
            let records = self.authoritative_phase(auth_servers, domain).await?;

            if records.is_empty() {
                return Err(DomainError::NxDomain);
            }
            Ok(records)
        })
    }

    async fn root_phase(
        &self,
        root: &SelectedRoot,
        domain: &str,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        info!(domain, root = %root.server, "Querying root server");

        let exchange = query_random_candidate("root", vec![root.server.address], |server| {
            self.exchange(server, domain, RecordType::NS, false)
        })
        .await?;

        if exchange.is_nxdomain() {
            return Err(DomainError::NxDomain);
        }

        let glue = wire::decode_additional_section(&exchange.query, &exchange.response)?;
        debug!(domain, tld_servers = glue.len(), "Root referral received");
        Ok(glue)
    }

    async fn tld_phase(
        &self,
        candidates: Vec<Ipv4Addr>,
        domain: &str,
        depth: u8,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        info!(domain, candidates = candidates.len(), "Querying TLD servers");

        let exchange = query_random_candidate("tld", candidates, |server| {
            self.exchange(server, domain, RecordType::NS, false)
        })
        .await?;

        if exchange.is_nxdomain() {
            return Err(DomainError::NxDomain);
        }

        let glue = wire::decode_additional_section(&exchange.query, &exchange.response)?;
        if !glue.is_empty() {
            debug!(domain, nameservers = glue.len(), "Glue found in TLD referral");
            return Ok(glue);
        }

        let ns_names = wire::decode_authority_section(&exchange.query, &exchange.response)?;
        if ns_names.is_empty() {
            return Err(DomainError::NxDomain);
        }

        let ns_name = &ns_names[fastrand::usize(..ns_names.len())];
        info!(
            domain,
            nameserver = %ns_name,
            depth = depth + 1,
            "No glue, resolving nameserver address"
        );

        let addresses = self.resolve(ns_name, depth + 1).await?;
        Ok(addresses.iter().map(|r| r.address).collect())
    }

    async fn authoritative_phase(
        &self,
        candidates: Vec<Ipv4Addr>,
        domain: &str,
    ) -> Result<Vec<AddressRecord>, DomainError> {
        info!(domain, candidates = candidates.len(), "Querying authoritative servers");

        let exchange = query_random_candidate("authoritative", candidates, |server| {
            self.exchange(server, domain, RecordType::A, true)
        })
        .await?;

        if exchange.is_nxdomain() {
            return Err(DomainError::NxDomain);
        }

        let start = wire::answer_start(&exchange.response)?;
        let records = wire::decode_answer_section(&exchange.response, start)?;
        debug!(domain, answers = records.len(), "Authoritative answer received");
        Ok(records)
    }

    async fn exchange(
        &self,
        server: Ipv4Addr,
        domain: &str,
        qtype: RecordType,
        use_edns: bool,
    ) -> Result<Exchange, DomainError> {
        let settings = self.ctx.settings();
        let edns = use_edns.then_some(settings.edns_payload_size);
        let (_, query) = wire::encode_query_with_id(domain, qtype, RecordClass::IN, edns)?;

        let addr = SocketAddr::from((server, settings.port));
        let response = self
            .ctx
            .transport()
            .send(addr, &query, settings.query_timeout)
            .await?;
        wire::validate_response(&query, &response.bytes)?;

        // Any rcode other than NOERROR or NXDOMAIN is this server's fault.
        let rcode = wire::header(&response.bytes)?.rcode();
        if rcode != RCODE_NOERROR && rcode != RCODE_NXDOMAIN {
            return Err(DomainError::ServerFailure {
                server: addr.to_string(),
                rcode,
            });
        }

        Ok(Exchange {
            query,
            response: response.bytes,
        })
    }
}
