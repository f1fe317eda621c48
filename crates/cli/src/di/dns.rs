use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::{
    ContextHandle, DnsTransport, IterativeResolver, ResolverContext, ResolverSettings, RootHints,
    UdpSocketPool, UdpTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct DnsServices {
    pub context: Arc<ContextHandle>,
    pub resolver: Arc<IterativeResolver>,
    pub sockets: Arc<UdpSocketPool>,
}

impl DnsServices {
    /// Loads the hints, probes the roots and builds the resolver around the
    /// winner. A failed probe still yields a resolver; every walk then fails
    /// with "no usable root" until a rotation succeeds.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let (sockets, hints, settings, probe_timeout) = Self::prepare(config)?;
        let transport: Arc<dyn DnsTransport> = Arc::new(UdpTransport::new(sockets.clone()));

        let context = ResolverContext::bootstrap(hints, transport, settings, probe_timeout).await;
        match context.root() {
            Some(root) => info!(
                root = %root.server,
                latency_ms = root.latency.as_millis() as u64,
                "Resolver ready"
            ),
            None => warn!("No root server answered the latency probe"),
        }

        let context = Arc::new(ContextHandle::new(context, probe_timeout));
        let resolver = Arc::new(IterativeResolver::new(context.clone()));

        Ok(Self {
            context,
            resolver,
            sockets,
        })
    }

    /// Socket pool, hints and settings without probing, for commands that
    /// drive the probe themselves.
    pub fn prepare(
        config: &Config,
    ) -> anyhow::Result<(Arc<UdpSocketPool>, Arc<RootHints>, ResolverSettings, Duration)> {
        let resolver = &config.resolver;

        let sockets = Arc::new(UdpSocketPool::new(resolver.pooled_sockets, resolver.max_sockets));

        let hints = match &resolver.root_hints_path {
            Some(path) => RootHints::load(path)?,
            None => RootHints::builtin()?,
        };
        info!(roots = hints.len(), "Root hints loaded");

        Ok((
            sockets,
            Arc::new(hints),
            ResolverSettings::from_config(resolver),
            Duration::from_millis(resolver.probe_timeout_ms),
        ))
    }
}
