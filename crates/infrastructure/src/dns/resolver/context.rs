use super::config::ResolverSettings;
use crate::dns::root_hints::RootHints;
use crate::dns::root_probe::RootProbe;
use crate::dns::transport::DnsTransport;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use rootwalk_application::ports::RootRotationPort;
use rootwalk_domain::{DomainError, SelectedRoot};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Everything a walk needs: the entry root, the hints it came from, the
/// transport and the settings. Never mutated; rotation builds a new one.
#[derive(Clone)]
pub struct ResolverContext {
    root: Option<SelectedRoot>,
    hints: Arc<RootHints>,
    transport: Arc<dyn DnsTransport>,
    settings: ResolverSettings,
}

impl ResolverContext {
    pub fn new(
        root: Option<SelectedRoot>,
        hints: Arc<RootHints>,
        transport: Arc<dyn DnsTransport>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            root,
            hints,
            transport,
            settings,
        }
    }

    /// Probes the hints and builds a context around the fastest root.
    pub async fn bootstrap(
        hints: Arc<RootHints>,
        transport: Arc<dyn DnsTransport>,
        settings: ResolverSettings,
        probe_timeout: Duration,
    ) -> Self {
        let probe = RootProbe::new(transport.clone(), probe_timeout, settings.port);
        let root = probe.select_nearest(&hints).await;
        Self::new(root, hints, transport, settings)
    }

    pub fn root(&self) -> Option<&SelectedRoot> {
        self.root.as_ref()
    }

    pub fn hints(&self) -> &Arc<RootHints> {
        &self.hints
    }

    pub fn transport(&self) -> &Arc<dyn DnsTransport> {
        &self.transport
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn with_root(&self, root: Option<SelectedRoot>) -> Self {
        Self {
            root,
            ..self.clone()
        }
    }
}

/// Shared, swappable [`ResolverContext`]. Walks in flight keep the context
/// they started with.
pub struct ContextHandle {
    current: ArcSwap<ResolverContext>,
    probe_timeout: Duration,
}

impl ContextHandle {
    pub fn new(context: ResolverContext, probe_timeout: Duration) -> Self {
        Self {
            current: ArcSwap::from_pointee(context),
            probe_timeout,
        }
    }

    pub fn load(&self) -> Arc<ResolverContext> {
        self.current.load_full()
    }

    pub fn reload(&self, context: ResolverContext) {
        self.current.store(Arc::new(context));
    }
}

#[async_trait]
impl RootRotationPort for ContextHandle {
    /// Re-probes the hints. A probe where every root fails keeps the
    /// previous entry point.
    async fn rotate(&self) -> Result<Option<SelectedRoot>, DomainError> {
        let context = self.load();
        let probe = RootProbe::new(
            context.transport().clone(),
            self.probe_timeout,
            context.settings().port,
        );

        match probe.select_nearest(context.hints()).await {
            Some(selected) => {
                if context.root().map(|r| &r.server) != Some(&selected.server) {
                    info!(
                        previous = ?context.root().map(|r| r.server.to_string()),
                        current = %selected.server,
                        "Root entry point rotated"
                    );
                }
                self.reload(context.with_root(Some(selected.clone())));
                Ok(Some(selected))
            }
            None => {
                warn!("Root re-probe found no usable server, keeping current entry point");
                Ok(None)
            }
        }
    }
}
