use crate::di::DnsServices;
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::root_probe::pick_nearest;
use rootwalk_infrastructure::dns::{RootProbe, UdpTransport};
use std::sync::Arc;

pub async fn probe(config: &Config) -> anyhow::Result<()> {
    let (sockets, hints, settings, probe_timeout) = DnsServices::prepare(config)?;
    let probe = RootProbe::new(Arc::new(UdpTransport::new(sockets)), probe_timeout, settings.port);

    let results = probe.measure(&hints).await;
    for result in &results {
        match result.latency {
            Some(latency) => println!(
                "{:<24} {:<16} {:>8.1} ms",
                result.server.name,
                result.server.address,
                latency.as_secs_f64() * 1000.0
            ),
            None => println!(
                "{:<24} {:<16} {:>8}",
                result.server.name, result.server.address, "timeout"
            ),
        }
    }

    match pick_nearest(&results) {
        Some(selected) => {
            println!("selected {}", selected.server);
            Ok(())
        }
        None => anyhow::bail!("no root server answered within {:?}", probe_timeout),
    }
}
