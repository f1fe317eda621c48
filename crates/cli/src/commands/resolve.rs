use crate::bootstrap::init_database;
use crate::di::{DnsServices, UseCases};
use futures::future::join_all;
use rootwalk_application::ports::DnsResolution;
use rootwalk_domain::{Config, DomainError};

/// Resolves every name concurrently and prints one `domain ip ttl cached`
/// line per address, or one `domain RCODE error` line per failure.
pub async fn resolve(
    config: &Config,
    domains: &[String],
    record_type: &str,
    record_class: &str,
    client: Option<&str>,
) -> anyhow::Result<()> {
    let pool = init_database(&config.cache).await?;
    let dns = DnsServices::new(config).await?;
    let use_case = UseCases::resolve(config, &dns, pool);

    let lookups = domains.iter().map(|domain| {
        let use_case = &use_case;
        async move {
            let outcome = use_case
                .execute_raw(domain, record_type, record_class, client)
                .await;
            (domain, outcome)
        }
    });

    let mut failures = 0usize;
    for (domain, outcome) in join_all(lookups).await {
        if !print_outcome(domain, &outcome) {
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, domains.len());
    }
    Ok(())
}

/// Returns whether the lookup succeeded.
pub(super) fn print_outcome(domain: &str, outcome: &Result<DnsResolution, DomainError>) -> bool {
    match outcome {
        Ok(resolution) => {
            for record in resolution.records.iter() {
                println!(
                    "{} {} {} {}",
                    domain, record.address, record.ttl, resolution.cache_hit
                );
            }
            true
        }
        Err(e) => {
            println!("{} {} {}", domain, e.result_code(), e);
            false
        }
    }
}
