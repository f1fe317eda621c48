use rootwalk_domain::DomainError;
use std::future::Future;
use std::net::Ipv4Addr;
use tracing::{debug, warn};

/// Queries one random candidate at a time until one answers.
///
/// A candidate leaves the set before it is queried, so no server is tried
/// twice. Only transient faults move on; anything else is returned as is.
pub(super) async fn query_random_candidate<T, F, Fut>(
    phase: &'static str,
    candidates: Vec<Ipv4Addr>,
    mut attempt: F,
) -> Result<T, DomainError>
where
    F: FnMut(Ipv4Addr) -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let mut remaining = dedup(candidates);
    debug!(phase, servers = remaining.len(), "Trying candidates in random order");

    while !remaining.is_empty() {
        let server = remaining.swap_remove(fastrand::usize(..remaining.len()));

        match attempt(server).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                warn!(
                    phase,
                    server = %server,
                    error = %e,
                    remaining = remaining.len(),
                    "Failing over"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(DomainError::ServerSetExhausted { phase })
}

fn dedup(candidates: Vec<Ipv4Addr>) -> Vec<Ipv4Addr> {
    let mut unique = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}
