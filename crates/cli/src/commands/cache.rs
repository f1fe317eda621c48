use crate::bootstrap::init_database;
use crate::di::UseCases;
use clap::Subcommand;
use rootwalk_domain::{Config, ResolveRequest};

#[derive(Subcommand)]
pub enum CacheAction {
    /// Remove expired record sets
    Purge,
    /// Remove every entry
    Clear,
    /// Print every stored entry as JSON, expired ones included
    Dump,
    /// Remove the entry stored for one name
    Delete {
        name: String,

        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        #[arg(long = "class", default_value = "IN")]
        record_class: String,
    },
}

pub async fn cache(config: &Config, action: CacheAction) -> anyhow::Result<()> {
    let pool = init_database(&config.cache).await?;
    let use_cases = UseCases::new(pool);

    match action {
        CacheAction::Purge => {
            let removed = use_cases.purge_cache.execute().await?;
            println!("removed {} expired entries", removed);
        }
        CacheAction::Clear => {
            let removed = use_cases.clear_cache.execute().await?;
            println!("removed {} entries", removed);
        }
        CacheAction::Dump => {
            let entries = use_cases.inspect_cache.execute().await?;
            let dump: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect();
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        CacheAction::Delete {
            name,
            record_type,
            record_class,
        } => {
            let request = ResolveRequest::parse(&name, &record_type, &record_class, None)?;
            if use_cases.delete_cache_entry.execute(&request.query).await? {
                println!("removed {}", request.domain());
            } else {
                println!("{} not cached", request.domain());
            }
        }
    }
    Ok(())
}
