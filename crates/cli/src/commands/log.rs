use rootwalk_application::ports::QueryLogSink;
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::JsonFileQueryLog;

/// Prints the last `limit` query events, oldest first, one JSON object per line.
pub async fn log(config: &Config, limit: usize) -> anyhow::Result<()> {
    let sink = JsonFileQueryLog::new(&config.query_log.path, config.query_log.max_entries);

    for entry in sink.recent(limit).await? {
        println!("{}", serde_json::to_string(&entry)?);
    }
    Ok(())
}
