use anyhow::Result;
use kb_builder::{config::BuildConfig, run::build_knowledge_base};
use tracing::info;
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

/// RFC3339 UTC seconds, e.g. `2025-09-12T10:20:30Z`.
struct Rfc3339Utc;

impl FormatTime for Rfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

fn main() -> Result<()> {
    // `.env` is optional for the builder.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Rfc3339Utc)
        .with_target(false)
        .compact()
        .init();

    let config = BuildConfig::from_env();
    info!(
        documents = config.documents.len(),
        documents_dir = %config.documents_dir.display(),
        "Building knowledge base"
    );

    let summary = build_knowledge_base(&config)?;
    info!(
        entries = summary.entries,
        ts = %summary.output_ts.display(),
        json = %summary.output_json.display(),
        "Done"
    );
    Ok(())
}
