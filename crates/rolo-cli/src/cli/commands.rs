use tracing::info;

use rolo_core::{enrich_table, table, ClientConfig, ContactCache, EnrichResult, PersonClient, RunSummary};

use super::args::Cli;

/// Exit code for a successful run.
const EXIT_SUCCESS: i32 = 0;

/// Run the enrichment pipeline and map fatal errors to exit codes.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    match enrich(&cli).await {
        Ok(summary) => {
            info!(
                output = %cli.out.display(),
                resolved = summary.resolved + summary.cache_hits,
                total = summary.total,
                "wrote enriched table"
            );
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("fatal: {e}");
            Ok(e.exit_code())
        }
    }
}

async fn enrich(cli: &Cli) -> EnrichResult<RunSummary> {
    let config = ClientConfig::from_env().with_api_key(&cli.key);
    let client = PersonClient::new(config)?;

    let mut cache = ContactCache::load(&cli.cache)?;
    let mut input = table::read_input(&cli.csv)?;

    let summary = enrich_table(&client, &mut cache, &mut input).await?;

    table::write_output(&cli.out, &input)?;
    Ok(summary)
}
