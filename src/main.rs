use bigpandaapi::config::{Cli, Command, EnrichmentCommand, PlanCommand};
use bigpandaapi::utils::{logger, validation::Validate};
use bigpandaapi::{ApiClient, OimClient, Result};
use clap::Parser;
use std::collections::BTreeMap;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("starting bigpandaapi CLI");

    if let Err(e) = cli.validate() {
        tracing::error!("configuration validation failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(2);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn api_client(api_key: &str, base_url: &Option<String>) -> ApiClient {
    match base_url {
        Some(url) => ApiClient::with_base_url(api_key, url),
        None => ApiClient::new(api_key),
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Alert(args) => {
            let client = match &args.base_url {
                Some(url) => OimClient::with_base_url(&args.org_token, url),
                None => OimClient::new(&args.org_token),
            };
            let properties: BTreeMap<String, String> = args.properties.into_iter().collect();
            let status = args.status.parse()?;
            client
                .oim_send_alert(&args.app_key, properties, status, args.timestamp.as_deref())
                .await?;
            println!("Alert sent.");
        }
        Command::Plan { command } => match command {
            PlanCommand::Create(args) => {
                let client = api_client(&args.api.api_key, &args.api.base_url);
                let schedule = args.schedule()?;
                client
                    .maintenance_plan_create(
                        &args.name,
                        args.condition_json()?,
                        &schedule,
                        args.description.as_deref(),
                    )
                    .await?;
                println!("Maintenance plan created.");
            }
            PlanCommand::Get { id, api } => {
                let client = api_client(&api.api_key, &api.base_url);
                let plan = client.maintenance_plan_get(&id).await?;
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
            PlanCommand::List { api } => {
                let client = api_client(&api.api_key, &api.base_url);
                let plans = client.maintenance_plan_list().await?;
                println!("{}", serde_json::to_string_pretty(&plans)?);
            }
            PlanCommand::Delete { id, api } => {
                let client = api_client(&api.api_key, &api.base_url);
                client.maintenance_plan_delete(&id).await?;
                println!("Maintenance plan {id} deleted.");
            }
            PlanCommand::Stop { id, api } => {
                let client = api_client(&api.api_key, &api.base_url);
                client.maintenance_plan_stop(&id).await?;
                println!("Maintenance plan {id} stopped.");
            }
        },
        Command::Enrichment { command } => match command {
            EnrichmentCommand::CreateSchema(args) => {
                let client = api_client(&args.api.api_key, &args.api.base_url);
                client
                    .mapping_create_schema(&args.query_tag, &args.result_tag, args.name.as_deref())
                    .await?;
                println!("Mapping enrichment schema created.");
            }
            EnrichmentCommand::UpdateTable(args) => {
                let client = api_client(&args.api.api_key, &args.api.base_url);
                if let Some(csv_path) = &args.csv_path {
                    client.mapping_update_table_csv(csv_path).await?;
                } else if let (Some(rows_json), Some(name)) = (&args.rows_json, &args.name) {
                    let rows: Vec<BTreeMap<String, String>> = serde_json::from_str(rows_json)?;
                    client.mapping_update_table_rows(name, &rows).await?;
                }
                println!("Mapping table updated.");
            }
        },
    }

    Ok(())
}
