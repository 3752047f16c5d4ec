use crate::domain::model::{AlertStatus, PlanEnd, PlanSchedule};
use crate::utils::duration::parse_duration;
use crate::utils::error::{BigPandaError, Result};
use crate::utils::timeparse::parse_datetime;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bigpandaapi", version)]
#[command(about = "The unofficial BigPanda API command-line interface")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send an alert to an Open Integration Manager integration
    Alert(AlertArgs),
    /// Manage maintenance plans
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Manage mapping enrichments
    Enrichment {
        #[command(subcommand)]
        command: EnrichmentCommand,
    },
}

/// Credentials and host override shared by the resources API commands.
#[derive(Debug, Args)]
pub struct ApiArgs {
    #[arg(long, env = "BIGPANDA_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, hide = true)]
    pub base_url: Option<String>,
}

impl Validate for ApiArgs {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api_key", &self.api_key)?;
        if let Some(base_url) = &self.base_url {
            validate_url("base_url", base_url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct AlertArgs {
    /// App Key of the OIM integration receiving the alert
    #[arg(long)]
    pub app_key: String,

    /// Org token (the "Auth Token" in the BigPanda UI)
    #[arg(long, env = "BIGPANDA_ORG_TOKEN", hide_env_values = true)]
    pub org_token: String,

    /// Alert tag, may be repeated
    #[arg(long = "property", value_parser = parse_key_val, value_name = "KEY=VALUE")]
    pub properties: Vec<(String, String)>,

    /// One of "ok", "critical", "warning" or "acknowledged"
    #[arg(long, default_value = "warning")]
    pub status: String,

    /// ISO 8601 datetime for the alert; BigPanda uses receive time if omitted
    #[arg(long)]
    pub timestamp: Option<String>,

    #[arg(long, hide = true)]
    pub base_url: Option<String>,
}

impl Validate for AlertArgs {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("app_key", &self.app_key)?;
        validate_non_empty_string("org_token", &self.org_token)?;
        self.status.parse::<AlertStatus>()?;
        if let Some(base_url) = &self.base_url {
            validate_url("base_url", base_url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Create a maintenance plan
    Create(PlanCreateArgs),
    /// Show a maintenance plan
    Get {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// List all maintenance plans
    List {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Delete a maintenance plan
    Delete {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Stop a running maintenance plan
    Stop {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Debug, Args)]
pub struct PlanCreateArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Name of the plan
    #[arg(long)]
    pub name: String,

    /// Query in BPQL object format selecting the covered incidents
    #[arg(long, value_name = "BPQL_JSON")]
    pub condition: String,

    /// Description shown in the BigPanda UI
    #[arg(long)]
    pub description: Option<String>,

    /// ISO 8601 start of the window; defaults to now
    #[arg(long)]
    pub start_time: Option<String>,

    /// ISO 8601 end of the window
    #[arg(long)]
    pub end_time: Option<String>,

    /// End of the window as a delta from the start, e.g. "1d2h30m"
    #[arg(long)]
    pub end_time_delta: Option<String>,
}

impl PlanCreateArgs {
    /// Builds the maintenance window from the CLI flags, enforcing that
    /// exactly one of the two end arguments is given.
    pub fn schedule(&self) -> Result<PlanSchedule> {
        let start = match &self.start_time {
            Some(value) => Some(parse_datetime("start_time", value)?),
            None => None,
        };

        let end = match (&self.end_time, &self.end_time_delta) {
            (Some(_), Some(_)) => {
                return Err(BigPandaError::InvalidArgument {
                    message: "Only one of the arguments 'end_time' and 'end_time_delta' can \
                              be provided"
                        .to_string(),
                })
            }
            (None, None) => {
                return Err(BigPandaError::InvalidArgument {
                    message: "One of either argument 'end_time' or 'end_time_delta' must be \
                              provided"
                        .to_string(),
                })
            }
            (Some(value), None) => PlanEnd::At(parse_datetime("end_time", value)?),
            (None, Some(value)) => PlanEnd::After(parse_duration(value)?),
        };

        Ok(PlanSchedule { start, end })
    }

    /// The BPQL condition parsed as JSON.
    pub fn condition_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.condition)?)
    }
}

impl Validate for PlanCreateArgs {
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        validate_non_empty_string("name", &self.name)?;
        self.condition_json()?;
        self.schedule()?;
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum EnrichmentCommand {
    /// Create the schema for a new mapping enrichment
    CreateSchema(CreateSchemaArgs),
    /// Replace the data of an existing mapping enrichment table
    UpdateTable(UpdateTableArgs),
}

#[derive(Debug, Args)]
pub struct CreateSchemaArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Source tag used to look up values in the table
    #[arg(long)]
    pub query_tag: String,

    /// Target tag populated by the lookup
    #[arg(long)]
    pub result_tag: String,

    /// Name of the enrichment; defaults to the result tag
    #[arg(long)]
    pub name: Option<String>,
}

impl Validate for CreateSchemaArgs {
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        validate_non_empty_string("query_tag", &self.query_tag)?;
        validate_non_empty_string("result_tag", &self.result_tag)
    }
}

#[derive(Debug, Args)]
pub struct UpdateTableArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Path to a CSV file with the table data; the enrichment name is taken
    /// from the second header column
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// JSON array of objects with the table data
    #[arg(long, value_name = "JSON")]
    pub rows_json: Option<String>,

    /// Name of the enrichment; required with --rows-json
    #[arg(long)]
    pub name: Option<String>,
}

impl Validate for UpdateTableArgs {
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        match (&self.csv_path, &self.rows_json) {
            (Some(_), Some(_)) => Err(BigPandaError::InvalidArgument {
                message: "The arguments 'csv_path' and 'rows_json' are mutually exclusive"
                    .to_string(),
            }),
            (None, None) => Err(BigPandaError::InvalidArgument {
                message: "Either argument 'csv_path' or 'rows_json' must be set".to_string(),
            }),
            (None, Some(_)) if self.name.is_none() => Err(BigPandaError::InvalidArgument {
                message: "Argument 'rows_json' requires that argument 'name' also be set"
                    .to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Validate for Cli {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Alert(args) => args.validate(),
            Command::Plan { command } => match command {
                PlanCommand::Create(args) => args.validate(),
                PlanCommand::Get { id, api }
                | PlanCommand::Delete { id, api }
                | PlanCommand::Stop { id, api } => {
                    validate_non_empty_string("id", id)?;
                    api.validate()
                }
                PlanCommand::List { api } => api.validate(),
            },
            Command::Enrichment { command } => match command {
                EnrichmentCommand::CreateSchema(args) => args.validate(),
                EnrichmentCommand::UpdateTable(args) => args.validate(),
            },
        }
    }
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.trim().is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
