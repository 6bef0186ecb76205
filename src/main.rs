//! jira-batch command line front end
//!
//! Loads configuration, builds the Jira client and runs one operation,
//! printing its result as JSON on stdout.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use jira_batch::config::JiraConfig;
use jira_batch::utils::logging::init_tracing;
use jira_batch::{
    BatchConfig, BatchResolver, BulkMoveRequest, BulkTaskTracker, JiraClient, RecordId, Scheduling,
    SearchCoordinator, TargetMapping, TaskId,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "jira-batch", version, about = "Batch hydration and bulk tasks for Jira Cloud")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML config file; defaults to JIRA_* environment variables
    #[arg(long, env = "JIRA_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct BatchArgs {
    /// Maximum simultaneous issue fetches
    #[arg(long)]
    concurrency: Option<usize>,

    /// Give up on a single fetch after this many milliseconds
    #[arg(long)]
    fetch_timeout_ms: Option<u64>,

    /// Wait for each chunk of fetches to settle before starting the next
    #[arg(long)]
    chunked: bool,
}

impl BatchArgs {
    fn to_config(&self, defaults: &JiraConfig) -> BatchConfig {
        let mut config = BatchConfig::new()
            .with_concurrency(self.concurrency.unwrap_or(defaults.concurrency));
        if let Some(ms) = self.fetch_timeout_ms {
            config = config.with_fetch_timeout(Duration::from_millis(ms));
        }
        if self.chunked {
            config = config.with_scheduling(Scheduling::ChunkBarrier);
        }
        config
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch full issues by id or key
    Fetch {
        #[arg(required = true)]
        ids: Vec<String>,
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Run one JQL search page and hydrate the hits
    Search {
        jql: String,
        #[arg(long, default_value_t = 50)]
        page_size: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Submit a bulk move of issues to a project and issue type
    BulkMove {
        #[arg(long)]
        project: String,
        #[arg(long)]
        issue_type: String,
        #[arg(long)]
        parent: Option<String>,
        /// Send the bulk notification email
        #[arg(long)]
        notify: bool,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Convert issues to sub-tasks of a parent issue
    Subtasks {
        #[arg(long)]
        parent: String,
        /// Project key; derived from the parent key when omitted
        #[arg(long)]
        project: Option<String>,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show the status of a bulk task
    TaskStatus { task_id: String },
    /// Report which connection settings are present
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<JiraConfig> {
    let config = match path {
        Some(path) => JiraConfig::from_file(path).await?,
        None => JiraConfig::from_env()?,
    };
    Ok(config)
}

fn to_ids(raw: Vec<String>) -> Vec<RecordId> {
    raw.into_iter().map(RecordId::from).collect()
}

async fn check_config(path: Option<&PathBuf>) -> anyhow::Result<()> {
    let report = match load_config(path).await {
        Ok(config) => config.report(),
        Err(e) => {
            eprintln!("{:#}", e);
            match path {
                Some(_) => bail!("cannot check configuration file"),
                None => JiraConfig::report_from_env(),
            }
        }
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.valid {
        bail!("configuration is incomplete");
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::CheckConfig => check_config(cli.config.as_ref()).await,
        command => run_remote(command, cli.config.as_ref()).await,
    }
}

async fn run_remote(command: Command, config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)
        .await
        .context("failed to load Jira configuration")?;
    let client = JiraClient::new(config.clone())?;

    let output = match command {
        Command::Fetch { ids, batch } => {
            let resolver = BatchResolver::new(&client, batch.to_config(&config));
            let outcome = resolver.resolve(&to_ids(ids)).await?;
            json!({
                "records": outcome.records,
                "failed": warnings_json(&outcome.warnings),
                "summary": outcome.summary(),
            })
        }
        Command::Search {
            jql,
            page_size,
            offset,
            batch,
        } => {
            let coordinator =
                SearchCoordinator::with_batch_config(&client, &client, batch.to_config(&config));
            let page = coordinator.paged_search(&jql, page_size, offset).await?;
            json!({
                "records": page.records,
                "isLast": page.is_last,
                "failed": warnings_json(&page.warnings),
            })
        }
        Command::BulkMove {
            project,
            issue_type,
            parent,
            notify,
            ids,
        } => {
            let mut target = TargetMapping::new(project, issue_type);
            if let Some(parent) = parent {
                target = target.with_parent(parent);
            }
            let request = BulkMoveRequest::new(target, to_ids(ids)).with_notification(notify);
            let tracker = BulkTaskTracker::new(&client);
            let task_id = tracker.submit_bulk_mutation(&request).await?;
            json!({ "taskId": task_id })
        }
        Command::Subtasks {
            parent,
            project,
            ids,
        } => {
            let tracker = BulkTaskTracker::new(&client)
                .with_subtask_issue_type_id(config.subtask_issue_type_id.clone());
            let parent = RecordId::from(parent);
            let ids = to_ids(ids);
            let task_id = match project {
                Some(project) => tracker.convert_to_subtasks_in(&ids, &parent, &project).await?,
                None => tracker.convert_to_subtasks(&ids, &parent).await?,
            };
            json!({ "taskId": task_id })
        }
        Command::TaskStatus { task_id } => {
            let tracker = BulkTaskTracker::new(&client);
            let task = tracker.get_task_status(&TaskId::from(task_id)).await?;
            serde_json::to_value(task)?
        }
        Command::CheckConfig => unreachable!("check-config never loads a client"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn warnings_json(warnings: &[jira_batch::FetchWarning]) -> serde_json::Value {
    warnings
        .iter()
        .map(|w| json!({ "id": w.id, "code": w.error.code(), "reason": w.reason() }))
        .collect()
}
