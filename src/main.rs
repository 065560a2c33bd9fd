use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};

use skillplan::{
    cli::{self, Command},
    config::Config,
    curriculum::renderer::ScreenView,
    export::{ExportPipeline, TextDocumentRenderer},
    history::store::HistoryStore,
    logging,
    orchestrator::{RequestOrchestrator, SubmitOutcome},
    service::{client::ServiceClient, ports::AccountBackend},
};

const DEFAULT_CONFIG_PATH: &str = "./skillplan.json5";

#[tokio::main]
async fn main() -> Result<()> {
    let options = cli::options_from_env()?;

    let config = match &options.config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_or_default(&PathBuf::from(DEFAULT_CONFIG_PATH))?,
    };

    let _logging_guard = logging::init_tracing(&config.logging)?;
    let client = Arc::new(ServiceClient::new(&config.service));

    match options.command {
        Command::Generate {
            skill,
            duration,
            level,
        } => {
            let orchestrator = RequestOrchestrator::new(client);
            report_submit(orchestrator.submit(&skill, &duration, &level).await, None).await?;
        }
        Command::Export {
            skill,
            duration,
            level,
        } => {
            let orchestrator = RequestOrchestrator::new(client);
            let pipeline = ExportPipeline::new(
                Arc::new(TextDocumentRenderer),
                config.export.output_dir.clone(),
            )
            .with_revert_delay(Duration::from_millis(config.export.done_display_ms));
            report_submit(
                orchestrator.submit(&skill, &duration, &level).await,
                Some(&pipeline),
            )
            .await?;
        }
        Command::History { filter, order } => {
            let store = HistoryStore::new(client);
            store
                .load()
                .await
                .map_err(|err| anyhow::anyhow!("failed to load history: {err}"))?;
            let entries = match filter {
                Some(query) => store.filter(&query).await,
                None => store.sorted(order).await,
            };
            if entries.is_empty() {
                println!("history is empty");
            }
            for entry in entries {
                println!(
                    "{}  {}  ({})  [id {}]",
                    entry.timestamp_raw, entry.skill, entry.duration, entry.id
                );
            }
        }
        Command::Delete { id } => {
            let store = HistoryStore::new(client);
            store
                .load()
                .await
                .map_err(|err| anyhow::anyhow!("failed to load history: {err}"))?;
            match store.delete(&id).await {
                Ok(()) => println!("deleted history entry {id}"),
                Err(err) => eprintln!("could not delete history entry: {err}"),
            }
        }
        Command::Clear => {
            let store = HistoryStore::new(client);
            store
                .load()
                .await
                .map_err(|err| anyhow::anyhow!("failed to load history: {err}"))?;
            match store.clear().await {
                Ok(()) => println!("history cleared"),
                Err(err) => eprintln!("could not clear history: {err}"),
            }
        }
        Command::Whoami => {
            let state = client
                .user_state()
                .await
                .map_err(|err| anyhow::anyhow!("failed to fetch user state: {err}"))?;
            if state.logged_in {
                println!(
                    "logged in as {} <{}>",
                    state.name.as_deref().unwrap_or("unknown"),
                    state.email.as_deref().unwrap_or("unknown")
                );
                if let Some(searches) = state.searches {
                    println!("searches used: {searches}");
                }
            } else {
                println!("browsing as guest");
                if let Some(left) = state.guest_left {
                    println!("guest generations left: {left}");
                }
            }
        }
    }

    Ok(())
}

async fn report_submit(
    outcome: SubmitOutcome,
    pipeline: Option<&ExportPipeline>,
) -> Result<()> {
    match outcome {
        SubmitOutcome::Success(plan) => {
            print_screen(&plan.screen);
            if let Some(pipeline) = pipeline {
                let receipt = pipeline
                    .export_request(&plan.screen.export_request())
                    .await
                    .map_err(|err| anyhow::anyhow!("export failed: {err}"))?;
                println!("\nexported to {}", receipt.path.display());
            }
        }
        SubmitOutcome::Limited => {
            println!("generation limit reached; sign in or upgrade to continue");
        }
        SubmitOutcome::Failed(err) => {
            eprintln!("could not generate curriculum: {err}");
        }
        SubmitOutcome::Rejected(reason) => {
            eprintln!("submission rejected: {reason:?}");
        }
    }
    Ok(())
}

fn print_screen(view: &ScreenView) {
    println!("{}", view.heading);
    for phase in &view.phases {
        println!("\n{}", phase.title);
        if let Some(objective) = &phase.objective {
            println!("  {objective}");
        }
        for course in &phase.courses {
            println!("  - {}", course.title);
            if let Some(project) = &course.project {
                println!("      project: {project}");
            }
            if !course.topics.is_empty() {
                println!("      topics: {}", course.topics.join(", "));
            }
        }
    }
}
