//! Statiki - publish a GitHub repository as a site

use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use statiki_cli::config::{apply_cli_overrides, backend_config, describe_source};
use statiki_cli::{
    Cli, Commands, ConfigCommands, Form, PromptMode, SharedInput, Status, TerminalPrompt,
    TerminalReporter,
};
use statiki_client::HttpBackend;
use statiki_config::{load_config, ResolvedConfig, StatikiConfig};
use statiki_workflow::{
    messages, AutoPrompt, ConfirmationPrompt, WorkflowController, WorkflowError, WorkflowState,
};
use std::sync::Arc;
use tokio::io::{AsyncWrite, BufReader, Stdin};
use tokio::sync::Mutex;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match load_config(cli.config.as_deref()) {
        Ok(resolved) => run(&cli, resolved).await,
        Err(e) => Err(format!("{:#}", e).into()),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli, resolved: ResolvedConfig) -> CliResult<i32> {
    let config = apply_cli_overrides(resolved.config.clone(), cli);
    statiki_telemetry::init_subscriber(&config.telemetry);
    tracing::debug!(source = %describe_source(&resolved), "configuration loaded");

    match &cli.command {
        Some(Commands::Create {
            name,
            yes,
            decline,
            json,
        }) => {
            let mode = PromptMode::from_flags(*yes, *decline);
            run_create(cli, &config, name.as_deref(), mode, *json).await
        }
        Some(Commands::Config { command }) => {
            run_config(command, &config, &resolved)?;
            Ok(0)
        }
        None => run_create(cli, &config, None, PromptMode::Interactive, false).await,
    }
}

#[derive(Serialize)]
struct Outcome<'a> {
    state: Option<WorkflowState>,
    full_name: Option<&'a str>,
    status: Option<Status>,
}

async fn run_create(
    cli: &Cli,
    config: &StatikiConfig,
    name: Option<&str>,
    mode: PromptMode,
    json_output: bool,
) -> CliResult<i32> {
    let color = !cli.no_color && !json_output;
    let reporter = if json_output {
        Arc::new(TerminalReporter::stdout(false).quiet())
    } else {
        Arc::new(TerminalReporter::stdout(color))
    };

    let backend = Arc::new(HttpBackend::new(backend_config(config))?);
    tracing::debug!(
        create_repo = %backend.create_repo_url(),
        configure = %backend.configure_url(),
        "backend endpoints"
    );

    let input: SharedInput<BufReader<Stdin>> =
        Arc::new(Mutex::new(BufReader::new(tokio::io::stdin())));
    let prompt = create_prompt(mode, input.clone(), config, json_output);

    let mut controller =
        WorkflowController::new(config.owner.clone(), backend, prompt, reporter.clone());

    let settled = match name {
        Some(name) => match controller.start(name).await {
            Ok(state) => Some(state),
            Err(WorkflowError::InvalidRepoName(_)) => {
                return Err("repository name must not be empty".into())
            }
            Err(e) => return Err(e.into()),
        },
        None => {
            let mut form = Form::new(input, interactive_output(json_output), color);
            form.run(&mut controller, reporter.as_ref()).await?
        }
    };

    if json_output {
        let outcome = Outcome {
            state: settled,
            full_name: controller
                .last_result()
                .map(|result| result.full_name.as_str())
                .filter(|full_name| !full_name.is_empty()),
            status: reporter.current(),
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if settled == Some(WorkflowState::Inconclusive) {
        println!("{}", messages::INCONCLUSIVE.yellow());
    }

    Ok(exit_code(settled))
}

fn create_prompt(
    mode: PromptMode,
    input: SharedInput<BufReader<Stdin>>,
    config: &StatikiConfig,
    json_output: bool,
) -> Arc<dyn ConfirmationPrompt> {
    match mode {
        PromptMode::AlwaysYes => Arc::new(AutoPrompt::confirm()),
        PromptMode::AlwaysNo => Arc::new(AutoPrompt::decline()),
        PromptMode::Interactive => Arc::new(TerminalPrompt::new(
            input,
            interactive_output(json_output),
            config.prompt.preview_lines,
        )),
    }
}

/// Where the form and prompt write; stdout stays machine-readable under `--json`
fn interactive_output(json_output: bool) -> Box<dyn AsyncWrite + Unpin + Send> {
    if json_output {
        Box::new(tokio::io::stderr())
    } else {
        Box::new(tokio::io::stdout())
    }
}

/// 0 unless the last submission settled anywhere but `Succeeded`
fn exit_code(settled: Option<WorkflowState>) -> i32 {
    match settled {
        None | Some(WorkflowState::Succeeded) => 0,
        Some(_) => 1,
    }
}

fn run_config(
    command: &ConfigCommands,
    config: &StatikiConfig,
    resolved: &ResolvedConfig,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            println!("{}", "Effective configuration".cyan().bold());
            println!("{}", "─".repeat(50).dimmed());
            println!("{}", serde_yaml_ng::to_string(config)?.trim_end());
            println!("{}", "─".repeat(50).dimmed());
            if config.server.auth_token.is_some() {
                println!("{}: {}", "auth_token".cyan(), "set".yellow());
            }
        }
        ConfigCommands::Path => {
            println!("{}", describe_source(resolved));
        }
    }
    Ok(())
}
