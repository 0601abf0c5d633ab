use anyhow::Context;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use workorder::agents::{AnswerGenerator, EmailDrafter};
use workorder::cli::init::{self, InitConfig, InitResult};
use workorder::cli::output::Output;
use workorder::cli::{Cli, Commands};
use workorder::rag::PdfSearchTool;
use workorder::types::Question;
use workorder::utils::logging::init_logging;
use workorder::utils::toml_config::{ProviderConfig, WorkorderConfig};
use workorder::{Crew, LLMClientFactory};

const PROMPT: &str = "Which section of the report would you like to generate a work order for?";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let output = if cli.no_color || !std::io::stdout().is_terminal() {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<ExitCode> {
    let show_config = match cli.command {
        Some(Commands::Init {
            path,
            force,
            provider,
        }) => {
            let result = init::run(
                InitConfig {
                    path,
                    force,
                    provider,
                },
                output,
            );
            return Ok(match result {
                InitResult::Success | InitResult::AlreadyExists => ExitCode::SUCCESS,
                InitResult::Error(_) => ExitCode::FAILURE,
            });
        }
        Some(Commands::Config { validate }) => Some(validate),
        None => None,
    };

    dotenvy::dotenv().ok();

    let mut config = WorkorderConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    if let Some(document) = cli.document {
        config.document.path = document;
    }

    let _guard = init_logging(&config.logging, cli.verbose);

    if let Some(validate_only) = show_config {
        if !validate_only {
            print_config(&config, output);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let asked = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        output.ask(PROMPT, &mut input)
    };

    // Reject unreadable or blank input before loading the report
    let raw_question = match asked.and_then(|raw| Question::new(&raw).map(|_| raw)) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "Crew run failed");
            output.run_failed(&e.to_string());
            return Ok(ExitCode::SUCCESS);
        }
    };
    tracing::debug!(question = %raw_question.trim(), "Customer question");

    let crew = build_crew(&config).await?;

    match crew.kickoff(&raw_question).await {
        Ok(result) => {
            if let Ok(report) = serde_json::to_string(&result.tasks_output) {
                tracing::debug!(run_id = %result.run_id, tasks = %report, "Crew kickoff result");
            }
            output.email(&result.email);
        }
        Err(e) => output.run_failed(&e.to_string()),
    }

    Ok(ExitCode::SUCCESS)
}

async fn build_crew(config: &WorkorderConfig) -> anyhow::Result<Crew> {
    let provider = config.resolve_provider()?;
    let factory = LLMClientFactory::new(provider, config.generation_params());
    let llm = factory.create_default()?;

    let tool = PdfSearchTool::open(config.document.path.clone(), config.retrieval.clone())
        .await
        .context("Failed to load the inspection report")?;

    Ok(Crew::new(
        AnswerGenerator::new(llm.clone(), Arc::new(tool)),
        EmailDrafter::new(llm),
    )
    .with_stage_timeout(config.stage_timeout()))
}

fn print_config(config: &WorkorderConfig, output: &Output) {
    output.header("Configuration");
    match &config.provider {
        ProviderConfig::Ollama { base_url, model } => {
            output.kv("provider", "ollama");
            output.kv("base_url", base_url);
            output.kv("model", model);
        }
        ProviderConfig::OpenAI {
            api_key_env,
            api_base,
            model,
        } => {
            output.kv("provider", "openai");
            output.kv("api_base", api_base);
            output.kv("api_key_env", api_key_env);
            output.kv("model", model);
        }
    }
    output.kv("temperature", &config.model.temperature.to_string());
    output.kv("max_tokens", &config.model.max_tokens.to_string());
    output.kv("document", &config.document.path.display().to_string());
    output.kv("chunk_size", &config.retrieval.chunk_size.to_string());
    output.kv("chunk_overlap", &config.retrieval.chunk_overlap.to_string());
    output.kv("top_k", &config.retrieval.top_k.to_string());
    output.kv("min_score", &config.retrieval.min_score.to_string());
    output.kv(
        "stage_timeout_secs",
        &config.crew.stage_timeout_secs.to_string(),
    );
    output.kv("log_level", &config.logging.level);
    output.success("Configuration is valid");
}
