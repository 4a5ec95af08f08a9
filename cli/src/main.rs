mod error_formatter;
mod formatter;
mod server;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use precept::{Engine, Form, PlanEntry, Responses};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "precept")]
#[command(about = "Compliance questionnaires you can prove.")]
#[command(
    long_about = "Precept validates compliance questionnaires by compiling form definitions and answers into a logic program and proving each derived query.\nThe CLI lets you run validations from JSON files, inspect compiled programs, or serve the validator over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate answers against a form definition
    ///
    /// Loads a form definition from JSON, merges answers from --responses and
    /// inline pairs, runs the validation, and prints one row per query.
    ///
    /// Examples:
    ///   precept validate form.json registered=true market=US
    ///   precept validate form.json --responses answers.json
    Validate {
        /// Path to the form definition JSON
        form: PathBuf,
        /// Answers to merge in (format: question_id=value)
        answers: Vec<String>,
        /// JSON file of answers keyed by question id
        #[arg(short = 'r', long = "responses")]
        responses: Option<PathBuf>,
        /// Output the raw JSON result (for piping to other tools)
        #[arg(long)]
        json: bool,
    },
    /// Show the compiled program and query plan without executing
    ///
    /// Questionnaire authors use this to see exactly what program text and
    /// goals a set of answers produces.
    Compile {
        /// Path to the form definition JSON
        form: PathBuf,
        /// Answers to merge in (format: question_id=value)
        answers: Vec<String>,
        /// JSON file of answers keyed by question id
        #[arg(short = 'r', long = "responses")]
        responses: Option<PathBuf>,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// Runs a server that validates questionnaires via HTTP POST requests.
    /// API: POST /validate with {code, responses, form}
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Validate {
            form,
            answers,
            responses,
            json,
        } => validate_command(form, answers, responses.as_deref(), *json),
        Commands::Compile {
            form,
            answers,
            responses,
        } => compile_command(form, answers, responses.as_deref()),
        Commands::Serve { host, port } => serve_command(host, *port),
    };

    if let Err(e) = result {
        // Check if it's a PreceptError and format it nicely, otherwise use default
        if let Some(precept_err) = e.downcast_ref::<precept::PreceptError>() {
            eprintln!("{}", error_formatter::format_error(precept_err));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn load_form(path: &Path) -> Result<Form> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read form file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("could not parse form definition {}", path.display()))
}

fn load_responses(file: Option<&Path>, answers: &[String]) -> Result<Responses> {
    let mut responses: Responses = match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read responses file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("could not parse responses {}", path.display()))?
        }
        None => Responses::new(),
    };
    for pair in answers {
        let (id, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid answer '{}', expected question_id=value", pair))?;
        responses.insert(id.trim().to_string(), value.trim().to_string());
    }
    Ok(responses)
}

fn validate_command(
    form_path: &Path,
    answers: &[String],
    responses_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let form = load_form(form_path)?;
    let responses = load_responses(responses_path, answers)?;

    let engine = Engine::new();
    let result = engine.validate(&form, &responses)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", Formatter::new().format_result(&result));
    }
    Ok(())
}

fn compile_command(
    form_path: &Path,
    answers: &[String],
    responses_path: Option<&Path>,
) -> Result<()> {
    let form = load_form(form_path)?;
    let responses = load_responses(responses_path, answers)?;

    let compiled = Engine::new().compile(&form, &responses);

    println!("% compiled program");
    print!("{}", compiled.program);
    println!();
    println!("% query plan");
    for entry in &compiled.plan.entries {
        match entry {
            PlanEntry::Skip { index } => println!("{}: skip", index),
            PlanEntry::Execute { index, goal } => println!("{}: {}", index, goal),
        }
    }
    Ok(())
}

fn serve_command(host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async { server::http::start_server(host, port).await })?;
        return Ok(());
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1)
    }
}
