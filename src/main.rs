use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use intake::api::ApiClient;
use intake::commands::{CommandError, list_history};
use intake::config::Config;
use intake::form::{FormController, SubmitOutcome, ValidationMode, draft_from_values, fill_form};
use intake::models::{Field, STATES, SubmissionDraft};
use intake::views;

#[derive(Parser)]
#[command(name = "intake", version, about = "Submit the contact form and browse previous submissions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a form from command-line flags
    Submit(SubmitArgs),
    /// Fill in the form interactively
    Fill {
        /// Require every field
        #[arg(long)]
        strict: bool,
    },
    /// Show previous submissions
    List,
    /// Save a generated PDF or DOCX
    Download {
        url: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that the backend is reachable
    Health,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    pin_code: Option<String>,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    remarks: Option<String>,
    /// Require every field
    #[arg(long)]
    strict: bool,
}

impl SubmitArgs {
    fn into_draft(self) -> SubmissionDraft {
        let values = [
            (Field::FullName, self.full_name),
            (Field::Email, self.email),
            (Field::Mobile, self.mobile),
            (Field::Company, self.company),
            (Field::Role, self.role),
            (Field::Address, self.address),
            (Field::City, self.city),
            (Field::State, self.state),
            (Field::PinCode, self.pin_code),
            (Field::Date, self.date),
            (Field::Remarks, self.remarks),
        ];

        draft_from_values(values)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Submit(args) => {
            let mode = mode_for(args.strict);
            let controller = intake::build_controller(&config, mode);
            controller.set_draft(args.into_draft());
            submit_and_show(&controller).await
        }
        Command::Fill { strict } => {
            let controller = intake::build_controller(&config, mode_for(strict));
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            fill_interactively(&controller, &mut lines).await?;
            submit_and_show(&controller).await
        }
        Command::List => {
            let client = ApiClient::new(&config.api_base);
            match list_history(&client).await {
                Ok(page) => {
                    print!("{page}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(CommandError::Request(err)) => {
                    eprintln!("{err}");
                    Ok(ExitCode::FAILURE)
                }
                Err(err) => Err(err.into()),
            }
        }
        Command::Download { url, output } => {
            let client = ApiClient::new(&config.api_base);
            let document = match client.download(&url).await {
                Ok(document) => document,
                Err(err) => {
                    eprintln!("{err}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            let path = output.unwrap_or_else(|| PathBuf::from(&document.file_name));
            tokio::fs::write(&path, &document.bytes).await?;
            println!("Saved {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => {
            let client = ApiClient::new(&config.api_base);
            match client.health().await {
                Ok(()) => {
                    println!("ok");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn mode_for(strict: bool) -> ValidationMode {
    if strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Basic
    }
}

/// Initial list load runs alongside the submit, as the page does on open.
async fn submit_and_show(
    controller: &FormController<ApiClient>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (_, outcome) = tokio::join!(controller.refresh_list(), controller.submit());
    print!("{}", views::render_page(&controller.snapshot())?);

    Ok(match outcome {
        SubmitOutcome::Submitted(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

async fn fill_interactively(
    controller: &FormController<ApiClient>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let lines = std::cell::RefCell::new(lines);
    fill_form(controller, |field, problem| {
        let lines = &lines;
        async move {
            if let Some(problem) = problem {
                println!("{problem}");
            }
            prompt(field, &mut lines.borrow_mut()).await
        }
    })
    .await
}

async fn prompt(
    field: Field,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<String, Box<dyn std::error::Error>> {
    let hint = match field {
        Field::State => format!(" (e.g. {})", STATES[0]),
        Field::Date => " (YYYY-MM-DD, blank for today)".to_string(),
        _ => String::new(),
    };

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{}{hint}: ", field.label()).as_bytes())
        .await?;
    stdout.flush().await?;

    let line = lines
        .next_line()
        .await?
        .ok_or("input closed before the form was complete")?;
    Ok(line.trim().to_string())
}
