mod api;
mod cities;
mod config;
mod drafts;
mod filter;
mod form;
mod geometry;
mod location;
mod logging;
mod models;
mod range;
mod tui;
mod widgets;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use api::JobBoardClient;
use cities::CityDataset;
use config::Config;
use drafts::{DraftStore, DRAFT_KEY};
use filter::{parse_amount, JobFilter};
use geometry::{format_inr, truncate};
use location::{LocationConfig, LocationPicker};
use models::JobType;
use range::{RangeConfig, RangeSelector};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Browse, filter and post job openings from the terminal")]
struct Cli {
    /// Job board API base URL (overrides JOBBOARD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// JSON city dataset to use instead of the built-in one
    #[arg(long, global = true)]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive job board (default)
    Browse,

    /// Print postings matching the given filters
    List {
        /// Substring of the job title
        #[arg(short, long)]
        title: Option<String>,

        /// Job type (fulltime, parttime, contract, internship)
        #[arg(short = 'y', long)]
        job_type: Option<String>,

        /// Substring of the location
        #[arg(short, long)]
        location: Option<String>,

        /// Lower end of the monthly salary window, in thousands
        #[arg(long)]
        salary_min: Option<i64>,

        /// Upper end of the monthly salary window, in thousands
        #[arg(long)]
        salary_max: Option<i64>,
    },

    /// Show location suggestions for a query (empty lists every city)
    Cities {
        query: Option<String>,
    },

    /// Inspect or discard the saved job-post draft
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Print the saved draft
    Show,

    /// Delete the saved draft
    Clear,
}

fn load_dataset(config: &Config) -> Result<Arc<CityDataset>> {
    let dataset = match &config.cities_file {
        Some(path) => CityDataset::load(path)?,
        None => CityDataset::builtin(),
    };
    if dataset.is_empty() {
        tracing::warn!("city dataset is empty; location search will find nothing");
    }
    Ok(Arc::new(dataset))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = cli.cities {
        config.cities_file = Some(path);
    }

    logging::init(&config.log_path())?;
    tracing::info!(api = %config.api_url, "jobboard v{} starting", env!("CARGO_PKG_VERSION"));

    let dataset = load_dataset(&config)?;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => tui::run_browse(&config, dataset)?,

        Commands::List {
            title,
            job_type,
            location,
            salary_min,
            salary_max,
        } => {
            let job_type = match job_type.as_deref() {
                Some(raw) => Some(
                    JobType::parse(raw)
                        .ok_or_else(|| anyhow::anyhow!("Unknown job type '{}'", raw))?,
                ),
                None => None,
            };

            let selector = RangeSelector::new(RangeConfig {
                min: config.salary_min,
                max: config.salary_max,
                initial_low: salary_min,
                initial_high: salary_max,
            })?;
            let salary = (!selector.spans_bound()).then(|| (selector.low(), selector.high()));

            let filter = JobFilter {
                title: title.unwrap_or_default(),
                job_type,
                location: location.unwrap_or_default(),
                salary,
            };

            let jobs = JobBoardClient::new(&config.api_url).fetch_jobs()?;
            let matches = filter.apply(&jobs);
            if matches.is_empty() {
                println!("No jobs match your search criteria.");
            } else {
                if salary.is_some() {
                    println!("Salary per month: {}", selector.label(&config.currency));
                }
                println!(
                    "{:<30} {:<18} {:<12} {:<16} {:>14}",
                    "TITLE", "COMPANY", "TYPE", "LOCATION", "MAX SALARY"
                );
                println!("{}", "-".repeat(94));
                for job in matches.iter().filter_map(|&i| jobs.get(i)) {
                    let pay = parse_amount(&job.max_salary)
                        .map(format_inr)
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<30} {:<18} {:<12} {:<16} {:>14}",
                        truncate(&job.job_title, 28),
                        truncate(&job.company_name, 16),
                        truncate(&job.job_type, 10),
                        truncate(&job.location, 14),
                        pay
                    );
                }
            }
        }

        Commands::Cities { query } => {
            let mut picker = LocationPicker::new(LocationConfig {
                dataset,
                initial_query: None,
            });
            match query.filter(|q| !q.is_empty()) {
                Some(q) => picker.set_query(q),
                None => picker.toggle(),
            }
            for candidate in picker.candidates() {
                if candidate.is_placeholder() {
                    println!("{}", candidate.city);
                } else {
                    println!("{:<24} {}", candidate.city, candidate.region);
                }
            }
        }

        Commands::Draft { command } => {
            let store = DraftStore::open(&config.drafts_path())?;
            match command {
                DraftCommands::Show => match store.load(DRAFT_KEY)? {
                    Some(draft) => {
                        println!("Draft saved at {}", draft.saved_at);
                        println!("{}", serde_json::to_string_pretty(&draft.post)?);
                    }
                    None => println!("No saved draft."),
                },
                DraftCommands::Clear => {
                    if store.clear(DRAFT_KEY)? {
                        println!("Draft cleared from {}", store.path().display());
                    } else {
                        println!("No saved draft.");
                    }
                }
            }
        }
    }

    Ok(())
}
