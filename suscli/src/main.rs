#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::{Color, Colorize};
use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;
use susconfig::{SustainConfig, TokenFile};
use sustain::activities::{ActivityLog, Confirmation};
use sustain::dashboard;
use sustain::session::Session;
use sustain::types::{Activity, ActivityDraft, Category, RegisterUser};
use sustain::SustainClient;

#[derive(Parser)]
#[command(name = "suscli", about = "A CLI for SustainLite")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a SustainLite account (prompts for a password)
    Register {
        username: String,
        email: String,
    },
    /// Sign in and persist the session token
    Login {
        /// Username to sign in as; falls back to default_username in config
        username: Option<String>,
    },
    /// Discard the persisted session token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List logged activities, freshest first
    List,
    /// Log an activity
    Add {
        /// Activity category (energy/water/transport/waste)
        category: Category,
        /// Short description of the action taken
        action: String,
        /// Numeric magnitude
        value: String,
        /// Unit; defaults to the category's first allowed unit
        #[arg(long)]
        unit: Option<String>,
        /// Optional notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an activity
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show dashboard statistics
    Dashboard,
    /// Show recommendations
    Recommend,
    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// The shell to generate completions for
        shell: Shell,
    },
}

fn client(config: &SustainConfig) -> Arc<SustainClient> {
    Arc::new(SustainClient::new().with_base_url(config.api_url.clone()))
}

fn anonymous_session(config: &SustainConfig) -> Session<TokenFile> {
    Session::new(client(config), TokenFile::new())
}

async fn signed_in_session(config: &SustainConfig) -> Result<Session<TokenFile>> {
    let mut session = anonymous_session(config);
    session.init().await;
    if !session.is_authenticated() {
        anyhow::bail!("Not signed in. Run `suscli login` first.");
    }
    Ok(session)
}

fn prompt_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .with_context(|| "Failed to read input")?;
    Ok(input.trim().to_string())
}

fn prompt_confirm(prompt: &str) -> Result<Confirmation> {
    let answer = prompt_line(prompt)?;
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Ok(Confirmation::Granted)
    } else {
        Ok(Confirmation::Denied)
    }
}

const fn category_color(category: Category) -> Color {
    match category {
        Category::Energy => Color::Yellow,
        Category::Water => Color::Blue,
        Category::Transport => Color::Magenta,
        Category::Waste => Color::Green,
    }
}

fn format_activity(activity: &Activity) -> String {
    let notes = activity
        .notes
        .as_deref()
        .map(|notes| format!("  ({notes})"))
        .unwrap_or_default();
    format!(
        "{:>5}  {}  {:<9}  {} {}  {}{}",
        activity.id,
        activity.date.date(),
        activity.category,
        activity.value,
        activity.unit,
        activity.action,
        notes
    )
    .color(category_color(activity.category))
    .to_string()
}

fn handle_error(err: &anyhow::Error) -> ! {
    eprintln!("{err}");
    process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        handle_error(&err);
    }
    Ok(())
}

#[allow(clippy::too_many_lines)]
async fn run(cli: Cli) -> Result<()> {
    let config = SustainConfig::load().with_context(|| "Failed to load sustainlite config")?;

    match cli.command {
        Command::Register { username, email } => {
            let password = prompt_line("Password: ")?;
            let session = anonymous_session(&config);
            let user = session
                .register(&RegisterUser::new(username, email, password))
                .await?;
            println!(
                "Registered {}. Sign in with `suscli login {}`.",
                user.username, user.username
            );
        }
        Command::Login { username } => {
            let username = username
                .or_else(|| config.default_username.clone())
                .context("No username given and no default_username in config")?;
            let password = prompt_line("Password: ")?;
            let mut session = anonymous_session(&config);
            session.login(&username, &password).await?;
            println!("Signed in as {username}.");
        }
        Command::Logout => {
            let mut session = anonymous_session(&config);
            session.logout();
            println!("Signed out.");
        }
        Command::Whoami => {
            let session = signed_in_session(&config).await?;
            let user = session.user().context("No user loaded")?;
            println!("{} <{}>", user.username, user.email);
        }
        Command::List => {
            let session = signed_in_session(&config).await?;
            let mut log = ActivityLog::new(session.client().clone());
            log.refresh().await?;
            if log.activities().is_empty() {
                println!("No activities logged yet.");
            }
            for activity in log.activities() {
                println!("{}", format_activity(activity));
            }
        }
        Command::Add {
            category,
            action,
            value,
            unit,
            notes,
        } => {
            let session = signed_in_session(&config).await?;
            let mut draft = ActivityDraft::new();
            draft.set_category(category);
            draft.action = action;
            draft.value = value;
            if let Some(unit) = unit {
                draft.unit = unit;
            }
            if let Some(notes) = notes {
                draft.notes = notes;
            }
            let mut log = ActivityLog::new(session.client().clone());
            let created = log.create(&draft).await?;
            log.refresh().await?;
            println!(
                "Logged activity #{}: {} ({} {})",
                created.id, created.action, created.value, created.unit
            );
        }
        Command::Delete { id, yes } => {
            let session = signed_in_session(&config).await?;
            let mut log = ActivityLog::new(session.client().clone());
            let confirmation = if yes {
                Confirmation::Granted
            } else {
                prompt_confirm(&format!("Delete activity {id}? [y/N] "))?
            };
            if log.delete(id, confirmation).await? {
                println!("Deleted activity {id}.");
            } else {
                println!("Aborted.");
            }
        }
        Command::Dashboard => {
            let session = signed_in_session(&config).await?;
            let data = dashboard::load(session.client()).await?;
            let stats = &data.stats;
            println!("Total activities:    {}", stats.total_activities);
            println!("Energy saved:        {} kWh", stats.energy_saved);
            println!("Water saved:         {} L", stats.water_saved);
            println!("Transport emissions: {} kg CO2", stats.transport_emissions);
            println!("Waste reduced:       {} kg", stats.waste_reduced);
            if !stats.recent_activities.is_empty() {
                println!("\nRecent:");
                for activity in stats
                    .recent_activities
                    .iter()
                    .take(config.display.recent_limit)
                {
                    println!("{}", format_activity(activity));
                }
            }
        }
        Command::Recommend => {
            let session = signed_in_session(&config).await?;
            let list = session.client().recommendations().await?;
            if list.recommendations.is_empty() {
                println!("No recommendations right now. Keep logging!");
            }
            for rec in &list.recommendations {
                println!(
                    "{}",
                    format!("[{}] {}", rec.category, rec.title)
                        .color(category_color(rec.category))
                        .bold()
                );
                println!("  {}", rec.description);
            }
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "suscli", &mut std::io::stdout());
        }
    }

    Ok(())
}
