//! Entity scaffolding CLI.
//!
//! Creates an entity directory (identity, objectives, skills, and memory
//! protocol documents) from a name, description, tier, and objectives.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use entity::create::{ProfileRequest, create_entity, next_steps, plan_entity, relative_display};
use entity::exit_codes;
use entity::io::config::resolve_config;
use entity::io::materialize::MaterializeOptions;
use entity::io::sink::FsSink;
use entity::logging;

#[derive(Parser)]
#[command(
    name = "entity",
    version,
    about = "Scaffold an entity: identity, objectives, skills, and memory protocol"
)]
struct Cli {
    /// Log progress to stderr (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the entity directory and its documents.
    Create {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Write into an existing entity directory, overwriting its documents.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the directories and files `create` would write, without writing them.
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Print the full plan, including document contents, as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Display name (e.g. "Research Assistant").
    #[arg(long)]
    name: String,
    /// Directory name (lowercase letters, numbers, hyphens). Derived from the name if omitted.
    #[arg(long)]
    slug: Option<String>,
    /// What the entity does.
    #[arg(long)]
    description: String,
    /// 1 = minimal (identity only), 2 = full (memory and skills).
    #[arg(long)]
    tier: Option<u8>,
    /// Comma-separated initial objectives.
    #[arg(long)]
    objectives: Option<String>,
    /// Directory the entity is created under.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Date stamped into the objectives tracker (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Config file with creation defaults. Defaults to `./entity.toml` if present.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ProfileArgs {
    fn split(self) -> (ProfileRequest, NaiveDate, Option<PathBuf>) {
        let request = ProfileRequest {
            name: self.name,
            slug: self.slug,
            description: self.description,
            tier: self.tier,
            objectives: self.objectives,
            output_dir: self.output,
        };
        let today = self.date.unwrap_or_else(|| Utc::now().date_naive());
        (request, today, self.config)
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let code = match run(cli) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit_codes::for_error(&err)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve current directory")?;
    match cli.command {
        Command::Create { profile, force } => cmd_create(&cwd, profile, force),
        Command::Plan { profile, json } => cmd_plan(&cwd, profile, json),
    }
}

fn cmd_create(cwd: &Path, args: ProfileArgs, force: bool) -> Result<()> {
    let (request, today, config_path) = args.split();
    let config = resolve_config(config_path.as_deref(), cwd)?;
    let outcome = create_entity(
        request,
        &config,
        cwd,
        today,
        &mut FsSink,
        &MaterializeOptions { force },
    )?;

    let base = &outcome.profile.output_root;
    for path in &outcome.report.existing_directories {
        println!("exists:  {}", relative_display(path, base));
    }
    for path in outcome.report.created() {
        println!("created: {}", relative_display(path, base));
    }
    for path in &outcome.report.overwritten_files {
        println!("rewrote: {}", relative_display(path, base));
    }
    println!();
    println!("Entity: {}", outcome.profile.name);
    println!("Location: {}", outcome.report.root.display());
    println!("Tier: {}", outcome.profile.tier);
    println!();
    println!("Next steps:");
    for (i, step) in next_steps(&outcome.profile).iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    Ok(())
}

fn cmd_plan(cwd: &Path, args: ProfileArgs, json: bool) -> Result<()> {
    let (request, today, config_path) = args.split();
    let config = resolve_config(config_path.as_deref(), cwd)?;
    let (profile, plan) = plan_entity(request, &config, cwd, today)?;

    if json {
        let payload = serde_json::to_string_pretty(&plan).context("serialize plan")?;
        println!("{payload}");
        return Ok(());
    }
    let base = &profile.output_root;
    for dir in &plan.directories {
        println!("dir:  {}", relative_display(dir, base));
    }
    for file in &plan.files {
        println!(
            "file: {} ({} bytes)",
            relative_display(&file.path, base),
            file.content.len()
        );
    }
    Ok(())
}
