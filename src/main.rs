use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use carelist::api::Filters;
use carelist::config::{Config, ConfigError, ListConfig};
use carelist::list::LoadOutcome;
use carelist::logging::init_tracing;
use carelist::records::{
    Appointment, Bookmark, CareTeamMember, Post, Practitioner, Resource, ResourceKind,
};
use carelist::session::SessionContext;

#[derive(Debug, Parser)]
#[command(name = "carelist", version, about = "Page through care marketplace lists")]
struct Cli {
    /// Config file (default: platform config dir, carelist/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `api.base_url` from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show configured lists.
    Lists,
    /// Load a list and print its items as JSON lines.
    List {
        /// Name of a configured list.
        name: String,
        /// Filter passed to the server, as KEY=VALUE. Repeatable.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Number of pages to load, including the first.
        #[arg(long, default_value_t = 1, conflicts_with = "all")]
        pages: usize,
        /// Load until every matching item is present.
        #[arg(long)]
        all: bool,
    },
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty filter key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read `path`, or the default config file when none was given.
fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }

    match cli.command {
        Command::Lists => {
            let mut stdout = std::io::stdout().lock();
            for list in &config.lists {
                writeln!(
                    stdout,
                    "{}\t{}\t{}\tpage_size={}",
                    list.name,
                    list.resource,
                    list.path,
                    list.effective_page_size(&config.defaults)
                )?;
            }
            Ok(())
        }
        Command::List {
            name,
            filters,
            pages,
            all,
        } => {
            let list = config
                .list(&name)
                .cloned()
                .ok_or_else(|| anyhow!("list '{}' is not configured", name))?;
            let session = SessionContext::from_config(config)?;
            let filters: Filters = filters.into_iter().collect();
            let max_more = if all { None } else { Some(pages.saturating_sub(1)) };

            match list.resource {
                ResourceKind::Post => print_list::<Post>(&session, &list, filters, max_more).await,
                ResourceKind::Appointment => {
                    print_list::<Appointment>(&session, &list, filters, max_more).await
                }
                ResourceKind::Practitioner => {
                    print_list::<Practitioner>(&session, &list, filters, max_more).await
                }
                ResourceKind::Bookmark => {
                    print_list::<Bookmark>(&session, &list, filters, max_more).await
                }
                ResourceKind::CareTeam => {
                    print_list::<CareTeamMember>(&session, &list, filters, max_more).await
                }
            }
        }
    }
}

async fn print_list<T: Resource>(
    session: &SessionContext,
    list: &ListConfig,
    filters: Filters,
    max_more: Option<usize>,
) -> Result<()> {
    let controller = session.list_for::<T>(list)?;

    if let LoadOutcome::Failed { message } = controller.load_initial(filters).await {
        bail!("{}: {}", list.name, message);
    }
    let (_, outcome) = controller.load_remaining(max_more).await;

    let mut stdout = std::io::stdout().lock();
    for item in controller.items() {
        serde_json::to_writer(&mut stdout, &item)?;
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;

    eprintln!(
        "{}: {} of {} loaded{}",
        list.name,
        controller.len(),
        controller.total(),
        if controller.all_loaded() { " (complete)" } else { "" }
    );

    if let LoadOutcome::Failed { message } = outcome {
        bail!("{}: stopped early: {}", list.name, message);
    }
    Ok(())
}
