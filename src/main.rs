//! cdnmon - terminal dashboard for CDN distributions

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use cdnmon::api::DistributionsClient;
use cdnmon::display;
use cdnmon::logging::{self, LogTarget};
use cdnmon::models::{Config, FilterState, FilterTag, PAGE_SIZES, PriorityTag, SortKey, StatusTag};
use cdnmon::query::query_string;
use cdnmon::tui;

#[derive(Parser)]
#[command(name = "cdnmon")]
#[command(about = "Browse CDN distributions from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    #[command(alias = "ui")]
    Tui,

    /// Fetch one page and print it as a table
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the request query string without contacting the server
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Status filter (comma-separated: provisioning,active,suspended,disabled)
    #[arg(short, long, value_name = "STATUSES")]
    status: Option<String>,

    /// Priority filter (comma-separated: high,medium,low)
    #[arg(long, value_name = "PRIORITIES")]
    priority: Option<String>,

    /// Name substring
    #[arg(short, long)]
    name: Option<String>,

    /// Sort token (-created_at, created_at, -updated_at, updated_at, name, -name)
    #[arg(long, allow_hyphen_values = true)]
    sort: Option<String>,

    /// Page number (1-based)
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Page size (10, 20 or 50)
    #[arg(short, long)]
    limit: Option<u32>,
}

fn check_tags<T: FilterTag>(kind: &str, encoded: &str) -> Result<String> {
    let tags: Vec<&str> = encoded
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    for tag in &tags {
        if T::from_token(tag).is_none() {
            let valid: Vec<&str> = T::ALL.iter().map(FilterTag::as_str).collect();
            bail!("unknown {kind} '{tag}' (expected one of: {})", valid.join(", "));
        }
    }
    Ok(tags.join(","))
}

impl FilterArgs {
    /// Build the filter state, starting from the configured defaults
    fn to_filters(&self, config: &Config) -> Result<FilterState> {
        let mut filters = FilterState::with_defaults(
            config.display.default_limit,
            &config.display.default_sort,
        );

        if let Some(status) = &self.status {
            filters.status = check_tags::<StatusTag>("status", status)?;
        }
        if let Some(priority) = &self.priority {
            filters.priority = check_tags::<PriorityTag>("priority", priority)?;
        }
        if let Some(name) = &self.name {
            filters.cname = name.clone();
        }
        if let Some(sort) = &self.sort {
            if SortKey::from_token(sort).is_none() {
                let valid: Vec<&str> = SortKey::ALL.iter().map(SortKey::token).collect();
                bail!("unknown sort '{sort}' (expected one of: {})", valid.join(", "));
            }
            filters.sort = sort.clone();
        }
        if let Some(limit) = self.limit {
            if !PAGE_SIZES.contains(&limit) {
                bail!("page size must be one of {PAGE_SIZES:?}, got {limit}");
            }
            filters.limit = limit;
        }
        filters.page = self.page.max(1);

        Ok(filters)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let target = if matches!(command, Commands::Tui) {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init(target) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let (config, warnings) = Config::load().context("loading configuration")?;

    match command {
        Commands::Tui => tui::run(config, warnings)?,
        Commands::Query { filters } => {
            for w in &warnings {
                warn!("{w}");
            }
            let filters = filters.to_filters(&config)?;
            println!("{}", query_string(&filters));
        }
        Commands::List { filters, json } => {
            for w in &warnings {
                warn!("{w}");
            }
            let filters = filters.to_filters(&config)?;
            let output = handle_list_command(&config, &filters, json)?;
            println!("{output}");
        }
    }

    Ok(())
}

fn handle_list_command(config: &Config, filters: &FilterState, json: bool) -> Result<String> {
    let base_url = config.base_url()?;
    let client =
        DistributionsClient::new(base_url, Duration::from_secs(config.api.timeout_secs))?;

    let rt = tokio::runtime::Runtime::new()?;
    let page = match rt.block_on(client.list(filters)) {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "listing request failed");
            bail!("{}", display::format_load_error());
        }
    };

    if json {
        return serde_json::to_string_pretty(&page).context("encoding response");
    }
    Ok(display::format_page(&page, filters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_defaults() {
        let filters = FilterArgs::default().to_filters(&Config::default()).unwrap();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_filter_args_normalizes_tags() {
        let args = FilterArgs {
            status: Some("active, suspended".to_string()),
            sort: Some("-name".to_string()),
            limit: Some(50),
            page: 0,
            ..FilterArgs::default()
        };
        let filters = args.to_filters(&Config::default()).unwrap();
        assert_eq!(filters.status, "active,suspended");
        assert_eq!(filters.sort, "-name");
        assert_eq!(filters.limit, 50);
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_filter_args_rejects_unknown_values() {
        let bad_status = FilterArgs {
            status: Some("archived".to_string()),
            ..FilterArgs::default()
        };
        assert!(bad_status.to_filters(&Config::default()).is_err());

        let bad_limit = FilterArgs {
            limit: Some(15),
            ..FilterArgs::default()
        };
        assert!(bad_limit.to_filters(&Config::default()).is_err());
    }

    #[test]
    fn test_cli_parses_list_flags() {
        let cli = Cli::try_parse_from([
            "cdnmon", "list", "--status", "active", "--sort", "-updated_at", "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List { filters, json }) => {
                assert!(json);
                assert_eq!(filters.status.as_deref(), Some("active"));
                assert_eq!(filters.sort.as_deref(), Some("-updated_at"));
            }
            _ => panic!("expected list command"),
        }
    }
}
