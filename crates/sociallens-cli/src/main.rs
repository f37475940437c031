mod analytics;
mod brands;
mod home;
mod reports;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use sociallens_api::ApiClient;
use sociallens_app::{App, Page, View};
use tracing_subscriber::EnvFilter;

use crate::analytics::AnalyticsArgs;
use crate::brands::BrandsCommands;
use crate::reports::ReportsCommands;
use crate::settings::SettingsCommands;

#[derive(Debug, Parser)]
#[command(name = "sociallens")]
#[command(about = "SocialLens dashboard command line client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analysis templates and whether any brand is tracked
    Home {
        /// Filter templates by name, description, or category
        #[arg(long)]
        search: Option<String>,
    },
    /// Manage tracked brands
    Brands {
        #[command(subcommand)]
        command: BrandsCommands,
    },
    /// Engagement analytics for the selected brands and channels
    Analytics(AnalyticsArgs),
    /// Browse and delete generated reports
    Reports {
        #[command(subcommand)]
        command: ReportsCommands,
    },
    /// Account, workspace, MCP server, and privacy settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Show the signed-in user
    Whoami,
}

impl Commands {
    fn view(&self) -> View {
        match self {
            Commands::Home { .. } | Commands::Whoami => View::Home,
            Commands::Brands { .. } => View::Brands,
            Commands::Analytics(_) => View::Analytics,
            Commands::Reports { .. } => View::Reports { report: None },
            Commands::Settings { .. } => View::Settings,
        }
    }

    fn needs_user(&self) -> bool {
        matches!(self, Commands::Settings { .. } | Commands::Whoami)
    }
}

/// Format an optional value for display, with a dash placeholder for `None`.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("\u{2014}")
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = sociallens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Home { search: None });

    let client = ApiClient::new(
        config.config_source.clone(),
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;
    let mut app = App::with_debounce(
        Arc::new(client),
        Duration::from_millis(config.search_debounce_ms),
    );

    app.navigate(command.view());
    if command.needs_user() {
        app.load_user().await;
    }

    match (command, app.open().await) {
        (Commands::Home { search }, Page::Home(page)) => {
            home::run_home(&page, search.as_deref()).await
        }
        (Commands::Brands { command }, Page::Brands(page)) => brands::run(&page, command).await,
        (Commands::Analytics(args), Page::Analytics(page)) => analytics::run(&page, args).await,
        (Commands::Reports { command }, Page::Reports(page)) => reports::run(&page, command).await,
        (Commands::Settings { command }, Page::Settings(page)) => {
            settings::run(&page, command).await
        }
        (Commands::Whoami, _) => {
            let user = app
                .user()
                .ok_or_else(|| anyhow::anyhow!("could not fetch the signed-in user"))?;
            println!("{} <{}>", user.display_name(), user.email);
            Ok(())
        }
        (_, page) => Err(anyhow::anyhow!(
            "no handler for the {} page",
            page_title(&page)
        )),
    }
}

fn page_title<A>(page: &Page<A>) -> &'static str {
    match page {
        Page::Home(_) => "home",
        Page::Brands(_) => "brands",
        Page::Analytics(_) => "analytics",
        Page::Reports(_) => "reports",
        Page::Settings(_) => "settings",
    }
}

#[cfg(test)]
mod tests;
