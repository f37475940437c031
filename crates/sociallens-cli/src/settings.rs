//! Settings commands. `save` loads every section, applies the given changes
//! to one of them, and writes that section back.

use clap::{Args, Subcommand};
use sociallens_api::{ApiClient, SettingsSection};
use sociallens_app::{SettingsPage, SettingsState};
use sociallens_core::OptionItem;

/// Sub-commands available under `settings`.
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show every settings section
    Show,
    /// Change and save one section
    Save {
        /// Section to save: profile, workspace, mcp-server, or privacy
        section: SettingsSection,
        #[command(flatten)]
        changes: SettingsChanges,
    },
    /// Check that the MCP server is reachable
    TestConnection,
    /// Connect a social account
    Connect {
        /// Platform key, e.g. tiktok
        platform: String,
        /// Access token issued by the platform
        #[arg(long, env = "SOCIALLENS_ACCOUNT_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Disconnect a social account
    Disconnect {
        /// Platform key, e.g. tiktok
        platform: String,
    },
}

/// Field changes for `settings save`. Only flags belonging to the saved
/// section have any effect.
#[derive(Debug, Args)]
pub struct SettingsChanges {
    /// Profile: first name
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    /// Profile: last name
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    /// Profile: company
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Profile: role key (see `settings show`)
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Workspace: brand name
    #[arg(long)]
    pub(crate) brand_name: Option<String>,
    /// Workspace: industry key (see `settings show`)
    #[arg(long)]
    pub(crate) industry: Option<String>,
    /// Workspace: website URL
    #[arg(long)]
    pub(crate) website_url: Option<String>,
    /// Workspace: competitor to add (repeatable)
    #[arg(long = "add-competitor")]
    pub(crate) add_competitors: Vec<String>,
    /// Workspace: competitor to remove (repeatable)
    #[arg(long = "remove-competitor")]
    pub(crate) remove_competitors: Vec<String>,
    /// MCP server: server URL
    #[arg(long)]
    pub(crate) server_url: Option<String>,
    /// MCP server: new API key
    #[arg(long, env = "SOCIALLENS_MCP_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,
    /// Privacy: days of historical data to keep
    #[arg(long)]
    pub(crate) historical_data_days: Option<u32>,
    /// Privacy: hours between data refreshes
    #[arg(long)]
    pub(crate) refresh_frequency_hours: Option<u32>,
}

/// # Errors
///
/// Returns an error if loading, saving, or an account action fails.
pub(crate) async fn run(
    page: &SettingsPage<ApiClient>,
    command: SettingsCommands,
) -> anyhow::Result<()> {
    match command {
        SettingsCommands::Show => {
            page.load().await?;
            print_settings(&page.state().await);
        }
        SettingsCommands::Save { section, changes } => {
            page.load().await?;
            run_settings_save(page, section, changes).await?;
        }
        SettingsCommands::TestConnection => {
            let result = page.test_connection().await;
            let outcome = if result.success { "ok" } else { "failed" };
            match result.response_time_ms {
                Some(ms) => println!("{outcome}: {} ({ms} ms)", result.message),
                None => println!("{outcome}: {}", result.message),
            }
        }
        SettingsCommands::Connect { platform, token } => {
            page.connect(&platform, &token).await?;
            println!("connected {platform}");
        }
        SettingsCommands::Disconnect { platform } => {
            page.disconnect(&platform).await?;
            println!("disconnected {platform}");
        }
    }
    Ok(())
}

async fn run_settings_save(
    page: &SettingsPage<ApiClient>,
    section: SettingsSection,
    changes: SettingsChanges,
) -> anyhow::Result<()> {
    let SettingsChanges {
        first_name,
        last_name,
        company,
        role,
        brand_name,
        industry,
        website_url,
        add_competitors,
        remove_competitors,
        server_url,
        api_key,
        historical_data_days,
        refresh_frequency_hours,
    } = changes;

    page.update(|s| {
        if let Some(profile) = s.profile.as_mut() {
            set(&mut profile.first_name, first_name);
            set(&mut profile.last_name, last_name);
            set(&mut profile.company, company);
            set(&mut profile.role, role);
        }
        if let Some(form) = s.workspace.as_mut() {
            set(&mut form.settings.brand_name, brand_name);
            set(&mut form.settings.industry, industry);
            set(&mut form.settings.website_url, website_url);
            for name in &remove_competitors {
                form.remove_competitor(name);
            }
        }
        if let Some(server) = s.mcp_server.as_mut() {
            set(&mut server.server_url, server_url);
        }
        set(&mut s.mcp_api_key, api_key);
        if let Some(privacy) = s.privacy.as_mut() {
            set(&mut privacy.historical_data_days, historical_data_days);
            set(&mut privacy.refresh_frequency_hours, refresh_frequency_hours);
        }
    })
    .await;

    for name in add_competitors {
        page.update(|s| {
            if let Some(form) = s.workspace.as_mut() {
                form.competitor_input = name;
            }
        })
        .await;
        if !page.add_competitor().await {
            tracing::warn!("skipping blank or duplicate competitor");
        }
    }

    page.save(section).await?;
    println!("saved {section}");
    Ok(())
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn print_settings(state: &SettingsState) {
    if let Some(profile) = &state.profile {
        println!("Profile");
        println!("  {:<12}{} {}", "Name", profile.first_name, profile.last_name);
        println!("  {:<12}{}", "Email", profile.email);
        println!("  {:<12}{}", "Company", profile.company);
        println!("  {:<12}{}", "Role", option_label(roles(state), &profile.role));
        println!();
    }

    if let Some(accounts) = &state.accounts {
        println!("Connected accounts");
        for account in &accounts.connected {
            println!("  {:<12}{}", account.platform, account.username);
        }
        for platform in &accounts.available {
            println!("  {:<12}(not connected)", platform.platform);
        }
        println!();
    }

    if let Some(form) = &state.workspace {
        let workspace = &form.settings;
        println!("Workspace");
        println!("  {:<12}{}", "Brand", workspace.brand_name);
        println!(
            "  {:<12}{}",
            "Industry",
            option_label(industries(state), &workspace.industry)
        );
        println!("  {:<12}{}", "Website", workspace.website_url);
        let competitors = if workspace.competitors.is_empty() {
            "\u{2014}".to_string()
        } else {
            workspace.competitors.join(", ")
        };
        println!("  {:<12}{competitors}", "Competitors");
        println!();
    }

    if let Some(server) = &state.mcp_server {
        println!("MCP server");
        println!("  {:<12}{}", "URL", server.server_url);
        println!("  {:<12}{}", "API key", server.api_key_masked);
        println!();
    }

    if let Some(privacy) = &state.privacy {
        println!("Privacy");
        println!("  {:<12}{} days", "History", privacy.historical_data_days);
        println!("  {:<12}every {} hours", "Refresh", privacy.refresh_frequency_hours);
    }
}

fn roles(state: &SettingsState) -> &[OptionItem] {
    state.options.as_ref().map_or(&[], |o| o.roles.as_slice())
}

fn industries(state: &SettingsState) -> &[OptionItem] {
    state.options.as_ref().map_or(&[], |o| o.industries.as_slice())
}

/// Display label for a role or industry key, falling back to the key.
fn option_label<'a>(items: &'a [OptionItem], key: &'a str) -> &'a str {
    items
        .iter()
        .find(|item| item.key == key)
        .map_or(key, |item| item.label.as_str())
}
