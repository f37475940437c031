//! Brand management commands.
//!
//! Every mutation goes through the brands page controller, so the CLI gets
//! the same optimistic update, sync, and rollback behaviour as the
//! dashboard.

use clap::Subcommand;
use sociallens_api::{ApiClient, BrandQuery, BrandSort};
use sociallens_app::{BrandWrite, BrandsPage};
use sociallens_core::present::format_compact;
use sociallens_core::{AddBrandForm, Brand, EditBrandForm};

/// Sub-commands available under `brands`.
#[derive(Debug, Subcommand)]
pub enum BrandsCommands {
    /// List tracked brands
    List {
        /// Only brands whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Sort order: `name_asc` or `date_added_desc`
        #[arg(long, default_value = "name_asc")]
        sort: BrandSort,
    },
    /// Track a new brand
    Add {
        /// Brand name
        #[arg(long)]
        name: String,
        /// Logo image URL
        #[arg(long)]
        logo_url: Option<String>,
        /// Social profile URL (repeatable, e.g. twitter.com/acme)
        #[arg(long = "url", required = true)]
        urls: Vec<String>,
    },
    /// Change a brand's name, logo, or social profiles
    Edit {
        /// Brand id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New logo URL; pass an empty string to clear it
        #[arg(long)]
        logo_url: Option<String>,
        /// Social profile URL to add (repeatable)
        #[arg(long = "add-url")]
        add_urls: Vec<String>,
        /// Social profile URL to remove (repeatable)
        #[arg(long = "remove-url")]
        remove_urls: Vec<String>,
        /// Send per-profile add/remove operations instead of the full list
        #[arg(long)]
        patch: bool,
        /// Brands to fetch when looking up the id (server default page otherwise)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Stop tracking a brand
    Delete {
        /// Brand id
        id: String,
        /// Brands to fetch when looking up the id (server default page otherwise)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Aggregate totals across all brands
    Stats,
}

/// # Errors
///
/// Returns an error if form validation or any API request fails.
pub(crate) async fn run(
    page: &BrandsPage<ApiClient>,
    command: BrandsCommands,
) -> anyhow::Result<()> {
    match command {
        BrandsCommands::List { search, sort } => run_brands_list(page, search, sort).await,
        BrandsCommands::Add {
            name,
            logo_url,
            urls,
        } => run_brands_add(page, name, logo_url, &urls).await,
        BrandsCommands::Edit {
            id,
            name,
            logo_url,
            add_urls,
            remove_urls,
            patch,
            limit,
        } => {
            let edit = BrandChanges {
                name,
                logo_url,
                add_urls,
                remove_urls,
            };
            let write = if patch {
                BrandWrite::Patch
            } else {
                BrandWrite::Replace
            };
            run_brands_edit(page, &id, limit, edit, write).await
        }
        BrandsCommands::Delete { id, limit } => run_brands_delete(page, &id, limit).await,
        BrandsCommands::Stats => run_brands_stats(page).await,
    }
}

async fn run_brands_list(
    page: &BrandsPage<ApiClient>,
    search: Option<String>,
    sort: BrandSort,
) -> anyhow::Result<()> {
    page.set_query(BrandQuery {
        search: search.unwrap_or_default(),
        sort: Some(sort),
        limit: None,
    })
    .await;
    page.load().await?;

    let state = page.state().await;
    if state.brands.is_empty() {
        println!("no brands found; add one with `sociallens brands add`");
        return Ok(());
    }

    let header = format!("{:<38}{:<24}{:<10}{:<9}PLATFORMS", "ID", "NAME", "STATUS", "PROFILES");
    println!("{header}");
    for brand in &state.brands {
        print_brand_row(brand);
    }
    Ok(())
}

fn print_brand_row(brand: &Brand) {
    let platforms: Vec<String> = brand
        .social_profiles
        .iter()
        .map(|p| p.platform.to_string())
        .collect();
    println!(
        "{:<38}{:<24}{:<10}{:<9}{}",
        brand.id,
        crate::truncate(&brand.name, 20),
        brand.status.to_string(),
        brand.social_profiles.len(),
        platforms.join(", ")
    );
}

async fn run_brands_add(
    page: &BrandsPage<ApiClient>,
    name: String,
    logo_url: Option<String>,
    urls: &[String],
) -> anyhow::Result<()> {
    let mut form = AddBrandForm::new();
    form.name = name;
    form.logo_url = logo_url.unwrap_or_default();
    for url in urls {
        form.stage(url)?;
    }
    let new = form.submit()?;

    let brand = page.add(new).await?;
    println!("added brand {} ({})", brand.name, brand.id);
    print_brand_row(&brand);
    Ok(())
}

struct BrandChanges {
    name: Option<String>,
    logo_url: Option<String>,
    add_urls: Vec<String>,
    remove_urls: Vec<String>,
}

/// Load the brand list used to resolve an id, optionally asking for more
/// than the server's default page.
async fn load_for_lookup(page: &BrandsPage<ApiClient>, limit: Option<u32>) -> anyhow::Result<()> {
    if limit.is_some() {
        page.set_query(BrandQuery {
            sort: Some(BrandSort::default()),
            limit,
            ..BrandQuery::default()
        })
        .await;
    }
    page.load().await?;
    Ok(())
}

async fn run_brands_edit(
    page: &BrandsPage<ApiClient>,
    id: &str,
    limit: Option<u32>,
    changes: BrandChanges,
    write: BrandWrite,
) -> anyhow::Result<()> {
    load_for_lookup(page, limit).await?;
    let brand = page.find(id).await.ok_or_else(|| {
        anyhow::anyhow!("brand '{id}' not found in the fetched page; try a larger --limit")
    })?;

    let mut form = EditBrandForm::from_brand(&brand);
    if let Some(name) = changes.name {
        form.name = name;
    }
    if let Some(logo_url) = changes.logo_url {
        form.logo_url = logo_url;
    }
    for url in &changes.remove_urls {
        form.remove_url_value(url);
    }
    for url in &changes.add_urls {
        form.stage(url)?;
    }
    let edit = form.submit()?;

    let saved = page.edit(edit, write).await?;
    println!("updated brand {} ({})", saved.name, saved.id);
    print_brand_row(&saved);
    Ok(())
}

async fn run_brands_delete(
    page: &BrandsPage<ApiClient>,
    id: &str,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    load_for_lookup(page, limit).await?;
    let name = page.find(id).await.map(|b| b.name);
    page.delete(id).await?;
    match name {
        Some(name) => println!("deleted brand {name} ({id})"),
        None => println!("deleted brand {id}"),
    }
    Ok(())
}

async fn run_brands_stats(page: &BrandsPage<ApiClient>) -> anyhow::Result<()> {
    page.refresh_stats().await?;
    let Some(stats) = page.state().await.stats else {
        return Ok(());
    };

    println!("{:<14}{}", "Brands", format_compact(stats.total_brands));
    println!("{:<14}{}", "Accounts", format_compact(stats.total_accounts));
    println!("{:<14}{}", "Content", format_compact(stats.total_content));
    println!("{:<14}{}", "Engagements", format_compact(stats.total_engagements));
    println!("{:<14}{}", "Followers", format_compact(stats.total_followers));
    println!("{:<14}{}", "Views", format_compact(stats.total_views));
    Ok(())
}
