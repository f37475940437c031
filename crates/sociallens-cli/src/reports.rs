use clap::Subcommand;
use sociallens_api::ApiClient;
use sociallens_app::ReportsPage;
use sociallens_core::present::format_category;
use sociallens_core::Report;

/// Sub-commands available under `reports`.
#[derive(Debug, Subcommand)]
pub enum ReportsCommands {
    /// List reports, optionally filtered
    List {
        /// Text to find in the headline, explanation, or category
        #[arg(long)]
        search: Option<String>,
        /// Only reports featuring this brand
        #[arg(long)]
        brand: Option<String>,
        /// Only reports of this category
        #[arg(long = "type")]
        report_type: Option<String>,
    },
    /// Show one report
    View {
        /// Report id
        id: i64,
    },
    /// Delete a report
    Delete {
        /// Report id
        id: i64,
    },
}

/// # Errors
///
/// Returns an error if fetching or deleting reports fails, or the requested
/// report does not exist.
pub(crate) async fn run(
    page: &ReportsPage<ApiClient>,
    command: ReportsCommands,
) -> anyhow::Result<()> {
    page.load().await?;

    match command {
        ReportsCommands::List {
            search,
            brand,
            report_type,
        } => {
            if let Some(search) = search {
                page.search(search).await;
            }
            page.set_brand_filter(brand).await;
            page.set_type_filter(report_type).await;
            run_reports_list(page).await;
            Ok(())
        }
        ReportsCommands::View { id } => {
            let report = page.view(id).await.ok_or_else(|| {
                anyhow::anyhow!("report {id} not found; run `reports list` for ids")
            })?;
            print_report(&report);
            Ok(())
        }
        ReportsCommands::Delete { id } => {
            page.delete(id).await?;
            println!("deleted report {id}");
            Ok(())
        }
    }
}

async fn run_reports_list(page: &ReportsPage<ApiClient>) {
    let reports = page.filtered().await;
    if reports.is_empty() {
        let types = page.report_types().await;
        if types.is_empty() {
            println!("no reports yet");
        } else {
            println!("no reports match; available types: {}", types.join(", "));
        }
        return;
    }

    let header = format!("{:<8}{:<20}{:<24}HEADLINE", "ID", "TYPE", "BRANDS");
    println!("{header}");
    for report in &reports {
        println!(
            "{:<8}{:<20}{:<24}{}",
            report.id,
            crate::truncate(&format_category(&report.component_category), 18),
            crate::truncate(&report.brand_names().join(", "), 22),
            crate::truncate(crate::or_dash(report.headline.as_deref()), 60)
        );
    }
}

fn print_report(report: &Report) {
    println!(
        "Report {} \u{2014} {}",
        report.id,
        format_category(&report.component_category)
    );
    println!("Headline: {}", crate::or_dash(report.headline.as_deref()));
    let brands = report.brand_names();
    if !brands.is_empty() {
        println!("Brands: {}", brands.join(", "));
    }
    println!("URL: {}", report.report_url);
    if let Some(explanation) = report.explanation.as_deref() {
        println!();
        println!("{explanation}");
    }
}
