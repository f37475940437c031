use sociallens_api::ApiClient;
use sociallens_app::home::sample_reports;
use sociallens_app::HomePage;
use sociallens_core::present::format_category;

/// Print the template catalogue, falling back to server-side suggestions
/// when a search matches nothing locally.
///
/// # Errors
///
/// Returns an error if the brand check or the template fetch fails.
pub(crate) async fn run_home(
    page: &HomePage<ApiClient>,
    search: Option<&str>,
) -> anyhow::Result<()> {
    page.load().await?;
    let state = page.state().await;

    if !state.has_brands {
        println!("No brands tracked yet; add one with `sociallens brands add`.");
        println!();
    }

    let query = search.unwrap_or_default();
    let mut templates = page.filtered(query).await;
    if templates.is_empty() && !query.trim().is_empty() {
        println!("No local matches for \"{query}\"; asking the server for suggestions.");
        templates = page.suggest(query).await;
    }

    if templates.is_empty() {
        println!("no templates found");
        return Ok(());
    }

    let header = format!("{:<6}{:<34}{:<20}{:<8}SAMPLES", "ID", "TEMPLATE", "CATEGORY", "MINS");
    println!("{header}");
    for template in &templates {
        println!(
            "{:<6}{:<34}{:<20}{:<8}{}",
            template.id,
            crate::truncate(&template.name, 30),
            crate::truncate(&format_category(&template.category), 18),
            template.estimated_time_minutes,
            sample_reports(template).len()
        );
    }

    Ok(())
}
