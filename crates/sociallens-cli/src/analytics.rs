use chrono::{Local, NaiveDate};
use clap::Args;
use sociallens_api::ApiClient;
use sociallens_app::analytics::CHANNELS;
use sociallens_app::{
    AnalyticsPage, AnalyticsState, DatePreset, PostSort, PostSortKey, SortDirection,
};
use sociallens_core::present::format_compact;

/// Filters and table options for `analytics`.
#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    /// Brand name to include (repeatable; default all brands)
    #[arg(long = "brand")]
    pub(crate) brands: Vec<String>,
    /// Channel to include (repeatable; default all channels)
    #[arg(long = "channel")]
    pub(crate) channels: Vec<String>,
    /// Date preset: last_7_days, last_30_days, last_90_days, or this_month
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub(crate) preset: Option<DatePreset>,
    /// Custom range start (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub(crate) from: Option<NaiveDate>,
    /// Custom range end (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub(crate) to: Option<NaiveDate>,
    /// Top-posts sort column: brand_name, content, engagement_count, views, engagement_rate
    #[arg(long)]
    pub(crate) sort: Option<PostSortKey>,
    /// Sort ascending instead of descending
    #[arg(long)]
    pub(crate) asc: bool,
    /// Top-posts page to show
    #[arg(long, default_value = "1")]
    pub(crate) page: usize,
}

/// Apply the filters, fetch every dataset, and print them.
///
/// # Errors
///
/// Returns an error if the brand list or any analytics request fails.
pub(crate) async fn run(
    page: &AnalyticsPage<ApiClient>,
    args: AnalyticsArgs,
) -> anyhow::Result<()> {
    for channel in &args.channels {
        if !CHANNELS.contains(&channel.as_str()) {
            tracing::warn!(
                channel = %channel,
                "unknown channel; expected one of {}",
                CHANNELS.join(", ")
            );
        }
    }

    // No brands are loaded yet, so these only update the filters.
    for brand in &args.brands {
        page.toggle_brand(brand).await?;
    }
    for channel in &args.channels {
        page.toggle_channel(channel).await?;
    }
    if let (Some(from), Some(to)) = (args.from, args.to) {
        page.set_range(from, to).await?;
    } else if let Some(preset) = args.preset {
        page.set_preset(preset, Local::now().date_naive()).await?;
    }

    page.load().await?;

    page.set_sort(PostSort {
        key: args.sort.unwrap_or(PostSort::default().key),
        direction: if args.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    })
    .await;
    for _ in 1..args.page {
        page.next_page().await;
    }

    let state = page.state().await;
    if state.brands.is_empty() {
        println!("no brands tracked yet; add one with `sociallens brands add`");
        return Ok(());
    }
    print_analytics(&state);
    Ok(())
}

fn print_analytics(state: &AnalyticsState) {
    println!(
        "{} to {}  |  Brands: {}  |  Channels: {}",
        state.range.start.format("%Y-%m-%d"),
        state.range.end.format("%Y-%m-%d"),
        state.brand_filter.label("All Brands"),
        state.channel_filter.label("All Channels")
    );
    println!();

    if let Some(metrics) = &state.metrics {
        println!("{:<22}{}", "Brands analyzed", metrics.brands_analyzed);
        println!("{:<22}{}", "Total posts", format_compact(metrics.total_posts));
        println!("{:<22}{}", "Engagements", format_compact(metrics.engagements));
        println!("{:<22}{}", "Total views", format_compact(metrics.total_views));
        println!("{:<22}{:.2}%", "Avg engagement rate", metrics.avg_engagement_rate);
        println!();
    }

    if !state.platforms.is_empty() {
        println!("{:<16}ENGAGEMENT", "PLATFORM");
        for row in &state.platforms {
            println!("{:<16}{}", row.platform, format_compact(row.engagement_count));
        }
        println!();
    }

    if !state.post_types.is_empty() {
        println!("{:<16}POSTS", "POST TYPE");
        for row in &state.post_types {
            println!("{:<16}{}", row.post_type, row.count);
        }
        println!();
    }

    if !state.performance.is_empty() {
        println!("{:<24}{:<10}ENGAGEMENT", "BRAND", "POSTS");
        for row in &state.performance {
            println!(
                "{:<24}{:<10}{}",
                crate::truncate(&row.brand_name, 20),
                row.post_count,
                format_compact(row.engagement_count)
            );
        }
        println!();
    }

    if let Some(growth) = &state.growth {
        if let (Some(first), Some(last)) = (growth.dates.first(), growth.dates.last()) {
            println!("Follower growth {first} to {last}");
            for series in &growth.brands {
                let start = series.data_points.first().copied().unwrap_or_default();
                let end = series.data_points.last().copied().unwrap_or_default();
                let name = crate::truncate(&series.brand_name, 20);
                println!("  {name:<22}{start:.0} -> {end:.0}");
            }
            println!();
        }
    }

    let posts = state.posts_page();
    if posts.total == 0 {
        println!("no posts in this period");
        return;
    }
    println!(
        "{:<20}{:<44}{:<12}{:<10}RATE",
        "BRAND", "CONTENT", "ENGAGEMENT", "VIEWS"
    );
    for post in &posts.posts {
        println!(
            "{:<20}{:<44}{:<12}{:<10}{:.2}%",
            crate::truncate(&post.brand_name, 16),
            crate::truncate(&post.content.replace('\n', " "), 40),
            format_compact(post.engagement_count),
            format_compact(post.views),
            post.engagement_rate
        );
    }
    println!(
        "Showing {} to {} of {} results",
        posts.first, posts.last, posts.total
    );
}
