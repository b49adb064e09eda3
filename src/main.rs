//! # gic-site
//!
//! Command-line front end to the site content core.
//!
//! ```bash
//! # Normalize an article body
//! gic-site normalize --input post.html
//!
//! # Page data as JSON
//! gic-site blogs --limit 6
//! gic-site blog quarterly-review
//! gic-site events
//!
//! # Newsletter signup
//! gic-site subscribe member@example.com
//! ```
//!
//! Logs go to stderr; `RUST_LOG` controls the level (default `info`).

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

use gic_site::analytics::Analytics;
use gic_site::config::methods::ENV_API_BASE_URL;
use gic_site::newsletter::NewsletterBanner;
use gic_site::pages::{BlogCardView, BlogDetailView, EventDetailView, EventsOverview, HomeView};
use gic_site::share::{NoClipboard, StdoutClipboard, copy_link, share_url};
use gic_site::{
    ApiClient, ContentKind, ContentNormalizer, ListQuery, NewsletterClient, NormalizerConfig,
    PageState, Route, SiteConfig,
};

#[derive(Parser)]
#[command(name = "gic-site")]
#[command(about = "Content tools for the community website", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content API base URL, overrides config and environment
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize HTML from a file or stdin
    Normalize {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Column count above which tables get the card layout
        #[arg(long)]
        threshold: Option<usize>,
    },
    /// Home page data
    Home,
    /// Blog listing
    Blogs {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// One blog post
    Blog { slug: String },
    /// Events page data
    Events,
    /// One event
    Event { slug: String },
    /// Subscribe an address to the newsletter
    Subscribe { email: String },
    /// Resolve a site path
    Route { path: String },
    /// Print the share link for a site path
    Share { path: String },
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = match &cli.config {
        Some(path) => SiteConfig::from_json_file(path)?,
        None => SiteConfig::default(),
    };
    let api_base_url = cli.api_base_url.clone();
    config.apply_overrides_from(|key| {
        if key == ENV_API_BASE_URL && api_base_url.is_some() {
            return api_base_url.clone();
        }
        std::env::var(key).ok()
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a page state; anything but a loaded page exits non-zero
fn print_page<T: Serialize>(state: &PageState<T>) -> Result<ExitCode> {
    print_json(state)?;
    Ok(if state.loaded().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

/// Upper bound on waiting for analytics hits before exit
const ANALYTICS_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let analytics = Analytics::from_config(&config);
    let normalizer = ContentNormalizer::new(config.normalizer().clone());
    let wpm = config.words_per_minute();

    let outcome: Result<ExitCode> = async {
        match cli.command {
            Commands::Normalize { input, threshold } => {
                let html = read_input(input.as_ref())?;
                let normalizer = match threshold {
                    Some(column_threshold) => ContentNormalizer::new(NormalizerConfig {
                        column_threshold,
                        ..config.normalizer().clone()
                    }),
                    None => normalizer,
                };
                print!("{}", normalizer.normalize(&html));
                Ok(ExitCode::SUCCESS)
            }
            Commands::Home => {
                let api = ApiClient::new(&config)?;
                analytics.track_route(&Route::Home);
                let state = PageState::from_result(
                    api.fetch_blogs(&ListQuery::new()).await,
                    ContentKind::Blog,
                )
                .map(|blogs| HomeView::new(&blogs, wpm));
                print_page(&state)
            }
            Commands::Blogs { limit, tag } => {
                let api = ApiClient::new(&config)?;
                let mut query = ListQuery::new();
                if let Some(limit) = limit {
                    query = query.limit(limit);
                }
                if let Some(tag) = tag {
                    query = query.tag(tag);
                }
                analytics.track_route(&Route::Blog);
                let state = PageState::from_result(api.fetch_blogs(&query).await, ContentKind::Blog)
                    .map(|blogs| {
                        blogs
                            .iter()
                            .map(|blog| BlogCardView::new(blog, wpm))
                            .collect::<Vec<_>>()
                    });
                print_page(&state)
            }
            Commands::Blog { slug } => {
                let api = ApiClient::new(&config)?;
                analytics.track_route(&Route::BlogDetail(slug.clone()));
                let state = PageState::from_result(api.fetch_blog(&slug).await, ContentKind::Blog)
                    .map(|blog| {
                        analytics.track_content_view("blog", &blog.title, &blog.slug);
                        BlogDetailView::new(&blog, &normalizer, wpm)
                    });
                print_page(&state)
            }
            Commands::Events => {
                let api = ApiClient::new(&config)?;
                analytics.track_route(&Route::Events);
                let now = Utc::now();
                let state = PageState::from_result(
                    api.fetch_events(&ListQuery::new()).await,
                    ContentKind::Event,
                )
                .map(|events| EventsOverview::new(events, now));
                print_page(&state)
            }
            Commands::Event { slug } => {
                let api = ApiClient::new(&config)?;
                analytics.track_route(&Route::EventDetail(slug.clone()));
                let now = Utc::now();
                let state = PageState::from_result(api.fetch_event(&slug).await, ContentKind::Event)
                    .map(|event| {
                        analytics.track_content_view("event", &event.title, &event.slug);
                        EventDetailView::new(&event, &normalizer, now)
                    });
                print_page(&state)
            }
            Commands::Subscribe { email } => {
                let client = NewsletterClient::new(&config)?;
                let result = client.subscribe(&email).await;
                if result.is_ok() {
                    analytics.track_button_click("Subscribe", "Newsletter");
                }
                let banner = NewsletterBanner::from_result(&result);
                print_json(&banner)?;
                Ok(if result.is_ok() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Commands::Route { path } => {
                let route = Route::parse(&path);
                print_json(&serde_json::json!({
                    "route": route,
                    "path": route.path(),
                    "title": route.title(),
                    "nav_section": route.nav_section(),
                }))?;
                Ok(ExitCode::SUCCESS)
            }
            Commands::Share { path } => {
                let route = Route::parse(&path);
                let url = share_url(config.site_url(), &route);
                let confirmation = copy_link(&url, &NoClipboard, &StdoutClipboard);
                info!(via = ?confirmation.via, "{}", confirmation.message);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
    .await;

    analytics.flush(ANALYTICS_FLUSH_TIMEOUT).await;
    outcome
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}
