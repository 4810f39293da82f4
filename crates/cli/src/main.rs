use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use underval_core::ingest::provider::FeedLocation;
use underval_core::rank::SortKey;
use underval_core::session::TableSession;

#[derive(Debug, Parser)]
#[command(name = "underval_cli")]
struct Args {
    /// Feed URL or file path. Defaults to FEED_URL, then FEED_PATH.
    #[arg(long)]
    feed: Option<String>,

    /// Sort key (undervaluationScore, price, valueRank, qualitySummary, expectedReturn).
    #[arg(long, default_value = "undervaluationScore")]
    sort: String,

    /// Row clicks to replay after sorting, in order.
    #[arg(long = "click", value_name = "TICKER")]
    clicks: Vec<String>,

    /// Print the table body as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = underval_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let location = match args.feed.as_deref() {
        Some(feed) => FeedLocation::parse(feed),
        None => settings.feed_location(),
    };
    let source = location.into_source(&settings)?;

    let mut session = TableSession::new();
    let loaded = underval_core::ingest::load(&mut session, source.as_ref()).await;

    if let Err(err) = loaded {
        print_body(&session, args.json)?;
        let err = anyhow::Error::new(err).context("failed to load stock data");
        sentry_anyhow::capture_anyhow(&err);
        return Err(err);
    }

    let sort_key = SortKey::parse_or_default(&args.sort);
    if sort_key != session.sort_key() {
        session.render(sort_key);
    }

    for ticker in &args.clicks {
        session
            .toggle_row(ticker)
            .with_context(|| format!("click on {ticker} failed"))?;
    }

    print_body(&session, args.json)
}

fn print_body(session: &TableSession, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(session.body()).context("serialize table body")?;
        println!("{out}");
    } else {
        print!("{}", session.body().to_text());
    }
    Ok(())
}

fn init_sentry(settings: &underval_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
