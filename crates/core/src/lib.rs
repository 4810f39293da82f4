pub mod decimal;
pub mod detail;
pub mod domain;
pub mod factor;
pub mod ingest;
pub mod rank;
pub mod render;
pub mod session;

pub mod config {
    use crate::ingest::provider::FeedLocation;
    use anyhow::ensure;
    use std::time::Duration;

    pub const DEFAULT_FEED_PATH: &str = "data/stocks.json";

    /// Paths the api routes itself; the feed may not shadow them.
    const RESERVED_ROUTES: [&str; 4] = ["/", "/healthz", "/sort", "/api/table"];
    const RESERVED_PREFIXES: [&str; 2] = ["/api/", "/rows/"];

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub feed_url: Option<String>,
        pub feed_path: Option<String>,
        pub feed_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
        pub port: Option<u16>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                feed_url: non_empty_var("FEED_URL"),
                feed_path: non_empty_var("FEED_PATH"),
                feed_timeout_secs: std::env::var("FEED_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok()),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                port: std::env::var("PORT").ok().and_then(|s| s.parse::<u16>().ok()),
            })
        }

        pub fn feed_path(&self) -> &str {
            self.feed_path.as_deref().unwrap_or(DEFAULT_FEED_PATH)
        }

        /// `FEED_URL` wins over `FEED_PATH`.
        pub fn feed_location(&self) -> FeedLocation {
            match &self.feed_url {
                Some(url) => FeedLocation::parse(url),
                None => FeedLocation::parse(self.feed_path()),
            }
        }

        /// No timeout unless configured.
        pub fn feed_timeout(&self) -> Option<Duration> {
            self.feed_timeout_secs.map(Duration::from_secs)
        }

        /// Route the raw feed is served under, e.g. `/data/stocks.json`.
        pub fn feed_route(&self) -> anyhow::Result<String> {
            let route = format!(
                "/{}",
                self.feed_path().trim_start_matches("./").trim_start_matches('/')
            );
            validate_feed_route(&route)?;
            Ok(route)
        }
    }

    /// Rejects routes the router would panic on or that collide with its own paths.
    pub fn validate_feed_route(route: &str) -> anyhow::Result<()> {
        ensure!(
            route.starts_with('/') && route.len() > 1,
            "FEED_PATH must name a file (got route {route:?})"
        );
        ensure!(
            !route.contains([':', '*', '{', '}']),
            "FEED_PATH must not contain route captures (got {route:?})"
        );
        ensure!(
            !RESERVED_ROUTES.contains(&route.trim_end_matches('/'))
                && !RESERVED_PREFIXES.iter().any(|p| route.starts_with(p)),
            "FEED_PATH collides with a built-in route (got {route:?})"
        );
        Ok(())
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::path::PathBuf;

        #[test]
        fn feed_url_takes_precedence() {
            let settings = Settings {
                feed_url: Some("https://example.com/stocks.json".into()),
                feed_path: Some("local.json".into()),
                ..Settings::default()
            };
            assert_eq!(
                settings.feed_location(),
                FeedLocation::Url("https://example.com/stocks.json".into())
            );
        }

        #[test]
        fn defaults_to_bundled_feed_path() {
            let settings = Settings::default();
            assert_eq!(
                settings.feed_location(),
                FeedLocation::File(PathBuf::from(DEFAULT_FEED_PATH))
            );
            assert_eq!(settings.feed_route().unwrap(), "/data/stocks.json");
            assert_eq!(settings.feed_timeout(), None);
        }

        #[test]
        fn feed_route_normalizes_relative_prefixes() {
            let settings = Settings {
                feed_path: Some("./feeds/latest.json".into()),
                ..Settings::default()
            };
            assert_eq!(settings.feed_route().unwrap(), "/feeds/latest.json");
        }

        #[test]
        fn feed_route_rejects_collisions_and_captures() {
            for bad in ["", "/", "healthz", "./sort", "api/table", "rows/x/toggle", "data/:id.json", "data/*rest"] {
                let settings = Settings {
                    feed_path: Some(bad.into()),
                    ..Settings::default()
                };
                assert!(settings.feed_route().is_err(), "{bad:?} accepted");
            }
        }
    }
}
