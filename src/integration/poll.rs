use std::env;
use std::time::Duration;

use log::warn;

use crate::store::Consistency;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);
const DEFAULT_LIMIT: usize = 50;
const DEFAULT_IDLE_AFTER: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub interval: Duration,
    /// Polling pauses once no client has asked for a view this long.
    pub idle_after: Duration,
    pub limit: usize,
    pub consistency: Consistency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            idle_after: DEFAULT_IDLE_AFTER,
            limit: DEFAULT_LIMIT,
            consistency: Consistency::default(),
        }
    }
}

impl Config {
    pub fn env() -> Self {
        let default = Self::default();

        let interval = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|ms| parse_or_warn::<u64>("POLL_INTERVAL_MS", &ms))
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(default.interval);

        let idle_after = env::var("POLL_IDLE_MS")
            .ok()
            .and_then(|ms| parse_or_warn::<u64>("POLL_IDLE_MS", &ms))
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(default.idle_after);

        let limit = env::var("MESSAGE_LIMIT")
            .ok()
            .and_then(|n| parse_or_warn::<usize>("MESSAGE_LIMIT", &n))
            .filter(|n| *n > 0)
            .unwrap_or(default.limit);

        let consistency = env::var("CACHE_CONSISTENCY")
            .map(|c| match c.parse() {
                Ok(c) => c,
                Err(e) => panic!("{e}"),
            })
            .unwrap_or(default.consistency);

        Self {
            interval,
            idle_after,
            limit,
            consistency,
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid {name}: {raw}");
            None
        }
    }
}
