//! Service Configuration
//!
//! Every option can be given as a command-line flag or an environment variable
//! (flags win). Durations are whole seconds.

use crate::expiration::manager::{DEFAULT_TTL, MAX_TTL};
use crate::expiration::sweeper::DEFAULT_SWEEP_INTERVAL;
use crate::metadata::aggregator::{DEFAULT_AGGREGATION_INTERVAL, MAX_INTERVAL};
use crate::ranking::index::DEFAULT_TOP_N;

use anyhow::{Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "leaderboard", about = "Real-time leaderboard service")]
pub struct Args {
    /// Address the HTTP API listens on
    #[arg(long, env = "LEADERBOARD_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Sliding expiry window for the whole leaderboard, refreshed by every write
    #[arg(long, env = "LEADERBOARD_TTL_SECS", default_value_t = DEFAULT_TTL.as_secs())]
    pub ttl_secs: u64,

    /// Period between metadata recomputations
    #[arg(
        long,
        env = "LEADERBOARD_AGGREGATION_INTERVAL_SECS",
        default_value_t = DEFAULT_AGGREGATION_INTERVAL.as_secs()
    )]
    pub aggregation_interval_secs: u64,

    /// Period between proactive expiration sweeps
    #[arg(
        long,
        env = "LEADERBOARD_SWEEP_INTERVAL_SECS",
        default_value_t = DEFAULT_SWEEP_INTERVAL.as_secs()
    )]
    pub sweep_interval_secs: u64,

    /// Page size used when a top-N request omits `top`
    #[arg(long, env = "LEADERBOARD_DEFAULT_TOP_N", default_value_t = DEFAULT_TOP_N)]
    pub default_top_n: usize,

    /// Log filter (e.g. `info`, `leaderboard=debug`)
    #[arg(long, env = "LEADERBOARD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub ttl: Duration,
    pub aggregation_interval: Duration,
    pub sweep_interval: Duration,
    pub default_top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            ttl: DEFAULT_TTL,
            aggregation_interval: DEFAULT_AGGREGATION_INTERVAL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl TryFrom<&Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self> {
        if args.ttl_secs == 0 {
            bail!("ttl must be at least one second");
        }
        if args.aggregation_interval_secs == 0 {
            bail!("aggregation interval must be at least one second");
        }
        if args.sweep_interval_secs == 0 {
            bail!("sweep interval must be at least one second");
        }
        if args.default_top_n == 0 {
            bail!("default top-N page size must be positive");
        }
        if args.ttl_secs > MAX_TTL.as_secs() {
            bail!("ttl must not exceed {} seconds", MAX_TTL.as_secs());
        }
        if args.aggregation_interval_secs > MAX_INTERVAL.as_secs() {
            bail!(
                "aggregation interval must not exceed {} seconds",
                MAX_INTERVAL.as_secs()
            );
        }
        if args.sweep_interval_secs > MAX_INTERVAL.as_secs() {
            bail!("sweep interval must not exceed {} seconds", MAX_INTERVAL.as_secs());
        }

        Ok(Self {
            bind: args.bind,
            ttl: Duration::from_secs(args.ttl_secs),
            aggregation_interval: Duration::from_secs(args.aggregation_interval_secs),
            sweep_interval: Duration::from_secs(args.sweep_interval_secs),
            default_top_n: args.default_top_n,
        })
    }
}
