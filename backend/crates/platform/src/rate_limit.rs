//! Rate Limiting Infrastructure
//!
//! One `governor` GCRA limiter per client IP. A client can make `burst`
//! requests back to back and regains one request every `replenish_interval`.
//!
//! Limiters read time through [`TokioClock`], so tests with a paused tokio
//! clock drive refill with `tokio::time::advance`.
//!
//! Entries idle for longer than `idle_timeout` are dropped by
//! [`RateLimiter::sweep`], which [`RateLimiter::spawn_sweeper`] runs
//! periodically until cancelled.

use std::fmt;
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use governor::clock::Clock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum number of requests a fresh client can make back to back
    pub burst: u32,
    /// Time to regain one request
    pub replenish_interval: Duration,
    /// Entries not seen for longer than this are evicted
    pub idle_timeout: Duration,
    /// How often the sweeper runs
    pub sweep_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_window(5, Duration::from_secs(60))
    }
}

impl RateLimitConfig {
    /// `max_requests` per `window`, with a burst of `max_requests`
    pub fn per_window(max_requests: u32, window: Duration) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            burst: max_requests,
            replenish_interval: window / max_requests,
            idle_timeout: Duration::from_secs(3 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }

    fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.burst).unwrap_or(NonZeroU32::MIN);
        let period = self.replenish_interval.max(Duration::from_nanos(1));

        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst)
    }
}

/// `governor` clock backed by tokio's (pausable) clock
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        Instant::now().into_std()
    }
}

type ClientLimiter =
    governor::RateLimiter<NotKeyed, InMemoryState, TokioClock, NoOpMiddleware<std::time::Instant>>;

/// Rate limit check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Wait until the next request would be admitted (zero when allowed)
    pub retry_after: Duration,
}

struct ClientEntry {
    limiter: ClientLimiter,
    last_seen: Instant,
}

/// In-memory per-client rate limiter
///
/// Safe to share across tasks; clone the surrounding `Arc`.
pub struct RateLimiter {
    clients: DashMap<IpAddr, ClientEntry>,
    quota: Quota,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            clients: DashMap::new(),
            quota: config.quota(),
            config,
        }
    }

    /// Consume one request for `client`
    ///
    /// The first request from an unknown client creates a full limiter.
    /// Creation and consumption happen under the entry lock, so concurrent
    /// first requests from the same client share one limiter.
    pub fn check(&self, client: IpAddr) -> RateLimitDecision {
        let now = Instant::now();

        let mut entry = self.clients.entry(client).or_insert_with(|| ClientEntry {
            limiter: governor::RateLimiter::direct_with_clock(self.quota, TokioClock),
            last_seen: now,
        });
        entry.last_seen = now;

        match entry.limiter.check() {
            Ok(()) => RateLimitDecision {
                allowed: true,
                retry_after: Duration::ZERO,
            },
            Err(not_until) => RateLimitDecision {
                allowed: false,
                retry_after: not_until.wait_time_from(TokioClock.now()),
            },
        }
    }

    /// Number of tracked clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Evict clients idle for longer than `idle_timeout`
    ///
    /// Returns the number of evicted entries.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let idle_timeout = self.config.idle_timeout;
        let before = self.clients.len();

        self.clients
            .retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= idle_timeout);

        before.saturating_sub(self.clients.len())
    }

    /// Run [`Self::sweep`] every `sweep_interval` until `cancel` fires
    pub fn spawn_sweeper(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        let period = limiter.config.sweep_interval.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!("Rate limiter sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let evicted = limiter.sweep();
                        if evicted > 0 {
                            tracing::debug!(
                                evicted,
                                tracked = limiter.len(),
                                "Evicted idle rate limiter entries"
                            );
                        }
                    }
                }
            }
        })
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("tracked", &self.clients.len())
            .field("config", &self.config)
            .finish()
    }
}
