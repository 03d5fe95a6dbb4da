//! Request budgets per client, backed by an injectable counter store.
//!
//! Middleware asks a [`RateLimitStore`] whether a request identified by a
//! [`RateLimitKey`] fits its [`RateLimitPolicy`]. The bundled
//! [`InMemoryRateLimitStore`] keeps token buckets in process memory; a
//! multi-instance deployment plugs in a shared store instead.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::TRACING_TARGET_SURFACE;

/// How often idle buckets are pruned from the in-memory store.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Request budget enforced as a token bucket.
///
/// A client may burst up to `max_requests` at once, after which tokens
/// refill continuously at `max_requests / window`. Over any single `window`
/// a client that starts with a full bucket can therefore get close to twice
/// `max_requests` through; the sustained rate is `max_requests` per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Time to refill an empty bucket.
    pub window: Duration,
    /// Bucket capacity, the largest burst.
    pub max_requests: u32,
}

impl RateLimitPolicy {
    /// Creates a new policy.
    #[inline]
    pub const fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
        }
    }

    /// Tokens regained per second when the bucket is not full.
    fn refill_rate(self) -> f64 {
        let window = self.window.as_secs_f64();
        if window > 0.0 {
            f64::from(self.max_requests) / window
        } else {
            f64::from(self.max_requests)
        }
    }
}

/// Identifies one counter: a surface, a scope on it, and a client.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Surface name, e.g. `public` or `admin`.
    pub surface: Cow<'static, str>,
    /// Scope within the surface, e.g. `global` or `auth`.
    pub scope: Cow<'static, str>,
    /// Client address; `None` shares one bucket among unidentified clients.
    pub client: Option<IpAddr>,
}

impl RateLimitKey {
    /// Creates a key.
    pub fn new(
        surface: impl Into<Cow<'static, str>>,
        scope: impl Into<Cow<'static, str>>,
        client: Option<IpAddr>,
    ) -> Self {
        Self {
            surface: surface.into(),
            scope: scope.into(),
            client,
        }
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.client {
            Some(ip) => write!(f, "{}:{}:{}", self.surface, self.scope, ip),
            None => write!(f, "{}:{}:unknown", self.surface, self.scope),
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request fits; `remaining` whole requests are left right now.
    Allowed { remaining: u32 },
    /// The budget is spent; retry after the given delay.
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Storage for rate-limit counters.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Consumes one request from the key's budget, if any is left.
    async fn acquire(&self, key: &RateLimitKey, policy: RateLimitPolicy) -> RateLimitDecision;
}

/// Token bucket for a single key.
#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    capacity: u32,
    refill_rate: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(policy: RateLimitPolicy) -> Self {
        Self {
            tokens: f64::from(policy.max_requests),
            capacity: policy.max_requests,
            refill_rate: policy.refill_rate(),
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();

        self.tokens = (self.tokens + elapsed * self.refill_rate).min(f64::from(self.capacity));
        self.last_refill = now;
    }

    fn try_consume(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn is_full(&self) -> bool {
        self.tokens >= f64::from(self.capacity)
    }

    fn time_until_available(&self) -> Duration {
        if self.tokens >= 1.0 || self.refill_rate <= 0.0 {
            Duration::ZERO
        } else {
            let seconds = (1.0 - self.tokens) / self.refill_rate;
            Duration::from_secs_f64(seconds.ceil())
        }
    }
}

#[derive(Debug)]
struct BucketMap {
    buckets: HashMap<RateLimitKey, TokenBucket>,
    last_cleanup: Instant,
}

/// In-process token-bucket store.
///
/// Clones share the same buckets. Buckets that have refilled completely are
/// dropped every few minutes, on the next check after the interval.
#[derive(Clone)]
pub struct InMemoryRateLimitStore {
    inner: Arc<RwLock<BucketMap>>,
}

impl InMemoryRateLimitStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let map = BucketMap {
            buckets: HashMap::new(),
            last_cleanup: Instant::now(),
        };

        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns the number of tracked keys.
    pub async fn size(&self) -> usize {
        self.inner.read().await.buckets.len()
    }

    /// Forgets the budget of a single key.
    pub async fn reset(&self, key: &RateLimitKey) {
        self.inner.write().await.buckets.remove(key);
    }
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn acquire(&self, key: &RateLimitKey, policy: RateLimitPolicy) -> RateLimitDecision {
        let mut map = self.inner.write().await;

        if map.last_cleanup.elapsed() >= CLEANUP_INTERVAL {
            let before = map.buckets.len();
            map.buckets.retain(|_, bucket| {
                bucket.refill();
                !bucket.is_full()
            });
            map.last_cleanup = Instant::now();

            tracing::debug!(
                target: TRACING_TARGET_SURFACE,
                removed = before - map.buckets.len(),
                remaining = map.buckets.len(),
                "pruned idle rate limit buckets"
            );
        }

        let bucket = map
            .buckets
            .entry(key.clone())
            .or_insert_with(|| TokenBucket::new(policy));

        if bucket.try_consume() {
            RateLimitDecision::Allowed {
                remaining: bucket.tokens.floor() as u32,
            }
        } else {
            RateLimitDecision::Limited {
                retry_after: bucket.time_until_available(),
            }
        }
    }
}

impl fmt::Debug for InMemoryRateLimitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRateLimitStore").finish_non_exhaustive()
    }
}
