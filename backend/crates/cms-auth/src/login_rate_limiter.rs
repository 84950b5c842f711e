use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Per-identifier login throttle.
///
/// Checked before any password hashing so a guessing loop costs the server
/// nothing once the quota is spent.
///
/// Keyed by identifier alone: the bound holds across client addresses, and
/// anyone naming an account can spend its quota for one window.
pub struct LoginRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    config: RateLimitConfig,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(config.window_secs.max(1)) / burst.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Consume one attempt for `identifier`, or fail if its quota is spent
    #[track_caller]
    pub fn check(&self, identifier: &str) -> AuthErrorResult<()> {
        let key = identifier.trim().to_lowercase();

        self.limiter
            .check_key(&key)
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_requests,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Drop state for identifiers whose quota has fully replenished
    pub fn shrink(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }
}
