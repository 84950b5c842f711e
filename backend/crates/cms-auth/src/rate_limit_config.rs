/// Login throttling parameters
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum login attempts per identifier per window
    pub max_requests: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10, // 10 attempts
            window_secs: 60,  // per minute
        }
    }
}
