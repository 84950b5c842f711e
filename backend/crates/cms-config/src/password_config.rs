use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Argon2 RFC 9106 low-memory profile
pub const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
pub const DEFAULT_ITERATIONS: u32 = 2;
pub const DEFAULT_PARALLELISM: u32 = 1;
pub const MIN_MEMORY_KIB: u32 = 8;
/// Argon2 lane limit (2^24 - 1)
pub const MAX_PARALLELISM: u32 = 0x00FF_FFFF;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_MIN_PASSWORD_LENGTH: usize = 128;

/// Argon2id cost parameters and password policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_MEMORY_KIB,
            iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
            min_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.iterations == 0 {
            return Err(ConfigError::password("password.iterations must be >= 1"));
        }

        if self.parallelism == 0 || self.parallelism > MAX_PARALLELISM {
            return Err(ConfigError::password(format!(
                "password.parallelism must be 1-{MAX_PARALLELISM}, got {}",
                self.parallelism
            )));
        }

        if self.memory_kib < MIN_MEMORY_KIB.saturating_mul(self.parallelism) {
            return Err(ConfigError::password(format!(
                "password.memory_kib must be at least {} x parallelism, got {}",
                MIN_MEMORY_KIB, self.memory_kib
            )));
        }

        if self.min_length < MIN_MIN_PASSWORD_LENGTH || self.min_length > MAX_MIN_PASSWORD_LENGTH {
            return Err(ConfigError::password(format!(
                "password.min_length must be {}-{}, got {}",
                MIN_MIN_PASSWORD_LENGTH, MAX_MIN_PASSWORD_LENGTH, self.min_length
            )));
        }

        Ok(())
    }
}
