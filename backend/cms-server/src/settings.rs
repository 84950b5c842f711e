//! Translate loaded configuration into authenticator settings

use cms_auth::{
    AuthSettings, PasswordConfig, RateLimitConfig, Result as AuthErrorResult, SigningKey,
    TokenConfig,
};
use cms_config::Config;

use std::time::Duration;

pub fn auth_settings(config: &Config) -> AuthErrorResult<AuthSettings> {
    let signing_key =
        SigningKey::resolve(config.auth.jwt_secret.as_deref(), config.auth.allow_dev_secret)?;

    let token = TokenConfig::new(signing_key)
        .with_expiry(Duration::from_secs(config.auth.token_expiry_secs))
        .with_leeway(Duration::from_secs(config.auth.leeway_secs))
        .with_issuer(config.auth.issuer.clone());

    let password = PasswordConfig {
        memory_kib: config.password.memory_kib,
        iterations: config.password.iterations,
        parallelism: config.password.parallelism,
        min_length: config.password.min_length,
    };

    let login_rate_limit = config.rate_limit.enabled.then(|| RateLimitConfig {
        max_requests: config.rate_limit.login_max_attempts,
        window_secs: config.rate_limit.login_window_secs,
    });

    Ok(AuthSettings {
        password,
        login_rate_limit,
        ..AuthSettings::new(token)
    })
}
