//! Startup checks on a loaded [`Config`].
//!
//! Every problem is collected so the user can fix them in one pass.

use super::Config;
use thiserror::Error;

/// One problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.user is required")]
    MissingUser,
    #[error("identity.{0} must be a single word, got '{1}'")]
    NotAWord(&'static str, String),
    #[error("client.connect_timeout_secs must be greater than zero")]
    ZeroConnectTimeout,
    #[error("client.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,
    #[error("autoconnect.host is required")]
    MissingAutoconnectHost,
}

/// Check `config`, returning every problem found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let identity = &config.identity;
    if identity.nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    }
    if identity.user.is_empty() {
        errors.push(ValidationError::MissingUser);
    }
    for (field, value) in [
        ("nick", &identity.nick),
        ("user", &identity.user),
        ("hostname", &identity.hostname),
    ] {
        if value.contains(char::is_whitespace) {
            errors.push(ValidationError::NotAWord(field, value.clone()));
        }
    }

    if config.client.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.client.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if let Some(ref auto) = config.autoconnect {
        if auto.host.is_empty() {
            errors.push(ValidationError::MissingAutoconnectHost);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
