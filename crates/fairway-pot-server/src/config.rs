// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::PathBuf;

pub const ENV_BIND_ADDR: &str = "FAIRWAY_BIND_ADDR";
pub const ENV_DB_PATH: &str = "FAIRWAY_DB_PATH";
pub const ENV_ADMIN_PASSPHRASE: &str = "FAIRWAY_ADMIN_PASSPHRASE";
pub const ENV_MAX_BODY_BYTES: &str = "FAIRWAY_MAX_BODY_BYTES";
pub const ENV_LOG: &str = "FAIRWAY_LOG";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    /// Shared static passphrase gating the admin routes. When unset the
    /// admin routes answer 503 rather than running ungated.
    pub admin_passphrase: Option<String>,
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            db_path: PathBuf::from("fairway-pot.db"),
            admin_passphrase: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_string(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            db_path: env_string(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            admin_passphrase: env_string(ENV_ADMIN_PASSPHRASE),
            max_body_bytes: env_usize(ENV_MAX_BODY_BYTES, defaults.max_body_bytes),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}
