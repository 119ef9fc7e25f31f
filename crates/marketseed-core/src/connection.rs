use serde::{Deserialize, Serialize};

use crate::redaction::RedactedConnection;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "55";
pub const DEFAULT_DATABASE: &str = "microservice";

/// Target database for a seeding run.
///
/// The password is skipped on serialization; use [`ConnectionSettings::redact`]
/// when the target has to be recorded anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub database: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl ConnectionSettings {
    pub fn redact(&self) -> RedactedConnection {
        RedactedConnection::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_microservice_database() {
        let settings = ConnectionSettings::default();
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.user, "postgres");
        assert_eq!(settings.database, "microservice");
    }

    #[test]
    fn password_is_not_serialized() {
        let settings = ConnectionSettings {
            password: "hunter2".to_string(),
            ..ConnectionSettings::default()
        };
        let json = serde_json::to_string(&settings).expect("serialize settings");
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("password"));
    }
}
