//! Raw settings before resolution.

use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashMap, str::FromStr};

use crate::{
    constants::{
        DEFAULT_CHANNEL_PREFIX, DEFAULT_EXPIRED_CONNECTION_CLOSE_DELAY,
        DEFAULT_NAMESPACE_CHANNEL_BOUNDARY, DEFAULT_NODE_PING_INTERVAL,
        DEFAULT_PORT, DEFAULT_PRESENCE_EXPIRE_INTERVAL,
        DEFAULT_PRESENCE_PING_INTERVAL, DEFAULT_PRIVATE_CHANNEL_PREFIX,
        DEFAULT_SECRET, DEFAULT_USER_CHANNEL_BOUNDARY,
        DEFAULT_USER_CHANNEL_SEPARATOR, ENV_PREFIX,
    },
    loader::SettingsError,
    util::parse_bool,
};

/// Raw node settings as read from a config file and the environment.
///
/// Every key is optional in the file; missing keys take the defaults below.
/// Keys the node does not know about (such as `projects`) are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    /// Explicit node name. Empty means "derive from host name and port".
    pub name: String,
    /// Port the node listens on. Written as a number or a string.
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub port: u16,
    /// Password for admin connections.
    pub password: String,
    /// Secret for admin tokens.
    pub secret: String,
    /// Prefix of the admin and control channel names.
    pub channel_prefix: String,
    /// Seconds between node ping control messages.
    pub node_ping_interval: u64,
    /// Seconds between presence refreshes.
    pub presence_ping_interval: u64,
    /// Seconds before unrefreshed presence info expires.
    pub presence_expire_interval: u64,
    /// Grace period, in seconds, for clients to refresh an expired connection.
    pub expired_connection_close_delay: u64,
    /// Prefix marking channels that need authorization.
    pub private_channel_prefix: String,
    /// Separator between namespace and channel.
    pub namespace_channel_boundary: String,
    /// Separator between channel and allowed users.
    pub user_channel_boundary: String,
    /// Separator between user IDs.
    pub user_channel_separator: String,
    /// Skip connection checks and channel permissions.
    pub insecure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::new(),
            port: DEFAULT_PORT,
            password: String::new(),
            secret: DEFAULT_SECRET.to_string(),
            channel_prefix: DEFAULT_CHANNEL_PREFIX.to_string(),
            node_ping_interval: DEFAULT_NODE_PING_INTERVAL,
            presence_ping_interval: DEFAULT_PRESENCE_PING_INTERVAL,
            presence_expire_interval: DEFAULT_PRESENCE_EXPIRE_INTERVAL,
            expired_connection_close_delay:
                DEFAULT_EXPIRED_CONNECTION_CLOSE_DELAY,
            private_channel_prefix: DEFAULT_PRIVATE_CHANNEL_PREFIX.to_string(),
            namespace_channel_boundary: DEFAULT_NAMESPACE_CHANNEL_BOUNDARY
                .to_string(),
            user_channel_boundary: DEFAULT_USER_CHANNEL_BOUNDARY.to_string(),
            user_channel_separator: DEFAULT_USER_CHANNEL_SEPARATOR.to_string(),
            insecure: false,
        }
    }
}

impl Settings {
    /// Apply `BEACON_<KEY>` overrides from `env`. Returns how many keys were
    /// overridden.
    pub fn apply_env_overrides(
        &mut self,
        env: &HashMap<String, String>,
    ) -> Result<usize, SettingsError> {
        let mut env = EnvOverrides { env, applied: 0 };

        env.string("name", &mut self.name);
        env.parsed("port", &mut self.port)?;
        env.string("password", &mut self.password);
        env.string("secret", &mut self.secret);
        env.string("channel_prefix", &mut self.channel_prefix);
        env.parsed("node_ping_interval", &mut self.node_ping_interval)?;
        env.parsed("presence_ping_interval", &mut self.presence_ping_interval)?;
        env.parsed(
            "presence_expire_interval",
            &mut self.presence_expire_interval,
        )?;
        env.parsed(
            "expired_connection_close_delay",
            &mut self.expired_connection_close_delay,
        )?;
        env.string("private_channel_prefix", &mut self.private_channel_prefix);
        env.string(
            "namespace_channel_boundary",
            &mut self.namespace_channel_boundary,
        );
        env.string("user_channel_boundary", &mut self.user_channel_boundary);
        env.string("user_channel_separator", &mut self.user_channel_separator);
        env.flag("insecure", &mut self.insecure)?;

        Ok(env.applied)
    }
}

struct EnvOverrides<'a> {
    env: &'a HashMap<String, String>,
    applied: usize,
}

impl<'a> EnvOverrides<'a> {
    fn lookup(&self, key: &str) -> Option<(String, &'a str)> {
        let env: &'a HashMap<String, String> = self.env;
        let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
        let value = env.get(&var)?;
        Some((var, value.as_str()))
    }

    fn string(&mut self, key: &str, slot: &mut String) {
        if let Some((_, value)) = self.lookup(key) {
            *slot = value.to_string();
            self.applied += 1;
        }
    }

    fn parsed<T: FromStr>(
        &mut self,
        key: &str,
        slot: &mut T,
    ) -> Result<(), SettingsError> {
        if let Some((var, value)) = self.lookup(key) {
            *slot = value.trim().parse().map_err(|_| {
                SettingsError::InvalidEnv {
                    var,
                    value: value.to_string(),
                }
            })?;
            self.applied += 1;
        }
        Ok(())
    }

    fn flag(
        &mut self,
        key: &str,
        slot: &mut bool,
    ) -> Result<(), SettingsError> {
        if let Some((var, value)) = self.lookup(key) {
            *slot = parse_bool(value).ok_or_else(|| {
                SettingsError::InvalidEnv {
                    var,
                    value: value.to_string(),
                }
            })?;
            self.applied += 1;
        }
        Ok(())
    }
}

/// Ports show up both as `8000` and `"8000"` in hand-written config files.
fn port_from_number_or_string<'de, D>(
    deserializer: D,
) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u16),
        Text(String),
    }

    match RawPort::deserialize(deserializer)? {
        RawPort::Number(port) => Ok(port),
        RawPort::Text(raw) => raw.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid port '{raw}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_replace_matching_keys_only() {
        let mut settings = Settings::default();
        let applied = settings
            .apply_env_overrides(&env(&[
                ("BEACON_NAME", "node-a"),
                ("BEACON_NODE_PING_INTERVAL", "7"),
                ("BEACON_INSECURE", "yes"),
                ("OTHER_PORT", "1"),
            ]))
            .expect("overrides");

        assert_eq!(applied, 3);
        assert_eq!(settings.name, "node-a");
        assert_eq!(settings.node_ping_interval, 7);
        assert!(settings.insecure);
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_env_number_is_reported_with_variable_name() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env_overrides(&env(&[("BEACON_PORT", "eighty")]))
            .expect_err("invalid port");

        match err {
            SettingsError::InvalidEnv { var, value } => {
                assert_eq!(var, "BEACON_PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_env_flag_is_rejected() {
        let mut settings = Settings::default();
        assert!(
            settings
                .apply_env_overrides(&env(&[("BEACON_INSECURE", "sometimes")]))
                .is_err()
        );
    }

    #[test]
    fn port_accepts_numbers_and_strings() {
        let numeric: Settings =
            serde_json::from_str(r#"{"port": 9000}"#).expect("numeric");
        let text: Settings =
            serde_json::from_str(r#"{"port": "9001"}"#).expect("text");
        assert_eq!(numeric.port, 9000);
        assert_eq!(text.port, 9001);
        assert!(serde_json::from_str::<Settings>(r#"{"port": "x"}"#).is_err());
    }
}
