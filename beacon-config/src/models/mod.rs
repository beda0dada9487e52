//! Node settings, their resolved form, and the project list.

pub mod sources;
pub mod structure;

use std::{io, time::Duration};

use serde::Serialize;
use tracing::error;

use crate::{
    constants::{ADMIN_CHANNEL_SUFFIX, CONTROL_CHANNEL_SUFFIX, UNKNOWN_HOSTNAME},
    util,
};

pub use sources::Settings;
pub use structure::{
    ChannelOptions, Namespace, Project, ProjectList, Structure, StructureError,
};

/// Fully resolved runtime configuration of a node.
///
/// Built once from [`Settings`] and never mutated. Derived values (channel
/// names, node info intervals) are computed during resolution and exposed
/// read-only, so they cannot drift from the values they derive from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    name: String,
    password: String,
    secret: String,

    channel_prefix: String,
    admin_channel: String,
    control_channel: String,

    node_ping_interval: u64,
    node_info_clean_interval: u64,
    node_info_max_delay: u64,

    presence_ping_interval: u64,
    presence_expire_interval: u64,

    expired_connection_close_delay: u64,

    private_channel_prefix: String,
    namespace_channel_boundary: String,
    user_channel_boundary: String,
    user_channel_separator: String,

    insecure: bool,
}

impl Config {
    /// Resolve settings using the machine's host name for the fallback node
    /// name.
    pub fn resolve(settings: &Settings) -> Self {
        Self::resolve_with_hostname(settings, util::hostname)
    }

    /// Resolve settings with a caller-supplied host name lookup. A failed
    /// lookup is logged and replaced by `"?"`.
    pub fn resolve_with_hostname<F>(settings: &Settings, hostname: F) -> Self
    where
        F: FnOnce() -> io::Result<String>,
    {
        let name = node_name(settings, hostname);

        let channel_prefix = settings.channel_prefix.clone();
        let admin_channel = format!("{channel_prefix}.{ADMIN_CHANNEL_SUFFIX}");
        let control_channel =
            format!("{channel_prefix}.{CONTROL_CHANNEL_SUFFIX}");

        let node_ping_interval = settings.node_ping_interval;
        // Saturate instead of wrapping; max_delay must stay above 2 * ping.
        let node_info_clean_interval = node_ping_interval.saturating_mul(3);
        let node_info_max_delay =
            node_ping_interval.saturating_mul(2).saturating_add(1);

        Self {
            name,
            password: settings.password.clone(),
            secret: settings.secret.clone(),
            channel_prefix,
            admin_channel,
            control_channel,
            node_ping_interval,
            node_info_clean_interval,
            node_info_max_delay,
            presence_ping_interval: settings.presence_ping_interval,
            presence_expire_interval: settings.presence_expire_interval,
            expired_connection_close_delay: settings
                .expired_connection_close_delay,
            private_channel_prefix: settings.private_channel_prefix.clone(),
            namespace_channel_boundary: settings
                .namespace_channel_boundary
                .clone(),
            user_channel_boundary: settings.user_channel_boundary.clone(),
            user_channel_separator: settings.user_channel_separator.clone(),
            insecure: settings.insecure,
        }
    }

    /// Node name: the configured one, or `<hostname>_<port>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Password for admin connections.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Secret for admin tokens.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Prefix of the internal channel names.
    pub fn channel_prefix(&self) -> &str {
        &self.channel_prefix
    }

    /// `<channel_prefix>.admin`
    pub fn admin_channel(&self) -> &str {
        &self.admin_channel
    }

    /// `<channel_prefix>.control`, used for inter-node coordination.
    pub fn control_channel(&self) -> &str {
        &self.control_channel
    }

    /// Seconds between node ping control messages.
    pub fn node_ping_interval(&self) -> u64 {
        self.node_ping_interval
    }

    /// Three node ping intervals.
    pub fn node_info_clean_interval(&self) -> u64 {
        self.node_info_clean_interval
    }

    /// Two node ping intervals plus one second.
    pub fn node_info_max_delay(&self) -> u64 {
        self.node_info_max_delay
    }

    /// Seconds between presence refreshes.
    pub fn presence_ping_interval(&self) -> u64 {
        self.presence_ping_interval
    }

    /// Seconds before unrefreshed presence info expires.
    pub fn presence_expire_interval(&self) -> u64 {
        self.presence_expire_interval
    }

    /// Seconds a client gets to refresh an expired connection.
    pub fn expired_connection_close_delay(&self) -> u64 {
        self.expired_connection_close_delay
    }

    /// Prefix marking channels that need authorization.
    pub fn private_channel_prefix(&self) -> &str {
        &self.private_channel_prefix
    }

    /// Separator between namespace and channel.
    pub fn namespace_channel_boundary(&self) -> &str {
        &self.namespace_channel_boundary
    }

    /// Separator between channel and allowed users.
    pub fn user_channel_boundary(&self) -> &str {
        &self.user_channel_boundary
    }

    /// Separator between user IDs.
    pub fn user_channel_separator(&self) -> &str {
        &self.user_channel_separator
    }

    /// When set, connection checks and channel permissions are bypassed.
    pub fn insecure(&self) -> bool {
        self.insecure
    }

    /// [`Self::node_ping_interval`] as a [`Duration`].
    pub fn node_ping_period(&self) -> Duration {
        Duration::from_secs(self.node_ping_interval)
    }

    /// [`Self::node_info_clean_interval`] as a [`Duration`].
    pub fn node_info_clean_period(&self) -> Duration {
        Duration::from_secs(self.node_info_clean_interval)
    }

    /// [`Self::node_info_max_delay`] as a [`Duration`].
    pub fn node_info_max_age(&self) -> Duration {
        Duration::from_secs(self.node_info_max_delay)
    }
}

fn node_name<F>(settings: &Settings, hostname: F) -> String
where
    F: FnOnce() -> io::Result<String>,
{
    if !settings.name.is_empty() {
        return settings.name.clone();
    }

    let host = hostname().unwrap_or_else(|err| {
        error!(error = %err, "failed to look up host name for node name");
        UNKNOWN_HOSTNAME.to_string()
    });
    format!("{host}_{}", settings.port)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_lookup() -> io::Result<String> {
        Err(io::Error::other("no hostname"))
    }

    #[test]
    fn explicit_name_wins_over_hostname() {
        let settings = Settings {
            name: "edge-1".into(),
            ..Settings::default()
        };
        let config = Config::resolve_with_hostname(&settings, || {
            panic!("hostname must not be consulted")
        });
        assert_eq!(config.name(), "edge-1");
    }

    #[test]
    fn empty_name_falls_back_to_hostname_and_port() {
        let settings = Settings {
            port: 8100,
            ..Settings::default()
        };
        let config =
            Config::resolve_with_hostname(&settings, || Ok("web01".into()));
        assert_eq!(config.name(), "web01_8100");
    }

    #[test]
    fn failed_hostname_lookup_uses_placeholder() {
        let settings = Settings {
            port: 8000,
            ..Settings::default()
        };
        let config = Config::resolve_with_hostname(&settings, failing_lookup);
        assert_eq!(config.name(), "?_8000");
    }

    #[test]
    fn channels_derive_from_prefix() {
        for prefix in ["beacon", "a", "deep.prefix", "with space"] {
            let settings = Settings {
                channel_prefix: prefix.into(),
                ..Settings::default()
            };
            let config =
                Config::resolve_with_hostname(&settings, failing_lookup);
            assert_eq!(config.admin_channel(), format!("{prefix}.admin"));
            assert_eq!(config.control_channel(), format!("{prefix}.control"));
            assert_eq!(config.channel_prefix(), prefix);
        }
    }

    #[test]
    fn node_info_intervals_derive_from_ping_interval() {
        for ping in [0u64, 1, 5, 17, 3600, 1 << 40] {
            let settings = Settings {
                node_ping_interval: ping,
                ..Settings::default()
            };
            let config =
                Config::resolve_with_hostname(&settings, failing_lookup);
            assert_eq!(config.node_info_clean_interval(), ping * 3);
            assert_eq!(config.node_info_max_delay(), ping * 2 + 1);
            assert!(config.node_info_max_delay() > ping * 2);
            assert_eq!(
                config.node_info_max_age(),
                Duration::from_secs(ping * 2 + 1)
            );
        }
    }

    #[test]
    fn huge_ping_interval_saturates() {
        let settings = Settings {
            node_ping_interval: u64::MAX,
            ..Settings::default()
        };
        let config = Config::resolve_with_hostname(&settings, failing_lookup);
        assert_eq!(config.node_info_clean_interval(), u64::MAX);
        assert_eq!(config.node_info_max_delay(), u64::MAX);
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        let settings = Settings {
            name: "n".into(),
            password: "pw".into(),
            secret: "s3cr3t".into(),
            presence_ping_interval: 30,
            presence_expire_interval: 10,
            expired_connection_close_delay: 4,
            private_channel_prefix: "!".into(),
            namespace_channel_boundary: "/".into(),
            user_channel_boundary: "@".into(),
            user_channel_separator: ";".into(),
            insecure: true,
            ..Settings::default()
        };
        let config = Config::resolve_with_hostname(&settings, failing_lookup);

        assert_eq!(config.password(), "pw");
        assert_eq!(config.secret(), "s3cr3t");
        // Expire below ping is accepted as-is; no ordering is enforced here.
        assert_eq!(config.presence_ping_interval(), 30);
        assert_eq!(config.presence_expire_interval(), 10);
        assert_eq!(config.expired_connection_close_delay(), 4);
        assert_eq!(config.private_channel_prefix(), "!");
        assert_eq!(config.namespace_channel_boundary(), "/");
        assert_eq!(config.user_channel_boundary(), "@");
        assert_eq!(config.user_channel_separator(), ";");
        assert!(config.insecure());
    }
}
