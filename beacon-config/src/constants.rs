//! Defaults and fixed strings shared by the loader, resolver, and generator.

/// Extensions accepted for config files, in the order they are reported.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml"];

/// Prefix for environment variable overrides (`BEACON_PORT`, ...).
pub const ENV_PREFIX: &str = "BEACON_";

/// Prompt printed before the project name is read.
pub const PROJECT_NAME_PROMPT: &str = "Enter your project name: ";

/// Placeholder used in the node name when the host name is unavailable.
pub const UNKNOWN_HOSTNAME: &str = "?";

/// Port the node listens on.
pub const DEFAULT_PORT: u16 = 8000;
/// Node-wide secret used when a project has none of its own.
pub const DEFAULT_SECRET: &str = "secret";
/// Prefix of every internal channel name.
pub const DEFAULT_CHANNEL_PREFIX: &str = "beacon";
/// Seconds between node ping control messages.
pub const DEFAULT_NODE_PING_INTERVAL: u64 = 5;
/// Seconds between presence refreshes for a connected client.
pub const DEFAULT_PRESENCE_PING_INTERVAL: u64 = 25;
/// Seconds after which presence info without a refresh expires.
pub const DEFAULT_PRESENCE_EXPIRE_INTERVAL: u64 = 60;
/// Seconds a client gets to refresh an expired connection.
pub const DEFAULT_EXPIRED_CONNECTION_CLOSE_DELAY: u64 = 10;
/// Channels starting with this prefix require authorization.
pub const DEFAULT_PRIVATE_CHANNEL_PREFIX: &str = "$";
/// Separates a namespace from the channel name.
pub const DEFAULT_NAMESPACE_CHANNEL_BOUNDARY: &str = ":";
/// Separates a channel name from its allowed users.
pub const DEFAULT_USER_CHANNEL_BOUNDARY: &str = "#";
/// Separates user IDs in a user channel.
pub const DEFAULT_USER_CHANNEL_SEPARATOR: &str = ",";

/// Suffix appended to the channel prefix to form the admin channel.
pub const ADMIN_CHANNEL_SUFFIX: &str = "admin";
/// Suffix appended to the channel prefix to form the control channel.
pub const CONTROL_CHANNEL_SUFFIX: &str = "control";
