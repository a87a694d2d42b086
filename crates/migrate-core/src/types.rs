//! Domain identifiers shared across the workspace.
//!
//! - [`ClientKind`] names the client library a dataset or declaration
//!   belongs to: the two legacy source clients and the GLIDE target.
//! - [`CommandFamily`] is the closed taxonomy of command families used by
//!   the categorizer and the mapping datasets.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client library identity.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::ClientKind;
///
/// let client: ClientKind = "node-redis".parse().unwrap();
/// assert_eq!(client, ClientKind::NodeRedis);
/// assert!(client.is_source());
/// assert!(!ClientKind::Glide.is_source());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientKind {
    /// The `ioredis` source client
    Ioredis,
    /// The `redis` (node-redis) source client
    NodeRedis,
    /// The Valkey GLIDE target client
    Glide,
}

impl ClientKind {
    /// All clients in dataset order.
    pub const ALL: [Self; 3] = [Self::Ioredis, Self::NodeRedis, Self::Glide];

    /// Returns the canonical lowercase identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ioredis => "ioredis",
            Self::NodeRedis => "node-redis",
            Self::Glide => "glide",
        }
    }

    /// Returns `true` for the legacy clients being migrated away from.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        !matches!(self, Self::Glide)
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ioredis" => Ok(Self::Ioredis),
            "node-redis" | "node_redis" | "noderedis" | "redis" => Ok(Self::NodeRedis),
            "glide" | "valkey-glide" => Ok(Self::Glide),
            _ => Err(Error::InvalidArgument(format!(
                "unknown client: '{s}' (expected: ioredis, node-redis, or glide)"
            ))),
        }
    }
}

/// Semantic command family.
///
/// The variant order is the categorizer's table order; see
/// `glide_migrate_surface::categorize` for how it is used.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::CommandFamily;
///
/// assert_eq!(CommandFamily::SortedSets.as_str(), "sortedsets");
/// assert_eq!("geo".parse::<CommandFamily>().unwrap(), CommandFamily::Geo);
/// assert!("keys".parse::<CommandFamily>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandFamily {
    /// String values and counters
    Strings,
    /// Hash fields
    Hashes,
    /// Lists
    Lists,
    /// Unordered sets
    Sets,
    /// Sorted sets
    SortedSets,
    /// Geospatial indexes
    Geo,
    /// Streams and consumer groups
    Streams,
    /// Publish/subscribe
    PubSub,
    /// MULTI/EXEC transactions and WATCH
    Transactions,
    /// Lua scripts and functions
    Scripting,
    /// Connection management
    Connection,
    /// Server administration
    Server,
    /// Bit operations
    Bitmap,
    /// `HyperLogLog`
    HyperLogLog,
    /// JSON module
    Json,
    /// Everything else
    General,
}

impl CommandFamily {
    /// Every family, in table order.
    pub const ALL: [Self; 16] = [
        Self::Strings,
        Self::Hashes,
        Self::Lists,
        Self::Sets,
        Self::SortedSets,
        Self::Geo,
        Self::Streams,
        Self::PubSub,
        Self::Transactions,
        Self::Scripting,
        Self::Connection,
        Self::Server,
        Self::Bitmap,
        Self::HyperLogLog,
        Self::Json,
        Self::General,
    ];

    /// Returns the canonical lowercase family label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strings => "strings",
            Self::Hashes => "hashes",
            Self::Lists => "lists",
            Self::Sets => "sets",
            Self::SortedSets => "sortedsets",
            Self::Geo => "geo",
            Self::Streams => "streams",
            Self::PubSub => "pubsub",
            Self::Transactions => "transactions",
            Self::Scripting => "scripting",
            Self::Connection => "connection",
            Self::Server => "server",
            Self::Bitmap => "bitmap",
            Self::HyperLogLog => "hyperloglog",
            Self::Json => "json",
            Self::General => "general",
        }
    }
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == needle)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown command family: '{s}'")))
    }
}
