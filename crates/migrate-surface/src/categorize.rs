//! Method-name categorization.
//!
//! A method belongs to the first family in [`CATEGORY_KEYWORDS`] that has a
//! keyword occurring anywhere in its lower-cased name. Table order decides
//! ambiguous names: `strings` comes first and lists `get` and `set`, so
//! `hget`, `lset` and `getbit` all resolve to [`CommandFamily::Strings`].
//!
//! # Examples
//!
//! ```
//! use glide_migrate_core::CommandFamily;
//! use glide_migrate_surface::categorize;
//!
//! assert_eq!(categorize("xadd"), CommandFamily::Streams);
//! assert_eq!(categorize("hget"), CommandFamily::Strings);
//! assert_eq!(categorize("hdel"), CommandFamily::Hashes);
//! assert_eq!(categorize("unknownThing"), CommandFamily::General);
//! ```

use glide_migrate_core::{CommandFamily, MethodSignature};

/// Ordered family keyword table. First match wins.
pub const CATEGORY_KEYWORDS: &[(CommandFamily, &[&str])] = &[
    (
        CommandFamily::Strings,
        &[
            "get", "set", "append", "incr", "decr", "strlen", "mget", "mset", "lcs",
        ],
    ),
    (
        CommandFamily::Hashes,
        &[
            "hdel", "hexists", "hkeys", "hlen", "hvals", "hscan", "hstrlen", "hrandfield",
        ],
    ),
    (
        CommandFamily::Lists,
        &[
            "lpush", "rpush", "lpop", "rpop", "lrange", "llen", "lindex", "linsert", "lrem",
            "ltrim", "lmove", "lpos", "lmpop",
        ],
    ),
    (
        CommandFamily::Sets,
        &[
            "sadd", "srem", "smembers", "sismember", "smismember", "scard", "sdiff", "sinter",
            "sunion", "spop", "srandmember", "smove", "sscan",
        ],
    ),
    (
        CommandFamily::SortedSets,
        &[
            "zadd", "zrem", "zrange", "zscore", "zmscore", "zcard", "zcount", "zrank",
            "zrevrank", "zpop", "zunion", "zinter", "zdiff", "zscan", "zlexcount", "zmpop",
        ],
    ),
    (CommandFamily::Geo, &["geo"]),
    (
        CommandFamily::Streams,
        &[
            "xadd", "xread", "xrange", "xrevrange", "xlen", "xdel", "xtrim", "xgroup", "xack",
            "xpending", "xclaim", "xautoclaim", "xinfo",
        ],
    ),
    (CommandFamily::PubSub, &["publish", "subscribe", "pubsub"]),
    (
        CommandFamily::Transactions,
        &["multi", "exec", "watch", "discard", "transaction"],
    ),
    (
        CommandFamily::Scripting,
        &["eval", "script", "fcall", "function", "invoke"],
    ),
    (
        CommandFamily::Connection,
        &["ping", "echo", "auth", "select", "client", "hello", "quit", "reset"],
    ),
    (
        CommandFamily::Server,
        &[
            "info", "config", "flushall", "flushdb", "dbsize", "lastsave", "bgsave",
            "bgrewriteaof", "shutdown", "slowlog", "lolwut", "memory", "acl", "command",
        ],
    ),
    (CommandFamily::Bitmap, &["bit"]),
    (CommandFamily::HyperLogLog, &["pfadd", "pfcount", "pfmerge"]),
    (CommandFamily::Json, &["json"]),
];

/// Returns the family of `name`, or [`CommandFamily::General`] if no
/// keyword matches.
#[must_use]
pub fn categorize(name: &str) -> CommandFamily {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(CommandFamily::General, |(family, _)| *family)
}

/// Assigns a category to every signature, replacing any previous one.
pub fn categorize_all(methods: &mut [MethodSignature]) {
    for method in methods {
        method.category = Some(categorize(&method.name));
    }
}
