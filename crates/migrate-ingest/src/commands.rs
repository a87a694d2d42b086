//! Command token and method extraction.
//!
//! Command names come from documentation text, where they appear as short
//! upper-case tokens in `<code>` elements or backtick spans. GLIDE methods
//! come from `public async name(params): Promise<T>` declarations in raw
//! source. Both are regex scans that ignore everything they do not match.
//!
//! # Examples
//!
//! ```
//! use glide_migrate_ingest::{build_entry, extract_command_tokens, extract_public_methods};
//!
//! let tokens = extract_command_tokens("<li><code>XGROUP  CREATE</code></li> `GET`");
//! assert!(tokens.contains("XGROUP CREATE"));
//!
//! let methods = extract_public_methods(
//!     "public async xgroupCreate(key: GlideString, groupName: GlideString, id: string): Promise<\"OK\"> {",
//! );
//! let entry = build_entry("XGROUP CREATE", &methods);
//! assert_eq!(entry.method.as_deref(), Some("xgroupCreate"));
//! assert_eq!(entry.family, "streams");
//! assert!(entry.validated);
//! ```

use glide_migrate_core::{CommandFamily, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Longest accepted command token, in bytes.
pub const MAX_COMMAND_TOKEN_LEN: usize = 40;

/// Family assigned when the first command token is not in [`FAMILY_PREFIXES`].
pub const FALLBACK_FAMILY: &str = "other";

static CODE_SPAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<code>([^<]{1,80})</code>|`([^`\n]{1,80})`").expect("valid regex")
});

static COMMAND_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9_.\-]*(?: [A-Z][A-Z0-9_.\-]*)*$").expect("valid regex")
});

static PUBLIC_ASYNC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"public\s+async\s+([A-Za-z_$][\w$]*)\s*(?:<[^>()]*>)?\s*\(([^)]*)\)\s*:\s*Promise<([^{;\n]*)>",
    )
    .expect("valid regex")
});

/// Base key to GLIDE method for commands whose method name cannot be
/// derived by lower-casing: subcommands with inner capitals and commands
/// folded into another GLIDE method.
pub const METHOD_EXCEPTIONS: &[(&str, &str)] = &[
    ("XGROUPCREATE", "xgroupCreate"),
    ("XGROUPDESTROY", "xgroupDestroy"),
    ("XGROUPCREATECONSUMER", "xgroupCreateConsumer"),
    ("XGROUPDELCONSUMER", "xgroupDelConsumer"),
    ("XGROUPSETID", "xgroupSetId"),
    ("XINFOSTREAM", "xinfoStream"),
    ("XINFOGROUPS", "xinfoGroups"),
    ("XINFOCONSUMERS", "xinfoConsumers"),
    ("CONFIGGET", "configGet"),
    ("CONFIGSET", "configSet"),
    ("CONFIGRESETSTAT", "configResetStat"),
    ("CONFIGREWRITE", "configRewrite"),
    ("CLIENTGETNAME", "clientGetName"),
    ("CLIENTID", "clientId"),
    ("FUNCTIONLOAD", "functionLoad"),
    ("FUNCTIONDELETE", "functionDelete"),
    ("FUNCTIONFLUSH", "functionFlush"),
    ("FUNCTIONLIST", "functionList"),
    ("FUNCTIONSTATS", "functionStats"),
    ("FUNCTIONDUMP", "functionDump"),
    ("FUNCTIONRESTORE", "functionRestore"),
    ("SCRIPTFLUSH", "scriptFlush"),
    ("SCRIPTKILL", "scriptKill"),
    ("SCRIPTEXISTS", "scriptExists"),
    ("SCRIPTSHOW", "scriptShow"),
    ("OBJECTENCODING", "objectEncoding"),
    ("OBJECTFREQ", "objectFreq"),
    ("OBJECTIDLETIME", "objectIdletime"),
    ("OBJECTREFCOUNT", "objectRefcount"),
    ("PUBSUBCHANNELS", "pubsubChannels"),
    ("PUBSUBNUMPAT", "pubsubNumPat"),
    ("PUBSUBNUMSUB", "pubsubNumSub"),
    ("INCRBY", "incrBy"),
    ("INCRBYFLOAT", "incrByFloat"),
    ("DECRBY", "decrBy"),
    ("HINCRBY", "hincrBy"),
    ("HINCRBYFLOAT", "hincrByFloat"),
    ("BITFIELD_RO", "bitfieldReadOnly"),
    ("SORT_RO", "sortReadOnly"),
    ("FCALL_RO", "fcallReadonly"),
    ("EVAL", "invokeScript"),
    ("EVALSHA", "invokeScript"),
    ("ZRANGEBYSCORE", "zrange"),
    ("ZRANGEBYLEX", "zrange"),
    ("ZREVRANGE", "zrange"),
    ("ZREVRANGEBYSCORE", "zrange"),
    ("ZREVRANGEBYLEX", "zrange"),
    ("GEORADIUS", "geosearch"),
    ("GEORADIUSBYMEMBER", "geosearch"),
    ("HMSET", "hset"),
    ("SETEX", "set"),
    ("PSETEX", "set"),
    ("SETNX", "set"),
    ("GETSET", "set"),
    ("MULTI", "exec"),
];

/// First command token to family.
pub const FAMILY_PREFIXES: &[(&str, &str)] = &[
    ("APPEND", "strings"),
    ("DECR", "strings"),
    ("DECRBY", "strings"),
    ("GET", "strings"),
    ("GETDEL", "strings"),
    ("GETEX", "strings"),
    ("GETRANGE", "strings"),
    ("GETSET", "strings"),
    ("INCR", "strings"),
    ("INCRBY", "strings"),
    ("INCRBYFLOAT", "strings"),
    ("LCS", "strings"),
    ("MGET", "strings"),
    ("MSET", "strings"),
    ("MSETNX", "strings"),
    ("PSETEX", "strings"),
    ("SET", "strings"),
    ("SETEX", "strings"),
    ("SETNX", "strings"),
    ("SETRANGE", "strings"),
    ("STRLEN", "strings"),
    ("HDEL", "hashes"),
    ("HEXISTS", "hashes"),
    ("HGET", "hashes"),
    ("HGETALL", "hashes"),
    ("HINCRBY", "hashes"),
    ("HINCRBYFLOAT", "hashes"),
    ("HKEYS", "hashes"),
    ("HLEN", "hashes"),
    ("HMGET", "hashes"),
    ("HMSET", "hashes"),
    ("HRANDFIELD", "hashes"),
    ("HSCAN", "hashes"),
    ("HSET", "hashes"),
    ("HSETNX", "hashes"),
    ("HSTRLEN", "hashes"),
    ("HVALS", "hashes"),
    ("BLMOVE", "lists"),
    ("BLMPOP", "lists"),
    ("BLPOP", "lists"),
    ("BRPOP", "lists"),
    ("BRPOPLPUSH", "lists"),
    ("LINDEX", "lists"),
    ("LINSERT", "lists"),
    ("LLEN", "lists"),
    ("LMOVE", "lists"),
    ("LMPOP", "lists"),
    ("LPOP", "lists"),
    ("LPOS", "lists"),
    ("LPUSH", "lists"),
    ("LPUSHX", "lists"),
    ("LRANGE", "lists"),
    ("LREM", "lists"),
    ("LSET", "lists"),
    ("LTRIM", "lists"),
    ("RPOP", "lists"),
    ("RPOPLPUSH", "lists"),
    ("RPUSH", "lists"),
    ("RPUSHX", "lists"),
    ("SADD", "sets"),
    ("SCARD", "sets"),
    ("SDIFF", "sets"),
    ("SDIFFSTORE", "sets"),
    ("SINTER", "sets"),
    ("SINTERCARD", "sets"),
    ("SINTERSTORE", "sets"),
    ("SISMEMBER", "sets"),
    ("SMEMBERS", "sets"),
    ("SMISMEMBER", "sets"),
    ("SMOVE", "sets"),
    ("SPOP", "sets"),
    ("SRANDMEMBER", "sets"),
    ("SREM", "sets"),
    ("SSCAN", "sets"),
    ("SUNION", "sets"),
    ("SUNIONSTORE", "sets"),
    ("BZMPOP", "sortedsets"),
    ("BZPOPMAX", "sortedsets"),
    ("BZPOPMIN", "sortedsets"),
    ("ZADD", "sortedsets"),
    ("ZCARD", "sortedsets"),
    ("ZCOUNT", "sortedsets"),
    ("ZDIFF", "sortedsets"),
    ("ZDIFFSTORE", "sortedsets"),
    ("ZINCRBY", "sortedsets"),
    ("ZINTER", "sortedsets"),
    ("ZINTERCARD", "sortedsets"),
    ("ZINTERSTORE", "sortedsets"),
    ("ZLEXCOUNT", "sortedsets"),
    ("ZMPOP", "sortedsets"),
    ("ZMSCORE", "sortedsets"),
    ("ZPOPMAX", "sortedsets"),
    ("ZPOPMIN", "sortedsets"),
    ("ZRANDMEMBER", "sortedsets"),
    ("ZRANGE", "sortedsets"),
    ("ZRANGEBYLEX", "sortedsets"),
    ("ZRANGEBYSCORE", "sortedsets"),
    ("ZRANGESTORE", "sortedsets"),
    ("ZRANK", "sortedsets"),
    ("ZREM", "sortedsets"),
    ("ZREMRANGEBYLEX", "sortedsets"),
    ("ZREMRANGEBYRANK", "sortedsets"),
    ("ZREMRANGEBYSCORE", "sortedsets"),
    ("ZREVRANGE", "sortedsets"),
    ("ZREVRANGEBYLEX", "sortedsets"),
    ("ZREVRANGEBYSCORE", "sortedsets"),
    ("ZREVRANK", "sortedsets"),
    ("ZSCAN", "sortedsets"),
    ("ZSCORE", "sortedsets"),
    ("ZUNION", "sortedsets"),
    ("ZUNIONSTORE", "sortedsets"),
    ("GEOADD", "geo"),
    ("GEODIST", "geo"),
    ("GEOHASH", "geo"),
    ("GEOPOS", "geo"),
    ("GEORADIUS", "geo"),
    ("GEORADIUSBYMEMBER", "geo"),
    ("GEOSEARCH", "geo"),
    ("GEOSEARCHSTORE", "geo"),
    ("XACK", "streams"),
    ("XADD", "streams"),
    ("XAUTOCLAIM", "streams"),
    ("XCLAIM", "streams"),
    ("XDEL", "streams"),
    ("XGROUP", "streams"),
    ("XINFO", "streams"),
    ("XLEN", "streams"),
    ("XPENDING", "streams"),
    ("XRANGE", "streams"),
    ("XREAD", "streams"),
    ("XREADGROUP", "streams"),
    ("XREVRANGE", "streams"),
    ("XSETID", "streams"),
    ("XTRIM", "streams"),
    ("PSUBSCRIBE", "pubsub"),
    ("PUBLISH", "pubsub"),
    ("PUBSUB", "pubsub"),
    ("PUNSUBSCRIBE", "pubsub"),
    ("SPUBLISH", "pubsub"),
    ("SSUBSCRIBE", "pubsub"),
    ("SUBSCRIBE", "pubsub"),
    ("SUNSUBSCRIBE", "pubsub"),
    ("UNSUBSCRIBE", "pubsub"),
    ("DISCARD", "transactions"),
    ("EXEC", "transactions"),
    ("MULTI", "transactions"),
    ("UNWATCH", "transactions"),
    ("WATCH", "transactions"),
    ("EVAL", "scripting"),
    ("EVALSHA", "scripting"),
    ("EVALSHA_RO", "scripting"),
    ("EVAL_RO", "scripting"),
    ("FCALL", "scripting"),
    ("FCALL_RO", "scripting"),
    ("FUNCTION", "scripting"),
    ("SCRIPT", "scripting"),
    ("AUTH", "connection"),
    ("CLIENT", "connection"),
    ("ECHO", "connection"),
    ("HELLO", "connection"),
    ("PING", "connection"),
    ("QUIT", "connection"),
    ("RESET", "connection"),
    ("SELECT", "connection"),
    ("ACL", "server"),
    ("BGREWRITEAOF", "server"),
    ("BGSAVE", "server"),
    ("COMMAND", "server"),
    ("CONFIG", "server"),
    ("DBSIZE", "server"),
    ("FLUSHALL", "server"),
    ("FLUSHDB", "server"),
    ("INFO", "server"),
    ("LASTSAVE", "server"),
    ("LATENCY", "server"),
    ("LOLWUT", "server"),
    ("MEMORY", "server"),
    ("MODULE", "server"),
    ("MONITOR", "server"),
    ("SAVE", "server"),
    ("SHUTDOWN", "server"),
    ("SLOWLOG", "server"),
    ("SWAPDB", "server"),
    ("TIME", "server"),
    ("BITCOUNT", "bitmap"),
    ("BITFIELD", "bitmap"),
    ("BITFIELD_RO", "bitmap"),
    ("BITOP", "bitmap"),
    ("BITPOS", "bitmap"),
    ("GETBIT", "bitmap"),
    ("SETBIT", "bitmap"),
    ("PFADD", "hyperloglog"),
    ("PFCOUNT", "hyperloglog"),
    ("PFMERGE", "hyperloglog"),
    ("COPY", "general"),
    ("DEL", "general"),
    ("DUMP", "general"),
    ("EXISTS", "general"),
    ("EXPIRE", "general"),
    ("EXPIREAT", "general"),
    ("EXPIRETIME", "general"),
    ("KEYS", "general"),
    ("MOVE", "general"),
    ("OBJECT", "general"),
    ("PERSIST", "general"),
    ("PEXPIRE", "general"),
    ("PEXPIREAT", "general"),
    ("PEXPIRETIME", "general"),
    ("PTTL", "general"),
    ("RANDOMKEY", "general"),
    ("RENAME", "general"),
    ("RENAMENX", "general"),
    ("RESTORE", "general"),
    ("SCAN", "general"),
    ("SORT", "general"),
    ("SORT_RO", "general"),
    ("TOUCH", "general"),
    ("TTL", "general"),
    ("TYPE", "general"),
    ("UNLINK", "general"),
    ("WAIT", "general"),
];

/// One `public async` method found in GLIDE source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMethod {
    /// Method name.
    pub name: String,
    /// Parameter text with whitespace collapsed.
    pub params: String,
    /// Text inside the outer `Promise<...>`.
    pub return_type: String,
}

/// One row of the command catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEntry {
    /// Normalized command, unique within a catalog.
    pub command: String,
    /// Family from [`FAMILY_PREFIXES`] or [`FALLBACK_FAMILY`].
    pub family: String,
    /// Matched GLIDE method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Parameters of the matched method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_signature: Option<String>,
    /// Return type of the matched method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// `true` iff a method matched.
    pub validated: bool,
}

/// Collapses runs of whitespace to single spaces and trims.
#[must_use]
pub fn normalize_command(token: &str) -> String {
    token.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collects command-shaped code tokens from documentation text.
#[must_use]
pub fn extract_command_tokens(doc_text: &str) -> BTreeSet<String> {
    let tokens: BTreeSet<String> = CODE_SPAN_REGEX
        .captures_iter(doc_text)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| normalize_command(m.as_str()))
        .filter(|t| t.len() <= MAX_COMMAND_TOKEN_LEN && COMMAND_SHAPE_REGEX.is_match(t))
        .collect();
    tracing::debug!(tokens = tokens.len(), "extracted command tokens");
    tokens
}

/// Collects `public async` methods returning `Promise<...>` from source
/// text, in source order.
///
/// Parameter lists containing `)` (callback types, parenthesized unions)
/// are not matched.
#[must_use]
pub fn extract_public_methods(source_text: &str) -> Vec<SourceMethod> {
    PUBLIC_ASYNC_REGEX
        .captures_iter(source_text)
        .map(|c| SourceMethod {
            name: c[1].to_string(),
            params: normalize_command(&c[2]).trim_end_matches(',').trim_end().to_string(),
            return_type: c[3].trim().to_string(),
        })
        .collect()
}

/// Derives the method lookup key for a command.
///
/// Strips everything but ASCII letters, underscores and spaces, then the
/// spaces. The exception table is consulted with that base key; otherwise
/// the base key is lower-cased.
///
/// # Examples
///
/// ```
/// use glide_migrate_ingest::method_key;
///
/// assert_eq!(method_key("XGROUP CREATE"), "xgroupCreate");
/// assert_eq!(method_key("ZRANGEBYSCORE"), "zrange");
/// assert_eq!(method_key("  LPUSH "), "lpush");
/// ```
#[must_use]
pub fn method_key(command: &str) -> String {
    let base: String = normalize_command(command)
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_' || *c == ' ')
        .filter(|c| *c != ' ')
        .collect();

    METHOD_EXCEPTIONS
        .iter()
        .find(|(key, _)| *key == base)
        .map_or_else(|| base.to_lowercase(), |(_, method)| (*method).to_string())
}

/// Returns the family for a command from its first token.
#[must_use]
pub fn command_family(command: &str) -> &'static str {
    let Some(first) = command.split_whitespace().next() else {
        return FALLBACK_FAMILY;
    };
    let first = first.to_uppercase();
    FAMILY_PREFIXES
        .iter()
        .find(|(prefix, _)| *prefix == first)
        .map_or(FALLBACK_FAMILY, |(_, family)| family)
}

/// Resolves a family filter to the label stored on catalog entries.
///
/// Accepts any [`CommandFamily`] label or [`FALLBACK_FAMILY`], ignoring
/// case and surrounding whitespace.
///
/// # Errors
///
/// Returns an invalid-argument error for an unknown family.
pub fn resolve_family_filter(family: &str) -> Result<&'static str> {
    if family.trim().eq_ignore_ascii_case(FALLBACK_FAMILY) {
        return Ok(FALLBACK_FAMILY);
    }
    let family: CommandFamily = family.parse()?;
    Ok(family.as_str())
}

/// Builds the catalog entry for `command`, matching its key against
/// `methods` case-insensitively. The first matching method wins.
#[must_use]
pub fn build_entry(command: &str, methods: &[SourceMethod]) -> CommandEntry {
    let command = normalize_command(command);
    let key = method_key(&command);
    let matched = methods.iter().find(|m| m.name.eq_ignore_ascii_case(&key));

    if matched.is_none() {
        tracing::debug!(command, key, "no GLIDE method for command");
    }

    CommandEntry {
        family: command_family(&command).to_string(),
        method: matched.map(|m| m.name.clone()),
        params_signature: matched.map(|m| m.params.clone()),
        return_type: matched.map(|m| m.return_type.clone()),
        validated: matched.is_some(),
        command,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_have_unique_keys() {
        let exceptions: HashSet<_> = METHOD_EXCEPTIONS.iter().map(|(k, _)| *k).collect();
        assert_eq!(exceptions.len(), METHOD_EXCEPTIONS.len());
        let prefixes: HashSet<_> = FAMILY_PREFIXES.iter().map(|(k, _)| *k).collect();
        assert_eq!(prefixes.len(), FAMILY_PREFIXES.len());
    }

    #[test]
    fn test_families_use_taxonomy_names() {
        let known: HashSet<_> = glide_migrate_core::CommandFamily::ALL
            .iter()
            .map(glide_migrate_core::CommandFamily::as_str)
            .collect();
        for (prefix, family) in FAMILY_PREFIXES {
            assert!(known.contains(family), "{prefix} maps to unknown family {family}");
        }
    }

    #[test]
    fn test_extract_tokens_from_html_and_markdown() {
        let doc = r"
            <tr><td><code>GET</code></td><td>Returns the value</td></tr>
            <tr><td><code>XGROUP
                CREATE</code></td></tr>
            Use `CLIENT GETNAME` or `client.get()` or `SET key value EX 10`.
            <code>THIS IS A VERY LONG UPPER CASE SENTENCE THAT IS NOT A COMMAND</code>
            <code>BITFIELD_RO</code> <code>JSON.GET</code> <code>Mixed Case</code>
        ";
        let tokens = extract_command_tokens(doc);
        let expected: BTreeSet<String> =
            ["BITFIELD_RO", "CLIENT GETNAME", "GET", "JSON.GET", "XGROUP CREATE"]
                .iter()
                .map(ToString::to_string)
                .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokens_deduplicate() {
        let tokens = extract_command_tokens("<code>GET</code> `GET` <code> GET </code>");
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_extract_public_methods() {
        let source = r#"
    public async get(key: GlideString, options?: DecoderOption): Promise<GlideString | null> {
    public async set(
        key: GlideString,
        value: GlideString,
    ): Promise<"OK" | null> {
    public async hgetall(key: GlideString): Promise<HashDataType> {
    public async customCommand<T = GlideReturnType>(args: GlideString[]): Promise<T> {
    public async subscribe(callback: (msg: Message) => void): Promise<void> {
    private async internal(x: number): Promise<void> {
    public async zrangeWithScores(key: GlideString): Promise<Record<string, number>>;
    public async close(): Promise<void>;
"#;
        let methods = extract_public_methods(source);
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["get", "set", "hgetall", "customCommand", "zrangeWithScores", "close"]
        );
        assert_eq!(methods[0].params, "key: GlideString, options?: DecoderOption");
        assert_eq!(methods[0].return_type, "GlideString | null");
        assert_eq!(methods[1].params, "key: GlideString, value: GlideString");
        assert_eq!(methods[1].return_type, "\"OK\" | null");
        assert_eq!(methods[4].return_type, "Record<string, number>");
        assert_eq!(methods[5].params, "");
    }

    #[test]
    fn test_method_key_normalization() {
        assert_eq!(method_key("XGROUP CREATE"), "xgroupCreate");
        assert_eq!(method_key("XGROUP   CREATE"), "xgroupCreate");
        assert_eq!(method_key("CONFIG GET"), "configGet");
        assert_eq!(method_key("HMSET"), "hset");
        assert_eq!(method_key("EVALSHA"), "invokeScript");
        assert_eq!(method_key("BITFIELD_RO"), "bitfieldReadOnly");
        assert_eq!(method_key("JSON.GET"), "jsonget");
        assert_eq!(method_key("HINCRBY"), "hincrBy");
        assert_eq!(method_key("LPUSH"), "lpush");
        assert_eq!(method_key("COMMAND DOCS"), "commanddocs");
    }

    #[test]
    fn test_command_family_lookup() {
        assert_eq!(command_family("XGROUP CREATE"), "streams");
        assert_eq!(command_family("get"), "strings");
        assert_eq!(command_family("CONFIG SET"), "server");
        assert_eq!(command_family("TTL"), "general");
        assert_eq!(command_family("JSON.GET"), FALLBACK_FAMILY);
        assert_eq!(command_family(""), FALLBACK_FAMILY);
    }

    #[test]
    fn test_resolve_family_filter_normalizes() {
        assert_eq!(resolve_family_filter("Streams").unwrap(), "streams");
        assert_eq!(resolve_family_filter(" streams ").unwrap(), "streams");
        assert_eq!(resolve_family_filter("SortedSets").unwrap(), "sortedsets");
        assert_eq!(resolve_family_filter(" Other").unwrap(), FALLBACK_FAMILY);
        assert!(resolve_family_filter("json").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_build_entry_matches_case_insensitively() {
        let methods = extract_public_methods(
            "public async incrBy(key: GlideString, amount: number): Promise<number> {\n\
             public async lpush(key: GlideString, elements: GlideString[]): Promise<number> {",
        );

        let incr = build_entry("INCRBY", &methods);
        assert_eq!(incr.method.as_deref(), Some("incrBy"));
        assert_eq!(incr.params_signature.as_deref(), Some("key: GlideString, amount: number"));
        assert_eq!(incr.return_type.as_deref(), Some("number"));
        assert_eq!(incr.family, "strings");

        let lpush = build_entry(" LPUSH ", &methods);
        assert_eq!(lpush.command, "LPUSH");
        assert!(lpush.validated);

        let missing = build_entry("OBJECT  HELP", &methods);
        assert_eq!(missing.command, "OBJECT HELP");
        assert!(!missing.validated);
        assert_eq!(missing.method, None);
        assert_eq!(missing.family, "general");
    }

    #[test]
    fn test_entry_serialization_omits_absent_fields() {
        let entry = build_entry("OBJECT HELP", &[]);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "command": "OBJECT HELP", "family": "general", "validated": false })
        );
    }
}
