//! Client surface extraction for GLIDE migration analysis.
//!
//! # Architecture
//!
//! - `declaration` - Parses class and interface methods from declaration text
//! - `categorize` - Assigns each method a [`CommandFamily`] from an ordered keyword table
//! - `candidates` - Regex call-shape extraction over raw, possibly invalid source
//! - `scanner` - Bracket-aware scanning primitives shared by the parser
//!
//! # Examples
//!
//! ```
//! use glide_migrate_core::CommandFamily;
//! use glide_migrate_surface::{categorize_all, parse_declarations};
//!
//! let mut methods = parse_declarations(
//!     "interface Commands { sadd(key: string, ...members: string[]): Promise<number>; }",
//!     "Commands",
//! );
//! categorize_all(&mut methods);
//!
//! assert_eq!(methods[0].category, Some(CommandFamily::Sets));
//! assert_eq!(methods[0].max_arity, None);
//! ```
//!
//! [`CommandFamily`]: glide_migrate_core::CommandFamily

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod candidates;
mod categorize;
mod declaration;
pub mod scanner;

pub use candidates::{EXCLUDED_KEYWORDS, extract_method_candidates, extract_referenced_method_names};
pub use categorize::{CATEGORY_KEYWORDS, categorize, categorize_all};
pub use declaration::{UNTYPED_PARAMETER, parse_declarations};
