//! Tag-driven environment variable binding for nested configuration structs
//!
//! `envbind` binds environment variables into strongly-typed, possibly deeply
//! nested configuration values, driven by a compact per-field directive
//! string. Keys compose from a configurable prefix down through the struct
//! tree, so prefix `ENV` and nested field `log.path` tagged `LOG` / `PATH`
//! resolve from `ENV_LOG_PATH`.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Bind)]` plus one `#[env("...")]` directive per
//!   field
//! - **Nested**: structs, `Option<T>`, `Box<T>`, `Vec<T>`, `HashMap`/`BTreeMap`
//!   compose recursively
//! - **Defaults that yield**: a tag default only applies while the field still
//!   holds its zero value — values pre-populated on the struct win
//! - **Numeric bounds**: `lt`/`lte`/`gt`/`gte` clauses validate parsed numbers
//!   before assignment
//! - **Custom decoders**: a type owning its own text format implements
//!   [`DecodeEnv`] and bypasses structural recursion entirely
//!
//! # Tag directives
//!
//! A directive is a semicolon-separated list of clauses:
//!
//! | Clause            | Meaning                                       |
//! |-------------------|-----------------------------------------------|
//! | `NAME`            | key segment this field contributes            |
//! | `name: NAME`      | same, keyed form                              |
//! | `default: value`  | fallback when the environment has nothing     |
//! | `required`        | fail when nothing resolves                    |
//! | `inline`          | children attach directly under the parent key |
//! | `-`               | ignored clause                                |
//! | `lt:`/`lte:`/`gt:`/`gte:` | numeric bound on the parsed value     |
//!
//! # Example
//!
//! ```rust
//! use envbind::{Bind, EnvParser};
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     #[env("PROJNAME;required")]
//!     project: String,
//!
//!     #[env("PORT;default: 8080;gte: 1;lte: 65535")]
//!     port: u16,
//!
//!     #[env("LOG")]
//!     log: LogConfig,
//! }
//!
//! #[derive(Debug, Default, Bind)]
//! struct LogConfig {
//!     #[env("LEVEL;default: info")]
//!     level: String,
//!
//!     #[env("PATH")]
//!     path: Option<String>,
//! }
//!
//! # fn main() -> Result<(), envbind::BindError> {
//! std::env::set_var("APP_PROJNAME", "demo");
//! std::env::set_var("APP_LOG_PATH", "/var/log/demo");
//!
//! let config: Config = EnvParser::new().with_prefix("APP").load()?;
//! assert_eq!(config.project, "demo");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.log.level, "info");
//! assert_eq!(config.log.path.as_deref(), Some("/var/log/demo"));
//! # Ok(())
//! # }
//! ```
//!
//! # Collections
//!
//! A whole collection resolves from a single environment value:
//!
//! - sequences are comma-separated, pieces trimmed: `IDS=1, 2, 3`
//! - maps are pipe-separated `key:value` entries: `IDMAP=1:a|2:b`
//!
//! Element, key and value types recurse through the same machinery, so maps
//! of structs or custom-decoded types work unchanged.
//!
//! # Custom decoders
//!
//! ```rust
//! use envbind::{Bind, BoxError, DecodeEnv, EnvParser};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Node {
//!     id: u32,
//!     addr: String,
//! }
//!
//! impl DecodeEnv for Node {
//!     fn decode_env(&mut self, text: &str) -> Result<(), BoxError> {
//!         let (id, addr) = text.split_once('=').ok_or("invalid node format")?;
//!         self.id = id.parse()?;
//!         self.addr = addr.to_string();
//!         Ok(())
//!     }
//! }
//!
//! envbind::impl_bind_via_decoder!(Node);
//!
//! #[derive(Debug, Default, Bind)]
//! struct Cluster {
//!     #[env("PEERS")]
//!     peers: Vec<Node>,
//! }
//!
//! # fn main() -> Result<(), envbind::BindError> {
//! std::env::set_var("CLUSTER_PEERS", "1=10.0.0.1:8080,2=10.0.0.2:8080");
//!
//! let cluster: Cluster = EnvParser::new().with_prefix("CLUSTER").load()?;
//! assert_eq!(cluster.peers.len(), 2);
//! assert_eq!(cluster.peers[1].addr, "10.0.0.2:8080");
//! # Ok(())
//! # }
//! ```

mod bind;
mod decode;
mod error;
mod source;
mod tag;

pub use bind::{Bind, Context, EnvParser};
pub use decode::DecodeEnv;
pub use error::{BindError, BoxError};
pub use tag::{NumberBounds, Tag};

pub use envbind_derive::Bind;

// Re-export so downstream complex-valued fields use the same crate version.
pub use num_complex;
