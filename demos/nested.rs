//! Nested structs, inline fields and key composition
//!
//! Keys compose as `prefix + split + segment...`, so with prefix `MYAPP` the
//! log path below resolves from `MYAPP_LOG_PATH`. The inline block's children
//! attach directly under the prefix instead.

use envbind::{Bind, EnvParser};

#[derive(Debug, Default, Bind)]
struct Config {
    #[env("inline")]
    base: BaseConfig,

    #[env("SERVER")]
    server: Option<ServerConfig>,

    #[env("LOG")]
    log: LogConfig,
}

#[derive(Debug, Default, Bind)]
struct BaseConfig {
    #[env("NODE")]
    node: u32,
}

#[derive(Debug, Default, Bind)]
struct ServerConfig {
    #[env("HOST;default: 127.0.0.1")]
    host: String,

    #[env("PORT;gte: 1;lte: 65535;default: 8080")]
    port: u16,
}

#[derive(Debug, Default, Bind)]
struct LogConfig {
    #[env("LEVEL;default: info")]
    level: String,

    #[env("PATH")]
    path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_NODE", "3");
    std::env::set_var("MYAPP_SERVER_PORT", "9090");
    std::env::set_var("MYAPP_LOG_PATH", "/var/log/myapp");

    let config: Config = EnvParser::new().with_prefix("MYAPP").load()?;

    println!("Configuration: {config:#?}");

    Ok(())
}
