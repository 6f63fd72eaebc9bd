//! Basic binding: names, defaults, required fields

use envbind::{Bind, EnvParser};

#[derive(Debug, Default, Bind)]
struct Config {
    #[env("PROJNAME;required")]
    project_name: String,

    #[env("PORT;default: 8080")]
    port: u16,

    #[env("DEBUG")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("ENV_PROJNAME", "envbind-demo");
    std::env::set_var("ENV_DEBUG", "true");

    let config: Config = EnvParser::new().load()?;

    println!("Configuration:");
    println!("  Project: {}", config.project_name);
    println!("  Port:    {}", config.port);
    println!("  Debug:   {}", config.debug);

    Ok(())
}
