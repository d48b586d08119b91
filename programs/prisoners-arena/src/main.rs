use anyhow::Result;
use clap::Parser;
use prisoners_arena::config::{ArenaConfig, Cli};

fn main() {
    let cli = Cli::parse();
    if cli.list {
        print!("{}", prisoners_arena::roster_listing());
        return;
    }

    std::process::exit(prisoners_arena::exit_code(start(&cli)));
}

fn start(cli: &Cli) -> Result<()> {
    let config = ArenaConfig::resolve(cli)?;
    prisoners_arena::log(config.level()?)?;
    prisoners_arena::run(&config)?;
    Ok(())
}
