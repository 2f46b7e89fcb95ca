//! Simulated screen: a host configuration whose handlers log what ran.

use till_config::CommandId;
use till_keymode::HostConfig;
use tracing::info;

use crate::{
    cli::HostArgs,
    error::{Error, Result},
};

/// Parse a comma separated command list; `all` and `none` are accepted.
pub fn parse_commands(list: &str) -> Result<Vec<CommandId>> {
    match list.trim() {
        "all" => return Ok(CommandId::ALL.to_vec()),
        "" | "none" => return Ok(Vec::new()),
        _ => {}
    }
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            CommandId::from_name(s).ok_or_else(|| Error::key_spec(format!("unknown command '{s}'")))
        })
        .collect()
}

/// Build the simulated host described by the CLI flags.
pub fn build(args: &HostArgs) -> Result<HostConfig> {
    let handled = parse_commands(&args.handlers)?;
    let failing = match &args.fail {
        Some(list) => parse_commands(list)?,
        None => Vec::new(),
    };
    let mut config = HostConfig::new()
        .blocking_dialog(args.blocking)
        .search_open(args.search);
    for command in handled.iter().chain(failing.iter()).copied() {
        let fails = failing.contains(&command);
        config = config.on(command, move || {
            info!(%command, fails, "handler_ran");
            if fails {
                return Err(format!("{command} handler failed").into());
            }
            Ok(())
        });
    }
    Ok(config)
}
