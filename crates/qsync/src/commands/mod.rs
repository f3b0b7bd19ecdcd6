use clap::ArgMatches;
use tracing::error;

use qsync_core::events;

pub mod helpers;

mod bootstrap;
mod permalink;
mod read;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("read", sub_matches)) => read::handle_read_command(sub_matches),
        Some(("permalink", sub_matches)) => permalink::handle_permalink_command(sub_matches),
        Some(("bootstrap", sub_matches)) => bootstrap::handle_bootstrap_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
