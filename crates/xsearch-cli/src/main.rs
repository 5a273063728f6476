//! xsearch CLI: the `xsearch` command.

mod cli;
mod commands;
mod config;
mod support;
mod version_notice;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.log_level.as_deref());

    if !cli.no_version_notice {
        version_notice::run();
    }

    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Find {
            experiment,
            variable,
            frequency,
            catalog_root,
            site,
            criteria,
            filters,
            no_deduplicate,
            include_retired,
            include_retracted,
            include_ignored,
            full_metadata,
            print_duplicates,
            quiet,
            json,
        } => commands::find::run(
            &config,
            commands::find::Args {
                experiment,
                variable,
                frequency,
                catalog_root,
                site,
                criteria,
                filters,
                no_deduplicate,
                include_retired,
                include_retracted,
                include_ignored,
                full_metadata,
                print_duplicates,
                quiet,
                json,
            },
        ),

        Commands::Values {
            experiment,
            variable,
            facet,
            frequency,
            catalog_root,
            site,
            json,
        } => commands::values::run(
            &config,
            commands::values::Args {
                experiment,
                variable,
                facet,
                frequency,
                catalog_root,
                site,
                json,
            },
        ),

        Commands::Match {
            experiment,
            variable,
            facet,
            pattern,
            frequency,
            catalog_root,
            site,
            json,
        } => commands::matches::run(
            &config,
            commands::matches::Args {
                experiment,
                variable,
                facet,
                pattern,
                frequency,
                catalog_root,
                site,
                json,
            },
        ),
    }
}
