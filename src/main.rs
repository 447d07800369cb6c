/*
 * Console billing for an electricity utility.
 *
 * Register an account:
 * - username, password (policy checked), contact details
 * - one or two meter serials
 *
 * Log in, then per session:
 * - enter a monthly meter reading
 *      - previous reading and billing month auto-filled from the last
 *        record for that meter; manual entry on first bill only
 *      - tiered tariff applied to the consumed units
 * - list billing history
 * - show usage statistics
 *
 * Accounts and billing records each live in a flat file, rewritten in
 * full on change.
 */

mod accounts;
mod billing;
mod calendar;
mod cli;
mod error;
mod input;
mod records;
mod resolver;
mod run;
mod stats;
mod templates;

use crate::cli::Opts;
use clap::Parser;

fn main() {
    let opts = Opts::parse();

    if let Err(error) = run::run_cmd_with_paths(
        opts.subcommand,
        &opts.users_file,
        &opts.records_file,
    ) {
        eprintln!("{}", error);
    }
}
