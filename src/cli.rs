use clap::{Parser, ValueHint};
use std::path::PathBuf;

/* Argument Structure
 *
 * register    interactive account creation
 * login       authenticate, then the account menu:
 *             meter reading | billing history | usage statistics | logout
 */

#[derive(Parser)]
pub struct Opts {
    #[clap(short, long, default_value="users.history",
        value_hint=ValueHint::FilePath)]
    pub users_file: PathBuf,

    #[clap(short, long, default_value="billing.records",
        value_hint=ValueHint::FilePath)]
    pub records_file: PathBuf,

    #[clap(subcommand)]
    pub subcommand: Command,
}

#[derive(Parser)]
pub enum Command {
    /// Register a new customer account
    Register,

    /// Log in to an account and open the session menu
    Login,
}
