use std::path::PathBuf;

use clap::Parser;

/// Operator tool for reviewing and provisioning signup requests.
///
/// With `--list`, prints a worklist of pending requests. With a request
/// id, runs the provisioning procedure for that single request; by
/// default this is a dry run that only prints the record for review.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "homestead-admin",
    version,
    about = "Provision OS accounts for pending signup requests"
)]
pub struct CliArgs {
    /// Id of the request to provision.
    #[arg(value_name = "REQUEST_ID", conflicts_with = "list")]
    pub id: Option<String>,

    /// List username and id of every pending request, then exit.
    #[arg(long)]
    pub list: bool,

    /// Print the full record while provisioning.
    #[arg(short, long)]
    pub verbose: bool,

    /// Actually create the account and install the key. Without this
    /// flag the run is a dry run and nothing is touched.
    #[arg(long)]
    pub execute: bool,

    /// Directory where signup request records are kept.
    ///
    /// Environment variable: `REQUEST_DIR`
    #[arg(long, env = "REQUEST_DIR", default_value = "/var/lib/homestead/requests")]
    pub request_dir: PathBuf,
}
