use std::path::PathBuf;

use clap::Parser;

/// Runtime configuration for the signup web server.
///
/// All values are parsed from CLI arguments or environment variables,
/// with defaults suitable for a single shared host.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "homestead-web",
    version,
    about = "Web front end for shared-host account signup"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `LISTEN_ADDR`
    #[arg(long, env = "LISTEN_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub listen_addr: String,

    /// Directory where signup request records are written.
    ///
    /// The admin tool reads and updates the same directory; both sides
    /// must point at the same location.
    ///
    /// Environment variable: `REQUEST_DIR`
    #[arg(long, env = "REQUEST_DIR", default_value = "/var/lib/homestead/requests")]
    pub request_dir: PathBuf,
}
