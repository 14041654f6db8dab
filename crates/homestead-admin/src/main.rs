#![doc = include_str!("../README.md")]

mod cli;
mod provision;

use anyhow::bail;
use clap::Parser;
use cli::CliArgs;
use homestead_core::{FsStore, Request, RequestId};
use provision::{HostOps, Outcome};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let store = FsStore::open(&args.request_dir)?;

    if args.list {
        for (username, id) in provision::pending(&store)? {
            println!("{username}: {id}");
        }
        return Ok(());
    }

    let Some(raw_id) = args.id.as_deref() else {
        bail!("expected a request id or --list; see --help");
    };
    let id: RequestId = raw_id.parse()?;

    let ops = HostOps::default();
    match provision::run(&store, &ops, id, args.execute)? {
        Outcome::DryRun(request) => {
            print_request(&request);
            println!("dry run only; re-run with --execute to provision");
        }
        Outcome::Provisioned { request, credential_path } => {
            if args.verbose {
                print_request(&request);
            }
            println!(
                "created account '{}', key installed at {}",
                request.username,
                credential_path.display()
            );
        }
    }
    Ok(())
}

fn print_request(request: &Request) {
    println!("Username: '{}'", request.username);
    println!("Email: '{}'", request.email);
    println!("Why:\n{}", request.why);
    println!("SSH key:\n{}", request.ssh_public_key);
    println!("Status: '{}'", request.status);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
