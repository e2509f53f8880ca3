//! testcontainersvc - exercise the container service's Start, Status and Stop
//!
//! Requires a running Docker daemon and the same permissions as the daemon.
//!
//! ```text
//! $ sudo testcontainersvc /tmp/nutanix_test.tar nutanix_test
//! $ sudo testcontainersvc /tmp/nutanix_test.tar nutanix_test nucalm_test:/data
//! $ sudo testcontainersvc nutanix_test
//! ```

use clap::Parser;
use containersvc::container::DockerService;
use containersvc::driver::{self, Invocation};
use containersvc::logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

/// Start, inspect and stop containers through the container service
#[derive(Parser)]
#[command(name = "testcontainersvc")]
#[command(version)]
#[command(about = "Exercise the container service's Start, Status and Stop calls", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Docker client binary
    #[arg(long, env = "CONTAINERSVC_DOCKER", default_value = "docker")]
    docker: PathBuf,

    /// `<imagePath> <imageName> [volume...]` to start, or `<imageName>` to
    /// report, stop and report again
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let invocation = Invocation::from_args(&cli.args);
    debug!("Dispatching {:?}", invocation);

    let service = DockerService::with_binary(cli.docker);
    match driver::run(&invocation, &service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
