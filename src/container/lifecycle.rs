//! Container lifecycle management

use super::config::{Config, ContainerSummary};
use super::runtime::{CommandRunner, SystemRunner};
use crate::error::{Result, SvcError};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Label attached to every container started by this crate
pub const IMAGE_LABEL: &str = "containersvc.image";

/// Lifecycle operations on the containers of an image
pub trait ContainerService {
    /// Start a container from image `name`, loading it from the archive at
    /// `path` when the runtime does not have it yet
    fn start(&self, path: &str, name: &str, config: &Config) -> Result<()>;

    /// Report the containers of image `name`; a non-empty `id` narrows the
    /// report to that container
    fn status(&self, name: &str, id: &str) -> Result<()>;

    /// Stop the running containers of image `name`; a non-empty `id` narrows
    /// the selection to that container. `force` kills instead of stopping.
    fn stop(&self, name: &str, id: &str, force: bool) -> Result<()>;
}

/// Container service backed by the Docker command-line client
pub struct DockerService<R: CommandRunner = SystemRunner> {
    runner: R,
}

impl DockerService<SystemRunner> {
    /// Create a service driving the given docker binary
    pub fn with_binary(program: impl Into<std::path::PathBuf>) -> Self {
        Self::new(SystemRunner::new(program))
    }
}

impl<R: CommandRunner> DockerService<R> {
    /// Create a new service on top of a command runner
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Get the underlying runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Check if the runtime already has image `name`
    pub fn has_image(&self, name: &str) -> Result<bool> {
        let output = self
            .runner
            .run(&args(&["image", "inspect", "--format", "{{.Id}}", name]))?;
        Ok(output.success())
    }

    /// Load an image archive into the runtime
    pub fn load_image(&self, path: &str) -> Result<()> {
        if path.is_empty() || !Path::new(path).is_file() {
            return Err(SvcError::ImageLoad(format!("image archive not found: {}", path)));
        }

        let output = self.runner.run_checked(&args(&["load", "-i", path]))?;
        info!("Loaded image archive {}: {}", path, output.stdout.trim());
        Ok(())
    }

    /// List the containers of image `name`, optionally a single one by ID
    pub fn list(&self, name: &str, id: &str) -> Result<Vec<ContainerSummary>> {
        let mut cmd = args(&["ps", "-a", "--filter"]);
        cmd.push(format!("ancestor={}", name));
        if !id.is_empty() {
            cmd.push("--filter".to_string());
            cmd.push(format!("id={}", id));
        }
        cmd.push("--format".to_string());
        cmd.push("{{json .}}".to_string());

        let output = self.runner.run_checked(&cmd)?;
        ContainerSummary::parse_lines(&output.stdout)
    }
}

impl<R: CommandRunner> ContainerService for DockerService<R> {
    fn start(&self, path: &str, name: &str, config: &Config) -> Result<()> {
        let mounts = config.mounts()?;

        if self.has_image(name)? {
            debug!("Image {} already present", name);
        } else {
            self.load_image(path)?;
        }

        let mut cmd = args(&["run", "-d", "--name"]);
        cmd.push(container_name(name));
        cmd.push("--label".to_string());
        cmd.push(format!("{}={}", IMAGE_LABEL, name));
        for mount in &mounts {
            cmd.push("-v".to_string());
            cmd.push(mount.to_arg());
        }
        cmd.push(name.to_string());

        let output = self.runner.run_checked(&cmd)?;
        info!(
            "Started container {} from image {} with {} volume(s)",
            output.stdout.trim(),
            name,
            mounts.len()
        );
        Ok(())
    }

    fn status(&self, name: &str, id: &str) -> Result<()> {
        let containers = self.list(name, id)?;
        if containers.is_empty() {
            info!("No containers of image {}", name);
            return Ok(());
        }

        for c in &containers {
            info!(
                "Container {} ({}) of image {}: {} [{}]",
                c.id, c.names, name, c.state, c.status
            );
        }
        Ok(())
    }

    fn stop(&self, name: &str, id: &str, force: bool) -> Result<()> {
        let running: Vec<ContainerSummary> = self
            .list(name, id)?
            .into_iter()
            .filter(ContainerSummary::is_running)
            .collect();

        if running.is_empty() {
            info!("No running containers of image {} to stop", name);
            return Ok(());
        }

        let verb = if force { "kill" } else { "stop" };
        for c in &running {
            self.runner.run_checked(&args(&[verb, c.id.as_str()]))?;
            info!("Stopped container {} of image {} ({})", c.id, name, verb);
        }
        Ok(())
    }
}

/// Unique container name derived from an image reference
fn container_name(image: &str) -> String {
    let base: String = image
        .rsplit('/')
        .next()
        .unwrap_or(image)
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '.' | '-' => c,
            _ => '-',
        })
        .collect();
    let base = base.trim_start_matches(['-', '.']);
    let base = if base.is_empty() { "containersvc" } else { base };

    format!("{}-{}", base, &Uuid::new_v4().simple().to_string()[..8])
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
