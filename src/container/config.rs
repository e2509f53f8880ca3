//! Container configuration

use crate::error::{Result, SvcError};
use serde::{Deserialize, Serialize};

/// Container state as reported by the runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    /// Container is created but not running
    Created,
    /// Container is running
    Running,
    /// Container is paused
    Paused,
    /// Container is restarting
    Restarting,
    /// Container has exited
    Exited,
    /// Container is being removed
    Removing,
    /// Container is in an error state
    Dead,
    /// State string not known to this crate
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerState::Created => write!(f, "created"),
            ContainerState::Running => write!(f, "running"),
            ContainerState::Paused => write!(f, "paused"),
            ContainerState::Restarting => write!(f, "restarting"),
            ContainerState::Exited => write!(f, "exited"),
            ContainerState::Removing => write!(f, "removing"),
            ContainerState::Dead => write!(f, "dead"),
            ContainerState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Configuration applied when starting a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Volume mount specifications (`host:container[:mode]`)
    pub volumes: Vec<String>,
}

impl Config {
    /// Create a configuration with the given volume specifications
    pub fn with_volumes(volumes: Vec<String>) -> Self {
        Self { volumes }
    }

    /// Parse every volume specification
    pub fn mounts(&self) -> Result<Vec<VolumeMount>> {
        self.volumes.iter().map(|v| VolumeMount::parse(v)).collect()
    }
}

/// Volume mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Host path or named volume
    pub source: String,
    pub container_path: String,
    pub read_only: bool,
}

impl VolumeMount {
    /// Parse a `source:container[:ro|rw]` specification
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || SvcError::InvalidVolume(spec.to_string());

        let mut parts = spec.split(':');
        let source = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let container_path = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let read_only = match parts.next() {
            None | Some("rw") => false,
            Some("ro") => true,
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            source: source.to_string(),
            container_path: container_path.to_string(),
            read_only,
        })
    }

    /// Render as a runtime `-v` argument
    pub fn to_arg(&self) -> String {
        if self.read_only {
            format!("{}:{}:ro", self.source, self.container_path)
        } else {
            format!("{}:{}", self.source, self.container_path)
        }
    }
}

/// One container as listed by `docker ps --format '{{json .}}'`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerSummary {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "Names", default)]
    pub names: String,
    #[serde(rename = "State", default)]
    pub state: ContainerState,
    /// Human readable status, e.g. "Up 3 minutes"
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl ContainerSummary {
    /// Parse one JSON object per line, skipping blank lines
    pub fn parse_lines(output: &str) -> Result<Vec<Self>> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(SvcError::from))
            .collect()
    }

    /// Check if container is running
    pub fn is_running(&self) -> bool {
        matches!(self.state, ContainerState::Running | ContainerState::Paused)
    }
}
