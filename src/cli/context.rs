//! Wiring of configuration into the core services

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::args::Cli;
use crate::config::{AppConfig, PACKAGE_INDEX_URL};
use crate::models::BoardTarget;
use crate::platform::resolve_toolchain_path;
use crate::services::template::resolve_template_path;
use crate::services::{DependencyManager, FlashOrchestrator, PortScanner, Toolchain};

/// Resolved settings shared by every command
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub toolchain: Toolchain,
    pub template_path: PathBuf,
    pub target: BoardTarget,
}

impl AppContext {
    /// CLI flags win over the config file
    pub fn from_cli(cli: &Cli, config: AppConfig) -> Self {
        let toolchain_path = cli
            .toolchain
            .as_deref()
            .or(config.toolchain_path.as_deref());
        let template_path = cli.template.as_deref().or(config.template_path.as_deref());

        let toolchain = Toolchain::system(resolve_toolchain_path(toolchain_path));
        let template_path = resolve_template_path(template_path);
        log::debug!(
            "Toolchain: {}, template: {}",
            toolchain.binary().display(),
            template_path.display()
        );

        Self {
            config,
            toolchain,
            template_path,
            target: BoardTarget::default(),
        }
    }

    pub fn load(cli: &Cli) -> Result<(Self, log::LevelFilter)> {
        let config = AppConfig::load_or_default(cli.config.as_deref())
            .context("Failed to load configuration")?;
        let level = config.log_level();
        Ok((Self::from_cli(cli, config), level))
    }

    pub fn port_scanner(&self) -> PortScanner {
        PortScanner::new(self.toolchain.clone())
    }

    pub fn dependency_manager(&self) -> DependencyManager {
        DependencyManager::new(self.toolchain.clone(), PACKAGE_INDEX_URL)
    }

    pub fn orchestrator(&self) -> Arc<FlashOrchestrator> {
        Arc::new(
            FlashOrchestrator::new(
                self.toolchain.clone(),
                self.template_path.clone(),
                self.target,
            )
            .with_workspace_root(self.config.workspace_root.clone()),
        )
    }
}
