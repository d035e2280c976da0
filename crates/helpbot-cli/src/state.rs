//! Application state shared by all commands.
//!
//! Holds the global configuration and knows how to turn a knowledge pack
//! path into a ready-to-use widget.

use std::path::{Path, PathBuf};

use anyhow::Context;
use helpbot_core::widget::Widget;
use helpbot_infra::config::{default_config_path, load_global_config};
use helpbot_infra::knowledge::load_knowledge_pack;
use helpbot_types::config::{GlobalConfig, WidgetConfig};

/// Shared application state.
pub struct AppState {
    pub config_path: PathBuf,
    pub global: GlobalConfig,
}

impl AppState {
    /// Load the global config from `config_path`, or from the default
    /// location when none is given.
    pub async fn init(config_path: Option<&Path>) -> Self {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);
        let global = load_global_config(&config_path).await;
        Self {
            config_path,
            global,
        }
    }

    /// The knowledge pack to use: the explicit `--knowledge` path, otherwise
    /// `default_knowledge` from `config.toml`.
    pub fn knowledge_path(&self, explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.global.default_knowledge.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No knowledge pack given. Pass --knowledge <file> or set default_knowledge in {}",
                    self.config_path.display()
                )
            })
    }

    /// Load the knowledge pack and merge it with the global settings.
    pub async fn widget_config(&self, explicit: Option<&Path>) -> anyhow::Result<WidgetConfig> {
        let path = self.knowledge_path(explicit)?;
        let pack = load_knowledge_pack(&path)
            .await
            .with_context(|| format!("Failed to load knowledge pack {}", path.display()))?;
        Ok(self.global.widget_config(pack))
    }

    /// Build a widget for the given knowledge pack.
    pub async fn widget(&self, explicit: Option<&Path>) -> anyhow::Result<Widget> {
        Ok(Widget::new(self.widget_config(explicit).await?))
    }
}
