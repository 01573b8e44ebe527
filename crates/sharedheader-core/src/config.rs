use crate::error::PagerError;
use crate::result::PagerResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HEADER_HEIGHT: f32 = 250.0;
pub const DEFAULT_PAGE_COUNT: usize = 3;
pub const DEFAULT_PAGE_WIDTH: f32 = 390.0;
/// Roughly two frames at 60Hz.
pub const DEFAULT_ADJUSTMENT_DELAY_MS: u64 = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Height of the collapsible header; HeaderOffset lives in `[0, header_height]`.
    pub header_height: f32,
    pub page_count: usize,
    pub initial_index: usize,
    /// Width of one page along the horizontal scroll axis.
    pub page_width: f32,
    /// When set, a single swipe settles at most one page away from where it started.
    pub disable_interval_momentum: bool,
    /// Debounce applied before an inactive page receives its adjustment.
    pub adjustment_delay_ms: u64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            page_count: DEFAULT_PAGE_COUNT,
            initial_index: 0,
            page_width: DEFAULT_PAGE_WIDTH,
            disable_interval_momentum: true,
            adjustment_delay_ms: DEFAULT_ADJUSTMENT_DELAY_MS,
        }
    }
}

impl PagerConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/sharedheader/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("sharedheader/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("sharedheader\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when it is missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> PagerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> PagerResult<Self> {
        toml::from_str(content).map_err(|e| PagerError::Serialization(e.to_string()))
    }

    pub fn to_toml(&self) -> PagerResult<String> {
        toml::to_string_pretty(self).map_err(|e| PagerError::Serialization(e.to_string()))
    }

    /// Reject configurations that can only come from programmer error.
    pub fn validate(&self) -> PagerResult<()> {
        if !self.header_height.is_finite() || self.header_height <= 0.0 {
            return Err(PagerError::InvalidConfig(format!(
                "header_height must be positive, got {}",
                self.header_height
            )));
        }
        if self.page_count == 0 {
            return Err(PagerError::InvalidConfig(
                "page_count must be at least 1".to_string(),
            ));
        }
        if self.initial_index >= self.page_count {
            return Err(PagerError::InvalidConfig(format!(
                "initial_index {} is outside 0..{}",
                self.initial_index, self.page_count
            )));
        }
        if !self.page_width.is_finite() || self.page_width <= 0.0 {
            return Err(PagerError::InvalidConfig(format!(
                "page_width must be positive, got {}",
                self.page_width
            )));
        }
        Ok(())
    }

    pub fn adjustment_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.adjustment_delay_ms)
    }

    pub fn with_header_height(mut self, header_height: f32) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_page_count(mut self, page_count: usize) -> Self {
        self.page_count = page_count;
        self
    }

    pub fn with_initial_index(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_page_width(mut self, page_width: f32) -> Self {
        self.page_width = page_width;
        self
    }

    pub fn with_interval_momentum_disabled(mut self, disabled: bool) -> Self {
        self.disable_interval_momentum = disabled;
        self
    }
}
