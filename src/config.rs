//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sunburst/sunburst.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `SUNBURST_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{FocusController, FontSizing, LabelStyle};

/// Chart canvas geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    /// Gap between the outermost ring and the canvas edge
    pub padding: f64,
    /// Radius of the hole left in the centre while a non-root node is focused
    pub inner_hole_radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 700.0,
            padding: 10.0,
            inner_hole_radius: 20.0,
        }
    }
}

/// Label sizing and placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    /// Give all children of one parent the same font size
    pub same_size_siblings: bool,
    pub font_factor: f64,
    pub root_font_size: f64,
    pub offset: f64,
    pub dy_em: f64,
    /// Font size at which label widths are measured
    pub reference_font_size: f64,
    /// Character advance for the built-in measurer
    pub char_width_em: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            same_size_siblings: true,
            font_factor: 14.0,
            root_font_size: 30.0,
            offset: 6.0,
            dy_em: 0.35,
            reference_font_size: 16.0,
            char_width_em: 0.6,
        }
    }
}

/// Zoom animation timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransitionConfig {
    pub duration_ms: u64,
    pub label_fade_delay_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750,
            label_fade_delay_ms: 400,
        }
    }
}

/// Unified configuration for sunburst.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub chart: ChartConfig,
    pub labels: LabelConfig,
    pub transition: TransitionConfig,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub chart: RawChartConfig,
    pub labels: RawLabelConfig,
    pub transition: RawTransitionConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawChartConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Option<f64>,
    pub inner_hole_radius: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLabelConfig {
    pub same_size_siblings: Option<bool>,
    pub font_factor: Option<f64>,
    pub root_font_size: Option<f64>,
    pub offset: Option<f64>,
    pub dy_em: Option<f64>,
    pub reference_font_size: Option<f64>,
    pub char_width_em: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTransitionConfig {
    pub duration_ms: Option<u64>,
    pub label_fade_delay_ms: Option<u64>,
}

/// Get the XDG config directory for sunburst.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sunburst").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sunburst.toml"))
}

/// Inputs to layered loading.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources<'a> {
    /// Global config file, skipped when absent or missing on disk
    pub global: Option<PathBuf>,
    /// Config file given on the command line; must exist
    pub local: Option<&'a Path>,
    /// Environment snapshot; `None` reads the process environment
    pub env: Option<Map<String, String>>,
}

impl<'a> ConfigSources<'a> {
    /// XDG global file, the given local file and the process environment.
    pub fn system(local: Option<&'a Path>) -> Self {
        Self {
            global: global_config_path(),
            local,
            env: None,
        }
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Outer radius of the chart.
    pub fn max_radius(&self) -> f64 {
        self.chart.width.min(self.chart.height) / 2.0 - self.chart.padding
    }

    pub fn focus_controller(&self) -> FocusController {
        FocusController::new(self.max_radius(), self.chart.inner_hole_radius).with_timing(
            self.transition.duration_ms,
            self.transition.label_fade_delay_ms,
        )
    }

    pub fn label_style(&self) -> LabelStyle {
        LabelStyle {
            offset: self.labels.offset,
            dy_em: self.labels.dy_em,
            sizing: FontSizing {
                font_factor: self.labels.font_factor,
                root_font_size: self.labels.root_font_size,
            },
        }
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let (c, l, t) = (&overlay.chart, &overlay.labels, &overlay.transition);
        Self {
            chart: ChartConfig {
                width: c.width.unwrap_or(self.chart.width),
                height: c.height.unwrap_or(self.chart.height),
                padding: c.padding.unwrap_or(self.chart.padding),
                inner_hole_radius: c.inner_hole_radius.unwrap_or(self.chart.inner_hole_radius),
            },
            labels: LabelConfig {
                same_size_siblings: l
                    .same_size_siblings
                    .unwrap_or(self.labels.same_size_siblings),
                font_factor: l.font_factor.unwrap_or(self.labels.font_factor),
                root_font_size: l.root_font_size.unwrap_or(self.labels.root_font_size),
                offset: l.offset.unwrap_or(self.labels.offset),
                dy_em: l.dy_em.unwrap_or(self.labels.dy_em),
                reference_font_size: l
                    .reference_font_size
                    .unwrap_or(self.labels.reference_font_size),
                char_width_em: l.char_width_em.unwrap_or(self.labels.char_width_em),
            },
            transition: TransitionConfig {
                duration_ms: t.duration_ms.unwrap_or(self.transition.duration_ms),
                label_fade_delay_ms: t
                    .label_fade_delay_ms
                    .unwrap_or(self.transition.label_fade_delay_ms),
            },
        }
    }

    /// Load settings with layered precedence from the system locations.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line; must exist
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(ConfigSources::system(local))
    }

    /// Load settings with layered precedence from explicit sources.
    pub fn load_from(sources: ConfigSources<'_>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = sources.global.as_deref() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(path) = sources.local {
            debug!("loading local config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current, sources.env)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply SUNBURST_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SUNBURST")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        let float = |key: &str| config.get_float(key).ok();
        if let Some(v) = float("chart.width") {
            settings.chart.width = v;
        }
        if let Some(v) = float("chart.height") {
            settings.chart.height = v;
        }
        if let Some(v) = float("chart.padding") {
            settings.chart.padding = v;
        }
        if let Some(v) = float("chart.inner_hole_radius") {
            settings.chart.inner_hole_radius = v;
        }
        if let Ok(v) = config.get_bool("labels.same_size_siblings") {
            settings.labels.same_size_siblings = v;
        }
        if let Some(v) = float("labels.font_factor") {
            settings.labels.font_factor = v;
        }
        if let Some(v) = float("labels.root_font_size") {
            settings.labels.root_font_size = v;
        }
        if let Some(v) = float("labels.offset") {
            settings.labels.offset = v;
        }
        if let Some(v) = float("labels.dy_em") {
            settings.labels.dy_em = v;
        }
        if let Some(v) = float("labels.reference_font_size") {
            settings.labels.reference_font_size = v;
        }
        if let Some(v) = float("labels.char_width_em") {
            settings.labels.char_width_em = v;
        }
        if let Ok(v) = config.get::<u64>("transition.duration_ms") {
            settings.transition.duration_ms = v;
        }
        if let Ok(v) = config.get::<u64>("transition.label_fade_delay_ms") {
            settings.transition.label_fade_delay_ms = v;
        }

        Ok(settings)
    }

    /// Reject geometry that leaves no room for the chart.
    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_radius() <= 0.0 {
            return Err(ApplicationError::Config {
                message: format!(
                    "chart of {}x{} with padding {} has no drawable radius",
                    self.chart.width, self.chart.height, self.chart.padding
                ),
            });
        }
        if self.chart.inner_hole_radius < 0.0 || self.chart.inner_hole_radius >= self.max_radius() {
            return Err(ApplicationError::Config {
                message: format!(
                    "inner_hole_radius {} must lie within [0, {})",
                    self.chart.inner_hole_radius,
                    self.max_radius()
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# sunburst configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/sunburst/sunburst.toml
#   Local:  file passed with --config
#   Env:    SUNBURST_<SECTION>__<KEY>, e.g. SUNBURST_CHART__WIDTH=1200

[chart]
# width = 960
# height = 700
# padding = 10
# inner_hole_radius = 20

[labels]
# same_size_siblings = true
# font_factor = 14
# root_font_size = 30
# offset = 6
# dy_em = 0.35
# reference_font_size = 16
# char_width_em = 0.6

[transition]
# duration_ms = 750
# label_fade_delay_ms = 400
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
