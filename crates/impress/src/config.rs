//! Configuration types for presentation layout.
//!
//! This module provides configuration structures that control how slides
//! are positioned and how the host integration behaves. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and host settings.
//! - [`LayoutConfig`] - Controls the default positioning function and the built-in policies.
//! - [`HostConfig`] - Controls the reset signal and private output folders.
//!
//! # Example
//!
//! ```
//! # use impress::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().default_func(), "default");
//! assert_eq!(config.host().private_prefix(), "_");
//! ```

use serde::Deserialize;

/// Top-level application configuration combining layout and host settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Host integration section.
    #[serde(default)]
    host: HostConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and host configurations.
    pub fn new(layout: LayoutConfig, host: HostConfig) -> Self {
        Self { layout, host }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the host configuration.
    pub fn host(&self) -> &HostConfig {
        &self.host
    }
}

/// Positioning configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Function used for slides without a `func` attribute.
    default_func: String,

    /// Offset between consecutive slides in the cascading built-ins.
    spacing: f64,

    /// Circle radius of the `spiral` built-in.
    radius: f64,

    /// Degrees advanced per slide by the `spiral` built-in.
    spiral_step: f64,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `default_func` - Positioning function for slides that name none.
    /// * `spacing` - Cascade offset of the `default` and `vertical` built-ins.
    /// * `radius` - Radius of the `spiral` built-in.
    /// * `spiral_step` - Angle in degrees between consecutive spiral slides.
    pub fn new(
        default_func: impl Into<String>,
        spacing: f64,
        radius: f64,
        spiral_step: f64,
    ) -> Self {
        Self {
            default_func: default_func.into(),
            spacing,
            radius,
            spiral_step,
        }
    }

    pub fn default_func(&self) -> &str {
        &self.default_func
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn spiral_step(&self) -> f64 {
        self.spiral_step
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new("default", 1000.0, 1200.0, 30.0)
    }
}

/// Host integration configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Environment variable whose presence raises the reset signal.
    reset_var: String,

    /// Name prefix marking private output folders.
    private_prefix: String,

    /// Private folders that are never relocated.
    keep_private: Vec<String>,

    /// Abort the build when a directive is rejected.
    strict_directives: bool,
}

impl HostConfig {
    pub fn reset_var(&self) -> &str {
        &self.reset_var
    }

    pub fn private_prefix(&self) -> &str {
        &self.private_prefix
    }

    pub fn keep_private(&self) -> &[String] {
        &self.keep_private
    }

    pub fn strict_directives(&self) -> bool {
        self.strict_directives
    }

    /// Enable or disable strict directive handling (builder style).
    pub fn with_strict_directives(mut self, strict: bool) -> Self {
        self.strict_directives = strict;
        self
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            reset_var: "reset".to_string(),
            private_prefix: "_".to_string(),
            keep_private: vec!["_modules".to_string()],
            strict_directives: false,
        }
    }
}
