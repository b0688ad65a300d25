//! Configuration types for existential graph layout.
//!
//! This module provides configuration structures that control element
//! sizing, spacing, identity-line routing and the optional layout oracle.
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! partial configuration file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Sizes, paddings and spacing used by the phase pipeline.
//! - [`RoutingConfig`] - Whether obstacle-avoiding routing is used, and its clearance.
//! - [`OracleConfig`] - Whether the external layout oracle is consulted.
//!
//! # Example
//!
//! ```
//! # use ligature::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.routing().enabled());
//! assert!(!config.oracle().enabled());
//! ```

use serde::Deserialize;

/// Top-level configuration combining layout, routing and oracle settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Routing configuration section.
    #[serde(default)]
    routing: RoutingConfig,

    /// Oracle configuration section.
    #[serde(default)]
    oracle: OracleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, routing: RoutingConfig, oracle: OracleConfig) -> Self {
        Self {
            layout,
            routing,
            oracle,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Returns the oracle configuration.
    pub fn oracle(&self) -> &OracleConfig {
        &self.oracle
    }
}

/// Sizes and spacing used by the layout phases, in diagram units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the dot drawn for a vertex.
    vertex_radius: f32,

    /// Side of the minimum square cell reserved for a vertex, giving it room
    /// to move toward its hooks.
    vertex_cell_size: f32,

    /// Advance width of one character column of a relation name.
    char_width: f32,

    /// Height of one line of text.
    line_height: f32,

    /// Padding between a relation name and its predicate box edge.
    predicate_padding: f32,

    /// Minimum width and height of a predicate box.
    min_predicate_size: f32,

    /// Distance between neighbouring hooks on a predicate edge.
    hook_spacing: f32,

    /// Interior padding between a container's boundary and its children.
    cut_padding: f32,

    /// Smallest padding Container Sizing may fall back to.
    min_cut_padding: f32,

    /// Gap between neighbouring cells in a container.
    sibling_spacing: f32,

    /// Side of the square drawn for an empty cut.
    empty_cut_size: f32,

    /// Margin between the sheet and the canvas edge.
    canvas_margin: f32,

    /// Largest width or height any container may reach.
    max_extent: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertex_radius: 4.0,
            vertex_cell_size: 24.0,
            char_width: 8.0,
            line_height: 16.0,
            predicate_padding: 6.0,
            min_predicate_size: 24.0,
            hook_spacing: 12.0,
            cut_padding: 16.0,
            min_cut_padding: 2.0,
            sibling_spacing: 16.0,
            empty_cut_size: 32.0,
            canvas_margin: 20.0,
            max_extent: 20_000.0,
        }
    }
}

impl LayoutConfig {
    pub fn vertex_radius(&self) -> f32 {
        self.vertex_radius
    }

    pub fn vertex_cell_size(&self) -> f32 {
        self.vertex_cell_size
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn predicate_padding(&self) -> f32 {
        self.predicate_padding
    }

    pub fn min_predicate_size(&self) -> f32 {
        self.min_predicate_size
    }

    pub fn hook_spacing(&self) -> f32 {
        self.hook_spacing
    }

    pub fn cut_padding(&self) -> f32 {
        self.cut_padding
    }

    pub fn min_cut_padding(&self) -> f32 {
        self.min_cut_padding
    }

    pub fn sibling_spacing(&self) -> f32 {
        self.sibling_spacing
    }

    pub fn empty_cut_size(&self) -> f32 {
        self.empty_cut_size
    }

    pub fn canvas_margin(&self) -> f32 {
        self.canvas_margin
    }

    pub fn max_extent(&self) -> f32 {
        self.max_extent
    }

    /// Sets the vertex radius.
    pub fn with_vertex_radius(mut self, radius: f32) -> Self {
        self.vertex_radius = radius;
        self
    }

    /// Sets the interior padding of containers and its lower limit.
    pub fn with_cut_padding(mut self, padding: f32, min_padding: f32) -> Self {
        self.cut_padding = padding;
        self.min_cut_padding = min_padding;
        self
    }

    /// Sets the gap between neighbouring cells.
    pub fn with_sibling_spacing(mut self, spacing: f32) -> Self {
        self.sibling_spacing = spacing;
        self
    }

    /// Sets the largest width or height a container may reach.
    pub fn with_max_extent(mut self, max_extent: f32) -> Self {
        self.max_extent = max_extent;
        self
    }

    /// Sets the canvas margin around the sheet.
    pub fn with_canvas_margin(mut self, margin: f32) -> Self {
        self.canvas_margin = margin;
        self
    }

    /// Checks that every size is usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("vertex_radius", self.vertex_radius),
            ("vertex_cell_size", self.vertex_cell_size),
            ("char_width", self.char_width),
            ("line_height", self.line_height),
            ("min_predicate_size", self.min_predicate_size),
            ("hook_spacing", self.hook_spacing),
            ("cut_padding", self.cut_padding),
            ("min_cut_padding", self.min_cut_padding),
            ("empty_cut_size", self.empty_cut_size),
            ("max_extent", self.max_extent),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(format!("`{name}` must be positive, got {value}"));
        }

        let non_negative = [
            ("predicate_padding", self.predicate_padding),
            ("sibling_spacing", self.sibling_spacing),
            ("canvas_margin", self.canvas_margin),
        ];
        if let Some((name, value)) = non_negative
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(format!("`{name}` must not be negative, got {value}"));
        }

        if self.min_cut_padding > self.cut_padding {
            return Err(format!(
                "`min_cut_padding` ({}) exceeds `cut_padding` ({})",
                self.min_cut_padding, self.cut_padding
            ));
        }
        if self.vertex_cell_size < 2.0 * self.vertex_radius {
            return Err(format!(
                "`vertex_cell_size` ({}) is smaller than the vertex diameter ({})",
                self.vertex_cell_size,
                2.0 * self.vertex_radius
            ));
        }
        Ok(())
    }
}

/// Identity-line routing settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Use the visibility-graph router; when false every crossing segment
    /// falls back to a straight path.
    enabled: bool,

    /// Clearance kept between routed lines and obstacles.
    obstacle_padding: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            obstacle_padding: 4.0,
        }
    }
}

impl RoutingConfig {
    /// Creates a new [`RoutingConfig`].
    pub fn new(enabled: bool, obstacle_padding: f32) -> Self {
        Self {
            enabled,
            obstacle_padding,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn obstacle_padding(&self) -> f32 {
        self.obstacle_padding
    }
}

/// External layout oracle settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Consult the oracle for an advisory placement before laying out.
    enabled: bool,
}

impl OracleConfig {
    /// Creates a new [`OracleConfig`].
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}
