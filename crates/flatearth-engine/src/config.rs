//! Tunable constants for layouts, scene geometry, and route enumeration.
//!
//! Every field has a default, so a partial TOML document (or none at all)
//! deserializes into a usable [`EngineConfig`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub ellipse: EllipseConfig,
    #[serde(default)]
    pub stress: StressConfig,
    #[serde(default)]
    pub force: ForceConfig,
}

/// Closed-form ellipse placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseConfig {
    /// Base radius is `min(width, height) / radius_divisor`.
    #[serde(default = "default_ellipse_divisor")]
    pub radius_divisor: f64,
    /// Horizontal stretch applied to the base radius.
    #[serde(default = "default_x_scale")]
    pub x_scale: f64,
    /// Vertical squash applied to the base radius.
    #[serde(default = "default_y_scale")]
    pub y_scale: f64,
}

impl Default for EllipseConfig {
    fn default() -> Self {
        Self {
            radius_divisor: default_ellipse_divisor(),
            x_scale: default_x_scale(),
            y_scale: default_y_scale(),
        }
    }
}

/// Stress-majorization (Kamada–Kawai style) gradient descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressConfig {
    /// Ideal length `L0` for the longest shortest path.
    #[serde(default = "default_ideal_length")]
    pub ideal_length: f64,
    #[serde(default = "default_spring_constant")]
    pub spring_constant: f64,
    /// Step factor applied to each node's summed displacement.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_stress_iterations")]
    pub max_iterations: usize,
    /// Stop once the largest per-node displacement drops below this.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Pairwise distances are clamped to at least this before dividing.
    #[serde(default = "default_distance_floor")]
    pub distance_floor: f64,
    /// Radius of the starting circle is `min(width, height) / divisor`.
    #[serde(default = "default_initial_radius_divisor")]
    pub initial_radius_divisor: f64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            ideal_length: default_ideal_length(),
            spring_constant: default_spring_constant(),
            learning_rate: default_learning_rate(),
            max_iterations: default_stress_iterations(),
            epsilon: default_epsilon(),
            distance_floor: default_distance_floor(),
            initial_radius_divisor: default_initial_radius_divisor(),
        }
    }
}

/// Spring-embedder with simulated-annealing temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceConfig {
    #[serde(default = "default_force_iterations")]
    pub iterations: usize,
    /// Inset kept clear along every canvas border.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Temperature multiplier applied after each iteration.
    #[serde(default = "default_cooling")]
    pub cooling: f64,
    /// Initial temperature is `width / initial_temperature_divisor`.
    #[serde(default = "default_temperature_divisor")]
    pub initial_temperature_divisor: f64,
    /// Added to every pairwise distance so coincident nodes still separate.
    #[serde(default = "default_distance_offset")]
    pub distance_offset: f64,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: default_force_iterations(),
            padding: default_padding(),
            cooling: default_cooling(),
            initial_temperature_divisor: default_temperature_divisor(),
            distance_offset: default_distance_offset(),
            seed: None,
        }
    }
}

/// Geometry used when turning positions into drawable shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_node_radius")]
    pub node_radius: f64,
    #[serde(default = "default_arrow_length")]
    pub arrow_length: f64,
    /// Half-angle between the shaft and each arrowhead wing, in radians.
    #[serde(default = "default_arrow_half_angle")]
    pub arrow_half_angle: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            node_radius: default_node_radius(),
            arrow_length: default_arrow_length(),
            arrow_half_angle: default_arrow_half_angle(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Upper bound on enumerated covering paths; unbounded when absent.
    #[serde(default)]
    pub max_paths: Option<usize>,
}

const fn default_ellipse_divisor() -> f64 {
    2.7
}

const fn default_x_scale() -> f64 {
    1.2
}

const fn default_y_scale() -> f64 {
    0.8
}

const fn default_ideal_length() -> f64 {
    400.0
}

const fn default_spring_constant() -> f64 {
    1.0
}

const fn default_learning_rate() -> f64 {
    0.01
}

const fn default_stress_iterations() -> usize {
    500
}

const fn default_epsilon() -> f64 {
    1e-2
}

const fn default_distance_floor() -> f64 {
    1e-4
}

const fn default_initial_radius_divisor() -> f64 {
    3.0
}

const fn default_force_iterations() -> usize {
    100
}

const fn default_padding() -> f64 {
    40.0
}

const fn default_cooling() -> f64 {
    0.95
}

const fn default_temperature_divisor() -> f64 {
    10.0
}

const fn default_distance_offset() -> f64 {
    0.01
}

const fn default_node_radius() -> f64 {
    26.0
}

const fn default_arrow_length() -> f64 {
    15.0
}

const fn default_arrow_half_angle() -> f64 {
    std::f64::consts::PI / 8.0
}
