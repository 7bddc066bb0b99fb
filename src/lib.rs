//! # pickolor
//!
//! A color-model engine for color pickers and other UI widgets.
//!
//! Text (hex, CSS color names, functional rgb/hsl/hsv/cmyk forms) is parsed
//! into one canonical model (hue, saturation, value, alpha), transformed by
//! ordered steps, and formatted back to hex, rgb(a), hsl(a),
//! hsv(a), cmyk, or css text. A [`PluginRegistry`] owned by each
//! [`ColorEngine`] may intercept any stage before the built-in logic runs.
//!
//! ## Usage
//!
//! ```rust
//! use pickolor::{ColorEngine, ColorFormat, FormatRequest, Transformation};
//!
//! let engine = ColorEngine::new();
//! let model = engine.parse("#ff8800").unwrap();
//! let lighter = engine.transform(&model, &[Transformation::lighten(0.2)]).unwrap();
//! let css = engine.format(&lighter, &FormatRequest::to(ColorFormat::Rgba)).unwrap();
//! assert!(css.starts_with("rgba("));
//! ```

mod color;
pub mod cmyk;
mod constants;
pub mod error;
mod format;
mod math;
mod model;
pub mod numeric;
mod parse;
mod plugin;
pub mod syntax;
mod transform;

pub use color::DeviceColor;
pub use constants::{DEFAULT_FORMAT_PRECISION, MAX_FORMAT_PRECISION, MIN_MESSAGE_LENGTH, MODEL_PRECISION};
pub use error::{ColorError, ErrorKind, RegistryError, Result};
pub use format::FormatRequest;
pub use model::{Channel, ColorFormat, ColorModel};
pub use parse::infer_format;
pub use plugin::{Plugin, PluginRegistry};
#[cfg(feature = "json")]
pub use transform::steps_from_json;
pub use transform::{TransformKind, Transformation};

static NO_PLUGINS: PluginRegistry = PluginRegistry::new();

/// Owns a plugin registry and runs the parse/format/transform pipeline.
///
/// Register plugins once at startup; afterwards the engine can be shared
/// across threads by reference.
#[derive(Debug, Default)]
pub struct ColorEngine {
    plugins: PluginRegistry,
}

impl ColorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine around an already populated registry.
    pub fn with_plugins(plugins: PluginRegistry) -> Self {
        Self { plugins }
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Append a plugin; it is consulted after every plugin registered before it.
    pub fn register_plugin<P: Plugin + 'static>(&mut self, plugin: P) -> std::result::Result<(), RegistryError> {
        self.plugins.register(plugin)
    }

    /// Parse color text into a canonical model.
    pub fn parse(&self, input: &str) -> Result<ColorModel> {
        parse::parse_color(&self.plugins, input)
    }

    /// Render a model as text.
    pub fn format(&self, model: &ColorModel, request: &FormatRequest) -> Result<String> {
        format::format_color(&self.plugins, model, request)
    }

    /// Apply `steps` in order, each to the previous step's output.
    pub fn transform(&self, model: &ColorModel, steps: &[Transformation]) -> Result<ColorModel> {
        transform::transform_color(&self.plugins, model, steps)
    }

    /// Like [`transform`](Self::transform), with steps decoded from JSON.
    #[cfg(feature = "json")]
    pub fn transform_json(&self, model: &ColorModel, steps: &serde_json::Value) -> Result<ColorModel> {
        self.transform(model, &steps_from_json(steps)?)
    }
}

/// Parse with the built-in logic only.
pub fn parse_color(input: &str) -> Result<ColorModel> {
    parse::parse_color(&NO_PLUGINS, input)
}

/// Format with the built-in logic only.
pub fn format_color(model: &ColorModel, request: &FormatRequest) -> Result<String> {
    format::format_color(&NO_PLUGINS, model, request)
}

/// Transform with the built-in logic only.
pub fn transform_color(model: &ColorModel, steps: &[Transformation]) -> Result<ColorModel> {
    transform::transform_color(&NO_PLUGINS, model, steps)
}
