//! Plugin trait and the ordered registry consulted before the default pipeline.
//!
//! A plugin may intercept parsing, formatting, or a single transform step.
//! Returning `Ok(None)` means "no opinion" and the next plugin (and finally
//! the built-in logic) runs. The first `Ok(Some(_))` wins; an `Err` aborts the
//! call and reaches the caller unchanged. Formatting only consults plugins
//! that declare support for the requested target.

use std::fmt;

use crate::error::{RegistryError, Result};
use crate::format::FormatRequest;
use crate::model::{ColorFormat, ColorModel};
use crate::transform::Transformation;

/// An engine extension. Every capability is optional.
pub trait Plugin: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Whether [`Plugin::format`] should be asked about `target`. Every
    /// target by default.
    fn supports(&self, _target: ColorFormat) -> bool {
        true
    }

    fn parse(&self, _input: &str) -> Result<Option<ColorModel>> {
        Ok(None)
    }

    fn format(&self, _model: &ColorModel, _request: &FormatRequest) -> Result<Option<String>> {
        Ok(None)
    }

    fn transform(&self, _model: &ColorModel, _step: &Transformation) -> Result<Option<ColorModel>> {
        Ok(None)
    }
}

/// Plugins in registration order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl PluginRegistry {
    pub const fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    /// Append a plugin. Fails if the name is already taken.
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> std::result::Result<(), RegistryError> {
        if self.contains(plugin.name()) {
            return Err(RegistryError::DuplicateName(plugin.name().to_string()));
        }
        self.plugins.push(Box::new(plugin));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub(crate) fn run_parse(&self, input: &str) -> Result<Option<ColorModel>> {
        first_opinion(&self.plugins, |p| p.parse(input))
    }

    /// Names of the plugins that format `target`, in registration order.
    pub fn supporting(&self, target: ColorFormat) -> impl Iterator<Item = &str> {
        self.plugins
            .iter()
            .filter(move |p| p.supports(target))
            .map(|p| p.name())
    }

    /// The target is the request's, or the model's own format when unset.
    pub(crate) fn run_format(&self, model: &ColorModel, request: &FormatRequest) -> Result<Option<String>> {
        let target = request.target.unwrap_or(model.format);
        first_opinion(&self.plugins, |p| {
            if p.supports(target) {
                p.format(model, request)
            } else {
                Ok(None)
            }
        })
    }

    pub(crate) fn run_transform(&self, model: &ColorModel, step: &Transformation) -> Result<Option<ColorModel>> {
        first_opinion(&self.plugins, |p| p.transform(model, step))
    }
}

fn first_opinion<T>(
    plugins: &[Box<dyn Plugin>],
    mut ask: impl FnMut(&dyn Plugin) -> Result<Option<T>>,
) -> Result<Option<T>> {
    for plugin in plugins {
        if let Some(answer) = ask(plugin.as_ref())? {
            return Ok(Some(answer));
        }
    }
    Ok(None)
}
