//! Renderer seam between the plotting core and concrete backends.
//!
//! The core never draws anything itself; it decides *when* to redraw and
//! hands the renderer a [`RenderFrame`] describing *what* is bound. Label,
//! title and legend setters default to no-ops so minimal backends only
//! have to implement [`Renderer::draw`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::plot::PlotBinding;

/// Failure raised by a rendering hook.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RenderError(String);

impl RenderError {
    /// Create a render error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Opaque key/value hints passed through `update` to the rendering hook.
///
/// The core does not interpret these; callers use them to tunnel
/// renderer-specific settings through an `update` call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    values: BTreeMap<String, String>,
}

impl RenderOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a hint.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a hint.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// Whether any hints are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything a renderer needs for one redraw.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Name of the plot being drawn.
    pub plot: &'a str,
    /// Bound sources with their selected columns, in display order.
    pub bindings: &'a [PlotBinding],
    /// Advisory limit on points per trace; not enforced by the core.
    pub maxpoints: usize,
    /// Advisory limit on traces; not enforced by the core.
    pub maxtraces: usize,
    /// Passthrough hints from the `update` caller.
    pub options: &'a RenderOptions,
}

/// Common rendering hooks shared by all plot kinds.
pub trait Renderer {
    /// Redraw the plot. Called only when the update policy fires.
    fn draw(&mut self, frame: RenderFrame<'_>) -> Result<(), RenderError>;

    /// Set the plot title.
    fn set_title(&mut self, _title: &str) {}

    /// Add a legend with one entry per trace.
    fn add_legend(&mut self, _entries: &[String]) {}
}

/// Rendering hooks for 2-D plots.
pub trait Plot2DRenderer: Renderer {
    /// Set the horizontal axis label; `right` selects the secondary axis.
    fn set_xlabel(&mut self, _label: &str, _right: bool) {}

    /// Set the vertical axis label; `top` selects the secondary axis.
    fn set_ylabel(&mut self, _label: &str, _top: bool) {}
}

/// Rendering hooks for 3-D plots.
pub trait Plot3DRenderer: Renderer {
    /// Set the x axis label.
    fn set_xlabel(&mut self, _label: &str) {}

    /// Set the y axis label.
    fn set_ylabel(&mut self, _label: &str) {}

    /// Set the z axis label.
    fn set_zlabel(&mut self, _label: &str) {}
}
