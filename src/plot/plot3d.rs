//! 3-D plots: two coordinate columns against one value column per source.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::data::{SharedSource, TableSource};
use crate::error::{DimensionKind, Result};
use crate::plot::{LivePlot, PlotBinding, PlotCore, PlotOptions, SourceArg};
use crate::registry::PlotRegistry;
use crate::render::{Plot3DRenderer, RenderOptions};

/// Dimension selection for one 3-D binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindSpec3D {
    /// Coordinate column pair; defaults to columns (0, 1).
    pub coorddims: Option<(usize, usize)>,
    /// Value column; defaults to the first column after the coordinates,
    /// floored to 2.
    pub valdim: Option<usize>,
}

/// Axis labels for [`Plot3D::set_labels`]. `None` fields are derived from
/// the first binding.
#[derive(Debug, Clone, Default)]
pub struct Labels3D {
    /// X axis label.
    pub x: Option<String>,
    /// Y axis label.
    pub y: Option<String>,
    /// Z axis label.
    pub z: Option<String>,
}

/// A named 3-D plot bound to one or more data sources.
pub struct Plot3D {
    core: PlotCore,
    renderer: Box<dyn Plot3DRenderer>,
}

impl Plot3D {
    /// Create a plot, bind the sources listed in `options` and register
    /// it under its resolved name.
    pub fn new(
        registry: &mut PlotRegistry,
        renderer: Box<dyn Plot3DRenderer>,
        options: PlotOptions,
    ) -> Result<Rc<RefCell<Self>>> {
        let name = registry.resolve_name(options.name.as_deref())?;
        let core = PlotCore::new(name, registry.settings(), &options);
        let mut plot = Self { core, renderer };

        let spec = BindSpec3D {
            coorddims: options.coorddims,
            valdim: options.valdim,
        };
        for arg in options.sources {
            match arg {
                SourceArg::Data(source) => plot.add_data(source, spec)?,
                SourceArg::File(path) => {
                    let source: SharedSource = Rc::new(TableSource::from_file(&path)?);
                    plot.add_data(source, BindSpec3D::default())?;
                }
            }
        }

        let plot = Rc::new(RefCell::new(plot));
        registry.register(plot.clone())?;
        Ok(plot)
    }

    /// Bind a source. Explicit column indices are validated against the
    /// source's schema; missing ones are inferred (coordinates (0, 1),
    /// value = the first column after the coordinates, floored to 2).
    pub fn add_data(&mut self, source: SharedSource, spec: BindSpec3D) -> Result<()> {
        let coorddims = match spec.coorddims {
            Some((first, second)) => {
                self.core
                    .validate_dim(&source, DimensionKind::Coordinate, first)?;
                self.core
                    .validate_dim(&source, DimensionKind::Coordinate, second)?;
                (first, second)
            }
            None => {
                if source.coordinate_count() > 2 {
                    tracing::info!(
                        "Source '{}' has multiple coordinate columns, using the first two",
                        source.name()
                    );
                }
                (0, 1)
            }
        };

        let valdim = match spec.valdim {
            Some(dim) => {
                self.core.validate_dim(&source, DimensionKind::Value, dim)?;
                dim
            }
            None => {
                if source.value_count() > 1 {
                    tracing::info!(
                        "Source '{}' has multiple value columns, using the first",
                        source.name()
                    );
                }
                source.coordinate_count().max(2)
            }
        };

        self.core.add_binding(PlotBinding {
            source,
            coordinate_dims: vec![coorddims.0, coorddims.1],
            value_dim: valdim,
            axis_role: None,
        });
        Ok(())
    }

    /// Run the update policy; `Ok(true)` means the renderer drew.
    pub fn update(&mut self, force: bool, options: &RenderOptions) -> Result<bool> {
        if !self.core.begin_update(force) {
            return Ok(false);
        }
        let frame = self.core.frame(options);
        self.renderer.draw(frame)?;
        Ok(true)
    }

    /// Resolve and forward axis labels.
    ///
    /// Unlike the 2-D variant this derives `None` labels from the first
    /// binding only; later bindings never contribute.
    pub fn set_labels(&mut self, labels: Labels3D) {
        let Labels3D { mut x, mut y, mut z } = labels;

        if let Some(binding) = self.core.bindings().first() {
            if x.is_none() {
                x = Some(binding.source.format_label(binding.coordinate_dims[0]));
            }
            if y.is_none() {
                y = Some(binding.source.format_label(binding.coordinate_dims[1]));
            }
            if z.is_none() {
                z = Some(binding.source.format_label(binding.value_dim));
            }
        }

        if let Some(label) = non_empty(x) {
            self.renderer.set_xlabel(&label);
        }
        if let Some(label) = non_empty(y) {
            self.renderer.set_ylabel(&label);
        }
        if let Some(label) = non_empty(z) {
            self.renderer.set_zlabel(&label);
        }
    }

    /// Forward a title to the renderer.
    pub fn set_title(&mut self, title: &str) {
        self.renderer.set_title(title);
    }

    /// Forward legend entries to the renderer.
    pub fn add_legend(&mut self, entries: &[String]) {
        self.renderer.add_legend(entries);
    }

    /// Resolved plot name.
    pub fn name(&self) -> &str {
        self.core.name()
    }

    /// Bound sources in display order.
    pub fn bindings(&self) -> &[PlotBinding] {
        self.core.bindings()
    }

    /// When the plot last redrew.
    pub fn last_update(&self) -> Option<Instant> {
        self.core.last_update()
    }

    /// Change the advisory point limit.
    pub fn set_maxpoints(&mut self, maxpoints: usize) {
        self.core.set_maxpoints(maxpoints);
    }

    /// Change the per-plot auto-update override.
    pub fn set_autoupdate(&mut self, autoupdate: Option<bool>) {
        self.core.set_autoupdate(autoupdate);
    }
}

impl LivePlot for Plot3D {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn is_bound_to(&self, source: &SharedSource) -> bool {
        self.core.is_bound_to(source)
    }

    fn update(&mut self, force: bool) -> Result<bool> {
        Plot3D::update(self, force, &RenderOptions::default())
    }
}

impl fmt::Debug for Plot3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plot3D")
            .field("name", &self.core.name())
            .field("bindings", &self.core.bindings().len())
            .finish()
    }
}

fn non_empty(label: Option<String>) -> Option<String> {
    label.filter(|text| !text.is_empty())
}
