//! 2-D plots: one coordinate column against one value column per source.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::data::{SharedSource, TableSource};
use crate::error::{DimensionKind, Result};
use crate::plot::{AxisRole, LivePlot, PlotBinding, PlotCore, PlotOptions, SourceArg};
use crate::registry::PlotRegistry;
use crate::render::{Plot2DRenderer, RenderOptions};

/// Dimension selection for one 2-D binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindSpec2D {
    /// Coordinate column; defaults to column 0.
    pub coorddim: Option<usize>,
    /// Value column; defaults to the first column after the coordinates.
    pub valdim: Option<usize>,
    /// Optional secondary-axis marker for this binding.
    pub axis_role: Option<AxisRole>,
}

/// Axis labels for [`Plot2D::set_labels`]. `None` fields are derived from
/// the bound sources.
#[derive(Debug, Clone, Default)]
pub struct Labels2D {
    /// Left (primary horizontal) axis label.
    pub left: Option<String>,
    /// Bottom (primary vertical) axis label.
    pub bottom: Option<String>,
    /// Right (secondary horizontal) axis label.
    pub right: Option<String>,
    /// Top (secondary vertical) axis label.
    pub top: Option<String>,
}

/// A named 2-D plot bound to one or more data sources.
pub struct Plot2D {
    core: PlotCore,
    renderer: Box<dyn Plot2DRenderer>,
}

impl Plot2D {
    /// Create a plot, bind the sources listed in `options` and register
    /// it under its resolved name.
    pub fn new(
        registry: &mut PlotRegistry,
        renderer: Box<dyn Plot2DRenderer>,
        options: PlotOptions,
    ) -> Result<Rc<RefCell<Self>>> {
        let name = registry.resolve_name(options.name.as_deref())?;
        let core = PlotCore::new(name, registry.settings(), &options);
        let mut plot = Self { core, renderer };

        let spec = BindSpec2D {
            coorddim: options.coorddim,
            valdim: options.valdim,
            axis_role: None,
        };
        for arg in options.sources {
            match arg {
                SourceArg::Data(source) => plot.add_data(source, spec)?,
                SourceArg::File(path) => {
                    let source: SharedSource = Rc::new(TableSource::from_file(&path)?);
                    plot.add_data(source, BindSpec2D::default())?;
                }
            }
        }

        let plot = Rc::new(RefCell::new(plot));
        registry.register(plot.clone())?;
        Ok(plot)
    }

    /// Bind a source. Explicit column indices are validated against the
    /// source's schema; missing ones are inferred (coordinate 0, value =
    /// the first column after the coordinates, floored to 1).
    pub fn add_data(&mut self, source: SharedSource, spec: BindSpec2D) -> Result<()> {
        let coorddim = match spec.coorddim {
            Some(dim) => {
                self.core
                    .validate_dim(&source, DimensionKind::Coordinate, dim)?;
                dim
            }
            None => {
                if source.coordinate_count() > 1 {
                    tracing::info!(
                        "Source '{}' has multiple coordinate columns, using the first",
                        source.name()
                    );
                }
                0
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
                source.coordinate_count().max(1)
            }
        };

        self.core.add_binding(PlotBinding {
            source,
            coordinate_dims: vec![coorddim],
            value_dim: valdim,
            axis_role: spec.axis_role,
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
    /// `None` labels are filled from the bindings in display order: a
    /// [`AxisRole::Right`] binding supplies the right label when still
    /// unset, otherwise it contributes to the left one; [`AxisRole::Top`]
    /// behaves the same for top versus bottom. Coordinate columns label
    /// the horizontal axes, value columns the vertical ones. Labels that
    /// resolve to nothing are skipped.
    pub fn set_labels(&mut self, labels: Labels2D) {
        let Labels2D {
            mut left,
            mut bottom,
            mut right,
            mut top,
        } = labels;

        for binding in self.core.bindings() {
            let coord_label = || binding.source.format_label(binding.coordinate_dims[0]);
            let value_label = || binding.source.format_label(binding.value_dim);

            if binding.axis_role == Some(AxisRole::Right) && right.is_none() {
                right = Some(coord_label());
            } else if left.is_none() {
                left = Some(coord_label());
            }

            if binding.axis_role == Some(AxisRole::Top) && top.is_none() {
                top = Some(value_label());
            } else if bottom.is_none() {
                bottom = Some(value_label());
            }
        }

        if let Some(label) = non_empty(left) {
            self.renderer.set_xlabel(&label, false);
        }
        if let Some(label) = non_empty(right) {
            self.renderer.set_xlabel(&label, true);
        }
        if let Some(label) = non_empty(bottom) {
            self.renderer.set_ylabel(&label, false);
        }
        if let Some(label) = non_empty(top) {
            self.renderer.set_ylabel(&label, true);
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

impl LivePlot for Plot2D {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn is_bound_to(&self, source: &SharedSource) -> bool {
        self.core.is_bound_to(source)
    }

    fn update(&mut self, force: bool) -> Result<bool> {
        Plot2D::update(self, force, &RenderOptions::default())
    }
}

impl fmt::Debug for Plot2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plot2D")
            .field("name", &self.core.name())
            .field("bindings", &self.core.bindings().len())
            .finish()
    }
}

fn non_empty(label: Option<String>) -> Option<String> {
    label.filter(|text| !text.is_empty())
}
