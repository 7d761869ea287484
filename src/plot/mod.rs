//! The plotting core: data binding and throttled redraws.
//!
//! [`PlotCore`] carries everything the 2-D and 3-D plot types share: the
//! resolved name, the ordered list of [`PlotBinding`]s, the advisory
//! renderer limits and the update-throttle state. The plot types own a
//! boxed renderer and delegate the redraw decision to the core.

mod plot2d;
mod plot3d;

pub use plot2d::{BindSpec2D, Labels2D, Plot2D};
pub use plot3d::{BindSpec3D, Labels3D, Plot3D};

use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::data::SharedSource;
use crate::error::{DimensionKind, PlotError, Result};
use crate::render::{RenderFrame, RenderOptions};
use crate::settings::{keys, Settings};

/// Marks a binding as feeding a secondary axis instead of the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// The binding feeds the right-hand axis.
    Right,
    /// The binding feeds the top axis.
    Top,
}

/// One bound data source with its selected columns.
///
/// Indices are global column indices (coordinates first, then values).
/// They are validated against the source's schema at bind time only; a
/// source that changes shape afterwards is trusted to keep its own
/// invariants.
#[derive(Clone)]
pub struct PlotBinding {
    /// The bound source, shared with its producer and possibly other plots.
    pub source: SharedSource,
    /// Columns mapped to coordinate axes (one for 2-D, two for 3-D).
    pub coordinate_dims: Vec<usize>,
    /// Column mapped to the plotted value.
    pub value_dim: usize,
    /// Optional secondary-axis marker.
    pub axis_role: Option<AxisRole>,
}

impl fmt::Debug for PlotBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotBinding")
            .field("source", &self.source.name())
            .field("coordinate_dims", &self.coordinate_dims)
            .field("value_dim", &self.value_dim)
            .field("axis_role", &self.axis_role)
            .finish()
    }
}

/// A data source argument passed at construction time.
pub enum SourceArg {
    /// An already constructed source.
    Data(SharedSource),
    /// A column text file to load as a [`crate::data::TableSource`].
    File(std::path::PathBuf),
}

impl fmt::Debug for SourceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceArg::Data(source) => f.debug_tuple("Data").field(&source.name()).finish(),
            SourceArg::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// Construction options shared by [`Plot2D`] and [`Plot3D`].
#[derive(Debug)]
pub struct PlotOptions {
    pub(crate) name: Option<String>,
    pub(crate) maxpoints: usize,
    pub(crate) maxtraces: usize,
    pub(crate) min_interval: Duration,
    pub(crate) autoupdate: Option<bool>,
    pub(crate) sources: Vec<SourceArg>,
    pub(crate) coorddim: Option<usize>,
    pub(crate) coorddims: Option<(usize, usize)>,
    pub(crate) valdim: Option<usize>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            name: None,
            maxpoints: 10_000,
            maxtraces: 5,
            min_interval: Duration::from_secs(1),
            autoupdate: None,
            sources: Vec::new(),
            coorddim: None,
            coorddims: None,
            valdim: None,
        }
    }
}

impl PlotOptions {
    /// Create the default option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an explicit plot name instead of an auto-generated one.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Advisory limit on points per trace (default 10000).
    pub fn maxpoints(mut self, maxpoints: usize) -> Self {
        self.maxpoints = maxpoints;
        self
    }

    /// Advisory limit on traces (default 5).
    pub fn maxtraces(mut self, maxtraces: usize) -> Self {
        self.maxtraces = maxtraces;
        self
    }

    /// Minimum wall-clock time between non-forced redraws (default 1 s).
    pub fn min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Override the global auto-update flag for this plot.
    pub fn autoupdate(mut self, autoupdate: bool) -> Self {
        self.autoupdate = Some(autoupdate);
        self
    }

    /// Bind a source at construction time, using the dimension options
    /// set on this struct.
    pub fn source(mut self, source: SharedSource) -> Self {
        self.sources.push(SourceArg::Data(source));
        self
    }

    /// Load a column text file as a source and bind it with default
    /// dimension selection.
    pub fn file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.sources.push(SourceArg::File(path.into()));
        self
    }

    /// Coordinate column for sources bound at construction (2-D only).
    pub fn coorddim(mut self, coorddim: usize) -> Self {
        self.coorddim = Some(coorddim);
        self
    }

    /// Coordinate column pair for sources bound at construction (3-D only).
    pub fn coorddims(mut self, first: usize, second: usize) -> Self {
        self.coorddims = Some((first, second));
        self
    }

    /// Value column for sources bound at construction.
    pub fn valdim(mut self, valdim: usize) -> Self {
        self.valdim = Some(valdim);
        self
    }
}

/// Shared state and throttle logic of a plot.
#[derive(Debug)]
pub struct PlotCore {
    name: String,
    settings: Rc<Settings>,
    bindings: Vec<PlotBinding>,
    maxpoints: usize,
    maxtraces: usize,
    min_interval: Duration,
    autoupdate: Option<bool>,
    last_update: Option<Instant>,
}

impl PlotCore {
    pub(crate) fn new(name: String, settings: Rc<Settings>, options: &PlotOptions) -> Self {
        Self {
            name,
            settings,
            bindings: Vec::new(),
            maxpoints: options.maxpoints,
            maxtraces: options.maxtraces,
            min_interval: options.min_interval,
            autoupdate: options.autoupdate,
            last_update: None,
        }
    }

    /// Resolved plot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound sources in display order.
    pub fn bindings(&self) -> &[PlotBinding] {
        &self.bindings
    }

    /// When the plot last redrew, `None` if it never has.
    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }

    /// Change the advisory point limit.
    pub fn set_maxpoints(&mut self, maxpoints: usize) {
        self.maxpoints = maxpoints;
    }

    /// Change the per-plot auto-update override.
    pub fn set_autoupdate(&mut self, autoupdate: Option<bool>) {
        self.autoupdate = autoupdate;
    }

    pub(crate) fn add_binding(&mut self, binding: PlotBinding) {
        // No cap here; `maxtraces` is advisory and left to the renderer.
        self.bindings.push(binding);
    }

    pub(crate) fn is_bound_to(&self, source: &SharedSource) -> bool {
        self.bindings
            .iter()
            .any(|binding| Rc::ptr_eq(&binding.source, source))
    }

    /// Apply the throttle policy and, when a redraw is due, stamp
    /// `last_update` before the hook runs.
    ///
    /// An explicit `autoupdate = Some(false)` blocks every non-forced
    /// update and takes precedence over the global flag. `Some(true)` is
    /// never checked on its own; it simply defers to the global flag.
    pub(crate) fn begin_update(&mut self, force: bool) -> bool {
        if !force && self.autoupdate == Some(false) {
            return false;
        }

        let auto = self.settings.get_bool(keys::AUTO_UPDATE, true);
        let stale = match self.last_update {
            Some(at) => at.elapsed() > self.min_interval,
            None => true,
        };

        if force || (auto && stale) {
            self.last_update = Some(Instant::now());
            true
        } else {
            false
        }
    }

    pub(crate) fn frame<'a>(&'a self, options: &'a RenderOptions) -> RenderFrame<'a> {
        RenderFrame {
            plot: &self.name,
            bindings: &self.bindings,
            maxpoints: self.maxpoints,
            maxtraces: self.maxtraces,
            options,
        }
    }

    pub(crate) fn validate_dim(
        &self,
        source: &SharedSource,
        kind: DimensionKind,
        index: usize,
    ) -> Result<()> {
        let count = source.column_count();
        if index >= count {
            return Err(PlotError::invalid_dimension(
                source.name(),
                kind,
                index,
                count,
            ));
        }
        Ok(())
    }
}

/// Object-safe view of a plot, used by the registry to store and notify
/// plots of any kind.
pub trait LivePlot {
    /// Resolved plot name.
    fn name(&self) -> &str;

    /// Whether this plot has a binding to `source`.
    fn is_bound_to(&self, source: &SharedSource) -> bool;

    /// Run the update policy; `Ok(true)` means the renderer drew.
    fn update(&mut self, force: bool) -> Result<bool>;
}
