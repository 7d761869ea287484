//! Foucault - a throttled live-plot core for streaming measurement data.
//!
//! Foucault decides *when* a plot refreshes and *which* data columns feed
//! which axis while an acquisition streams samples in; actually drawing
//! pixels is left to renderer implementations behind small traits.
//!
//! # Features
//!
//! - Named plot registry with auto-generated `plot<n>` names
//! - Rate-limited redraws with per-plot and global auto-update control
//! - Coordinate/value column selection with sensible defaults
//! - Axis-label derivation from source column metadata
//! - Simple column text file loading into in-memory sources
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use foucault::{PlotOptions, PlotRegistry, Plot2D, Settings, SharedSource, TableSource};
//!
//! let settings = Rc::new(Settings::new());
//! let mut registry = PlotRegistry::new(settings);
//!
//! let source = Rc::new(TableSource::new("sweep", 1, 1));
//! let shared: SharedSource = source.clone();
//! let plot = Plot2D::new(
//!     &mut registry,
//!     Box::new(my_renderer),
//!     PlotOptions::new().source(shared.clone()),
//! )?;
//!
//! source.push_row(&[0.0, 1.25])?;
//! registry.notify_new_point(&shared);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod plot;
pub mod registry;
pub mod render;
pub mod settings;

pub use data::{ColumnLabel, DataSource, SharedSource, TableSource};
pub use error::{DimensionKind, PlotError, Result};
pub use plot::{
    AxisRole, BindSpec2D, BindSpec3D, Labels2D, Labels3D, LivePlot, Plot2D, Plot3D, PlotBinding,
    PlotOptions,
};
pub use registry::PlotRegistry;
pub use render::{Plot2DRenderer, Plot3DRenderer, RenderError, RenderFrame, RenderOptions, Renderer};
pub use settings::Settings;
