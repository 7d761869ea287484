//! The plot registry: unique names, lookup and notification dispatch.
//!
//! The registry is an explicit context object owned by the application
//! root; plots register themselves into it at the end of construction and
//! stay registered for the life of the registry. It also routes data
//! source notifications to the plots bound to the emitting source, with
//! the channel-dependent error policy described on the notify methods.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::data::SharedSource;
use crate::error::{PlotError, Result};
use crate::plot::LivePlot;
use crate::settings::Settings;

/// Registry of named plots sharing one [`Settings`] handle.
pub struct PlotRegistry {
    settings: Rc<Settings>,
    plots: Vec<(String, Rc<RefCell<dyn LivePlot>>)>,
    counters: HashMap<String, usize>,
}

impl PlotRegistry {
    /// Create an empty registry.
    pub fn new(settings: Rc<Settings>) -> Self {
        Self {
            settings,
            plots: Vec::new(),
            counters: HashMap::new(),
        }
    }

    /// The configuration handle shared with every registered plot.
    pub fn settings(&self) -> Rc<Settings> {
        self.settings.clone()
    }

    /// Generate a fresh name `<prefix><n>`, skipping names already taken.
    pub fn unique_name(&mut self, prefix: &str) -> String {
        let mut next = self.counters.get(prefix).copied().unwrap_or(0);
        let name = loop {
            let candidate = format!("{}{}", prefix, next);
            next += 1;
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        self.counters.insert(prefix.to_string(), next);
        name
    }

    /// Resolve a requested name: an explicit name must be free, a missing
    /// one gets the `plot<n>` prefix.
    pub(crate) fn resolve_name(&mut self, requested: Option<&str>) -> Result<String> {
        match requested {
            Some(name) if self.contains(name) => Err(PlotError::duplicate_name(name)),
            Some(name) => Ok(name.to_string()),
            None => Ok(self.unique_name("plot")),
        }
    }

    /// Register a plot under its resolved name.
    pub fn register(&mut self, plot: Rc<RefCell<dyn LivePlot>>) -> Result<()> {
        let name = plot.borrow().name().to_string();
        if self.contains(&name) {
            return Err(PlotError::duplicate_name(name));
        }
        tracing::debug!("Registered plot '{}'", name);
        self.plots.push((name, plot));
        Ok(())
    }

    /// Look up a plot by name.
    pub fn lookup(&self, name: &str) -> Result<Rc<RefCell<dyn LivePlot>>> {
        self.plots
            .iter()
            .find(|(plot_name, _)| plot_name == name)
            .map(|(_, plot)| plot.clone())
            .ok_or_else(|| PlotError::not_found(name))
    }

    /// Whether a plot is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.plots.iter().any(|(plot_name, _)| plot_name == name)
    }

    /// Registered plot names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.plots.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Number of registered plots.
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    /// Whether no plots are registered.
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Dispatch a "new single point" notification from `source`.
    ///
    /// Every plot bound to the source runs a non-forced update. A render
    /// failure is logged as a warning naming the plot and never reaches
    /// the emitting source.
    pub fn notify_new_point(&self, source: &SharedSource) {
        for (name, plot) in self.bound_plots(source) {
            if let Err(err) = plot.borrow_mut().update(false) {
                tracing::warn!("Failed to update plot {}: {}", name, err);
            }
        }
    }

    /// Dispatch a "new block of points" notification from `source`.
    ///
    /// Every plot bound to the source runs a non-forced update. Unlike
    /// the single-point channel, the first render failure propagates to
    /// the caller.
    pub fn notify_new_block(&self, source: &SharedSource) -> Result<()> {
        for (_, plot) in self.bound_plots(source) {
            plot.borrow_mut().update(false)?;
        }
        Ok(())
    }

    fn bound_plots<'a>(
        &'a self,
        source: &'a SharedSource,
    ) -> impl Iterator<Item = (&'a str, &'a Rc<RefCell<dyn LivePlot>>)> {
        self.plots
            .iter()
            .filter(move |(_, plot)| plot.borrow().is_bound_to(source))
            .map(|(name, plot)| (name.as_str(), plot))
    }
}

impl fmt::Debug for PlotRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotRegistry")
            .field("plots", &self.names())
            .finish()
    }
}
