//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use foucault::{
    ColumnLabel, Plot2DRenderer, Plot3DRenderer, RenderError, RenderFrame, Renderer, SharedSource,
    TableSource,
};

/// Shared record of what a test renderer was asked to do.
#[derive(Debug, Default, Clone)]
pub struct RenderLog {
    /// Number of successful draws.
    pub draws: Rc<Cell<usize>>,
    /// Labels received, as (slot, text) pairs.
    pub labels: Rc<RefCell<Vec<(String, String)>>>,
}

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self, slot: &str) -> Option<String> {
        self.labels
            .borrow()
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, text)| text.clone())
    }
}

/// Renderer that records calls and optionally fails every draw.
pub struct TestRenderer {
    log: RenderLog,
    fail_with: Option<String>,
}

impl TestRenderer {
    pub fn new(log: RenderLog) -> Self {
        Self {
            log,
            fail_with: None,
        }
    }

    pub fn failing(log: RenderLog, message: &str) -> Self {
        Self {
            log,
            fail_with: Some(message.to_string()),
        }
    }
}

impl Renderer for TestRenderer {
    fn draw(&mut self, _frame: RenderFrame<'_>) -> Result<(), RenderError> {
        if let Some(message) = &self.fail_with {
            return Err(RenderError::new(message.clone()));
        }
        self.log.draws.set(self.log.draws.get() + 1);
        Ok(())
    }
}

impl Plot2DRenderer for TestRenderer {
    fn set_xlabel(&mut self, label: &str, right: bool) {
        let slot = if right { "x-right" } else { "x-left" };
        self.log
            .labels
            .borrow_mut()
            .push((slot.to_string(), label.to_string()));
    }

    fn set_ylabel(&mut self, label: &str, top: bool) {
        let slot = if top { "y-top" } else { "y-bottom" };
        self.log
            .labels
            .borrow_mut()
            .push((slot.to_string(), label.to_string()));
    }
}

impl Plot3DRenderer for TestRenderer {
    fn set_xlabel(&mut self, label: &str) {
        self.log
            .labels
            .borrow_mut()
            .push(("x".to_string(), label.to_string()));
    }

    fn set_ylabel(&mut self, label: &str) {
        self.log
            .labels
            .borrow_mut()
            .push(("y".to_string(), label.to_string()));
    }

    fn set_zlabel(&mut self, label: &str) {
        self.log
            .labels
            .borrow_mut()
            .push(("z".to_string(), label.to_string()));
    }
}

/// Build a shared source with `coords` coordinate and `values` value
/// columns and generic labels.
pub fn source(name: &str, coords: usize, values: usize) -> SharedSource {
    Rc::new(TableSource::new(name, coords, values))
}

/// Build a shared 1-coordinate/1-value source with labelled columns.
pub fn labelled_source(name: &str, coord: (&str, &str), value: (&str, &str)) -> SharedSource {
    Rc::new(TableSource::new(name, 1, 1).with_labels(vec![
        ColumnLabel::with_unit(coord.0, coord.1),
        ColumnLabel::with_unit(value.0, value.1),
    ]))
}
