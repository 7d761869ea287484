//! Update-throttle policy tests.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use common::{RenderLog, TestRenderer};
use foucault::settings::keys;
use foucault::{Plot2D, PlotOptions, PlotRegistry, RenderOptions, Settings};

fn plot_with(
    registry: &mut PlotRegistry,
    log: &RenderLog,
    options: PlotOptions,
) -> Rc<RefCell<Plot2D>> {
    Plot2D::new(registry, Box::new(TestRenderer::new(log.clone())), options).unwrap()
}

#[test]
fn unforced_updates_within_min_interval_draw_at_most_once() {
    let mut registry = PlotRegistry::new(Rc::new(Settings::new()));
    let log = RenderLog::new();
    let plot = plot_with(
        &mut registry,
        &log,
        PlotOptions::new().min_interval(Duration::from_secs(1)),
    );

    let opts = RenderOptions::default();
    assert!(plot.borrow_mut().update(false, &opts).unwrap());
    assert!(!plot.borrow_mut().update(false, &opts).unwrap());
    assert_eq!(log.draws.get(), 1);
}

#[test]
fn unforced_update_draws_again_after_min_interval() {
    let mut registry = PlotRegistry::new(Rc::new(Settings::new()));
    let log = RenderLog::new();
    let plot = plot_with(
        &mut registry,
        &log,
        PlotOptions::new().min_interval(Duration::ZERO),
    );

    let opts = RenderOptions::default();
    assert!(plot.borrow_mut().update(false, &opts).unwrap());
    std::thread::sleep(Duration::from_millis(2));
    assert!(plot.borrow_mut().update(false, &opts).unwrap());
    assert_eq!(log.draws.get(), 2);
}

#[test]
fn forced_update_always_draws_and_stamps_last_update() {
    let settings = Rc::new(Settings::new());
    settings.set_bool(keys::AUTO_UPDATE, false);
    let mut registry = PlotRegistry::new(settings);
    let log = RenderLog::new();
    let plot = plot_with(&mut registry, &log, PlotOptions::new().autoupdate(false));

    let opts = RenderOptions::default();
    assert!(plot.borrow().last_update().is_none());

    assert!(plot.borrow_mut().update(true, &opts).unwrap());
    let first = plot.borrow().last_update().unwrap();

    std::thread::sleep(Duration::from_millis(2));
    assert!(plot.borrow_mut().update(true, &opts).unwrap());
    let second = plot.borrow().last_update().unwrap();

    assert!(second >= first);
    assert_eq!(log.draws.get(), 2);
}

#[test]
fn autoupdate_false_blocks_unforced_updates() {
    let mut registry = PlotRegistry::new(Rc::new(Settings::new()));
    let log = RenderLog::new();
    let plot = plot_with(
        &mut registry,
        &log,
        PlotOptions::new()
            .autoupdate(false)
            .min_interval(Duration::ZERO),
    );

    let opts = RenderOptions::default();
    std::thread::sleep(Duration::from_millis(2));
    assert!(!plot.borrow_mut().update(false, &opts).unwrap());
    assert_eq!(log.draws.get(), 0);

    assert!(plot.borrow_mut().update(true, &opts).unwrap());
    assert_eq!(log.draws.get(), 1);
}

// The per-plot override only has an effect when explicitly false; a true
// override still defers to the global flag.
#[test]
fn autoupdate_true_does_not_bypass_disabled_global_flag() {
    let settings = Rc::new(Settings::new());
    settings.set_bool(keys::AUTO_UPDATE, false);
    let mut registry = PlotRegistry::new(settings);
    let log = RenderLog::new();
    let plot = plot_with(
        &mut registry,
        &log,
        PlotOptions::new()
            .autoupdate(true)
            .min_interval(Duration::ZERO),
    );

    let opts = RenderOptions::default();
    std::thread::sleep(Duration::from_millis(2));
    assert!(!plot.borrow_mut().update(false, &opts).unwrap());
    assert_eq!(log.draws.get(), 0);
}

#[test]
fn disabled_global_flag_blocks_unforced_updates() {
    let settings = Rc::new(Settings::new());
    settings.set_bool(keys::AUTO_UPDATE, false);
    let mut registry = PlotRegistry::new(settings.clone());
    let log = RenderLog::new();
    let plot = plot_with(
        &mut registry,
        &log,
        PlotOptions::new().min_interval(Duration::ZERO),
    );

    let opts = RenderOptions::default();
    assert!(!plot.borrow_mut().update(false, &opts).unwrap());

    // Re-enabling the flag unblocks the same plot.
    settings.set_bool(keys::AUTO_UPDATE, true);
    assert!(plot.borrow_mut().update(false, &opts).unwrap());
    assert_eq!(log.draws.get(), 1);
}

#[test]
fn set_autoupdate_override_can_be_cleared() {
    let mut registry = PlotRegistry::new(Rc::new(Settings::new()));
    let log = RenderLog::new();
    let plot = plot_with(
        &mut registry,
        &log,
        PlotOptions::new()
            .autoupdate(false)
            .min_interval(Duration::ZERO),
    );

    let opts = RenderOptions::default();
    assert!(!plot.borrow_mut().update(false, &opts).unwrap());

    plot.borrow_mut().set_autoupdate(None);
    assert!(plot.borrow_mut().update(false, &opts).unwrap());
    assert_eq!(log.draws.get(), 1);
}
