//! Foucault demo driver: stream samples into a throttled 2-D plot.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use foucault::{
    ColumnLabel, Labels2D, Plot2D, Plot2DRenderer, PlotOptions, PlotRegistry, RenderError,
    RenderFrame, RenderOptions, Renderer, Settings, SharedSource, TableSource,
};

#[derive(Parser, Debug)]
#[command(name = "foucault")]
#[command(about = "Stream measurement data into a throttled plot", long_about = None)]
struct Args {
    /// Column text data file to plot; streams a synthetic sine when absent
    file: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Number of synthetic samples to stream
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Delay between synthetic samples in milliseconds
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Minimum time between redraws in milliseconds
    #[arg(long, default_value_t = 250)]
    mintime: u64,
}

/// Renderer that reports redraws through the log instead of drawing.
#[derive(Debug, Default)]
struct ConsoleRenderer {
    redraws: usize,
}

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, frame: RenderFrame<'_>) -> std::result::Result<(), RenderError> {
        self.redraws += 1;
        tracing::debug!(
            "Redraw #{} of {}: {} trace(s), maxpoints {}",
            self.redraws,
            frame.plot,
            frame.bindings.len(),
            frame.maxpoints
        );
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        tracing::info!("Title: {}", title);
    }
}

impl Plot2DRenderer for ConsoleRenderer {
    fn set_xlabel(&mut self, label: &str, right: bool) {
        tracing::info!("X label ({}): {}", if right { "right" } else { "left" }, label);
    }

    fn set_ylabel(&mut self, label: &str, top: bool) {
        tracing::info!("Y label ({}): {}", if top { "top" } else { "bottom" }, label);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        // Open once so every event appends to the same handle.
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(Arc::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Foucault");
    }

    let settings = Rc::new(Settings::new());
    let mut registry = PlotRegistry::new(settings);

    let source = match &args.file {
        Some(path) => Rc::new(TableSource::from_file(path)?),
        None => Rc::new(TableSource::new("sine", 1, 1).with_labels(vec![
            ColumnLabel::with_unit("time", "s"),
            ColumnLabel::with_unit("signal", "V"),
        ])),
    };
    let shared: SharedSource = source.clone();

    let plot = Plot2D::new(
        &mut registry,
        Box::new(ConsoleRenderer::default()),
        PlotOptions::new()
            .min_interval(Duration::from_millis(args.mintime))
            .source(shared.clone()),
    )?;
    plot.borrow_mut().set_title("live sweep");
    plot.borrow_mut().set_labels(Labels2D::default());

    if args.file.is_none() {
        for index in 0..args.samples {
            let t = index as f64 * args.interval as f64 / 1000.0;
            source.push_row(&[t, (t * std::f64::consts::TAU).sin()])?;
            registry.notify_new_point(&shared);
            std::thread::sleep(Duration::from_millis(args.interval));
        }
    }
    registry.notify_new_block(&shared)?;

    // Final forced redraw so short runs still show the last samples.
    plot.borrow_mut().update(true, &RenderOptions::default())?;

    for name in registry.names() {
        println!(
            "{}: {} rows, {} trace(s)",
            name,
            source.row_count(),
            plot.borrow().bindings().len()
        );
    }

    Ok(())
}
