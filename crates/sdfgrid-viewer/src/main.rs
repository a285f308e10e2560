mod cli;
mod snapshot;
mod viewer;
mod zoom;

use anyhow::Result;
use clap::Parser;

use sdfgrid_engine::coords::Viewport;
use sdfgrid_engine::device::GpuInit;
use sdfgrid_engine::field::GridUniforms;
use sdfgrid_engine::logging::{init_logging, LoggingConfig};
use sdfgrid_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use cli::Args;
use viewer::GridViewer;
use zoom::ZoomConfig;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..Default::default()
    });

    let zoom = ZoomConfig {
        initial: args.scale,
        ..Default::default()
    };

    if let Some(path) = &args.snapshot {
        let viewport = Viewport::new(args.width as f32, args.height as f32);
        let pointer = args.pointer.unwrap_or_else(|| viewport.center());
        return snapshot::write_snapshot(path, &GridUniforms::new(viewport, pointer, zoom.initial));
    }

    let config = RuntimeConfig {
        title: args.title.clone(),
        initial_size: LogicalSize::new(args.width as f64, args.height as f64),
    };
    let gpu_init = GpuInit {
        vsync: args.vsync(),
        ..Default::default()
    };

    let viewer = Runtime::run(config, gpu_init, GridViewer::new(zoom))?;
    anyhow::ensure!(!viewer.failed(), "renderer stopped on a fatal error");
    Ok(())
}
