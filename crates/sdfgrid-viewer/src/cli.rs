use std::path::PathBuf;

use clap::Parser;
use sdfgrid_engine::coords::Vec2;

/// Upper bound for --width and --height.
const MAX_DIMENSION: i64 = 16384;

/// Infinite procedural grid with a pointer-tracking cell highlight.
#[derive(Debug, Parser)]
#[command(name = "sdfgrid", version, about)]
pub struct Args {
    /// Window width (logical px), or image width for --snapshot (physical px).
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION))]
    pub width: u32,

    /// Window height (logical px), or image height for --snapshot (physical px).
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION))]
    pub height: u32,

    /// Initial grid scale; larger values show more, smaller cells.
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale: f32,

    #[arg(long, default_value = "sdfgrid")]
    pub title: String,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Wait for vertical blank when presenting (default).
    #[arg(long, overrides_with = "no_vsync")]
    pub vsync: bool,

    /// Present as fast as the surface allows.
    #[arg(long, overrides_with = "vsync")]
    pub no_vsync: bool,

    /// Render one frame headlessly to this PNG file and exit.
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,

    /// Pointer position for --snapshot, physical px from the bottom-left corner.
    /// Defaults to the image centre.
    #[arg(long, value_name = "X,Y", value_parser = parse_pointer, requires = "snapshot")]
    pub pointer: Option<Vec2>,
}

impl Args {
    pub fn vsync(&self) -> bool {
        !self.no_vsync
    }
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let v: f32 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err("scale must be a finite number > 0".to_string())
    }
}

fn parse_pointer(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| "expected X,Y".to_string())?;

    let coord = |v: &str| -> Result<f32, String> {
        let v: f32 = v.trim().parse().map_err(|e| format!("{e}"))?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err("pointer coordinates must be finite".to_string())
        }
    };

    Ok(Vec2::new(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("sdfgrid").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let a = parse(&[]).unwrap();
        assert_eq!((a.width, a.height), (800, 600));
        assert_eq!(a.scale, 1.0);
        assert!(a.vsync());
        assert!(a.snapshot.is_none());
    }

    #[test]
    fn last_vsync_flag_wins() {
        assert!(!parse(&["--vsync", "--no-vsync"]).unwrap().vsync());
        assert!(parse(&["--no-vsync", "--vsync"]).unwrap().vsync());
    }

    #[test]
    fn scale_must_be_positive() {
        assert!(parse(&["--scale", "0"]).is_err());
        assert!(parse(&["--scale", "-2"]).is_err());
        assert!(parse(&["--scale", "inf"]).is_err());
        assert_eq!(parse(&["--scale", "2.5"]).unwrap().scale, 2.5);
    }

    #[test]
    fn size_must_be_in_range() {
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--width", "65536"]).is_err());
        assert!(parse(&["--height", "16385"]).is_err());
        assert_eq!(parse(&["--height", "16384"]).unwrap().height, 16384);
    }

    #[test]
    fn pointer_parses_and_requires_snapshot() {
        let a = parse(&["--snapshot", "out.png", "--pointer", "400, 300"]).unwrap();
        assert_eq!(a.pointer, Some(Vec2::new(400.0, 300.0)));
        assert!(parse(&["--pointer", "1,2"]).is_err());
        assert!(parse_pointer("12").is_err());
        assert!(parse_pointer("1,nan").is_err());
    }
}
