//! Replays a recorded pointer trace through the gesture recognizer and prints the recognized
//! gestures as JSON lines.
//!
//! ```text
//! tactile-replay <trace.json> [--config <gestures.toml>] [--offset <x>,<y>]
//! ```
mod trace;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::debug;

use tactile_geometry::Point;
use tactile_input::GestureConfig;

#[derive(Debug, Parser)]
#[command(about = "Replays a JSON pointer trace and prints the recognized gestures")]
struct Args {
    /// The recorded pointer trace.
    trace: PathBuf,
    /// TOML gesture configuration, defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Element offset subtracted from reported positions, as `<x>,<y>`.
    #[arg(
        short,
        long,
        value_parser = parse_offset,
        default_value = "0,0",
        allow_hyphen_values = true
    )]
    offset: Point,
}

fn parse_offset(value: &str) -> Result<Point> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("Offset `{value}` is not of the form <x>,<y>"))?;
    let x: f64 = x
        .trim()
        .parse()
        .with_context(|| format!("Invalid offset x `{x}`"))?;
    let y: f64 = y
        .trim()
        .parse()
        .with_context(|| format!("Invalid offset y `{y}`"))?;
    Ok(Point::new(x, y))
}

fn load_config(path: Option<&PathBuf>) -> Result<GestureConfig> {
    let Some(path) = path else {
        return Ok(GestureConfig::default());
    };
    let toml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read gesture configuration {}", path.display()))?;
    GestureConfig::from_toml(&toml).with_context(|| format!("In {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    debug!("{args:?}");

    let config = load_config(args.config.as_ref())?;
    let json = fs::read_to_string(&args.trace)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;
    let records = trace::parse_trace(&json)
        .with_context(|| format!("In {}", args.trace.display()))?;

    let events = trace::replay(&records, config, args.offset, Instant::now());

    let mut out = io::stdout().lock();
    for event in &events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_options() {
        let args = Args::try_parse_from([
            "tactile-replay",
            "trace.json",
            "--config",
            "g.toml",
            "--offset",
            "10, -4.5",
        ])
        .unwrap();
        assert_eq!(args.trace, PathBuf::from("trace.json"));
        assert_eq!(args.config, Some(PathBuf::from("g.toml")));
        assert_eq!(args.offset, Point::new(10.0, -4.5));
    }

    #[test]
    fn offset_defaults_to_the_origin() {
        let args = Args::try_parse_from(["tactile-replay", "t.json", "-o", "-3,2"]).unwrap();
        assert_eq!(args.offset, Point::new(-3.0, 2.0));
        let args = Args::try_parse_from(["tactile-replay", "t.json"]).unwrap();
        assert_eq!(args.offset, Point::ZERO);
        assert_eq!(args.config, None);
    }

    #[test]
    fn trace_is_required() {
        assert!(Args::try_parse_from(["tactile-replay", "--offset", "1,2"]).is_err());
        assert!(Args::try_parse_from(["tactile-replay", "a.json", "b.json"]).is_err());
        assert!(Args::try_parse_from(["tactile-replay", "a.json", "--verbose"]).is_err());
    }

    #[test]
    fn offset_must_have_two_components() {
        assert!(parse_offset("12").is_err());
        assert!(parse_offset("x,2").is_err());
        assert!(Args::try_parse_from(["tactile-replay", "a.json", "--offset", "12"]).is_err());
    }
}
