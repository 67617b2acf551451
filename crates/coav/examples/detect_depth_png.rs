//! Run the polar-histogram detector on a 16-bit depth PNG and feed the result
//! to the stop-and-hold strategy.
//!
//! ```text
//! cargo run -p coav --example detect_depth_png -- depth.png [config.json]
//! ```

use std::{env, path::PathBuf, time::Instant};

use coav::avoidance::{StopAvoidance, Vehicle};
use coav::config::DetectConfig;
use coav::{io, CollisionAvoidanceStrategy, Detector};
use log::LevelFilter;

struct PrintVehicle;

impl Vehicle for PrintVehicle {
    fn brake(&mut self) {
        println!("vehicle: brake");
    }

    fn release(&mut self) {
        println!("vehicle: release");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    coav::core::init_with_level(LevelFilter::Info)?;

    let mut args = env::args().skip(1);
    let image_path = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: detect_depth_png <depth.png> [config.json]")?;
    let config = match args.next() {
        Some(path) => DetectConfig::load(path)?,
        None => DetectConfig::default(),
    };

    let frame = io::load_depth_png(&image_path, &config.camera)?;
    let mut detector = config.polar_hist_detector()?;
    let mut strategy = StopAvoidance::new(PrintVehicle);

    let t0 = Instant::now();
    let obstacles = detector.detect(&frame);
    let elapsed = t0.elapsed();

    println!(
        "{}x{} frame, {} obstacle(s) in {:.3} ms",
        frame.width,
        frame.height,
        obstacles.len(),
        elapsed.as_secs_f64() * 1e3
    );
    for o in obstacles {
        println!(
            "  range {:.2}  azimuth [{:.1}, {:.1}] deg  ahead: {}",
            o.distance(),
            o.bounding_box.brf.theta.to_degrees(),
            o.bounding_box.tlc.theta.to_degrees(),
            strategy.blocks_path(o)
        );
    }

    strategy.avoid(obstacles);
    println!("state: {:?}", strategy.state());
    Ok(())
}
