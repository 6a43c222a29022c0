//! Headless playback of a rigged sample: poses a few keyframes, plays the
//! clip at a fixed frame rate and logs the composed world positions.
//!
//! Usage: cargo run --release --bin rig_playback -- [OPTIONS]
//!
//! Options:
//!   --sample <ID>       Sample model: robot, dog or car (default: robot)
//!   --project <PATH>    Load a saved project instead of a sample
//!   --config <PATH>     Studio config JSON
//!   --fps <N>           Simulated frame rate (default: 30)
//!   --seconds <S>       Simulated wall time (default: 5)
//!   --loop <MODE>       once, loop or ping_pong (default: from config)
//!   --save <PATH>       Write the project JSON when done

use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;

use voxrig::animation::{InterpolationMode, LoopMode, PartTransform};
use voxrig::core::time::FrameTimer;
use voxrig::core::{logging, Result};
use voxrig::rig::Part;
use voxrig::studio::{StudioConfig, StudioState};

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let sample = parse_str_arg(&args, "--sample").unwrap_or_else(|| "robot".to_string());
    let fps = parse_f32_arg(&args, "--fps").unwrap_or(30.0).max(1.0);
    let seconds = parse_f32_arg(&args, "--seconds").unwrap_or(5.0).max(0.0);

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => StudioConfig::load_sync(&PathBuf::from(path))?,
        None => StudioConfig::default(),
    };
    let mut studio = StudioState::new(config);

    if let Some(path) = parse_str_arg(&args, "--project") {
        studio.load_project(&PathBuf::from(path))?;
    } else if studio.load_sample(&sample) {
        block_out_motion(&mut studio)?;
    } else {
        log::error!("No sample named '{}'", sample);
        std::process::exit(1);
    }

    if let Some(mode) = parse_str_arg(&args, "--loop") {
        let mode: LoopMode = serde_json::from_value(serde_json::Value::String(mode))?;
        studio.set_loop_mode(mode);
    }

    log::info!(
        "Playing {} keyframes on {} active parts ({:?}, {} fps, {}s)",
        studio.timeline().len(),
        studio.topology().active_count(),
        studio.cursor().loop_mode,
        fps,
        seconds
    );

    let mut timer = FrameTimer::new();
    let frame_length = Duration::from_secs_f32(1.0 / fps);
    let frames = (seconds * fps).round() as u64;

    studio.seek(0.0);
    studio.play();
    for _ in 0..frames {
        timer.record(frame_length);
        let output = studio.tick(timer.delta_secs());

        if timer.frame_count() % fps as u64 == 0 {
            let head = output.world.position(Part::Head).unwrap_or(Vec3::ZERO);
            log::info!(
                "t={:.3} exposure={:.2} head=({:.2}, {:.2}, {:.2})",
                output.frame.time,
                output.frame.environment.exposure,
                head.x,
                head.y,
                head.z
            );
        }
        if !studio.cursor().playing {
            break;
        }
    }

    let output = studio.frame();
    let positions: serde_json::Map<String, serde_json::Value> = output
        .world
        .iter()
        .map(|(part, m)| {
            let p = m.w_axis.truncate();
            (part.to_string(), serde_json::json!([p.x, p.y, p.z]))
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&positions)?);

    if let Some(path) = parse_str_arg(&args, "--save") {
        studio.save_project(&PathBuf::from(path))?;
    }

    Ok(())
}

/// A short wave: two posed keyframes plus a brighter environment at the end.
fn block_out_motion(studio: &mut StudioState) -> Result<()> {
    let arm = if studio.topology().is_active(Part::ArmR) {
        Part::ArmR
    } else {
        Part::Body
    };

    studio.set_auto_keyframe(true);

    studio.seek(0.5);
    studio.pose_part(arm, PartTransform::from_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2)))?;
    studio.set_interpolation_mode(InterpolationMode::Bezier);

    studio.update_environment(|env| env.exposure = 2.0);
    studio.seek(1.0);
    studio.pose_part(Part::Root, PartTransform::from_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)))?;

    Ok(())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
