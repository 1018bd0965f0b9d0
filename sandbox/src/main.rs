use anyhow::{Context, Result};
use cgmath::EuclideanSpace;
use log::{error, info};
use scene_buffers::geometry::alias::Point;
use scene_buffers::scene::scene_assembler::TickStatus;
use scene_buffers::scene::scene_description::SceneDescription;
use scene_buffers::scene::simulation::BouncingSphere;
use scene_buffers::{Engine, SCENE_SHADER};
use std::env;
use std::time::Duration;

const DEFAULT_TICKS_COUNT: usize = 600;
const TICK_DURATION: Duration = Duration::from_micros(16_667);

const BOUNCING_SPHERE_INDEX: usize = 0;
const FLOOR_HEIGHT: f32 = 0.0;
const LAUNCH_SPEED: f32 = 6.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(Engine::get_reasonable_log_filter())).init();

    let ticks_count = match env::args().nth(1) {
        Some(argument) => argument.parse::<usize>().with_context(|| format!("ticks count expected, got '{argument}'"))?,
        None => DEFAULT_TICKS_COUNT,
    };

    let scene = SceneDescription::demo();
    let mut engine = pollster::block_on(Engine::new_headless(SCENE_SHADER, &scene))
        .context("engine instantiation failed")?;
    info!("static blocks bound at slots {:?}", engine.bound_slots());

    let mut simulation = BouncingSphere::new(BOUNCING_SPHERE_INDEX, Point::origin(), FLOOR_HEIGHT, LAUNCH_SPEED);

    let mut rejected_ticks = 0;
    for _ in 0..ticks_count {
        if let TickStatus::Rejected(_) = engine.tick(&mut simulation, TICK_DURATION) {
            rejected_ticks += 1;
        }
    }

    if rejected_ticks > 0 {
        error!("{} of {} ticks were rejected", rejected_ticks, ticks_count);
    }
    info!(
        "done: {} ticks over {} spheres, bouncing sphere at {:?}",
        ticks_count, engine.spheres_count(), simulation.position(),
    );

    Ok(())
}
