//! Scene hierarchy demo
//!
//! Builds a small solar system through the hierarchy API, forcing a few
//! relocations along the way, then propagates world transforms with a
//! pre-order scan of each node's contiguous children range.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

use scene_engine::foundation::logging;
use scene_engine::foundation::math::translation_of;
use scene_engine::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene construction failed: {0}")]
    Arena(#[from] ArenaError),

    #[error("Scene is malformed: {0}")]
    Invariant(#[from] InvariantViolation),
}

fn load_config() -> Result<SceneConfig, DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load_from_file(&path)?,
        None => SceneConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn build_solar_system(scene: &mut HierarchyStore) -> Result<(), DemoError> {
    let sun = scene.add_root(
        SceneObject::new()
            .with_uniform_scale(2.0)
            .with_color(Color::rgb(1.0, 0.8, 0.2))
            .with_motion(Vec3::zeros(), Vec3::new(0.0, 0.1, 0.0)),
    )?;

    let first_planet = scene.add_children(
        sun,
        [
            SceneObject::new().with_position(Vec3::new(3.0, 0.0, 0.0)),
            SceneObject::new().with_position(Vec3::new(5.0, 0.0, 0.0)),
        ],
    )?;
    log::info!("Inner planets start at {}", first_planet);

    // A second root right after the planets blocks in-place growth.
    let comet = scene.add_root(
        SceneObject::new()
            .with_position(Vec3::new(-20.0, 4.0, 0.0))
            .with_motion(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros()),
    )?;

    let second_planet = scene[sun].children_end().unwrap_or(first_planet);
    scene.add_child(
        second_planet,
        SceneObject::new().with_position(Vec3::new(0.5, 0.0, 0.0)),
    )?;

    // Tilted so its moons orbit off the ecliptic.
    let outer = scene.add_child(
        sun,
        SceneObject::new()
            .with_position(Vec3::new(9.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.4, 0.0, 0.0)),
    )?;
    log::info!("Outer planet landed at {} after relocation", outer);

    scene.add_children(
        outer,
        (1..=3).map(|i| {
            SceneObject::new()
                .with_position(Vec3::new(0.0, 0.0, i as f32))
                .with_uniform_scale(0.25)
        }),
    )?;
    scene.add_child(comet, SceneObject::new().with_color(Color::WHITE))?;
    Ok(())
}

fn propagate(scene: &mut HierarchyStore, index: usize, parent_world: &Mat4) {
    let world = parent_world * scene.payload(index).local_matrix();
    scene.payload_mut(index).world = world;
    if let Some(range) = scene[index].children_range() {
        for child in range {
            propagate(scene, child, &world);
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init_with_level(&config.logging.level);
    log::info!("Scene demo starting with {:?}", config.arena);

    let mut scene = HierarchyStore::from_config(&config.arena);
    build_solar_system(&mut scene)?;
    scene.validate()?;

    let roots: Vec<usize> = scene.roots().collect();
    for root in roots {
        propagate(&mut scene, root, &Mat4::identity());
    }

    for (index, depth, node) in scene.walk_all() {
        let position = translation_of(&node.payload().world);
        println!(
            "{:indent$}[{:>3}] world ({:>6.2}, {:>6.2}, {:>6.2}) children {}",
            "",
            index,
            position.x,
            position.y,
            position.z,
            node.child_count(),
            indent = depth * 2
        );
    }

    let stats = scene.stats();
    log::info!(
        "{} nodes in {} slots; {} relocations moved {} nodes with {} parent fix-ups",
        scene.len(),
        scene.capacity(),
        stats.relocations,
        stats.relocated_nodes,
        stats.parent_fixups
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("scene_demo: {}", e);
        std::process::exit(1);
    }
}
