//! Per-frame update validation
//!
//! These tests step `HighwayWorld` directly, without a drawing surface.

use highway_sim::simulation::{
    collides, Aabb, CollisionBuffer, HighwayConfig, HighwayWorld, LaneIndex, Rgba, Variant,
    VehicleId, palette,
};

const SEED: u64 = 7;

fn world(variant: Variant) -> HighwayWorld {
    HighwayWorld::new_with_seed(variant.config(), SEED).expect("preset should be valid")
}

/// Tick until the designated pair collides, returning the collision frame
fn run_until_collision(world: &mut HighwayWorld, max_ticks: u64) -> u64 {
    for _ in 0..max_ticks {
        if let Some(event) = world.tick().collision {
            return event.frame;
        }
    }
    panic!("no collision within {max_ticks} ticks");
}

/// Frame on which the overtaker settles into its target lane
fn expected_snap_frame(config: &HighwayConfig) -> u64 {
    let overtaker = &config.vehicles[config.overtaker.0];
    let start_y = config.lane_center_y(overtaker.lane, overtaker.height);
    let target_y = config.lane_center_y(config.overtake_target_lane, overtaker.height);
    let moves = ((start_y - target_y).abs() / config.lane_change_step).ceil() as u64 - 1;
    config.overtake_after_frames + 1 + moves
}

#[test]
fn test_initial_vehicles_rest_on_lane_centers() {
    let world = world(Variant::Classic);

    let ys: Vec<f32> = world.vehicles.iter().map(|v| v.y).collect();
    assert_eq!(ys, vec![310.0, 435.0, 195.0]);
    assert_eq!(world.frame, 0);
    assert!(world.collision.is_none());
    assert!(world.particles.is_empty());
}

#[test]
fn test_vehicles_advance_by_speed_before_collision() {
    let mut world = world(Variant::Classic);

    for _ in 0..1000 {
        let before = world.vehicles.clone();
        let report = world.tick();
        assert!(report.collision.is_none());

        for (old, new) in before.iter().zip(&world.vehicles) {
            if report.wrapped.contains(&new.id) {
                assert_eq!(new.x, -new.width, "{} should re-enter at the left edge", new.label);
            } else {
                assert_eq!(new.x, old.x + old.speed, "{} moved by the wrong amount", new.label);
            }
        }
    }
}

#[test]
fn test_overtake_starts_after_threshold() {
    let mut world = world(Variant::Classic);

    for _ in 0..120 {
        assert!(!world.tick().overtake_started);
    }
    assert!(!world.vehicles[1].is_overtaking);
    assert_eq!(world.vehicles[1].y, 435.0);

    let report = world.tick();
    assert!(report.overtake_started);
    assert!(world.vehicles[1].is_overtaking);
    assert_eq!(world.vehicles[1].target_lane, LaneIndex(0));
    // The first step happens on the same frame
    assert_eq!(world.vehicles[1].y, 432.0);
    assert_eq!(world.vehicles[1].lane, LaneIndex(2));
}

#[test]
fn test_lane_change_converges_on_exact_center() {
    for variant in Variant::ALL {
        let config = variant.config();
        let snap_frame = expected_snap_frame(&config);
        let overtaker = config.overtaker;
        let target_y = config.lane_center_y(
            config.overtake_target_lane,
            config.vehicles[overtaker.0].height,
        );
        let mut world = world(variant);

        while world.frame < snap_frame - 1 {
            let report = world.tick();
            assert!(report.lane_change_completed.is_none(), "{variant}: settled early");
        }
        assert_ne!(world.vehicles[overtaker.0].y, target_y);
        assert_eq!(world.vehicles[overtaker.0].lane, config.vehicles[overtaker.0].lane);

        let report = world.tick();
        assert_eq!(world.frame, snap_frame);
        assert_eq!(
            report.lane_change_completed,
            Some((overtaker, config.overtake_target_lane)),
            "{variant}: lane should update on the snap frame"
        );
        assert_eq!(world.vehicles[overtaker.0].y, target_y);

        // Stays put afterwards
        let report = world.tick();
        assert!(report.lane_change_completed.is_none());
        assert_eq!(world.vehicles[overtaker.0].y, target_y);
    }
}

#[test]
fn test_snap_frames_per_preset() {
    assert_eq!(expected_snap_frame(&HighwayConfig::classic()), 200);
    assert_eq!(expected_snap_frame(&HighwayConfig::widescreen()), 120);
    assert_eq!(expected_snap_frame(&HighwayConfig::rush()), 170);
}

#[test]
fn test_collision_is_symmetric() {
    let world = world(Variant::Classic);
    let mut a = world.vehicles[1].clone();
    let mut b = world.vehicles[2].clone();
    let buffers = [
        CollisionBuffer::TrimFarEdges(5.0),
        CollisionBuffer::Expand(2.0),
        CollisionBuffer::TrimFarEdges(0.0),
    ];

    for dx in [-60.0, -52.5, -45.0, -44.0, 0.0, 30.0, 44.0, 45.0, 53.0, 55.0, 80.0] {
        for dy in [-40.0, -27.0, -25.0, 0.0, 24.0, 25.0, 26.0, 40.0] {
            a.x = 400.0;
            a.y = 200.0;
            b.x = 400.0 + dx;
            b.y = 200.0 + dy;
            for buffer in buffers {
                assert_eq!(
                    collides(&a, &b, buffer),
                    collides(&b, &a, buffer),
                    "asymmetric at dx={dx} dy={dy} {buffer:?}"
                );
            }
        }
    }
}

#[test]
fn test_trim_buffer_shrinks_boxes() {
    let world = world(Variant::Classic);
    let mut a = world.vehicles[1].clone();
    let mut b = world.vehicles[2].clone();
    a.x = 100.0;
    a.y = 195.0;
    b.y = 195.0;

    b.x = 145.0;
    assert!(!collides(&a, &b, CollisionBuffer::TrimFarEdges(5.0)));
    assert!(collides(&a, &b, CollisionBuffer::TrimFarEdges(0.0)));

    b.x = 144.5;
    assert!(collides(&a, &b, CollisionBuffer::TrimFarEdges(5.0)));
}

#[test]
fn test_expand_buffer_grows_boxes() {
    let world = world(Variant::Classic);
    let mut a = world.vehicles[1].clone();
    let mut b = world.vehicles[2].clone();
    a.x = 100.0;
    a.y = 195.0;
    b.y = 195.0;

    b.x = 154.0;
    assert!(!collides(&a, &b, CollisionBuffer::Expand(2.0)));

    b.x = 153.5;
    assert!(collides(&a, &b, CollisionBuffer::Expand(2.0)));
    assert!(!collides(&a, &b, CollisionBuffer::TrimFarEdges(0.0)));
}

#[test]
fn test_aabb_touching_edges_do_not_overlap() {
    let left = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
    let right = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
    assert!(!left.overlaps(&right));
    assert!(left.expand_by(0.5).overlaps(&right));
}

#[test]
fn test_widescreen_collides_when_gap_closes() {
    let mut world = world(Variant::Widescreen);

    // Lane change finishes on frame 120. Car 1 sits at 150 + 4t while Car 2,
    // not yet moved this frame, sits at 500 + 2.5(t - 1). With both boxes
    // grown by 2px they overlap once 207 + 4t > 495.5 + 2.5t, i.e. t = 193.
    assert_eq!(run_until_collision(&mut world, 1000), 193);

    let event = world.collision.expect("collision recorded");
    assert_eq!(event.vehicles, (VehicleId(1), VehicleId(2)));
    assert_eq!(event.impact.x, (922.0 + 980.0) / 2.0);
    assert_eq!(event.impact.y, 195.0);
}

#[test]
fn test_rush_collides_when_gap_closes() {
    let mut world = world(Variant::Rush);

    // Lane change finishes on frame 170. Car 1 at 100 + 3.5t, trimmed right
    // edge at 147 + 3.5t, meets Car 2 at 420 + 2(t - 1) once t > 180.67.
    assert_eq!(run_until_collision(&mut world, 1000), 181);

    let event = world.collision.expect("collision recorded");
    assert_eq!(event.impact.x, (733.5 + 780.0) / 2.0);
    assert_eq!(event.impact.y, 186.0);
}

#[test]
fn test_classic_collides_after_wrap_around() {
    let mut world = world(Variant::Classic);

    // Car 1 passes Car 2 mid lane change, so the pair only meets after both
    // have wrapped around the canvas.
    assert_eq!(run_until_collision(&mut world, 5000), 1137);

    let event = world.collision.expect("collision recorded");
    assert_eq!(event.impact.x, (940.5 + 985.0) / 2.0);
    assert_eq!(event.impact.y, 195.0);
}

#[test]
fn test_no_collision_before_expected_frame() {
    for (variant, expected) in [
        (Variant::Classic, 1137),
        (Variant::Widescreen, 193),
        (Variant::Rush, 181),
    ] {
        let mut world = world(variant);
        for _ in 0..expected - 1 {
            world.tick();
        }
        assert!(world.collision.is_none(), "{variant}: collided early");
        assert!(world.tick().collision.is_some(), "{variant}: missed collision");
    }
}

#[test]
fn test_vehicles_halt_after_collision() {
    let mut world = world(Variant::Widescreen);
    let frame = run_until_collision(&mut world, 1000);

    let frozen: Vec<(f32, f32)> = world.vehicles.iter().map(|v| (v.x, v.y)).collect();
    for _ in 0..200 {
        world.tick();
        assert!(world.vehicles.iter().all(|v| v.speed == 0.0));
        let now: Vec<(f32, f32)> = world.vehicles.iter().map(|v| (v.x, v.y)).collect();
        assert_eq!(now, frozen);
        assert_eq!(world.frame, frame, "clock should freeze once halted");
    }
}

#[test]
fn test_particles_decay_to_zero() {
    for variant in Variant::ALL {
        let config = variant.config();
        let mut world = world(variant);
        run_until_collision(&mut world, 5000);

        assert_eq!(world.particles.len(), config.explosion.particle_count);
        assert!(world.particles.particles().iter().all(|p| p.life > 0.0 && p.life < 1.0));

        let max_ticks = (1.0 / config.explosion.decay).ceil() as usize + 1;
        let mut previous = world.particles.len();
        let mut ticks = 0;
        while !world.particles.is_empty() {
            world.tick();
            assert!(world.particles.len() <= previous, "{variant}: particle count grew");
            previous = world.particles.len();
            ticks += 1;
            assert!(ticks <= max_ticks, "{variant}: particles outlived their decay");
        }
    }
}

#[test]
fn test_damping_slows_particles() {
    let mut world = world(Variant::Widescreen);
    run_until_collision(&mut world, 1000);

    let before: Vec<f32> = world.particles.particles().iter().map(|p| p.vx.abs()).collect();
    world.tick();
    let after: Vec<f32> = world.particles.particles().iter().map(|p| p.vx.abs()).collect();
    for (old, new) in before.iter().zip(&after) {
        assert!((new - old * 0.95).abs() < 1e-4);
    }
}

#[test]
fn test_explosion_spawns_around_impact() {
    let config = HighwayConfig::classic();
    let mut world = world(Variant::Classic);
    run_until_collision(&mut world, 5000);
    let impact = world.collision.expect("collision recorded").impact;

    // One update has already run on the collision frame
    let half_v = config.explosion.velocity_range / 2.0;
    for particle in world.particles.particles() {
        assert!((particle.position.x - impact.x).abs() <= config.explosion.spread_x / 2.0 + half_v);
        assert!((particle.position.y - impact.y).abs() <= config.explosion.spread_y / 2.0 + half_v);
        assert!(particle.vx.abs() <= half_v && particle.vy.abs() <= half_v);
    }
}

#[test]
fn test_seeded_explosions_are_reproducible() {
    let mut first = world(Variant::Rush);
    let mut second = world(Variant::Rush);
    run_until_collision(&mut first, 1000);
    run_until_collision(&mut second, 1000);

    assert_eq!(first.particles.particles(), second.particles.particles());
}

#[test]
fn test_reset_restores_literal_configuration() {
    let pristine = world(Variant::Widescreen);
    let mut world = world(Variant::Widescreen);
    run_until_collision(&mut world, 1000);
    world.tick();

    world.reset();

    assert_eq!(world.vehicles, pristine.vehicles);
    assert_eq!(world.frame, 0);
    assert!(world.collision.is_none());
    assert!(world.particles.is_empty());
    assert!(!world.is_halted());

    // And the replay is identical, explosion included
    let mut replay = pristine.clone();
    run_until_collision(&mut replay, 1000);
    run_until_collision(&mut world, 1000);
    assert_eq!(world.particles.particles(), replay.particles.particles());
}

#[test]
fn test_render_map_shows_vehicles() {
    let world = world(Variant::Classic);
    let map = world.render_map();
    let rows: Vec<&str> = map.lines().collect();

    assert_eq!(rows.len(), 30);
    assert!(rows.iter().all(|row| row.chars().count() == 100));
    for glyph in ['0', '1', '2'] {
        assert!(map.contains(glyph), "missing vehicle {glyph}");
    }
    assert!(rows[7].chars().all(|c| c == '='), "top road border");
}

#[test]
fn test_invalid_configs_are_rejected() {
    let mut config = HighwayConfig::classic();
    config.overtaker = VehicleId(5);
    assert!(HighwayWorld::new(config).is_err());

    let mut config = HighwayConfig::classic();
    config.collision_pair = (VehicleId(1), VehicleId(1));
    assert!(HighwayWorld::new(config).is_err());

    let mut config = HighwayConfig::classic();
    config.explosion.decay = 0.0;
    assert!(HighwayWorld::new(config).is_err());

    let mut config = HighwayConfig::classic();
    config.lane_count = 4;
    let err = HighwayWorld::new(config).expect_err("roadway no longer fits");
    assert!(format!("{err:#}").contains("does not fit"));

    let mut config = HighwayConfig::classic();
    config.vehicles.clear();
    assert!(config.validate().is_err());

    for variant in Variant::ALL {
        assert!(variant.config().validate().is_ok(), "{variant} preset invalid");
    }
}

#[test]
fn test_variant_parsing() {
    assert_eq!("classic".parse::<Variant>().unwrap(), Variant::Classic);
    assert_eq!("Widescreen".parse::<Variant>().unwrap(), Variant::Widescreen);
    assert_eq!("rush".parse::<Variant>().unwrap(), Variant::Rush);
    assert!("sedan".parse::<Variant>().is_err());
    assert_eq!(Variant::Rush.to_string(), "rush");
}

#[test]
fn test_color_hex_parsing() {
    assert_eq!(Rgba::from_hex("#3B82F6").unwrap(), palette::TRUCK_BLUE);
    assert_eq!(palette::CAR_RED.to_hex(), "#EF4444");
    assert!(Rgba::from_hex("#12345").is_err());
    assert!(Rgba::from_hex("#GG0000").is_err());
}
