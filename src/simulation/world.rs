//! Simulation state holder and per-frame updater
//!
//! This is the entry point for stepping the highway animation without any
//! drawing surface or Bevy dependencies.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::collision::collides;
use super::config::HighwayConfig;
use super::particle::ParticleSystem;
use super::types::{LaneIndex, Position, VehicleId};
use super::vehicle::{LaneChangeStep, Vehicle};

/// The first collision between the designated pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Frame on which the overlap was detected
    pub frame: u64,
    /// Centre of the explosion
    pub impact: Position,
    pub vehicles: (VehicleId, VehicleId),
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub overtake_started: bool,
    pub lane_change_completed: Option<(VehicleId, LaneIndex)>,
    pub wrapped: Vec<VehicleId>,
    pub collision: Option<CollisionEvent>,
}

/// The simulated highway
#[derive(Debug, Clone)]
pub struct HighwayWorld {
    config: HighwayConfig,

    pub vehicles: Vec<Vehicle>,

    pub particles: ParticleSystem,

    /// Ticks simulated since the last reset, frozen once halted
    pub frame: u64,

    pub collision: Option<CollisionEvent>,

    seed: Option<u64>,

    /// Optional seeded RNG for reproducible explosions
    rng: Option<StdRng>,
}

impl HighwayWorld {
    fn new_internal(config: HighwayConfig, seed: Option<u64>) -> Result<Self> {
        config
            .validate()
            .context("invalid highway configuration")?;

        let mut world = Self {
            config,
            vehicles: Vec::new(),
            particles: ParticleSystem::new(),
            frame: 0,
            collision: None,
            seed,
            rng: None,
        };
        world.reset();
        Ok(world)
    }

    pub fn new(config: HighwayConfig) -> Result<Self> {
        Self::new_internal(config, None)
    }

    /// Create a world whose explosions are reproducible
    pub fn new_with_seed(config: HighwayConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, Some(seed))
    }

    pub fn config(&self) -> &HighwayConfig {
        &self.config
    }

    /// Restore the literal starting configuration
    pub fn reset(&mut self) {
        self.vehicles = self
            .config
            .vehicles
            .iter()
            .enumerate()
            .map(|(index, spec)| Vehicle::from_spec(VehicleId(index), spec, &self.config))
            .collect();
        self.particles.clear();
        self.frame = 0;
        self.collision = None;
        self.rng = self.seed.map(StdRng::seed_from_u64);
    }

    /// True once the designated pair has collided
    pub fn is_halted(&self) -> bool {
        self.collision.is_some()
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        if !self.is_halted() {
            self.update_vehicles(&mut report);
        }

        if !self.particles.is_empty() {
            self.particles.update(&self.config.explosion);
            if self.particles.is_empty() {
                debug!("Explosion particles expired at frame {}", self.frame);
            }
        }

        report
    }

    fn update_vehicles(&mut self, report: &mut TickReport) {
        self.frame += 1;

        let overtaker = self.config.overtaker.0;
        if self.frame > self.config.overtake_after_frames && !self.vehicles[overtaker].is_overtaking
        {
            let target = self.config.overtake_target_lane;
            self.vehicles[overtaker].begin_overtake(target);
            report.overtake_started = true;
            debug!(
                "{} starts overtaking into lane {} at frame {}",
                self.vehicles[overtaker].label, target.0, self.frame
            );
        }

        let (first, second) = self.config.collision_pair;

        for index in 0..self.vehicles.len() {
            let vehicle = &mut self.vehicles[index];
            vehicle.advance();

            if let LaneChangeStep::Arrived(lane) = vehicle.step_lane_change(&self.config) {
                debug!(
                    "{} settled into lane {} at frame {}",
                    vehicle.label, lane.0, self.frame
                );
                report.lane_change_completed = Some((vehicle.id, lane));
            }

            if index == first.0 && !self.is_halted() {
                self.check_collision(first, second, report);
            }

            let vehicle = &mut self.vehicles[index];
            if self.collision.is_none() && vehicle.wrap_around(self.config.canvas_width) {
                report.wrapped.push(vehicle.id);
            }
        }
    }

    fn check_collision(&mut self, first: VehicleId, second: VehicleId, report: &mut TickReport) {
        let a = &self.vehicles[first.0];
        let b = &self.vehicles[second.0];
        if !collides(a, b, self.config.collision_buffer) {
            return;
        }

        let impact = a.position().midpoint(&b.position());
        info!(
            "COLLISION DETECTED between {} and {} at frame {} ({:.1}, {:.1})",
            a.label, b.label, self.frame, impact.x, impact.y
        );

        for vehicle in &mut self.vehicles {
            vehicle.stop();
        }

        let explosion = &self.config.explosion;
        match &mut self.rng {
            Some(rng) => self.particles.spawn_explosion(impact, explosion, rng),
            None => self
                .particles
                .spawn_explosion(impact, explosion, &mut rand::rng()),
        }

        let event = CollisionEvent {
            frame: self.frame,
            impact,
            vehicles: (first, second),
        };
        self.collision = Some(event);
        report.collision = Some(event);
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Highway Simulation Summary ===");
        println!("Frame: {}", self.frame);
        match &self.collision {
            Some(event) => println!(
                "Collision: frame {} at ({:.1}, {:.1})",
                event.frame, event.impact.x, event.impact.y
            ),
            None => println!("Collision: none"),
        }
        println!("Particles: {}", self.particles.len());
        println!("--- Vehicles ---");
        for vehicle in &self.vehicles {
            println!(
                "  [{}] {}: position=({:.1}, {:.1}), speed={:.1}, lane={}{}",
                vehicle.id.0,
                vehicle.label,
                vehicle.x,
                vehicle.y,
                vehicle.speed,
                vehicle.lane.0,
                if vehicle.is_overtaking && vehicle.lane != vehicle.target_lane {
                    format!(" -> {}", vehicle.target_lane.0)
                } else {
                    String::new()
                }
            );
        }
    }

    /// Draw a visual map of the highway in the terminal
    pub fn draw_map(&self) {
        println!("\n=== Highway Map ===");
        let legend: Vec<String> = self
            .vehicles
            .iter()
            .map(|v| format!("{}={}", v.id.0, v.label))
            .collect();
        println!("Legend: {}, *=Particle, -=Lane divider, ==Road border", legend.join(", "));
        println!();
        print!("{}", self.render_map());
        println!();
    }

    /// Rasterise the world into a character grid, one cell per 10x20 pixels
    pub fn render_map(&self) -> String {
        const CELL_WIDTH: f32 = 10.0;
        const CELL_HEIGHT: f32 = 20.0;

        let width = (self.config.canvas_width / CELL_WIDTH).ceil() as usize;
        let height = (self.config.canvas_height / CELL_HEIGHT).ceil() as usize;
        let mut grid = vec![vec![' '; width]; height];

        let to_col = |x: f32| -> Option<usize> {
            let col = (x / CELL_WIDTH).floor();
            (col >= 0.0 && (col as usize) < width).then_some(col as usize)
        };
        let to_row = |y: f32| -> Option<usize> {
            let row = (y / CELL_HEIGHT).floor();
            (row >= 0.0 && (row as usize) < height).then_some(row as usize)
        };

        // Road surface
        let road_top = self.config.highway_y;
        let road_bottom = road_top + self.config.road_height();
        for (row_index, row) in grid.iter_mut().enumerate() {
            let cell_top = row_index as f32 * CELL_HEIGHT;
            if cell_top >= road_top && cell_top < road_bottom {
                row.fill('.');
            }
        }

        // Lane dividers, then borders on top
        for lane in 1..self.config.lane_count {
            let y = road_top + lane as f32 * self.config.lane_width;
            if let Some(row) = to_row(y) {
                for (col, cell) in grid[row].iter_mut().enumerate() {
                    if col % 4 < 2 {
                        *cell = '-';
                    }
                }
            }
        }
        for y in [road_top, road_bottom] {
            if let Some(row) = to_row(y.min(self.config.canvas_height - 1.0)) {
                grid[row].fill('=');
            }
        }

        // Vehicles
        for vehicle in &self.vehicles {
            let glyph = char::from_digit((vehicle.id.0 % 10) as u32, 10).unwrap_or('V');
            let first_col = to_col(vehicle.x.max(0.0));
            let right = vehicle.x + vehicle.width - 1.0;
            let last_col = to_col(right.min(self.config.canvas_width - 1.0));
            let row = to_row(vehicle.y + vehicle.height / 2.0);
            if let (Some(first_col), Some(last_col), Some(row)) = (first_col, last_col, row) {
                for cell in &mut grid[row][first_col..=last_col] {
                    *cell = glyph;
                }
            }
        }

        // Particles
        for particle in self.particles.particles() {
            let cell = (to_col(particle.position.x), to_row(particle.position.y));
            if let (Some(col), Some(row)) = cell {
                if !grid[row][col].is_ascii_digit() {
                    grid[row][col] = '*';
                }
            }
        }

        let mut map = String::with_capacity((width + 1) * height);
        for row in &grid {
            map.extend(row.iter());
            map.push('\n');
        }
        map
    }
}
