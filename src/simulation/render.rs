//! Render pass that paints the highway onto a drawing surface
//!
//! The renderer only reads [`HighwayWorld`]; it never mutates simulation
//! state. Hosts provide a [`Surface`] implementation. [`FrameRecorder`] is a
//! surface that keeps the draw calls as data for the headless host, the Bevy
//! UI and tests.

use super::types::{palette, Position, Rgba, LANE_DASH, PARTICLE_SIZE, WHEEL_SIZE, WINDOW_INSET};
use super::vehicle::Vehicle;
use super::world::HighwayWorld;

/// Banner drawn once the designated pair collides
pub const COLLISION_BANNER: &str = "COLLISION!";

/// Line drawn under the banner once the animation has ended
pub const ENDED_BANNER: &str = "SIMULATION ENDED";

/// Baseline of the collision banner
const BANNER_Y: f32 = 100.0;

/// Stroke parameters for a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f32,
    /// Dash pattern as (on, off) lengths, solid when `None`
    pub dash: Option<[f32; 2]>,
}

/// Font and paint parameters for centered text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub fill: Rgba,
    /// Outline color and width
    pub outline: Option<(Rgba, f32)>,
}

/// A 2D drawing surface in canvas pixels (origin top-left)
pub trait Surface {
    /// Called by [`render_frame`] before any drawing. Surfaces that retain
    /// draw calls clear the previous frame here.
    fn begin_frame(&mut self) {}

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    fn stroke_line(&mut self, from: Position, to: Position, style: LineStyle);

    /// Draw text horizontally centered on `anchor.x` with its baseline at `anchor.y`
    fn draw_text(&mut self, text: &str, anchor: Position, style: TextStyle);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Line {
        from: Position,
        to: Position,
        style: LineStyle,
    },
    Text {
        text: String,
        anchor: Position,
        style: TextStyle,
    },
}

/// Surface that records draw calls instead of rasterising them
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    commands: Vec<DrawCommand>,
    frames_recorded: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames painted onto this recorder
    pub fn frames_recorded(&self) -> u64 {
        self.frames_recorded
    }

    /// All text drawn in the current frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for FrameRecorder {
    fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames_recorded += 1;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: Position, to: Position, style: LineStyle) {
        self.commands.push(DrawCommand::Line { from, to, style });
    }

    fn draw_text(&mut self, text: &str, anchor: Position, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            style,
        });
    }
}

/// Paint one complete frame
pub fn render_frame<S: Surface + ?Sized>(world: &HighwayWorld, ended: bool, surface: &mut S) {
    surface.begin_frame();
    draw_highway(world, surface);

    for vehicle in &world.vehicles {
        draw_vehicle(vehicle, surface);
    }

    for particle in world.particles.particles() {
        surface.fill_rect(
            particle.position.x,
            particle.position.y,
            PARTICLE_SIZE,
            PARTICLE_SIZE,
            particle.color(),
        );
    }

    if world.is_halted() {
        draw_banners(world, ended, surface);
    }
}

fn draw_highway<S: Surface + ?Sized>(world: &HighwayWorld, surface: &mut S) {
    let config = world.config();
    let width = config.canvas_width;
    let road_top = config.highway_y;
    let road_bottom = road_top + config.road_height();

    surface.fill_rect(0.0, 0.0, width, config.canvas_height, palette::GRASS);
    surface.fill_rect(0.0, road_top, width, config.road_height(), palette::ASPHALT);

    let divider = LineStyle {
        color: palette::LANE_DIVIDER,
        width: 3.0,
        dash: Some(LANE_DASH),
    };
    for lane in 1..config.lane_count {
        let y = road_top + lane as f32 * config.lane_width;
        surface.stroke_line(Position::new(0.0, y), Position::new(width, y), divider);
    }

    let border = LineStyle {
        color: palette::ROAD_BORDER,
        width: 4.0,
        dash: None,
    };
    for y in [road_top, road_bottom] {
        surface.stroke_line(Position::new(0.0, y), Position::new(width, y), border);
    }
}

fn draw_vehicle<S: Surface + ?Sized>(vehicle: &Vehicle, surface: &mut S) {
    let (x, y, w, h) = (vehicle.x, vehicle.y, vehicle.width, vehicle.height);

    surface.fill_rect(x, y, w, h, vehicle.color);
    surface.fill_rect(
        x + WINDOW_INSET,
        y + WINDOW_INSET,
        w - 2.0 * WINDOW_INSET,
        h - 2.0 * WINDOW_INSET,
        palette::WINDOW,
    );

    // Wheels poke out above and below the body
    let near = x + 5.0;
    let far = x + w - 13.0;
    let wheels = [
        (near, y - 3.0),
        (far, y - 3.0),
        (near, y + h - 5.0),
        (far, y + h - 5.0),
    ];
    for (wheel_x, wheel_y) in wheels {
        surface.fill_rect(wheel_x, wheel_y, WHEEL_SIZE, WHEEL_SIZE, palette::WHEEL);
    }
}

fn draw_banners<S: Surface + ?Sized>(world: &HighwayWorld, ended: bool, surface: &mut S) {
    let center_x = world.config().canvas_width / 2.0;

    surface.draw_text(
        COLLISION_BANNER,
        Position::new(center_x, BANNER_Y),
        TextStyle {
            size: 48.0,
            bold: true,
            fill: palette::COLLISION_TEXT,
            outline: Some((Rgba::WHITE, 2.0)),
        },
    );

    if ended {
        surface.draw_text(
            ENDED_BANNER,
            Position::new(center_x, BANNER_Y + 36.0),
            TextStyle {
                size: 24.0,
                bold: true,
                fill: Rgba::WHITE,
                outline: None,
            },
        );
    }
}
