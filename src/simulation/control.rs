//! Start / pause / reset control of the animation loop
//!
//! The controller owns the world and decides whether the host should deliver
//! another frame. Hosts call [`AnimationController::on_frame`] once per
//! requested frame and feed wall-clock time to
//! [`AnimationController::advance_timers`] for the delayed end transition.

use std::time::Duration;

use anyhow::Result;
use log::{debug, info, trace};

use super::config::HighwayConfig;
use super::render::{render_frame, Surface};
use super::world::{HighwayWorld, TickReport};

/// Lifecycle of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Freshly reset, nothing animated yet
    #[default]
    Idle,
    Running,
    Paused,
    /// The designated pair collided; frames continue while particles live
    Collided,
    /// Terminal state reached after the end delay; only reset leaves it
    Ended,
}

/// Identifies one scheduled end transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct EndTimer {
    token: TimerToken,
    remaining: Duration,
}

/// What a call to [`AnimationController::on_frame`] did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No frame was requested, nothing happened
    NotRequested,
    /// The drawing surface was missing; the frame was skipped and stays requested
    SurfaceUnavailable,
    /// One update and render pass ran
    Rendered(TickReport),
}

/// Drives a [`HighwayWorld`] through the control state machine
#[derive(Debug, Clone)]
pub struct AnimationController {
    world: HighwayWorld,
    state: AnimationState,
    frame_requested: bool,
    end_timer: Option<EndTimer>,
    /// Bumped on every schedule and reset so stale tokens can be told apart
    timer_generation: u64,
}

impl AnimationController {
    /// Wrap `world`, rewound to its starting configuration
    pub fn new(mut world: HighwayWorld) -> Self {
        world.reset();
        Self {
            world,
            state: AnimationState::Idle,
            frame_requested: false,
            end_timer: None,
            timer_generation: 0,
        }
    }

    /// Build a controller around a fresh world for `config`
    pub fn from_config(config: HighwayConfig, seed: Option<u64>) -> Result<Self> {
        let world = match seed {
            Some(seed) => HighwayWorld::new_with_seed(config, seed)?,
            None => HighwayWorld::new(config)?,
        };
        Ok(Self::new(world))
    }

    pub fn world(&self) -> &HighwayWorld {
        &self.world
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether the host should deliver another frame
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Time left before the end transition, if one is scheduled
    pub fn pending_end(&self) -> Option<Duration> {
        self.end_timer.map(|timer| timer.remaining)
    }

    /// The Play/Pause control is disabled once a collision has happened
    pub fn can_toggle_play(&self) -> bool {
        !matches!(self.state, AnimationState::Collided | AnimationState::Ended)
    }

    pub fn play_label(&self) -> &'static str {
        if self.state == AnimationState::Running {
            "Pause"
        } else {
            "Play"
        }
    }

    /// Idle/Paused -> Running. No-op in any other state.
    pub fn start(&mut self) {
        match self.state {
            AnimationState::Idle | AnimationState::Paused => {
                debug!("Animation {:?} -> Running", self.state);
                self.state = AnimationState::Running;
                self.frame_requested = true;
            }
            state => debug!("Ignoring start while {state:?}"),
        }
    }

    /// Running -> Paused, withdrawing the pending frame request
    pub fn pause(&mut self) {
        if self.state == AnimationState::Running {
            debug!("Animation Running -> Paused at frame {}", self.world.frame);
            self.state = AnimationState::Paused;
            self.frame_requested = false;
        }
    }

    /// Play/Pause button behaviour
    pub fn toggle(&mut self) {
        if self.state == AnimationState::Running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Any state -> Idle: rebuild the world, cancel the frame request and any
    /// pending end transition, then paint the initial scene once.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: Option<&mut S>) {
        debug!("Animation {:?} -> Idle (reset)", self.state);
        self.world.reset();
        self.state = AnimationState::Idle;
        self.frame_requested = false;
        self.cancel_end_timer();

        if let Some(surface) = surface {
            render_frame(&self.world, false, surface);
        }
    }

    /// Run one update and render pass if a frame was requested
    pub fn on_frame<S: Surface + ?Sized>(&mut self, surface: Option<&mut S>) -> FrameOutcome {
        if !self.frame_requested {
            return FrameOutcome::NotRequested;
        }

        let Some(surface) = surface else {
            trace!("No drawing surface, skipping frame");
            return FrameOutcome::SurfaceUnavailable;
        };

        let report = self.world.tick();

        if let Some(event) = report.collision {
            if self.state == AnimationState::Running {
                debug!("Animation Running -> Collided at frame {}", event.frame);
                self.state = AnimationState::Collided;
                self.schedule_end_timer();
            }
        }

        render_frame(&self.world, self.state == AnimationState::Ended, surface);

        self.frame_requested = match self.state {
            AnimationState::Running => true,
            AnimationState::Collided => !self.world.particles.is_empty(),
            _ => false,
        };

        FrameOutcome::Rendered(report)
    }

    /// Let `elapsed` wall-clock time pass. Returns the token of a timer that
    /// came due; hand it to [`AnimationController::fire_timer`].
    pub fn advance_timers(&mut self, elapsed: Duration) -> Option<TimerToken> {
        let timer = self.end_timer.as_mut()?;
        timer.remaining = timer.remaining.saturating_sub(elapsed);
        if timer.remaining.is_zero() {
            self.end_timer.take().map(|timer| timer.token)
        } else {
            None
        }
    }

    /// Deliver a due end timer. Tokens from before the last reset are ignored.
    ///
    /// Returns true if the animation moved to [`AnimationState::Ended`].
    pub fn fire_timer<S: Surface + ?Sized>(
        &mut self,
        token: TimerToken,
        surface: Option<&mut S>,
    ) -> bool {
        if token.generation != self.timer_generation || self.state != AnimationState::Collided {
            debug!(
                "Ignoring stale end timer (generation {}, current {}, state {:?})",
                token.generation, self.timer_generation, self.state
            );
            return false;
        }

        info!("Animation ended at frame {}", self.world.frame);
        self.state = AnimationState::Ended;
        self.frame_requested = false;
        self.end_timer = None;

        if let Some(surface) = surface {
            render_frame(&self.world, true, surface);
        }
        true
    }

    fn schedule_end_timer(&mut self) {
        let Some(delay) = self.world.config().end_delay else {
            return;
        };
        self.timer_generation += 1;
        debug!(
            "Scheduling end of animation in {:?} (generation {})",
            delay, self.timer_generation
        );
        self.end_timer = Some(EndTimer {
            token: TimerToken {
                generation: self.timer_generation,
            },
            remaining: delay,
        });
    }

    fn cancel_end_timer(&mut self) {
        if self.end_timer.take().is_some() {
            debug!("Cancelled pending end timer");
        }
        self.timer_generation += 1;
    }
}
