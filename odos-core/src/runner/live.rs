//! Live mission runner
//!
//! Drives one mission through the frame scheduler, pushing every sampled
//! pose to the renderer. The runner never blocks: the host calls
//! [`LiveRunner::on_frame`] with each token it was handed and the runner
//! decides what the frame means.

use core::fmt;

use super::session::{FrameStep, RunnerSession};
use super::state::{RunEvent, RunState};
use crate::config::{FieldGeometry, SimConfig};
use crate::mission::Mission;
use crate::motion::{Point, Pose};
use crate::traits::{FrameScheduler, FrameToken, Renderer};

/// Reasons a run cannot start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunError {
    /// No mission has been loaded
    NoMission,
    /// No renderer is attached
    NoRenderer,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::NoMission => f.write_str("no mission loaded"),
            RunError::NoRenderer => f.write_str("no renderer attached"),
        }
    }
}

/// Live mission runner
pub struct LiveRunner<S: FrameScheduler, R: Renderer> {
    scheduler: S,
    renderer: Option<R>,
    config: SimConfig,
    field: FieldGeometry,
    mission: Option<Mission>,
    state: RunState,
    session: Option<RunnerSession>,
    pending: Option<FrameToken>,
}

impl<S: FrameScheduler, R: Renderer> LiveRunner<S, R> {
    /// Create a runner with no mission and no renderer
    pub fn new(scheduler: S, config: SimConfig, field: FieldGeometry) -> Self {
        Self {
            scheduler,
            renderer: None,
            config: config.sanitized(),
            field,
            mission: None,
            state: RunState::Idle,
            session: None,
            pending: None,
        }
    }

    /// Load a mission for the next run
    ///
    /// A run in progress is stopped first.
    pub fn load_mission(&mut self, mission: Mission) {
        if self.state.is_running() {
            self.stop();
        }
        info!(
            "mission loaded: {} commands ({} executable)",
            mission.commands.len(),
            mission.executable_commands()
        );
        self.mission = Some(mission);
    }

    /// Attach a renderer, returning the previous one
    pub fn attach_renderer(&mut self, renderer: R) -> Option<R> {
        self.renderer.replace(renderer)
    }

    /// Detach the renderer
    ///
    /// A run in progress is stopped first.
    pub fn detach_renderer(&mut self) -> Option<R> {
        if self.state.is_running() {
            self.stop();
        }
        self.renderer.take()
    }

    /// Replace the configuration used by the next run
    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config.sanitized();
    }

    /// Start a run from the mission's start pose
    ///
    /// Returns `Ok(false)` without side effects while a run is already in
    /// progress. A mission with no executable commands completes at once.
    pub fn start(&mut self, now_ms: f64) -> Result<bool, RunError> {
        if self.state.is_running() {
            debug!("start ignored: run already in progress");
            return Ok(false);
        }

        let mission = self.mission.as_ref().ok_or(RunError::NoMission)?;
        let renderer = self.renderer.as_mut().ok_or(RunError::NoRenderer)?;

        let mut session = RunnerSession::new(mission, &self.field);
        let pose = session.pose();
        renderer.update_pose(pose.center, pose.heading);
        if self.config.trace_enabled {
            renderer.trace_point(session.trace_point());
        }

        self.state = self.state.transition(RunEvent::Start);
        info!(
            "live run started at ({}, {}) heading {}",
            pose.center.x,
            pose.center.y,
            pose.heading
        );

        let has_work = session.begin_next(now_ms, &self.config);
        self.session = Some(session);
        if has_work {
            self.request_frame();
        } else {
            self.finish();
        }

        Ok(true)
    }

    /// Stop the run in progress
    ///
    /// The pose freezes at the last rendered frame and no further renderer
    /// callbacks happen for this run. Returns `false` if nothing was
    /// running.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
        self.state = self.state.transition(RunEvent::Stop);
        info!("live run stopped");
        true
    }

    /// Handle a fired frame
    ///
    /// Tokens that are not the one currently pending (cancelled, from an
    /// earlier run, or never issued) are ignored.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64) {
        if self.pending != Some(token) {
            debug!("stale frame token {} ignored", token.0);
            return;
        }
        self.pending = None;

        if !self.state.is_running() {
            return;
        }
        let (Some(session), Some(renderer)) = (self.session.as_mut(), self.renderer.as_mut())
        else {
            return;
        };

        match session.advance(now_ms, self.config.trace_enabled) {
            FrameStep::Animating { pose, trace } => {
                render(renderer, pose, trace);
                self.request_frame();
            }
            FrameStep::Finished {
                pose,
                trace,
                settled,
            } => {
                render(renderer, pose, trace);
                if let Some(point) = settled {
                    renderer.trace_point(point);
                }

                // The next command begins at this frame's time
                if session.begin_next(now_ms, &self.config) {
                    self.request_frame();
                } else {
                    self.finish();
                }
            }
            FrameStep::Idle => self.finish(),
        }
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Pose of the current or last run
    pub fn pose(&self) -> Option<Pose> {
        self.session.as_ref().map(RunnerSession::pose)
    }

    /// Trace point of the current or last run
    pub fn trace_point(&self) -> Option<Point> {
        self.session.as_ref().map(RunnerSession::trace_point)
    }

    /// Session of the current or last run
    pub fn session(&self) -> Option<&RunnerSession> {
        self.session.as_ref()
    }

    /// Token the runner is waiting on
    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Loaded mission
    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    fn request_frame(&mut self) {
        if let Some(stale) = self.pending.take() {
            self.scheduler.cancel(stale);
        }
        self.pending = Some(self.scheduler.schedule_next());
    }

    fn finish(&mut self) {
        self.state = self.state.transition(RunEvent::QueueDrained);
        info!("live run completed");
    }
}

fn render<R: Renderer>(renderer: &mut R, pose: Pose, trace: Option<Point>) {
    renderer.update_pose(pose.center, pose.heading);
    if let Some(point) = trace {
        renderer.trace_point(point);
    }
}
