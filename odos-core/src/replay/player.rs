//! Replay playback
//!
//! A cursor over a synthesized frame list. Playback advances one frame per
//! scheduler tick; scrubbing renders any frame directly and redraws the
//! trace polyline up to it.

use alloc::vec::Vec;

use super::synth::Frame;
use crate::motion::{Kinematics, Point};
use crate::traits::{FrameScheduler, FrameToken, Renderer};

/// Replay player
pub struct ReplayPlayer<S: FrameScheduler, R: Renderer> {
    scheduler: S,
    renderer: Option<R>,
    frames: Vec<Frame>,
    kinematics: Kinematics,
    trace_enabled: bool,
    cursor: usize,
    playing: bool,
    pending: Option<FrameToken>,
}

impl<S: FrameScheduler, R: Renderer> ReplayPlayer<S, R> {
    /// Create an empty player
    pub fn new(scheduler: S, trace_enabled: bool) -> Self {
        Self {
            scheduler,
            renderer: None,
            frames: Vec::new(),
            kinematics: Kinematics::new(1.0, 0.0),
            trace_enabled,
            cursor: 0,
            playing: false,
            pending: None,
        }
    }

    /// Attach a renderer, returning the previous one
    pub fn attach_renderer(&mut self, renderer: R) -> Option<R> {
        self.renderer.replace(renderer)
    }

    /// Detach the renderer, stopping playback
    pub fn detach_renderer(&mut self) -> Option<R> {
        self.stop();
        self.renderer.take()
    }

    /// Enable or disable the trace polyline for later renders
    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    /// Replace the frame list
    ///
    /// `kinematics` must be the one the frames were built with; it recovers
    /// trace points from frame poses.
    pub fn load(&mut self, frames: Vec<Frame>, kinematics: Kinematics) {
        self.stop();
        debug!("replay loaded: {} frames", frames.len());
        self.frames = frames;
        self.kinematics = kinematics;
        self.cursor = 0;
    }

    /// Render one frame, clamping the index into range
    ///
    /// Returns `false` if there is nothing to render.
    pub fn render_frame(&mut self, index: usize) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        let index = index.min(self.frames.len() - 1);
        self.cursor = index;

        let Some(renderer) = self.renderer.as_mut() else {
            return false;
        };

        let frame = self.frames[index];
        renderer.update_pose(Point::new(frame.x, frame.y), frame.heading);

        if self.trace_enabled {
            let kinematics = self.kinematics;
            let points: Vec<Point> = self.frames[..=index]
                .iter()
                .map(|f| kinematics.trace_point(&f.pose()))
                .collect();
            renderer.replace_trace(&points);
        } else {
            renderer.replace_trace(&[]);
        }
        true
    }

    /// Start or restart playback from the cursor
    ///
    /// Needs at least two frames. Any pending tick is cancelled first.
    pub fn play(&mut self) -> bool {
        if self.frames.len() < 2 {
            warn!("replay needs at least 2 frames, have {}", self.frames.len());
            return false;
        }

        self.cancel_pending();
        self.playing = true;
        self.pending = Some(self.scheduler.schedule_next());
        true
    }

    /// Handle a fired tick
    pub fn on_frame(&mut self, token: FrameToken) {
        if self.pending != Some(token) {
            debug!("stale replay token {} ignored", token.0);
            return;
        }
        self.pending = None;
        if !self.playing {
            return;
        }

        let next = self.cursor + 1;
        if next >= self.frames.len() {
            self.playing = false;
            return;
        }

        self.render_frame(next);
        if next + 1 >= self.frames.len() {
            self.playing = false;
            debug!("replay finished at frame {}", next);
        } else {
            self.pending = Some(self.scheduler.schedule_next());
        }
    }

    /// Pause playback; the cursor holds
    pub fn stop(&mut self) {
        self.playing = false;
        self.cancel_pending();
    }

    /// Scrub to a frame
    pub fn set_cursor(&mut self, index: usize) {
        self.stop();
        self.render_frame(index);
    }

    /// Stop and rewind to frame 0
    pub fn reset(&mut self) {
        self.stop();
        self.cursor = 0;
        self.render_frame(0);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame under the cursor
    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.cursor)
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

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldGeometry, SimConfig};
    use crate::mission::{Command, Mission};
    use crate::replay::build_replay_frames;
    use crate::traits::{ManualScheduler, RecordingRenderer};
    use alloc::rc::Rc;
    use core::cell::RefCell;

    type Shared = Rc<RefCell<RecordingRenderer>>;

    fn mission() -> Mission {
        Mission::default()
            .with_start(0.0, 0.0, 90.0)
            .with_body(10.0, 12.0)
            .with_commands(&[Command::move_by(10.0), Command::rotate_by(90.0)])
    }

    fn player() -> (ReplayPlayer<ManualScheduler, Shared>, Shared) {
        let field = FieldGeometry::default();
        let frames = build_replay_frames(&mission(), &SimConfig::default(), &field);
        let shared = Rc::new(RefCell::new(RecordingRenderer::new()));

        let mut player = ReplayPlayer::new(ManualScheduler::new(), true);
        player.attach_renderer(shared.clone());
        player.load(frames, Kinematics::for_mission(&mission(), &field));
        (player, shared)
    }

    fn drain(player: &mut ReplayPlayer<ManualScheduler, Shared>) -> usize {
        let mut ticks = 0;
        while let Some(token) = player.scheduler_mut().take_next() {
            player.on_frame(token);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_render_frame_draws_trace_prefix() {
        let (mut player, shared) = player();
        assert!(player.render_frame(5));

        let recorder = shared.borrow();
        assert_eq!(recorder.trace.len(), 6);
        let frame = player.frames()[5];
        assert_eq!(
            recorder.last_pose(),
            Some((Point::new(frame.x, frame.y), frame.heading))
        );
    }

    #[test]
    fn test_render_frame_clamps_index() {
        let (mut player, shared) = player();
        let last = player.frames().len() - 1;
        assert!(player.render_frame(10_000));
        assert_eq!(player.cursor(), last);
        assert_eq!(shared.borrow().trace.len(), last + 1);
    }

    #[test]
    fn test_trace_disabled_clears_polyline() {
        let (mut player, shared) = player();
        player.set_trace_enabled(false);
        player.render_frame(5);
        assert!(shared.borrow().trace.is_empty());
        assert_eq!(shared.borrow().trace_replacements, 1);
    }

    #[test]
    fn test_play_to_end() {
        let (mut player, shared) = player();
        let last = player.frames().len() - 1;

        assert!(player.play());
        assert!(player.is_playing());
        let ticks = drain(&mut player);

        assert_eq!(ticks, last);
        assert_eq!(player.cursor(), last);
        assert!(!player.is_playing());
        assert_eq!(shared.borrow().poses.len(), last);
    }

    #[test]
    fn test_play_is_restart() {
        let (mut player, _shared) = player();
        player.play();
        player.play();

        assert_eq!(player.scheduler().pending().len(), 1);
        assert_eq!(player.scheduler().cancelled_count(), 1);
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_stop_holds_cursor() {
        let (mut player, shared) = player();
        player.play();
        for _ in 0..3 {
            let token = player.scheduler_mut().take_next().unwrap();
            player.on_frame(token);
        }
        player.stop();
        assert_eq!(player.cursor(), 3);
        assert!(player.scheduler().is_idle());

        // A late tick from before the stop is ignored
        let callbacks = shared.borrow().callback_count();
        player.on_frame(FrameToken(4));
        assert_eq!(player.cursor(), 3);
        assert_eq!(shared.borrow().callback_count(), callbacks);
    }

    #[test]
    fn test_set_cursor_stops_playback() {
        let (mut player, _shared) = player();
        player.play();
        player.set_cursor(20);

        assert!(!player.is_playing());
        assert!(player.scheduler().is_idle());
        assert_eq!(player.cursor(), 20);
    }

    #[test]
    fn test_reset_rewinds() {
        let (mut player, shared) = player();
        player.set_cursor(20);
        player.reset();

        assert_eq!(player.cursor(), 0);
        let first = player.frames()[0];
        assert_eq!(
            shared.borrow().last_pose(),
            Some((Point::new(first.x, first.y), first.heading))
        );
        assert_eq!(shared.borrow().trace.len(), 1);
    }

    #[test]
    fn test_play_needs_two_frames() {
        let mut player: ReplayPlayer<ManualScheduler, RecordingRenderer> =
            ReplayPlayer::new(ManualScheduler::new(), true);
        assert!(!player.play());

        let frames = build_replay_frames(
            &Mission::default(),
            &SimConfig::default(),
            &FieldGeometry::default(),
        );
        player.load(frames, Kinematics::new(1.0, 0.0));
        assert_eq!(player.frames().len(), 1);
        assert!(!player.play());
        assert!(player.scheduler().is_idle());
    }

    #[test]
    fn test_load_replaces_and_stops() {
        let (mut player, _shared) = player();
        player.play();
        let token = player.scheduler_mut().take_next().unwrap();
        player.on_frame(token);

        player.load(Vec::new(), Kinematics::new(1.0, 0.0));
        assert!(!player.is_playing());
        assert_eq!(player.cursor(), 0);
        assert!(player.frames().is_empty());
        assert!(!player.render_frame(0));
    }

    #[test]
    fn test_replay_matches_live_end_pose() {
        use crate::runner::LiveRunner;

        let field = FieldGeometry::default();
        let shared = Rc::new(RefCell::new(RecordingRenderer::new()));
        let mut runner = LiveRunner::new(ManualScheduler::new(), SimConfig::default(), field);
        runner.load_mission(mission());
        runner.attach_renderer(shared.clone());
        runner.start(0.0).unwrap();

        let mut now = 0.0;
        while let Some(token) = runner.scheduler_mut().take_next() {
            now += 7.0;
            runner.on_frame(token, now);
        }
        let live = runner.pose().unwrap();

        let (player, _) = player();
        let replayed = player.frames()[player.frames().len() - 1].pose();
        assert!(live.center.distance_to(replayed.center) < 1e-6);
        assert!((live.heading - replayed.heading).abs() < 1e-9);
    }
}
