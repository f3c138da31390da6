use std::fmt;
use std::time::Instant;

use crate::camera::{StereoCameraConfig, StereoMode};
use crate::compositor::ViewMode;
use crate::input::Intent;
use crate::time::{FpsCounter, FrameClock, FrameTime};

/// Lifecycle of the run loop. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Observable loop status, refreshed once per FPS window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopStatus {
    pub ipd: f32,
    pub fps: Option<f32>,
    pub mode: StereoMode,
    pub view: ViewMode,
    pub frame_index: u64,
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fps {
            Some(fps) => write!(f, "FPS: {fps:.1} | IPD: {:.3}m", self.ipd)?,
            None => write!(f, "FPS: -- | IPD: {:.3}m", self.ipd)?,
        }
        write!(f, " | {}", self.mode.name())?;
        if self.view == ViewMode::TestPattern {
            write!(f, " | {}", self.view.name())?;
        }
        Ok(())
    }
}

/// Frame-to-frame state of the viewer.
///
/// Intents are applied between frames only; the camera snapshot handed to the
/// compositor is taken after [`apply_intents`](Self::apply_intents).
#[derive(Debug, Clone)]
pub struct RunLoop {
    state: LoopState,
    camera: StereoCameraConfig,
    mode: StereoMode,
    view: ViewMode,
    clock: FrameClock,
    fps: FpsCounter,
    frame_index: u64,
}

impl RunLoop {
    pub fn new(camera: StereoCameraConfig, mode: StereoMode, view: ViewMode) -> Self {
        Self::starting_at(Instant::now(), camera, mode, view)
    }

    pub fn starting_at(start: Instant, camera: StereoCameraConfig, mode: StereoMode, view: ViewMode) -> Self {
        Self {
            state: LoopState::Running,
            camera,
            mode,
            view,
            clock: FrameClock::starting_at(start),
            fps: FpsCounter::starting_at(start),
            frame_index: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    #[inline]
    pub fn camera(&self) -> &StereoCameraConfig {
        &self.camera
    }

    #[inline]
    pub fn stereo_mode(&self) -> StereoMode {
        self.mode
    }

    #[inline]
    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    /// Requests termination. The current frame, if any, still completes.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::info!("stopping run loop after {} frames", self.frame_index);
        }
        self.state = LoopState::Stopped;
    }

    pub fn apply_intent(&mut self, intent: Intent) {
        if !self.is_running() {
            return;
        }

        match intent {
            Intent::Quit => self.stop(),
            Intent::IncreaseIpd => {
                let ipd = self.camera.increase_ipd();
                log::info!("IPD: {ipd:.3}m");
            }
            Intent::DecreaseIpd => {
                let ipd = self.camera.decrease_ipd();
                log::info!("IPD: {ipd:.3}m");
            }
            Intent::ToggleStereoMode => {
                self.mode = self.mode.toggled();
                log::info!("stereo mode: {}", self.mode.name());
            }
            Intent::ToggleTestPattern => {
                self.view = self.view.toggled();
                log::info!("view mode: {}", self.view.name());
            }
        }
    }

    pub fn apply_intents(&mut self, intents: impl IntoIterator<Item = Intent>) {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    /// Advances the clock for a frame starting at `now`.
    ///
    /// Returns `None` once the loop has stopped; no further frames are drawn.
    pub fn begin_frame(&mut self, now: Instant) -> Option<FrameTime> {
        if !self.is_running() {
            return None;
        }
        let ft = self.clock.tick_at(now);
        self.frame_index = ft.frame_index;
        Some(ft)
    }

    /// Records a presented frame. Yields a new FPS estimate at most once per
    /// sampling window.
    pub fn end_frame(&mut self, now: Instant) -> Option<f32> {
        self.fps.record(now)
    }

    pub fn status(&self) -> LoopStatus {
        LoopStatus {
            ipd: self.camera.ipd(),
            fps: self.fps.last(),
            mode: self.mode,
            view: self.view,
            frame_index: self.frame_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn run_loop(t0: Instant) -> RunLoop {
        RunLoop::starting_at(t0, StereoCameraConfig::default(), StereoMode::ParallelAxis, ViewMode::Scene)
    }

    #[test]
    fn quit_stops_and_ignores_further_frames() {
        let t0 = Instant::now();
        let mut rl = run_loop(t0);
        assert!(rl.begin_frame(t0 + Duration::from_millis(16)).is_some());

        rl.apply_intent(Intent::Quit);
        assert_eq!(rl.state(), LoopState::Stopped);
        assert!(rl.begin_frame(t0 + Duration::from_millis(32)).is_none());

        // Stopped is terminal.
        rl.apply_intent(Intent::IncreaseIpd);
        assert!((rl.camera().ipd() - 0.070).abs() < 1e-6);
    }

    #[test]
    fn ipd_intents_step_and_clamp() {
        let mut rl = run_loop(Instant::now());
        rl.apply_intents([Intent::IncreaseIpd, Intent::IncreaseIpd]);
        assert!((rl.status().ipd - 0.080).abs() < 1e-6);

        rl.apply_intents(std::iter::repeat(Intent::DecreaseIpd).take(50));
        assert!((rl.status().ipd - 0.02).abs() < 1e-6);
    }

    #[test]
    fn toggles_flip_modes() {
        let mut rl = run_loop(Instant::now());
        rl.apply_intents([Intent::ToggleStereoMode, Intent::ToggleTestPattern]);
        assert_eq!(rl.stereo_mode(), StereoMode::asymmetric());
        assert_eq!(rl.view_mode(), ViewMode::TestPattern);

        rl.apply_intents([Intent::ToggleStereoMode, Intent::ToggleTestPattern]);
        assert_eq!(rl.stereo_mode(), StereoMode::ParallelAxis);
        assert_eq!(rl.view_mode(), ViewMode::Scene);
    }

    #[test]
    fn status_reports_fps_after_a_window() {
        let t0 = Instant::now();
        let mut rl = run_loop(t0);

        let mut sampled = None;
        for i in 1..=70u64 {
            let now = t0 + Duration::from_micros(i * 16_667);
            let ft = rl.begin_frame(now).unwrap();
            assert_eq!(ft.frame_index, i - 1);
            if let Some(fps) = rl.end_frame(now) {
                sampled.get_or_insert(fps);
            }
        }

        let status = rl.status();
        assert!(sampled.is_some());
        assert_eq!(status.fps, sampled);
        assert_eq!(status.frame_index, 69);
        assert!(status.to_string().starts_with("FPS: "));
    }
}
