use std::time::{Duration, Instant};

/// Frame rate bounds shared by the CLI, the config file and the in-app adjuster
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Created but never started
    #[default]
    Idle,
    Running,
    Stopped,
}

impl LoopState {
    pub fn name(&self) -> &str {
        match self {
            LoopState::Idle => "IDLE",
            LoopState::Running => "RUNNING",
            LoopState::Stopped => "STOPPED",
        }
    }
}

/// Frame scheduler with an explicit lifecycle.
///
/// Frames are due every `frame_duration`. A late frame runs once; missed
/// frames are never caught up.
#[derive(Debug)]
pub struct AnimationLoop {
    state: LoopState,
    frame_duration: Duration,
    next_frame: Instant,
    frames: u64,
}

impl AnimationLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            state: LoopState::Idle,
            frame_duration: Self::duration_for(fps),
            next_frame: Instant::now(),
            frames: 0,
        }
    }

    fn duration_for(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / fps.clamp(MIN_FPS, MAX_FPS) as f64)
    }

    pub fn start(&mut self) {
        if self.state != LoopState::Running {
            self.state = LoopState::Running;
            self.next_frame = Instant::now();
        }
    }

    /// After this returns no frame runs until `start` is called again
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.frame_duration = Self::duration_for(fps);
    }

    /// How long the host may block waiting for input before the next frame is due
    pub fn time_until_next(&self, now: Instant) -> Duration {
        if self.is_running() {
            self.next_frame.saturating_duration_since(now)
        } else {
            // Nothing to animate; just stay responsive
            self.frame_duration
        }
    }

    /// Whether a frame should be produced at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.is_running() && now >= self.next_frame
    }

    /// Run `tick` once if running and the frame is due. Returns whether it ran.
    pub fn frame<F: FnOnce()>(&mut self, now: Instant, tick: F) -> bool {
        if !self.is_due(now) {
            return false;
        }
        tick();
        self.frames += 1;
        self.next_frame += self.frame_duration;
        // Dropped frames are skipped, not replayed
        if self.next_frame < now {
            self.next_frame = now + self.frame_duration;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_loop_does_not_tick() {
        let mut animation = AnimationLoop::new(60);
        let mut ticks = 0;
        assert!(!animation.frame(Instant::now(), || ticks += 1));
        assert_eq!(ticks, 0);
        assert_eq!(animation.state(), LoopState::Idle);
    }

    #[test]
    fn test_running_loop_ticks_once_per_due_frame() {
        let mut animation = AnimationLoop::new(60);
        animation.start();
        let now = Instant::now();
        let mut ticks = 0;

        assert!(animation.frame(now, || ticks += 1));
        // Same instant: next frame is not due yet
        assert!(!animation.frame(now, || ticks += 1));
        assert!(animation.frame(now + Duration::from_millis(17), || ticks += 1));
        assert_eq!(ticks, 2);
        assert_eq!(animation.frames(), 2);
    }

    #[test]
    fn test_stop_prevents_further_ticks() {
        let mut animation = AnimationLoop::new(60);
        animation.start();
        let now = Instant::now();
        let mut ticks = 0;
        animation.frame(now, || ticks += 1);

        animation.stop();
        for i in 1..10 {
            assert!(!animation.frame(now + Duration::from_secs(i), || ticks += 1));
        }
        assert_eq!(ticks, 1);
        assert_eq!(animation.state(), LoopState::Stopped);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut animation = AnimationLoop::new(30);
        animation.start();
        animation.stop();
        animation.toggle();
        assert!(animation.is_running());

        let mut ticks = 0;
        assert!(animation.frame(Instant::now() + Duration::from_millis(50), || ticks += 1));
        assert_eq!(ticks, 1);
    }

    #[test]
    fn test_missed_frames_are_not_caught_up() {
        let mut animation = AnimationLoop::new(60);
        animation.start();
        let start = Instant::now();
        let mut ticks = 0;
        animation.frame(start, || ticks += 1);

        // Host stalled for a full second
        let late = start + Duration::from_secs(1);
        assert!(animation.frame(late, || ticks += 1));
        assert!(!animation.frame(late, || ticks += 1));
        assert_eq!(ticks, 2);
        assert!(animation.time_until_next(late) > Duration::ZERO);
    }
}
