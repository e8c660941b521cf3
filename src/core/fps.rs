/// Counts animation frames and turns them into a once-per-window FPS sample.
#[derive(Clone, Debug)]
pub struct FpsSampler {
    window_ms: f64,
    last_sample_ms: f64,
    frames: u32,
    fps: u32,
}

impl FpsSampler {
    pub fn new(window_ms: f64, start_ms: f64) -> Self {
        Self {
            window_ms,
            last_sample_ms: start_ms,
            frames: 0,
            fps: 0,
        }
    }

    /// Record one frame at `now_ms` (the rAF timestamp).
    ///
    /// Returns the new sample once at least `window_ms` has elapsed since the
    /// previous sample point; the counter then restarts from zero.
    pub fn frame(&mut self, now_ms: f64) -> Option<u32> {
        self.frames = self.frames.saturating_add(1);
        if now_ms - self.last_sample_ms < self.window_ms {
            return None;
        }
        self.fps = self.frames;
        self.frames = 0;
        self.last_sample_ms = now_ms;
        Some(self.fps)
    }

    /// Restart counting from `now_ms` without touching the last sample.
    pub fn restart(&mut self, now_ms: f64) {
        self.last_sample_ms = now_ms;
        self.frames = 0;
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[inline]
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }
}

impl Default for FpsSampler {
    fn default() -> Self {
        Self::new(crate::constants::FPS_SAMPLE_MS, 0.0)
    }
}
