//! Frames-per-second counter over a sliding one-second window.

use std::collections::VecDeque;

/// Counts the frames whose timestamps fall within the last second.
#[derive(Debug, Default, Clone)]
pub struct FpsCounter {
    timestamps: VecDeque<f64>,
    elapsed: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame that took `delta_time` seconds.
    pub fn update(&mut self, delta_time: f64) {
        self.elapsed += delta_time;
        self.timestamps.push_back(self.elapsed);
        let window_start = self.elapsed - 1.0;
        while self
            .timestamps
            .front()
            .is_some_and(|&stamp| stamp < window_start)
        {
            self.timestamps.pop_front();
        }
    }

    /// Frames recorded during the last second.
    pub fn current_fps(&self) -> usize {
        self.timestamps.len()
    }
}
