//! Frame scheduler: the "request next frame" primitive driving `advance`.
//!
//! Missed frames are skipped, not replayed, so a stalled loop resumes at the
//! normal cadence instead of bursting through queued ticks.

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};

pub struct FrameScheduler {
    interval: Interval,
    frame: u64,
}

impl FrameScheduler {
    pub fn new(fps: u32) -> Self {
        let mut interval = interval(frame_period(fps));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, frame: 0 }
    }

    /// Wait for the next frame and return its sequence number.
    pub async fn next_frame(&mut self) -> u64 {
        self.interval.tick().await;
        self.frame += 1;
        self.frame
    }
}

fn frame_period(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_for_common_rates() {
        assert_eq!(frame_period(50), Duration::from_millis(20));
        assert_eq!(frame_period(0), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn frames_are_numbered_from_one() {
        let mut frames = FrameScheduler::new(60);
        assert_eq!(frames.next_frame().await, 1);
        assert_eq!(frames.next_frame().await, 2);
    }
}
