//! Frame clocks
//!
//! A `FrameClock` suspends until the next frame and reports its timing. The
//! system clock paces real frames; the manual clock is for deterministic runs.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::stepper::Frame;

pub trait FrameClock {
    /// Wait for the next frame and return its timing
    fn next_frame(&mut self) -> Frame;

    /// Current wall-clock time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the Unix epoch
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Fixed-rate clock driven by the OS timer
#[derive(Debug)]
pub struct SystemClock {
    interval: Duration,
    origin: Instant,
    origin_ms: u64,
    frame_index: u64,
}

impl SystemClock {
    pub fn new(frame_rate_hz: u32) -> Self {
        let hz = frame_rate_hz.max(1);
        Self {
            interval: Duration::from_secs_f64(1.0 / hz as f64),
            origin: Instant::now(),
            origin_ms: unix_millis(),
            frame_index: 0,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.origin_ms + self.origin.elapsed().as_millis() as u64
    }
}

impl FrameClock for SystemClock {
    fn next_frame(&mut self) -> Frame {
        self.frame_index += 1;
        let target = self.interval * self.frame_index as u32;
        let elapsed = self.origin.elapsed();
        if target > elapsed {
            std::thread::sleep(target - elapsed);
        } else {
            // Fell behind; skip the missed frames instead of bursting
            let behind = (elapsed.as_secs_f64() / self.interval.as_secs_f64()) as u64;
            self.frame_index = self.frame_index.max(behind);
        }
        Frame {
            frame_time_ms: self.origin_ms
                + (self.interval * self.frame_index as u32).as_millis() as u64,
            now_ms: self.elapsed_ms(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.elapsed_ms()
    }
}

/// Clock that advances by a fixed step each frame without sleeping
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: u64,
    step_ms: u64,
    /// Simulated callback delay added to `now_ms` of each frame
    latency_ms: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
            latency_ms: 0,
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Jump forward without producing a frame
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl FrameClock for ManualClock {
    fn next_frame(&mut self) -> Frame {
        self.now_ms += self.step_ms;
        Frame {
            frame_time_ms: self.now_ms,
            now_ms: self.now_ms + self.latency_ms,
        }
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_steps() {
        let mut clock = ManualClock::new(1_000, 16).with_latency(2);
        let a = clock.next_frame();
        let b = clock.next_frame();
        assert_eq!(a.frame_time_ms, 1_016);
        assert_eq!(a.now_ms, 1_018);
        assert_eq!(b.frame_time_ms, 1_032);

        clock.advance(100);
        assert_eq!(clock.now_ms(), 1_132);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let mut clock = SystemClock::new(1_000);
        let a = clock.next_frame();
        let b = clock.next_frame();
        assert!(b.frame_time_ms >= a.frame_time_ms);
        assert!(b.now_ms >= a.now_ms);
    }
}
