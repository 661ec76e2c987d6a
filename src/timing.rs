//! Timing primitives.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use chashmap::CHashMap;

/// A timer for maintaining a stable FPS.
pub struct FrameTimer {
  frame_count: u64,
  frame_start: Instant,

  fps: f64,
  last_measurement: Instant,
  last_measurement_frame: u64,
}

impl FrameTimer {
  /// Creates a new `FrameTimer`.
  pub fn new() -> FrameTimer {
    FrameTimer {
      frame_count: 0,
      frame_start: Instant::now(),
      fps: 0.0,
      last_measurement: Instant::now(),
      last_measurement_frame: 0,
    }
  }

  /// Returns the number of frames timed so far.
  pub fn frame_count(&self) -> u64 {
    self.frame_count
  }

  /// Returns how long the current frame has been running.
  pub fn frame_elapsed(&self) -> Duration {
    self.frame_start.elapsed()
  }

  /// Measures the frames per second at the given measurement interval.
  ///
  /// This function should be called once per frame; once the given interval
  /// has elapsed, the FPS will be computed as the average frame time since the
  /// last measurement. The framerate is cached between measurements.
  pub fn measure_fps(&mut self, measurement_interval: Duration) -> f64 {
    let elapsed = self.last_measurement.elapsed();
    if elapsed < measurement_interval || elapsed.as_secs_f64() == 0.0 {
      return self.fps;
    }

    let frames = (self.frame_count - self.last_measurement_frame) as f64;
    self.fps = frames / elapsed.as_secs_f64();
    self.last_measurement = Instant::now();
    self.last_measurement_frame = self.frame_count;

    self.fps
  }

  /// Ends a frame without waiting.
  pub fn end_frame_unpaced(&mut self) {
    self.frame_start = Instant::now();
    self.frame_count += 1;
  }

  /// Ends a frame, blocking until the minimum frame length for the given FPS
  /// is reached. A target of zero means "uncapped".
  ///
  /// This function should be called once per frame.
  pub fn end_frame(&mut self, target_fps: u32) {
    if target_fps > 0 {
      let frame_time = Duration::from_secs(1) / target_fps;
      if let Some(left) = frame_time.checked_sub(self.frame_start.elapsed()) {
        thread::sleep(left);
      }
    }
    self.end_frame_unpaced();
  }
}

impl Default for FrameTimer {
  fn default() -> Self {
    Self::new()
  }
}

/// A timer for measuring the average time spent on each stage of a frame,
/// for computing debug timings.
///
/// This timer can keep track of several different stages, each of which is
/// tracked by a string "tag", such as `"menus"`.
pub struct SystemTimer {
  table: CHashMap<&'static str, TimerInner>,
  keys: Mutex<Vec<&'static str>>,
}

impl SystemTimer {
  /// Creates a new `SystemTimer`.
  pub fn new() -> Self {
    Self {
      table: CHashMap::new(),
      keys: Mutex::new(Vec::new()),
    }
  }

  /// Starts a timing measurement for `stage`.
  ///
  /// The measurement is completed when the returned guard value is dropped,
  /// which will then be added to the running total.
  #[must_use]
  pub fn start(&self, stage: &'static str) -> SystemTimerGuard<'_> {
    let keys = &self.keys;
    self.table.upsert(
      stage,
      move || {
        if let Ok(mut keys) = keys.lock() {
          keys.push(stage);
        }
        TimerInner::new()
      },
      |v| v.last_start = Instant::now(),
    );
    SystemTimerGuard(self, stage)
  }

  /// Returns the total time measured by this timer for `stage`.
  pub fn total_time(&self, stage: &'static str) -> Duration {
    self
      .table
      .get(stage)
      .map(|s| s.total_time)
      .unwrap_or_default()
  }

  /// Returns how many measurements have completed for `stage`.
  pub fn samples(&self, stage: &'static str) -> u64 {
    self.table.get(stage).map(|s| s.samples).unwrap_or(0)
  }

  /// Measures the average time per measurement for every stage, over the
  /// last `measurement_interval`.
  ///
  /// Averages are cached between intervals.
  pub fn measure_all(
    &self,
    measurement_interval: Duration,
  ) -> Vec<(&'static str, Duration)> {
    let now = Instant::now();
    let keys = match self.keys.lock() {
      Ok(keys) => keys.clone(),
      Err(_) => return Vec::new(),
    };

    keys
      .into_iter()
      .filter_map(|stage| {
        let m = self
          .table
          .get_mut(stage)?
          .measure(measurement_interval, now);
        Some((stage, m))
      })
      .collect()
  }

  /// Logs every stage's average at debug level, once per `interval`.
  pub fn report(&self, interval: Duration) {
    for (stage, avg) in self.measure_all(interval) {
      tracing::debug!(stage, avg_us = avg.as_micros() as u64, "stage timing");
    }
  }
}

impl Default for SystemTimer {
  fn default() -> Self {
    Self::new()
  }
}

struct TimerInner {
  last_start: Instant,
  total_time: Duration,
  samples: u64,

  raw_time: Duration,
  measurements: u32,

  timing: Duration,
  last_measurement: Instant,
}

impl TimerInner {
  fn new() -> Self {
    Self {
      last_start: Instant::now(),
      total_time: Duration::default(),
      samples: 0,
      raw_time: Duration::default(),
      measurements: 0,

      timing: Duration::default(),
      last_measurement: Instant::now(),
    }
  }

  fn measure(&mut self, interval: Duration, now: Instant) -> Duration {
    if now - self.last_measurement < interval || self.measurements == 0 {
      return self.timing;
    }

    self.timing = self.raw_time / self.measurements;
    self.raw_time = Duration::default();
    self.last_measurement = now;
    self.measurements = 0;
    self.timing
  }
}

/// A guard for a [`SystemTimer::start()`] call.
pub struct SystemTimerGuard<'a>(&'a SystemTimer, &'static str);

impl SystemTimerGuard<'_> {
  /// Finishes a timing early.
  pub fn finish(self) {}
}

impl Drop for SystemTimerGuard<'_> {
  fn drop(&mut self) {
    if let Some(mut inner) = self.0.table.get_mut(self.1) {
      let elapsed = inner.last_start.elapsed();
      inner.total_time += elapsed;
      inner.raw_time += elapsed;
      inner.measurements += 1;
      inner.samples += 1;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guards_accumulate() {
    let timer = SystemTimer::new();
    for _ in 0..3 {
      let _t = timer.start("render");
    }
    timer.start("menus").finish();

    assert_eq!(timer.samples("render"), 3);
    assert_eq!(timer.samples("menus"), 1);
    assert_eq!(timer.samples("input"), 0);

    let stages = timer
      .measure_all(Duration::default())
      .into_iter()
      .map(|(s, _)| s)
      .collect::<Vec<_>>();
    assert_eq!(stages, vec!["render", "menus"]);
  }

  #[test]
  fn frames_are_counted() {
    let mut timer = FrameTimer::new();
    timer.end_frame(0);
    timer.end_frame_unpaced();
    assert_eq!(timer.frame_count(), 2);
  }
}
