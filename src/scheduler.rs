//! Animation scheduling and timing.
//!
//! Portable frame pacing without async/await or platform-specific timers.
//! The caller drives the loop by passing `now` into [`AnimationScheduler::tick`]
//! and is responsible for sleeping until the returned deadline.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use embedded_hal::spi::SpiDevice;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::DisplayConfig;
use crate::driver::{DriverError, MatrixChain};
use crate::frame::{FrameBuffer, FrameSource};

/// Consecutive flush failures tolerated before the scheduler faults.
pub const MAX_CONSECUTIVE_FAILURES: u8 = 5;

/// Default interval-RNG seed, used unless the platform provides entropy.
const DEFAULT_SEED: u64 = 0x5EED_B11F;

/// Lifecycle state of the animation scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not animating; the display is blanked.
    Idle,
    /// Advancing frames on the configured cadence.
    Running,
    /// Halted after persistent bus failures. Cleared by the next start.
    Faulted,
}

/// Policy for drawing the delay until the next frame.
///
/// Every drawn interval lies within the configured `[min, max]` range,
/// inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalPolicy {
    /// Uniformly random interval in `[min, max]`.
    Uniform,
    /// Fixed cadence at the midpoint of `[min, max]`.
    Fixed,
}

impl IntervalPolicy {
    fn draw(self, rng: &mut SmallRng, min: Duration, max: Duration) -> Duration {
        let min_ms = min.as_millis();
        let max_ms = max.as_millis();
        match self {
            Self::Uniform => {
                let range = max_ms - min_ms;
                Duration::from_millis(min_ms + u64::from(rng.next_u32()) % (range + 1))
            }
            Self::Fixed => Duration::from_millis(min_ms + (max_ms - min_ms) / 2),
        }
    }
}

/// Result of a scheduler tick while running.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until that deadline (zero if already behind).
    pub sleep_duration: Duration,
}

/// Advances animation frames at a randomized cadence and pushes them to the
/// matrix chain.
///
/// State machine: `Idle` → `Running` on [`start`](Self::start), back to `Idle`
/// on [`stop`](Self::stop). A flush failure is skipped and retried on the next
/// tick; [`MAX_CONSECUTIVE_FAILURES`] in a row move the scheduler to
/// `Faulted`, which halts animation but leaves all state queryable.
pub struct AnimationScheduler<SPI, S> {
    driver: MatrixChain<SPI>,
    source: S,
    frame: FrameBuffer,
    config: DisplayConfig,
    policy: IntervalPolicy,
    rng: SmallRng,
    state: SchedulerState,
    next_due: Instant,
    consecutive_failures: u8,
    last_error: Option<DriverError>,
}

impl<SPI, S> AnimationScheduler<SPI, S>
where
    SPI: SpiDevice,
    S: FrameSource,
{
    /// Create an idle scheduler over a driver and frame source.
    pub fn new(driver: MatrixChain<SPI>, source: S, config: DisplayConfig) -> Self {
        Self {
            driver,
            source,
            frame: FrameBuffer::new(config.num_matrices()),
            config,
            policy: IntervalPolicy::Uniform,
            rng: SmallRng::seed_from_u64(DEFAULT_SEED),
            state: SchedulerState::Idle,
            next_due: Instant::from_millis(0),
            consecutive_failures: 0,
            last_error: None,
        }
    }

    /// Select the interval policy (default: [`IntervalPolicy::Uniform`]).
    pub fn with_policy(mut self, policy: IntervalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seed the interval RNG, e.g. from a hardware entropy source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Run the chain power-up sequence.
    ///
    /// Call once from the platform setup hook before the first tick.
    pub fn setup(&mut self) -> Result<(), DriverError> {
        self.driver.init(self.config.brightness())
    }

    /// Begin animating.
    ///
    /// Re-applies the configured brightness, clears any fault and schedules
    /// the first frame within `max_interval` of `now`. No-op while already
    /// running.
    pub fn start(&mut self, now: Instant) {
        if self.state == SchedulerState::Running {
            return;
        }
        self.consecutive_failures = 0;
        self.last_error = None;
        if let Err(err) = self.driver.set_brightness(self.config.brightness()) {
            self.last_error = Some(err);
            #[cfg(feature = "esp32-log")]
            println!("blinken: brightness write failed: {}", err);
        }
        self.state = SchedulerState::Running;
        self.next_due = now + self.policy.draw(
            &mut self.rng,
            self.config.min_interval(),
            self.config.max_interval(),
        );
        #[cfg(feature = "esp32-log")]
        println!("blinken: scheduler running");
    }

    /// Stop animating and blank the display.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Idle {
            return;
        }
        self.state = SchedulerState::Idle;
        self.frame.clear();
        if let Err(err) = self.driver.blank() {
            self.last_error = Some(err);
            #[cfg(feature = "esp32-log")]
            println!("blinken: blank failed: {}", err);
        }
        #[cfg(feature = "esp32-log")]
        println!("blinken: scheduler idle");
    }

    /// Advance the animation if the current interval has elapsed.
    ///
    /// Returns the upcoming deadline while running, `None` when idle or
    /// faulted. A failed flush is skipped; the deadline still advances so the
    /// next tick retries.
    pub fn tick(&mut self, now: Instant) -> Option<TickResult> {
        if self.state != SchedulerState::Running {
            return None;
        }
        if now.as_millis() < self.next_due.as_millis() {
            return Some(self.result_for(now));
        }

        self.source.next_frame(&mut self.frame);
        match self.driver.flush(&self.frame) {
            Ok(()) => {
                self.consecutive_failures = 0;
                self.last_error = None;
            }
            Err(err) => {
                self.last_error = Some(err);
                self.consecutive_failures += 1;
                #[cfg(feature = "esp32-log")]
                println!("blinken: flush failed: {}", err);
                if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    self.state = SchedulerState::Faulted;
                    #[cfg(feature = "esp32-log")]
                    println!("blinken: bus fault, animation halted");
                    return None;
                }
            }
        }

        self.next_due = now + self.policy.draw(
            &mut self.rng,
            self.config.min_interval(),
            self.config.max_interval(),
        );
        Some(self.result_for(now))
    }

    fn result_for(&self, now: Instant) -> TickResult {
        let sleep_duration = if self.next_due.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_due.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };
        TickResult {
            next_deadline: self.next_due,
            sleep_duration,
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running)
    }

    /// The frame most recently rendered (or cleared on stop).
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// The configuration this scheduler was built with.
    pub const fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The most recent bus error, if any.
    pub const fn last_error(&self) -> Option<DriverError> {
        self.last_error
    }
}
