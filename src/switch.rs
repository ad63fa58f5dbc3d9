//! Switch state interface
//!
//! Exposes on/off semantics to the host automation system and coordinates
//! the animation scheduler. Host commands may arrive from another context
//! (an MQTT callback, a button interrupt), so they travel through the bounded
//! intent channel and are drained at the top of each [`DisplaySwitch::poll`].

use embassy_time::Instant;
use embedded_hal::spi::SpiDevice;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Channel, Receiver, Sender};
use crate::driver::DriverError;
use crate::frame::FrameSource;
use crate::scheduler::{AnimationScheduler, TickResult};

/// Host command for the display switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchIntent {
    TurnOn,
    TurnOff,
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, SwitchIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, SwitchIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<SwitchIntent, SIZE>;

/// Switch capability expected by the host automation system.
///
/// State reporting is synchronous: `is_on` answers from local state with no
/// round-trip to the hardware.
pub trait PowerSwitch {
    fn turn_on(&mut self, now: Instant);
    fn turn_off(&mut self, now: Instant);
    fn is_on(&self) -> bool;
}

/// The display switch: owns the scheduler and tracks on/off state.
pub struct DisplaySwitch<'a, SPI, S, const INTENT_CHANNEL_SIZE: usize> {
    scheduler: AnimationScheduler<SPI, S>,
    intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
    on: bool,
    last_toggle: Option<Instant>,
}

impl<'a, SPI, S, const INTENT_CHANNEL_SIZE: usize> DisplaySwitch<'a, SPI, S, INTENT_CHANNEL_SIZE>
where
    SPI: SpiDevice,
    S: FrameSource,
{
    /// Create a switch that powers on at setup.
    ///
    /// Matches the component default: with no saved state the display starts
    /// animating.
    pub fn new(
        scheduler: AnimationScheduler<SPI, S>,
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
    ) -> Self {
        Self::new_with_state(scheduler, intents, true)
    }

    /// Create a switch with a restored on/off state.
    ///
    /// State persistence is a host concern; the platform layer loads the
    /// saved flag and passes it here at setup.
    pub fn new_with_state(
        scheduler: AnimationScheduler<SPI, S>,
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        on: bool,
    ) -> Self {
        Self {
            scheduler,
            intents,
            on,
            last_toggle: None,
        }
    }

    /// Platform setup hook: initialize the chain and start animating if the
    /// switch is on.
    pub fn setup(&mut self, now: Instant) -> Result<(), DriverError> {
        self.scheduler.setup()?;
        if self.on {
            self.scheduler.start(now);
        }
        Ok(())
    }

    /// Platform loop hook.
    ///
    /// Drains pending intents, then ticks the scheduler. A queued turn-off
    /// therefore preempts animation by the next tick boundary. Returns the
    /// upcoming frame deadline while animating.
    pub fn poll(&mut self, now: Instant) -> Option<TickResult> {
        while let Ok(intent) = self.intents.try_receive() {
            match intent {
                SwitchIntent::TurnOn => self.turn_on(now),
                SwitchIntent::TurnOff => self.turn_off(now),
            }
        }
        self.scheduler.tick(now)
    }

    /// When the switch last changed state, if it has.
    pub const fn last_toggle(&self) -> Option<Instant> {
        self.last_toggle
    }

    /// Get a reference to the scheduler.
    pub const fn scheduler(&self) -> &AnimationScheduler<SPI, S> {
        &self.scheduler
    }

    /// Get a mutable reference to the scheduler.
    pub const fn scheduler_mut(&mut self) -> &mut AnimationScheduler<SPI, S> {
        &mut self.scheduler
    }
}

impl<SPI, S, const INTENT_CHANNEL_SIZE: usize> PowerSwitch
    for DisplaySwitch<'_, SPI, S, INTENT_CHANNEL_SIZE>
where
    SPI: SpiDevice,
    S: FrameSource,
{
    fn turn_on(&mut self, now: Instant) {
        self.on = true;
        self.last_toggle = Some(now);
        self.scheduler.start(now);
        #[cfg(feature = "esp32-log")]
        println!("blinken: switch on");
    }

    fn turn_off(&mut self, now: Instant) {
        self.on = false;
        self.last_toggle = Some(now);
        self.scheduler.stop();
        #[cfg(feature = "esp32-log")]
        println!("blinken: switch off");
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
