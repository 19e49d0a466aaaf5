use std::{
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
    time::Instant,
};

/// Seconds between two timer decrements.
pub const TIMER_PERIOD: f32 = 1.0 / 60.0;

/// Handles the updating of the `Chip8` sound and delay timers. The `delay_timer` and
/// the `sound_timer` are decremented by `1` at a rate of `60Hz` of wall-clock time,
/// no matter how many instructions run in between.
pub struct Clock {
    pub delay_timer: u8,
    sound_timer: Arc<AtomicU8>,
    last_tick: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            delay_timer: Default::default(),
            sound_timer: Default::default(),
            last_tick: Instant::now(),
        }
    }
}

impl Clock {
    /// Create a new [`Clock`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the delay and sound timers as if the current time was `now`.
    ///
    /// Each timer goes down by at most one per call, even if several
    /// periods have passed since the last decrement.
    pub fn update_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed.as_secs_f32() < TIMER_PERIOD {
            return;
        }

        self.delay_timer = self.delay_timer.saturating_sub(1);
        // only the processor writes the sound timer, readers just poll it
        let sound = self.sound_timer.load(Ordering::SeqCst);
        if sound > 0 {
            self.sound_timer.store(sound - 1, Ordering::SeqCst);
        }

        self.last_tick = now;
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.load(Ordering::SeqCst)
    }

    pub fn set_sound_timer(&self, value: u8) {
        self.sound_timer.store(value, Ordering::SeqCst);
    }

    /// A shared handle to the sound timer, for audio hosts that
    /// play a tone while it is above `0`.
    pub fn sound_timer_handle(&self) -> Arc<AtomicU8> {
        self.sound_timer.clone()
    }

    /// The instant of the last timer decrement (or creation/reset).
    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Zero both timers and restart the timer period at `now`.
    /// Sound timer handles stay connected.
    pub fn reset_at(&mut self, now: Instant) {
        self.delay_timer = 0;
        self.sound_timer.store(0, Ordering::SeqCst);
        self.last_tick = now;
    }
}
