//! Control state machine.
//!
//! Runs once per polling tick (much slower than the sample tick).
//! Debounces the four panel inputs, maintains a toggled logic flag per
//! channel, and maps active flags to live parameter changes: frequency
//! divisor, amplitude, waveform selection. Changes are clamped, never
//! rejected, and reflected on the display.
//!
//! Pure logic, no hardware dependencies. The caller snapshots the raw
//! pin levels into a [`ControlInputs`] byte and provides the display
//! sink.

use crate::config::{
    AMPLITUDE_MAX_PCT, AMPLITUDE_MIN_PCT, SAMPLES_PER_STEP_MAX, SAMPLES_PER_STEP_MIN,
};
use crate::debounce::DebouncedInput;
use crate::display::{DisplayPresenter, DisplaySink};
use crate::generator::{counts_to_frequency, SharedParams};
use crate::logging::LogStream;
use crate::rt_info;

/// Raw panel input levels, one bit per channel.
///
/// Bit layout:
/// - Bit 0: frequency up (decrements samples-per-step)
/// - Bit 1: frequency down (increments samples-per-step)
/// - Bit 2: amplitude up
/// - Bit 3: amplitude down
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ControlInputs(u8);

impl ControlInputs {
    pub const FREQ_UP: u8 = 0x01;
    pub const FREQ_DOWN: u8 = 0x02;
    pub const AMP_UP: u8 = 0x04;
    pub const AMP_DOWN: u8 = 0x08;

    /// No inputs active.
    pub const IDLE: Self = Self(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn freq_up(&self) -> bool {
        (self.0 & Self::FREQ_UP) != 0
    }

    pub const fn freq_down(&self) -> bool {
        (self.0 & Self::FREQ_DOWN) != 0
    }

    pub const fn amp_up(&self) -> bool {
        (self.0 & Self::AMP_UP) != 0
    }

    pub const fn amp_down(&self) -> bool {
        (self.0 & Self::AMP_DOWN) != 0
    }
}

/// Channel indexes into the per-channel state arrays.
const CH_FREQ_UP: usize = 0;
const CH_FREQ_DOWN: usize = 1;
const CH_AMP_UP: usize = 2;
const CH_AMP_DOWN: usize = 3;
const CHANNELS: usize = 4;

/// Control state machine configuration.
#[derive(Clone, Copy, Debug)]
pub struct ControlConfig {
    /// Sample tick frequency, for the displayed output frequency.
    pub tick_hz: u32,
    /// Table resolution, for the displayed output frequency.
    pub resolution: usize,
}

impl ControlConfig {
    pub const fn new(tick_hz: u32, resolution: usize) -> Self {
        Self {
            tick_hz,
            resolution,
        }
    }
}

/// Maps debounced input transitions to live parameter changes.
///
/// Each accepted transition on a channel flips that channel's logic
/// flag; the control effect is driven by flag state, not by the raw
/// pin level. While a flag is active its adjustment repeats every
/// control tick (hold-to-sweep behavior).
pub struct ControlStateMachine<'a> {
    config: ControlConfig,
    inputs: [DebouncedInput; CHANNELS],
    active: [bool; CHANNELS],
    presenter: DisplayPresenter,
    log: &'a LogStream,
}

impl<'a> ControlStateMachine<'a> {
    pub fn new(config: ControlConfig, log: &'a LogStream) -> Self {
        Self {
            config,
            inputs: [
                DebouncedInput::new(),
                DebouncedInput::new(),
                DebouncedInput::new(),
                DebouncedInput::new(),
            ],
            active: [false; CHANNELS],
            presenter: DisplayPresenter::new(),
            log,
        }
    }

    /// Run one control pass.
    ///
    /// Fixed priority order: frequency up, frequency down, amplitude
    /// up, amplitude down, then the amplitude chord (both amplitude
    /// flags active) which advances the waveform. All adjustments
    /// clamp silently at their bounds; an actual change to N or
    /// amplitude refreshes the display.
    pub fn tick(
        &mut self,
        now_us: i64,
        raw: ControlInputs,
        params: &SharedParams,
        display: &mut impl DisplaySink,
    ) {
        let levels = [
            raw.freq_up(),
            raw.freq_down(),
            raw.amp_up(),
            raw.amp_down(),
        ];

        for ch in 0..CHANNELS {
            if self.inputs[ch].update(levels[ch], now_us).is_some() {
                self.active[ch] = !self.active[ch];
            }
        }

        let mut n = params.samples_per_step();
        let mut amplitude = params.amplitude_pct();
        let n_before = n;
        let amplitude_before = amplitude;

        if self.active[CH_FREQ_UP] {
            n = n.saturating_sub(1).max(SAMPLES_PER_STEP_MIN);
        }
        if self.active[CH_FREQ_DOWN] {
            n = (n + 1).min(SAMPLES_PER_STEP_MAX);
        }
        if self.active[CH_AMP_UP] {
            amplitude = (amplitude + 1).min(AMPLITUDE_MAX_PCT);
        }
        if self.active[CH_AMP_DOWN] {
            amplitude = amplitude.saturating_sub(1).max(AMPLITUDE_MIN_PCT);
        }

        if self.active[CH_AMP_UP] && self.active[CH_AMP_DOWN] {
            let shape = params.waveform().next();
            params.set_waveform(shape);
            rt_info!(self.log, now_us, "Selected waveform: {}", shape.as_str());
        }

        let n_changed = n != n_before;
        let amplitude_changed = amplitude != amplitude_before;

        if n_changed {
            params.set_samples_per_step(n);
            rt_info!(
                self.log,
                now_us,
                "Frequency {} | N {}",
                self.frequency(n),
                n
            );
        }
        if amplitude_changed {
            params.set_amplitude_pct(amplitude);
            rt_info!(
                self.log,
                now_us,
                "Amplitude {}",
                amplitude as f32 / 100.0
            );
        }

        if n_changed || amplitude_changed {
            self.presenter
                .refresh(display, self.frequency(n), amplitude as f32 / 100.0);
        }
    }

    /// Current logic flag for a channel (visible for tests).
    pub fn channel_active(&self, ch: usize) -> bool {
        self.active[ch]
    }

    fn frequency(&self, n: u16) -> f32 {
        counts_to_frequency(self.config.tick_hz, self.config.resolution, n)
    }
}
