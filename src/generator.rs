//! Sample stepper and shared generator state.
//!
//! The stepper runs once per signal-timer tick in the high-priority
//! context: it divides the tick rate by N (samples-per-step), advances
//! through the active table, scales by amplitude and pushes the result
//! to the duty-cycle sink. The control loop adjusts N, amplitude and
//! the active shape from the polling context.
//!
//! # Rules
//!
//! - The tick path never blocks, never allocates, never touches the
//!   display.
//! - Cross-context scalars (N, amplitude, shape tag) are atomics:
//!   written with `Release` by the polling context, read with
//!   `Acquire` by the tick context. Tables are immutable after
//!   construction, so the tag read can never yield a torn table.
//! - `tick_counter` and `table_index` belong to the tick context only.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

use crate::config::{AMPLITUDE_MAX_PCT, SAMPLES_PER_STEP_MIN};
use crate::waveform::{TableBank, Waveform};

/// Hardware duty-cycle output.
///
/// Fire-and-forget: the stepper does not inspect the write for
/// success. Implementations must be non-blocking and must tolerate
/// being called from the tick context.
pub trait DutySink {
    fn set_duty(&mut self, ticks: u32);
}

/// Cross-context generator parameters.
///
/// Written only by the polling context, read only by the tick context.
pub struct SharedParams {
    /// Samples-per-step (N): ticks per table advance.
    samples_per_step: AtomicU16,

    /// Amplitude in hundredths of full scale (1..=100).
    ///
    /// Integer hundredths keep the tick path integer-only and make the
    /// 0.01-step clamp arithmetic exact.
    amplitude_pct: AtomicU8,

    /// Active waveform tag (`Waveform as u8`).
    waveform: AtomicU8,
}

impl SharedParams {
    /// Defaults: N = 1 (highest frequency), full amplitude, sine.
    pub const fn new() -> Self {
        Self {
            samples_per_step: AtomicU16::new(SAMPLES_PER_STEP_MIN),
            amplitude_pct: AtomicU8::new(AMPLITUDE_MAX_PCT),
            waveform: AtomicU8::new(Waveform::Sine as u8),
        }
    }

    #[inline]
    pub fn samples_per_step(&self) -> u16 {
        self.samples_per_step.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_samples_per_step(&self, n: u16) {
        self.samples_per_step.store(n, Ordering::Release);
    }

    #[inline]
    pub fn amplitude_pct(&self) -> u8 {
        self.amplitude_pct.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_amplitude_pct(&self, pct: u8) {
        self.amplitude_pct.store(pct, Ordering::Release);
    }

    #[inline]
    pub fn waveform(&self) -> Waveform {
        Waveform::from_u8(self.waveform.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set_waveform(&self, shape: Waveform) {
        self.waveform.store(shape as u8, Ordering::Release);
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick-context stepper state.
///
/// `tick_counter` stays below N except at the instant of rollover;
/// `table_index` wraps via bitmask (R is a power of two).
pub struct SampleStepper {
    tick_counter: u16,
    table_index: usize,
}

impl SampleStepper {
    pub const fn new() -> Self {
        Self {
            tick_counter: 0,
            table_index: 0,
        }
    }

    /// Advance one signal-timer tick.
    ///
    /// Emits at most one duty write: exactly one per N-tick rollover,
    /// none on the ticks in between. The effective output frequency is
    /// tick_hz / (R * N).
    ///
    /// # Timing
    ///
    /// O(1), integer-only, no allocation. Safe for the highest-priority
    /// execution context.
    #[inline]
    pub fn step<const R: usize>(
        &mut self,
        bank: &TableBank<R>,
        params: &SharedParams,
        sink: &mut impl DutySink,
    ) {
        self.tick_counter += 1;
        if self.tick_counter < params.samples_per_step() {
            return;
        }

        self.table_index = (self.table_index + 1) & (R - 1);

        let sample = bank.sample(params.waveform(), self.table_index) as u32;
        let amplitude = params.amplitude_pct() as u32;
        let duty = (sample * amplitude + 50) / 100;

        sink.set_duty(duty);
        self.tick_counter = 0;
    }

    #[inline]
    pub fn table_index(&self) -> usize {
        self.table_index
    }
}

impl Default for SampleStepper {
    fn default() -> Self {
        Self::new()
    }
}

/// The generator context shared by both execution contexts.
///
/// One explicit object owned by the process root: the tick callback
/// and the polling loop both hold a reference to it. The table bank is
/// immutable, the parameter block is atomic, and the stepper state is
/// mutated only from the tick context.
///
/// # Safety
///
/// `Sync` is sound because the `UnsafeCell` stepper state is accessed
/// exclusively through `tick()`, which runs in a single execution
/// context (the signal-timer callback); the polling context only
/// touches `params()` and `bank()`.
pub struct GeneratorCore<const R: usize = { crate::config::TABLE_RESOLUTION }> {
    bank: TableBank<R>,
    params: SharedParams,
    stepper: UnsafeCell<SampleStepper>,
}

// SAFETY: single tick-context writer for the stepper state, atomic
// coordination for everything shared. See struct docs.
unsafe impl<const R: usize> Sync for GeneratorCore<R> {}
unsafe impl<const R: usize> Send for GeneratorCore<R> {}

impl<const R: usize> GeneratorCore<R> {
    pub const fn new(bank: TableBank<R>) -> Self {
        Self {
            bank,
            params: SharedParams::new(),
            stepper: UnsafeCell::new(SampleStepper::new()),
        }
    }

    /// Run one signal-timer tick. Call only from the tick context.
    #[inline]
    pub fn tick(&self, sink: &mut impl DutySink) {
        // SAFETY: single caller context, no aliasing (struct invariant).
        let stepper = unsafe { &mut *self.stepper.get() };
        stepper.step(&self.bank, &self.params, sink);
    }

    #[inline]
    pub fn params(&self) -> &SharedParams {
        &self.params
    }

    #[inline]
    pub fn bank(&self) -> &TableBank<R> {
        &self.bank
    }
}

/// Effective output frequency for a given samples-per-step.
///
/// `tick_hz / (resolution * n)`: the stepper needs R*N ticks to walk
/// one full table cycle.
#[inline]
pub fn counts_to_frequency(tick_hz: u32, resolution: usize, n: u16) -> f32 {
    tick_hz as f32 / (resolution as u32 * n as u32) as f32
}
