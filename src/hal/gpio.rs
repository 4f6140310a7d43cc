//! Control-panel input pins.
//!
//! Four pulldown digital inputs, one per control channel. Reading a
//! level is a cheap register access; the panel is polled once per
//! control tick.

use esp_idf_svc::hal::gpio::{Gpio14, Gpio21, Gpio47, Gpio48, Input, PinDriver, Pull};
use esp_idf_svc::sys::EspError;

use crate::control::ControlInputs;

/// The four panel inputs, named by their control effect.
pub struct ControlPanel<'d> {
    freq_up: PinDriver<'d, Gpio21, Input>,
    freq_down: PinDriver<'d, Gpio14, Input>,
    amp_up: PinDriver<'d, Gpio48, Input>,
    amp_down: PinDriver<'d, Gpio47, Input>,
}

impl<'d> ControlPanel<'d> {
    /// Configure all four pins as pulldown inputs.
    pub fn new(
        freq_up: Gpio21,
        freq_down: Gpio14,
        amp_up: Gpio48,
        amp_down: Gpio47,
    ) -> Result<Self, EspError> {
        let mut freq_up = PinDriver::input(freq_up)?;
        freq_up.set_pull(Pull::Down)?;
        let mut freq_down = PinDriver::input(freq_down)?;
        freq_down.set_pull(Pull::Down)?;
        let mut amp_up = PinDriver::input(amp_up)?;
        amp_up.set_pull(Pull::Down)?;
        let mut amp_down = PinDriver::input(amp_down)?;
        amp_down.set_pull(Pull::Down)?;

        Ok(Self {
            freq_up,
            freq_down,
            amp_up,
            amp_down,
        })
    }

    /// Snapshot the raw levels of all four channels.
    #[inline]
    pub fn read(&self) -> ControlInputs {
        let mut bits = 0u8;
        if self.freq_up.is_high() {
            bits |= ControlInputs::FREQ_UP;
        }
        if self.freq_down.is_high() {
            bits |= ControlInputs::FREQ_DOWN;
        }
        if self.amp_up.is_high() {
            bits |= ControlInputs::AMP_UP;
        }
        if self.amp_down.is_high() {
            bits |= ControlInputs::AMP_DOWN;
        }
        ControlInputs::from_bits(bits)
    }
}
