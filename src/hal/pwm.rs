//! PWM carrier output.
//!
//! A 200 kHz LEDC channel whose duty cycle is the generator's output
//! sample. The sample stepper writes the duty from the signal-timer
//! callback, so the sink must stay non-blocking.

use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, Resolution};
use esp_idf_svc::hal::units::Hertz;

use crate::config::{PWM_CARRIER_HZ, PWM_DUTY_RESOLUTION_BITS};
use crate::generator::DutySink;

/// LEDC timer configuration for the carrier.
pub fn carrier_timer_config() -> TimerConfig {
    TimerConfig::default()
        .frequency(Hertz(PWM_CARRIER_HZ))
        .resolution(Resolution::Bits8)
}

/// Duty-cycle sink backed by an LEDC channel.
///
/// Writes are fire-and-forget and pre-clamped to the hardware duty
/// range.
pub struct PwmDuty<'d> {
    channel: LedcDriver<'d>,
    max_duty: u32,
}

impl<'d> PwmDuty<'d> {
    pub fn new(channel: LedcDriver<'d>) -> Self {
        let max_duty = channel.get_max_duty();
        debug_assert_eq!(max_duty, (1u32 << PWM_DUTY_RESOLUTION_BITS) - 1);
        Self { channel, max_duty }
    }

    /// Maximum duty value the hardware accepts.
    #[inline]
    pub fn max_duty(&self) -> u32 {
        self.max_duty
    }

    /// Half the duty range: the waveform tables' half-period.
    #[inline]
    pub fn half_period(&self) -> u16 {
        (self.max_duty / 2) as u16
    }
}

impl<'d> DutySink for PwmDuty<'d> {
    #[inline]
    fn set_duty(&mut self, ticks: u32) {
        let _ = self.channel.set_duty(ticks.min(self.max_duty));
    }
}
