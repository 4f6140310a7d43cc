//! Compile-time configuration for RustFunctionGenerator.
//!
//! All values are fixed at build time; there is no persisted
//! configuration. Timer rates and the table resolution mirror the
//! reference hardware setup: a 200 kHz PWM carrier modulated by a
//! 133.3 kHz sample tick.

/// PWM carrier frequency in Hz.
///
/// The duty cycle of this carrier is what the sample stepper
/// modulates. 200 kHz keeps the carrier far above the highest
/// synthesizable waveform frequency (~1 kHz).
pub const PWM_CARRIER_HZ: u32 = 200_000;

/// PWM duty resolution in bits. Max duty = 2^bits - 1.
pub const PWM_DUTY_RESOLUTION_BITS: u32 = 8;

/// Signal timer counts at 20 MHz (80 MHz APB clock / divider).
pub const SIGNAL_TIMER_DIVIDER: u32 = 4;

/// Signal timer resolution in Hz after the divider.
pub const SIGNAL_TIMER_RESOLUTION_HZ: u32 = 80_000_000 / SIGNAL_TIMER_DIVIDER;

/// Signal timer alarm period in counts. One sample tick per alarm.
pub const SIGNAL_TIMER_PERIOD_TICKS: u64 = 150;

/// Sample tick frequency in Hz (~133 333 Hz).
pub const fn signal_tick_hz() -> u32 {
    SIGNAL_TIMER_RESOLUTION_HZ / SIGNAL_TIMER_PERIOD_TICKS as u32
}

/// Number of samples per full waveform cycle. Must be a power of two
/// so the stepper can wrap the table index with a bitmask.
pub const TABLE_RESOLUTION: usize = 128;

/// Lower clamp for samples-per-step (N).
pub const SAMPLES_PER_STEP_MIN: u16 = 1;

/// Upper clamp for samples-per-step (N).
pub const SAMPLES_PER_STEP_MAX: u16 = 200;

/// Amplitude bounds in hundredths of full scale.
///
/// The floor is 0.01 (never fully silent) while the ceiling is exactly
/// 1.00; the asymmetry is deliberate and must not be "fixed".
pub const AMPLITUDE_MIN_PCT: u8 = 1;
pub const AMPLITUDE_MAX_PCT: u8 = 100;

/// Minimum stable time between accepted input transitions.
pub const DEBOUNCE_WINDOW_US: i64 = 50_000;

/// Polling/control loop period in milliseconds.
pub const CONTROL_LOOP_PERIOD_MS: u32 = 10;

/// Pin assignments (ESP32-S3 reference board).
pub mod pins {
    /// PWM carrier output.
    pub const PWM_OUT: u32 = 38;
    /// Channel A: decrement samples-per-step (raises frequency).
    pub const FREQ_UP: u32 = 21;
    /// Channel B: increment samples-per-step (lowers frequency).
    pub const FREQ_DOWN: u32 = 14;
    /// Channel C: raise amplitude.
    pub const AMP_UP: u32 = 48;
    /// Channel D: lower amplitude.
    pub const AMP_DOWN: u32 = 47;
    /// I2C bus for the LCD.
    pub const I2C_SDA: u32 = 4;
    pub const I2C_SCL: u32 = 5;
}

/// LCD geometry and bus settings.
pub mod lcd {
    /// PCF8574 backpack I2C address.
    pub const ADDRESS: u8 = 0x27;
    pub const ROWS: u8 = 2;
    pub const COLS: u8 = 16;
    pub const I2C_BAUD_HZ: u32 = 100_000;
}

/// UART log output settings (TX-only on GPIO6).
pub mod uart_log {
    pub const BAUD_RATE: u32 = 115_200;
    pub const TX_PIN: u8 = 6;
}
