//! Hardware Abstraction Layer for RustFunctionGenerator.
//!
//! Thin wrappers around ESP-IDF peripherals. Business logic stays in
//! core modules, HAL is just I/O.

#[cfg(feature = "esp32s3")]
pub mod gpio;
#[cfg(feature = "esp32s3")]
pub mod lcd;
#[cfg(feature = "esp32s3")]
pub mod pwm;

#[cfg(feature = "esp32s3")]
pub use gpio::ControlPanel;
#[cfg(feature = "esp32s3")]
pub use lcd::Lcd1602;
#[cfg(feature = "esp32s3")]
pub use pwm::PwmDuty;
