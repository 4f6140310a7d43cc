//! # RustFunctionGenerator
//!
//! Four-waveform PWM function generator with live panel controls.
//!
//! ## Architecture
//!
//! Two execution contexts share one [`GeneratorCore`]:
//! - The signal-timer callback steps through the active waveform table
//!   and writes the PWM duty (high priority, never blocks).
//! - The polling loop debounces the panel inputs, applies clamped
//!   parameter changes and refreshes the LCD (low rate, may block).
//!
//! Cross-context parameters are atomics; waveform selection is a tag
//! into an immutable table bank, so a switch is always observed whole.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod debounce;
pub mod display;
pub mod error;
pub mod generator;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod uart_logger;
pub mod waveform;

pub use control::{ControlConfig, ControlInputs, ControlStateMachine};
pub use debounce::DebouncedInput;
pub use display::{DisplayPresenter, DisplaySink};
pub use error::ConfigError;
pub use generator::{counts_to_frequency, DutySink, GeneratorCore, SampleStepper, SharedParams};
pub use log_globals::LOG_STREAM;
pub use waveform::{TableBank, Waveform};
