//! Global log stream instance.
//!
//! Single producer (the polling context; the sample tick never logs),
//! single consumer (the UART drain in the main loop).

use crate::logging::LogStream;

/// The firmware-wide log stream.
pub static LOG_STREAM: LogStream = LogStream::new();
