//! UART log output on GPIO6.
//!
//! TX-only UART for system logging; requires an external USB-UART
//! adapter (CH340, CP2102, etc). The main loop calls [`drain_to_uart`]
//! once per polling pass, after the control work is done.

use crate::logging::LogEntry;

#[cfg(feature = "esp32s3")]
use crate::logging::LogStream;

#[cfg(feature = "esp32s3")]
use esp_idf_svc::hal::gpio;
#[cfg(feature = "esp32s3")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(feature = "esp32s3")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// UART configuration for logging.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: crate::config::uart_log::BAUD_RATE,
            tx_pin: crate::config::uart_log::TX_PIN,
        }
    }
}

/// Format log entry to string.
///
/// Format: `[timestamp_us] LEVEL: message\n`
fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let text = core::str::from_utf8(&entry.msg[..entry.len as usize]).unwrap_or("<invalid utf8>");
    crate::logging::format_to_buffer(
        buf,
        format_args!("[{:10}] {}: {}\n", entry.timestamp_us, entry.level.as_str(), text),
    )
}

/// Initialize UART1 TX-only for logging output.
#[cfg(feature = "esp32s3")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = esp_idf_svc::hal::uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config =
        uart::config::Config::default().baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Write a single log entry to UART.
#[cfg(feature = "esp32s3")]
pub fn write_log_to_uart(uart: &mut UartTxDriver<'_>, entry: &LogEntry) {
    let mut format_buf = [0u8; 256];
    let len = format_log_entry(entry, &mut format_buf);
    let _ = uart.write(&format_buf[..len]);
}

/// Drain all pending log entries to UART.
///
/// Called from the polling loop after each control pass. Reports the
/// dropped-message count whenever entries were lost since the last
/// drain.
#[cfg(feature = "esp32s3")]
pub fn drain_to_uart(stream: &LogStream, uart: &mut UartTxDriver<'_>) {
    let mut format_buf = [0u8; 256];

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        let _ = uart.write(&format_buf[..len]);
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let len = crate::logging::format_to_buffer(
            &mut format_buf,
            format_args!("[WARN] Dropped log messages: {}\n", dropped),
        );
        let _ = uart.write(&format_buf[..len]);
        stream.reset_dropped();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            timestamp_us: 1234567,
            level: LogLevel::Info,
            len: 11,
            msg: {
                let mut msg = [0u8; 120];
                msg[..11].copy_from_slice(b"Hello world");
                msg
            },
        };

        let mut buf = [0u8; 256];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("1234567"));
        assert!(formatted.contains("INFO"));
        assert!(formatted.contains("Hello world"));
    }

    #[test]
    fn test_format_respects_entry_len() {
        let entry = LogEntry {
            timestamp_us: 999,
            level: LogLevel::Error,
            len: 5,
            msg: {
                let mut msg = [0u8; 120];
                msg[..10].copy_from_slice(b"TEST12345X"); // Only first 5 used
                msg
            },
        };

        let mut buf = [0u8; 256];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("TEST1"));
        assert!(!formatted.contains("X"));
    }
}
