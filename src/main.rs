//! RustFunctionGenerator - Main entry point
//!
//! Startup order matters: waveform tables and the generator context
//! are built and validated first, then peripherals are brought up, and
//! only then is the signal timer armed. Any failure before that point
//! aborts startup; there is no degraded mode.

#![cfg_attr(feature = "esp32s3", no_std)]
#![cfg_attr(feature = "esp32s3", no_main)]

#[cfg(feature = "esp32s3")]
use esp_idf_svc::sys as esp_idf_sys;

#[cfg(feature = "esp32s3")]
use esp_idf_svc::hal::{
    delay::FreeRtos,
    i2c::{I2cConfig, I2cDriver},
    ledc::{LedcDriver, LedcTimerDriver},
    peripherals::Peripherals,
    timer::{self, TimerDriver},
    units::Hertz,
};

#[cfg(feature = "esp32s3")]
use rust_function_generator::{
    config::{
        lcd, signal_tick_hz, CONTROL_LOOP_PERIOD_MS, SIGNAL_TIMER_DIVIDER,
        SIGNAL_TIMER_PERIOD_TICKS, TABLE_RESOLUTION,
    },
    hal::{pwm, ControlPanel, Lcd1602, PwmDuty},
    rt_info,
    uart_logger::{drain_to_uart, init_uart_logger, UartLoggerConfig},
    ControlConfig, ControlStateMachine, GeneratorCore, TableBank, LOG_STREAM,
};

// The one generator context, installed at startup and referenced by
// both the signal-timer callback and the polling loop. Built at
// runtime because the table half-period comes from the PWM driver.
#[cfg(feature = "esp32s3")]
static mut GENERATOR: Option<GeneratorCore> = None;

/// Install the generator context (call once at startup).
#[cfg(feature = "esp32s3")]
fn init_generator(bank: TableBank<TABLE_RESOLUTION>) -> &'static GeneratorCore {
    unsafe {
        GENERATOR = Some(GeneratorCore::new(bank));
        GENERATOR.as_ref().unwrap()
    }
}

#[cfg(feature = "esp32s3")]
#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    let peripherals = Peripherals::take().expect("peripherals already taken");

    // PWM carrier: 200 kHz LEDC channel on GPIO38
    let carrier_timer = LedcTimerDriver::new(peripherals.ledc.timer0, &pwm::carrier_timer_config())
        .expect("PWM timer setup failed");
    let carrier = LedcDriver::new(
        peripherals.ledc.channel0,
        carrier_timer,
        peripherals.pins.gpio38,
    )
    .expect("PWM channel setup failed");
    let mut duty = PwmDuty::new(carrier);

    // Waveform tables: fatal if the resolution is misconfigured
    let bank = TableBank::build(duty.half_period()).expect("table configuration invalid");
    let core = init_generator(bank);

    // Panel inputs
    let panel = ControlPanel::new(
        peripherals.pins.gpio21,
        peripherals.pins.gpio14,
        peripherals.pins.gpio48,
        peripherals.pins.gpio47,
    )
    .expect("GPIO setup failed");

    // I2C bus + LCD
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio4,
        peripherals.pins.gpio5,
        &I2cConfig::new().baudrate(Hertz(lcd::I2C_BAUD_HZ)),
    )
    .expect("I2C bus setup failed");
    let mut display = Lcd1602::new(i2c, lcd::ADDRESS);
    display.init().expect("LCD init failed");

    // UART log drain
    let mut uart = init_uart_logger(
        peripherals.uart1,
        peripherals.pins.gpio6,
        &UartLoggerConfig::default(),
    )
    .expect("UART logger setup failed");

    // Signal timer: 20 MHz counts, alarm every 150 -> 133.3 kHz tick
    let timer_config = timer::config::Config::new()
        .divider(SIGNAL_TIMER_DIVIDER)
        .auto_reload(true);
    let mut signal_timer =
        TimerDriver::new(peripherals.timer00, &timer_config).expect("signal timer setup failed");
    signal_timer
        .set_alarm(SIGNAL_TIMER_PERIOD_TICKS)
        .expect("signal timer alarm failed");

    // SAFETY: the tick callback is allocation-free, never blocks and
    // only touches the generator context and the duty sink.
    unsafe {
        signal_timer
            .subscribe(move || core.tick(&mut duty))
            .expect("signal timer subscribe failed");
    }
    signal_timer
        .enable_interrupt()
        .expect("signal timer interrupt failed");
    signal_timer
        .enable_alarm(true)
        .expect("signal timer alarm enable failed");
    signal_timer.enable(true).expect("signal timer start failed");

    let mut control = ControlStateMachine::new(
        ControlConfig::new(signal_tick_hz(), TABLE_RESOLUTION),
        &LOG_STREAM,
    );

    let now = timestamp_us();
    rt_info!(LOG_STREAM, now, "Tables populated successfully");
    rt_info!(LOG_STREAM, now, "Default waveform: SINE");
    rt_info!(LOG_STREAM, now, "Signal tick frequency: {} Hz", signal_tick_hz());

    // Polling loop: debounce + control pass, then LCD/log drain
    loop {
        FreeRtos::delay_ms(CONTROL_LOOP_PERIOD_MS);

        let now = timestamp_us();
        control.tick(now, panel.read(), core.params(), &mut display);

        drain_to_uart(&LOG_STREAM, &mut uart);
    }
}

#[cfg(feature = "esp32s3")]
fn timestamp_us() -> i64 {
    unsafe { esp_idf_sys::esp_timer_get_time() }
}

// Host builds (tests) have no hardware entry point.
#[cfg(not(feature = "esp32s3"))]
fn main() {}
