//! Control state machine tests

use rust_function_generator::logging::LogStream;
use rust_function_generator::{
    ControlConfig, ControlInputs, ControlStateMachine, DisplaySink, SharedParams, Waveform,
};

const MS: i64 = 1_000;

#[derive(Default)]
struct FakeDisplay {
    clears: u32,
    writes: Vec<(u8, u8, String)>,
}

impl DisplaySink for FakeDisplay {
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn write_at(&mut self, row: u8, col: u8, text: &str) {
        self.writes.push((row, col, text.to_string()));
    }
}

fn machine(log: &LogStream) -> ControlStateMachine<'_> {
    ControlStateMachine::new(ControlConfig::new(133_333, 128), log)
}

/// Hold a raw input level across ticks, 10 ms apart.
fn hold(
    csm: &mut ControlStateMachine<'_>,
    params: &SharedParams,
    display: &mut FakeDisplay,
    bits: u8,
    start_us: i64,
    ticks: u32,
) -> i64 {
    let mut t = start_us;
    for _ in 0..ticks {
        csm.tick(t, ControlInputs::from_bits(bits), params, display);
        t += 10 * MS;
    }
    t
}

#[test]
fn test_n_decrement_clamps_at_one() {
    let log = LogStream::new();
    let params = SharedParams::new();
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    assert_eq!(params.samples_per_step(), 1);
    hold(&mut csm, &params, &mut display, ControlInputs::FREQ_UP, 60 * MS, 10);
    assert_eq!(params.samples_per_step(), 1, "N must floor at 1, not 0");
}

#[test]
fn test_n_increment_clamps_at_200() {
    let log = LogStream::new();
    let params = SharedParams::new();
    params.set_samples_per_step(195);
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    hold(&mut csm, &params, &mut display, ControlInputs::FREQ_DOWN, 60 * MS, 20);
    assert_eq!(params.samples_per_step(), 200);
}

#[test]
fn test_amplitude_120_decrements_floor_at_one_percent() {
    let log = LogStream::new();
    let params = SharedParams::new();
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    assert_eq!(params.amplitude_pct(), 100);
    hold(&mut csm, &params, &mut display, ControlInputs::AMP_DOWN, 60 * MS, 120);
    assert_eq!(params.amplitude_pct(), 1, "amplitude must floor at 0.01");
}

#[test]
fn test_amplitude_increment_reaches_exactly_full_scale() {
    let log = LogStream::new();
    let params = SharedParams::new();
    params.set_amplitude_pct(90);
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    hold(&mut csm, &params, &mut display, ControlInputs::AMP_UP, 60 * MS, 30);
    assert_eq!(params.amplitude_pct(), 100);
}

#[test]
fn test_four_chord_events_cycle_back_to_sine() {
    let log = LogStream::new();
    let params = SharedParams::new();
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    let chord = ControlInputs::AMP_UP | ControlInputs::AMP_DOWN;

    assert_eq!(params.waveform(), Waveform::Sine);

    let t = hold(&mut csm, &params, &mut display, chord, 60 * MS, 1);
    assert_eq!(params.waveform(), Waveform::Square);

    let t = hold(&mut csm, &params, &mut display, chord, t, 1);
    assert_eq!(params.waveform(), Waveform::Sawtooth);

    let t = hold(&mut csm, &params, &mut display, chord, t, 1);
    assert_eq!(params.waveform(), Waveform::Triangle);

    hold(&mut csm, &params, &mut display, chord, t, 1);
    assert_eq!(params.waveform(), Waveform::Sine);
}

#[test]
fn test_display_refreshed_on_frequency_change() {
    let log = LogStream::new();
    let params = SharedParams::new();
    params.set_samples_per_step(100);
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    hold(&mut csm, &params, &mut display, ControlInputs::FREQ_DOWN, 60 * MS, 1);

    assert_eq!(display.clears, 1);
    // Row 0 carries the computed frequency, row 1 the amplitude
    assert!(display.writes[0].2.starts_with("Freq: "));
    assert!(display.writes[1].2.starts_with("Amp: "));
    // 133333 / (128 * 101) = 10.31 Hz
    assert!(display.writes[0].2.contains("10.31"));
}

#[test]
fn test_change_is_logged() {
    let log = LogStream::new();
    let params = SharedParams::new();
    params.set_samples_per_step(100);
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    hold(&mut csm, &params, &mut display, ControlInputs::FREQ_DOWN, 60 * MS, 1);

    let entry = log.drain().expect("frequency change must be logged");
    let text = std::str::from_utf8(&entry.msg[..entry.len as usize]).unwrap();
    assert!(text.contains("Frequency"));
    assert!(text.contains("101"));
}

#[test]
fn test_held_toggle_sweeps_once_per_tick() {
    let log = LogStream::new();
    let params = SharedParams::new();
    params.set_samples_per_step(50);
    let mut csm = machine(&log);
    let mut display = FakeDisplay::default();

    // One accepted press edge, then the raw level drops; the toggled
    // flag keeps the sweep running anyway
    csm.tick(
        60 * MS,
        ControlInputs::from_bits(ControlInputs::FREQ_DOWN),
        &params,
        &mut display,
    );
    for k in 1..=5 {
        csm.tick(60 * MS + k * 10 * MS, ControlInputs::IDLE, &params, &mut display);
    }

    assert_eq!(params.samples_per_step(), 56);
}
