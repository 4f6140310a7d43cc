//! Status display formatting.
//!
//! Formats the computed output frequency and the amplitude into
//! fixed-width strings and pushes them to the display sink at fixed
//! positions. Called only from the polling context; the sink may
//! block for milliseconds.

use crate::logging::format_to_buffer;

/// External character display.
///
/// Writes are fire-and-forget; the presenter does not inspect them
/// for success.
pub trait DisplaySink {
    fn clear(&mut self);
    fn write_at(&mut self, row: u8, col: u8, text: &str);
}

/// Row buffer length: one display line.
const ROW_LEN: usize = crate::config::lcd::COLS as usize;

/// Formats generator state for the status display.
///
/// No state beyond the format buffer.
pub struct DisplayPresenter {
    buf: [u8; ROW_LEN],
}

impl DisplayPresenter {
    pub const fn new() -> Self {
        Self { buf: [0; ROW_LEN] }
    }

    /// Clear the display and write the frequency row.
    pub fn show_frequency(&mut self, sink: &mut impl DisplaySink, hz: f32) {
        sink.clear();
        self.write_frequency(sink, hz);
    }

    /// Write the amplitude row (no clear).
    pub fn show_amplitude(&mut self, sink: &mut impl DisplaySink, amplitude: f32) {
        let len = format_to_buffer(&mut self.buf, format_args!("Amp: {:4.2}", amplitude));
        let text = core::str::from_utf8(&self.buf[..len]).unwrap_or("");
        sink.write_at(1, 0, text);
    }

    /// Full refresh: clear, then both rows.
    pub fn refresh(&mut self, sink: &mut impl DisplaySink, hz: f32, amplitude: f32) {
        sink.clear();
        self.write_frequency(sink, hz);
        self.show_amplitude(sink, amplitude);
    }

    fn write_frequency(&mut self, sink: &mut impl DisplaySink, hz: f32) {
        let len = format_to_buffer(&mut self.buf, format_args!("Freq: {:7.2}", hz));
        let text = core::str::from_utf8(&self.buf[..len]).unwrap_or("");
        sink.write_at(0, 0, text);
    }
}

impl Default for DisplayPresenter {
    fn default() -> Self {
        Self::new()
    }
}
