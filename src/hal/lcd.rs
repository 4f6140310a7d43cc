//! 16x2 character LCD driver (HD44780 behind a PCF8574 I2C backpack).
//!
//! The controller runs in 4-bit mode: every byte goes out as two
//! nibbles, each strobed with the EN bit, with RS selecting between
//! the instruction and data registers. The backlight bit is kept high
//! on every transaction.
//!
//! Called only from the polling context; transactions block on the
//! I2C bus for up to a few milliseconds.

use esp_idf_svc::hal::delay::{Ets, FreeRtos, BLOCK};
use esp_idf_svc::hal::i2c::I2cDriver;
use esp_idf_svc::sys::EspError;

use crate::display::DisplaySink;

/// PCF8574 control bits (P0..P3 of the backpack).
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// HD44780 instructions used by this driver.
mod cmds {
    /// Clear display and return home.
    pub const CLEAR: u8 = 0x01;
    /// Entry mode: increment cursor, no shift.
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off.
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Display off.
    pub const DISPLAY_OFF: u8 = 0x08;
    /// Function set: 4-bit, 2 lines, 5x8 font.
    pub const FUNCTION_SET_4BIT: u8 = 0x28;
    /// DDRAM address bases for the two rows.
    pub const ROW0: u8 = 0x80;
    pub const ROW1: u8 = 0xC0;
}

/// 16x2 LCD behind a PCF8574 I2C expander.
pub struct Lcd1602<'d> {
    i2c: I2cDriver<'d>,
    addr: u8,
}

impl<'d> Lcd1602<'d> {
    /// Wrap an I2C bus; call [`init`](Self::init) before first use.
    pub fn new(i2c: I2cDriver<'d>, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Datasheet power-on sequence: three 8-bit function-set wakeups,
    /// switch to 4-bit mode, then configure and clear.
    pub fn init(&mut self) -> Result<(), EspError> {
        Ets::delay_us(50_000);
        self.send_cmd(0x30)?;
        Ets::delay_us(5_000);
        self.send_cmd(0x30)?;
        Ets::delay_us(200);
        self.send_cmd(0x30)?;
        Ets::delay_us(10_000);
        self.send_cmd(0x20)?;
        Ets::delay_us(10_000);

        self.send_cmd(cmds::FUNCTION_SET_4BIT)?;
        Ets::delay_us(1_000);
        self.send_cmd(cmds::DISPLAY_OFF)?;
        Ets::delay_us(1_000);
        self.send_cmd(cmds::CLEAR)?;
        FreeRtos::delay_ms(2);
        self.send_cmd(cmds::ENTRY_MODE)?;
        Ets::delay_us(1_000);
        self.send_cmd(cmds::DISPLAY_ON)?;
        Ets::delay_us(1_000);

        Ok(())
    }

    /// Clear the whole display. Blocks ~2 ms while the controller
    /// wipes DDRAM.
    pub fn clear_all(&mut self) -> Result<(), EspError> {
        self.send_cmd(cmds::CLEAR)?;
        FreeRtos::delay_ms(2);
        Ok(())
    }

    /// Move the cursor to (row, col).
    pub fn put_cursor(&mut self, row: u8, col: u8) -> Result<(), EspError> {
        let base = if row == 0 { cmds::ROW0 } else { cmds::ROW1 };
        self.send_cmd(base | col)
    }

    /// Write a string at the current cursor position.
    pub fn write_text(&mut self, text: &str) -> Result<(), EspError> {
        for byte in text.bytes() {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Send an instruction byte (RS = 0) as two strobed nibbles.
    fn send_cmd(&mut self, cmd: u8) -> Result<(), EspError> {
        let hi = cmd & 0xF0;
        let lo = (cmd << 4) & 0xF0;
        let frame = [
            hi | BACKLIGHT | EN,
            hi | BACKLIGHT,
            lo | BACKLIGHT | EN,
            lo | BACKLIGHT,
        ];
        self.i2c.write(self.addr, &frame, BLOCK)
    }

    /// Send a data byte (RS = 1) as two strobed nibbles.
    fn send_data(&mut self, data: u8) -> Result<(), EspError> {
        let hi = data & 0xF0;
        let lo = (data << 4) & 0xF0;
        let frame = [
            hi | BACKLIGHT | EN | RS,
            hi | BACKLIGHT | RS,
            lo | BACKLIGHT | EN | RS,
            lo | BACKLIGHT | RS,
        ];
        self.i2c.write(self.addr, &frame, BLOCK)
    }
}

/// Steady-state display writes are fire-and-forget: the presenter does
/// not inspect them and the core never retries.
impl<'d> DisplaySink for Lcd1602<'d> {
    fn clear(&mut self) {
        let _ = self.clear_all();
    }

    fn write_at(&mut self, row: u8, col: u8, text: &str) {
        if self.put_cursor(row, col).is_ok() {
            let _ = self.write_text(text);
        }
    }
}
