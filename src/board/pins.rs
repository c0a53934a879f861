//! Pin definitions for the LilyGO T-Display-S3
//!
//! This module contains all GPIO pin assignments used in the hardware configuration.

/// Pin configuration constants for the ST7789V display and peripherals
pub struct Pins;

#[allow(dead_code)]
impl Pins {
    // Parallel display bus, D0..D7
    pub const LCD_D0: i32 = 39;
    pub const LCD_D1: i32 = 40;
    pub const LCD_D2: i32 = 41;
    pub const LCD_D3: i32 = 42;
    pub const LCD_D4: i32 = 45;
    pub const LCD_D5: i32 = 46;
    pub const LCD_D6: i32 = 47;
    pub const LCD_D7: i32 = 48;
    /// Write strobe (pixel clock)
    pub const LCD_WR: i32 = 8;
    /// Read strobe, unused by the bus but must idle high
    pub const LCD_RD: i32 = 9;
    /// Data/Command select (High for data, Low for command)
    pub const LCD_DC: i32 = 7;
    /// Chip Select
    pub const LCD_CS: i32 = 6;
    /// Controller reset
    pub const LCD_RES: i32 = 5;
    /// Backlight PWM
    pub const LCD_BL: i32 = 38;
    /// Display power rail enable
    pub const LCD_POWER_ON: i32 = 15;

    // Button pins, active low
    /// BOOT button
    pub const BUTTON_1: i32 = 0;
    /// Side button
    pub const BUTTON_2: i32 = 14;

    // Other pins
    /// Battery voltage divider, ADC input
    pub const BAT_VOLT: i32 = 4;
}
