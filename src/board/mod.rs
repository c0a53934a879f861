//! LilyGO T-Display-S3 board description
//!
//! Fixed wiring and timing for one board revision. Nothing here is read at
//! runtime.

pub mod pins;

pub use pins::Pins;

use anyhow::Result;

use crate::port::{DisplayConfig, Rotation};
use crate::st7789::interface::{
    BusConfig, DcLevels, IoConfig, PanelConfig, PanelWiring, RgbOrder,
};
use crate::st7789::{FRAME_BYTES, HEIGHT, WIDTH};

/// Pixel clock of the i80 bus
pub const LCD_PIXEL_CLOCK_HZ: u32 = 10 * 1000 * 1000;

/// Panel wiring and driver settings of the T-Display-S3
pub const T_DISPLAY_S3: PanelWiring = PanelWiring {
    bus: BusConfig {
        dc_gpio: Pins::LCD_DC,
        wr_gpio: Pins::LCD_WR,
        data_gpios: [
            Pins::LCD_D0,
            Pins::LCD_D1,
            Pins::LCD_D2,
            Pins::LCD_D3,
            Pins::LCD_D4,
            Pins::LCD_D5,
            Pins::LCD_D6,
            Pins::LCD_D7,
        ],
        // One full frame per transfer
        max_transfer_bytes: FRAME_BYTES,
        psram_trans_align: 64,
        sram_trans_align: 4,
    },
    io: IoConfig {
        cs_gpio: Pins::LCD_CS,
        pclk_hz: LCD_PIXEL_CLOCK_HZ,
        trans_queue_depth: 20,
        cmd_bits: 8,
        param_bits: 8,
        dc_levels: DcLevels {
            idle: false,
            cmd: false,
            dummy: false,
            data: true,
        },
    },
    panel: PanelConfig {
        reset_gpio: Pins::LCD_RES,
        rgb_order: RgbOrder::Rgb,
        bits_per_pixel: 16,
    },
    gap: (35, 0),
};

/// The one display surface registered with the graphics port
pub const DISPLAY: DisplayConfig = DisplayConfig {
    hres: WIDTH,
    vres: HEIGHT,
    double_buffer: true,
    rotation: Rotation {
        swap_xy: false,
        mirror_x: false,
        mirror_y: false,
    },
    // The panel takes RGB565 high byte first
    swap_bytes: true,
};

/// LEDC settings of the backlight channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightConfig {
    pub frequency_hz: u32,
    pub resolution_bits: u32,
    /// Brightness after boot, in percent
    pub duty_percent: u32,
}

impl BacklightConfig {
    /// Duty value at 100 %
    pub const fn max_duty(&self) -> u32 {
        1 << self.resolution_bits
    }

    /// Duty value for `percent` brightness, clamped to 100 %
    pub const fn duty_for(&self, percent: u32) -> u32 {
        let percent = if percent > 100 { 100 } else { percent };
        self.max_duty() * percent / 100
    }

    /// Duty value for the boot brightness
    pub const fn duty(&self) -> u32 {
        self.duty_for(self.duty_percent)
    }
}

/// 4 kHz, 13 bit, 50 %
pub const BACKLIGHT: BacklightConfig = BacklightConfig {
    frequency_hz: 4000,
    resolution_bits: 13,
    duty_percent: 50,
};

/// Backlight and power lines once the GPIO stage has run
pub trait BoardPower {
    /// Change the backlight duty and commit it
    fn set_backlight_duty(&mut self, duty: u32) -> Result<()>;

    /// Drive backlight, read strobe and power low, then release those pins
    fn power_down(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_brightness_is_half_of_13_bit_range() {
        assert_eq!(BACKLIGHT.max_duty(), 8192);
        assert_eq!(BACKLIGHT.duty(), 4096);
    }

    #[test]
    fn duty_is_clamped_to_full_scale() {
        assert_eq!(BACKLIGHT.duty_for(0), 0);
        assert_eq!(BACKLIGHT.duty_for(100), 8192);
        assert_eq!(BACKLIGHT.duty_for(250), 8192);
    }

    #[test]
    fn bus_transfer_fits_one_frame() {
        assert_eq!(T_DISPLAY_S3.bus.max_transfer_bytes, 170 * 320 * 2);
        assert_eq!(T_DISPLAY_S3.bus.data_gpios, [39, 40, 41, 42, 45, 46, 47, 48]);
    }

    #[test]
    fn only_the_data_phase_drives_dc_high() {
        let levels = T_DISPLAY_S3.io.dc_levels;
        assert!(!levels.idle && !levels.cmd && !levels.dummy);
        assert!(levels.data);
    }
}
