//! ST7789V panel driver glue
//!
//! Used with the 1.9" 170x320 IPS module on the LilyGO T-Display-S3, wired to
//! the ESP32-S3 LCD peripheral as an 8-bit Intel 8080 bus.
//!
//! ### Usage
//! The controller itself is driven by the vendor `esp_lcd` driver. This module
//! adds what the vendor driver does not know about this module:
//!
//! 1. the board wiring, see [`interface::PanelWiring`]
//! 1. the vendor init script, see [`init_table::ST7789V_INIT`]
//! 1. the bring-up order, see [`driver::bring_up`]
//!
//! ```rust,ignore
//! let panel = st7789::driver::bring_up(EspLcd, &board::T_DISPLAY_S3, &ST7789V_INIT, &mut delay)?;
//! let surface = panel.surface();
//! ```

pub mod cmd;
pub mod driver;
pub mod flag;
pub mod init_table;
pub mod interface;

/// Visible width of the module, pixels horizontally
pub const WIDTH: u16 = 170;

/// Visible height of the module, pixels vertically
pub const HEIGHT: u16 = 320;

/// Bytes per RGB565 pixel
pub const BYTES_PER_PIXEL: usize = 2;

/// Bytes in one full frame
pub const FRAME_BYTES: usize = WIDTH as usize * HEIGHT as usize * BYTES_PER_PIXEL;
