//! LilyGO T-Display-S3 firmware: ST7789V bring-up over the 8-bit i80 bus and a
//! single "Hello world" label.
//!
//! Everything except [`esp`] is hardware independent and builds on the host,
//! which is where the tests run.

pub mod app;
pub mod board;
pub mod input;
pub mod port;
pub mod st7789;

#[cfg(target_os = "espidf")]
pub mod esp;
