//! ESP-IDF implementations of the board and panel seams

pub mod board;
pub mod lcd;

pub use board::EspBoard;
pub use lcd::EspLcd;

/// Milliseconds since boot, wraps after about 49 days
pub fn now_ms() -> u32 {
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1000) as u32
}
