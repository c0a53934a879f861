#[cfg(target_os = "espidf")]
mod firmware {
    use anyhow::Result;
    use esp_idf_svc::hal::delay::{Delay, FreeRtos};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::reset::restart;
    use log::info;

    use tdisplay_hello::app::{self, Action, Heartbeat, PowerSave};
    use tdisplay_hello::board::{self, BACKLIGHT, T_DISPLAY_S3};
    use tdisplay_hello::esp::{self, EspBoard, EspLcd};
    use tdisplay_hello::port::GraphicsPort;
    use tdisplay_hello::st7789::driver;
    use tdisplay_hello::st7789::init_table::ST7789V_INIT;

    pub fn run() -> Result<()> {
        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        let mut board = EspBoard::init(pins.gpio15, pins.gpio9, &BACKLIGHT)?;

        let mut panel = driver::bring_up(EspLcd, &T_DISPLAY_S3, &ST7789V_INIT, &mut Delay::default())?;

        let port = GraphicsPort::init();
        let display = port.add_display(panel.surface(), board::DISPLAY)?;
        {
            let mut guard = port.lock()?;
            app::build_hello_world(&mut guard)?;
        }

        let mut buttons = esp::board::buttons(pins.gpio0, pins.gpio14)?;
        let mut power_save = PowerSave::default();
        let mut heartbeat = Heartbeat::default();
        let mut delay = FreeRtos;

        log::warn!("Starting infinite loop");
        loop {
            app::service(&port, &mut delay, &mut heartbeat)?;

            for event in buttons.poll(esp::now_ms())? {
                let action = app::on_button(event, &port, &mut panel, &mut board, &mut power_save)?;
                if action == Action::Restart {
                    app::shut_down(port, display, panel, &mut board)?;
                    info!("Restarting");
                    restart();
                }
            }
        }
    }
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(target_os = "espidf")]
fn main() {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    if let Err(e) = firmware::run() {
        log::error!("Fatal: {:?}", e);
        // A half initialised panel shows garbage, reset instead
        std::process::abort();
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("This firmware only runs on the ESP32-S3, build it for the espidf target")
}
