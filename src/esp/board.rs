//! Backlight PWM, panel power and read strobe on the real board

use anyhow::Result;
use esp_idf_svc::hal::gpio::{Gpio0, Gpio14, Gpio15, Gpio9, Input, Output, PinDriver, Pull};
use esp_idf_svc::sys::{self, esp};
use log::info;

use crate::board::{BacklightConfig, BoardPower, Pins};
use crate::input::Buttons;

const SPEED_MODE: sys::ledc_mode_t = sys::ledc_mode_t_LEDC_LOW_SPEED_MODE;
const TIMER: sys::ledc_timer_t = sys::ledc_timer_t_LEDC_TIMER_0;
const CHANNEL: sys::ledc_channel_t = sys::ledc_channel_t_LEDC_CHANNEL_0;

/// Lines driven by the firmware besides the LCD bus
pub struct EspBoard {
    power: Option<PinDriver<'static, Gpio15, Output>>,
    rd: Option<PinDriver<'static, Gpio9, Output>>,
}

impl EspBoard {
    /// Timer, channel at duty 0, power and RD as outputs, power on, backlight
    /// to the boot duty, RD high.
    pub fn init(power: Gpio15, rd: Gpio9, backlight: &BacklightConfig) -> Result<Self> {
        info!(
            "Configuring backlight PWM, {} Hz, {} bit",
            backlight.frequency_hz, backlight.resolution_bits
        );
        let mut timer = sys::ledc_timer_config_t::default();
        timer.speed_mode = SPEED_MODE;
        timer.timer_num = TIMER;
        timer.duty_resolution = backlight.resolution_bits;
        timer.freq_hz = backlight.frequency_hz;
        timer.clk_cfg = sys::soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK;
        esp!(unsafe { sys::ledc_timer_config(&timer) })?;

        let mut channel = sys::ledc_channel_config_t::default();
        channel.gpio_num = Pins::LCD_BL;
        channel.speed_mode = SPEED_MODE;
        channel.channel = CHANNEL;
        channel.intr_type = sys::ledc_intr_type_t_LEDC_INTR_DISABLE;
        channel.timer_sel = TIMER;
        channel.duty = 0;
        channel.hpoint = 0;
        esp!(unsafe { sys::ledc_channel_config(&channel) })?;

        let mut power = PinDriver::output(power)?;
        let mut rd = PinDriver::output(rd)?;

        info!("Turning on LCD power");
        power.set_high()?;

        let mut board = EspBoard {
            power: Some(power),
            rd: None,
        };
        board.set_backlight_duty(backlight.duty())?;

        // The panel is write only, RD has to idle high
        rd.set_high()?;
        board.rd = Some(rd);
        Ok(board)
    }
}

impl BoardPower for EspBoard {
    fn set_backlight_duty(&mut self, duty: u32) -> Result<()> {
        info!("Backlight duty {}", duty);
        esp!(unsafe { sys::ledc_set_duty(SPEED_MODE, CHANNEL, duty) })?;
        esp!(unsafe { sys::ledc_update_duty(SPEED_MODE, CHANNEL) })?;
        Ok(())
    }

    fn power_down(&mut self) -> Result<()> {
        info!("Turning off backlight and LCD power");
        esp!(unsafe { sys::ledc_stop(SPEED_MODE, CHANNEL, 0) })?;
        if let Some(rd) = self.rd.as_mut() {
            rd.set_low()?;
        }
        if let Some(power) = self.power.as_mut() {
            power.set_low()?;
        }

        esp!(unsafe { sys::gpio_reset_pin(Pins::LCD_BL) })?;
        // Dropping a driver resets its pin
        self.rd = None;
        self.power = None;
        Ok(())
    }
}

/// Both buttons as pulled-up inputs
pub fn buttons(
    one: Gpio0,
    two: Gpio14,
) -> Result<Buttons<PinDriver<'static, Gpio0, Input>, PinDriver<'static, Gpio14, Input>>> {
    let mut one = PinDriver::input(one)?;
    one.set_pull(Pull::Up)?;
    let mut two = PinDriver::input(two)?;
    two.set_pull(Pull::Up)?;
    Ok(Buttons::new(one, two))
}
