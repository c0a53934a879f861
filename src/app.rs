//! The application on top of the port: the hello-world scene, the main loop
//! step, power-save and the shutdown path.

use anyhow::{anyhow, Context, Result};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use log::info;

use crate::board::{BoardPower, BACKLIGHT};
use crate::input::{Button, ButtonEvent};
use crate::port::widgets::{color_hex, Align, Label};
use crate::port::{DisplayHandle, GraphicsPort, PortGuard};
use crate::st7789::driver::PanelContext;
use crate::st7789::interface::{LcdBackend, Surface, SurfaceOf};

/// Sleep between two task handler runs
pub const LOOP_PERIOD_MS: u32 = 10;

/// Loop iterations between two liveness lines (about 2 s)
pub const HEARTBEAT_EVERY: u32 = 200;

/// Screen background, 0xRRGGBB
pub const BACKGROUND: u32 = 0x003A57;

pub const GREETING: &str = "Hello world";

/// Counts loop iterations and says when to log
#[derive(Debug)]
pub struct Heartbeat {
    count: u32,
    every: u32,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(HEARTBEAT_EVERY)
    }
}

impl Heartbeat {
    pub fn new(every: u32) -> Self {
        Heartbeat { count: 0, every }
    }

    /// Count one iteration, `true` on every `every`-th call
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.every {
            self.count = 0;
            return true;
        }
        false
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Build the static scene. Call with the port lock held.
pub fn build_hello_world<S>(guard: &mut PortGuard<'_, S>) -> Result<()> {
    let screen = guard
        .screen_active()
        .ok_or_else(|| anyhow!("No display registered"))?;

    screen.set_bg_color(color_hex(BACKGROUND));
    screen.add_label(
        Label::new(GREETING)
            .with_text_color(Rgb565::BLACK)
            .aligned(Align::Center, 0, 0),
    );
    Ok(())
}

/// One main loop iteration: render, sleep, heartbeat
pub fn service<S, D>(port: &GraphicsPort<S>, delay: &mut D, heartbeat: &mut Heartbeat) -> Result<()>
where
    S: Surface,
    D: DelayNs,
{
    port.task_handler().context("Graphics task handler")?;
    delay.delay_ms(LOOP_PERIOD_MS);
    if heartbeat.tick() {
        info!(target: "while loop", "alive");
    }
    Ok(())
}

/// Screen and backlight off while keeping every handle alive
#[derive(Debug, Default)]
pub struct PowerSave {
    active: bool,
}

impl PowerSave {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter power-save, or leave it when already saving
    pub fn toggle<B, P>(
        &mut self,
        port: &GraphicsPort<SurfaceOf<B>>,
        panel: &mut PanelContext<B>,
        board: &mut P,
    ) -> Result<()>
    where
        B: LcdBackend,
        P: BoardPower,
    {
        if self.active {
            info!("Leaving power-save");
            panel.set_display_on(true)?;
            board.set_backlight_duty(BACKLIGHT.duty())?;
            port.resume()?;
        } else {
            info!("Entering power-save");
            port.stop();
            board.set_backlight_duty(0)?;
            panel.set_display_on(false)?;
        }
        self.active = !self.active;
        Ok(())
    }
}

/// What the main loop does after a button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// Tear everything down with [`shut_down`] and restart the chip
    Restart,
}

/// Button 1 toggles power-save, a long press on button 2 asks for a restart.
/// Every other event is only logged.
pub fn on_button<B, P>(
    event: ButtonEvent,
    port: &GraphicsPort<SurfaceOf<B>>,
    panel: &mut PanelContext<B>,
    board: &mut P,
    power_save: &mut PowerSave,
) -> Result<Action>
where
    B: LcdBackend,
    P: BoardPower,
{
    info!("{}", event);
    match event {
        ButtonEvent::Pressed(Button::One) => {
            power_save.toggle(port, panel, board)?;
            Ok(Action::Continue)
        }
        ButtonEvent::LongPress(Button::Two) => Ok(Action::Restart),
        _ => Ok(Action::Continue),
    }
}

/// Release everything in reverse order of acquisition: display, panel, panel
/// IO, bus, then the board lines. The caller restarts the chip afterwards.
pub fn shut_down<B, P>(
    port: GraphicsPort<SurfaceOf<B>>,
    display: DisplayHandle,
    panel: PanelContext<B>,
    board: &mut P,
) -> Result<()>
where
    B: LcdBackend,
    P: BoardPower,
{
    info!("Shutting down");
    port.stop();
    let surface = port
        .remove_display(display)
        .context("Unregistering display")?;
    drop(surface);
    drop(port);

    panel.teardown().context("Deleting panel handles")?;
    board.power_down().context("Powering down board")?;
    Ok(())
}
