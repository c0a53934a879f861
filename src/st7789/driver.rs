//! ST7789V bring-up over the i80 bus
//!
//! ## Sequence
//!
//! 1. claim the 8-bit parallel bus
//! 1. create the panel IO (command/parameter transport) on that bus
//! 1. create the ST7789 panel on that IO
//! 1. hardware reset, then the generic controller init
//! 1. set the gap of this module (the glass starts 35 columns into RAM)
//! 1. replay [`ST7789V_INIT`](crate::st7789::init_table::ST7789V_INIT)
//! 1. display on
//!
//! Every step is fatal on failure and nothing after a failed step runs. A half
//! initialised controller has undefined pixel output, so there is no degraded
//! mode.
//!
//! The resulting handles live in one [`PanelContext`]; the only way to release
//! them is [`PanelContext::teardown`], which deletes them in reverse order of
//! creation.

use anyhow::{anyhow, Result};
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

use crate::st7789::init_table::{self, InitCmd};
use crate::st7789::interface::{LcdBackend, Panel, PanelWiring, SurfaceOf};

/// Owner of the bus, panel IO and panel handles
pub struct PanelContext<B: LcdBackend> {
    backend: B,
    bus: B::Bus,
    io: B::Io,
    panel: B::Panel,
}

impl<B: LcdBackend> PanelContext<B> {
    /// Pixel sink for the graphics port
    pub fn surface(&self) -> SurfaceOf<B> {
        self.panel.surface()
    }

    /// Turn the panel output on or off
    pub fn set_display_on(&mut self, on: bool) -> Result<()> {
        step(self.panel.disp_on_off(on), "esp_lcd_panel_disp_on_off")
    }

    /// Delete panel, panel IO and bus, in that order.
    ///
    /// Stops at the first failure, leaving the remaining handles alive.
    pub fn teardown(self) -> Result<()> {
        let PanelContext {
            mut backend,
            bus,
            io,
            panel,
        } = self;

        log::info!("Deleting panel");
        step(backend.del_panel(panel), "esp_lcd_panel_del")?;
        log::info!("Deleting panel IO");
        step(backend.del_panel_io(io), "esp_lcd_panel_io_del")?;
        log::info!("Releasing i80 bus");
        step(backend.del_bus(bus), "esp_lcd_del_i80_bus")?;
        Ok(())
    }
}

/// Bring the panel from power-on to displaying, see the module docs for the
/// exact order.
pub fn bring_up<B, D>(
    mut backend: B,
    wiring: &PanelWiring,
    table: &[InitCmd],
    delay: &mut D,
) -> Result<PanelContext<B>>
where
    B: LcdBackend,
    D: DelayNs,
{
    log::info!("Claiming i80 bus");
    let bus = step(backend.new_i80_bus(&wiring.bus), "esp_lcd_new_i80_bus")?;

    log::info!("Creating panel IO, pclk {} Hz", wiring.io.pclk_hz);
    let mut io = step(
        backend.new_panel_io(&bus, &wiring.io),
        "esp_lcd_new_panel_io_i80",
    )?;

    log::info!("Creating ST7789 panel");
    let mut panel = step(backend.new_panel(&io, &wiring.panel), "esp_lcd_new_panel_st7789")?;

    step(panel.reset(), "esp_lcd_panel_reset")?;
    step(panel.init(), "esp_lcd_panel_init")?;

    // The gap is module specific, panels with the same controller can differ
    let (x_gap, y_gap) = wiring.gap;
    step(panel.set_gap(x_gap, y_gap), "esp_lcd_panel_set_gap")?;

    log::info!("Sending {} vendor init commands", table.len());
    step(init_table::replay(&mut io, delay, table), "vendor init table")?;

    step(panel.disp_on_off(true), "esp_lcd_panel_disp_on_off")?;
    log::info!("Panel is on");

    Ok(PanelContext {
        backend,
        bus,
        io,
        panel,
    })
}

fn step<T>(result: Result<T, DisplayError>, what: &str) -> Result<T> {
    result.map_err(|e| anyhow!("{what} failed: {e:?}"))
}
