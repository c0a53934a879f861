//! Recording doubles for the LCD backend, the delay and the board lines.
//!
//! Every double appends to one shared log so tests can assert the order of
//! operations across all of them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

use tdisplay_hello::board::BoardPower;
use tdisplay_hello::st7789::interface::{
    BusConfig, IoConfig, LcdBackend, Panel, PanelConfig, PanelIo, Surface,
};

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    /// Resource named by an acquire or release entry, in log order
    pub fn resources(&self, acquired: bool) -> Vec<&'static str> {
        let table: [(&str, &str, &'static str); 4] = [
            ("new bus", "delete bus", "bus"),
            ("new io", "delete io", "io"),
            ("new panel", "delete panel", "panel"),
            ("acquire display", "release display", "display"),
        ];
        self.0
            .borrow()
            .iter()
            .filter_map(|entry| {
                table
                    .iter()
                    .find(|(new, del, _)| entry.as_str() == if acquired { *new } else { *del })
                    .map(|(_, _, name)| *name)
            })
            .collect()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.0.borrow().iter().any(|e| e == entry)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Backend whose operations are logged by name; `fail_on` makes the named
/// operation return an error instead
#[derive(Clone, Default)]
pub struct FakeLcd {
    pub log: Log,
    pub fail_on: Option<&'static str>,
}

impl FakeLcd {
    pub fn failing(log: &Log, op: &'static str) -> Self {
        FakeLcd {
            log: log.clone(),
            fail_on: Some(op),
        }
    }

    fn run(&self, op: &str) -> Result<(), DisplayError> {
        if self.fail_on == Some(op) {
            self.log.push(format!("{op} failed"));
            return Err(DisplayError::BusWriteError);
        }
        self.log.push(op);
        Ok(())
    }
}

pub struct FakeBus;

pub struct FakeIo(FakeLcd);

pub struct FakePanel(FakeLcd);

pub struct FakeSurface(FakeLcd);

impl Drop for FakeSurface {
    fn drop(&mut self) {
        self.0.log.push("release display");
    }
}

impl LcdBackend for FakeLcd {
    type Bus = FakeBus;
    type Io = FakeIo;
    type Panel = FakePanel;

    fn new_i80_bus(&mut self, config: &BusConfig) -> Result<FakeBus, DisplayError> {
        self.run("new bus")?;
        assert_eq!(config.data_gpios.len(), 8);
        Ok(FakeBus)
    }

    fn new_panel_io(&mut self, _bus: &FakeBus, _config: &IoConfig) -> Result<FakeIo, DisplayError> {
        self.run("new io")?;
        Ok(FakeIo(self.clone()))
    }

    fn new_panel(&mut self, _io: &FakeIo, _config: &PanelConfig) -> Result<FakePanel, DisplayError> {
        self.run("new panel")?;
        Ok(FakePanel(self.clone()))
    }

    fn del_panel(&mut self, _panel: FakePanel) -> Result<(), DisplayError> {
        self.run("delete panel")
    }

    fn del_panel_io(&mut self, _io: FakeIo) -> Result<(), DisplayError> {
        self.run("delete io")
    }

    fn del_bus(&mut self, _bus: FakeBus) -> Result<(), DisplayError> {
        self.run("delete bus")
    }
}

impl PanelIo for FakeIo {
    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.0.run(&format!("write 0x{cmd:02X} {params:02X?}"))
    }
}

impl Panel for FakePanel {
    type Surface = FakeSurface;

    fn reset(&mut self) -> Result<(), DisplayError> {
        self.0.run("reset")
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.0.run("init")
    }

    fn set_gap(&mut self, x_gap: i32, y_gap: i32) -> Result<(), DisplayError> {
        self.0.run(&format!("gap {x_gap},{y_gap}"))
    }

    fn disp_on_off(&mut self, on: bool) -> Result<(), DisplayError> {
        self.0.run(if on { "display on" } else { "display off" })
    }

    fn surface(&self) -> FakeSurface {
        self.0.log.push("acquire display");
        FakeSurface(self.0.clone())
    }
}

impl Surface for FakeSurface {
    fn draw_bitmap(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        self.0.run(&format!(
            "draw {x_start},{y_start}..{x_end},{y_end} {} bytes",
            data.len()
        ))
    }

    fn swap_xy(&mut self, swap: bool) -> Result<(), DisplayError> {
        self.0.run(&format!("swap_xy {swap}"))
    }

    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), DisplayError> {
        self.0.run(&format!("mirror {mirror_x},{mirror_y}"))
    }
}

/// Delay that only logs
pub struct FakeDelay(pub Log);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(format!("pause {}ns", ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(format!("pause {ms}ms"));
    }
}

/// Board lines that only log
pub struct FakeBoard {
    pub log: Log,
    pub fail_power_down: bool,
}

impl FakeBoard {
    pub fn new(log: &Log) -> Self {
        FakeBoard {
            log: log.clone(),
            fail_power_down: false,
        }
    }
}

impl BoardPower for FakeBoard {
    fn set_backlight_duty(&mut self, duty: u32) -> Result<()> {
        self.log.push(format!("backlight {duty}"));
        Ok(())
    }

    fn power_down(&mut self) -> Result<()> {
        if self.fail_power_down {
            bail!("gpio_reset_pin failed");
        }
        self.log.push("power down");
        Ok(())
    }
}
