//! Seams between the bring-up sequence and the LCD peripheral
//!
//! The sequence in [`crate::st7789::driver`] only talks to these traits. On the
//! device they are implemented on top of the ESP-IDF `esp_lcd` component, in
//! tests by recording doubles.

use display_interface::DisplayError;

/// Command/parameter transport bound to one bus
pub trait PanelIo {
    /// Write one opcode followed by `params` (DC low for the opcode, high for
    /// the parameters)
    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), DisplayError>;
}

/// Non-owning view of the panel used to push pixels.
///
/// The panel outlives every surface handed out; the graphics port gives its
/// surface back before the panel is deleted.
pub trait Surface {
    /// Copy `data` into the panel window `[x_start, x_end) x [y_start, y_end)`
    fn draw_bitmap(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        data: &[u8],
    ) -> Result<(), DisplayError>;

    /// Exchange the X and Y axes of the panel scan
    fn swap_xy(&mut self, swap: bool) -> Result<(), DisplayError>;

    /// Mirror the panel scan along X and/or Y
    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), DisplayError>;
}

/// The addressable display controller
pub trait Panel {
    /// Pixel sink handed to the graphics port
    type Surface: Surface;

    /// Hardware reset through the reset line
    fn reset(&mut self) -> Result<(), DisplayError>;

    /// Generic controller init of the vendor driver
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Offset of the visible area inside controller RAM
    fn set_gap(&mut self, x_gap: i32, y_gap: i32) -> Result<(), DisplayError>;

    /// Turn the panel output on or off
    fn disp_on_off(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Hand out a pixel sink bound to this panel
    fn surface(&self) -> Self::Surface;
}

/// Creates and destroys the bus, panel IO and panel handles.
///
/// Deletion takes the handle by value so a deleted handle cannot be used
/// again.
pub trait LcdBackend {
    /// Claimed parallel bus
    type Bus;
    /// Transport bound to [`Self::Bus`]
    type Io: PanelIo;
    /// Controller bound to [`Self::Io`]
    type Panel: Panel;

    fn new_i80_bus(&mut self, config: &BusConfig) -> Result<Self::Bus, DisplayError>;

    fn new_panel_io(&mut self, bus: &Self::Bus, config: &IoConfig)
        -> Result<Self::Io, DisplayError>;

    fn new_panel(&mut self, io: &Self::Io, config: &PanelConfig)
        -> Result<Self::Panel, DisplayError>;

    fn del_panel(&mut self, panel: Self::Panel) -> Result<(), DisplayError>;

    fn del_panel_io(&mut self, io: Self::Io) -> Result<(), DisplayError>;

    fn del_bus(&mut self, bus: Self::Bus) -> Result<(), DisplayError>;
}

/// Surface type produced by a backend's panel
pub type SurfaceOf<B> = <<B as LcdBackend>::Panel as Panel>::Surface;

/// Intel 8080 bus wiring and transfer limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    pub dc_gpio: i32,
    pub wr_gpio: i32,
    /// D0..D7
    pub data_gpios: [i32; 8],
    pub max_transfer_bytes: usize,
    pub psram_trans_align: usize,
    pub sram_trans_align: usize,
}

/// Level of the DC line in each transfer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcLevels {
    pub idle: bool,
    pub cmd: bool,
    pub dummy: bool,
    pub data: bool,
}

/// Panel IO timing and framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoConfig {
    pub cs_gpio: i32,
    pub pclk_hz: u32,
    pub trans_queue_depth: usize,
    pub cmd_bits: i32,
    pub param_bits: i32,
    pub dc_levels: DcLevels,
}

/// Subpixel order on the glass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbOrder {
    Rgb,
    Bgr,
}

/// Controller level settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub reset_gpio: i32,
    pub rgb_order: RgbOrder,
    pub bits_per_pixel: u32,
}

/// Everything the bring-up sequence needs to know about one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelWiring {
    pub bus: BusConfig,
    pub io: IoConfig,
    pub panel: PanelConfig,
    /// (x, y) offset of the glass inside controller RAM
    pub gap: (i32, i32),
}
