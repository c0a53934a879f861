//! `esp_lcd` i80 bus, panel IO and ST7789 panel
//!
//! Thin wrappers over the raw handles. Every failing call is logged with its
//! ESP error name before it is turned into a [`DisplayError`].

use core::ffi::c_void;
use core::ptr;

use display_interface::DisplayError;
use esp_idf_svc::sys::{self, esp, EspError};

use crate::st7789::interface::{
    BusConfig, IoConfig, LcdBackend, Panel, PanelConfig, PanelIo, RgbOrder, Surface,
};

fn check(result: Result<(), EspError>, what: &str, error: DisplayError) -> Result<(), DisplayError> {
    result.map_err(|e| {
        log::error!("{what}: {e}");
        error
    })
}

/// Backend creating real `esp_lcd` handles
pub struct EspLcd;

pub struct EspI80Bus(sys::esp_lcd_i80_bus_handle_t);

pub struct EspPanelIo(sys::esp_lcd_panel_io_handle_t);

pub struct EspPanel(sys::esp_lcd_panel_handle_t);

/// Non-owning copy of the panel handle
pub struct EspSurface(sys::esp_lcd_panel_handle_t);

impl LcdBackend for EspLcd {
    type Bus = EspI80Bus;
    type Io = EspPanelIo;
    type Panel = EspPanel;

    fn new_i80_bus(&mut self, config: &BusConfig) -> Result<EspI80Bus, DisplayError> {
        let mut bus_config = sys::esp_lcd_i80_bus_config_t::default();
        bus_config.dc_gpio_num = config.dc_gpio;
        bus_config.wr_gpio_num = config.wr_gpio;
        bus_config.clk_src = sys::soc_periph_lcd_clk_src_t_LCD_CLK_SRC_DEFAULT;
        bus_config.data_gpio_nums.fill(-1);
        bus_config.data_gpio_nums[..config.data_gpios.len()].copy_from_slice(&config.data_gpios);
        bus_config.bus_width = config.data_gpios.len();
        bus_config.max_transfer_bytes = config.max_transfer_bytes;
        bus_config.psram_trans_align = config.psram_trans_align;
        bus_config.sram_trans_align = config.sram_trans_align;

        let mut handle: sys::esp_lcd_i80_bus_handle_t = ptr::null_mut();
        check(
            esp!(unsafe { sys::esp_lcd_new_i80_bus(&bus_config, &mut handle) }),
            "esp_lcd_new_i80_bus",
            DisplayError::BusWriteError,
        )?;
        Ok(EspI80Bus(handle))
    }

    fn new_panel_io(&mut self, bus: &EspI80Bus, config: &IoConfig) -> Result<EspPanelIo, DisplayError> {
        let mut io_config = sys::esp_lcd_panel_io_i80_config_t::default();
        io_config.cs_gpio_num = config.cs_gpio;
        io_config.pclk_hz = config.pclk_hz;
        io_config.trans_queue_depth = config.trans_queue_depth;
        io_config.on_color_trans_done = None;
        io_config.user_ctx = ptr::null_mut();
        io_config.lcd_cmd_bits = config.cmd_bits;
        io_config.lcd_param_bits = config.param_bits;
        io_config.dc_levels.set_dc_idle_level(config.dc_levels.idle as u32);
        io_config.dc_levels.set_dc_cmd_level(config.dc_levels.cmd as u32);
        io_config.dc_levels.set_dc_dummy_level(config.dc_levels.dummy as u32);
        io_config.dc_levels.set_dc_data_level(config.dc_levels.data as u32);

        let mut handle: sys::esp_lcd_panel_io_handle_t = ptr::null_mut();
        check(
            esp!(unsafe { sys::esp_lcd_new_panel_io_i80(bus.0, &io_config, &mut handle) }),
            "esp_lcd_new_panel_io_i80",
            DisplayError::DCError,
        )?;
        Ok(EspPanelIo(handle))
    }

    fn new_panel(&mut self, io: &EspPanelIo, config: &PanelConfig) -> Result<EspPanel, DisplayError> {
        let mut panel_config = sys::esp_lcd_panel_dev_config_t::default();
        panel_config.reset_gpio_num = config.reset_gpio;
        panel_config.__bindgen_anon_1.rgb_ele_order = match config.rgb_order {
            RgbOrder::Rgb => sys::lcd_rgb_element_order_t_LCD_RGB_ELEMENT_ORDER_RGB,
            RgbOrder::Bgr => sys::lcd_rgb_element_order_t_LCD_RGB_ELEMENT_ORDER_BGR,
        };
        panel_config.bits_per_pixel = config.bits_per_pixel;
        panel_config.vendor_config = ptr::null_mut();

        let mut handle: sys::esp_lcd_panel_handle_t = ptr::null_mut();
        check(
            esp!(unsafe { sys::esp_lcd_new_panel_st7789(io.0, &panel_config, &mut handle) }),
            "esp_lcd_new_panel_st7789",
            DisplayError::InvalidFormatError,
        )?;
        Ok(EspPanel(handle))
    }

    fn del_panel(&mut self, panel: EspPanel) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_del(panel.0) }),
            "esp_lcd_panel_del",
            DisplayError::BusWriteError,
        )
    }

    fn del_panel_io(&mut self, io: EspPanelIo) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_io_del(io.0) }),
            "esp_lcd_panel_io_del",
            DisplayError::BusWriteError,
        )
    }

    fn del_bus(&mut self, bus: EspI80Bus) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_del_i80_bus(bus.0) }),
            "esp_lcd_del_i80_bus",
            DisplayError::BusWriteError,
        )
    }
}

impl PanelIo for EspPanelIo {
    fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), DisplayError> {
        let data = if params.is_empty() {
            ptr::null()
        } else {
            params.as_ptr() as *const c_void
        };
        check(
            esp!(unsafe { sys::esp_lcd_panel_io_tx_param(self.0, cmd as i32, data, params.len()) }),
            "esp_lcd_panel_io_tx_param",
            DisplayError::BusWriteError,
        )
    }
}

impl Panel for EspPanel {
    type Surface = EspSurface;

    fn reset(&mut self) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_reset(self.0) }),
            "esp_lcd_panel_reset",
            DisplayError::RSError,
        )
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_init(self.0) }),
            "esp_lcd_panel_init",
            DisplayError::BusWriteError,
        )
    }

    fn set_gap(&mut self, x_gap: i32, y_gap: i32) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_set_gap(self.0, x_gap, y_gap) }),
            "esp_lcd_panel_set_gap",
            DisplayError::OutOfBoundsError,
        )
    }

    fn disp_on_off(&mut self, on: bool) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_disp_on_off(self.0, on) }),
            "esp_lcd_panel_disp_on_off",
            DisplayError::BusWriteError,
        )
    }

    fn surface(&self) -> EspSurface {
        EspSurface(self.0)
    }
}

impl Surface for EspSurface {
    fn draw_bitmap(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        check(
            esp!(unsafe {
                sys::esp_lcd_panel_draw_bitmap(
                    self.0,
                    x_start,
                    y_start,
                    x_end,
                    y_end,
                    data.as_ptr() as *const c_void,
                )
            }),
            "esp_lcd_panel_draw_bitmap",
            DisplayError::BusWriteError,
        )
    }

    fn swap_xy(&mut self, swap: bool) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_swap_xy(self.0, swap) }),
            "esp_lcd_panel_swap_xy",
            DisplayError::BusWriteError,
        )
    }

    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), DisplayError> {
        check(
            esp!(unsafe { sys::esp_lcd_panel_mirror(self.0, mirror_x, mirror_y) }),
            "esp_lcd_panel_mirror",
            DisplayError::BusWriteError,
        )
    }
}
