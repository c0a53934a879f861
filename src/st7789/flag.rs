/// Flags and parameter values used with the ST7789V controller.
///
/// The init table packs its parameter count and the settle request into one
/// length byte, the masks for that encoding live here too.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Init table length byte
    pub const INIT_DELAY: u8 = 0x80; // Pause after this entry
    pub const INIT_LEN_MASK: u8 = 0x7F; // Parameter count

    // Interface Pixel Format (0x3A)
    pub const COLMOD_16BIT: u8 = 0x05; // RGB565 over the MCU interface

    // Gate Control (0xB7): VGH 14.97V, VGL -10.43V
    pub const GATE_VGH_VGL: u8 = 0x75;

    // VCOM Setting (0xBB): 1.1V
    pub const VCOM_1V1: u8 = 0x28;

    // VDV and VRH Command Enable (0xC2)
    pub const VDV_VRH_FROM_COMMAND: u8 = 0x01;

    // Frame Rate Control in Normal Mode (0xC6): ~53Hz
    pub const FRAME_RATE_53HZ: u8 = 0x13;
}
