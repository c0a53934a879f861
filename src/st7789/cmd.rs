/// ST7789V command opcodes used by this board
pub struct Cmd;
impl Cmd {
    // System function
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERSION_ON: u8 = 0x21;
    pub const INTERFACE_PIXEL_FORMAT: u8 = 0x3A;

    // Panel function
    pub const PORCH_CONTROL: u8 = 0xB2;
    pub const GATE_CONTROL: u8 = 0xB7;
    pub const VCOM_SETTING: u8 = 0xBB;
    pub const LCM_CONTROL: u8 = 0xC0;
    pub const VDV_VRH_ENABLE: u8 = 0xC2;
    pub const VRH_SET: u8 = 0xC3;
    pub const FRAME_RATE_CONTROL: u8 = 0xC6;
    pub const POWER_CONTROL_1: u8 = 0xD0;
    pub const GATE_OUTPUT_SELECTION: u8 = 0xD6;
    pub const POSITIVE_GAMMA: u8 = 0xE0;
    pub const NEGATIVE_GAMMA: u8 = 0xE1;
}

/*
Vendor init script for the 1.9" 170x320 module uses:
0x11 - Sleep Out (needs 120ms before the next command)
0x3A - Interface Pixel Format
0xB2 - Porch Setting
0xB7 - Gate Control
0xBB - VCOM Setting
0xC0 - LCM Control
0xC2 - VDV and VRH Command Enable
0xC3 - VRH Set
0xC6 - Frame Rate Control in Normal Mode
0xD0 - Power Control 1 (also sent with a single byte as a vendor quirk)
0x21 - Display Inversion On
0xD6 - Gate output selection in sleep-in mode (undocumented in public datasheet)
0xE0 - Positive Voltage Gamma Control
0xE1 - Negative Voltage Gamma Control
*/
