//! Vendor initialization script for the ST7789V on the 1.9" 170x320 module
//!
//! The table is plain data so it can be checked against the controller
//! datasheet line by line. Each entry is one opcode, its parameter bytes and a
//! length byte: bits 6..0 hold the parameter count, bit 7 asks for a
//! [`SETTLE_DELAY_MS`] pause before the next command.

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

use crate::st7789::interface::PanelIo;
use crate::st7789::{cmd::Cmd, flag::Flag};

/// Pause after an entry flagged with [`Flag::INIT_DELAY`]
pub const SETTLE_DELAY_MS: u32 = 120;

/// Longest parameter list a single entry may carry
pub const MAX_PARAMS: usize = 14;

/// One register write of the init script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitCmd {
    /// Command opcode
    pub cmd: u8,
    /// Parameter bytes sent after the opcode
    pub data: &'static [u8],
    /// Parameter count in bits 6..0, settle request in bit 7
    pub len: u8,
}

impl InitCmd {
    /// Number of parameter bytes encoded in the length byte
    pub const fn param_len(&self) -> usize {
        (self.len & Flag::INIT_LEN_MASK) as usize
    }

    /// Whether the controller needs [`SETTLE_DELAY_MS`] after this entry
    pub const fn needs_settle(&self) -> bool {
        self.len & Flag::INIT_DELAY != 0
    }

    /// Parameter bytes to transmit, `None` when the length byte asks for
    /// more bytes than the entry carries or more than [`MAX_PARAMS`]
    pub fn params(&self) -> Option<&'static [u8]> {
        let len = self.param_len();
        if len > MAX_PARAMS {
            return None;
        }
        self.data.get(..len)
    }
}

/// ST7789V init script for the T-Display-S3 panel: RGB565, inverted colors,
/// module specific porch, voltage and gamma tuning.
pub static ST7789V_INIT: [InitCmd; 15] = [
    InitCmd { cmd: Cmd::SLEEP_OUT, data: &[], len: Flag::INIT_DELAY },
    InitCmd { cmd: Cmd::INTERFACE_PIXEL_FORMAT, data: &[Flag::COLMOD_16BIT], len: 1 },
    InitCmd { cmd: Cmd::PORCH_CONTROL, data: &[0x0B, 0x0B, 0x00, 0x33, 0x33], len: 5 },
    InitCmd { cmd: Cmd::GATE_CONTROL, data: &[Flag::GATE_VGH_VGL], len: 1 },
    InitCmd { cmd: Cmd::VCOM_SETTING, data: &[Flag::VCOM_1V1], len: 1 },
    InitCmd { cmd: Cmd::LCM_CONTROL, data: &[0x2C], len: 1 },
    InitCmd { cmd: Cmd::VDV_VRH_ENABLE, data: &[Flag::VDV_VRH_FROM_COMMAND], len: 1 },
    InitCmd { cmd: Cmd::VRH_SET, data: &[0x1F], len: 1 },
    InitCmd { cmd: Cmd::FRAME_RATE_CONTROL, data: &[Flag::FRAME_RATE_53HZ], len: 1 },
    InitCmd { cmd: Cmd::POWER_CONTROL_1, data: &[0xA7], len: 1 },
    InitCmd { cmd: Cmd::INVERSION_ON, data: &[], len: 0 },
    InitCmd { cmd: Cmd::POWER_CONTROL_1, data: &[0xA4, 0xA1], len: 2 },
    InitCmd { cmd: Cmd::GATE_OUTPUT_SELECTION, data: &[0xA1], len: 1 },
    InitCmd {
        cmd: Cmd::POSITIVE_GAMMA,
        data: &[
            0xF0, 0x05, 0x0A, 0x06, 0x06, 0x03, 0x2B, 0x32, 0x43, 0x36, 0x11, 0x10, 0x2B, 0x32,
        ],
        len: 14,
    },
    InitCmd {
        cmd: Cmd::NEGATIVE_GAMMA,
        data: &[
            0xF0, 0x08, 0x0C, 0x0B, 0x09, 0x24, 0x2B, 0x22, 0x43, 0x38, 0x15, 0x16, 0x2F, 0x37,
        ],
        len: 14,
    },
];

/// Send every entry of `table` over `io` in order.
///
/// Entries flagged with [`Flag::INIT_DELAY`] are followed by exactly one
/// [`SETTLE_DELAY_MS`] pause. The first failing write stops the replay.
pub fn replay<IO, D>(io: &mut IO, delay: &mut D, table: &[InitCmd]) -> Result<(), DisplayError>
where
    IO: PanelIo,
    D: DelayNs,
{
    for entry in table {
        let Some(params) = entry.params() else {
            log::error!(
                "Init entry 0x{:02X} declares {} parameters but carries {}",
                entry.cmd,
                entry.param_len(),
                entry.data.len()
            );
            return Err(DisplayError::InvalidFormatError);
        };

        io.tx_param(entry.cmd, params)?;

        if entry.needs_settle() {
            delay.delay_ms(SETTLE_DELAY_MS);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<(u8, Vec<u8>)>,
        fail_on: Option<u8>,
    }

    impl PanelIo for Recorder {
        fn tx_param(&mut self, cmd: u8, params: &[u8]) -> Result<(), DisplayError> {
            if self.fail_on == Some(cmd) {
                return Err(DisplayError::BusWriteError);
            }
            self.writes.push((cmd, params.to_vec()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pauses(Vec<u32>);

    impl DelayNs for Pauses {
        fn delay_ns(&mut self, ns: u32) {
            self.0.push(ns);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms * 1_000_000);
        }
    }

    #[test]
    fn length_byte_matches_supplied_params() {
        for entry in &ST7789V_INIT {
            assert!(entry.data.len() <= MAX_PARAMS, "0x{:02X}", entry.cmd);
            assert_eq!(entry.param_len(), entry.data.len(), "0x{:02X}", entry.cmd);
        }
    }

    #[test]
    fn only_sleep_out_asks_for_settle_time() {
        let settling: Vec<u8> = ST7789V_INIT
            .iter()
            .filter(|entry| entry.needs_settle())
            .map(|entry| entry.cmd)
            .collect();
        assert_eq!(settling, vec![Cmd::SLEEP_OUT]);
    }

    #[test]
    fn full_table_replays_every_entry_in_order() {
        let mut io = Recorder::default();
        let mut delay = Pauses::default();

        replay(&mut io, &mut delay, &ST7789V_INIT).unwrap();

        let opcodes: Vec<u8> = io.writes.iter().map(|(cmd, _)| *cmd).collect();
        assert_eq!(
            opcodes,
            vec![
                0x11, 0x3A, 0xB2, 0xB7, 0xBB, 0xC0, 0xC2, 0xC3, 0xC6, 0xD0, 0x21, 0xD0, 0xD6,
                0xE0, 0xE1
            ]
        );
        assert_eq!(io.writes[13].1.len(), 14);
        assert_eq!(delay.0, vec![SETTLE_DELAY_MS * 1_000_000]);
    }

    #[test]
    fn pause_follows_only_flagged_entries() {
        use std::cell::RefCell;
        use std::rc::Rc;

        static TABLE: [InitCmd; 3] = [
            InitCmd { cmd: 0x3A, data: &[0x05], len: 1 },
            InitCmd { cmd: 0x11, data: &[], len: Flag::INIT_DELAY },
            InitCmd { cmd: 0x29, data: &[], len: 0 },
        ];

        // Writes and pauses share one log so their interleaving is visible.
        struct Io(Rc<RefCell<Vec<String>>>);
        impl PanelIo for Io {
            fn tx_param(&mut self, cmd: u8, _params: &[u8]) -> Result<(), DisplayError> {
                self.0.borrow_mut().push(format!("write 0x{cmd:02X}"));
                Ok(())
            }
        }
        struct Sleep(Rc<RefCell<Vec<String>>>);
        impl DelayNs for Sleep {
            fn delay_ns(&mut self, ns: u32) {
                self.0.borrow_mut().push(format!("pause {}ms", ns / 1_000_000));
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        replay(&mut Io(log.clone()), &mut Sleep(log.clone()), &TABLE).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["write 0x3A", "write 0x11", "pause 120ms", "write 0x29"]
        );
    }

    #[test]
    fn oversized_length_byte_is_rejected() {
        static TABLE: [InitCmd; 2] = [
            InitCmd { cmd: 0x3A, data: &[0x05], len: 1 },
            InitCmd { cmd: 0xB2, data: &[0x0B, 0x0B], len: 5 },
        ];
        let mut io = Recorder::default();
        let mut delay = Pauses::default();

        let result = replay(&mut io, &mut delay, &TABLE);

        assert!(matches!(result, Err(DisplayError::InvalidFormatError)));
        assert_eq!(io.writes.len(), 1);
    }

    #[test]
    fn failed_write_stops_the_replay() {
        let mut io = Recorder {
            fail_on: Some(Cmd::VCOM_SETTING),
            ..Default::default()
        };
        let mut delay = Pauses::default();

        let result = replay(&mut io, &mut delay, &ST7789V_INIT);

        assert!(matches!(result, Err(DisplayError::BusWriteError)));
        assert_eq!(io.writes.len(), 4);
    }
}
