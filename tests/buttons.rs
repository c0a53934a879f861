mod common;

use common::{FakeBoard, FakeDelay, FakeLcd, FakeSurface, Log};

use tdisplay_hello::app::{self, Action, PowerSave};
use tdisplay_hello::board::{DISPLAY, T_DISPLAY_S3};
use tdisplay_hello::input::{Button, ButtonEvent};
use tdisplay_hello::port::GraphicsPort;
use tdisplay_hello::st7789::driver::{bring_up, PanelContext};
use tdisplay_hello::st7789::init_table::ST7789V_INIT;

struct Rig {
    log: Log,
    board: FakeBoard,
    panel: PanelContext<FakeLcd>,
    port: GraphicsPort<FakeSurface>,
    power_save: PowerSave,
}

impl Rig {
    fn new() -> Self {
        let log = Log::default();
        let backend = FakeLcd {
            log: log.clone(),
            fail_on: None,
        };
        let panel = bring_up(backend, &T_DISPLAY_S3, &ST7789V_INIT, &mut FakeDelay(log.clone())).unwrap();
        let port = GraphicsPort::init();
        port.add_display(panel.surface(), DISPLAY).unwrap();
        log.clear();
        Rig {
            board: FakeBoard::new(&log),
            log,
            panel,
            port,
            power_save: PowerSave::default(),
        }
    }

    fn press(&mut self, event: ButtonEvent) -> Action {
        app::on_button(
            event,
            &self.port,
            &mut self.panel,
            &mut self.board,
            &mut self.power_save,
        )
        .unwrap()
    }
}

#[test]
fn button_one_press_toggles_power_save() {
    let mut rig = Rig::new();

    assert_eq!(rig.press(ButtonEvent::Pressed(Button::One)), Action::Continue);
    assert!(rig.power_save.is_active());
    assert!(!rig.port.is_running());
    assert_eq!(rig.log.entries(), vec!["backlight 0", "display off"]);

    assert_eq!(rig.press(ButtonEvent::Pressed(Button::One)), Action::Continue);
    assert!(!rig.power_save.is_active());
    assert!(rig.port.is_running());
}

#[test]
fn button_two_long_press_asks_for_restart() {
    let mut rig = Rig::new();

    assert_eq!(rig.press(ButtonEvent::LongPress(Button::Two)), Action::Restart);

    assert!(rig.log.entries().is_empty());
    assert!(!rig.power_save.is_active());
}

#[test]
fn other_events_change_nothing() {
    let mut rig = Rig::new();

    for event in [
        ButtonEvent::Released(Button::One),
        ButtonEvent::LongPress(Button::One),
        ButtonEvent::Pressed(Button::Two),
        ButtonEvent::Released(Button::Two),
    ] {
        assert_eq!(rig.press(event), Action::Continue);
    }

    assert!(rig.log.entries().is_empty());
    assert!(!rig.power_save.is_active());
    assert!(rig.port.is_running());
}
