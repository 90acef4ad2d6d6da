//! Scripted demo of the Ethereal Echoes page, driven without a UI.
//!
//! Plays on the default output device when one exists; otherwise the page
//! reports "audio unsupported" and the script still runs through.

use std::time::Duration;

use ethereal_echoes::app::EtherealEchoes;
use ethereal_echoes::canvas::{PointerClick, Rect};
use ethereal_echoes::controls::{ControlChange, ControlId};
use ethereal_echoes::engine::ToneEngineOptions;

fn apply(updates: Vec<ethereal_echoes::app::UiUpdate>) {
    for update in updates {
        println!("ui: {update:?}");
    }
}

fn main() {
    env_logger::init();

    let bounds = Rect {
        left: 100.,
        top: 100.,
        width: 600.,
        height: 400.,
    };
    let mut page = EtherealEchoes::new(
        bounds,
        ["chime", "wave", "leaf", "moon"],
        ToneEngineOptions::default(),
    );

    // draw a few dots and pick a symbol
    apply(page.pointer_click(PointerClick {
        client_x: 250.,
        client_y: 180.,
    }));
    apply(page.pointer_click(PointerClick {
        client_x: 420.,
        client_y: 310.,
    }));
    apply(page.symbol_click("wave"));

    // start the tone and sweep the pitch slider over its two octaves
    apply(page.audio_button_click());
    for value in (0..=100).step_by(25) {
        apply(page.control_change(ControlChange {
            id: ControlId::Pitch,
            value,
        }));
        std::thread::sleep(Duration::from_millis(400));
    }

    // settle on a calm volume
    apply(page.control_change(ControlChange {
        id: ControlId::Volume,
        value: 30,
    }));

    // a one minute meditation session, ended early after a few seconds
    apply(page.meditation_button_click(1));
    let ticker = crossbeam_channel::tick(Duration::from_secs(1));
    for _ in 0..5 {
        ticker.recv().expect("ticker never closes");
        apply(page.meditation_tick());
    }
    apply(page.meditation_button_click(1));
}
