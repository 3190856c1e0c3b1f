use std::cell::RefCell;
use std::rc::Rc;

use gtk4::glib;
use gtk4::prelude::*;

use super::state::AppState;

pub(super) fn update_hud(st: &AppState) {
    if let Some(label) = &st.moves_label {
        label.set_text(&format!("{} moves", st.session.total_flips()));
    }
    if let Some(label) = &st.timer_label {
        label.set_text(&format!("Time: {} seconds", st.session.seconds_elapsed()));
    }
}

pub(super) fn set_start_enabled(st: &AppState, enabled: bool) {
    if let Some(button) = &st.start_button {
        button.set_sensitive(enabled);
        if enabled {
            button.remove_css_class("disabled");
        } else {
            button.add_css_class("disabled");
        }
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

/// One tick per second for as long as the handle lives: bump the elapsed
/// time and refresh both readouts. Stopped exactly once, on win or reset.
pub(super) fn start_timer(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(std::time::Duration::from_secs(1), move || {
        let mut st = state_clone.borrow_mut();
        st.session.tick();
        update_hud(&st);
        glib::ControlFlow::Continue
    });
    st.timer_handle = Some(handle);
}
