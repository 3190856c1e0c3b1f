use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::build_board_grid;
use super::hud;
use super::state::AppState;

pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let board_container = state.borrow().board_container.clone();
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);
}

pub(super) fn show_win(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let Some(label) = &st.win_stats_label {
        label.set_text(&format!(
            "with {} moves\nin {} seconds",
            st.session.total_flips(),
            st.session.seconds_elapsed()
        ));
    }
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        stack.set_visible_child_name("win");
    }
}

/// Tears the previous game down and presents a freshly dealt board. The
/// next game waits for the start button or the first flip.
pub(super) fn show_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        hud::stop_timer(&mut st);
        if let Err(err) = st.reset_game() {
            // Unreachable with a validated dimension; deal anyway refuses.
            eprintln!("pairs: could not deal a new board: {err}");
            return;
        }
        hud::set_start_enabled(&st, true);
        hud::update_hud(&st);
    }

    rebuild_board(state);

    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideRight);
        stack.set_visible_child_name("game");
    }
}
