use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;

use super::board::CONTENT_MARGIN;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud;
use super::scene::{rebuild_board, show_game, show_win};
use super::state::AppState;
use crate::config::Settings;
use crate::game::session::FlipOutcome;

const TURN_RESET_DELAY_MS: u64 = 1000;
const WIN_REVEAL_DELAY_MS: u64 = 1000;

pub(super) fn redraw_button_child(button: &gtk::Button) {
    if let Some(child) = button.child() {
        child.queue_draw();
    }
}

pub fn run(settings: Settings) {
    glib::set_prgname(Some("io.github.pairsgame.Pairs"));
    let app = adw::Application::builder()
        .application_id("io.github.pairsgame.Pairs")
        .build();

    app.connect_activate(move |app| {
        load_css();

        let state = Rc::new(RefCell::new(AppState::new(settings.dimension)));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gtk::gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let title = gtk::Label::new(None);
        title.set_markup("<b>Pairs</b>");
        title.set_halign(gtk::Align::Center);

        let header = adw::HeaderBar::builder().title_widget(&title).build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let menu_model = gio::Menu::new();
        menu_model.append(Some("Instructions"), Some("app.instructions"));
        menu_model.append(Some("About Pairs"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("New Game"));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| {
                show_game(&state);
            }
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        view_stack.set_transition_duration(300);

        {
            let mut st = state.borrow_mut();
            st.view_stack = Some(view_stack.clone());
            st.dynamic_css_provider = Some(dynamic_css_provider);
            // First deal. The dimension was validated with the settings, so
            // a refusal here means the pool or parity rules changed under us.
            if let Err(err) = st.reset_game() {
                eprintln!("pairs: could not deal the opening board: {err}");
            }
        }

        let game_view = build_game_view(&state);
        view_stack.add_named(&game_view, Some("game"));

        let win_view = build_win_view(&state);
        view_stack.add_named(&win_view, Some("win"));

        view_stack.set_visible_child_name("game");

        {
            let st = state.borrow();
            hud::update_hud(&st);
            hud::set_start_enabled(&st, true);
        }

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Pairs")
            .icon_name("io.github.pairsgame.Pairs")
            .default_width(720)
            .default_height(640)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 480);
        win.add_css_class("app-window");

        let style_manager = adw::StyleManager::default();
        if style_manager.is_dark() {
            win.add_css_class("theme-dark");
        } else {
            win.add_css_class("theme-light");
        }
        style_manager.connect_notify_local(Some("dark"), {
            let win = win.clone();
            move |manager, _| {
                if manager.is_dark() {
                    win.remove_css_class("theme-light");
                    win.add_css_class("theme-dark");
                } else {
                    win.remove_css_class("theme-dark");
                    win.add_css_class("theme-light");
                }
            }
        });

        win.present();
    });

    app.run();
}

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(include_str!("../../data/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let hud_row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    hud_row.add_css_class("hud-row");

    let moves_label = gtk::Label::builder()
        .label("0 moves")
        .halign(gtk::Align::Start)
        .css_classes(vec!["hud-readout", "moves"])
        .build();

    let timer_label = gtk::Label::builder()
        .label("Time: 0 seconds")
        .halign(gtk::Align::Start)
        .css_classes(vec!["hud-readout", "timer"])
        .build();

    let spacer = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    spacer.set_hexpand(true);

    let start_button = gtk::Button::with_label("Start");
    start_button.add_css_class("start-button");
    start_button.add_css_class("suggested-action");
    start_button.connect_clicked({
        let state = state.clone();
        move |_| {
            start_game(&state);
        }
    });

    hud_row.append(&moves_label);
    hud_row.append(&timer_label);
    hud_row.append(&spacer);
    hud_row.append(&start_button);
    content.append(&hud_row);

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("pairs-board-container");

    board_frame.set_child(Some(&board_card));
    content.append(&board_frame);
    root.append(&content);

    {
        let mut st = state.borrow_mut();
        st.moves_label = Some(moves_label);
        st.timer_label = Some(timer_label);
        st.start_button = Some(start_button);
        st.board_container = Some(board_card);
    }
    rebuild_board(state);

    root
}

fn build_win_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("win-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 14);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_margin_top(28);
    content.set_margin_bottom(28);
    content.set_margin_start(28);
    content.set_margin_end(28);
    content.add_css_class("win-card");

    let title = gtk::Label::new(Some("You won!"));
    title.add_css_class("win-title");
    title.add_css_class("title-1");

    let stats = gtk::Label::new(None);
    stats.add_css_class("win-stats");
    stats.add_css_class("body");
    stats.set_justify(gtk::Justification::Center);

    let again_btn = gtk::Button::with_label("Play Again");
    again_btn.add_css_class("suggested-action");
    again_btn.set_halign(gtk::Align::Center);
    again_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            show_game(&state);
        }
    });

    content.append(&title);
    content.append(&stats);
    content.append(&again_btn);
    center.set_center_widget(Some(&content));
    root.append(&center);

    state.borrow_mut().win_stats_label = Some(stats);

    root
}

pub(super) fn start_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        if st.session.started() {
            return;
        }
        st.session.start();
        hud::set_start_enabled(&st, false);
        hud::update_hud(&st);
    }
    hud::start_timer(state);
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let (outcome, game_id, needs_start) = {
        let mut st = state.borrow_mut();
        if st.lock_input {
            return;
        }
        let outcome = st.session.flip(index);
        if outcome == FlipOutcome::Rejected {
            return;
        }
        if let Some(button) = st.grid_buttons.get(index) {
            button.add_css_class("active");
            redraw_button_child(button);
        }
        hud::update_hud(&st);
        let needs_start = !st.session.started();
        (outcome, st.game_id, needs_start)
    };
    if needs_start {
        start_game(state);
    }

    match outcome {
        FlipOutcome::FirstUp | FlipOutcome::Rejected => {}
        FlipOutcome::Matched { pair, won } => {
            {
                let mut st = state.borrow_mut();
                for &idx in &pair {
                    if let Some(button) = st.grid_buttons.get(idx) {
                        button.remove_css_class("active");
                        button.add_css_class("matched");
                        redraw_button_child(button);
                    }
                }
                st.lock_input = true;
            }
            schedule_turn_reset(state, game_id);
            if won {
                schedule_win_reveal(state, game_id);
            }
        }
        FlipOutcome::Mismatched { .. } => {
            state.borrow_mut().lock_input = true;
            schedule_turn_reset(state, game_id);
        }
    }
}

/// One second after the second flip, turn the unmatched pair back down and
/// accept input again. Stale callbacks from a replaced game bail on the
/// generation check.
fn schedule_turn_reset(state: &Rc<RefCell<AppState>>, game_id: u64) {
    let state_reset = state.clone();
    glib::timeout_add_local(
        std::time::Duration::from_millis(TURN_RESET_DELAY_MS),
        move || {
            let mut st = state_reset.borrow_mut();
            let Some(reset) = st.resolve_turn_if_current(game_id) else {
                return glib::ControlFlow::Break;
            };
            for idx in reset {
                if let Some(button) = st.grid_buttons.get(idx) {
                    button.remove_css_class("active");
                    redraw_button_child(button);
                }
            }
            glib::ControlFlow::Break
        },
    );
}

fn schedule_win_reveal(state: &Rc<RefCell<AppState>>, game_id: u64) {
    let state_win = state.clone();
    glib::timeout_add_local(
        std::time::Duration::from_millis(WIN_REVEAL_DELAY_MS),
        move || {
            {
                let mut st = state_win.borrow_mut();
                if !st.is_current(game_id) {
                    return glib::ControlFlow::Break;
                }
                hud::stop_timer(&mut st);
                hud::update_hud(&st);
            }
            show_win(&state_win);
            glib::ControlFlow::Break
        },
    );
}
