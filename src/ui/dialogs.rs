use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("Instructions"),
        Some(
            "Flip two cards per turn to find matching pairs.\n\
Matches stay revealed; the rest flip back after a second.\n\
Clear the board in as few moves and seconds as you can.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Pairs")
        .application_icon("io.github.pairsgame.Pairs")
        .developer_name("The Pairs developers")
        .version("1.0.0")
        .comments("A memory-matching card game.")
        .build();
    dialog.present(app.active_window().as_ref());
    dialog
}
