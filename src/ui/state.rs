use gtk4 as gtk;

use crate::game::deck::{self, DeckError};
use crate::game::session::Session;

/// Everything the handlers need, owned in one place behind `Rc<RefCell<_>>`:
/// widget handles filled in while the views are built, plus the live game
/// session. `game_id` is bumped on every deal so delayed callbacks from an
/// abandoned game can recognize themselves as stale and bail out.
pub struct AppState {
    pub view_stack: Option<gtk::Stack>,
    pub moves_label: Option<gtk::Label>,
    pub timer_label: Option<gtk::Label>,
    pub start_button: Option<gtk::Button>,
    pub win_stats_label: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,
    pub grid_buttons: Vec<gtk::Button>,

    pub session: Session,
    pub dimension: u32,
    pub lock_input: bool,
    pub game_id: u64,
    pub timer_handle: Option<glib::SourceId>,
}

impl AppState {
    pub fn new(dimension: u32) -> Self {
        AppState {
            view_stack: None,
            moves_label: None,
            timer_label: None,
            start_button: None,
            win_stats_label: None,
            board_container: None,
            dynamic_css_provider: None,
            grid_buttons: Vec::new(),
            session: Session::new(Vec::new()),
            dimension,
            lock_input: false,
            game_id: 0,
            timer_handle: None,
        }
    }

    /// Deals a fresh board and invalidates every pending delayed callback
    /// from the previous game.
    pub fn reset_game(&mut self) -> Result<(), DeckError> {
        self.game_id = self.game_id.wrapping_add(1);
        self.lock_input = false;
        let mut rng = rand::rng();
        let cards = deck::deal(self.dimension, &mut rng)?;
        self.session = Session::new(cards);
        Ok(())
    }

    pub fn is_current(&self, game_id: u64) -> bool {
        self.game_id == game_id
    }

    /// Turn resolution for a delayed callback. A stale generation means the
    /// board the callback belonged to is gone: nothing changes and `None`
    /// tells the caller to skip any redraw.
    pub fn resolve_turn_if_current(&mut self, game_id: u64) -> Option<Vec<usize>> {
        if !self.is_current(game_id) {
            return None;
        }
        let reset = self.session.resolve_turn();
        self.lock_input = false;
        Some(reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::CardStatus;

    fn mismatched_pair(st: &AppState) -> (usize, usize) {
        let cards = st.session.cards();
        let other = (1..cards.len())
            .find(|&i| cards[i].symbol != cards[0].symbol)
            .unwrap();
        (0, other)
    }

    #[test]
    fn current_generation_resolves_the_turn() {
        let mut st = AppState::new(4);
        st.reset_game().unwrap();
        let (first, second) = mismatched_pair(&st);
        st.session.flip(first);
        st.session.flip(second);
        st.lock_input = true;

        let game_id = st.game_id;
        let reset = st.resolve_turn_if_current(game_id).unwrap();
        assert_eq!(reset, vec![first, second]);
        assert!(!st.lock_input);
        assert_eq!(st.session.cards()[first].status, CardStatus::Hidden);
    }

    #[test]
    fn stale_generation_is_a_no_op() {
        let mut st = AppState::new(4);
        st.reset_game().unwrap();
        let (first, second) = mismatched_pair(&st);
        st.session.flip(first);
        st.session.flip(second);
        st.lock_input = true;

        let stale_id = st.game_id;
        st.reset_game().unwrap();
        st.session.flip(0);
        st.lock_input = true;

        assert!(!st.is_current(stale_id));
        assert_eq!(st.resolve_turn_if_current(stale_id), None);
        // The new game's turn is untouched by the stale callback.
        assert!(st.lock_input);
        assert_eq!(st.session.cards()[0].status, CardStatus::Flipped);
        assert_eq!(st.session.total_flips(), 1);
    }
}
