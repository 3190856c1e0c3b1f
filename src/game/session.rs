#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStatus {
    Hidden,
    Flipped,
    Matched,
}

#[derive(Clone, Debug)]
pub struct Card {
    pub symbol: String,
    pub status: CardStatus,
}

/// What a single accepted or rejected flip did to the turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Card was not hidden, out of range, or a pair is still unresolved.
    Rejected,
    /// First card of the turn is now face-up.
    FirstUp,
    /// Second card completed the pair; both stay revealed for good.
    Matched { pair: [usize; 2], won: bool },
    /// Second card did not match; both flip back once the turn resolves.
    Mismatched { pair: [usize; 2] },
}

/// One game's worth of mutable state: the card list plus the counters the
/// HUD displays. Owned by the UI layer behind `Rc<RefCell<_>>`; rendering is
/// a projection of this record, never the other way around.
pub struct Session {
    cards: Vec<Card>,
    flipped: Vec<usize>,
    started: bool,
    total_flips: u32,
    seconds_elapsed: u32,
}

impl Session {
    pub fn new(symbols: Vec<String>) -> Self {
        Session {
            cards: symbols
                .into_iter()
                .map(|symbol| Card {
                    symbol,
                    status: CardStatus::Hidden,
                })
                .collect(),
            flipped: Vec::new(),
            started: false,
            total_flips: 0,
            seconds_elapsed: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn total_flips(&self) -> u32 {
        self.total_flips
    }

    pub fn seconds_elapsed(&self) -> u32 {
        self.seconds_elapsed
    }

    pub fn tick(&mut self) {
        self.seconds_elapsed += 1;
    }

    pub fn is_won(&self) -> bool {
        self.cards
            .iter()
            .all(|card| card.status == CardStatus::Matched)
    }

    /// Turn state machine: 0 face-up -> 1 face-up -> 2 face-up (evaluate).
    /// A click while two cards await resolution is ignored outright, so the
    /// face-up count never exceeds two and the move counter only advances
    /// for flips that actually turn a card.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.flipped.len() >= 2 {
            return FlipOutcome::Rejected;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Rejected;
        };
        if card.status != CardStatus::Hidden {
            return FlipOutcome::Rejected;
        }

        card.status = CardStatus::Flipped;
        self.total_flips += 1;
        self.flipped.push(index);

        if self.flipped.len() < 2 {
            return FlipOutcome::FirstUp;
        }

        let pair = [self.flipped[0], self.flipped[1]];
        if self.cards[pair[0]].symbol == self.cards[pair[1]].symbol {
            for &idx in &pair {
                self.cards[idx].status = CardStatus::Matched;
            }
            FlipOutcome::Matched {
                pair,
                won: self.is_won(),
            }
        } else {
            FlipOutcome::Mismatched { pair }
        }
    }

    /// Flips every face-up unmatched card back down and resets the turn.
    /// Returns the indices that changed so the UI can redraw them.
    pub fn resolve_turn(&mut self) -> Vec<usize> {
        let mut reset = Vec::new();
        for (idx, card) in self.cards.iter_mut().enumerate() {
            if card.status == CardStatus::Flipped {
                card.status = CardStatus::Hidden;
                reset.push(idx);
            }
        }
        self.flipped.clear();
        reset
    }
}
