//! Game bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::core::Action;
use crate::game::{ClickOutcome, IgnoreReason, MemoryGame, MemoryGameBuilder};

/// Python wrapper for MemoryGame.
#[pyclass(name = "MemoryGame")]
pub struct PyMemoryGame {
    game: MemoryGame,
}

#[pymethods]
impl PyMemoryGame {
    /// Create a new game and deal the first deck.
    ///
    /// # Arguments
    /// - pair_count: Number of pairs on the board
    /// - seed: RNG seed for reproducible deals (entropy if omitted)
    #[new]
    #[pyo3(signature = (pair_count = 8, seed = None))]
    fn new(pair_count: usize, seed: Option<u64>) -> PyResult<Self> {
        let mut builder = MemoryGameBuilder::new().pair_count(pair_count);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        let game = builder
            .build()
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        Ok(Self { game })
    }

    /// Click a card. Returns the outcome name, e.g. "matched" or
    /// "ignored:paused".
    fn flip(&mut self, position: usize) -> PyResult<String> {
        if position >= self.game.deck().len() {
            return Err(PyErr::new::<PyIndexError, _>(format!(
                "card position {} out of range for {} cards",
                position,
                self.game.deck().len()
            )));
        }

        let name = match self.game.handle_card_click(position) {
            ClickOutcome::Flipped => "flipped",
            ClickOutcome::Matched(_) => "matched",
            ClickOutcome::Mismatched => "mismatched",
            ClickOutcome::Won => "won",
            ClickOutcome::Ignored(reason) => match reason {
                IgnoreReason::NotStarted => "ignored:not_started",
                IgnoreReason::Paused => "ignored:paused",
                IgnoreReason::SelectionFull => "ignored:selection_full",
                IgnoreReason::AlreadyMatched => "ignored:already_matched",
                IgnoreReason::AlreadyFaceUp => "ignored:already_face_up",
            },
        };
        Ok(name.to_string())
    }

    fn toggle_pause(&mut self) -> bool {
        self.game.toggle_pause()
    }

    fn show_help(&mut self) -> bool {
        self.game.show_help()
    }

    fn dismiss_overlay(&mut self) -> bool {
        self.game.dismiss_overlay()
    }

    /// Deal a new deck and restart the reveal sequence.
    fn reset(&mut self) {
        self.game.reset_game();
    }

    /// Advance the clock by `ms`, returning how many timers fired.
    fn advance(&mut self, ms: u64) -> usize {
        self.game.advance(ms)
    }

    /// Fire every pending timer.
    fn run_until_idle(&mut self) -> usize {
        self.game.run_until_idle()
    }

    /// Positions that would accept a click right now.
    fn legal_positions(&self) -> Vec<usize> {
        self.game
            .legal_actions()
            .into_iter()
            .filter_map(Action::position)
            .collect()
    }

    /// Take the recorded events as JSON strings, oldest first.
    ///
    /// The log keeps only the most recent events, so long-running loops
    /// should drain it every step.
    fn drain_events(&mut self) -> PyResult<Vec<String>> {
        self.game
            .drain_events()
            .iter()
            .map(|event| serde_json::to_string(event).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string())))
            .collect()
    }

    /// Board as a numpy array: -1 for hidden cards, the item id otherwise.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        let obs: Vec<i64> = self
            .game
            .deck()
            .iter()
            .map(|c| if c.is_revealed() { c.item_id.raw() as i64 } else { -1 })
            .collect();
        PyArray1::from_slice_bound(py, &obs)
    }

    #[getter]
    fn phase(&self) -> String {
        self.game.phase().to_string()
    }

    #[getter]
    fn overlay(&self) -> Option<String> {
        self.game.overlay().map(|o| o.to_string())
    }

    #[getter]
    fn match_count(&self) -> usize {
        self.game.match_count()
    }

    #[getter]
    fn pair_count(&self) -> usize {
        self.game.pair_count()
    }

    #[getter]
    fn selection(&self) -> Vec<usize> {
        self.game.selection().to_vec()
    }

    #[getter]
    fn now(&self) -> u64 {
        self.game.now()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.game.seed()
    }

    fn __repr__(&self) -> String {
        format!(
            "MemoryGame(phase={}, matched={}/{}, t={}ms)",
            self.game.phase(),
            self.game.match_count(),
            self.game.pair_count(),
            self.game.now()
        )
    }
}
