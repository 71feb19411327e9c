//! Python bindings for the space-memory game engine.
//!
//! Lets agents and notebooks drive the controller directly.
//!
//! # Quick Start
//!
//! ```python
//! import space_memory as sm
//!
//! game = sm.MemoryGame(pair_count=8, seed=42)
//! game.run_until_idle()          # skip the memorize phase
//!
//! obs = game.observation()       # -1 for hidden cards, item id otherwise
//! outcome = game.flip(game.legal_positions()[0])
//! events = game.drain_events()   # JSON strings, e.g. '{"CardFlipped":{"position":3}}'
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// space_memory: a memory-matching card game engine.
#[pymodule]
fn space_memory(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMemoryGame>()?;
    Ok(())
}
