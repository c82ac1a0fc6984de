/// Transactional undo/redo history management.
///
/// Provides an `UndoManager` that records inverse actions as mutations
/// happen, batches everything registered during one synchronous burst
/// into a single atomic undo group, and derives redo groups by replaying
/// undo groups (and vice versa). History lives in memory only and lasts
/// for the editing session.
pub mod manager;

pub use manager::{Action, Mode, UndoManager};
