/// Core undo/redo manager with deferred burst commits.
///
/// Every mutating operation in the application registers one inverse
/// action per atomic change, in the same synchronous turn as the change.
/// All actions registered during one such turn (a "burst") are flushed
/// together by `commit()` as a single group, so one user interaction
/// undoes in one step no matter how many field mutations it produced.
use std::mem;

/// What the manager is currently doing.
///
/// Routing state for newly registered actions: registrations made while
/// a group is being undone become the redo group for that step, and the
/// other way around. Always `Idle` between top-level calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Undoing,
    Redoing,
}

/// A single reversible step: applies the inverse of one already-applied
/// mutation. Runs exactly once; receives the replay target and the
/// manager so it can register its own inverse while it runs.
pub type Action<T> = Box<dyn FnOnce(&mut T, &mut UndoManager<T>)>;

/// Callback invoked immediately before/after a group is replayed, with
/// `is_undoing` telling the two apart. Used to suspend reactive side
/// effects (redraws, open cell editors) during bulk replay.
type ReplayHook = Box<dyn FnMut(bool)>;

/// Manages undo/redo history for a single editing session.
///
/// Single-threaded by design: all mutation and replay is synchronous,
/// and correctness rests on the commit-boundary contract rather than on
/// locking. The host drains the deferred commit once per turn (each UI
/// frame, or explicitly in tests) via [`UndoManager::commit`]; `undo`
/// and `redo` additionally drain it at their own boundaries so a turn
/// mixing replays with fresh edits cannot interleave their bursts.
pub struct UndoManager<T> {
    /// Committed undo groups, oldest first. Undo pops the end.
    undo_stack: Vec<Vec<Action<T>>>,
    /// Committed redo groups, oldest first. Redo pops the end.
    redo_stack: Vec<Vec<Action<T>>>,
    /// Actions registered since the last commit while not undoing.
    pending_undos: Vec<Action<T>>,
    /// Actions registered since the last commit while undoing.
    pending_redos: Vec<Action<T>>,
    /// Live routing state.
    mode: Mode,
    /// The scheduled deferred commit, carrying the mode snapshot taken
    /// at the first registration of the open burst. `None` = no burst
    /// is open.
    pending_commit: Option<Mode>,
    before_replay: Option<ReplayHook>,
    after_replay: Option<ReplayHook>,
}

impl<T> std::fmt::Debug for UndoManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoManager")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("pending_undos", &self.pending_undos.len())
            .field("pending_redos", &self.pending_redos.len())
            .field("mode", &self.mode)
            .field("pending_commit", &self.pending_commit)
            .finish()
    }
}

impl<T> Default for UndoManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UndoManager<T> {
    /// Creates a new empty manager.
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending_undos: Vec::new(),
            pending_redos: Vec::new(),
            mode: Mode::Idle,
            pending_commit: None,
            before_replay: None,
            after_replay: None,
        }
    }

    /// Registers the inverse of a mutation that was just applied.
    ///
    /// The action lands in the pending redo buffer while a group is
    /// being undone, otherwise in the pending undo buffer. The first
    /// registration of a burst (both buffers empty) schedules exactly
    /// one deferred commit and snapshots the current mode for it, so
    /// the whole burst commits consistently. Registration cannot fail.
    pub fn register_undo(&mut self, action: impl FnOnce(&mut T, &mut UndoManager<T>) + 'static) {
        if self.pending_undos.is_empty() && self.pending_redos.is_empty() {
            self.pending_commit = Some(self.mode);
        }
        if self.mode == Mode::Undoing {
            self.pending_redos.push(Box::new(action));
        } else {
            self.pending_undos.push(Box::new(action));
        }
    }

    /// Flushes the open burst, if any, onto the appropriate stack.
    ///
    /// Called by the host once per synchronous turn, after all mutation
    /// for that turn is done. A burst registered while idle commits to
    /// the undo stack and invalidates redo history; a burst registered
    /// during undo commits to the redo stack; a burst registered during
    /// redo commits to the undo stack without touching redo history.
    /// No-op when no burst is open.
    ///
    /// [`Self::undo`] and [`Self::redo`] also drain the open burst at
    /// their own boundaries, so at most one burst's actions are ever
    /// buffered and a host commit right after a replay is a no-op.
    pub fn commit(&mut self) {
        let Some(captured) = self.pending_commit.take() else {
            return;
        };
        if captured == Mode::Undoing {
            let group = mem::take(&mut self.pending_redos);
            tracing::trace!(actions = group.len(), "committing redo group");
            self.redo_stack.push(group);
        } else {
            let group = mem::take(&mut self.pending_undos);
            tracing::trace!(actions = group.len(), "committing undo group");
            self.undo_stack.push(group);
            if captured == Mode::Idle {
                // New forward work invalidates future redo history.
                self.redo_stack.clear();
            }
        }
    }

    /// Undoes the most recently committed group.
    ///
    /// Any burst still open from earlier in the turn commits first, so
    /// an edit made moments before is what gets undone. Actions then
    /// run in reverse registration order, each re-registering its own
    /// inverse; those inverses commit as the redo group when the replay
    /// returns. Silent no-op when there is nothing to undo (hooks are
    /// not invoked).
    pub fn undo(&mut self, target: &mut T) {
        self.replay(target, Mode::Undoing);
    }

    /// Redoes the most recently undone group. Symmetric to [`Self::undo`].
    pub fn redo(&mut self, target: &mut T) {
        self.replay(target, Mode::Redoing);
    }

    fn replay(&mut self, target: &mut T, mode: Mode) {
        // A forward burst still open from earlier in the turn commits
        // first, so the pop below sees it as the top group.
        self.commit();
        self.mode = mode;
        let is_undoing = mode == Mode::Undoing;
        let popped = if is_undoing {
            self.undo_stack.pop()
        } else {
            self.redo_stack.pop()
        };
        if let Some(mut group) = popped {
            if let Some(hook) = self.before_replay.as_mut() {
                hook(is_undoing);
            }
            // Last-registered-first: if A then B were applied forward,
            // B's inverse must run before A's.
            while let Some(action) = group.pop() {
                action(target, self);
            }
            if let Some(hook) = self.after_replay.as_mut() {
                hook(is_undoing);
            }
        }
        self.mode = Mode::Idle;
        // The derived group commits here, using the mode snapshot taken
        // during the replay. A later registration in the same turn opens
        // a fresh burst instead of joining this one.
        self.commit();
    }

    /// Whether there is a group to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is a group to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of committed undo groups.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of committed redo groups.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether a burst is open and waiting for [`Self::commit`].
    pub fn has_pending_commit(&self) -> bool {
        self.pending_commit.is_some()
    }

    /// Installs the callback invoked right before a group replays.
    /// Installing again replaces the previous hook.
    pub fn set_before_replay(&mut self, hook: impl FnMut(bool) + 'static) {
        self.before_replay = Some(Box::new(hook));
    }

    /// Installs the callback invoked right after a group replays.
    pub fn set_after_replay(&mut self, hook: impl FnMut(bool) + 'static) {
        self.after_replay = Some(Box::new(hook));
    }

    /// Discards all history, including any uncommitted burst.
    ///
    /// Used when the session's document is replaced wholesale (File ▸
    /// New / Open); installed hooks survive.
    pub fn clear(&mut self) {
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "clearing undo history"
        );
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending_undos.clear();
        self.pending_redos.clear();
        self.pending_commit = None;
        self.mode = Mode::Idle;
    }
}
