//! In-memory stand-ins for the window, shortcut registry and UI layer.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex};
use serde_json::Value;

use crate::bridge::{QueryError, UiBridge, UiEvent, UiQuery};
use crate::shortcuts::{RegistryError, ShortcutAction, ShortcutRegistry};
use crate::window::{OverlayWindow, Position, Size, WindowError};

// ============================================================================
// Window
// ============================================================================

/// Mutation observed by a [`FakeWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCall {
    SetSize(Size),
    SetPosition(Position),
    SetResizable(bool),
    ShowInactive,
    Hide,
    Minimize,
    SetIgnoreCursorEvents(bool),
    SetContentProtected(bool),
}

#[derive(Debug)]
struct WindowState {
    size: Size,
    position: Position,
    work_area: Size,
    visible: bool,
    resizable: bool,
    minimized: bool,
    ignores_cursor: bool,
    content_protected: bool,
    destroyed: bool,
    failing: bool,
    calls: Vec<WindowCall>,
}

/// Window that records every mutation. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    state: Arc<Mutex<WindowState>>,
}

impl FakeWindow {
    pub fn new(size: Size, position: Position) -> Self {
        Self {
            state: Arc::new(Mutex::new(WindowState {
                size,
                position,
                work_area: Size::new(1920, 1080),
                visible: true,
                resizable: false,
                minimized: false,
                ignores_cursor: false,
                content_protected: false,
                destroyed: false,
                failing: false,
                calls: Vec::new(),
            })),
        }
    }

    pub fn set_work_area(&self, area: Size) { self.state.lock().work_area = area; }

    pub fn set_visible_state(&self, visible: bool) { self.state.lock().visible = visible; }

    pub fn destroy(&self) { self.state.lock().destroyed = true; }

    /// Makes every mutation fail with a platform error.
    pub fn set_failing(&self, failing: bool) { self.state.lock().failing = failing; }

    pub fn calls(&self) -> Vec<WindowCall> { self.state.lock().calls.clone() }

    pub fn clear_calls(&self) { self.state.lock().calls.clear(); }

    pub fn current_size(&self) -> Size { self.state.lock().size }

    pub fn current_position(&self) -> Position { self.state.lock().position }

    pub fn visible(&self) -> bool { self.state.lock().visible }

    pub fn resizable(&self) -> bool { self.state.lock().resizable }

    pub fn minimized(&self) -> bool { self.state.lock().minimized }

    pub fn ignores_cursor(&self) -> bool { self.state.lock().ignores_cursor }

    pub fn content_protected(&self) -> bool { self.state.lock().content_protected }

    fn read<T>(&self, f: impl FnOnce(&WindowState) -> T) -> Result<T, WindowError> {
        let state = self.state.lock();
        if state.destroyed {
            return Err(WindowError::Destroyed);
        }
        Ok(f(&state))
    }

    fn mutate(
        &self,
        call: WindowCall,
        f: impl FnOnce(&mut WindowState),
    ) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        if state.destroyed {
            return Err(WindowError::Destroyed);
        }
        if state.failing {
            return Err(WindowError::Platform(format!("{call:?} failed")));
        }
        state.calls.push(call);
        f(&mut state);
        Ok(())
    }
}

impl OverlayWindow for FakeWindow {
    fn is_destroyed(&self) -> bool { self.state.lock().destroyed }

    fn size(&self) -> Result<Size, WindowError> { self.read(|state| state.size) }

    fn position(&self) -> Result<Position, WindowError> { self.read(|state| state.position) }

    fn is_visible(&self) -> Result<bool, WindowError> { self.read(|state| state.visible) }

    fn set_size(&self, size: Size) -> Result<(), WindowError> {
        self.mutate(WindowCall::SetSize(size), |state| state.size = size)
    }

    fn set_position(&self, position: Position) -> Result<(), WindowError> {
        self.mutate(WindowCall::SetPosition(position), |state| state.position = position)
    }

    fn set_resizable(&self, resizable: bool) -> Result<(), WindowError> {
        self.mutate(WindowCall::SetResizable(resizable), |state| state.resizable = resizable)
    }

    fn show_inactive(&self) -> Result<(), WindowError> {
        self.mutate(WindowCall::ShowInactive, |state| state.visible = true)
    }

    fn hide(&self) -> Result<(), WindowError> {
        self.mutate(WindowCall::Hide, |state| state.visible = false)
    }

    fn minimize(&self) -> Result<(), WindowError> {
        self.mutate(WindowCall::Minimize, |state| state.minimized = true)
    }

    fn set_ignore_cursor_events(&self, ignore: bool) -> Result<(), WindowError> {
        self.mutate(WindowCall::SetIgnoreCursorEvents(ignore), |state| {
            state.ignores_cursor = ignore;
        })
    }

    fn set_content_protected(&self, protected: bool) -> Result<(), WindowError> {
        self.mutate(WindowCall::SetContentProtected(protected), |state| {
            state.content_protected = protected;
        })
    }

    fn work_area(&self) -> Result<Size, WindowError> { self.read(|state| state.work_area) }
}

// ============================================================================
// Shortcut registry
// ============================================================================

/// Mutation observed by a [`FakeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    Register(String, ShortcutAction),
    Unregister(String),
    UnregisterAll,
}

/// Holds `register` calls until released, like a plugin waiting on a busy
/// main thread.
#[derive(Debug, Default)]
pub struct RegistrationGate {
    open: Mutex<bool>,
    opened: Condvar,
    entered: AtomicUsize,
}

impl RegistrationGate {
    pub fn release(&self) {
        *self.open.lock() = true;
        self.opened.notify_all();
    }

    /// Number of `register` calls that reached the gate.
    pub fn entered(&self) -> usize { self.entered.load(Ordering::SeqCst) }

    fn pass(&self) {
        self.entered.fetch_add(1, Ordering::SeqCst);
        let mut open = self.open.lock();
        while !*open {
            self.opened.wait(&mut open);
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    bound: BTreeMap<String, ShortcutAction>,
    rejected: BTreeSet<String>,
    fail_reads: bool,
    fail_unregister: bool,
    gate: Option<Arc<RegistrationGate>>,
    calls: Vec<RegistryCall>,
}

/// Registry that keeps bindings in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl FakeRegistry {
    pub fn new() -> Self { Self::default() }

    /// Makes registering `accelerator` fail.
    pub fn reject(&self, accelerator: &str) {
        self.state.lock().rejected.insert(accelerator.to_string());
    }

    pub fn fail_reads(&self, fail: bool) { self.state.lock().fail_reads = fail; }

    pub fn fail_unregister(&self, fail: bool) { self.state.lock().fail_unregister = fail; }

    /// Makes every `register` call block until the returned gate is released.
    pub fn hold_registrations(&self) -> Arc<RegistrationGate> {
        let gate = Arc::new(RegistrationGate::default());
        self.state.lock().gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn bound(&self) -> BTreeMap<String, ShortcutAction> { self.state.lock().bound.clone() }

    pub fn calls(&self) -> Vec<RegistryCall> { self.state.lock().calls.clone() }

    pub fn clear_calls(&self) { self.state.lock().calls.clear(); }

    /// Simulates a press of `accelerator`, returning the bound action.
    pub fn action_for(&self, accelerator: &str) -> Option<ShortcutAction> {
        self.state.lock().bound.get(accelerator).copied()
    }
}

impl ShortcutRegistry for FakeRegistry {
    fn registered(&self) -> Result<BTreeMap<String, ShortcutAction>, RegistryError> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(RegistryError::Platform("registry unavailable".to_string()));
        }
        Ok(state.bound.clone())
    }

    fn register(&self, accelerator: &str, action: ShortcutAction) -> Result<(), RegistryError> {
        let gate = self.state.lock().gate.clone();
        if let Some(gate) = gate {
            gate.pass();
        }

        let mut state = self.state.lock();
        if state.rejected.contains(accelerator) {
            return Err(RegistryError::Platform(format!("{accelerator} is taken")));
        }
        state.calls.push(RegistryCall::Register(accelerator.to_string(), action));
        state.bound.insert(accelerator.to_string(), action);
        Ok(())
    }

    fn unregister(&self, accelerator: &str) -> Result<(), RegistryError> {
        let mut state = self.state.lock();
        if state.fail_unregister {
            return Err(RegistryError::Platform(format!("cannot unregister {accelerator}")));
        }
        state.calls.push(RegistryCall::Unregister(accelerator.to_string()));
        state.bound.remove(accelerator);
        Ok(())
    }

    fn unregister_all(&self) -> Result<(), RegistryError> {
        let mut state = self.state.lock();
        state.calls.push(RegistryCall::UnregisterAll);
        state.bound.clear();
        Ok(())
    }
}

// ============================================================================
// UI bridge
// ============================================================================

type QueryHook = Arc<dyn Fn(UiQuery) + Send + Sync>;

#[derive(Default)]
struct BridgeState {
    answers: HashMap<UiQuery, Result<Value, QueryError>>,
    hook: Option<QueryHook>,
    queries: Vec<UiQuery>,
    events: Vec<UiEvent>,
    shortcuts: Vec<String>,
}

/// UI layer with canned answers. Unanswered queries fail with
/// [`QueryError::Closed`]. Clones share state.
#[derive(Clone, Default)]
pub struct FakeBridge {
    state: Arc<Mutex<BridgeState>>,
}

impl FakeBridge {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn answer(self, query: UiQuery, value: Value) -> Self {
        self.state.lock().answers.insert(query, Ok(value));
        self
    }

    #[must_use]
    pub fn fail(self, query: UiQuery, error: QueryError) -> Self {
        self.state.lock().answers.insert(query, Err(error));
        self
    }

    pub fn set_answer(&self, query: UiQuery, value: Value) {
        self.state.lock().answers.insert(query, Ok(value));
    }

    /// Runs `hook` whenever a query is made, before it is answered.
    pub fn on_query(&self, hook: impl Fn(UiQuery) + Send + Sync + 'static) {
        self.state.lock().hook = Some(Arc::new(hook));
    }

    pub fn queries(&self) -> Vec<UiQuery> { self.state.lock().queries.clone() }

    pub fn events(&self) -> Vec<UiEvent> { self.state.lock().events.clone() }

    pub fn shortcuts(&self) -> Vec<String> { self.state.lock().shortcuts.clone() }
}

impl UiBridge for FakeBridge {
    fn query(&self, query: UiQuery) -> impl Future<Output = Result<Value, QueryError>> + Send {
        let (answer, hook) = {
            let mut state = self.state.lock();
            state.queries.push(query);
            let answer = state.answers.get(&query).cloned().unwrap_or(Err(QueryError::Closed));
            (answer, state.hook.clone())
        };
        if let Some(hook) = hook {
            hook(query);
        }
        // Yield once so callers observe a real suspension point.
        async move {
            tokio::task::yield_now().await;
            answer
        }
    }

    fn notify(&self, event: UiEvent) { self.state.lock().events.push(event); }

    fn invoke_shortcut(&self, label: &str) { self.state.lock().shortcuts.push(label.to_string()); }
}
