//! In-memory GUI backend.
//!
//! Panels "load" on a background thread and report completion over a channel,
//! so [`Panel::wait_until_loaded`] is a real blocking barrier. Everything the
//! plugin pushes into the backend is recorded for inspection.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use cursor_icon::CursorIcon;
use glam::UVec2;
use nebula_scene::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::error::UiError;
use crate::panel::{CursorCallback, CursorSink, InputRegistry, Panel, PanelFactory};
use crate::sidebar::SideBar;

/// A side-bar tab as registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideBarTab {
    pub name: String,
    pub icon: String,
    pub html: String,
}

/// What a headless panel has been asked to do so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelRecord {
    pub size: UVec2,
    pub loaded: bool,
    pub content: Option<String>,
    pub linear_depth: bool,
    pub has_cursor_callback: bool,
    /// Set once the panel handle has been dropped.
    pub released: bool,
}

type Records = Arc<Mutex<Vec<PanelRecord>>>;
type Callbacks = Arc<Mutex<FxHashMap<usize, CursorCallback>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Headless implementation of every GUI collaborator.
#[derive(Default)]
pub struct HeadlessGui {
    tabs: Vec<SideBarTab>,
    selectable: FxHashSet<NodeId>,
    records: Records,
    callbacks: Callbacks,
    load_delay: Duration,
    stall_loading: bool,
    fail_creation_at: Option<usize>,
}

impl HeadlessGui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated page load time for new panels.
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// New panels never finish loading.
    pub fn with_stalled_loading(mut self) -> Self {
        self.stall_loading = true;
        self
    }

    /// Reject the creation of the panel with the given zero-based index once.
    /// Rejected requests do not count towards the index.
    pub fn with_creation_failure_at(mut self, index: usize) -> Self {
        self.fail_creation_at = Some(index);
        self
    }

    pub fn tabs(&self) -> &[SideBarTab] {
        &self.tabs
    }

    pub fn is_selectable(&self, node: NodeId) -> bool {
        self.selectable.contains(&node)
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable.len()
    }

    /// Snapshot of every panel created so far, in creation order.
    pub fn panel_records(&self) -> Vec<PanelRecord> {
        lock(&self.records).clone()
    }

    /// Simulate the pointer hovering content in panel `index` that asks for
    /// `icon`. Returns `false` if the panel has no cursor callback.
    pub fn hover(&self, index: usize, icon: CursorIcon) -> bool {
        match lock(&self.callbacks).get_mut(&index) {
            Some(callback) => {
                callback(icon);
                true
            }
            None => false,
        }
    }

    /// Number of panels created and not yet dropped.
    pub fn live_panel_count(&self) -> usize {
        lock(&self.records).iter().filter(|r| !r.released).count()
    }
}

impl PanelFactory for HeadlessGui {
    fn create_panel(&mut self, width: u32, height: u32) -> Result<Box<dyn Panel>, UiError> {
        let index = lock(&self.records).len();
        if self.fail_creation_at == Some(index) {
            self.fail_creation_at = None;
            return Err(UiError::PanelCreation {
                width,
                height,
                reason: "backend refused panel".to_string(),
            });
        }

        lock(&self.records).push(PanelRecord {
            size: UVec2::new(width, height),
            ..Default::default()
        });

        let (sender, receiver) = bounded(1);
        let stalled = if self.stall_loading {
            Some(sender)
        } else {
            let delay = self.load_delay;
            thread::spawn(move || {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                // The panel may already be gone; nobody is waiting then.
                let _ = sender.send(Ok(()));
            });
            None
        };

        debug!("Created headless panel {index} ({width}x{height})");
        Ok(Box::new(HeadlessPanel {
            index,
            size: UVec2::new(width, height),
            loaded: false,
            loader: receiver,
            _stalled: stalled,
            records: Arc::clone(&self.records),
            callbacks: Arc::clone(&self.callbacks),
        }))
    }
}

impl SideBar for HeadlessGui {
    fn add_tab(&mut self, name: &str, icon: &str, html: &str) {
        self.tabs.push(SideBarTab {
            name: name.to_string(),
            icon: icon.to_string(),
            html: html.to_string(),
        });
    }

    fn remove_tab(&mut self, name: &str) -> bool {
        match self.tabs.iter().position(|tab| tab.name == name) {
            Some(index) => {
                self.tabs.remove(index);
                true
            }
            None => false,
        }
    }
}

impl InputRegistry for HeadlessGui {
    fn register_selectable(&mut self, node: NodeId) {
        self.selectable.insert(node);
    }

    fn unregister_selectable(&mut self, node: NodeId) -> bool {
        self.selectable.remove(&node)
    }
}

struct HeadlessPanel {
    index: usize,
    size: UVec2,
    loaded: bool,
    loader: Receiver<Result<(), String>>,
    _stalled: Option<Sender<Result<(), String>>>,
    records: Records,
    callbacks: Callbacks,
}

impl HeadlessPanel {
    fn update_record(&self, f: impl FnOnce(&mut PanelRecord)) {
        if let Some(record) = lock(&self.records).get_mut(self.index) {
            f(record);
        }
    }
}

impl Panel for HeadlessPanel {
    fn size(&self) -> UVec2 {
        self.size
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn wait_until_loaded(&mut self, timeout: Option<Duration>) -> Result<(), UiError> {
        if self.loaded {
            return Ok(());
        }

        let outcome = match timeout {
            None => self.loader.recv().map_err(|_| UiError::Disconnected)?,
            Some(limit) => self.loader.recv_timeout(limit).map_err(|err| match err {
                RecvTimeoutError::Timeout => UiError::LoadTimeout(limit),
                RecvTimeoutError::Disconnected => UiError::Disconnected,
            })?,
        };
        outcome.map_err(UiError::LoadFailed)?;

        self.loaded = true;
        self.update_record(|record| record.loaded = true);
        trace!("Headless panel {} finished loading", self.index);
        Ok(())
    }

    fn set_content(&mut self, html: &str) -> Result<(), UiError> {
        if !self.loaded {
            return Err(UiError::NotLoaded);
        }
        self.update_record(|record| record.content = Some(html.to_string()));
        Ok(())
    }

    fn on_cursor_change(&mut self, callback: CursorCallback) {
        lock(&self.callbacks).insert(self.index, callback);
        self.update_record(|record| record.has_cursor_callback = true);
    }

    fn set_use_linear_depth_buffer(&mut self, enable: bool) {
        self.update_record(|record| record.linear_depth = enable);
    }
}

impl Drop for HeadlessPanel {
    fn drop(&mut self) {
        lock(&self.callbacks).remove(&self.index);
        self.update_record(|record| record.released = true);
    }
}

/// A cursor sink that remembers the last cursor it was given.
#[derive(Default)]
pub struct HeadlessCursor {
    current: Mutex<Option<CursorIcon>>,
}

impl HeadlessCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<CursorIcon> {
        *lock(&self.current)
    }
}

impl CursorSink for HeadlessCursor {
    fn set_cursor(&self, icon: CursorIcon) {
        *lock(&self.current) = Some(icon);
    }
}
