//! Navigation state machine for dirview.
//!
//! Owns the current directory, the entry list, the selection and the scroll window of one
//! browser. Every input (key action, resize, finished directory read) is a [NavEvent] handled
//! to completion by [NavState::update], which may hand back a [PendingLoad] for the caller to
//! send to the directory loader.
//!
//! Invariants restored after every event:
//! - `selected < max(1, entries.len())`
//! - `viewport.top <= selected <= viewport.bottom()` while there are entries and rows

use crate::app::keymap::NavAction;
use crate::app::viewport::Viewport;
use crate::core::{Entry, PendingLoad, WorkerResponse};

use std::path::{Component, Path, PathBuf};

/// Rows reserved for the path header when no margin is configured.
pub const DEFAULT_MARGIN: usize = 4;

/// Every message the navigator consumes.
#[derive(Debug)]
pub enum NavEvent {
    Resize {
        width: usize,
        height: usize,
    },
    DirectoryLoaded {
        identity: u64,
        request_id: u64,
        entries: Vec<Entry>,
    },
    Action(NavAction),
}

impl From<WorkerResponse> for NavEvent {
    fn from(res: WorkerResponse) -> Self {
        match res {
            WorkerResponse::DirectoryLoaded {
                identity,
                request_id,
                entries,
                ..
            } => NavEvent::DirectoryLoaded {
                identity,
                request_id,
                entries,
            },
        }
    }
}

impl From<NavAction> for NavEvent {
    fn from(action: NavAction) -> Self {
        NavEvent::Action(action)
    }
}

/// Holds the navigation, selection and scroll state of a browser.
#[derive(Debug)]
pub struct NavState {
    identity: u64,
    cwd: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    viewport: Viewport,
    margin: usize,
    ready: bool,
    request_id: u64,
    pending: Option<PendingLoad>,
}

impl NavState {
    pub fn new(identity: u64, cwd: impl Into<PathBuf>, margin: usize) -> Self {
        Self {
            identity,
            cwd: cwd.into(),
            entries: Vec::new(),
            selected: 0,
            viewport: Viewport::default(),
            margin,
            ready: false,
            request_id: 0,
            pending: None,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn identity(&self) -> u64 {
        self.identity
    }

    #[inline]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// `false` until the first resize told us how many rows there are.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn pending(&self) -> Option<&PendingLoad> {
        self.pending.as_ref()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// The entries inside the scroll window, with their index into the full list.
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &Entry)> {
        let range = self.viewport.visible_range(self.entries.len());
        let start = range.start;
        self.entries[range]
            .iter()
            .enumerate()
            .map(move |(i, e)| (start + i, e))
    }

    /// Issues the first read of the starting directory.
    pub fn init(&mut self) -> PendingLoad {
        self.request_load()
    }

    /// Applies one event. Returns the directory read to start, if the event needs one.
    pub fn update(&mut self, event: NavEvent) -> Option<PendingLoad> {
        let load = match event {
            NavEvent::Resize { width, height } => {
                self.resize(width, height);
                None
            }
            NavEvent::DirectoryLoaded {
                identity,
                request_id,
                entries,
            } => {
                self.apply_loaded(identity, request_id, entries);
                None
            }
            NavEvent::Action(NavAction::MoveUp) => {
                self.move_up();
                None
            }
            NavEvent::Action(NavAction::MoveDown) => {
                self.move_down();
                None
            }
            NavEvent::Action(NavAction::Open) => self.open(),
            NavEvent::Action(NavAction::Parent) => Some(self.parent()),
        };
        self.debug_check_invariants();
        load
    }

    // Navigation functions

    fn resize(&mut self, width: usize, height: usize) {
        let rows = height.saturating_sub(self.margin).max(1);
        self.viewport.resize(rows, width);
        // A shrinking window can leave the selection below the last row.
        self.viewport.follow(self.selected);

        if !self.ready {
            self.ready = true;
            tracing::debug!(
                identity = self.identity,
                rows,
                width,
                "viewport ready"
            );
        }
    }

    fn apply_loaded(&mut self, identity: u64, request_id: u64, entries: Vec<Entry>) {
        if identity != self.identity {
            tracing::debug!(
                identity,
                own = self.identity,
                "dropping listing for another browser"
            );
            return;
        }

        let Some(pending) = self.pending.take_if(|p| p.request_id == request_id) else {
            tracing::debug!(identity, request_id, "dropping stale listing");
            return;
        };

        tracing::debug!(
            identity,
            request_id,
            path = %pending.path.display(),
            count = entries.len(),
            "listing applied"
        );
        self.entries = entries;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        self.viewport.recenter(self.selected);
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.viewport.top() {
            self.viewport.recenter(self.selected);
        }
    }

    fn move_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.entries.len() - 1);
        if !self.viewport.contains(self.selected) {
            self.viewport.recenter(self.selected);
        }
    }

    fn open(&mut self) -> Option<PendingLoad> {
        let entry = self.entries.get(self.selected).filter(|e| e.is_dir())?;
        self.cwd = self.cwd.join(entry.name());
        Some(self.enter_new_dir())
    }

    fn parent(&mut self) -> PendingLoad {
        self.cwd = parent_of(&self.cwd);
        self.enter_new_dir()
    }

    /// Resets selection and scroll for a fresh directory and issues its read.
    fn enter_new_dir(&mut self) -> PendingLoad {
        self.selected = 0;
        self.viewport.reset();
        self.request_load()
    }

    /// Issues a read of `cwd`. Any read still in flight becomes stale.
    fn request_load(&mut self) -> PendingLoad {
        self.request_id = self.request_id.wrapping_add(1);
        let load = PendingLoad {
            identity: self.identity,
            request_id: self.request_id,
            path: self.cwd.clone(),
        };
        self.pending = Some(load.clone());
        load
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.selected < self.entries.len().max(1));
        debug_assert!(
            self.entries.is_empty()
                || self.viewport.height() == 0
                || self.viewport.contains(self.selected),
            "selection {} outside window {:?}",
            self.selected,
            self.viewport
        );
    }
}

/// Parent directory of `path` without touching the filesystem.
///
/// Relative paths walk upwards through `..`, so `a/b` -> `a`, `a` -> `.`, `.` -> `..` and
/// `..` -> `../..`. A root stays where it is.
pub fn parent_of(path: &Path) -> PathBuf {
    match path.components().next_back() {
        Some(Component::Normal(_)) => match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        },
        Some(Component::CurDir) | None => PathBuf::from(".."),
        Some(Component::ParentDir) => path.join(".."),
        Some(Component::RootDir) | Some(Component::Prefix(_)) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::{EntryKind, browse_dir};

    use rand::Rng;
    use rand::rng;
    use std::error;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn file(name: &str) -> Entry {
        Entry::new(name, EntryKind::File, "-rw-r--r--")
    }

    fn dir(name: &str) -> Entry {
        Entry::new(name, EntryKind::Directory, "drwxr-xr-x")
    }

    /// A navigator sized to `rows` visible rows holding `entries`.
    fn loaded(rows: usize, entries: Vec<Entry>) -> NavState {
        let mut nav = NavState::new(1, "base", 0);
        nav.update(NavEvent::Resize {
            width: 80,
            height: rows,
        });
        deliver(&mut nav, entries);
        nav
    }

    /// Answers the navigator's pending load with `entries`.
    fn deliver(nav: &mut NavState, entries: Vec<Entry>) {
        let load = nav.pending().cloned().unwrap_or_else(|| nav.init());
        nav.update(NavEvent::DirectoryLoaded {
            identity: load.identity,
            request_id: load.request_id,
            entries,
        });
    }

    fn press(nav: &mut NavState, action: NavAction) -> Option<PendingLoad> {
        nav.update(NavEvent::Action(action))
    }

    fn assert_invariants(nav: &NavState) {
        let len = nav.entries().len();
        assert!(nav.selected_idx() < len.max(1), "selection out of bounds");
        if len > 0 {
            let vp = nav.viewport();
            assert!(
                vp.top() <= nav.selected_idx() && nav.selected_idx() <= vp.bottom(),
                "selected {} outside {:?}",
                nav.selected_idx(),
                vp
            );
        }
    }

    #[test]
    fn resize_subtracts_margin() {
        let mut nav = NavState::new(1, ".", DEFAULT_MARGIN);
        assert!(!nav.is_ready());

        nav.update(NavEvent::Resize {
            width: 100,
            height: 30,
        });
        assert!(nav.is_ready());
        assert_eq!(nav.viewport().height(), 26);
        assert_eq!(nav.viewport().width(), 100);

        nav.update(NavEvent::Resize {
            width: 100,
            height: 2,
        });
        assert_eq!(nav.viewport().height(), 1);
    }

    #[test]
    fn move_down_recenters_past_bottom() {
        let mut nav = loaded(2, vec![file("a.txt"), dir("bdir"), file("c.txt")]);
        assert_eq!((nav.selected_idx(), nav.viewport().top()), (0, 0));

        press(&mut nav, NavAction::MoveDown);
        assert_eq!((nav.selected_idx(), nav.viewport().top()), (1, 0));

        press(&mut nav, NavAction::MoveDown);
        assert_eq!(nav.selected_idx(), 2);
        assert_eq!(nav.viewport().top(), 1);

        let visible: Vec<_> = nav.visible_entries().map(|(_, e)| e.name_str()).collect();
        assert_eq!(visible, vec!["bdir", "c.txt"]);

        press(&mut nav, NavAction::MoveDown);
        assert_eq!(nav.selected_idx(), 2, "must clamp at the last entry");
    }

    #[test]
    fn move_up_recenters_above_top() {
        let entries = (0..20).map(|i| file(&format!("f{i}"))).collect();
        let mut nav = loaded(4, entries);
        for _ in 0..10 {
            press(&mut nav, NavAction::MoveDown);
        }
        assert_eq!(nav.selected_idx(), 10);
        let top = nav.viewport().top();
        assert_eq!(top, 8);

        press(&mut nav, NavAction::MoveUp);
        press(&mut nav, NavAction::MoveUp);
        assert_eq!(nav.viewport().top(), 8, "still inside the window");

        press(&mut nav, NavAction::MoveUp);
        assert_eq!(nav.selected_idx(), 7);
        assert_eq!(nav.viewport().top(), 5);

        for _ in 0..20 {
            press(&mut nav, NavAction::MoveUp);
        }
        assert_eq!((nav.selected_idx(), nav.viewport().top()), (0, 0));
    }

    #[test]
    fn random_moves_hold_invariants() {
        let mut rng = rng();
        for _ in 0..50 {
            let len = rng.random_range(0..40);
            let rows = rng.random_range(1..15);
            let entries = (0..len).map(|i| file(&format!("f{i}"))).collect();
            let mut nav = loaded(rows, entries);
            assert_invariants(&nav);

            for _ in 0..200 {
                let action = if rng.random_bool(0.5) {
                    NavAction::MoveUp
                } else {
                    NavAction::MoveDown
                };
                assert!(press(&mut nav, action).is_none());
                assert_invariants(&nav);
            }

            let rows = rng.random_range(1..15);
            nav.update(NavEvent::Resize {
                width: 80,
                height: rows,
            });
            assert_invariants(&nav);
        }
    }

    #[test]
    fn foreign_identity_is_ignored() {
        let mut nav = loaded(3, vec![file("a"), file("b"), file("c"), file("d")]);
        press(&mut nav, NavAction::MoveDown);
        press(&mut nav, NavAction::MoveDown);
        press(&mut nav, NavAction::MoveDown);

        let load = nav.init();
        let entries_before = nav.entries().to_vec();
        let selected_before = nav.selected_idx();
        let viewport_before = *nav.viewport();

        nav.update(NavEvent::DirectoryLoaded {
            identity: load.identity + 1,
            request_id: load.request_id,
            entries: vec![file("zzz")],
        });

        assert_eq!(nav.entries(), entries_before.as_slice());
        assert_eq!(nav.selected_idx(), selected_before);
        assert_eq!(*nav.viewport(), viewport_before);
        assert!(nav.pending().is_some(), "own load still in flight");
    }

    #[test]
    fn superseded_load_is_dropped() {
        let mut nav = loaded(5, vec![dir("one"), dir("two")]);

        let first = press(&mut nav, NavAction::Open).expect("open issues a load");
        let second = press(&mut nav, NavAction::Parent).expect("parent issues a load");
        assert_ne!(first.request_id, second.request_id);

        nav.update(NavEvent::DirectoryLoaded {
            identity: first.identity,
            request_id: first.request_id,
            entries: vec![file("inside_one")],
        });
        assert_eq!(nav.entries(), &[dir("one"), dir("two")]);

        nav.update(NavEvent::DirectoryLoaded {
            identity: second.identity,
            request_id: second.request_id,
            entries: vec![dir("one"), dir("two"), dir("three")],
        });
        assert_eq!(nav.entries().len(), 3);
        assert!(nav.pending().is_none());

        // A duplicate of an applied load has nothing left to match.
        nav.update(NavEvent::DirectoryLoaded {
            identity: second.identity,
            request_id: second.request_id,
            entries: Vec::new(),
        });
        assert_eq!(nav.entries().len(), 3);
    }

    #[test]
    fn open_file_is_noop() {
        let mut nav = loaded(5, vec![file("a.txt"), dir("bdir")]);
        let cwd = nav.cwd().to_path_buf();

        assert!(press(&mut nav, NavAction::Open).is_none());
        assert_eq!(nav.cwd(), cwd);
        assert_eq!(nav.selected_idx(), 0);
        assert!(nav.pending().is_none());
    }

    #[test]
    fn open_dir_resets_and_loads_child() {
        let mut nav = loaded(2, vec![file("a.txt"), dir("bdir"), file("c.txt")]);
        press(&mut nav, NavAction::MoveDown);
        press(&mut nav, NavAction::MoveDown);
        press(&mut nav, NavAction::MoveUp);
        assert_eq!(nav.selected_entry().map(|e| e.name_str()), Some("bdir".into()));

        let load = press(&mut nav, NavAction::Open).expect("directory opens");
        assert_eq!(load.path, Path::new("base").join("bdir"));
        assert_eq!(load.identity, nav.identity());
        assert_eq!(nav.cwd(), Path::new("base").join("bdir"));
        assert_eq!((nav.selected_idx(), nav.viewport().top()), (0, 0));

        nav.update(NavEvent::DirectoryLoaded {
            identity: load.identity,
            request_id: load.request_id,
            entries: vec![file("x.txt")],
        });
        assert_eq!(nav.entries(), &[file("x.txt")]);
        assert_eq!((nav.selected_idx(), nav.viewport().top()), (0, 0));
    }

    #[test]
    fn empty_directory_noops() {
        let mut nav = loaded(5, Vec::new());
        assert_eq!(nav.selected_idx(), 0);
        assert_eq!(nav.visible_entries().count(), 0);

        assert!(press(&mut nav, NavAction::MoveDown).is_none());
        assert!(press(&mut nav, NavAction::MoveUp).is_none());
        assert!(press(&mut nav, NavAction::Open).is_none());
        assert_eq!(nav.selected_idx(), 0);
        assert_eq!(nav.viewport().top(), 0);
    }

    #[test]
    fn shorter_reload_clamps_selection() {
        let entries = (0..10).map(|i| file(&format!("f{i}"))).collect();
        let mut nav = loaded(3, entries);
        for _ in 0..9 {
            press(&mut nav, NavAction::MoveDown);
        }
        assert_eq!(nav.selected_idx(), 9);

        nav.init();
        deliver(&mut nav, vec![file("a"), file("b")]);
        assert_eq!(nav.selected_idx(), 1);
        assert_invariants(&nav);
    }

    #[test]
    fn parent_then_open_round_trips() {
        let mut nav = NavState::new(1, Path::new("base").join("child"), 0);
        nav.update(NavEvent::Resize {
            width: 80,
            height: 10,
        });
        let before = nav.cwd().to_path_buf();

        let load = press(&mut nav, NavAction::Parent).expect("parent always loads");
        assert_eq!(load.path, Path::new("base"));
        deliver(&mut nav, vec![file("x"), dir("child"), file("y")]);

        press(&mut nav, NavAction::MoveDown);
        assert!(press(&mut nav, NavAction::Open).is_some());
        assert_eq!(nav.cwd(), before);
    }

    #[test]
    fn parent_of_relative_and_root() {
        assert_eq!(parent_of(Path::new("a/b")), Path::new("a"));
        assert_eq!(parent_of(Path::new("a")), Path::new("."));
        assert_eq!(parent_of(Path::new(".")), Path::new(".."));
        assert_eq!(parent_of(Path::new("..")), Path::new("../.."));
        #[cfg(unix)]
        {
            assert_eq!(parent_of(Path::new("/")), Path::new("/"));
            assert_eq!(parent_of(Path::new("/usr")), Path::new("/"));
        }
    }

    #[test]
    fn navigation_through_real_dirs() -> Result<(), Box<dyn error::Error>> {
        let base = tempdir()?;
        let base_path = base.path().to_path_buf();
        let sub = base_path.join("sub");
        fs::create_dir(&sub)?;
        File::create(sub.join("inner.txt"))?;

        let mut nav = NavState::new(9, base_path.clone(), DEFAULT_MARGIN);
        nav.update(NavEvent::Resize {
            width: 80,
            height: 20,
        });
        let load = nav.init();
        nav.update(NavEvent::DirectoryLoaded {
            identity: load.identity,
            request_id: load.request_id,
            entries: browse_dir(&load.path)?,
        });
        assert_eq!(nav.entries().len(), 1);

        let load = press(&mut nav, NavAction::Open).ok_or("sub did not open")?;
        nav.update(NavEvent::DirectoryLoaded {
            identity: load.identity,
            request_id: load.request_id,
            entries: browse_dir(&load.path)?,
        });
        assert_eq!(nav.cwd(), sub);
        assert_eq!(nav.entries()[0].name_str(), "inner.txt");

        let load = press(&mut nav, NavAction::Parent).ok_or("no parent load")?;
        assert_eq!(load.path, base_path);
        Ok(())
    }
}
