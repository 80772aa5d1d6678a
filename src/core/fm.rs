//! Directory reading for dirview.
//!
//! Provides the [Entry] struct which is used throughout dirview and the [browse_dir] function
//! which produces them. Entries are immutable once read, a reload replaces the whole list.

use crate::core::formatter::{UNKNOWN_MODE, format_mode};

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// What kind of filesystem object an [Entry] is.
///
/// Symlinks are not followed: a link pointing at a directory is still a `Symlink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
}

/// Represents a single entry in a directory listing.
/// Holds the name, the kind and the 10 character mode string, e.g. `drwxr-xr-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Box<OsStr>,
    kind: EntryKind,
    mode: Box<str>,
}

impl Entry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind, mode: impl Into<String>) -> Self {
        Entry {
            name: name.into().into_boxed_os_str(),
            kind,
            mode: mode.into().into_boxed_str(),
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Reads the contents of the provided directory in OS listing order.
///
/// Entries whose type cannot be determined are skipped. Entries whose metadata cannot be read
/// are kept with [UNKNOWN_MODE] as their mode string.
/// # Returns
/// A Result containing a vector of [Entry] or an std::io::Error if the directory itself
/// cannot be read.
pub fn browse_dir(path: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(64);

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        let kind = if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        // DirEntry::metadata does not traverse symlinks, so links keep their own `l` mode.
        let mode = match entry.metadata() {
            Ok(md) => format_mode(&md),
            Err(_) => UNKNOWN_MODE.to_string(),
        };

        entries.push(Entry::new(entry.file_name(), kind, mode));
    }
    Ok(entries)
}
