//! Passive file-list view
//!
//! The display component of the workflow: hidden until the first successful
//! sign-in, then fed complete listing snapshots. Every update fully replaces
//! the previous entries; there is no diffing and no identity tracking across
//! refreshes. A failed refresh simply never calls [`FileListView::replace`],
//! leaving the last rendered snapshot intact.

use drivebox_core::domain::RemoteFileEntry;

/// Snapshot display list for remote file entries
#[derive(Debug, Default)]
pub struct FileListView {
    visible: bool,
    entries: Vec<RemoteFileEntry>,
}

impl FileListView {
    /// Creates a hidden, empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the view visible
    ///
    /// Returns true only when this call performed the hidden→visible
    /// transition, so callers can assert it happens exactly once per
    /// sign-in.
    pub fn reveal(&mut self) -> bool {
        let transitioned = !self.visible;
        self.visible = true;
        transitioned
    }

    /// Returns whether the view is visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replaces the displayed entries with a new snapshot
    pub fn replace(&mut self, entries: Vec<RemoteFileEntry>) {
        self.entries = entries;
    }

    /// Returns the displayed entries in order
    pub fn entries(&self) -> &[RemoteFileEntry] {
        &self.entries
    }

    /// Returns one row per entry: the file name
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Number of displayed rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no rows are displayed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
