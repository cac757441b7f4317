//! Listing snapshot, tree and the resync-on-mutation policy.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use filenest_core::error::AppError;
use filenest_core::events::FileEvent;
use filenest_core::result::AppResult;
use filenest_core::traits::{DirectoryListing, DownloadedFile, Transport};
use filenest_core::types::{FileId, FileRecord, FileUpdate, ListingQuery};

use crate::tree::PathTree;

/// A mutation the server accepted, plus the outcome of the resync after it.
#[derive(Debug)]
pub struct Synced<T> {
    /// What the server returned for the mutation.
    pub value: T,
    /// Set when the follow-up fetch failed. The view keeps the previous
    /// snapshot and stays stale until a later refresh succeeds.
    pub resync_error: Option<AppError>,
}

impl<T> Synced<T> {
    /// Whether the view reflects the mutation.
    pub fn is_current(&self) -> bool {
        self.resync_error.is_none()
    }
}

/// Owns the latest listing snapshot and the tree built from it.
#[derive(Debug)]
pub struct ViewSync {
    /// Source of listing snapshots.
    listing: Arc<dyn DirectoryListing>,
    /// Transport for mutating calls.
    transport: Arc<dyn Transport>,
    /// Current server-side filter.
    query: ListingQuery,
    /// Last fetched snapshot.
    snapshot: Vec<FileRecord>,
    /// Tree built from `snapshot`.
    tree: PathTree,
    /// Number of successful rebuilds so far.
    generation: u64,
    /// A mutation was observed that no successful fetch has picked up yet.
    stale: bool,
}

impl ViewSync {
    /// Creates a view with an empty snapshot. Call [`refresh`](Self::refresh)
    /// to load the first one.
    pub fn new(listing: Arc<dyn DirectoryListing>, transport: Arc<dyn Transport>) -> Self {
        Self {
            listing,
            transport,
            query: ListingQuery::all(),
            snapshot: Vec::new(),
            tree: PathTree::default(),
            generation: 0,
            stale: false,
        }
    }

    /// Fetches a fresh snapshot with the current filter and rebuilds the
    /// tree. On failure the previous snapshot and tree are kept.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let query = self.query.clone();
        self.load(query).await
    }

    /// Sets the server-side filter and resyncs. Blank text clears it.
    ///
    /// The filter only takes effect once the fetch succeeds, so on failure
    /// [`filter`](Self::filter) still describes the tree being shown.
    pub async fn set_filter(&mut self, text: &str) -> AppResult<()> {
        self.load(ListingQuery::from_filter(text)).await
    }

    async fn load(&mut self, query: ListingQuery) -> AppResult<()> {
        let records = self.listing.list(&query).await?;

        self.tree = PathTree::build(&records);
        self.snapshot = records;
        self.query = query;
        self.generation += 1;
        self.stale = false;

        debug!(
            files = self.snapshot.len(),
            filter = ?self.query.path,
            generation = self.generation,
            "View resynced"
        );
        Ok(())
    }

    /// Resyncs in response to a confirmed mutation.
    pub async fn handle(&mut self, event: &FileEvent) -> AppResult<()> {
        debug!(event = event.name(), "Handling file event");
        self.stale = true;
        self.refresh().await
    }

    /// Consumes every pending event and resyncs once if there were any, or
    /// if an earlier resync failed. Returns the number of events consumed.
    pub async fn drain(&mut self, events: &mut mpsc::UnboundedReceiver<FileEvent>) -> AppResult<usize> {
        let mut count = 0;
        while let Ok(event) = events.try_recv() {
            debug!(event = event.name(), "Draining file event");
            count += 1;
        }
        if count > 0 {
            self.stale = true;
        }
        if self.stale {
            self.refresh().await?;
        }
        Ok(count)
    }

    /// Deletes a file, then resyncs.
    ///
    /// Fails only if the server refused the delete; a failed resync is
    /// reported in the returned [`Synced`].
    pub async fn delete(&mut self, id: FileId) -> AppResult<Synced<()>> {
        self.transport.delete(id).await?;
        info!(id = %id, "File deleted");
        Ok(self.settle((), FileEvent::Deleted { file_id: id }).await)
    }

    /// Applies a metadata patch, then resyncs.
    pub async fn update(&mut self, id: FileId, patch: &FileUpdate) -> AppResult<Synced<FileRecord>> {
        if patch.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }

        let record = self.transport.update(id, patch).await?;
        let changed_fields = patch.changed_fields();
        info!(id = %id, fields = ?changed_fields, "File updated");

        let event = FileEvent::Updated {
            file_id: id,
            changed_fields,
        };
        Ok(self.settle(record, event).await)
    }

    /// Asks the server to rescan its storage, then resyncs.
    pub async fn rescan(&mut self) -> AppResult<Synced<()>> {
        self.transport.rescan().await?;
        info!("Storage rescanned");
        Ok(self.settle((), FileEvent::Rescanned).await)
    }

    async fn settle<T>(&mut self, value: T, event: FileEvent) -> Synced<T> {
        let resync_error = self.handle(&event).await.err();
        if let Some(e) = &resync_error {
            warn!(event = event.name(), error = %e, "Resync after mutation failed");
        }
        Synced {
            value,
            resync_error,
        }
    }

    /// Downloads a file. Downloads do not mutate anything, so no resync.
    pub async fn download(&self, id: FileId) -> AppResult<DownloadedFile> {
        self.transport.download(id).await
    }

    /// The current tree.
    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// The current snapshot, in server order.
    pub fn snapshot(&self) -> &[FileRecord] {
        &self.snapshot
    }

    /// Looks up a record in the current snapshot.
    pub fn find(&self, id: FileId) -> Option<&FileRecord> {
        self.snapshot.iter().find(|r| r.id == id)
    }

    /// The active filter, if any.
    pub fn filter(&self) -> Option<&str> {
        self.query.path.as_deref()
    }

    /// Number of successful resyncs.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a confirmed mutation has not been picked up by a fetch yet.
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}
