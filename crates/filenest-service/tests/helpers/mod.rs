//! Shared test helpers: an in-memory file store behind the collaborator
//! traits.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::{Notify, mpsc};

use filenest_core::error::AppError;
use filenest_core::events::FileEvent;
use filenest_core::result::AppResult;
use filenest_core::traits::{DirectoryListing, DownloadedFile, ProgressFn, Transport, UploadRequest};
use filenest_core::types::{FileId, FileRecord, FileUpdate, ListingQuery};
use filenest_service::{UploadCoordinator, ViewSync};

/// Files and their contents, shared by the fake listing and transport.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<FileRecord>>,
    contents: Mutex<HashMap<FileId, Bytes>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Insert a record directly, bypassing the transport.
    pub fn insert(&self, path: &str, name: &str, data: Bytes) -> FileRecord {
        self.insert_with_comment(path, name, data, None)
    }

    pub fn insert_with_comment(
        &self,
        path: &str,
        name: &str,
        data: Bytes,
        comment: Option<String>,
    ) -> FileRecord {
        let id = FileId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = FileRecord {
            id,
            name: name.to_string(),
            extension: name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_string())
                .unwrap_or_default(),
            size: data.len() as u64,
            path: path.to_string(),
            comment,
            creation_date: Utc::now(),
            update_date: None,
        };
        self.records.lock().unwrap().push(record.clone());
        self.contents.lock().unwrap().insert(id, data);
        record
    }

    pub fn records(&self) -> Vec<FileRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

/// Listing backed by the store. Filters by path prefix, like the server.
#[derive(Debug)]
pub struct MemoryListing {
    store: Arc<MemoryStore>,
    calls: AtomicUsize,
    last_query: Mutex<Option<ListingQuery>>,
    fail: AtomicBool,
}

impl MemoryListing {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ListingQuery> {
        self.last_query.lock().unwrap().clone()
    }

    /// Make every following fetch fail with a network error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DirectoryListing for MemoryListing {
    async fn list(&self, query: &ListingQuery) -> AppResult<Vec<FileRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::network("connection refused"));
        }

        let records = self.store.records();
        Ok(match &query.path {
            Some(prefix) => records
                .into_iter()
                .filter(|r| r.path.starts_with(prefix.as_str()))
                .collect(),
            None => records,
        })
    }
}

/// Transport backed by the store.
#[derive(Debug)]
pub struct MemoryTransport {
    store: Arc<MemoryStore>,
    gate: Option<Arc<Notify>>,
    fail_uploads: AtomicBool,
    uploads: AtomicUsize,
}

impl MemoryTransport {
    /// Make the next uploads fail with a 500.
    pub fn set_failing(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn upload(&self, request: UploadRequest, on_progress: ProgressFn) -> AppResult<FileRecord> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        on_progress(0.5);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::http(500, "Internal Server Error"));
        }

        on_progress(1.0);
        let comment = (!request.comment.is_empty()).then_some(request.comment);
        Ok(self
            .store
            .insert_with_comment(&request.path, &request.file_name, request.data, comment))
    }

    async fn delete(&self, id: FileId) -> AppResult<()> {
        let mut records = self.store.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(AppError::http(404, format!("File {id} not found")));
        }
        self.store.contents.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn update(&self, id: FileId, patch: &FileUpdate) -> AppResult<FileRecord> {
        let mut records = self.store.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::http(404, format!("File {id} not found")))?;

        if let Some(name) = &patch.name {
            record.name = name.clone();
        }
        if let Some(path) = &patch.path {
            record.path = path.clone();
        }
        if let Some(comment) = &patch.comment {
            record.comment = Some(comment.clone());
        }
        record.update_date = Some(Utc::now());
        Ok(record.clone())
    }

    async fn download(&self, id: FileId) -> AppResult<DownloadedFile> {
        let name = self
            .store
            .records()
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.name)
            .ok_or_else(|| AppError::http(404, format!("File {id} not found")))?;
        let data = self
            .store
            .contents
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default();
        Ok(DownloadedFile {
            file_name: name,
            data,
        })
    }

    async fn rescan(&self) -> AppResult<()> {
        Ok(())
    }
}

/// A store with its listing and transport.
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub listing: Arc<MemoryListing>,
    pub transport: Arc<MemoryTransport>,
    pub gate: Arc<Notify>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Uploads block until [`release`](Self::release) is called.
    pub fn gated() -> Self {
        Self::build(true)
    }

    fn build(gated: bool) -> Self {
        let store = Arc::new(MemoryStore::default());
        let gate = Arc::new(Notify::new());
        let listing = Arc::new(MemoryListing {
            store: Arc::clone(&store),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            fail: AtomicBool::new(false),
        });
        let transport = Arc::new(MemoryTransport {
            store: Arc::clone(&store),
            gate: gated.then(|| Arc::clone(&gate)),
            fail_uploads: AtomicBool::new(false),
            uploads: AtomicUsize::new(0),
        });
        Self {
            store,
            listing,
            transport,
            gate,
        }
    }

    pub fn seed(&self, path: &str, name: &str) -> FileRecord {
        self.store.insert(path, name, Bytes::from_static(b"seed"))
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn view(&self) -> ViewSync {
        ViewSync::new(self.listing.clone(), self.transport.clone())
    }

    pub fn coordinator(&self) -> (UploadCoordinator, mpsc::UnboundedReceiver<FileEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = UploadCoordinator::new(self.transport.clone()).with_events(tx);
        (coordinator, rx)
    }
}
