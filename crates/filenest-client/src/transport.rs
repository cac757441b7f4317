//! Upload, delete, update, download and rescan over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Body;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::{debug, info};

use filenest_core::error::{AppError, ErrorKind};
use filenest_core::result::AppResult;
use filenest_core::traits::{DownloadedFile, ProgressFn, Transport, UploadRequest};
use filenest_core::types::{FileId, FileRecord, FileUpdate};

use crate::client::{ApiClient, check, map_reqwest, read_json, send};
use crate::disposition::download_name;
use crate::progress::progress_stream;

/// JSON metadata sent alongside the upload payload.
#[derive(Debug, Serialize)]
struct UploadFields<'a> {
    path: &'a str,
    comment: &'a str,
}

/// Body of a metadata patch.
#[derive(Debug, Serialize)]
struct PatchBody<'a> {
    fields: &'a FileUpdate,
}

#[async_trait]
impl Transport for ApiClient {
    async fn upload(
        &self,
        request: UploadRequest,
        on_progress: ProgressFn,
    ) -> AppResult<FileRecord> {
        let size = request.data.len() as u64;
        let mime = mime_guess::from_path(&request.file_name).first_or_octet_stream();
        let fields = serde_json::to_string(&UploadFields {
            path: &request.path,
            comment: &request.comment,
        })?;

        info!(
            file = %request.file_name,
            path = %request.path,
            size,
            mime = %mime,
            "Uploading file"
        );

        let body = Body::wrap_stream(progress_stream(
            request.data,
            self.progress_chunk_bytes,
            Arc::clone(&on_progress),
        ));
        let attachment = Part::stream_with_length(body, size)
            .file_name(request.file_name)
            .mime_str(mime.as_ref())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, format!("Invalid MIME type: {e}"), e)
            })?;
        let form = Form::new()
            .part("attachment", attachment)
            .text("fields", fields);

        let response = send(self.http.post(self.files_url()).multipart(form)).await?;
        let record: FileRecord = read_json(check(response).await?).await?;
        on_progress(1.0);

        info!(id = %record.id, "Upload accepted");
        Ok(record)
    }

    async fn delete(&self, id: FileId) -> AppResult<()> {
        debug!(id = %id, "Deleting file");
        let response = send(self.bounded(self.http.delete(self.file_url(id)))).await?;
        check(response).await?;
        Ok(())
    }

    async fn update(&self, id: FileId, patch: &FileUpdate) -> AppResult<FileRecord> {
        debug!(id = %id, fields = ?patch.changed_fields(), "Updating file");
        let request = self
            .http
            .patch(self.file_url(id))
            .json(&PatchBody { fields: patch });
        let response = send(self.bounded(request)).await?;
        read_json(check(response).await?).await
    }

    async fn download(&self, id: FileId) -> AppResult<DownloadedFile> {
        let url = format!("{}/download", self.file_url(id));
        debug!(url = %url, "Downloading file");

        let response = check(send(self.http.get(&url)).await?).await?;
        let file_name = download_name(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
            id,
        );
        let data = response.bytes().await.map_err(map_reqwest)?;

        debug!(file = %file_name, size = data.len(), "Download complete");
        Ok(DownloadedFile { file_name, data })
    }

    async fn rescan(&self) -> AppResult<()> {
        let response = send(self.bounded(self.http.post(self.endpoint("sync")))).await?;
        check(response).await?;
        info!("Storage rescan requested");
        Ok(())
    }
}
