//! Upload bodies that report progress as they are consumed.

use bytes::Bytes;
use futures::Stream;
use futures::stream::{self, StreamExt};

use filenest_core::traits::ProgressFn;

/// Split `data` into `chunk_size` slices without copying.
pub fn chunks(data: &Bytes, chunk_size: usize) -> Vec<Bytes> {
    let chunk_size = chunk_size.max(1);
    (0..data.len())
        .step_by(chunk_size)
        .map(|start| data.slice(start..(start + chunk_size).min(data.len())))
        .collect()
}

/// A body stream over `data` that calls `on_progress` with the fraction
/// handed to the connection so far, once per chunk.
pub fn progress_stream(
    data: Bytes,
    chunk_size: usize,
    on_progress: ProgressFn,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let total = data.len();
    let mut sent = 0usize;

    stream::iter(chunks(&data, chunk_size)).map(move |chunk| {
        sent += chunk.len();
        on_progress(sent as f64 / total as f64);
        Ok(chunk)
    })
}
