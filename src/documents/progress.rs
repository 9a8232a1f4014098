use bytes::Bytes;
use futures::stream::{self, Stream};
use std::sync::Arc;

/// Called with `(loaded, total)` bytes as an upload body is sent.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Percentage of `total` covered by `loaded`, rounded to the nearest integer.
///
/// An empty body counts as complete.
pub fn upload_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (loaded as f64 / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Split `body` into chunks of at most `chunk_size` bytes, reporting
/// cumulative progress as each chunk is pulled by the HTTP client.
pub fn progress_stream(
    body: Bytes,
    chunk_size: usize,
    on_progress: ProgressFn,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
    let chunk_size = chunk_size.max(1);
    let total = body.len() as u64;
    let chunks: Vec<Bytes> = (0..body.len())
        .step_by(chunk_size)
        .map(|start| body.slice(start..(start + chunk_size).min(body.len())))
        .collect();

    let mut loaded = 0u64;
    stream::iter(chunks.into_iter().map(move |chunk| {
        loaded += chunk.len() as u64;
        on_progress(loaded, total);
        Ok(chunk)
    }))
}
