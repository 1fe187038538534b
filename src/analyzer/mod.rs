//! Bounded parallel file analysis.
//!
//! Discovered files are dispatched to the extractor (cache-checked first)
//! across a fixed-size worker pool. Results arrive in completion order, one
//! progress event per completed task. A failing file becomes an error record
//! in its slot; the batch itself never fails.

pub mod progress;
pub mod walk;

pub use progress::{ProgressReport, ProgressSink};
pub use walk::collect_files;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use futures::stream::{self, StreamExt};

use crate::cache::{content_hash, AnalysisCache};
use crate::config::Config;
use crate::extract;
use crate::facts::FileAnalysis;

/// Runs the extraction pipeline over a set of files.
pub struct Analyzer {
    root: PathBuf,
    cache: AnalysisCache,
    workers: usize,
    max_file_chars: usize,
    progress: Option<ProgressSink>,
}

impl Analyzer {
    /// Create an analyzer rooted at `root` with an injected cache.
    pub fn new<P: AsRef<Path>>(root: P, cache: AnalysisCache, config: &Config) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache,
            workers: config.workers.max(1),
            max_file_chars: config.max_file_chars,
            progress: None,
        }
    }

    /// Attach a progress sink, invoked once per completed task.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Analyze all files, returning one outcome per input path.
    ///
    /// An empty input returns immediately: no workers, no progress events.
    /// Result order is completion order, not submission order.
    pub async fn analyze(&self, files: &[PathBuf]) -> Vec<FileAnalysis> {
        if files.is_empty() {
            return Vec::new();
        }

        let total = files.len();
        let completed = AtomicUsize::new(0);
        let started = Instant::now();

        stream::iter(files.to_vec())
            .map(|path| self.analyze_one(path))
            .buffer_unordered(self.workers)
            .map(|outcome| {
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(sink) = &self.progress {
                    sink(ProgressReport::compute(done, total, started.elapsed()));
                }
                outcome
            })
            .collect()
            .await
    }

    /// Analyze a single file: cache check, bounded read, extract, store.
    async fn analyze_one(&self, path: PathBuf) -> FileAnalysis {
        let key = self.rel_key(&path);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return FileAnalysis::Err {
                    path: key,
                    error: e.to_string(),
                }
            }
        };

        let hash = content_hash(&bytes);
        if let Some(facts) = self.cache.get(&key, &hash) {
            return FileAnalysis::Ok { facts };
        }

        let text = String::from_utf8_lossy(&bytes);
        let facts = extract::extract(&key, bounded(&text, self.max_file_chars));
        self.cache.put(&key, &hash, &facts);
        FileAnalysis::Ok { facts }
    }

    /// Project-relative cache key for a path.
    fn rel_key(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

/// Bound file text to at most `max` characters, cut on a char boundary.
fn bounded(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
