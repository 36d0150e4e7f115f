//! Batch normalizer: gate, load, fit, and save every input independently.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::{Error, Result};
use crate::image::{derive_output_path, fit_image, load_image, save_png, SupportedFormat};

use super::report::{item_label, BatchReport};

/// Configuration for the batch normalizer.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Number of worker threads. `None` uses one per CPU core, `Some(1)` runs
    /// the batch on the calling thread.
    pub jobs: Option<usize>,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(Error::InvalidParameter {
                name: "jobs".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    fn resolved_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        })
    }
}

/// Normalizes batches of images into 512x512 PNG files.
pub struct Normalizer {
    jobs: usize,
    pool: Option<ThreadPool>,
}

impl Normalizer {
    /// Create a normalizer with the given configuration.
    ///
    /// A dedicated worker pool is started when more than one job is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let jobs = config.resolved_jobs();

        let pool = if jobs > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .thread_name(|i| format!("png512-worker-{i}"))
                    .build()?,
            )
        } else {
            None
        };

        tracing::debug!("Normalizer ready with {jobs} job(s)");

        Ok(Self { jobs, pool })
    }

    /// A normalizer that processes items one after another on the calling thread.
    #[must_use]
    pub const fn sequential() -> Self {
        Self {
            jobs: 1,
            pool: None,
        }
    }

    /// Number of items that may be processed at the same time.
    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Normalize every path in `paths`.
    ///
    /// Never fails as a whole: each failing item becomes one entry in
    /// [`BatchReport::errors`], in the same order as `paths`.
    pub fn run<P>(&self, paths: &[P]) -> BatchReport
    where
        P: AsRef<Path> + Sync,
    {
        self.run_with_progress(paths, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `on_item` once per item as soon as it
    /// finishes. With several jobs the callback runs on worker threads and the
    /// call order follows completion, not input order.
    pub fn run_with_progress<P, F>(&self, paths: &[P], on_item: F) -> BatchReport
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path, &Result<PathBuf>) + Sync,
    {
        tracing::info!("Normalizing {} image(s) with {} job(s)", paths.len(), self.jobs);

        let work = |path: &P| {
            let path = path.as_ref();
            let outcome = process_item(path);
            on_item(path, &outcome);
            outcome
        };

        // Collecting keeps input order in both modes
        let outcomes: Vec<Result<PathBuf>> = match &self.pool {
            Some(pool) => pool.install(|| paths.par_iter().map(work).collect()),
            None => paths.iter().map(work).collect(),
        };

        let mut report = BatchReport::default();
        for (path, outcome) in paths.iter().zip(&outcomes) {
            report.record(path.as_ref(), outcome);
        }

        tracing::info!(
            "Batch complete: {} processed, {} failed",
            report.processed,
            report.errors.len()
        );

        report
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::sequential()
    }
}

/// Normalize `paths` sequentially, in order, on the calling thread.
pub fn normalize<P>(paths: &[P]) -> BatchReport
where
    P: AsRef<Path> + Sync,
{
    Normalizer::sequential().run(paths)
}

/// Normalize a single input and return the path of the written PNG.
///
/// Unsupported extensions are rejected before the file is opened.
///
/// # Errors
///
/// Returns the first failure among gating, decoding, fitting, encoding, and writing.
pub fn process_item(path: &Path) -> Result<PathBuf> {
    let outcome = gate_and_convert(path);

    match &outcome {
        Ok(output) => tracing::debug!("{} -> {}", path.display(), output.display()),
        Err(err) => tracing::warn!("Skipping {}: {}", item_label(path), err.reason()),
    }

    outcome
}

fn gate_and_convert(path: &Path) -> Result<PathBuf> {
    if SupportedFormat::from_path(path).is_none() {
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let img = load_image(path)?;
    let fitted = fit_image(&img)?;

    let output = derive_output_path(path);
    save_png(&fitted, &output)?;

    Ok(output)
}
