//! Result types for generation operations

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Result of processing a source
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub source_name: String,
    pub files_generated: usize,
    pub generated_files: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub output_path: PathBuf,
    pub processing_time_ms: u64,
}

impl SourceResult {
    pub fn new(source_name: impl Into<String>, output_path: PathBuf) -> Self {
        Self {
            source_name: source_name.into(),
            files_generated: 0,
            generated_files: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            output_path,
            processing_time_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Overall generation result
#[derive(Debug)]
pub struct GenerationResult {
    pub sources_processed: usize,
    pub total_sources: usize,
    pub results: Vec<SourceResult>,
    pub statistics: GenerationStatistics,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn from_results(total_sources: usize, results: Vec<SourceResult>) -> Self {
        let statistics = GenerationStatistics::from_results(&results);
        Self {
            sources_processed: results.len(),
            total_sources,
            results,
            statistics,
            generated_at: Utc::now(),
        }
    }
}

/// Generation statistics
#[derive(Debug, Clone, Default)]
pub struct GenerationStatistics {
    /// Total processing time in milliseconds
    pub total_processing_time_ms: u64,

    /// Number of sources processed
    pub sources_processed: usize,

    /// Number of files generated
    pub files_generated: usize,

    /// Number of errors encountered
    pub error_count: usize,

    /// Number of warnings encountered
    pub warning_count: usize,
}

impl GenerationStatistics {
    pub fn from_results(results: &[SourceResult]) -> Self {
        results.iter().fold(Self::default(), |mut stats, result| {
            stats.total_processing_time_ms += result.processing_time_ms;
            stats.sources_processed += 1;
            stats.files_generated += result.files_generated;
            stats.error_count += result.errors.len();
            stats.warning_count += result.warnings.len();
            stats
        })
    }
}
