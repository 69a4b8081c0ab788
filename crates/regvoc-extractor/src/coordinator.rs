//! Document-level coordination
//!
//! Every text block of a document becomes one task on a fixed-size rayon
//! pool. Tasks segment, parse and extract independently and share a single
//! `TripleSink`. A failing or panicking block is logged and counted; its
//! siblings keep running.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use regvoc_core::{ExtractionConfig, Result, Strategy, TripleSink, VocabError};
use regvoc_parser::ParseSource;

use crate::RelationExtractor;

/// Summary of one document run
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub job_id: Uuid,
    pub document: String,
    pub strategy: Strategy,
    pub workers: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub blocks: usize,
    pub failed_blocks: usize,
    pub sentences: usize,
    /// Sentences over the token limit, never parsed
    pub skipped_sentences: usize,
    /// Sentences the parse source could not parse
    pub failed_sentences: usize,
    /// Distinct triples in the document's sink
    pub triples: usize,
}

impl DocumentReport {
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BlockStats {
    sentences: usize,
    skipped: usize,
    failed: usize,
}

enum BlockOutcome {
    Done(BlockStats),
    Failed,
}

/// Runs a `RelationExtractor` over whole documents on a worker pool
pub struct Coordinator {
    extractor: RelationExtractor,
    pool: rayon::ThreadPool,
    max_sentence_tokens: usize,
}

impl Coordinator {
    pub fn new(extractor: RelationExtractor, workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("regvoc-worker-{i}"))
            .build()
            .map_err(|e| VocabError::TaskFailed(format!("worker pool: {e}")))?;

        Ok(Self {
            extractor,
            pool,
            max_sentence_tokens: ExtractionConfig::default().max_sentence_tokens,
        })
    }

    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self::new(RelationExtractor::from_config(config), config.worker_count())?
            .with_max_sentence_tokens(config.max_sentence_tokens))
    }

    pub fn with_max_sentence_tokens(mut self, max: usize) -> Self {
        self.max_sentence_tokens = max;
        self
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn extractor(&self) -> &RelationExtractor {
        &self.extractor
    }

    /// Extract every block of one document into a fresh sink
    pub fn process_document(
        &self,
        document: &str,
        source: &dyn ParseSource,
        blocks: &[&str],
    ) -> (TripleSink, DocumentReport) {
        let started_at = Utc::now();
        let sink = TripleSink::new();

        let outcomes: Vec<BlockOutcome> = self.pool.install(|| {
            blocks
                .par_iter()
                .enumerate()
                .map(|(index, block)| {
                    let run = catch_unwind(AssertUnwindSafe(|| self.process_block(source, block, &sink)));
                    match run {
                        Ok(Ok(stats)) => BlockOutcome::Done(stats),
                        Ok(Err(e)) => {
                            warn!(document, block = index, error = %e, "Block extraction failed");
                            BlockOutcome::Failed
                        }
                        Err(_) => {
                            warn!(document, block = index, "Block extraction panicked");
                            BlockOutcome::Failed
                        }
                    }
                })
                .collect()
        });

        let mut report = DocumentReport {
            job_id: Uuid::new_v4(),
            document: document.to_string(),
            strategy: self.extractor.strategy(),
            workers: self.workers(),
            started_at,
            finished_at: Utc::now(),
            blocks: blocks.len(),
            failed_blocks: 0,
            sentences: 0,
            skipped_sentences: 0,
            failed_sentences: 0,
            triples: sink.len(),
        };
        for outcome in outcomes {
            match outcome {
                BlockOutcome::Done(stats) => {
                    report.sentences += stats.sentences;
                    report.skipped_sentences += stats.skipped;
                    report.failed_sentences += stats.failed;
                }
                BlockOutcome::Failed => report.failed_blocks += 1,
            }
        }

        info!(
            job_id = %report.job_id,
            document,
            blocks = report.blocks,
            sentences = report.sentences,
            triples = report.triples,
            elapsed_ms = report.elapsed_ms(),
            "Document processed"
        );
        (sink, report)
    }

    fn process_block(&self, source: &dyn ParseSource, block: &str, sink: &TripleSink) -> Result<BlockStats> {
        let mut stats = BlockStats::default();
        let form = self.extractor.form();

        for sentence in source.segment(block)? {
            stats.sentences += 1;
            if sentence.token_count() > self.max_sentence_tokens {
                debug!(tokens = sentence.token_count(), "Skipping long sentence");
                stats.skipped += 1;
                continue;
            }

            let parse = match source.parse(&sentence, form) {
                Ok(parse) => parse,
                Err(e) => {
                    warn!(error = %e, "Sentence parse failed");
                    stats.failed += 1;
                    continue;
                }
            };
            let added = self.extractor.extract(&parse, sink)?;
            debug!(added, sentence = %sentence.text, "Sentence extracted");
        }

        Ok(stats)
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("extractor", &self.extractor)
            .field("workers", &self.workers())
            .field("max_sentence_tokens", &self.max_sentence_tokens)
            .finish()
    }
}
