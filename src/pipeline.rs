//! Sequential composition of the three stages.
//!
//! Each stage is fully materialized before the next one starts:
//! purchase lines -> baskets -> pair counts -> top matches.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::io::BufRead;
use tracing::{info, trace};

use crate::baskets::{build_baskets, parse_records};
use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::pairs::count_pairs;
use crate::top::select_top_matches;
use crate::types::{Basket, PairCount, PurchaseRecord, TopMatch};

/// Every intermediate result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutputs {
    pub baskets: Vec<Basket>,
    pub pair_counts: Vec<PairCount>,
    pub top_matches: Vec<TopMatch>,
}

pub struct Pipeline {
    config: PipelineConfig,
    pool: Option<ThreadPool>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;

        let pool = match config.num_threads {
            Some(num_threads) if config.parallel => Some(
                ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("basket-worker-{}", i))
                    .build()?,
            ),
            _ => None,
        };

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run_stages<I, S>(&self, lines: I) -> StageOutputs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = parse_records(lines);
        match &self.pool {
            Some(pool) => pool.install(|| self.run_parsed(records)),
            None => self.run_parsed(records),
        }
    }

    pub fn run<I, S>(&self, lines: I) -> Vec<TopMatch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_stages(lines).top_matches
    }

    /// Lines that are not valid UTF-8 are decoded lossily; only read
    /// failures abort the run.
    pub fn run_reader<R: BufRead>(&self, reader: R) -> PipelineResult<Vec<TopMatch>> {
        let mut lines = Vec::new();
        for raw in reader.split(b'\n') {
            let raw = raw?;
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(err) => {
                    trace!("decoding non UTF-8 purchase line lossily");
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }
            };
            lines.push(line);
        }
        Ok(self.run(lines))
    }

    fn run_parsed(&self, records: Vec<PurchaseRecord>) -> StageOutputs {
        let parallel = self.config.parallel;

        let baskets = build_baskets(records, parallel);
        let pair_counts = count_pairs(baskets.clone(), parallel, self.config.min_count);
        let top_matches = select_top_matches(pair_counts.clone(), parallel, self.config.tie_break);

        info!(
            num_baskets = baskets.len(),
            num_pair_counts = pair_counts.len(),
            num_top_matches = top_matches.len(),
            "pipeline finished"
        );

        StageOutputs {
            baskets,
            pair_counts,
            top_matches,
        }
    }
}

/// Run all three stages over `lines` with `config`.
pub fn run<I, S>(lines: I, config: &PipelineConfig) -> PipelineResult<Vec<TopMatch>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Pipeline::new(config.clone())?.run(lines))
}

pub fn run_reader<R: BufRead>(reader: R, config: &PipelineConfig) -> PipelineResult<Vec<TopMatch>> {
    Pipeline::new(config.clone())?.run_reader(reader)
}
