//! Item co-occurrence across shopping baskets.
//!
//! Purchases (`user,date,item` lines) are grouped into per-user, per-day
//! baskets, every basket is expanded into directional item pairs whose
//! occurrences are counted, and each item is matched with the partner it
//! co-occurs with most often.
//!
//! ```
//! use basket::{run, PipelineConfig};
//!
//! let lines = vec![
//!     "u1,2020-01-01,Milk",
//!     "u1,2020-01-01,Bread",
//!     "u2,2020-01-01,Bread",
//!     "u2,2020-01-01,Eggs",
//! ];
//! let top_matches = run(lines, &PipelineConfig::default()).unwrap();
//! assert_eq!(top_matches.len(), 3);
//! assert_eq!(top_matches[2].to_string(), "Milk -> [Bread, 1]");
//! ```

pub mod baskets;
pub mod config;
pub mod error;
pub mod output;
pub mod pairs;
pub mod pipeline;
pub mod shuffle;
pub mod top;
pub mod types;

#[cfg(feature = "python")]
mod wrapper;

pub use config::{PipelineConfig, TieBreak};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{run, run_reader, Pipeline, StageOutputs};
pub use types::{Basket, BasketKey, ItemPair, PairCount, PurchaseRecord, TopMatch};
