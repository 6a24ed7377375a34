use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;
use std::collections::HashMap;

use crate::config::{PipelineConfig, TieBreak};
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::types::{Count, ItemName, PairCount, TopMatch};

type PyTopMatches = HashMap<ItemName, (ItemName, Count)>;
type PyPairCounts = HashMap<(ItemName, ItemName), Count>;

impl From<PipelineError> for PyErr {
    fn from(err: PipelineError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

pub fn convert_top_matches(top_matches: Vec<TopMatch>) -> PyTopMatches {
    top_matches
        .into_iter()
        .map(|top| (top.item, (top.partner, top.count)))
        .collect()
}

pub fn convert_pair_counts(pair_counts: Vec<PairCount>) -> PyPairCounts {
    pair_counts
        .into_iter()
        .map(|pc| ((pc.pair.source, pc.pair.partner), pc.count))
        .collect()
}

/// Best co-occurring partner for every item, keyed by item.
#[pyfunction(tie_break = "\"first_seen\"", min_count = "1")]
#[pyo3(text_signature = "(lines, tie_break=\"first_seen\", min_count=1)")]
fn top_matches(lines: Vec<String>, tie_break: &str, min_count: Count) -> PyResult<PyTopMatches> {
    let config = PipelineConfig {
        tie_break: TieBreak::parse(tie_break)?,
        min_count,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config)?;
    Ok(convert_top_matches(pipeline.run(lines)))
}

#[pyfunction]
#[pyo3(text_signature = "(lines)")]
fn pair_counts(lines: Vec<String>) -> PyResult<PyPairCounts> {
    let pipeline = Pipeline::new(PipelineConfig::default())?;
    Ok(convert_pair_counts(pipeline.run_stages(lines).pair_counts))
}

#[pymodule]
fn basket(_: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(top_matches, m)?)?;
    m.add_function(wrap_pyfunction!(pair_counts, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemPair;
    use maplit::hashmap;

    const SCENARIO: &[&str] = &[
        "u1,2020-01-01,Milk",
        "u1,2020-01-01,Bread",
        "u1,2020-01-01,Milk",
        "u2,2020-01-01,Bread",
        "u2,2020-01-01,Eggs",
    ];

    fn scenario_lines() -> Vec<String> {
        SCENARIO.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn top_matches_for_scenario() {
        let matches = top_matches(scenario_lines(), "lexicographic", 1).unwrap();
        assert_eq!(
            matches,
            hashmap! {
                "Bread".to_string() => ("Eggs".to_string(), 1),
                "Eggs".to_string() => ("Bread".to_string(), 1),
                "Milk".to_string() => ("Bread".to_string(), 1),
            }
        );
    }

    #[test]
    fn unknown_tie_break_raises_value_error() {
        pyo3::prepare_freethreaded_python();
        let err = top_matches(scenario_lines(), "random", 1).unwrap_err();
        Python::with_gil(|py| assert!(err.is_instance::<PyValueError>(py)));

        let err = top_matches(scenario_lines(), "first_seen", 0).unwrap_err();
        Python::with_gil(|py| assert!(err.is_instance::<PyValueError>(py)));
    }

    #[test]
    fn pair_counts_for_scenario() {
        let counts = pair_counts(scenario_lines()).unwrap();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&("Milk".to_string(), "Bread".to_string())], 1);
    }

    #[test]
    fn top_matches_keyed_by_item() {
        let converted = convert_top_matches(vec![TopMatch {
            item: "Milk".into(),
            partner: "Bread".into(),
            count: 2,
        }]);
        assert_eq!(
            converted,
            hashmap! { "Milk".to_string() => ("Bread".to_string(), 2) }
        );
    }

    #[test]
    fn pair_counts_keyed_by_pair() {
        let converted = convert_pair_counts(vec![PairCount {
            pair: ItemPair::new("Milk", "Bread"),
            count: 1,
        }]);
        assert_eq!(
            converted,
            hashmap! { ("Milk".to_string(), "Bread".to_string()) => 1 }
        );
    }
}
