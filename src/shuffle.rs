//! Grouping collaborator for the pipeline stages.
//!
//! A stage is a map phase (`map_records`) that turns each input record into
//! zero or more keyed values, a shuffle (`group_by_key`) that partitions those
//! values by key, and a reduce phase (`reduce_groups`) that calls a handler
//! once per key with every value for that key.
//!
//! Keys come out in ascending order and values keep their arrival order.
//! Both phases preserve that order when they run on rayon workers, so a stage
//! produces the same output vector whether or not it runs in parallel.

use rayon::prelude::*;
use std::collections::BTreeMap;

pub type Groups<K, V> = BTreeMap<K, Vec<V>>;

/// Flat-map every input record, optionally on the rayon pool.
pub fn map_records<T, R, O, F>(inputs: Vec<T>, parallel: bool, mapper: F) -> Vec<O>
where
    T: Send,
    R: IntoIterator<Item = O> + Send,
    O: Send,
    F: Fn(T) -> R + Sync,
{
    if parallel {
        inputs
            .into_par_iter()
            .map(&mapper)
            .collect::<Vec<R>>()
            .into_iter()
            .flatten()
            .collect()
    } else {
        inputs.into_iter().flat_map(mapper).collect()
    }
}

pub fn group_by_key<K, V, I>(records: I) -> Groups<K, V>
where
    K: Ord,
    I: IntoIterator<Item = (K, V)>,
{
    let mut groups: Groups<K, V> = BTreeMap::new();
    for (key, value) in records {
        groups.entry(key).or_insert_with(Vec::new).push(value);
    }
    groups
}

/// Call `reducer` once per key. Keys never share state, so with `parallel`
/// each group may land on a different worker.
pub fn reduce_groups<K, V, R, O, F>(groups: Groups<K, V>, parallel: bool, reducer: F) -> Vec<O>
where
    K: Send,
    V: Send,
    R: IntoIterator<Item = O> + Send,
    O: Send,
    F: Fn(K, Vec<V>) -> R + Sync,
{
    if parallel {
        let groups: Vec<(K, Vec<V>)> = groups.into_iter().collect();
        groups
            .into_par_iter()
            .map(|(key, values)| reducer(key, values))
            .collect::<Vec<R>>()
            .into_iter()
            .flatten()
            .collect()
    } else {
        groups
            .into_iter()
            .flat_map(|(key, values)| reducer(key, values))
            .collect()
    }
}
