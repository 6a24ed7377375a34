use itertools::Itertools;
use std::collections::HashMap;
use tracing::debug;

use crate::shuffle::{group_by_key, map_records, reduce_groups};
use crate::types::{Basket, Count, ItemName, ItemPair, PairCount};

const APPROX_NUM_PARTNERS: usize = 16; // arbitrary

/// Both directions of every 2-combination of the basket's sorted items.
/// A basket of n distinct items gives n * (n - 1) pairs.
pub fn generate_pairs(basket: &Basket) -> Vec<ItemPair> {
    if basket.len() < 2 {
        return vec![];
    }

    let n = basket.len();
    let mut pairs = Vec::with_capacity(n * (n - 1));

    for combi in basket.items.iter().sorted().combinations(2) {
        let pair = ItemPair::new(combi[0].as_str(), combi[1].as_str());
        let reversed = pair.reversed();
        pairs.push(pair);
        pairs.push(reversed);
    }

    pairs
}

/// Tally partners in order of first appearance.
fn tally_partners(source: ItemName, partners: Vec<ItemName>, min_count: Count) -> Vec<PairCount> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(APPROX_NUM_PARTNERS);
    let mut counts: Vec<(&str, Count)> = Vec::with_capacity(APPROX_NUM_PARTNERS);

    for partner in &partners {
        match positions.get(partner.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(partner.as_str(), counts.len());
                counts.push((partner.as_str(), 1));
            }
        }
    }

    counts
        .into_iter()
        .filter(|&(_, count)| count >= min_count)
        .map(|(partner, count)| PairCount {
            pair: ItemPair::new(source.as_str(), partner),
            count,
        })
        .collect()
}

/// Count, for every directional pair, the number of baskets holding both items.
pub fn count_pairs(baskets: Vec<Basket>, parallel: bool, min_count: Count) -> Vec<PairCount> {
    let num_baskets = baskets.len();

    let pairs: Vec<(ItemName, ItemName)> = map_records(baskets, parallel, |basket| {
        generate_pairs(&basket)
            .into_iter()
            .map(|pair| (pair.source, pair.partner))
            .collect::<Vec<_>>()
    });
    let num_pairs = pairs.len();
    let groups = group_by_key(pairs);

    let pair_counts: Vec<PairCount> = reduce_groups(groups, parallel, |source, partners| {
        tally_partners(source, partners, min_count)
    });

    debug!(
        num_baskets,
        num_pairs,
        num_pair_counts = pair_counts.len(),
        "counted pairs"
    );
    pair_counts
}
