use tracing::debug;

use crate::config::TieBreak;
use crate::shuffle::{group_by_key, map_records, reduce_groups};
use crate::types::{Count, ItemName, PairCount, TopMatch};

fn beats(candidate: (&str, Count), best: (&str, Count), tie_break: TieBreak) -> bool {
    let (partner, count) = candidate;
    let (best_partner, best_count) = best;

    match tie_break {
        TieBreak::FirstSeen => count > best_count,
        TieBreak::Lexicographic => {
            count > best_count || (count == best_count && partner < best_partner)
        }
    }
}

/// Best partner for one source item, or `None` if it has no partners.
pub fn find_top(
    item: ItemName,
    candidates: Vec<(ItemName, Count)>,
    tie_break: TieBreak,
) -> Option<TopMatch> {
    let mut max_item: Option<ItemName> = None;
    let mut max_count: Count = 0;

    for (partner, count) in candidates {
        let best = (max_item.as_deref().unwrap_or(""), max_count);
        if beats((partner.as_str(), count), best, tie_break) {
            max_item = Some(partner);
            max_count = count;
        }
    }

    max_item.map(|partner| TopMatch {
        item,
        partner,
        count: max_count,
    })
}

/// One top match per source item that has at least one partner.
pub fn select_top_matches(
    pair_counts: Vec<PairCount>,
    parallel: bool,
    tie_break: TieBreak,
) -> Vec<TopMatch> {
    let num_pair_counts = pair_counts.len();

    let keyed: Vec<(ItemName, (ItemName, Count))> = map_records(pair_counts, parallel, |pc| {
        Some((pc.pair.source, (pc.pair.partner, pc.count)))
    });
    let groups = group_by_key(keyed);

    let top_matches: Vec<TopMatch> = reduce_groups(groups, parallel, |item, candidates| {
        find_top(item, candidates, tie_break)
    });

    debug!(
        num_pair_counts,
        num_top_matches = top_matches.len(),
        "selected top matches"
    );
    top_matches
}
