use tracing::{debug, trace};

use crate::shuffle::{group_by_key, map_records, reduce_groups};
use crate::types::{Basket, BasketItems, BasketKey, ItemName, PurchaseRecord};

const NUM_FIELDS: usize = 3;

/// `user,date,item`, fields trimmed. Anything else is `None`.
pub fn parse_record(line: &str) -> Option<PurchaseRecord> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();

    if fields.len() != NUM_FIELDS || fields.iter().any(|field| field.is_empty()) {
        trace!(line, "skipping malformed purchase line");
        return None;
    }

    Some(PurchaseRecord {
        user_id: fields[0].to_owned(),
        date: fields[1].to_owned(),
        item: fields[2].to_owned(),
    })
}

pub fn parse_records<I, S>(lines: I) -> Vec<PurchaseRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| parse_record(line.as_ref()))
        .collect()
}

/// Group purchases by (user, day), one basket of distinct items per group.
pub fn build_baskets(records: Vec<PurchaseRecord>, parallel: bool) -> Vec<Basket> {
    let num_records = records.len();

    let keyed: Vec<(BasketKey, ItemName)> = map_records(records, parallel, |record| {
        Some((record.key(), record.item))
    });
    let groups = group_by_key(keyed);

    let baskets: Vec<Basket> = reduce_groups(groups, parallel, |key, items| {
        let items: BasketItems = items.into_iter().collect();
        Some(Basket { key, items })
    });

    debug!(num_records, num_baskets = baskets.len(), "built baskets");
    baskets
}
