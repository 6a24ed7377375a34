use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result};

pub type UserId = String;
pub type Day = String;
pub type ItemName = String;
pub type Count = u32;

pub type BasketItems = HashSet<ItemName>;

/// One well-formed `user,date,item` input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub user_id: UserId,
    pub date: Day,
    pub item: ItemName,
}

impl PurchaseRecord {
    pub fn key(&self) -> BasketKey {
        BasketKey {
            user_id: self.user_id.clone(),
            date: self.date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasketKey {
    pub user_id: UserId,
    pub date: Day,
}

impl BasketKey {
    pub fn new(user_id: impl Into<UserId>, date: impl Into<Day>) -> Self {
        Self {
            user_id: user_id.into(),
            date: date.into(),
        }
    }
}

/// Distinct items bought by one user on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    pub key: BasketKey,
    pub items: BasketItems,
}

impl Basket {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Directional pair: `(source, partner)` and `(partner, source)` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPair {
    pub source: ItemName,
    pub partner: ItemName,
}

impl ItemPair {
    pub fn new(source: impl Into<ItemName>, partner: impl Into<ItemName>) -> Self {
        Self {
            source: source.into(),
            partner: partner.into(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            source: self.partner.clone(),
            partner: self.source.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCount {
    pub pair: ItemPair,
    pub count: Count,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopMatch {
    pub item: ItemName,
    pub partner: ItemName,
    pub count: Count,
}

impl Display for TopMatch {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} -> [{}, {}]", self.item, self.partner, self.count)
    }
}
