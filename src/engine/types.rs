pub type UserId = i64;
pub type ItemId = i64;
pub type ClusterId = usize;

/// Cell value standing for "no rating"; valid ratings never reach it.
pub const UNRATED: f64 = 0.0;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub value: f64,
}

impl Rating {
    pub fn new(user_id: UserId, item_id: ItemId, value: f64) -> Self {
        Self { user_id, item_id, value }
    }
}

pub fn is_valid_rating(value: f64) -> bool {
    value.is_finite() && (MIN_RATING..=MAX_RATING).contains(&value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub item_id: ItemId,
    pub predicted_rating: f64,
}

/// How cluster peers are aggregated into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Count the target user among their own cluster peers.
    pub include_self: bool,
    /// Divide by every peer, including peers that left the item unrated.
    pub dilute_unrated: bool,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            include_self: true,
            dilute_unrated: true,
        }
    }
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
