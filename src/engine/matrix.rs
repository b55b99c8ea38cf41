use std::collections::HashMap;

use log::debug;
use ndarray::Array2;

use super::types::{is_valid_rating, ItemId, Rating, UserId, UNRATED};
use crate::errors::{RecommendError, RecommendResult};

/// Dense user×item table of raw ratings.
///
/// Rows follow ascending user id, columns ascending item id, so matrix
/// positions map back to entity ids deterministically.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    user_ids: Vec<UserId>,
    item_ids: Vec<ItemId>,
    user_index: HashMap<UserId, usize>,
    item_index: HashMap<ItemId, usize>,
    values: Array2<f64>,
}

impl RatingMatrix {
    /// Builds the matrix; a later rating for the same (user, item) pair overwrites an earlier one.
    pub fn build(users: &[UserId], items: &[ItemId], ratings: &[Rating]) -> RecommendResult<Self> {
        let user_ids = sorted_unique(users);
        let item_ids = sorted_unique(items);
        let user_index = index_of(&user_ids);
        let item_index = index_of(&item_ids);

        let mut values = Array2::<f64>::from_elem((user_ids.len(), item_ids.len()), UNRATED);

        for rating in ratings {
            let row = *user_index.get(&rating.user_id).ok_or_else(|| {
                RecommendError::Data(format!("rating references unknown user {}", rating.user_id))
            })?;
            let col = *item_index.get(&rating.item_id).ok_or_else(|| {
                RecommendError::Data(format!("rating references unknown item {}", rating.item_id))
            })?;
            if !is_valid_rating(rating.value) {
                return Err(RecommendError::Data(format!(
                    "rating {} by user {} for item {} is out of range",
                    rating.value, rating.user_id, rating.item_id
                )));
            }
            values[[row, col]] = rating.value;
        }

        debug!(
            "Built rating matrix: {} users x {} items from {} ratings",
            user_ids.len(),
            item_ids.len(),
            ratings.len()
        );

        Ok(Self {
            user_ids,
            item_ids,
            user_index,
            item_index,
            values,
        })
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn row_of(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn column_of(&self, item_id: ItemId) -> Option<usize> {
        self.item_index.get(&item_id).copied()
    }

    pub fn get(&self, user_id: UserId, item_id: ItemId) -> Option<f64> {
        let row = self.row_of(user_id)?;
        let col = self.column_of(item_id)?;
        Some(self.values[[row, col]])
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_index.contains_key(&user_id)
    }
}

fn sorted_unique(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn index_of(ids: &[i64]) -> HashMap<i64, usize> {
    ids.iter().enumerate().map(|(idx, &id)| (id, idx)).collect()
}
