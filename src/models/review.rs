use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: String,
    pub rating: i32, // 1..=5, checked by the table constraint
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review listed on the user's own reviews page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserReview {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub product_name: String,
    pub product_image: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub rating: f64,
    pub count: i64,
}

impl RatingSummary {
    /// Builds the summary from a raw `AVG`/`COUNT` pair.
    /// The average is rounded to one decimal; no reviews yields `0`.
    pub fn from_aggregate(average: Option<f64>, count: i64) -> Self {
        let rating = average
            .filter(|_| count > 0)
            .map(|avg| (avg * 10.0).round() / 10.0)
            .unwrap_or(0.0);

        Self { rating, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reviews_gives_zero() {
        assert_eq!(
            RatingSummary::from_aggregate(None, 0),
            RatingSummary { rating: 0.0, count: 0 }
        );
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let summary = RatingSummary::from_aggregate(Some(13.0 / 3.0), 3);
        assert_eq!(summary.rating, 4.3);
        assert_eq!(summary.count, 3);

        let summary = RatingSummary::from_aggregate(Some(4.75), 4);
        assert_eq!(summary.rating, 4.8);
    }
}
