use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReviewForm {
    pub product_id: Uuid,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: i32,
    #[validate(min_length = 10)]
    #[validate(max_length = 1000)]
    pub comment: String,
}

impl ReviewForm {
    pub fn into_review(self, user_id: String) -> models::Review {
        let mut review = models::Review::default();
        review.product_id = self.product_id;
        review.user_id = user_id;
        review.rating = self.rating;
        review.comment = self.comment;

        review
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(rating: i32, comment: &str) -> ReviewForm {
        ReviewForm {
            product_id: Uuid::new_v4(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn rating_must_be_between_one_and_five() {
        assert!(form(0, "really comfortable").validate().is_err());
        assert!(form(6, "really comfortable").validate().is_err());
        assert!(form(1, "really comfortable").validate().is_ok());
        assert!(form(5, "really comfortable").validate().is_ok());
    }

    #[test]
    fn comment_length_is_bounded() {
        assert!(form(4, "meh").validate().is_err());
        assert!(form(4, &"x".repeat(1001)).validate().is_err());
    }

    #[test]
    fn review_carries_owner() {
        let f = form(5, "really comfortable");
        let product_id = f.product_id;
        let review = f.into_review("user_1".to_string());
        assert_eq!(review.user_id, "user_1");
        assert_eq!(review.product_id, product_id);
        assert_eq!(review.rating, 5);
    }
}
