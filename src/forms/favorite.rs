use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

/// Flips a favorite: an existing `favorite_id` is removed, otherwise one is created.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ToggleFavorite {
    pub product_id: Uuid,
    #[serde(default)]
    pub favorite_id: Option<Uuid>,
    /// page to revalidate once the favorite changed
    #[validate(pattern = r"^/")]
    #[validate(max_length = 255)]
    pub pathname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathname_must_be_absolute() {
        let mut form = ToggleFavorite {
            product_id: Uuid::new_v4(),
            favorite_id: None,
            pathname: "products".to_string(),
        };
        assert!(form.validate().is_err());

        form.pathname = "/products".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn favorite_id_is_optional() {
        let json = serde_json::json!({
            "product_id": Uuid::new_v4(),
            "pathname": "/favorites"
        });
        let form: ToggleFavorite = serde_json::from_value(json).unwrap();
        assert!(form.favorite_id.is_none());
    }
}
