use crate::forms::ImageForm;
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

const MIN_DESCRIPTION_WORDS: usize = 10;
const MAX_DESCRIPTION_WORDS: usize = 1000;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(min_length = 2)]
    #[validate(max_length = 100)]
    pub name: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 100)]
    pub company: String,
    #[validate(minimum = 0)]
    pub price: i32,
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

/// Product fields plus the image uploaded with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProductForm {
    #[serde(flatten)]
    pub product: ProductForm,
    pub image: ImageForm,
}

impl ProductForm {
    /// Schema checks plus the rules the derive can't express.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| errors.to_string())?;

        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.company.trim().is_empty() {
            return Err("company is required".to_string());
        }

        let words = self.description.split_whitespace().count();
        if !(MIN_DESCRIPTION_WORDS..=MAX_DESCRIPTION_WORDS).contains(&words) {
            return Err(format!(
                "description must be between {} and {} words.",
                MIN_DESCRIPTION_WORDS, MAX_DESCRIPTION_WORDS
            ));
        }

        Ok(())
    }

    pub fn into_product(self, user_id: String, image: String) -> models::Product {
        let mut product = models::Product::default();
        product.name = self.name.trim().to_string();
        product.company = self.company.trim().to_string();
        product.description = self.description;
        product.featured = self.featured;
        product.price = self.price;
        product.image = image;
        product.user_id = user_id;

        product
    }

    pub fn update(self, product: &mut models::Product) {
        product.name = self.name.trim().to_string();
        product.company = self.company.trim().to_string();
        product.description = self.description;
        product.featured = self.featured;
        product.price = self.price;
    }
}
