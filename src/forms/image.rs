use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// An uploaded file as it arrives in a form: base64 content plus metadata.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageForm {
    pub name: String,
    pub content_type: String,
    pub data: String,
}

/// Replacement image for an existing product. `url` is the image being replaced.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateImageForm {
    pub image: ImageForm,
    pub url: String,
}

/// A decoded image that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageForm {
    pub fn check(self, max_size: usize) -> Result<ImageFile, String> {
        if self.name.trim().is_empty() {
            return Err("Image is required".to_string());
        }

        let bytes = general_purpose::STANDARD
            .decode(self.data.trim())
            .map_err(|_| "Image data is not valid base64".to_string())?;

        if bytes.is_empty() {
            return Err("Image is required".to_string());
        }
        if bytes.len() > max_size {
            return Err(format!(
                "File size must be less than {} MB",
                max_size as f64 / (1024.0 * 1024.0)
            ));
        }
        if !self.content_type.starts_with("image/") {
            return Err("File must be an image".to_string());
        }

        Ok(ImageFile {
            name: self.name,
            content_type: self.content_type,
            bytes,
        })
    }
}
