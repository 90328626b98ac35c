use reqwest::multipart::{Form, Part};

use crate::api::ApiError;
use crate::photos::ImageHandle;
use crate::submission::draft::OrphanageDraft;

/// Multipart field every photo is sent under
pub const IMAGE_FIELD: &str = "images";
/// Content type declared for every photo part
pub const IMAGE_CONTENT_TYPE: &str = "image/jpg";

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    pub file_name: String,
    pub handle: ImageHandle,
}

/// Text fields and photo parts of one create request, in transmission order
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    fields: Vec<(&'static str, String)>,
    images: Vec<ImagePart>,
}

impl SubmissionPayload {
    pub fn from_draft(draft: &OrphanageDraft) -> Self {
        let position = draft.position();
        let fields = vec![
            ("name", draft.name.clone()),
            ("about", draft.about.clone()),
            ("instructions", draft.instructions.clone()),
            ("opening_hours", draft.opening_hours.clone()),
            ("open_on_weekends", draft.open_on_weekends.to_string()),
            ("latitude", position.latitude.to_string()),
            ("longitude", position.longitude.to_string()),
        ];

        let images = draft
            .images()
            .iter()
            .enumerate()
            .map(|(index, handle)| ImagePart {
                file_name: format!("image_{index}.jpg"),
                handle: handle.clone(),
            })
            .collect();

        Self { fields, images }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn images(&self) -> &[ImagePart] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Read every photo from disk and build the multipart body
    pub async fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        for image in self.images {
            let path = image.handle.path();
            let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let part = Part::bytes(bytes)
                .file_name(image.file_name)
                .mime_str(IMAGE_CONTENT_TYPE)?;
            form = form.part(IMAGE_FIELD, part);
        }

        Ok(form)
    }
}
