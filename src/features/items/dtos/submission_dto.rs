use std::collections::HashMap;

/// Image part of a multipart submission
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// A decoded item form: text fields plus at most one image
#[derive(Debug, Clone, Default)]
pub struct ItemSubmission {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}
