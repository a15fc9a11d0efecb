/// Unconditional product mutations.
///
/// These bypass the version check (the image upload path never carried a
/// version token) but still advance the row version, so any editor holding
/// an older copy is told to re-fetch.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Points the product at a newly stored image.
    AttachImage(String),
}
