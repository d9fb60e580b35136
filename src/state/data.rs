//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the Unsplash fetch pipeline and the wall state machine.

/// An image we know the URL of but have not probed yet.
///
/// The id is the lowercase hex MD5 of the source URL, so it is stable
/// across pages and app restarts for the same image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialImage {
    pub id: String,
    pub url: String,
}

impl PartialImage {
    /// Build a partial image from its source URL, deriving the id.
    pub fn from_url(url: String) -> Self {
        let id = format!("{:x}", md5::compute(url.as_bytes()));
        PartialImage { id, url }
    }
}

/// An image with known intrinsic pixel dimensions, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedImage {
    pub id: String,
    pub url: String,
    /// Intrinsic pixel width
    pub width: u32,
    /// Intrinsic pixel height
    pub height: u32,
}

/// A probed image: intrinsic dimensions plus the downloaded encoded
/// bytes, so the view can build a display handle without re-fetching.
#[derive(Clone)]
pub struct ProbedImage {
    pub image: SizedImage,
    pub bytes: Vec<u8>,
}

// Manual Debug so message logs don't dump the raw image bytes.
impl std::fmt::Debug for ProbedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbedImage")
            .field("image", &self.image)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Result rows of one fetched page, when the API returned a `results`
/// array at all.
#[derive(Debug, Clone)]
pub struct PageResults {
    /// Probed images of this page, in API result order.
    pub images: Vec<ProbedImage>,
    /// Total page count reported by the API (0 when absent).
    pub total_pages: u32,
}

/// Everything the wall state machine needs from one completed fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Error messages from this fetch. Replaces the previous error list
    /// wholesale, including replacement by empty.
    pub errors: Vec<String>,
    /// `None` when the response carried no `results` array (zero images
    /// for this page).
    pub results: Option<PageResults>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_md5_of_url() {
        let img = PartialImage::from_url("https://example.com/a.jpg".to_string());
        // md5 of the URL string, lowercase hex
        assert_eq!(
            img.id,
            format!("{:x}", md5::compute(b"https://example.com/a.jpg"))
        );
        assert_eq!(img.id.len(), 32);
    }

    #[test]
    fn test_same_url_same_id() {
        let a = PartialImage::from_url("https://example.com/x.jpg".to_string());
        let b = PartialImage::from_url("https://example.com/x.jpg".to_string());
        assert_eq!(a.id, b.id);
    }
}
