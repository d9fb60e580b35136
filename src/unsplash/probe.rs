//! Intrinsic image dimension probing
//!
//! Given the partial images of one fetched page, download each one and
//! decode just enough of it to learn its pixel width and height. Probes
//! run strictly sequentially in result order; layout only sees the page
//! once every probe has resolved.

use std::io::Cursor;

use image::ImageReader;
use thiserror::Error;

use crate::state::data::{PartialImage, ProbedImage, SizedImage};

/// Why a single image could not be probed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("could not determine image format: {0}")]
    Format(#[from] std::io::Error),
    #[error("could not read image dimensions: {0}")]
    Decode(#[from] image::ImageError),
}

/// Download one image and read its intrinsic dimensions from the header.
async fn probe_one(http: &reqwest::Client, image: &PartialImage) -> Result<ProbedImage, ProbeError> {
    let bytes = http
        .get(&image.url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?
        .to_vec();

    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .into_dimensions()?;

    Ok(ProbedImage {
        image: SizedImage {
            id: image.id.clone(),
            url: image.url.clone(),
            width,
            height,
        },
        bytes,
    })
}

/// Probe a page of images, one at a time, preserving input order.
///
/// A failed probe skips that image with a warning instead of poisoning
/// the rest of the page; the caller always gets a page it can lay out.
pub async fn probe_images(http: &reqwest::Client, images: Vec<PartialImage>) -> Vec<ProbedImage> {
    let mut probed = Vec::with_capacity(images.len());
    for image in &images {
        match probe_one(http, image).await {
            Ok(result) => probed.push(result),
            Err(e) => {
                eprintln!("⚠️  Skipping {}: {}", image.url, e);
            }
        }
    }
    probed
}
