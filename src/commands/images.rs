//! Upload, list and delete images

use anyhow::{Context, Result};
use std::path::Path;

use crate::media::{upload_folder, UploadedImage};
use crate::Horizon;

/// Upload a `.jpg` and create its resized variants
pub fn upload(horizon: &Horizon, file: &Path, title: Option<&str>) -> Result<UploadedImage> {
    let uploaded = UploadedImage::upload(&horizon.media_dir, file, title, &horizon.config.media)
        .with_context(|| format!("Failed to upload {:?}", file))?;

    println!("{} -> {}", uploaded, uploaded.image.display());
    for name in uploaded.available_resized_images()?.lines() {
        println!("  {}", name);
    }
    Ok(uploaded)
}

/// List every upload with its variants
pub fn list(horizon: &Horizon) -> Result<()> {
    let uploads = UploadedImage::list(&horizon.media_dir, &horizon.config.media)?;
    println!("Images ({}):", uploads.len());
    for upload in uploads {
        let variants = upload.available_resized_images()?;
        println!(
            "  {} ({} variants)",
            upload.image.display(),
            variants.lines().count()
        );
    }
    Ok(())
}

/// Delete an upload folder, given as `<upload_dir>/<id>` relative to the media directory
pub fn delete(horizon: &Horizon, folder: &Path) -> Result<()> {
    let folder = upload_folder(&horizon.config.media, folder)?;
    let upload = UploadedImage::open(&horizon.media_dir, &folder)
        .with_context(|| format!("No upload at {:?}", folder))?;
    let image = upload.image.clone();
    upload.delete()?;
    println!("Deleted {}", image.display());
    Ok(())
}
