//! Image uploads and their resized variants
//!
//! Each upload lives in its own folder, `<upload_dir>/<uuid>/<file>.jpg`,
//! next to variants named `<file>_<width>x<height>.jpg`. Deleting an upload
//! removes the whole folder.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageReader;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::config::MediaConfig;

lazy_static! {
    static ref VARIANT_STEM: Regex =
        Regex::new(r"_\d+x\d+$").expect("variant pattern must compile");
}

/// Upload and resize errors
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Only .jpg files are allowed: {0}")]
    InvalidExtension(String),

    #[error("Image file too large ({size} bytes, maximum {max} allowed)")]
    TooLarge { size: u64, max: u64 },

    #[error("Not a valid file name: {0:?}")]
    InvalidFileName(PathBuf),

    #[error("No uploaded image in {0:?}")]
    NotFound(PathBuf),

    #[error("Not an upload folder: {0:?}")]
    OutsideUploads(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Check that a file is a `.jpg` no larger than the configured limit
pub fn validate_upload(path: &Path, config: &MediaConfig) -> Result<(), MediaError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if ext != "jpg" {
        return Err(MediaError::InvalidExtension(
            path.display().to_string(),
        ));
    }

    let size = fs::metadata(path)?.len();
    if size > config.max_upload_bytes {
        return Err(MediaError::TooLarge {
            size,
            max: config.max_upload_bytes,
        });
    }
    Ok(())
}

/// Fresh upload location: `<upload_dir>/<uuid hex>/<filename>`
pub fn upload_path(config: &MediaConfig, filename: &str) -> PathBuf {
    let folder = uuid::Uuid::new_v4().simple().to_string();
    Path::new(&config.upload_dir).join(folder).join(filename)
}

/// Check that `folder` names a single upload folder under `upload_dir`
pub fn upload_folder(config: &MediaConfig, folder: &Path) -> Result<PathBuf, MediaError> {
    let plain = folder
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    let relative = folder.strip_prefix(&config.upload_dir).ok();
    match relative {
        Some(rest) if plain && rest.components().count() == 1 => Ok(folder.to_path_buf()),
        _ => Err(MediaError::OutsideUploads(folder.to_path_buf())),
    }
}

/// JPEG quality for a variant width
pub fn variant_quality(width: u32) -> u8 {
    match width {
        100 => 100,
        400 => 80,
        _ => 50,
    }
}

/// Variant size for a target width, keeping the aspect ratio
pub fn variant_size(original: (u32, u32), width: u32) -> (u32, u32) {
    let (orig_width, orig_height) = original;
    let height = (u64::from(orig_height) * u64::from(width) / u64::from(orig_width.max(1))) as u32;
    (width, height)
}

/// An uploaded original image
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub title: Option<String>,
    /// Path relative to the media root
    pub image: PathBuf,
    media_root: PathBuf,
}

impl UploadedImage {
    /// Validate `source`, copy it into a new upload folder and create its variants
    pub fn upload(
        media_root: &Path,
        source: &Path,
        title: Option<&str>,
        config: &MediaConfig,
    ) -> Result<Self, MediaError> {
        validate_upload(source, config)?;

        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MediaError::InvalidFileName(source.to_path_buf()))?;

        let uploaded = Self {
            title: title.map(str::to_string),
            image: upload_path(config, filename),
            media_root: media_root.to_path_buf(),
        };

        fs::create_dir_all(uploaded.folder())?;
        fs::copy(source, uploaded.path())?;
        tracing::info!("Uploaded {:?}", uploaded.image);

        uploaded.create_variants(&config.widths)?;
        Ok(uploaded)
    }

    /// Open an existing upload folder
    pub fn open(media_root: &Path, folder: &Path) -> Result<Self, MediaError> {
        let full = media_root.join(folder);
        let mut originals: Vec<PathBuf> = fs::read_dir(&full)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && !is_variant(p))
            .collect();
        originals.sort();

        let original = originals
            .into_iter()
            .next()
            .ok_or_else(|| MediaError::NotFound(full.clone()))?;
        let image = original
            .strip_prefix(media_root)
            .map_err(|_| MediaError::InvalidFileName(original.clone()))?
            .to_path_buf();

        Ok(Self {
            title: None,
            image,
            media_root: media_root.to_path_buf(),
        })
    }

    /// Every upload under the media root
    pub fn list(media_root: &Path, config: &MediaConfig) -> Result<Vec<Self>, MediaError> {
        let uploads_dir = media_root.join(&config.upload_dir);
        if !uploads_dir.exists() {
            return Ok(Vec::new());
        }

        let mut folders: Vec<PathBuf> = fs::read_dir(&uploads_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        folders.sort();

        let mut uploads = Vec::new();
        for folder in folders {
            let relative = folder
                .strip_prefix(media_root)
                .map_err(|_| MediaError::InvalidFileName(folder.clone()))?;
            match Self::open(media_root, relative) {
                Ok(upload) => uploads.push(upload),
                Err(e) => tracing::warn!("Skipping upload folder {:?}: {}", folder, e),
            }
        }
        Ok(uploads)
    }

    /// Absolute path of the original
    pub fn path(&self) -> PathBuf {
        self.media_root.join(&self.image)
    }

    /// Absolute path of the upload folder
    pub fn folder(&self) -> PathBuf {
        self.path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.media_root.clone())
    }

    fn base_and_ext(&self) -> (String, String) {
        let base = self
            .image
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let ext = self
            .image
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (base, ext)
    }

    /// Path a variant of the given size is stored at
    pub fn variant_path(&self, size: (u32, u32)) -> PathBuf {
        let (base, ext) = self.base_and_ext();
        self.folder()
            .join(format!("{}_{}x{}{}", base, size.0, size.1, ext))
    }

    /// Create one resized variant per width
    ///
    /// Existing variants are left alone; a variant that fails is logged and
    /// skipped.
    pub fn create_variants(&self, widths: &[u32]) -> Result<(), MediaError> {
        let original = image::image_dimensions(self.path())?;

        for &width in widths {
            let size = variant_size(original, width);
            let target = self.variant_path(size);
            if target.exists() {
                continue;
            }
            if let Err(e) = self.create_resized_image(size, &target) {
                tracing::error!("[IMAGE][create_resized_image] {:?}: {}", target, e);
            }
        }
        Ok(())
    }

    fn create_resized_image(&self, size: (u32, u32), target: &Path) -> Result<(), MediaError> {
        let img = ImageReader::open(self.path())?
            .with_guessed_format()?
            .decode()?;
        let resized = img.resize_exact(size.0, size.1, FilterType::Lanczos3);

        let mut writer = BufWriter::new(fs::File::create(target)?);
        let encoder = JpegEncoder::new_with_quality(&mut writer, variant_quality(size.0));
        image::DynamicImage::ImageRgb8(resized.to_rgb8()).write_with_encoder(encoder)?;
        tracing::debug!("Created variant {:?}", target);
        Ok(())
    }

    /// File names of the resized variants, one per line
    pub fn available_resized_images(&self) -> Result<String, MediaError> {
        let (base, _) = self.base_and_ext();
        let prefix = format!("{}_", base);

        let mut names: Vec<String> = fs::read_dir(self.folder())?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| name.starts_with(&prefix))
            .collect();
        names.sort();
        Ok(names.join("\n"))
    }

    /// Remove the upload folder with the original and every variant
    pub fn delete(self) -> Result<(), MediaError> {
        let folder = self.folder();
        if folder.exists() && folder != self.media_root {
            fs::remove_dir_all(&folder)?;
            tracing::info!("Deleted: {:?}", folder);
        }
        Ok(())
    }
}

impl std::fmt::Display for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.title {
            Some(title) if !title.is_empty() => f.write_str(title),
            _ => write!(f, "Image {}", self.image.display()),
        }
    }
}

fn is_variant(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| VARIANT_STEM.is_match(stem))
        .unwrap_or(false)
}
