//! Archive image and photo gallery lookups under the image root.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use reading_protocol::{archive_image_path, image_missing_message};
use station_common::{format_idate, StationConfig, StationError, StationResult};

/// Image file extensions listed in a gallery.
const GALLERY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Result of the profile image existence check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveStatus {
    pub date: NaiveDate,
    pub idate: String,
    /// Image path relative to the image root.
    pub file: String,
    pub exists: bool,
    /// Empty when the image exists.
    pub status: String,
}

/// Photo set for one archived day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gallery {
    pub date: NaiveDate,
    pub idate: String,
    /// Image paths relative to the image root, sorted by name.
    pub images: Vec<String>,
}

/// Reject dates outside the station's deployment window.
pub fn check_window(station: &StationConfig, date: NaiveDate, today: NaiveDate) -> StationResult<()> {
    let window = station.archive.window();
    if window.contains(date, today) {
        Ok(())
    } else {
        Err(StationError::DateOutOfRange {
            date: format_idate(date),
            first: format_idate(window.first),
            last: format_idate(window.last_or(today)),
        })
    }
}

/// Check whether the profile image for `date` exists.
///
/// Any failure to stat the file counts as "does not exist".
pub async fn check_image(image_root: &Path, station: &StationConfig, date: NaiveDate) -> ArchiveStatus {
    let file = archive_image_path(
        &station.archive.image_folder,
        &station.archive.file_prefix,
        date,
    );

    let exists = match tokio::fs::metadata(image_root.join(&file)).await {
        Ok(meta) => meta.is_file(),
        Err(e) => {
            debug!(station = %station.id, file = %file, error = %e, "Archive image not found");
            false
        }
    };

    ArchiveStatus {
        date,
        idate: format_idate(date),
        file,
        exists,
        status: if exists {
            String::new()
        } else {
            image_missing_message(date)
        },
    }
}

/// List the photo set for `date`. A station without a gallery, or a day
/// without a directory, yields an empty list.
pub async fn list_gallery(
    image_root: &Path,
    station: &StationConfig,
    date: NaiveDate,
) -> StationResult<Gallery> {
    let idate = format_idate(date);
    let mut images = Vec::new();

    if let Some(gallery_dir) = &station.archive.gallery_dir {
        let relative = Path::new(gallery_dir).join(&idate);
        let dir = image_root.join(&relative);

        match tokio::fs::read_dir(&dir).await {
            Ok(mut entries) => {
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if !has_gallery_extension(&path) {
                        continue;
                    }
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        images.push(format!("{}/{}/{}", gallery_dir.trim_end_matches('/'), idate, name));
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(station = %station.id, dir = ?dir, "No gallery for date");
            }
            Err(e) => return Err(e.into()),
        }
    }

    images.sort();
    Ok(Gallery {
        date,
        idate,
        images,
    })
}

fn has_gallery_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            GALLERY_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
