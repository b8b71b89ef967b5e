//! Archive image naming.

use chrono::NaiveDate;

/// Daily profile image file name: `{prefix}{YYYY}{MM}{DD}.png`.
pub fn archive_image_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}{}.png", prefix, date.format("%Y%m%d"))
}

/// Image path relative to the image root: `{folder}{prefix}{YYYY}{MM}{DD}.png`.
///
/// `folder` is used verbatim, so it carries its own trailing separator.
pub fn archive_image_path(folder: &str, prefix: &str, date: NaiveDate) -> String {
    format!("{}{}", folder, archive_image_name(prefix, date))
}

/// Status text shown when no image exists for the selected date.
pub fn image_missing_message(date: NaiveDate) -> String {
    format!(
        "Profile image does not exist for {}",
        date.format("%a %b %d %Y")
    )
}
