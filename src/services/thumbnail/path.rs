//! Thumbnail naming contract
//!
//! A thumbnail lives next to its source object: same directory, basename
//! prefixed with `thumb_`. The prefix is part of the external contract, so
//! the recursion gate honors it in addition to the metadata marker.

/// Reserved basename prefix for generated thumbnails
pub const THUMB_PREFIX: &str = "thumb_";

/// Custom metadata key stamped on every generated thumbnail, carrying the
/// source object path. Its presence marks an object as one of ours.
pub const SOURCE_MARKER_KEY: &str = "thumbnail-source";

/// Split an object path into (directory, basename); the directory is empty
/// for root-level objects.
pub fn split_object_path(object_path: &str) -> (&str, &str) {
    match object_path.rsplit_once('/') {
        Some((dir, base)) => (dir, base),
        None => ("", object_path),
    }
}

/// Derive the thumbnail path for a source object
pub fn thumbnail_object_path(object_path: &str) -> String {
    let (dir, base) = split_object_path(object_path);
    if dir.is_empty() {
        format!("{THUMB_PREFIX}{base}")
    } else {
        format!("{dir}/{THUMB_PREFIX}{base}")
    }
}

/// Whether the basename carries the reserved thumbnail prefix
pub fn is_thumbnail_basename(object_path: &str) -> bool {
    split_object_path(object_path).1.starts_with(THUMB_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_object_path() {
        assert_eq!(split_object_path("dir/photo.png"), ("dir", "photo.png"));
        assert_eq!(split_object_path("a/b/c.jpg"), ("a/b", "c.jpg"));
        assert_eq!(split_object_path("photo.png"), ("", "photo.png"));
    }

    #[test]
    fn test_thumbnail_path_keeps_directory() {
        assert_eq!(
            thumbnail_object_path("dir/photo.png"),
            "dir/thumb_photo.png"
        );
        assert_eq!(
            thumbnail_object_path("albums/2026/cat.jpg"),
            "albums/2026/thumb_cat.jpg"
        );
    }

    #[test]
    fn test_thumbnail_path_root_level_object() {
        assert_eq!(thumbnail_object_path("photo.png"), "thumb_photo.png");
    }

    #[test]
    fn test_thumbnail_path_is_prefix_concatenation() {
        // dir + "/thumb_" + base, for any legal basename
        for (dir, base) in [("d", "a.png"), ("x/y", "b c.jpeg"), ("p", "über.gif")] {
            let source = format!("{dir}/{base}");
            assert_eq!(thumbnail_object_path(&source), format!("{dir}/thumb_{base}"));
        }
    }

    #[test]
    fn test_is_thumbnail_basename() {
        assert!(is_thumbnail_basename("dir/thumb_photo.png"));
        assert!(is_thumbnail_basename("thumb_photo.png"));
        assert!(!is_thumbnail_basename("dir/photo.png"));
        // prefix in the directory does not count
        assert!(!is_thumbnail_basename("thumb_dir/photo.png"));
        // prefix must be at the start of the basename
        assert!(!is_thumbnail_basename("dir/my_thumb_photo.png"));
    }
}
