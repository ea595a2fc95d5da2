//! Path segmentation.
//!
//! A path is split on runs of `/` and empty segments are dropped, so `""`,
//! `"/"`, and `"//"` all mean "no further traversal".

/// Split a slash-delimited path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join segments back into a relative path (`a/b/c`).
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}
