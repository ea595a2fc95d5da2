use ipath_types::{join_segments, Cid};

/// A structural traversal failure.
///
/// `at` is the first segment of the path that was being resolved against the
/// block `cid`, and `remaining` is the rest of that path. For generic nodes
/// these describe the path as it entered the block, even when the walk
/// failed deeper inside it; `message` names the exact position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at {at:?} in {cid}, remaining {remaining:?})")]
pub struct DeadEndError {
    message: String,
    cid: Cid,
    at: String,
    remaining: String,
}

impl DeadEndError {
    /// Build a dead end for `segments` (non-empty) resolved against `cid`.
    pub fn new(message: impl Into<String>, cid: Cid, segments: &[&str]) -> Self {
        let (at, rest) = match segments.split_first() {
            Some((first, rest)) => ((*first).to_string(), rest),
            None => (String::new(), segments),
        };
        Self {
            message: message.into(),
            cid,
            at,
            remaining: join_segments(rest),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Block in which resolution stopped.
    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// Path segment that could not be resolved.
    pub fn at(&self) -> &str {
        &self.at
    }

    /// Unresolved path after `at`, joined with `/`.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipath_types::{cid_from_digest, codes};

    fn cid() -> Cid {
        cid_from_digest(codes::DAG_JSON, codes::SHA2_256, &[3u8; 32]).unwrap()
    }

    #[test]
    fn splits_first_segment_from_rest() {
        let err = DeadEndError::new("no link named \"a\"", cid(), &["a", "b", "c"]);
        assert_eq!(err.at(), "a");
        assert_eq!(err.remaining(), "b/c");
        assert_eq!(err.cid(), &cid());
        assert_eq!(err.message(), "no link named \"a\"");
    }

    #[test]
    fn single_segment_has_empty_remaining() {
        let err = DeadEndError::new("x", cid(), &["only"]);
        assert_eq!(err.at(), "only");
        assert_eq!(err.remaining(), "");
    }

    #[test]
    fn display_includes_position() {
        let err = DeadEndError::new("no value at /a/b", cid(), &["a", "b"]);
        let text = err.to_string();
        assert!(text.starts_with("no value at /a/b"));
        assert!(text.contains("\"a\""));
        assert!(text.contains(&cid().to_string()));
    }
}
