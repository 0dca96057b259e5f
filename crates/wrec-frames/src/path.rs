//! Frame Path
//!
//! Stable colon-delimited identity of a rendering context under its
//! top level: `root` for the top-level context itself, then one
//! adjusted index per containment level.

use std::fmt;

/// Resolved frame path
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FramePath {
    segments: Vec<u32>,
}

impl FramePath {
    /// Path of the top-level context itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Path from outermost to innermost index
    pub fn new(segments: Vec<u32>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Containment levels below the top-level context
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for FramePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for segment in &self.segments {
            write!(f, ":{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_bare() {
        assert_eq!(FramePath::root().to_string(), "root");
        assert!(FramePath::root().is_root());
    }

    #[test]
    fn test_segments_render_outermost_first() {
        let path = FramePath::new(vec![0, 2, 1]);

        assert_eq!(path.to_string(), "root:0:2:1");
        assert_eq!(path.depth(), 3);
    }
}
