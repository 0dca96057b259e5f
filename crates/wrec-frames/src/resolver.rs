//! Frame Location Resolution
//!
//! Walks the live containment chain from a context up to the top
//! level, adjusting each hop's sibling index for the indicator slot,
//! and reports the resulting path to the host.
//!
//! Resolution runs once per context at load and again on an explicit
//! recalculation request. A recalculation supersedes an in-flight pass
//! by rebuilding the path from scratch; stale results are simply
//! overwritten.

use std::cell::RefCell;

use wrec_ipc::{ContextNotice, ContextRequest, HostLink, HostReply};

use crate::{FrameId, FramePath, FrameTree, calculate_frame_index};

/// Resolve `frame`'s path against the live tree.
///
/// The indicator correction is fetched from the host only at the hop
/// whose parent is the top-level context; a missing reply reads as "no
/// correction", never as a failure. An empty child list mid-ascent is
/// a navigation racing us: the ascent stops and the prefix built so
/// far stands.
pub async fn resolve_frame_location(
    tree: &RefCell<FrameTree>,
    frame: FrameId,
    link: &HostLink,
) -> FramePath {
    let mut segments = Vec::new();
    let mut current = frame;

    loop {
        // snapshot one hop; the borrow must not live across an await
        let hop = {
            let tree = tree.borrow();
            tree.parent(current).map(|parent| {
                (
                    parent,
                    tree.children(parent).to_vec(),
                    tree.is_top(parent),
                )
            })
        };
        let Some((parent, children, parent_is_top)) = hop else {
            break;
        };

        if children.is_empty() {
            tracing::debug!("empty child list mid-ascent, keeping partial path");
            break;
        }

        let indicator = if parent_is_top {
            request_indicator_index(link).await
        } else {
            None
        };

        let Some(raw) = children.iter().position(|&c| c == current) else {
            tracing::debug!("context missing from its parent, keeping partial path");
            break;
        };

        segments.push(calculate_frame_index(raw as u32, indicator));
        current = parent;
    }

    segments.reverse();
    FramePath::new(segments)
}

/// Resolve, then report the path to the host, as each context does at
/// load
pub async fn resolve_and_report(
    tree: &RefCell<FrameTree>,
    frame: FrameId,
    link: &HostLink,
) -> FramePath {
    let path = resolve_frame_location(tree, frame, link).await;
    link.notify(ContextNotice::FrameLocation {
        path: path.to_string(),
    });
    tracing::debug!(path = %path, "frame location resolved");
    path
}

/// Ask the host for the indicator correction. No reply means none.
async fn request_indicator_index(link: &HostLink) -> Option<u32> {
    match link.request(ContextRequest::FrameCount).await {
        Some(HostReply::IndicatorIndex { indicator_index }) => indicator_index,
        _ => None,
    }
}
