//! Playback sequence - custom ordering over the active frames
//!
//! The playback order is independent of raster order: active frames sorted by
//! `sequence_order`, ties broken by raster `id`. Reordering only ever swaps
//! the ranks of two neighbors, so ranks need not stay contiguous.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::frames::Frame;
use crate::geometry::Rect;

/// One step of the playback/export sequence: where to copy from and where
/// to place it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackEntry {
    /// Raster id of the frame this entry came from
    pub id: usize,
    /// Source rectangle in image pixel space
    pub source: Rect,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl From<&Frame> for PlaybackEntry {
    fn from(frame: &Frame) -> Self {
        Self {
            id: frame.id,
            source: frame.rect,
            offset_x: frame.offset_x,
            offset_y: frame.offset_y,
        }
    }
}

/// Direction to move a frame within the playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start of the sequence (-1)
    Earlier,
    /// Toward the end of the sequence (+1)
    Later,
}

impl Direction {
    /// `-1` maps to `Earlier`, `+1` to `Later`; anything else is rejected.
    pub fn from_step(step: i32) -> Option<Self> {
        match step {
            -1 => Some(Self::Earlier),
            1 => Some(Self::Later),
            _ => None,
        }
    }
}

/// Active frames in playback order.
pub fn playback_order(frames: &[Frame]) -> Vec<&Frame> {
    let mut active: Vec<&Frame> = frames.iter().filter(|f| f.active).collect();
    active.sort_by_key(|f| (f.sequence_order, f.id));
    active
}

/// The playback order as renderer-facing entries.
pub fn playback_entries(frames: &[Frame]) -> Vec<PlaybackEntry> {
    playback_order(frames).into_iter().map(PlaybackEntry::from).collect()
}

/// Map each active frame id to its 1-based position in playback order.
pub fn sequence_badges(frames: &[Frame]) -> HashMap<usize, usize> {
    playback_order(frames)
        .iter()
        .enumerate()
        .map(|(pos, f)| (f.id, pos + 1))
        .collect()
}

/// Swap the selected frame's rank with its neighbor in playback order.
///
/// When the two ranks are equal the active frames are first renumbered
/// 0..n in their current playback order.
///
/// Does nothing unless exactly one frame is selected and that frame is
/// active, or when the move would fall off either end of the sequence.
/// Returns `true` when two ranks were exchanged.
pub fn move_in_sequence(frames: &mut [Frame], selection: &BTreeSet<usize>, direction: Direction) -> bool {
    if selection.len() != 1 {
        return false;
    }
    let Some(&selected) = selection.iter().next() else {
        return false;
    };

    // Indices into `frames`, in playback order
    let mut order: Vec<usize> = (0..frames.len()).filter(|&i| frames[i].active).collect();
    order.sort_by_key(|&i| (frames[i].sequence_order, frames[i].id));

    let Some(pos) = order.iter().position(|&i| frames[i].id == selected) else {
        // Selected frame is inactive or unknown
        return false;
    };
    let neighbor = match direction {
        Direction::Earlier => pos.checked_sub(1),
        Direction::Later => Some(pos + 1).filter(|&j| j < order.len()),
    };
    let Some(neighbor) = neighbor else {
        return false;
    };

    let (a, b) = (order[pos], order[neighbor]);
    if frames[a].sequence_order == frames[b].sequence_order {
        // Tied ranks sort by id; make them distinct so the swap moves something
        for (rank, &i) in order.iter().enumerate() {
            frames[i].sequence_order = rank;
        }
    }
    let rank_a = frames[a].sequence_order;
    frames[a].sequence_order = frames[b].sequence_order;
    frames[b].sequence_order = rank_a;

    tracing::debug!(
        frame = frames[a].id,
        swapped_with = frames[b].id,
        ?direction,
        "sequence reordered"
    );
    true
}

/// Put the listed frames at the front of the playback order, in the order
/// given, followed by the remaining active frames in their current order.
///
/// Unknown, inactive and repeated ids are skipped. Ranks are renumbered
/// from 0. Returns `true` when the playback order changed.
pub fn promote(frames: &mut [Frame], ids: &[usize]) -> bool {
    let before: Vec<usize> = playback_order(frames).iter().map(|f| f.id).collect();

    let mut order: Vec<usize> = Vec::with_capacity(before.len());
    for &id in ids {
        if before.contains(&id) && !order.contains(&id) {
            order.push(id);
        }
    }
    for &id in &before {
        if !order.contains(&id) {
            order.push(id);
        }
    }
    if order == before {
        return false;
    }

    for (rank, &id) in order.iter().enumerate() {
        if let Some(frame) = frames.iter_mut().find(|f| f.id == id) {
            frame.sequence_order = rank;
        }
    }
    tracing::debug!(?order, "sequence reordered");
    true
}
