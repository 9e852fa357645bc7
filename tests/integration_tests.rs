//! Integration tests for the slicing session
//!
//! These drive a [`Slicer`] through the same sequences of pointer events and
//! commands a host would send, and check the projections it exposes.

use std::collections::BTreeSet;
use std::time::Duration;

use gridslice::dividers::{DividerTarget, MIN_GAP};
use gridslice::frames::OffsetAxis;
use gridslice::geometry::Point;
use gridslice::render::compose_sequence;
use gridslice::selection::CursorHint;
use gridslice::sequence::Direction;
use gridslice::Slicer;
use image::{Rgba, RgbaImage};

/// Sheet whose red channel encodes the column and green the row (in 10px steps)
fn sheet(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([(x / 10) as u8, (y / 10) as u8, 0, 255]))
}

fn session(rows: u32, cols: u32) -> Slicer {
    let mut slicer = Slicer::new(rows, cols);
    slicer.set_source(sheet(300, 300));
    slicer
}

fn drag(slicer: &mut Slicer, from: Point, to: Point) {
    slicer.pointer_down(from);
    slicer.pointer_move(to);
    slicer.pointer_up(to);
}

fn click(slicer: &mut Slicer, at: Point) {
    slicer.pointer_down(at);
    slicer.pointer_up(at);
}

fn playback_ids(slicer: &Slicer) -> Vec<usize> {
    slicer.playback().iter().map(|e| e.id).collect()
}

// ============================================================================
// Grid layout
// ============================================================================

#[test]
fn test_every_grid_size_has_separated_dividers() {
    for rows in 1..=20u32 {
        for cols in [1u32, 7, 20] {
            let slicer = {
                let mut s = Slicer::new(rows, cols);
                s.set_source(RgbaImage::new(200, 200));
                s
            };
            let dividers = slicer.dividers();
            assert_eq!(slicer.frames().len(), (rows * cols) as usize);
            assert_eq!(dividers.vertical().len(), cols as usize - 1);
            assert_eq!(dividers.horizontal().len(), rows as usize - 1);

            for axis in [dividers.vertical(), dividers.horizontal()] {
                let mut prev = 0.0;
                for &d in axis {
                    assert!(d > 0.0 && d < 1.0);
                    assert!(d - prev >= MIN_GAP - 1e-12);
                    prev = d;
                }
                assert!(1.0 - prev >= MIN_GAP - 1e-12);
            }
        }
    }
}

#[test]
fn test_out_of_range_grid_is_clamped() {
    let mut slicer = session(2, 2);
    slicer.resize(0, 50);
    assert_eq!(slicer.dividers().rows(), 1);
    assert_eq!(slicer.dividers().cols(), 20);
    assert_eq!(slicer.frames().len(), 20);
}

// ============================================================================
// Divider dragging
// ============================================================================

#[test]
fn test_drag_is_clamped_between_neighbors() {
    let mut slicer = session(1, 3);
    // Hover, then drag the first divider far past the second
    slicer.pointer_move(Point::new(100.0, 150.0));
    assert_eq!(slicer.hover(), DividerTarget::Vertical(0));
    assert_eq!(slicer.cursor(), CursorHint::ColumnResize);
    slicer.pointer_down(Point::new(100.0, 150.0));
    slicer.pointer_move(Point::new(290.0, 150.0));

    let v = slicer.dividers().vertical().to_vec();
    assert!((v[0] - (v[1] - MIN_GAP)).abs() < 1e-9);

    // And far before zero
    slicer.pointer_move(Point::new(-40.0, 150.0));
    assert!((slicer.dividers().vertical()[0] - MIN_GAP).abs() < 1e-9);

    slicer.pointer_up(Point::new(-40.0, 150.0));
    assert!(slicer.drag_target().is_none());
}

#[test]
fn test_rebuild_carries_attributes_by_cell() {
    let mut slicer = session(2, 2);
    slicer.select([3]);
    slicer.set_active(false);
    slicer.select([1]);
    slicer.adjust_offset(OffsetAxis::Y, 5);

    // Adding a column keeps (0,1) and (1,1); (1,1) is now id 4
    slicer.resize(2, 3);
    let frames = slicer.frames();
    assert_eq!(frames[1].offset_y, 5);
    assert!(!frames[4].active);
    assert!(frames[2].active);
    assert_eq!(frames[2].offset_y, 0);
    assert!(slicer.selected().is_empty());
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_zero_distance_marquee_is_a_click() {
    let mut slicer = session(3, 3);
    drag(&mut slicer, Point::new(150.0, 150.0), Point::new(152.0, 151.0));
    assert_eq!(slicer.selected(), &BTreeSet::from([4]));
}

#[test]
fn test_click_outside_clears_selection() {
    let mut slicer = session(3, 3);
    click(&mut slicer, Point::new(50.0, 50.0));
    assert_eq!(slicer.selected().len(), 1);

    click(&mut slicer, Point::new(350.0, 50.0));
    assert!(slicer.selected().is_empty());
}

#[test]
fn test_marquee_two_columns_any_corner_order() {
    let expected = BTreeSet::from([0, 1, 3, 4, 6, 7]);
    let corners = [
        (Point::new(10.0, 10.0), Point::new(185.0, 290.0)),
        (Point::new(185.0, 290.0), Point::new(10.0, 10.0)),
        (Point::new(10.0, 290.0), Point::new(185.0, 10.0)),
    ];
    for (a, b) in corners {
        let mut slicer = session(3, 3);
        drag(&mut slicer, a, b);
        assert_eq!(slicer.selected(), &expected);
    }
}

#[test]
fn test_leave_cancels_marquee_and_keeps_selection() {
    let mut slicer = session(2, 2);
    click(&mut slicer, Point::new(20.0, 20.0));
    slicer.pointer_down(Point::new(20.0, 20.0));
    slicer.pointer_move(Point::new(280.0, 280.0));
    assert!(slicer.marquee().is_some());

    slicer.pointer_leave();
    assert!(slicer.marquee().is_none());
    assert_eq!(slicer.selected(), &BTreeSet::from([0]));
}

// ============================================================================
// Sequence
// ============================================================================

#[test]
fn test_move_later_then_earlier_restores_order() {
    let mut slicer = session(2, 3);
    let before: Vec<usize> = slicer.frames().iter().map(|f| f.sequence_order).collect();

    slicer.select([2]);
    assert!(slicer.move_in_sequence(Direction::Later));
    assert_eq!(playback_ids(&slicer), vec![0, 1, 3, 2, 4, 5]);
    assert!(slicer.move_in_sequence(Direction::Earlier));

    let after: Vec<usize> = slicer.frames().iter().map(|f| f.sequence_order).collect();
    assert_eq!(before, after);
}

#[test]
fn test_move_needs_single_selection() {
    let mut slicer = session(1, 3);
    slicer.select([0, 1]);
    assert!(!slicer.move_in_sequence(Direction::Later));
    slicer.clear_selection();
    assert!(!slicer.move_in_sequence(Direction::Later));
}

#[test]
fn test_exclude_shrinks_playback_by_selection_size() {
    let mut slicer = session(3, 3);
    drag(&mut slicer, Point::new(10.0, 10.0), Point::new(185.0, 290.0));
    let selected = slicer.selected().len();

    slicer.set_active(false);
    assert_eq!(slicer.playback().len(), 9 - selected);
    assert_eq!(playback_ids(&slicer), vec![2, 5, 8]);

    slicer.set_active(true);
    assert_eq!(slicer.playback().len(), 9);
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn test_four_ticks_return_to_start() {
    let mut slicer = session(2, 2);
    assert_eq!(slicer.fps(), 8);
    for _ in 0..4 {
        slicer.tick_preview();
    }
    assert_eq!(slicer.preview_index(), Some(0));
}

#[test]
fn test_shrinking_sequence_resets_index() {
    let mut slicer = session(2, 2);
    for _ in 0..3 {
        slicer.tick_preview();
    }
    assert_eq!(slicer.preview_index(), Some(3));

    slicer.select([0, 1]);
    slicer.set_active(false);
    assert_eq!(slicer.preview_index(), Some(0));
    assert_eq!(slicer.tick_preview(), Some(1));
}

#[test]
fn test_advance_fires_per_period() {
    let mut slicer = session(1, 4);
    slicer.set_fps(10);
    assert_eq!(slicer.advance_preview(Duration::from_millis(250)), 2);
    assert_eq!(slicer.preview_index(), Some(2));

    slicer.set_playing(false);
    assert_eq!(slicer.advance_preview(Duration::from_secs(1)), 0);
    assert_eq!(slicer.preview_index(), Some(2));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_composed_frames_follow_playback_and_offsets() {
    let mut slicer = session(1, 3);
    slicer.select([2]);
    slicer.move_in_sequence(Direction::Earlier);
    slicer.adjust_offset(OffsetAxis::X, 10);

    let source = slicer.source().unwrap().clone();
    let frames = compose_sequence(&source, &slicer.playback());
    assert_eq!(frames.len(), 3);

    // Playback is 0, 2, 1; frame 2 starts at x=200 and is shifted right by 10
    assert_eq!(frames[0].get_pixel(0, 0)[0], 0);
    assert_eq!(frames[1].get_pixel(0, 0)[3], 0);
    assert_eq!(frames[1].get_pixel(10, 0)[0], 20);
    assert_eq!(frames[2].get_pixel(0, 0)[0], 10);
}
