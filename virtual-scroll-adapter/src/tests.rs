use crate::*;

use crate::fenwick::Fenwick;

use std::vec;
use std::vec::Vec;

use virtual_scroll::{
    AutoSizeVirtualScrollStrategy, FixedSizeVirtualScrollStrategy, Range, ScrollStrategyError,
    Viewport, VirtualScrollStrategy,
};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_size(&mut self, min: u64, max_exclusive: u64) -> f64 {
        self.gen_range_u64(min, max_exclusive) as f64
    }
}

fn autosize_controller(sizes: Vec<f64>, viewport_size: f64) -> Controller<AutoSizeVirtualScrollStrategy> {
    let mut c = Controller::new(
        AutoSizeVirtualScrollStrategy::default(),
        ListViewport::new(sizes, viewport_size),
    );
    c.attach();
    c
}

#[test]
fn fenwick_matches_naive_prefix_sums() {
    let mut rng = Lcg::new(7);
    let mut sizes: Vec<f64> = (0..257).map(|_| rng.gen_size(1, 90)).collect();
    let mut f = Fenwick::from_sizes(&sizes);

    for _ in 0..50 {
        let i = rng.gen_range_u64(0, sizes.len() as u64) as usize;
        let new_size = rng.gen_size(1, 90);
        f.add(i, new_size - sizes[i]);
        sizes[i] = new_size;
    }

    let mut sum = 0.0;
    for (i, size) in sizes.iter().enumerate() {
        assert_eq!(f.prefix_sum(i), sum);
        // Every offset inside item `i` resolves to `i`.
        assert_eq!(f.lower_bound(sum), i);
        assert_eq!(f.lower_bound(sum + size - 0.5), i);
        sum += size;
    }
    assert_eq!(f.total(), sum);
    assert_eq!(f.len(), sizes.len());
}

#[test]
fn list_viewport_lookups_use_true_sizes() {
    let v = ListViewport::new(vec![10.0, 30.0, 20.0, 40.0], 35.0);
    assert_eq!(v.index_at_offset(0.0), Some(0));
    assert_eq!(v.index_at_offset(10.0), Some(1));
    assert_eq!(v.index_at_offset(59.0), Some(2));
    assert_eq!(v.index_at_offset(1000.0), Some(3));
    assert_eq!(v.item_start(3), Some(60.0));
    assert_eq!(v.item_start(4), None);
    assert_eq!(v.true_total_size(), 100.0);
    assert_eq!(v.visible_range(), Range::new(0, 2));
    assert_eq!(v.measure_range_size(Range::new(1, 3)), 50.0);

    assert_eq!(ListViewport::new(Vec::new(), 100.0).index_at_offset(0.0), None);
}

#[test]
fn list_viewport_resolves_end_anchored_offsets_on_render() {
    let mut v = ListViewport::new(vec![10.0, 30.0, 20.0, 40.0], 35.0).with_command_log();
    v.set_rendered_range(Range::new(1, 3));
    v.set_rendered_content_offset(60.0, virtual_scroll::ContentOffsetAnchor::ToEnd);
    assert_eq!(v.offset_to_rendered_content_start(), 0.0);

    assert!(v.render());
    assert_eq!(v.offset_to_rendered_content_start(), 10.0);
    assert_eq!(v.rendered_span(), (10.0, 60.0));
    assert!(!v.render());
    assert_eq!(v.commands().len(), 2);
    assert_eq!(v.commands_issued(), 2);

    v.clear_commands();
    assert!(v.commands().is_empty());
    assert_eq!(v.commands_issued(), 2);
}

#[test]
fn list_viewport_clamps_scroll_to_reported_content_size() {
    let mut v = ListViewport::new(vec![50.0; 10], 100.0);
    assert_eq!(v.set_scroll_offset(30.0), 0.0);

    v.set_total_content_size(500.0);
    assert_eq!(v.set_scroll_offset(30.0), 30.0);
    assert_eq!(v.set_scroll_offset(1000.0), 400.0);
    assert_eq!(v.set_scroll_offset(-5.0), 0.0);
    assert_eq!(v.set_scroll_offset(f64::NAN), 0.0);
}

#[test]
fn autosize_uniform_sweep_keeps_viewport_covered() {
    let mut c = autosize_controller(vec![50.0; 2000], 400.0);
    assert!(c.viewport().covers_viewport());
    assert_eq!(c.viewport().total_content_size(), 100_000.0);

    let max = c.viewport().max_scroll_offset();
    assert_eq!(max, 99_600.0);

    while c.scroll_offset() < max {
        c.scroll_by(37.0);
        assert!(
            c.viewport().covers_viewport(),
            "gap at offset {} with span {:?}",
            c.scroll_offset(),
            c.viewport().rendered_span()
        );
    }
    assert_eq!(c.viewport().rendered_range().end, 2000);

    while c.scroll_offset() > 0.0 {
        c.scroll_by(-23.0);
        assert!(
            c.viewport().covers_viewport(),
            "gap at offset {} with span {:?}",
            c.scroll_offset(),
            c.viewport().rendered_span()
        );
    }
    assert_eq!(c.viewport().rendered_range().start, 0);
    assert_eq!(c.viewport().rendered_content_offset(), 0.0);
    assert_eq!(c.strategy().average_item_size(), 50.0);
}

#[test]
fn autosize_jump_renders_around_target() {
    let mut c = autosize_controller(vec![50.0; 2000], 400.0);
    c.scroll_to(50_000.0);

    let range = c.viewport().rendered_range();
    assert!(range.contains(1000));
    assert!(range.contains(1007));
    assert!(c.viewport().covers_viewport());
}

#[test]
fn autosize_varied_sizes_stay_in_bounds() {
    let mut rng = Lcg::new(42);
    let sizes: Vec<f64> = (0..500).map(|_| rng.gen_size(20, 120)).collect();
    let (min, max) = sizes
        .iter()
        .fold((f64::INFINITY, 0.0f64), |(lo, hi), s| (lo.min(*s), hi.max(*s)));
    let mut c = autosize_controller(sizes, 300.0);

    for step in 0..600 {
        let delta = if step % 5 == 4 {
            -(rng.gen_range_u64(0, 900) as f64)
        } else {
            rng.gen_range_u64(0, 400) as f64
        };
        c.scroll_by(delta);

        let range = c.viewport().rendered_range();
        assert!(range.start <= range.end);
        assert!(range.end <= 500);
        assert!(!range.is_empty());

        let avg = c.strategy().average_item_size();
        assert!(
            avg >= min - 1e-9 && avg <= max + 1e-9,
            "average {avg} outside [{min}, {max}]"
        );
        assert!(c.viewport().total_content_size() > 0.0);
    }
}

#[test]
fn autosize_learns_from_resized_items() {
    let mut c = autosize_controller(vec![50.0; 100], 400.0);
    assert_eq!(c.strategy().averager().total_weight(), 12);

    c.resize_item(0, 250.0);
    let avg = c.strategy().average_item_size();
    assert!(avg > 50.0);
    assert_eq!(c.strategy().averager().total_weight(), 24);
    assert_eq!(c.viewport().total_content_size(), 800.0 + 88.0 * avg);
}

#[test]
fn autosize_scroll_to_index_is_unsupported() {
    let mut c = autosize_controller(vec![50.0; 100], 400.0);
    c.scroll_to(300.0);
    let commands = c.viewport().commands_issued();

    let err = c.scroll_to_index(50).unwrap_err();
    assert!(matches!(err, ScrollStrategyError::Unsupported { .. }));
    assert_eq!(c.scroll_offset(), 300.0);
    assert_eq!(c.viewport().commands_issued(), commands);
    assert!(c.scrolled_index_change().is_err());
}

#[test]
fn autosize_data_shrink_reclamps_scroll() {
    let mut c = autosize_controller(vec![50.0; 2000], 400.0);
    c.scroll_to(50_000.0);

    c.set_data(vec![50.0; 100]);
    assert_eq!(c.viewport().total_content_size(), 5000.0);
    assert_eq!(c.scroll_offset(), 4600.0);
    assert_eq!(c.viewport().rendered_range(), Range::new(88, 100));
    assert!(c.viewport().covers_viewport());
}

#[test]
fn autosize_viewport_resize_rerenders() {
    let mut c = autosize_controller(vec![50.0; 200], 400.0);
    assert_eq!(c.viewport().rendered_range(), Range::new(0, 12));

    c.set_viewport_size(800.0);
    assert_eq!(c.viewport().rendered_range(), Range::new(0, 20));
    assert!(c.viewport().covers_viewport());
}

#[test]
fn detached_controller_ignores_events() {
    let mut c = autosize_controller(vec![50.0; 200], 400.0);
    c.detach();
    let commands = c.viewport().commands_issued();
    let range = c.viewport().rendered_range();

    c.scroll_to(2000.0);
    c.set_data(vec![50.0; 300]);
    assert_eq!(c.viewport().commands_issued(), commands);
    assert_eq!(c.viewport().rendered_range(), range);
    assert!(!c.strategy().is_attached());
}

#[test]
fn fixed_controller_scrolls_to_index() {
    let mut c = Controller::new(
        FixedSizeVirtualScrollStrategy::default(),
        ListViewport::new(vec![20.0; 2000], 400.0),
    );
    c.attach();
    assert_eq!(c.viewport().total_content_size(), 40_000.0);
    assert_eq!(c.viewport().rendered_range(), Range::new(0, 30));
    assert_eq!(c.scrolled_index_change(), Ok(Some(0)));

    assert_eq!(c.scroll_to_index(100), Ok(2000.0));
    assert_eq!(c.viewport().rendered_range(), Range::new(95, 130));
    assert!(c.viewport().covers_viewport());
    assert_eq!(c.scrolled_index_change(), Ok(Some(100)));
    assert_eq!(c.scrolled_index_change(), Ok(None));

    // Past the end, the scroll clamps to the last page.
    assert_eq!(c.scroll_to_index(5000), Ok(39_600.0));
    assert_eq!(c.viewport().rendered_range().end, 2000);
    assert!(c.viewport().covers_viewport());
}

#[test]
fn fixed_controller_matches_true_visible_range() {
    let mut c = Controller::new(
        FixedSizeVirtualScrollStrategy::default(),
        ListViewport::new(vec![20.0; 500], 400.0),
    );
    c.attach();

    let mut rng = Lcg::new(3);
    for _ in 0..200 {
        let target = rng.gen_range_u64(0, 9600) as f64;
        c.scroll_to(target);
        let visible = c.viewport().visible_range();
        let rendered = c.viewport().rendered_range();
        assert!(rendered.start <= visible.start && visible.end <= rendered.end);
    }
}

#[test]
fn long_scroll_session_keeps_no_command_history() {
    let mut c = autosize_controller(vec![50.0; 100_000], 400.0);
    for _ in 0..20_000 {
        c.scroll_by(37.0);
    }
    assert!(c.viewport().commands().is_empty());
    assert!(c.viewport().commands_issued() > 10_000);
    assert!(!c.viewport().needs_render());
    assert!(c.viewport().covers_viewport());
}

#[test]
fn render_pass_runs_only_after_layout_commands() {
    let mut v = ListViewport::new(vec![20.0; 100], 100.0);
    assert!(!v.needs_render());

    v.set_total_content_size(2000.0);
    assert!(v.needs_render());
    assert!(!v.render());
    assert!(!v.needs_render());

    // Scrolling alone leaves the layout as it was.
    v.scroll_to_offset(300.0);
    assert!(!v.needs_render());
    assert_eq!(v.scroll_offset(), 300.0);
    assert!(v.commands().is_empty());
    assert_eq!(v.commands_issued(), 2);
}

#[cfg(feature = "serde")]
#[test]
fn viewport_commands_serialize() {
    let command = ViewportCommand::SetRenderedContentOffset {
        offset: 12.0,
        anchor: virtual_scroll::ContentOffsetAnchor::ToEnd,
    };
    let json = serde_json::to_string(&command).unwrap();
    assert!(json.contains("to-end"));
    let back: ViewportCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(back, command);
}
