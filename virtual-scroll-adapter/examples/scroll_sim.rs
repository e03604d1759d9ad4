use virtual_scroll::{AutoSizeConfig, FixedSizeConfig, Viewport};
use virtual_scroll_adapter::{Controller, ListViewport};

fn main() {
    // Items between 30 and 90 px, generated deterministically.
    let mut seed = 0x5eed_u64;
    let sizes: Vec<f64> = (0..1000)
        .map(|_| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            30.0 + (seed >> 33) as f64 % 61.0
        })
        .collect();
    let true_total: f64 = sizes.iter().sum();

    let mut config = AutoSizeConfig::default();
    config.set_min_buffer_px_input(" 150 ");
    config.set_max_buffer_px_input("300");
    let strategy = match config.build() {
        Ok(strategy) => strategy,
        Err(err) => {
            eprintln!("invalid config: {err}");
            return;
        }
    };

    let mut c = Controller::new(strategy, ListViewport::new(sizes, 500.0));
    c.attach();
    println!(
        "attached: range={:?} estimated_total={:.0} true_total={true_total:.0}",
        c.viewport().rendered_range(),
        c.viewport().total_content_size()
    );

    // Scroll down in small wheel steps, then back up.
    for step in 0..40 {
        c.scroll_by(120.0);
        if step % 10 == 9 {
            report(&c);
        }
    }
    for step in 0..40 {
        c.scroll_by(-120.0);
        if step % 10 == 9 {
            report(&c);
        }
    }

    // A long jump (e.g. dragging the scrollbar) re-renders around the estimated position.
    c.scroll_to(c.viewport().max_scroll_offset() / 2.0);
    report(&c);

    if let Err(err) = c.scroll_to_index(10) {
        println!("scroll_to_index: {err}");
    }

    // The fixed-size strategy knows exact offsets, so it can jump to an index.
    let fixed = match FixedSizeConfig::default().with_item_size(40.0).build() {
        Ok(strategy) => strategy,
        Err(err) => {
            eprintln!("invalid config: {err}");
            return;
        }
    };
    let mut f = Controller::new(fixed, ListViewport::new(vec![40.0; 1000], 500.0));
    f.attach();
    match f.scroll_to_index(250) {
        Ok(offset) => {
            let range = f.viewport().rendered_range();
            let first_visible = f.scrolled_index_change();
            println!(
                "fixed: scroll_to_index(250) -> offset={offset} range={range:?} first_visible={first_visible:?}"
            );
        }
        Err(err) => println!("fixed: {err}"),
    }
}

fn report<S: virtual_scroll::VirtualScrollStrategy>(c: &Controller<S>) {
    let v = c.viewport();
    println!(
        "offset={:>7.0} range={:?} span={:?} covered={} estimated_total={:.0}",
        c.scroll_offset(),
        v.rendered_range(),
        v.rendered_span(),
        v.covers_viewport(),
        v.total_content_size()
    );
}
