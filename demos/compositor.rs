//! Computes per-window visible regions for a small stacked desktop and
//! prints the paint/skip decision the painting layer would make.

use regio::{ClipContext, Rect, RectPool, clip};

fn setup_logging() {
    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let mut pool = RectPool::with_capacity(64)?;

    // Back-to-front: the terminal sits under the editor, which sits under a
    // small dialog.
    let windows = [
        ("terminal", Rect::new(0, 0, 640, 480)),
        ("editor", Rect::new(200, 120, 840, 600)),
        ("dialog", Rect::new(500, 300, 700, 450)),
    ];

    for (i, (name, rect)) in windows.iter().enumerate() {
        let above: Vec<Rect> = windows[i + 1..].iter().map(|(_, r)| *r).collect();
        let visible = clip::visible_region(&mut pool, *rect, &above)?;
        println!(
            "{name}: {} of {} px visible across {} rect(s)",
            visible.area(&pool)?,
            rect.area(),
            visible.rect_count(),
        );

        let mut ctx = ClipContext::new(&pool);
        let mut old = ctx.select_region(&mut pool, visible)?;
        old.clear(&mut pool)?;

        // A widget row the window would like to paint.
        for tile_x in (rect.left..rect.right).step_by(160) {
            let tile = Rect::new(tile_x, rect.top, tile_x + 160, rect.top + 40);
            let decision = if ctx.is_rect_visible(&pool, &tile) { "paint" } else { "skip" };
            println!("  tile {:4},{:4}: {decision}", tile.left, tile.top);
        }

        let empty = regio::Region::new(&pool);
        let mut spent = ctx.select_region(&mut pool, empty)?;
        spent.clear(&mut pool)?;
    }

    println!("pool: {} live / {} capacity", pool.live_count(), pool.capacity());
    Ok(())
}
