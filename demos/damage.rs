//! Accumulates damage rects into one region and walks the coalesced result,
//! the way a compositor batches repaint work between frames.

use regio::{Rect, RectPool, Region};

fn setup_logging() {
    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let mut pool = RectPool::with_capacity(32)?;
    let mut damage = Region::new(&pool);

    // A cursor trail, a blinking caret, and a progress bar that advances in
    // adjacent slices. The slices coalesce into a single rect.
    let frame_damage = [
        Rect::new(100, 100, 132, 132),
        Rect::new(110, 108, 142, 140),
        Rect::new(300, 40, 302, 56),
        Rect::new(20, 400, 120, 420),
        Rect::new(120, 400, 220, 420),
        Rect::new(220, 400, 320, 420),
    ];
    for rect in frame_damage {
        damage.add_rect(&mut pool, rect)?;
    }

    println!(
        "damage: {} px in {} rect(s), bounds {:?}",
        damage.area(&pool)?,
        damage.rect_count(),
        damage.bounds(),
    );
    for rect in damage.rects(&pool)? {
        println!("  repaint {rect:?}");
    }

    // The screen area already repainted this frame no longer needs work.
    damage.subtract_rect(&mut pool, Rect::new(0, 390, 640, 480))?;
    println!("after partial repaint: {} px left", damage.area(&pool)?);

    damage.clear(&mut pool)?;
    Ok(())
}
