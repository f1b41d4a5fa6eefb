use std::time::Duration;

use owo_colors::OwoColorize;

use tintty::{color::theme, logging, App, AtomicState, BuilderSnapshot, BuilderState, TinttyResult};

/// Event polling rate for the builder loop.
const TICK_RATE: Duration = Duration::from_millis(50);

fn main() -> TinttyResult<()> {
    logging::init();

    let snapshot = smol::block_on(run())?;

    // the alternate screen is gone; leave the last build on the shell
    let (gr, gg, gb) = theme::accent::GREEN.rgb_components();
    let (sr, sg, sb) = theme::text::SECONDARY.rgb_components();

    println!();
    println!("{}", "gradient".truecolor(sr, sg, sb));
    println!("  {}", snapshot.gradient_css().truecolor(gr, gg, gb));
    println!();
    println!("{}", "css rule".truecolor(sr, sg, sb));
    for line in snapshot.full_css().lines() {
        println!("  {}", line);
    }
    println!();

    Ok(())
}

async fn run() -> TinttyResult<BuilderSnapshot> {
    let mut app = App::new(BuilderState::new(3), TICK_RATE)?;
    app.run().await?;
    Ok(app.state().snapshot())
}
