//! Chessboard Warp Scenario
//!
//! Builds the classic fixture: a chessboard image, a random quadratic flow,
//! and the warped board, then prints a coarse ASCII rendering of the board
//! before and after so the deformation is visible in a terminal.
//!
//! Run: cargo run --example chess_warp_scenario

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use synflow::{build_scenario, peak_magnitude, FlowKind, Image, ImageKind};

/// Render a grayscale image as ASCII, one character per `step`-pixel block.
fn render(image: &Image, step: usize) {
    let (h, w) = image.dim();
    for y in (0..h).step_by(step) {
        let mut line = String::new();
        for x in (0..w).step_by(step) {
            line.push(if image[[y, x]] > 0.5 { '#' } else { '.' });
        }
        println!("  {line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let scenario = build_scenario(
        &ImageKind::chessboard(10, 4),
        &FlowKind::Quadratic { max_magnitude: 6.0 },
        &mut rng,
    )?;

    println!(
        "image {}x{}, flow peak {:.3}",
        scenario.image.dim().0,
        scenario.image.dim().1,
        peak_magnitude(&scenario.flow)
    );
    println!();
    println!("original:");
    render(&scenario.image, 2);
    println!();
    println!("warped:");
    render(&scenario.warped, 2);

    Ok(())
}
