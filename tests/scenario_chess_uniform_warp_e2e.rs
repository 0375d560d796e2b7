use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use synflow::{build_scenario, FlowKind, ImageKind};

// The reference fixture from the original toolkit: a 40x40 chessboard pushed
// 5 pixels to the right by a constant flow. Every piece of the triple is
// checkable by hand.
#[test]
fn chess_board_translated_by_constant_flow() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let scenario = build_scenario(
        &ImageKind::chessboard(10, 4),
        &FlowKind::Uniform {
            direction: Complex64::new(1.0, 0.0),
            max_magnitude: 5.0,
        },
        &mut rng,
    )
    .unwrap();

    assert_eq!(scenario.image.dim(), (40, 40));
    assert_eq!(scenario.warped.dim(), (40, 40));
    assert_eq!(scenario.flow.dim(), (40, 40));

    // The flow is exactly 5 + 0i everywhere.
    for &v in scenario.flow.iter() {
        assert_eq!(v, Complex64::new(5.0, 0.0));
    }

    // The warp consumed displacement (-5, 0): content moves right by 5 and
    // the left border replicates column 0.
    for y in 0..40 {
        for x in 5..40 {
            assert_eq!(scenario.warped[[y, x]], scenario.image[[y, x - 5]]);
        }
        for x in 0..5 {
            assert_eq!(scenario.warped[[y, x]], scenario.image[[y, 0]]);
        }
    }
}

#[test]
fn vertical_flow_moves_rows_not_columns() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let scenario = build_scenario(
        &ImageKind::chessboard(10, 4),
        &FlowKind::Uniform {
            direction: Complex64::new(0.0, 1.0),
            max_magnitude: 10.0,
        },
        &mut rng,
    )
    .unwrap();

    // One full tile of vertical shift: interior rows read 10 rows up.
    for y in 10..40 {
        for x in 0..40 {
            assert_eq!(scenario.warped[[y, x]], scenario.image[[y - 10, x]]);
        }
    }
}
