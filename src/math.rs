use num::Float;

/// Similar to numpy.interp for a single point: linear interpolation between
/// ordered `(x, y)` breakpoints, flat beyond both ends.
pub(crate) fn interp_at<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            // Vertical edge: take the side we've reached
            if x2 == x1 {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    y_last
}

#[test]
fn test_interp() {
    fn interp(x_input: &[f64], coords: &[(f64, f64)]) -> Vec<f64> {
        x_input.iter().map(|&x| interp_at(x, coords)).collect()
    }

    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(&x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(&x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_degenerate() {
    let empty: [(f64, f64); 0] = [];

    assert_eq!(interp_at(1., &empty), 0.);
    assert_eq!(interp_at(5., &[(2., 0.7)]), 0.7);
}
