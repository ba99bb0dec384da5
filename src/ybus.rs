use crate::model::Line;

use nalgebra::DMatrix;
use num_complex::Complex64;

/// Builds the bus admittance matrix.
///
/// The dimension is the larger of `nb` and the highest bus number any
/// line references, so a bus without lines keeps an all-zero row and
/// column. Line endpoints are 1-based.
///
/// For each line with series admittance `y` and effective tap `a`, the
/// off-diagonal `Y[f,t]` accumulates `-y/a` and `Y[t,f]` is then set to
/// the accumulated `Y[f,t]`. The `from` diagonal gains `y/a^2 + jB/2`,
/// the `to` diagonal `y + jB/2`.
pub fn make_ybus(lines: &[Line], nb: usize) -> DMatrix<Complex64> {
    let n = lines
        .iter()
        .map(|br| br.from.max(br.to))
        .max()
        .unwrap_or(0)
        .max(nb);

    let mut y_bus = DMatrix::<Complex64>::zeros(n, n);

    for br in lines {
        let (f, t) = (br.from - 1, br.to - 1);
        let y = br.y_series();
        let a = br.ratio();

        y_bus[(f, t)] -= y / a;
        y_bus[(t, f)] = y_bus[(f, t)];
    }

    for br in lines {
        let (f, t) = (br.from - 1, br.to - 1);
        let y = br.y_series();
        let a = br.ratio();
        let ysh = br.y_charging();

        y_bus[(f, f)] += y / (a * a) + ysh;
        y_bus[(t, t)] += y + ysh;
    }

    y_bus
}

/// Polar form of an admittance matrix: magnitudes and angles (radians).
pub fn polar(y_bus: &DMatrix<Complex64>) -> (DMatrix<f64>, DMatrix<f64>) {
    (y_bus.map(|y| y.norm()), y_bus.map(|y| y.arg()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lines() -> Vec<Line> {
        vec![
            Line::new(1, 2, 0.02, 0.035),
            Line::new(1, 3, 0.02, 0.025),
            Line::new(3, 2, 0.0125, 0.025),
        ]
    }

    #[test]
    fn dimension_follows_highest_bus() {
        let y_bus = make_ybus(&lines(), 0);
        assert_eq!(y_bus.shape(), (3, 3));
        assert!(y_bus.iter().all(|y| y.re.is_finite() && y.im.is_finite()));

        let y_bus = make_ybus(&lines(), 5);
        assert_eq!(y_bus.shape(), (5, 5));
        for k in 0..5 {
            assert_eq!(y_bus[(3, k)], Complex64::new(0.0, 0.0));
            assert_eq!(y_bus[(k, 4)], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn untapped_network_is_symmetric() {
        let y_bus = make_ybus(&lines(), 0);
        assert_eq!(y_bus, y_bus.transpose());

        // rows sum to zero without shunts
        for i in 0..3 {
            let sum: Complex64 = y_bus.row(i).iter().sum();
            assert_relative_eq!(sum.norm(), 0.0, epsilon = 1e-9);
        }

        let y12 = Complex64::new(0.02, 0.035).inv();
        assert_relative_eq!(y_bus[(0, 1)].re, -y12.re, epsilon = 1e-12);
        assert_relative_eq!(y_bus[(0, 1)].im, -y12.im, epsilon = 1e-12);
    }

    #[test]
    fn non_positive_tap_means_unity() {
        let base = make_ybus(&lines(), 0);
        for tap in [0.0, -1.0] {
            let tapped: Vec<Line> = lines()
                .into_iter()
                .map(|br| Line { tap, ..br })
                .collect();
            assert_eq!(make_ybus(&tapped, 0), base);
        }
    }

    #[test]
    fn tap_scales_from_side() {
        let br = Line {
            tap: 0.5,
            ..Line::new(1, 2, 0.0, 0.1)
        };
        let y = br.y_series();
        let y_bus = make_ybus(&[br], 0);

        assert_relative_eq!(y_bus[(0, 1)].im, (-y / 0.5).im, epsilon = 1e-12);
        assert_eq!(y_bus[(1, 0)], y_bus[(0, 1)]);
        assert_relative_eq!(y_bus[(0, 0)].im, (y / 0.25).im, epsilon = 1e-12);
        assert_relative_eq!(y_bus[(1, 1)].im, y.im, epsilon = 1e-12);
    }

    #[test]
    fn charging_adds_to_both_diagonals() {
        let br = Line {
            b: 0.03,
            ..Line::new(1, 2, 0.01, 0.1)
        };
        let y = br.y_series();
        let y_bus = make_ybus(&[br], 0);
        assert_relative_eq!(y_bus[(0, 0)].im, y.im + 0.03, epsilon = 1e-12);
        assert_relative_eq!(y_bus[(1, 1)].im, y.im + 0.03, epsilon = 1e-12);
        assert_relative_eq!(y_bus[(0, 1)].im, -y.im, epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_accumulate_in_both_directions() {
        let a = Line::new(1, 2, 0.01, 0.1);
        let b = Line::new(2, 1, 0.02, 0.2);
        let y_bus = make_ybus(&[a.clone(), b.clone()], 0);

        let expected = -(a.y_series() + b.y_series());
        for (i, j) in [(0, 1), (1, 0)] {
            assert_relative_eq!(y_bus[(i, j)].re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(y_bus[(i, j)].im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn polar_form() {
        let y_bus = make_ybus(&lines(), 0);
        let (ym, theta) = polar(&y_bus);
        for (k, y) in y_bus.iter().enumerate() {
            let back = Complex64::from_polar(ym[k], theta[k]);
            assert_relative_eq!(back.re, y.re, epsilon = 1e-9);
            assert_relative_eq!(back.im, y.im, epsilon = 1e-9);
        }
    }
}
