use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

const MAX_ITERATIONS: usize = 500;
const EPSILON: f64 = 1e-15;
const TINY: f64 = 1e-300;

/// Survival function of the chi-squared distribution, i.e. the p-value of a chi-squared
/// statistic with `df` degrees of freedom.
///
/// Returns NaN when `df` is zero or the statistic is not a number.
pub fn chi2_survival(statistic: f64, df: usize) -> f64 {
    if df == 0 || statistic.is_nan() {
        return ::std::f64::NAN;
    }
    if statistic <= 0. {
        return 1.;
    }
    regularized_upper_gamma(df as f64 / 2., statistic / 2.)
}

/// Regularized upper incomplete gamma function Q(a, x)
pub fn regularized_upper_gamma(a: f64, x: f64) -> f64 {
    if x <= 0. {
        return 1.;
    }
    if x < a + 1. {
        (1. - lower_gamma_series(a, x)).max(0.)
    } else {
        upper_gamma_continued_fraction(a, x).min(1.)
    }
}

/// Natural logarithm of the gamma function (Lanczos approximation)
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula
        return (PI / (PI * x).sin()).ln() - ln_gamma(1. - x);
    }
    let x = x - 1.;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, c)| acc + c / (x + i as f64));
    0.5 * (2. * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

// P(a, x) by series expansion, converges quickly for x < a + 1
fn lower_gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut term = 1. / a;
    let mut sum = term;
    for _ in 0..MAX_ITERATIONS {
        ap += 1.;
        term *= x / ap;
        sum += term;
        if term.abs() < sum.abs() * EPSILON {
            break;
        }
    }
    sum * (-x + a * x.ln() - ln_gamma(a)).exp()
}

// Q(a, x) by continued fraction (modified Lentz), converges quickly for x >= a + 1
fn upper_gamma_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1. - a;
    let mut c = 1. / TINY;
    let mut d = 1. / b;
    let mut h = d;
    for i in 1..MAX_ITERATIONS {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1. / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.).abs() < EPSILON {
            break;
        }
    }
    (-x + a * x.ln() - ln_gamma(a)).exp() * h
}
