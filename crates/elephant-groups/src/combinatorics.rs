//! Binomial coefficients.
//!
//! [`binomial`] is a *total* function: it is probed across ranges that
//! include invalid edges, so invalid inputs yield `0` instead of an error.
//!
//! | Input                         | Result        |
//! |-------------------------------|---------------|
//! | `n < 0` or `k < 0`            | `0`           |
//! | `k > n`                       | `0`           |
//! | `k == 0` or `k == n`          | `1`           |
//! | `k == 1` or `k == n - 1`      | `n`           |
//! | value does not fit in `u128`  | `u128::MAX`   |
//!
//! The general case uses the multiplicative formula in exact integer
//! arithmetic, so there is no floating-point drift to round away.

/// Binomial coefficient `C(n, k)`.
///
/// Saturates at `u128::MAX` when the exact value overflows. A saturated value
/// still compares greater than or equal to any count this crate checks it
/// against, so coverage scans stay correct.
///
/// # Example
///
/// ```
/// use elephant_groups::combinatorics::binomial;
///
/// assert_eq!(binomial(4, 2), 6);
/// assert_eq!(binomial(3, 5), 0);
/// assert_eq!(binomial(-1, 0), 0);
/// ```
pub fn binomial(n: i64, k: i64) -> u128 {
    if n < 0 || k < 0 {
        return 0;
    }
    if k == 0 || k == n {
        return 1;
    }
    if k == 1 || k == n - 1 {
        return n as u128;
    }
    if k > n {
        return 0;
    }

    let n = n as u128;
    let k = k as u128;
    let steps = k.min(n - k);

    let mut acc: u128 = 1;
    for i in 0..steps {
        // acc * (n - i) is always divisible by (i + 1). Cancel the common
        // factor with acc first so the remaining divisor divides (n - i).
        let numer = n - i;
        let denom = i + 1;
        let g = gcd(acc, denom);
        let factor = numer / (denom / g);
        acc = match (acc / g).checked_mul(factor) {
            Some(v) => v,
            None => return u128::MAX,
        };
    }
    acc
}

/// Binomial coefficient over floating-point inputs.
///
/// Host payloads may carry arbitrary numbers. Non-finite or fractional inputs
/// are not integers and yield `0`; integral inputs delegate to [`binomial`].
pub fn binomial_f64(n: f64, k: f64) -> u128 {
    if !is_integral(n) || !is_integral(k) {
        return 0;
    }
    binomial(n as i64, k as i64)
}

/// Central binomial coefficient `C(n, floor(n / 2))`, the largest entry in
/// row `n` of Pascal's triangle.
#[inline]
pub fn central_binomial(n: u32) -> u128 {
    binomial(i64::from(n), i64::from(n / 2))
}

#[inline]
fn is_integral(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
