//! Prime factorization for command replies

/// Prime factors of `n` in non-decreasing order
///
/// Trial division up to sqrt(n) with the remainder appended when it
/// exceeds 1. Returns an empty sequence for `n <= 1`. The loop bound is
/// written as `d <= rem / d` so a near-`i64::MAX` prime cannot push
/// `d * d` past the type's range.
pub fn factorize(n: i64) -> Vec<i64> {
    let mut factors = Vec::new();
    if n <= 1 {
        return factors;
    }

    let mut rem = n;
    let mut d = 2;
    while d <= rem / d {
        if rem % d == 0 {
            factors.push(d);
            rem /= d;
        } else {
            d += 1;
        }
    }
    if rem > 1 {
        factors.push(rem);
    }
    factors
}
