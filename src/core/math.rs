//! Elementary number theory on machine integers.
//!
//! Results are `u64`. Inputs whose result would not fit are rejected up front
//! instead of wrapping.

use crate::utils::error::{Result, UtilError};
use crate::utils::validation::validate_safe_magnitude;

/// Largest `n` with `n!` representable in `u64`.
pub const MAX_FACTORIAL_INPUT: i64 = 20;

/// Largest `n` with `F(n)` representable in `u64`.
pub const MAX_FIBONACCI_INDEX: i64 = 93;

const TOO_LARGE_FOR_INTEGERS: &str = "Input too large for reliable integer calculation";

pub fn factorial(n: i64) -> Result<u64> {
    if n < 0 {
        return Err(UtilError::negative_input(
            "Factorial is not defined for negative numbers",
        ));
    }
    if n > MAX_FACTORIAL_INPUT {
        return Err(UtilError::overflow("Input too large, may cause overflow"));
    }

    Ok((1..=n as u64).product())
}

/// `F(0) = 0`, `F(1) = 1`, computed iteratively.
pub fn fibonacci(n: i64) -> Result<u64> {
    if n < 0 {
        return Err(UtilError::negative_input(
            "Fibonacci is not defined for negative indices",
        ));
    }
    if n > MAX_FIBONACCI_INDEX {
        return Err(UtilError::overflow(
            "Index too large, may cause performance issues or overflow",
        ));
    }

    let (mut current, mut next) = (0u64, 1u64);
    for _ in 0..n {
        // F(94) would overflow `next` on the final step of n = 93.
        let following = current.wrapping_add(next);
        current = next;
        next = following;
    }
    Ok(current)
}

/// Greatest common divisor of `|a|` and `|b|`; `gcd(0, 0) = 0`.
pub fn gcd(a: i64, b: i64) -> Result<u64> {
    validate_safe_magnitude(a, TOO_LARGE_FOR_INTEGERS)?;
    validate_safe_magnitude(b, TOO_LARGE_FOR_INTEGERS)?;

    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Ok(a)
}

/// Trial division by 2, 3 and then 6k ± 1 up to the square root.
pub fn is_prime(n: i64) -> Result<bool> {
    if n < 0 {
        return Err(UtilError::negative_input(
            "Prime check is not defined for negative numbers",
        ));
    }
    validate_safe_magnitude(n, TOO_LARGE_FOR_INTEGERS)?;

    let n = n as u64;
    if n < 2 {
        return Ok(false);
    }
    if n < 4 {
        return Ok(true);
    }
    if n % 2 == 0 || n % 3 == 0 {
        return Ok(false);
    }

    let mut divisor = 5u64;
    while divisor * divisor <= n {
        if n % divisor == 0 || n % (divisor + 2) == 0 {
            return Ok(false);
        }
        divisor += 6;
    }
    Ok(true)
}
