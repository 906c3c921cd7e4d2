//! Primality and prime factorisation for asteroid numbers.
//!
//! Both routines use plain trial division.  Asteroid numbers stay small
//! (the spawn range tops out in the tens), so nothing fancier is warranted.

/// Returns `true` when `n` is prime.
///
/// Trial division up to `√n`, skipping even divisors after 2.  Every value
/// below 2 is non-prime.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Prime factors of `n` with multiplicity, in ascending order.
///
/// `factorize(12) == [2, 2, 3]`; a prime returns itself as the only factor.
/// The product of the result always equals `n`.
///
/// `n` must be at least 2.
pub fn factorize(n: u64) -> Vec<u64> {
    debug_assert!(n >= 2, "factorize called with {n}; asteroid numbers are >= 2");

    let mut factors = Vec::new();
    let mut rest = n;

    while rest % 2 == 0 && rest > 0 {
        factors.push(2);
        rest /= 2;
    }

    let mut i = 3;
    while i * i <= rest {
        while rest % i == 0 {
            factors.push(i);
            rest /= i;
        }
        i += 2;
    }

    // Whatever survives trial division up to its own square root is prime.
    if rest > 2 {
        factors.push(rest);
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Naive reference: a divisor search over the full range.
    fn ground_truth_is_prime(n: u64) -> bool {
        n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn values_below_two_are_not_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
    }

    #[test]
    fn two_and_three_are_prime() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
    }

    #[test]
    fn is_prime_matches_sieve_up_to_one_million() {
        const LIMIT: usize = 1_000_000;
        let mut sieve = vec![true; LIMIT + 1];
        sieve[0] = false;
        sieve[1] = false;
        let mut i = 2;
        while i * i <= LIMIT {
            if sieve[i] {
                let mut j = i * i;
                while j <= LIMIT {
                    sieve[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        for (n, &expected) in sieve.iter().enumerate() {
            assert_eq!(is_prime(n as u64), expected, "disagreement at n={n}");
        }
    }

    #[test]
    fn is_prime_matches_trial_division_for_small_values() {
        for n in 0..2_000 {
            assert_eq!(is_prime(n), ground_truth_is_prime(n), "n={n}");
        }
    }

    #[test]
    fn factorize_twelve() {
        assert_eq!(factorize(12), vec![2, 2, 3]);
    }

    #[test]
    fn factorize_prime_returns_itself() {
        for p in [2_u64, 3, 5, 7, 11, 13, 47, 7919] {
            assert_eq!(factorize(p), vec![p]);
        }
    }

    #[test]
    fn factor_product_equals_input_and_all_factors_prime() {
        for n in 2..20_000_u64 {
            let factors = factorize(n);
            assert!(!factors.is_empty(), "n={n} produced no factors");
            assert_eq!(factors.iter().product::<u64>(), n, "n={n}");
            assert!(
                factors.iter().all(|&f| is_prime(f)),
                "n={n} produced non-prime factor in {factors:?}"
            );
            assert!(
                factors.windows(2).all(|w| w[0] <= w[1]),
                "n={n} factors not ascending: {factors:?}"
            );
        }
    }

    #[test]
    fn factorize_large_semiprime() {
        assert_eq!(factorize(999_983 * 1_000_003), vec![999_983, 1_000_003]);
    }
}
