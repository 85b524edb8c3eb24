use oorandom;

fn mul_mod(lhs: u64, rhs: u64, modulus: u64) -> u64 {
    ((lhs as u128 * rhs as u128) % modulus as u128) as u64
}

pub(crate) fn pow_mod(mut base: u64, mut exponent: u64, modulus: u64) -> u64 {
    let mut result = 1 % modulus;
    base %= modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exponent >>= 1;
    }
    return result;
}

///
/// Miller-Rabin primality test.
///
/// If n is a prime, this returns true.
/// If n is not a prime, this returns false with probability greater or
/// equal than 1 - 4^(-k).
///
/// # Randomness
///
/// Note that the randomness used for this function is derived only from
/// the input, hence it will always yield the same output on the same input.
///
pub fn is_prime(n: u64, k: usize) -> bool {
    if n < 2 {
        return false;
    } else if n < 4 {
        return true;
    } else if n % 2 == 0 {
        return false;
    }

    let mut rng = oorandom::Rand64::new(n as u128);
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    for _i in 0..k {
        let a = rng.rand_range(2..(n - 1));
        let mut current = pow_mod(a, d, n);
        let mut miller_rabin_condition = current == 1;
        for _r in 0..s {
            miller_rabin_condition |= current == n - 1;
            if miller_rabin_condition {
                break;
            }
            current = mul_mod(current, current, n);
        }
        if !miller_rabin_condition {
            return false;
        }
    }
    return true;
}

#[test]
pub fn test_is_prime() {
    assert!(is_prime(2, 5));
    assert!(is_prime(3, 5));
    assert!(is_prime(5, 5));
    assert!(is_prime(7, 5));
    assert!(is_prime(11, 5));
    assert!(is_prime(22531, 5));
    assert!(is_prime(417581, 5));
    assert!(is_prime(68719476767, 5));
    assert!(is_prime(18446744073709551557, 10));

    assert!(!is_prime(0, 5));
    assert!(!is_prime(1, 5));
    assert!(!is_prime(4, 5));
    assert!(!is_prime(6, 5));
    assert!(!is_prime(8, 5));
    assert!(!is_prime(9, 5));
    assert!(!is_prime(10, 5));
    assert!(!is_prime(22532, 5));
    assert!(!is_prime(347584, 5));
    assert!(!is_prime(561, 10));
}

#[test]
fn test_pow_mod() {
    assert_eq!(1, pow_mod(3, 0, 7));
    assert_eq!(2, pow_mod(3, 2, 7));
    assert_eq!(0, pow_mod(5, 3, 1));
}
