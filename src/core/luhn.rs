//! Luhn checksum.
//!
//! Walking right to left over the payload (the digits before the check
//! digit), every digit at an even offset is doubled and reduced by 9 when
//! the result reaches 10. The check digit brings the sum up to the next
//! multiple of ten.
//!
//! ```
//! use rust_pan::core::luhn;
//!
//! // 7992739871 -> 3
//! assert_eq!(luhn::compute_check_digit(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1]), 3);
//! assert!(luhn::is_valid(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 3]));
//! ```

/// Doubled digit with the two decimal digits summed.
#[inline]
fn double(digit: u8) -> u32 {
    let doubled = u32::from(digit) * 2;
    if doubled >= 10 {
        doubled - 9
    } else {
        doubled
    }
}

/// Weighted sum of a payload, doubling even offsets from the right.
fn payload_sum(payload: &[u8]) -> u32 {
    payload
        .iter()
        .rev()
        .enumerate()
        .map(|(offset, &d)| if offset % 2 == 0 { double(d) } else { u32::from(d) })
        .sum()
}

/// Check digit for a payload that excludes the check digit itself.
///
/// Digits must already be in `0..=9`. An empty payload yields 0.
#[must_use]
pub fn compute_check_digit(payload: &[u8]) -> u8 {
    ((10 - payload_sum(payload) % 10) % 10) as u8
}

/// Luhn-weighted sum of a full number, check digit included.
///
/// The check digit sits at offset 0 and is never doubled.
#[must_use]
pub fn luhn_sum(number: &[u8]) -> u32 {
    match number.split_last() {
        Some((&check, payload)) => payload_sum(payload) + u32::from(check),
        None => 0,
    }
}

/// Does the trailing digit match the Luhn check digit of the rest?
#[must_use]
pub fn is_valid(number: &[u8]) -> bool {
    !number.is_empty() && luhn_sum(number) % 10 == 0
}
