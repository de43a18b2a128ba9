// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2025 KUSD Developers. All rights reserved.
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Independent reference implementation of the rate accumulator math.
//!
//! Used only to cross-check [`crate::rpow::rpow`] and the rate projections built on it. It works
//! on unsigned words with a 512-bit working width, walks the exponent bits low to high, and
//! takes the base unit as a parameter, so it shares no code path with the production routine.
//! Every function returns `None` where the contracts would revert.

use alloy_primitives::{U256, aliases::U512};

use crate::consts::RAY_U256;

fn narrow(value: U512) -> Option<U256> {
    U256::checked_from_limbs_slice(value.as_limbs())
}

/// Returns `x^n` at fixed-point `base`, rounding every product to nearest.
#[must_use]
pub fn rpow(x: U256, n: u64, base: U256) -> Option<U256> {
    if base.is_zero() {
        return None;
    }
    if x.is_zero() {
        return Some(if n == 0 { base } else { U256::ZERO });
    }

    let unit = U512::from(base);
    let half = unit / U512::from(2u8);
    let mut acc = unit;
    let mut square = U512::from(x);
    let mut bits = n;

    while bits != 0 {
        if bits & 1 == 1 {
            acc = (acc * square + half) / unit;
        }
        bits >>= 1;
        if bits != 0 {
            square = (square * square + half) / unit;
            narrow(square)?;
        }
        narrow(acc)?;
    }

    narrow(acc)
}

/// Returns `x * y / RAY`, truncated, or `None` if `x * y` exceeds 256 bits.
#[must_use]
pub fn rmul(x: U256, y: U256) -> Option<U256> {
    safe_mul(x, y).map(|z| z / RAY_U256)
}

/// Returns `x + y`, or `None` on overflow.
#[must_use]
pub fn safe_add(x: U256, y: U256) -> Option<U256> {
    let z = x.wrapping_add(y);
    (z >= x).then_some(z)
}

/// Returns `x - y`, or `None` on underflow.
#[must_use]
pub fn safe_sub(x: U256, y: U256) -> Option<U256> {
    let z = x.wrapping_sub(y);
    (z <= x).then_some(z)
}

/// Returns `x * y`, or `None` on overflow.
#[must_use]
pub fn safe_mul(x: U256, y: U256) -> Option<U256> {
    if y.is_zero() {
        return Some(U256::ZERO);
    }
    let z = x.wrapping_mul(y);
    (z / y == x).then_some(z)
}

/// Returns the stability-fee accumulator after `elapsed` seconds (`drip`).
#[must_use]
pub fn accumulated_rate(duty: U256, base: U256, elapsed: u64, prev_rate: U256) -> Option<U256> {
    let per_second = safe_add(base, duty)?;
    rmul(rpow(per_second, elapsed, RAY_U256)?, prev_rate)
}

/// Returns the savings accumulator after `elapsed` seconds (`drip`).
#[must_use]
pub fn chi(dsr: U256, elapsed: u64, prev_chi: U256) -> Option<U256> {
    rmul(rpow(dsr, elapsed, RAY_U256)?, prev_chi)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use alloy_primitives::I256;
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{consts::SECONDS_PER_YEAR, fixed::Ray};

    fn word(value: &str) -> U256 {
        value.parse().unwrap()
    }

    fn primary(x: U256, n: u64) -> U256 {
        crate::rpow::rpow(Ray::from_raw(I256::from_raw(x)), n)
            .unwrap()
            .raw()
            .into_raw()
    }

    #[rstest]
    fn test_reference_edge_cases() {
        assert_eq!(rpow(U256::ZERO, 0, RAY_U256), Some(RAY_U256));
        assert_eq!(rpow(U256::ZERO, 5, RAY_U256), Some(U256::ZERO));
        let duty = word("1000000000627937192491029810");
        assert_eq!(rpow(duty, 1, RAY_U256), Some(duty));
        assert_eq!(rpow(RAY_U256, 0, U256::ZERO), None);
    }

    #[rstest]
    fn test_reference_other_base() {
        // 1.5^2 at WAD scale
        let wad = word("1000000000000000000");
        assert_eq!(
            rpow(word("1500000000000000000"), 2, wad),
            Some(word("2250000000000000000"))
        );
    }

    #[rstest]
    fn test_reference_two_percent_year() {
        assert_eq!(
            rpow(word("1000000000627937192491029810"), SECONDS_PER_YEAR, RAY_U256),
            Some(word("1019999999999999999972831879"))
        );
    }

    #[rstest]
    fn test_unsigned_guards() {
        assert_eq!(safe_add(U256::MAX, U256::from(1u8)), None);
        assert_eq!(safe_sub(U256::ZERO, U256::from(1u8)), None);
        assert_eq!(safe_mul(U256::MAX, U256::from(2u8)), None);
        assert_eq!(safe_mul(U256::MAX, U256::ZERO), Some(U256::ZERO));
        assert_eq!(rmul(U256::MAX, U256::from(2u8)), None);
    }

    #[rstest]
    fn test_accumulators() {
        // A 5% savings rate compounded for one hour on top of an existing 1.05 accumulator
        let dsr = word("1000000001547125957863212448");
        let prev = word("1050000000000000000000000000");
        let hourly = rpow(dsr, 3_600, RAY_U256).unwrap();
        assert_eq!(chi(dsr, 3_600, prev), rmul(hourly, prev));
        assert_eq!(chi(dsr, 0, prev), Some(prev));

        let duty = word("627937192491029810");
        assert_eq!(
            accumulated_rate(duty, RAY_U256, SECONDS_PER_YEAR, RAY_U256),
            Some(word("1019999999999999999972831879"))
        );
    }

    fn per_second_rate() -> impl Strategy<Value = U256> {
        // Up to roughly 37% a year, well past any configured rate
        (0u64..=10_000_000_000_000_000_000u64).prop_map(|delta| RAY_U256 + U256::from(delta))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1_000))]

        #[rstest]
        fn prop_rpow_matches_reference(
            x in per_second_rate(),
            n in 0u64..=SECONDS_PER_YEAR,
        ) {
            let expected = rpow(x, n, RAY_U256).unwrap();
            let actual = primary(x, n);
            let diff = if actual > expected { actual - expected } else { expected - actual };
            prop_assert!(
                diff <= U256::from(1u8),
                "x={x} n={n} primary={actual} reference={expected}"
            );
        }

        #[rstest]
        fn prop_rpow_grows_hour_over_hour(
            delta in 1_000_000u64..=10_000_000_000_000_000_000u64,
            n in 0u64..SECONDS_PER_YEAR,
        ) {
            // An hour of growth dwarfs the few units of rounding on either side
            let x = RAY_U256 + U256::from(delta);
            prop_assert!(primary(x, n + 3_600) > primary(x, n));
        }
    }
}
