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

//! Scale-tagged fixed-point integers.
//!
//! The mirrored contracts keep WAD, RAY and RAD values as plain `uint256`/`int256` words told
//! apart only by convention. Here each scale is a distinct type, so passing a RAY where a WAD is
//! expected fails to compile and every rescaling is an explicit call into
//! [`crate::conversions`].

use std::{
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
    str::FromStr,
};

use alloy_primitives::{I256, ParseSignedError, Sign, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    FAILED,
    consts::{RAD, RAD_DECIMALS, RAY, RAY_DECIMALS, WAD, WAD_DECIMALS},
    error::MathError,
};

/// A fixed-point scale: the number of implied decimal digits and the raw value of one unit.
pub trait Scale:
    Copy + Debug + Default + PartialEq + Eq + PartialOrd + Ord + Hash + Send + Sync + 'static
{
    /// The number of implied decimal digits.
    const DECIMALS: u8;
    /// The raw integer representing `1.0` at this scale (`10^DECIMALS`).
    const UNIT: I256;
    /// The short name of the scale, used in debug output.
    const NAME: &'static str;
}

/// Marker for the 18-decimal scale (token quantities, prices, normalized debt).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WadScale;

/// Marker for the 27-decimal scale (rates, ratios, accumulators).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RayScale;

/// Marker for the 45-decimal scale (aggregate debt, ceilings and floors).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RadScale;

impl Scale for WadScale {
    const DECIMALS: u8 = WAD_DECIMALS;
    const UNIT: I256 = WAD;
    const NAME: &'static str = "Wad";
}

impl Scale for RayScale {
    const DECIMALS: u8 = RAY_DECIMALS;
    const UNIT: I256 = RAY;
    const NAME: &'static str = "Ray";
}

impl Scale for RadScale {
    const DECIMALS: u8 = RAD_DECIMALS;
    const UNIT: I256 = RAD;
    const NAME: &'static str = "Rad";
}

/// An 18-decimal fixed-point value.
pub type Wad = FixedPoint<WadScale>;

/// A 27-decimal fixed-point value.
pub type Ray = FixedPoint<RayScale>;

/// A 45-decimal fixed-point value.
pub type Rad = FixedPoint<RadScale>;

/// Lifts a native signed integer into the 256-bit domain.
#[must_use]
pub fn i256(value: i128) -> I256 {
    let sign = if value < 0 {
        Sign::Negative
    } else {
        Sign::Positive
    };
    // Every i128 magnitude fits, so the overflow flag is always clear
    I256::overflowing_from_sign_and_abs(sign, U256::from(value.unsigned_abs())).0
}

/// A signed 256-bit integer carrying an implied decimal scale `S`.
///
/// The raw value is exactly what the contracts store; `1.0` is represented by `S::UNIT`.
/// No arithmetic operators are implemented: callers choose between the [`crate::display`] and
/// [`crate::checked`] families explicitly.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint<S: Scale> {
    raw: I256,
    scale: PhantomData<S>,
}

impl<S: Scale> FixedPoint<S> {
    /// Creates a new [`FixedPoint`] from a raw value already at scale `S`.
    #[must_use]
    pub const fn from_raw(raw: I256) -> Self {
        Self {
            raw,
            scale: PhantomData,
        }
    }

    /// Creates a new [`FixedPoint`] from a raw native integer already at scale `S`.
    #[must_use]
    pub fn from_raw_i128(raw: i128) -> Self {
        Self::from_raw(i256(raw))
    }

    /// Creates a new [`FixedPoint`] representing `units` whole units.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::MultiplicationOverflow`] if `units * S::UNIT` does not fit 256 bits.
    pub fn from_units_checked(units: i128) -> Result<Self, MathError> {
        i256(units)
            .checked_mul(S::UNIT)
            .map(Self::from_raw)
            .ok_or(MathError::MultiplicationOverflow)
    }

    /// Creates a new [`FixedPoint`] representing `units` whole units.
    ///
    /// # Panics
    ///
    /// This function panics:
    /// - If the scaled value does not fit 256 bits. See [`Self::from_units_checked`].
    #[must_use]
    pub fn from_units(units: i128) -> Self {
        Self::from_units_checked(units).expect(FAILED)
    }

    /// Returns zero at scale `S`.
    #[must_use]
    pub const fn zero() -> Self {
        Self::from_raw(I256::ZERO)
    }

    /// Returns one whole unit at scale `S`.
    #[must_use]
    pub const fn one() -> Self {
        Self::from_raw(S::UNIT)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn raw(&self) -> I256 {
        self.raw
    }

    /// Returns the number of implied decimal digits.
    #[must_use]
    pub const fn decimals() -> u8 {
        S::DECIMALS
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Returns `true` if the value is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.raw.is_positive()
    }

    /// Returns `true` if the value is strictly less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.raw.is_negative()
    }
}

impl<S: Scale> Display for FixedPoint<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let decimals = usize::from(S::DECIMALS);
        let mut digits = self.raw.unsigned_abs().to_string();
        if digits.len() <= decimals {
            digits.insert_str(0, &"0".repeat(decimals + 1 - digits.len()));
        }
        digits.insert(digits.len() - decimals, '.');
        if self.raw.is_negative() {
            digits.insert(0, '-');
        }
        f.write_str(&digits)
    }
}

impl<S: Scale> Debug for FixedPoint<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", S::NAME)
    }
}

impl<S: Scale> FromStr for FixedPoint<S> {
    type Err = ParseSignedError;

    /// Parses a raw integer string (the on-chain representation, not a decimal).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        I256::from_str(value.trim()).map(Self::from_raw)
    }
}

impl<S: Scale> From<FixedPoint<S>> for I256 {
    fn from(value: FixedPoint<S>) -> Self {
        value.raw
    }
}

impl<S: Scale> Serialize for FixedPoint<S> {
    fn serialize<T>(&self, serializer: T) -> Result<T::Ok, T::Error>
    where
        T: Serializer,
    {
        serializer.serialize_str(&self.raw.to_string())
    }
}

impl<'de, S: Scale> Deserialize<'de> for FixedPoint<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_str = String::deserialize(deserializer)?;
        raw_str.parse().map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_one_is_unit() {
        assert_eq!(Wad::one().raw(), WAD);
        assert_eq!(Ray::one().raw(), RAY);
        assert_eq!(Rad::one().raw(), RAD);
    }

    #[rstest]
    fn test_default_is_zero() {
        assert_eq!(Wad::default(), Wad::zero());
        assert!(Ray::default().is_zero());
    }

    #[rstest]
    fn test_decimals() {
        assert_eq!(Wad::decimals(), 18);
        assert_eq!(Ray::decimals(), 27);
        assert_eq!(Rad::decimals(), 45);
    }

    #[rstest]
    fn test_from_units() {
        assert_eq!(Wad::from_units(10).raw(), i256(10_000_000_000_000_000_000));
        assert_eq!(Wad::from_units(-2).raw(), i256(-2_000_000_000_000_000_000));
    }

    #[rstest]
    fn test_from_units_checked_overflow() {
        assert_eq!(
            Rad::from_units_checked(i128::MAX),
            Err(MathError::MultiplicationOverflow)
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_from_units_panics_on_overflow() {
        let _ = Rad::from_units(i128::MIN);
    }

    #[rstest]
    #[case(0, false, false, true)]
    #[case(1, true, false, false)]
    #[case(-1, false, true, false)]
    fn test_sign_predicates(
        #[case] raw: i128,
        #[case] positive: bool,
        #[case] negative: bool,
        #[case] zero: bool,
    ) {
        let value = Wad::from_raw_i128(raw);
        assert_eq!(value.is_positive(), positive);
        assert_eq!(value.is_negative(), negative);
        assert_eq!(value.is_zero(), zero);
    }

    #[rstest]
    #[case(1_500_000_000_000_000_000, "1.500000000000000000")]
    #[case(1, "0.000000000000000001")]
    #[case(0, "0.000000000000000000")]
    #[case(-250_000_000_000_000_000, "-0.250000000000000000")]
    #[case(12_000_000_000_000_000_000_000, "12000.000000000000000000")]
    fn test_display_wad(#[case] raw: i128, #[case] expected: &str) {
        assert_eq!(Wad::from_raw_i128(raw).to_string(), expected);
    }

    #[rstest]
    fn test_display_ray() {
        let value = Ray::from_raw_i128(1_000_000_000_627_937_192_491_029_810);
        assert_eq!(value.to_string(), "1.000000000627937192491029810");
    }

    #[rstest]
    fn test_debug() {
        assert_eq!(format!("{:?}", Wad::one()), "Wad(1.000000000000000000)");
        assert_eq!(
            format!("{:?}", Ray::zero()),
            "Ray(0.000000000000000000000000000)"
        );
    }

    #[rstest]
    fn test_from_str_raw() {
        let value: Wad = "1500000000000000000".parse().unwrap();
        assert_eq!(value, Wad::from_raw_i128(1_500_000_000_000_000_000));
        let negative: Rad = "-1".parse().unwrap();
        assert_eq!(negative, Rad::from_raw_i128(-1));
    }

    #[rstest]
    fn test_from_str_invalid() {
        assert!("1.5".parse::<Wad>().is_err());
        assert!("abc".parse::<Wad>().is_err());
    }

    #[rstest]
    fn test_ordering() {
        let small = Wad::from_raw_i128(1);
        let large = Wad::one();
        assert!(small < large);
        assert_eq!(small.max(large), large);
        assert_eq!(Wad::from_raw_i128(-5).min(small), Wad::from_raw_i128(-5));
    }

    #[rstest]
    fn test_serde_raw_string() {
        let value = Ray::from_raw_i128(1_050_000_000_000_000_000_000_000_000);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"1050000000000000000000000000\"");
        let parsed: Ray = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[rstest]
    fn test_i256_bounds() {
        assert_eq!(i256(i128::MIN).to_string(), i128::MIN.to_string());
        assert_eq!(i256(i128::MAX).to_string(), i128::MAX.to_string());
    }
}
