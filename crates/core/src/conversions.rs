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

//! Conversions between the fixed-point scales, token decimal counts and rate notations.
//!
//! Every ordered pair of scales has its own function: upscaling is exact and fails only when the
//! result exceeds 256 bits, downscaling truncates toward zero and cannot fail.

use alloy_primitives::{I256, U256};

use crate::{
    consts::{
        BPS_BASE, PERCENT_BASE, RAY, RAY_RAD_RATIO, RAY_U256, WAD_DECIMALS, WAD_RAD_RATIO,
        WAD_RAY_RATIO,
    },
    error::MathError,
    fixed::{Rad, Ray, Wad},
    full_math::mul_div,
};

fn upscale(raw: I256, factor: I256) -> Result<I256, MathError> {
    raw.checked_mul(factor).ok_or(MathError::MultiplicationOverflow)
}

/// Converts a WAD value to RAY scale (exact).
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn wad_to_ray(value: Wad) -> Result<Ray, MathError> {
    upscale(value.raw(), WAD_RAY_RATIO).map(Ray::from_raw)
}

/// Converts a WAD value to RAD scale (exact).
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn wad_to_rad(value: Wad) -> Result<Rad, MathError> {
    upscale(value.raw(), WAD_RAD_RATIO).map(Rad::from_raw)
}

/// Converts a RAY value to RAD scale (exact).
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn ray_to_rad(value: Ray) -> Result<Rad, MathError> {
    upscale(value.raw(), RAY_RAD_RATIO).map(Rad::from_raw)
}

/// Converts a RAY value to WAD scale, truncating toward zero.
#[must_use]
pub fn ray_to_wad(value: Ray) -> Wad {
    Wad::from_raw(value.raw() / WAD_RAY_RATIO)
}

/// Converts a RAD value to WAD scale, truncating toward zero.
#[must_use]
pub fn rad_to_wad(value: Rad) -> Wad {
    Wad::from_raw(value.raw() / WAD_RAD_RATIO)
}

/// Converts a RAD value to RAY scale, truncating toward zero.
#[must_use]
pub fn rad_to_ray(value: Rad) -> Ray {
    Ray::from_raw(value.raw() / RAY_RAD_RATIO)
}

/// Returns `10^exponent`, or `None` if it exceeds a signed 256-bit integer (`exponent > 76`).
#[must_use]
pub fn pow10(exponent: u8) -> Option<I256> {
    let ten = I256::from_raw(U256::from(10u8));
    (0..exponent).try_fold(I256::ONE, |acc, _| acc.checked_mul(ten))
}

/// Multiplies `amount` by `10^decimals`.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn scale_up(amount: I256, decimals: u8) -> Result<I256, MathError> {
    if amount.is_zero() {
        return Ok(I256::ZERO);
    }
    let factor = pow10(decimals).ok_or(MathError::MultiplicationOverflow)?;
    upscale(amount, factor)
}

/// Divides `amount` by `10^decimals`, truncating toward zero.
#[must_use]
pub fn scale_down(amount: I256, decimals: u8) -> I256 {
    match pow10(decimals) {
        Some(factor) => amount / factor,
        // Every representable magnitude is below the factor
        None => I256::ZERO,
    }
}

/// Re-expresses an integer amount with `from` decimals as one with `to` decimals.
///
/// Raising the decimal count is exact; lowering it truncates toward zero.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if raising the decimal count exceeds 256 bits.
pub fn convert_decimals(amount: I256, from: u8, to: u8) -> Result<I256, MathError> {
    match from.cmp(&to) {
        std::cmp::Ordering::Equal => Ok(amount),
        std::cmp::Ordering::Less => scale_up(amount, to - from),
        std::cmp::Ordering::Greater => Ok(scale_down(amount, from - to)),
    }
}

/// Normalizes a token amount with `decimals` decimals to WAD.
///
/// Tokens with fewer than 18 decimals are scaled up exactly; tokens with more are truncated.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn to_wad(amount: I256, decimals: u8) -> Result<Wad, MathError> {
    convert_decimals(amount, decimals, WAD_DECIMALS).map(Wad::from_raw)
}

/// Expresses a WAD amount in a token's native `decimals`.
///
/// For tokens with fewer than 18 decimals this truncates, so `from_wad(to_wad(x, d), d) == x`
/// holds but `to_wad(from_wad(w, d), d) == w` only when `w` carries no digits below the token's
/// precision.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn from_wad(amount: Wad, decimals: u8) -> Result<I256, MathError> {
    convert_decimals(amount.raw(), WAD_DECIMALS, decimals)
}

/// Converts basis points to a RAY fraction (10,000 bps = one RAY).
#[must_use]
pub fn bps_to_ray(bps: u64) -> Ray {
    let raw = U256::from(bps) * RAY_U256 / U256::from(BPS_BASE);
    Ray::from_raw(I256::from_raw(raw))
}

/// Converts a RAY fraction to whole basis points, truncating toward zero.
#[must_use]
pub fn ray_to_bps(value: Ray) -> I256 {
    let base = I256::from_raw(U256::from(BPS_BASE));
    // The quotient is never larger in magnitude than the input
    mul_div(value.raw(), base, RAY).unwrap_or(I256::ZERO)
}

/// Converts whole percent to a RAY fraction (100% = one RAY).
#[must_use]
pub fn percent_to_ray(percent: u64) -> Ray {
    let raw = U256::from(percent) * RAY_U256 / U256::from(PERCENT_BASE);
    Ray::from_raw(I256::from_raw(raw))
}

/// Converts a RAY fraction to whole percent, truncating toward zero.
#[must_use]
pub fn ray_to_percent(value: Ray) -> I256 {
    let base = I256::from_raw(U256::from(PERCENT_BASE));
    mul_div(value.raw(), base, RAY).unwrap_or(I256::ZERO)
}
