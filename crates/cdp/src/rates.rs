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

//! Projections of the rate accumulators to an arbitrary timestamp.
//!
//! The stability-fee and savings modules only update their accumulators when `drip` is called.
//! These functions reproduce that update so values can be shown as of "now". They reproduce
//! state transitions and therefore use the strict family.

use kusd_core::{
    MathError, Ray, Wad,
    checked::{self, ray_mul_wad},
    consts::SECONDS_PER_YEAR,
    rpow::rpow,
};

/// Returns the seconds elapsed between the last accumulator update `rho` and `now`.
///
/// # Errors
///
/// Returns [`MathError::SubtractionUnderflow`] if `now` is before `rho`.
pub fn elapsed_since(rho: u64, now: u64) -> Result<u64, MathError> {
    now.checked_sub(rho).ok_or(MathError::SubtractionUnderflow)
}

/// Returns the stability-fee accumulator after `elapsed` seconds at `base + duty` per second.
///
/// # Errors
///
/// Returns an error if the per-second rate, the compounding or the final product overflows.
pub fn accumulate_rate(
    duty: Ray,
    base: Ray,
    elapsed: u64,
    prev_rate: Ray,
) -> Result<Ray, MathError> {
    let per_second = checked::add(base, duty)?;
    checked::mul(rpow(per_second, elapsed)?, prev_rate)
}

/// Returns the savings accumulator `chi` after `elapsed` seconds at `dsr` per second.
///
/// # Errors
///
/// Returns an error if the compounding or the final product overflows.
pub fn accumulate_chi(dsr: Ray, elapsed: u64, prev_chi: Ray) -> Result<Ray, MathError> {
    checked::mul(rpow(dsr, elapsed)?, prev_chi)
}

/// Returns the growth factor of a per-second rate over a 365-day year.
///
/// # Errors
///
/// Returns an error if the compounding overflows.
pub fn annual_multiplier(per_second: Ray) -> Result<Ray, MathError> {
    rpow(per_second, SECONDS_PER_YEAR)
}

/// Returns the annual yield of a per-second rate as a RAY fraction (`0.05` RAY for 5%).
///
/// Rates at or below one yield zero.
///
/// # Errors
///
/// Returns an error if the compounding overflows.
pub fn annual_yield(per_second: Ray) -> Result<Ray, MathError> {
    if per_second <= Ray::one() {
        return Ok(Ray::zero());
    }
    checked::sub(annual_multiplier(per_second)?, Ray::one())
}

/// Returns the owed debt of `normalized_debt` once the accumulator is dripped forward by `elapsed`.
///
/// # Errors
///
/// Returns an error if the projected accumulator or the product overflows.
pub fn projected_total_debt(
    normalized_debt: Wad,
    duty: Ray,
    base: Ray,
    elapsed: u64,
    prev_rate: Ray,
) -> Result<Wad, MathError> {
    let rate = accumulate_rate(duty, base, elapsed, prev_rate)?;
    ray_mul_wad(normalized_debt, rate)
}

/// Returns the value of `pie` savings shares once `chi` is dripped forward by `elapsed`.
///
/// # Errors
///
/// Returns an error if the projected accumulator or the product overflows.
pub fn projected_savings(
    pie: Wad,
    dsr: Ray,
    elapsed: u64,
    prev_chi: Ray,
) -> Result<Wad, MathError> {
    let chi = accumulate_chi(dsr, elapsed, prev_chi)?;
    ray_mul_wad(pie, chi)
}
