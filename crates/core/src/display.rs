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

//! Display-safe fixed-point arithmetic.
//!
//! Functions in this module never fail. A zero divisor yields zero, and so does a result which
//! does not fit 256 bits (logged at `warn` level). This is the family the dashboard reads with,
//! where stale or zero on-chain state must not abort rendering. Use [`crate::checked`] wherever a
//! wrong answer would be worse than an error.
//!
//! Multiplication at scale `S` is `(a * b) / 10^S` and division is `(a * 10^S) / b`, both with a
//! 512-bit intermediate and truncation toward zero.

use alloy_primitives::{I256, U256};

use crate::{
    consts::RAY,
    fixed::{FixedPoint, Rad, Ray, Scale, Wad},
    full_math::mul_div,
};

fn or_zero(result: Option<I256>, op: &str) -> I256 {
    result.unwrap_or_else(|| {
        log::warn!("{op} result exceeds 256 bits, substituting zero");
        I256::ZERO
    })
}

// `I256::MIN % -1` overflows but every value is a multiple of a unit step
fn rem_or_zero(value: I256, step: I256) -> I256 {
    value.checked_rem(step).unwrap_or(I256::ZERO)
}

fn scaled_mul(a: I256, b: I256, unit: I256, op: &str) -> I256 {
    or_zero(mul_div(a, b, unit), op)
}

fn scaled_div(a: I256, b: I256, unit: I256, op: &str) -> I256 {
    if b.is_zero() {
        return I256::ZERO;
    }
    or_zero(mul_div(a, unit, b), op)
}

fn mul<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>, op: &str) -> FixedPoint<S> {
    FixedPoint::from_raw(scaled_mul(a.raw(), b.raw(), S::UNIT, op))
}

fn div<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>, op: &str) -> FixedPoint<S> {
    FixedPoint::from_raw(scaled_div(a.raw(), b.raw(), S::UNIT, op))
}

fn add<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>, op: &str) -> FixedPoint<S> {
    FixedPoint::from_raw(or_zero(a.raw().checked_add(b.raw()), op))
}

fn sub<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>, op: &str) -> FixedPoint<S> {
    FixedPoint::from_raw(or_zero(a.raw().checked_sub(b.raw()), op))
}

/// Returns `(a * b) / WAD`.
#[must_use]
pub fn wad_mul(a: Wad, b: Wad) -> Wad {
    mul(a, b, "wad_mul")
}

/// Returns `(a * WAD) / b`, or zero when `b` is zero.
#[must_use]
pub fn wad_div(a: Wad, b: Wad) -> Wad {
    div(a, b, "wad_div")
}

/// Returns `a + b`.
#[must_use]
pub fn wad_add(a: Wad, b: Wad) -> Wad {
    add(a, b, "wad_add")
}

/// Returns `a - b`, which may be negative.
#[must_use]
pub fn wad_sub(a: Wad, b: Wad) -> Wad {
    sub(a, b, "wad_sub")
}

/// Returns `(a * b) / RAY`.
#[must_use]
pub fn ray_mul(a: Ray, b: Ray) -> Ray {
    mul(a, b, "ray_mul")
}

/// Returns `(a * RAY) / b`, or zero when `b` is zero.
#[must_use]
pub fn ray_div(a: Ray, b: Ray) -> Ray {
    div(a, b, "ray_div")
}

/// Returns `a + b`.
#[must_use]
pub fn ray_add(a: Ray, b: Ray) -> Ray {
    add(a, b, "ray_add")
}

/// Returns `a - b`, which may be negative.
#[must_use]
pub fn ray_sub(a: Ray, b: Ray) -> Ray {
    sub(a, b, "ray_sub")
}

/// Returns `(a * b) / RAD`.
#[must_use]
pub fn rad_mul(a: Rad, b: Rad) -> Rad {
    mul(a, b, "rad_mul")
}

/// Returns `(a * RAD) / b`, or zero when `b` is zero.
#[must_use]
pub fn rad_div(a: Rad, b: Rad) -> Rad {
    div(a, b, "rad_div")
}

/// Returns `a + b`.
#[must_use]
pub fn rad_add(a: Rad, b: Rad) -> Rad {
    add(a, b, "rad_add")
}

/// Returns `a - b`, which may be negative.
#[must_use]
pub fn rad_sub(a: Rad, b: Rad) -> Rad {
    sub(a, b, "rad_sub")
}

/// Applies a RAY factor to a WAD quantity: `(a * b) / RAY`.
///
/// This is how normalized debt is turned into owed debt (`art * rate`) and how a DSR deposit is
/// valued at `chi`.
#[must_use]
pub fn wad_mul_ray(a: Wad, b: Ray) -> Wad {
    Wad::from_raw(scaled_mul(a.raw(), b.raw(), RAY, "wad_mul_ray"))
}

/// Removes a RAY factor from a WAD quantity: `(a * RAY) / b`, or zero when `b` is zero.
#[must_use]
pub fn wad_div_ray(a: Wad, b: Ray) -> Wad {
    Wad::from_raw(scaled_div(a.raw(), b.raw(), RAY, "wad_div_ray"))
}

/// Returns the exact product of a WAD quantity and a RAY rate as a RAD value.
///
/// The vault engine stores debt this way (`Art * rate`), without truncation.
#[must_use]
pub fn wad_times_ray(a: Wad, b: Ray) -> Rad {
    Rad::from_raw(or_zero(a.raw().checked_mul(b.raw()), "wad_times_ray"))
}

/// Returns `(amount * part) / base`, e.g. `part` percent of `amount` for a `base` of 100.
///
/// Returns zero when `base` is zero.
#[must_use]
pub fn percent_of<S: Scale>(amount: FixedPoint<S>, part: u64, base: u64) -> FixedPoint<S> {
    if base == 0 {
        return FixedPoint::zero();
    }
    let part = I256::from_raw(U256::from(part));
    let base = I256::from_raw(U256::from(base));
    FixedPoint::from_raw(or_zero(mul_div(amount.raw(), part, base), "percent_of"))
}

/// Truncates `value` toward zero to a multiple of `step`.
///
/// Returns zero when `step` is zero.
#[must_use]
pub fn round_down<S: Scale>(value: FixedPoint<S>, step: FixedPoint<S>) -> FixedPoint<S> {
    let (value, step) = (value.raw(), step.raw());
    if step.is_zero() {
        return FixedPoint::zero();
    }
    FixedPoint::from_raw(value - rem_or_zero(value, step))
}

/// Rounds `value` away from zero to a multiple of `step`.
///
/// For non-negative values this is the ceiling. Negative values move toward negative
/// infinity, so `-1234` with a step of `100` becomes `-1300`, the mirror image of the positive
/// case. Returns zero when `step` is zero.
#[must_use]
pub fn round_up<S: Scale>(value: FixedPoint<S>, step: FixedPoint<S>) -> FixedPoint<S> {
    let (value, step) = (value.raw(), step.raw());
    if step.is_zero() {
        return FixedPoint::zero();
    }
    let remainder = rem_or_zero(value, step);
    if remainder.is_zero() {
        return FixedPoint::from_raw(value);
    }

    // |step| - |remainder| is below 2^255 so the reinterpretation is exact
    let padding = I256::from_raw(step.unsigned_abs() - remainder.unsigned_abs());
    let rounded = if value.is_negative() {
        value.checked_sub(padding)
    } else {
        value.checked_add(padding)
    };
    FixedPoint::from_raw(or_zero(rounded, "round_up"))
}
