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

//! Strict fixed-point arithmetic which fails instead of substituting a value.
//!
//! The raw `safe_*` functions carry over the guards of the contracts' unsigned helpers: a sum
//! smaller than its left operand is an addition overflow and a right operand larger than the
//! left is a subtraction underflow. Rate accumulation and anything feeding a state transition
//! goes through this module.

use alloy_primitives::I256;

use crate::{
    consts::RAY,
    error::MathError,
    fixed::{FixedPoint, Ray, Scale, Wad},
    full_math::mul_div,
};

/// Returns `a + b`.
///
/// # Errors
///
/// Returns [`MathError::AdditionOverflow`] if the sum is smaller than `a` or exceeds 256 bits.
pub fn safe_add(a: I256, b: I256) -> Result<I256, MathError> {
    match a.checked_add(b) {
        Some(sum) if sum >= a => Ok(sum),
        _ => Err(MathError::AdditionOverflow),
    }
}

/// Returns `a - b`.
///
/// # Errors
///
/// Returns [`MathError::SubtractionUnderflow`] if `b` is greater than `a`.
pub fn safe_sub(a: I256, b: I256) -> Result<I256, MathError> {
    if b > a {
        return Err(MathError::SubtractionUnderflow);
    }
    a.checked_sub(b).ok_or(MathError::SubtractionUnderflow)
}

/// Returns `a * b`.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the product exceeds 256 bits.
pub fn safe_mul(a: I256, b: I256) -> Result<I256, MathError> {
    if a.is_zero() || b.is_zero() {
        return Ok(I256::ZERO);
    }
    a.checked_mul(b).ok_or(MathError::MultiplicationOverflow)
}

/// Returns `a / b`, truncated toward zero.
///
/// # Errors
///
/// Returns an error if:
/// - `b` is zero ([`MathError::DivisionByZero`]).
/// - The quotient exceeds 256 bits, only possible for `I256::MIN / -1`
///   ([`MathError::DivisionOverflow`]).
pub fn safe_div(a: I256, b: I256) -> Result<I256, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    a.checked_div(b).ok_or(MathError::DivisionOverflow)
}

/// Returns `a + b` at a common scale.
///
/// # Errors
///
/// See [`safe_add`].
pub fn add<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>) -> Result<FixedPoint<S>, MathError> {
    safe_add(a.raw(), b.raw()).map(FixedPoint::from_raw)
}

/// Returns `a - b` at a common scale.
///
/// # Errors
///
/// See [`safe_sub`].
pub fn sub<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>) -> Result<FixedPoint<S>, MathError> {
    safe_sub(a.raw(), b.raw()).map(FixedPoint::from_raw)
}

/// Returns `(a * b) / 10^S`, truncated toward zero.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn mul<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>) -> Result<FixedPoint<S>, MathError> {
    mul_div(a.raw(), b.raw(), S::UNIT)
        .map(FixedPoint::from_raw)
        .ok_or(MathError::MultiplicationOverflow)
}

/// Returns `(a * 10^S) / b`, truncated toward zero.
///
/// # Errors
///
/// Returns an error if:
/// - `b` is zero ([`MathError::DivisionByZero`]).
/// - The result exceeds 256 bits ([`MathError::DivisionOverflow`]).
pub fn div<S: Scale>(a: FixedPoint<S>, b: FixedPoint<S>) -> Result<FixedPoint<S>, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    mul_div(a.raw(), S::UNIT, b.raw())
        .map(FixedPoint::from_raw)
        .ok_or(MathError::DivisionOverflow)
}

/// Applies a RAY factor to a WAD quantity: `(amount * factor) / RAY`.
///
/// # Errors
///
/// Returns [`MathError::MultiplicationOverflow`] if the result exceeds 256 bits.
pub fn ray_mul_wad(amount: Wad, factor: Ray) -> Result<Wad, MathError> {
    mul_div(amount.raw(), factor.raw(), RAY)
        .map(Wad::from_raw)
        .ok_or(MathError::MultiplicationOverflow)
}
