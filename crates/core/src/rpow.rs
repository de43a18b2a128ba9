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

//! Compounding of per-second rates by binary exponentiation.
//!
//! This reproduces the assembly `_rpow` of the stability-fee and savings-rate contracts step for
//! step: products are taken modulo 2^256, every squaring and accumulation rounds to nearest by
//! adding half a RAY before the truncating division, and the division-based overflow guards
//! of the contract are kept. They are reachable at this width.

use alloy_primitives::{I256, Sign, U256};

use crate::{
    consts::{HALF_RAY_U256, RAY_U256},
    error::MathError,
    fixed::Ray,
};

/// Returns `x^n` at RAY scale, exactly as the on-chain accumulators compute it.
///
/// `rpow(x, 0)` is one RAY for every `x` (including zero) and `rpow(0, n)` is zero for `n > 0`.
///
/// # Errors
///
/// Returns [`MathError::InvariantViolated`] if:
/// - `x` is negative.
/// - An intermediate product or rounding step overflows 256 bits.
/// - The result does not fit a signed 256-bit integer.
pub fn rpow(x: Ray, n: u64) -> Result<Ray, MathError> {
    if x.is_negative() {
        return Err(MathError::InvariantViolated("negative base"));
    }

    let mut x = x.raw().into_raw();
    if x.is_zero() {
        return Ok(if n == 0 { Ray::one() } else { Ray::zero() });
    }

    let mut z = if n % 2 == 0 { RAY_U256 } else { x };
    let mut n = n / 2;

    while n > 0 {
        let xx = x.wrapping_mul(x);
        if xx / x != x {
            return Err(MathError::InvariantViolated("overflow in x*x"));
        }
        let xx_round = xx.wrapping_add(HALF_RAY_U256);
        if xx_round < xx {
            return Err(MathError::InvariantViolated("overflow in xx + half"));
        }
        x = xx_round / RAY_U256;

        if n % 2 == 1 {
            let zx = z.wrapping_mul(x);
            if !x.is_zero() && zx / x != z {
                return Err(MathError::InvariantViolated("overflow in z*x"));
            }
            let zx_round = zx.wrapping_add(HALF_RAY_U256);
            if zx_round < zx {
                return Err(MathError::InvariantViolated("overflow in zx + half"));
            }
            z = zx_round / RAY_U256;
        }

        // Once the base rounds to zero every further square is zero
        if x.is_zero() {
            z = if n == 1 { z } else { U256::ZERO };
            break;
        }

        n /= 2;
    }

    I256::checked_from_sign_and_abs(Sign::Positive, z)
        .map(Ray::from_raw)
        .ok_or(MathError::InvariantViolated("result exceeds int256"))
}
