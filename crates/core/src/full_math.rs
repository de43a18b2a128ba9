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

//! Full-width multiply-then-divide over signed 256-bit integers.

use alloy_primitives::{I256, Sign, U256, aliases::U512};

/// Calculates `a * b / denominator` with a 512-bit intermediate product.
///
/// The quotient is truncated toward zero, matching the EVM's signed division. The sign of the
/// result is the sign of the exact mathematical quotient.
///
/// Returns `None` if `denominator` is zero or the quotient does not fit in an `I256`.
#[must_use]
pub fn mul_div(a: I256, b: I256, denominator: I256) -> Option<I256> {
    if denominator.is_zero() {
        return None;
    }

    let negative = a.is_negative() ^ b.is_negative() ^ denominator.is_negative();

    let product = U512::from(a.unsigned_abs()) * U512::from(b.unsigned_abs());
    let quotient = product / U512::from(denominator.unsigned_abs());
    let magnitude = U256::checked_from_limbs_slice(quotient.as_limbs())?;

    let sign = if negative {
        Sign::Negative
    } else {
        Sign::Positive
    };
    I256::checked_from_sign_and_abs(sign, magnitude)
}
