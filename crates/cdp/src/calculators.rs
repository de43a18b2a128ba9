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

//! Risk metrics of a collateralized debt position.
//!
//! Every function is pure and built on the display-safe family: degenerate inputs (zero debt,
//! zero price, zero ratio) produce the documented sentinel rather than an error. Quantities,
//! prices and ratios are WAD unless a signature says otherwise.

use alloy_primitives::{I256, U256};
use kusd_core::{
    Rad, Ray, Wad,
    conversions::rad_to_wad,
    display::{percent_of, rad_sub, wad_div, wad_div_ray, wad_mul, wad_mul_ray, wad_sub},
    full_math::mul_div,
};
use serde::{Deserialize, Serialize};

/// Basis points in one whole, the denominator of liquidation penalties.
pub const PENALTY_BPS_BASE: u64 = 10_000;

/// Returns the value of `collateral` at `price`.
#[must_use]
pub fn collateral_value(collateral: Wad, price: Wad) -> Wad {
    wad_mul(collateral, price)
}

/// Returns `collateral * price / debt`.
///
/// Returns zero when `debt` is zero. Zero means "no position", not an infinite ratio, and callers
/// must special-case it.
#[must_use]
pub fn collateral_ratio(collateral: Wad, price: Wad, debt: Wad) -> Wad {
    if debt.is_zero() {
        return Wad::zero();
    }
    wad_div(collateral_value(collateral, price), debt)
}

/// Returns the collateral price at which the position reaches `liquidation_ratio`.
///
/// Returns zero when `collateral` is zero.
#[must_use]
pub fn liquidation_price(collateral: Wad, debt: Wad, liquidation_ratio: Wad) -> Wad {
    if collateral.is_zero() {
        return Wad::zero();
    }
    wad_div(wad_mul(debt, liquidation_ratio), collateral)
}

/// Returns the collateral needed to back `debt` at exactly `liquidation_ratio`.
///
/// Returns zero when `price` is zero.
#[must_use]
pub fn required_collateral(debt: Wad, price: Wad, liquidation_ratio: Wad) -> Wad {
    if price.is_zero() {
        return Wad::zero();
    }
    wad_div(wad_mul(debt, liquidation_ratio), price)
}

/// The debt ceiling of a collateral type, normalized to WAD for comparison with minted debt.
///
/// The vault engine keeps the ceiling (`line`) and the aggregate debt (`Art * rate`) at RAD scale
/// while mintable amounts are WAD, so the rescaling happens here and nowhere else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtCeiling {
    /// The ceiling as WAD.
    pub line: Wad,
    /// The debt which can still be drawn before reaching the ceiling, never negative.
    pub headroom: Wad,
}

impl DebtCeiling {
    /// Creates a new [`DebtCeiling`] from the engine's RAD ceiling and aggregate debt.
    ///
    /// The headroom is taken at RAD scale and truncated once.
    #[must_use]
    pub fn from_rad(line: Rad, total_debt: Rad) -> Self {
        let headroom = if line > total_debt {
            rad_to_wad(rad_sub(line, total_debt))
        } else {
            Wad::zero()
        };
        Self {
            line: rad_to_wad(line),
            headroom,
        }
    }

    /// Creates a new [`DebtCeiling`] from a ceiling and aggregate debt already at WAD scale.
    #[must_use]
    pub fn from_wad(line: Wad, total_debt: Wad) -> Self {
        let headroom = if line > total_debt {
            wad_sub(line, total_debt)
        } else {
            Wad::zero()
        };
        Self { line, headroom }
    }

    /// Returns `true` if a ceiling is configured. A zero ceiling is treated as absent.
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.line.is_zero()
    }
}

/// Returns the additional debt which can be drawn against the position.
///
/// The collateral bound is `collateral * price / liquidation_ratio - current_debt`, floored at
/// zero. When a `ceiling` is set the result is the smaller of that bound and the ceiling headroom.
/// Returns zero when `liquidation_ratio` is zero.
#[must_use]
pub fn max_mint(
    collateral: Wad,
    price: Wad,
    liquidation_ratio: Wad,
    current_debt: Wad,
    ceiling: Option<DebtCeiling>,
) -> Wad {
    if liquidation_ratio.is_zero() {
        return Wad::zero();
    }

    let max_from_collateral = wad_div(collateral_value(collateral, price), liquidation_ratio);
    let available_from_collateral = if max_from_collateral > current_debt {
        wad_sub(max_from_collateral, current_debt)
    } else {
        Wad::zero()
    };

    match ceiling {
        Some(ceiling) if ceiling.is_set() => available_from_collateral.min(ceiling.headroom),
        _ => available_from_collateral,
    }
}

/// Returns the collateral which can be removed while keeping the position at or above
/// `liquidation_ratio`.
///
/// All collateral is withdrawable without debt; nothing is withdrawable at a zero price.
#[must_use]
pub fn max_withdraw(collateral: Wad, debt: Wad, price: Wad, liquidation_ratio: Wad) -> Wad {
    if debt.is_zero() {
        return collateral;
    }
    if price.is_zero() {
        return Wad::zero();
    }

    let required = required_collateral(debt, price, liquidation_ratio);
    if collateral <= required {
        return Wad::zero();
    }
    wad_sub(collateral, required)
}

/// Returns `collateral_ratio / liquidation_ratio`.
///
/// Below one WAD the position is liquidatable, exactly one WAD is the threshold. Returns one WAD
/// when `liquidation_ratio` is zero.
#[must_use]
pub fn health_factor(collateral_ratio: Wad, liquidation_ratio: Wad) -> Wad {
    if liquidation_ratio.is_zero() {
        return Wad::one();
    }
    wad_div(collateral_ratio, liquidation_ratio)
}

/// Returns `true` if `collateral_ratio` is at or above `liquidation_ratio`.
#[must_use]
pub fn is_position_safe(collateral_ratio: Wad, liquidation_ratio: Wad) -> bool {
    collateral_ratio >= liquidation_ratio
}

/// Returns the owed debt of `normalized_debt` at the accumulated `rate`.
#[must_use]
pub fn total_debt(normalized_debt: Wad, rate: Ray) -> Wad {
    wad_mul_ray(normalized_debt, rate)
}

/// Returns the stability fees accrued on `normalized_debt`, zero while `rate` is at or below one.
#[must_use]
pub fn accrued_fees(normalized_debt: Wad, rate: Ray) -> Wad {
    if rate <= Ray::one() {
        return Wad::zero();
    }
    wad_sub(total_debt(normalized_debt, rate), normalized_debt)
}

/// Returns the normalized debt (`art`) corresponding to owed `total_debt` at `rate`.
///
/// Returns zero when `rate` is zero.
#[must_use]
pub fn normalized_debt(total_debt: Wad, rate: Ray) -> Wad {
    wad_div_ray(total_debt, rate)
}

/// Returns the savings earned by `deposit` while the accumulator grew from `initial_chi` to
/// `current_chi`, zero if it did not grow.
#[must_use]
pub fn dsr_earnings(deposit: Wad, current_chi: Ray, initial_chi: Ray) -> Wad {
    if current_chi <= initial_chi {
        return Wad::zero();
    }
    wad_sub(
        wad_mul_ray(deposit, current_chi),
        wad_mul_ray(deposit, initial_chi),
    )
}

/// Returns the price of a linearly decaying Dutch auction after `elapsed` of `duration` seconds.
///
/// `start_price * (duration - elapsed) / duration`, and zero once the auction has expired.
#[must_use]
pub fn auction_price(start_price: Ray, elapsed: u64, duration: u64) -> Ray {
    if elapsed >= duration {
        return Ray::zero();
    }
    let remaining = I256::from_raw(U256::from(duration - elapsed));
    let duration = I256::from_raw(U256::from(duration));
    mul_div(start_price.raw(), remaining, duration).map_or_else(Ray::zero, Ray::from_raw)
}

/// Returns the liquidation penalty charged on `debt`, `debt * penalty_bps / 10_000`.
#[must_use]
pub fn liquidation_penalty(debt: Wad, penalty_bps: u64) -> Wad {
    percent_of(debt, penalty_bps, PENALTY_BPS_BASE)
}
