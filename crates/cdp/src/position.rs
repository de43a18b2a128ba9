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

//! Derived view of a single vault.
//!
//! [`VaultState`] carries the raw words read from the vault engine and spotter. A
//! [`CdpPosition`] is recomputed from it on every call and never cached.

use kusd_core::{
    Rad, Ray, Wad,
    conversions::{ray_to_wad, wad_to_rad},
    display::{ray_mul, wad_add, wad_times_ray},
};
use serde::{Deserialize, Serialize};

use crate::{
    calculators::{
        DebtCeiling, accrued_fees, collateral_ratio, collateral_value, health_factor,
        is_position_safe, liquidation_price, max_mint, max_withdraw, total_debt,
    },
    ilk::Ilk,
};

/// Raw state of one vault and its collateral type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultState {
    /// The collateral type of the vault.
    pub ilk: Ilk,
    /// Locked collateral (`ink`).
    pub ink: Wad,
    /// Normalized debt of the vault (`art`).
    pub art: Wad,
    /// Normalized debt of the whole collateral type (`Art`).
    pub ilk_art: Wad,
    /// Stability-fee accumulator of the collateral type.
    pub rate: Ray,
    /// Collateral price divided by the liquidation ratio.
    pub spot: Ray,
    /// Liquidation ratio from the spotter.
    pub mat: Ray,
    /// Debt ceiling of the collateral type, zero when unset.
    #[serde(default)]
    pub line: Rad,
    /// Minimum debt of a vault, zero when unset.
    #[serde(default)]
    pub dust: Rad,
}

/// Risk metrics of a vault as of its [`VaultState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CdpPosition {
    /// The collateral type of the vault.
    pub ilk: Ilk,
    /// Locked collateral in token units.
    pub collateral: Wad,
    /// Market value of the locked collateral.
    pub collateral_value: Wad,
    /// Debt before the stability-fee accumulator is applied.
    pub normalized_debt: Wad,
    /// Debt owed including accrued stability fees.
    pub total_debt: Wad,
    /// Stability fees accrued on top of the normalized debt.
    pub accrued_fees: Wad,
    /// Collateral value over debt, zero without debt.
    pub collateral_ratio: Wad,
    /// Minimum collateral ratio before liquidation.
    pub liquidation_ratio: Wad,
    /// Collateral price at which the vault becomes liquidatable.
    pub liquidation_price: Wad,
    /// Market price of the collateral, recovered as `spot * mat`.
    pub price: Wad,
    /// Collateral ratio over liquidation ratio, zero without debt.
    pub health_factor: Wad,
    /// Additional debt drawable within both the collateral and the debt ceiling.
    pub max_mint: Wad,
    /// Collateral removable while staying at or above the liquidation ratio.
    pub max_withdraw: Wad,
    /// Minimum debt of a vault (`dust`).
    pub min_debt: Rad,
    /// Remaining room under the collateral type's debt ceiling.
    pub debt_ceiling: DebtCeiling,
    /// The displayed ratio is at or above the liquidation ratio, or there is no debt.
    pub is_safe: bool,
    /// The engine's own test `ink * spot < art * rate`, exact at RAD scale.
    ///
    /// At the threshold this can disagree with `is_safe`, which compares truncated ratios.
    pub is_liquidatable: bool,
    /// Debt is drawn but below the minimum vault debt.
    pub is_dusty: bool,
    /// The vault holds collateral or debt.
    pub has_position: bool,
}

impl CdpPosition {
    /// Derives the position metrics from `state`.
    #[must_use]
    pub fn from_state(state: &VaultState) -> Self {
        let price = if state.mat.is_zero() {
            Wad::zero()
        } else {
            ray_to_wad(ray_mul(state.spot, state.mat))
        };
        let liquidation_ratio = ray_to_wad(state.mat);

        let debt = total_debt(state.art, state.rate);
        let ratio = collateral_ratio(state.ink, price, debt);
        let health = health_factor(ratio, liquidation_ratio);
        let debt_ceiling =
            DebtCeiling::from_rad(state.line, wad_times_ray(state.ilk_art, state.rate));

        let vault_debt = wad_times_ray(state.art, state.rate);
        let is_liquidatable = wad_times_ray(state.ink, state.spot) < vault_debt;
        let is_dusty = state.art.is_positive() && vault_debt < state.dust;

        let position = Self {
            ilk: state.ilk.clone(),
            collateral: state.ink,
            collateral_value: collateral_value(state.ink, price),
            normalized_debt: state.art,
            total_debt: debt,
            accrued_fees: accrued_fees(state.art, state.rate),
            collateral_ratio: ratio,
            liquidation_ratio,
            liquidation_price: liquidation_price(state.ink, debt, liquidation_ratio),
            price,
            health_factor: health,
            max_mint: max_mint(state.ink, price, liquidation_ratio, debt, Some(debt_ceiling)),
            max_withdraw: max_withdraw(state.ink, debt, price, liquidation_ratio),
            min_debt: state.dust,
            debt_ceiling,
            is_safe: debt.is_zero() || is_position_safe(ratio, liquidation_ratio),
            is_liquidatable,
            is_dusty,
            has_position: state.ink.is_positive() || state.art.is_positive(),
        };

        log::debug!(
            "Derived position {}: ratio={}, health={}, safe={}",
            position.ilk,
            position.collateral_ratio,
            position.health_factor,
            position.is_safe,
        );
        position
    }

    /// Checks whether `amount` of additional debt can be drawn.
    #[must_use]
    pub fn check_mint(&self, amount: Wad) -> MintCheck {
        MintCheck {
            has_collateral: self.collateral.is_positive(),
            within_debt_ceiling: !self.debt_ceiling.is_set()
                || amount <= self.debt_ceiling.headroom,
            meets_min_debt: self.meets_min_debt(wad_add(self.total_debt, amount)),
            remains_safe: amount <= self.collateral_headroom(),
        }
    }

    /// Checks whether `amount` of collateral can be withdrawn.
    #[must_use]
    pub fn check_withdraw(&self, amount: Wad) -> WithdrawCheck {
        WithdrawCheck {
            has_collateral: amount <= self.collateral,
            remains_safe: amount <= self.max_withdraw,
            meets_min_debt: self.meets_min_debt(self.total_debt),
        }
    }

    fn collateral_headroom(&self) -> Wad {
        max_mint(
            self.collateral,
            self.price,
            self.liquidation_ratio,
            self.total_debt,
            None,
        )
    }

    fn meets_min_debt(&self, debt: Wad) -> bool {
        if debt.is_zero() {
            return true;
        }
        // A debt too large for RAD is far above any floor
        wad_to_rad(debt).map_or(true, |debt| debt >= self.min_debt)
    }
}

/// Outcome of [`CdpPosition::check_mint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MintCheck {
    /// The vault holds collateral.
    pub has_collateral: bool,
    /// The amount fits under the debt ceiling, or no ceiling is set.
    pub within_debt_ceiling: bool,
    /// The resulting debt is zero or at least the minimum vault debt.
    pub meets_min_debt: bool,
    /// The resulting debt keeps the vault at or above its liquidation ratio.
    pub remains_safe: bool,
}

impl MintCheck {
    /// Returns `true` if every condition holds.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.has_collateral && self.within_debt_ceiling && self.meets_min_debt && self.remains_safe
    }
}

/// Outcome of [`CdpPosition::check_withdraw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WithdrawCheck {
    /// The amount does not exceed the locked collateral.
    pub has_collateral: bool,
    /// The remaining collateral keeps the vault at or above its liquidation ratio.
    pub remains_safe: bool,
    /// The current debt is zero or at least the minimum vault debt.
    pub meets_min_debt: bool,
}

impl WithdrawCheck {
    /// Returns `true` if every condition holds.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.has_collateral && self.remains_safe && self.meets_min_debt
    }
}
