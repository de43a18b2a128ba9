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

//! Aggregation of vault positions and savings into a single account summary.

use kusd_core::{
    Ray, Wad,
    display::{wad_add, wad_div, wad_mul, wad_mul_ray, wad_sub},
};
use serde::{Deserialize, Serialize};

use crate::{
    calculators::dsr_earnings,
    position::{CdpPosition, VaultState},
    rates::annual_yield,
};

/// Raw state of an account's deposit in the savings module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavingsState {
    /// Savings shares held (`pie`).
    pub pie: Wad,
    /// Current savings accumulator.
    pub chi: Ray,
    /// Per-second savings rate.
    pub dsr: Ray,
    /// Accumulator at the time of deposit, if known.
    #[serde(default)]
    pub initial_chi: Option<Ray>,
}

/// Derived view of a savings deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SavingsPosition {
    /// Savings shares held.
    pub shares: Wad,
    /// Redeemable balance, `pie * chi`.
    pub balance: Wad,
    /// Earnings since deposit, zero when the deposit accumulator is unknown.
    pub earnings: Wad,
    /// Annual yield as a RAY fraction.
    pub annual_yield: Ray,
}

impl SavingsPosition {
    /// Derives the savings view from `state`.
    #[must_use]
    pub fn from_state(state: &SavingsState) -> Self {
        let annual_yield = annual_yield(state.dsr).unwrap_or_else(|e| {
            log::warn!("Annual yield of savings rate {} not representable: {e}", state.dsr);
            Ray::zero()
        });
        let earnings = state
            .initial_chi
            .map_or_else(Wad::zero, |initial| dsr_earnings(state.pie, state.chi, initial));

        Self {
            shares: state.pie,
            balance: wad_mul_ray(state.pie, state.chi),
            earnings,
            annual_yield,
        }
    }
}

/// Raw state of every vault and the savings deposit of one account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioState {
    /// Every vault of the account.
    #[serde(default)]
    pub vaults: Vec<VaultState>,
    /// The savings deposit, if any.
    #[serde(default)]
    pub savings: Option<SavingsState>,
}

/// Account-wide totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    /// Market value of the collateral across all vaults.
    pub total_collateral_value: Wad,
    /// Debt owed across all vaults.
    pub total_debt: Wad,
    /// Redeemable savings balance, zero without a deposit.
    pub savings_balance: Wad,
    /// Collateral value plus savings less debt, negative when underwater.
    pub net_worth: Wad,
    /// Health factor of the indebted vaults weighted by their debt, `None` without debt.
    pub overall_health_factor: Option<Wad>,
    /// Vaults holding collateral or debt.
    pub active_vaults: usize,
    /// Vaults below their liquidation ratio.
    pub vaults_at_risk: usize,
}

impl PortfolioSummary {
    /// Aggregates `positions` and an optional `savings` deposit.
    #[must_use]
    pub fn new(positions: &[CdpPosition], savings: Option<&SavingsPosition>) -> Self {
        let mut total_collateral_value = Wad::zero();
        let mut total_debt = Wad::zero();
        let mut weighted_health = Wad::zero();
        let mut active_vaults = 0;
        let mut vaults_at_risk = 0;

        for position in positions.iter().filter(|p| p.has_position) {
            active_vaults += 1;
            if !position.is_safe {
                vaults_at_risk += 1;
            }
            total_collateral_value = wad_add(total_collateral_value, position.collateral_value);
            total_debt = wad_add(total_debt, position.total_debt);
            weighted_health = wad_add(
                weighted_health,
                wad_mul(position.health_factor, position.total_debt),
            );
        }

        let savings_balance = savings.map_or_else(Wad::zero, |s| s.balance);
        let net_worth = wad_sub(wad_add(total_collateral_value, savings_balance), total_debt);
        let overall_health_factor =
            (!total_debt.is_zero()).then(|| wad_div(weighted_health, total_debt));

        Self {
            total_collateral_value,
            total_debt,
            savings_balance,
            net_worth,
            overall_health_factor,
            active_vaults,
            vaults_at_risk,
        }
    }
}

impl PortfolioState {
    /// Derives every position and summarizes them.
    #[must_use]
    pub fn summarize(&self) -> (Vec<CdpPosition>, Option<SavingsPosition>, PortfolioSummary) {
        let positions: Vec<CdpPosition> = self.vaults.iter().map(CdpPosition::from_state).collect();
        let savings = self.savings.as_ref().map(SavingsPosition::from_state);
        let summary = PortfolioSummary::new(&positions, savings.as_ref());
        (positions, savings, summary)
    }
}
