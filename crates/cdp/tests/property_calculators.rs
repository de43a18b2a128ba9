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

//! Property-based tests for the position calculators.
//!
//! These tests verify invariants that hold for any position:
//! - The collateral ratio rises with collateral and price and falls with debt
//! - A position exactly at its liquidation ratio has a health factor of one
//! - Safety and a health factor of at least one agree
//! - Normalizing and denormalizing debt never inflates it

use kusd_cdp::calculators::{
    DebtCeiling, collateral_ratio, health_factor, is_position_safe, max_mint, max_withdraw,
    normalized_debt, total_debt,
};
use kusd_core::{Ray, Wad};
use proptest::prelude::*;
use rstest::rstest;

/// Up to a trillion units at WAD scale.
fn amount() -> impl Strategy<Value = Wad> {
    (0i128..=1_000_000_000_000_000_000_000_000_000_000).prop_map(Wad::from_raw_i128)
}

fn positive_amount() -> impl Strategy<Value = Wad> {
    (1i128..=1_000_000_000_000_000_000_000_000_000_000).prop_map(Wad::from_raw_i128)
}

/// Liquidation ratios from 100% to 1000%.
fn liquidation_ratio() -> impl Strategy<Value = Wad> {
    (1_000_000_000_000_000_000i128..=10_000_000_000_000_000_000).prop_map(Wad::from_raw_i128)
}

/// Accumulated rates from one to ten.
fn accumulated_rate() -> impl Strategy<Value = Ray> {
    (1_000_000_000_000_000_000_000_000_000i128..=10_000_000_000_000_000_000_000_000_000)
        .prop_map(Ray::from_raw_i128)
}

proptest! {
    /// Property: Adding collateral never lowers the collateral ratio.
    #[rstest]
    fn collateral_ratio_is_monotonic_in_collateral(
        a in amount(),
        b in amount(),
        price in positive_amount(),
        debt in positive_amount(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(collateral_ratio(low, price, debt) <= collateral_ratio(high, price, debt));
    }

    /// Property: A higher price never lowers the collateral ratio.
    #[rstest]
    fn collateral_ratio_is_monotonic_in_price(
        collateral in amount(),
        a in amount(),
        b in amount(),
        debt in positive_amount(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            collateral_ratio(collateral, low, debt) <= collateral_ratio(collateral, high, debt)
        );
    }

    /// Property: More debt never raises the collateral ratio.
    #[rstest]
    fn collateral_ratio_falls_with_debt(
        collateral in amount(),
        price in amount(),
        a in positive_amount(),
        b in positive_amount(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            collateral_ratio(collateral, price, high) <= collateral_ratio(collateral, price, low)
        );
    }

    /// Property: Without debt the ratio is the zero sentinel.
    #[rstest]
    fn collateral_ratio_without_debt_is_zero(collateral in amount(), price in amount()) {
        prop_assert_eq!(collateral_ratio(collateral, price, Wad::zero()), Wad::zero());
    }

    /// Property: A ratio equal to the liquidation ratio is a health factor of exactly one.
    #[rstest]
    fn health_factor_at_threshold_is_one(ratio in positive_amount()) {
        prop_assert_eq!(health_factor(ratio, ratio), Wad::one());
    }

    /// Property: Without a liquidation ratio every position counts as healthy.
    #[rstest]
    fn health_factor_without_threshold_is_one(ratio in amount()) {
        prop_assert_eq!(health_factor(ratio, Wad::zero()), Wad::one());
    }

    /// Property: A position is safe exactly when its health factor is at least one.
    #[rstest]
    fn safety_agrees_with_health_factor(ratio in amount(), threshold in liquidation_ratio()) {
        prop_assert_eq!(
            is_position_safe(ratio, threshold),
            health_factor(ratio, threshold) >= Wad::one()
        );
    }

    /// Property: All collateral is withdrawable without debt.
    #[rstest]
    fn max_withdraw_without_debt_is_all(
        collateral in amount(),
        price in amount(),
        threshold in liquidation_ratio(),
    ) {
        prop_assert_eq!(max_withdraw(collateral, Wad::zero(), price, threshold), collateral);
    }

    /// Property: Withdrawable collateral never exceeds the collateral held.
    #[rstest]
    fn max_withdraw_is_bounded(
        collateral in amount(),
        debt in amount(),
        price in amount(),
        threshold in liquidation_ratio(),
    ) {
        let withdrawable = max_withdraw(collateral, debt, price, threshold);
        prop_assert!(withdrawable >= Wad::zero());
        prop_assert!(withdrawable <= collateral);
    }

    /// Property: A configured ceiling always bounds the mintable amount.
    #[rstest]
    fn max_mint_respects_ceiling(
        collateral in amount(),
        price in amount(),
        threshold in liquidation_ratio(),
        debt in amount(),
        line in positive_amount(),
        used in amount(),
    ) {
        let ceiling = DebtCeiling::from_wad(line, used);
        let mintable = max_mint(collateral, price, threshold, debt, Some(ceiling));
        prop_assert!(mintable <= ceiling.headroom);
        prop_assert!(mintable <= max_mint(collateral, price, threshold, debt, None));
        prop_assert!(mintable >= Wad::zero());
    }

    /// Property: Owed debt is never below normalized debt and normalizing it never inflates it.
    #[rstest]
    fn debt_normalization_never_inflates(art in amount(), rate in accumulated_rate()) {
        let owed = total_debt(art, rate);
        prop_assert!(owed >= art);
        prop_assert!(normalized_debt(owed, rate) <= art);
    }
}
