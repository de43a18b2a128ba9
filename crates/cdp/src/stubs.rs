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

//! Fixture functions providing stub collateral types and vault states for testing.

use kusd_core::{Rad, Ray, Wad};
use rstest::fixture;

use crate::{
    ilk::Ilk,
    portfolio::SavingsState,
    position::VaultState,
};

fn ray(raw: &str) -> Ray {
    raw.parse().unwrap()
}

#[fixture]
pub fn ilk_weth_a() -> Ilk {
    Ilk::new("WETH-A")
}

#[fixture]
pub fn ilk_wbtc_a() -> Ilk {
    Ilk::new("WBTC-A")
}

/// 10 WETH at $3,000 backing 10,000 of debt against a 150% liquidation ratio.
#[fixture]
pub fn vault_state_weth(ilk_weth_a: Ilk) -> VaultState {
    VaultState {
        ilk: ilk_weth_a,
        ink: Wad::from_units(10),
        art: Wad::from_units(10_000),
        ilk_art: Wad::from_units(500_000),
        rate: Ray::one(),
        spot: Ray::from_units(2_000),
        mat: ray("1500000000000000000000000000"),
        line: Rad::from_units(1_000_000),
        dust: Rad::from_units(100),
    }
}

/// 10 WBTC at $1,500 backing 10,000 of normalized debt after 5% of fees, below 150%.
#[fixture]
pub fn vault_state_underwater(ilk_wbtc_a: Ilk) -> VaultState {
    VaultState {
        ilk: ilk_wbtc_a,
        ink: Wad::from_units(10),
        art: Wad::from_units(10_000),
        ilk_art: Wad::from_units(2_000_000),
        rate: ray("1050000000000000000000000000"),
        spot: Ray::from_units(1_000),
        mat: ray("1500000000000000000000000000"),
        line: Rad::from_units(10_000_000),
        dust: Rad::from_units(100),
    }
}

#[fixture]
pub fn vault_state_empty(vault_state_weth: VaultState) -> VaultState {
    VaultState {
        ink: Wad::zero(),
        art: Wad::zero(),
        ..vault_state_weth
    }
}

/// 100 shares of the savings module at an accumulator of 1.05 and a 5% annual rate.
#[fixture]
pub fn savings_state() -> SavingsState {
    SavingsState {
        pie: Wad::from_units(100),
        chi: ray("1050000000000000000000000000"),
        dsr: ray("1000000001547125957863212448"),
        initial_chi: Some(Ray::one()),
    }
}
