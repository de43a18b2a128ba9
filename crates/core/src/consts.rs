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

//! Precision constants for the three fixed-point scales and their ratios.
//!
//! Limbs are little-endian 64-bit words.

use alloy_primitives::{I256, U256};

/// The number of implied decimal digits of a WAD value.
pub const WAD_DECIMALS: u8 = 18;

/// The number of implied decimal digits of a RAY value.
pub const RAY_DECIMALS: u8 = 27;

/// The number of implied decimal digits of a RAD value.
pub const RAD_DECIMALS: u8 = 45;

/// 10^9, the ratio RAY / WAD.
pub const WAD_RAY_RATIO: I256 = I256::from_raw(U256::from_limbs([0x3b9a_ca00, 0, 0, 0]));

/// 10^18, the ratio RAD / RAY.
pub const RAY_RAD_RATIO: I256 = I256::from_raw(U256::from_limbs([0x0de0_b6b3_a764_0000, 0, 0, 0]));

/// 10^27, the ratio RAD / WAD.
pub const WAD_RAD_RATIO: I256 = RAY;

/// One WAD (10^18).
pub const WAD: I256 = I256::from_raw(U256::from_limbs([0x0de0_b6b3_a764_0000, 0, 0, 0]));

/// One RAY (10^27).
pub const RAY: I256 = I256::from_raw(RAY_U256);

/// One RAD (10^45).
pub const RAD: I256 = I256::from_raw(U256::from_limbs([
    0x0b22_a000_0000_0000,
    0xe086_b93c_e2f7_68a0,
    0x002c_d76f,
    0,
]));

/// One RAY (10^27) as an unsigned word, the unit `rpow` works in.
pub const RAY_U256: U256 = U256::from_limbs([0x9fd0_803c_e800_0000, 0x033b_2e3c, 0, 0]);

/// Half a RAY (5 * 10^26), added before truncating division to round to nearest.
pub const HALF_RAY_U256: U256 = U256::from_limbs([0x4fe8_401e_7400_0000, 0x019d_971e, 0, 0]);

/// Basis points in one whole (100% = 10,000 bps).
pub const BPS_BASE: u64 = 10_000;

/// Percent in one whole.
pub const PERCENT_BASE: u64 = 100;

/// Seconds in a 365-day year, the horizon for annualizing per-second rates.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;
