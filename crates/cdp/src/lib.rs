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

//! Risk metrics and rate projections for KUSD collateralized debt positions.
//!
//! The `kusd-cdp` crate builds on the fixed-point arithmetic of `kusd-core` to derive everything
//! the dashboard shows about a vault: collateralization, liquidation thresholds, mintable and
//! withdrawable amounts, accrued stability fees and savings balances projected to the present.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs and `rstest` fixtures for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod calculators;
pub mod config;
pub mod ilk;
pub mod portfolio;
pub mod position;
pub mod rates;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use crate::{
    config::{CollateralConfig, DashboardConfig},
    ilk::Ilk,
    portfolio::{PortfolioState, PortfolioSummary, SavingsPosition, SavingsState},
    position::{CdpPosition, VaultState},
};
