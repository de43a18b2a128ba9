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

//! Fixed-point financial math for a multi-collateral stablecoin protocol.
//!
//! The `kusd-core` crate mirrors the integer semantics of the protocol's Solidity contracts so that
//! values derived off-chain agree bit-for-bit with the values the contracts hold. It supplies:
//!
//! - The three fixed-point scales (WAD = 10^18, RAY = 10^27, RAD = 10^45) and their ratios.
//! - Scale-tagged integer types ([`Wad`], [`Ray`], [`Rad`]) which reject cross-scale arithmetic
//!   unless an explicit, named conversion is called.
//! - Two deliberately separate arithmetic families:
//!   - [`display`]: never fails, degenerate inputs (division by zero, overflow) yield zero.
//!   - [`checked`]: fails with a [`MathError`] on overflow, underflow or division by zero.
//! - Compounding-rate exponentiation ([`rpow::rpow`]) identical to the on-chain accumulators.
//! - Lossless and truncating conversions between scales and token decimal counts.
//!
//! Every function is pure and synchronous. Nothing in this crate performs I/O or holds state.
//!
//! # Feature flags
//!
//! - `reference`: Compiles the independent reference implementation of `rpow`/`rmul` used to
//!   cross-check the primary implementation (always available under `cfg(test)`).

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod checked;
pub mod consts;
pub mod conversions;
pub mod display;
pub mod error;
pub mod fixed;
pub mod full_math;
pub mod rpow;

#[cfg(any(test, feature = "reference"))]
pub mod reference;

// Re-exports
pub use crate::{
    error::MathError,
    fixed::{FixedPoint, Rad, RadScale, Ray, RayScale, Scale, Wad, WadScale},
};

/// Message for when a correctness check on a constructor argument fails.
pub const FAILED: &str = "Condition failed";
