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

//! Errors raised by the strict arithmetic family and the rate exponentiation guards.

/// An arithmetic failure which the strict family surfaces instead of returning a wrong answer.
///
/// The display-safe family never produces these, it substitutes zero instead.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// The sum is smaller than the left operand.
    #[error("addition overflow")]
    AdditionOverflow,
    /// The right operand exceeds the left operand.
    #[error("subtraction underflow")]
    SubtractionUnderflow,
    /// The product (or a scale-up) does not fit 256 bits.
    #[error("multiplication overflow")]
    MultiplicationOverflow,
    /// The divisor is zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The quotient does not fit 256 bits (`I256::MIN / -1`).
    #[error("division overflow")]
    DivisionOverflow,
    /// A guard which can only trip on fixed-width overflow, e.g. inside `rpow`.
    #[error("arithmetic invariant violated: {0}")]
    InvariantViolated(&'static str),
}
