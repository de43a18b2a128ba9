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

//! Represents a valid collateral type identifier (`ilk`).

use std::{
    fmt::{Debug, Display, Formatter},
    hash::Hash,
    str::FromStr,
};

use alloy_primitives::B256;
use kusd_core::FAILED;
use serde::{Deserialize, Serialize};

/// The maximum length in bytes of an ilk name, the width of a `bytes32` word.
pub const ILK_MAX_LEN: usize = 32;

/// Represents a valid collateral type identifier, e.g. `WBTC-A`.
///
/// The contracts key collateral types by a `bytes32` holding the ASCII name left-aligned and
/// padded with NUL bytes.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ilk(String);

impl Ilk {
    /// Creates a new [`Ilk`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// This function returns an error:
    /// - If `value` is empty or longer than 32 bytes.
    /// - If `value` contains anything other than printable ASCII.
    pub fn new_checked<T: AsRef<str>>(value: T) -> anyhow::Result<Self> {
        let value = value.as_ref();
        if value.is_empty() {
            anyhow::bail!("invalid ilk: empty");
        }
        if value.len() > ILK_MAX_LEN {
            anyhow::bail!(
                "invalid ilk '{value}': {} bytes exceeds {ILK_MAX_LEN}",
                value.len()
            );
        }
        if !value.bytes().all(|b| b.is_ascii_graphic()) {
            anyhow::bail!("invalid ilk '{value}': must be printable ASCII without whitespace");
        }
        Ok(Self(value.to_string()))
    }

    /// Creates a new [`Ilk`] instance.
    ///
    /// # Panics
    ///
    /// This function panics:
    /// - If `value` is not a valid ilk name.
    #[must_use]
    pub fn new<T: AsRef<str>>(value: T) -> Self {
        Self::new_checked(value).expect(FAILED)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the NUL-padded `bytes32` word the contracts key this collateral type by.
    #[must_use]
    pub fn to_bytes32(&self) -> B256 {
        let mut word = [0u8; ILK_MAX_LEN];
        word[..self.0.len()].copy_from_slice(self.0.as_bytes());
        B256::from(word)
    }

    /// Decodes a NUL-padded `bytes32` word.
    ///
    /// # Errors
    ///
    /// Returns an error if the word holds a NUL before the padding or an invalid name.
    pub fn from_bytes32(word: B256) -> anyhow::Result<Self> {
        let bytes = word.as_slice();
        let len = bytes
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        if bytes[..len].contains(&0) {
            anyhow::bail!("invalid ilk word {word}: NUL byte inside name");
        }
        Self::new_checked(String::from_utf8_lossy(&bytes[..len]))
    }
}

impl Debug for Ilk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Display for Ilk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ilk {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new_checked(s)
    }
}

impl TryFrom<String> for Ilk {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new_checked(value)
    }
}

impl From<Ilk> for String {
    fn from(value: Ilk) -> Self {
        value.0
    }
}

impl AsRef<str> for Ilk {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
