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

//! Configuration of the collateral types shown by the dashboard.

use std::{collections::HashSet, path::Path};

use anyhow::Context;
use kusd_core::Rad;
use serde::{Deserialize, Serialize};

use crate::{calculators::PENALTY_BPS_BASE, ilk::Ilk};

/// The largest token decimals whose scale factor fits a signed 256-bit word.
pub const MAX_TOKEN_DECIMALS: u8 = 76;

/// A collateral type and the token backing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollateralConfig {
    pub ilk: Ilk,
    /// The ERC-20 symbol of the collateral token.
    pub token: String,
    /// Decimals of the collateral token.
    pub decimals: u8,
    /// Liquidation penalty in basis points.
    #[serde(default = "default_penalty_bps")]
    pub penalty_bps: u64,
}

impl CollateralConfig {
    fn new(ilk: &str, token: &str, decimals: u8) -> Self {
        Self {
            ilk: Ilk::new(ilk),
            token: token.to_string(),
            decimals,
            penalty_bps: default_penalty_bps(),
        }
    }
}

/// Configuration for the dashboard calculations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// The collateral types, in display order.
    #[serde(default = "default_collaterals")]
    pub collaterals: Vec<CollateralConfig>,
    /// Minimum vault debt in whole KUSD, used when a vault state carries no `dust`.
    #[serde(default = "default_min_vault_debt")]
    pub min_vault_debt: u64,
    /// Duration of a collateral auction in seconds.
    #[serde(default = "default_auction_duration_secs")]
    pub auction_duration_secs: u64,
}

const fn default_penalty_bps() -> u64 {
    1_300
}

const fn default_min_vault_debt() -> u64 {
    100
}

const fn default_auction_duration_secs() -> u64 {
    3_600
}

fn default_collaterals() -> Vec<CollateralConfig> {
    vec![
        CollateralConfig::new("WBTC-A", "WBTC", 8),
        CollateralConfig::new("WETH-A", "WETH", 18),
        CollateralConfig::new("USDT-A", "USDT", 6),
        CollateralConfig::new("USDC-A", "USDC", 6),
        CollateralConfig::new("DAI-A", "DAI", 18),
    ]
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            collaterals: default_collaterals(),
            min_vault_debt: default_min_vault_debt(),
            auction_duration_secs: default_auction_duration_secs(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails [`Self::validate`].
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse dashboard config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Self::from_toml_str`] fails.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded {} collateral types from {}",
            config.collaterals.len(),
            path.display()
        );
        Ok(config)
    }

    /// Checks the configuration for consistency.
    ///
    /// # Errors
    ///
    /// This function returns an error:
    /// - If a collateral type appears more than once.
    /// - If token decimals exceed [`MAX_TOKEN_DECIMALS`].
    /// - If a penalty exceeds 10,000 basis points.
    /// - If the auction duration is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for collateral in &self.collaterals {
            if !seen.insert(&collateral.ilk) {
                anyhow::bail!("duplicate collateral type '{}'", collateral.ilk);
            }
            if collateral.decimals > MAX_TOKEN_DECIMALS {
                anyhow::bail!(
                    "invalid decimals {} for '{}': must not exceed {MAX_TOKEN_DECIMALS}",
                    collateral.decimals,
                    collateral.ilk
                );
            }
            if collateral.penalty_bps > PENALTY_BPS_BASE {
                anyhow::bail!(
                    "invalid penalty {} bps for '{}'",
                    collateral.penalty_bps,
                    collateral.ilk
                );
            }
        }
        if self.auction_duration_secs == 0 {
            anyhow::bail!("invalid auction duration: must be positive");
        }
        Ok(())
    }

    /// Returns the configuration of `ilk`, if present.
    #[must_use]
    pub fn collateral(&self, ilk: &Ilk) -> Option<&CollateralConfig> {
        self.collaterals.iter().find(|c| &c.ilk == ilk)
    }

    /// Returns the minimum vault debt at RAD scale.
    #[must_use]
    pub fn min_vault_debt_rad(&self) -> Rad {
        Rad::from_units(i128::from(self.min_vault_debt))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::stubs::ilk_weth_a;

    #[rstest]
    fn test_default_collateral_types() {
        let config = DashboardConfig::default();
        let decimals: Vec<(&str, u8)> = config
            .collaterals
            .iter()
            .map(|c| (c.ilk.as_str(), c.decimals))
            .collect();
        assert_eq!(
            decimals,
            vec![
                ("WBTC-A", 8),
                ("WETH-A", 18),
                ("USDT-A", 6),
                ("USDC-A", 6),
                ("DAI-A", 18)
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_empty_document_is_default() {
        assert_eq!(DashboardConfig::from_toml_str("").unwrap(), DashboardConfig::default());
    }

    #[rstest]
    fn test_parse_overrides() {
        let config = DashboardConfig::from_toml_str(
            r#"
            min_vault_debt = 5000
            auction_duration_secs = 21600

            [[collaterals]]
            ilk = "LINK-A"
            token = "LINK"
            decimals = 18
            penalty_bps = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.collaterals.len(), 1);
        assert_eq!(config.collaterals[0].penalty_bps, 1_500);
        assert_eq!(config.min_vault_debt_rad(), Rad::from_units(5_000));
        assert_eq!(config.auction_duration_secs, 21_600);
    }

    #[rstest]
    fn test_penalty_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [[collaterals]]
            ilk = "USDC-A"
            token = "USDC"
            decimals = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.collaterals[0].penalty_bps, 1_300);
    }

    #[rstest]
    #[case("[[collaterals]]\nilk = \"A\"\ntoken = \"A\"\ndecimals = 77\n", "invalid decimals")]
    #[case(
        concat!(
            "[[collaterals]]\nilk = \"A\"\ntoken = \"A\"\ndecimals = 6\n",
            "[[collaterals]]\nilk = \"A\"\ntoken = \"B\"\ndecimals = 8\n",
        ),
        "duplicate collateral type"
    )]
    #[case(
        "[[collaterals]]\nilk = \"A\"\ntoken = \"A\"\ndecimals = 6\npenalty_bps = 10001\n",
        "invalid penalty"
    )]
    #[case("auction_duration_secs = 0\n", "invalid auction duration")]
    fn test_validation_errors(#[case] content: &str, #[case] expected: &str) {
        let err = DashboardConfig::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[rstest]
    fn test_invalid_ilk_is_a_parse_error() {
        let content = "[[collaterals]]\nilk = \"\"\ntoken = \"A\"\ndecimals = 6\n";
        let err = DashboardConfig::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[rstest]
    fn test_load_from_file(ilk_weth_a: Ilk) {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[collaterals]]\nilk = \"WETH-A\"\ntoken = \"WETH\"\ndecimals = 18"
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        let weth = config.collateral(&ilk_weth_a).unwrap();
        assert_eq!(weth.token, "WETH");
        assert!(config.collateral(&Ilk::new("WBTC-A")).is_none());
    }

    #[rstest]
    fn test_load_missing_file() {
        let err = DashboardConfig::load(Path::new("/nonexistent/kusd.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
