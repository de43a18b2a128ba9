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

use std::path::Path;

use anyhow::Context;
use kusd_cdp::{
    CdpPosition, DashboardConfig, PortfolioState, VaultState,
    calculators::{auction_price, liquidation_penalty},
    position::{MintCheck, WithdrawCheck},
    rates::{accumulate_rate, annual_yield, projected_total_debt},
};
use kusd_core::{Ray, Wad, conversions::convert_decimals};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::opt::{AccrueOpt, AuctionOpt, ConvertOpt, PortfolioOpt, PositionOpt};

#[derive(Debug, Serialize)]
struct PositionReport {
    position: CdpPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    liquidation_penalty: Option<Wad>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mint_check: Option<MintCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    withdraw_check: Option<WithdrawCheck>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse state file {}", path.display()))
}

fn with_min_debt(mut state: VaultState, config: &DashboardConfig) -> VaultState {
    if state.dust.is_zero() {
        log::debug!("No dust in state of {}, using configured minimum", state.ilk);
        state.dust = config.min_vault_debt_rad();
    }
    state
}

pub fn position(opt: &PositionOpt, config: &DashboardConfig) -> anyhow::Result<Value> {
    let state = with_min_debt(read_json(&opt.state)?, config);
    let position = CdpPosition::from_state(&state);

    let liquidation_penalty = config
        .collateral(&position.ilk)
        .map(|c| liquidation_penalty(position.total_debt, c.penalty_bps));
    let mint_check = opt.mint.map(|amount| position.check_mint(amount));
    let withdraw_check = opt.withdraw.map(|amount| position.check_withdraw(amount));
    let report = PositionReport {
        position,
        liquidation_penalty,
        mint_check,
        withdraw_check,
    };
    Ok(serde_json::to_value(report)?)
}

pub fn portfolio(opt: &PortfolioOpt, config: &DashboardConfig) -> anyhow::Result<Value> {
    let mut state: PortfolioState = read_json(&opt.state)?;
    state.vaults = state
        .vaults
        .into_iter()
        .map(|vault| with_min_debt(vault, config))
        .collect();

    let (positions, savings, summary) = state.summarize();
    Ok(json!({
        "positions": positions,
        "savings": savings,
        "summary": summary,
    }))
}

pub fn accrue(opt: &AccrueOpt) -> anyhow::Result<Value> {
    let rate = accumulate_rate(opt.duty, opt.base, opt.elapsed, opt.prev_rate)?;
    let per_second = kusd_core::checked::add(opt.base, opt.duty)?;
    let mut output = json!({
        "rate": rate,
        "annual_yield": annual_yield(per_second)?,
    });
    if let Some(art) = opt.art {
        let debt = projected_total_debt(art, opt.duty, opt.base, opt.elapsed, opt.prev_rate)?;
        output["total_debt"] = serde_json::to_value(debt)?;
    }
    Ok(output)
}

pub fn convert(opt: &ConvertOpt, config: &DashboardConfig) -> anyhow::Result<Value> {
    let from_decimals = match (opt.from_decimals, &opt.ilk) {
        (Some(decimals), _) => decimals,
        (None, Some(ilk)) => {
            config
                .collateral(ilk)
                .with_context(|| format!("unknown collateral type '{ilk}'"))?
                .decimals
        }
        (None, None) => anyhow::bail!("either --from-decimals or --ilk is required"),
    };

    let amount = convert_decimals(opt.amount, from_decimals, opt.to_decimals)?;
    Ok(json!({
        "amount": amount.to_string(),
        "decimals": opt.to_decimals,
    }))
}

pub fn auction(opt: &AuctionOpt, config: &DashboardConfig) -> Value {
    let duration = opt.duration.unwrap_or(config.auction_duration_secs);
    let price: Ray = auction_price(opt.start_price, opt.elapsed, duration);
    json!({
        "price": price,
        "duration": duration,
        "expired": opt.elapsed >= duration,
    })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use alloy_primitives::I256;
    use kusd_cdp::{
        Ilk, SavingsState,
        stubs::{ilk_wbtc_a, savings_state, vault_state_underwater, vault_state_weth},
    };
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_json<T: Serialize>(value: &T) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(value).unwrap()).unwrap();
        file
    }

    fn ray(raw: &str) -> Ray {
        raw.parse().unwrap()
    }

    #[rstest]
    fn test_position_report(vault_state_weth: VaultState) {
        let file = write_json(&vault_state_weth);
        let opt = PositionOpt {
            state: file.path().to_path_buf(),
            mint: Some(Wad::from_units(20_000)),
            withdraw: None,
        };

        let output = position(&opt, &DashboardConfig::default()).unwrap();
        assert_eq!(output["position"]["health_factor"], "2000000000000000000");
        assert_eq!(output["position"]["is_safe"], true);
        // 13% of 10,000
        assert_eq!(output["liquidation_penalty"], "1300000000000000000000");
        assert_eq!(output["mint_check"]["remains_safe"], false);
        assert!(output.get("withdraw_check").is_none());
    }

    #[rstest]
    fn test_position_falls_back_to_configured_min_debt(vault_state_weth: VaultState) {
        let state = VaultState {
            art: Wad::from_units(50),
            dust: kusd_core::Rad::zero(),
            ..vault_state_weth
        };
        let file = write_json(&state);
        let opt = PositionOpt {
            state: file.path().to_path_buf(),
            mint: None,
            withdraw: None,
        };

        let output = position(&opt, &DashboardConfig::default()).unwrap();
        assert_eq!(output["position"]["is_dusty"], true);
    }

    #[rstest]
    fn test_position_missing_file() {
        let opt = PositionOpt {
            state: PathBuf::from("/nonexistent/vault.json"),
            mint: None,
            withdraw: None,
        };
        let err = position(&opt, &DashboardConfig::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read state file"));
    }

    #[rstest]
    fn test_portfolio(
        vault_state_weth: VaultState,
        vault_state_underwater: VaultState,
        savings_state: SavingsState,
    ) {
        let file = write_json(&PortfolioState {
            vaults: vec![vault_state_weth, vault_state_underwater],
            savings: Some(savings_state),
        });
        let opt = PortfolioOpt {
            state: file.path().to_path_buf(),
        };

        let output = portfolio(&opt, &DashboardConfig::default()).unwrap();
        assert_eq!(output["positions"].as_array().unwrap().len(), 2);
        assert_eq!(output["savings"]["balance"], "105000000000000000000");
        assert_eq!(output["summary"]["vaults_at_risk"], 1);
    }

    #[rstest]
    fn test_accrue_one_year() {
        let opt = AccrueOpt {
            duty: ray("1000000000627937192491029810"),
            base: Ray::zero(),
            elapsed: 31_536_000,
            prev_rate: Ray::one(),
            art: Some(Wad::from_units(1_000)),
        };

        let output = accrue(&opt).unwrap();
        assert_eq!(output["rate"], "1019999999999999999972831879");
        assert_eq!(output["annual_yield"], "19999999999999999972831879");
        assert_eq!(output["total_debt"], "1019999999999999999972");
    }

    #[rstest]
    fn test_accrue_overflow_is_an_error() {
        let opt = AccrueOpt {
            duty: ray("1000000000627937192491029810"),
            base: Ray::zero(),
            elapsed: 1,
            prev_rate: Ray::from_raw(I256::MAX),
            art: None,
        };
        assert!(accrue(&opt).is_err());
    }

    #[rstest]
    #[case(Some(6), None, "1500000", "1500000000000000000")]
    #[case(None, Some("WBTC-A"), "150000000", "1500000000000000000")]
    fn test_convert(
        #[case] from_decimals: Option<u8>,
        #[case] ilk: Option<&str>,
        #[case] amount: &str,
        #[case] expected: &str,
    ) {
        let opt = ConvertOpt {
            amount: amount.parse().unwrap(),
            from_decimals,
            ilk: ilk.map(Ilk::new),
            to_decimals: 18,
        };
        let output = convert(&opt, &DashboardConfig::default()).unwrap();
        assert_eq!(output["amount"], expected);
    }

    #[rstest]
    fn test_convert_requires_decimals(ilk_wbtc_a: Ilk) {
        let mut opt = ConvertOpt {
            amount: I256::ONE,
            from_decimals: None,
            ilk: None,
            to_decimals: 18,
        };
        assert!(convert(&opt, &DashboardConfig::default()).is_err());

        let config = DashboardConfig {
            collaterals: Vec::new(),
            ..DashboardConfig::default()
        };
        opt.ilk = Some(ilk_wbtc_a);
        let err = convert(&opt, &config).unwrap_err();
        assert!(err.to_string().contains("unknown collateral type"));
    }

    #[rstest]
    #[case(Some(100), 50, "500000000000000000000000000", false)]
    #[case(None, 900, "750000000000000000000000000", false)]
    #[case(None, 3_600, "0", true)]
    fn test_auction(
        #[case] duration: Option<u64>,
        #[case] elapsed: u64,
        #[case] expected: &str,
        #[case] expired: bool,
    ) {
        let opt = AuctionOpt {
            start_price: Ray::one(),
            elapsed,
            duration,
        };
        let output = auction(&opt, &DashboardConfig::default());
        assert_eq!(output["price"], expected);
        assert_eq!(output["expired"], expired);
    }
}
