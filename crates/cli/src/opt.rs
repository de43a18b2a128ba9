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

use std::path::PathBuf;

use alloy_primitives::I256;
use clap::Parser;
use kusd_cdp::Ilk;
use kusd_core::{Ray, Wad};
use log::LevelFilter;

/// Main CLI structure for parsing command-line arguments and options.
///
/// Every command reads raw on-chain words (decimal integers at their native scale) and prints
/// its result as JSON on stdout.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct KusdCli {
    /// Maximum level of diagnostics written to the log.
    #[arg(long, global = true, default_value = "info", env = "KUSD_LOG_LEVEL")]
    pub log_level: LevelFilter,
    /// Path to a TOML dashboard configuration, built-in defaults apply when absent.
    #[arg(long, global = true, env = "KUSD_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for the KUSD CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    Position(PositionOpt),
    Portfolio(PortfolioOpt),
    Accrue(AccrueOpt),
    Convert(ConvertOpt),
    Auction(AuctionOpt),
}

/// Options for deriving a single vault position.
#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the risk metrics of a vault from its raw state", long_about = None)]
pub struct PositionOpt {
    /// JSON file holding the vault state.
    #[arg(long)]
    pub state: PathBuf,
    /// Additional debt (WAD) to check against the position.
    #[arg(long)]
    pub mint: Option<Wad>,
    /// Collateral (WAD) to check for withdrawal.
    #[arg(long)]
    pub withdraw: Option<Wad>,
}

/// Options for summarizing every vault of an account.
#[derive(Parser, Debug, Clone)]
#[command(about = "Derive every vault and the savings deposit of an account", long_about = None)]
pub struct PortfolioOpt {
    /// JSON file holding the vault states and optional savings state.
    #[arg(long)]
    pub state: PathBuf,
}

/// Options for projecting the stability-fee accumulator.
#[derive(Parser, Debug, Clone)]
#[command(about = "Project a stability-fee accumulator forward in time", long_about = None)]
pub struct AccrueOpt {
    /// Per-second fee of the collateral type (RAY).
    #[arg(long)]
    pub duty: Ray,
    /// Per-second base fee shared by every collateral type (RAY).
    #[arg(long, default_value = "0")]
    pub base: Ray,
    /// Seconds since the accumulator was last updated.
    #[arg(long)]
    pub elapsed: u64,
    /// Accumulator at the last update (RAY).
    #[arg(long, default_value = "1000000000000000000000000000")]
    pub prev_rate: Ray,
    /// Normalized debt (WAD) to project the owed debt of.
    #[arg(long)]
    pub art: Option<Wad>,
}

/// Options for converting an amount between token decimals.
#[derive(Parser, Debug, Clone)]
#[command(about = "Convert a raw amount between token decimals", long_about = None)]
pub struct ConvertOpt {
    /// Raw integer amount.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: I256,
    /// Decimals of the amount, looked up from `--ilk` when omitted.
    #[arg(long)]
    pub from_decimals: Option<u8>,
    /// Collateral type whose token decimals apply to the amount.
    #[arg(long)]
    pub ilk: Option<Ilk>,
    /// Decimals to convert to.
    #[arg(long, default_value_t = 18)]
    pub to_decimals: u8,
}

/// Options for pricing a collateral auction.
#[derive(Parser, Debug, Clone)]
#[command(about = "Price a linearly decaying collateral auction", long_about = None)]
pub struct AuctionOpt {
    /// Starting price of the auction (RAY).
    #[arg(long)]
    pub start_price: Ray,
    /// Seconds since the auction started.
    #[arg(long)]
    pub elapsed: u64,
    /// Auction duration in seconds, taken from the configuration when omitted.
    #[arg(long)]
    pub duration: Option<u64>,
}
