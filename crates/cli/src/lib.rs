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

//! Command-line interface for the KUSD fixed-point math engine.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

mod commands;
pub mod opt;

use kusd_cdp::DashboardConfig;

use crate::opt::{Commands, KusdCli};

/// Executes the parsed command and prints its JSON output on stdout.
///
/// # Errors
///
/// Returns an error if the configuration or an input file cannot be loaded, or the computation
/// overflows.
pub fn run(opt: &KusdCli) -> anyhow::Result<()> {
    let config = match &opt.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let output = match &opt.command {
        Commands::Position(position_opt) => commands::position(position_opt, &config)?,
        Commands::Portfolio(portfolio_opt) => commands::portfolio(portfolio_opt, &config)?,
        Commands::Accrue(accrue_opt) => commands::accrue(accrue_opt)?,
        Commands::Convert(convert_opt) => commands::convert(convert_opt, &config)?,
        Commands::Auction(auction_opt) => commands::auction(auction_opt, &config),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
