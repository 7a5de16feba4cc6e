// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use clap::Parser;
use std::path::PathBuf;
use std::fs::File;
use num::BigRational;
use pb::utility::Utility;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(version = "0.1", author = "Andrew Conway", name="equal_shares")]
/// Count a participatory budgeting election with the Exact Method of Equal Shares, and work out
/// the smallest increase in each voter's share of the budget that would change the outcome.
struct Opts {
    /// The .pb file (see pabulib.org) to get the election from
    #[clap(value_parser)]
    election : PathBuf,

    /// The utility function: cardinal (also called approval) or cost (also called uniform).
    #[clap(short, long, default_value = "cardinal")]
    utility : Utility,

    /// Use this total budget instead of the one in the file. May be an integer, decimal or fraction like 1000/3.
    #[clap(short, long, value_parser = pb::rational::parse_rational)]
    budget : Option<BigRational>,

    /// Only consider projects not already funded when looking for the smallest budget increase.
    #[clap(long)]
    skip_selected : bool,

    /// An optional output file. If not specified, the input file name is used with the extension changed to .ees.json
    #[clap(short, long, value_parser)]
    out : Option<PathBuf>,

    /// Log each step of the count to stderr. RUST_LOG overrides this.
    #[clap(long)]
    verbose : bool,
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_|EnvFilter::new(if opt.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let election = pabulib::parse(&opt.election)?;
    let election = main_app::override_budget(election,opt.budget.clone())?;
    info!("Read {} with {} projects, {} voters and budget {}",election.name,election.num_projects(),election.num_voters(),election.budget());
    let report = main_app::count_and_certify(&election,opt.utility,opt.skip_selected)?;

    let out_path = match &opt.out {
        Some(path) => path.clone(),
        None => opt.election.with_extension("ees.json"),
    };
    if let Some(parent) = out_path.parent() { if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; } }
    serde_json::to_writer_pretty(File::create(&out_path)?,&report)?;
    info!("Wrote {}",out_path.display());
    Ok(())
}
