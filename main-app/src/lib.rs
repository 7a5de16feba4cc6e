// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! This crate ties together the file format, the count and the stability check.
//! It also contains the main binaries.

use num::BigRational;
use serde::Serialize;
use pb::election_data::Election;
use pb::equal_shares::run;
use pb::outcome::Outcome;
use pb::rational::StringSerializedRational;
use pb::utility::Utility;
use stability::add_opt::{minimum_destabilizing_increase, InstabilityCertificate, StabilityError};

/// Everything worth recording about one count of one election.
#[derive(Debug,Serialize)]
pub struct EqualSharesReport {
    pub election : String,
    pub budget : StringSerializedRational,
    pub utility : Utility,
    /// ids of the funded projects, in the order funded.
    pub funded : Vec<String>,
    pub outcome : Outcome,
    /// fraction of the budget spent, if the budget is not zero.
    pub efficiency : Option<StringSerializedRational>,
    /// the smallest per voter budget increase that would change the outcome, if any.
    pub instability : Option<InstabilityCertificate>,
    /// id of the project in `instability`.
    pub instability_project : Option<String>,
}

/// Run Equal Shares on the election, then find out how stable the result is.
pub fn count_and_certify(election:&Election,utility:Utility,skip_selected:bool) -> Result<EqualSharesReport,StabilityError> {
    let outcome = run(election,utility);
    let instability = minimum_destabilizing_increase(election,&outcome,utility,skip_selected)?;
    Ok(EqualSharesReport{
        election: election.name.clone(),
        budget: StringSerializedRational(election.budget().clone()),
        utility,
        funded: outcome.funded_projects().iter().map(|p|election.project(*p).id.clone()).collect(),
        efficiency: outcome.efficiency(election.budget()).map(StringSerializedRational),
        instability_project: instability.as_ref().map(|c|election.project(c.project).id.clone()),
        instability,
        outcome,
    })
}

/// Replace the budget in an election, if a new one is given.
pub fn override_budget(election:Election,budget:Option<BigRational>) -> anyhow::Result<Election> {
    Ok(match budget {
        Some(budget) => election.with_budget(budget)?,
        None => election,
    })
}
