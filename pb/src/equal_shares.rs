// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The Exact Method of Equal Shares.
//!
//! Every voter starts with an equal share of the budget. Repeatedly, the unfunded project
//! with the best bang per buck is funded, where a project can only be paid for by supporters
//! who can each afford an equal share of its cost. Supporters who cannot afford that share
//! drop out, which raises the share for the rest.

use num::BigRational;
use tracing::{debug, info};
use crate::election_data::{Election, ProjectIndex, VoterIndex};
use crate::outcome::{FundedProject, Outcome};
use crate::project_support::ProjectSupport;
use crate::rational::rational_from_usize;
use crate::utility::Utility;

/// The best project found so far in one round of the count.
struct Contender {
    project : ProjectIndex,
    bang_per_buck : BigRational,
    /// the supporters who would pay, each paying cost/contributors.len()
    contributors : Vec<VoterIndex>,
}

/// Run the count.
pub fn run(election:&Election,utility:Utility) -> Outcome {
    run_with_support(election,&ProjectSupport::new(election),utility)
}

/// Run the count with a precomputed support index, which must have been made from the same election.
pub fn run_with_support(election:&Election,support:&ProjectSupport,utility:Utility) -> Outcome {
    let mut outcome = Outcome::nothing_funded(election.initial_share(),election.num_voters());
    if election.num_voters()==0 { return outcome; }
    let mut funded = vec![false;election.num_projects()];
    loop {
        // balances changed last round, so re-sort. Stable, so equal budgets stay in voter order.
        let mut by_budget : Vec<VoterIndex> = election.voter_indices().collect();
        by_budget.sort_by(|a,b|outcome.leftover_budgets[a.0].cmp(&outcome.leftover_budgets[b.0]));
        let mut best : Option<Contender> = None;
        for project in election.project_indices() {
            if funded[project.0] || support.supporters(project).is_empty() { continue; }
            let Some((first_payer,mut sorted_supporters)) = affordable_suffix(election,support,&outcome.leftover_budgets,&by_budget,project) else { continue };
            let contributors = sorted_supporters.len()-first_payer;
            let bang_per_buck = utility.bang_per_buck(election.project(project),contributors);
            let better = match &best {
                None => true,
                Some(b) => bang_per_buck>b.bang_per_buck || (bang_per_buck==b.bang_per_buck && election.project(project).id>election.project(b.project).id),
            };
            if better {
                best = Some(Contender{ project, bang_per_buck, contributors: sorted_supporters.split_off(first_payer) });
            }
        }
        let Some(winner) = best else { break; };
        let cost = &election.project(winner.project).cost;
        let contribution = cost/rational_from_usize(winner.contributors.len());
        debug!("Funding project {} with bang per buck {}, {} voters paying {} each",election.project(winner.project).id,winner.bang_per_buck,winner.contributors.len(),contribution);
        for &voter in &winner.contributors {
            outcome.leftover_budgets[voter.0] -= &contribution;
            outcome.payments.record(voter,winner.project,contribution.clone());
        }
        outcome.total_cost += cost;
        funded[winner.project.0]=true;
        outcome.selection_order.push(FundedProject{ project: winner.project, bang_per_buck: winner.bang_per_buck });
    }
    info!("Equal shares with {} utility funded {} of {} projects costing {} of budget {}",utility,outcome.num_funded(),election.num_projects(),outcome.total_cost,election.budget());
    outcome
}

/// Find the largest group of supporters of `project` that can each afford an equal share of it.
///
/// Returns the supporters sorted by remaining budget, and the index of the poorest one that
/// pays. Everyone from that index on pays. None if not even the richest supporter can afford
/// the whole cost alone.
fn affordable_suffix(election:&Election,support:&ProjectSupport,budgets:&[BigRational],by_budget:&[VoterIndex],project:ProjectIndex) -> Option<(usize,Vec<VoterIndex>)> {
    let cost = &election.project(project).cost;
    let sorted_supporters : Vec<VoterIndex> = by_budget.iter().copied().filter(|&v|support.approves(project,v)).collect();
    let mut paying = sorted_supporters.len();
    let mut first_payer = None;
    for (i,voter) in sorted_supporters.iter().enumerate() {
        let share = cost/rational_from_usize(paying);
        if share<=budgets[voter.0] { first_payer=Some(i); break; }
        paying-=1;
    }
    first_payer.map(|i|(i,sorted_supporters))
}
