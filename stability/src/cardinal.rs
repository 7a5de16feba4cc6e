// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Greedy project change for cardinal (approval) utilities.
//!
//! Given a project p, consider the supporters of p not currently paying for it. Each of them
//! could either put their leftover budget towards p ("liquid"), or abandon the project they
//! currently pay the most towards and pay for p with that money instead ("solvent"). The more of them
//! join, the lower the per voter price of p. Sweep through them in increasing leftover budget
//! and in increasing largest payment simultaneously, finding the smallest increase to every
//! voter's budget that lets some liquid voter afford p.

use std::cmp::Ordering;
use std::collections::HashSet;
use num::BigRational;
use pb::election_data::{Election, ProjectIndex, VoterIndex};
use pb::outcome::{MaxPayment, Outcome};
use pb::project_support::ProjectSupport;
use pb::rational::rational_from_usize;

/// The smallest per voter budget increase that would let `project` certify the outcome unstable,
/// or None if there is no such increase. The value may be zero or negative if the outcome
/// was already unstable.
///
/// `project` must be in the election, and the outcome must have come from the same election.
pub fn certify_cardinal(election:&Election,support:&ProjectSupport,outcome:&Outcome,project:ProjectIndex) -> Option<BigRational> {
    let supporters = support.supporters(project);
    let payers = outcome.payers(project);
    let (paying,not_paying) : (Vec<VoterIndex>,Vec<VoterIndex>) = supporters.iter().copied().partition(|v|payers.binary_search(v).is_ok());
    if not_paying.is_empty() { return None; }
    let cost = &election.project(project).cost;
    let name = election.project(project).id.as_str();
    let project_name = |p:Option<ProjectIndex>| p.map(|p|election.project(p).id.as_str());

    let max_payments : Vec<MaxPayment> = not_paying.iter().map(|&v|outcome.max_payment(v)).collect();
    // positions into not_paying / max_payments
    let mut by_leftover : Vec<usize> = (0..not_paying.len()).collect();
    by_leftover.sort_by(|&a,&b|outcome.leftover(not_paying[a]).cmp(outcome.leftover(not_paying[b])));
    let mut by_max_payment : Vec<usize> = (0..not_paying.len()).collect();
    by_max_payment.sort_by(|&a,&b|max_payments[a].amount.cmp(&max_payments[b].amount).then_with(||project_name(max_payments[a].project).cmp(&project_name(max_payments[b].project))));

    let mut solvent : HashSet<usize> = HashSet::new();
    let mut liquid : HashSet<usize> = (0..not_paying.len()).collect();
    let mut min_increase : Option<BigRational> = None;
    let mut i = 0;
    let mut j = 0;
    while (!liquid.is_empty() || !solvent.is_empty()) && i<by_leftover.len() {
        let contributors = liquid.len()+solvent.len()+paying.len();
        if contributors==0 { break; }
        let price = cost/rational_from_usize(contributors);
        if let Some(&voter) = by_max_payment.get(j) {
            // this voter would not give up their existing payment at this price.
            let max = &max_payments[voter];
            let keeps_existing = match max.amount.cmp(&price) {
                Ordering::Less => true,
                Ordering::Equal => project_name(max.project).is_some_and(|other|other>name),
                Ordering::Greater => false,
            };
            if keeps_existing {
                solvent.remove(&voter);
                j+=1;
                continue;
            }
        }
        let voter = by_leftover[i];
        i+=1;
        if liquid.remove(&voter) {
            let max = &max_payments[voter];
            let would_switch = match max.amount.cmp(&price) {
                Ordering::Greater => true,
                Ordering::Equal => project_name(max.project).is_some_and(|other|other<name),
                Ordering::Less => false,
            };
            if would_switch {
                solvent.insert(voter);
            } else {
                let required = &price-outcome.leftover(not_paying[voter]);
                if min_increase.as_ref().is_none_or(|d|required<*d) { min_increase=Some(required); }
            }
        }
    }
    min_increase
}
