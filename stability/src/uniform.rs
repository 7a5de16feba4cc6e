// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Greedy project change for uniform (cost) utilities, and more generally any utility where
//! a voter may need to withdraw from several funded projects to pay for a new one.
//!
//! Suppose `ell` of the supporters of p not currently paying for it are left out, so p is paid
//! for by `t` voters. That fixes p's bang per buck and hence where p would slot into the
//! selection order. Every project after that point could be abandoned, so a supporter has their
//! value in the corresponding L list to spend. The poorest of the remaining supporters is the one who
//! has to be topped up.

use num::BigRational;
use pb::election_data::{Election, ProjectIndex, VoterIndex};
use pb::outcome::Outcome;
use pb::project_support::ProjectSupport;
use pb::rational::rational_from_usize;
use pb::utility::Utility;
use crate::l_lists::LLists;

/// The smallest positive per voter budget increase that would let `project` certify the outcome
/// unstable, or None if there is no such increase.
///
/// `l_lists` must have been built from `outcome`.
pub fn certify_uniform(election:&Election,support:&ProjectSupport,outcome:&Outcome,project:ProjectIndex,l_lists:&LLists,utility:Utility) -> Option<BigRational> {
    let supporters = support.supporters(project);
    let payers = outcome.payers(project);
    let (paying,not_paying) : (Vec<VoterIndex>,Vec<VoterIndex>) = supporters.iter().copied().partition(|v|payers.binary_search(v).is_ok());
    if not_paying.is_empty() { return None; }
    let details = election.project(project);
    let mut keep = vec![false;election.num_voters()];
    for v in &not_paying { keep[v.0]=true; }
    let mut candidates = l_lists.restricted_to(keep);

    let mut min_increase : Option<BigRational> = None;
    let mut i = outcome.num_funded();
    for ell in 0..not_paying.len() {
        let contributors = paying.len()+not_paying.len()-ell; // at least 1 as ell<not_paying.len()
        let price = &details.cost/rational_from_usize(contributors);
        let bang_per_buck = utility.bang_per_buck(details,contributors);
        while i>0 {
            let previous = &outcome.selection_order[i-1];
            let previous_wins = bang_per_buck<previous.bang_per_buck || (bang_per_buck==previous.bang_per_buck && election.project(previous.project).id<details.id);
            if previous_wins { i-=1; } else { break; }
        }
        if let Some((_,value)) = candidates.get(i,ell) {
            if *value<price {
                let required = price-value;
                if min_increase.as_ref().is_none_or(|d|required<*d) { min_increase=Some(required); }
            }
        }
    }
    min_increase
}
