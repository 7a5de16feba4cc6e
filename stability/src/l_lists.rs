// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! For uniform utilities, a voter joining a new project may have to abandon several projects
//! funded after the point where the new project would slot into the selection order.
//! The lists here say how much money each voter would then have.
//!
//! List `i` (0..=w, w being the number of funded projects) gives each voter's leftover budget plus
//! what they paid towards the projects from position `i` onwards in the selection order,
//! sorted increasing. So list `w` is just the leftover budgets, and list 0 is the initial shares.

use num::BigRational;
use pb::election_data::{Election, VoterIndex};
use pb::outcome::Outcome;

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct LLists {
    lists : Vec<Vec<(VoterIndex,BigRational)>>,
}

impl LLists {
    pub fn build(election:&Election,outcome:&Outcome) -> Self {
        let w = outcome.num_funded();
        let mut current : Vec<BigRational> = election.voter_indices().map(|v|outcome.leftover(v).clone()).collect();
        let mut lists = Vec::with_capacity(w+1);
        lists.push(sorted(&current));
        for funded in outcome.selection_order.iter().rev() {
            for (voter,value) in current.iter_mut().enumerate() {
                *value += outcome.payment(VoterIndex(voter),funded.project);
            }
            lists.push(sorted(&current));
        }
        lists.reverse();
        LLists{lists}
    }

    /// w+1
    pub fn len(&self) -> usize { self.lists.len() }
    pub fn is_empty(&self) -> bool { self.lists.is_empty() }
    pub fn list(&self,i:usize) -> &[(VoterIndex,BigRational)] { &self.lists[i] }

    /// View only the voters for whom `keep` is true (indexed by voter).
    pub fn restricted_to(&self,keep:Vec<bool>) -> RestrictedLLists<'_> {
        RestrictedLLists{ lists: self, keep, cache: vec![None;self.lists.len()] }
    }
}

fn sorted(values:&[BigRational]) -> Vec<(VoterIndex,BigRational)> {
    let mut res : Vec<(VoterIndex,BigRational)> = values.iter().cloned().enumerate().map(|(v,value)|(VoterIndex(v),value)).collect();
    res.sort_by(|a,b|a.1.cmp(&b.1)); // stable, so ties stay in voter order.
    res
}

/// The L lists restricted to a subset of voters. A list is only filtered the first time it is asked for.
pub struct RestrictedLLists<'a> {
    lists : &'a LLists,
    keep : Vec<bool>,
    cache : Vec<Option<Vec<&'a (VoterIndex,BigRational)>>>,
}

impl <'a> RestrictedLLists<'a> {
    /// The `position`th (from 0) poorest kept voter in list `i`.
    pub fn get(&mut self,i:usize,position:usize) -> Option<&'a (VoterIndex,BigRational)> {
        let lists = self.lists;
        let keep = &self.keep;
        let filtered = self.cache[i].get_or_insert_with(||lists.lists[i].iter().filter(|(v,_)|keep[v.0]).collect());
        filtered.get(position).copied()
    }
}
