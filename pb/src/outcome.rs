// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The result of an Equal Shares count: what was funded, in what order, and who paid for it.

use std::collections::HashMap;
use num::{BigRational, Signed, Zero};
use serde::{Serialize, Serializer};
use serde::ser::SerializeSeq;
use thiserror::Error;
use crate::election_data::{Election, ProjectIndex, VoterIndex};

/// A project funded by the count, with the bang per buck it had when it was chosen.
#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct FundedProject {
    pub project : ProjectIndex,
    #[serde(with="crate::rational::as_string")]
    pub bang_per_buck : BigRational,
}

/// How much each voter paid towards each project. Sparse; anything not recorded is exactly zero.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct PaymentTable {
    payments : HashMap<(VoterIndex,ProjectIndex),BigRational>,
}

impl PaymentTable {
    /// the amount paid, zero if nothing was paid.
    pub fn get(&self,voter:VoterIndex,project:ProjectIndex) -> BigRational {
        self.payments.get(&(voter,project)).cloned().unwrap_or_else(BigRational::zero)
    }
    /// true iff the voter paid something towards the project.
    pub fn pays(&self,voter:VoterIndex,project:ProjectIndex) -> bool {
        self.payments.get(&(voter,project)).is_some_and(|a|a.is_positive())
    }
    pub fn record(&mut self,voter:VoterIndex,project:ProjectIndex,amount:BigRational) {
        self.payments.insert((voter,project),amount);
    }
    pub fn iter(&self) -> impl Iterator<Item=(VoterIndex,ProjectIndex,&BigRational)> {
        self.payments.iter().map(|(&(v,p),a)|(v,p,a))
    }
}

#[derive(Serialize)]
struct PaymentRecord {
    voter : VoterIndex,
    project : ProjectIndex,
    amount : String,
}

/// Serialized as a list of records ordered by project then voter, so output is reproducible.
impl Serialize for PaymentTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut keys : Vec<&(VoterIndex,ProjectIndex)> = self.payments.keys().collect();
        keys.sort_by_key(|(v,p)|(*p,*v));
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(&PaymentRecord{ voter: key.0, project: key.1, amount: self.payments[key].to_string() })?;
        }
        seq.end()
    }
}

/// The largest single payment a voter made, and which project it went to.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct MaxPayment {
    /// None only if nothing at all was funded.
    pub project : Option<ProjectIndex>,
    pub amount : BigRational,
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum InconsistentOutcome {
    #[error("Outcome has budgets for {outcome} voters but the election has {election}")]
    VoterCount{ outcome:usize, election:usize },
    #[error("Outcome funds project {0:?} which is not in the election")]
    FundedProjectNotInElection(ProjectIndex),
    #[error("Outcome has a payment by voter {0:?} which is not in the election")]
    PaymentByUnknownVoter(VoterIndex),
    #[error("Outcome has a payment towards project {0:?} which is not in the election")]
    PaymentToUnknownProject(ProjectIndex),
    #[error("Outcome funds project {0:?} more than once")]
    FundedTwice(ProjectIndex),
}

/// The output of [crate::equal_shares::run]. A fresh value is produced by every count; never modified afterwards.
#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct Outcome {
    /// what each voter started with.
    #[serde(with="crate::rational::as_string")]
    pub initial_share : BigRational,
    /// funded projects in the order they were chosen.
    pub selection_order : Vec<FundedProject>,
    pub payments : PaymentTable,
    /// indexed by voter
    #[serde(with="crate::rational::vec_as_string")]
    pub leftover_budgets : Vec<BigRational>,
    #[serde(with="crate::rational::as_string")]
    pub total_cost : BigRational,
}

impl Outcome {
    /// nothing funded, everyone still has their initial share.
    pub fn nothing_funded(initial_share:BigRational,num_voters:usize) -> Self {
        Outcome{
            leftover_budgets: vec![initial_share.clone();num_voters],
            initial_share,
            selection_order: vec![],
            payments: PaymentTable::default(),
            total_cost: BigRational::zero(),
        }
    }

    pub fn num_voters(&self) -> usize { self.leftover_budgets.len() }
    pub fn num_funded(&self) -> usize { self.selection_order.len() }
    pub fn leftover(&self,voter:VoterIndex) -> &BigRational { &self.leftover_budgets[voter.0] }
    pub fn payment(&self,voter:VoterIndex,project:ProjectIndex) -> BigRational { self.payments.get(voter,project) }

    pub fn is_funded(&self,project:ProjectIndex) -> bool { self.selection_order.iter().any(|f|f.project==project) }

    pub fn funded_projects(&self) -> Vec<ProjectIndex> { self.selection_order.iter().map(|f|f.project).collect() }

    /// voters who paid something towards the project, in voter order.
    pub fn payers(&self,project:ProjectIndex) -> Vec<VoterIndex> {
        (0..self.num_voters()).map(VoterIndex).filter(|&v|self.payments.pays(v,project)).collect()
    }

    /// total paid by a voter across all funded projects.
    pub fn total_paid_by(&self,voter:VoterIndex) -> BigRational {
        self.selection_order.iter().map(|f|self.payments.get(voter,f.project)).sum()
    }

    /// The largest payment made by the voter to any funded project. Ties (including a voter who paid nothing)
    /// go to the project funded first.
    pub fn max_payment(&self,voter:VoterIndex) -> MaxPayment {
        let mut best = MaxPayment{ project: None, amount: BigRational::zero() };
        for funded in &self.selection_order {
            let amount = self.payments.get(voter,funded.project);
            if best.project.is_none() || amount>best.amount {
                best = MaxPayment{ project: Some(funded.project), amount };
            }
        }
        best
    }

    /// The fraction of the budget spent. None if the budget is zero.
    pub fn efficiency(&self,budget:&BigRational) -> Option<BigRational> {
        if budget.is_zero() { None } else { Some(&self.total_cost/budget) }
    }

    /// Make sure this outcome could have come from the given election.
    pub fn check_consistent_with(&self,election:&Election) -> Result<(),InconsistentOutcome> {
        if self.num_voters()!=election.num_voters() {
            return Err(InconsistentOutcome::VoterCount{ outcome: self.num_voters(), election: election.num_voters() });
        }
        let mut seen = vec![false;election.num_projects()];
        for f in &self.selection_order {
            let Some(already) = seen.get_mut(f.project.0) else { return Err(InconsistentOutcome::FundedProjectNotInElection(f.project)) };
            if *already { return Err(InconsistentOutcome::FundedTwice(f.project)); }
            *already=true;
        }
        for (v,p,_) in self.payments.iter() {
            if v.0>=election.num_voters() { return Err(InconsistentOutcome::PaymentByUnknownVoter(v)); }
            if p.0>=election.num_projects() { return Err(InconsistentOutcome::PaymentToUnknownProject(p)); }
        }
        Ok(())
    }
}
