// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! ADD-OPT: the smallest increase in every voter's share of the budget that makes the outcome unstable.

use num::{BigRational, Signed};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use pb::election_data::{Election, ProjectIndex};
use pb::outcome::{InconsistentOutcome, Outcome};
use pb::project_support::ProjectSupport;
use pb::utility::Utility;
use crate::cardinal::certify_cardinal;
use crate::l_lists::LLists;
use crate::uniform::certify_uniform;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum StabilityError {
    #[error("Outcome does not match the election : {0}")]
    InconsistentOutcome(#[from] InconsistentOutcome),
    #[error("Project {0:?} is not in the election")]
    UnknownProject(ProjectIndex),
}

/// A witness that an outcome is not stable once every voter gets `per_voter_increase` more.
#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct InstabilityCertificate {
    /// the project that could then be funded.
    pub project : ProjectIndex,
    #[serde(with="pb::rational::as_string")]
    pub per_voter_increase : BigRational,
}

/// Everything needed to certify projects against one outcome. The L lists are only built for uniform utilities.
pub struct Certifier<'a> {
    election : &'a Election,
    outcome : &'a Outcome,
    utility : Utility,
    support : ProjectSupport,
    l_lists : Option<LLists>,
}

impl <'a> Certifier<'a> {
    pub fn new(election:&'a Election,outcome:&'a Outcome,utility:Utility) -> Result<Self,StabilityError> {
        outcome.check_consistent_with(election)?;
        let l_lists = match utility {
            Utility::Cardinal => None,
            Utility::Cost => Some(LLists::build(election,outcome)),
        };
        Ok(Certifier{ election, outcome, utility, support: ProjectSupport::new(election), l_lists })
    }

    /// The greedy project change value for one project. See [certify_cardinal] and [certify_uniform].
    pub fn certify(&self,project:ProjectIndex) -> Result<Option<BigRational>,StabilityError> {
        if project.0>=self.election.num_projects() { return Err(StabilityError::UnknownProject(project)); }
        Ok(match &self.l_lists {
            None => certify_cardinal(self.election,&self.support,self.outcome,project),
            Some(l_lists) => certify_uniform(self.election,&self.support,self.outcome,project,l_lists,self.utility),
        })
    }

    /// The smallest strictly positive value of [Certifier::certify] over all projects, or
    /// if `skip_selected`, over all projects not funded. Ties go to the earlier project.
    pub fn minimum_destabilizing_increase(&self,skip_selected:bool) -> Result<Option<InstabilityCertificate>,StabilityError> {
        let mut best : Option<InstabilityCertificate> = None;
        for project in self.election.project_indices() {
            if skip_selected && self.outcome.is_funded(project) { continue; }
            let increase = self.certify(project)?;
            match &increase {
                Some(d) => debug!("Project {} could be funded with a per voter increase of {}",self.election.project(project).id,d),
                None => debug!("Project {} cannot certify instability",self.election.project(project).id),
            }
            if let Some(d) = increase {
                if d.is_positive() && best.as_ref().is_none_or(|b|d<b.per_voter_increase) {
                    best = Some(InstabilityCertificate{ project, per_voter_increase: d });
                }
            }
        }
        match &best {
            Some(certificate) => info!("Minimum destabilizing increase {} per voter, for project {}",certificate.per_voter_increase,self.election.project(certificate.project).id),
            None => info!("No budget increase makes the outcome unstable"),
        }
        Ok(best)
    }
}

/// Check every project (or every unfunded project, if `skip_selected`) and report the smallest per voter
/// budget increase that would make the outcome unstable. None if no increase would.
pub fn minimum_destabilizing_increase(election:&Election,outcome:&Outcome,utility:Utility,skip_selected:bool) -> Result<Option<InstabilityCertificate>,StabilityError> {
    Certifier::new(election,outcome,utility)?.minimum_destabilizing_increase(skip_selected)
}
