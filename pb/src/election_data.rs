// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The voters, projects and budget making up a participatory budgeting election.

use std::collections::HashSet;
use std::fmt;
use num::{BigRational, Signed, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::rational::rational_from_usize;

/// a project, referred to by position in the election's list of projects, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectIndex(pub usize);
// type alias really, don't want long display
impl fmt::Display for ProjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for ProjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// a voter, referred to by position in the election's list of voters, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoterIndex(pub usize);
impl fmt::Display for VoterIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
impl fmt::Debug for VoterIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "V{}", self.0) }
}

#[derive(Debug,Serialize,Deserialize,Clone,PartialEq,Eq)]
pub struct Project {
    /// The identifier from the data source. Ties between projects are broken by comparing these as strings.
    pub id : String,
    #[serde(with="crate::rational::as_string")]
    pub cost : BigRational,
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub name : Option<String>,
}

#[derive(Debug,Serialize,Deserialize,Clone,PartialEq,Eq)]
pub struct Voter {
    pub id : String,
    /// projects approved by this voter, ascending, no duplicates.
    pub approvals : Vec<ProjectIndex>,
}

impl Voter {
    pub fn approves(&self,project:ProjectIndex) -> bool { self.approvals.binary_search(&project).is_ok() }
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ElectionError {
    #[error("The budget {0} is negative")]
    NegativeBudget(BigRational),
    #[error("Project {0} has cost {1}, but costs must be positive")]
    NonPositiveCost(String,BigRational),
    #[error("Project id {0} is used more than once")]
    DuplicateProject(String),
    #[error("Voter id {0} is used more than once")]
    DuplicateVoter(String),
    #[error("Voter {0} approves project {1:?} which does not exist")]
    UnknownProject(String,ProjectIndex),
}

/// A snapshot of an election with a fixed budget.
///
/// Changing the budget means making a new election with [Election::with_budget], so an
/// [crate::outcome::Outcome] can never silently refer to a budget other than the one it was computed with.
#[derive(Debug,Serialize,Clone,PartialEq,Eq)]
pub struct Election {
    pub name : String,
    #[serde(with="crate::rational::as_string")]
    budget : BigRational,
    projects : Vec<Project>,
    voters : Vec<Voter>,
}

impl Election {
    /// Check the invariants and make an election. Voters' approval lists are sorted and deduplicated.
    pub fn new(name:String,budget:BigRational,projects:Vec<Project>,mut voters:Vec<Voter>) -> Result<Self,ElectionError> {
        if budget.is_negative() { return Err(ElectionError::NegativeBudget(budget)); }
        {
            let mut seen_projects = HashSet::new();
            for p in &projects {
                if !p.cost.is_positive() { return Err(ElectionError::NonPositiveCost(p.id.clone(),p.cost.clone())); }
                if !seen_projects.insert(p.id.as_str()) { return Err(ElectionError::DuplicateProject(p.id.clone())); }
            }
        }
        let mut seen_voters = HashSet::new();
        for v in &mut voters {
            if !seen_voters.insert(v.id.clone()) { return Err(ElectionError::DuplicateVoter(v.id.clone())); }
            v.approvals.sort();
            v.approvals.dedup();
            if let Some(bad) = v.approvals.iter().find(|p|p.0>=projects.len()) {
                return Err(ElectionError::UnknownProject(v.id.clone(),*bad));
            }
        }
        Ok(Election{name,budget,projects,voters})
    }

    pub fn budget(&self) -> &BigRational { &self.budget }
    pub fn projects(&self) -> &[Project] { &self.projects }
    pub fn voters(&self) -> &[Voter] { &self.voters }
    pub fn num_projects(&self) -> usize { self.projects.len() }
    pub fn num_voters(&self) -> usize { self.voters.len() }
    pub fn project(&self,index:ProjectIndex) -> &Project { &self.projects[index.0] }
    pub fn voter(&self,index:VoterIndex) -> &Voter { &self.voters[index.0] }

    pub fn project_indices(&self) -> impl Iterator<Item=ProjectIndex> { (0..self.projects.len()).map(ProjectIndex) }
    pub fn voter_indices(&self) -> impl Iterator<Item=VoterIndex> { (0..self.voters.len()).map(VoterIndex) }

    pub fn project_by_id(&self,id:&str) -> Option<ProjectIndex> {
        self.projects.iter().position(|p|p.id==id).map(ProjectIndex)
    }

    /// The budget each voter starts with, b/n. Zero if there are no voters.
    pub fn initial_share(&self) -> BigRational {
        if self.voters.is_empty() { BigRational::zero() } else { &self.budget/rational_from_usize(self.voters.len()) }
    }

    /// The same election with a different total budget.
    pub fn with_budget(&self,budget:BigRational) -> Result<Self,ElectionError> {
        if budget.is_negative() { return Err(ElectionError::NegativeBudget(budget)); }
        Ok(Election{ name: self.name.clone(), budget, projects: self.projects.clone(), voters: self.voters.clone() })
    }

    /// The same election with every voter's share increased by `per_voter`, that is, a budget of b+n*per_voter.
    pub fn with_per_voter_increase(&self,per_voter:&BigRational) -> Result<Self,ElectionError> {
        self.with_budget(&self.budget+per_voter*rational_from_usize(self.voters.len()))
    }
}
