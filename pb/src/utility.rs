// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::fmt::{Display, Formatter};
use std::str::FromStr;
use num::{BigRational, One};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::election_data::Project;
use crate::rational::rational_from_usize;

/// How much a voter values a project they approve of.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Utility {
    /// Every approved project is worth 1. Also called approval utility.
    Cardinal,
    /// An approved project is worth its cost. Also called uniform utility.
    Cost,
}

impl Utility {
    pub fn utility(self,project:&Project) -> BigRational {
        match self {
            Utility::Cardinal => BigRational::one(),
            Utility::Cost => project.cost.clone(),
        }
    }

    /// utility per unit cost if `contributors` voters each pay an equal share of the project.
    pub fn bang_per_buck(self,project:&Project,contributors:usize) -> BigRational {
        self.utility(project)*rational_from_usize(contributors)/&project.cost
    }
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
#[error("No such utility function {0}. Expecting cardinal (or approval) or cost (or uniform)")]
pub struct UnknownUtility(pub String);

impl FromStr for Utility {
    type Err = UnknownUtility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cardinal" | "approval" => Ok(Utility::Cardinal),
            "cost" | "uniform" => Ok(Utility::Cost),
            _ => Err(UnknownUtility(s.to_string())),
        }
    }
}

impl Display for Utility {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Utility::Cardinal => write!(f,"cardinal"),
            Utility::Cost => write!(f,"cost"),
        }
    }
}
