// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use crate::election_data::{Election, ProjectIndex, VoterIndex};

/// For each project, who approves of it. Computed once per election and shared by
/// every iteration of the count and every certification of it.
#[derive(Debug,Clone)]
pub struct ProjectSupport {
    /// indexed by project. Each list is in increasing voter order, and may be empty.
    supporters : Vec<Vec<VoterIndex>>,
}

impl ProjectSupport {
    pub fn new(election:&Election) -> Self {
        let mut supporters = vec![vec![];election.num_projects()];
        for voter in election.voter_indices() {
            for project in &election.voter(voter).approvals {
                supporters[project.0].push(voter);
            }
        }
        ProjectSupport{supporters}
    }

    pub fn supporters(&self,project:ProjectIndex) -> &[VoterIndex] { &self.supporters[project.0] }
    pub fn approval_count(&self,project:ProjectIndex) -> usize { self.supporters[project.0].len() }
    pub fn approves(&self,project:ProjectIndex,voter:VoterIndex) -> bool { self.supporters[project.0].binary_search(&voter).is_ok() }
}
