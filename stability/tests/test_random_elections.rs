// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Counts and certifies lots of small pseudo-random elections.

use num::{BigInt, BigRational, Signed};
use pb::election_data::{Election, Project, ProjectIndex, Voter};
use pb::equal_shares::run;
use pb::outcome::Outcome;
use pb::project_support::ProjectSupport;
use pb::utility::Utility;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stability::add_opt::minimum_destabilizing_increase;
use stability::cardinal::certify_cardinal;

const NUM_ELECTIONS : u64 = 1000;

/// Up to 5 projects "p0".."p4" costing 1 to 8, up to 7 voters each approving a random subset, and a budget of 1 to 30.
fn random_election(rng:&mut ChaCha8Rng) -> Election {
    let num_projects = rng.random_range(1..=5usize);
    let projects : Vec<Project> = (0..num_projects).map(|i|Project{ id: format!("p{}",i), cost: BigRational::from_integer(BigInt::from(rng.random_range(1..=8u32))), name: None }).collect();
    let num_voters = rng.random_range(1..=7usize);
    let voters = (0..num_voters).map(|i|Voter{
        id: format!("v{}",i+1),
        approvals: (0..num_projects).filter(|_|rng.random_bool(0.5)).map(ProjectIndex).collect(),
    }).collect();
    let budget = BigRational::from_integer(BigInt::from(rng.random_range(1..=30u32)));
    Election::new("random".to_string(),budget,projects,voters).unwrap()
}

/// Money is conserved, funded projects are paid for exactly, and projects are selected in order of
/// non-increasing bang per buck with ties going to the larger id.
fn check_outcome(election:&Election,outcome:&Outcome,seed:u64) {
    outcome.check_consistent_with(election).unwrap();
    let support = ProjectSupport::new(election);
    let spent : BigRational = election.voter_indices().map(|v|&outcome.initial_share-outcome.leftover(v)).sum();
    assert_eq!(spent,outcome.total_cost,"seed {} money spent by voters",seed);
    let total : BigRational = outcome.selection_order.iter().map(|f|election.project(f.project).cost.clone()).sum();
    assert_eq!(total,outcome.total_cost,"seed {} total cost",seed);
    assert!(outcome.total_cost<=*election.budget(),"seed {} over budget",seed);
    for f in &outcome.selection_order {
        let paid : BigRational = support.supporters(f.project).iter().map(|&v|outcome.payment(v,f.project)).sum();
        assert_eq!(paid,election.project(f.project).cost,"seed {} payments for {:?}",seed,f.project);
    }
    for v in election.voter_indices() {
        assert!(!outcome.leftover(v).is_negative(),"seed {} voter {:?} overspent",seed,v);
        assert_eq!(&outcome.initial_share-outcome.leftover(v),outcome.total_paid_by(v),"seed {} payments by {:?}",seed,v);
    }
    for pair in outcome.selection_order.windows(2) {
        assert!(pair[0].bang_per_buck>=pair[1].bang_per_buck,"seed {} bang per buck increased",seed);
        if pair[0].bang_per_buck==pair[1].bang_per_buck {
            assert!(election.project(pair[0].project).id>election.project(pair[1].project).id,"seed {} tie not won by the larger id",seed);
        }
    }
}

#[test]
fn test_random_equal_shares_outcomes() {
    for seed in 0..NUM_ELECTIONS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let election = random_election(&mut rng);
        for utility in [Utility::Cardinal,Utility::Cost] {
            let outcome = run(&election,utility);
            check_outcome(&election,&outcome,seed);
            if let Some(found) = minimum_destabilizing_increase(&election,&outcome,utility,false).unwrap() {
                assert!(found.per_voter_increase.is_positive(),"seed {}",seed);
            }
        }
    }
}

/// A count never leaves a supporter outside a project with every such supporter
/// preferring to switch from the start, so the cardinal sweep always evaluates someone.
#[test]
fn test_random_cardinal_always_bounded() {
    for seed in 0..NUM_ELECTIONS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let election = random_election(&mut rng);
        let support = ProjectSupport::new(&election);
        let outcome = run(&election,Utility::Cardinal);
        for project in election.project_indices() {
            let payers = outcome.payers(project);
            let not_paying = support.supporters(project).iter().filter(|v|!payers.contains(*v)).count();
            let increase = certify_cardinal(&election,&support,&outcome,project);
            if not_paying>0 {
                assert!(increase.is_some(),"seed {} project {:?} has supporters not paying for it but no bound",seed,project);
            } else {
                assert_eq!(increase,None,"seed {} project {:?}",seed,project);
            }
        }
    }
}
