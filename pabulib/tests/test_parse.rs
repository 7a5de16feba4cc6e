// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::path::PathBuf;
use pb::election_data::{ProjectIndex, VoterIndex};
use pb::equal_shares::run;
use pb::rational::parse_rational;
use pb::utility::Utility;

fn test_file(name:&str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

#[test]
fn test_parse_file() {
    let election = pabulib::parse(test_file("small.pb")).unwrap();
    assert_eq!(election.name,"Small test district");
    assert_eq!(election.budget(),&parse_rational("12").unwrap());
    assert_eq!(election.num_projects(),3);
    assert_eq!(election.project(ProjectIndex(1)).id,"Y");
    assert_eq!(election.project(ProjectIndex(1)).name.as_deref(),Some("Bike lanes; phase 1"));
    assert_eq!(election.project(ProjectIndex(2)).cost,parse_rational("5").unwrap());
    assert_eq!(election.num_voters(),4);
    assert_eq!(election.voter(VoterIndex(3)).id,"4");
    assert_eq!(election.voter(VoterIndex(3)).approvals,vec![ProjectIndex(1),ProjectIndex(2)]);
    let outcome = run(&election,Utility::Cost);
    assert_eq!(outcome.funded_projects(),vec![ProjectIndex(0)]);
}

#[test]
fn test_parse_decimal_costs_and_empty_votes() {
    let text = "META\nkey;value\nbudget;10.5\nPROJECTS\nproject_id;cost\na;2.25\nb;3\nVOTES\nvoter_id;vote\nv1;a, b\nv2;\n";
    let election = pabulib::parse_str(text,"fallback").unwrap();
    assert_eq!(election.name,"fallback");
    assert_eq!(election.budget(),&parse_rational("21/2").unwrap());
    assert_eq!(election.project(ProjectIndex(0)).cost,parse_rational("9/4").unwrap());
    assert_eq!(election.project(ProjectIndex(0)).name,None);
    assert_eq!(election.voter(VoterIndex(0)).approvals,vec![ProjectIndex(0),ProjectIndex(1)]);
    assert!(election.voter(VoterIndex(1)).approvals.is_empty());
}

#[test]
fn test_parse_errors() {
    let no_budget = "META\nkey;value\nnum_votes;0\nPROJECTS\nproject_id;cost\na;2\nVOTES\nvoter_id;vote\n";
    assert!(pabulib::parse_str(no_budget,"").is_err());
    let unknown_project = "META\nkey;value\nbudget;5\nPROJECTS\nproject_id;cost\na;2\nVOTES\nvoter_id;vote\n1;b\n";
    let err = pabulib::parse_str(unknown_project,"").unwrap_err();
    assert!(err.to_string().contains("unknown project b"),"{}",err);
    let bad_cost = "META\nkey;value\nbudget;5\nPROJECTS\nproject_id;cost\na;two\nVOTES\nvoter_id;vote\n";
    assert!(pabulib::parse_str(bad_cost,"").is_err());
    let zero_cost = "META\nkey;value\nbudget;5\nPROJECTS\nproject_id;cost\na;0\nVOTES\nvoter_id;vote\n";
    assert!(pabulib::parse_str(zero_cost,"").is_err());
    let missing_column = "META\nkey;value\nbudget;5\nPROJECTS\nid;cost\na;1\n";
    assert!(pabulib::parse_str(missing_column,"").is_err());
    assert!(pabulib::parse_str("budget;5\n","").is_err());
}
