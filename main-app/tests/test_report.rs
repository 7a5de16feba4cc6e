// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use pb::election_data::{Election, Project, ProjectIndex, Voter};
use pb::rational::parse_rational;
use pb::utility::Utility;
use main_app::{count_and_certify, override_budget};

fn xyz() -> Election {
    let project = |id:&str,cost:&str| Project{ id: id.to_string(), cost: parse_rational(cost).unwrap(), name: None };
    let voter = |id:&str,approvals:&[usize]| Voter{ id: id.to_string(), approvals: approvals.iter().map(|&p|ProjectIndex(p)).collect() };
    Election::new("xyz".to_string(),parse_rational("12").unwrap(),
                  vec![project("X","6"),project("Y","4"),project("Z","5")],
                  vec![voter("1",&[0]),voter("2",&[0]),voter("3",&[0,1]),voter("4",&[1,2])]).unwrap()
}

#[test]
fn test_report() {
    let report = count_and_certify(&xyz(),Utility::Cardinal,false).unwrap();
    assert_eq!(report.funded,vec!["Y","X"]);
    assert_eq!(report.efficiency.as_ref().map(|e|e.to_string()),Some("5/6".to_string()));
    assert_eq!(report.instability_project.as_deref(),Some("X"));
    let json : serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["budget"],"12");
    assert_eq!(json["instability"]["per_voter_increase"],"1");
    assert_eq!(json["outcome"]["total_cost"],"10");
    assert_eq!(json["outcome"]["leftover_budgets"],serde_json::json!(["0","0","1","1"]));
    assert_eq!(json["outcome"]["payments"][0],serde_json::json!({"voter":0,"project":0,"amount":"3"}));

    let skipping = count_and_certify(&xyz(),Utility::Cardinal,true).unwrap();
    assert_eq!(skipping.instability_project.as_deref(),Some("Z"));
    let uniform = count_and_certify(&xyz(),Utility::Cost,false).unwrap();
    assert_eq!(uniform.funded,vec!["X"]);
    assert_eq!(uniform.instability_project.as_deref(),Some("Y"));
}

#[test]
fn test_override_budget() {
    let election = override_budget(xyz(),Some(parse_rational("16").unwrap())).unwrap();
    assert_eq!(election.budget(),&parse_rational("16").unwrap());
    let report = count_and_certify(&election,Utility::Cost,false).unwrap();
    assert_eq!(report.funded,vec!["X","Y"]);
    assert!(override_budget(xyz(),Some(parse_rational("-1").unwrap())).is_err());
    assert_eq!(override_budget(xyz(),None).unwrap().budget(),&parse_rational("12").unwrap());
}
