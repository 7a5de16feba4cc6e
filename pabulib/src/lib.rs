// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Parsing participatory budgeting data in the .pb format from http://pabulib.org
//!
//! The file is semicolon separated, in three sections, each introduced by a line with just its name.
//! ```text
//! META
//! key;value
//! budget;1000
//! PROJECTS
//! project_id;cost;name
//! 1;600;Park
//! VOTES
//! voter_id;vote
//! 1;1,2
//! ```
//! Each section after its name line has a header line naming its columns. Only approval style
//! votes are used: the vote column is a comma separated list of approved project ids.

use std::collections::HashMap;
use std::path::Path;
use anyhow::anyhow;
use pb::election_data::{Election, Project, ProjectIndex, Voter};
use pb::rational::parse_rational;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
enum Section {
    Meta,
    Projects,
    Votes,
}

impl Section {
    fn from_line(s:&str) -> Option<Section> {
        match s.trim().to_ascii_uppercase().as_str() {
            "META" => Some(Section::Meta),
            "PROJECTS" => Some(Section::Projects),
            "VOTES" => Some(Section::Votes),
            _ => None,
        }
    }
}

/// The columns of a section, from its header line.
struct Columns {
    names : Vec<String>,
}

impl Columns {
    fn new(record:&csv::StringRecord) -> Self {
        Columns{ names: record.iter().map(|s|s.trim().to_ascii_lowercase()).collect() }
    }
    fn find(&self,name:&str) -> Option<usize> { self.names.iter().position(|n|n==name) }
    fn require(&self,name:&str,section:Section) -> anyhow::Result<usize> {
        self.find(name).ok_or_else(||anyhow!("Section {:?} has no column {}",section,name))
    }
}

pub fn parse<P:AsRef<Path>>(path:P) -> anyhow::Result<Election> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let filename = path.as_ref().file_name().and_then(|s|s.to_str()).unwrap_or("");
    parse_str(&text,filename)
}

/// Parse the contents of a .pb file. `default_name` is used if the metadata has no description.
pub fn parse_str(text:&str,default_name:&str) -> anyhow::Result<Election> {
    let mut reader = csv::ReaderBuilder::new().delimiter(b';').has_headers(false).flexible(true).from_reader(text.as_bytes());
    let mut section : Option<Section> = None;
    let mut columns : Option<Columns> = None;
    let mut meta : HashMap<String,String> = HashMap::new();
    let mut projects : Vec<Project> = vec![];
    let mut project_lookup : HashMap<String,ProjectIndex> = HashMap::new();
    let mut votes : Vec<(String,String)> = vec![];
    for record in reader.records() {
        let record = record?;
        if record.len()==1 {
            let field = record.get(0).unwrap_or("");
            if let Some(new_section) = Section::from_line(field) {
                section=Some(new_section);
                columns=None;
                continue;
            }
            if field.trim().is_empty() { continue; }
        }
        let Some(current) = section else { return Err(anyhow!("Data before the first section : {:?}",record)) };
        let cols = match &columns {
            Some(cols) => cols,
            None => { // header line
                columns=Some(Columns::new(&record));
                continue;
            }
        };
        let field = |i:usize| record.get(i).unwrap_or("").trim();
        match current {
            Section::Meta => { meta.insert(field(0).to_ascii_lowercase(),field(1).to_string()); }
            Section::Projects => {
                let id = field(cols.require("project_id",current)?).to_string();
                let cost = parse_rational(field(cols.require("cost",current)?)).map_err(|e|anyhow!("Project {} : {}",id,e))?;
                let name = cols.find("name").map(|i|field(i).to_string()).filter(|n|!n.is_empty());
                project_lookup.insert(id.clone(),ProjectIndex(projects.len()));
                projects.push(Project{id,cost,name});
            }
            Section::Votes => {
                let voter = field(cols.require("voter_id",current)?).to_string();
                let vote = field(cols.require("vote",current)?).to_string();
                votes.push((voter,vote));
            }
        }
    }
    let budget = meta.get("budget").ok_or_else(||anyhow!("No budget in META section"))?;
    let budget = parse_rational(budget).map_err(|e|anyhow!("Budget : {}",e))?;
    let mut voters : Vec<Voter> = Vec::with_capacity(votes.len());
    for (id,vote) in votes {
        let mut approvals = vec![];
        for project in vote.split(',').map(|s|s.trim()).filter(|s|!s.is_empty()) {
            let index = project_lookup.get(project).ok_or_else(||anyhow!("Voter {} voted for unknown project {}",id,project))?;
            approvals.push(*index);
        }
        voters.push(Voter{id,approvals});
    }
    let name = meta.get("description").filter(|d|!d.is_empty()).cloned().unwrap_or_else(||default_name.to_string());
    Ok(Election::new(name,budget,projects,voters)?)
}
