// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Exact rational amounts of money. Nothing in the count is ever rounded.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use num::{BigInt, BigRational};
use num::rational::Ratio;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub fn rational_from_usize(n:usize) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum RationalParseError {
    #[error("Expecting a number, got an empty string")]
    Empty,
    #[error("Could not interpret {0} as an exact number")]
    Malformed(String),
}

/// Parse an integer, a decimal or a fraction into an exact rational.
///
/// ```
/// use pb::rational::parse_rational;
/// use num::BigRational;
/// use std::str::FromStr;
/// assert_eq!(parse_rational("12").unwrap(),BigRational::from_str("12").unwrap());
/// assert_eq!(parse_rational("-0.25").unwrap(),BigRational::from_str("-1/4").unwrap());
/// assert_eq!(parse_rational(" 3/6 ").unwrap(),BigRational::from_str("1/2").unwrap());
/// assert!(parse_rational("1.2.3").is_err());
/// assert!(parse_rational("1/0").is_err());
/// ```
pub fn parse_rational(s:&str) -> Result<BigRational,RationalParseError> {
    let s = s.trim();
    if s.is_empty() { return Err(RationalParseError::Empty); }
    let malformed = || RationalParseError::Malformed(s.to_string());
    if s.contains('/') { return Ratio::from_str(s).map_err(|_|malformed()); }
    let (negative,unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true,rest),
        None => (false,s.strip_prefix('+').unwrap_or(s)),
    };
    let (whole,fraction) = unsigned.split_once('.').unwrap_or((unsigned,""));
    if whole.is_empty() && fraction.is_empty() { return Err(malformed()); }
    if !whole.chars().chain(fraction.chars()).all(|c|c.is_ascii_digit()) { return Err(malformed()); }
    let digits = format!("{}{}",whole,fraction);
    let numerator = BigInt::from_str(&digits).map_err(|_|malformed())?;
    let numerator = if negative { -numerator } else { numerator };
    let denominator = num::pow(BigInt::from(10),fraction.len());
    Ok(BigRational::new(numerator,denominator))
}

/// A rational number that should be serialized/deserialized as a string such as "7/2".
#[derive(Clone,Debug,Serialize,Deserialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct StringSerializedRational(pub BigRational);

impl Display for StringSerializedRational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<StringSerializedRational> for String {
    fn from(t: StringSerializedRational) -> Self { t.0.to_string() }
}

impl FromStr for StringSerializedRational {
    type Err = RationalParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(StringSerializedRational(parse_rational(s)?)) }
}

impl TryFrom<String> for StringSerializedRational {
    type Error = RationalParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Ok(StringSerializedRational(parse_rational(&s)?)) }
}

/// For `#[serde(with="pb::rational::as_string")]` on a plain `BigRational` field.
pub mod as_string {
    use num::BigRational;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::de::Error;

    pub fn serialize<S:Serializer>(value:&BigRational,serializer:S) -> Result<S::Ok,S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de,D:Deserializer<'de>>(deserializer:D) -> Result<BigRational,D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_rational(&s).map_err(D::Error::custom)
    }
}

/// Like [as_string] but for a list of values.
pub mod vec_as_string {
    use num::BigRational;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::ser::SerializeSeq;
    use serde::de::Error;

    pub fn serialize<S:Serializer>(values:&[BigRational],serializer:S) -> Result<S::Ok,S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for v in values { seq.serialize_element(&v.to_string())?; }
        seq.end()
    }

    pub fn deserialize<'de,D:Deserializer<'de>>(deserializer:D) -> Result<Vec<BigRational>,D::Error> {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings.iter().map(|s|super::parse_rational(s).map_err(D::Error::custom)).collect()
    }
}
