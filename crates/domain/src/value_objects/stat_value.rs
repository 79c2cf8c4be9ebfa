//! Stored stat values and their permanent/temporary facets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two parallel values every stat carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Permanent,
    Temporary,
}

impl Facet {
    pub const BOTH: [Facet; 2] = [Facet::Permanent, Facet::Temporary];
}

/// A stat value: dots/ratings are integers, identity fields are text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i32),
    Text(String),
}

impl StatValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Integer view of the value. Text holding a plain integer (as left by
    /// older sheets) is accepted too.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Int(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for StatValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Permanent and temporary values of a single stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFacets {
    #[serde(alias = "perm")]
    pub permanent: StatValue,
    #[serde(alias = "temp")]
    pub temporary: StatValue,
}

impl ValueFacets {
    /// Both facets set to the same value.
    pub fn uniform(value: StatValue) -> Self {
        Self {
            permanent: value.clone(),
            temporary: value,
        }
    }

    pub fn get(&self, facet: Facet) -> &StatValue {
        match facet {
            Facet::Permanent => &self.permanent,
            Facet::Temporary => &self.temporary,
        }
    }

    pub fn set(&mut self, facet: Facet, value: StatValue) {
        match facet {
            Facet::Permanent => self.permanent = value,
            Facet::Temporary => self.temporary = value,
        }
    }
}
