// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User identities.
//!
//! Helpdesk users come from two account stores: staff accounts (`oro`) and
//! customer accounts (`diamante`). They are referred to by a composite
//! identifier `<kind>_<id>`, e.g. `oro_12`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Account store a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    /// Staff account.
    Oro,
    /// Customer account.
    Diamante,
}

impl UserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Oro => "oro",
            UserKind::Diamante => "diamante",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "oro" => Ok(UserKind::Oro),
            "diamante" => Ok(UserKind::Diamante),
            _ => Err(Error::InvalidUser(s.to_string())),
        }
    }
}

/// A user reference: account kind plus numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct User {
    pub kind: UserKind,
    pub id: i64,
}

impl User {
    pub fn new(kind: UserKind, id: i64) -> Self {
        User { kind, id }
    }

    pub fn oro(id: i64) -> Self {
        User::new(UserKind::Oro, id)
    }

    pub fn diamante(id: i64) -> Self {
        User::new(UserKind::Diamante, id)
    }

    pub fn is_oro_user(&self) -> bool {
        self.kind == UserKind::Oro
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.id)
    }
}

impl FromStr for User {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidUser(s.to_string());
        let (kind, id) = s.split_once('_').ok_or_else(invalid)?;
        let kind = kind.parse::<UserKind>().map_err(|_| invalid())?;
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        if id <= 0 {
            return Err(invalid());
        }
        Ok(User { kind, id })
    }
}

impl Serialize for User {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A user with the contact details notifications need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub user: User,
    pub email: String,
    pub full_name: String,
}

/// Looks up user accounts.
pub trait UserService {
    fn fetch_user_details(&self, user: &User) -> Result<UserDetails>;

    /// The account registered under `email`, if any.
    fn user_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
