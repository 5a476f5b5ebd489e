// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod completions;
pub mod explain;
pub mod notify;
pub mod schema;
pub mod targets;

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use desk_core::{
    AutomationConfig, ConfigurationProvider, Database, FixedClock, QueryCompiler, Rule,
};

use crate::cli::Cli;
use crate::env;
use crate::error::Result;

/// Database used when neither `--db` nor `DESK_DB` is given.
pub const DEFAULT_DB: &str = "desk.db";

/// Settings shared by every command.
pub struct Context {
    pub config: Arc<AutomationConfig>,
    pub db_path: PathBuf,
    pub now: Option<DateTime<Utc>>,
}

impl Context {
    /// Resolve configuration and database from flags, then environment,
    /// then defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match cli.config.clone().or_else(env::config_path) {
            Some(path) => {
                debug!(path = %path.display(), "loading automation configuration");
                AutomationConfig::load(&path)?
            }
            None => AutomationConfig::helpdesk(),
        };
        let db_path = cli
            .db
            .clone()
            .or_else(env::db_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB));
        Ok(Context {
            config: Arc::new(config),
            db_path,
            now: cli.now,
        })
    }

    pub fn compiler(&self) -> QueryCompiler {
        let compiler = QueryCompiler::new(Arc::clone(&self.config));
        match self.now {
            Some(now) => compiler.with_clock(FixedClock(now)),
            None => compiler,
        }
    }

    pub fn open_db(&self) -> Result<Database> {
        Ok(Database::open(&self.db_path)?)
    }

    /// Entity class to evaluate `rule` against: the explicit class, or the
    /// class bound to the rule's target type.
    pub fn target_class(&self, rule: &Rule, class: Option<&str>) -> Result<String> {
        match class {
            Some(class) => Ok(class.to_string()),
            None => Ok(self.config.entity_configuration(&rule.target)?.class.clone()),
        }
    }
}

pub fn load_rule(path: &Path) -> Result<Rule> {
    Ok(Rule::load(path)?)
}

/// Helpdesk configuration pinned to 2026-03-10 12:00 UTC.
#[cfg(test)]
pub(crate) fn test_context() -> Context {
    use chrono::TimeZone;
    Context {
        config: Arc::new(AutomationConfig::helpdesk()),
        db_path: PathBuf::from(DEFAULT_DB),
        now: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).single(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
