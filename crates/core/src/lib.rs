// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! desk-core: helpdesk automation engine
//!
//! This crate compiles automation rules (nested AND/OR groups of typed
//! conditions) into SQL queries over a target entity type, runs them
//! against the helpdesk SQLite store, and builds change-notification
//! content from the audit log.

pub mod audit;
pub mod clock;
pub mod compiler;
pub mod condition;
pub mod config;
pub mod db;
pub mod error;
pub mod group;
pub mod notification;
pub mod operator;
pub mod priority;
pub mod provider;
pub mod query;
pub mod storage;
pub mod strategy;
pub mod target;
pub mod ticket;
pub mod user;
pub mod value;

pub use audit::{AuditAction, AuditEntry, AuditRepository, FieldDiff};
pub use clock::{Clock, FixedClock, SystemClock};
pub use compiler::QueryCompiler;
pub use condition::{
    Condition, ConditionDefinition, ConditionFactory, ConditionKind, ConditionParameters,
};
pub use config::{AutomationConfig, TICKET_CLASS, TICKET_TARGET};
pub use db::Database;
pub use error::{Error, Result};
pub use group::{Connector, Group, Rule};
pub use notification::{
    Change, EmailTemplateOptions, EntityProcessor, NotificationContext, Recipient,
    TicketProcessor,
};
pub use operator::Operator;
pub use priority::PriorityWeights;
pub use provider::TargetEntityProvider;
pub use query::{Predicate, Query, SqlStatement};
pub use storage::{Record, Storage};
pub use strategy::{FieldStrategy, StrategyRegistry};
pub use target::{ConfigurationProvider, FieldType, MetadataResolver};
pub use ticket::{Attachment, Source, Status, Ticket};
pub use user::{User, UserDetails, UserKind, UserService};
pub use value::Value;
