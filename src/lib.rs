//! Dynamic form logic: condition trees over a record's attributes that
//! decide which fields and panels of a form are visible, required,
//! read-only or styled, and which option list a field offers.
//!
//! Rules are plain data ([`LogicDefs`]), loaded from JSON or built in code.
//! A [`DynamicLogic`] engine evaluates them against a [`DataSource`] and
//! issues the resulting commands on a [`ViewSurface`].

mod dates;
mod engine;
mod error;
mod evaluate;
mod load;
pub mod pattern;
mod types;

pub use engine::DynamicLogic;
pub use error::FormLogicError;
pub use pattern::PatternError;
pub use types::{
    AspectRule, AttributeExpr, Clock, CompareOp, Condition, ConditionGroup, DataSource,
    FieldAspect, FieldRule, FieldRuleBuilder, FixedClock, GroupKind, LogicDefs, LogicDefsBuilder,
    Mutation, MutationSource, OptionRule, OptionRulesBuilder, PanelAspect, PanelRule,
    PanelRuleBuilder, Predicate, PredicateKind, Record, RecordingView, SystemClock, Value,
    ViewSurface, all, any, attr, not,
};
