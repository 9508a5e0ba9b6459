mod clock;
mod condition;
mod defs;
mod record;
mod value;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use condition::{
    AttributeExpr, Condition, ConditionGroup, GroupKind, Predicate, PredicateKind, all, any, attr,
    not,
};
pub use defs::{
    AspectRule, FieldAspect, FieldRule, FieldRuleBuilder, LogicDefs, LogicDefsBuilder, OptionRule,
    OptionRulesBuilder, PanelAspect, PanelRule, PanelRuleBuilder,
};
pub use record::{DataSource, Record};
pub use value::{CompareOp, Value};
pub use view::{Mutation, MutationSource, RecordingView, ViewSurface};
