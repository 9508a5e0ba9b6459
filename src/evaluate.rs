use std::cmp::Ordering;

use tracing::warn;

use crate::dates;
use crate::pattern;
use crate::types::{
    Clock, CompareOp, Condition, DataSource, GroupKind, Predicate, PredicateKind, Value,
};

/// Evaluates condition trees against one data snapshot.
pub(crate) struct Evaluator<'a, D: DataSource + ?Sized> {
    data: &'a D,
    clock: &'a dyn Clock,
}

impl<'a, D: DataSource + ?Sized> Evaluator<'a, D> {
    pub(crate) fn new(data: &'a D, clock: &'a dyn Clock) -> Self {
        Self { data, clock }
    }

    /// `And`: every member true (empty is true). `Or`: any member true
    /// (empty is false). `Not`: negation of the group read as `And`.
    pub(crate) fn check_condition_group(&self, group: &[Condition], kind: GroupKind) -> bool {
        match kind {
            GroupKind::And => group.iter().all(|c| self.check_condition(c)),
            GroupKind::Or => group.iter().any(|c| self.check_condition(c)),
            GroupKind::Not => !self.check_condition_group(group, GroupKind::And),
        }
    }

    pub(crate) fn check_condition(&self, condition: &Condition) -> bool {
        match condition {
            Condition::Leaf(predicate) => self.check_predicate(predicate),
            Condition::And(children) => self.check_condition_group(children, GroupKind::And),
            Condition::Or(children) => self.check_condition_group(children, GroupKind::Or),
            Condition::Not(Some(inner)) => !self.check_condition(inner),
            Condition::Not(None) => false,
        }
    }

    fn check_predicate(&self, predicate: &Predicate) -> bool {
        let Some(attribute) = predicate.attribute.as_deref() else {
            return false;
        };
        let actual = self.data.get(attribute);
        let actual = actual.as_ref();
        let expected = predicate.value.as_ref();

        match &predicate.kind {
            PredicateKind::Equals => {
                truthy(expected) && actual.is_some_and(|a| expected.is_some_and(|e| a.strict_eq(e)))
            }
            PredicateKind::NotEquals => {
                truthy(expected) && !actual.is_some_and(|a| expected.is_some_and(|e| a.strict_eq(e)))
            }
            PredicateKind::IsEmpty => is_empty(actual),
            PredicateKind::IsNotEmpty => !is_empty(actual),
            PredicateKind::IsTrue => truthy(actual),
            PredicateKind::IsFalse => !truthy(actual),
            PredicateKind::Contains => match actual {
                Some(a) if a.is_truthy() => contains(a, expected),
                _ => false,
            },
            PredicateKind::NotContains => match actual {
                Some(a) if a.is_truthy() => !contains(a, expected),
                _ => true,
            },
            PredicateKind::StartsWith => match actual {
                Some(a) if a.is_truthy() => starts_with(a, expected),
                _ => false,
            },
            PredicateKind::EndsWith => match actual {
                Some(a) if a.is_truthy() => ends_with(a, expected),
                _ => false,
            },
            PredicateKind::Matches => match actual {
                Some(a) if a.is_truthy() => matches(attribute, a, expected),
                _ => false,
            },
            PredicateKind::GreaterThan => compare(actual, CompareOp::Gt, expected),
            PredicateKind::LessThan => compare(actual, CompareOp::Lt, expected),
            PredicateKind::GreaterThanOrEquals => compare(actual, CompareOp::Gte, expected),
            PredicateKind::LessThanOrEquals => compare(actual, CompareOp::Lte, expected),
            PredicateKind::In => is_in(actual, expected),
            PredicateKind::NotIn => !is_in(actual, expected),
            PredicateKind::IsToday => self.day_is(actual, Ordering::Equal),
            PredicateKind::InFuture => self.day_is(actual, Ordering::Greater),
            PredicateKind::InPast => self.day_is(actual, Ordering::Less),
            PredicateKind::Unknown(name) => {
                warn!(attribute, kind = %name, "unrecognized condition type");
                false
            }
        }
    }

    fn day_is(&self, actual: Option<&Value>, wanted: Ordering) -> bool {
        match actual {
            Some(Value::String(s)) if !s.is_empty() => {
                dates::compare_to_today(s, self.clock) == Some(wanted)
            }
            _ => false,
        }
    }
}

fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_truthy)
}

fn is_empty(actual: Option<&Value>) -> bool {
    match actual {
        None | Some(Value::Null) => true,
        Some(Value::List(items)) => items.is_empty(),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// The text a value is searched for as, inside a string.
fn needle(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_owned(), Value::coerce_to_string)
}

fn strict_eq(a: &Value, b: Option<&Value>) -> bool {
    b.is_some_and(|b| a.strict_eq(b))
}

fn contains(actual: &Value, expected: Option<&Value>) -> bool {
    match actual {
        Value::String(s) => s.contains(needle(expected).as_str()),
        Value::List(items) => items.iter().any(|item| strict_eq(item, expected)),
        _ => false,
    }
}

fn starts_with(actual: &Value, expected: Option<&Value>) -> bool {
    match actual {
        Value::String(s) => s.starts_with(needle(expected).as_str()),
        Value::List(items) => items.first().is_some_and(|item| strict_eq(item, expected)),
        _ => false,
    }
}

fn ends_with(actual: &Value, expected: Option<&Value>) -> bool {
    match actual {
        Value::String(s) => s.ends_with(needle(expected).as_str()),
        Value::List(items) => items.last().is_some_and(|item| strict_eq(item, expected)),
        _ => false,
    }
}

fn matches(attribute: &str, actual: &Value, expected: Option<&Value>) -> bool {
    let Some(literal) = expected.map(Value::coerce_to_string) else {
        return false;
    };
    match pattern::compile(&literal) {
        Ok(re) => re.is_match(&actual.coerce_to_string()),
        Err(err) => {
            warn!(attribute, pattern = %literal, error = %err, "unusable match pattern");
            false
        }
    }
}

fn compare(actual: Option<&Value>, op: CompareOp, expected: Option<&Value>) -> bool {
    match (actual, expected) {
        (Some(a), Some(e)) => a.compare(op, e),
        _ => false,
    }
}

fn is_in(actual: Option<&Value>, expected: Option<&Value>) -> bool {
    match expected {
        Some(Value::List(items)) => actual.is_some_and(|a| items.iter().any(|i| i.strict_eq(a))),
        Some(Value::String(s)) => s.contains(needle(actual).as_str()),
        _ => false,
    }
}
