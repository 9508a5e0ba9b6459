use std::fmt;
use std::ops::Not;

use super::Value;

/// The predicate a leaf condition applies to one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateKind {
    Equals,
    NotEquals,
    IsEmpty,
    IsNotEmpty,
    IsTrue,
    IsFalse,
    /// `contains`, also spelled `has`.
    Contains,
    /// `notContains`, also spelled `notHas`.
    NotContains,
    StartsWith,
    EndsWith,
    Matches,
    GreaterThan,
    LessThan,
    GreaterThanOrEquals,
    LessThanOrEquals,
    In,
    NotIn,
    IsToday,
    InFuture,
    InPast,
    /// A type name this engine does not know. Always evaluates to `false`.
    Unknown(String),
}

impl PredicateKind {
    /// Resolve a predicate type name. Never fails: unknown names map to
    /// [`PredicateKind::Unknown`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "equals" => PredicateKind::Equals,
            "notEquals" => PredicateKind::NotEquals,
            "isEmpty" => PredicateKind::IsEmpty,
            "isNotEmpty" => PredicateKind::IsNotEmpty,
            "isTrue" => PredicateKind::IsTrue,
            "isFalse" => PredicateKind::IsFalse,
            "contains" | "has" => PredicateKind::Contains,
            "notContains" | "notHas" => PredicateKind::NotContains,
            "startsWith" => PredicateKind::StartsWith,
            "endsWith" => PredicateKind::EndsWith,
            "matches" => PredicateKind::Matches,
            "greaterThan" => PredicateKind::GreaterThan,
            "lessThan" => PredicateKind::LessThan,
            "greaterThanOrEquals" => PredicateKind::GreaterThanOrEquals,
            "lessThanOrEquals" => PredicateKind::LessThanOrEquals,
            "in" => PredicateKind::In,
            "notIn" => PredicateKind::NotIn,
            "isToday" => PredicateKind::IsToday,
            "inFuture" => PredicateKind::InFuture,
            "inPast" => PredicateKind::InPast,
            other => PredicateKind::Unknown(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PredicateKind::Equals => "equals",
            PredicateKind::NotEquals => "notEquals",
            PredicateKind::IsEmpty => "isEmpty",
            PredicateKind::IsNotEmpty => "isNotEmpty",
            PredicateKind::IsTrue => "isTrue",
            PredicateKind::IsFalse => "isFalse",
            PredicateKind::Contains => "contains",
            PredicateKind::NotContains => "notContains",
            PredicateKind::StartsWith => "startsWith",
            PredicateKind::EndsWith => "endsWith",
            PredicateKind::Matches => "matches",
            PredicateKind::GreaterThan => "greaterThan",
            PredicateKind::LessThan => "lessThan",
            PredicateKind::GreaterThanOrEquals => "greaterThanOrEquals",
            PredicateKind::LessThanOrEquals => "lessThanOrEquals",
            PredicateKind::In => "in",
            PredicateKind::NotIn => "notIn",
            PredicateKind::IsToday => "isToday",
            PredicateKind::InFuture => "inFuture",
            PredicateKind::InPast => "inPast",
            PredicateKind::Unknown(name) => name,
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single test against one record attribute.
///
/// `attribute` and `value` are optional because rule definitions are loaded
/// leniently: a predicate without an attribute is kept and evaluates to
/// `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub kind: PredicateKind,
    pub attribute: Option<String>,
    pub value: Option<Value>,
}

impl Predicate {
    /// A predicate with no attribute. Stands in for malformed rule nodes.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            kind: PredicateKind::Equals,
            attribute: None,
            value: None,
        }
    }
}

/// The condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Predicate),
    /// True when every child is true; an empty list is true.
    And(Vec<Condition>),
    /// True when any child is true; an empty list is false.
    Or(Vec<Condition>),
    /// Negation of exactly one child. A missing child is `false`.
    Not(Option<Box<Condition>>),
}

/// A top-level condition group, evaluated as an AND of its members.
pub type ConditionGroup = Vec<Condition>;

/// Group combinators, also used to select how a group is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKind {
    #[default]
    And,
    Or,
    Not,
}

impl GroupKind {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "and" => Some(GroupKind::And),
            "or" => Some(GroupKind::Or),
            "not" => Some(GroupKind::Not),
            _ => None,
        }
    }
}

impl Condition {
    /// Wrap this condition as the single child of a NOT node.
    #[must_use]
    pub fn negate(self) -> Condition {
        Condition::Not(Some(Box::new(self)))
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        self.negate()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Leaf(p) => {
                let attribute = p.attribute.as_deref().unwrap_or("?");
                match &p.value {
                    Some(value) => write!(f, "({attribute} {} {value})", p.kind),
                    None => write!(f, "({attribute} {})", p.kind),
                }
            }
            Condition::And(children) => write_list(f, "AND", children),
            Condition::Or(children) => write_list(f, "OR", children),
            Condition::Not(Some(inner)) => write!(f, "(NOT {inner})"),
            Condition::Not(None) => write!(f, "(NOT)"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, op: &str, children: &[Condition]) -> fmt::Result {
    write!(f, "(")?;
    for (i, c) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{c}")?;
    }
    if children.is_empty() {
        write!(f, "{op}")?;
    }
    write!(f, ")")
}

/// Intermediate builder for leaf conditions.
/// Created by [`attr()`]; requires a predicate method to produce a [`Condition`].
#[derive(Debug, Clone)]
pub struct AttributeExpr {
    attribute: String,
}

impl AttributeExpr {
    fn with(self, kind: PredicateKind, value: Option<Value>) -> Condition {
        Condition::Leaf(Predicate {
            kind,
            attribute: Some(self.attribute),
            value,
        })
    }

    #[must_use]
    pub fn equals(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::Equals, Some(value.into()))
    }

    #[must_use]
    pub fn not_equals(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::NotEquals, Some(value.into()))
    }

    #[must_use]
    pub fn is_empty(self) -> Condition {
        self.with(PredicateKind::IsEmpty, None)
    }

    #[must_use]
    pub fn is_not_empty(self) -> Condition {
        self.with(PredicateKind::IsNotEmpty, None)
    }

    #[must_use]
    pub fn is_true(self) -> Condition {
        self.with(PredicateKind::IsTrue, None)
    }

    #[must_use]
    pub fn is_false(self) -> Condition {
        self.with(PredicateKind::IsFalse, None)
    }

    #[must_use]
    pub fn contains(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::Contains, Some(value.into()))
    }

    #[must_use]
    pub fn not_contains(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::NotContains, Some(value.into()))
    }

    #[must_use]
    pub fn starts_with(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::StartsWith, Some(value.into()))
    }

    #[must_use]
    pub fn ends_with(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::EndsWith, Some(value.into()))
    }

    /// `pattern` is a regex literal such as `"/^acme/i"`.
    #[must_use]
    pub fn matches(self, pattern: &str) -> Condition {
        self.with(PredicateKind::Matches, Some(Value::from(pattern)))
    }

    #[must_use]
    pub fn greater_than(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::GreaterThan, Some(value.into()))
    }

    #[must_use]
    pub fn less_than(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::LessThan, Some(value.into()))
    }

    #[must_use]
    pub fn greater_than_or_equals(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::GreaterThanOrEquals, Some(value.into()))
    }

    #[must_use]
    pub fn less_than_or_equals(self, value: impl Into<Value>) -> Condition {
        self.with(PredicateKind::LessThanOrEquals, Some(value.into()))
    }

    #[must_use]
    pub fn is_in(self, values: impl Into<Value>) -> Condition {
        self.with(PredicateKind::In, Some(values.into()))
    }

    #[must_use]
    pub fn not_in(self, values: impl Into<Value>) -> Condition {
        self.with(PredicateKind::NotIn, Some(values.into()))
    }

    #[must_use]
    pub fn is_today(self) -> Condition {
        self.with(PredicateKind::IsToday, None)
    }

    #[must_use]
    pub fn in_future(self) -> Condition {
        self.with(PredicateKind::InFuture, None)
    }

    #[must_use]
    pub fn in_past(self) -> Condition {
        self.with(PredicateKind::InPast, None)
    }

    /// A leaf with an arbitrary predicate type name.
    #[must_use]
    pub fn predicate(self, kind: &str, value: Option<Value>) -> Condition {
        self.with(PredicateKind::parse(kind), value)
    }
}

#[must_use]
pub fn attr(attribute: &str) -> AttributeExpr {
    AttributeExpr {
        attribute: attribute.to_owned(),
    }
}

#[must_use]
pub fn all(children: Vec<Condition>) -> Condition {
    Condition::And(children)
}

#[must_use]
pub fn any(children: Vec<Condition>) -> Condition {
    Condition::Or(children)
}

#[must_use]
pub fn not(child: Condition) -> Condition {
    child.negate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_equals_str() {
        let cond = attr("status").equals("Open");
        assert_eq!(
            cond,
            Condition::Leaf(Predicate {
                kind: PredicateKind::Equals,
                attribute: Some("status".to_owned()),
                value: Some(Value::String("Open".to_owned())),
            })
        );
    }

    #[test]
    fn attr_is_empty_has_no_value() {
        match attr("name").is_empty() {
            Condition::Leaf(p) => {
                assert_eq!(p.kind, PredicateKind::IsEmpty);
                assert!(p.value.is_none());
            }
            other => panic!("expected Leaf, got {other:?}"),
        }
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(PredicateKind::parse("has"), PredicateKind::Contains);
        assert_eq!(PredicateKind::parse("notHas"), PredicateKind::NotContains);
        assert_eq!(
            PredicateKind::parse("bogus"),
            PredicateKind::Unknown("bogus".to_owned())
        );
    }

    #[test]
    fn parse_round_trips_known_names() {
        let names = [
            "equals",
            "notEquals",
            "isEmpty",
            "isNotEmpty",
            "isTrue",
            "isFalse",
            "contains",
            "notContains",
            "startsWith",
            "endsWith",
            "matches",
            "greaterThan",
            "lessThan",
            "greaterThanOrEquals",
            "lessThanOrEquals",
            "in",
            "notIn",
            "isToday",
            "inFuture",
            "inPast",
        ];
        for name in names {
            assert_eq!(PredicateKind::parse(name).as_str(), name);
        }
    }

    #[test]
    fn group_kind_parse() {
        assert_eq!(GroupKind::parse("and"), Some(GroupKind::And));
        assert_eq!(GroupKind::parse("or"), Some(GroupKind::Or));
        assert_eq!(GroupKind::parse("not"), Some(GroupKind::Not));
        assert_eq!(GroupKind::parse("xor"), None);
    }

    #[test]
    fn not_operator_wraps_single_child() {
        let cond = !attr("closed").is_true();
        match cond {
            Condition::Not(Some(inner)) => {
                assert_eq!(*inner, attr("closed").is_true());
            }
            other => panic!("expected Not, got {other:?}"),
        }
    }

    #[test]
    fn display_tree() {
        let cond = any(vec![
            attr("a").equals(1_i64),
            not(attr("b").is_empty()),
        ]);
        assert_eq!(cond.to_string(), "((a equals 1) OR (NOT (b isEmpty)))");
        assert_eq!(all(vec![]).to_string(), "(AND)");
    }
}
