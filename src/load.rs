//! Lenient conversion of JSON rule definitions into typed rules.
//!
//! Definitions come from form metadata edited by administrators, so the
//! conversion is total: nodes of the wrong shape are kept in a form that
//! evaluates to `false` (conditions) or is skipped (aspects), never rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};

use crate::types::{
    AspectRule, Condition, ConditionGroup, FieldAspect, FieldRule, GroupKind, LogicDefs,
    OptionRule, PanelAspect, PanelRule, Predicate, PredicateKind, Value,
};

pub(crate) fn defs_from_json(json: &JsonValue) -> LogicDefs {
    let Some(obj) = json.as_object() else {
        return LogicDefs::default();
    };
    LogicDefs {
        fields: named_entries(obj, "fields", field_rule_from_json),
        panels: named_entries(obj, "panels", panel_rule_from_json),
        options: named_entries(obj, "options", option_rules_from_json),
    }
}

fn named_entries<T>(
    obj: &Map<String, JsonValue>,
    key: &str,
    convert: impl Fn(&JsonValue) -> T,
) -> BTreeMap<String, T> {
    obj.get(key)
        .and_then(JsonValue::as_object)
        .map(|entries| {
            entries
                .iter()
                .map(|(name, v)| (name.clone(), convert(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn field_rule_from_json(json: &JsonValue) -> FieldRule {
    let mut rule = FieldRule::default();
    if let Some(obj) = json.as_object() {
        for aspect in FieldAspect::ALL {
            if let Some(aspect_rule) = obj.get(aspect.as_str()).and_then(aspect_rule_from_json) {
                rule.set_aspect(aspect, aspect_rule);
            }
        }
    }
    rule
}

fn panel_rule_from_json(json: &JsonValue) -> PanelRule {
    let mut rule = PanelRule::default();
    if let Some(obj) = json.as_object() {
        for aspect in PanelAspect::ALL {
            if let Some(aspect_rule) = obj.get(aspect.as_str()).and_then(aspect_rule_from_json) {
                rule.set_aspect(aspect, aspect_rule);
            }
        }
    }
    rule
}

/// A falsy aspect entry means "no rule for this aspect".
fn aspect_rule_from_json(json: &JsonValue) -> Option<AspectRule> {
    if !is_truthy(json) {
        return None;
    }
    Some(AspectRule {
        condition_group: json.get("conditionGroup").and_then(group_from_json),
    })
}

/// `None` for a falsy group, which leaves the aspect untouched. An empty
/// list is a valid group.
pub(crate) fn group_from_json(json: &JsonValue) -> Option<ConditionGroup> {
    is_truthy(json).then(|| members(json, condition_from_json))
}

fn option_rules_from_json(json: &JsonValue) -> Vec<OptionRule> {
    members(json, option_rule_from_json)
}

/// Convert each member of a list-like node: array elements, the property
/// values of an object, or one single-character string per character of a
/// string. Other scalars have no members.
fn members<T>(json: &JsonValue, convert: impl Fn(&JsonValue) -> T) -> Vec<T> {
    match json {
        JsonValue::Array(items) => items.iter().map(convert).collect(),
        JsonValue::Object(entries) => entries.values().map(convert).collect(),
        JsonValue::String(s) => s
            .chars()
            .map(|c| convert(&JsonValue::String(c.to_string())))
            .collect(),
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => Vec::new(),
    }
}

fn option_rule_from_json(json: &JsonValue) -> OptionRule {
    let condition_group = json
        .get("conditionGroup")
        .and_then(group_from_json)
        .unwrap_or_default();
    let option_list = json
        .get("optionList")
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    JsonValue::String(s) => s.clone(),
                    other => Value::from(other).coerce_to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    OptionRule {
        condition_group,
        option_list,
    }
}

pub(crate) fn condition_from_json(json: &JsonValue) -> Condition {
    let Some(obj) = json.as_object() else {
        return Condition::Leaf(Predicate::detached());
    };

    let type_name = match obj.get("type") {
        Some(JsonValue::String(s)) if !s.is_empty() => s.clone(),
        Some(other) if is_truthy(other) => other.to_string(),
        _ => PredicateKind::Equals.as_str().to_owned(),
    };

    if let Some(kind) = GroupKind::parse(&type_name) {
        let value = obj.get("value").filter(|v| is_truthy(v));
        return match kind {
            GroupKind::And => Condition::And(children_from_json(value)),
            GroupKind::Or => Condition::Or(children_from_json(value)),
            GroupKind::Not => Condition::Not(value.map(|v| Box::new(condition_from_json(v)))),
        };
    }

    let attribute = obj
        .get("attribute")
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    Condition::Leaf(Predicate {
        kind: PredicateKind::parse(&type_name),
        attribute,
        value: obj.get("value").map(Value::from),
    })
}

fn children_from_json(value: Option<&JsonValue>) -> Vec<Condition> {
    value
        .map(|v| members(v, condition_from_json))
        .unwrap_or_default()
}

fn is_truthy(json: &JsonValue) -> bool {
    match json {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Ok(condition_from_json(&json))
    }
}

impl From<JsonValue> for AspectRule {
    fn from(json: JsonValue) -> Self {
        aspect_rule_from_json(&json).unwrap_or_default()
    }
}

impl From<JsonValue> for FieldRule {
    fn from(json: JsonValue) -> Self {
        field_rule_from_json(&json)
    }
}

impl From<JsonValue> for PanelRule {
    fn from(json: JsonValue) -> Self {
        panel_rule_from_json(&json)
    }
}

impl From<JsonValue> for OptionRule {
    fn from(json: JsonValue) -> Self {
        option_rule_from_json(&json)
    }
}

impl From<JsonValue> for LogicDefs {
    fn from(json: JsonValue) -> Self {
        defs_from_json(&json)
    }
}
