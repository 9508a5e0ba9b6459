use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::condition::ConditionGroup;

/// A UI-state dimension of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAspect {
    Visible,
    Required,
    ReadOnly,
}

impl FieldAspect {
    /// Aspects in processing order.
    pub const ALL: [FieldAspect; 3] = [
        FieldAspect::Visible,
        FieldAspect::Required,
        FieldAspect::ReadOnly,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldAspect::Visible => "visible",
            FieldAspect::Required => "required",
            FieldAspect::ReadOnly => "readOnly",
        }
    }
}

/// A UI-state dimension of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAspect {
    Visible,
    Styled,
}

impl PanelAspect {
    /// Aspects in processing order.
    pub const ALL: [PanelAspect; 2] = [PanelAspect::Visible, PanelAspect::Styled];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PanelAspect::Visible => "visible",
            PanelAspect::Styled => "styled",
        }
    }
}

impl fmt::Display for FieldAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PanelAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule for one aspect. Without a condition group the aspect is left
/// untouched; it is not treated as `false`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct AspectRule {
    pub condition_group: Option<ConditionGroup>,
}

impl AspectRule {
    #[must_use]
    pub fn new(condition_group: ConditionGroup) -> Self {
        Self {
            condition_group: Some(condition_group),
        }
    }
}

impl From<ConditionGroup> for AspectRule {
    fn from(condition_group: ConditionGroup) -> Self {
        Self::new(condition_group)
    }
}

/// Per-aspect rules of one field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct FieldRule {
    pub visible: Option<AspectRule>,
    pub required: Option<AspectRule>,
    pub read_only: Option<AspectRule>,
}

impl FieldRule {
    #[must_use]
    pub fn aspect(&self, aspect: FieldAspect) -> Option<&AspectRule> {
        match aspect {
            FieldAspect::Visible => self.visible.as_ref(),
            FieldAspect::Required => self.required.as_ref(),
            FieldAspect::ReadOnly => self.read_only.as_ref(),
        }
    }

    pub fn set_aspect(&mut self, aspect: FieldAspect, rule: AspectRule) {
        let slot = match aspect {
            FieldAspect::Visible => &mut self.visible,
            FieldAspect::Required => &mut self.required,
            FieldAspect::ReadOnly => &mut self.read_only,
        };
        *slot = Some(rule);
    }
}

/// Per-aspect rules of one panel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct PanelRule {
    pub visible: Option<AspectRule>,
    pub styled: Option<AspectRule>,
}

impl PanelRule {
    #[must_use]
    pub fn aspect(&self, aspect: PanelAspect) -> Option<&AspectRule> {
        match aspect {
            PanelAspect::Visible => self.visible.as_ref(),
            PanelAspect::Styled => self.styled.as_ref(),
        }
    }

    pub fn set_aspect(&mut self, aspect: PanelAspect, rule: AspectRule) {
        match aspect {
            PanelAspect::Visible => self.visible = Some(rule),
            PanelAspect::Styled => self.styled = Some(rule),
        }
    }
}

/// One candidate option list for a field. An entry without a condition
/// group always matches.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct OptionRule {
    pub condition_group: ConditionGroup,
    pub option_list: Vec<String>,
}

/// The complete rule set of one form.
///
/// Maps are ordered by name so that a pass always issues its mutations in
/// the same order. That is name order, not the order in which entries
/// appear in a JSON document: `{"zeta": .., "alpha": ..}` processes `alpha`
/// first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct LogicDefs {
    pub fields: BTreeMap<String, FieldRule>,
    pub panels: BTreeMap<String, PanelRule>,
    pub options: BTreeMap<String, Vec<OptionRule>>,
}

impl LogicDefs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.panels.is_empty() && self.options.is_empty()
    }

    /// Parse rule definitions from JSON text.
    ///
    /// Shape problems inside the document never fail; only invalid JSON does.
    ///
    /// # Errors
    ///
    /// Returns [`FormLogicError::Json`](crate::FormLogicError::Json) if the
    /// text is not valid JSON.
    pub fn from_json(input: &str) -> Result<Self, crate::FormLogicError> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from_value(&json))
    }

    /// Read and parse a JSON definitions file.
    ///
    /// # Errors
    ///
    /// Returns [`FormLogicError`](crate::FormLogicError) on I/O or JSON failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::FormLogicError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Convert an already parsed JSON document.
    #[must_use]
    pub fn from_value(json: &serde_json::Value) -> Self {
        crate::load::defs_from_json(json)
    }
}

impl fmt::Display for LogicDefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LogicDefs({} fields, {} panels, {} option fields)",
            self.fields.len(),
            self.panels.len(),
            self.options.len(),
        )
    }
}

/// Builder for constructing [`LogicDefs`] in code.
///
/// # Example
///
/// ```
/// use formlogic::{attr, LogicDefsBuilder};
///
/// let defs = LogicDefsBuilder::new()
///     .field("closeDate", |f| f.visible(vec![attr("stage").equals("Closed Won")]))
///     .panel("billing", |p| p.styled(vec![attr("amount").greater_than(1000_i64)]))
///     .options("stage", |o| {
///         o.when(vec![attr("type").equals("Renewal")], &["Negotiation", "Closed Won"])
///     })
///     .build();
/// assert_eq!(defs.fields.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LogicDefsBuilder {
    defs: LogicDefs,
}

/// Intermediate builder passed to the field closure.
#[derive(Debug, Default)]
pub struct FieldRuleBuilder {
    rule: FieldRule,
}

/// Intermediate builder passed to the panel closure.
#[derive(Debug, Default)]
pub struct PanelRuleBuilder {
    rule: PanelRule,
}

/// Intermediate builder passed to the options closure.
#[derive(Debug, Default)]
pub struct OptionRulesBuilder {
    rules: Vec<OptionRule>,
}

impl LogicDefsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define the rules of a field. Redefining a field replaces it.
    #[must_use]
    pub fn field(mut self, name: &str, f: impl FnOnce(FieldRuleBuilder) -> FieldRuleBuilder) -> Self {
        let builder = f(FieldRuleBuilder::default());
        self.defs.fields.insert(name.to_owned(), builder.rule);
        self
    }

    /// Define the rules of a panel. Redefining a panel replaces it.
    #[must_use]
    pub fn panel(mut self, name: &str, f: impl FnOnce(PanelRuleBuilder) -> PanelRuleBuilder) -> Self {
        let builder = f(PanelRuleBuilder::default());
        self.defs.panels.insert(name.to_owned(), builder.rule);
        self
    }

    /// Define the ordered option-list candidates of a field.
    #[must_use]
    pub fn options(
        mut self,
        field: &str,
        f: impl FnOnce(OptionRulesBuilder) -> OptionRulesBuilder,
    ) -> Self {
        let builder = f(OptionRulesBuilder::default());
        self.defs.options.insert(field.to_owned(), builder.rules);
        self
    }

    #[must_use]
    pub fn build(self) -> LogicDefs {
        self.defs
    }
}

impl FieldRuleBuilder {
    #[must_use]
    pub fn visible(mut self, group: ConditionGroup) -> Self {
        self.rule.set_aspect(FieldAspect::Visible, AspectRule::new(group));
        self
    }

    #[must_use]
    pub fn required(mut self, group: ConditionGroup) -> Self {
        self.rule.set_aspect(FieldAspect::Required, AspectRule::new(group));
        self
    }

    #[must_use]
    pub fn read_only(mut self, group: ConditionGroup) -> Self {
        self.rule.set_aspect(FieldAspect::ReadOnly, AspectRule::new(group));
        self
    }
}

impl PanelRuleBuilder {
    #[must_use]
    pub fn visible(mut self, group: ConditionGroup) -> Self {
        self.rule.set_aspect(PanelAspect::Visible, AspectRule::new(group));
        self
    }

    #[must_use]
    pub fn styled(mut self, group: ConditionGroup) -> Self {
        self.rule.set_aspect(PanelAspect::Styled, AspectRule::new(group));
        self
    }
}

impl OptionRulesBuilder {
    /// Append a candidate; candidates are tried in the order they are added.
    #[must_use]
    pub fn when(mut self, group: ConditionGroup, option_list: &[&str]) -> Self {
        self.rules.push(OptionRule {
            condition_group: group,
            option_list: option_list.iter().map(|s| (*s).to_owned()).collect(),
        });
        self
    }
}
