use tracing::{debug, trace};

use crate::evaluate::Evaluator;
use crate::types::{
    AspectRule, Clock, Condition, DataSource, FieldAspect, GroupKind, LogicDefs, MutationSource,
    PanelAspect, PanelRule, SystemClock, ViewSurface,
};

/// Evaluates a form's rule definitions against its record and drives the
/// view accordingly.
///
/// The engine owns its [`LogicDefs`]; after construction they change only
/// through [`add_panel_visible_condition`](Self::add_panel_visible_condition)
/// and [`add_panel_styled_condition`](Self::add_panel_styled_condition).
/// It keeps no UI state of its own: every pass re-issues one mutation per
/// evaluated aspect, so running [`process`](Self::process) twice is redundant
/// but harmless.
///
/// # Example
///
/// ```
/// use formlogic::{attr, DynamicLogic, LogicDefsBuilder, Mutation, Record, RecordingView};
///
/// let defs = LogicDefsBuilder::new()
///     .field("closeReason", |f| f.visible(vec![attr("status").equals("Closed")]))
///     .build();
/// let record = Record::new().set("status", "Open");
///
/// let mut logic = DynamicLogic::new(defs, record, RecordingView::new());
/// logic.process();
/// assert_eq!(
///     logic.view().mutations(),
///     &[Mutation::HideField("closeReason".to_owned())]
/// );
/// ```
pub struct DynamicLogic<D, V> {
    defs: LogicDefs,
    data: D,
    view: V,
    clock: Box<dyn Clock>,
}

impl<D: DataSource, V: ViewSurface> DynamicLogic<D, V> {
    /// Bind rule definitions to a data source and a view. Date predicates use
    /// the local system clock until [`with_clock`](Self::with_clock) is called.
    #[must_use]
    pub fn new(defs: LogicDefs, data: D, view: V) -> Self {
        Self {
            defs,
            data,
            view,
            clock: Box::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Run one full pass: field aspects, then panel aspects, then option
    /// lists. All mutations are applied before this returns.
    pub fn process(&mut self) {
        debug!(
            fields = self.defs.fields.len(),
            panels = self.defs.panels.len(),
            options = self.defs.options.len(),
            "processing form logic"
        );
        let Self {
            defs,
            data,
            view,
            clock,
        } = self;
        let evaluator = Evaluator::new(&*data, &**clock);

        for (name, rule) in &defs.fields {
            for aspect in FieldAspect::ALL {
                let Some(group) = rule
                    .aspect(aspect)
                    .and_then(|r| r.condition_group.as_deref())
                else {
                    continue;
                };
                let result = evaluator.check_condition_group(group, GroupKind::And);
                trace!(field = %name, %aspect, result, "field aspect evaluated");
                apply_field(view, name, aspect, result);
            }
        }

        for (name, rule) in &defs.panels {
            for aspect in PanelAspect::ALL {
                panel_aspect(&evaluator, view, name, rule, aspect);
            }
        }

        for (name, rules) in &defs.options {
            let matched = rules
                .iter()
                .position(|r| evaluator.check_condition_group(&r.condition_group, GroupKind::And));
            trace!(field = %name, candidate = ?matched, "option list evaluated");
            match matched {
                Some(i) => view.set_field_option_list(name, &rules[i].option_list),
                None => view.reset_field_option_list(name),
            }
        }
    }

    /// Re-evaluate one aspect of one panel. A panel without that aspect (or
    /// without a condition group for it) is left untouched.
    pub fn process_panel(&mut self, name: &str, aspect: PanelAspect) {
        let Some(rule) = self.defs.panels.get(name) else {
            return;
        };
        let evaluator = Evaluator::new(&self.data, &*self.clock);
        panel_aspect(&evaluator, &mut self.view, name, rule, aspect);
    }

    /// Replace the visibility rule of a panel, creating the panel entry if
    /// needed, and apply it at once.
    pub fn add_panel_visible_condition(&mut self, name: &str, rule: impl Into<AspectRule>) {
        self.add_panel_condition(name, PanelAspect::Visible, rule.into());
    }

    /// Replace the styling rule of a panel, creating the panel entry if
    /// needed, and apply it at once.
    pub fn add_panel_styled_condition(&mut self, name: &str, rule: impl Into<AspectRule>) {
        self.add_panel_condition(name, PanelAspect::Styled, rule.into());
    }

    fn add_panel_condition(&mut self, name: &str, aspect: PanelAspect, rule: AspectRule) {
        debug!(panel = name, %aspect, "panel rule injected");
        self.defs
            .panels
            .entry(name.to_owned())
            .or_default()
            .set_aspect(aspect, rule);
        self.process_panel(name, aspect);
    }

    /// Evaluate a condition group against the current data.
    #[must_use]
    pub fn check_condition_group(&self, group: &[Condition], kind: GroupKind) -> bool {
        Evaluator::new(&self.data, &*self.clock).check_condition_group(group, kind)
    }

    /// Evaluate a single condition against the current data.
    #[must_use]
    pub fn check_condition(&self, condition: &Condition) -> bool {
        Evaluator::new(&self.data, &*self.clock).check_condition(condition)
    }

    #[must_use]
    pub fn defs(&self) -> &LogicDefs {
        &self.defs
    }

    #[must_use]
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable access to the data source, e.g. to apply a user edit before
    /// the next [`process`](Self::process).
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn into_parts(self) -> (LogicDefs, D, V) {
        (self.defs, self.data, self.view)
    }
}

fn panel_aspect<D, V>(
    evaluator: &Evaluator<'_, D>,
    view: &mut V,
    name: &str,
    rule: &PanelRule,
    aspect: PanelAspect,
) where
    D: DataSource + ?Sized,
    V: ViewSurface + ?Sized,
{
    let Some(group) = rule
        .aspect(aspect)
        .and_then(|r| r.condition_group.as_deref())
    else {
        return;
    };
    let result = evaluator.check_condition_group(group, GroupKind::And);
    trace!(panel = name, %aspect, result, "panel aspect evaluated");
    apply_panel(view, name, aspect, result);
}

fn apply_field<V: ViewSurface + ?Sized>(view: &mut V, name: &str, aspect: FieldAspect, on: bool) {
    match (aspect, on) {
        (FieldAspect::Visible, true) => view.show_field(name),
        (FieldAspect::Visible, false) => view.hide_field(name),
        (FieldAspect::Required, true) => view.set_field_required(name),
        (FieldAspect::Required, false) => view.set_field_not_required(name),
        (FieldAspect::ReadOnly, true) => view.set_field_read_only(name),
        (FieldAspect::ReadOnly, false) => view.set_field_not_read_only(name),
    }
}

fn apply_panel<V: ViewSurface + ?Sized>(view: &mut V, name: &str, aspect: PanelAspect, on: bool) {
    let source = MutationSource::DynamicLogic;
    match (aspect, on) {
        (PanelAspect::Visible, true) => view.show_panel(name, source),
        (PanelAspect::Visible, false) => view.hide_panel(name, false, source),
        (PanelAspect::Styled, true) => view.style_panel(name, source),
        (PanelAspect::Styled, false) => view.unstyle_panel(name, false, source),
    }
}
