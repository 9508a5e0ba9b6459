use std::fmt;

/// Tags a panel mutation with the subsystem that caused it, so the view can
/// tell logic-driven state apart from state the user toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationSource {
    DynamicLogic,
}

impl MutationSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MutationSource::DynamicLogic => "dynamicLogic",
        }
    }
}

impl fmt::Display for MutationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The UI layer that receives the engine's mutation commands.
///
/// Failing to apply a mutation (e.g. an unknown field name) is the
/// implementor's concern; the engine never inspects the outcome.
pub trait ViewSurface {
    fn show_field(&mut self, name: &str);
    fn hide_field(&mut self, name: &str);
    fn set_field_required(&mut self, name: &str);
    fn set_field_not_required(&mut self, name: &str);
    fn set_field_read_only(&mut self, name: &str);
    fn set_field_not_read_only(&mut self, name: &str);
    fn show_panel(&mut self, name: &str, source: MutationSource);
    /// `silent` requests removal without animation.
    fn hide_panel(&mut self, name: &str, silent: bool, source: MutationSource);
    fn style_panel(&mut self, name: &str, source: MutationSource);
    fn unstyle_panel(&mut self, name: &str, silent: bool, source: MutationSource);
    fn set_field_option_list(&mut self, name: &str, option_list: &[String]);
    /// Restore whatever option list the field has absent any override.
    /// Must be idempotent.
    fn reset_field_option_list(&mut self, name: &str);
}

impl<T: ViewSurface + ?Sized> ViewSurface for &mut T {
    fn show_field(&mut self, name: &str) {
        (**self).show_field(name);
    }

    fn hide_field(&mut self, name: &str) {
        (**self).hide_field(name);
    }

    fn set_field_required(&mut self, name: &str) {
        (**self).set_field_required(name);
    }

    fn set_field_not_required(&mut self, name: &str) {
        (**self).set_field_not_required(name);
    }

    fn set_field_read_only(&mut self, name: &str) {
        (**self).set_field_read_only(name);
    }

    fn set_field_not_read_only(&mut self, name: &str) {
        (**self).set_field_not_read_only(name);
    }

    fn show_panel(&mut self, name: &str, source: MutationSource) {
        (**self).show_panel(name, source);
    }

    fn hide_panel(&mut self, name: &str, silent: bool, source: MutationSource) {
        (**self).hide_panel(name, silent, source);
    }

    fn style_panel(&mut self, name: &str, source: MutationSource) {
        (**self).style_panel(name, source);
    }

    fn unstyle_panel(&mut self, name: &str, silent: bool, source: MutationSource) {
        (**self).unstyle_panel(name, silent, source);
    }

    fn set_field_option_list(&mut self, name: &str, option_list: &[String]) {
        (**self).set_field_option_list(name, option_list);
    }

    fn reset_field_option_list(&mut self, name: &str) {
        (**self).reset_field_option_list(name);
    }
}

/// One view call, as captured by [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    ShowField(String),
    HideField(String),
    SetFieldRequired(String),
    SetFieldNotRequired(String),
    SetFieldReadOnly(String),
    SetFieldNotReadOnly(String),
    ShowPanel {
        name: String,
        source: MutationSource,
    },
    HidePanel {
        name: String,
        silent: bool,
        source: MutationSource,
    },
    StylePanel {
        name: String,
        source: MutationSource,
    },
    UnstylePanel {
        name: String,
        silent: bool,
        source: MutationSource,
    },
    SetFieldOptionList {
        name: String,
        option_list: Vec<String>,
    },
    ResetFieldOptionList(String),
}

impl Mutation {
    /// The field or panel the mutation targets.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Mutation::ShowField(name)
            | Mutation::HideField(name)
            | Mutation::SetFieldRequired(name)
            | Mutation::SetFieldNotRequired(name)
            | Mutation::SetFieldReadOnly(name)
            | Mutation::SetFieldNotReadOnly(name)
            | Mutation::ResetFieldOptionList(name)
            | Mutation::ShowPanel { name, .. }
            | Mutation::HidePanel { name, .. }
            | Mutation::StylePanel { name, .. }
            | Mutation::UnstylePanel { name, .. }
            | Mutation::SetFieldOptionList { name, .. } => name,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::ShowField(name) => write!(f, "showField({name})"),
            Mutation::HideField(name) => write!(f, "hideField({name})"),
            Mutation::SetFieldRequired(name) => write!(f, "setFieldRequired({name})"),
            Mutation::SetFieldNotRequired(name) => write!(f, "setFieldNotRequired({name})"),
            Mutation::SetFieldReadOnly(name) => write!(f, "setFieldReadOnly({name})"),
            Mutation::SetFieldNotReadOnly(name) => write!(f, "setFieldNotReadOnly({name})"),
            Mutation::ShowPanel { name, source } => write!(f, "showPanel({name}, {source})"),
            Mutation::HidePanel {
                name,
                silent,
                source,
            } => write!(f, "hidePanel({name}, {silent}, {source})"),
            Mutation::StylePanel { name, source } => write!(f, "stylePanel({name}, {source})"),
            Mutation::UnstylePanel {
                name,
                silent,
                source,
            } => write!(f, "unstylePanel({name}, {silent}, {source})"),
            Mutation::SetFieldOptionList { name, option_list } => {
                write!(f, "setFieldOptionList({name}, [{}])", option_list.join(", "))
            }
            Mutation::ResetFieldOptionList(name) => write!(f, "resetFieldOptionList({name})"),
        }
    }
}

/// A [`ViewSurface`] that records every call in order.
///
/// Useful for headless rendering, diagnostics, and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingView {
    mutations: Vec<Mutation>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded mutations, oldest first.
    #[must_use]
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Recorded mutations targeting `name`.
    pub fn mutations_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Mutation> {
        self.mutations.iter().filter(move |m| m.target() == name)
    }

    /// Take the recorded mutations, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn clear(&mut self) {
        self.mutations.clear();
    }
}

impl ViewSurface for RecordingView {
    fn show_field(&mut self, name: &str) {
        self.mutations.push(Mutation::ShowField(name.to_owned()));
    }

    fn hide_field(&mut self, name: &str) {
        self.mutations.push(Mutation::HideField(name.to_owned()));
    }

    fn set_field_required(&mut self, name: &str) {
        self.mutations.push(Mutation::SetFieldRequired(name.to_owned()));
    }

    fn set_field_not_required(&mut self, name: &str) {
        self.mutations
            .push(Mutation::SetFieldNotRequired(name.to_owned()));
    }

    fn set_field_read_only(&mut self, name: &str) {
        self.mutations.push(Mutation::SetFieldReadOnly(name.to_owned()));
    }

    fn set_field_not_read_only(&mut self, name: &str) {
        self.mutations
            .push(Mutation::SetFieldNotReadOnly(name.to_owned()));
    }

    fn show_panel(&mut self, name: &str, source: MutationSource) {
        self.mutations.push(Mutation::ShowPanel {
            name: name.to_owned(),
            source,
        });
    }

    fn hide_panel(&mut self, name: &str, silent: bool, source: MutationSource) {
        self.mutations.push(Mutation::HidePanel {
            name: name.to_owned(),
            silent,
            source,
        });
    }

    fn style_panel(&mut self, name: &str, source: MutationSource) {
        self.mutations.push(Mutation::StylePanel {
            name: name.to_owned(),
            source,
        });
    }

    fn unstyle_panel(&mut self, name: &str, silent: bool, source: MutationSource) {
        self.mutations.push(Mutation::UnstylePanel {
            name: name.to_owned(),
            silent,
            source,
        });
    }

    fn set_field_option_list(&mut self, name: &str, option_list: &[String]) {
        self.mutations.push(Mutation::SetFieldOptionList {
            name: name.to_owned(),
            option_list: option_list.to_vec(),
        });
    }

    fn reset_field_option_list(&mut self, name: &str) {
        self.mutations
            .push(Mutation::ResetFieldOptionList(name.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_tag() {
        assert_eq!(MutationSource::DynamicLogic.as_str(), "dynamicLogic");
        assert_eq!(MutationSource::DynamicLogic.to_string(), "dynamicLogic");
    }

    #[test]
    fn records_in_call_order() {
        let mut view = RecordingView::new();
        view.show_field("name");
        view.hide_panel("billing", false, MutationSource::DynamicLogic);
        assert_eq!(
            view.mutations(),
            &[
                Mutation::ShowField("name".into()),
                Mutation::HidePanel {
                    name: "billing".into(),
                    silent: false,
                    source: MutationSource::DynamicLogic,
                },
            ]
        );
    }

    #[test]
    fn mutations_for_filters_by_target() {
        let mut view = RecordingView::new();
        view.show_field("a");
        view.set_field_required("b");
        view.hide_field("a");
        let for_a: Vec<_> = view.mutations_for("a").cloned().collect();
        assert_eq!(
            for_a,
            vec![Mutation::ShowField("a".into()), Mutation::HideField("a".into())]
        );
    }

    #[test]
    fn drain_empties_log() {
        let mut view = RecordingView::new();
        view.reset_field_option_list("stage");
        assert_eq!(view.drain().len(), 1);
        assert!(view.mutations().is_empty());
    }

    #[test]
    fn forwards_through_mut_ref() {
        fn apply(mut view: impl ViewSurface) {
            view.set_field_option_list("stage", &["a".to_owned()]);
        }

        let mut view = RecordingView::new();
        apply(&mut view);
        assert_eq!(view.mutations().len(), 1);
    }

    #[test]
    fn display() {
        let m = Mutation::SetFieldOptionList {
            name: "stage".into(),
            option_list: vec!["Lead".into(), "Won".into()],
        };
        assert_eq!(m.to_string(), "setFieldOptionList(stage, [Lead, Won])");
        let m = Mutation::UnstylePanel {
            name: "p".into(),
            silent: false,
            source: MutationSource::DynamicLogic,
        };
        assert_eq!(m.to_string(), "unstylePanel(p, false, dynamicLogic)");
    }
}
