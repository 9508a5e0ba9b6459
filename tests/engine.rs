use formlogic::{
    attr, any, Condition, DataSource, DynamicLogic, FixedClock, LogicDefs, LogicDefsBuilder,
    Mutation, MutationSource, Record, RecordingView, Value, ViewSurface,
};
use serde_json::json;

fn engine(defs: LogicDefs, record: Record) -> DynamicLogic<Record, RecordingView> {
    DynamicLogic::new(defs, record, RecordingView::new())
        .with_clock(FixedClock::at_date(2024, 5, 1).unwrap())
}

fn status_defs() -> LogicDefs {
    LogicDefs::from_value(&json!({
        "fields": {
            "closeReason": {
                "visible": {"conditionGroup": [
                    {"type": "equals", "attribute": "status", "value": "Open"}
                ]}
            }
        }
    }))
}

#[test]
fn status_open_shows_field() {
    let mut logic = engine(status_defs(), Record::new().set("status", "Open"));
    logic.process();
    assert_eq!(
        logic.view().mutations(),
        &[Mutation::ShowField("closeReason".to_owned())]
    );
}

#[test]
fn status_closed_hides_field() {
    let mut logic = engine(status_defs(), Record::new().set("status", "Closed"));
    logic.process();
    assert_eq!(
        logic.view().mutations(),
        &[Mutation::HideField("closeReason".to_owned())]
    );
}

#[test]
fn user_edit_then_reprocess() {
    let mut logic = engine(status_defs(), Record::new().set("status", "Closed"));
    logic.process();
    logic.data_mut().insert("status", "Open");
    logic.process();
    let calls: Vec<String> = logic.view().mutations().iter().map(ToString::to_string).collect();
    assert_eq!(calls, ["hideField(closeReason)", "showField(closeReason)"]);
}

#[test]
fn nested_or_first_branch_true() {
    let cond: Condition = serde_json::from_value(json!({
        "type": "or",
        "value": [
            {"type": "equals", "attribute": "a", "value": 1},
            {"type": "equals", "attribute": "b", "value": 2}
        ]
    }))
    .unwrap();
    let logic = engine(
        LogicDefs::default(),
        Record::new().set("a", 1_i64).set("b", 3_i64),
    );
    assert!(logic.check_condition(&cond));
}

#[test]
fn is_today_against_fixed_clock() {
    let cond = attr("start").is_today();
    let record = Record::new().set("start", "2024-05-01T10:00:00");

    let today = DynamicLogic::new(LogicDefs::default(), record.clone(), RecordingView::new())
        .with_clock(FixedClock::at_date(2024, 5, 1).unwrap());
    assert!(today.check_condition(&cond));

    let tomorrow = DynamicLogic::new(LogicDefs::default(), record, RecordingView::new())
        .with_clock(FixedClock::at_date(2024, 5, 2).unwrap());
    assert!(!tomorrow.check_condition(&cond));
}

#[test]
fn date_time_uses_clock_offset() {
    // 22:30 UTC on May 1st is already May 2nd at UTC+3
    let record = Record::new().set("start", "2024-05-01 22:30:00");
    let clock = FixedClock::at_date(2024, 5, 2)
        .unwrap()
        .with_offset(3 * 3600)
        .unwrap();
    let logic = DynamicLogic::new(LogicDefs::default(), record, RecordingView::new())
        .with_clock(clock);
    assert!(logic.check_condition(&attr("start").is_today()));
}

#[test]
fn option_rule_second_candidate_applies() {
    let defs = LogicDefs::from_value(&json!({
        "options": {
            "stage": [
                {
                    "conditionGroup": [{"type": "equals", "attribute": "type", "value": "Renewal"}],
                    "optionList": ["Negotiation", "Closed Won"]
                },
                {
                    "conditionGroup": [{"type": "equals", "attribute": "type", "value": "New"}],
                    "optionList": ["Prospecting", "Qualification"]
                }
            ]
        }
    }));
    let mut logic = engine(defs, Record::new().set("type", "New"));
    logic.process();
    assert_eq!(
        logic.view().mutations(),
        &[Mutation::SetFieldOptionList {
            name: "stage".to_owned(),
            option_list: vec!["Prospecting".to_owned(), "Qualification".to_owned()],
        }]
    );
}

#[test]
fn option_rule_without_match_resets() {
    let defs = LogicDefsBuilder::new()
        .options("stage", |o| o.when(vec![attr("type").equals("Renewal")], &["Negotiation"]))
        .build();
    let mut logic = engine(defs, Record::new());
    logic.process();
    assert_eq!(
        logic.view().mutations(),
        &[Mutation::ResetFieldOptionList("stage".to_owned())]
    );
}

#[test]
fn bogus_type_is_false() {
    let cond: Condition =
        serde_json::from_value(json!({"type": "bogus", "attribute": "a", "value": "x"})).unwrap();
    let logic = engine(LogicDefs::default(), Record::new().set("a", "x"));
    assert!(!logic.check_condition(&cond));
}

#[test]
fn full_pass_order() {
    let defs = LogicDefsBuilder::new()
        .options("stage", |o| o.when(vec![], &["Lead"]))
        .panel("billing", |p| p.visible(vec![attr("amount").greater_than(0_i64)]))
        .field("amount", |f| f.required(vec![attr("status").not_equals("Draft")]))
        .build();
    let mut logic = engine(
        defs,
        Record::new().set("status", "Open").set("amount", 0_i64),
    );
    logic.process();
    let calls: Vec<String> = logic.view().mutations().iter().map(ToString::to_string).collect();
    assert_eq!(
        calls,
        [
            "setFieldRequired(amount)",
            "hidePanel(billing, false, dynamicLogic)",
            "setFieldOptionList(stage, [Lead])",
        ]
    );
}

#[test]
fn panel_injection_applies_immediately() {
    let mut logic = engine(LogicDefs::default(), Record::new().set("amount", 5000_i64));
    logic.add_panel_visible_condition("approval", vec![attr("amount").greater_than(1000_i64)]);
    assert_eq!(
        logic.view_mut().drain(),
        vec![Mutation::ShowPanel {
            name: "approval".to_owned(),
            source: MutationSource::DynamicLogic,
        }]
    );

    // later passes pick the injected rule up as well
    logic.data_mut().insert("amount", 10_i64);
    logic.process();
    assert_eq!(
        logic.view().mutations(),
        &[Mutation::HidePanel {
            name: "approval".to_owned(),
            silent: false,
            source: MutationSource::DynamicLogic,
        }]
    );
}

#[test]
fn condition_group_kinds() {
    let logic = engine(LogicDefs::default(), Record::new().set("a", 1_i64));
    let group = vec![attr("a").equals(1_i64), attr("b").is_not_empty()];
    assert!(!logic.check_condition_group(&group, formlogic::GroupKind::And));
    assert!(logic.check_condition_group(&group, formlogic::GroupKind::Or));
    assert!(logic.check_condition_group(&group, formlogic::GroupKind::Not));
    assert!(logic.check_condition(&any(group)));
}

// A host-side data source and view, the way a form binding would provide them.

struct Model {
    status: String,
}

impl DataSource for Model {
    fn get(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "status" => Some(Value::from(self.status.as_str())),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Form {
    hidden: Vec<String>,
}

impl ViewSurface for Form {
    fn show_field(&mut self, name: &str) {
        self.hidden.retain(|n| n != name);
    }

    fn hide_field(&mut self, name: &str) {
        if !self.hidden.iter().any(|n| n == name) {
            self.hidden.push(name.to_owned());
        }
    }

    fn set_field_required(&mut self, _name: &str) {}
    fn set_field_not_required(&mut self, _name: &str) {}
    fn set_field_read_only(&mut self, _name: &str) {}
    fn set_field_not_read_only(&mut self, _name: &str) {}
    fn show_panel(&mut self, _name: &str, _source: MutationSource) {}
    fn hide_panel(&mut self, _name: &str, _silent: bool, _source: MutationSource) {}
    fn style_panel(&mut self, _name: &str, _source: MutationSource) {}
    fn unstyle_panel(&mut self, _name: &str, _silent: bool, _source: MutationSource) {}
    fn set_field_option_list(&mut self, _name: &str, _option_list: &[String]) {}
    fn reset_field_option_list(&mut self, _name: &str) {}
}

#[test]
fn host_data_source_and_view() {
    let mut form = Form::default();
    let model = Model {
        status: "Closed".to_owned(),
    };
    {
        let mut logic = DynamicLogic::new(status_defs(), &model, &mut form);
        logic.process();
    }
    assert_eq!(form.hidden, ["closeReason"]);
}
