use std::io::Write;

use formlogic::{
    attr, AspectRule, Condition, DynamicLogic, FixedClock, LogicDefs, Mutation, OptionRule,
    Predicate, Record, RecordingView,
};

const OPPORTUNITY: &str = r#"{
    "fields": {
        "closeDate": {
            "visible": {"conditionGroup": [
                {"type": "in", "attribute": "stage", "value": ["Closed Won", "Closed Lost"]}
            ]},
            "required": {"conditionGroup": [
                {"type": "equals", "attribute": "stage", "value": "Closed Won"}
            ]},
            "readOnly": null
        },
        "lossReason": {
            "visible": {"conditionGroup": [
                {"type": "or", "value": [
                    {"type": "equals", "attribute": "stage", "value": "Closed Lost"},
                    {"type": "not", "value": {"type": "isEmpty", "attribute": "lossReason"}}
                ]}
            ]}
        }
    },
    "panels": {
        "billing": {
            "visible": {"conditionGroup": [{"type": "greaterThan", "attribute": "amount", "value": 0}]},
            "styled": {"conditionGroup": [{"type": "matches", "attribute": "name", "value": "/^acme/i"}]}
        }
    },
    "options": {
        "nextStep": [
            {
                "conditionGroup": [{"type": "has", "attribute": "tags", "value": "renewal"}],
                "optionList": ["Send quote", "Schedule call"]
            },
            {"optionList": ["Qualify"]}
        ]
    }
}"#;

#[test]
fn loads_full_document() {
    let defs = LogicDefs::from_json(OPPORTUNITY).unwrap();
    assert_eq!(defs.to_string(), "LogicDefs(2 fields, 1 panels, 1 option fields)");

    let close_date = &defs.fields["closeDate"];
    assert_eq!(
        close_date.required,
        Some(AspectRule::new(vec![attr("stage").equals("Closed Won")]))
    );
    assert!(close_date.read_only.is_none());

    assert_eq!(
        defs.options["nextStep"][1],
        OptionRule {
            condition_group: vec![],
            option_list: vec!["Qualify".to_owned()],
        }
    );
}

#[test]
fn processes_full_document() {
    let defs = LogicDefs::from_json(OPPORTUNITY).unwrap();
    let record = Record::new()
        .set("stage", "Closed Won")
        .set("amount", 25_000_i64)
        .set("name", "ACME Renewal")
        .set("tags", vec!["renewal"]);
    let mut logic = DynamicLogic::new(defs, record, RecordingView::new())
        .with_clock(FixedClock::at_date(2024, 5, 1).unwrap());
    logic.process();

    let calls: Vec<String> = logic.view().mutations().iter().map(ToString::to_string).collect();
    assert_eq!(
        calls,
        [
            "showField(closeDate)",
            "setFieldRequired(closeDate)",
            "hideField(lossReason)",
            "showPanel(billing, dynamicLogic)",
            "stylePanel(billing, dynamicLogic)",
            "setFieldOptionList(nextStep, [Send quote, Schedule call])",
        ]
    );
}

#[test]
fn fallback_option_entry_matches() {
    let defs = LogicDefs::from_json(OPPORTUNITY).unwrap();
    let mut logic = DynamicLogic::new(defs, Record::new(), RecordingView::new());
    logic.process();
    let last = logic.view().mutations_for("nextStep").last().cloned();
    assert_eq!(
        last,
        Some(Mutation::SetFieldOptionList {
            name: "nextStep".to_owned(),
            option_list: vec!["Qualify".to_owned()],
        })
    );
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join(format!("formlogic-defs-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(OPPORTUNITY.as_bytes()).unwrap();
    drop(file);

    let defs = LogicDefs::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(defs, LogicDefs::from_json(OPPORTUNITY).unwrap());
}

#[test]
fn serde_entry_point_matches_from_json() {
    let via_serde: LogicDefs = serde_json::from_str(OPPORTUNITY).unwrap();
    assert_eq!(via_serde, LogicDefs::from_json(OPPORTUNITY).unwrap());
}

#[test]
fn malformed_nodes_degrade() {
    let defs = LogicDefs::from_json(
        r#"{
            "fields": {
                "a": {"visible": {"conditionGroup": [{"type": "equals", "value": "x"}]}},
                "b": {"visible": {"conditionGroup": "not a list"}},
                "c": {"visible": {"conditionGroup": [42]}},
                "d": "not an object"
            },
            "panels": [],
            "options": {"e": {"optionList": ["ignored"]}}
        }"#,
    )
    .unwrap();

    assert_eq!(defs.fields.len(), 4);
    assert!(defs.panels.is_empty());
    assert_eq!(defs.options["e"], vec![OptionRule::default()]);
    assert_eq!(
        defs.fields["c"].visible,
        Some(AspectRule::new(vec![Condition::Leaf(Predicate::detached())]))
    );

    let mut logic = DynamicLogic::new(defs, Record::new().set("x", "x"), RecordingView::new());
    logic.process();
    let calls: Vec<String> = logic.view().mutations().iter().map(ToString::to_string).collect();
    // b's string group is one failing member per character; d has no aspects
    assert_eq!(
        calls,
        [
            "hideField(a)",
            "hideField(b)",
            "hideField(c)",
            "setFieldOptionList(e, [])",
        ]
    );
}

#[test]
fn non_list_groups_follow_their_members() {
    let defs = LogicDefs::from_json(
        r#"{
            "fields": {
                "a": {"visible": {"conditionGroup": [
                    {"type": "and", "value": {"attribute": "x", "value": "x"}}
                ]}},
                "b": {"visible": {"conditionGroup": [
                    {"type": "or", "value": {"attribute": "x", "value": "x"}}
                ]}},
                "c": {"visible": {"conditionGroup": [{"type": "and", "value": 1}]}},
                "d": {"visible": {"conditionGroup": [{"type": "or", "value": 1}]}},
                "e": {"visible": {"conditionGroup": {"only": {"attribute": "x", "value": "x"}}}},
                "f": {"visible": {"conditionGroup": ""}}
            }
        }"#,
    )
    .unwrap();

    let mut logic = DynamicLogic::new(defs, Record::new().set("x", "x"), RecordingView::new());
    logic.process();
    let calls: Vec<String> = logic.view().mutations().iter().map(ToString::to_string).collect();
    assert_eq!(
        calls,
        [
            "hideField(a)",
            "hideField(b)",
            "showField(c)",
            "hideField(d)",
            "showField(e)",
        ]
    );
}

#[test]
fn invalid_json_fails() {
    assert!(LogicDefs::from_json("{ fields: }").is_err());
}

#[test]
fn passes_run_in_name_order() {
    let defs = LogicDefs::from_json(
        r#"{
            "fields": {
                "zeta": {"visible": {"conditionGroup": []}},
                "alpha": {"visible": {"conditionGroup": []}}
            },
            "panels": {
                "second": {"visible": {"conditionGroup": []}},
                "first": {"visible": {"conditionGroup": []}}
            }
        }"#,
    )
    .unwrap();
    let names: Vec<&str> = defs.fields.keys().map(String::as_str).collect();
    assert_eq!(names, ["alpha", "zeta"]);

    let mut logic = DynamicLogic::new(defs, Record::new(), RecordingView::new());
    logic.process();
    let targets: Vec<&str> = logic.view().mutations().iter().map(|m| m.target()).collect();
    assert_eq!(targets, ["alpha", "zeta", "first", "second"]);
}
