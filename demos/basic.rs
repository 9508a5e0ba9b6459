//! Load form rules from JSON, run a pass against a record, apply an edit and
//! run again. Set `RUST_LOG=formlogic=trace` to see every evaluation.

use formlogic::{attr, DynamicLogic, LogicDefs, Record, RecordingView};
use tracing_subscriber::EnvFilter;

const DEFS: &str = r#"{
    "fields": {
        "closeDate": {
            "visible": {"conditionGroup": [{"type": "notIn", "attribute": "stage", "value": ["Lead"]}]},
            "required": {"conditionGroup": [{"type": "equals", "attribute": "stage", "value": "Closed Won"}]}
        },
        "followUp": {
            "visible": {"conditionGroup": [{"type": "inPast", "attribute": "closeDate"}]}
        }
    },
    "panels": {
        "billing": {
            "visible": {"conditionGroup": [{"type": "greaterThan", "attribute": "amount", "value": 0}]}
        }
    },
    "options": {
        "nextStep": [
            {"conditionGroup": [{"type": "equals", "attribute": "stage", "value": "Closed Won"}], "optionList": ["Invoice"]},
            {"optionList": ["Call", "Email"]}
        ]
    }
}"#;

fn main() -> Result<(), formlogic::FormLogicError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let defs = LogicDefs::from_json(DEFS)?;
    println!("{defs}");

    let record = Record::new()
        .set("stage", "Lead")
        .set("amount", 0_i64)
        .set("closeDate", "2024-01-15");
    let mut logic = DynamicLogic::new(defs, record, RecordingView::new());

    logic.process();
    for mutation in logic.view_mut().drain() {
        println!("  {mutation}");
    }

    println!("-- stage := Closed Won, amount := 1200");
    logic.data_mut().insert("stage", "Closed Won");
    logic.data_mut().insert("amount", 1200_i64);
    logic.process();
    for mutation in logic.view_mut().drain() {
        println!("  {mutation}");
    }

    println!("-- inject panel rule");
    logic.add_panel_styled_condition("billing", vec![attr("amount").greater_than(1000_i64)]);
    for mutation in logic.view().mutations() {
        println!("  {mutation}");
    }

    Ok(())
}
