use std::collections::BTreeSet;
use std::fs;

use hsw_core::{ElementBinding, ElementValue, PointOutcome, ScoreFailure, ScoreSuccess};
use hsw_exp::RunStore;
use hsw_res::{run_label, ResultLoader};
use serde_json::json;
use tempfile::tempdir;

fn kpi_block(seed: f64) -> serde_json::Value {
    json!({
        "sustainability": seed,
        "self_sufficiency": seed + 0.1,
        "netload": seed + 0.2,
        "costs": seed + 0.3,
    })
}

fn sample_success() -> ScoreSuccess {
    serde_json::from_value(json!({
        "scenario": {"id": 7, "name": "winter-reference"},
        "dashboard_results": {
            "local": kpi_block(0.5),
            "intermediate": kpi_block(1.5),
            "national": kpi_block(2.5),
        },
        "cost_benefit_results": {
            "overview": {"grid": {"costs": 12.5, "benefits": 3.0}},
            "detail": {"grid": {"capex": {"transformers": 8.25}}},
        },
    }))
    .expect("success fixture")
}

fn sample_elements() -> Vec<ElementBinding> {
    vec![
        ElementBinding {
            interactive_element: 3,
            value: ElementValue::Number(40.0),
        },
        ElementBinding {
            interactive_element: 9,
            value: ElementValue::Text("subsidy".to_string()),
        },
    ]
}

struct WrittenRun {
    stamp: String,
    success_id: String,
    failure_id: String,
}

fn write_run(root: &std::path::Path, title: &str) -> WrittenRun {
    let mut store = RunStore::initiate(root, title).expect("initiate");
    let success_id = store
        .record(&PointOutcome::Success(sample_success()), &sample_elements())
        .expect("record success");
    let failure = ScoreFailure {
        error_msg: "Anylogic rejected the scenario".to_string(),
        scenario: json!({"id": 7}),
        anylogic_outcomes: None,
    };
    let failure_id = store
        .record(&PointOutcome::Failure(failure), &sample_elements())
        .expect("record failure");
    let run_dir = store.finalize().expect("finalize");
    let stamp = run_dir
        .file_name()
        .expect("stamp")
        .to_string_lossy()
        .into_owned();
    WrittenRun {
        stamp,
        success_id,
        failure_id,
    }
}

#[test]
fn written_runs_are_listed_and_loaded() {
    let root = tempdir().expect("tmp dir");
    let run = write_run(root.path(), "district-sweep");
    let loader = ResultLoader::new(root.path());

    assert_eq!(loader.list_experiments().expect("experiments"), ["district-sweep"]);
    assert_eq!(loader.list_runs("district-sweep").expect("runs"), [run.stamp.clone()]);

    let tables = loader
        .load_run("district-sweep", &run.stamp)
        .expect("load run");
    assert_eq!(tables.inputs.len(), 4);
    assert_eq!(tables.results.len(), 12);
    assert_eq!(tables.cost_benefit.len(), 1);
    assert_eq!(tables.errors.len(), 1);
    assert_eq!(tables.errors[0].error_msg, "Anylogic rejected the scenario");

    let input_ids: BTreeSet<&str> = tables
        .inputs
        .iter()
        .map(|row| row.run_point_id.as_str())
        .collect();
    let scored_ids: BTreeSet<&str> = tables
        .results
        .iter()
        .map(|row| row.run_point_id.as_str())
        .collect();
    let error_ids: BTreeSet<&str> = tables
        .errors
        .iter()
        .map(|row| row.run_point_id.as_str())
        .collect();
    assert!(scored_ids.is_disjoint(&error_ids));
    let all_ids: BTreeSet<&str> = scored_ids.union(&error_ids).copied().collect();
    assert_eq!(all_ids, input_ids);
    assert!(scored_ids.contains(run.success_id.as_str()));
    assert!(error_ids.contains(run.failure_id.as_str()));
}

#[test]
fn scenario_payloads_round_trip_byte_identical() {
    let root = tempdir().expect("tmp dir");
    let run = write_run(root.path(), "district-sweep");
    let loader = ResultLoader::new(root.path());

    let stored = loader
        .scenario_json("district-sweep", &run.stamp, &run.success_id)
        .expect("scenario bytes");
    let expected = serde_json::to_string_pretty(&sample_success().scenario)
        .expect("encode scenario")
        .into_bytes();
    assert_eq!(stored, expected);

    let missing = loader.scenario_json("district-sweep", &run.stamp, "no-such-point");
    assert_eq!(missing.expect_err("missing point").info().code, "scenario-read");
}

#[test]
fn missing_table_files_read_as_empty_tables() {
    let root = tempdir().expect("tmp dir");
    let run = write_run(root.path(), "district-sweep");
    let run_dir = root.path().join("district-sweep").join(&run.stamp);
    fs::remove_file(run_dir.join("errors.csv")).expect("drop errors table");
    fs::remove_file(run_dir.join("results.csv")).expect("drop results table");

    let loader = ResultLoader::new(root.path());
    let tables = loader
        .load_run("district-sweep", &run.stamp)
        .expect("load run");
    assert!(tables.errors.is_empty());
    assert!(tables.results.is_empty());
    assert_eq!(tables.inputs.len(), 4);
    assert_eq!(tables.cost_benefit.len(), 1);
}

#[test]
fn projections_return_the_recorded_maps() {
    let root = tempdir().expect("tmp dir");
    let run = write_run(root.path(), "district-sweep");
    let loader = ResultLoader::new(root.path());
    let tables = loader
        .load_run("district-sweep", &run.stamp)
        .expect("load run");

    let expected = sample_success().cost_benefit_results;
    let overview = tables
        .cost_benefit_overview(&run.success_id)
        .expect("overview")
        .expect("scored point has a cell");
    assert_eq!(overview, expected.overview);

    let detail = tables
        .cost_benefit_detail(&run.success_id, "grid")
        .expect("detail")
        .expect("grid sub-group exists");
    assert_eq!(detail, expected.detail["grid"]);

    assert_eq!(
        tables
            .cost_benefit_detail(&run.success_id, "transport")
            .expect("detail"),
        None
    );
    assert_eq!(
        tables
            .cost_benefit_overview(&run.failure_id)
            .expect("overview"),
        None
    );
}

#[test]
fn run_labels_render_the_folder_timestamp() {
    assert_eq!(
        run_label("20230115_143059").expect("label"),
        "2023-01-15 - 14:30:59"
    );
    let err = run_label("notes").expect_err("not a timestamp");
    assert_eq!(err.info().code, "run-label");
}

#[test]
fn unknown_roots_list_nothing_and_unknown_runs_fail() {
    let root = tempdir().expect("tmp dir");
    let loader = ResultLoader::new(root.path().join("never-written"));
    assert!(loader.list_experiments().expect("experiments").is_empty());
    assert!(loader.list_runs("ghost").expect("runs").is_empty());
    let err = loader.load_run("ghost", "20230101_000000").expect_err("no run");
    assert_eq!(err.info().code, "run-missing");
}
