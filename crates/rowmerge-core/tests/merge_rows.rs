//! End-to-end tests: CSV text in, merged CSV text out.

use rowmerge_core::{
    merge_rows, parse_csv_str, transform_csv, write_csv_string, CsvOptions, MergeEvent,
};

fn run(input: &str) -> (String, Vec<MergeEvent>) {
    let options = CsvOptions::default();
    let table = parse_csv_str(input, &options).unwrap();
    let mut events: Vec<MergeEvent> = Vec::new();
    let merged = merge_rows(table, &mut events);
    (write_csv_string(&merged, &options).unwrap(), events)
}

#[test]
fn test_one_to_many_and_unmatched_rows() {
    let input = "\
cycle.@id,cycle.name,cycle.site.@id,site.@id,site.name
c1,Cycle 1,s1,-,-
c2,Cycle 2,s1,-,-
c3,Cycle 3,s2,-,-
c4,Cycle 4,s9,-,-
-,-,-,s1,Farm A
-,-,-,s2,Farm B
-,-,-,s3,Farm C
-,-,-,-,-
";
    let expected = "\
cycle.@id,cycle.name,cycle.site.@id,site.@id,site.name
c1,Cycle 1,s1,s1,Farm A
c2,Cycle 2,s1,s1,Farm A
c3,Cycle 3,s2,s2,Farm B
c4,Cycle 4,s9,-,-
-,-,-,s3,Farm C
";

    let (output, events) = run(input);

    assert_eq!(output, expected);
    assert_eq!(
        events,
        vec![MergeEvent::Joined {
            ref_column: "cycle.site.@id".to_string(),
            index_column: "site.@id".to_string(),
            rows: 5,
        }]
    );
}

#[test]
fn test_column_overlap_skips_only_that_join() {
    let input = "\
cycle.@id,cycle.site.@id,cycle.source.@id,site.@id,site.name,source.@id,source.name
c1,s1,src1,-,Farm X,-,-
c2,s1,src1,-,-,-,-
-,-,-,s1,Farm A,-,-
-,-,-,-,-,src1,Paper
";
    let expected = "\
cycle.@id,cycle.site.@id,cycle.source.@id,site.@id,site.name,source.@id,source.name
c1,s1,src1,-,Farm X,src1,Paper
c2,s1,src1,-,-,src1,Paper
-,-,-,s1,Farm A,-,-
";

    let (output, events) = run(input);

    assert_eq!(output, expected);
    assert_eq!(events.len(), 2);
    match &events[0] {
        MergeEvent::JoinSkipped {
            index_column,
            entity,
            overlap,
            ..
        } => {
            assert_eq!(index_column, "site.@id");
            assert_eq!(entity, "site");
            assert_eq!(overlap, &vec!["site.name".to_string()]);
        }
        other => panic!("expected skipped join, got {other:?}"),
    }
    assert!(matches!(&events[1], MergeEvent::Joined { index_column, .. } if index_column == "source.@id"));
}

#[test]
fn test_no_index_columns_passes_through() {
    let input = "\
name,amount,unit
wheat,12,kg
-,-,-
barley,3.5,t
";
    let expected = "\
name,amount,unit
wheat,12,kg
barley,3.5,t
";

    let (output, events) = run(input);

    assert_eq!(output, expected);
    assert_eq!(events, vec![MergeEvent::NoMappings]);
}

#[test]
fn test_entity_columns_entirely_empty() {
    let input = "\
cycle.@id,cycle.source.@id,cycle.site.@id,site.@id,site.name,source.@id,source.name
c1,src1,-,-,-,-,-
-,-,-,-,-,src1,Paper
";
    let expected = "\
cycle.@id,cycle.source.@id,cycle.site.@id,site.@id,site.name,source.@id,source.name
c1,src1,-,-,-,src1,Paper
";

    let (output, events) = run(input);

    assert_eq!(output, expected);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_all_missing_input_keeps_header() {
    let input = "\
cycle.@id,cycle.site.@id,site.@id
-,-,-
-,-,-
";

    let (output, events) = run(input);

    assert_eq!(output, "cycle.@id,cycle.site.@id,site.@id\n");
    assert!(events.is_empty());
}

#[test]
fn test_column_order_is_preserved() {
    let input = "\
site.name,site.@id,cycle.site.@id,cycle.@id
Farm A,s1,-,-
-,-,s1,c1
";
    let expected = "\
site.name,site.@id,cycle.site.@id,cycle.@id
Farm A,s1,s1,c1
";

    let (output, _) = run(input);

    assert_eq!(output, expected);
}

#[test]
fn test_chain_of_entities_collapses_to_root() {
    let input = "\
cycle.@id,cycle.site.@id,site.@id,site.organisation.@id,organisation.@id,organisation.name
c1,s1,-,-,-,-
c2,s1,-,-,-,-
-,-,s1,o1,-,-
-,-,-,-,o1,Acme
";
    let expected = "\
cycle.@id,cycle.site.@id,site.@id,site.organisation.@id,organisation.@id,organisation.name
c1,s1,s1,o1,o1,Acme
c2,s1,s1,o1,o1,Acme
";

    let (output, events) = run(input);

    assert_eq!(output, expected);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| !e.is_warning()));
}

#[test]
fn test_distinct_large_ids_are_not_joined() {
    let input = "\
cycle.@id,cycle.site.@id,site.@id,site.name
c1,12345678901234567891,-,-
-,-,12345678901234567892,Other
";
    let expected = "\
cycle.@id,cycle.site.@id,site.@id,site.name
c1,12345678901234567891,-,-
-,-,12345678901234567892,Other
";

    let (output, _) = run(input);

    assert_eq!(output, expected);
}

#[test]
fn test_cell_text_is_written_back_verbatim() {
    let input = "\
cycle.@id,cycle.site.@id,site.@id,site.name,site.area
c1,007,-,-,-
-,-,007, Farm A,1.50
";
    let expected = "\
cycle.@id,cycle.site.@id,site.@id,site.name,site.area
c1,007,007, Farm A,1.50
";

    let (output, _) = run(input);

    assert_eq!(output, expected);
}

#[test]
fn test_transform_csv_round_trip() {
    let dir = std::env::temp_dir();
    let input_path = dir.join(format!("rowmerge-in-{}.csv", std::process::id()));
    let output_path = dir.join(format!("rowmerge-out-{}.csv", std::process::id()));
    std::fs::write(
        &input_path,
        "cycle.id,cycle.site.id,site.id,site.area\n1,10,-,-\n-,-,10,2.5\n",
    )
    .unwrap();

    let mut events: Vec<MergeEvent> = Vec::new();
    let merged = transform_csv(&input_path, &output_path, &CsvOptions::default(), &mut events).unwrap();
    let written = std::fs::read_to_string(&output_path).unwrap();
    std::fs::remove_file(&input_path).unwrap();
    std::fs::remove_file(&output_path).unwrap();

    assert_eq!(merged.row_count(), 1);
    assert_eq!(written, "cycle.id,cycle.site.id,site.id,site.area\n1,10,10,2.5\n");
}

#[test]
fn test_transform_csv_missing_input_writes_nothing() {
    let dir = std::env::temp_dir();
    let input_path = dir.join("rowmerge-does-not-exist.csv");
    let output_path = dir.join(format!("rowmerge-never-{}.csv", std::process::id()));

    let mut events: Vec<MergeEvent> = Vec::new();
    let result = transform_csv(&input_path, &output_path, &CsvOptions::default(), &mut events);

    assert!(result.is_err());
    assert!(!output_path.exists());
}
