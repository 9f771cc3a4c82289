use column_expander::dataset::InMemoryTable;
use column_expander::preprocessing::{DictColumnExpander, ListColumnExpander, TransformOptions};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const TOKENS: &[&str] = &["red", "green", "blue", "cyan", "gray"];
const UNSEEN: &[&str] = &["pink", "teal"];
const KEYS: &[&str] = &["color", "size", "shape"];
const DELIMS: &[&str] = &["_", "::", "|"];

fn list_cells(tokens: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(tokens), 0..4).prop_map(|row| row.join(", ")),
        1..20,
    )
}

fn dict_cells() -> impl Strategy<Value = Vec<String>> {
    let value = prop_oneof![
        prop::sample::select(TOKENS).prop_map(|t| json!(t)),
        prop::collection::vec(prop::sample::select(TOKENS), 1..3).prop_map(|ts| {
            let nested: Map<String, Value> = ts.into_iter().map(|t| (t.to_string(), json!(1))).collect();
            Value::Object(nested)
        }),
    ];
    let row = prop::collection::vec((prop::sample::select(KEYS), value), 0..3).prop_map(|pairs| {
        let map: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Value::Object(map).to_string()
    });
    prop::collection::vec(row, 1..20)
}

fn table(cells: Vec<String>) -> InMemoryTable {
    InMemoryTable::new().with_str_column("col", cells).unwrap()
}

proptest! {
    #[test]
    fn list_names_round_trip(cells in list_cells(TOKENS)) {
        let mut expander = ListColumnExpander::new(["col"]);
        expander.fit(&table(cells), None).unwrap();

        let attributes = expander.attributes().unwrap();
        let values: Vec<&str> = attributes[0].group("col").map(|v| v.iter().collect()).unwrap_or_default();
        let names = expander.get_feature_names(false).unwrap();
        prop_assert_eq!(names.len(), values.len());
        for (name, value) in names.iter().zip(values) {
            let (prefix, recovered) = name.rsplit_once('_').unwrap();
            prop_assert_eq!(prefix, "col");
            prop_assert_eq!(recovered, value);
        }
    }

    #[test]
    fn dict_names_round_trip(cells in dict_cells(), delim in prop::sample::select(DELIMS)) {
        let mut expander = DictColumnExpander::new(["col"]).with_delim(delim);
        expander.fit(&table(cells), None).unwrap();

        let pairs: Vec<(&str, &str)> = expander.attributes().unwrap()[0]
            .groups()
            .flat_map(|(group, values)| values.iter().map(move |value| (group, value)))
            .collect();
        let names = expander.get_feature_names(false).unwrap();
        prop_assert_eq!(names.len(), pairs.len());
        for (name, pair) in names.iter().zip(pairs) {
            prop_assert_eq!(name.rsplit_once(delim), Some(pair));
        }
    }

    #[test]
    fn slim_is_subset_with_one_fewer_per_group(cells in dict_cells()) {
        let mut expander = DictColumnExpander::new(["col"]);
        expander.fit(&table(cells), None).unwrap();

        let full = expander.get_feature_names(false).unwrap();
        let slim = expander.get_feature_names(true).unwrap();
        prop_assert!(slim.iter().all(|name| full.contains(name)));

        let groups = expander.attributes().unwrap()[0].len();
        prop_assert_eq!(full.len() - slim.len(), groups);
    }

    #[test]
    fn refit_is_idempotent(cells in dict_cells()) {
        let data = table(cells);
        let mut expander = DictColumnExpander::new(["col"]);
        expander.fit(&data, None).unwrap();
        let first = expander.get_feature_names(false).unwrap().to_vec();
        expander.fit(&data, None).unwrap();
        prop_assert_eq!(expander.get_feature_names(false).unwrap(), first.as_slice());
    }

    #[test]
    fn unseen_tokens_give_zero_rows(train in list_cells(TOKENS), test in list_cells(UNSEEN)) {
        let mut expander = ListColumnExpander::new(["col"]);
        expander.fit(&table(train), None).unwrap();
        let width = expander.n_features_out(false).unwrap();

        let n_rows = test.len();
        let out = expander.transform(&table(test), TransformOptions::default()).unwrap();
        prop_assert_eq!(out.shape(), (n_rows, width));
        prop_assert_eq!(out.nnz(), 0);
    }

    #[test]
    fn output_shape_matches_feature_names(train in dict_cells(), test in dict_cells(), drop_first in any::<bool>()) {
        let mut expander = DictColumnExpander::new(["col"]);
        expander.fit(&table(train), None).unwrap();

        let n_rows = test.len();
        let out = expander
            .transform(&table(test), TransformOptions::new().drop_first(drop_first))
            .unwrap();
        let width = expander.get_feature_names(drop_first).unwrap().len();
        prop_assert_eq!(out.shape(), (n_rows, width));
        prop_assert!(out.iter().all(|(_, _, v)| v == 1.0));
    }

    #[test]
    fn every_fit_row_is_fully_encoded(cells in list_cells(TOKENS)) {
        let mut expander = ListColumnExpander::new(["col"]);
        let data = table(cells.clone());
        let out = expander.fit_transform(&data, None, TransformOptions::default()).unwrap();
        let names = expander.get_feature_names(false).unwrap();

        for (row, cell) in cells.iter().enumerate() {
            let mut expected: Vec<String> = cell
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| format!("col_{}", t))
                .collect();
            expected.sort();
            expected.dedup();
            let mut actual: Vec<String> = out.row(row).iter().map(|&(c, _)| names[c].clone()).collect();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }
    }
}
