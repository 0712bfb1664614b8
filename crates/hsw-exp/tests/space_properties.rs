use hsw_core::{ElementValue, SweepElement};
use hsw_exp::SweepSpace;
use indexmap::IndexMap;
use proptest::prelude::*;

fn discrete(id: i64, options: &[&str]) -> SweepElement {
    SweepElement::Discrete {
        id,
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

fn rendered(combination: &[hsw_core::ElementBinding]) -> Vec<String> {
    combination
        .iter()
        .map(|binding| binding.value.to_string())
        .collect()
}

#[test]
fn absent_sweep_yields_exactly_one_empty_combination() {
    let mut space = SweepSpace::new(None).unwrap();
    assert_eq!(space.cardinality(), 1);
    assert_eq!(space.next_combination(), Some(Vec::new()));
    assert_eq!(space.next_combination(), None);
    assert_eq!(space.next_combination(), None);
}

#[test]
fn empty_sweep_mapping_behaves_like_an_absent_one() {
    let sweep: IndexMap<String, SweepElement> = IndexMap::new();
    let mut space = SweepSpace::new(Some(&sweep)).unwrap();
    assert_eq!(space.cardinality(), 1);
    assert_eq!(space.next_combination(), Some(Vec::new()));
    assert_eq!(space.next_combination(), None);
}

#[test]
fn combinations_enumerate_with_the_last_entry_fastest() {
    let mut sweep = IndexMap::new();
    sweep.insert("policy".to_string(), discrete(1, &["x", "y"]));
    sweep.insert("mode".to_string(), discrete(2, &["1", "2"]));
    let mut space = SweepSpace::new(Some(&sweep)).unwrap();
    assert_eq!(space.cardinality(), 4);
    let mut seen = Vec::new();
    while let Some(combination) = space.next_combination() {
        assert_eq!(combination[0].interactive_element, 1);
        assert_eq!(combination[1].interactive_element, 2);
        seen.push(rendered(&combination));
    }
    assert_eq!(
        seen,
        vec![
            vec!["x".to_string(), "1".to_string()],
            vec!["x".to_string(), "2".to_string()],
            vec!["y".to_string(), "1".to_string()],
            vec!["y".to_string(), "2".to_string()],
        ]
    );
}

#[test]
fn mixed_sweep_combines_continuous_and_discrete_entries() {
    let mut sweep = IndexMap::new();
    sweep.insert(
        "heatpumps".to_string(),
        SweepElement::Continuous {
            id: 7,
            lower_bound: 0.0,
            upper_bound: 10.0,
            step: 5.0,
        },
    );
    sweep.insert("policy".to_string(), discrete(9, &["none", "subsidy"]));
    let mut space = SweepSpace::new(Some(&sweep)).unwrap();
    assert_eq!(space.cardinality(), 6);
    let first = space.next_combination().unwrap();
    assert_eq!(first[0].value, ElementValue::Number(0.0));
    assert_eq!(first[1].value, ElementValue::Text("none".to_string()));
    let mut produced = 1;
    while space.next_combination().is_some() {
        produced += 1;
    }
    assert_eq!(produced, 6);
}

#[test]
fn empty_option_list_empties_the_whole_product() {
    let mut sweep = IndexMap::new();
    sweep.insert("policy".to_string(), discrete(1, &["x", "y"]));
    sweep.insert("mode".to_string(), discrete(2, &[]));
    let mut space = SweepSpace::new(Some(&sweep)).unwrap();
    assert_eq!(space.cardinality(), 0);
    assert_eq!(space.next_combination(), None);
}

#[test]
fn invalid_continuous_entry_fails_space_construction() {
    let mut sweep = IndexMap::new();
    sweep.insert(
        "heatpumps".to_string(),
        SweepElement::Continuous {
            id: 7,
            lower_bound: 0.0,
            upper_bound: 10.0,
            step: 3.0,
        },
    );
    assert!(SweepSpace::new(Some(&sweep)).is_err());
}

proptest! {
    #[test]
    fn cardinality_matches_the_product_of_option_counts(
        counts in proptest::collection::vec(1usize..5, 0..4)
    ) {
        let mut sweep = IndexMap::new();
        for (idx, count) in counts.iter().enumerate() {
            let options: Vec<String> = (0..*count).map(|i| format!("o{i}")).collect();
            sweep.insert(
                format!("p{idx}"),
                SweepElement::Discrete { id: idx as i64, options },
            );
        }
        let mut space = SweepSpace::new(Some(&sweep)).unwrap();
        let expected: usize = counts.iter().product();
        prop_assert_eq!(space.cardinality(), expected);
        let mut produced = 0usize;
        while space.next_combination().is_some() {
            produced += 1;
        }
        prop_assert_eq!(produced, expected);
        prop_assert_eq!(space.next_combination(), None);
    }
}
