use super::*;
use crate::formula::Term;

fn labels() -> NameLabels {
    NameLabels::new()
        .with_label("x1", "Capital")
        .with_substitution("x", "Var_")
}

#[test]
fn test_exact_label_wins_over_substitution() {
    let renamed = labels().rename(&CoefficientName::plain("x1"));
    assert_eq!(renamed, CoefficientName::plain("Capital"));

    // Without an exact label the substitution applies
    let renamed = labels().rename(&CoefficientName::plain("x2"));
    assert_eq!(renamed, CoefficientName::plain("Var_2"));
}

#[test]
fn test_substitutions_accumulate_in_order() {
    let labels = NameLabels::new()
        .with_substitution("log(", "ln(")
        .with_substitution(")", "");

    assert_eq!(labels.rename_str("log(income)"), "ln(income");

    // Later rules see the output of earlier ones
    let chained = NameLabels::new()
        .with_substitution("a", "b")
        .with_substitution("b", "c");
    assert_eq!(chained.rename_str("ab"), "cc");
}

#[test]
fn test_empty_pattern_is_ignored() {
    let labels = NameLabels::new().with_substitution("", "_");
    assert_eq!(labels.rename_str("x"), "x");
}

#[test]
fn test_rename_structured_names() {
    let labels = labels();

    // exact labels match whole names only, never a component
    let interaction = CoefficientName::interacted(["x1", "x2"]);
    assert_eq!(
        labels.rename(&interaction),
        CoefficientName::interacted(["Var_1", "Var_2"])
    );

    let level = CoefficientName::categorical("region", "x1");
    assert_eq!(
        labels.rename(&level),
        CoefficientName::categorical("region", "Var_1")
    );

    let same = CoefficientName::categorical("x1", "x1");
    assert_eq!(
        labels.rename(&same),
        CoefficientName::categorical("Var_1", "Var_1")
    );

    let fe = CoefficientName::fixed_effect("xstate");
    assert_eq!(labels.rename(&fe), CoefficientName::fixed_effect("Var_state"));
}

#[test]
fn test_rename_grouped_uses_exact_label_on_name() {
    let grouped = CoefficientName::grouped("x1", "school");
    assert_eq!(
        labels().rename(&grouped),
        CoefficientName::grouped("Capital", "school")
    );
}

#[test]
fn test_rename_grouped_keeps_group() {
    let labels = NameLabels::new().with_substitution("x", "Var_");
    let grouped = CoefficientName::grouped("x", "xgroup");

    assert_eq!(
        labels.rename(&grouped),
        CoefficientName::grouped("Var_", "xgroup")
    );
}

#[test]
fn test_exact_label_on_whole_structured_name() {
    let labels = NameLabels::new()
        .with_label("x1 & x2", "Interaction")
        .with_label("state", "State")
        .with_substitution("x", "Var_");

    assert_eq!(
        labels.rename(&CoefficientName::interacted(["x1", "x2"])),
        CoefficientName::plain("Interaction")
    );
    assert_eq!(
        labels.rename(&CoefficientName::fixed_effect("state")),
        CoefficientName::fixed_effect("State")
    );
}

#[test]
fn test_rename_absent_name() {
    assert_eq!(labels().rename_opt(None), None);
    assert_eq!(
        labels().rename_opt(Some(&CoefficientName::plain("x1"))),
        Some(CoefficientName::plain("Capital"))
    );
}

#[test]
fn test_name_display() {
    assert_eq!(CoefficientName::categorical("region", "North").to_string(), "region: North");
    assert_eq!(
        CoefficientName::interacted(["a", "b", "c"]).to_string(),
        "a & b & c"
    );
    assert_eq!(CoefficientName::grouped("(Intercept)", "school").to_string(), "(Intercept) | school");
    assert_eq!(CoefficientName::fixed_effect("year").components().len(), 1);
}

#[test]
fn test_name_input_collapses_to_first() {
    assert_eq!(
        NameInput::from("y").into_first(),
        Some(CoefficientName::plain("y"))
    );
    assert_eq!(
        NameInput::from(vec!["y1", "y2"]).into_first(),
        Some(CoefficientName::plain("y1"))
    );
    assert_eq!(
        NameInput::from(Term::fixed_effect("state")).into_first(),
        Some(CoefficientName::fixed_effect("state"))
    );
    assert_eq!(NameInput::from(Vec::<String>::new()).into_first(), None);
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_exact_match_never_substituted(name in "[a-z]{1,6}", label in "[A-Z]{1,6}") {
            let labels = NameLabels::new()
                .with_label(name.clone(), label.clone())
                .with_substitution(name.clone(), "SUB");
            prop_assert_eq!(labels.rename_str(&name), label.clone());
            prop_assert_eq!(labels.rename(&CoefficientName::plain(name)), CoefficientName::plain(label));
        }

        #[test]
        fn test_no_rules_is_identity(name in "[a-z():_ ]{0,12}") {
            let labels = NameLabels::new();
            prop_assert_eq!(labels.rename_str(&name), name);
        }
    }
}
