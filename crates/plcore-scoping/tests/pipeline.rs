use plcore_ast::ast::{Annotation, TermKind};
use plcore_ast::name::{FreshSupply, ScopedName};
use plcore_parser::{parse_program, parse_term, parse_with, ParseOptions, Parser};
use plcore_scoping::{
    collect_scope_info, establish_scoping, Erasing, Hooks, Role, ScopeEntry, ScopeError,
    ScopeInfo, Tagging,
};
use pretty_assertions::assert_eq;

const CHURCH_TRUE: &str = "(program 1.0.0
  (abs a (type) (lam t a (lam f a t))))";

#[test]
fn parsed_program_round_trip_through_scoping() {
    let prog = parse_program("true.plc", CHURCH_TRUE).unwrap();
    let mut supply = FreshSupply::new();
    let scoped = establish_scoping(&prog, &mut supply, &mut Tagging);
    let info = collect_scope_info(&scoped);

    assert_eq!(info.binders().count(), 3);
    // `a` twice and `t` once
    assert_eq!(info.frees().count(), 3);
    assert_eq!(info.check(), Ok(()));
    assert_eq!(supply.issued(), 6);
    assert!(info.iter().all(|e| e.ann.scoped_name() == Some(&e.name)));
}

#[test]
fn parsed_names_are_not_a_scoping_report() {
    // Before renaming, binders and occurrences share their parsed uniques.
    let prog = parse_program("true.plc", CHURCH_TRUE).unwrap();
    let err = collect_scope_info(&prog).check().unwrap_err();
    assert!(matches!(err, ScopeError::CapturedFree { .. }));
}

#[test]
fn shared_supply_keeps_renamed_uniques_apart_from_parsed_ones() {
    let mut supply = FreshSupply::new();
    let opts = ParseOptions::default();
    let term = parse_with(&opts, &mut supply, Parser::term, "t", "(lam x (con unit) x)").unwrap();
    let parsed = supply.issued();
    let scoped = establish_scoping(&term, &mut supply, &mut Tagging);
    let info = collect_scope_info(&scoped);
    assert!(info.iter().all(|e| e.name.unique().0 >= parsed));
}

#[test]
fn erased_annotations_still_report_names() {
    let prog = parse_program("true.plc", CHURCH_TRUE).unwrap();
    let scoped = establish_scoping(&prog, &mut FreshSupply::new(), &mut Erasing);
    let info = collect_scope_info(&scoped);
    assert_eq!(info.len(), 6);
    assert!(info.iter().all(|e| e.ann == Annotation::NotAName));
    assert!(info.iter().all(|e| e.ann.scoped_name().is_none()));
}

#[test]
fn hooks_decide_annotations() {
    let term = parse_program("p", "(program 0.1.0 [f (lam y (con bool) y)])").unwrap().term;
    let mut frees = 0;
    let mut hooks = Hooks::new(
        |n: &ScopedName| Annotation::Binder(n.clone()),
        |_: &ScopedName| {
            frees += 1;
            Annotation::NotAName
        },
    );
    let scoped = establish_scoping(&term, &mut FreshSupply::new(), &mut hooks);
    drop(hooks);
    assert_eq!(frees, 2);
    let TermKind::Apply { func, arg } = &scoped.kind else {
        panic!("expected application");
    };
    assert_eq!(func.ann, Annotation::NotAName);
    let Annotation::Binder(ScopedName::Term(y)) = &arg.ann else {
        panic!("expected a term binder, got {:?}", arg.ann);
    };
    assert_eq!(y.text, "y");
}

#[test]
fn report_json_is_a_flat_list() {
    let prog = parse_program("p", "(program 1.0.0 (lam x (con integer) x))").unwrap();
    let scoped = establish_scoping(&prog, &mut FreshSupply::new(), &mut Tagging);
    let info: ScopeInfo = collect_scope_info(&scoped);
    let json = serde_json::to_value(&info).unwrap();
    let roles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["binder", "free"]);

    let binder = info.binders().next().unwrap();
    assert_eq!(
        *binder,
        ScopeEntry {
            role: Role::Binder,
            name: binder.name.clone(),
            ann: Annotation::Binder(binder.name.clone()),
        }
    );
}

#[test]
fn deepest_parsable_term_can_be_renamed_and_collected() {
    let levels = ParseOptions::default().max_depth - 2;
    let src = format!(
        "(lam x (con unit) {}x{})",
        "(prod ".repeat(levels),
        ")".repeat(levels)
    );
    let term = parse_term("deep", &src).unwrap();
    let scoped = establish_scoping(&term, &mut FreshSupply::new(), &mut Tagging);
    let info = collect_scope_info(&scoped);
    assert_eq!(info.binders().count(), 1);
    assert_eq!(info.frees().count(), 1);
    assert_eq!(info.check(), Ok(()));
}
