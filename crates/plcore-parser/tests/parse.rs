use num_bigint::BigInt;
use plcore_ast::ast::{Annotation, TermKind, TypeKind};
use plcore_ast::constant::{BuiltinName, BuiltinType, Constant};
use plcore_ast::span::Span;
use plcore_lexer::lex_skip_comments;
use plcore_parser::{
    parse_program, parse_term, parse_type, Interner, ParseErrorKind, ParseOptions, Parser,
};
use pretty_assertions::assert_eq;

#[test]
fn whole_program() {
    let src = "-- identity applied to a constant\n\
               (program 1.0.0\n  [ (lam x (con integer) x) (con 42) ])";
    let prog = parse_program("id.plc", src).unwrap();
    assert_eq!(prog.version.to_string(), "1.0.0");
    let start = src.find('(').unwrap();
    assert_eq!(prog.ann, Annotation::Position(Span::new(start, src.len() - start)));
    let digit = src.find('1').unwrap();
    assert_eq!(prog.version.ann, Annotation::Position(Span::new(digit, 5)));

    let TermKind::Apply { func, arg } = prog.term.kind else {
        panic!("expected application");
    };
    assert_eq!(arg.kind, TermKind::Constant(Constant::Integer(BigInt::from(42))));
    let TermKind::Lam { binder, ty, body } = func.kind else {
        panic!("expected lambda");
    };
    assert_eq!(binder.text, "x");
    assert_eq!(ty.kind, TypeKind::Builtin(BuiltinType::Integer));
    assert!(matches!(body.kind, TermKind::Var(ref v) if v.unique == binder.unique));
}

#[test]
fn comments_are_ignored_anywhere() {
    let src = "(abs a {- kind {- nested -} -} (type) {(builtin ifThenElse) a}) -- done";
    let t = parse_term("c", src).unwrap();
    let TermKind::Abs { binder, body, .. } = t.kind else {
        panic!("expected type abstraction");
    };
    let TermKind::Inst { term, ty } = body.kind else {
        panic!("expected instantiation");
    };
    assert_eq!(term.kind, TermKind::Builtin(BuiltinName::IfThenElse));
    assert!(matches!(ty.kind, TypeKind::Var(ref v) if *v == binder));
}

#[test]
fn every_term_form() {
    let src = "(prod \
               (iwrap (lam r (type) r) (con unit) (con unit)) \
               (unwrap u) \
               (error (all a (type) (fun a a))) \
               (proj 1 (prod (con \"s\") (con 'c'))) \
               (con (True)))";
    let t = parse_term("all", src).unwrap();
    let TermKind::Prod(items) = t.kind else {
        panic!("expected product");
    };
    assert_eq!(items.len(), 5);
    assert!(matches!(items[0].kind, TermKind::IWrap { .. }));
    assert!(matches!(items[1].kind, TermKind::Unwrap(_)));
    assert!(matches!(items[2].kind, TermKind::Error(_)));
    assert!(matches!(items[3].kind, TermKind::Proj { index: 1, .. }));
    assert_eq!(items[4].kind, TermKind::Constant(Constant::Bool(true)));
    assert!(items.iter().all(|i| i.ann.span().is_some()));
}

#[test]
fn every_type_form() {
    let src = "(ifix (lam f (fun (type) (type)) [f a b]) (prod (con string) (prod)))";
    let ty = parse_type("ty", src).unwrap();
    let TypeKind::IFix { pattern, arg } = ty.kind else {
        panic!("expected ifix");
    };
    let TypeKind::Lam { body, .. } = pattern.kind else {
        panic!("expected type lambda");
    };
    assert!(matches!(body.kind, TypeKind::App { .. }));
    let TypeKind::Prod(items) = arg.kind else {
        panic!("expected product type");
    };
    assert_eq!(items[1].kind, TypeKind::Prod(vec![]));
}

#[test]
fn abandoned_alternative_keeps_its_names() {
    let src = "(lam kept (con integer))";
    let (tokens, errors) = lex_skip_comments(src);
    assert!(errors.is_empty());
    let mut p = Parser::new(tokens, src.len(), Interner::new(), 64);
    assert!(p.attempt(|p| p.term()).is_err());
    assert_eq!(p.position(), 0);
    assert!(p.interner().lookup("kept").is_some());
}

#[test]
fn projection_index_must_be_natural() {
    let err = parse_term("p", "(proj -1 x)").unwrap_err();
    assert_eq!(
        err.errors[0].kind,
        ParseErrorKind::NumberOutOfRange { text: "-1".into() }
    );
}

#[test]
fn unterminated_comment_points_at_end_of_input() {
    let src = "(con unit) {- open {- -}";
    let err = parse_term("u", src).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].span.offset, src.len());
}

fn nest(open: &str, leaf: &str, close: &str, levels: usize) -> String {
    format!("{}{leaf}{}", open.repeat(levels), close.repeat(levels))
}

#[test]
fn default_depth_limit_fits_on_a_test_thread() {
    let limit = ParseOptions::default().max_depth;
    // `levels` wrappers around the leaf make `levels + 1` nested terms
    for (open, close) in [("(prod ", ")"), ("[", " y]"), ("(unwrap ", ")")] {
        let src = nest(open, "x", close, limit - 1);
        assert!(parse_term("deep", &src).is_ok(), "{open}x{close} at {} levels", limit - 1);

        let src = nest(open, "x", close, limit + 1);
        let err = parse_term("deep", &src).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind, ParseErrorKind::TooDeep { limit });
    }

    let src = nest("(prod ", "a", ")", limit - 1);
    assert!(parse_type("deep", &src).is_ok());
    let src = nest("(prod ", "a", ")", limit + 1);
    assert_eq!(
        parse_type("deep", &src).unwrap_err().errors[0].kind,
        ParseErrorKind::TooDeep { limit }
    );
}
