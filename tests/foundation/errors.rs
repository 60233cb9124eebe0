//! Integration tests for error types
//!
//! Tests error construction, display, and context.

use tether_foundation::{EntityId, Error, ErrorContext, ErrorKind, Interner, Type};

#[test]
fn type_mismatch_display() {
    let err = Error::type_mismatch(Type::vec(Type::Any), Type::Int);
    assert_eq!(
        err.to_string(),
        "type mismatch: expected vec<any>, got int"
    );
}

#[test]
fn unresolved_mutator_names_site() {
    let mut interner = Interner::new();
    let follower = interner.intern_keyword("follower");
    let allies = interner.intern_keyword("allies");

    let err = Error::unresolved_mutator(follower, allies, "wrong cardinality");
    assert_eq!(err.unresolved_site(), Some((follower, allies)));
    assert!(err.to_string().ends_with("wrong cardinality"));
}

#[test]
fn other_kinds_have_no_site() {
    assert_eq!(Error::internal("boom").unresolved_site(), None);
    assert_eq!(
        Error::stale_entity(EntityId::new(1, 2)).unresolved_site(),
        None
    );
}

#[test]
fn entity_errors() {
    let e = EntityId::new(3, 1);
    assert!(matches!(
        Error::entity_not_found(e).kind,
        ErrorKind::EntityNotFound(id) if id == e
    ));
    assert!(matches!(
        Error::stale_entity(e).kind,
        ErrorKind::StaleEntity(id) if id == e
    ));
}

#[test]
fn context_is_attached() {
    let err = Error::internal("boom").with_context(
        ErrorContext::new()
            .with_source("link discovery")
            .with_frame("component :follower"),
    );

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("link discovery"));
    assert_eq!(context.stack, vec!["component :follower".to_string()]);
    assert!(context.to_string().contains("in component :follower"));
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::internal("boom"));
}
