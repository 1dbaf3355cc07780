use audit_core::{Catalog, CatalogError, LogEventSpec, StyleTag};

// --- Helpers ---

fn step(msg: &str, delay_ms: u64) -> LogEventSpec {
    LogEventSpec::new(msg, StyleTag::Info, delay_ms)
}

// --- Tests ---

#[test]
fn default_catalog_passes_validation() {
    let builtin = Catalog::shadow_audit();
    let rebuilt = Catalog::new(builtin.steps().to_vec()).expect("builtin catalog is valid");
    assert_eq!(rebuilt, builtin);

    let delays: Vec<u64> = builtin.steps().iter().map(|s| s.delay_ms).collect();
    assert_eq!(delays, vec![800, 1500, 2400, 3200, 4500, 5500, 6500]);
    assert_eq!(builtin.steps()[5].style, StyleTag::Error);
    assert!(builtin.is_last(6));
    assert!(!builtin.is_last(5));
}

#[test]
fn empty_catalog_is_rejected() {
    assert_eq!(Catalog::new(vec![]), Err(CatalogError::Empty));
    assert_eq!(Catalog::new(vec![step("ONLY", 0)]).unwrap().len(), 1);
}

#[test]
fn decreasing_delay_is_rejected() {
    let err = Catalog::new(vec![step("a", 500), step("b", 400)]).unwrap_err();
    assert_eq!(
        err,
        CatalogError::NonIncreasingDelay {
            index: 1,
            previous_ms: 500,
            delay_ms: 400
        }
    );
}

#[test]
fn equal_delay_is_rejected() {
    let err = Catalog::new(vec![step("a", 100), step("b", 200), step("c", 200)]).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NonIncreasingDelay { index: 2, .. }
    ));
}

#[test]
fn blank_message_is_rejected() {
    let err = Catalog::new(vec![step("a", 100), step("   ", 200)]).unwrap_err();
    assert_eq!(err, CatalogError::EmptyMessage { index: 1 });
}

#[test]
fn zero_first_delay_is_allowed() {
    let catalog = Catalog::new(vec![step("now", 0), step("later", 1)]).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn scaling_divides_offsets() {
    let fast = Catalog::shadow_audit().scaled(2.0).unwrap();
    let delays: Vec<u64> = fast.steps().iter().map(|s| s.delay_ms).collect();
    assert_eq!(delays, vec![400, 750, 1200, 1600, 2250, 2750, 3250]);
    assert_eq!(fast.total_duration().as_millis(), 3250);
}

#[test]
fn scaling_that_collapses_steps_fails() {
    let catalog = Catalog::new(vec![step("a", 1), step("b", 2)]).unwrap();
    assert!(matches!(
        catalog.scaled(10.0),
        Err(CatalogError::NonIncreasingDelay { .. })
    ));
}

#[test]
fn invalid_scale_is_rejected() {
    let catalog = Catalog::shadow_audit();
    assert!(matches!(catalog.scaled(0.0), Err(CatalogError::InvalidScale(_))));
    assert!(matches!(catalog.scaled(-1.0), Err(CatalogError::InvalidScale(_))));
    assert!(matches!(
        catalog.scaled(f64::INFINITY),
        Err(CatalogError::InvalidScale(_))
    ));
}
