//! Per-container engine registry. Mounting the same container twice must
//! not rebuild the navigation surface, so engines are memoized by
//! container id; repeated calls hand back the same instance.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::NavigationEngine;
use crate::model::GridError;

thread_local! {
    static ENGINES: RefCell<HashMap<String, Rc<RefCell<NavigationEngine>>>> =
        RefCell::new(HashMap::new());
}

/// Returns the engine registered for `container_id`, building it with
/// `build` on first use. A failed build caches nothing, so a later mount
/// attempt may retry.
pub fn engine_for(
    container_id: &str,
    build: impl FnOnce() -> Result<NavigationEngine, GridError>,
) -> Result<Rc<RefCell<NavigationEngine>>, GridError> {
    if let Some(existing) = ENGINES.with(|e| e.borrow().get(container_id).cloned()) {
        return Ok(existing);
    }
    let engine = Rc::new(RefCell::new(build()?));
    ENGINES.with(|e| {
        e.borrow_mut()
            .insert(container_id.to_owned(), engine.clone())
    });
    Ok(engine)
}

/// Drops the engine registered for `container_id`, if any.
pub fn release(container_id: &str) {
    ENGINES.with(|e| e.borrow_mut().remove(container_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridIndex, RawStep};

    fn build_counted(counter: &RefCell<usize>) -> Result<NavigationEngine, GridError> {
        *counter.borrow_mut() += 1;
        Ok(NavigationEngine::new(
            GridIndex::build(&[RawStep::at(0, 0)])?,
            false,
        ))
    }

    #[test]
    fn repeated_mounts_share_one_instance() {
        release("shared");
        let builds = RefCell::new(0);
        let a = engine_for("shared", || build_counted(&builds)).unwrap();
        let b = engine_for("shared", || build_counted(&builds)).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(*builds.borrow(), 1);
    }

    #[test]
    fn distinct_containers_get_distinct_engines() {
        release("left");
        release("right");
        let builds = RefCell::new(0);
        let a = engine_for("left", || build_counted(&builds)).unwrap();
        let b = engine_for("right", || build_counted(&builds)).unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(*builds.borrow(), 2);
    }

    #[test]
    fn failed_build_is_not_cached() {
        release("broken");
        let err = engine_for("broken", || {
            GridIndex::build(&[RawStep::at(0, 0), RawStep::at(0, 0)])
                .map(|index| NavigationEngine::new(index, false))
        })
        .unwrap_err();
        assert!(matches!(err, GridError::DuplicateStep { .. }));

        // A corrected declaration list mounts fine afterwards.
        let builds = RefCell::new(0);
        engine_for("broken", || build_counted(&builds)).unwrap();
        assert_eq!(*builds.borrow(), 1);
    }

    #[test]
    fn release_forgets_the_instance() {
        release("gone");
        let builds = RefCell::new(0);
        engine_for("gone", || build_counted(&builds)).unwrap();
        release("gone");
        engine_for("gone", || build_counted(&builds)).unwrap();
        assert_eq!(*builds.borrow(), 2);
    }
}
