// Drives use_dashboard inside a VirtualDom: mount load, rapid selection change, task cancellation

use dioxus::core::{NoOpMutations, VirtualDom};
use dioxus::prelude::*;
use seo_dashboard::prelude::*;
use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

/// Returns a slow dataset on the first call and a fast one afterwards.
#[derive(Clone, Default)]
struct ScriptedSource {
    calls: Rc<RefCell<usize>>,
    completed: Rc<RefCell<usize>>,
}

fn dataset(tag: &str) -> Dataset {
    let row = |key: &str, domain: String| DomainInfo {
        key: key.to_string(),
        domain,
        total_keywords: 100,
        ..Default::default()
    };
    Dataset {
        domain_info: vec![
            row("PL-PL", format!("{tag}.pl")),
            row("FR-FR", format!("{tag}.fr")),
        ],
        ..Default::default()
    }
}

impl DataSource for ScriptedSource {
    fn fetch_all(&self) -> impl Future<Output = DashboardResult<Dataset>> {
        let calls = self.calls.clone();
        let completed = self.completed.clone();
        async move {
            let call = {
                let mut calls = calls.borrow_mut();
                *calls += 1;
                *calls
            };
            let (delay, tag) = if call == 1 {
                (Duration::from_millis(300), "first")
            } else {
                (Duration::from_millis(20), "second")
            };
            tokio::time::sleep(delay).await;
            *completed.borrow_mut() += 1;
            Ok(dataset(tag))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Snapshot {
    key: String,
    domain: Option<String>,
    success: bool,
    fetching: bool,
    generation: u64,
}

#[derive(Clone, Default)]
struct Observed(Rc<RefCell<Snapshot>>);

fn app() -> Element {
    let source = use_context::<ScriptedSource>();
    let observed = use_context::<Observed>();
    let dashboard = use_dashboard(source, &DashboardConfig::default());

    // Switch country while the first fetch is still sleeping
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            dashboard.select_country(Country::France);
        });
    });

    let controller = dashboard.controller();
    let ctrl = controller.read();
    let view = ctrl.view();
    *observed.0.borrow_mut() = Snapshot {
        key: view.key.clone(),
        domain: view.domain_info.as_ref().map(|info| info.domain.clone()),
        success: ctrl.state().is_success(),
        fetching: dashboard.is_fetching(),
        generation: ctrl.generation(),
    };

    rsx! { p { "{view.key}" } }
}

/// Runs the dom until `budget` elapses, rendering whatever becomes dirty.
async fn drive(dom: &mut VirtualDom, budget: Duration) {
    let deadline = tokio::time::Instant::now() + budget;
    loop {
        tokio::select! {
            _ = dom.wait_for_work() => {}
            _ = tokio::time::sleep_until(deadline) => break,
        }
        dom.render_immediate(&mut NoOpMutations);
    }
}

#[tokio::test]
async fn test_rapid_selection_change_keeps_newest_result() {
    let source = ScriptedSource::default();
    let observed = Observed::default();

    let mut dom = VirtualDom::new(app)
        .with_root_context(source.clone())
        .with_root_context(observed.clone());
    dom.rebuild_in_place();

    // Long enough for the superseded 300ms fetch to have finished had it survived
    drive(&mut dom, Duration::from_millis(600)).await;

    let snapshot = observed.0.borrow().clone();
    assert_eq!(snapshot.key, "FR-FR");
    assert_eq!(snapshot.domain.as_deref(), Some("second.fr"));
    assert!(snapshot.success);
    assert!(!snapshot.fetching);
    assert_eq!(snapshot.generation, 2);

    // The first fetch was cancelled mid-flight and never completed
    assert_eq!(*source.calls.borrow(), 2);
    assert_eq!(*source.completed.borrow(), 1);
}

#[tokio::test]
async fn test_mount_load_settles_without_selection_change() {
    fn idle_app() -> Element {
        let source = use_context::<ScriptedSource>();
        let observed = use_context::<Observed>();
        let dashboard = use_dashboard(source, &DashboardConfig::default());

        let controller = dashboard.controller();
        let ctrl = controller.read();
        *observed.0.borrow_mut() = Snapshot {
            key: ctrl.view().key.clone(),
            domain: ctrl.view().domain_info.as_ref().map(|info| info.domain.clone()),
            success: ctrl.state().is_success(),
            fetching: dashboard.is_fetching(),
            generation: ctrl.generation(),
        };
        rsx! { p { "{ctrl.view().key}" } }
    }

    let source = ScriptedSource::default();
    let observed = Observed::default();

    let mut dom = VirtualDom::new(idle_app)
        .with_root_context(source.clone())
        .with_root_context(observed.clone());
    dom.rebuild_in_place();

    // Nothing is written during the first render
    assert_eq!(observed.0.borrow().generation, 0);

    drive(&mut dom, Duration::from_millis(500)).await;

    let snapshot = observed.0.borrow().clone();
    assert_eq!(snapshot.key, "PL-PL");
    assert_eq!(snapshot.domain.as_deref(), Some("first.pl"));
    assert!(snapshot.success);
    assert!(!snapshot.fetching);
    assert_eq!(snapshot.generation, 1);
    assert_eq!(*source.completed.borrow(), 1);
}
