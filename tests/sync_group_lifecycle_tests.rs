use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chart_sync::api::{
    HoverSyncBehavior, HoverSyncController, RelayoutSyncController,
    SYNC_DIAGNOSTICS_JSON_SCHEMA_V1, SyncGroup, SyncGroupConfig,
};
use chart_sync::{SyncError, SyncResult};
use chart_sync::core::{AxisRange, ChartId, RelayoutPatch, SeriesId};
use chart_sync::extensions::HoverCallbacks;
use chart_sync::surface::{
    ChartRegistry, ChartSurface, EventLoop, HeadlessChart, NotificationSource,
};

fn add_chart(
    event_loop: &EventLoop,
    registry: &ChartRegistry,
    id: &str,
) -> Rc<RefCell<HeadlessChart>> {
    let chart = Rc::new(RefCell::new(
        HeadlessChart::new(id, [SeriesId::from("lap 1")])
            .with_x_axis(AxisRange::fixed(0.0, 100.0))
            .with_notifier(event_loop.queue()),
    ));
    registry.register(id, chart.clone()).expect("register chart");
    chart
}

fn create(
    event_loop: &Rc<EventLoop>,
    registry: &ChartRegistry,
    config: SyncGroupConfig,
) -> Result<SyncGroup, SyncError> {
    let source: Rc<dyn NotificationSource> = event_loop.clone();
    SyncGroup::create(source, registry, config, HoverCallbacks::discard())
}

#[test]
fn unknown_follower_fails_without_subscribing() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    add_chart(&event_loop, &registry, "speed");
    add_chart(&event_loop, &registry, "gear");

    let err = create(
        &event_loop,
        &registry,
        SyncGroupConfig::new("speed", ["gear", "ghost"]),
    )
    .expect_err("ghost chart is not registered");

    assert_eq!(
        err,
        SyncError::MissingChart {
            id: ChartId::from("ghost")
        }
    );
    assert_eq!(event_loop.subscriber_count(), 0);
}

#[test]
fn unknown_primary_fails_without_subscribing() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    add_chart(&event_loop, &registry, "gear");

    let err = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
        .expect_err("primary is not registered");

    assert!(matches!(err, SyncError::MissingChart { .. }));
    assert_eq!(event_loop.subscriber_count(), 0);
}

#[test]
fn invalid_group_shapes_are_rejected() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    add_chart(&event_loop, &registry, "speed");
    add_chart(&event_loop, &registry, "gear");

    let self_follow = create(
        &event_loop,
        &registry,
        SyncGroupConfig::new("speed", ["gear", "speed"]),
    );
    let no_followers = create(
        &event_loop,
        &registry,
        SyncGroupConfig::new("speed", Vec::<ChartId>::new()),
    );
    let empty_primary = create(&event_loop, &registry, SyncGroupConfig::new("  ", ["gear"]));

    assert!(matches!(self_follow, Err(SyncError::InvalidGroup(_))));
    assert!(matches!(no_followers, Err(SyncError::InvalidGroup(_))));
    assert!(matches!(empty_primary, Err(SyncError::InvalidGroup(_))));
    assert_eq!(event_loop.subscriber_count(), 0);
}

#[test]
fn duplicate_followers_collapse() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    let gear = add_chart(&event_loop, &registry, "gear");

    let group = create(
        &event_loop,
        &registry,
        SyncGroupConfig::new("speed", ["gear", "gear"]),
    )
    .expect("create group");
    assert_eq!(group.followers().count(), 1);

    speed.borrow_mut().user_hover(3.0, 1);
    event_loop.run_until_idle().expect("dispatch");
    assert_eq!(gear.borrow().instructions().len(), 1);
}

#[test]
fn group_subscribes_hover_and_relayout_on_the_primary_only() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    add_chart(&event_loop, &registry, "speed");
    add_chart(&event_loop, &registry, "gear");

    let _group = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
        .expect("create group");

    assert_eq!(event_loop.subscriber_count_for(&ChartId::from("speed")), 2);
    assert_eq!(event_loop.subscriber_count_for(&ChartId::from("gear")), 0);
}

#[test]
fn clear_on_unhover_adds_an_unhover_subscription() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    add_chart(&event_loop, &registry, "speed");
    add_chart(&event_loop, &registry, "gear");

    let config = SyncGroupConfig::new("speed", ["gear"]).with_hover_behavior(HoverSyncBehavior {
        clear_on_unhover: true,
        ..HoverSyncBehavior::default()
    });
    let _group = create(&event_loop, &registry, config).expect("create group");

    assert_eq!(event_loop.subscriber_count(), 3);
}

#[test]
fn detach_stops_propagation_and_is_idempotent() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    let gear = add_chart(&event_loop, &registry, "gear");
    let group = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
        .expect("create group");

    assert!(group.detach());
    assert!(!group.detach());
    assert!(!group.is_attached());
    assert_eq!(event_loop.subscriber_count(), 0);

    speed.borrow_mut().user_hover(10.0, 4);
    speed
        .borrow_mut()
        .user_relayout(RelayoutPatch::range(10.0, 20.0));
    event_loop.run_until_idle().expect("dispatch");

    assert!(gear.borrow().instructions().is_empty());
    assert_eq!(gear.borrow().x_axis(), AxisRange::fixed(0.0, 100.0));
    assert!(!group.diagnostics().attached);
}

#[test]
fn dropping_a_group_detaches_it() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    let gear = add_chart(&event_loop, &registry, "gear");

    {
        let _group = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
            .expect("create group");
        assert_eq!(event_loop.subscriber_count(), 2);
    }

    assert_eq!(event_loop.subscriber_count(), 0);
    speed.borrow_mut().user_hover(10.0, 4);
    event_loop.run_until_idle().expect("dispatch");
    assert!(gear.borrow().hover().is_none());
}

#[test]
fn detaching_one_group_leaves_other_groups_running() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    let gear = add_chart(&event_loop, &registry, "gear");
    let brake = add_chart(&event_loop, &registry, "brake");
    let lap = add_chart(&event_loop, &registry, "lap");

    let first = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
        .expect("first group");
    let _second = create(&event_loop, &registry, SyncGroupConfig::new("brake", ["lap"]))
        .expect("second group");
    assert!(first.detach());

    speed.borrow_mut().user_hover(1.0, 0);
    brake.borrow_mut().user_hover(2.0, 0);
    event_loop.run_until_idle().expect("dispatch");

    assert!(gear.borrow().hover().is_none());
    let highlight = lap.borrow().hover().cloned().expect("lap highlighted");
    assert_eq!(highlight.x_value, 2.0);
}

#[test]
fn diagnostics_export_a_versioned_json_contract() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    add_chart(&event_loop, &registry, "gear");
    let group = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
        .expect("create group");

    speed.borrow_mut().user_hover(5.0, 2);
    speed
        .borrow_mut()
        .user_relayout(RelayoutPatch::range(5.0, 6.0));
    event_loop.run_until_idle().expect("dispatch");

    let diagnostics = group.diagnostics();
    assert_eq!(diagnostics.hover.hovers_received, 1);
    assert_eq!(diagnostics.hover.hover_instructions, 1);
    assert_eq!(diagnostics.relayout.ranges_applied, 1);

    let json = diagnostics.to_json_pretty().expect("serialize diagnostics");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(SYNC_DIAGNOSTICS_JSON_SCHEMA_V1)
    );
    assert_eq!(value["diagnostics"]["primary"], "speed");
    assert_eq!(value["diagnostics"]["attached"], true);
    assert_eq!(value["diagnostics"]["relayout"]["ranges_applied"], 1);
}

#[test]
fn chart_removed_from_registry_after_creation_is_skipped() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    add_chart(&event_loop, &registry, "gear");
    let brake = add_chart(&event_loop, &registry, "brake");
    let group = create(
        &event_loop,
        &registry,
        SyncGroupConfig::new("speed", ["gear", "brake"]),
    )
    .expect("create group");

    assert!(registry.remove(&ChartId::from("gear")));
    speed
        .borrow_mut()
        .user_relayout(RelayoutPatch::range(33.0, 66.0));
    event_loop.run_until_idle().expect("dispatch");

    assert_eq!(brake.borrow().x_axis(), AxisRange::fixed(33.0, 66.0));
    assert_eq!(group.diagnostics().relayout.stale_followers, 1);
}

struct LivenessCounter {
    checks: Rc<Cell<usize>>,
}

impl ChartSurface for LivenessCounter {
    fn is_live(&self) -> bool {
        self.checks.set(self.checks.get() + 1);
        true
    }

    fn plotted_series(&self) -> Vec<SeriesId> {
        vec![SeriesId::from("lap 1")]
    }

    fn x_axis(&self) -> AxisRange {
        AxisRange::fixed(0.0, 1.0)
    }

    fn show_hover(&mut self, _x_value: f64, _series: &[SeriesId]) -> SyncResult<()> {
        Ok(())
    }

    fn clear_hover(&mut self) -> SyncResult<()> {
        Ok(())
    }

    fn set_x_axis_range(&mut self, _low: f64, _high: f64) -> SyncResult<()> {
        Ok(())
    }

    fn set_x_axis_autorange(&mut self) -> SyncResult<()> {
        Ok(())
    }
}

#[test]
fn creating_a_group_resolves_each_chart_once() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let primary_checks = Rc::new(Cell::new(0));
    let follower_checks = Rc::new(Cell::new(0));
    registry
        .register(
            "speed",
            Rc::new(RefCell::new(LivenessCounter {
                checks: Rc::clone(&primary_checks),
            })),
        )
        .expect("register speed");
    registry
        .register(
            "gear",
            Rc::new(RefCell::new(LivenessCounter {
                checks: Rc::clone(&follower_checks),
            })),
        )
        .expect("register gear");

    let _group = create(&event_loop, &registry, SyncGroupConfig::new("speed", ["gear"]))
        .expect("create group");

    assert_eq!(primary_checks.get(), 1);
    assert_eq!(follower_checks.get(), 1);
    assert_eq!(event_loop.subscriber_count(), 2);
}

#[test]
fn standalone_controllers_validate_on_attach() {
    let event_loop = Rc::new(EventLoop::new());
    let registry = ChartRegistry::new();
    let speed = add_chart(&event_loop, &registry, "speed");
    let gear = add_chart(&event_loop, &registry, "gear");
    let source: Rc<dyn NotificationSource> = event_loop.clone();

    let missing = RelayoutSyncController::new(
        registry.clone(),
        ChartId::from("speed"),
        [ChartId::from("ghost")].into_iter().collect(),
    )
    .attach(Rc::clone(&source))
    .expect_err("ghost follower");
    assert!(matches!(missing, SyncError::MissingChart { .. }));
    assert_eq!(event_loop.subscriber_count(), 0);

    let hover = HoverSyncController::new(
        registry,
        ChartId::from("speed"),
        [ChartId::from("gear")].into_iter().collect(),
        HoverCallbacks::discard(),
    )
    .attach(source)
    .expect("attach hover controller");
    assert_eq!(event_loop.subscriber_count(), 1);

    speed.borrow_mut().user_hover(8.0, 2);
    event_loop.run_until_idle().expect("dispatch");
    assert_eq!(gear.borrow().hover().map(|highlight| highlight.x_value), Some(8.0));
    assert_eq!(hover.controller().diagnostics().hover_instructions, 1);

    assert!(hover.detach());
    assert_eq!(event_loop.subscriber_count(), 0);
}
