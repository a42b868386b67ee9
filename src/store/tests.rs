use super::{DataDomain, KitchenError, KitchenStore};
use crate::clock::ManualClock;
use crate::config::KitchenConfig;
use crate::domain::order::{CookingOrder, OrderItem};
use crate::domain::station::Station;
use crate::domain::types::{
    AlertType, ColorCode, CookingStage, DuplicateStartPolicy, StationStatus, StationType,
    TimerStatus,
};
use crate::engine::events::NoOpEventPublisher;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 11, 30, 0).unwrap()
}

fn setup_with(config: KitchenConfig) -> (KitchenStore, ManualClock) {
    let clock = ManualClock::new(t0());
    let store = KitchenStore::new(config, Arc::new(clock.clone()), Arc::new(NoOpEventPublisher));
    (store, clock)
}

fn setup() -> (KitchenStore, ManualClock) {
    setup_with(KitchenConfig::default())
}

fn make_order(id: &str, priority: u8) -> CookingOrder {
    CookingOrder {
        id: id.to_string(),
        order_number: format!("NO-{}", id),
        table_number: Some("T3".to_string()),
        items: vec![OrderItem {
            id: format!("{}-item", id),
            name: "宫保鸡丁".to_string(),
            quantity: 1,
            notes: None,
            station_type: Some(StationType::Saute),
        }],
        priority,
        estimated_time: 600,
        wait_time: 0,
        stage: CookingStage::Prep,
        assigned_station: None,
        assigned_staff: None,
        created_at: t0(),
    }
}

// ==========================================
// 计时器
// ==========================================

#[test]
fn test_start_timer_is_running() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    assert_eq!(timer.status, TimerStatus::Running);
    assert_eq!(timer.start_time, Some(t0()));
    assert_eq!(store.active_timer_count(), 1);
    assert_eq!(store.timer_for_order("o-1").unwrap().id, timer.id);
}

#[test]
fn test_start_timer_rejects_invalid_input() {
    let (mut store, _clock) = setup();
    assert!(matches!(
        store.start_timer("o-1", 0, 3),
        Err(KitchenError::InvalidInput(_))
    ));
    assert!(matches!(
        store.start_timer("o-1", 600, 9),
        Err(KitchenError::InvalidInput(_))
    ));
    assert!(store.timers().is_empty());
}

#[test]
fn test_duplicate_start_rejected_by_default() {
    let (mut store, _clock) = setup();
    let first = store.start_timer("o-1", 600, 3).unwrap();

    let err = store.start_timer("o-1", 300, 3).unwrap_err();
    assert_eq!(
        err,
        KitchenError::DuplicateTimer {
            order_id: "o-1".to_string(),
            timer_id: first.id.clone(),
        }
    );
    assert_eq!(store.timers().len(), 1);
}

#[test]
fn test_duplicate_start_restart_policy() {
    let mut config = KitchenConfig::default();
    config.duplicate_start_policy = DuplicateStartPolicy::Restart;
    let (mut store, clock) = setup_with(config);

    let first = store.start_timer("o-1", 600, 3).unwrap();
    clock.advance(Duration::seconds(400));
    store.tick();

    let restarted = store.start_timer("o-1", 900, 4).unwrap();
    assert_eq!(restarted.id, first.id);
    assert_eq!(restarted.estimated_duration, 900);
    assert_eq!(restarted.start_time, Some(t0() + Duration::seconds(400)));
    assert_eq!(restarted.elapsed, 0.0);
    assert!(!restarted.latch.warning_sent);
    assert_eq!(store.timers().len(), 1);
}

#[test]
fn test_start_after_completed_replaces_timer() {
    let (mut store, _clock) = setup();
    let first = store.start_timer("o-1", 600, 3).unwrap();
    store.complete_timer(&first.id).unwrap();

    let second = store.start_timer("o-1", 600, 3).unwrap();
    assert_ne!(first.id, second.id);
    assert!(store.timer(&first.id).is_none());
    assert_eq!(store.timers().len(), 1);
}

#[test]
fn test_start_after_reset_restarts_same_timer() {
    let (mut store, clock) = setup();
    let first = store.start_timer("o-1", 600, 3).unwrap();
    clock.advance(Duration::seconds(100));
    store.reset_timer(&first.id).unwrap();
    assert_eq!(store.timer(&first.id).unwrap().status, TimerStatus::Idle);

    clock.advance(Duration::seconds(20));
    let again = store.start_timer("o-1", 300, 4).unwrap();
    assert_eq!(again.id, first.id);
    assert_eq!(again.status, TimerStatus::Running);
    assert_eq!(again.start_time, Some(t0() + Duration::seconds(120)));
    assert_eq!(again.estimated_duration, 300);
    assert_eq!(again.priority, 4);
    assert_eq!(store.timers().len(), 1);

    clock.advance(Duration::seconds(30));
    store.tick();
    assert_eq!(store.timer(&first.id).unwrap().elapsed, 30.0);
}

#[test]
fn test_progress_half_way_is_orange() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    store.on_timer_update(&timer.id, 299.0).unwrap();
    assert_eq!(store.timer(&timer.id).unwrap().color_code, ColorCode::Blue);

    store.on_timer_update(&timer.id, 300.0).unwrap();
    let t = store.timer(&timer.id).unwrap();
    assert_eq!(t.progress, 50.0);
    assert_eq!(t.color_code, ColorCode::Orange);
    assert_eq!(t.remaining_time, 300.0);
}

#[test]
fn test_progress_formula_holds_for_many_updates() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 450, 3).unwrap();

    for elapsed in [0.0, 12.5, 200.0, 449.0, 450.0, 451.0, 1200.0] {
        store.on_timer_update(&timer.id, elapsed).unwrap();
        let t = store.timer(&timer.id).unwrap();
        let expected = (elapsed / 450.0 * 100.0_f64).min(100.0);
        assert!((t.progress - expected).abs() < 1e-9, "elapsed={}", elapsed);
    }
}

#[test]
fn test_overdue_sticks_until_reset() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    store.on_timer_update(&timer.id, 600.0).unwrap();
    assert!(!store.timer(&timer.id).unwrap().is_overdue);

    store.on_timer_update(&timer.id, 600.5).unwrap();
    let t = store.timer(&timer.id).unwrap();
    assert!(t.is_overdue);
    assert_eq!(t.status, TimerStatus::Overdue);
    assert_eq!(t.overdue_time, 0.5);

    store.on_timer_update(&timer.id, 100.0).unwrap();
    assert!(store.timer(&timer.id).unwrap().is_overdue);

    store.reset_timer(&timer.id).unwrap();
    let t = store.timer(&timer.id).unwrap();
    assert!(!t.is_overdue);
    assert_eq!(t.status, TimerStatus::Idle);
}

#[test]
fn test_threshold_alerts_emitted_once() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 100, 3).unwrap();

    let raised = store.on_timer_update(&timer.id, 50.0).unwrap();
    assert_eq!(raised.len(), 1);
    assert!(store.on_timer_update(&timer.id, 60.0).unwrap().is_empty());

    let raised = store.on_timer_update(&timer.id, 85.0).unwrap();
    assert_eq!(raised[0].alert_type, AlertType::TimerCritical);

    let raised = store.on_timer_update(&timer.id, 101.0).unwrap();
    assert_eq!(raised[0].alert_type, AlertType::TimerOverdue);
    assert!(store.on_timer_update(&timer.id, 150.0).unwrap().is_empty());

    assert_eq!(store.alerts().len(), 3);
}

#[test]
fn test_update_on_paused_timer_is_noop() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();
    store.pause_timer(&timer.id).unwrap();

    let raised = store.on_timer_update(&timer.id, 500.0).unwrap();
    assert!(raised.is_empty());
    assert_eq!(store.timer(&timer.id).unwrap().progress, 0.0);
}

#[test]
fn test_pause_resume_excludes_paused_time() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    clock.advance(Duration::seconds(100));
    store.pause_timer(&timer.id).unwrap();
    assert_eq!(store.timer(&timer.id).unwrap().status, TimerStatus::Paused);

    clock.advance(Duration::seconds(250));
    store.resume_timer(&timer.id).unwrap();
    assert_eq!(store.timer(&timer.id).unwrap().total_paused_ms, 250_000);

    clock.advance(Duration::seconds(50));
    store.tick();
    let t = store.timer(&timer.id).unwrap();
    assert_eq!(t.elapsed, 150.0);
    assert_eq!(t.progress, 25.0);
}

#[test]
fn test_pause_refreshes_progress_snapshot() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    // 未经轮询直接暂停
    clock.advance(Duration::seconds(300));
    store.pause_timer(&timer.id).unwrap();

    let t = store.timer(&timer.id).unwrap();
    assert_eq!(t.elapsed, 300.0);
    assert_eq!(t.progress, 50.0);
    assert_eq!(t.remaining_time, 300.0);
    assert_eq!(t.color_code, ColorCode::Orange);
}

#[test]
fn test_invalid_transitions() {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    assert!(matches!(
        store.resume_timer(&timer.id),
        Err(KitchenError::InvalidStateTransition { .. })
    ));

    store.complete_timer(&timer.id).unwrap();
    assert!(matches!(
        store.pause_timer(&timer.id),
        Err(KitchenError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        store.complete_timer(&timer.id),
        Err(KitchenError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        store.pause_timer("missing"),
        Err(KitchenError::TimerNotFound(_))
    ));
}

#[test]
fn test_complete_timer_fields() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    clock.advance(Duration::seconds(420));
    let done = store.complete_timer(&timer.id).unwrap();

    assert_eq!(done.status, TimerStatus::Completed);
    assert_eq!(done.stage, CookingStage::Ready);
    assert_eq!(done.progress, 100.0);
    assert_eq!(done.actual_duration, Some(420.0));
    assert!(done.actual_duration.unwrap() >= 0.0);
    assert!(!done.is_overdue);
    assert_eq!(store.active_timer_count(), 0);
}

#[test]
fn test_complete_paused_timer_counts_wall_clock() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 600, 3).unwrap();
    clock.advance(Duration::seconds(60));
    store.pause_timer(&timer.id).unwrap();
    clock.advance(Duration::seconds(60));

    let done = store.complete_timer(&timer.id).unwrap();
    assert_eq!(done.actual_duration, Some(120.0));
    assert_eq!(done.elapsed, 60.0);
    assert!(done.paused_time.is_none());
}

#[test]
fn test_advance_stage_syncs_order() {
    let (mut store, _clock) = setup();
    store.on_new_order(make_order("o-1", 3)).unwrap();
    let timer = store.start_timer("o-1", 600, 3).unwrap();

    store.advance_stage(&timer.id, CookingStage::Plating).unwrap();
    assert_eq!(store.timer(&timer.id).unwrap().stage, CookingStage::Plating);
    assert_eq!(store.order("o-1").unwrap().stage, CookingStage::Plating);
}

#[test]
fn test_tick_drives_overdue_from_clock() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 60, 3).unwrap();

    clock.advance(Duration::seconds(61));
    let summary = store.tick();

    assert_eq!(summary.active, 1);
    assert_eq!(summary.alerts_raised, 3);
    let t = store.timer(&timer.id).unwrap();
    assert!(t.is_overdue);
    assert_eq!(t.color_code, ColorCode::Red);
}

#[test]
fn test_completed_timers_cleaned_after_retention() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 60, 3).unwrap();
    store.complete_timer(&timer.id).unwrap();

    clock.advance(Duration::seconds(300));
    store.tick();
    assert!(store.timer(&timer.id).is_some());

    clock.advance(Duration::seconds(1));
    let summary = store.tick();
    assert_eq!(summary.timers_removed, 1);
    assert!(store.timer(&timer.id).is_none());
    assert!(store.timer_for_order("o-1").is_none());
}

// ==========================================
// 队列
// ==========================================

#[test]
fn test_needs_polling_until_retention_cleared() {
    let (mut store, clock) = setup();
    assert!(!store.needs_polling());

    let timer = store.start_timer("o-1", 600, 3).unwrap();
    store.complete_timer(&timer.id).unwrap();
    assert_eq!(store.active_timer_count(), 0);
    assert_eq!(store.pending_retention(), 1);
    assert!(store.needs_polling());

    clock.advance(Duration::seconds(301));
    let summary = store.tick();
    assert_eq!(summary.pending_retention, 0);
    assert!(!store.needs_polling());
}

#[test]
fn test_reorder_queue_moves_only_target() {
    let (mut store, _clock) = setup();
    for id in ["a", "b", "c", "d", "e"] {
        store.on_new_order(make_order(id, 3)).unwrap();
    }

    store.reorder_queue("d", 1).unwrap();
    let ids: Vec<&str> = store.queue().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "d", "b", "c", "e"]);

    store.reorder_queue("a", 99).unwrap();
    let ids: Vec<&str> = store.queue().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "b", "c", "e", "a"]);
    assert_eq!(store.queue().len(), 5);

    assert!(matches!(
        store.reorder_queue("zzz", 0),
        Err(KitchenError::OrderNotFound(_))
    ));
}

#[test]
fn test_duplicate_order_rejected() {
    let (mut store, _clock) = setup();
    store.on_new_order(make_order("a", 3)).unwrap();
    assert!(store.on_new_order(make_order("a", 3)).is_err());
    assert_eq!(store.queue().len(), 1);
}

#[test]
fn test_order_complete_detaches_and_completes_timer() {
    let (mut store, _clock) = setup();
    store
        .upsert_station(Station::new("wok", "炒锅", StationType::Saute))
        .unwrap();
    store.on_new_order(make_order("a", 3)).unwrap();
    store.assign_order_to_station("a", "wok").unwrap();
    let timer = store.start_timer("a", 600, 3).unwrap();

    let removed = store.on_order_complete("a").unwrap();
    assert_eq!(removed.id, "a");
    assert!(store.queue().is_empty());
    assert!(store.station("wok").unwrap().active_orders.is_empty());
    assert_eq!(store.timer(&timer.id).unwrap().status, TimerStatus::Completed);
}

#[test]
fn test_reassign_station_moves_order() {
    let (mut store, _clock) = setup();
    store
        .upsert_station(Station::new("s1", "一号灶", StationType::Saute))
        .unwrap();
    store
        .upsert_station(Station::new("s2", "二号灶", StationType::Saute))
        .unwrap();
    store.on_new_order(make_order("a", 3)).unwrap();

    store.assign_order_to_station("a", "s1").unwrap();
    store.assign_order_to_station("a", "s2").unwrap();

    assert!(store.station("s1").unwrap().active_orders.is_empty());
    assert_eq!(store.station("s2").unwrap().active_orders, vec!["a".to_string()]);
    assert_eq!(store.order("a").unwrap().assigned_station.as_deref(), Some("s2"));
    assert!(matches!(
        store.assign_order_to_station("a", "nope"),
        Err(KitchenError::StationNotFound(_))
    ));
}

#[test]
fn test_priority_update_syncs_timer() {
    let (mut store, _clock) = setup();
    store.on_new_order(make_order("a", 2)).unwrap();
    let timer = store.start_timer("a", 600, 2).unwrap();

    store.update_order_priority("a", 5).unwrap();
    assert_eq!(store.order("a").unwrap().priority, 5);
    assert_eq!(store.timer(&timer.id).unwrap().priority, 5);
    assert!(store.update_order_priority("a", 0).is_err());
}

#[test]
fn test_auto_assign_picks_matching_station() {
    let (mut store, _clock) = setup();
    let mut grill = Station::new("grill", "烤炉", StationType::Grill);
    grill.capacity = 10;
    let mut wok = Station::new("wok", "炒锅", StationType::Saute);
    wok.capacity = 60;
    store.set_stations(vec![grill, wok]).unwrap();
    store.set_auto_assign(true);

    store.on_new_order(make_order("a", 3)).unwrap();
    assert_eq!(store.order("a").unwrap().assigned_station.as_deref(), Some("wok"));
    assert_eq!(store.station("wok").unwrap().active_orders, vec!["a".to_string()]);
}

#[test]
fn test_rush_mode_enters_once() {
    let mut config = KitchenConfig::default();
    config.rush_queue_threshold = 2;
    let (mut store, _clock) = setup_with(config);

    store.on_new_order(make_order("a", 3)).unwrap();
    store.on_new_order(make_order("b", 3)).unwrap();
    assert!(!store.is_rush_mode());

    store.on_new_order(make_order("c", 3)).unwrap();
    store.on_new_order(make_order("d", 3)).unwrap();
    assert!(store.is_rush_mode());
    let rush_alerts = store
        .alerts()
        .iter()
        .filter(|a| a.alert_type == AlertType::RushMode)
        .count();
    assert_eq!(rush_alerts, 1);

    store.on_order_complete("a").unwrap();
    store.on_order_complete("b").unwrap();
    assert!(!store.is_rush_mode());
}

#[test]
fn test_tick_updates_wait_time() {
    let (mut store, clock) = setup();
    store.on_new_order(make_order("a", 3)).unwrap();
    clock.advance(Duration::seconds(95));
    store.tick();
    assert_eq!(store.order("a").unwrap().wait_time, 95);
}

// ==========================================
// 工位
// ==========================================

#[test]
fn test_station_capacity_validation_and_alert() {
    let (mut store, _clock) = setup();
    store
        .upsert_station(Station::new("s1", "油炸", StationType::Fryer))
        .unwrap();

    assert!(matches!(
        store.update_station_capacity("s1", 101),
        Err(KitchenError::InvalidInput(_))
    ));

    store.update_station_capacity("s1", 90).unwrap();
    assert!(store.alerts().is_empty());

    store.update_station_capacity("s1", 95).unwrap();
    store.update_station_capacity("s1", 97).unwrap();
    assert_eq!(store.alerts().len(), 1);
    assert_eq!(store.alerts()[0].alert_type, AlertType::StationCapacity);
    assert_eq!(store.alerts()[0].station_id.as_deref(), Some("s1"));
}

#[test]
fn test_station_replacement_keeps_capacity_latch() {
    let (mut store, _clock) = setup();
    let mut hot = Station::new("s1", "油炸", StationType::Fryer);
    hot.capacity = 95;

    store.set_stations(vec![hot.clone()]).unwrap();
    store.set_stations(vec![hot.clone()]).unwrap();
    store.upsert_station(hot.clone()).unwrap();
    assert_eq!(store.alerts().len(), 1);

    // 降回阈值后再次越过才重新告警
    let mut cooled = hot.clone();
    cooled.capacity = 80;
    store.upsert_station(cooled).unwrap();
    store.upsert_station(hot).unwrap();
    assert_eq!(store.alerts().len(), 2);
}

#[test]
fn test_upsert_station_keeps_queue_assignments() {
    let (mut store, _clock) = setup();
    store
        .upsert_station(Station::new("s1", "一号灶", StationType::Saute))
        .unwrap();
    store.on_new_order(make_order("a", 3)).unwrap();
    store.assign_order_to_station("a", "s1").unwrap();

    store
        .upsert_station(Station::new("s1", "一号灶(新)", StationType::Saute))
        .unwrap();

    let station = store.station("s1").unwrap();
    assert_eq!(station.name, "一号灶(新)");
    assert_eq!(station.active_orders, vec!["a".to_string()]);
}

#[test]
fn test_station_staff_and_status() {
    let (mut store, _clock) = setup();
    store
        .upsert_station(Station::new("s1", "冷菜", StationType::Cold))
        .unwrap();

    store.assign_staff_to_station("s1", "staff-1").unwrap();
    store.assign_staff_to_station("s1", "staff-1").unwrap();
    assert_eq!(store.station("s1").unwrap().assigned_staff.len(), 1);

    assert!(store.remove_staff_from_station("s1", "staff-1").unwrap());
    assert!(!store.remove_staff_from_station("s1", "staff-1").unwrap());

    store
        .update_station_status("s1", StationStatus::Maintenance)
        .unwrap();
    assert_eq!(store.station("s1").unwrap().status, StationStatus::Maintenance);
}

// ==========================================
// 告警
// ==========================================

fn store_with_three_alerts() -> KitchenStore {
    let (mut store, _clock) = setup();
    let timer = store.start_timer("o-1", 100, 3).unwrap();
    store.on_timer_update(&timer.id, 120.0).unwrap();
    assert_eq!(store.alerts().len(), 3);
    store
}

#[test]
fn test_dismiss_removes_exactly_one() {
    let mut store = store_with_three_alerts();
    let target = store.alerts()[1].id.clone();
    let others: Vec<String> = store
        .alerts()
        .iter()
        .filter(|a| a.id != target)
        .map(|a| a.id.clone())
        .collect();

    store.dismiss_alert(&target).unwrap();
    let remaining: Vec<String> = store.alerts().iter().map(|a| a.id.clone()).collect();
    assert_eq!(remaining, others);
    assert!(matches!(
        store.dismiss_alert(&target),
        Err(KitchenError::AlertNotFound(_))
    ));
}

#[test]
fn test_acknowledge_keeps_alert() {
    let mut store = store_with_three_alerts();
    let target = store.alerts()[0].id.clone();

    store.acknowledge_alert(&target).unwrap();
    assert_eq!(store.alerts().len(), 3);
    assert!(store.alerts()[0].acknowledged);
    assert_eq!(store.unacknowledged_alerts().len(), 2);

    assert_eq!(store.clear_acknowledged_alerts(), 1);
    assert_eq!(store.alerts().len(), 2);
}

#[test]
fn test_auto_resolve_alerts_expire_after_an_hour() {
    let (mut store, clock) = setup();
    let timer = store.start_timer("o-1", 100, 3).unwrap();
    store.on_timer_update(&timer.id, 120.0).unwrap();
    store.complete_timer(&timer.id).unwrap();

    clock.advance(Duration::minutes(61));
    store.tick();

    // 超时告警不自动清理
    assert_eq!(store.alerts().len(), 1);
    assert_eq!(store.alerts()[0].alert_type, AlertType::TimerOverdue);
}

// ==========================================
// 其他
// ==========================================

#[test]
fn test_domain_error_slots() {
    let (mut store, _clock) = setup();
    store.set_loading(DataDomain::Queue, true);
    store.set_error(DataDomain::Queue, Some("网络错误".to_string()));

    assert!(store.loading().queue);
    assert_eq!(store.errors().queue.as_deref(), Some("网络错误"));
    assert!(store.errors().timers.is_none());

    store.set_error(DataDomain::Queue, None);
    assert!(store.errors().queue.is_none());
}

#[test]
fn test_interval_has_floor() {
    let (mut store, _clock) = setup();
    assert_eq!(store.set_timer_update_interval(10), 100);
    assert_eq!(store.set_timer_update_interval(2500), 2500);
    assert_eq!(store.preferences().timer_update_interval_ms, 2500);
}

#[test]
fn test_stats_reflect_state() {
    let (mut store, clock) = setup();
    store.on_new_order(make_order("a", 3)).unwrap();
    let t1 = store.start_timer("a", 600, 3).unwrap();
    store.start_timer("b", 600, 3).unwrap();

    clock.advance(Duration::seconds(300));
    store.complete_timer(&t1.id).unwrap();

    let stats = store.stats();
    assert_eq!(stats.active_timers, 1);
    assert_eq!(stats.completed_timers, 1);
    assert_eq!(stats.average_cook_secs, Some(300.0));
    assert_eq!(stats.on_time_rate, Some(1.0));
    assert_eq!(stats.queue_length, 1);
}
