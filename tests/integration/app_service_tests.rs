//! Integration tests: AppService → zone / warning / actuation / indicator → ports.

use airpuffer::app::events::AppEvent;
use airpuffer::app::service::AppService;
use airpuffer::config::DeviceConfig;
use airpuffer::control::actuation::ActuationState;
use airpuffer::control::zone::Zone;
use airpuffer::error::Error;

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

const RED: (u8, u8, u8) = (128, 0, 0);
const GREEN: (u8, u8, u8) = (0, 128, 0);
const BLUE: (u8, u8, u8) = (0, 0, 128);
const OFF: (u8, u8, u8) = (0, 0, 0);

fn boot(hw: &mut MockHardware, config: DeviceConfig) -> (AppService, RecordingSink) {
    let mut sink = RecordingSink::new();
    let app = AppService::start(config, 0, hw, &mut sink).expect("start");
    (app, sink)
}

/// Tick every `step_ms` over `(from, to]`, returning the tick times at
/// which a puff was released.
fn run(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    from: u32,
    to: u32,
    step_ms: u32,
) -> Vec<u32> {
    let mut puff_times = Vec::new();
    let mut t = from + step_ms;
    while t <= to {
        let before = sink.puffs();
        app.tick(t, hw, sink);
        if sink.puffs() > before {
            puff_times.push(t);
        }
        t += step_ms;
    }
    puff_times
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn startup_emits_started_and_outputs_are_safe() {
    let mut hw = MockHardware::at(3000);
    let (_app, sink) = boot(&mut hw, DeviceConfig::default());
    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert_eq!(sink.events, vec![AppEvent::Started { armed: true }]);
}

#[test]
fn startup_reads_disarm_switch_position() {
    let mut hw = MockHardware::at(3000);
    hw.switch_level = false;
    let (app, sink) = boot(&mut hw, DeviceConfig::default());
    assert_eq!(sink.events, vec![AppEvent::Started { armed: false }]);
    assert!(!app.build_telemetry().armed);
}

#[test]
fn ranger_boot_failure_halts_startup() {
    let mut hw = MockHardware::at(100);
    hw.boots = false;
    let mut sink = RecordingSink::new();
    let result = AppService::start(DeviceConfig::default(), 0, &mut hw, &mut sink);
    assert!(matches!(result, Err(Error::Init(_))));
    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert!(sink.events.is_empty());
}

// ── Scenario A: repeated NEAR, armed ─────────────────────────

#[test]
fn repeated_near_is_rate_limited_then_exhausts() {
    let mut hw = MockHardware::at(100);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    let puffs = run(&mut app, &mut hw, &mut sink, 0, 100_000, 10);

    assert_eq!(puffs.len(), 15);
    // Lockout is seeded at power-on.
    assert_eq!(puffs[0], 5_000);
    for pair in puffs.windows(2) {
        assert!(pair[1] - pair[0] >= 5_000, "puffs too close: {:?}", pair);
    }
    assert_eq!(hw.valve_openings(), 15);
    assert!(!hw.valve_open());

    let t = app.build_telemetry();
    assert!(t.exhausted);
    assert_eq!(t.puffs_used, 15);
    assert_eq!(t.actuation_state, ActuationState::Exhausted);

    let exhausted_events = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::BudgetExhausted { puffs_used: 15 }))
        .count();
    assert_eq!(exhausted_events, 1);
}

#[test]
fn valve_pulse_lasts_puff_length() {
    let mut hw = MockHardware::at(100);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 5_000, 10);
    assert!(hw.valve_open());
    run(&mut app, &mut hw, &mut sink, 5_000, 5_090, 10);
    assert!(hw.valve_open());
    run(&mut app, &mut hw, &mut sink, 5_090, 5_100, 10);
    assert!(!hw.valve_open());
}

#[test]
fn pulse_completes_even_if_disarmed_mid_puff() {
    let mut hw = MockHardware::at(100);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 5_000, 10);
    assert!(hw.valve_open());
    hw.switch_level = false;
    run(&mut app, &mut hw, &mut sink, 5_000, 5_200, 10);
    assert!(!hw.valve_open());
    assert!(!app.build_telemetry().armed);
}

// ── Scenario B: disarmed ─────────────────────────────────────

#[test]
fn disarmed_never_puffs_and_flashes_green() {
    let mut hw = MockHardware::at(100);
    hw.switch_level = false;
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    let puffs = run(&mut app, &mut hw, &mut sink, 0, 20_000, 10);

    assert!(puffs.is_empty());
    assert_eq!(hw.valve_openings(), 0);
    assert_eq!(app.build_telemetry().puffs_used, 0);

    let leds = hw.led_history();
    assert!(leds.contains(&GREEN));
    assert!(leds.iter().all(|c| *c == GREEN || *c == OFF), "{:?}", leds);

    // The warning tone does not depend on arm state.
    assert!(hw.calls.contains(&ActuatorCall::SetBuzzer(true)));
}

#[test]
fn disarming_does_not_reset_lockout() {
    let mut hw = MockHardware::at(100);
    hw.switch_level = false;
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 20_000, 10);
    hw.switch_level = true;
    let puffs = run(&mut app, &mut hw, &mut sink, 20_000, 20_100, 10);

    // Armed after the 20 ms debounce window, and puffs at once.
    assert_eq!(puffs, vec![20_030]);
    assert!(sink.events.contains(&AppEvent::ArmChanged { armed: true }));
}

#[test]
fn switch_bounce_shorter_than_window_is_ignored() {
    let mut hw = MockHardware::at(3000);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    for t in 1..=200u32 {
        // Toggle every 5 ms.
        hw.switch_level = (t / 5) % 2 == 0;
        app.tick(t, &mut hw, &mut sink);
    }
    assert!(app.build_telemetry().armed);
    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ArmChanged { .. })));
}

// ── Scenario C: MEDIUM only ──────────────────────────────────

#[test]
fn medium_sounds_warning_without_actuation() {
    let mut hw = MockHardware::at(150);
    hw.pot = 200;
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    let puffs = run(&mut app, &mut hw, &mut sink, 0, 20_000, 10);

    assert!(puffs.is_empty());
    assert_eq!(hw.valve_openings(), 0);
    let t = app.build_telemetry();
    assert_eq!(t.zone, Zone::Medium);
    assert_eq!((t.medium_mm, t.near_mm), (200, 100));
    assert!(hw.calls.contains(&ActuatorCall::SetBuzzer(true)));
    assert!(sink.events.contains(&AppEvent::ZoneChanged {
        from: Zone::Far,
        to: Zone::Medium,
        distance_mm: 150,
    }));
}

#[test]
fn warning_tone_runs_for_buzz_duration() {
    let mut hw = MockHardware::at(150);
    hw.pot = 200;
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 100, 10);
    assert!(hw.buzzer_on());

    // Subject leaves; the tone still plays out its full second.
    hw.distance_mm = Some(900);
    run(&mut app, &mut hw, &mut sink, 100, 1_090, 10);
    assert!(hw.buzzer_on());
    run(&mut app, &mut hw, &mut sink, 1_090, 1_100, 10);
    assert!(!hw.buzzer_on());
    run(&mut app, &mut hw, &mut sink, 1_100, 3_000, 10);
    assert!(!hw.buzzer_on());
}

#[test]
fn far_subject_is_silent() {
    let mut hw = MockHardware::at(2000);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());
    run(&mut app, &mut hw, &mut sink, 0, 10_000, 10);
    assert!(!hw.calls.iter().any(|c| matches!(c, ActuatorCall::SetBuzzer(_))));
    assert_eq!(hw.valve_openings(), 0);
}

#[test]
fn pot_change_reclassifies_on_next_tick() {
    let mut hw = MockHardware::at(300);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());
    run(&mut app, &mut hw, &mut sink, 0, 100, 10);
    assert_eq!(hw.range_reads, 1);
    assert_eq!(app.build_telemetry().zone, Zone::Near);

    // Turn the range knob down; the held 300 mm is now only Medium.
    hw.pot = 400;
    app.tick(101, &mut hw, &mut sink);
    let t = app.build_telemetry();
    assert_eq!(hw.range_reads, 1);
    assert_eq!((t.medium_mm, t.near_mm), (400, 200));
    assert_eq!(t.zone, Zone::Medium);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::ZoneChanged {
            from: Zone::Near,
            to: Zone::Medium,
            distance_mm: 300,
        })
    );

    // No hysteresis: one step either side of the near threshold flips it.
    hw.pot = 600;
    app.tick(102, &mut hw, &mut sink);
    assert_eq!(app.build_telemetry().zone, Zone::Near);
    hw.pot = 599;
    app.tick(103, &mut hw, &mut sink);
    assert_eq!(app.build_telemetry().zone, Zone::Medium);
    assert_eq!(hw.range_reads, 1);
}

// ── Scenario D: held distance ────────────────────────────────

#[test]
fn out_of_range_keeps_previous_distance() {
    let mut hw = MockHardware::new();
    hw.push_reading(80);
    hw.push_out_of_range();
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 150, 10);
    let t = app.build_telemetry();
    assert_eq!((t.distance_mm, t.reading_valid, t.zone), (80, true, Zone::Near));

    run(&mut app, &mut hw, &mut sink, 150, 250, 10);
    let t = app.build_telemetry();
    assert_eq!(hw.range_reads, 2);
    assert_eq!((t.distance_mm, t.reading_valid, t.zone), (80, false, Zone::Near));
}

#[test]
fn bus_error_keeps_previous_distance() {
    let mut hw = MockHardware::new();
    hw.push_reading(600);
    hw.push_error();
    hw.push_error();
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 350, 10);
    let t = app.build_telemetry();
    assert_eq!(t.distance_mm, 600);
    assert_eq!(t.zone, Zone::Medium);
}

#[test]
fn no_reading_before_first_sample_means_far() {
    let mut hw = MockHardware::at(50);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());
    run(&mut app, &mut hw, &mut sink, 0, 90, 10);
    let t = app.build_telemetry();
    assert_eq!(t.zone, Zone::Far);
    assert_eq!(t.distance_mm, 5000);
    assert!(!t.reading_valid);
    assert_eq!(hw.range_reads, 0);
}

#[test]
fn ranger_keeps_its_cadence_while_outputs_are_timed() {
    let mut hw = MockHardware::at(100);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());
    run(&mut app, &mut hw, &mut sink, 0, 6_000, 1);
    assert_eq!(hw.range_reads, 60);
}

// ── Indicator ────────────────────────────────────────────────

#[test]
fn armed_flashes_red() {
    let mut hw = MockHardware::at(3000);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());
    run(&mut app, &mut hw, &mut sink, 0, 1_000, 10);
    assert_eq!(hw.led_history(), vec![RED]);
    run(&mut app, &mut hw, &mut sink, 1_000, 1_200, 10);
    assert_eq!(hw.led_history(), vec![RED, OFF]);
}

#[test]
fn exhausted_flashes_blue_only() {
    let config = DeviceConfig {
        max_puffs: 1,
        ..DeviceConfig::default()
    };
    let mut hw = MockHardware::at(100);
    let (mut app, mut sink) = boot(&mut hw, config);

    run(&mut app, &mut hw, &mut sink, 0, 4_990, 10);
    let before = hw.led_history().len();
    run(&mut app, &mut hw, &mut sink, 4_990, 15_000, 10);

    assert_eq!(sink.puffs(), 1);
    let after: Vec<_> = hw.led_history().split_off(before);
    assert!(after.contains(&BLUE));
    assert!(after.iter().all(|c| *c == BLUE || *c == OFF), "{:?}", after);
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn telemetry_tracks_budget() {
    let mut hw = MockHardware::at(100);
    let (mut app, mut sink) = boot(&mut hw, DeviceConfig::default());
    run(&mut app, &mut hw, &mut sink, 0, 15_000, 10);

    let t = app.build_telemetry();
    assert_eq!(t.puffs_used, 3);
    assert_eq!(t.max_puffs, 15);
    assert!(!t.exhausted);
    assert_eq!(t.actuation_state, ActuationState::LockedOut);
    assert_eq!(app.tick_count(), 1_500);
}
