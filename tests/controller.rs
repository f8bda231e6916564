use carousel::{CarouselConfig, Controller, Playback, TransitionEvent, Trigger};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: f32 = 1000.0;

fn mount(slides: usize, config: CarouselConfig) -> Controller {
    Controller::mount(slides, &config, WIDTH, 0)
}

fn looping() -> CarouselConfig {
    CarouselConfig::default()
}

fn non_looping() -> CarouselConfig {
    CarouselConfig { looping: false, ..Default::default() }
}

fn events(controller: &mut Controller) -> Vec<(usize, usize, Trigger)> {
    controller
        .drain_events()
        .map(|e| (e.from_index, e.to_index, e.trigger))
        .collect()
}

#[test]
fn hover_pause_resumes_with_a_full_interval() {
    let mut carousel = mount(3, looping());

    carousel.tick(4499);
    assert_eq!(carousel.current_index(), 0);
    carousel.tick(4500);
    assert_eq!(carousel.current_index(), 1);

    carousel.on_hover_change(true, 4500);
    assert_eq!(carousel.playback(), Playback::Paused);
    carousel.tick(6500);
    assert_eq!(carousel.current_index(), 1);

    carousel.on_hover_change(false, 6500);
    assert_eq!(carousel.playback(), Playback::Playing);
    // The remainder of the old interval would have fired at 9000.
    carousel.tick(9000);
    carousel.tick(10_999);
    assert_eq!(carousel.current_index(), 1);
    carousel.tick(11_000);
    assert_eq!(carousel.current_index(), 2);

    assert_eq!(
        events(&mut carousel),
        vec![(0, 1, Trigger::Autoplay), (1, 2, Trigger::Autoplay)]
    );
}

#[test]
fn no_autoplay_while_hovered() {
    let mut carousel = mount(3, looping());
    carousel.on_hover_change(true, 0);
    for t in (0..=60_000).step_by(100) {
        carousel.tick(t);
    }
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.drain_events().count(), 0);

    let state = carousel.state();
    assert!(state.is_hovered);
    assert!(!state.is_autoplay_active);
}

#[test]
fn hover_is_ignored_without_pause_on_hover() {
    let mut carousel = mount(3, CarouselConfig { pause_on_hover: false, ..Default::default() });
    carousel.on_hover_change(true, 0);
    assert!(carousel.state().is_autoplay_active);
    carousel.tick(4500);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn autoplay_wraps_from_the_last_slide() {
    let mut carousel = mount(3, looping());
    for t in [4500, 9000, 13_500] {
        carousel.tick(t);
    }
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(events(&mut carousel).last(), Some(&(2, 0, Trigger::Autoplay)));
}

#[test]
fn next_at_the_end_without_looping_is_a_no_op() {
    let mut carousel = mount(3, non_looping());
    carousel.goto(2, 0);
    events(&mut carousel);

    assert_eq!(carousel.next(1000), None);
    assert_eq!(carousel.current_index(), 2);
    assert_eq!(carousel.drain_events().count(), 0);

    assert_eq!(carousel.prev(2000).map(|e| e.to_index), Some(1));
}

#[test]
fn prev_at_the_start_without_looping_is_a_no_op() {
    let mut carousel = mount(3, non_looping());
    assert_eq!(carousel.prev(0), None);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn next_then_prev_returns_to_the_original_slide() {
    for start in 0..3 {
        let mut carousel = mount(3, looping());
        carousel.goto(start, 0);
        carousel.next(1000);
        carousel.prev(2000);
        assert_eq!(carousel.current_index(), start);
    }
}

#[test]
fn goto_current_slide_emits_nothing() {
    let mut carousel = mount(3, looping());
    carousel.goto(1, 0);
    events(&mut carousel);
    assert_eq!(carousel.goto(1, 1000), None);
    assert_eq!(carousel.drain_events().count(), 0);
}

#[test]
fn goto_out_of_range_is_ignored() {
    let mut carousel = mount(3, looping());
    assert_eq!(carousel.goto(7, 0), None);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn goto_wraps_the_short_way_round() {
    let mut carousel = mount(3, looping());
    carousel.goto(2, 0);
    carousel.tick(1000);

    let event = carousel.goto(0, 1000).unwrap();
    assert_eq!(event, TransitionEvent { from_index: 2, to_index: 0, trigger: Trigger::ManualGoto });
    carousel.tick(1050);
    let offset = carousel.engine().unwrap().offset();
    assert!(offset > 2.0 && offset < 3.0, "expected forward rotation, offset {}", offset);
}

#[test]
fn manual_navigation_during_a_transition_is_ignored() {
    let mut carousel = mount(4, looping());
    assert!(carousel.next(0).is_some());
    assert!(carousel.is_transition_in_flight(100));
    assert_eq!(carousel.next(100), None);
    assert_eq!(carousel.goto(3, 200), None);
    assert_eq!(carousel.current_index(), 1);

    assert!(carousel.next(500).is_some());
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn manual_navigation_restarts_the_autoplay_interval() {
    let mut carousel = mount(3, looping());
    carousel.tick(4000);
    carousel.next(4000);
    carousel.tick(4500);
    carousel.tick(8499);
    assert_eq!(carousel.current_index(), 1);
    carousel.tick(8500);
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn progress_freezes_while_paused_and_restarts_on_resume() {
    let mut carousel = mount(3, looping());
    assert_eq!(carousel.progress_fraction(2250), 0.5);

    carousel.on_hover_change(true, 2250);
    assert_eq!(carousel.progress_fraction(9000), 0.5);

    carousel.on_hover_change(false, 9000);
    assert_eq!(carousel.progress_fraction(9000), 0.0);
    assert_eq!(carousel.progress_fraction(11_250), 0.5);
}

#[test]
fn firing_after_teardown_is_a_no_op() {
    let mut carousel = mount(3, looping());
    let token = carousel.pending_timer().unwrap();
    carousel.teardown();

    carousel.on_timer_fired(token, 4500);
    carousel.tick(100_000);
    assert_eq!(carousel.next(200_000), None);
    assert_eq!(carousel.current_index(), 0);
    assert!(carousel.pending_timer().is_none());
    assert!(!carousel.state().is_autoplay_active);
}

#[test]
fn stale_firing_after_restart_is_ignored() {
    let mut carousel = mount(3, looping());
    let stale = carousel.pending_timer().unwrap();
    carousel.next(100);
    events(&mut carousel);

    carousel.on_timer_fired(stale, 4500);
    assert_eq!(carousel.drain_events().count(), 0);

    let current = carousel.pending_timer().unwrap();
    carousel.on_timer_fired(current, 4600);
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn unmeasurable_layout_is_retried_once() {
    let mut carousel = Controller::mount(3, &looping(), 0.0, 0);
    assert!(!carousel.is_ready());
    assert!(!carousel.state().is_autoplay_active);
    assert_eq!(carousel.next(0), None);

    carousel.layout(WIDTH, 16);
    assert!(carousel.is_ready());
    carousel.tick(4515);
    assert_eq!(carousel.current_index(), 0);
    carousel.tick(4516);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn persistent_layout_failure_degrades_to_a_static_slide() {
    let mut carousel = Controller::mount(3, &looping(), 0.0, 0);
    carousel.layout(-1.0, 16);
    carousel.layout(WIDTH, 32);
    assert!(!carousel.is_ready());
    carousel.tick(60_000);
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.drain_events().count(), 0);
}

#[test]
fn empty_carousel_is_inert() {
    let mut carousel = mount(0, looping());
    assert!(!carousel.is_ready());
    assert_eq!(carousel.next(0), None);
    assert_eq!(carousel.goto(0, 0), None);
    carousel.tick(60_000);
    assert_eq!(carousel.current_index(), 0);
    assert!(!carousel.state().is_autoplay_active);
}

#[test]
fn invalid_interval_falls_back_to_the_default() {
    let mut carousel = mount(3, CarouselConfig { autoplay_interval_ms: 0, ..Default::default() });
    assert_eq!(carousel.config().autoplay_interval_ms, 4500);
    carousel.tick(4500);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn drag_release_commits_a_drag_transition() {
    let mut carousel = mount(3, looping());
    carousel.pointer_down(800.0, 1000);
    carousel.pointer_move(500.0);
    let event = carousel.pointer_up(200.0, 1100).unwrap();
    assert_eq!(event, TransitionEvent { from_index: 0, to_index: 1, trigger: Trigger::Drag });

    // Releasing restarted the interval.
    carousel.tick(4500);
    assert_eq!(carousel.current_index(), 1);
    carousel.tick(5600);
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn drag_is_ignored_when_disabled() {
    let mut carousel = mount(3, CarouselConfig { draggable: false, ..Default::default() });
    carousel.pointer_down(800.0, 0);
    assert_eq!(carousel.pointer_up(100.0, 50), None);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn random_interaction_keeps_state_consistent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..40 {
        let slides = rng.random_range(1..6);
        let config = CarouselConfig {
            autoplay_interval_ms: rng.random_range(200..3000),
            looping: rng.random_bool(0.5),
            pause_on_hover: rng.random_bool(0.5),
            ..Default::default()
        };
        let pause_on_hover = config.pause_on_hover;
        let mut carousel = mount(slides, config);
        let mut now = 0;
        let mut index = 0;

        for _ in 0..500 {
            now += rng.random_range(0..400);
            match rng.random_range(0..7) {
                0 => {
                    let _ = carousel.next(now);
                }
                1 => {
                    let _ = carousel.prev(now);
                }
                2 => {
                    let _ = carousel.goto(rng.random_range(0..slides + 1), now);
                }
                3 => carousel.on_hover_change(rng.random_bool(0.5), now),
                4 => {
                    carousel.pointer_down(rng.random_range(0.0..WIDTH), now);
                    carousel.pointer_move(rng.random_range(-WIDTH..2.0 * WIDTH));
                    let _ = carousel.pointer_up(rng.random_range(-WIDTH..2.0 * WIDTH), now);
                }
                _ => carousel.tick(now),
            }

            let state = carousel.state();
            assert!(state.current_index < slides, "round {}: index out of bounds", round);
            assert_eq!(state.is_autoplay_active, !state.is_hovered || !pause_on_hover);

            for event in carousel.drain_events() {
                assert_eq!(event.from_index, index, "round {}: events out of order", round);
                assert_ne!(event.from_index, event.to_index);
                index = event.to_index;
            }
            assert_eq!(index, state.current_index);
        }
    }
}

#[test]
fn autoplay_holds_while_the_strip_is_grabbed() {
    let mut carousel = mount(3, looping());
    carousel.pointer_down(500.0, 4000);
    carousel.tick(4500);
    carousel.tick(8000);
    assert_eq!(carousel.current_index(), 0);

    assert_eq!(carousel.pointer_up(500.0, 8000), None);
    carousel.tick(12_499);
    assert_eq!(carousel.current_index(), 0);
    carousel.tick(12_500);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn host_scheduled_timer_drives_autoplay_without_ticks() {
    let mut carousel = mount(3, looping());
    for (step, now) in [4500, 9000, 13_500].into_iter().enumerate() {
        let token = carousel.pending_timer().unwrap();
        carousel.on_timer_fired(token, now);
        assert_eq!(carousel.current_index(), (step + 1) % 3);
        assert_ne!(carousel.pending_timer(), Some(token));
    }

    carousel.on_hover_change(true, 14_000);
    assert_eq!(carousel.pending_timer(), None);
    carousel.on_hover_change(false, 15_000);
    let resumed = carousel.pending_timer().unwrap();
    carousel.on_timer_fired(resumed, 19_500);
    assert_eq!(carousel.current_index(), 1);
}
