// Sanity checks for the default tuning constants and their relationships.

use swarm_core::constants::*;
use swarm_core::SwarmConfig;

#[test]
#[allow(clippy::assertions_on_constants)]
fn population_bounds_are_ordered() {
    assert!(MIN_COUNT > 0);
    assert!(MIN_COUNT <= INITIAL_COUNT && INITIAL_COUNT <= MAX_COUNT);
    assert!(DENSITY > 0.0);

    // The diagonal of the unit square should not hit the cap
    let diagonal = 2.0 * std::f32::consts::SQRT_2;
    assert!(((diagonal * DENSITY) as usize) < MAX_COUNT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ranges_are_non_empty() {
    assert!(WANDER_FRAMES_MIN > 0 && WANDER_FRAMES_MIN <= WANDER_FRAMES_MAX);
    assert!(WANDER_SPEED_MIN > 0.0 && WANDER_SPEED_MIN <= WANDER_SPEED_MAX);
    assert!(SPAWN_SPEED_MIN > 0.0 && SPAWN_SPEED_MIN <= SPAWN_SPEED_MAX);
    assert!(HOVER_RADIUS_MIN > 0.0 && HOVER_RADIUS_MIN <= HOVER_RADIUS_MAX);
    assert!(HOVER_SPEED_MIN > 0.0 && HOVER_SPEED_MIN <= HOVER_SPEED_MAX);
    assert!(BASE_SIZE_MIN > 0.0 && BASE_SIZE_MIN <= BASE_SIZE_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn probabilities_and_rates_are_fractions() {
    assert!(PULSE_PROBABILITY > 0.0 && PULSE_PROBABILITY < 1.0);
    assert!(PARTICLE_OPACITY > 0.0 && PARTICLE_OPACITY <= 1.0);
    assert!(VIEW_BLEND_RATE > 0.0 && VIEW_BLEND_RATE < 1.0);
    assert!(VIEW_BLEND_SNAP > 0.0 && VIEW_BLEND_SNAP < VIEW_BLEND_RATE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn geometry_stays_inside_the_square() {
    assert!(CLUSTER_RADIUS > 0.0 && CLUSTER_RADIUS < 1.0);
    assert!(HOVER_RADIUS_MAX < CLUSTER_RADIUS);
    assert!(BOUNDARY_MARGIN >= 0.0 && BOUNDARY_MARGIN < 0.5);
    assert!(SHORT_PATH_EPSILON > 0.0 && SHORT_PATH_EPSILON < CLUSTER_RADIUS);
    assert!(WANDER_TURN_MAX > 0.0 && WANDER_TURN_MAX < std::f32::consts::PI);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pulses_are_rare_and_brief() {
    assert!(MAX_PULSE > 0 && MAX_PULSE < MIN_COUNT);
    assert!(PULSE_SIZE_MULTIPLIER > 1.0);
    assert!(PULSE_ANIM_FRAMES > 0 && PULSE_ANIM_FRAMES < PULSE_HOLD_FRAMES);
    assert!(RADIUS_DURATION_FLOOR >= MIN_STROKE_DURATION);
}

#[test]
fn default_config_validates() {
    assert_eq!(SwarmConfig::default().validate(), Ok(()));
}
