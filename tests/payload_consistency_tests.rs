//! Payload Consistency Tests
//!
//! The rendering payload is the only thing the UI layer ever sees, so it
//! must stay internally consistent with the engine state it was derived
//! from across arbitrary update sequences.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use sampling_explorer::config::EngineConfig;
use sampling_explorer::engine::EngineState;
use sampling_explorer::payload::RenderPayload;
use sampling_explorer::population::Population;

fn setup() -> (EngineState, StdRng) {
    let mut rng = StdRng::seed_from_u64(2024);
    let population = Arc::new(Population::generate_with(&mut rng, 2.0, 1.0, 1000).unwrap());
    let state =
        EngineState::initialize_with(&mut rng, population, EngineConfig::default()).unwrap();
    (state, rng)
}

fn assert_consistent(payload: &RenderPayload, state: &EngineState) {
    assert_eq!(payload.groups.len(), state.groups().len());
    assert_eq!(payload.markers.len(), state.comparisons().len());
    assert_eq!(payload.reference_index, state.reference_index());

    for (bar, group) in payload.groups.iter().zip(state.groups()) {
        assert_eq!(bar.mean, group.mean);
        assert_eq!(bar.sem, group.sem);
        assert_eq!(bar.sample_size, group.size);
    }
    for (marker, comparison) in payload.markers.iter().zip(state.comparisons()) {
        assert_eq!(marker.index, comparison.group_index);
        assert_eq!(marker.tests, comparison.result);
    }
    // The reference group never carries a marker
    assert!(payload.markers.iter().all(|m| m.index != payload.reference_index));
}

#[test]
fn initial_payload_mirrors_initial_state() {
    let (state, _) = setup();
    assert_consistent(&RenderPayload::from_state(&state), &state);
}

#[test]
fn payload_tracks_state_through_a_slider_session() {
    let (mut state, mut rng) = setup();

    for (i, n) in [(0, 50), (2, 10), (4, 30), (1, 2), (3, 100), (4, 5)] {
        state = state.set_group_size_with(&mut rng, i, n).unwrap();
        assert_consistent(&RenderPayload::from_state(&state), &state);
    }
}

#[test]
fn population_mean_in_payload_is_the_exact_population_mean() {
    let (state, _) = setup();
    let payload = RenderPayload::from_state(&state);
    assert_eq!(payload.population_mean, state.population().mean());
    // N(2,1) with 1000 draws: realized mean close to μ
    assert!((payload.population_mean - 2.0).abs() < 0.15);
}

#[test]
fn payload_serializes_for_the_embedding_layer() {
    let (state, _) = setup();
    let json = serde_json::to_value(RenderPayload::from_state(&state)).unwrap();

    assert_eq!(json["groups"].as_array().unwrap().len(), 5);
    assert_eq!(json["markers"].as_array().unwrap().len(), 4);
    assert!(json["groups"][0]["mean"].is_number());
    assert!(json["markers"][0]["tests"]["t_test"]["p_value"].is_number());
    assert!(json["markers"][0]["tests"]["mann_whitney"]["significant"].is_boolean());
}
