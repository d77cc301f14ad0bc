//! Reducer flows through EffectStoreTestHarness, with effects executed
//! against the mock API.

mod common;

use std::sync::Arc;

use pokedex::{
    action::Action,
    api::{HttpPokemonApi, PokemonApi},
    components::{Component, ListScreen, ListScreenProps},
    effect::{self, Effect},
    list::ListPhase,
    reducer::reducer,
    state::{AppState, Screen},
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

/// Execute every pending effect and feed the resulting actions back in.
macro_rules! settle {
    ($harness:expr, $api:expr) => {
        loop {
            let effects = $harness.drain_effects();
            if effects.is_empty() {
                break;
            }
            for effect in effects {
                let action = effect::perform(Arc::clone($api), effect).await;
                $harness.complete_action(action);
            }
            $harness.process_emitted();
        }
    };
}

async fn setup(names: &[&str]) -> (common::MockServer, Arc<dyn PokemonApi>) {
    let server = common::spawn_server().await;
    server.api.seed(names);
    let api: Arc<dyn PokemonApi> = Arc::new(HttpPokemonApi::new(&server.url));
    (server, api)
}

#[test]
fn test_search_emits_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchRun("pika".into()));
    harness.assert_state(|s| s.list.phase() == ListPhase::Loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchList { generation: 1, query } if query.search.as_deref() == Some("pika"))
    });
}

#[test]
fn test_stale_result_does_not_land() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::SearchRun("a".into()));
    harness.dispatch_collect(Action::SearchRun("b".into()));
    harness.drain_effects();

    harness.complete_action(Action::ListDidError {
        generation: 1,
        error: "late".into(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (0, 1));
    harness.assert_state(|s| s.list.loading && s.list.error.is_none());
}

#[test]
fn test_keyboard_search_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = ListScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/", |state, event| {
        let props = ListScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::SearchStart);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.search.active);

    let actions = harness.send_keys::<NumericComponentId, _, _>("q", |state, event| {
        let props = ListScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    // 'q' is text while the search bar has focus
    actions.assert_first(Action::SearchInput('q'));
}

#[tokio::test]
async fn test_search_and_open_detail_against_api() {
    let (_server, api) = setup(&["pikachu", "raichu", "pichu"]).await;
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchRun("chu".into()));
    settle!(harness, &api);
    harness.assert_state(|s| s.list.pokemons.len() == 3 && !s.list.loading);

    harness.dispatch_collect(Action::ListSelect(1));
    harness.dispatch_collect(Action::ListOpenSelected);
    settle!(harness, &api);
    harness.assert_state(|s| s.screen == Screen::Detail);
    harness.assert_state(|s| s.detail.data().map(|p| p.name.as_str()) == Some("raichu"));
}

#[tokio::test]
async fn test_create_conflict_then_success() {
    let (server, api) = setup(&["pikachu"]).await;
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::FormOpenCreate);
    for ch in "Pikachu".chars() {
        harness.dispatch_collect(Action::FormInput(ch));
    }
    harness.dispatch_collect(Action::FormFocusNext);
    for ch in "25".chars() {
        harness.dispatch_collect(Action::FormInput(ch));
    }
    harness.dispatch_collect(Action::FormFocusNext);
    for ch in "electric".chars() {
        harness.dispatch_collect(Action::FormInput(ch));
    }
    harness.dispatch_collect(Action::FormAddType);
    harness.dispatch_collect(Action::FormFocusNext);
    for ch in "static".chars() {
        harness.dispatch_collect(Action::FormInput(ch));
    }

    harness.dispatch_collect(Action::FormSubmit);
    harness.assert_state(|s| s.create.loading);
    settle!(harness, &api);
    harness.assert_state(|s| s.screen == Screen::Form);
    harness.assert_state(|s| s.create.error() == Some("This Pokémon already exists"));
    harness.assert_state(|s| !s.create.loading);

    // Rename and resubmit
    harness.dispatch_collect(Action::FormFocusPrev);
    harness.dispatch_collect(Action::FormFocusPrev);
    harness.dispatch_collect(Action::FormFocusPrev);
    harness.dispatch_collect(Action::FormInput('2'));
    harness.dispatch_collect(Action::FormSubmit);
    settle!(harness, &api);

    harness.assert_state(|s| s.screen == Screen::Detail);
    harness.assert_state(|s| s.detail.data().map(|p| p.name.as_str()) == Some("pikachu2"));
    assert_eq!(server.api.count(), 2);
}

#[tokio::test]
async fn test_edit_updates_list_copy() {
    let (_server, api) = setup(&["eevee"]).await;
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchRun(String::new()));
    settle!(harness, &api);
    harness.dispatch_collect(Action::ListOpenSelected);
    settle!(harness, &api);

    harness.dispatch_collect(Action::FormOpenEdit);
    harness.dispatch_collect(Action::FormFocusPrev);
    for _ in 0.."run-away".len() {
        harness.dispatch_collect(Action::FormBackspace);
    }
    for ch in "adaptability".chars() {
        harness.dispatch_collect(Action::FormInput(ch));
    }
    harness.dispatch_collect(Action::FormSubmit);
    settle!(harness, &api);

    harness.assert_state(|s| s.screen == Screen::Detail);
    harness.assert_state(|s| s.list.pokemons[0].ability == "adaptability");
    harness.assert_state(|s| s.detail.data().map(|p| p.ability.as_str()) == Some("adaptability"));
}

#[tokio::test]
async fn test_delete_refreshes_list() {
    let (server, api) = setup(&["ditto", "mew"]).await;
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchRun(String::new()));
    settle!(harness, &api);
    harness.dispatch_collect(Action::ListOpenSelected);
    settle!(harness, &api);

    harness.dispatch_collect(Action::DeleteRequest);
    harness.dispatch_collect(Action::DeleteConfirm);
    settle!(harness, &api);

    harness.assert_state(|s| s.screen == Screen::List);
    harness.assert_state(|s| s.list.pokemons.len() == 1 && s.list.pokemons[0].name == "mew");
    assert_eq!(server.api.count(), 1);
}

#[tokio::test]
async fn test_open_missing_detail() {
    let (_server, api) = setup(&[]).await;
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::DetailOpen("999".into()));
    settle!(harness, &api);
    harness.assert_state(|s| s.detail.error() == Some("Pokémon not found"));
}
