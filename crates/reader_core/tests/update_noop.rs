use reader_core::{update_gate, update_loader, AccessGateState, GateMsg, LoaderMsg, LoaderState};

#[test]
fn gate_update_is_noop_for_unprobed_commands() {
    let state = AccessGateState::default();
    for msg in [GateMsg::AuthenticateRequested, GateMsg::ClearErrorRequested] {
        let (next, effects) = update_gate(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}

#[test]
fn loader_completion_never_emits_effects() {
    let state = LoaderState::new("bbc-news");
    let (next, effects) = update_loader(
        state,
        LoaderMsg::LoadFinished {
            request_id: 1,
            result: Ok(Vec::new()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(next.last_request(), 0);
}
