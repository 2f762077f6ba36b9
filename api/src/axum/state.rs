use std::sync::Arc;

use ::strategist::Assistant;

pub struct State {
    pub assistant: Assistant,
}

#[allow(clippy::module_name_repetitions)]
pub type AppState = Arc<State>;

pub fn create(assistant: Assistant) -> AppState {
    Arc::new(State { assistant })
}
