use yew::prelude::*;
use std::future::Future;
use std::rc::Rc;
use crate::hooks::FetchState;

/// Runs `fetch_fn` once on mount. Unlike a user-facing fetch, a failure here is
/// only logged: callers fall back to built-in defaults.
#[hook]
pub fn use_fetch_once<T, E, F, Fut>(fetch_fn: F) -> UseStateHandle<FetchState<T>>
where
    T: 'static,
    E: std::fmt::Display + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let fetch_fn = use_state(|| Rc::new(fetch_fn));

    {
        let fetch_state = fetch_state.clone();
        let fetch_fn = fetch_fn.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match (*fetch_fn)().await {
                    Ok(data) => fetch_state.set(FetchState::Success(data)),
                    Err(err) => {
                        log::warn!("Fetch failed: {}", err);
                        fetch_state.set(FetchState::Error(err.to_string()));
                    }
                }
            });
            || ()
        });
    }

    fetch_state
}
