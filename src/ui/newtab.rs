/// New tab page: applies the background and redirects to the configured URL

use crate::redirect::{run_redirect, RedirectSurface};
use crate::storage::ChromeStore;
use crate::ui::dom;
use patternfly_yew::prelude::*;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Drives the redirect logic against this page's state handles
struct PageSurface {
    loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
}

impl RedirectSurface for PageSurface {
    fn apply_background(&self, color: &str) {
        dom::set_body_background(color);
    }

    fn set_loading_visible(&self, visible: bool) {
        self.loading.set(visible);
    }

    fn show_error(&self, message: &str) {
        self.loading.set(false);
        self.error.set(Some(message.to_string()));
    }

    fn navigate(&self, url: &str) {
        dom::navigate_to(url);
    }

    async fn sleep(&self, delay: Duration) {
        yew::platform::time::sleep(delay).await;
    }
}

#[function_component(NewTabPage)]
pub fn new_tab_page() -> Html {
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let surface = PageSurface {
            loading: loading.clone(),
            error: error.clone(),
        };

        use_effect_with((), move |_| {
            log::info!("[NewTab] Page initialized");
            spawn_local(async move {
                let phase = run_redirect(&ChromeStore, &surface).await;
                log::info!("[NewTab] Finished in phase {:?}", phase);
            });
            || ()
        });
    }

    html! {
        <div class="newtab">
            <div
                id="loading"
                class="loading"
                style={if *loading { "display: flex; justify-content: center; align-items: center; height: 100vh;" } else { "display: none;" }}
            >
                <Spinner />
            </div>

            if let Some(message) = (*error).clone() {
                <div id="error-message" class="error-message show">
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {message}
                    </Alert>
                </div>
            }
        </div>
    }
}
