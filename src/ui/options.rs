/// Options page: edit the redirect URL, delay and background color

use crate::form::{
    check_color_field, check_delay_field, check_url_field, stored_warnings, submit, Debounce,
    FormValues, StoredWarning, SubmitError, LOAD_ERROR, SAVE_ERROR, SUCCESS_MESSAGE, SUCCESS_MESSAGE_MS,
    URL_PROBE_DEBOUNCE_MS,
};
use crate::probe::probe_url;
use crate::settings::DEFAULT_BACKGROUND_COLOR;
use crate::storage::{ChromeStore, SettingsStore};
use crate::ui::components::{FieldMessage, MessageKind, PresetColors};
use crate::ui::dom::{self, DomColorEngine};
use crate::validation::{color_to_hex, is_web_url};
use patternfly_yew::prelude::*;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::platform::time::sleep;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum UrlStatus {
    Validating,
    Reachable(&'static str),
}

/// Hex value for the native color picker, via the browser's normalized form
fn picker_value(color: &str) -> Option<String> {
    dom::computed_color(color)
        .and_then(|computed| color_to_hex(&computed))
        .or_else(|| color_to_hex(color))
}

fn input_value<E: TargetCast>(e: &E) -> Option<String> {
    e.target_dyn_into::<HtmlInputElement>().map(|input| input.value())
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let url = use_state(String::new);
    let delay = use_state(|| "0".to_string());
    let color = use_state(|| DEFAULT_BACKGROUND_COLOR.to_string());
    let picker = use_state(|| DEFAULT_BACKGROUND_COLOR.to_string());

    let url_error = use_state(|| None::<String>);
    let delay_error = use_state(|| None::<String>);
    let color_error = use_state(|| None::<String>);
    let url_status = use_state(|| None::<UrlStatus>);
    let success = use_state(|| None::<String>);
    let page_error = use_state(|| None::<String>);

    let probe_debounce = use_mut_ref(Debounce::default);
    let success_debounce = use_mut_ref(Debounce::default);

    // Load settings on mount
    {
        let url = url.clone();
        let delay = delay.clone();
        let color = color.clone();
        let picker = picker.clone();
        let url_error = url_error.clone();
        let delay_error = delay_error.clone();
        let color_error = color_error.clone();
        let page_error = page_error.clone();

        use_effect_with((), move |_| {
            log::info!("[Options] Page initialized, loading settings...");
            spawn_local(async move {
                match ChromeStore.get().await {
                    Ok(stored) => {
                        log::info!("[Options] Loaded settings: {:?}", stored);
                        let values = FormValues::from_stored(&stored);

                        dom::set_body_background(stored.effective_background_color());
                        if let Some(hex) = picker_value(&values.background_color) {
                            picker.set(hex);
                        }
                        url.set(values.url);
                        delay.set(values.redirect_delay);
                        color.set(values.background_color);

                        for warning in stored_warnings(&stored, &DomColorEngine) {
                            let message = Some(warning.message().to_string());
                            match warning {
                                StoredWarning::InvalidUrl => url_error.set(message),
                                StoredWarning::InvalidDelay => delay_error.set(message),
                                StoredWarning::InvalidColor => color_error.set(message),
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("[Options] Error loading settings: {}", e);
                        page_error.set(Some(LOAD_ERROR.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_url_input = {
        let url = url.clone();
        let url_error = url_error.clone();
        let url_status = url_status.clone();
        let probe_debounce = probe_debounce.clone();

        Callback::from(move |e: InputEvent| {
            let Some(value) = input_value(&e) else {
                return;
            };
            url.set(value.clone());
            url_status.set(None);

            let token = probe_debounce.borrow().next();

            if let Some(message) = check_url_field(&value) {
                url_error.set(Some(message));
                return;
            }
            url_error.set(None);

            if !is_web_url(&value) {
                return;
            }

            let url_error = url_error.clone();
            let url_status = url_status.clone();
            let probe_debounce = probe_debounce.clone();
            spawn_local(async move {
                sleep(Duration::from_millis(URL_PROBE_DEBOUNCE_MS)).await;
                if !probe_debounce.borrow().is_current(token) {
                    return;
                }

                url_status.set(Some(UrlStatus::Validating));
                let outcome = probe_url(&value).await;
                if !probe_debounce.borrow().is_current(token) {
                    return;
                }

                match outcome.warning() {
                    Some(warning) => {
                        url_status.set(None);
                        url_error.set(Some(warning.to_string()));
                    }
                    None => url_status.set(outcome.status().map(UrlStatus::Reachable)),
                }
            });
        })
    };

    // Leaves probe warnings in place when the format itself is fine
    let on_url_blur = {
        let url_error = url_error.clone();

        Callback::from(move |e: FocusEvent| {
            if let Some(message) = input_value(&e).and_then(|value| check_url_field(&value)) {
                url_error.set(Some(message));
            }
        })
    };

    let on_delay_blur = {
        let delay_error = delay_error.clone();

        Callback::from(move |e: FocusEvent| {
            if let Some(value) = input_value(&e) {
                delay_error.set(check_delay_field(&value));
            }
        })
    };

    let on_color_blur = {
        let color_error = color_error.clone();

        Callback::from(move |e: FocusEvent| {
            if let Some(value) = input_value(&e) {
                color_error.set(check_color_field(&value, &DomColorEngine));
            }
        })
    };

    let on_delay_input = {
        let delay = delay.clone();
        let delay_error = delay_error.clone();

        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                delay_error.set(check_delay_field(&value));
                delay.set(value);
            }
        })
    };

    let on_color_input = {
        let color = color.clone();
        let picker = picker.clone();
        let color_error = color_error.clone();

        Callback::from(move |e: InputEvent| {
            let Some(value) = input_value(&e) else {
                return;
            };
            color.set(value.clone());

            if value.trim().is_empty() {
                color_error.set(None);
                return;
            }

            match check_color_field(&value, &DomColorEngine) {
                Some(message) => color_error.set(Some(message)),
                None => {
                    color_error.set(None);
                    if let Some(hex) = picker_value(&value) {
                        picker.set(hex);
                    }
                    dom::set_body_background(&value);
                }
            }
        })
    };

    let on_picker_input = {
        let color = color.clone();
        let picker = picker.clone();
        let color_error = color_error.clone();

        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e).filter(|v| !v.is_empty()) {
                color_error.set(None);
                dom::set_body_background(&value);
                picker.set(value.clone());
                color.set(value);
            }
        })
    };

    let on_preset = {
        let color = color.clone();
        let picker = picker.clone();
        let color_error = color_error.clone();

        Callback::from(move |value: String| {
            log::info!("[Options] Preset color selected: {}", value);
            color_error.set(None);
            dom::set_body_background(&value);
            picker.set(color_to_hex(&value).unwrap_or_else(|| value.clone()));
            color.set(value);
        })
    };

    let on_submit = {
        let url = url.clone();
        let delay = delay.clone();
        let color = color.clone();
        let url_error = url_error.clone();
        let delay_error = delay_error.clone();
        let color_error = color_error.clone();
        let success = success.clone();
        let success_debounce = success_debounce.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            success.set(None);
            url_error.set(None);
            delay_error.set(None);
            color_error.set(None);

            let values = FormValues {
                url: (*url).clone(),
                redirect_delay: (*delay).clone(),
                background_color: (*color).clone(),
            };

            let url_error = url_error.clone();
            let delay_error = delay_error.clone();
            let color_error = color_error.clone();
            let success = success.clone();
            let success_debounce = success_debounce.clone();
            spawn_local(async move {
                match submit(&ChromeStore, &values, &DomColorEngine).await {
                    Ok(_) => {
                        success.set(Some(SUCCESS_MESSAGE.to_string()));
                        let token = success_debounce.borrow().next();
                        sleep(Duration::from_millis(SUCCESS_MESSAGE_MS)).await;
                        if success_debounce.borrow().is_current(token) {
                            success.set(None);
                        }
                    }
                    Err(SubmitError::Invalid(errors)) => {
                        url_error.set(errors.url);
                        delay_error.set(errors.redirect_delay);
                        color_error.set(errors.background_color);
                    }
                    Err(SubmitError::Storage(_)) => {
                        url_error.set(Some(SAVE_ERROR.to_string()));
                    }
                }
            });
        })
    };

    html! {
        <div class="options padding-20">
            <h1 class="options-title">{"New Tab Redirect"}</h1>

            if let Some(error) = (*page_error).clone() {
                <Alert r#type={AlertType::Danger} title={error} inline={true}>
                </Alert>
            }

            <form id="options-form" class="pf-v5-c-form" onsubmit={on_submit}>
                <div class="pf-v5-c-form__group">
                    <label class="pf-v5-c-form__label" for="url-input">{"Redirect URL"}</label>
                    <input
                        id="url-input"
                        class="pf-v5-c-form-control"
                        type="text"
                        placeholder="https://example.com"
                        value={(*url).clone()}
                        oninput={on_url_input}
                        onblur={on_url_blur}
                    />
                    <div id="url-validation-message" class="url-validation-message">
                        {match &*url_status {
                            Some(UrlStatus::Validating) => html! {
                                <span class="validating">{"validating url..."}</span>
                            },
                            Some(UrlStatus::Reachable(message)) => html! {
                                <span class="success">{*message}</span>
                            },
                            None => html! {},
                        }}
                    </div>
                    <FieldMessage id="url-error" message={(*url_error).clone()} />
                </div>

                <div class="pf-v5-c-form__group">
                    <label class="pf-v5-c-form__label" for="redirect-delay-input">{"Redirect delay (ms)"}</label>
                    <input
                        id="redirect-delay-input"
                        class="pf-v5-c-form-control"
                        type="number"
                        min="0"
                        max="60000"
                        step="100"
                        value={(*delay).clone()}
                        oninput={on_delay_input}
                        onblur={on_delay_blur}
                    />
                    <FieldMessage id="redirect-delay-error" message={(*delay_error).clone()} />
                </div>

                <div class="pf-v5-c-form__group">
                    <label class="pf-v5-c-form__label" for="background-color-input">{"Background color"}</label>
                    <div class="color-row" style="display: flex; gap: 8px; align-items: center;">
                        <input
                            id="color-picker"
                            type="color"
                            value={(*picker).clone()}
                            oninput={on_picker_input}
                        />
                        <input
                            id="background-color-input"
                            class="pf-v5-c-form-control"
                            type="text"
                            placeholder="#05060a"
                            value={(*color).clone()}
                            oninput={on_color_input}
                            onblur={on_color_blur}
                        />
                    </div>
                    <PresetColors on_select={on_preset} />
                    <FieldMessage id="background-color-error" message={(*color_error).clone()} />
                </div>

                <button type="submit" class="pf-v5-c-button pf-m-primary">{"Save"}</button>
                <FieldMessage id="save-success" message={(*success).clone()} kind={MessageKind::Success} />
            </form>

            <p id="version-footer" class="footer-options">
                {format!("Version: {}", env!("CARGO_PKG_VERSION"))}
            </p>
        </div>
    }
}
