/// Reusable UI components

use crate::form::PRESET_COLORS;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldMessageProps {
    pub id: AttrValue,
    pub message: Option<String>,
    #[prop_or_default]
    pub kind: MessageKind,
}

#[derive(PartialEq, Clone, Copy, Default)]
pub enum MessageKind {
    #[default]
    Error,
    Success,
}

/// Message region under a form field; hidden when there is no message
#[function_component(FieldMessage)]
pub fn field_message(props: &FieldMessageProps) -> Html {
    let color = match props.kind {
        MessageKind::Error => "#f44336",
        MessageKind::Success => "#4caf50",
    };
    let display = if props.message.is_some() { "block" } else { "none" };

    html! {
        <div
            id={props.id.clone()}
            class={classes!("field-message", props.message.is_some().then_some("show"))}
            style={format!("display: {}; color: {}; font-size: 13px; margin-top: 4px;", display, color)}
        >
            {props.message.clone().unwrap_or_default()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PresetColorsProps {
    pub on_select: Callback<String>,
}

#[function_component(PresetColors)]
pub fn preset_colors(props: &PresetColorsProps) -> Html {
    html! {
        <div class="preset-colors" style="display: flex; flex-wrap: wrap; gap: 6px; margin-top: 8px;">
            {for PRESET_COLORS.iter().map(|(name, value)| {
                let value = value.to_string();
                let onclick = props.on_select.reform({
                    let value = value.clone();
                    move |_: MouseEvent| value.clone()
                });

                html! {
                    <button
                        type="button"
                        class="preset-color-btn"
                        title={*name}
                        data-color={value.clone()}
                        onclick={onclick}
                        style={format!("width: 28px; height: 28px; border: 1px solid #888; border-radius: 4px; cursor: pointer; background-color: {};", value)}
                    />
                }
            })}
        </div>
    }
}
