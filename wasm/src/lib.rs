use serde::Deserialize;
use signature_rs::{AccentPalette, SignatureData, Theme, render_signature};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
}

fn build_theme(options: SignatureRenderOptions) -> Result<Theme, String> {
    let mut theme = match options.theme.as_deref() {
        Some(name) => Theme::by_name(name).ok_or_else(|| format!("unknown theme '{name}'"))?,
        None => Theme::default(),
    };

    if let Some(font_family) = options.font_family {
        theme.font_family = font_family;
    }

    Ok(theme)
}

fn render(record_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let data: SignatureData =
        serde_json::from_str(record_json).map_err(|error| error.to_string())?;
    let options = match options_json {
        Some(raw) => serde_json::from_str::<SignatureRenderOptions>(raw)
            .map_err(|error| error.to_string())?,
        None => SignatureRenderOptions::default(),
    };
    Ok(render_signature(&data, &build_theme(options)?))
}

/// Renders a signature from a camelCase JSON record such as
/// `{"name": "...", "title": "...", "email": "...", "logoUrl": "..."}`.
#[wasm_bindgen]
pub fn render_signature_html(
    record_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    render(record_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

/// Accent color the form slider produces for `hue`.
#[wasm_bindgen]
pub fn accent_from_hue(hue: f64) -> String {
    AccentPalette::from_hue(hue).accent
}
