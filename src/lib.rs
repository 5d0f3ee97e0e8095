#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod form;
pub mod input;
#[cfg(feature = "server")]
pub mod server;
pub mod signature;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use color::{
    AccentPalette, DEFAULT_ACCENT_COLOR, Rgb, hex_to_rgb, hex_to_rgba, hsl_to_hex, mix_hex_colors,
    normalize_hex_color, rgb_to_hex, shade_hex_color,
};
pub use config::{Config, ServerConfig, load_config, parse_config};
pub use error::SignatureError;
pub use form::{FormDefaults, render_form_page};
pub use input::{parse_form, validate_required};
pub use signature::{
    ContactRow, SignatureData, contact_rows, escape_html, generate_signature_html,
    render_signature,
};
pub use theme::Theme;
