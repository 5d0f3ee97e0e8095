use crate::form::FormDefaults;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub defaults: FormDefaults,
    pub theme: Theme,
}

impl Config {
    /// Applies `PORT` from the environment when it parses as a port number.
    pub fn apply_env(&mut self) {
        self.apply_port_override(std::env::var("PORT").ok().as_deref());
    }

    fn apply_port_override(&mut self, raw: Option<&str>) {
        if let Some(port) = raw.and_then(|v| v.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    name_color: Option<String>,
    title_color: Option<String>,
    text_color: Option<String>,
    icon_color: Option<String>,
    background: Option<String>,
    logo_size: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    defaults: Option<FormDefaults>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parses a JSON5 config document on top of the built-in defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(host) = parsed.host {
        config.server.host = host;
    }
    if let Some(port) = parsed.port {
        config.server.port = port;
    }

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme '{}'", theme_name))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.name_color {
            config.theme.name_color = v;
        }
        if let Some(v) = vars.title_color {
            config.theme.title_color = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.icon_color {
            config.theme.icon_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.logo_size {
            config.theme.logo_size = v;
        }
    }

    if let Some(defaults) = parsed.defaults {
        config.defaults = defaults;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.address(), "127.0.0.1:3000");
    }

    #[test]
    fn parses_json5_overrides() {
        let config = parse_config(
            r##"{
                // comments are allowed
                host: "0.0.0.0",
                port: 8080,
                theme: "classic",
                themeVariables: { nameColor: "#000000", logoSize: 64 },
                defaults: { name: "Sam", accentHue: 12 },
            }"##,
        )
        .unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.theme.font_family, Theme::classic().font_family);
        assert_eq!(config.theme.name_color, "#000000");
        assert_eq!(config.theme.logo_size, 64);
        assert_eq!(config.defaults.name, "Sam");
        assert_eq!(config.defaults.accent_hue, 12);
        assert_eq!(config.defaults.title, FormDefaults::default().title);
    }

    #[test]
    fn rejects_unknown_theme() {
        assert!(parse_config(r#"{ theme: "neon" }"#).is_err());
    }

    #[test]
    fn port_override_ignores_garbage() {
        let mut config = Config::default();
        config.apply_port_override(Some("not-a-port"));
        assert_eq!(config.server.port, DEFAULT_PORT);
        config.apply_port_override(Some(" 4100 "));
        assert_eq!(config.server.port, 4100);
        config.apply_port_override(None);
        assert_eq!(config.server.port, 4100);
    }
}
