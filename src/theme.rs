use crate::signature::escape_html;

/// Typography and neutral colors of the signature and form pages. The accent
/// color is per-signature and lives on [`crate::SignatureData`].
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub font_family: String,
    pub name_color: String,
    pub title_color: String,
    pub text_color: String,
    pub icon_color: String,
    pub background: String,
    pub logo_size: u32,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif".to_string(),
            name_color: "#1f2937".to_string(),
            title_color: "#6b7280".to_string(),
            text_color: "#374151".to_string(),
            icon_color: "#9ca3af".to_string(),
            background: "#ffffff".to_string(),
            logo_size: 80,
        }
    }

    pub fn classic() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            name_color: "#111111".to_string(),
            title_color: "#555555".to_string(),
            text_color: "#222222".to_string(),
            icon_color: "#777777".to_string(),
            background: "#ffffff".to_string(),
            logo_size: 96,
        }
    }

    /// Copy with every string value escaped for an HTML attribute.
    pub fn escaped(&self) -> Self {
        Self {
            font_family: escape_html(&self.font_family),
            name_color: escape_html(&self.name_color),
            title_color: escape_html(&self.title_color),
            text_color: escape_html(&self.text_color),
            icon_color: escape_html(&self.icon_color),
            background: escape_html(&self.background),
            logo_size: self.logo_size,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" | "default" => Some(Self::modern()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
