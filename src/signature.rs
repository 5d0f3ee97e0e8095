use crate::color::AccentPalette;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

const TABLE_ATTRS: &str = "role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\"";
const TABLE_RESET: &str = "border-collapse:collapse; mso-table-lspace:0pt; mso-table-rspace:0pt;";

/// Contact details a signature is rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureData {
    pub name: String,
    pub title: String,
    pub email: String,
    pub logo_url: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub accent_color: Option<String>,
}

impl SignatureData {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
        logo_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            email: email.into(),
            logo_url: logo_url.into(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_linkedin_url(mut self, url: impl Into<String>) -> Self {
        self.linkedin_url = Some(url.into());
        self
    }

    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    /// Required fields that are empty, by their form key.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("title", &self.title),
            ("email", &self.email),
            ("logoUrl", &self.logo_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}

/// One linked line of the contact block. Values are already HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRow {
    Email(String),
    Phone(String),
    Website(String),
    LinkedIn(String),
}

impl ContactRow {
    pub fn href(&self) -> String {
        match self {
            ContactRow::Email(email) => format!("mailto:{email}"),
            ContactRow::Phone(phone) => {
                let dialable: String = phone
                    .chars()
                    .filter(|ch| ch.is_ascii_digit() || *ch == '+')
                    .collect();
                format!("tel:{dialable}")
            }
            ContactRow::Website(site) => {
                if site.starts_with("http://") || site.starts_with("https://") {
                    site.clone()
                } else {
                    format!("https://{site}")
                }
            }
            ContactRow::LinkedIn(url) => url.clone(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ContactRow::Email(text) | ContactRow::Phone(text) | ContactRow::Website(text) => text,
            ContactRow::LinkedIn(_) => "LinkedIn Profile",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ContactRow::Email(_) => "📧",
            ContactRow::Phone(_) => "📞",
            ContactRow::Website(_) => "🌐",
            ContactRow::LinkedIn(_) => "💼",
        }
    }

    /// Profile links sit in their own block below the contact lines.
    pub fn is_profile(&self) -> bool {
        matches!(self, ContactRow::LinkedIn(_))
    }
}

/// Rows present in `data`, in display order. Presence is judged on the raw value.
pub fn contact_rows(data: &SignatureData) -> Vec<ContactRow> {
    let present = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(escape_html)
    };
    let mut rows = vec![ContactRow::Email(escape_html(&data.email))];
    rows.extend(present(&data.phone).map(ContactRow::Phone));
    rows.extend(present(&data.website).map(ContactRow::Website));
    rows.extend(present(&data.linkedin_url).map(ContactRow::LinkedIn));
    rows
}

pub fn generate_signature_html(data: &SignatureData) -> String {
    render_signature(data, &Theme::default())
}

pub fn render_signature(data: &SignatureData, theme: &Theme) -> String {
    let theme = &theme.escaped();
    let name = escape_html(&data.name);
    let title = escape_html(&data.title);
    let logo_url = escape_html(&data.logo_url);
    let palette = AccentPalette::from_accent(data.accent_color.as_deref());
    let rows = contact_rows(data);
    let font = &theme.font_family;
    let logo = theme.logo_size;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n  <head>\n");
    html.push_str("    <meta http=\"x-ua-compatible\" content=\"ie=edge\" />\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    html.push_str("    <meta charset=\"utf-8\" />\n");
    html.push_str("    <title>Email Signature</title>\n  </head>\n");
    html.push_str(&format!(
        "  <body style=\"margin:0; padding:0; background-color:{};\">\n",
        theme.background
    ));
    html.push_str(&format!(
        "    <table {TABLE_ATTRS} style=\"{TABLE_RESET} font-family:{font}; width:100%;\">\n      <tr>\n        <td style=\"padding:16px;\">\n"
    ));
    html.push_str(&format!(
        "          <table {TABLE_ATTRS} style=\"{TABLE_RESET} font-family:{font}; width:100%; max-width:600px;\">\n            <tr>\n"
    ));
    html.push_str(&format!(
        "              <td valign=\"middle\" style=\"padding:0 20px 0 0;\">\n                <img src=\"{logo_url}\" alt=\"Company Logo\" width=\"{logo}\" height=\"{logo}\" style=\"display:block; width:{logo}px; height:{logo}px; border:0; outline:none; text-decoration:none; border-radius:8px; box-shadow:0 2px 8px rgba(0,0,0,0.1);\" />\n              </td>\n"
    ));
    html.push_str(&format!(
        "              <td style=\"width:1px; background:linear-gradient(135deg, {} 0%, {} 100%); line-height:1px; font-size:1px;\">&nbsp;</td>\n",
        palette.gradient_from, palette.gradient_to
    ));
    html.push_str(&format!(
        "              <td valign=\"top\" style=\"padding:0 0 0 20px; font-family:{font};\">\n                <table {TABLE_ATTRS} style=\"{TABLE_RESET} font-family:{font};\">\n"
    ));
    html.push_str(&format!(
        "                  <tr>\n                    <td style=\"font-family:{font}; color:{}; font-size:18px; line-height:24px; font-weight:700; letter-spacing:-0.025em;\">\n                      {name}\n                    </td>\n                  </tr>\n",
        theme.name_color
    ));
    html.push_str(&format!(
        "                  <tr>\n                    <td style=\"font-family:{font}; color:{}; font-size:14px; line-height:20px; padding-top:4px; font-weight:500;\">\n                      {title}\n                    </td>\n                  </tr>\n",
        theme.title_color
    ));

    let (profiles, contacts): (Vec<&ContactRow>, Vec<&ContactRow>) =
        rows.iter().partition(|row| row.is_profile());
    html.push_str(&contact_block(&contacts, theme, &palette, true));
    if !profiles.is_empty() {
        html.push_str(&contact_block(&profiles, theme, &palette, false));
    }

    html.push_str("                </table>\n              </td>\n            </tr>\n          </table>\n");
    html.push_str("        </td>\n      </tr>\n    </table>\n  </body>\n</html>\n");
    html
}

fn contact_block(
    rows: &[&ContactRow],
    theme: &Theme,
    palette: &AccentPalette,
    padded: bool,
) -> String {
    let font = &theme.font_family;
    let mut block = String::new();
    block.push_str(&format!(
        "                  <tr>\n                    <td style=\"padding-top:12px;\">\n                      <table {TABLE_ATTRS} style=\"{TABLE_RESET} font-family:{font};\">\n"
    ));
    for row in rows {
        block.push_str(&contact_row_html(row, theme, palette, padded));
    }
    block.push_str("                      </table>\n                    </td>\n                  </tr>\n");
    block
}

fn contact_row_html(
    row: &ContactRow,
    theme: &Theme,
    palette: &AccentPalette,
    padded: bool,
) -> String {
    let padding = if padded { " padding:3px 0;" } else { "" };
    format!(
        "                        <tr>\n                          <td style=\"font-family:{}; color:{}; font-size:13px; line-height:18px;{padding}\">\n                            <span style=\"color:{}; font-weight:500;\">{}</span>\n                            <a href=\"{}\" style=\"color:{}; text-decoration:none; font-weight:500; margin-left:6px;\">{}</a>\n                          </td>\n                        </tr>\n",
        theme.font_family,
        theme.text_color,
        theme.icon_color,
        row.icon(),
        row.href(),
        palette.accent,
        row.text()
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
