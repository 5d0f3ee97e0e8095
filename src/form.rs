use crate::color::{hex_to_rgba, AccentPalette};
use crate::signature::escape_html;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Values pre-filled into the form page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDefaults {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub logo_url: String,
    pub linkedin_url: String,
    pub accent_hue: u16,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            name: "Alex Johnson".to_string(),
            title: "Senior Product Manager".to_string(),
            email: "alex.johnson@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            website: "example.com".to_string(),
            logo_url: "https://via.placeholder.com/96x96.png?text=Logo".to_string(),
            linkedin_url: "https://www.linkedin.com/in/example".to_string(),
            accent_hue: 229,
        }
    }
}

impl FormDefaults {
    pub fn palette(&self) -> AccentPalette {
        AccentPalette::from_hue(f64::from(self.accent_hue.min(360)))
    }
}

struct Field<'a> {
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    value: &'a str,
    placeholder: &'static str,
    required: bool,
}

fn fields(defaults: &FormDefaults) -> [Field<'_>; 7] {
    [
        Field {
            id: "name",
            label: "Full Name",
            kind: "text",
            value: &defaults.name,
            placeholder: "Enter your full name",
            required: true,
        },
        Field {
            id: "title",
            label: "Job Title",
            kind: "text",
            value: &defaults.title,
            placeholder: "Enter your job title",
            required: true,
        },
        Field {
            id: "email",
            label: "Email Address",
            kind: "email",
            value: &defaults.email,
            placeholder: "your.email@company.com",
            required: true,
        },
        Field {
            id: "phone",
            label: "Phone Number",
            kind: "text",
            value: &defaults.phone,
            placeholder: "+1 (555) 123-4567",
            required: false,
        },
        Field {
            id: "website",
            label: "Website",
            kind: "text",
            value: &defaults.website,
            placeholder: "www.yourcompany.com",
            required: false,
        },
        Field {
            id: "logoUrl",
            label: "Logo URL",
            kind: "text",
            value: &defaults.logo_url,
            placeholder: "https://example.com/logo.png",
            required: true,
        },
        Field {
            id: "linkedinUrl",
            label: "LinkedIn Profile",
            kind: "text",
            value: &defaults.linkedin_url,
            placeholder: "https://linkedin.com/in/yourprofile",
            required: false,
        },
    ]
}

// Entities are not decoded inside <style>, so strip what could end the
// declaration, the rule or the element instead of escaping.
fn css_value(value: &str) -> String {
    value.replace(['<', '>', '{', '}', ';'], "")
}

pub fn render_form_page(defaults: &FormDefaults, theme: &Theme) -> String {
    let palette = defaults.palette();
    let hue = defaults.accent_hue.min(360);

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n");
    page.push_str("    <meta http=\"x-ua-compatible\" content=\"ie=edge\" />\n");
    page.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    page.push_str("    <meta charset=\"utf-8\" />\n");
    page.push_str("    <title>Email Signature Generator</title>\n    <style>\n");
    page.push_str(&format!(
        "      :root {{\n        --accent-color: {};\n        --accent-gradient-from: {};\n        --accent-gradient-to: {};\n        --accent-shadow-color: {};\n        --accent-slider-gradient: linear-gradient(90deg, hsl({hue}, 80%, 45%) 0%, hsl({hue}, 80%, 60%) 50%, hsl({hue}, 80%, 75%) 100%);\n        --font-family: {};\n        --text-color: {};\n      }}\n",
        palette.accent,
        palette.gradient_from,
        palette.gradient_to,
        hex_to_rgba(&palette.accent, 0.18),
        css_value(&theme.font_family),
        css_value(&theme.text_color),
    ));
    page.push_str(FORM_STYLES);
    page.push_str("    </style>\n  </head>\n  <body>\n    <div class=\"container\">\n");
    page.push_str("      <div class=\"header\">\n        <h1>Email Signature Generator</h1>\n        <p>Create professional email signatures in seconds</p>\n      </div>\n");
    page.push_str("      <div class=\"main-content\">\n        <div class=\"form-card\">\n");
    page.push_str("          <form id=\"sig-form\" method=\"POST\" action=\"/generate\">\n");

    for field in fields(defaults) {
        let marker = if field.required { " *" } else { "" };
        let required = if field.required { " required" } else { "" };
        page.push_str(&format!(
            "            <div class=\"form-group\">\n              <label for=\"{id}\">{label}{marker}</label>\n              <input id=\"{id}\" name=\"{id}\" type=\"{kind}\" value=\"{value}\"{required} placeholder=\"{placeholder}\" />\n            </div>\n",
            id = field.id,
            label = field.label,
            kind = field.kind,
            value = escape_html(field.value),
            placeholder = escape_html(field.placeholder),
        ));
    }

    page.push_str(&format!(
        "            <div class=\"form-group\">\n              <label for=\"accentHue\">Accent Color</label>\n              <div class=\"color-slider\">\n                <input id=\"accentHue\" name=\"accentHue\" type=\"range\" min=\"0\" max=\"360\" value=\"{hue}\" aria-label=\"Select accent color hue\" />\n                <div class=\"color-slider__meta\">\n                  <div class=\"color-slider__swatch\" id=\"accentColorSwatch\" aria-hidden=\"true\"></div>\n                  <span class=\"color-slider__value\" id=\"accentColorValue\">{}</span>\n                </div>\n                <input id=\"accentColor\" name=\"accentColor\" type=\"hidden\" value=\"{}\" />\n              </div>\n            </div>\n",
        palette.accent.to_uppercase(),
        palette.accent,
    ));
    page.push_str("            <button type=\"submit\" class=\"submit-btn\">Generate Signature</button>\n          </form>\n        </div>\n");
    page.push_str("        <div class=\"preview-card\">\n          <div class=\"preview-header\">\n            <div class=\"preview-icon\">👁</div>\n            <h3>Live Preview</h3>\n          </div>\n");
    page.push_str("          <div class=\"preview-frame\">\n            <iframe id=\"preview\" title=\"Signature Preview\"></iframe>\n          </div>\n        </div>\n      </div>\n");
    page.push_str("      <div class=\"info-text\">\n        <p>Submitting will download a file named <strong>signature.html</strong> that you can use in your email client.</p>\n      </div>\n");
    page.push_str(&format!(
        "      <script>\n        const FALLBACK_ACCENT = '{}';\n",
        crate::color::DEFAULT_ACCENT_COLOR
    ));
    page.push_str(FORM_SCRIPT);
    page.push_str("      </script>\n    </div>\n  </body>\n</html>\n");
    page
}

const FORM_STYLES: &str = r#"      * { margin: 0; padding: 0; box-sizing: border-box; }
      body {
        font-family: var(--font-family);
        background: linear-gradient(135deg, var(--accent-gradient-from) 0%, var(--accent-gradient-to) 100%);
        min-height: 100vh;
        color: var(--text-color);
        line-height: 1.6;
      }
      .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
      .header { text-align: center; margin-bottom: 3rem; color: white; }
      .header h1 { font-size: 2.5rem; font-weight: 700; margin-bottom: 0.5rem; text-shadow: 0 2px 4px rgba(0,0,0,0.1); }
      .header p { font-size: 1.1rem; opacity: 0.9; font-weight: 300; }
      .main-content { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; align-items: start; }
      .form-card, .preview-card { background: white; border-radius: 16px; padding: 2rem; box-shadow: 0 20px 40px rgba(0,0,0,0.1); }
      .form-group { margin-bottom: 1.5rem; }
      .form-group label {
        display: block;
        font-weight: 600;
        margin-bottom: 0.5rem;
        font-size: 0.9rem;
        text-transform: uppercase;
        letter-spacing: 0.5px;
      }
      .form-group input {
        width: 100%;
        padding: 0.875rem 1rem;
        border: 2px solid #e5e7eb;
        border-radius: 8px;
        font-size: 1rem;
        transition: all 0.2s ease;
        background: #fafafa;
      }
      .form-group input:focus {
        outline: none;
        border-color: var(--accent-color);
        background: white;
        box-shadow: 0 0 0 3px var(--accent-shadow-color);
      }
      .form-group input:required { border-left: 4px solid var(--accent-color); }
      .color-slider { display: flex; flex-direction: column; gap: 0.75rem; }
      .color-slider input[type="range"] {
        -webkit-appearance: none;
        appearance: none;
        height: 12px;
        padding: 0;
        border-radius: 999px;
        background: var(--accent-slider-gradient);
        cursor: pointer;
      }
      .color-slider input[type="range"]::-webkit-slider-thumb {
        -webkit-appearance: none;
        width: 20px;
        height: 20px;
        border-radius: 50%;
        background: var(--accent-color);
        border: 3px solid white;
        box-shadow: 0 4px 10px rgba(0,0,0,0.2);
      }
      .color-slider input[type="range"]::-moz-range-thumb {
        width: 20px;
        height: 20px;
        border-radius: 50%;
        background: var(--accent-color);
        border: 3px solid white;
        box-shadow: 0 4px 10px rgba(0,0,0,0.2);
      }
      .color-slider__meta { display: flex; align-items: center; justify-content: space-between; gap: 0.75rem; }
      .color-slider__swatch { width: 40px; height: 40px; border-radius: 12px; border: 2px solid rgba(255,255,255,0.6); background: var(--accent-color); }
      .color-slider__value { font-size: 0.85rem; font-weight: 600; letter-spacing: 0.5px; }
      .submit-btn {
        background: linear-gradient(135deg, var(--accent-gradient-from) 0%, var(--accent-gradient-to) 100%);
        color: white;
        border: none;
        padding: 1rem 2rem;
        border-radius: 8px;
        font-size: 1rem;
        font-weight: 600;
        cursor: pointer;
        width: 100%;
        text-transform: uppercase;
        letter-spacing: 0.5px;
        box-shadow: 0 4px 15px var(--accent-shadow-color);
      }
      .submit-btn:hover { transform: translateY(-2px); box-shadow: 0 8px 25px var(--accent-shadow-color); }
      .preview-header { display: flex; align-items: center; margin-bottom: 1rem; }
      .preview-header h3 { font-size: 1.25rem; font-weight: 600; margin-left: 0.5rem; }
      .preview-icon {
        width: 24px;
        height: 24px;
        background: linear-gradient(135deg, var(--accent-gradient-from) 0%, var(--accent-gradient-to) 100%);
        border-radius: 6px;
        display: flex;
        align-items: center;
        justify-content: center;
        color: white;
        font-size: 0.875rem;
      }
      .preview-frame { width: 100%; height: 400px; border: 2px solid #e5e7eb; border-radius: 8px; background: #f9fafb; overflow: hidden; }
      .preview-frame iframe { width: 100%; height: 100%; border: none; background: white; }
      .info-text { margin-top: 2rem; text-align: center; color: rgba(255,255,255,0.8); font-size: 0.9rem; background: rgba(255,255,255,0.1); padding: 1rem; border-radius: 8px; }
      .info-text strong { color: white; font-weight: 600; }
      @media (max-width: 768px) {
        .container { padding: 1rem; }
        .header h1 { font-size: 2rem; }
        .main-content { grid-template-columns: 1fr; gap: 1.5rem; }
        .form-card, .preview-card { padding: 1.5rem; }
      }
"#;

// Client-side mirror of `crate::color`, keep the two in step.
const FORM_SCRIPT: &str = r#"        const form = document.getElementById('sig-form');
        const iframe = document.getElementById('preview');
        const accentHueInput = document.getElementById('accentHue');
        const accentColorInput = document.getElementById('accentColor');
        const accentSwatch = document.getElementById('accentColorSwatch');
        const accentValue = document.getElementById('accentColorValue');
        const rootStyle = document.documentElement ? document.documentElement.style : null;

        function normalizeHex(hex) {
          if (typeof hex !== 'string') return FALLBACK_ACCENT;
          const match = hex.trim().match(/^#?([0-9a-f]{3}|[0-9a-f]{6})$/i);
          if (!match) return FALLBACK_ACCENT;
          let value = match[1];
          if (value.length === 3) value = value.split('').map(c => c + c).join('');
          return '#' + value.toLowerCase();
        }

        function hslToHex(h, s, l) {
          const hue = ((h % 360) + 360) % 360;
          const saturation = Math.max(0, Math.min(100, s)) / 100;
          const lightness = Math.max(0, Math.min(100, l)) / 100;
          const k = n => (n + hue / 30) % 12;
          const a = saturation * Math.min(lightness, 1 - lightness);
          const f = n => lightness - a * Math.max(-1, Math.min(Math.min(k(n) - 3, 9 - k(n)), 1));
          const toHex = x => Math.round(Math.max(0, Math.min(1, x)) * 255).toString(16).padStart(2, '0');
          return '#' + toHex(f(0)) + toHex(f(8)) + toHex(f(4));
        }

        function hexToRgb(hex) {
          const value = normalizeHex(hex).slice(1);
          return {
            r: parseInt(value.substring(0, 2), 16),
            g: parseInt(value.substring(2, 4), 16),
            b: parseInt(value.substring(4, 6), 16),
          };
        }

        function rgbToHex(r, g, b) {
          const toHex = n => Math.max(0, Math.min(255, Math.round(n))).toString(16).padStart(2, '0');
          return '#' + toHex(r) + toHex(g) + toHex(b);
        }

        function mixHex(base, mix, weight) {
          const w = Math.max(0, Math.min(1, weight));
          const a = hexToRgb(base);
          const b = hexToRgb(mix);
          return rgbToHex(a.r * (1 - w) + b.r * w, a.g * (1 - w) + b.g * w, a.b * (1 - w) + b.b * w);
        }

        function shadeHex(hex, amount) {
          if (amount === 0) return normalizeHex(hex);
          if (amount > 0) return mixHex(hex, '#ffffff', Math.min(1, amount));
          return mixHex(hex, '#000000', Math.min(1, Math.abs(amount)));
        }

        function hexToRgba(hex, alpha) {
          const { r, g, b } = hexToRgb(hex);
          return 'rgba(' + r + ', ' + g + ', ' + b + ', ' + Math.max(0, Math.min(1, alpha)) + ')';
        }

        function syncAccentColor() {
          if (!accentHueInput || !accentColorInput || !rootStyle) return;
          const hue = Number(accentHueInput.value || 0);
          const baseHex = hslToHex(hue, 72, 58);
          accentColorInput.value = baseHex;
          if (accentSwatch) accentSwatch.style.background = baseHex;
          if (accentValue) accentValue.textContent = baseHex.toUpperCase();
          rootStyle.setProperty('--accent-color', baseHex);
          rootStyle.setProperty('--accent-gradient-from', shadeHex(baseHex, -0.18));
          rootStyle.setProperty('--accent-gradient-to', shadeHex(baseHex, 0.18));
          rootStyle.setProperty('--accent-shadow-color', hexToRgba(baseHex, 0.25));
          rootStyle.setProperty('--accent-slider-gradient',
            'linear-gradient(90deg, hsl(' + hue + ', 80%, 45%) 0%, hsl(' + hue + ', 80%, 60%) 50%, hsl(' + hue + ', 80%, 75%) 100%)');
        }

        function updatePreview() {
          if (!form || !iframe) return;
          syncAccentColor();
          const body = new URLSearchParams(new FormData(form)).toString();
          fetch('/preview', {
            method: 'POST',
            headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
            body,
          })
            .then(r => r.text())
            .then(html => {
              const doc = iframe.contentDocument || iframe.contentWindow.document;
              doc.open();
              doc.write(html);
              doc.close();
            })
            .catch(err => console.error('[preview] error', err));
        }

        if (form) form.addEventListener('input', updatePreview);
        window.addEventListener('DOMContentLoaded', updatePreview);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefills_defaults_and_marks_required_fields() {
        let page = render_form_page(&FormDefaults::default(), &Theme::default());
        assert!(page.contains("value=\"Alex Johnson\" required"));
        assert!(
            page.contains("name=\"phone\" type=\"text\" value=\"+1 (555) 123-4567\" placeholder")
        );
        assert!(page.contains("action=\"/generate\""));
        assert!(page.contains("fetch('/preview'"));
        assert_eq!(page.matches(" required placeholder").count(), 4);
    }

    #[test]
    fn escapes_default_values() {
        let defaults = FormDefaults {
            name: "\"><script>x</script>".to_string(),
            ..FormDefaults::default()
        };
        let page = render_form_page(&defaults, &Theme::default());
        assert!(page.contains("value=\"&quot;&gt;&lt;script&gt;x&lt;/script&gt;\""));
        assert!(!page.contains("<script>x</script>"));
    }

    #[test]
    fn theme_values_cannot_close_the_style_block() {
        let theme = Theme {
            font_family: "x</style><script>alert(1)</script>".to_string(),
            text_color: "red; } body { display:none".to_string(),
            ..Theme::default()
        };
        let page = render_form_page(&FormDefaults::default(), &theme);
        assert!(!page.contains("<script>alert(1)"));
        assert_eq!(page.matches("</style>").count(), 1);
        assert!(page.contains("--font-family: x/stylescriptalert(1)/script;"));
        assert!(page.contains("--text-color: red  body  display:none;"));
    }

    #[test]
    fn default_font_stack_keeps_quotes() {
        let page = render_form_page(&FormDefaults::default(), &Theme::default());
        assert!(page.contains("--font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI',"));
    }

    #[test]
    fn seeds_accent_from_hue() {
        let defaults = FormDefaults {
            accent_hue: 120,
            ..FormDefaults::default()
        };
        let palette = defaults.palette();
        assert_eq!(palette.accent, crate::color::hsl_to_hex(120.0, 72.0, 58.0));
        let page = render_form_page(&defaults, &Theme::default());
        assert!(page.contains(&format!("--accent-color: {};", palette.accent)));
        assert!(page.contains(&format!(
            "name=\"accentColor\" type=\"hidden\" value=\"{}\"",
            palette.accent
        )));
        assert!(page.contains("type=\"range\" min=\"0\" max=\"360\" value=\"120\""));
    }
}
