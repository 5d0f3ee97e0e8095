use signature_rs::{
    AccentPalette, FormDefaults, SignatureData, Theme, generate_signature_html, mix_hex_colors,
    normalize_hex_color, parse_config, parse_form, render_form_page, render_signature,
    shade_hex_color,
};

fn jane() -> SignatureData {
    SignatureData::new("Jane Doe", "Engineer", "jane@x.com", "http://x.com/l.png")
}

fn assert_valid_document(html: &str, fixture: &str) {
    assert!(html.starts_with("<!DOCTYPE html>"), "{fixture}: missing doctype");
    assert!(html.trim_end().ends_with("</html>"), "{fixture}: missing </html>");
    assert_eq!(
        html.matches("<table").count(),
        html.matches("</table>").count(),
        "{fixture}: unbalanced tables"
    );
    assert_eq!(
        html.matches("<tr>").count(),
        html.matches("</tr>").count(),
        "{fixture}: unbalanced rows"
    );
}

#[test]
fn renders_all_fixtures() {
    let full = jane()
        .with_phone("+1 (555) 123-4567")
        .with_website("example.com")
        .with_linkedin_url("https://linkedin.com/in/jane")
        .with_accent_color("#0f8");
    let hostile =
        SignatureData::new("<b>Bob</b>", "\"Chief\" & 'Boss'", "b@x.com", "x\" onerror=\"y")
            .with_website("javascript:alert(1)");

    // Keep this list explicit so new record shapes are added intentionally.
    let fixtures = [
        ("required_only", jane()),
        ("full", full),
        ("hostile", hostile),
        ("empty", SignatureData::default()),
    ];

    for (name, data) in fixtures {
        assert_valid_document(&generate_signature_html(&data), name);
        assert_valid_document(&render_signature(&data, &Theme::classic()), name);
    }
}

#[test]
fn hex_normalization_properties() {
    for hex in ["000000", "FFFFFF", "a1B2c3", "667EEA"] {
        assert_eq!(normalize_hex_color(Some(hex)), format!("#{}", hex.to_lowercase()));
        assert_eq!(
            normalize_hex_color(Some(&format!("#{hex}"))),
            format!("#{}", hex.to_lowercase())
        );
    }
    assert_eq!(normalize_hex_color(Some("#abc")), "#aabbcc");
    for junk in ["blue", "#12", "12345g", ""] {
        assert_eq!(normalize_hex_color(Some(junk)), "#667eea");
    }
    assert_eq!(normalize_hex_color(None), "#667eea");
}

#[test]
fn shade_and_mix_identities() {
    for x in ["#abc", "#123456", "nonsense", "FFF"] {
        assert_eq!(shade_hex_color(x, 0.0), normalize_hex_color(Some(x)));
        assert_eq!(mix_hex_colors(x, "#0f0f0f", 0.0), normalize_hex_color(Some(x)));
        assert_eq!(mix_hex_colors("#0f0f0f", x, 1.0), normalize_hex_color(Some(x)));
    }
}

#[test]
fn required_only_has_one_contact_row() {
    let html = generate_signature_html(&jane());
    assert_eq!(html.matches("<a href=").count(), 1);
    assert!(html.contains("mailto:jane@x.com"));
    assert!(!html.contains("tel:"));
    assert!(!html.contains("https://"));
    assert!(!html.contains("LinkedIn"));
}

#[test]
fn phone_and_website_hrefs() {
    let html = generate_signature_html(&jane().with_phone("+1 (555) 123-4567"));
    assert!(html.contains("href=\"tel:+15551234567\""));
    assert!(html.contains("+1 (555) 123-4567</a>"));

    let html = generate_signature_html(&jane().with_website("example.com"));
    assert!(html.contains("href=\"https://example.com\""));
    assert!(html.contains(">example.com</a>"));

    let html = generate_signature_html(&jane().with_website("http://example.com"));
    assert!(html.contains("href=\"http://example.com\""));
    assert!(!html.contains("https://http://"));
}

#[test]
fn user_text_is_escaped() {
    let mut data = jane();
    data.name = "<script>".to_string();
    let html = generate_signature_html(&data);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn accent_color_flows_into_links_and_gradient() {
    let html = generate_signature_html(&jane().with_accent_color("#ABC"));
    let palette = AccentPalette::from_accent(Some("#ABC"));
    assert!(html.contains("color:#aabbcc; text-decoration:none"));
    assert!(html.contains(&format!(
        "linear-gradient(135deg, {} 0%, {} 100%)",
        palette.gradient_from, palette.gradient_to
    )));
}

#[test]
fn form_submission_round_trip() {
    let body = "name=Jane+Doe&title=Engineer&email=jane%40x.com&logoUrl=http%3A%2F%2Fx.com%2Fl.png\
                &phone=%2B1+%28555%29+123-4567&website=&accentColor=%23ABC&accentHue=229";
    let data = parse_form(body);
    assert_eq!(data, jane().with_phone("+1 (555) 123-4567").with_accent_color("#ABC"));
    let html = generate_signature_html(&data);
    assert!(html.contains("tel:+15551234567"));
    assert!(!html.contains("🌐"));
}

#[test]
fn form_page_posts_to_generate() {
    let page = render_form_page(&FormDefaults::default(), &Theme::default());
    assert!(page.contains("<form id=\"sig-form\" method=\"POST\" action=\"/generate\">"));
    let keys = [
        "name",
        "title",
        "email",
        "phone",
        "website",
        "logoUrl",
        "linkedinUrl",
        "accentHue",
        "accentColor",
    ];
    for key in keys {
        assert!(page.contains(&format!("name=\"{key}\"")), "missing input {key}");
    }
}

#[test]
fn configured_theme_variables_are_escaped() {
    let config = parse_config(
        r##"{ themeVariables: { fontFamily: "x\"><script>alert(1)</script>", nameColor: "#000" } }"##,
    )
    .unwrap();
    let html = render_signature(&jane(), &config.theme);
    assert_valid_document(&html, "themed");
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("color:#000;"));
}
