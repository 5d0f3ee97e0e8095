use crate::error::SignatureError;
use crate::signature::SignatureData;

/// Builds a [`SignatureData`] from an `application/x-www-form-urlencoded`
/// body. Unknown keys are ignored and the first occurrence of a key wins.
pub fn parse_form(body: &str) -> SignatureData {
    let mut data = SignatureData::default();
    let mut seen: Vec<String> = Vec::new();

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        if seen.iter().any(|k| *k == key) {
            continue;
        }
        let value = value.into_owned();
        match &*key {
            "name" => data.name = value,
            "title" => data.title = value,
            "email" => data.email = value,
            "logoUrl" => data.logo_url = value,
            "phone" => data.phone = non_empty(value),
            "website" => data.website = non_empty(value),
            "linkedinUrl" => data.linkedin_url = non_empty(value),
            "accentColor" => data.accent_color = non_empty(value),
            _ => continue,
        }
        seen.push(key.into_owned());
    }

    data
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub fn validate_required(data: &SignatureData) -> Result<(), SignatureError> {
    let missing = data.missing_required();
    if missing.is_empty() {
        return Ok(());
    }
    Err(SignatureError::MissingFields(missing))
}
