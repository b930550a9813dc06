//! Named-slot template rendering.
//!
//! The testbench template carries `${NAME}` tokens. Rendering substitutes
//! every slot exactly once and fails if a slot is absent from the template
//! or if any token survives substitution, so a malformed template can never
//! produce silently wrong wrapper text.

use crate::TbError;

/// Substitutes each `(name, value)` slot into `template`.
///
/// Every slot must occur in the template, and the rendered text must
/// contain no remaining `${` token.
pub(crate) fn render(template: &str, slots: &[(&str, &str)]) -> Result<String, TbError> {
    let mut text = template.to_string();
    for (name, value) in slots {
        let token = format!("${{{name}}}");
        if !text.contains(&token) {
            return Err(TbError::Template(format!(
                "template slot '{name}' not found"
            )));
        }
        text = text.replace(&token, value);
    }
    if let Some(start) = text.find("${") {
        let rest = &text[start..];
        let token = rest.split_whitespace().next().unwrap_or(rest);
        return Err(TbError::Template(format!(
            "unrendered template token '{token}'"
        )));
    }
    Ok(text)
}
