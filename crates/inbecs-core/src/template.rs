//! Placeholder substitution for the article prompt template.
//!
//! Templates use brace fields: `{keyword}` and `{target_audience}` are
//! substituted, `{{` and `}}` produce literal braces. Anything else inside
//! braces, or a brace without its partner, is rejected.

use crate::error::TemplateError;

pub const KEYWORD: &str = "keyword";
pub const TARGET_AUDIENCE: &str = "target_audience";

enum Piece<'a> {
    Literal(&'a str),
    Brace(char),
    Field(&'a str),
}

fn parse(template: &str) -> Result<Vec<Piece<'_>>, TemplateError> {
    let mut pieces = Vec::new();
    let mut chars = template.char_indices().enumerate().peekable();
    let mut literal_start = 0;

    while let Some((position, (byte_idx, c))) = chars.next() {
        match c {
            '{' => {
                if literal_start < byte_idx {
                    pieces.push(Piece::Literal(&template[literal_start..byte_idx]));
                }
                if matches!(chars.peek(), Some((_, (_, '{')))) {
                    chars.next();
                    pieces.push(Piece::Brace('{'));
                    literal_start = byte_idx + 2;
                    continue;
                }

                let name_start = byte_idx + 1;
                let mut name_end = None;
                for (_, (idx, inner)) in chars.by_ref() {
                    if inner == '}' {
                        name_end = Some(idx);
                        break;
                    }
                    if inner == '{' {
                        break;
                    }
                }

                let Some(name_end) = name_end else {
                    return Err(TemplateError::UnmatchedBrace { brace: '{', position });
                };

                let name = &template[name_start..name_end];
                if name != KEYWORD && name != TARGET_AUDIENCE {
                    return Err(TemplateError::UnknownPlaceholder(name.to_string()));
                }
                pieces.push(Piece::Field(name));
                literal_start = name_end + 1;
            }
            '}' => {
                if literal_start < byte_idx {
                    pieces.push(Piece::Literal(&template[literal_start..byte_idx]));
                }
                if matches!(chars.peek(), Some((_, (_, '}')))) {
                    chars.next();
                    pieces.push(Piece::Brace('}'));
                    literal_start = byte_idx + 2;
                } else {
                    return Err(TemplateError::UnmatchedBrace { brace: '}', position });
                }
            }
            _ => {}
        }
    }

    if literal_start < template.len() {
        pieces.push(Piece::Literal(&template[literal_start..]));
    }

    for required in [KEYWORD, TARGET_AUDIENCE] {
        let present = pieces
            .iter()
            .any(|p| matches!(p, Piece::Field(name) if *name == required));
        if !present {
            return Err(TemplateError::MissingPlaceholder(required));
        }
    }

    Ok(pieces)
}

/// Check that a template can be rendered without rendering it.
pub fn validate(template: &str) -> Result<(), TemplateError> {
    parse(template).map(|_| ())
}

/// Fill the template's placeholders.
pub fn render(template: &str, keyword: &str, target_audience: &str) -> Result<String, TemplateError> {
    let pieces = parse(template)?;
    let mut out = String::with_capacity(template.len() + keyword.len() * 4);

    for piece in pieces {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Brace(c) => out.push(c),
            Piece::Field(name) if name == KEYWORD => out.push_str(keyword),
            Piece::Field(_) => out.push_str(target_audience),
        }
    }

    Ok(out)
}
