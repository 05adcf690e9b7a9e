//! Interactive line-oriented form
//!
//! Prompts each field in form order. Every entry is checked on the spot and
//! re-prompted with its error until it passes.

use std::io::{self, BufRead, Write};

use crate::logic::features::{RawInput, RawValue};
use crate::logic::schema::FeatureSchema;

/// Fill `input` field by field. An empty line keeps the current value.
///
/// Returns `Ok(false)` if the reader hit end of input.
pub fn fill_form<R: BufRead, W: Write>(
    schema: &FeatureSchema,
    input: &mut RawInput,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<bool> {
    for rule in schema.rules() {
        loop {
            let current = input
                .get(rule.feature)
                .cloned()
                .unwrap_or(RawValue::Number(0.0));

            write!(writer, "{} [{}]: ", rule.label, current)?;
            writer.flush()?;

            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Ok(false);
            }

            let line = line.trim();
            let candidate = if line.is_empty() {
                current
            } else {
                RawValue::Text(line.to_string())
            };

            match schema.check_field(rule.feature, &candidate) {
                Ok(_) => {
                    input.set(rule.feature, candidate);
                    break;
                }
                Err(e) => writeln!(writer, "  ! {}", e)?,
            }
        }
    }

    Ok(true)
}

/// Yes/no question, defaulting to no
pub fn confirm<R: BufRead, W: Write>(question: &str, reader: &mut R, writer: &mut W) -> io::Result<bool> {
    write!(writer, "{} [y/N]: ", question)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::Feature;
    use std::io::Cursor;

    #[test]
    fn test_fill_form_accepts_defaults() {
        let schema = FeatureSchema::default();
        let mut input = RawInput::default();
        let mut reader = Cursor::new("\n".repeat(8));
        let mut out = Vec::new();

        assert!(fill_form(&schema, &mut input, &mut reader, &mut out).unwrap());
        assert_eq!(input, RawInput::default());

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.starts_with("Kills [0]: "));
        assert!(shown.contains("Game Duration (seconds) [0]: "));
    }

    #[test]
    fn test_fill_form_reprompts_invalid_field() {
        let schema = FeatureSchema::default();
        let mut input = RawInput::default();
        let mut reader = Cursor::new("abc\n101\n12\n\n\n\n\n\n\n\n");
        let mut out = Vec::new();

        assert!(fill_form(&schema, &mut input, &mut reader, &mut out).unwrap());
        assert_eq!(input.get(Feature::Kills), Some(&RawValue::Text("12".into())));

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("  ! Kills must be a number\n"));
        assert!(shown.contains("  ! Kills must be less than 100\n"));
        assert!(schema.validate(&input).is_ok());
    }

    #[test]
    fn test_fill_form_stops_at_eof() {
        let schema = FeatureSchema::default();
        let mut input = RawInput::default();
        let mut reader = Cursor::new("3\n");
        let mut out = Vec::new();

        assert!(!fill_form(&schema, &mut input, &mut reader, &mut out).unwrap());
    }

    #[test]
    fn test_confirm() {
        let mut out = Vec::new();
        assert!(confirm("Again?", &mut Cursor::new("y\n"), &mut out).unwrap());
        assert!(confirm("Again?", &mut Cursor::new("Yes\n"), &mut out).unwrap());
        assert!(!confirm("Again?", &mut Cursor::new("\n"), &mut out).unwrap());
        assert!(!confirm("Again?", &mut Cursor::new(""), &mut out).unwrap());
    }
}
