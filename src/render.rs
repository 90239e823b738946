//! Plain-text rendering for terminal front-ends

use crate::types::{ErrorMap, Field, ProfessionalRow, NON_FIELD_ERRORS};

/// One message to show, attached to a field label or to the form itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLine<'a> {
    /// `None` for form-level messages
    pub label: Option<&'a str>,
    pub message: &'a str,
}

/// Messages in display order: form fields, unknown server keys, then
/// form-level messages last.
pub fn error_lines(errors: &ErrorMap) -> Vec<ErrorLine<'_>> {
    let mut lines = Vec::new();

    for field in Field::ALL {
        if let Some(messages) = errors.field(field) {
            lines.extend(messages.iter().map(|message| ErrorLine {
                label: Some(field.label()),
                message,
            }));
        }
    }

    for key in errors.unknown_keys() {
        if let Some(messages) = errors.get(key) {
            lines.extend(messages.iter().map(|message| ErrorLine {
                label: Some(key),
                message,
            }));
        }
    }

    if let Some(messages) = errors.get(NON_FIELD_ERRORS) {
        lines.extend(
            messages
                .iter()
                .map(|message| ErrorLine { label: None, message }),
        );
    }

    lines
}

pub fn render_errors(errors: &ErrorMap) -> String {
    error_lines(errors)
        .into_iter()
        .map(|line| match line.label {
            Some(label) => format!("{}: {}", label, line.message),
            None => line.message.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aligned table with a header row and one line per record
pub fn render_table<'a>(rows: impl IntoIterator<Item = ProfessionalRow<'a>>) -> String {
    let body: Vec<[&str; 6]> = rows.into_iter().map(|row| row.cells()).collect();

    let mut widths = ProfessionalRow::COLUMNS.map(|h| h.chars().count());
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &ProfessionalRow::COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Professional, Source};

    #[test]
    fn non_field_errors_render_last() {
        let errors: ErrorMap = [
            (NON_FIELD_ERRORS, "Either Email or Phone is required."),
            ("full_name", "Full name is required."),
            ("detail", "Throttled."),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            render_errors(&errors),
            "Full Name: Full name is required.\ndetail: Throttled.\nEither Email or Phone is required."
        );
    }

    #[test]
    fn list_messages_render_one_per_line() {
        let errors: ErrorMap = [(
            "phone",
            vec![
                "professional with this phone already exists.".to_string(),
                "Phone number must be between 10 and 15 digits.".to_string(),
            ],
        )]
        .into_iter()
        .collect();
        assert_eq!(error_lines(&errors).len(), 2);
        assert!(error_lines(&errors)
            .iter()
            .all(|line| line.label == Some("Phone")));
    }

    #[test]
    fn table_aligns_columns() {
        let record = Professional {
            id: 1,
            full_name: "John Doe".into(),
            email: Some("john.doe@example.com".into()),
            phone: "1234567890".into(),
            job_title: "Developer".into(),
            company_name: "Example Corp".into(),
            source: Source::Direct,
            created_at: None,
        };
        let table = render_table(std::iter::once(record.row()));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Full Name  Email"));
        assert!(lines[2].starts_with("John Doe   john.doe@example.com  1234567890"));
        assert!(lines[2].ends_with("direct"));
    }

    #[test]
    fn empty_table_has_header_only() {
        let table = render_table(Vec::<ProfessionalRow<'_>>::new());
        assert_eq!(table.lines().count(), 2);
    }
}
