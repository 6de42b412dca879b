//! Plain-text rendering of session views.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use policydesk_session::{FieldView, FormView, InputKind, Notice, NoticeKind, TableView};

const TABLE_WIDTH: u16 = 120;

pub fn render_table(view: &TableView) -> String {
    if view.is_empty() {
        return format!("{}\nNo records\n", view.title);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(TABLE_WIDTH);
    table.set_header(&view.headers);
    for row in &view.rows {
        table.add_row(std::iter::once(&row.id).chain(&row.cells));
    }
    format!("{}\n{table}\n", view.title)
}

pub fn render_form(view: &FormView) -> String {
    let mut out = format!("{}\n", view.heading);
    for field in &view.fields {
        render_field(&mut out, field);
    }
    out.push_str(&format!("Type 'submit' to {}", view.submit_label));
    if view.show_cancel {
        out.push_str(" or 'cancel' to stop editing");
    }
    out.push('\n');
    out
}

fn render_field(out: &mut String, field: &FieldView) {
    let marker = if field.required { "*" } else { "" };
    out.push_str(&format!(
        "  {}{} ({}) [{}]: {}\n",
        field.label,
        marker,
        field.name,
        kind_hint(&field.kind),
        field.value
    ));

    if let InputKind::Choice { options } = &field.kind {
        let choices = if options.is_empty() {
            "(none loaded)".to_string()
        } else {
            options
                .iter()
                .map(|o| format!("{}={}", o.value, o.label))
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!("      choices: {choices}\n"));
    }
    if let Some(error) = &field.error {
        out.push_str(&format!("      ! {error}\n"));
    }
}

fn kind_hint(kind: &InputKind) -> String {
    match kind {
        InputKind::Text => "text".to_string(),
        InputKind::Email => "email".to_string(),
        InputKind::Number { min: Some(min), .. } => format!("number >= {min}"),
        InputKind::Number { min: None, .. } => "number".to_string(),
        InputKind::Date => "YYYY-MM-DD".to_string(),
        InputKind::Choice { .. } => "choice".to_string(),
    }
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}\n", notice.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use policydesk_session::TableRow;

    #[test]
    fn empty_table_says_so() {
        let view = TableView {
            title: "Plans list".to_string(),
            headers: vec!["ID".to_string(), "Name".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(render_table(&view), "Plans list\nNo records\n");
    }

    #[test]
    fn table_includes_ids_and_cells() {
        let view = TableView {
            title: "Plans list".to_string(),
            headers: vec!["ID".to_string(), "Name".to_string()],
            rows: vec![TableRow {
                id: "10".to_string(),
                cells: vec!["Gold".to_string()],
            }],
        };
        let text = render_table(&view);
        assert!(text.starts_with("Plans list\n"));
        assert!(text.contains("Name"));
        assert!(text.contains("10"));
        assert!(text.contains("Gold"));
    }

    #[test]
    fn form_lists_choices_and_errors_under_each_field() {
        use policydesk_model::SelectOption;

        let view = FormView {
            heading: "Edit Plans".to_string(),
            submit_label: "Update",
            show_cancel: true,
            fields: vec![FieldView {
                name: "tipo".to_string(),
                label: "Type".to_string(),
                required: true,
                kind: InputKind::Choice {
                    options: vec![SelectOption::new("VIDA", "Life")],
                },
                value: "X".to_string(),
                error: Some("Invalid option".to_string()),
            }],
        };

        assert_eq!(
            render_form(&view),
            "Edit Plans\n  \
             Type* (tipo) [choice]: X\n      \
             choices: VIDA=Life\n      \
             ! Invalid option\n\
             Type 'submit' to Update or 'cancel' to stop editing\n"
        );
    }

    #[test]
    fn notices_are_tagged() {
        assert_eq!(render_notice(&Notice::success("Saved")), "[ok] Saved\n");
        assert_eq!(render_notice(&Notice::error("Nope")), "[error] Nope\n");
    }
}
