use crate::app::AppState;
use crate::domain::RepeatType;
use crate::editor::{CaptureField, EditorState, FormField};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the task editor modal
pub fn render_editor_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(editor) = &app.editor {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if editor.editing_id.is_some() {
            " Edit Task "
        } else {
            " New Task "
        };

        let mut lines = Vec::new();
        lines.push(Line::raw(""));

        push_text_field(
            &mut lines,
            editor,
            FormField::Title,
            &editor.title,
            capture_suffix(editor, CaptureField::Title),
        );
        push_text_field(
            &mut lines,
            editor,
            FormField::Description,
            &editor.description,
            capture_suffix(editor, CaptureField::Description),
        );
        push_text_field(&mut lines, editor, FormField::Time, &editor.time_input, "");
        push_text_field(&mut lines, editor, FormField::Date, &editor.date_input, "");
        push_cycle_field(&mut lines, editor, FormField::Tag, editor.tag.name());
        push_text_field(
            &mut lines,
            editor,
            FormField::Reminder,
            &editor.reminder_input,
            "",
        );
        push_cycle_field(&mut lines, editor, FormField::Repeat, editor.repeat_type.name());
        // Weekday toggles only make sense for a daily repeat
        if editor.repeat_type == RepeatType::Daily {
            push_cycle_field(
                &mut lines,
                editor,
                FormField::RepeatDays,
                &editor.repeat_days.join(" "),
            );
        }
        push_text_field(&mut lines, editor, FormField::Sound, &editor.sound_input, "");

        lines.push(Line::raw(""));
        if let Some(error) = &editor.error {
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                error_style(),
            )));
        }
        lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

fn capture_suffix(editor: &EditorState, field: CaptureField) -> &'static str {
    if editor.active_capture == Some(field) {
        " \u{1F399} listening"
    } else {
        ""
    }
}

fn push_text_field(
    lines: &mut Vec<Line>,
    editor: &EditorState,
    field: FormField,
    value: &str,
    suffix: &str,
) {
    let focused = editor.focus == field;
    let label = if focused {
        format!("{}: (editing){}", field.label(), suffix)
    } else {
        format!("{}:{}", field.label(), suffix)
    };
    lines.push(Line::raw(label));

    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style())
        } else {
            Span::raw("")
        },
    ]));
}

fn push_cycle_field(lines: &mut Vec<Line>, editor: &EditorState, field: FormField, value: &str) {
    let focused = editor.focus == field;
    let hint = match (focused, field) {
        (true, FormField::RepeatDays) => " (1-7 to toggle)",
        (true, _) => " (Space to cycle)",
        (false, _) => "",
    };
    lines.push(Line::raw(format!("{}:{}", field.label(), hint)));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
    ]));
}
