use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::cli::{open_store, to_index, today};
use crate::db::Slot;
use crate::error::Result;
use crate::fmt::Codec;
use crate::session::{Field, SaveOutcome, Session, FIELDS};
use crate::settings::load_settings;
use crate::store::EntryStore;
use crate::tui::{
    money_span, run_view, tone_style, wrap_text, View, ViewAction, FOCUSED_STYLE, FOOTER_STYLE,
    HEADER_STYLE,
};

/// Focus slot 0 is the date; the rest follow [`FIELDS`].
const FIELD_DATE: usize = 0;
const FIELD_COUNT: usize = FIELDS.len() + 1;

const LABEL_WIDTH: usize = 19;

pub struct FormView<'a, S: Slot> {
    store: &'a mut EntryStore<S>,
    codec: Codec,
    session: Session,
    today: NaiveDate,
    focused: usize,
    status_message: Option<String>,
}

impl<'a, S: Slot> FormView<'a, S> {
    pub fn new(store: &'a mut EntryStore<S>, codec: Codec, today: NaiveDate) -> Self {
        let session = Session::new(store, &codec, today);
        Self {
            store,
            codec,
            session,
            today,
            focused: FIELD_DATE + 1,
            status_message: None,
        }
    }

    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        self.session.begin_edit(self.store, &self.codec, index)?;
        self.focused = FIELD_DATE + 1;
        Ok(())
    }

    fn focused_field(&self) -> Option<Field> {
        self.focused.checked_sub(1).and_then(|i| FIELDS.get(i).copied())
    }

    fn focused_text(&self) -> String {
        match self.focused_field() {
            Some(field) => self.session.field(field).to_string(),
            None => self.session.date.clone(),
        }
    }

    fn set_focused_text(&mut self, text: String) {
        match self.focused_field() {
            Some(field) => self.session.set_field(field, text),
            None => self.session.date = text,
        }
    }

    fn title(&self) -> String {
        match self.session.edit_index() {
            Some(i) => format!(" Editing entry #{}", i + 1),
            None => format!(" New entry  ({} entries saved)", self.store.len()),
        }
    }

    fn input_line(&self, slot: usize, label: &str, value: &str) -> Line<'static> {
        let is_focused = self.focused == slot;
        let label_style = if is_focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if is_focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("   {label:<LABEL_WIDTH$}"), label_style),
            Span::styled(
                format!("{value}{cursor}"),
                if is_focused { FOCUSED_STYLE } else { Style::default() },
            ),
        ])
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let reconciliation = self.session.recompute(&self.codec);

        let mut lines = vec![Line::from("")];
        lines.push(self.input_line(FIELD_DATE, "Date", &self.session.date));
        for (i, field) in FIELDS.iter().enumerate() {
            lines.push(self.input_line(i + 1, field.label(), self.session.field(*field)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw(format!("   {:<LABEL_WIDTH$}", "Expected in box")),
            Span::raw(self.codec.display(reconciliation.expected_box)),
        ]));
        let mut variance_line = vec![Span::raw(format!("   {:<LABEL_WIDTH$}", "Variance"))];
        if let Some(v) = reconciliation.variance {
            variance_line.push(money_span(&self.codec, v));
        }
        lines.push(Line::from(variance_line));
        for (label, value) in [
            ("Derived saving", reconciliation.taken_saving),
            ("Derived leftover", reconciliation.left_over),
        ] {
            lines.push(Line::from(Span::styled(
                format!("   {label:<LABEL_WIDTH$}{}", self.codec.display(value)),
                FOOTER_STYLE,
            )));
        }

        lines.push(Line::from(""));
        let width = area.width.saturating_sub(4) as usize;
        let (wrapped, _) = wrap_text(reconciliation.status.message(), width);
        let style = tone_style(reconciliation.status.tone());
        for line in wrapped.lines() {
            lines.push(Line::from(Span::styled(format!("   {line}"), style)));
        }

        if let Some(msg) = &self.status_message {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("   {msg}"),
                Style::default().fg(Color::Yellow),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn accepts(&self, c: char) -> bool {
        if self.focused == FIELD_DATE {
            c.is_ascii_digit() || c == '-'
        } else {
            c.is_ascii_digit() || c == ',' || c == '.'
        }
    }

    fn save(&mut self) {
        match self.session.save(self.store, &self.codec, self.today) {
            Ok(SaveOutcome::Created(i)) => {
                self.status_message = Some(format!("Saved entry #{}", i + 1));
                self.focused = FIELD_DATE + 1;
            }
            Ok(SaveOutcome::Updated(i)) => {
                self.status_message = Some(format!("Updated entry #{}", i + 1));
                self.focused = FIELD_DATE + 1;
            }
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }
}

impl<S: Slot> View for FormView<'_, S> {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep, content_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.title()).style(HEADER_STYLE), header_area);

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep);

        self.draw_form(frame, content_area);

        let hints = if self.session.edit_index().is_some() {
            " Tab/Up/Down=fields  Enter=save  Esc=cancel edit"
        } else {
            " Tab/Up/Down=fields  Enter=save  Esc=quit"
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                if self.session.edit_index().is_none() {
                    return ViewAction::Close;
                }
                self.session.reset(self.store, &self.codec, self.today);
                self.status_message = Some("Edit cancelled".into());
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focused = (self.focused + 1) % FIELD_COUNT;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = if self.focused == 0 { FIELD_COUNT - 1 } else { self.focused - 1 };
            }
            KeyCode::Char(c) => {
                if self.accepts(c) {
                    let mut text = self.focused_text();
                    text.push(c);
                    self.set_focused_text(text);
                }
                self.status_message = None;
            }
            KeyCode::Backspace => {
                let mut text = self.focused_text();
                text.pop();
                self.set_focused_text(text);
                self.status_message = None;
            }
            KeyCode::Enter => self.save(),
            _ => {}
        }
        ViewAction::Continue
    }
}

pub fn run(edit: Option<usize>) -> Result<()> {
    let mut store = open_store()?;
    let codec = load_settings().codec();
    let index = edit.map(|n| to_index(n, store.len())).transpose()?;

    let mut view = FormView::new(&mut store, codec, today());
    if let Some(index) = index {
        view.begin_edit(index)?;
    }
    run_view(&mut view)
}
