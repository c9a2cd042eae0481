use chrono::Datelike;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::cli::{open_store, today};
use crate::error::Result;
use crate::fmt::Codec;
use crate::models::LedgerEntry;
use crate::reports::{self, SalesBucket, MONTH_LABELS};
use crate::settings::load_settings;
use crate::tui::{run_view, View, ViewAction, FOOTER_STYLE, HEADER_STYLE};

pub struct ChartView {
    entries: Vec<LedgerEntry>,
    codec: Codec,
    year: i32,
    /// `Some` for the daily view of one month.
    month: Option<u32>,
}

impl ChartView {
    pub fn new(entries: Vec<LedgerEntry>, codec: Codec, year: i32, month: Option<u32>) -> Self {
        Self {
            entries,
            codec,
            year,
            month,
        }
    }

    fn buckets(&self) -> Vec<SalesBucket> {
        match self.month {
            Some(m) => reports::daily_sales(&self.entries, self.year, m),
            None => reports::monthly_sales(&self.entries, self.year),
        }
    }

    fn title(&self) -> String {
        match self.month {
            Some(m) => format!(" Daily sales, {} {}", MONTH_LABELS[(m - 1) as usize], self.year),
            None => format!(" Monthly sales, {}", self.year),
        }
    }

    fn step(&mut self, forward: bool) {
        match self.month {
            Some(m) => {
                let (year, month) = match (forward, m) {
                    (true, 12) => (self.year + 1, 1),
                    (true, m) => (self.year, m + 1),
                    (false, 1) => (self.year - 1, 12),
                    (false, m) => (self.year, m - 1),
                };
                self.year = year;
                self.month = Some(month);
            }
            None => self.year += if forward { 1 } else { -1 },
        }
    }
}

impl View for ChartView {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, sep, chart_area, total_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.title()).style(HEADER_STYLE), header_area);
        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(sep_line.as_str()).style(Style::default().fg(Color::DarkGray)),
            sep,
        );

        let buckets = self.buckets();
        let bar_style = Style::default().fg(Color::Rgb(80, 220, 100));
        let bars: Vec<Bar> = buckets
            .iter()
            .map(|b| {
                Bar::default()
                    .value(b.total.max(0) as u64)
                    .text_value(String::new())
                    .label(Line::from(b.label.clone()))
                    .style(bar_style)
            })
            .collect();

        let count = bars.len().max(1) as u16;
        let bar_width = (chart_area.width / count).saturating_sub(1).clamp(1, 6);
        let chart = BarChart::default()
            .block(
                Block::default()
                    .title("Sales")
                    .title_style(Style::default().add_modifier(Modifier::BOLD))
                    .borders(Borders::NONE),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1);
        frame.render_widget(chart, chart_area);

        let total = buckets.iter().fold(0i64, |acc, b| acc.saturating_add(b.total));
        frame.render_widget(
            Paragraph::new(format!(" Total: {}", self.codec.money(total)))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            total_area,
        );
        frame.render_widget(
            Paragraph::new(" Left/Right=period  m=monthly/daily  Esc=quit").style(FOOTER_STYLE),
            hints_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return ViewAction::Close,
            KeyCode::Left => self.step(false),
            KeyCode::Right => self.step(true),
            KeyCode::Char('m') => {
                self.month = match self.month {
                    Some(_) => None,
                    None => Some(if self.year == today().year() { today().month() } else { 1 }),
                };
            }
            _ => {}
        }
        ViewAction::Continue
    }
}

pub fn run(year: Option<i32>, month: Option<u32>) -> Result<()> {
    let store = open_store()?;
    let codec = load_settings().codec();
    let year = year.unwrap_or_else(|| today().year());
    let mut view = ChartView::new(store.entries().to_vec(), codec, year, month);
    run_view(&mut view)
}
