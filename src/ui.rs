use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{
        Block, BorderType, Cell, Clear, LineGauge, List, ListItem, ListState, Paragraph, Row,
        Table, TableState, Wrap,
    },
};

use crate::calendar::{CalendarEvent, CalendarState, CalendarView};
use crate::dataset::{DatasetView, Record, StatusFilter};
use crate::domain::{DashConfig, Icon, Page};
use crate::expiry::{ExpiryStatus, Product};
use crate::form::{FormField, ProductForm};
use crate::inputter::InputResult;
use crate::model::{InputTarget, Model};
use crate::pagination::PageMarker;
use crate::routes::{Route, RouteStatus};
use crate::settings::{
    DisplaySettings, FONT_MAX, FONT_MIN, SettingsControl, Theme, ZOOM_MAX, ZOOM_MIN,
};

pub const SIDEBAR_WIDTH_OPEN: u16 = 24;
pub const SIDEBAR_WIDTH_CLOSED: u16 = 6;
pub const TOP_BAR_HEIGHT: u16 = 3;
pub const STATUSLINE_HEIGHT: u16 = 1;
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Colours of one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub sidebar_bg: Color,
    pub sidebar_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub border: Color,
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub danger: Color,
    pub critical: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::Rgb(248, 250, 252),
                fg: Color::Rgb(30, 41, 59),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(99, 102, 241),
                sidebar_bg: Color::Rgb(255, 255, 255),
                sidebar_fg: Color::Rgb(51, 65, 85),
                selection_bg: Color::Rgb(99, 102, 241),
                selection_fg: Color::Rgb(255, 255, 255),
                border: Color::Rgb(203, 213, 225),
                success: Color::Rgb(22, 163, 74),
                info: Color::Rgb(37, 99, 235),
                warning: Color::Rgb(202, 138, 4),
                danger: Color::Rgb(234, 88, 12),
                critical: Color::Rgb(220, 38, 38),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(15, 23, 42),
                fg: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(148, 163, 184),
                accent: Color::Rgb(139, 92, 246),
                sidebar_bg: Color::Rgb(30, 41, 59),
                sidebar_fg: Color::Rgb(203, 213, 225),
                selection_bg: Color::Rgb(139, 92, 246),
                selection_fg: Color::Rgb(255, 255, 255),
                border: Color::Rgb(51, 65, 85),
                success: Color::Rgb(74, 222, 128),
                info: Color::Rgb(96, 165, 250),
                warning: Color::Rgb(250, 204, 21),
                danger: Color::Rgb(251, 146, 60),
                critical: Color::Rgb(248, 113, 113),
            },
            Theme::Ocean => Palette {
                bg: Color::Rgb(3, 4, 94),
                fg: Color::Rgb(202, 240, 248),
                muted: Color::Rgb(144, 224, 239),
                accent: Color::Rgb(0, 180, 216),
                sidebar_bg: Color::Rgb(2, 62, 138),
                sidebar_fg: Color::Rgb(173, 232, 244),
                selection_bg: Color::Rgb(0, 180, 216),
                selection_fg: Color::Rgb(3, 4, 94),
                border: Color::Rgb(0, 119, 182),
                success: Color::Rgb(72, 202, 228),
                info: Color::Rgb(144, 224, 239),
                warning: Color::Rgb(255, 209, 102),
                danger: Color::Rgb(255, 159, 28),
                critical: Color::Rgb(239, 71, 111),
            },
            Theme::Terminal => Palette {
                bg: Color::Rgb(0, 0, 0),
                fg: Color::Rgb(0, 255, 65),
                muted: Color::Rgb(0, 143, 17),
                accent: Color::Rgb(0, 255, 65),
                sidebar_bg: Color::Rgb(13, 2, 8),
                sidebar_fg: Color::Rgb(0, 255, 65),
                selection_bg: Color::Rgb(0, 59, 0),
                selection_fg: Color::Rgb(0, 255, 65),
                border: Color::Rgb(0, 143, 17),
                success: Color::Rgb(0, 255, 65),
                info: Color::Rgb(0, 200, 255),
                warning: Color::Rgb(255, 255, 0),
                danger: Color::Rgb(255, 140, 0),
                critical: Color::Rgb(255, 0, 60),
            },
        }
    }

    fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    fn card(&self, title: &str) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
            .title(Line::from(format!(" {title} ")).bold().fg(self.fg))
            .style(self.text())
    }

    fn route_status(&self, status: RouteStatus) -> Style {
        let color = match status {
            RouteStatus::Completed => self.success,
            RouteStatus::InProgress => self.info,
            RouteStatus::Pending => self.warning,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn expiry_status(&self, status: ExpiryStatus) -> Style {
        let color = match status {
            ExpiryStatus::Critical => self.critical,
            ExpiryStatus::Danger => self.danger,
            ExpiryStatus::Warning => self.warning,
            ExpiryStatus::Safe => self.success,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

pub struct DashboardUI {
    status_timeout: Duration,
}

impl DashboardUI {
    pub fn new(_cfg: &DashConfig) -> Self {
        Self {
            status_timeout: STATUS_MESSAGE_TIMEOUT,
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let display = model.display();
        let palette = Palette::for_theme(display.theme);
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.text()), area);

        let sidebar_width = if display.sidebar_open {
            SIDEBAR_WIDTH_OPEN
        } else {
            SIDEBAR_WIDTH_CLOSED
        };
        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)]).areas(area);
        let [top_bar, content, statusline] = Layout::vertical([
            Constraint::Length(TOP_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUSLINE_HEIGHT),
        ])
        .areas(main);

        self.draw_sidebar(model, &palette, frame, sidebar);
        self.draw_top_bar(model, &palette, frame, top_bar);

        let margin = display.content_margin();
        let content = content.inner(Margin::new(margin, 0));
        match model.page() {
            Page::Dashboard | Page::Analytics => draw_welcome(&palette, frame, content),
            Page::Route => draw_routes(model, &palette, frame, content),
            Page::MonitorExpired => draw_monitor(model, &palette, frame, content),
            Page::Calendar => draw_calendar(model.calendar(), &palette, frame, content),
            Page::Settings => draw_settings(model, &palette, frame, content),
        }

        self.draw_statusline(model, &palette, frame, statusline);

        if let Some(form) = model.product_form() {
            draw_product_form(form, &palette, frame, area);
        }
        if let Some((InputTarget::EventTitle, input)) = model.active_input() {
            let date = model.calendar().cursor();
            draw_prompt(&format!("Enter Event Title ({date})"), input, &palette, frame, area);
        }
        if let Some(prompt) = model.confirm_prompt() {
            draw_confirm(&prompt, &palette, frame, area);
        }
        if let Some(help) = model.popup() {
            draw_popup("Help", help, &palette, frame, area);
        }
    }

    fn draw_sidebar(&self, model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
        let open = model.display().sidebar_open;
        let block = Block::bordered()
            .border_set(border::THICK)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.sidebar_bg).fg(palette.sidebar_fg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [logo, nav] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
        let mut logo_line = vec![Span::styled(" PS ", palette.selected())];
        if open {
            logo_line.push(" Pro Sidebar".bold());
        }
        frame.render_widget(Paragraph::new(Line::from(logo_line)), logo);

        let items: Vec<ListItem> = Page::MENU
            .iter()
            .map(|page| {
                let mut spans = vec![Span::raw(format!(" {} ", page.icon().glyph()))];
                if open {
                    spans.push(Span::raw(page.label()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let mut state = ListState::default().with_selected(Some(model.page().menu_position()));
        let list = List::new(items).highlight_style(palette.selected());
        frame.render_stateful_widget(list, nav, &mut state);
    }

    fn draw_top_bar(&self, model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
        let toggle = if model.display().sidebar_open {
            Icon::Close
        } else {
            Icon::Menu
        };
        let actions = Line::from(vec![
            format!(" {} ", Icon::Settings.glyph()).fg(palette.accent),
            "<,>".fg(palette.muted),
            format!("  {} ", toggle.glyph()).fg(palette.accent),
            "<b> ".fg(palette.muted),
        ]);
        let block = Block::bordered()
            .border_style(Style::default().fg(palette.border))
            .title(Line::from(" Welcome to Pro Sidebar ").bold().fg(palette.fg))
            .title(actions.right_aligned())
            .style(palette.text());
        let today = format!("Today: {}", model.reference_date().format("%A, %d %B %Y"));
        frame.render_widget(
            Paragraph::new(Line::from(today).fg(palette.muted)).block(block),
            area,
        );
    }

    fn draw_statusline(&self, model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
        let line = match model.active_input() {
            Some((InputTarget::RouteSearch | InputTarget::ProductSearch, input)) => {
                let prefix = format!(" {} /", Icon::Search.glyph());
                frame.set_cursor_position((
                    area.x + prefix.chars().count() as u16 + input.cursor as u16,
                    area.y,
                ));
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(palette.accent)),
                    Span::raw(input.input.clone()),
                ])
            }
            _ => {
                let recent = model.last_status_message_update().elapsed() < self.status_timeout;
                if recent {
                    Line::from(format!(" {}", model.status_message())).fg(palette.accent)
                } else {
                    Line::from(" <?> help  <tab> next menu item  <q> quit").fg(palette.muted)
                }
            }
        };
        frame.render_widget(Paragraph::new(line).style(palette.text()), area);
    }
}

fn page_header(title: &str, subtitle: &str, palette: &Palette) -> Text<'static> {
    Text::from(vec![
        Line::from(title.to_string()).bold().fg(palette.fg),
        Line::from(subtitle.to_string()).fg(palette.muted),
    ])
}

fn draw_welcome(palette: &Palette, frame: &mut Frame, area: Rect) {
    let [welcome, cards] =
        Layout::vertical([Constraint::Length(11), Constraint::Length(6)]).areas(area);

    let mut lines = vec![
        Line::from("Professional sidebar with 4 different themes:"),
        Line::default(),
    ];
    for theme in Theme::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", theme.icon().glyph()), Style::default().fg(palette.accent)),
            Span::raw(theme.label()),
        ]));
    }
    lines.push(Line::default());
    lines.push(
        Line::from("Press <b> to open or close the sidebar, pick your favourite theme in Settings.")
            .fg(palette.muted),
    );
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(palette.card("Modern Pro Sidebar")),
        welcome,
    );

    let demo = [
        (Icon::BarChart, "Analytics", "Track your performance metrics"),
        (Icon::Truck, "Route Management", "Manage your delivery routes"),
        (Icon::Message, "Messages", "Stay connected with your team"),
    ];
    let areas = Layout::horizontal([Constraint::Fill(1); 3]).spacing(1).split(cards);
    for ((icon, title, text), card) in demo.iter().zip(areas.iter()) {
        let body = Text::from(vec![
            Line::from(icon.glyph()).fg(palette.accent).centered(),
            Line::from(*text).fg(palette.muted).centered(),
        ]);
        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: true }).block(palette.card(title)),
            *card,
        );
    }
}

// -------------------- Table pages ---------------------------------------- //

fn filter_label<S: std::fmt::Display>(filter: &StatusFilter<S>) -> String {
    match filter {
        StatusFilter::All => "All Status".to_string(),
        StatusFilter::Only(s) => s.to_string(),
    }
}

fn draw_controls<R: Record>(
    view: &DatasetView<R>,
    placeholder: &str,
    searching: bool,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) where
    R::Status: std::fmt::Display,
{
    let state = view.state();
    let query = if state.query.is_empty() && !searching {
        Span::styled(placeholder.to_string(), palette.dim())
    } else {
        Span::raw(state.query.clone())
    };
    let search_style = if searching {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.fg)
    };
    let line = Line::from(vec![
        Span::raw("Show "),
        Span::styled(format!("[{}]", state.page_size), Style::default().fg(palette.accent)),
        Span::raw(" entries   "),
        Span::styled(format!("{} ", Icon::Filter.glyph()), Style::default().fg(palette.accent)),
        Span::raw(filter_label(&state.status_filter)),
        Span::raw("   "),
        Span::styled(format!("{} ", Icon::Search.glyph()), search_style),
        query,
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.text()), area);
}

#[allow(clippy::too_many_arguments)]
fn draw_dataset<R: Record>(
    view: &DatasetView<R>,
    widths: &[Constraint],
    status_style: impl Fn(&R) -> Style,
    empty_text: &str,
    palette: &Palette,
    display: &DisplaySettings,
    frame: &mut Frame,
    area: Rect,
) {
    let header = Row::new(R::COLUMNS.iter().enumerate().map(|(idx, name)| {
        let mut label = name.to_string();
        if let Some(sort) = view.sort()
            && sort.column == idx
        {
            label.push_str(if sort.ascending { " ▲" } else { " ▼" });
        }
        let mut style = Style::default().fg(palette.fg).add_modifier(Modifier::BOLD);
        if idx == view.sort_column() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(label).style(style)
    }))
    .height(1)
    .bottom_margin(1);

    let records = view.page_records();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(palette.text());

    if records.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let [_, placeholder] =
            Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(empty_text).alignment(Alignment::Center).style(palette.dim()),
            placeholder,
        );
        return;
    }

    let status_column = R::COLUMNS.len() - 1;
    let rows = records.iter().map(|record| {
        let cells = record.cells().into_iter().enumerate().map(|(idx, cell)| {
            if idx == status_column {
                Cell::from(cell).style(status_style(record))
            } else {
                Cell::from(cell)
            }
        });
        Row::new(cells).height(display.row_height())
    });

    let table = Table::new(rows, widths.to_vec())
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(palette.selected())
        .highlight_symbol("▶ ");
    let mut state = TableState::default().with_selected(Some(view.selected_row()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn pagination_line<R: Record>(view: &DatasetView<R>, palette: &Palette) -> Line<'static> {
    let current = view.state().page_index;
    let pages = view.page_count();
    let enabled = Style::default().fg(palette.accent);
    let disabled = palette.dim();

    let mut spans = vec![Span::styled(
        format!(" {} ", Icon::ChevronLeft.glyph()),
        if current > 1 { enabled } else { disabled },
    )];
    for marker in view.page_buttons() {
        match marker {
            PageMarker::Page(page) if page == current => {
                spans.push(Span::styled(format!(" {page} "), palette.selected()))
            }
            PageMarker::Page(page) => spans.push(Span::raw(format!(" {page} "))),
            PageMarker::Ellipsis => spans.push(Span::styled(" ... ", disabled)),
        }
    }
    spans.push(Span::styled(
        format!(" {} ", Icon::ChevronRight.glyph()),
        if current < pages { enabled } else { disabled },
    ));
    Line::from(spans).right_aligned()
}

fn draw_footer<R: Record>(view: &DatasetView<R>, palette: &Palette, frame: &mut Frame, area: Rect) {
    let (first, last, total) = view.showing_range();
    let [info, pager] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
    frame.render_widget(
        Paragraph::new(format!("Showing {first} to {last} of {total} entries")).style(palette.dim()),
        info,
    );
    frame.render_widget(Paragraph::new(pagination_line(view, palette)), pager);
}

fn is_searching(model: &Model, target: InputTarget) -> bool {
    model.active_input().is_some_and(|(t, _)| t == target)
}

fn draw_routes(model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [header, controls, table, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(page_header(
            "Route Management",
            "Manage and track all delivery routes",
            palette,
        )),
        header,
    );
    let view = model.routes();
    let searching = is_searching(model, InputTarget::RouteSearch);
    draw_controls(view, "Search routes...", searching, palette, frame, controls);
    let widths = [
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(12),
    ];
    draw_dataset(
        view,
        &widths,
        |r: &Route| palette.route_status(r.status),
        "No routes found",
        palette,
        model.display(),
        frame,
        table,
    );
    draw_footer(view, palette, frame, footer);
}

fn stat_card(label: &str, value: usize, icon: Icon, color: Color, palette: &Palette) -> Paragraph<'static> {
    let body = Text::from(vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon.glyph()), Style::default().fg(color)),
            Span::styled(label.to_string(), palette.dim()),
        ]),
        Line::from(value.to_string()).bold().fg(color),
    ]);
    Paragraph::new(body).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(palette.text()),
    )
}

fn draw_monitor(model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [header, stats, controls, table, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    let [title, action] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(20)]).areas(header);
    frame.render_widget(
        Paragraph::new(page_header(
            "Monitor Expired Products",
            "Track and manage product expiration dates",
            palette,
        )),
        title,
    );
    frame.render_widget(
        Paragraph::new(Line::from(" + Add Product <a> ").style(palette.selected())).right_aligned(),
        action,
    );

    let counts = model.expiry_stats();
    let cards = [
        stat_card("Total Products", counts.total, Icon::Package, palette.accent, palette),
        stat_card("Critical (≤1 day)", counts.critical, Icon::Alert, palette.critical, palette),
        stat_card("Danger (≤3 days)", counts.danger, Icon::Alert, palette.danger, palette),
        stat_card("Warning (≤7 days)", counts.warning, Icon::Calendar, palette.warning, palette),
    ];
    let areas = Layout::horizontal([Constraint::Fill(1); 4]).spacing(1).split(stats);
    for (card, card_area) in cards.into_iter().zip(areas.iter()) {
        frame.render_widget(card, *card_area);
    }

    let view = model.products();
    let searching = is_searching(model, InputTarget::ProductSearch);
    draw_controls(view, "Search products or category...", searching, palette, frame, controls);
    let widths = [
        Constraint::Fill(2),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(15),
    ];
    draw_dataset(
        view,
        &widths,
        |p: &Product| palette.expiry_status(p.status),
        "No products found",
        palette,
        model.display(),
        frame,
        table,
    );
    draw_footer(view, palette, frame, footer);
}

// -------------------- Calendar ------------------------------------------- //

fn event_color(event: &CalendarEvent, palette: &Palette) -> Color {
    Color::from_str(&event.color).unwrap_or(palette.accent)
}

fn event_line(event: &CalendarEvent, with_time: bool, palette: &Palette) -> Line<'static> {
    let color = event_color(event, palette);
    let mut spans = vec![Span::styled("● ", Style::default().fg(color))];
    if with_time && !event.all_day {
        spans.push(Span::styled(format!("{} ", event.start.format("%H:%M")), palette.dim()));
    }
    spans.push(Span::raw(event.title.clone()));
    Line::from(spans)
}

fn day_style(date: NaiveDate, calendar: &CalendarState, in_month: bool, palette: &Palette) -> Style {
    if date == calendar.cursor() {
        palette.selected()
    } else if date == calendar.today() {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else if !in_month {
        palette.dim()
    } else {
        Style::default().fg(palette.fg)
    }
}

fn draw_calendar(calendar: &CalendarState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [header, toolbar, body, info] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(8),
        Constraint::Length(3),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(page_header("Calendar", "Manage your schedule and events", palette)),
        header,
    );

    let views = [CalendarView::Month, CalendarView::Week, CalendarView::Day];
    let mut right: Vec<Span> = Vec::new();
    for view in views {
        let style = if view == calendar.view() {
            palette.selected()
        } else {
            palette.dim()
        };
        right.push(Span::styled(format!(" {} ", view.label()), style));
    }
    let [left_area, center_area, right_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .areas(toolbar);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            format!("{} <p>  <n> {}", Icon::ChevronLeft.glyph(), Icon::ChevronRight.glyph())
                .fg(palette.accent),
            "  today <t>".fg(palette.muted),
        ])),
        left_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(calendar.title()).bold().fg(palette.fg).centered()),
        center_area,
    );
    frame.render_widget(Paragraph::new(Line::from(right).right_aligned()), right_area);

    match calendar.view() {
        CalendarView::Month => draw_month(calendar, palette, frame, body),
        CalendarView::Week => draw_week(calendar, palette, frame, body),
        CalendarView::Day => draw_day(calendar, palette, frame, body),
    }

    let hints = Line::from(vec![
        Span::raw("<a> add event on selected day  "),
        Span::raw("<d> delete selected event  "),
        Span::raw("<j/k> select event  "),
        Span::raw("<</>> move event one day"),
    ])
    .fg(palette.muted);
    frame.render_widget(
        Paragraph::new(hints).wrap(Wrap { trim: true }).block(palette.card("How to use")),
        info,
    );
}

fn draw_month(calendar: &CalendarState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let weeks = calendar.month_grid();
    let month = calendar.cursor().month();
    let row_height = std::cmp::max(2, area.height.saturating_sub(3) / weeks.len() as u16);

    let header = Row::new(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(|d| {
        Cell::from(Line::from(d).centered()).style(Style::default().bold().fg(palette.fg))
    }));

    let rows = weeks.iter().map(|week| {
        let cells = week.iter().map(|&date| {
            let events = calendar.events_on(date);
            let mut lines = vec![
                Line::from(date.day().to_string())
                    .style(day_style(date, calendar, date.month() == month, palette))
                    .right_aligned(),
            ];
            let room = row_height.saturating_sub(1) as usize;
            if events.len() <= room {
                lines.extend(events.iter().map(|e| event_line(e, true, palette)));
            } else {
                let shown = room.saturating_sub(1);
                lines.extend(events.iter().take(shown).map(|e| event_line(e, true, palette)));
                lines.push(Line::from(format!("+{} more", events.len() - shown)).fg(palette.muted));
            }
            Cell::from(Text::from(lines))
        });
        Row::new(cells).height(row_height)
    });

    let table = Table::new(rows, [Constraint::Fill(1); 7])
        .header(header)
        .column_spacing(1)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border))
                .style(palette.text()),
        );
    frame.render_widget(table, area);
}

fn draw_week(calendar: &CalendarState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let days = calendar.week_days();
    let areas = Layout::horizontal([Constraint::Fill(1); 7]).split(area);
    for (date, day_area) in days.iter().zip(areas.iter()) {
        let style = day_style(*date, calendar, true, palette);
        let lines: Vec<Line> = calendar
            .events_on(*date)
            .iter()
            .map(|e| event_line(e, true, palette))
            .collect();
        let block = Block::bordered()
            .border_style(Style::default().fg(palette.border))
            .title(Line::from(date.format(" %a %-d ").to_string()).style(style))
            .style(palette.text());
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), *day_area);
    }
}

fn draw_day(calendar: &CalendarState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let events = calendar.events_on(calendar.cursor());
    let block = palette.card(&calendar.cursor().format("%A").to_string());
    if events.is_empty() {
        frame.render_widget(
            Paragraph::new("No events. Press <a> to add one.").style(palette.dim()).block(block),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = events
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", e.time_label()), palette.dim()),
                Span::styled("● ", Style::default().fg(event_color(e, palette))),
                Span::raw(e.title.clone()),
            ]))
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(calendar.selected_index()));
    frame.render_stateful_widget(
        List::new(items).block(block).highlight_style(palette.selected()),
        area,
        &mut state,
    );
}

// -------------------- Settings ------------------------------------------- //

fn focus_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    }
}

fn draw_settings(model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
    let display = model.display();
    let focus = model.settings_control();
    let [header, themes, zoom, font, info] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(page_header("Settings", "Customize your application preferences", palette)),
        header,
    );

    let theme_block = palette
        .card("Theme Selection")
        .border_style(focus_style(focus == SettingsControl::Theme, palette));
    let inner = theme_block.inner(themes);
    frame.render_widget(theme_block, themes);
    let cards = Layout::horizontal([Constraint::Fill(1); 4]).spacing(1).split(inner);
    for (theme, card) in Theme::ALL.iter().zip(cards.iter()) {
        let active = *theme == display.theme;
        let mut lines = vec![Line::from(format!("{} {}", theme.icon().glyph(), theme.label())).centered()];
        if active {
            lines.push(Line::from("Active").centered());
        }
        let style = if active { palette.selected() } else { palette.dim() };
        frame.render_widget(Paragraph::new(lines).style(style), *card);
    }

    let zoom_ratio = (display.zoom - ZOOM_MIN) as f64 / (ZOOM_MAX - ZOOM_MIN) as f64;
    let zoom_block = palette
        .card("Screen Zoom")
        .border_style(focus_style(focus == SettingsControl::Zoom, palette));
    frame.render_widget(
        LineGauge::default()
            .block(zoom_block)
            .filled_style(Style::default().fg(palette.accent))
            .unfilled_style(Style::default().fg(palette.border))
            .label(format!("Current Zoom: {}%  ({}%-{}%)", display.zoom, ZOOM_MIN, ZOOM_MAX))
            .ratio(zoom_ratio),
        zoom,
    );

    let font_ratio = (display.font_size - FONT_MIN) as f64 / (FONT_MAX - FONT_MIN) as f64;
    let font_block = palette
        .card("Font Size")
        .border_style(focus_style(focus == SettingsControl::FontSize, palette));
    let font_inner = font_block.inner(font);
    frame.render_widget(font_block, font);
    let [gauge, preview] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(2)]).areas(font_inner);
    frame.render_widget(
        LineGauge::default()
            .filled_style(Style::default().fg(palette.accent))
            .unfilled_style(Style::default().fg(palette.border))
            .label(format!("Current Size: {}px  ({}px-{}px)", display.font_size, FONT_MIN, FONT_MAX))
            .ratio(font_ratio),
        gauge,
    );
    let mut preview_style = Style::default().fg(palette.fg);
    if display.row_height() > 1 {
        preview_style = preview_style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(
        Paragraph::new("Preview: The quick brown fox jumps over the lazy dog").style(preview_style),
        preview,
    );

    let details = vec![
        Line::from(vec!["Version:      ".fg(palette.muted), env!("CARGO_PKG_VERSION").into()]),
        Line::from(vec!["Last Updated: ".fg(palette.muted), "December 2025".into()]),
        Line::from(vec!["Framework:    ".fg(palette.muted), "Rust + ratatui".into()]),
    ];
    frame.render_widget(
        Paragraph::new(details).block(palette.card("Application Info")),
        info,
    );
}

// -------------------- Overlays ------------------------------------------- //

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn draw_popup(title: &str, text: &str, palette: &Palette, frame: &mut Frame, area: Rect) {
    let height = std::cmp::min(text.lines().count() as u16 + 2, area.height);
    let popup = centered(area, 60, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text.to_string())
            .block(palette.card(title).title_bottom(Line::from(" <esc> close ").centered())),
        popup,
    );
}

fn draw_confirm(prompt: &str, palette: &Palette, frame: &mut Frame, area: Rect) {
    let popup = centered(area, 60, 5);
    frame.render_widget(Clear, popup);
    let text = Text::from(vec![
        Line::from(prompt.to_string()),
        Line::default(),
        Line::from(vec!["<y> ".fg(palette.critical).bold(), "delete   ".into(), "<n> ".bold(), "cancel".into()]),
    ]);
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(palette.card("Confirm")),
        popup,
    );
}

fn draw_prompt(title: &str, input: &InputResult, palette: &Palette, frame: &mut Frame, area: Rect) {
    let popup = centered(area, 50, 3);
    frame.render_widget(Clear, popup);
    let block = palette.card(title);
    let inner = block.inner(popup);
    frame.render_widget(Paragraph::new(input.input.clone()).block(block), popup);
    frame.set_cursor_position((inner.x + input.cursor as u16, inner.y));
}

fn draw_product_form(form: &ProductForm, palette: &Palette, frame: &mut Frame, area: Rect) {
    let popup = centered(area, 54, 11);
    frame.render_widget(Clear, popup);
    let block = palette
        .card("Add New Product")
        .title_bottom(Line::from(" <tab> next field  <enter> add  <esc> cancel ").centered());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [name, category, expiry] = Layout::vertical([Constraint::Length(3); 3]).areas(inner);
    let field = |label: &str, focused: bool| {
        Block::bordered()
            .title(format!(" {label} "))
            .border_style(focus_style(focused, palette))
    };

    let name_block = field("Product Name", form.focus == FormField::Name);
    let name_inner = name_block.inner(name);
    let name_text = if form.name.value().is_empty() {
        Span::styled("Enter product name", palette.dim())
    } else {
        Span::raw(form.name.value().to_string())
    };
    frame.render_widget(Paragraph::new(Line::from(name_text)).block(name_block), name);

    let category_text = match form.category {
        Some(c) => Span::raw(format!("{} {} {}", Icon::ChevronLeft.glyph(), c.name(), Icon::ChevronRight.glyph())),
        None => Span::styled("Select category (←/→)", palette.dim()),
    };
    frame.render_widget(
        Paragraph::new(Line::from(category_text))
            .block(field("Category", form.focus == FormField::Category)),
        category,
    );

    let expiry_block = field("Expiry Date (YYYY-MM-DD)", form.focus == FormField::Expiry);
    let expiry_inner = expiry_block.inner(expiry);
    frame.render_widget(
        Paragraph::new(form.expiry.value().to_string()).block(expiry_block),
        expiry,
    );

    match form.focus {
        FormField::Name => frame.set_cursor_position((
            name_inner.x + form.name.get().cursor as u16,
            name_inner.y,
        )),
        FormField::Expiry => frame.set_cursor_position((
            expiry_inner.x + form.expiry.get().cursor as u16,
            expiry_inner.y,
        )),
        FormField::Category => {}
    }
}
