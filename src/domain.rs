use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;

use crate::settings::Theme;

#[derive(Debug)]
pub enum DashError {
    IoError(Error),
    DateParse(chrono::ParseError),
    InvalidArgument(String),
    LogSetup(String),
}

impl fmt::Display for DashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashError::IoError(e) => write!(f, "terminal i/o failed: {e}"),
            DashError::DateParse(e) => write!(f, "invalid date: {e}"),
            DashError::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            DashError::LogSetup(s) => write!(f, "could not set up logging: {s}"),
        }
    }
}

impl std::error::Error for DashError {}

impl From<Error> for DashError {
    fn from(err: Error) -> Self {
        DashError::IoError(err)
    }
}

impl From<chrono::ParseError> for DashError {
    fn from(err: chrono::ParseError) -> Self {
        DashError::DateParse(err)
    }
}

/// Session configuration, built once from the command line and handed to the
/// model, controller and ui.
#[derive(Debug, Clone, Setters)]
pub struct DashConfig {
    pub event_poll_time: u64,
    pub reference_date: NaiveDate,
    pub default_page_size: usize,
    pub theme: Theme,
    pub sidebar_open: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            // The mock data is dated around this day.
            reference_date: NaiveDate::from_ymd_opt(2025, 12, 5).unwrap_or_default(),
            default_page_size: 10,
            theme: Theme::Light,
            sidebar_open: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Analytics,
    Calendar,
    MonitorExpired,
    Route,
    Settings,
}

impl Page {
    pub const MENU: [Page; 6] = [
        Page::Dashboard,
        Page::Analytics,
        Page::Calendar,
        Page::MonitorExpired,
        Page::Route,
        Page::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Analytics => "Analytics",
            Page::Calendar => "Calendar",
            Page::MonitorExpired => "Monitor Expired",
            Page::Route => "Route",
            Page::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            Page::Dashboard => Icon::Home,
            Page::Analytics => Icon::BarChart,
            Page::Calendar => Icon::Calendar,
            Page::MonitorExpired => Icon::Clock,
            Page::Route => Icon::Truck,
            Page::Settings => Icon::Settings,
        }
    }

    pub fn menu_position(&self) -> usize {
        Page::MENU.iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Every glyph the dashboard draws, looked up by tag instead of by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    BarChart,
    Calendar,
    Clock,
    Truck,
    Settings,
    Sun,
    Moon,
    Waves,
    Terminal,
    Search,
    Filter,
    Package,
    Alert,
    Message,
    Menu,
    Close,
    ChevronLeft,
    ChevronRight,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Home => "⌂",
            Icon::BarChart => "▥",
            Icon::Calendar => "▦",
            Icon::Clock => "◷",
            Icon::Truck => "⛟",
            Icon::Settings => "⚙",
            Icon::Sun => "☀",
            Icon::Moon => "☾",
            Icon::Waves => "≈",
            Icon::Terminal => ">_",
            Icon::Search => "⌕",
            Icon::Filter => "⏷",
            Icon::Package => "▣",
            Icon::Alert => "⚠",
            Icon::Message => "✉",
            Icon::Menu => "☰",
            Icon::Close => "✕",
            Icon::ChevronLeft => "‹",
            Icon::ChevronRight => "›",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    Help,
    Exit,
    Enter,
    Resize(usize, usize),
    RawKey(KeyEvent),
    ToggleSidebar,
    ToggleSettings,
    NextMenuItem,
    PreviousMenuItem,
    SelectPage(Page),
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    Search,
    CycleStatusFilter,
    CyclePageSize,
    SortAscending,
    SortDescending,
    Add,
    Delete,
    CopyRow,
    CycleCalendarView,
    Today,
    NextItem,
    PreviousItem,
    ShiftEarlier,
    ShiftLater,
    Increase,
    Decrease,
    Reset,
}

pub const HELP_TEXT: &str = "\
Global
  Tab / Shift+Tab   next / previous menu item
  1-6               jump to menu item
  b                 toggle sidebar
  ,                 toggle settings
  ?                 this help
  Esc               close popup / clear
  q                 quit

Route & Monitor Expired
  /                 search (live)
  f                 cycle status filter
  e                 cycle entries per page
  n / p             next / previous page
  Home / End        first / last page
  Up / Down         select row
  Left / Right      select sort column
  s / S             sort ascending / descending
  d                 delete selected row
  y                 copy selected row
  a                 add product (Monitor Expired)

Calendar
  arrows            move selected day
  n / p             next / previous period
  t                 today
  v                 month / week / day view
  a                 add event on selected day
  d                 delete selected event
  j / k             select event on selected day
  < / >             move selected event one day

Settings
  Up / Down         select control
  Left / Right      change value
  - / +             zoom or font size step
  r                 reset control";
