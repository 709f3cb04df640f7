use arboard::Clipboard;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tracing::{debug, error, info, trace};

use crate::calendar::{CalendarState, seed_events};
use crate::dataset::{DatasetView, Record};
use crate::domain::{DashConfig, DashError, HELP_TEXT, Message, Page};
use crate::expiry::{ExpiryStats, ExpiryStatus, Product, next_product_id, seed_products};
use crate::form::{FormOutcome, ProductForm};
use crate::inputter::{InputResult, Inputter};
use crate::routes::{Route, RouteStatus, seed_routes};
use crate::settings::{
    DisplaySettings, FONT_BUTTON_STEP, FONT_SLIDER_STEP, SettingsControl, ZOOM_BUTTON_STEP,
    ZOOM_SLIDER_STEP,
};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Status {
    Ready,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    Normal,
    Input,
    Form,
    Confirm,
    Popup,
}

/// What the text currently being typed is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    RouteSearch,
    ProductSearch,
    EventTitle,
}

/// A delete waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Route { id: String, label: String },
    Product { id: String, label: String },
    Event { id: u32, label: String },
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        match self {
            PendingDelete::Route { label, .. } => {
                format!("Are you sure you want to delete the route '{label}'?")
            }
            PendingDelete::Product { label, .. } => {
                format!("Are you sure you want to delete the product '{label}'?")
            }
            PendingDelete::Event { label, .. } => {
                format!("Are you sure you want to delete the event '{label}'?")
            }
        }
    }
}

pub struct Model {
    config: DashConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    page: Page,
    display: DisplaySettings,
    routes: DatasetView<Route>,
    products: DatasetView<Product>,
    calendar: CalendarState,
    settings_control: SettingsControl,
    input: Inputter,
    input_target: Option<InputTarget>,
    last_input: InputResult,
    form: ProductForm,
    pending_delete: Option<PendingDelete>,
    popup_message: String,
    status_message: String,
    last_status_message_update: Instant,
    clipboard: Option<Clipboard>,
    ui_width: usize,
    ui_height: usize,
}

impl Model {
    pub fn init(config: &DashConfig) -> Result<Self, DashError> {
        let today = config.reference_date;
        let model = Self {
            config: config.clone(),
            status: Status::Ready,
            modus: Modus::Normal,
            previous_modus: Modus::Normal,
            page: Page::Dashboard,
            display: DisplaySettings::new(config.theme, config.sidebar_open),
            routes: DatasetView::new(seed_routes()?, config.default_page_size),
            products: DatasetView::new(seed_products(today)?, config.default_page_size),
            calendar: CalendarState::new(seed_events()?, today),
            settings_control: SettingsControl::Theme,
            input: Inputter::with_max_chars(60),
            input_target: None,
            last_input: InputResult::default(),
            form: ProductForm::default(),
            pending_delete: None,
            popup_message: String::new(),
            status_message: "Started prodash!".to_string(),
            last_status_message_update: Instant::now(),
            clipboard: None,
            ui_width: 0,
            ui_height: 0,
        };
        info!(
            "Seeded {} routes, {} products, {} events for {}",
            model.routes.records().len(),
            model.products.records().len(),
            model.calendar.events().len(),
            today
        );
        Ok(model)
    }

    // -------------------- Accessors for the ui ---------------------------- //

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn routes(&self) -> &DatasetView<Route> {
        &self.routes
    }

    pub fn products(&self) -> &DatasetView<Product> {
        &self.products
    }

    pub fn expiry_stats(&self) -> ExpiryStats {
        ExpiryStats::from_products(self.products.records())
    }

    pub fn calendar(&self) -> &CalendarState {
        &self.calendar
    }

    pub fn settings_control(&self) -> SettingsControl {
        self.settings_control
    }

    pub fn reference_date(&self) -> chrono::NaiveDate {
        self.config.reference_date
    }

    /// The text being typed and what it is for, while an input line is open.
    pub fn active_input(&self) -> Option<(InputTarget, &InputResult)> {
        match self.modus {
            Modus::Input => self.input_target.map(|t| (t, &self.last_input)),
            _ => None,
        }
    }

    pub fn product_form(&self) -> Option<&ProductForm> {
        (self.modus == Modus::Form).then_some(&self.form)
    }

    pub fn confirm_prompt(&self) -> Option<String> {
        match self.modus {
            Modus::Confirm => self.pending_delete.as_ref().map(|p| p.prompt()),
            _ => None,
        }
    }

    pub fn popup(&self) -> Option<&str> {
        (self.modus == Modus::Popup).then_some(self.popup_message.as_str())
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn last_status_message_update(&self) -> Instant {
        self.last_status_message_update
    }

    /// Keys are passed on unmapped while text is entered or a dialog is open.
    pub fn raw_keyevents(&self) -> bool {
        matches!(self.modus, Modus::Input | Modus::Form | Modus::Confirm)
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }

    pub fn quit(&mut self) {
        self.status = Status::Quitting;
    }

    // -------------------- Message dispatch -------------------------------- //

    pub fn update(&mut self, message: Message) {
        if let Message::Resize(width, height) = message {
            self.ui_resize(width, height);
            return;
        }

        match self.modus {
            Modus::Input | Modus::Form | Modus::Confirm => {
                if let Message::RawKey(key) = message {
                    self.raw_input(key);
                }
            }
            Modus::Popup => match message {
                Message::Quit => self.quit(),
                Message::Exit | Message::Enter | Message::Help => self.close_popup(),
                _ => (),
            },
            Modus::Normal => self.update_normal(message),
        }
    }

    fn update_normal(&mut self, message: Message) {
        match message {
            Message::Quit => self.quit(),
            Message::Help => self.show_help(),
            Message::ToggleSidebar => self.display.toggle_sidebar(),
            Message::ToggleSettings => {
                let page = if self.page == Page::Settings {
                    Page::Dashboard
                } else {
                    Page::Settings
                };
                self.select_page(page);
            }
            Message::NextMenuItem => {
                let pos = (self.page.menu_position() + 1) % Page::MENU.len();
                self.select_page(Page::MENU[pos]);
            }
            Message::PreviousMenuItem => {
                let pos = (self.page.menu_position() + Page::MENU.len() - 1) % Page::MENU.len();
                self.select_page(Page::MENU[pos]);
            }
            Message::SelectPage(page) => self.select_page(page),
            msg => match self.page {
                Page::Route => self.update_routes(msg),
                Page::MonitorExpired => self.update_products(msg),
                Page::Calendar => self.update_calendar(msg),
                Page::Settings => self.update_settings(msg),
                Page::Dashboard | Page::Analytics => {}
            },
        }
    }

    fn select_page(&mut self, page: Page) {
        if self.page != page {
            debug!("Switching page {:?} -> {:?}", self.page, page);
            self.page = page;
        }
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{}, h:{}->{}",
            self.ui_width, width, self.ui_height, height
        );
        self.ui_width = width;
        self.ui_height = height;
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::Popup;
        self.popup_message = HELP_TEXT.to_string();
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = self.previous_modus;
        self.previous_modus = Modus::Popup;
    }

    // -------------------- Table pages ------------------------------------- //

    /// Paging, selection, filtering and sorting shared by the route and product lists.
    fn update_table<R: Record>(view: &mut DatasetView<R>, statuses: &[R::Status], msg: &Message) {
        match msg {
            Message::MoveUp => view.select_previous(),
            Message::MoveDown => view.select_next(),
            Message::MoveLeft => view.previous_sort_column(),
            Message::MoveRight => view.next_sort_column(),
            Message::NextPage => {
                view.next_page();
            }
            Message::PreviousPage => {
                view.previous_page();
            }
            Message::FirstPage => {
                view.first_page();
            }
            Message::LastPage => {
                view.last_page();
            }
            Message::CycleStatusFilter => view.cycle_status_filter(statuses),
            Message::CyclePageSize => view.cycle_page_size(),
            Message::SortAscending => view.sort_by_selected_column(true),
            Message::SortDescending => view.sort_by_selected_column(false),
            _ => (),
        }
    }

    fn update_routes(&mut self, msg: Message) {
        match msg {
            Message::Search => self.enter_input(InputTarget::RouteSearch),
            Message::Exit => self.routes.set_query(""),
            Message::Delete => {
                let pending = self.routes.selected().map(|route| PendingDelete::Route {
                    id: route.id.clone(),
                    label: route.name.clone(),
                });
                if let Some(pending) = pending {
                    self.ask_delete(pending);
                }
            }
            Message::CopyRow => {
                if let Some(route) = self.routes.selected() {
                    let line = to_csv_line(&route.cells());
                    self.copy_to_clipboard(line);
                }
            }
            msg => Self::update_table(&mut self.routes, &RouteStatus::ALL, &msg),
        }
    }

    fn update_products(&mut self, msg: Message) {
        match msg {
            Message::Search => self.enter_input(InputTarget::ProductSearch),
            Message::Exit => self.products.set_query(""),
            Message::Add => {
                self.form = ProductForm::default();
                self.previous_modus = self.modus;
                self.modus = Modus::Form;
            }
            Message::Delete => {
                let pending = self.products.selected().map(|product| PendingDelete::Product {
                    id: product.id(),
                    label: product.name.clone(),
                });
                if let Some(pending) = pending {
                    self.ask_delete(pending);
                }
            }
            Message::CopyRow => {
                if let Some(product) = self.products.selected() {
                    let line = to_csv_line(&product.cells());
                    self.copy_to_clipboard(line);
                }
            }
            msg => Self::update_table(&mut self.products, &ExpiryStatus::ALL, &msg),
        }
    }

    // -------------------- Calendar ---------------------------------------- //

    fn update_calendar(&mut self, msg: Message) {
        let calendar = &mut self.calendar;
        match msg {
            Message::MoveLeft => calendar.move_cursor(-1),
            Message::MoveRight => calendar.move_cursor(1),
            Message::MoveUp => calendar.move_cursor(-7),
            Message::MoveDown => calendar.move_cursor(7),
            Message::NextPage => calendar.next_period(),
            Message::PreviousPage => calendar.previous_period(),
            Message::Today => calendar.goto_today(),
            Message::CycleCalendarView => calendar.cycle_view(),
            Message::NextItem => calendar.select_next_event(),
            Message::PreviousItem => calendar.select_previous_event(),
            Message::ShiftEarlier | Message::ShiftLater => {
                let days = if msg == Message::ShiftLater { 1 } else { -1 };
                if let Some(id) = calendar.selected_event().map(|e| e.id) {
                    calendar.move_event(id, days);
                    let moved_to = calendar.cursor();
                    self.set_status_message(format!("Moved event to {moved_to}"));
                }
            }
            Message::Add | Message::Enter => self.enter_input(InputTarget::EventTitle),
            Message::Delete => {
                let pending = calendar.selected_event().map(|event| PendingDelete::Event {
                    id: event.id,
                    label: event.title.clone(),
                });
                if let Some(pending) = pending {
                    self.ask_delete(pending);
                }
            }
            _ => (),
        }
    }

    // -------------------- Settings ---------------------------------------- //

    fn update_settings(&mut self, msg: Message) {
        let display = &mut self.display;
        match (self.settings_control, msg) {
            (_, Message::MoveUp) => self.settings_control = self.settings_control.previous(),
            (_, Message::MoveDown) => self.settings_control = self.settings_control.next(),

            (SettingsControl::Theme, Message::MoveRight | Message::Increase) => {
                display.theme = display.theme.next()
            }
            (SettingsControl::Theme, Message::MoveLeft | Message::Decrease) => {
                display.theme = display.theme.previous()
            }
            (SettingsControl::Theme, Message::Reset) => display.theme = self.config.theme,

            (SettingsControl::Zoom, Message::MoveRight) => {
                display.change_zoom(ZOOM_SLIDER_STEP as i32)
            }
            (SettingsControl::Zoom, Message::MoveLeft) => {
                display.change_zoom(-(ZOOM_SLIDER_STEP as i32))
            }
            (SettingsControl::Zoom, Message::Increase) => {
                display.change_zoom(ZOOM_BUTTON_STEP as i32)
            }
            (SettingsControl::Zoom, Message::Decrease) => {
                display.change_zoom(-(ZOOM_BUTTON_STEP as i32))
            }
            (SettingsControl::Zoom, Message::Reset) => display.reset_zoom(),

            (SettingsControl::FontSize, Message::MoveRight) => {
                display.change_font_size(FONT_SLIDER_STEP as i32)
            }
            (SettingsControl::FontSize, Message::MoveLeft) => {
                display.change_font_size(-(FONT_SLIDER_STEP as i32))
            }
            (SettingsControl::FontSize, Message::Increase) => {
                display.change_font_size(FONT_BUTTON_STEP as i32)
            }
            (SettingsControl::FontSize, Message::Decrease) => {
                display.change_font_size(-(FONT_BUTTON_STEP as i32))
            }
            (SettingsControl::FontSize, Message::Reset) => display.reset_font_size(),
            _ => (),
        }
        trace!("Display settings {:?}", self.display);
    }

    // -------------------- Text input, forms and dialogs ------------------- //

    fn enter_input(&mut self, target: InputTarget) {
        trace!("Entering input mode for {:?} ...", target);
        self.previous_modus = self.modus;
        self.modus = Modus::Input;
        self.input_target = Some(target);
        self.input.clear();
        match target {
            InputTarget::RouteSearch => self.input.set(&self.routes.state().query),
            InputTarget::ProductSearch => self.input.set(&self.products.state().query),
            InputTarget::EventTitle => {}
        }
        self.last_input = self.input.get();
    }

    fn leave_dialog(&mut self) {
        self.modus = Modus::Normal;
        self.previous_modus = Modus::Normal;
    }

    fn raw_input(&mut self, key: KeyEvent) {
        match self.modus {
            Modus::Input => self.text_input(key),
            Modus::Form => self.form_input(key),
            Modus::Confirm => self.confirm_input(key),
            _ => (),
        }
    }

    fn text_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        let result = self.last_input.clone();

        match self.input_target {
            // Searches filter on every key stroke. Escape clears the search.
            Some(InputTarget::RouteSearch) => {
                let query = if result.canceled { "" } else { result.input.as_str() };
                self.routes.set_query(query);
            }
            Some(InputTarget::ProductSearch) => {
                let query = if result.canceled { "" } else { result.input.as_str() };
                self.products.set_query(query);
            }
            Some(InputTarget::EventTitle) => {
                if result.finished && !result.canceled {
                    let message = match self.calendar.add_event(&result.input) {
                        Some(id) => format!("Added event {id} on {}", self.calendar.cursor()),
                        None => "No title, nothing added".to_string(),
                    };
                    self.set_status_message(message);
                }
            }
            None => error!("Text input without a target!"),
        }

        if result.finished {
            self.input_target = None;
            self.leave_dialog();
        }
    }

    fn form_input(&mut self, key: KeyEvent) {
        match self.form.read(key) {
            FormOutcome::Editing => {}
            FormOutcome::Cancel => self.leave_dialog(),
            FormOutcome::Submit => match self.form.validate() {
                Ok((name, category, expiry)) => {
                    let id = next_product_id(self.products.records());
                    let product =
                        Product::new(id, &name, category, expiry, self.config.reference_date);
                    info!("Adding product {} \"{}\" ({})", id, name, product.status);
                    self.products.add(product);
                    self.set_status_message(format!("Added product \"{name}\""));
                    self.leave_dialog();
                }
                Err(reason) => self.set_status_message(reason),
            },
        }
    }

    fn ask_delete(&mut self, pending: PendingDelete) {
        self.pending_delete = Some(pending);
        self.previous_modus = self.modus;
        self.modus = Modus::Confirm;
    }

    fn confirm_input(&mut self, key: KeyEvent) {
        let confirmed = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        let pending = self.pending_delete.take();
        self.leave_dialog();
        if !confirmed {
            return;
        }

        let message = match pending {
            Some(PendingDelete::Route { id, label }) => {
                self.routes.delete(&id).map(|_| format!("Deleted route {id} ({label})"))
            }
            Some(PendingDelete::Product { id, label }) => {
                self.products.delete(&id).map(|_| format!("Deleted product \"{label}\""))
            }
            Some(PendingDelete::Event { id, label }) => {
                self.calendar.delete_event(id).map(|_| format!("Deleted event \"{label}\""))
            }
            None => None,
        };
        if let Some(message) = message {
            info!("{message}");
            self.set_status_message(message);
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    error!("Clipboard unavailable: {:?}", e);
                    self.set_status_message("Clipboard unavailable");
                    return;
                }
            }
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(text) {
                Ok(_) => {
                    trace!("Copied row to clipboard.");
                    self.set_status_message("Copied row to clipboard");
                }
                Err(e) => error!("Error copying to clipboard: {:?}", e),
            }
        }
    }
}

fn wrap_cell_content(c: &str) -> String {
    let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',' || c == '"');
    let escaped = c.replace('"', "\"\"");
    if needs_wrapping {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

fn to_csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| wrap_cell_content(c))
        .collect::<Vec<String>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarView;
    use crate::dataset::StatusFilter;
    use crate::settings::Theme;
    use ratatui::crossterm::event::KeyModifiers;

    fn model() -> Model {
        Model::init(&DashConfig::default()).unwrap()
    }

    fn key(model: &mut Model, code: KeyCode) {
        model.update(Message::RawKey(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_str(model: &mut Model, s: &str) {
        for c in s.chars() {
            key(model, KeyCode::Char(c));
        }
    }

    #[test]
    fn menu_navigation_wraps() {
        let mut m = model();
        assert_eq!(m.page(), Page::Dashboard);
        m.update(Message::PreviousMenuItem);
        assert_eq!(m.page(), Page::Settings);
        m.update(Message::NextMenuItem);
        m.update(Message::NextMenuItem);
        assert_eq!(m.page(), Page::Analytics);
        m.update(Message::ToggleSettings);
        assert_eq!(m.page(), Page::Settings);
        m.update(Message::ToggleSettings);
        assert_eq!(m.page(), Page::Dashboard);
    }

    #[test]
    fn sidebar_toggles() {
        let mut m = model();
        assert!(m.display().sidebar_open);
        m.update(Message::ToggleSidebar);
        assert!(!m.display().sidebar_open);
    }

    #[test]
    fn live_search_resets_page() {
        let mut m = model();
        m.update(Message::SelectPage(Page::Route));
        m.update(Message::CyclePageSize); // 10 -> 15
        m.update(Message::CyclePageSize); // 15 -> 20
        m.update(Message::CyclePageSize); // 20 -> 5
        m.update(Message::NextPage);
        assert_eq!(m.routes().state().page_index, 2);

        m.update(Message::Search);
        assert!(m.raw_keyevents());
        type_str(&mut m, "sari");
        assert_eq!(m.routes().state().page_index, 1);
        assert_eq!(m.routes().filtered_len(), 2);
        assert_eq!(
            m.active_input().map(|(t, r)| (t, r.input.clone())),
            Some((InputTarget::RouteSearch, "sari".to_string()))
        );

        key(&mut m, KeyCode::Enter);
        assert!(!m.raw_keyevents());
        assert_eq!(m.routes().state().query, "sari");

        m.update(Message::Search);
        key(&mut m, KeyCode::Esc);
        assert_eq!(m.routes().state().query, "");
        assert_eq!(m.routes().filtered_len(), 15);
    }

    #[test]
    fn status_filter_cycles() {
        let mut m = model();
        m.update(Message::SelectPage(Page::Route));
        m.update(Message::CycleStatusFilter);
        assert_eq!(m.routes().state().status_filter, StatusFilter::Only(RouteStatus::Completed));
        m.update(Message::SelectPage(Page::MonitorExpired));
        m.update(Message::CycleStatusFilter);
        assert_eq!(m.products().filtered_len(), 1);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut m = model();
        m.update(Message::SelectPage(Page::Route));
        m.update(Message::MoveDown);
        m.update(Message::Delete);
        assert!(m.confirm_prompt().unwrap().contains("Surabaya - Malang"));
        key(&mut m, KeyCode::Char('n'));
        assert_eq!(m.routes().records().len(), 15);
        assert!(m.confirm_prompt().is_none());

        m.update(Message::Delete);
        key(&mut m, KeyCode::Char('x')); // ignored, dialog stays open
        assert!(m.confirm_prompt().is_some());
        key(&mut m, KeyCode::Char('y'));
        assert_eq!(m.routes().records().len(), 14);
        assert!(m.routes().records().iter().all(|r| r.id != "RT002"));
        assert_eq!(m.routes().records()[1].id, "RT003");
    }

    #[test]
    fn add_product_through_form() {
        let mut m = model();
        m.update(Message::SelectPage(Page::MonitorExpired));
        m.update(Message::Add);
        assert!(m.product_form().is_some());
        type_str(&mut m, "Tahu");
        key(&mut m, KeyCode::Enter);
        // category missing, form stays open
        assert!(m.product_form().is_some());
        assert_eq!(m.status_message(), "Select a category");

        key(&mut m, KeyCode::Tab);
        key(&mut m, KeyCode::Right);
        key(&mut m, KeyCode::Tab);
        type_str(&mut m, "2025-12-06");
        key(&mut m, KeyCode::Enter);
        assert!(m.product_form().is_none());
        assert_eq!(m.products().records().len(), 9);
        let added = m.products().records().last().unwrap();
        assert_eq!(added.id, 9);
        assert_eq!(added.status, ExpiryStatus::Critical);
        assert_eq!(m.expiry_stats().critical, 2);
    }

    #[test]
    fn calendar_add_move_delete() {
        let mut m = model();
        m.update(Message::SelectPage(Page::Calendar));
        m.update(Message::MoveRight); // Dec 6
        m.update(Message::Add);
        type_str(&mut m, "Inventory");
        key(&mut m, KeyCode::Enter);
        assert_eq!(m.calendar().events().len(), 6);
        assert_eq!(m.calendar().selected_event().map(|e| e.title.as_str()), Some("Inventory"));

        m.update(Message::ShiftLater);
        assert_eq!(m.calendar().cursor(), chrono::NaiveDate::from_ymd_opt(2025, 12, 7).unwrap());

        m.update(Message::Delete);
        key(&mut m, KeyCode::Enter);
        assert_eq!(m.calendar().events().len(), 5);

        m.update(Message::CycleCalendarView);
        assert_eq!(m.calendar().view(), CalendarView::Week);
    }

    #[test]
    fn settings_controls() {
        let mut m = model();
        m.update(Message::SelectPage(Page::Settings));
        m.update(Message::MoveRight);
        assert_eq!(m.display().theme, Theme::Dark);
        m.update(Message::MoveDown);
        m.update(Message::MoveLeft);
        assert_eq!(m.display().zoom, 95);
        m.update(Message::Increase);
        assert_eq!(m.display().zoom, 105);
        m.update(Message::Reset);
        assert_eq!(m.display().zoom, 100);
        m.update(Message::MoveDown);
        m.update(Message::Decrease);
        assert_eq!(m.display().font_size, 14);
    }

    #[test]
    fn help_popup_blocks_page_messages() {
        let mut m = model();
        m.update(Message::SelectPage(Page::Route));
        m.update(Message::Help);
        assert!(m.popup().is_some());
        m.update(Message::NextPage);
        assert_eq!(m.routes().state().page_index, 1);
        m.update(Message::Exit);
        assert!(m.popup().is_none());
        m.update(Message::Quit);
        assert_eq!(m.status, Status::Quitting);
    }

    #[test]
    fn csv_quoting() {
        let cells = vec!["RT001".to_string(), "Jakarta - Bandung".to_string(), "say \"hi\"".to_string()];
        assert_eq!(to_csv_line(&cells), "RT001,\"Jakarta - Bandung\",\"say \"\"hi\"\"\"");
    }
}
