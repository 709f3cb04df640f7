use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{DashConfig, DashError, Message, Page};
use crate::model::Model;

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &DashConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, DashError> {
        if !event::poll(Duration::from_millis(self.event_poll_time))? {
            return Ok(None);
        }
        let message = match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                if model.raw_keyevents() {
                    Some(Message::RawKey(key))
                } else {
                    self.handle_key(key)
                }
            }
            Event::Resize(width, height) => Some(Message::Resize(width as usize, height as usize)),
            _ => None,
        };
        Ok(message)
    }

    pub fn handle_key(&self, key: KeyEvent) -> Option<Message> {
        let message = match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Char('q'), _) => Some(Message::Quit),
            (KeyCode::Char('?'), _) => Some(Message::Help),
            (KeyCode::Esc, _) => Some(Message::Exit),
            (KeyCode::Enter, _) => Some(Message::Enter),
            (KeyCode::Tab, _) => Some(Message::NextMenuItem),
            (KeyCode::BackTab, _) => Some(Message::PreviousMenuItem),
            (KeyCode::Char(c @ '1'..='6'), _) => {
                let idx = c as usize - '1' as usize;
                Some(Message::SelectPage(Page::MENU[idx]))
            }
            (KeyCode::Char('b'), _) => Some(Message::ToggleSidebar),
            (KeyCode::Char(','), _) => Some(Message::ToggleSettings),

            (KeyCode::Up, _) => Some(Message::MoveUp),
            (KeyCode::Down, _) => Some(Message::MoveDown),
            (KeyCode::Left, _) => Some(Message::MoveLeft),
            (KeyCode::Right, _) => Some(Message::MoveRight),
            (KeyCode::Char('n') | KeyCode::PageDown, _) => Some(Message::NextPage),
            (KeyCode::Char('p') | KeyCode::PageUp, _) => Some(Message::PreviousPage),
            (KeyCode::Home, _) => Some(Message::FirstPage),
            (KeyCode::End, _) => Some(Message::LastPage),

            (KeyCode::Char('/'), _) => Some(Message::Search),
            (KeyCode::Char('f'), _) => Some(Message::CycleStatusFilter),
            (KeyCode::Char('e'), _) => Some(Message::CyclePageSize),
            (KeyCode::Char('s'), _) => Some(Message::SortAscending),
            (KeyCode::Char('S'), _) => Some(Message::SortDescending),
            (KeyCode::Char('a'), _) => Some(Message::Add),
            (KeyCode::Char('d') | KeyCode::Delete, _) => Some(Message::Delete),
            (KeyCode::Char('y'), _) => Some(Message::CopyRow),

            (KeyCode::Char('v'), _) => Some(Message::CycleCalendarView),
            (KeyCode::Char('t'), _) => Some(Message::Today),
            (KeyCode::Char('j'), _) => Some(Message::NextItem),
            (KeyCode::Char('k'), _) => Some(Message::PreviousItem),
            (KeyCode::Char('<'), _) => Some(Message::ShiftEarlier),
            (KeyCode::Char('>'), _) => Some(Message::ShiftLater),

            (KeyCode::Char('+') | KeyCode::Char('='), _) => Some(Message::Increase),
            (KeyCode::Char('-'), _) => Some(Message::Decrease),
            (KeyCode::Char('r'), _) => Some(Message::Reset),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> Controller {
        Controller::new(&DashConfig::default())
    }

    fn press(code: KeyCode) -> Option<Message> {
        controller().handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn number_keys_select_menu_items() {
        assert_eq!(press(KeyCode::Char('1')), Some(Message::SelectPage(Page::Dashboard)));
        assert_eq!(press(KeyCode::Char('5')), Some(Message::SelectPage(Page::Route)));
        assert_eq!(press(KeyCode::Char('6')), Some(Message::SelectPage(Page::Settings)));
        assert_eq!(press(KeyCode::Char('7')), None);
    }

    #[test]
    fn paging_keys() {
        assert_eq!(press(KeyCode::PageDown), Some(Message::NextPage));
        assert_eq!(press(KeyCode::Char('p')), Some(Message::PreviousPage));
        assert_eq!(press(KeyCode::End), Some(Message::LastPage));
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(controller().handle_key(key), Some(Message::Quit));
    }
}
