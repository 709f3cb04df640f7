use chrono::NaiveDate;
use ratatui::crossterm::event::{KeyCode, KeyEvent};

use crate::expiry::Category;
use crate::inputter::Inputter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    Expiry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Editing,
    Submit,
    Cancel,
}

/// The "Add New Product" dialog of the expiry monitor.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: Inputter,
    pub category: Option<Category>,
    pub expiry: Inputter,
    pub focus: FormField,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: Inputter::with_max_chars(40),
            category: None,
            expiry: Inputter::with_max_chars(10),
            focus: FormField::Name,
        }
    }
}

impl ProductForm {
    pub fn read(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            _ => match self.focus {
                FormField::Name => {
                    self.name.read(key);
                }
                FormField::Expiry => {
                    self.expiry.read(key);
                }
                FormField::Category => match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => self.cycle_category(true),
                    KeyCode::Left => self.cycle_category(false),
                    _ => {}
                },
            },
        }
        FormOutcome::Editing
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Category,
            FormField::Category => FormField::Expiry,
            FormField::Expiry => FormField::Name,
        };
    }

    fn focus_previous(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Expiry,
            FormField::Category => FormField::Name,
            FormField::Expiry => FormField::Category,
        };
    }

    fn cycle_category(&mut self, forward: bool) {
        let all = Category::ALL;
        let next = match self.category {
            None if forward => 0,
            None => all.len() - 1,
            Some(c) => {
                let pos = all.iter().position(|x| *x == c).unwrap_or(0);
                if forward {
                    (pos + 1) % all.len()
                } else {
                    (pos + all.len() - 1) % all.len()
                }
            }
        };
        self.category = Some(all[next]);
    }

    /// The entered values, or a message naming the first missing or malformed field.
    pub fn validate(&self) -> Result<(String, Category, NaiveDate), String> {
        let name = self.name.value().trim();
        if name.is_empty() {
            return Err("Product name is required".to_string());
        }
        let Some(category) = self.category else {
            return Err("Select a category".to_string());
        };
        let expiry = NaiveDate::parse_from_str(self.expiry.value().trim(), "%Y-%m-%d")
            .map_err(|_| "Expiry date must look like YYYY-MM-DD".to_string())?;
        Ok((name.to_string(), category, expiry))
    }
}
