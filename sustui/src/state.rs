//! State types for the TUI application.

use std::time::{Duration, Instant};
use sustain::types::{ActivityDraft, Category};

pub const STATUS_TTL: Duration = Duration::from_secs(4);
pub const TICK_RATE: Duration = Duration::from_millis(200);

/// The current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Activities,
    Dashboard,
}

/// Which login field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// The sign-in form.
#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub field: LoginField,
}

impl LoginForm {
    pub fn new(default_username: Option<&str>) -> Self {
        let username = default_username.unwrap_or_default().to_string();
        let field = if username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
        Self {
            username,
            password: String::new(),
            field,
        }
    }

    pub fn active_buffer_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// Which draft field the inline add prompt is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Action,
    Value,
    Notes,
}

impl DraftField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Value => "value",
            Self::Notes => "notes",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Action => Self::Value,
            Self::Value => Self::Notes,
            Self::Notes => Self::Action,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Action => Self::Notes,
            Self::Value => Self::Action,
            Self::Notes => Self::Value,
        }
    }
}

/// Input mode for the activities screen.
#[derive(Debug)]
pub enum ActivityInput {
    Normal,
    /// Drafting a new activity inline.
    Add {
        draft: ActivityDraft,
        field: DraftField,
    },
    /// Waiting on y/n before deleting the selected activity.
    ConfirmDelete { id: i64 },
}

/// Status message severity.
#[derive(Debug, Clone, Copy)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A status message with expiration tracking.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub created: Instant,
}

const CATEGORY_ORDER: [Category; 4] = [
    Category::Energy,
    Category::Water,
    Category::Transport,
    Category::Waste,
];

/// Steps to the next/previous category, wrapping around.
pub fn cycle_category(category: Category, delta: i32) -> Category {
    let index = CATEGORY_ORDER
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0);
    let len = CATEGORY_ORDER.len() as i32;
    let next = (index as i32 + delta).rem_euclid(len) as usize;
    CATEGORY_ORDER[next]
}

/// Steps the draft's unit through the category's allowed set, wrapping around.
pub fn cycle_unit(draft: &mut ActivityDraft, delta: i32) {
    let units = draft.category.units();
    let index = units
        .iter()
        .position(|unit| *unit == draft.unit)
        .unwrap_or(0);
    let len = units.len() as i32;
    let next = (index as i32 + delta).rem_euclid(len) as usize;
    draft.unit = units[next].to_string();
}

pub fn clamp_index(current: usize, delta: i32, max: usize) -> usize {
    let next = current as i64 + i64::from(delta);
    usize::try_from(next.clamp(0, max as i64)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{clamp_index, cycle_category, cycle_unit};
    use sustain::types::{ActivityDraft, Category};

    #[test]
    fn category_cycle_wraps() {
        assert_eq!(cycle_category(Category::Energy, 1), Category::Water);
        assert_eq!(cycle_category(Category::Energy, -1), Category::Waste);
        assert_eq!(cycle_category(Category::Waste, 1), Category::Energy);
    }

    #[test]
    fn unit_cycle_stays_within_category() {
        let mut draft = ActivityDraft::new();
        draft.set_category(Category::Water);
        assert_eq!(draft.unit, "L");
        cycle_unit(&mut draft, 1);
        assert_eq!(draft.unit, "mL");
        cycle_unit(&mut draft, -2);
        assert_eq!(draft.unit, "gal");
    }

    #[test]
    fn clamp_index_saturates_at_bounds() {
        assert_eq!(clamp_index(0, -1, 5), 0);
        assert_eq!(clamp_index(5, 3, 5), 5);
        assert_eq!(clamp_index(2, 1, 5), 3);
    }
}
