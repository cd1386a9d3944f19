use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The four kinds of sustainability activity a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Energy,
    Water,
    Transport,
    Waste,
}

impl Category {
    /// Canonical string values accepted by the API.
    pub const VALUES: [&'static str; 4] = ["energy", "water", "transport", "waste"];

    /// Returns the canonical API string for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Water => "water",
            Self::Transport => "transport",
            Self::Waste => "waste",
        }
    }

    /// Units a value in this category may be recorded in.
    /// The first entry is the default a fresh draft starts with.
    #[must_use]
    pub const fn units(self) -> &'static [&'static str] {
        match self {
            Self::Energy => &["kWh", "Wh", "MWh"],
            Self::Water => &["L", "mL", "gal"],
            Self::Transport => &["km", "mi", "kg CO2"],
            Self::Waste => &["kg", "g", "lbs"],
        }
    }

    /// Default unit for this category.
    #[must_use]
    pub const fn default_unit(self) -> &'static str {
        self.units()[0]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CategoryParseError {
    value: String,
}

impl std::fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid category '{}'; expected one of: {}",
            self.value,
            Category::VALUES.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let category = match value.trim().to_ascii_lowercase().as_str() {
            "energy" => Self::Energy,
            "water" => Self::Water,
            "transport" => Self::Transport,
            "waste" => Self::Waste,
            _ => {
                return Err(CategoryParseError {
                    value: value.to_string(),
                })
            }
        };
        Ok(category)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// A user profile, owned by the backend; the client holds a read-only copy
/// tied to the session lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// When the account was created, if the backend reports it.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// A single logged sustainability action with a magnitude and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    pub category: Category,
    /// Short free-text description of what was done.
    pub action: String,
    pub value: f64,
    pub unit: String,
    pub notes: Option<String>,
    /// When the activity was logged, assigned by the backend.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// A pending activity as captured from a form, prior to validation.
/// The magnitude is kept as raw text until [`validate`](Self::validate)
/// parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub category: Category,
    pub action: String,
    pub value: String,
    pub unit: String,
    pub notes: String,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityDraft {
    /// Creates an empty draft with the form defaults (energy, kWh).
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: Category::Energy,
            action: String::new(),
            value: String::new(),
            unit: Category::Energy.default_unit().to_string(),
            notes: String::new(),
        }
    }

    /// Switches category and resets the unit to the new category's default,
    /// so the unit always belongs to the category's allowed set.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.unit = category.default_unit().to_string();
    }

    /// Checks the required fields and produces the request payload.
    ///
    /// # Errors
    /// Returns [`Error::Validation`](crate::Error::Validation) if the action
    /// is empty, the value is empty or not numeric, or the unit is not
    /// allowed for the category.
    pub fn validate(&self) -> Result<CreateActivity, crate::Error> {
        let action = self.action.trim();
        let value = self.value.trim();
        if action.is_empty() || value.is_empty() {
            return Err(crate::Error::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        let value: f64 = value
            .parse()
            .map_err(|_| crate::Error::Validation(format!("Invalid value: {value}")))?;
        if !self.category.units().contains(&self.unit.as_str()) {
            return Err(crate::Error::Validation(format!(
                "Unit '{}' is not valid for {} activities",
                self.unit, self.category
            )));
        }
        let notes = self.notes.trim();
        Ok(CreateActivity {
            category: self.category,
            action: action.to_string(),
            value,
            unit: self.unit.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// Parameters for logging an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivity {
    pub category: Category,
    pub action: String,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Server-computed aggregates summarizing a user's logged activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_activities: u64,
    pub energy_saved: f64,
    pub water_saved: f64,
    pub transport_emissions: f64,
    pub waste_reduced: f64,
    pub recent_activities: Vec<Activity>,
}

/// A server-suggested action tied to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
}

/// Response from the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque session token proving an authenticated identity.
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Parameters for registering an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterUser {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
