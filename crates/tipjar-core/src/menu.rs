//! Menu buttons and callback data.
//!
//! Buttons carry an explicit action instead of a string-prefixed target, and
//! callback data round-trips through [`CallbackAction`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DonationError;
use crate::TierTable;

/// What a menu button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Open an external link.
    Url(String),
    /// Send callback data back to the bot.
    Callback(CallbackAction),
}

/// An inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    /// Button caption.
    pub label: String,
    /// Button action.
    pub action: ButtonAction,
}

impl MenuButton {
    /// A button that sends callback data.
    #[must_use]
    pub fn callback(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(action),
        }
    }

    /// A button that opens a link.
    #[must_use]
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Parsed callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CallbackAction {
    /// Back to the main menu.
    MainMenu,
    /// Show crypto addresses.
    Crypto,
    /// Show the Stars tier picker.
    Stars,
    /// Donate a fixed number of Stars.
    StarsAmount(u64),
    /// Ask the user to type an amount.
    StarsCustom,
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainMenu => f.write_str("main_menu"),
            Self::Crypto => f.write_str("crypto"),
            Self::Stars => f.write_str("stars"),
            Self::StarsAmount(amount) => write!(f, "stars:{amount}"),
            Self::StarsCustom => f.write_str("stars:custom"),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = DonationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main_menu" => Ok(Self::MainMenu),
            "crypto" => Ok(Self::Crypto),
            "stars" => Ok(Self::Stars),
            "stars:custom" => Ok(Self::StarsCustom),
            other => other
                .strip_prefix("stars:")
                .and_then(|amount| amount.parse::<u64>().ok())
                .filter(|amount| *amount > 0)
                .map(Self::StarsAmount)
                .ok_or_else(|| DonationError::UnknownCallback(other.to_string())),
        }
    }
}

impl TryFrom<String> for CallbackAction {
    type Error = DonationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CallbackAction> for String {
    fn from(action: CallbackAction) -> Self {
        action.to_string()
    }
}

/// Default main menu: crypto addresses and Telegram Stars.
#[must_use]
pub fn default_main_menu() -> Vec<MenuButton> {
    vec![
        MenuButton::callback("Crypto", CallbackAction::Crypto),
        MenuButton::callback("Telegram Stars", CallbackAction::Stars),
    ]
}

/// Lay out buttons two per row.
#[must_use]
pub fn two_per_row(buttons: Vec<MenuButton>) -> Vec<Vec<MenuButton>> {
    let mut rows = Vec::with_capacity(buttons.len().div_ceil(2));
    let mut iter = buttons.into_iter();
    while let Some(first) = iter.next() {
        let mut row = vec![first];
        row.extend(iter.next());
        rows.push(row);
    }
    rows
}

/// Stars keyboard: one button per tier, two per row, then a custom amount
/// button and a back button on their own rows.
#[must_use]
pub fn stars_keyboard(tiers: &TierTable) -> Vec<Vec<MenuButton>> {
    let buttons = tiers
        .entries()
        .iter()
        .map(|entry| {
            MenuButton::callback(
                format!("{} {}", entry.amount, entry.label.trim()),
                CallbackAction::StarsAmount(entry.amount),
            )
        })
        .collect();

    let mut rows = two_per_row(buttons);
    rows.push(vec![MenuButton::callback(
        "Custom amount",
        CallbackAction::StarsCustom,
    )]);
    rows.push(vec![back_button()]);
    rows
}

/// Single back-to-main-menu button.
#[must_use]
pub fn back_button() -> MenuButton {
    MenuButton::callback("« Back", CallbackAction::MainMenu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_data_round_trips() {
        for action in [
            CallbackAction::MainMenu,
            CallbackAction::Crypto,
            CallbackAction::Stars,
            CallbackAction::StarsAmount(50),
            CallbackAction::StarsCustom,
        ] {
            assert_eq!(action.to_string().parse::<CallbackAction>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_callback_is_an_error() {
        assert!("stars:0".parse::<CallbackAction>().is_err());
        assert!("stars:-5".parse::<CallbackAction>().is_err());
        assert!("settings".parse::<CallbackAction>().is_err());
    }

    #[test]
    fn stars_keyboard_layout() {
        let rows = stars_keyboard(&TierTable::default());
        // 8 tiers in 4 rows, then custom, then back.
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0][0].label, "5 Starter");
        assert_eq!(
            rows[0][1].action,
            ButtonAction::Callback(CallbackAction::StarsAmount(10))
        );
        assert_eq!(rows[5][0].action, ButtonAction::Callback(CallbackAction::MainMenu));
    }

    #[test]
    fn odd_button_count_leaves_short_last_row() {
        let rows = two_per_row(vec![
            MenuButton::url("a", "https://a.example"),
            MenuButton::url("b", "https://b.example"),
            MenuButton::url("c", "https://c.example"),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn button_json_shape() {
        let json = serde_json::to_value(MenuButton::callback("Stars", CallbackAction::Stars)).unwrap();
        assert_eq!(json["action"]["type"], "callback");
        assert_eq!(json["action"]["target"], "stars");
    }
}
