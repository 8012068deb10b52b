//! Menu callback and text message handlers.
//!
//! These resolve what the bot should show next. Rendering the text and
//! talking to the platform stays in the front-end.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use tipjar_core::menu::{back_button, two_per_row};
use tipjar_core::{
    parse_custom_amount, stars_keyboard, CallbackAction, MenuButton, SessionState, StarsInvoice,
    UserId,
};

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Screens the front-end knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Welcome text with the main menu.
    Main,
    /// Crypto addresses.
    Crypto,
    /// Stars tier picker.
    Stars,
}

/// Button press forwarded by the front-end.
#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    /// User who pressed the button.
    pub user_id: UserId,
    /// Raw callback data.
    pub data: String,
}

/// What to do in response to a button press.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallbackResponse {
    /// Edit the message to show a screen.
    Screen {
        /// Screen to render.
        screen: Screen,
        /// Inline keyboard rows.
        keyboard: Vec<Vec<MenuButton>>,
    },
    /// Send an invoice and answer the callback with a short notice.
    Invoice {
        /// Invoice to send.
        invoice: StarsInvoice,
        /// Callback answer text.
        notice: String,
    },
    /// Ask the user to type an amount.
    PromptCustomAmount,
}

/// Resolve a menu button press.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    Json(body): Json<CallbackRequest>,
) -> Result<Json<CallbackResponse>, ApiError> {
    let action: CallbackAction = body.data.parse()?;

    tracing::debug!(user_id = %body.user_id, action = %action, "Menu callback");

    let response = match action {
        CallbackAction::MainMenu => CallbackResponse::Screen {
            screen: Screen::Main,
            keyboard: two_per_row(state.config.main_menu.clone()),
        },
        CallbackAction::Crypto => CallbackResponse::Screen {
            screen: Screen::Crypto,
            keyboard: vec![vec![back_button()]],
        },
        CallbackAction::Stars => CallbackResponse::Screen {
            screen: Screen::Stars,
            keyboard: stars_keyboard(&state.config.tiers),
        },
        CallbackAction::StarsAmount(amount) => CallbackResponse::Invoice {
            invoice: StarsInvoice::for_donation(body.user_id, amount, &state.config.tiers),
            notice: format!("Preparing {amount} Stars invoice..."),
        },
        CallbackAction::StarsCustom => {
            state.sessions.begin_custom_amount(body.user_id).await;
            CallbackResponse::PromptCustomAmount
        }
    };

    Ok(Json(response))
}

/// Text message forwarded by the front-end.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Sender.
    pub user_id: UserId,
    /// Message text.
    pub text: String,
}

/// What to do in response to a text message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageResponse {
    /// No prompt was pending; the message is not for us.
    Ignored,
    /// Valid custom amount: send this invoice.
    Invoice {
        /// Invoice to send.
        invoice: StarsInvoice,
    },
    /// Invalid amount; the prompt is over and the user must start again.
    Rejected {
        /// Reply text.
        message: String,
    },
}

/// Handle a text message, completing a pending custom amount prompt.
pub async fn message(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    Json(body): Json<MessageRequest>,
) -> Json<MessageResponse> {
    // Any text ends the prompt, valid or not.
    if state.sessions.take(body.user_id).await == SessionState::Idle {
        return Json(MessageResponse::Ignored);
    }

    match parse_custom_amount(&body.text) {
        Ok(amount) => Json(MessageResponse::Invoice {
            invoice: StarsInvoice::for_donation(body.user_id, amount, &state.config.tiers),
        }),
        Err(e) => {
            tracing::debug!(user_id = %body.user_id, error = %e, "Custom amount rejected");
            Json(MessageResponse::Rejected {
                message: "Please send a positive whole number of Stars.".into(),
            })
        }
    }
}
