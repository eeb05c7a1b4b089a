//! Account creation wizard: a strict linear form (product → email →
//! duration → phone) modeled as an explicit state machine. `step` is a
//! pure transition function; the bot layer owns the session registry and
//! performs the commit append. None of the intermediate states touch the
//! store, so an abandoned run writes nothing.

use crate::catalog::Product;
use crate::domain::account::NewAccount;
use crate::utils::validation::{parse_duration_days, validate_email, validate_phone};

/// Where one add-account run currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    SelectProduct,
    AwaitEmail {
        product: Product,
    },
    AwaitDuration {
        product: Product,
        email: String,
    },
    AwaitPhone {
        product: Product,
        email: String,
        duration_days: u32,
    },
}

impl WizardState {
    /// Name of the field the state is collecting, used in logs.
    pub fn field_name(&self) -> &'static str {
        match self {
            WizardState::SelectProduct => "product",
            WizardState::AwaitEmail { .. } => "email",
            WizardState::AwaitDuration { .. } => "duration",
            WizardState::AwaitPhone { .. } => "phone",
        }
    }
}

/// Operator input fed into the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Product button pressed (callback key).
    PickProduct(String),
    /// Free-text message.
    Text(String),
    /// Explicit cancel (command, button, or timeout).
    Cancel,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Input rejected; same state, re-prompt with the given message.
    Stay { state: WizardState, reply: String },
    /// Input accepted; move to the next state and prompt for it.
    Advance { state: WizardState, reply: String },
    /// All fields collected; caller performs the append.
    Commit(NewAccount),
    /// Run abandoned; no partial record was written.
    Cancelled,
}

const CANCEL_HINT: &str = "/cancel to abort";

/// Advances the wizard by one input. Validation failures never advance
/// the state and never propagate as errors.
pub fn step(state: WizardState, event: WizardEvent) -> Step {
    let event_text = match event {
        WizardEvent::Cancel => return Step::Cancelled,
        WizardEvent::PickProduct(key) => {
            return match state {
                WizardState::SelectProduct => match Product::from_key(&key) {
                    Some(product) => Step::Advance {
                        reply: format!(
                            "{} {}\nEnter the account email:\n{CANCEL_HINT}",
                            product.icon(),
                            product.title()
                        ),
                        state: WizardState::AwaitEmail { product },
                    },
                    None => Step::Stay {
                        state: WizardState::SelectProduct,
                        reply: "❌ Unknown product. Pick one from the list.".to_string(),
                    },
                },
                // A stray product button mid-flow is ignored input.
                other => Step::Stay {
                    state: other,
                    reply: "❌ Finish the current step first, or /cancel.".to_string(),
                },
            };
        }
        WizardEvent::Text(text) => text,
    };

    match state {
        WizardState::SelectProduct => Step::Stay {
            state: WizardState::SelectProduct,
            reply: "❌ Pick a product from the buttons above.".to_string(),
        },
        WizardState::AwaitEmail { product } => match validate_email(&event_text) {
            Ok(()) => Step::Advance {
                state: WizardState::AwaitDuration {
                    product,
                    email: event_text.trim().to_string(),
                },
                reply: format!("Enter the duration in DAYS (e.g. 30):\n{CANCEL_HINT}"),
            },
            Err(e) => Step::Stay {
                state: WizardState::AwaitEmail { product },
                reply: format!("❌ {e}. Try again:\n{CANCEL_HINT}"),
            },
        },
        WizardState::AwaitDuration { product, email } => match parse_duration_days(&event_text) {
            Ok(duration_days) => Step::Advance {
                state: WizardState::AwaitPhone {
                    product,
                    email,
                    duration_days,
                },
                reply: format!("Enter the customer's phone number (e.g. 08xxxx):\n{CANCEL_HINT}"),
            },
            Err(e) => Step::Stay {
                state: WizardState::AwaitDuration { product, email },
                reply: format!("❌ {e}. Try again:\n{CANCEL_HINT}"),
            },
        },
        WizardState::AwaitPhone {
            product,
            email,
            duration_days,
        } => match validate_phone(&event_text) {
            Ok(phone) => Step::Commit(NewAccount {
                product,
                email,
                duration_days,
                phone,
            }),
            Err(e) => Step::Stay {
                state: WizardState::AwaitPhone {
                    product,
                    email,
                    duration_days,
                },
                reply: format!("❌ {e}. Try again:\n{CANCEL_HINT}"),
            },
        },
    }
}
