//! Typed constructors for the common SC -> ACS request messages
//!
//! Institution id (AO) and terminal password (AC) are not taken as
//! arguments here; they are normally supplied once as client defaults and
//! merged into every outgoing request.

use chrono::Local;

use crate::field::{code, command};
use crate::message::Message;

/// SIP2 18-character transaction date: "YYYYMMDD    HHMMSS", with four
/// blanks where the standard leaves room for a timezone marker.
fn transaction_date() -> String {
    Local::now().format("%Y%m%d    %H%M%S").to_string()
}

/// SC Status (99).
///
/// `status`: 0 = SC ok, 1 = printer out of paper, 2 = shutting down.
pub fn sc_status(status: u8, print_width: u8, protocol_version: &str) -> Message {
    Message::new(command::SC_STATUS)
        .fixed(&status.to_string())
        .fixed(&format!("{:03}", print_width))
        .fixed(protocol_version)
}

/// Login (93). UID and PWD algorithms are fixed to "0" (plain text).
pub fn login(user_id: &str, password: &str, location: Option<&str>) -> Message {
    let mut message = Message::new(command::LOGIN)
        .fixed("0")
        .fixed("0")
        .field(code::LOGIN_USER_ID, user_id)
        .field(code::LOGIN_PASSWORD, password);
    if let Some(location) = location {
        message = message.field(code::LOCATION_CODE, location);
    }
    message
}

/// Patron Status Request (23). Language "000" = unknown.
pub fn patron_status(patron_id: &str) -> Message {
    Message::new(command::PATRON_STATUS_REQUEST)
        .fixed("000")
        .fixed(&transaction_date())
        .field(code::PATRON_ID, patron_id)
}

/// Checkout (11). Renewals allowed, no-block off, nb due date left to the
/// ACS by repeating the transaction date.
pub fn checkout(patron_id: &str, item_id: &str) -> Message {
    let date = transaction_date();
    Message::new(command::CHECKOUT)
        .fixed("Y")
        .fixed("N")
        .fixed(&date)
        .fixed(&date)
        .field(code::PATRON_ID, patron_id)
        .field(code::ITEM_ID, item_id)
}

/// Checkin (09).
pub fn checkin(item_id: &str, current_location: &str) -> Message {
    let date = transaction_date();
    Message::new(command::CHECKIN)
        .fixed("N")
        .fixed(&date)
        .fixed(&date)
        .field(code::CURRENT_LOCATION, current_location)
        .field(code::ITEM_ID, item_id)
}

/// End Patron Session (35).
pub fn end_patron_session(patron_id: &str) -> Message {
    Message::new(command::END_PATRON_SESSION)
        .fixed(&transaction_date())
        .field(code::PATRON_ID, patron_id)
}
