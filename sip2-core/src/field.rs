//! SIP2 command and field identifiers

/// Two-character command identifiers used on the wire.
pub mod command {
    pub const CHECKIN: &str = "09";
    pub const CHECKIN_RESPONSE: &str = "10";
    pub const CHECKOUT: &str = "11";
    pub const CHECKOUT_RESPONSE: &str = "12";
    pub const PATRON_STATUS_REQUEST: &str = "23";
    pub const PATRON_STATUS_RESPONSE: &str = "24";
    pub const END_PATRON_SESSION: &str = "35";
    pub const END_SESSION_RESPONSE: &str = "36";
    pub const LOGIN: &str = "93";
    pub const LOGIN_RESPONSE: &str = "94";
    pub const REQUEST_SC_RESEND: &str = "96";
    pub const REQUEST_ACS_RESEND: &str = "97";
    pub const ACS_STATUS: &str = "98";
    pub const SC_STATUS: &str = "99";
}

/// Two-character variable-field identifiers.
pub mod code {
    pub const PATRON_ID: &str = "AA";
    pub const ITEM_ID: &str = "AB";
    pub const TERMINAL_PASSWORD: &str = "AC";
    pub const PATRON_PASSWORD: &str = "AD";
    pub const PERSONAL_NAME: &str = "AE";
    pub const SCREEN_MESSAGE: &str = "AF";
    pub const PRINT_LINE: &str = "AG";
    pub const DUE_DATE: &str = "AH";
    pub const TITLE_ID: &str = "AJ";
    pub const INSTITUTION_ID: &str = "AO";
    pub const CURRENT_LOCATION: &str = "AP";
    pub const SEQUENCE_NUMBER: &str = "AY";
    pub const CHECKSUM: &str = "AZ";
    pub const LOGIN_USER_ID: &str = "CN";
    pub const LOGIN_PASSWORD: &str = "CO";
    pub const LOCATION_CODE: &str = "CP";
}
