//! Canned replies for inbound chat messages.
//!
//! Classification is by keyword containment on the trimmed, lowercased body,
//! checked in a fixed order; the first rule that fires picks the reply.

use std::sync::LazyLock;

use regex::Regex;

static REPORT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,19}$").expect("valid regex"));

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "namaste"];

pub const GREETING_REPLY: &str = "Namaste! Welcome to Simhastha Milaap Lost & Found System. 🙏\n\n\
How can we help you today?\n\
1. Report missing person - Type 'MISSING'\n\
2. Report found person - Type 'FOUND PERSON'\n\
3. Report lost item - Type 'LOST'\n\
4. Report found item - Type 'FOUND ITEM'\n\n\
You can also reply with your Report ID to get status.";

pub const MISSING_PERSON_REPLY: &str = "To report a missing person, please visit our portal or reply with details in this format:\n\
Name, Age, Gender, Description, Last seen location, Your WhatsApp number";

pub const FOUND_PERSON_REPLY: &str = "To report a found person, please share details in this format:\n\
Name (if known), Approx Age, Gender, Description, Current location, Your WhatsApp number";

pub const LOST_ITEM_REPLY: &str = "To report a lost item, please reply:\n\
Category, Color, Brand/Model, Description, Last seen location, Your WhatsApp number";

pub const FOUND_ITEM_REPLY: &str = "To report a found item, please reply:\n\
Category, Color, Brand/Model, Description, Found location, Your WhatsApp number";

pub const FALLBACK_REPLY: &str =
    "Sorry, I didn't understand. Please say 'Namaste' to see options or share your Report ID.";

/// What an inbound message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    ReportMissingPerson,
    ReportFoundPerson,
    ReportLostItem,
    ReportFoundItem,
    StatusLookup(String),
    Unknown,
}

impl Intent {
    pub fn classify(body: &str) -> Self {
        let text = body.trim().to_lowercase();

        if GREETING_WORDS.iter().any(|w| text.contains(w)) {
            Intent::Greeting
        } else if text.contains("missing") {
            Intent::ReportMissingPerson
        } else if text.contains("found person") {
            Intent::ReportFoundPerson
        } else if text.contains("lost") && !text.contains("item") {
            Intent::ReportLostItem
        } else if text.contains("found item") {
            Intent::ReportFoundItem
        } else if REPORT_ID_RE.is_match(&text) {
            Intent::StatusLookup(text)
        } else {
            Intent::Unknown
        }
    }

    pub fn reply(&self) -> String {
        match self {
            Intent::Greeting => GREETING_REPLY.to_string(),
            Intent::ReportMissingPerson => MISSING_PERSON_REPLY.to_string(),
            Intent::ReportFoundPerson => FOUND_PERSON_REPLY.to_string(),
            Intent::ReportLostItem => LOST_ITEM_REPLY.to_string(),
            Intent::ReportFoundItem => FOUND_ITEM_REPLY.to_string(),
            Intent::StatusLookup(id) => format!(
                "Looking up status for Report ID: {id}.\n\
                 Please check the portal; if there's a match, we'll notify you here."
            ),
            Intent::Unknown => FALLBACK_REPLY.to_string(),
        }
    }
}

/// Reply text for an inbound message body.
pub fn reply_for(body: &str) -> String {
    Intent::classify(body).reply()
}
