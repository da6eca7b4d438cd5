use crate::api::models::{BookingCreate, ChatRequest, RestaurantSettings};
use chrono::NaiveDate;

pub mod bookings;
pub mod calendar;
pub mod clients;
pub mod dashboard;
pub mod finance;
pub mod login;
pub mod settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Bookings,
    Settings,
    Dashboard,
    Clients,
    Finance,
}

impl Page {
    pub const NAVIGATION: [Page; 5] = [
        Page::Bookings,
        Page::Settings,
        Page::Dashboard,
        Page::Clients,
        Page::Finance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Bookings => "Bookings",
            Page::Settings => "Settings",
            Page::Dashboard => "Dashboard",
            Page::Clients => "Clients",
            Page::Finance => "Finance",
        }
    }
}

/// Requests a page makes of the app. Pages never talk to the network directly.
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    Login { username: String, password: String },
    SelectDate(NaiveDate),
    RefreshSlots,
    CreateBooking(BookingCreate),
    SaveSettings(RestaurantSettings),
    SendChat(ChatRequest),
}
