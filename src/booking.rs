use crate::api::models::{BookingCreate, SlotInfo};
use crate::phone;
use chrono::NaiveDate;

/// Identifies one slot fetch. Responses are applied only if their ticket is
/// newer than the last one applied and still for the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub seq: u64,
    pub date: NaiveDate,
}

#[derive(Debug)]
pub struct SlotBoard {
    date: NaiveDate,
    slots: Vec<SlotInfo>,
    error: Option<String>,
    issued: u64,
    applied: u64,
}

impl SlotBoard {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: Vec::new(),
            error: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.applied < self.issued
    }

    /// Returns true when the date actually changed.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.date == date {
            return false;
        }
        self.date = date;
        self.slots.clear();
        self.error = None;
        true
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket {
            seq: self.issued,
            date: self.date,
        }
    }

    /// Applies a fetch result. Returns false when the response was stale.
    pub fn apply(&mut self, ticket: RefreshTicket, result: Result<Vec<SlotInfo>, String>) -> bool {
        if ticket.seq <= self.applied {
            tracing::debug!(seq = ticket.seq, applied = self.applied, "dropping stale slot response");
            return false;
        }
        // Newer tickets for the old date are superseded too.
        self.applied = ticket.seq;
        if ticket.date != self.date {
            tracing::debug!(date = %ticket.date, "dropping slot response for a previous date");
            return false;
        }

        match result {
            Ok(slots) => {
                self.slots = slots;
                self.error = None;
            }
            Err(error) => self.error = Some(error),
        }
        true
    }
}

pub fn is_busy(slot: &SlotInfo, busy_threshold: u32) -> bool {
    slot.booked >= busy_threshold
}

pub fn can_book(slot: &SlotInfo) -> bool {
    slot.free > 0
}

/// Contents of the "new booking" form.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub date: NaiveDate,
    pub time_slot: String,
    pub start_time: String,
    pub end_time: String,
    pub phone: String,
    pub client_name: String,
    pub guest_count: String,
    pub comment: String,
    pub tags: Vec<String>,
    pub deposit: bool,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl BookingDraft {
    pub fn for_slot(date: NaiveDate, time: &str) -> Self {
        Self {
            date,
            time_slot: time.to_string(),
            start_time: time.to_string(),
            end_time: time.to_string(),
            phone: String::new(),
            client_name: String::new(),
            guest_count: String::new(),
            comment: String::new(),
            tags: Vec::new(),
            deposit: false,
        }
    }

    /// The start time also decides which capacity slot the booking counts against.
    pub fn set_start_time(&mut self, start_time: &str) {
        self.start_time = start_time.to_string();
        self.time_slot = start_time.to_string();
    }

    pub fn set_phone_input(&mut self, raw: &str) {
        self.phone = phone::format_phone(raw);
    }

    pub fn set_tag(&mut self, tag: &str, selected: bool) {
        let present = self.tags.iter().any(|t| t == tag);
        if selected && !present {
            self.tags.push(tag.to_string());
        } else if !selected && present {
            self.tags.retain(|t| t != tag);
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn guest_count(&self) -> Option<u32> {
        self.guest_count.trim().parse().ok().filter(|count| *count >= 1)
    }

    pub fn can_submit(&self) -> bool {
        !self.client_name.trim().is_empty()
    }

    pub fn to_request(&self, restaurant_id: i64) -> Option<BookingCreate> {
        if !self.can_submit() {
            return None;
        }

        Some(BookingCreate {
            restaurant_id,
            date: self.date,
            time_slot: self.time_slot.clone(),
            client_name: self.client_name.trim().to_string(),
            start_time: optional(&self.start_time),
            end_time: optional(&self.end_time),
            phone: optional(&self.phone).filter(|p| !phone::is_blank(p)),
            guest_count: self.guest_count(),
            comment: optional(&self.comment),
            tags: self.tags.clone(),
            deposit: self.deposit,
        })
    }
}
