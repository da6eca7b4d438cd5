use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub time: String,
    pub booked: u32,
    pub free: u32,
}

#[derive(Debug, Deserialize)]
pub struct SlotsResponse {
    pub restaurant_id: i64,
    pub date: NaiveDate,
    pub slots: Vec<SlotInfo>,
}

impl SlotsResponse {
    /// The slots, provided the response answers a request for this
    /// restaurant and date.
    pub fn into_slots_for(
        self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<SlotInfo>, String> {
        if self.restaurant_id != restaurant_id || self.date != date {
            return Err(format!(
                "Server returned slots for restaurant {} on {}",
                self.restaurant_id, self.date
            ));
        }
        Ok(self.slots)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingCreate {
    pub restaurant_id: i64,
    pub date: NaiveDate,
    /// Capacity slot the booking counts against.
    pub time_slot: String,
    pub client_name: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub phone: Option<String>,
    pub guest_count: Option<u32>,
    pub comment: Option<String>,
    pub tags: Vec<String>,
    pub deposit: bool,
}

#[derive(Debug, Deserialize)]
pub struct BookingCreated {
    #[serde(default)]
    pub status: Option<String>,
    pub booking_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSettings {
    pub host_choice: Option<String>,
    pub greeting_text: Option<String>,
    pub info_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub assistant_id: String,
    pub message: String,
    pub thread_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{ChatRequest, RestaurantSettings, SlotsResponse};
    use chrono::NaiveDate;

    fn slots_response(date: &str) -> SlotsResponse {
        serde_json::from_str(&format!(
            r#"{{"restaurant_id":1,"date":"{date}","slots":[{{"time":"12:00","booked":2,"free":8}}]}}"#
        ))
        .expect("slots should parse")
    }

    #[test]
    fn chat_request_sends_null_thread_when_unpinned() {
        let request = ChatRequest {
            assistant_id: "asst_1".to_string(),
            message: "hi".to_string(),
            thread_id: None,
        };
        let value = serde_json::to_value(&request).expect("request should serialize");
        assert!(value["thread_id"].is_null());
    }

    #[test]
    fn settings_response_ignores_restaurant_id() {
        let settings: RestaurantSettings = serde_json::from_str(
            r#"{"restaurant_id":1,"host_choice":"Anna","greeting_text":null,"info_text":"Open late"}"#,
        )
        .expect("settings should parse");
        assert_eq!(settings.host_choice.as_deref(), Some("Anna"));
        assert!(settings.greeting_text.is_none());
    }

    #[test]
    fn slots_response_parses_iso_date() {
        let response = slots_response("2026-10-16");
        assert_eq!(response.date.to_string(), "2026-10-16");
        assert_eq!(response.slots[0].free, 8);
    }

    #[test]
    fn slots_for_the_requested_day_are_accepted() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid test date");
        let slots = slots_response("2026-10-16")
            .into_slots_for(1, date)
            .expect("response matches request");
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn slots_for_another_day_or_restaurant_are_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid test date");
        let error = slots_response("2026-10-17")
            .into_slots_for(1, date)
            .expect_err("date differs");
        assert!(error.contains("2026-10-17"));
        assert!(slots_response("2026-10-16").into_slots_for(2, date).is_err());
    }
}
