//! Static demo content for the pages that have no API yet.

#[derive(Debug, Clone, Copy)]
pub struct Client {
    pub id: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
    pub note: &'static str,
}

pub const CLIENTS: &[Client] = &[
    Client {
        id: "c1",
        name: "Ivan Ivanov",
        phone: "+7 (915) 123-45-67",
        note: "Regular guest. Likes the table by the window.",
    },
    Client {
        id: "c2",
        name: "Maria Petrova",
        phone: "+7 (926) 555-77-11",
        note: "Prefers the vegetarian menu.",
    },
    Client {
        id: "c3",
        name: "Sergey",
        phone: "+7 (903) 222-33-44",
        note: "Celebrated a birthday here, books in advance.",
    },
    Client {
        id: "c4",
        name: "Olga",
        phone: "+7 (901) 000-11-22",
        note: "Always asks for a parking spot.",
    },
];

/// Name matches ignore case; phone matches are raw substrings.
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let lowered = query.to_lowercase();
    clients
        .iter()
        .filter(|client| client.name.to_lowercase().contains(&lowered) || client.phone.contains(query))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Agent,
    Caller,
}

#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub speaker: Speaker,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Recording {
    pub id: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub caller_name: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub transcript: &'static [Line],
}

const fn agent(text: &'static str) -> Line {
    Line {
        speaker: Speaker::Agent,
        text,
    }
}

const fn caller(text: &'static str) -> Line {
    Line {
        speaker: Speaker::Caller,
        text,
    }
}

pub const RECORDINGS: &[Recording] = &[
    Recording {
        id: "rec1",
        title: "Call #1: table booking",
        duration: "02:13",
        caller_name: Some("Ivan Ivanov"),
        phone: Some("+7 (915) 123-45-67"),
        transcript: &[
            agent("Hello! Default Restaurant speaking. How can I help?"),
            caller("Hi! I'd like a table for two tonight at 19:00."),
            agent("Checking availability... Yes, we have free tables."),
            caller("Great! Under the name Ivan."),
            agent("Done! See you at 19:00."),
        ],
    },
    Recording {
        id: "rec2",
        title: "Call #2: menu question",
        duration: "01:05",
        caller_name: Some("Maria Petrova"),
        phone: Some("+7 (926) 555-77-11"),
        transcript: &[
            caller("Hello, do you have vegetarian dishes?"),
            agent("Yes, we have salads and pasta, we can suggest options."),
            caller("Thanks! Then I'll book for tomorrow."),
            agent("Of course, what time and how many guests?"),
            caller("Tomorrow at 20:00, two people."),
        ],
    },
    Recording {
        id: "rec3",
        title: "Call #3: birthday",
        duration: "03:20",
        caller_name: Some("Sergey"),
        phone: Some("+7 (903) 222-33-44"),
        transcript: &[
            caller("Good afternoon! We're planning a birthday, 6 people."),
            agent("Congratulations! We can offer the hall by the window."),
            caller("Lovely, tomorrow at 18:30."),
            agent("Booking created. Would you like a cake or candles?"),
            caller("Yes, a small cake, please."),
        ],
    },
    Recording {
        id: "rec4",
        title: "Call #4: parking",
        duration: "00:47",
        caller_name: Some("Olga"),
        phone: Some("+7 (901) 000-11-22"),
        transcript: &[
            caller("Hello! Do you have parking?"),
            agent("Yes, 10 spaces, the first hour is free."),
            caller("Thanks, that's convenient!"),
            agent("We look forward to seeing you!"),
            caller("Have a nice day!"),
        ],
    },
];

/// Trimmed, case-insensitive search over caller, phone, title and transcript.
pub fn filter_recordings<'a>(recordings: &'a [Recording], query: &str) -> Vec<&'a Recording> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return recordings.iter().collect();
    }

    let matches = |text: &str| text.to_lowercase().contains(&query);
    recordings
        .iter()
        .filter(|rec| {
            rec.caller_name.is_some_and(matches)
                || rec.phone.is_some_and(matches)
                || matches(rec.title)
                || rec.transcript.iter().any(|line| matches(line.text))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub title: &'static str,
    pub value: &'static str,
    pub sublabel: Option<&'static str>,
    pub percent: u8,
}

pub const STATS: &[Stat] = &[
    Stat {
        title: "Calls today",
        value: "42",
        sublabel: Some("of 60"),
        percent: 70,
    },
    Stat {
        title: "LLM errors",
        value: "3",
        sublabel: Some("of 42"),
        percent: 7,
    },
    Stat {
        title: "Successful bookings",
        value: "18",
        sublabel: Some("of 22"),
        percent: 82,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub name: &'static str,
    pub price: &'static str,
    pub next_charge: &'static str,
}

pub const PLAN: Plan = Plan {
    name: "Pro",
    price: "4 900 RUB / month",
    next_charge: "15.09.2025",
};

#[derive(Debug, Clone, Copy)]
pub struct PaymentCard {
    pub masked_number: &'static str,
    pub holder: &'static str,
    pub expires: &'static str,
}

pub const PAYMENT_CARD: PaymentCard = PaymentCard {
    masked_number: "**** **** **** 1234",
    holder: "IVAN IVANOV",
    expires: "12/27",
};

#[derive(Debug, Clone, Copy)]
pub struct Invoice {
    pub date: &'static str,
    pub amount: &'static str,
    pub status: &'static str,
}

pub const INVOICES: &[Invoice] = &[
    Invoice {
        date: "15.08.2025",
        amount: "4 900 RUB",
        status: "Paid",
    },
    Invoice {
        date: "15.07.2025",
        amount: "4 900 RUB",
        status: "Paid",
    },
    Invoice {
        date: "15.06.2025",
        amount: "4 900 RUB",
        status: "Paid",
    },
];

#[cfg(test)]
mod tests {
    use super::{filter_clients, filter_recordings, CLIENTS, RECORDINGS};

    fn client_ids(query: &str) -> Vec<&'static str> {
        filter_clients(CLIENTS, query).iter().map(|c| c.id).collect()
    }

    fn recording_ids(query: &str) -> Vec<&'static str> {
        filter_recordings(RECORDINGS, query).iter().map(|r| r.id).collect()
    }

    #[test]
    fn client_search_matches_name_case_insensitively() {
        assert_eq!(client_ids("maria"), vec!["c2"]);
        assert_eq!(client_ids(""), vec!["c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn client_search_matches_phone_substring() {
        assert_eq!(client_ids("555-77"), vec!["c2"]);
        assert!(client_ids("nobody").is_empty());
    }

    #[test]
    fn recording_search_covers_transcript_text() {
        assert_eq!(recording_ids("  CAKE "), vec!["rec3"]);
        assert_eq!(recording_ids("parking"), vec!["rec4"]);
        assert_eq!(recording_ids("(926)"), vec!["rec2"]);
        assert_eq!(recording_ids("   ").len(), RECORDINGS.len());
    }
}
