//! Prompt templates for the generation backend.
//!
//! The exact wording is not load-bearing; what matters is the field list,
//! the defaults, and the JSON-only instruction that keeps the strict parse
//! path viable.

use chrono::NaiveDate;
use tempo_domain::BehavioralProfile;

/// Build the parse-event prompt for a free-text appointment description.
pub fn parse_event(input: &str, today: NaiveDate) -> String {
    let mut prompt = String::from(
        "You are a calendar assistant. Parse the following natural language input into calendar event details.\n\n",
    );

    prompt.push_str(&format!("Input: \"{input}\"\n\n"));
    prompt.push_str(
        "Extract the following information:\n\
         - title: The event title/subject\n\
         - date: The date (if mentioned) in ISO format (YYYY-MM-DD)\n\
         - time: The time (if mentioned) in 24-hour format (HH:MM)\n\
         - duration: How long the event lasts (in minutes, as a number)\n\
         - location: Where the event takes place\n\
         - attendees: List of people attending (as array)\n\
         - category: One of [meeting, task, reminder, personal, work]\n\
         - description: Any additional details\n\n",
    );
    prompt.push_str(&format!(
        "If information is not provided, use these defaults:\n\
         - date: today's date ({today})\n\
         - time: \"09:00\"\n\
         - duration: 60\n\
         - category: \"meeting\"\n\n",
    ));
    prompt.push_str(
        "Example response format:\n\
         {\n\
           \"title\": \"Team Meeting\",\n\
           \"date\": \"2024-10-26\",\n\
           \"time\": \"14:00\",\n\
           \"duration\": 60,\n\
           \"location\": \"Conference Room\",\n\
           \"attendees\": [\"John\", \"Sarah\"],\n\
           \"category\": \"meeting\",\n\
           \"description\": \"Weekly team sync\",\n\
           \"confidence\": 0.95\n\
         }\n\n",
    );
    prompt.push_str(
        "IMPORTANT: Respond ONLY with valid JSON. Do not include any explanatory text before or \
         after the JSON. Do not include markdown code blocks. Just the raw JSON object.",
    );

    prompt
}

/// Build a prompt suggesting meeting slots from a learned profile.
pub fn suggest_time(event_type: &str, profile: &BehavioralProfile) -> String {
    let categories: Vec<&str> =
        profile.preferred_categories.iter().map(|category| category.as_str()).collect();

    let mut prompt =
        format!("Based on the user's calendar patterns, suggest the best time for a {event_type}.\n\n");

    prompt.push_str(&format!(
        "User patterns:\n\
         - Common meeting times: {}\n\
         - Average meeting duration: {} minutes\n\
         - Frequent attendees: {}\n\
         - Preferred categories: {}\n\n",
        profile.common_meeting_times.join(", "),
        profile.average_meeting_duration,
        profile.frequent_attendees.join(", "),
        categories.join(", "),
    ));
    prompt.push_str(
        "Suggest 3 optimal time slots for the next 7 days.\n\
         Consider work hours (9 AM - 5 PM) and avoid lunch time (12 PM - 1 PM).\n\n\
         RESPOND WITH ONLY THE JSON OBJECT. NO OTHER TEXT.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_embeds_input_and_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 26).expect("valid date");
        let prompt = parse_event("lunch with Sarah tomorrow", today);

        assert!(prompt.contains("Input: \"lunch with Sarah tomorrow\""));
        assert!(prompt.contains("today's date (2024-10-26)"));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
    }

    #[test]
    fn suggest_time_embeds_learned_patterns() {
        let profile = BehavioralProfile::default_for("user-1", chrono::Utc::now());
        let prompt = suggest_time("standup", &profile);

        assert!(prompt.contains("best time for a standup"));
        assert!(prompt.contains("09:00, 14:00"));
        assert!(prompt.contains("60 minutes"));
    }
}
