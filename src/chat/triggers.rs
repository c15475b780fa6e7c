//! Canned replies checked before any upstream call.

/// Ordered `(lowercase phrase, reply)` pairs; the first phrase found anywhere
/// in the lowercased message wins.
pub const TRIGGERS: &[(&str, &str)] = &[
    ("what is your name", "My name is NIVI AIGPT 🙂"),
    ("who made you", TEAM_CREDITS),
];

pub const TEAM_CREDITS: &str = "I was created by my amazing team:

Archisman Karmakar (Frontend Engineer, Team Lead)
Mriganka Banik (UI/UX Designer, Researcher)
Hiya Maity (AI-ML Deployment, Lead Presenter)
Debojit Neogy (Backend Engineer)
Debjit Karmakar (Researcher, PPT Editor)
Samir Shaw (Frontend Engineer)";

pub fn match_trigger<'a>(table: &'a [(&'a str, &'a str)], message: &str) -> Option<&'a str> {
    let lowered = message.to_lowercase();
    table
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
        .map(|(_, reply)| *reply)
}
