//! Word lists used to give generated records a plausible shape.

pub(crate) const TITLES: &[&str] = &[
    "Senior Product Manager",
    "Founder & CEO",
    "Creative Director",
    "Investment Partner",
    "Senior Consultant",
    "Full-Stack Developer",
    "Software Engineer",
    "Data Scientist",
    "UX Designer",
    "Marketing Manager",
    "Sales Director",
    "Operations Manager",
    "CTO",
    "VP Engineering",
    "Principal Engineer",
    "Engineering Manager",
    "Head of Product",
    "Growth Manager",
    "Customer Success Manager",
    "Business Development Manager",
    "Financial Analyst",
    "Security Engineer",
    "Developer Relations",
    "Recruiter",
    "Chief Operating Officer",
];

pub(crate) const CATEGORIES: &[&str] = &[
    "work", "client", "prospect", "mentor", "friend", "family", "vendor", "partner",
];

pub(crate) const SOURCES: &[&str] = &["conference", "referral", "linkedin", "work", "social", "other"];

pub(crate) const INTERACTION_TYPES: &[&str] =
    &["meeting", "call", "email", "message", "coffee", "conference"];

pub(crate) const OUTCOMES: &[&str] = &["positive", "neutral", "negative"];

pub(crate) const SUBJECTS: &[&str] = &[
    "Initial Introduction",
    "Follow-up Meeting",
    "Project Discussion",
    "Coffee Chat",
    "Networking Event",
    "Conference Call",
    "Product Demo",
    "Strategy Session",
    "Check-in Call",
    "Partnership Discussion",
    "Consulting Inquiry",
    "Referral Meeting",
    "Industry Update",
    "Collaboration Opportunity",
    "Service Proposal",
    "Market Research",
    "Technical Discussion",
    "Investment Pitch",
    "Mentorship Session",
    "Team Introduction",
];

pub(crate) const RELATIONSHIP_TYPES: &[&str] = &[
    "colleague",
    "introduced_by",
    "worked_together",
    "mentor_mentee",
    "client_vendor",
    "business_partner",
];

/// Closing sentence for interaction notes, keyed by outcome.
pub(crate) fn outcome_remark(outcome: &str) -> &'static str {
    match outcome {
        "positive" => "Great conversation and good potential for future collaboration.",
        "neutral" => "Good discussion, following up as needed.",
        _ => "Discussion needs more work and follow-up.",
    }
}
