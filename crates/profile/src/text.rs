use crate::record::{CandidateRecord, SlotRecord};

/// Separator between rendered fields.
pub const FIELD_SEPARATOR: &str = " | ";

/// Render a candidate to its canonical embedding text.
///
/// Field order: skills, degree, stream, location (city + state, only when
/// both are present), preferred locations, notes. Blank fields are skipped
/// entirely; they never produce empty-labeled segments.
pub fn candidate_text(record: &CandidateRecord) -> String {
    let mut parts = Vec::new();
    push_field(&mut parts, "Skills", record.skills.as_deref());
    push_field(&mut parts, "Degree", record.degree.as_deref());
    push_field(&mut parts, "Stream", record.stream.as_deref());
    push_location(&mut parts, record.city.as_deref(), record.state.as_deref());
    push_field(
        &mut parts,
        "Preferred Locations",
        record.preferred_locations.as_deref(),
    );
    push_field(&mut parts, "Notes", record.notes.as_deref());
    parts.join(FIELD_SEPARATOR)
}

/// Render a slot to its canonical embedding text.
///
/// Field order: required skills, job description, position title, location
/// (city + state, only when both are present), priority flags, notes.
pub fn slot_text(record: &SlotRecord) -> String {
    let mut parts = Vec::new();
    push_field(&mut parts, "Required Skills", record.required_skills.as_deref());
    push_field(&mut parts, "Job Description", record.description.as_deref());
    push_field(&mut parts, "Position", record.position_title.as_deref());
    push_location(&mut parts, record.city.as_deref(), record.state.as_deref());
    push_field(&mut parts, "Priority", record.priority_flags.as_deref());
    push_field(&mut parts, "Notes", record.notes.as_deref());
    parts.join(FIELD_SEPARATOR)
}

fn push_field(parts: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let value = value.trim();
        if !value.is_empty() {
            parts.push(format!("{label}: {value}"));
        }
    }
}

/// The combined location segment requires both halves; a city without a
/// state (or the reverse) is dropped.
fn push_location(parts: &mut Vec<String>, city: Option<&str>, state: Option<&str>) {
    if let (Some(city), Some(state)) = (city, state) {
        let city = city.trim();
        let state = state.trim();
        if !city.is_empty() && !state.is_empty() {
            parts.push(format!("Location: {city}, {state}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_candidate() -> CandidateRecord {
        let mut candidate = CandidateRecord::new("c-1", "Asha Rao");
        candidate.skills = Some("Rust, SQL".into());
        candidate.degree = Some("B.Tech".into());
        candidate.stream = Some("Computer Science".into());
        candidate.city = Some("Pune".into());
        candidate.state = Some("MH".into());
        candidate.preferred_locations = Some("Bengaluru; Remote".into());
        candidate.notes = Some("Open source contributor".into());
        candidate
    }

    #[test]
    fn candidate_fields_render_in_fixed_order() {
        let text = candidate_text(&full_candidate());
        assert_eq!(
            text,
            "Skills: Rust, SQL | Degree: B.Tech | Stream: Computer Science | \
             Location: Pune, MH | Preferred Locations: Bengaluru; Remote | \
             Notes: Open source contributor"
        );
    }

    #[test]
    fn slot_fields_render_in_fixed_order() {
        let mut slot = SlotRecord::new("s-1", "Acme Corp");
        slot.required_skills = Some("Python, Django".into());
        slot.description = Some("Backend services".into());
        slot.position_title = Some("Backend Intern".into());
        slot.city = Some("Mumbai".into());
        slot.state = Some("MH".into());
        slot.priority_flags = Some("rural".into());
        slot.notes = Some("6 month internship".into());

        assert_eq!(
            slot_text(&slot),
            "Required Skills: Python, Django | Job Description: Backend services | \
             Position: Backend Intern | Location: Mumbai, MH | Priority: rural | \
             Notes: 6 month internship"
        );
    }

    #[test]
    fn absent_fields_are_skipped_without_empty_segments() {
        let mut candidate = CandidateRecord::new("c-2", "Ravi Kumar");
        candidate.degree = Some("MCA".into());
        candidate.notes = Some("night shifts ok".into());

        let text = candidate_text(&candidate);
        assert_eq!(text, "Degree: MCA | Notes: night shifts ok");
        assert!(!text.contains("Skills"));
        assert!(!text.contains("| |"));
    }

    #[test]
    fn blank_and_whitespace_fields_count_as_absent() {
        let mut candidate = CandidateRecord::new("c-3", "Meera Shah");
        candidate.skills = Some("   ".into());
        candidate.degree = Some(String::new());
        candidate.stream = Some("Electronics".into());

        assert_eq!(candidate_text(&candidate), "Stream: Electronics");
    }

    #[test]
    fn location_requires_both_city_and_state() {
        let mut candidate = CandidateRecord::new("c-4", "Dev Patel");
        candidate.city = Some("Surat".into());
        assert_eq!(candidate_text(&candidate), "");

        candidate.city = None;
        candidate.state = Some("GJ".into());
        assert_eq!(candidate_text(&candidate), "");

        candidate.city = Some("Surat".into());
        assert_eq!(candidate_text(&candidate), "Location: Surat, GJ");
    }

    #[test]
    fn empty_record_renders_to_empty_string() {
        assert_eq!(candidate_text(&CandidateRecord::new("c-5", "Blank")), "");
        assert_eq!(slot_text(&SlotRecord::new("s-5", "Blank Inc")), "");
    }

    #[test]
    fn demographic_fields_never_enter_the_text() {
        let mut candidate = full_candidate();
        candidate.caste = Some("general".into());
        candidate.gender = Some("female".into());
        candidate.pincode = Some("411001".into());
        candidate.financial_status = Some("ews".into());

        let text = candidate_text(&candidate);
        assert!(!text.contains("general"));
        assert!(!text.contains("female"));
        assert!(!text.contains("411001"));
        assert!(!text.contains("ews"));
    }

    #[test]
    fn stipend_never_enters_slot_text() {
        let mut slot = SlotRecord::new("s-2", "Acme Corp");
        slot.position_title = Some("Data Intern".into());
        slot.stipend = Some(30_000.0);

        assert_eq!(slot_text(&slot), "Position: Data Intern");
    }
}
