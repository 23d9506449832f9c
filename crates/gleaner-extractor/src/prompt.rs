//! LLM prompt engineering for record extraction

use gleaner_domain::traits::ChatRequest;

/// Builds the chat request that asks the model for one event record
pub struct PromptBuilder<'a> {
    content: &'a str,
    source_url: Option<&'a str>,
    existing_tags: &'a [String],
    existing_ids: &'a [String],
    max_content_chars: usize,
    tag_limit: usize,
    id_limit: usize,
    temperature: f32,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            source_url: None,
            existing_tags: &[],
            existing_ids: &[],
            max_content_chars: 8_000,
            tag_limit: 20,
            id_limit: 10,
            temperature: 0.1,
        }
    }

    /// Mention the page the content came from
    pub fn with_source_url(mut self, url: Option<&'a str>) -> Self {
        self.source_url = url;
        self
    }

    /// Add tags and ids already in the datasets as deduplication hints
    pub fn with_hints(mut self, tags: &'a [String], ids: &'a [String]) -> Self {
        self.existing_tags = tags;
        self.existing_ids = ids;
        self
    }

    /// Cap hint lists
    pub fn with_hint_limits(mut self, tag_limit: usize, id_limit: usize) -> Self {
        self.tag_limit = tag_limit;
        self.id_limit = id_limit;
        self
    }

    /// Cap content length, in characters
    pub fn with_max_content_chars(mut self, max: usize) -> Self {
        self.max_content_chars = max;
        self
    }

    /// Sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the complete request
    pub fn build(&self) -> ChatRequest {
        ChatRequest::new(self.system_prompt(), self.user_prompt())
            .with_temperature(self.temperature)
    }

    fn system_prompt(&self) -> String {
        let mut prompt = String::with_capacity(EXTRACTION_INSTRUCTIONS.len() + 512);

        // 1. Schema and rules
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Deduplication hints
        prompt.push_str("Preferred tags (reuse when they fit): ");
        prompt.push_str(&hint_list(self.existing_tags, self.tag_limit));
        prompt.push('\n');
        prompt.push_str("Sub-event ids already taken (never reuse): ");
        prompt.push_str(&hint_list(self.existing_ids, self.id_limit));
        prompt.push_str("\n\n");

        // 3. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }

    fn user_prompt(&self) -> String {
        let content = truncate_chars(self.content, self.max_content_chars);
        match self.source_url {
            Some(url) => format!(
                "Extract the event information from the following web page.\n\nSource URL: {}\n\nContent:\n{}",
                url, content
            ),
            None => format!("Extract the event information from the following content.\n\n{}", content),
        }
    }
}

/// Comma-separated list, capped, with a note when entries were left out
fn hint_list(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    let shown: Vec<&str> = items.iter().take(limit).map(String::as_str).collect();
    let mut list = shown.join(", ");
    if items.len() > shown.len() {
        list.push_str(&format!(" and {} more", items.len() - shown.len()));
    }
    list
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You extract open source conferences, competitions and community activities from text.
Return one JSON object describing the event with these fields:

{
  "title": "event name (required)",
  "description": "one sentence, at most 100 words",
  "category": "one of: conference, competition, activity (required)",
  "tags": ["at least one short tag"],
  "website": "official URL",
  "location": "city or 'online'",
  "start_date": "YYYY-MM-DD",
  "end_date": "YYYY-MM-DD",
  "events": [{
    "id": "unique id such as rustconf-2025",
    "title": "short label of this edition or round",
    "year": 2025,
    "deadline": "YYYY-MM-DD",
    "link": "URL of this edition",
    "timeline": [{"deadline": "YYYY-MM-DDTHH:MM:SS", "comment": "what happens then"}],
    "timezone": "IANA name such as Asia/Shanghai",
    "date": "human readable span",
    "place": "venue or 'online'"
  }]
}

Rules:
- category must be exactly conference, competition or activity
- Dates use YYYY-MM-DD; timeline entries use YYYY-MM-DDTHH:MM:SS
- When only a day is known, start times are T00:00:00 and end times T23:59:59
- The timeline lists every key moment: registration deadlines, start, end
- end_date is never before start_date
- ids are lowercase words joined by hyphens and end with the year
- Omit a field rather than guessing; use null for unknown values"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Remember: return ONLY the JSON object, no markdown code blocks, no explanations.";
