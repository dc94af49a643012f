//! Prompt templates for the layout and chapter stages.

use syllabus_core::{ChapterSkeleton, CourseBrief};
use syllabus_error::{JsonError, SyllabusResult};

const LAYOUT_PROMPT: &str = r#"Generate a Learning Course based on the following details. Make sure to include:
- Course Name
- Description
- Category
- Level
- Include Video (boolean)
- Number of Chapters
- Banner Image Prompt: (modern, flat-style 2D digital illustration...)
- Chapters, where each chapter has a Chapter Name, a list of Topics, and a highly relevant YouTube video URL.
Return only valid JSON following this schema:
{
  "course": {
    "name": "string",
    "description": "string",
    "category": "string",
    "level": "string",
    "includeVideo": "boolean",
    "noOfChapters": "number",
    "bannerImagePrompt": "string",
    "chapters": [
      {
        "chapterName": "string",
        "topics": ["string", "string"],
        "videoUrl": "string"
      }
    ]
  }
}
Each videoUrl must be a publicly accessible, educational YouTube URL directly related to the chapter. If no suitable video exists, use an empty string.

Course details:
"#;

/// Layout prompt: fixed instructions and schema followed by the brief as JSON.
///
/// # Errors
///
/// Returns a `JsonError` if the brief cannot be serialized.
pub fn layout_prompt(brief: &CourseBrief) -> SyllabusResult<String> {
    let details = serde_json::to_string(brief)
        .map_err(|e| JsonError::serialize("brief", e))?;
    Ok(format!("{LAYOUT_PROMPT}{details}"))
}

/// Chapter prompt: instructions scoped to one chapter plus its topic list.
///
/// # Errors
///
/// Returns a `JsonError` if the topics cannot be serialized.
pub fn chapter_prompt(chapter: &ChapterSkeleton) -> SyllabusResult<String> {
    let name = &chapter.chapter_name;
    let topics = serde_json::to_string_pretty(&chapter.topics)
        .map_err(|e| JsonError::serialize("topics", e))?;
    Ok(format!(
        r#"Generate detailed educational HTML content for the given chapter and topics.
Respond strictly in JSON format only. Do NOT include extra explanations or markdown fences.

Schema:
{{
  "chapterName": "{name}",
  "topics": [
    {{
      "topic": "<topic>",
      "content": "<h2>...</h2><p>...</p>"
    }}
  ]
}}

Now generate content for the chapter: "{name}"
Topics:
{topics}"#
    ))
}

/// Search query for a chapter or course subject.
pub fn video_query(subject: &str, qualifier: &str) -> String {
    let subject = subject.trim();
    let qualifier = qualifier.trim();
    if qualifier.is_empty() {
        subject.to_string()
    } else {
        format!("{subject} {qualifier}")
    }
}
