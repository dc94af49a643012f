//! Canonical ingestion of model-produced course JSON.
//!
//! Models return the layout in several shapes: wrapped in a `course` object
//! or flat, with topics as strings or objects, with video links under
//! different keys. Everything is mapped onto the canonical types here, once,
//! so later stages never probe alternate field names.

use crate::{ChapterContent, ChapterSkeleton, CourseBrief, CourseLayout, TopicContent, watch_url_for};
use serde_json::{Map, Value};

/// Default difficulty level when neither the model nor the brief supplies one.
pub const DEFAULT_LEVEL: &str = "Beginner";
/// Default category when neither the model nor the brief supplies one.
pub const DEFAULT_CATEGORY: &str = "General";
/// Banner prompt used when the model omits one.
pub const DEFAULT_BANNER_PROMPT: &str =
    "modern flat-style 2D digital illustration for online learning course";

const CHAPTER_NAME_KEYS: &[&str] = &["chapterName", "chapter_name", "name", "title"];
const TOPIC_NAME_KEYS: &[&str] = &["topic", "title", "name"];
const VIDEO_URL_KEYS: &[&str] = &["videoUrl", "video_url", "videoWatchUrl"];

/// Fixed fallbacks applied after the brief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDefaults {
    /// Difficulty level fallback
    pub level: String,
    /// Category fallback
    pub category: String,
    /// Banner prompt fallback
    pub banner_prompt: String,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            banner_prompt: DEFAULT_BANNER_PROMPT.to_string(),
        }
    }
}

/// Shape of a layout reply after extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPayload {
    /// `{"course": {...}}`
    Wrapped(Map<String, Value>),
    /// The course object at top level
    Flat(Map<String, Value>),
    /// Extraction failed; the reply text is kept verbatim
    Unparsed(String),
}

impl LayoutPayload {
    /// Classify an extraction result, keeping `raw` when nothing usable was found.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use syllabus_core::LayoutPayload;
    ///
    /// let wrapped = LayoutPayload::classify(Some(json!({"course": {"name": "X"}})), "");
    /// assert!(matches!(wrapped, LayoutPayload::Wrapped(_)));
    ///
    /// let unparsed = LayoutPayload::classify(None, "sorry, no JSON today");
    /// assert_eq!(unparsed, LayoutPayload::Unparsed("sorry, no JSON today".into()));
    /// ```
    pub fn classify(extracted: Option<Value>, raw: &str) -> Self {
        match extracted {
            Some(Value::Object(mut map)) => match map.remove("course") {
                Some(Value::Object(inner)) => Self::Wrapped(inner),
                Some(other) => {
                    map.insert("course".to_string(), other);
                    Self::Flat(map)
                }
                None => Self::Flat(map),
            },
            _ => Self::Unparsed(raw.to_string()),
        }
    }
}

/// Map a layout payload onto a [`CourseLayout`].
///
/// Scalar fields fall back to the brief, then to `defaults`.
/// `include_video` always comes from the brief; an echoed `includeVideo`
/// is ignored. Missing `chapters` become an empty list; the chapter count
/// is never checked against the brief. An unparsed payload yields a layout with `raw` set and
/// no chapters.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use syllabus_core::{CourseBrief, LayoutDefaults, LayoutPayload, normalize_layout};
///
/// let brief = CourseBrief::builder().name("Intro to X").number_of_chapters(2u32).build().unwrap();
/// let payload = LayoutPayload::classify(Some(json!({
///     "course": {
///         "chapters": [
///             {"chapterName": "One", "topics": ["a", {"topic": "b"}], "videoId": "dQw4w9WgXcQ"}
///         ]
///     }
/// })), "");
///
/// let layout = normalize_layout(payload, &brief, &LayoutDefaults::default());
/// assert_eq!(layout.name, "Intro to X");
/// assert_eq!(layout.level, "Beginner");
/// assert_eq!(layout.chapters[0].topics, vec!["a", "b"]);
/// assert_eq!(
///     layout.chapters[0].video_url.as_deref(),
///     Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
/// );
/// ```
pub fn normalize_layout(
    payload: LayoutPayload,
    brief: &CourseBrief,
    defaults: &LayoutDefaults,
) -> CourseLayout {
    let map = match payload {
        LayoutPayload::Wrapped(map) | LayoutPayload::Flat(map) => map,
        LayoutPayload::Unparsed(raw) => {
            return CourseLayout {
                name: brief.name.clone(),
                description: brief.description.clone(),
                category: fallback(&brief.category, &defaults.category),
                level: fallback(&brief.level, &defaults.level),
                include_video: brief.include_video,
                banner_image_prompt: defaults.banner_prompt.clone(),
                chapters: Vec::new(),
                raw: Some(raw),
            };
        }
    };

    let chapters = map
        .get("chapters")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_chapter).collect())
        .unwrap_or_default();

    CourseLayout {
        name: string_field(&map, &["name", "courseName", "title"])
            .unwrap_or_else(|| brief.name.clone()),
        description: string_field(&map, &["description"])
            .unwrap_or_else(|| brief.description.clone()),
        category: string_field(&map, &["category"])
            .unwrap_or_else(|| fallback(&brief.category, &defaults.category)),
        level: string_field(&map, &["level"])
            .unwrap_or_else(|| fallback(&brief.level, &defaults.level)),
        include_video: brief.include_video,
        banner_image_prompt: string_field(&map, &["bannerImagePrompt", "banner_image_prompt"])
            .unwrap_or_else(|| defaults.banner_prompt.clone()),
        chapters,
        raw: None,
    }
}

/// Map one chapter-content reply onto a [`ChapterContent`] for `skeleton`.
///
/// Returns `None` when the value carries no usable topics, which callers
/// treat as a failed chapter. Topics missing a body get the placeholder
/// fragment. The chapter name is always the skeleton's, since it is what
/// ties the content back to its layout chapter.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use syllabus_core::{ChapterSkeleton, normalize_chapter_content};
///
/// let skeleton = ChapterSkeleton::new("Basics", ["A"]);
/// let value = json!({"topics": [{"topic": "A", "content": "<h2>A</h2><p>...</p>"}]});
/// let content = normalize_chapter_content(&value, &skeleton).unwrap();
/// assert_eq!(content.chapter_name, "Basics");
/// assert!(!content.placeholder);
///
/// assert!(normalize_chapter_content(&json!({"topics": []}), &skeleton).is_none());
/// ```
pub fn normalize_chapter_content(value: &Value, skeleton: &ChapterSkeleton) -> Option<ChapterContent> {
    let map = value.as_object()?;
    let topics: Vec<TopicContent> = map
        .get("topics")?
        .as_array()?
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => {
                let topic = string_field(obj, TOPIC_NAME_KEYS)?;
                let content = string_field(obj, &["content", "html"])
                    .unwrap_or_else(|| crate::placeholder_fragment(&topic));
                Some(TopicContent::new(topic, content))
            }
            _ => None,
        })
        .collect();
    if topics.is_empty() {
        return None;
    }
    Some(ChapterContent {
        chapter_name: skeleton.chapter_name.clone(),
        topics,
        video: None,
        placeholder: false,
    })
}

fn normalize_chapter(value: &Value) -> Option<ChapterSkeleton> {
    let map = value.as_object()?;
    let chapter_name = string_field(map, CHAPTER_NAME_KEYS)?;
    let topics = map
        .get("topics")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|t| match t {
                    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                    Value::Object(obj) => string_field(obj, TOPIC_NAME_KEYS),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    let duration = match map.get("duration") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let video_url = string_field(map, VIDEO_URL_KEYS)
        .or_else(|| string_field(map, &["videoId", "video_id"]).map(|id| watch_url_for(&id)));

    Some(ChapterSkeleton {
        chapter_name,
        topics,
        duration,
        video_url,
    })
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn fallback(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brief() -> CourseBrief {
        CourseBrief::builder()
            .name("Intro to X")
            .category("Programming")
            .number_of_chapters(3u32)
            .include_video(true)
            .build()
            .unwrap()
    }

    #[test]
    fn flat_shape_is_accepted() {
        let payload = LayoutPayload::classify(
            Some(json!({
                "name": "Model Name",
                "level": "Advanced",
                "includeVideo": "false",
                "chapters": [{"chapterName": "A", "topics": ["x"], "duration": 30}]
            })),
            "",
        );
        assert!(matches!(payload, LayoutPayload::Flat(_)));
        let layout = normalize_layout(payload, &brief(), &LayoutDefaults::default());
        assert_eq!(layout.name, "Model Name");
        assert_eq!(layout.level, "Advanced");
        assert_eq!(layout.category, "Programming");
        assert!(layout.include_video);
        assert_eq!(layout.chapters[0].duration.as_deref(), Some("30"));
    }

    #[test]
    fn missing_chapters_default_to_empty() {
        let payload = LayoutPayload::classify(Some(json!({"course": {"name": "X"}})), "");
        let layout = normalize_layout(payload, &brief(), &LayoutDefaults::default());
        assert!(layout.chapters.is_empty());
        assert_eq!(layout.banner_image_prompt, DEFAULT_BANNER_PROMPT);
        assert!(!layout.is_unparsed());
    }

    #[test]
    fn unparsed_reply_is_kept_raw() {
        let payload = LayoutPayload::classify(None, "not json");
        let layout = normalize_layout(payload, &brief(), &LayoutDefaults::default());
        assert_eq!(layout.raw.as_deref(), Some("not json"));
        assert!(!layout.is_browsable());
    }

    #[test]
    fn array_reply_is_unparsed() {
        let payload = LayoutPayload::classify(Some(json!([1, 2])), "[1, 2]");
        assert!(matches!(payload, LayoutPayload::Unparsed(_)));
    }

    #[test]
    fn chapters_without_names_are_dropped() {
        let payload = LayoutPayload::classify(
            Some(json!({"chapters": [{"topics": ["x"]}, {"title": "Kept"}]})),
            "",
        );
        let layout = normalize_layout(payload, &brief(), &LayoutDefaults::default());
        assert_eq!(layout.chapters.len(), 1);
        assert_eq!(layout.chapters[0].chapter_name, "Kept");
        assert!(layout.chapters[0].topics.is_empty());
    }

    #[test]
    fn video_url_preferred_over_id() {
        let payload = LayoutPayload::classify(
            Some(json!({"chapters": [{
                "chapterName": "A",
                "videoUrl": "https://youtu.be/abcdefghijk",
                "videoId": "zzzzzzzzzzz"
            }]})),
            "",
        );
        let layout = normalize_layout(payload, &brief(), &LayoutDefaults::default());
        assert_eq!(
            layout.chapters[0].video_url.as_deref(),
            Some("https://youtu.be/abcdefghijk")
        );
    }

    #[test]
    fn echoed_include_video_never_overrides_brief() {
        let mut no_video = brief();
        no_video.include_video = false;
        let payload = LayoutPayload::classify(
            Some(json!({"course": {"includeVideo": true, "chapters": []}})),
            "",
        );
        let layout = normalize_layout(payload, &no_video, &LayoutDefaults::default());
        assert!(!layout.include_video);
    }

    #[test]
    fn renamed_chapter_keeps_skeleton_name() {
        let skeleton = ChapterSkeleton::new("Ownership", ["Moves"]);
        let value = json!({
            "chapterName": "Chapter 2: Ownership and Borrowing",
            "topics": [{"topic": "Moves", "content": "<p>m</p>"}]
        });
        let content = normalize_chapter_content(&value, &skeleton).unwrap();
        assert_eq!(content.chapter_name, "Ownership");
    }

    #[test]
    fn topic_without_body_gets_placeholder() {
        let skeleton = ChapterSkeleton::new("Basics", ["A", "B"]);
        let value = json!({
            "chapterName": "Basics",
            "topics": [{"topic": "A", "content": "<p>a</p>"}, {"topic": "B"}, "stray"]
        });
        let content = normalize_chapter_content(&value, &skeleton).unwrap();
        assert_eq!(content.topics.len(), 2);
        assert_eq!(content.topics[1].content, crate::placeholder_fragment("B"));
    }
}
