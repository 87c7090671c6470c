//! Task domain model.
//!
//! Tasks arrive as loosely typed records: only the identity is required, every
//! other field is optional and may carry whatever the caller sent. Unknown keys
//! are preserved so a scored task echoes its input back unchanged.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Opaque task identifier.
///
/// Integers that fit an `i64` and strings get their own variants; any other
/// JSON value (floats, larger integers, `null`, booleans) is kept verbatim as
/// [`RawId`]. `1`, `"1"` and `1.0` are distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Text(String),
    Other(RawId),
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(raw) => f.write_str(raw.as_str()),
        }
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Value> for TaskId {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Other(RawId::new(Value::Number(n))),
            },
            other => Self::Other(RawId::new(other)),
        }
    }
}

/// A JSON value used as an id, compared, hashed and ordered by its compact
/// JSON text and serialized back unchanged.
#[derive(Debug, Clone)]
pub struct RawId {
    value: Value,
    text: String,
}

impl RawId {
    pub fn new(value: Value) -> Self {
        let text = value.to_string();
        Self { value, text }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for RawId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RawId {}

impl Hash for RawId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for RawId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RawId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Serialize for RawId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// Raw due-date value as supplied by the caller.
///
/// JSON input only ever produces `Text` or `Other`; the native variants exist
/// for callers building records in Rust.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DueDateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
    Other(Value),
}

impl<'de> Deserialize<'de> for DueDateInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::Text(s),
            other => Self::Other(other),
        })
    }
}

/// A caller-supplied task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,

    /// Display value, echoed back as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    /// Conventionally 1-10; falsy or missing means 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Value>,

    /// Falsy or missing means 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDateInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<TaskId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<Value>,

    /// Any other keys, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskRecord {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            importance: None,
            estimated_hours: None,
            due_date: None,
            dependencies: None,
            completed: None,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Value::String(title.into()));
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(Value::from(importance));
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(Value::from(hours));
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(DueDateInput::Date(date));
        self
    }

    pub fn with_due_text(mut self, text: impl Into<String>) -> Self {
        self.due_date = Some(DueDateInput::Text(text.into()));
        self
    }

    pub fn with_dependencies<I, T>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.dependencies = Some(deps.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(Value::Bool(completed));
        self
    }

    /// Title as display text; see [`title_text`].
    pub fn title_text(&self) -> Option<Cow<'_, str>> {
        title_text(self.title.as_ref())
    }

    /// Declared dependency ids, empty when none were given.
    pub fn dependency_ids(&self) -> &[TaskId] {
        self.dependencies.as_deref().unwrap_or(&[])
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependency_ids().is_empty()
    }

    /// Whether the record is marked completed (JSON truthiness).
    pub fn is_completed(&self) -> bool {
        self.completed.as_ref().is_some_and(is_truthy)
    }
}

/// Strings display as-is, `null` as nothing, anything else as its JSON text.
pub fn title_text(title: Option<&Value>) -> Option<Cow<'_, str>> {
    match title? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings/containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Structured flags attached to every scored task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFlags {
    pub overdue: bool,
    pub has_dependencies: bool,
}

/// Output of a single scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskScore {
    pub score: f64,
    pub explanation: String,
    pub flags: ScoreFlags,
}

/// A task record enriched with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: TaskRecord,
    pub score: f64,
    pub explanation: String,
    pub flags: ScoreFlags,
}

impl ScoredTask {
    pub fn new(mut task: TaskRecord, result: TaskScore) -> Self {
        // Computed fields replace anything the caller sent under the same names.
        for key in ["score", "explanation", "flags"] {
            task.extra.remove(key);
        }
        Self {
            task,
            score: result.score,
            explanation: result.explanation,
            flags: result.flags,
        }
    }
}

/// Reduced view of a scored task used by the suggestion operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: TaskId,
    pub title: Option<Value>,
    pub score: f64,
    pub why: String,
    pub flags: ScoreFlags,
}

impl From<&ScoredTask> for Suggestion {
    fn from(scored: &ScoredTask) -> Self {
        Self {
            id: scored.task.id.clone(),
            title: scored.task.title.clone(),
            score: scored.score,
            why: scored.explanation.clone(),
            flags: scored.flags,
        }
    }
}

impl Suggestion {
    pub fn title_text(&self) -> Option<Cow<'_, str>> {
        title_text(self.title.as_ref())
    }
}
