use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{
    admin_task_query::AdminTaskQuery, field_errors::FieldErrors, task::Task,
    task_list_query::TaskListQuery,
};

const INVALID_DATE: &str = "Enter a valid date.";

/// Narrowing applied to a user's task list: an inclusive `created_at` range
/// and a case-insensitive substring search over title and description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Lowercased search text; `None` when no search was requested.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

impl TaskFilter {
    /// Builds a filter from query parameters. Empty parameters are ignored;
    /// unparseable dates are reported under `created_at`.
    pub fn from_query(query: &TaskListQuery) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let created_after = parse_param(query.created_at_after.as_deref(), Bound::Lower, &mut errors);
        let created_before = parse_param(query.created_at_before.as_deref(), Bound::Upper, &mut errors);
        errors.into_result()?;

        Ok(Self {
            created_after,
            created_before,
            search: normalize_search(query.search.as_deref()),
        })
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(after) = self.created_after {
            if task.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if task.created_at > before {
                return false;
            }
        }
        match &self.search {
            Some(needle) => contains_ignore_case(&task.title, needle) || contains_ignore_case(&task.description, needle),
            None => true,
        }
    }

    /// Keeps matching tasks, preserving their order.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}

/// Narrowing for the admin listing, which spans every owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminTaskFilter {
    pub search: Option<String>,
    pub is_completed: Option<bool>,
    pub owner: Option<String>,
}

impl AdminTaskFilter {
    /// Unrecognised `is_completed` values are ignored rather than rejected.
    pub fn from_query(query: &AdminTaskQuery) -> Self {
        let is_completed = match query.is_completed.as_deref().map(str::trim) {
            Some("true") | Some("1") => Some(true),
            Some("false") | Some("0") => Some(false),
            _ => None,
        };
        let owner = query
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .map(str::to_string);

        Self {
            search: normalize_search(query.q.as_deref()),
            is_completed,
            owner,
        }
    }

    pub fn matches(&self, task: &Task, owner_username: &str) -> bool {
        if self.is_completed.is_some_and(|wanted| wanted != task.is_completed) {
            return false;
        }
        if self.owner.as_deref().is_some_and(|wanted| wanted != owner_username) {
            return false;
        }
        match &self.search {
            Some(needle) => {
                contains_ignore_case(&task.title, needle)
                    || contains_ignore_case(&task.description, needle)
                    || contains_ignore_case(owner_username, needle)
            }
            None => true,
        }
    }
}

/// The whole trimmed query is one needle; words are not matched separately.
fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase)
}

fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

fn parse_param(raw: Option<&str>, bound: Bound, errors: &mut FieldErrors) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    let parsed = parse_bound(raw, bound);
    if parsed.is_none() {
        errors.add("created_at", INVALID_DATE);
    }
    parsed
}

/// A bare date covers the whole UTC day; a full timestamp is taken as is.
fn parse_bound(raw: &str, bound: Bound) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match bound {
            Bound::Lower => NaiveTime::from_hms_opt(0, 0, 0)?,
            Bound::Upper => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?,
        };
        return Some(date.and_time(time).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}
