use serde::Serialize;

/// A searchable code example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeExample {
    pub id: &'static str,
    pub title: &'static str,
    pub keywords: &'static [&'static str],
    pub category: &'static str,
    pub description: &'static str,
    pub code: &'static str,
    pub related_lessons: &'static [&'static str],
}
