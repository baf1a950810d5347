// assay-core/src/domain/suite.rs

// Collection time: one test case per assertion spec entry, all sharing the
// same read-only template store.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::assertion::AssertionSpec;
use crate::domain::template::TemplateStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub column: String,
    pub requirement: String,
}

/// One executable test: run `task`, then check `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// External identifier (the task id of the assertion entry).
    pub id: String,
    pub task: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_input: Option<String>,
    pub checks: Vec<Check>,
}

impl TestCase {
    pub fn from_spec(id: &str, spec: &AssertionSpec) -> Self {
        Self {
            id: id.to_string(),
            task: spec.source.clone(),
            destination: spec.destination.clone(),
            primary_input: spec.primary_input.clone(),
            checks: spec
                .checks()
                .map(|(column, requirement)| Check {
                    column: column.to_string(),
                    requirement: requirement.to_string(),
                })
                .collect(),
        }
    }

    /// Marker used to pick the primary input of the task.
    pub fn input_marker<'a>(&'a self, default_marker: &'a str) -> &'a str {
        self.primary_input.as_deref().unwrap_or(default_marker)
    }
}

#[derive(Debug, Clone)]
pub struct TestSuite {
    templates: Arc<TemplateStore>,
    cases: Vec<TestCase>,
}

impl TestSuite {
    /// Keeps the loader order. Ordering only matters for reporting.
    pub fn generate(templates: Arc<TemplateStore>, specs: &[(String, AssertionSpec)]) -> Self {
        let cases = specs
            .iter()
            .map(|(id, spec)| TestCase::from_spec(id, spec))
            .collect();
        Self { templates, cases }
    }

    /// Narrows the suite to the test case with the given id (no-op on `None`).
    pub fn select(mut self, id: Option<&str>) -> Self {
        if let Some(id) = id {
            self.cases.retain(|c| c.id == id);
        }
        self
    }

    pub fn templates(&self) -> &Arc<TemplateStore> {
        &self.templates
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assertion::ColumnChecks;

    fn spec(id: &str, destination: Option<&str>, cols: &[(&str, &[&str])]) -> (String, AssertionSpec) {
        let columns = cols
            .iter()
            .map(|(c, reqs)| ColumnChecks {
                column: c.to_string(),
                requirements: reqs.iter().map(|r| r.to_string()).collect(),
            })
            .collect();
        (
            id.to_string(),
            AssertionSpec::new(id, None, destination.map(String::from), None, columns),
        )
    }

    #[test]
    fn test_generate_one_case_per_spec_in_order() {
        let specs = vec![
            spec("orders", None, &[("id", &["not_null"])]),
            spec("customers", Some("dim_customers"), &[("email", &["unique", "not_null"])]),
            spec("empty", None, &[]),
        ];
        let suite = TestSuite::generate(Arc::new(TemplateStore::default()), &specs);

        assert_eq!(suite.ids(), vec!["orders", "customers", "empty"]);
        let customers = &suite.cases()[1];
        assert_eq!(customers.task, "customers");
        assert_eq!(customers.destination, "dim_customers");
        assert_eq!(
            customers.checks,
            vec![
                Check {
                    column: "email".into(),
                    requirement: "unique".into()
                },
                Check {
                    column: "email".into(),
                    requirement: "not_null".into()
                },
            ]
        );
        assert!(suite.cases()[2].checks.is_empty());
    }

    #[test]
    fn test_cases_share_the_template_store() {
        let templates = Arc::new(TemplateStore::default());
        let suite = TestSuite::generate(templates.clone(), &[spec("a", None, &[])]);
        assert!(Arc::ptr_eq(suite.templates(), &templates));
    }

    #[test]
    fn test_select_narrows_suite() {
        let specs = vec![spec("a", None, &[]), spec("b", None, &[])];
        let suite = TestSuite::generate(Arc::new(TemplateStore::default()), &specs);

        assert_eq!(suite.clone().select(None).len(), 2);
        assert_eq!(suite.clone().select(Some("b")).ids(), vec!["b"]);
        assert!(suite.select(Some("zzz")).is_empty());
    }

    #[test]
    fn test_input_marker_override() {
        let (_, mut s) = spec("a", None, &[]);
        let case = TestCase::from_spec("a", &s);
        assert_eq!(case.input_marker("data"), "data");

        s.primary_input = Some("raw/".into());
        let case = TestCase::from_spec("a", &s);
        assert_eq!(case.input_marker("data"), "raw/");
    }
}
