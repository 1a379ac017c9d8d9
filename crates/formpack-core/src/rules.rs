//! Extraction rules: which parts of a form snapshot are repeating groups,
//! and where in them files may live.

/// A repeating group rule. Every ruled group gets `placement_order` injected
/// at encode time; groups whose items carry a file-bearing field additionally
/// have that field extracted into binary parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    name: String,
    file_field: Option<String>,
}

impl GroupRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_field(&self) -> Option<&str> {
        self.file_field.as_deref()
    }
}

/// Ordered rule set for one builder's form.
///
/// Rule order is observable: binary parts appear in the payload in rule
/// order (group rules first, then top-level file rules), with item order
/// within each group.
///
/// # Example
///
/// ```
/// use formpack_core::ExtractionRules;
///
/// let rules = ExtractionRules::new()
///     .group_with_file("services", "image")
///     .group("faqs")
///     .file("logo");
/// assert_eq!(rules.groups().len(), 2);
/// assert_eq!(rules.files(), ["logo"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRules {
    groups: Vec<GroupRule>,
    files: Vec<String>,
}

impl ExtractionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement-only repeating group (no file field).
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.groups.push(GroupRule {
            name: name.into(),
            file_field: None,
        });
        self
    }

    /// Adds a repeating group whose items carry one file-bearing field.
    pub fn group_with_file(
        mut self,
        name: impl Into<String>,
        file_field: impl Into<String>,
    ) -> Self {
        self.groups.push(GroupRule {
            name: name.into(),
            file_field: Some(file_field.into()),
        });
        self
    }

    /// Adds a top-level file-bearing scalar field.
    pub fn file(mut self, name: impl Into<String>) -> Self {
        self.files.push(name.into());
        self
    }

    pub fn groups(&self) -> &[GroupRule] {
        &self.groups
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn group_rule(&self, name: &str) -> Option<&GroupRule> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn has_file_rule(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }
}
