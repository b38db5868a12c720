//! AnswerSet - the selections collected during one advisor session.
//!
//! # Invariants
//!
//! - Only the fields of the active goal's sub-flow are ever populated;
//!   changing the goal clears the sub-flow fields.
//! - `data_types` is non-empty, duplicate-free and keeps selection order.
//! - An objective selection containing the "other" sentinel always carries
//!   non-empty free text.
//! - A failed setter leaves every field untouched.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::catalog::{
    is_non_empty_selection, Choice, Complexity, ContentType, DataType, DatasetSize, Goal, Objective,
};

/// Business considerations collected in the last data-driven stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessConstraints {
    #[serde(default)]
    pub interpretability: bool,
    #[serde(default)]
    pub accuracy: bool,
    #[serde(default)]
    pub limited_resources: bool,
    #[serde(default)]
    pub dataset_size: DatasetSize,
    #[serde(default)]
    pub quick_deployment: bool,
}

/// Ordered objective selection with the optional free-text "other" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectiveSelection {
    selected: Vec<Objective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other: Option<String>,
}

impl ObjectiveSelection {
    /// Validates a raw selection.
    ///
    /// # Errors
    ///
    /// - `EmptyField("other_objective")` if the sentinel is selected without text
    /// - `EmptyField("objectives")` if nothing is selected
    pub fn new(selected: Vec<Objective>, other: Option<String>) -> Result<Self, ValidationError> {
        let selected = dedup_in_order(selected);
        let other = other
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let other = if selected.iter().any(Objective::is_other) {
            Some(other.ok_or_else(|| ValidationError::empty_field("other_objective"))?)
        } else {
            None
        };

        if !is_non_empty_selection(&selected) {
            return Err(ValidationError::empty_field("objectives"));
        }

        Ok(Self { selected, other })
    }

    /// Free-text objective, present only when the sentinel was selected.
    pub fn other(&self) -> Option<&str> {
        self.other.as_deref()
    }

    pub fn selected(&self) -> &[Objective] {
        &self.selected
    }
}

/// Content to create: a catalog entry or the user's own wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentSelection {
    Catalog(ContentType),
    Custom(String),
}

impl ContentSelection {
    /// Validates a raw content-type answer.
    ///
    /// # Errors
    ///
    /// `EmptyField("content_type")` if the sentinel is chosen without text.
    pub fn new(selected: ContentType, other: Option<String>) -> Result<Self, ValidationError> {
        if !selected.is_other() {
            return Ok(ContentSelection::Catalog(selected));
        }
        other
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(ContentSelection::Custom)
            .ok_or_else(|| ValidationError::empty_field("content_type"))
    }

    /// Text used in the prompt before lowercasing.
    pub fn description(&self) -> &str {
        match self {
            ContentSelection::Catalog(content_type) => content_type.label(),
            ContentSelection::Custom(text) => text,
        }
    }
}

/// All answers collected in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    goal: Option<Goal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_available: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    data_types: Vec<DataType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    objectives: Option<ObjectiveSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_constraints: Option<BusinessConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<ContentSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    complexity: Option<Complexity>,
}

impl AnswerSet {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    /// The user's own description, trimmed; `None` when blank.
    pub fn description(&self) -> Option<&str> {
        self.user_description.as_deref()
    }

    pub fn data_available(&self) -> Option<bool> {
        self.data_available
    }

    pub fn data_types(&self) -> &[DataType] {
        &self.data_types
    }

    pub fn objectives(&self) -> Option<&ObjectiveSelection> {
        self.objectives.as_ref()
    }

    pub fn business_constraints(&self) -> Option<&BusinessConstraints> {
        self.business_constraints.as_ref()
    }

    pub fn content(&self) -> Option<&ContentSelection> {
        self.content.as_ref()
    }

    pub fn complexity(&self) -> Option<Complexity> {
        self.complexity
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutators
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets the goal. Choosing a different goal clears every sub-flow field;
    /// the free-text description is kept.
    pub fn set_goal(&mut self, goal: Goal) {
        if self.goal == Some(goal) {
            return;
        }
        *self = Self {
            goal: Some(goal),
            user_description: self.user_description.take(),
            ..Self::default()
        };
    }

    /// Sets or clears the free-text description.
    pub fn set_description(&mut self, text: Option<String>) {
        self.user_description = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
    }

    pub fn set_data_available(&mut self, available: bool) -> Result<(), ValidationError> {
        self.require_data_driven("data_available")?;
        self.data_available = Some(available);
        Ok(())
    }

    pub fn set_data_types(&mut self, data_types: Vec<DataType>) -> Result<(), ValidationError> {
        self.require_data_driven("data_types")?;
        let data_types = dedup_in_order(data_types);
        if !is_non_empty_selection(&data_types) {
            return Err(ValidationError::empty_field("data_types"));
        }
        self.data_types = data_types;
        Ok(())
    }

    pub fn set_objectives(&mut self, objectives: ObjectiveSelection) -> Result<(), ValidationError> {
        self.require_data_driven("objectives")?;
        self.objectives = Some(objectives);
        Ok(())
    }

    pub fn set_business_constraints(
        &mut self,
        constraints: BusinessConstraints,
    ) -> Result<(), ValidationError> {
        self.require_data_driven("business_constraints")?;
        self.business_constraints = Some(constraints);
        Ok(())
    }

    pub fn set_content(&mut self, content: ContentSelection) -> Result<(), ValidationError> {
        self.require_content_goal("content_type")?;
        self.content = Some(content);
        Ok(())
    }

    pub fn set_complexity(&mut self, complexity: Complexity) -> Result<(), ValidationError> {
        self.require_content_goal("complexity")?;
        self.complexity = Some(complexity);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completeness checks used by prompt synthesis
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn require_data_types(&self) -> Result<&[DataType], ValidationError> {
        if is_non_empty_selection(&self.data_types) {
            Ok(&self.data_types)
        } else {
            Err(ValidationError::empty_field("data_types"))
        }
    }

    pub(crate) fn require_objectives(&self) -> Result<&ObjectiveSelection, ValidationError> {
        self.objectives
            .as_ref()
            .ok_or_else(|| ValidationError::empty_field("objectives"))
    }

    pub(crate) fn require_business_constraints(
        &self,
    ) -> Result<&BusinessConstraints, ValidationError> {
        self.business_constraints
            .as_ref()
            .ok_or_else(|| ValidationError::empty_field("business_constraints"))
    }

    pub(crate) fn require_content(&self) -> Result<&ContentSelection, ValidationError> {
        self.content
            .as_ref()
            .ok_or_else(|| ValidationError::empty_field("content_type"))
    }

    pub(crate) fn require_complexity(&self) -> Result<Complexity, ValidationError> {
        self.complexity
            .ok_or_else(|| ValidationError::empty_field("complexity"))
    }

    fn require_data_driven(&self, field: &str) -> Result<(), ValidationError> {
        match self.goal {
            Some(goal) if goal.is_data_driven() => Ok(()),
            _ => Err(ValidationError::invalid_format(
                field,
                "only asked when automating, predicting or analyzing data",
            )),
        }
    }

    fn require_content_goal(&self, field: &str) -> Result<(), ValidationError> {
        match self.goal {
            Some(Goal::CreateContent) => Ok(()),
            _ => Err(ValidationError::invalid_format(
                field,
                "only asked when creating new content",
            )),
        }
    }
}

fn dedup_in_order<T: PartialEq + Copy>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_driven() -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.set_goal(Goal::AutomateOrPredict);
        answers
    }

    #[test]
    fn objective_selection_requires_other_text() {
        let err = ObjectiveSelection::new(vec![Objective::Predict, Objective::Other], None)
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("other_objective"));

        let err = ObjectiveSelection::new(vec![Objective::Other], Some("   ".to_string()))
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("other_objective"));
    }

    #[test]
    fn objective_selection_requires_at_least_one() {
        let err = ObjectiveSelection::new(vec![], Some("ignored".to_string())).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("objectives"));
    }

    #[test]
    fn objective_selection_drops_other_text_without_sentinel() {
        let selection =
            ObjectiveSelection::new(vec![Objective::Cluster], Some("stray".to_string())).unwrap();
        assert_eq!(selection.other(), None);
    }

    #[test]
    fn objective_selection_keeps_order_and_trims_other_text() {
        let selection = ObjectiveSelection::new(
            vec![Objective::Other, Objective::Classify, Objective::Classify],
            Some(" Forecast Churn ".to_string()),
        )
        .unwrap();
        assert_eq!(selection.selected(), &[Objective::Other, Objective::Classify]);
        assert_eq!(selection.other(), Some("Forecast Churn"));
    }

    #[test]
    fn content_selection_other_needs_text() {
        assert!(ContentSelection::new(ContentType::Other, None).is_err());
        assert!(ContentSelection::new(ContentType::Other, Some(String::new())).is_err());
        assert_eq!(
            ContentSelection::new(ContentType::Other, Some("3D models".to_string())).unwrap(),
            ContentSelection::Custom("3D models".to_string())
        );
        assert_eq!(
            ContentSelection::new(ContentType::Video, Some("ignored".to_string())).unwrap(),
            ContentSelection::Catalog(ContentType::Video)
        );
    }

    #[test]
    fn data_types_are_deduplicated_in_order() {
        let mut answers = data_driven();
        answers
            .set_data_types(vec![DataType::Text, DataType::Numerical, DataType::Text])
            .unwrap();
        assert_eq!(answers.data_types(), &[DataType::Text, DataType::Numerical]);
    }

    #[test]
    fn empty_data_types_leave_previous_selection_untouched() {
        let mut answers = data_driven();
        answers.set_data_types(vec![DataType::Audio]).unwrap();
        assert!(answers.set_data_types(vec![]).is_err());
        assert_eq!(answers.data_types(), &[DataType::Audio]);
    }

    #[test]
    fn content_fields_rejected_for_data_goal() {
        let mut answers = data_driven();
        assert!(answers.set_complexity(Complexity::Simple).is_err());
        assert!(answers
            .set_content(ContentSelection::Catalog(ContentType::Text))
            .is_err());
        assert_eq!(answers.complexity(), None);
    }

    #[test]
    fn data_fields_rejected_for_content_goal() {
        let mut answers = AnswerSet::new();
        answers.set_goal(Goal::CreateContent);
        assert!(answers.set_data_available(true).is_err());
        assert!(answers.set_data_types(vec![DataType::Image]).is_err());
    }

    #[test]
    fn changing_goal_clears_sub_flow_but_keeps_description() {
        let mut answers = data_driven();
        answers.set_description(Some("sort my invoices".to_string()));
        answers.set_data_available(true).unwrap();
        answers.set_data_types(vec![DataType::Text]).unwrap();

        answers.set_goal(Goal::CreateContent);

        assert_eq!(answers.goal(), Some(Goal::CreateContent));
        assert_eq!(answers.data_available(), None);
        assert!(answers.data_types().is_empty());
        assert_eq!(answers.description(), Some("sort my invoices"));
    }

    #[test]
    fn reselecting_same_goal_keeps_answers() {
        let mut answers = data_driven();
        answers.set_data_available(true).unwrap();
        answers.set_goal(Goal::AutomateOrPredict);
        assert_eq!(answers.data_available(), Some(true));
    }

    #[test]
    fn blank_description_is_cleared() {
        let mut answers = AnswerSet::new();
        answers.set_description(Some("  ".to_string()));
        assert_eq!(answers.description(), None);
        answers.set_description(Some("  tag photos ".to_string()));
        assert_eq!(answers.description(), Some("tag photos"));
    }

    #[test]
    fn business_constraints_deserialize_with_defaults() {
        let constraints: BusinessConstraints =
            serde_json::from_str(r#"{"accuracy": true}"#).unwrap();
        assert!(constraints.accuracy);
        assert!(!constraints.interpretability);
        assert_eq!(constraints.dataset_size, DatasetSize::Small);
    }
}
