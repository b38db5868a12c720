//! Choice catalogs - the fixed option sets offered at each wizard stage.
//!
//! Every option has a stable machine key (the serde name, snake_case) and a
//! display label. Catalog lookups never fail loudly: unknown values parse to
//! `None` and the predicates return `false`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for the free-text sentinel in the objective and content catalogs.
pub const OTHER_LABEL: &str = "Other (please specify)";

pub const APP_TITLE: &str = "ThinkAI";
pub const APP_TAGLINE: &str = "ThinkAI - AI Decision-Making Assistant";
pub const APP_INTRO: &str = "ThinkAI is an AI-powered decision-making assistant that helps users determine the most appropriate AI or machine learning approach based on their needs. Whether you're looking to automate tasks, analyze data, or generate content, ThinkAI guides you through a series of questions to assess your goals, data availability, and business requirements. The app then provides AI-generated recommendations on suitable models, tools, and approaches to build your solution, empowering users to harness AI effectively even without extensive technical knowledge.";
pub const CLOSING_NOTE: &str = "This application is designed to guide you through the AI decision-making process and provide AI-generated assistance. Use the information and recommendations to advance your AI projects.";

/// A fixed, ordered option set.
pub trait Choice: Copy + PartialEq + 'static {
    /// Catalog name, used in rendered catalogs and messages.
    const CATALOG: &'static str;

    /// Returns every option in display order.
    fn all() -> &'static [Self];

    /// Stable machine key.
    fn key(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Looks an option up by key or label (labels compare case-insensitively).
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|option| option.key() == value || option.label().eq_ignore_ascii_case(value))
    }
}

/// One rendered catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Renders a catalog as key/label pairs for the UI collaborator.
pub fn catalog_of<T: Choice>() -> Vec<ChoiceOption> {
    T::all()
        .iter()
        .map(|option| ChoiceOption {
            key: option.key(),
            label: option.label(),
        })
        .collect()
}

/// Returns true if the selection contains at least one item.
pub fn is_non_empty_selection<T>(selection: &[T]) -> bool {
    !selection.is_empty()
}

/// Returns true if `value` names an option of catalog `T`.
pub fn is_known_option<T: Choice>(value: &str) -> bool {
    T::parse(value).is_some()
}

macro_rules! impl_display_via_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Goal
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level user intent; selects the sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    AutomateOrPredict,
    AnalyzeInsights,
    CreateContent,
    NoneOfTheAbove,
}

impl Goal {
    /// True for the goals that run the data-driven sub-flow.
    pub fn is_data_driven(&self) -> bool {
        matches!(self, Goal::AutomateOrPredict | Goal::AnalyzeInsights)
    }
}

impl Choice for Goal {
    const CATALOG: &'static str = "goals";

    fn all() -> &'static [Self] {
        &[
            Goal::AutomateOrPredict,
            Goal::AnalyzeInsights,
            Goal::CreateContent,
            Goal::NoneOfTheAbove,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Goal::AutomateOrPredict => "automate_or_predict",
            Goal::AnalyzeInsights => "analyze_insights",
            Goal::CreateContent => "create_content",
            Goal::NoneOfTheAbove => "none_of_the_above",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Goal::AutomateOrPredict => "Automate a task or make predictions based on data.",
            Goal::AnalyzeInsights => "Analyze data for insights.",
            Goal::CreateContent => "Create new content (e.g., text, images, music).",
            Goal::NoneOfTheAbove => "None of the above.",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data availability
// ─────────────────────────────────────────────────────────────────────────────

/// Answer to "Do you have data related to your task?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataAvailability {
    Yes,
    No,
}

impl DataAvailability {
    pub fn as_bool(&self) -> bool {
        matches!(self, DataAvailability::Yes)
    }
}

impl Choice for DataAvailability {
    const CATALOG: &'static str = "data_availability";

    fn all() -> &'static [Self] {
        &[DataAvailability::Yes, DataAvailability::No]
    }

    fn key(&self) -> &'static str {
        match self {
            DataAvailability::Yes => "yes",
            DataAvailability::No => "no",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DataAvailability::Yes => "Yes",
            DataAvailability::No => "No",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data types
// ─────────────────────────────────────────────────────────────────────────────

/// Kinds of data a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Numerical,
    Categorical,
    Text,
    Image,
    Audio,
    TimeSeries,
    Geospatial,
}

impl DataType {
    /// Short name without the example hint, e.g. "Numerical data".
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Numerical => "Numerical data",
            DataType::Categorical => "Categorical data",
            DataType::Text => "Text data",
            DataType::Image => "Image data",
            DataType::Audio => "Audio data",
            DataType::TimeSeries => "Time series data",
            DataType::Geospatial => "Geospatial data",
        }
    }
}

impl Choice for DataType {
    const CATALOG: &'static str = "data_types";

    fn all() -> &'static [Self] {
        &[
            DataType::Numerical,
            DataType::Categorical,
            DataType::Text,
            DataType::Image,
            DataType::Audio,
            DataType::TimeSeries,
            DataType::Geospatial,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            DataType::Numerical => "numerical",
            DataType::Categorical => "categorical",
            DataType::Text => "text",
            DataType::Image => "image",
            DataType::Audio => "audio",
            DataType::TimeSeries => "time_series",
            DataType::Geospatial => "geospatial",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DataType::Numerical => "Numerical data (e.g., sales figures, measurements)",
            DataType::Categorical => "Categorical data (e.g., product categories, labels)",
            DataType::Text => "Text data (e.g., reviews, articles)",
            DataType::Image => "Image data (e.g., photos, scans)",
            DataType::Audio => "Audio data (e.g., recordings, speech)",
            DataType::TimeSeries => "Time series data (e.g., stock prices over time)",
            DataType::Geospatial => "Geospatial data (e.g., location coordinates)",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Objectives
// ─────────────────────────────────────────────────────────────────────────────

/// What the user wants to do with their data. `Other` is the free-text sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Predict,
    Classify,
    DetectAnomalies,
    Cluster,
    ReduceDimensionality,
    Recommend,
    SentimentAnalysis,
    RecognizePatterns,
    Other,
}

impl Objective {
    pub fn is_other(&self) -> bool {
        matches!(self, Objective::Other)
    }
}

impl Choice for Objective {
    const CATALOG: &'static str = "objectives";

    fn all() -> &'static [Self] {
        &[
            Objective::Predict,
            Objective::Classify,
            Objective::DetectAnomalies,
            Objective::Cluster,
            Objective::ReduceDimensionality,
            Objective::Recommend,
            Objective::SentimentAnalysis,
            Objective::RecognizePatterns,
            Objective::Other,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Objective::Predict => "predict",
            Objective::Classify => "classify",
            Objective::DetectAnomalies => "detect_anomalies",
            Objective::Cluster => "cluster",
            Objective::ReduceDimensionality => "reduce_dimensionality",
            Objective::Recommend => "recommend",
            Objective::SentimentAnalysis => "sentiment_analysis",
            Objective::RecognizePatterns => "recognize_patterns",
            Objective::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Objective::Predict => "Predict future values or trends",
            Objective::Classify => "Classify data into categories",
            Objective::DetectAnomalies => "Detect anomalies or outliers",
            Objective::Cluster => "Cluster data into groups",
            Objective::ReduceDimensionality => "Reduce data dimensionality",
            Objective::Recommend => "Generate recommendations",
            Objective::SentimentAnalysis => "Perform sentiment analysis",
            Objective::RecognizePatterns => "Recognize patterns or objects in data",
            Objective::Other => OTHER_LABEL,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content types
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of content to generate. `Other` is the free-text sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Images,
    Audio,
    Video,
    Other,
}

impl ContentType {
    pub fn is_other(&self) -> bool {
        matches!(self, ContentType::Other)
    }
}

impl Choice for ContentType {
    const CATALOG: &'static str = "content_types";

    fn all() -> &'static [Self] {
        &[
            ContentType::Text,
            ContentType::Images,
            ContentType::Audio,
            ContentType::Video,
            ContentType::Other,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Images => "images",
            ContentType::Audio => "audio",
            ContentType::Video => "video",
            ContentType::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "Text (e.g., articles, stories)",
            ContentType::Images => "Images (e.g., artwork, designs)",
            ContentType::Audio => "Audio (e.g., music, voiceovers)",
            ContentType::Video => "Video (e.g., animations)",
            ContentType::Other => OTHER_LABEL,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Complexity
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Complex,
}

impl Choice for Complexity {
    const CATALOG: &'static str = "complexity_levels";

    fn all() -> &'static [Self] {
        &[Complexity::Simple, Complexity::Complex]
    }

    fn key(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Complex => "complex",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Complex => "Complex",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dataset size
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl Choice for DatasetSize {
    const CATALOG: &'static str = "dataset_sizes";

    fn all() -> &'static [Self] {
        &[DatasetSize::Small, DatasetSize::Medium, DatasetSize::Large]
    }

    fn key(&self) -> &'static str {
        match self {
            DatasetSize::Small => "small",
            DatasetSize::Medium => "medium",
            DatasetSize::Large => "large",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DatasetSize::Small => "Small",
            DatasetSize::Medium => "Medium",
            DatasetSize::Large => "Large",
        }
    }
}

impl_display_via_label!(
    Goal,
    DataAvailability,
    DataType,
    Objective,
    ContentType,
    Complexity,
    DatasetSize,
);
