//! Storage quota summary as reported by the server.

use serde::{Deserialize, Serialize};

/// Fixed file categories the server reports usage for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Audio files.
    Audio,
    /// Video files.
    Video,
    /// Images.
    Images,
    /// Documents.
    Documents,
    /// Everything else.
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Audio,
        Category::Video,
        Category::Images,
        Category::Documents,
        Category::Other,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Audio => "Audio",
            Category::Video => "Video",
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Other => "Other",
        }
    }
}

/// Per-category usage in megabytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    #[serde(default)]
    pub audio: f64,
    #[serde(default)]
    pub video: f64,
    #[serde(default)]
    pub images: f64,
    #[serde(default)]
    pub documents: f64,
    #[serde(default)]
    pub other: f64,
}

impl CategoryUsage {
    /// Usage for one category.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Audio => self.audio,
            Category::Video => self.video,
            Category::Images => self.images,
            Category::Documents => self.documents,
            Category::Other => self.other,
        }
    }

    /// `(category, megabytes)` pairs in display order.
    pub fn entries(&self) -> Vec<(Category, f64)> {
        Category::ALL.iter().map(|c| (*c, self.get(*c))).collect()
    }
}

/// Quota usage snapshot.
///
/// The client does not validate the server's arithmetic: used + free need
/// not equal the limit when category figures are stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaSummary {
    /// Total megabytes in use.
    pub total_used_mb: f64,
    /// Configured limit in megabytes.
    pub limit_mb: f64,
    /// Free megabytes as reported by the server.
    #[serde(default)]
    pub free_mb: Option<f64>,
    /// Usage broken down by category.
    #[serde(default)]
    pub by_category_mb: CategoryUsage,
}

impl QuotaSummary {
    /// Free megabytes, derived from limit − used when the server omitted it,
    /// and never negative.
    pub fn free(&self) -> f64 {
        self.free_mb
            .unwrap_or(self.limit_mb - self.total_used_mb)
            .max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_stats_payload() {
        let summary: QuotaSummary = serde_json::from_str(
            r#"{
                "total_used_mb": 120.5,
                "limit_mb": 1024,
                "free_mb": 903.5,
                "by_category_mb": { "audio": 10, "video": 80.5, "images": 20, "documents": 10, "other": 0 }
            }"#,
        )
        .unwrap();
        assert_eq!(summary.by_category_mb.get(Category::Video), 80.5);
        assert_eq!(summary.free(), 903.5);
        assert_eq!(summary.by_category_mb.entries().len(), 5);
    }

    #[test]
    fn test_free_derived_and_clamped() {
        let over = QuotaSummary {
            total_used_mb: 120.0,
            limit_mb: 100.0,
            ..Default::default()
        };
        assert_eq!(over.free(), 0.0);

        let under = QuotaSummary {
            total_used_mb: 60.0,
            limit_mb: 100.0,
            ..Default::default()
        };
        assert_eq!(under.free(), 40.0);
    }
}
