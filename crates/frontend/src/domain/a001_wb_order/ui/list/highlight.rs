/// Визуальное состояние строки ленты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVisual {
    Normal,
    /// Последняя изменённая заявка
    Mutating,
    /// Пришла по живому каналу
    JustInserted,
}

impl RowVisual {
    pub fn class(self) -> &'static str {
        match self {
            RowVisual::Normal => "feed-row",
            RowVisual::Mutating => "feed-row feed-row--updated",
            RowVisual::JustInserted => "feed-row feed-row--added",
        }
    }
}

/// Mutation wins over a fresh insert
pub fn row_visual_state(row_id: &str, mutating: Option<&str>, just_inserted: Option<&str>) -> RowVisual {
    if mutating == Some(row_id) {
        RowVisual::Mutating
    } else if just_inserted == Some(row_id) {
        RowVisual::JustInserted
    } else {
        RowVisual::Normal
    }
}

/// The mutated row is redrawn as a skeleton while the feed refetches
pub fn shows_skeleton(visual: RowVisual, feed_refetching: bool) -> bool {
    visual == RowVisual::Mutating && feed_refetching
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_state() {
        assert_eq!(row_visual_state("1", None, None), RowVisual::Normal);
        assert_eq!(row_visual_state("1", Some("1"), None), RowVisual::Mutating);
        assert_eq!(row_visual_state("1", None, Some("1")), RowVisual::JustInserted);
        assert_eq!(row_visual_state("1", Some("1"), Some("1")), RowVisual::Mutating);
        assert_eq!(row_visual_state("1", Some("2"), Some("3")), RowVisual::Normal);
    }

    #[test]
    fn test_skeleton_only_while_refetching() {
        assert!(shows_skeleton(RowVisual::Mutating, true));
        assert!(!shows_skeleton(RowVisual::Mutating, false));
        assert!(!shows_skeleton(RowVisual::JustInserted, true));
    }
}
