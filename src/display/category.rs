//! Category display formatting

use crate::models::{CategorySet, GroupId};

/// Format a group's category list, one label per line
pub fn format_category_list(group: &GroupId, categories: Option<&CategorySet>) -> String {
    let Some(categories) = categories else {
        return format!(
            "No categories configured for group {}.\n\nRun 'gledger category set {} \"Food, Rent\"' to add some.\n",
            group, group
        );
    };

    let mut output = format!("Categories for group {}:\n", group);
    for label in categories.labels() {
        output.push_str(&format!("  - {}\n", label));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_hint() {
        let group = GroupId::parse("-100").unwrap();
        let text = format_category_list(&group, None);
        assert!(text.contains("gledger category set -100"));
    }

    #[test]
    fn test_list() {
        let group = GroupId::parse("home").unwrap();
        let set = CategorySet::parse_list("Food, Rent").unwrap().with_fallback("Other");
        assert_eq!(
            format_category_list(&group, Some(&set)),
            "Categories for group home:\n  - Food\n  - Rent\n  - Other\n"
        );
    }
}
